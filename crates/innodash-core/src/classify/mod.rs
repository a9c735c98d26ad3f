//! # Classify Module
//!
//! The Stage Classifier: two independent lookup schemes over the same
//! free-text status field.
//!
//! - `stage`: the ordered progression, yielding a per-stage matrix
//!   (`yes` / `wip` / `no`) for the pipeline table
//! - `bucket`: the five stack buckets, yielding at most one bucket
//! - `score`: the completion score used to sort most advanced first
//!
//! Every function here is pure and infallible. The lookup tables are
//! immutable statics shared across calls.

mod bucket;
mod score;
mod stage;

pub use bucket::*;
pub use score::*;
pub use stage::*;
