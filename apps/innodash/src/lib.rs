//! # innodash
//!
//! The Innovation Dashboard application: source loading, configuration,
//! the CLI and the HTTP API around `innodash-core`.

pub mod api;
pub mod cli;
pub mod config;
pub mod source;
