//! # CLI Command Implementations
//!
//! Each command prints plain text, or pretty JSON with `--json-mode`.

use super::render;
use crate::api::{self, AppState, ClassifyResponse};
use crate::config::Config;
use crate::source::{load_sheets, load_sheets_strict};
use innodash_core::{
    CustomerUseView, DashboardError, DashboardView, ExperimentDetail, PipelineFilter,
    PipelineView, SheetData, stack_buckets,
};
use serde::Serialize;

fn print_json<T: Serialize>(value: &T) {
    println!("{}", serde_json::to_string_pretty(value).unwrap_or_default());
}

fn pipeline_filter(status: Option<String>, customer: Option<String>) -> PipelineFilter {
    let mut filter = PipelineFilter::all();
    if let Some(status) = status {
        filter = filter.with_status(status);
    }
    if let Some(customer) = customer {
        filter = filter.with_customer(customer);
    }
    filter
}

/// Load the sheets for a data command.
///
/// A data command needs a source. With `strict` a load failure is an error;
/// otherwise it yields the empty sheets.
pub async fn load_data(config: &Config) -> Result<SheetData, DashboardError> {
    let source = config.data_source().ok_or_else(|| {
        DashboardError::Config(
            "No data source configured (use --source, INNODASH_SOURCE or innodash.toml)"
                .to_string(),
        )
    })?;

    if config.strict {
        load_sheets_strict(&source).await
    } else {
        Ok(load_sheets(&source).await)
    }
}

// =============================================================================
// SERVE COMMAND
// =============================================================================

/// Start the HTTP server.
pub async fn cmd_serve(config: Config) -> Result<(), DashboardError> {
    let source = config.data_source();

    let sheets = match &source {
        Some(source) if config.strict => load_sheets_strict(source).await?,
        Some(source) => load_sheets(source).await,
        None => {
            tracing::warn!("No data source configured; serving the empty dashboard");
            SheetData::empty()
        }
    };

    println!("Innovation Dashboard Server Starting...");
    println!();
    println!("Configuration:");
    println!("  Host:   {}", config.host);
    println!("  Port:   {}", config.port);
    println!(
        "  Source: {}",
        source
            .as_ref()
            .map_or_else(|| "(none)".to_string(), ToString::to_string)
    );
    println!();
    println!("Endpoints:");
    println!("  GET  /health               - Health check");
    println!("  GET  /dashboard            - Every section");
    println!("  GET  /pipeline             - Pipeline table (?status=&customer=)");
    println!("  GET  /stack                - Stack buckets");
    println!("  GET  /customers            - Customer-use table");
    println!("  GET  /usage                - Usage summary");
    println!("  GET  /artifacts            - Knowledge-sharing feed");
    println!("  GET  /experiments/{{title}}  - Experiment detail");
    println!("  GET  /classify?status=     - Classify a status");
    println!("  POST /refresh              - Re-fetch the source");
    println!();
    println!("Press Ctrl+C to stop");
    println!();

    let mut state = AppState::new(sheets);
    if let Some(source) = source {
        state = state.with_source(source);
    }
    api::run_server(&config.addr(), state).await
}

// =============================================================================
// VIEW COMMANDS
// =============================================================================

/// Show every dashboard section.
pub fn cmd_dashboard(
    data: &SheetData,
    json_mode: bool,
    status: Option<String>,
    customer: Option<String>,
) -> Result<(), DashboardError> {
    let view = DashboardView::build(data, &pipeline_filter(status, customer));
    if json_mode {
        print_json(&view);
    } else {
        print!("{}", render::render_dashboard(&view));
    }
    Ok(())
}

/// Show the pipeline table.
pub fn cmd_pipeline(
    data: &SheetData,
    json_mode: bool,
    status: Option<String>,
    customer: Option<String>,
) -> Result<(), DashboardError> {
    let view = PipelineView::build(&data.experiments, &pipeline_filter(status, customer));
    if json_mode {
        print_json(&view);
    } else {
        print!("{}", render::render_pipeline(&view));
    }
    Ok(())
}

/// Show the stack buckets.
pub fn cmd_stack(data: &SheetData, json_mode: bool) -> Result<(), DashboardError> {
    let buckets = stack_buckets(&data.experiments);
    if json_mode {
        print_json(&buckets);
    } else {
        print!("{}", render::render_stack(&buckets));
    }
    Ok(())
}

/// Show the customer-use table.
pub fn cmd_customers(data: &SheetData, json_mode: bool) -> Result<(), DashboardError> {
    let view = CustomerUseView::build(&data.experiments);
    if json_mode {
        print_json(&view);
    } else {
        print!("{}", render::render_customer_use(&view));
    }
    Ok(())
}

/// Show one experiment in detail.
pub fn cmd_experiment(data: &SheetData, json_mode: bool, title: &str) -> Result<(), DashboardError> {
    let experiment = data
        .find_experiment(title)
        .ok_or_else(|| DashboardError::NotFound(format!("Experiment '{}'", title)))?;
    let detail = ExperimentDetail::from_experiment(experiment);

    if json_mode {
        print_json(&detail);
    } else {
        print!("{}", render::render_experiment(&detail));
    }
    Ok(())
}

// =============================================================================
// CLASSIFY COMMAND
// =============================================================================

/// Classify a status string.
pub fn cmd_classify(status: &str, json_mode: bool) -> Result<(), DashboardError> {
    let result = ClassifyResponse::from_status(status);
    if json_mode {
        print_json(&result);
    } else {
        print!("{}", render::render_classification(&result));
    }
    Ok(())
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use innodash_core::Experiment;

    #[test]
    fn filter_from_flags() {
        assert!(pipeline_filter(None, None).is_all());
        let filter = pipeline_filter(Some("learn".to_string()), Some("Acme".to_string()));
        assert!(filter.matches(&Experiment::new("A", "LEARN").with_customers("Acme, Beta")));
        assert!(!filter.matches(&Experiment::new("B", "learn").with_customers("Beta")));
    }

    #[test]
    fn missing_experiment_is_not_found() {
        let data = SheetData::with_experiments(vec![Experiment::new("Routing", "learn")]);
        assert!(cmd_experiment(&data, true, "routing").is_ok());
        assert!(matches!(
            cmd_experiment(&data, false, "Triage"),
            Err(DashboardError::NotFound(_))
        ));
    }

    #[tokio::test]
    async fn data_commands_need_a_source() {
        let result = load_data(&Config::default()).await;
        assert!(matches!(result, Err(DashboardError::Config(_))));
    }
}
