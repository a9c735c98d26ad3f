//! # Text Rendering
//!
//! Plain-text rendering of dashboard views for terminal output.

use crate::api::ClassifyResponse;
use innodash_core::{
    CustomerUseView, DashboardView, ExperimentDetail, KnowledgeView, MetricCard, PipelineView,
    StackBucket, filter::pipeline_columns,
};

/// Render a section heading with an underline.
fn heading(title: &str) -> String {
    format!("{}\n{}\n", title, "=".repeat(title.chars().count()))
}

fn pad(text: &str, width: usize) -> String {
    let len = text.chars().count();
    format!("{}{}", text, " ".repeat(width.saturating_sub(len)))
}

// =============================================================================
// SECTIONS
// =============================================================================

/// Render the metric cards, one per line.
pub fn render_metrics(cards: &[MetricCard]) -> String {
    let mut out = heading("Metrics");
    for card in cards {
        let mut line = format!("{} {:<20} {}", card.icon, card.title, card.current);
        if let Some(target) = card.target {
            line.push_str(&format!(" / {}", target));
        }
        if let Some(percent) = card.percent_of_goal {
            line.push_str(&format!("  ({}% of goal)", percent));
        }
        if let Some(label) = &card.label {
            line.push_str(&format!("  {}", label));
        }
        if let Some(last_week) = &card.last_week {
            line.push_str(&format!("  last week: {}", last_week));
        }
        if let Some(trend) = card.trend {
            line.push_str(&format!(" {} {}", trend.arrow(), trend.delta));
        }
        out.push_str(&line);
        out.push('\n');
    }
    out
}

/// Render the pipeline table.
pub fn render_pipeline(view: &PipelineView) -> String {
    let mut out = heading("Pipeline");

    if !view.filter.is_all() {
        out.push_str(&format!(
            "Filter: status={} customer={}\n",
            view.filter.status.as_deref().unwrap_or("all"),
            view.filter.customer.as_deref().unwrap_or("all")
        ));
    }

    if view.rows.is_empty() {
        out.push_str("No experiments found\n");
        return out;
    }

    let columns = pipeline_columns();
    let title_width = view
        .rows
        .iter()
        .map(|r| r.title.chars().count())
        .chain(columns.first().map(|c| c.chars().count()))
        .max()
        .unwrap_or(0);
    let stage_width = columns
        .iter()
        .skip(1)
        .map(|c| c.chars().count())
        .max()
        .unwrap_or(0);

    let mut header = String::new();
    for (i, column) in columns.iter().enumerate() {
        let width = if i == 0 { title_width } else { stage_width };
        header.push_str(&pad(column, width));
        header.push_str("  ");
    }
    out.push_str(header.trim_end());
    out.push('\n');

    for row in &view.rows {
        let mut line = pad(&row.title, title_width);
        line.push_str("  ");
        for stage in &row.stages {
            line.push_str(&pad(stage.cell(), stage_width));
            line.push_str("  ");
        }
        out.push_str(line.trim_end());
        out.push('\n');
    }
    out
}

/// Render the stack buckets. Empty buckets read `-`.
pub fn render_stack(buckets: &[StackBucket]) -> String {
    let mut out = heading("Stack");
    for bucket in buckets {
        out.push_str(&format!("{} ({})\n", bucket.label, bucket.titles.len()));
        if bucket.titles.is_empty() {
            out.push_str("  -\n");
        }
        for title in &bucket.titles {
            out.push_str(&format!("  {}\n", title));
        }
    }
    out
}

/// Render the customer-use table.
pub fn render_customer_use(view: &CustomerUseView) -> String {
    let mut out = heading(&format!("Customer Use ({})", view.total));
    if view.rows.is_empty() {
        out.push_str("No experiments with usage data\n");
        return out;
    }
    for row in &view.rows {
        out.push_str(&format!(
            "{} | {} | {} | {}\n",
            row.title, row.customers, row.usage_data, row.badge
        ));
    }
    out
}

/// Render the knowledge-sharing feed.
pub fn render_knowledge(view: &KnowledgeView) -> String {
    let mut out = heading(&format!(
        "Knowledge Sharing ({} of {})",
        view.count, view.progress.target
    ));
    if view.entries.is_empty() {
        out.push_str("No knowledge artifacts yet\n");
        return out;
    }
    for entry in &view.entries {
        let mut line = format!("{} {}", entry.icon, entry.title);
        if !entry.date.is_empty() {
            line.push_str(&format!(" - {}", entry.date));
        }
        if !entry.channel.is_empty() {
            line.push_str(&format!(" [{}]", entry.channel));
        }
        if let Some(link) = &entry.link {
            line.push_str(&format!(" <{}>", link));
        }
        out.push_str(&line);
        out.push('\n');
    }
    out
}

/// Render the whole dashboard.
pub fn render_dashboard(view: &DashboardView) -> String {
    [
        heading(&view.title),
        render_metrics(&view.metrics),
        render_pipeline(&view.pipeline),
        render_stack(&view.stack),
        render_customer_use(&view.customer_use),
        render_knowledge(&view.knowledge),
    ]
    .join("\n")
}

// =============================================================================
// DETAIL VIEWS
// =============================================================================

/// Render the detail view of one experiment.
pub fn render_experiment(detail: &ExperimentDetail) -> String {
    let mut out = heading(&detail.title);
    out.push_str(&format!("Status:           {}\n", detail.badge));
    out.push_str(&format!("Description:      {}\n", detail.description));
    out.push_str(&format!("Success function: {}\n", detail.success_function));
    out.push_str(&format!("Usage:            {}\n", detail.usage_data));
    out.push_str(&format!("Customers:        {}\n", detail.customers));
    out.push_str(&format!(
        "Category:         {}\n",
        detail
            .category
            .map_or_else(|| "-".to_string(), |c| c.label().to_string())
    ));
    out.push_str(&format!("Progress:         {}\n", detail.stage_progression));
    if !detail.learnings.is_empty() {
        out.push_str("Learnings:\n");
        for item in &detail.learnings {
            out.push_str(&format!("  - {}\n", item));
        }
    }
    out
}

/// Render the classification of one status.
pub fn render_classification(result: &ClassifyResponse) -> String {
    let mut out = format!("Status:   {}\n", result.badge);
    out.push_str(&format!(
        "Category: {}\n",
        result.category_label.as_deref().unwrap_or("-")
    ));
    out.push_str(&format!("Score:    {}\n", result.score));
    out.push_str(&format!("Stages:   {}\n", result.progression));
    out
}

// =============================================================================
// TESTS
// =============================================================================
