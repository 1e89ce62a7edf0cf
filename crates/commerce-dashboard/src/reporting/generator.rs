use chrono::Local;
use serde::Serialize;
use std::fmt::Write;
use tracing::debug;

use crate::dashboard::{Controls, SectionView, compute_all};
use crate::error::Result;
use crate::join::JoinReport;
use crate::loader::{Dataset, DatasetSummary};
use crate::presentation::render_section;

// ============================================================================
// Report Types
// ============================================================================

/// All five dashboard sections computed with one set of controls.
///
/// Used for both the text report (`--report`) and JSON output (`--json`).
#[derive(Debug, Clone, Serialize)]
pub struct DashboardReport {
    /// Timestamp when the report was generated
    pub generated_at: String,
    /// Directory the input files were read from
    pub data_dir: String,
    /// Row counts of the loaded tables
    pub dataset: DatasetSummary,
    /// Row accounting of the two enrichment joins
    pub joins: JoinSummary,
    /// Control values the sections were computed with
    pub controls: Controls,
    pub sections: Vec<SectionView>,
}

#[derive(Debug, Clone, Copy, Serialize)]
pub struct JoinSummary {
    pub product_categories: JoinReport,
    pub line_items: JoinReport,
}

// ============================================================================
// Generator
// ============================================================================

pub struct ReportGenerator;

impl ReportGenerator {
    /// Compute every section and bundle them with dataset metadata.
    pub fn build(data: &Dataset, controls: &Controls, data_dir: &str) -> DashboardReport {
        let sections = compute_all(data, controls);
        debug!("Report built with {} sections", sections.len());

        DashboardReport {
            generated_at: Local::now().format("%Y-%m-%d %H:%M:%S").to_string(),
            data_dir: data_dir.to_string(),
            dataset: data.summary(),
            joins: JoinSummary {
                product_categories: data.product_join,
                line_items: data.line_item_join,
            },
            controls: *controls,
            sections,
        }
    }

    pub fn to_json(report: &DashboardReport) -> Result<String> {
        Ok(serde_json::to_string_pretty(report)?)
    }

    /// Human-readable rendering of the whole report.
    pub fn to_text(report: &DashboardReport) -> Result<String> {
        let mut out = String::new();
        let summary = &report.dataset;

        let _ = writeln!(out, "E-commerce Analysis Dashboard");
        let _ = writeln!(out, "Generated: {}", report.generated_at);
        let _ = writeln!(out, "Data: {}", report.data_dir);
        let _ = writeln!(
            out,
            "  {} customers, {} sellers, {} orders, {} order items",
            summary.customers, summary.sellers, summary.orders, summary.order_items
        );
        let _ = writeln!(
            out,
            "  {} products, {} category translations",
            summary.products, summary.category_translations
        );
        let _ = writeln!(out, "  {} enriched line items", summary.enriched_line_items);
        let _ = writeln!(out);

        for section in &report.sections {
            out.push_str(&render_section(section)?);
            let _ = writeln!(out);
        }

        Ok(out)
    }
}
