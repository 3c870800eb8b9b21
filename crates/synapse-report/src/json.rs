//! JSON report output.

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use serde::Serialize;

use synapse_core::report::DetailedReport;

/// A detailed report stamped with its generation time.
#[derive(Debug, Serialize)]
pub struct ExportedReport<'a> {
    pub generated_at: DateTime<Utc>,
    #[serde(flatten)]
    pub report: &'a DetailedReport,
}

/// Render the report as pretty-printed JSON.
pub fn generate_json(report: &DetailedReport) -> Result<String> {
    let exported = ExportedReport {
        generated_at: Utc::now(),
        report,
    };
    serde_json::to_string_pretty(&exported).context("failed to serialize report")
}
