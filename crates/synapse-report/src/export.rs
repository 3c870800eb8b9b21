//! Writing reports to disk in any supported format.

use std::fmt;
use std::path::Path;
use std::str::FromStr;

use anyhow::{Context, Result};

use synapse_core::report::DetailedReport;
use synapse_prefs::Theme;

use crate::html::generate_html;
use crate::json::generate_json;

/// Output formats for the detailed report.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    Text,
    Json,
    Html,
}

impl fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExportFormat::Text => write!(f, "text"),
            ExportFormat::Json => write!(f, "json"),
            ExportFormat::Html => write!(f, "html"),
        }
    }
}

impl FromStr for ExportFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "text" | "txt" => Ok(ExportFormat::Text),
            "json" => Ok(ExportFormat::Json),
            "html" | "htm" => Ok(ExportFormat::Html),
            other => Err(format!("unknown report format: {other}")),
        }
    }
}

impl ExportFormat {
    /// Guess the format from a file extension, defaulting to text.
    pub fn from_path(path: &Path) -> Self {
        path.extension()
            .and_then(|ext| ext.to_str())
            .and_then(|ext| ext.parse().ok())
            .unwrap_or(ExportFormat::Text)
    }
}

/// Render the report in `format`.
pub fn render_report(
    report: &DetailedReport,
    format: ExportFormat,
    theme: &Theme,
    font_size: u32,
) -> Result<String> {
    match format {
        ExportFormat::Text => Ok(report.to_string()),
        ExportFormat::Json => generate_json(report),
        ExportFormat::Html => Ok(generate_html(report, theme, font_size)),
    }
}

/// Write a report to a file, creating parent directories.
pub fn write_report(
    report: &DetailedReport,
    format: ExportFormat,
    path: &Path,
    theme: &Theme,
    font_size: u32,
) -> Result<()> {
    let content = render_report(report, format, theme, font_size)?;
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).with_context(|| {
            format!("failed to create report directory {}", parent.display())
        })?;
    }
    std::fs::write(path, content)
        .with_context(|| format!("failed to write report to {}", path.display()))?;
    Ok(())
}
