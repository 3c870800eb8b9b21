//! synapse-report — export sinks for the detailed quiz report.

pub mod export;
pub mod html;
pub mod json;

pub use export::{render_report, write_report, ExportFormat};
