//! Report renderers: terminal, markdown (PR comment body), JSON.

pub mod json;
pub mod markdown;
pub mod terminal;

use crate::models::RunReport;

/// Trait for rendering a run report to an output format.
pub trait ReportRenderer {
    /// Render the report to a string.
    fn render(&self, report: &RunReport) -> String;
}
