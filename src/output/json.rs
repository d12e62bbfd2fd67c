//! JSON renderer for machine consumers.

use crate::models::RunReport;
use crate::output::ReportRenderer;

/// Renders the full report as pretty-printed JSON.
pub struct JsonRenderer;

impl ReportRenderer for JsonRenderer {
    fn render(&self, report: &RunReport) -> String {
        // RunReport is plain data; serialization cannot fail in practice.
        serde_json::to_string_pretty(report).unwrap_or_else(|e| {
            format!("{{\"error\": \"failed to serialize report: {e}\"}}")
        })
    }
}
