//! Terminal renderer: styled summary of what was injected and deployed.

use colored::Colorize;

use crate::models::RunReport;
use crate::output::ReportRenderer;

/// Terminal output renderer with colored, flowing text.
pub struct TerminalRenderer;

impl ReportRenderer for TerminalRenderer {
    fn render(&self, report: &RunReport) -> String {
        let mut output = String::new();

        let headline = if report.dry_run {
            format!("  {} plan for {}\n", "◌".cyan().bold(), report.releases.app.bold())
        } else {
            format!("  {} patched {}\n", "✔".green().bold(), report.releases.app.bold())
        };
        output.push_str(&headline);
        output.push_str(&format!(
            "    {} {}\n",
            "bundle:".dimmed(),
            report.releases.bundle
        ));

        if report.entries.is_empty() {
            output.push_str(&format!("    {}\n", "no changed files — plain redeploy".dimmed()));
        } else {
            for entry in &report.entries {
                output.push_str(&format!(
                    "    {} {} {}\n",
                    entry.key.cyan(),
                    "←".dimmed(),
                    entry.path
                ));
            }
        }

        if let Some(ref deploy_output) = report.deploy_output {
            if !deploy_output.trim().is_empty() {
                output.push('\n');
                for line in deploy_output.trim_end().lines() {
                    output.push_str(&format!("  {}\n", line.dimmed()));
                }
            }
        }

        output
    }
}
