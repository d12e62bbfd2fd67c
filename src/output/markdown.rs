//! Markdown renderer: the PR comment body.
//!
//! The external commenting collaborator posts this string verbatim; only
//! the body is produced here, transport is someone else's job.

use std::fmt::Write as _;

use crate::models::RunReport;
use crate::output::ReportRenderer;

/// Renders the report as a self-contained markdown comment.
pub struct MarkdownRenderer;

impl ReportRenderer for MarkdownRenderer {
    fn render(&self, report: &RunReport) -> String {
        let mut out = String::new();

        if report.dry_run {
            let _ = writeln!(out, "## Preview patch plan for `{}`", report.releases.app);
            let _ = writeln!(out, "\n_Plan only, nothing was applied._");
        } else {
            let _ = writeln!(out, "## Preview `{}` patched", report.releases.app);
        }

        if report.entries.is_empty() {
            let _ = writeln!(out, "\nNo changed files; the preview was redeployed as-is.");
        } else {
            let _ = writeln!(
                out,
                "\n{} file(s) injected from bundle `{}`:\n",
                report.entries.len(),
                report.releases.bundle
            );
            let _ = writeln!(out, "| Path | Key |");
            let _ = writeln!(out, "| --- | --- |");
            for entry in &report.entries {
                let _ = writeln!(out, "| `{}` | `{}` |", entry.path, entry.key);
            }
        }

        if let Some(ref deploy_output) = report.deploy_output {
            if !deploy_output.trim().is_empty() {
                let fence = fence_for(deploy_output);
                let _ = writeln!(out, "\n<details><summary>Deploy output</summary>\n");
                let _ = writeln!(out, "{fence}\n{}\n{fence}", deploy_output.trim_end());
                let _ = writeln!(out, "\n</details>");
            }
        }

        out
    }
}

/// A code fence longer than any backtick run in `text`, so the content
/// can never close the block early.
fn fence_for(text: &str) -> String {
    let longest_run = text
        .split(|c| c != '`')
        .map(str::len)
        .max()
        .unwrap_or(0);
    "`".repeat(longest_run.max(2) + 1)
}
