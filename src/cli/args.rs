//! Clap argument types and config merging.

use clap::{Parser, ValueEnum};
use std::path::PathBuf;

use hotpatch::config::Config;
use hotpatch::models::RunReport;
use hotpatch::output::ReportRenderer;

/// Live-patch Helm preview deployments from pull-request diffs.
#[derive(Parser, Debug)]
#[command(
    name = "hotpatch",
    version = hotpatch::constants::VERSION,
    about = super::ABOUT,
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

/// Available commands.
#[derive(clap::Subcommand, Debug)]
pub enum Command {
    /// Publish changed files as a bundle and upgrade the preview release.
    Inject(Box<InjectArgs>),

    /// Show what an inject run would do, without touching the cluster.
    Plan(Box<InjectArgs>),

    /// Print version information.
    Version,
}

/// Arguments shared by `inject` and `plan`.
#[derive(Parser, Debug)]
pub struct InjectArgs {
    // --- Repo location ---
    /// Path to the repository checkout (default: current directory).
    #[arg(long, default_value = ".")]
    pub path: PathBuf,

    // --- Diff references ---
    /// Base commit reference of the pull request.
    #[arg(long)]
    pub base: String,

    /// Head commit reference of the pull request.
    #[arg(long, default_value = "HEAD")]
    pub head: String,

    // --- Release identity ---
    /// Pull request number; detected from the CI environment when omitted.
    #[arg(long)]
    pub pr: Option<u64>,

    // --- Config overrides ---
    /// Chart reference for the configuration bundle.
    #[arg(long)]
    pub bundle_chart: Option<String>,

    /// Chart reference for the preview application.
    #[arg(long)]
    pub app_chart: Option<String>,

    /// Target namespace for both releases.
    #[arg(long)]
    pub namespace: Option<String>,

    /// Container path the source tree lives under.
    #[arg(long)]
    pub app_root: Option<String>,

    /// Base values source: an http(s) URL or a local file path.
    #[arg(long)]
    pub base_values: Option<String>,

    /// Helm binary to invoke.
    #[arg(long)]
    pub helm_bin: Option<String>,

    // --- Output ---
    /// Output format.
    #[arg(long, default_value = "terminal")]
    pub format: OutputFormat,
}

impl InjectArgs {
    /// Layer CLI flags over a loaded config (flags win).
    pub fn apply_to(&self, config: &mut Config) {
        if let Some(ref chart) = self.bundle_chart {
            config.charts.bundle = chart.clone();
        }
        if let Some(ref chart) = self.app_chart {
            config.charts.app = chart.clone();
        }
        if let Some(ref ns) = self.namespace {
            config.cluster.namespace = Some(ns.clone());
        }
        if let Some(ref root) = self.app_root {
            config.app.root = root.clone();
        }
        if let Some(ref source) = self.base_values {
            config.template.base_values = Some(source.clone());
        }
        if let Some(ref bin) = self.helm_bin {
            config.cluster.helm_bin = bin.clone();
        }
    }
}

/// Output format options.
#[derive(Debug, Clone, Copy, ValueEnum, PartialEq, Eq)]
pub enum OutputFormat {
    Terminal,
    Markdown,
    Json,
}

impl OutputFormat {
    /// Render a report using the renderer for this format.
    pub fn render(&self, report: &RunReport) -> String {
        match self {
            OutputFormat::Terminal => hotpatch::output::terminal::TerminalRenderer.render(report),
            OutputFormat::Markdown => hotpatch::output::markdown::MarkdownRenderer.render(report),
            OutputFormat::Json => hotpatch::output::json::JsonRenderer.render(report),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn parse(argv: &[&str]) -> Cli {
        Cli::try_parse_from(argv).unwrap()
    }

    #[test]
    fn inject_requires_base() {
        let result = Cli::try_parse_from(["hotpatch", "inject"]);
        assert!(result.is_err());
    }

    #[test]
    fn inject_with_defaults() {
        let cli = parse(&["hotpatch", "inject", "--base", "origin/main"]);
        match cli.command {
            Command::Inject(args) => {
                assert_eq!(args.base, "origin/main");
                assert_eq!(args.head, "HEAD");
                assert_eq!(args.format, OutputFormat::Terminal);
                assert!(args.pr.is_none());
            }
            _ => panic!("expected Inject command"),
        }
    }

    #[test]
    fn plan_shares_inject_args() {
        let cli = parse(&[
            "hotpatch", "plan", "--base", "abc123", "--head", "def456", "--pr", "42",
        ]);
        match cli.command {
            Command::Plan(args) => {
                assert_eq!(args.pr, Some(42));
                assert_eq!(args.head, "def456");
            }
            _ => panic!("expected Plan command"),
        }
    }

    #[test]
    fn format_markdown_parses() {
        let cli = parse(&[
            "hotpatch", "inject", "--base", "main", "--format", "markdown",
        ]);
        match cli.command {
            Command::Inject(args) => assert_eq!(args.format, OutputFormat::Markdown),
            _ => panic!("expected Inject command"),
        }
    }

    #[test]
    fn cli_flags_override_config() {
        let cli = parse(&[
            "hotpatch",
            "inject",
            "--base",
            "main",
            "--app-root",
            "/srv/app",
            "--namespace",
            "previews",
            "--helm-bin",
            "helm3",
        ]);
        let Command::Inject(args) = cli.command else {
            panic!("expected Inject command");
        };

        let mut config = Config::default();
        args.apply_to(&mut config);
        assert_eq!(config.app.root, "/srv/app");
        assert_eq!(config.cluster.namespace.as_deref(), Some("previews"));
        assert_eq!(config.cluster.helm_bin, "helm3");
        // Untouched fields keep their layered values.
        assert_eq!(config.charts.app, "charts/preview-app");
    }
}
