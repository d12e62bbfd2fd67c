//! hotpatch — live-patch Helm preview deployments from PR diffs.
//!
//! Entry point and error handling boundary. Uses `anyhow` for
//! ergonomic error propagation and user-facing messages.

mod cli;

use std::path::Path;
use std::process;

use anyhow::{Context, Result, bail};
use clap::Parser;
use colored::Colorize;

use hotpatch::config::Config;
use hotpatch::constants;
use hotpatch::diff;
use hotpatch::env::{self, Env};
use hotpatch::helm::cli::HelmCli;
use hotpatch::pipeline::{self, RunOptions};

use cli::args::{Cli, Command, InjectArgs, OutputFormat};

#[tokio::main]
async fn main() {
    if let Err(err) = run().await {
        eprintln!("Error: {err:#}");
        process::exit(1);
    }
}

async fn run() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Command::Inject(args) => run_pipeline(*args, false).await,
        Command::Plan(args) => run_pipeline(*args, true).await,
        Command::Version => run_version(),
    }
}

/// Print version information.
fn run_version() -> Result<()> {
    println!("{} {}", constants::APP_NAME.bold(), constants::VERSION.green().bold());
    Ok(())
}

async fn run_pipeline(args: InjectArgs, dry_run: bool) -> Result<()> {
    let env = Env::real();

    // Resolve the checkout from --path (default: cwd)
    let base_dir = std::fs::canonicalize(&args.path)
        .with_context(|| format!("--path directory not found: {}", args.path.display()))?;
    let repo_root = diff::git::find_repo_root(&base_dir)
        .await
        .map_err(|e| anyhow::anyhow!("{e}"))?;
    let repo_root = Path::new(&repo_root);

    // Load config with layering, then let CLI flags win
    let mut config =
        Config::load(Some(repo_root), &env).context("failed to load configuration")?;
    args.apply_to(&mut config);

    // Release identity comes from the PR number alone
    let Some(pr_number) = args.pr.or_else(|| env::detect_pr_number(&env)) else {
        bail!(
            "pull request number not found: pass --pr or set {}",
            constants::ENV_PR_NUMBER
        );
    };

    // Progress goes to stderr, and only for human-facing output
    let show_progress = args.format == OutputFormat::Terminal;
    if show_progress {
        eprintln!(
            "  {} {} {}..{} for PR #{pr_number}",
            if dry_run { "planning" } else { "injecting" }.bold(),
            repo_root.display().to_string().dimmed(),
            args.base,
            args.head,
        );
    }

    let helm = HelmCli::new(config.cluster.helm_bin.clone(), repo_root);
    let options = RunOptions {
        base: args.base.clone(),
        head: args.head.clone(),
        pr_number,
        dry_run,
    };

    let report = pipeline::run(&helm, repo_root, &config, &options)
        .await
        .context("injection failed")?;

    print!("{}", args.format.render(&report));
    Ok(())
}
