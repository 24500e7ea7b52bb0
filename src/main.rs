// src/main.rs
use std::path::PathBuf;
use std::process::exit;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::{error, info};

use githunt::config::ScanConfig;
use githunt::error::ScanError;
use githunt::scanner::Scanner;
use githunt::target::{self, Target};

#[derive(Parser)]
#[command(name = "githunt")]
#[command(about = "Scan web hosts for publicly exposed .git metadata directories", version)]
struct Args {
    /// Single target to scan (domain or URL)
    #[arg(short, long)]
    url: Option<String>,

    /// File with newline-delimited targets
    #[arg(short, long)]
    file: Option<PathBuf>,

    /// Number of concurrent scan workers
    #[arg(short = 't', long)]
    threads: Option<usize>,

    /// Per-request timeout in seconds
    #[arg(long)]
    timeout: Option<u64>,

    /// User-Agent header sent with every request
    #[arg(long)]
    user_agent: Option<String>,

    /// Report every confirmed exposure instead of stopping at the first
    #[arg(long)]
    exhaustive: bool,

    /// Write a JSON report to this path ("-" for stdout)
    #[arg(long)]
    json: Option<PathBuf>,

    /// Optional TOML config file; command-line flags take precedence
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Enable debug logging
    #[arg(long)]
    verbose: bool,
}

fn build_config(args: &Args) -> Result<ScanConfig> {
    let mut config = match &args.config {
        Some(path) => ScanConfig::load(path)?,
        None => ScanConfig::default(),
    };
    if let Some(threads) = args.threads {
        config.workers = threads;
    }
    if let Some(timeout) = args.timeout {
        config.timeout_secs = timeout;
    }
    if let Some(user_agent) = &args.user_agent {
        config.user_agent = user_agent.clone();
    }
    if args.exhaustive {
        config.exhaustive = true;
    }
    Ok(config)
}

fn collect_targets(args: &Args) -> Result<Vec<Target>> {
    if let Some(raw) = &args.url {
        return Ok(Target::parse(raw).into_iter().collect());
    }
    if let Some(path) = &args.file {
        return Ok(target::load_targets(path)?);
    }
    Err(ScanError::NoInput.into())
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    tracing_subscriber::fmt()
        .with_max_level(if args.verbose {
            tracing::Level::DEBUG
        } else {
            tracing::Level::INFO
        })
        .init();

    let config = build_config(&args)?;
    let targets = collect_targets(&args)?;
    if targets.is_empty() {
        error!("no usable targets in input");
        exit(1);
    }

    info!(
        "scanning {} target(s) with {} workers",
        targets.len(),
        config.workers
    );

    let scanner = Arc::new(Scanner::new(config)?);
    let report = scanner.scan_all(targets).await;

    let exposed = report.exposed_urls();
    if exposed.is_empty() {
        println!(
            "No exposed repositories found ({} scanned, {} skipped)",
            report.results.len(),
            report.count(githunt::TargetOutcome::SkippedNoDns)
        );
    } else {
        println!("Exposed repositories:");
        for url in &exposed {
            println!("  {}", url);
        }
    }

    if let Some(path) = &args.json {
        let json = report.to_json()?;
        if path.as_os_str() == "-" {
            println!("{}", json);
        } else {
            std::fs::write(path, json)
                .with_context(|| format!("failed to write report to {}", path.display()))?;
            info!("JSON report written to {}", path.display());
        }
    }

    Ok(())
}
