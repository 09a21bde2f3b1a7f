//! Sqlsweep main entry point
//!
//! This is the command-line interface for the sqlsweep scanner.

use clap::Parser;
use sqlsweep::config::{load_config, load_payloads, validate, StoreMode};
use sqlsweep::crawler::run_scan;
use sqlsweep::progress::{FileStore, ProgressStore};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// Sqlsweep: crawl a site and test its forms for SQL injection
///
/// Starting from the configured seed URL, sqlsweep follows in-scope links,
/// submits injection payloads into every HTML form it finds, and records one
/// result per URL in a resumable result store.
#[derive(Parser, Debug)]
#[command(name = "sqlsweep")]
#[command(version)]
#[command(about = "Crawl a site and test its forms for SQL injection", long_about = None)]
struct Cli {
    /// Path to TOML configuration file
    #[arg(value_name = "CONFIG")]
    config: PathBuf,

    /// Increase logging verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,

    /// Load payloads from this file, replacing the configured list
    #[arg(long, value_name = "FILE")]
    payload_file: Option<PathBuf>,

    /// Validate the configuration and show the scan plan without fetching
    #[arg(long)]
    dry_run: bool,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    setup_logging(cli.verbose, cli.quiet);

    tracing::info!("Loading configuration from: {}", cli.config.display());
    let mut config = match load_config(&cli.config) {
        Ok(config) => config,
        Err(e) => {
            tracing::error!("Failed to load configuration: {}", e);
            return Err(e.into());
        }
    };

    if let Some(payload_file) = &cli.payload_file {
        config.scan.payloads = load_payloads(payload_file)?;
        validate(&config)?;
        tracing::info!(
            "Loaded {} payloads from {}",
            config.scan.payloads.len(),
            payload_file.display()
        );
    }

    if cli.dry_run {
        handle_dry_run(&config);
        return Ok(());
    }

    handle_scan(config).await
}

/// Sets up the logging/tracing subscriber based on verbosity level
fn setup_logging(verbose: u8, quiet: bool) {
    let filter = if quiet {
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("sqlsweep=info,warn"),
            1 => EnvFilter::new("sqlsweep=debug,info"),
            2 => EnvFilter::new("sqlsweep=trace,debug"),
            _ => EnvFilter::new("trace"),
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .init();
}

/// Handles the --dry-run mode: validates config and shows the scan plan
fn handle_dry_run(config: &sqlsweep::config::Config) {
    println!("=== Sqlsweep Dry Run ===\n");

    println!("Scan:");
    println!("  Seed URL: {}", config.scan.seed_url);
    println!("  Payloads: {}", config.scan.payloads.len());
    println!("  Same domain only: {}", config.scan.same_domain_only);
    println!("  Include subdomains: {}", config.scan.include_subdomains);
    println!("  Excluded URLs: {}", config.scan.excluded_urls.len());
    for excluded in &config.scan.excluded_urls {
        println!("    - {}", excluded);
    }

    println!("\nHTTP:");
    println!("  Timeout: {}s", config.http.timeout_secs);
    println!("  User agent: {}", config.http.user_agent);

    println!("\nResults:");
    println!(
        "  Mode: {}",
        match config.results.mode {
            StoreMode::Standalone => "standalone",
            StoreMode::Service => "service",
        }
    );
    println!("  Target: {}", config.results.target);

    println!("\n✓ Configuration is valid");
}

/// Handles the main scan operation
async fn handle_scan(config: sqlsweep::config::Config) -> Result<(), Box<dyn std::error::Error>> {
    let store: Box<dyn ProgressStore> = match config.results.mode {
        StoreMode::Standalone => Box::new(FileStore::open(&config.results.target)?),
        StoreMode::Service => {
            // The external datastore behind service mode belongs to an
            // embedding application; the CLI has no backend to offer.
            return Err(
                "service mode requires embedding sqlsweep as a library and supplying a \
                 CrawlDatastore backend; the CLI only supports standalone mode"
                    .into(),
            );
        }
    };

    let report = match run_scan(&config, store, None).await {
        Ok(report) => report,
        Err(e) => {
            tracing::error!("Scan failed: {}", e);
            return Err(e.into());
        }
    };

    println!(
        "Scan finished: {} pages visited ({} vulnerable, {} safe, {} failed)",
        report.pages_visited,
        report.vulnerable.len(),
        report.safe,
        report.failed
    );
    for (url, finding) in &report.vulnerable {
        println!("  {} -> {}", url, finding);
    }

    Ok(())
}
