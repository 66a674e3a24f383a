//! mirrorcp - one-way directory synchronization tool
//!
//! Mirrors a source directory tree into a destination directory, copying
//! only files that are new or whose content has changed. Change detection
//! is content-based (streaming BLAKE3 hashes), and file comparison/copying
//! is spread across a fixed-size pool of concurrent workers.

use anyhow::{Context, Result};
use clap::Parser;
use console::style;
use mirrorcp_config::{Config, ConfigLoader};
use mirrorcp_sync::{CopyEvent, SyncEngine, SyncOptions, SyncRequest};
use mirrorcp_types::ThreadCount;
use std::path::PathBuf;
use tracing::info;

/// mirrorcp - one-way directory synchronization with content hashing
#[derive(Parser)]
#[command(
    name = "mirrorcp",
    version = env!("CARGO_PKG_VERSION"),
    about = "One-way directory synchronization with content hashing",
    long_about = "mirrorcp mirrors a source directory tree into a destination directory.\n\
                  Only files that are new or whose content has changed are copied;\n\
                  change detection uses streaming BLAKE3 content hashes, never timestamps."
)]
struct Cli {
    /// Source directory (must exist)
    source: PathBuf,

    /// Destination directory (created if missing)
    destination: PathBuf,

    /// Number of worker threads
    #[arg(short = 't', long)]
    threads: Option<usize>,

    /// Configuration file path (.toml, .yaml or .yml)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Print the run summary as JSON
    #[arg(long)]
    json: bool,

    /// Enable debug logging
    #[arg(long)]
    debug: bool,

    /// Quiet mode - errors only
    #[arg(short, long)]
    quiet: bool,

    /// Verbose mode - detailed output
    #[arg(short, long)]
    verbose: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => ConfigLoader::load_from_file(path)
            .with_context(|| format!("failed to load config from '{}'", path.display()))?,
        None => ConfigLoader::load_default()?,
    };

    init_logging(&cli, &config)?;

    info!("mirrorcp v{} starting", env!("CARGO_PKG_VERSION"));

    let workers = resolve_workers(&cli, &config)?;
    let options = SyncOptions::with_workers(workers);

    let mut engine = SyncEngine::new();
    let mut events = engine
        .take_event_receiver()
        .context("event receiver already taken")?;

    // Drain copy events concurrently with the run: one line per successful
    // copy on stdout, one per failed task on stderr.
    let printer = tokio::spawn(async move {
        while let Some(event) = events.recv().await {
            match event {
                CopyEvent::Copied {
                    source,
                    destination,
                } => {
                    println!("Copied: {} -> {}", source.display(), destination.display());
                }
                CopyEvent::Failed { source, message } => {
                    eprintln!("Failed: {}: {}", source.display(), message);
                }
            }
        }
    });

    let request =
        SyncRequest::new(&cli.source, &cli.destination).with_options(options);
    let result = engine.sync(request).await;

    // Dropping the engine closes the event channel so the printer drains
    // everything that was sent and exits.
    drop(engine);
    printer.await.ok();

    let report = result.with_context(|| {
        format!(
            "sync of '{}' into '{}' failed",
            cli.source.display(),
            cli.destination.display()
        )
    })?;

    if cli.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else if !cli.quiet {
        print_summary(&report);
    }

    if !report.is_success() {
        std::process::exit(1);
    }
    Ok(())
}

/// Resolve the worker count: CLI flag beats config file beats default
fn resolve_workers(cli: &Cli, config: &Config) -> Result<ThreadCount> {
    match cli.threads {
        Some(threads) => ThreadCount::new(threads)
            .map_err(|e| anyhow::anyhow!("invalid --threads value: {}", e)),
        None => Ok(config.effective_threads()?),
    }
}

fn init_logging(cli: &Cli, config: &Config) -> Result<()> {
    use tracing_subscriber::{fmt, EnvFilter};

    let level = if cli.debug {
        "debug"
    } else if cli.verbose {
        "info"
    } else if cli.quiet {
        "error"
    } else {
        config.logging.level.as_str()
    };

    let filter = EnvFilter::try_from_default_env().or_else(|_| EnvFilter::try_new(level))?;

    fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    Ok(())
}

fn print_summary(report: &mirrorcp_sync::SyncReport) {
    let stats = &report.stats;
    let marker = if report.is_success() {
        style("✓").green().bold()
    } else {
        style("✗").red().bold()
    };

    println!(
        "{} {} copied, {} skipped, {} failed ({} bytes in {:.2?})",
        marker,
        style(stats.files_copied).cyan(),
        stats.files_skipped,
        if stats.failed_tasks > 0 {
            style(stats.failed_tasks).red()
        } else {
            style(stats.failed_tasks)
        },
        stats.bytes_copied,
        stats.duration
    );
}
