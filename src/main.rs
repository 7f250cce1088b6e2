//! Briefex main entry point
//!
//! This is the command-line interface for the Briefex news ingest pipeline.

use briefex::config::{load_config_with_hash, Config};
use briefex::container::Container;
use briefex::crawler::builtin_layouts;
use briefex::output::{load_statistics, print_statistics};
use briefex::storage::SqliteStorage;
use briefex::workflow::{run_with_limit, Workflow};
use clap::Parser;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tokio::time::MissedTickBehavior;
use tracing_subscriber::EnvFilter;

/// Briefex: a news crawl-and-ingest pipeline
///
/// Briefex crawls the listing pages of configured news sources, follows
/// every article to its detail page and stores new posts for
/// summarization.
#[derive(Parser, Debug)]
#[command(name = "briefex")]
#[command(version = "1.0.0")]
#[command(about = "A news crawl-and-ingest pipeline", long_about = None)]
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

    /// Validate config and show what would be crawled without crawling
    #[arg(long, conflicts_with_all = ["stats", "clean", "watch"])]
    dry_run: bool,

    /// Show post statistics from the database and exit
    #[arg(long, conflicts_with_all = ["dry_run", "clean", "watch"])]
    stats: bool,

    /// Delete posts refused by the summarizer and exit
    #[arg(long, conflicts_with_all = ["dry_run", "stats", "watch"])]
    clean: bool,

    /// Run the ingest periodically until interrupted
    #[arg(long, conflicts_with_all = ["dry_run", "stats", "clean"])]
    watch: bool,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    setup_logging(cli.verbose, cli.quiet);

    tracing::info!("Loading configuration from: {}", cli.config.display());
    let config = match load_config_with_hash(&cli.config) {
        Ok((cfg, hash)) => {
            tracing::info!("Configuration loaded successfully (hash: {})", hash);
            cfg
        }
        Err(e) => {
            tracing::error!("Failed to load configuration: {}", e);
            return Err(e.into());
        }
    };

    if cli.dry_run {
        handle_dry_run(&config);
    } else if cli.stats {
        handle_stats(&config)?;
    } else if cli.clean {
        handle_clean(config).await?;
    } else if cli.watch {
        handle_watch(config).await?;
    } else {
        handle_ingest(config).await?;
    }

    Ok(())
}

/// Sets up the logging/tracing subscriber based on verbosity level
fn setup_logging(verbose: u8, quiet: bool) {
    let filter = if quiet {
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("briefex=info,warn"),
            1 => EnvFilter::new("briefex=debug,info"),
            2 => EnvFilter::new("briefex=trace,debug"),
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

/// Handles the --dry-run mode: validates config and shows what would be crawled
fn handle_dry_run(config: &Config) {
    println!("=== Briefex Dry Run ===\n");

    println!("Crawler Configuration:");
    println!("  Request timeout: {}ms", config.crawler.request_timeout_ms);
    println!("  Connect timeout: {}ms", config.crawler.connect_timeout_ms);
    println!(
        "  Attempts per fetch: {} (backoff {}ms..{}ms)",
        config.crawler.max_retries, config.crawler.retry_delay_ms, config.crawler.max_retry_delay_ms
    );
    println!("  Lookback: {} days", config.crawler.lookback_days);

    println!("\nSchedule:");
    println!("  Interval: {}s", config.schedule.interval_secs);
    println!("  Time limit: {}s", config.schedule.time_limit_secs);

    println!("\nDatabase: {}", config.database.path);

    println!("\nSources ({}):", config.sources.len());
    for source in &config.sources {
        println!("  - {} [{}] {}", source, source.source_type, source.url);
    }

    let mut layouts: Vec<String> = builtin_layouts()
        .into_iter()
        .map(|layout| layout.code_name)
        .collect();
    layouts.extend(config.layouts.iter().map(|layout| layout.code_name.clone()));
    println!("\nLayouts ({}):", layouts.len());
    for code_name in &layouts {
        println!("  - {}", code_name);
    }

    let unparsed: Vec<_> = config
        .sources
        .iter()
        .filter(|source| !layouts.contains(&source.code_name))
        .collect();
    if !unparsed.is_empty() {
        println!("\nSources without a layout ({}):", unparsed.len());
        for source in unparsed {
            println!("  - {}", source);
        }
    }

    println!("\n✓ Configuration is valid");
    println!("✓ Would crawl {} sources", config.sources.len());
}

/// Handles the --stats mode: shows statistics from the database
fn handle_stats(config: &Config) -> Result<(), Box<dyn std::error::Error>> {
    println!("Database: {}\n", config.database.path);

    let storage = SqliteStorage::new(Path::new(&config.database.path))?;
    let stats = load_statistics(&storage)?;
    print_statistics(&stats);

    Ok(())
}

/// Handles the --clean mode: deletes censored posts
async fn handle_clean(config: Config) -> Result<(), Box<dyn std::error::Error>> {
    let container = Container::from_config(config)?;
    let report = container.clean_workflow().run().await?;

    println!("✓ Deleted {} censored posts", report.deleted);
    if report.failures > 0 {
        println!("✗ {} posts could not be deleted", report.failures);
    }

    Ok(())
}

/// Handles the default mode: one ingest run
async fn handle_ingest(config: Config) -> Result<(), Box<dyn std::error::Error>> {
    let container = Container::from_config(config)?;
    let seeded = container.seed_sources()?;
    tracing::info!("Seeded {} new sources", seeded);

    match container.ingest_workflow().run().await {
        Ok(report) => {
            println!("=== Ingest Report ===\n");
            println!("{}", report);
            Ok(())
        }
        Err(e) => {
            tracing::error!("Ingest failed: {}", e);
            Err(e.into())
        }
    }
}

/// Handles the --watch mode: periodic ingest bounded by the time limit
async fn handle_watch(config: Config) -> Result<(), Box<dyn std::error::Error>> {
    let interval_secs = config.schedule.interval_secs;
    let limit = Duration::from_secs(config.schedule.time_limit_secs);

    let container = Container::from_config(config)?;
    container.seed_sources()?;
    let workflow = container.ingest_workflow();

    let mut interval = tokio::time::interval(Duration::from_secs(interval_secs));
    interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
    tracing::info!(
        "Watching: ingest every {}s, each run limited to {}s",
        interval_secs,
        limit.as_secs()
    );

    loop {
        tokio::select! {
            _ = interval.tick() => {}
            signal = tokio::signal::ctrl_c() => {
                if let Err(e) = signal {
                    tracing::error!("Unable to listen for shutdown signal: {}", e);
                }
                tracing::info!("Shutdown signal received");
                break;
            }
        }

        match run_with_limit(&workflow, limit).await {
            Ok(report) => tracing::info!(
                "Run finished: {} persisted, {} already known, {} sources failed",
                report.persisted,
                report.already_known,
                report.failed_sources
            ),
            Err(e) => tracing::error!("Run failed: {}", e),
        }
    }

    Ok(())
}
