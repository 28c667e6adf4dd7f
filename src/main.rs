//! Catalog-Crawler main entry point
//!
//! This is the command-line interface for the Catalog-Crawler catalog crawler.

use anyhow::Context;
use catalog_crawler::config::{load_config_with_hash, validate, Config};
use catalog_crawler::crawler::{crawl, CrawlReport};
use catalog_crawler::output::{load_dataset, print_statistics, DatasetStatistics, WriteOutcome};
use catalog_crawler::url::{listing_url, normalize_base_url};
use clap::Parser;
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

/// Catalog-Crawler: a polite catalog crawler
///
/// Catalog-Crawler walks the paginated listing pages of a product catalog
/// while respecting robots.txt, extracts one record per product, and writes
/// the dataset to a CSV file.
#[derive(Parser, Debug)]
#[command(name = "catalog-crawler")]
#[command(version = "1.0.0")]
#[command(about = "A polite catalog crawler", long_about = None)]
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

    /// Validate config and show which pages would be crawled without crawling
    #[arg(long, conflicts_with = "stats")]
    dry_run: bool,

    /// Show statistics of the existing dataset and exit
    #[arg(long, conflicts_with = "dry_run")]
    stats: bool,

    /// Override `site.max-pages`
    #[arg(long, value_name = "N")]
    max_pages: Option<u32>,

    /// Skip category resolution from detail pages
    #[arg(long)]
    no_details: bool,

    /// Override `output.dataset-path`
    #[arg(long, value_name = "PATH")]
    output: Option<PathBuf>,
}

impl Cli {
    /// Applies command-line overrides and re-validates the result
    fn apply_overrides(&self, mut config: Config) -> anyhow::Result<Config> {
        if let Some(max_pages) = self.max_pages {
            config.site.max_pages = max_pages;
        }
        if self.no_details {
            config.crawler.resolve_categories = false;
        }
        if let Some(output) = &self.output {
            config.output.dataset_path = output.to_string_lossy().into_owned();
        }

        validate(&config).context("Invalid command-line override")?;
        Ok(config)
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Setup logging based on verbosity
    setup_logging(cli.verbose, cli.quiet);

    // Load and validate configuration
    tracing::info!("Loading configuration from: {}", cli.config.display());
    let (config, config_hash) = load_config_with_hash(&cli.config)
        .with_context(|| format!("Failed to load configuration from {}", cli.config.display()))?;
    tracing::info!("Configuration loaded successfully (hash: {})", config_hash);

    let config = cli.apply_overrides(config)?;

    // Handle different modes
    if cli.dry_run {
        handle_dry_run(&config)?;
    } else if cli.stats {
        handle_stats(&config)?;
    } else {
        handle_crawl(config).await?;
    }

    Ok(())
}

/// Sets up the logging/tracing subscriber based on verbosity level
fn setup_logging(verbose: u8, quiet: bool) {
    let filter = if quiet {
        // Only show errors
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("catalog_crawler=info,warn"),
            1 => EnvFilter::new("catalog_crawler=debug,info"),
            2 => EnvFilter::new("catalog_crawler=trace,debug"),
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
fn handle_dry_run(config: &Config) -> anyhow::Result<()> {
    println!("=== Catalog-Crawler Dry Run ===\n");

    let base_url = normalize_base_url(&config.site.base_url)?;

    println!("Site:");
    println!("  Base URL: {}", base_url);
    println!("  Listing path: {}", config.site.listing_path);
    println!("  Max pages: {}", config.site.max_pages);

    println!("\nCrawler Configuration:");
    println!("  Request timeout: {}s", config.crawler.request_timeout_secs);
    println!("  Page delay: {}ms", config.crawler.page_delay_ms);
    println!("  Resolve categories: {}", config.crawler.resolve_categories);
    println!("  Honor Crawl-delay: {}", config.crawler.honor_crawl_delay);

    println!("\nUser Agent:");
    println!("  {}", config.user_agent.header_value());

    println!("\nOutput:");
    println!("  Dataset: {}", config.output.dataset_path);

    println!("\nListing Pages ({}):", config.site.max_pages);
    for page in 1..=config.site.max_pages {
        println!(
            "  - {}",
            listing_url(&base_url, &config.site.listing_path, page)?
        );
    }

    println!("\n✓ Configuration is valid");
    if config.crawler.resolve_categories {
        println!("✓ Would also fetch one detail page per item to resolve categories");
    }

    Ok(())
}

/// Handles the --stats mode: shows statistics of the existing dataset
fn handle_stats(config: &Config) -> anyhow::Result<()> {
    let path = Path::new(&config.output.dataset_path);
    println!("Dataset: {}\n", path.display());

    let items = load_dataset(path)
        .with_context(|| format!("Failed to read dataset {}", path.display()))?;
    let stats = DatasetStatistics::from_items(&items);

    print_statistics(&stats);

    Ok(())
}

/// Handles the main crawl operation
async fn handle_crawl(config: Config) -> anyhow::Result<()> {
    tracing::info!(
        "Starting crawl of {} ({} pages, categories {})",
        config.site.base_url,
        config.site.max_pages,
        if config.crawler.resolve_categories {
            "on"
        } else {
            "off"
        }
    );

    match crawl(config).await {
        Ok(report) => {
            print_report(&report);
            Ok(())
        }
        Err(e) => {
            tracing::error!("Crawl failed: {}", e);
            Err(e.into())
        }
    }
}

/// Prints a finished crawl's report to stdout
fn print_report(report: &CrawlReport) {
    println!("=== Crawl Report ===\n");

    println!("Pages:");
    println!("  Fetched: {}", report.pages_fetched);
    println!("  Skipped (robots.txt): {}", report.pages_skipped);
    if report.robots_fail_open {
        println!("  robots.txt unavailable; no restrictions applied");
    }
    println!("  Pause between pages: {:?}", report.page_interval);
    println!();

    println!("Items:");
    println!("  Collected: {}", report.items_collected);
    println!("  With fallback price or rating: {}", report.items_defaulted);
    println!("  Categories resolved: {}", report.categories_resolved);
    println!();

    if let Some(aborted) = &report.aborted {
        println!("Stopped early at page {} ({}):", aborted.page, aborted.url);
        println!("  {}", aborted.error);
        println!();
    }

    match &report.write {
        Some(WriteOutcome::Written { rows, path }) => {
            println!("✓ Saved {} rows to {}", rows, path.display());
        }
        Some(WriteOutcome::SkippedEmpty) | None => {
            println!("No items collected; dataset left unchanged");
        }
    }

    if let Some(duration) = report.duration() {
        println!("Duration: {}s", duration.num_seconds());
    }
}
