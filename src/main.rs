//! Reiki Harvest main entry point
//!
//! This is the command-line interface for the Reiki Harvest regulation
//! crawler.

use clap::Parser;
use reiki_harvest::config::{load_config, Config};
use reiki_harvest::crawler::crawl;
use reiki_harvest::output::print_summary;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// Reiki Harvest: a municipal regulation crawler
///
/// Reiki Harvest walks a town's online regulation collection breadth-first
/// from a table-of-contents page, converts the regulation documents it
/// reaches to Markdown, and saves them one file per document.
#[derive(Parser, Debug)]
#[command(name = "reiki-harvest")]
#[command(version = "0.1.0")]
#[command(about = "Crawl a municipal regulation site into Markdown documents", long_about = None)]
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

    /// Validate config and show the crawl plan without fetching anything
    #[arg(long)]
    dry_run: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Setup logging based on verbosity
    setup_logging(cli.verbose, cli.quiet);

    // Load and validate configuration
    tracing::info!("Loading configuration from: {}", cli.config.display());
    let config = match load_config(&cli.config) {
        Ok(cfg) => {
            tracing::info!("Configuration loaded successfully");
            cfg
        }
        Err(e) => {
            tracing::error!("Failed to load configuration: {}", e);
            return Err(e.into());
        }
    };

    if cli.dry_run {
        handle_dry_run(&config);
        return Ok(());
    }

    handle_crawl(config).await
}

/// Sets up the logging/tracing subscriber based on verbosity level
fn setup_logging(verbose: u8, quiet: bool) {
    let filter = if quiet {
        // Only show errors
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("reiki_harvest=info,warn"),
            1 => EnvFilter::new("reiki_harvest=debug,info"),
            2 => EnvFilter::new("reiki_harvest=trace,debug"),
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

/// Handles the --dry-run mode: validates config and shows the crawl plan
fn handle_dry_run(config: &Config) {
    println!("=== Reiki Harvest Dry Run ===\n");

    println!("Crawler:");
    println!("  Start URL: {}", config.crawler.start_url);
    println!("  Max depth: {}", config.crawler.max_depth);
    println!("  Max documents: {}", config.crawler.max_documents);
    println!("  Min content chars: {}", config.crawler.min_content_chars);

    println!("\nFetch:");
    println!("  User agent: {}", config.fetch.user_agent);
    println!("  Request delay: {}ms", config.fetch.request_delay_ms);
    println!("  Timeout: {}s", config.fetch.timeout_secs);
    println!("  Max retries: {}", config.fetch.max_retries);

    println!("\nConvert:");
    println!(
        "  Content selectors: {}",
        config.convert.content_selectors.join(", ")
    );
    println!(
        "  Strip selectors: {}",
        config.convert.strip_selectors.join(", ")
    );

    println!("\nOutput:");
    println!("  Markdown directory: {}", config.output.markdown_dir);
    match &config.output.raw_html_dir {
        Some(dir) => println!("  Raw HTML directory: {}", dir),
        None => println!("  Raw HTML directory: (disabled)"),
    }

    println!("\n✓ Configuration is valid");
    println!(
        "✓ Would crawl {} to depth {}, saving at most {} documents",
        config.crawler.start_url, config.crawler.max_depth, config.crawler.max_documents
    );
}

/// Handles the main crawl operation
async fn handle_crawl(config: Config) -> anyhow::Result<()> {
    match crawl(config).await {
        Ok(summary) => {
            tracing::info!("Crawl completed successfully");
            print_summary(&summary);
            Ok(())
        }
        Err(e) => {
            tracing::error!("Crawl failed: {}", e);
            Err(e.into())
        }
    }
}
