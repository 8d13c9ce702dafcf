//! # IR Scout
//!
//! Discovers the most likely investor-relations web presence for a batch of
//! stock tickers and aggregates recent news mentions about them from three
//! structurally different sources into a single ranked, deduplicated list.
//!
//! ## Sources
//!
//! - The company's official IR/newsroom page (heuristic HTML extraction)
//! - A financial aggregator's ticker-scoped RSS feed
//! - A discussion forum's ticker search feed
//!
//! ## Usage
//!
//! ```sh
//! ir_scout -t NVDA,AMD -d 7
//! ir_scout -t GME -d 30 -k earnings --threshold 80 --json -o report.json
//! ```
//!
//! ## Architecture
//!
//! 1. **Discovery**: resolve each ticker to an IR page URL through a
//!    cascade of strategies (static map, profile scrape, domain guesses,
//!    web search, deterministic fallback)
//! 2. **Fetching**: run the three source fetchers concurrently per ticker
//!    with bounded timeouts
//! 3. **Merging**: dedup by link, rank by date, truncate to 100
//! 4. **Filtering**: optional fuzzy keyword narrowing
//! 5. **Output**: JSON or plain-text report, stdout or file

use clap::Parser;
use std::error::Error;
use tracing::{debug, info, instrument, warn};
use tracing_subscriber::{EnvFilter, fmt as tfmt};

mod cli;
mod dates;
mod fetchers;
mod filings;
mod filter;
mod locator;
mod models;
mod outputs;
mod scout;

use cli::{Cli, MAX_TICKERS};
use filings::FilingsClient;
use models::{ScanReport, TickerFilings};
use scout::Scout;

#[tokio::main]
#[instrument]
async fn main() -> Result<(), Box<dyn Error>> {
    // --- Tracing init ---
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tfmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_file(false)
        .with_line_number(false)
        .with_timer(tracing_subscriber::fmt::time::UtcTime::rfc_3339())
        .init();

    let start_time = std::time::Instant::now();
    info!("ir_scout starting up");

    let mut args = Cli::parse();
    debug!(?args.tickers, args.days, args.threshold, "Parsed CLI arguments");

    if args.tickers.len() > MAX_TICKERS {
        warn!(
            requested = args.tickers.len(),
            max = MAX_TICKERS,
            "Too many tickers, extra entries dropped"
        );
        args.tickers.truncate(MAX_TICKERS);
    }

    // ---- Scan all tickers ----
    let scout = Scout::new()?;
    let news = scout
        .scan(&args.tickers, args.days, &args.keywords, args.threshold)
        .await;
    info!(records = news.len(), "Scan complete");

    // ---- Optional filing lookup (credential-gated) ----
    let mut filings = Vec::new();
    if let Some(api_key) = args.filing_api_key.clone() {
        let filings_client = FilingsClient::new(api_key)?;
        for ticker in scout::normalize_tickers(&args.tickers) {
            match filings_client.search(&ticker).await {
                Ok(records) if !records.is_empty() => {
                    filings.push(TickerFilings {
                        ticker,
                        filings: records,
                    });
                }
                Ok(_) => debug!(%ticker, "No filings returned"),
                Err(e) => warn!(%ticker, error = %e, "Filing lookup failed"),
            }
        }
    } else {
        debug!("No filing API key supplied, filings lookup disabled");
    }

    let report = ScanReport { news, filings };

    // ---- Render and emit ----
    let rendered = if args.json {
        outputs::json::render(&report)?
    } else {
        outputs::text::render(&report)
    };

    match &args.output {
        Some(path) => {
            info!(%path, "Writing report");
            tokio::fs::write(path, rendered).await?;
        }
        None => print!("{rendered}"),
    }

    let elapsed = start_time.elapsed();
    info!(
        ?elapsed,
        secs = elapsed.as_secs(),
        millis = elapsed.subsec_millis(),
        "Execution complete"
    );

    Ok(())
}
