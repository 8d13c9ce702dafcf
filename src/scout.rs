//! Fetch orchestration: fan out to all sources, merge, dedup, rank.
//!
//! For each ticker the three source fetchers run as independent tasks with
//! no shared mutable state; the orchestrator waits for all of them (no
//! partial results — no source is prioritized over another, so a slow
//! source delays the whole aggregation by design, bounded by the per-task
//! deadline). Results concatenate in fixed source order (aggregator,
//! forum, IR page), deduplicate by exact link keeping the first occurrence,
//! sort stably by date descending, and truncate to 100 items.
//!
//! Batch scans over several tickers isolate failures at the per-ticker
//! boundary: one ticker's failure becomes an error record and never aborts
//! the rest of the batch.

use crate::fetchers::{aggregator, forum, ir_page};
use crate::filter;
use crate::locator::IrPageLocator;
use crate::models::{FetchOutcome, NewsItem, ScanRecord};
use chrono::{Duration, Utc};
use futures::future::join_all;
use itertools::Itertools;
use reqwest::Client;
use std::error::Error;
use std::time::Duration as StdDuration;
use tokio::task::JoinError;
use tokio::time::{error::Elapsed, timeout};
use tracing::{debug, error, info, instrument, warn};

/// Hard cap on the number of items one aggregation returns.
pub const MAX_RESULTS: usize = 100;

/// Per-fetcher deadline; a source that blows past it contributes nothing.
const FETCH_DEADLINE: StdDuration = StdDuration::from_secs(15);

/// Informational record text for a ticker with no qualifying items.
const NO_RECENT_NEWS: &str = "No recent news found in this timeframe.";

/// Runs ticker scans end to end: IR page discovery, three-way fetch
/// fan-out, merge, and optional keyword filtering.
pub struct Scout {
    locator: IrPageLocator,
    client: Client,
}

impl Scout {
    /// Build a scout with the default locator and a short-timeout client
    /// shared by all fetchers.
    pub fn new() -> Result<Self, Box<dyn Error>> {
        let client = Client::builder()
            .timeout(StdDuration::from_secs(5))
            .build()?;
        Ok(Self {
            locator: IrPageLocator::new()?,
            client,
        })
    }

    /// Aggregate recent news for one ticker from all three sources.
    ///
    /// Spawns one task per fetcher, each bounded by [`FETCH_DEADLINE`],
    /// and awaits all three. The returned list honors the ordering
    /// contract: date descending, ties stable in source order
    /// (aggregator, forum, IR), at most [`MAX_RESULTS`] items, no
    /// duplicate links.
    #[instrument(level = "info", skip(self))]
    pub async fn aggregate(&self, url: &str, ticker: &str, lookback_days: i64) -> Vec<NewsItem> {
        let cutoff = Utc::now() - Duration::days(lookback_days);
        debug!(%cutoff, "Computed lookback cutoff");

        let agg = tokio::spawn(timeout(
            FETCH_DEADLINE,
            aggregator::fetch(self.client.clone(), ticker.to_string(), cutoff),
        ));
        let frm = tokio::spawn(timeout(
            FETCH_DEADLINE,
            forum::fetch(self.client.clone(), ticker.to_string(), cutoff),
        ));
        let irp = tokio::spawn(timeout(
            FETCH_DEADLINE,
            ir_page::fetch(
                self.client.clone(),
                url.to_string(),
                ticker.to_string(),
                cutoff,
            ),
        ));

        let (agg, frm, irp) = tokio::join!(agg, frm, irp);
        let merged = merge_and_rank(vec![
            settle(agg, "aggregator"),
            settle(frm, "forum"),
            settle(irp, "ir_page"),
        ]);
        info!(ticker, count = merged.len(), "Aggregation complete");
        merged
    }

    /// Scan a batch of tickers concurrently.
    ///
    /// Tickers are uppercased and trimmed; empty entries are skipped. The
    /// response covers every requested ticker: each contributes either its
    /// news items, an informational "no recent news" record, or an error
    /// record — never nothing.
    #[instrument(level = "info", skip(self, keywords))]
    pub async fn scan(
        &self,
        tickers: &[String],
        lookback_days: i64,
        keywords: &[String],
        threshold: u8,
    ) -> Vec<ScanRecord> {
        let cleaned = normalize_tickers(tickers);
        let scans = cleaned
            .iter()
            .map(|ticker| self.scan_one(ticker, lookback_days, keywords, threshold));
        join_all(scans).await.into_iter().flatten().collect()
    }

    /// Per-ticker boundary: any error becomes an error record so one
    /// ticker's failure never aborts the batch.
    async fn scan_one(
        &self,
        ticker: &str,
        lookback_days: i64,
        keywords: &[String],
        threshold: u8,
    ) -> Vec<ScanRecord> {
        match self.scan_ticker(ticker, lookback_days, keywords, threshold).await {
            Ok(records) => records,
            Err(e) => {
                error!(%ticker, error = %e, "Ticker scan failed");
                vec![ScanRecord::Error {
                    ticker: ticker.to_string(),
                    error: format!("Internal error: {e}"),
                }]
            }
        }
    }

    async fn scan_ticker(
        &self,
        ticker: &str,
        lookback_days: i64,
        keywords: &[String],
        threshold: u8,
    ) -> Result<Vec<ScanRecord>, Box<dyn Error>> {
        let url = self.locator.resolve(ticker).await;
        info!(%ticker, %url, "Scouting ticker across all sources");

        let items = self.aggregate(&url, ticker, lookback_days).await;
        let items = filter::apply(items, keywords, threshold);
        if items.is_empty() {
            return Ok(vec![ScanRecord::Error {
                ticker: ticker.to_string(),
                error: NO_RECENT_NEWS.to_string(),
            }]);
        }
        Ok(items.into_iter().map(ScanRecord::Item).collect())
    }
}

/// Convert one spawned fetcher's result into its contribution, logging
/// failures and timeouts without propagating them.
fn settle(
    result: Result<Result<FetchOutcome, Elapsed>, JoinError>,
    source: &str,
) -> Vec<NewsItem> {
    match result {
        Ok(Ok(FetchOutcome::Items(items))) => {
            debug!(source, count = items.len(), "Source contributed items");
            items
        }
        Ok(Ok(FetchOutcome::Empty)) => {
            debug!(source, "Source returned no qualifying items");
            Vec::new()
        }
        Ok(Ok(FetchOutcome::Failed(reason))) => {
            warn!(source, %reason, "Source fetch failed");
            Vec::new()
        }
        Ok(Err(_)) => {
            warn!(source, deadline = ?FETCH_DEADLINE, "Source fetch timed out");
            Vec::new()
        }
        Err(e) => {
            error!(source, error = %e, "Source task failed to complete");
            Vec::new()
        }
    }
}

/// Merge per-source batches: concatenate in source order, dedup by exact
/// link keeping the first occurrence, stable-sort by date descending,
/// truncate to [`MAX_RESULTS`].
pub(crate) fn merge_and_rank(batches: Vec<Vec<NewsItem>>) -> Vec<NewsItem> {
    let mut items: Vec<NewsItem> = batches
        .into_iter()
        .flatten()
        .unique_by(|item| item.link.clone())
        .collect();
    items.sort_by(|a, b| b.date.cmp(&a.date));
    items.truncate(MAX_RESULTS);
    items
}

/// Uppercase and trim ticker symbols, dropping empty entries.
pub(crate) fn normalize_tickers(tickers: &[String]) -> Vec<String> {
    tickers
        .iter()
        .map(|t| t.trim().to_uppercase())
        .filter(|t| !t.is_empty())
        .collect()
}
