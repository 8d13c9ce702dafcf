//! Aggregator feed fetcher.
//!
//! Pulls the ticker-scoped headline RSS feed from Yahoo Finance and keeps
//! every item whose publish date falls inside the lookback window. Feed
//! dates arrive as RFC 2822 but occasionally drift, so parsing goes through
//! the lenient [`crate::dates::parse_lenient`] path.

use crate::dates;
use crate::fetchers::BROWSER_UA;
use crate::models::{FetchOutcome, NewsItem, NewsSource};
use chrono::{DateTime, Utc};
use reqwest::Client;
use std::error::Error;
use tracing::{debug, instrument};

/// Fetch recent aggregator headlines for a ticker.
///
/// # Arguments
///
/// * `client` - Shared HTTP client with a short request timeout
/// * `ticker` - Uppercase ticker symbol
/// * `cutoff` - Oldest acceptable publish timestamp
#[instrument(level = "info", skip(client))]
pub async fn fetch(client: Client, ticker: String, cutoff: DateTime<Utc>) -> FetchOutcome {
    let feed_url = format!(
        "https://feeds.finance.yahoo.com/rss/2.0/headline?s={}&region=US&lang=en-US",
        ticker.to_uppercase()
    );

    let resp = match client
        .get(&feed_url)
        .header(reqwest::header::USER_AGENT, BROWSER_UA)
        .send()
        .await
    {
        Ok(resp) => resp,
        Err(e) => return FetchOutcome::Failed(format!("aggregator feed request failed: {e}")),
    };
    if !resp.status().is_success() {
        return FetchOutcome::Failed(format!("aggregator feed returned {}", resp.status()));
    }
    let body = match resp.bytes().await {
        Ok(body) => body,
        Err(e) => return FetchOutcome::Failed(format!("aggregator feed read failed: {e}")),
    };

    match parse_feed(&body, &ticker, cutoff) {
        Ok(items) => {
            debug!(count = items.len(), "Parsed aggregator feed");
            FetchOutcome::from_items(items)
        }
        Err(e) => FetchOutcome::Failed(format!("aggregator feed parse failed: {e}")),
    }
}

/// Parse an RSS channel into news items newer than the cutoff.
fn parse_feed(
    body: &[u8],
    ticker: &str,
    cutoff: DateTime<Utc>,
) -> Result<Vec<NewsItem>, Box<dyn Error>> {
    let channel = rss::Channel::read_from(body)?;
    let mut items = Vec::new();
    for entry in channel.items() {
        let Some(title) = entry.title() else { continue };
        let Some(link) = entry.link() else { continue };
        if title.is_empty() || link.is_empty() {
            continue;
        }
        let Some(published) = entry.pub_date().and_then(dates::parse_lenient) else {
            continue;
        };
        if published < cutoff {
            continue;
        }
        items.push(NewsItem::new(
            ticker,
            published.date_naive(),
            title,
            link.to_string(),
            NewsSource::AggregatorNews,
        ));
    }
    Ok(items)
}
