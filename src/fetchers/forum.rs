//! Forum feed fetcher.
//!
//! Searches r/wallstreetbets for a ticker through Reddit's search Atom
//! endpoint, sorted newest-first. Reddit rejects anonymous-looking clients,
//! so requests carry a descriptive User-Agent rather than a browser string.

use crate::dates;
use crate::fetchers::FORUM_UA;
use crate::models::{FetchOutcome, NewsItem, NewsSource};
use chrono::{DateTime, Utc};
use reqwest::Client;
use std::error::Error;
use tracing::{debug, instrument};

/// Fetch recent forum discussion entries mentioning a ticker.
#[instrument(level = "info", skip(client))]
pub async fn fetch(client: Client, ticker: String, cutoff: DateTime<Utc>) -> FetchOutcome {
    let feed_url = format!(
        "https://www.reddit.com/r/wallstreetbets/search.rss?q={}&sort=new&restrict_sr=on",
        urlencoding::encode(&ticker)
    );

    let resp = match client
        .get(&feed_url)
        .header(reqwest::header::USER_AGENT, FORUM_UA)
        .send()
        .await
    {
        Ok(resp) => resp,
        Err(e) => return FetchOutcome::Failed(format!("forum feed request failed: {e}")),
    };
    if !resp.status().is_success() {
        return FetchOutcome::Failed(format!("forum feed returned {}", resp.status()));
    }
    let body = match resp.bytes().await {
        Ok(body) => body,
        Err(e) => return FetchOutcome::Failed(format!("forum feed read failed: {e}")),
    };

    match parse_feed(&body, &ticker, cutoff) {
        Ok(items) => {
            debug!(count = items.len(), "Parsed forum feed");
            FetchOutcome::from_items(items)
        }
        Err(e) => FetchOutcome::Failed(format!("forum feed parse failed: {e}")),
    }
}

/// Parse an Atom feed into news items newer than the cutoff.
///
/// Entries use the `updated` timestamp, which Reddit always populates; the
/// lenient parser is still applied in case the value drifts from RFC 3339.
fn parse_feed(
    body: &[u8],
    ticker: &str,
    cutoff: DateTime<Utc>,
) -> Result<Vec<NewsItem>, Box<dyn Error>> {
    let feed = atom_syndication::Feed::read_from(body)?;
    let mut items = Vec::new();
    for entry in feed.entries() {
        let title = entry.title().value.clone();
        let Some(link) = entry.links().first().map(|l| l.href().to_string()) else {
            continue;
        };
        if title.is_empty() || link.is_empty() {
            continue;
        }
        let updated = entry.updated().to_rfc3339();
        let Some(published) = dates::parse_lenient(&updated) else {
            continue;
        };
        if published < cutoff {
            continue;
        }
        items.push(NewsItem::new(
            ticker,
            published.date_naive(),
            &title,
            link,
            NewsSource::ForumDiscussion,
        ));
    }
    Ok(items)
}
