//! Heuristic news extraction from arbitrary IR-page HTML.
//!
//! Corporate investor-relations pages share no common markup, so this
//! fetcher recovers news items structurally instead of with site-specific
//! selectors: find text that looks like a date, then walk up the document
//! tree a bounded number of levels looking for the nearest anchor long
//! enough to be a headline. The date/link pairing takes the first
//! qualifying anchor in document order; downstream behavior depends on
//! that tie-break.
//!
//! The heuristic trades precision for source-agnosticism. False positives
//! from repeated dates in nested containers are harmless because the
//! orchestrator deduplicates by link.

use crate::dates;
use crate::fetchers::BROWSER_UA;
use crate::models::{FetchOutcome, NewsItem, NewsSource};
use chrono::{DateTime, Utc};
use once_cell::sync::Lazy;
use regex::Regex;
use reqwest::Client;
use scraper::{ElementRef, Html, Selector};
use tracing::{debug, instrument};
use url::Url;

/// How many nodes (the element itself plus ancestors) to inspect when
/// pairing a date with an anchor.
const MAX_ANCESTOR_HOPS: usize = 6;

/// An anchor's visible text must exceed this many characters to count as
/// a headline; shorter anchors are navigation chrome ("Read more", dates).
const MIN_ANCHOR_CHARS: usize = 12;

/// Text shorter than this can't contain a date worth parsing.
const MIN_TEXT_CHARS: usize = 5;

/// Month-day/4-digit-year or ISO `YYYY-MM-DD` shapes.
static DATE_SHAPE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)\d{1,2},?\s+\d{4}|\b\d{4}-\d{2}-\d{2}\b").unwrap());

const MONTH_TOKENS: [&str; 12] = [
    "jan", "feb", "mar", "apr", "may", "jun", "jul", "aug", "sep", "oct", "nov", "dec",
];

/// Fetch the IR page and extract recent news items from its HTML.
///
/// # Arguments
///
/// * `client` - Verified HTTP client; the page content is trusted as the
///   final answer, so no relaxed-certificate client is used here
/// * `url` - The resolved IR page URL, also the origin for relative links
/// * `ticker` - Uppercase ticker symbol
/// * `cutoff` - Oldest acceptable item timestamp
#[instrument(level = "info", skip(client))]
pub async fn fetch(
    client: Client,
    url: String,
    ticker: String,
    cutoff: DateTime<Utc>,
) -> FetchOutcome {
    let resp = match client
        .get(&url)
        .header(reqwest::header::USER_AGENT, BROWSER_UA)
        .send()
        .await
    {
        Ok(resp) => resp,
        Err(e) => return FetchOutcome::Failed(format!("IR page request failed: {e}")),
    };
    if !resp.status().is_success() {
        return FetchOutcome::Failed(format!("IR page returned {}", resp.status()));
    }
    let html = match resp.text().await {
        Ok(html) => html,
        Err(e) => return FetchOutcome::Failed(format!("IR page read failed: {e}")),
    };

    let items = extract_items(&html, &url, &ticker, cutoff);
    debug!(count = items.len(), "Extracted IR page items");
    FetchOutcome::from_items(items)
}

/// Scan an HTML document for date-bearing elements with a nearby headline
/// anchor.
///
/// The pipeline per element:
/// 1. text-bearing block/inline elements only (`div, p, li, span, td, a`)
/// 2. text must be at least 5 characters and date-shaped
/// 3. text must contain a month abbreviation or a literal hyphen (guards
///    against phone numbers and street addresses)
/// 4. lenient date parse, normalized to UTC, within the cutoff window
/// 5. bounded upward walk to the first anchor with visible text longer
///    than 12 characters; date matches with no such anchor are dropped
pub(crate) fn extract_items(
    html: &str,
    origin: &str,
    ticker: &str,
    cutoff: DateTime<Utc>,
) -> Vec<NewsItem> {
    let document = Html::parse_document(html);
    let block_sel = Selector::parse("div, p, li, span, td, a").unwrap();
    let anchor_sel = Selector::parse("a[href]").unwrap();
    let base = Url::parse(origin).ok();

    let mut items = Vec::new();
    for element in document.select(&block_sel) {
        let text = element.text().collect::<Vec<_>>().join(" ");
        let text = text.trim();
        if text.chars().count() < MIN_TEXT_CHARS || !DATE_SHAPE.is_match(text) {
            continue;
        }

        let lower = text.to_lowercase();
        let has_month = MONTH_TOKENS.iter().any(|m| lower.contains(m));
        if !has_month && !text.contains('-') {
            continue;
        }

        let Some(published) = dates::parse_lenient(text) else {
            continue;
        };
        if published < cutoff {
            continue;
        }

        let Some((href, headline)) = nearest_anchor(element, &anchor_sel) else {
            continue;
        };
        let link = resolve_link(&href, base.as_ref());
        items.push(NewsItem::new(
            ticker,
            published.date_naive(),
            &headline,
            link,
            NewsSource::OfficialIR,
        ));
    }
    items
}

/// Walk from the element through its ancestors (bounded) and return the
/// href/text of the first anchor whose visible text exceeds 12 characters.
///
/// The first qualifying anchor in document order wins; this tie-break is
/// part of the extraction contract.
fn nearest_anchor(element: ElementRef<'_>, anchor_sel: &Selector) -> Option<(String, String)> {
    let mut current = Some(*element);
    for _ in 0..MAX_ANCESTOR_HOPS {
        let node = current?;
        if let Some(scope) = ElementRef::wrap(node) {
            for anchor in scope.select(anchor_sel) {
                let label = anchor.text().collect::<Vec<_>>().join(" ");
                let label = label.trim();
                let href = anchor.value().attr("href").unwrap_or_default();
                if !href.is_empty() && label.chars().count() > MIN_ANCHOR_CHARS {
                    return Some((href.to_string(), label.to_string()));
                }
            }
        }
        current = node.parent();
    }
    None
}

/// Resolve root-relative hrefs against the page origin; anything else is
/// passed through untouched.
fn resolve_link(href: &str, base: Option<&Url>) -> String {
    if href.starts_with('/') {
        if let Some(base) = base {
            if let Ok(joined) = base.join(href) {
                return joined.to_string();
            }
        }
    }
    href.to_string()
}
