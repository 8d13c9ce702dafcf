//! Investor-relations page discovery.
//!
//! Resolving a ticker to its IR page is a cascade of strategies, each tried
//! only when the previous one found nothing:
//!
//! 1. Static map of well-known tickers to canonical IR URLs
//! 2. Yahoo Finance profile scrape: take the first outbound corporate link
//!    and probe it with common IR path suffixes
//! 3. Domain guesses (`investor.`, `ir.`, `investors.` + `<ticker>.com`)
//! 4. DuckDuckGo HTML search for `<ticker> investor relations news`
//! 5. A deterministic search-engine query URL (never absent)
//!
//! Every network step uses a seconds-scale timeout and swallows its own
//! errors; a failed step simply falls through to the next one. Reachability
//! probes use a client that skips certificate verification — probes only
//! decide which URL to hand back, nothing fetched over that client is
//! trusted as content.

use reqwest::Client;
use scraper::{Html, Selector};
use std::collections::HashMap;
use std::error::Error;
use std::time::Duration;
use tracing::{debug, info, instrument, warn};
use url::Url;

/// Browser-like User-Agent for pages that reject bare clients.
const BROWSER_UA: &str = "Mozilla/5.0";

/// Path suffixes commonly used for corporate IR sections.
const IR_PATH_SUFFIXES: &[&str] = &["/investors", "/ir", "/investor-relations", "/newsroom"];

/// Hosts that never lead to a corporate site when linked from a profile page.
const NON_CORPORATE_HOSTS: &[&str] = &["yahoo.com", "google.com", "twitter.com"];

/// Resolves tickers to their most likely IR page URL.
///
/// The known-ticker map is an immutable lookup table built at construction
/// time and can be replaced via [`IrPageLocator::with_known_map`] for
/// testing or customization.
pub struct IrPageLocator {
    /// Verified client for pages whose content we read.
    content: Client,
    /// Short-timeout client for reachability probes only. Certificate
    /// verification is disabled; nothing fetched over this client is ever
    /// read as content.
    probe: Client,
    known: HashMap<String, String>,
}

impl IrPageLocator {
    /// Build a locator with the default known-ticker map.
    pub fn new() -> Result<Self, Box<dyn Error>> {
        Self::with_known_map(default_known_map())
    }

    /// Build a locator with a caller-supplied ticker→URL map.
    pub fn with_known_map(known: HashMap<String, String>) -> Result<Self, Box<dyn Error>> {
        let content = Client::builder()
            .timeout(Duration::from_secs(5))
            .build()?;
        let probe = Client::builder()
            .timeout(Duration::from_secs(3))
            .danger_accept_invalid_certs(true)
            .build()?;
        Ok(Self {
            content,
            probe,
            known,
        })
    }

    /// Resolve a ticker to an IR page URL.
    ///
    /// Never fails: the final cascade step returns a search-engine query
    /// URL for the ticker, so the caller always receives *some* URL even
    /// when every discovery strategy comes up empty.
    #[instrument(level = "info", skip(self))]
    pub async fn resolve(&self, ticker: &str) -> String {
        let ticker = ticker.to_uppercase();

        if let Some(url) = self.known.get(&ticker) {
            debug!(%ticker, %url, "Known ticker, using static map");
            return url.clone();
        }

        if let Some(url) = self.from_profile_scrape(&ticker).await {
            info!(%ticker, %url, "Resolved IR page via profile scrape");
            return url;
        }

        if let Some(url) = self.from_domain_guess(&ticker).await {
            info!(%ticker, %url, "Resolved IR page via domain guess");
            return url;
        }

        if let Some(url) = self.from_web_search(&ticker).await {
            info!(%ticker, %url, "Resolved IR page via web search");
            return url;
        }

        let url = fallback_search_url(&ticker);
        warn!(%ticker, %url, "All discovery strategies failed, returning search URL");
        url
    }

    /// Scrape the ticker's financial profile page for an outbound corporate
    /// link and probe it with common IR path suffixes.
    #[instrument(level = "debug", skip(self))]
    async fn from_profile_scrape(&self, ticker: &str) -> Option<String> {
        let profile_url = format!("https://finance.yahoo.com/quote/{ticker}/profile");
        let resp = self
            .content
            .get(&profile_url)
            .header(reqwest::header::USER_AGENT, BROWSER_UA)
            .send()
            .await
            .ok()?;
        if !resp.status().is_success() {
            debug!(status = %resp.status(), "Profile page not reachable");
            return None;
        }
        let html = resp.text().await.ok()?;

        let href = first_external_link(&html)?;
        let base = href.trim_end_matches('/').to_string();
        for suffix in IR_PATH_SUFFIXES {
            let candidate = format!("{base}{suffix}");
            if self.probe_ok(&candidate).await {
                return Some(candidate);
            }
        }
        Some(base)
    }

    /// Try `investor.`, `ir.`, and `investors.` subdomains of `<ticker>.com`.
    #[instrument(level = "debug", skip(self))]
    async fn from_domain_guess(&self, ticker: &str) -> Option<String> {
        for candidate in domain_guesses(ticker) {
            if self.probe_ok(&candidate).await {
                return Some(candidate);
            }
        }
        None
    }

    /// Ask DuckDuckGo's HTML endpoint and take the first result URL.
    #[instrument(level = "debug", skip(self))]
    async fn from_web_search(&self, ticker: &str) -> Option<String> {
        let query = format!("{ticker} investor relations news");
        let search_url = format!(
            "https://html.duckduckgo.com/html/?q={}",
            urlencoding::encode(&query)
        );
        let resp = self
            .content
            .get(&search_url)
            .header(reqwest::header::USER_AGENT, BROWSER_UA)
            .send()
            .await
            .ok()?;
        if !resp.status().is_success() {
            return None;
        }
        let html = resp.text().await.ok()?;
        first_search_result(&html)
    }

    /// Check whether a URL responds with a non-error status.
    async fn probe_ok(&self, url: &str) -> bool {
        match self.probe.get(url).send().await {
            Ok(resp) => {
                let ok = resp.status().as_u16() < 400;
                debug!(%url, status = %resp.status(), ok, "Probe");
                ok
            }
            Err(e) => {
                debug!(%url, error = %e, "Probe failed");
                false
            }
        }
    }
}

/// The static map of well-known tickers to canonical IR pages.
pub fn default_known_map() -> HashMap<String, String> {
    [
        ("NVDA", "https://nvidianews.nvidia.com/"),
        ("TSLA", "https://ir.tesla.com"),
        ("AAPL", "https://www.apple.com/newsroom/"),
        ("AMZN", "https://ir.aboutamazon.com"),
        ("MSFT", "https://www.microsoft.com/en-us/investor"),
        ("META", "https://investor.fb.com"),
        ("GOOG", "https://abc.xyz/investor"),
        ("GOOGL", "https://abc.xyz/investor"),
        ("AMD", "https://ir.amd.com"),
        ("GME", "https://news.gamestop.com/"),
        ("PETV", "https://www.petv.com/investors/"),
    ]
    .into_iter()
    .map(|(t, u)| (t.to_string(), u.to_string()))
    .collect()
}

/// Candidate IR subdomains for a ticker's presumed `.com` domain.
fn domain_guesses(ticker: &str) -> Vec<String> {
    let domain = format!("{}.com", ticker.to_lowercase());
    vec![
        format!("https://investor.{domain}"),
        format!("https://ir.{domain}"),
        format!("https://investors.{domain}"),
    ]
}

/// The deterministic last-resort URL; never empty.
pub fn fallback_search_url(ticker: &str) -> String {
    format!(
        "https://www.google.com/search?q={}",
        urlencoding::encode(&format!("{ticker} investor relations news"))
    )
}

/// First absolute link in the document that doesn't point back at the
/// profile host or another well-known non-corporate domain.
fn first_external_link(html: &str) -> Option<String> {
    let document = Html::parse_document(html);
    let anchor_sel = Selector::parse("a[href]").unwrap();
    for element in document.select(&anchor_sel) {
        let href = element.value().attr("href").unwrap_or_default();
        if is_external_candidate(href) {
            return Some(href.to_string());
        }
    }
    None
}

/// Whether an href looks like an outbound corporate link.
fn is_external_candidate(href: &str) -> bool {
    href.contains("http") && !NON_CORPORATE_HOSTS.iter().any(|host| href.contains(host))
}

/// First organic result link from a DuckDuckGo HTML results page.
///
/// DuckDuckGo wraps results in a redirect of the form
/// `//duckduckgo.com/l/?uddg=<encoded-url>`; the target is unwrapped when
/// present.
fn first_search_result(html: &str) -> Option<String> {
    let document = Html::parse_document(html);
    let result_sel = Selector::parse("a.result__a[href]").unwrap();
    let element = document.select(&result_sel).next()?;
    let href = element.value().attr("href")?;
    Some(unwrap_redirect(href))
}

/// Decode a `uddg` redirect parameter if the href carries one.
fn unwrap_redirect(href: &str) -> String {
    let absolute = if href.starts_with("//") {
        format!("https:{href}")
    } else {
        href.to_string()
    };
    if let Ok(parsed) = Url::parse(&absolute) {
        for (key, value) in parsed.query_pairs() {
            if key == "uddg" {
                return value.into_owned();
            }
        }
    }
    absolute
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_known_map_has_core_tickers() {
        let map = default_known_map();
        assert_eq!(
            map.get("NVDA").map(String::as_str),
            Some("https://nvidianews.nvidia.com/")
        );
        assert!(map.contains_key("TSLA"));
        assert!(map.contains_key("GOOGL"));
        assert!(!map.contains_key("ZZZZ"));
    }

    #[test]
    fn test_domain_guesses() {
        let guesses = domain_guesses("Acme");
        assert_eq!(
            guesses,
            vec![
                "https://investor.acme.com",
                "https://ir.acme.com",
                "https://investors.acme.com",
            ]
        );
    }

    #[test]
    fn test_fallback_search_url_never_empty() {
        let url = fallback_search_url("ZZZZ");
        assert!(url.starts_with("https://www.google.com/search?q="));
        assert!(url.contains("ZZZZ"));
        assert!(url.contains("investor%20relations%20news"));
    }

    #[test]
    fn test_is_external_candidate() {
        assert!(is_external_candidate("https://www.acme.com"));
        assert!(!is_external_candidate("/quote/ACME"));
        assert!(!is_external_candidate("https://finance.yahoo.com/lookup"));
        assert!(!is_external_candidate("https://twitter.com/acme"));
        assert!(!is_external_candidate("https://www.google.com/finance"));
    }

    #[test]
    fn test_first_external_link_skips_internal() {
        let html = r#"
            <html><body>
              <a href="/quote/ACME/holders">Holders</a>
              <a href="https://finance.yahoo.com/news">Yahoo News</a>
              <a href="https://www.acme.com/">Acme Corp</a>
              <a href="https://www.other.com/">Other</a>
            </body></html>
        "#;
        assert_eq!(
            first_external_link(html),
            Some("https://www.acme.com/".to_string())
        );
    }

    #[test]
    fn test_first_search_result_unwraps_redirect() {
        let html = r#"
            <html><body>
              <a class="result__a" href="//duckduckgo.com/l/?uddg=https%3A%2F%2Fir.acme.com%2Fnews&rut=abc">Acme IR</a>
            </body></html>
        "#;
        assert_eq!(
            first_search_result(html),
            Some("https://ir.acme.com/news".to_string())
        );
    }

    #[test]
    fn test_first_search_result_plain_href() {
        let html = r#"<a class="result__a" href="https://ir.acme.com/">Acme</a>"#;
        assert_eq!(
            first_search_result(html),
            Some("https://ir.acme.com/".to_string())
        );
    }

    #[test]
    fn test_locator_construction() {
        let locator = IrPageLocator::new().unwrap();
        assert!(locator.known.contains_key("AMD"));
    }
}
