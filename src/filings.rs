//! Optional filing-repository collaborator.
//!
//! Queries an external filing-search API (sec-api.io query shape) for a
//! ticker's recent regulatory filings. The collaborator is credential
//! gated: without an API key the client is never constructed and the
//! lookup is simply disabled — no retry, no fallback. Filing results are
//! rendered alongside the news report and never feed the news aggregation
//! itself.

use crate::dates;
use crate::models::{FilingForm, FilingRecord};
use reqwest::Client;
use serde::Deserialize;
use serde_json::json;
use std::error::Error;
use std::time::Duration;
use tracing::{info, instrument, warn};

const FILING_API_URL: &str = "https://api.sec-api.io";

/// How many filings to request per ticker.
const PAGE_SIZE: usize = 25;

/// Authenticated client for the filing-search API.
pub struct FilingsClient {
    client: Client,
    api_key: String,
}

/// Raw response shape from the filing-search API.
#[derive(Debug, Deserialize)]
struct QueryResponse {
    #[serde(default)]
    filings: Vec<RawFiling>,
}

#[derive(Debug, Deserialize)]
struct RawFiling {
    #[serde(rename = "filedAt")]
    filed_at: String,
    #[serde(rename = "formType")]
    form_type: String,
    #[serde(default)]
    description: String,
    #[serde(rename = "linkToFilingDetails", default)]
    link: String,
}

impl FilingsClient {
    /// Build a client for the given API key.
    pub fn new(api_key: String) -> Result<Self, Box<dyn Error>> {
        let client = Client::builder().timeout(Duration::from_secs(10)).build()?;
        Ok(Self { client, api_key })
    }

    /// Fetch the most recent filings for a ticker, newest first.
    ///
    /// # Errors
    ///
    /// Returns an error on network failure, a non-success status (including
    /// an invalid credential), or a malformed response body. The caller
    /// decides whether that is fatal; the news scan never depends on it.
    #[instrument(level = "info", skip(self))]
    pub async fn search(&self, ticker: &str) -> Result<Vec<FilingRecord>, Box<dyn Error>> {
        let query = json!({
            "query": format!("ticker:{}", ticker.to_uppercase()),
            "from": "0",
            "size": PAGE_SIZE.to_string(),
            "sort": [{ "filedAt": { "order": "desc" } }],
        });

        let resp = self
            .client
            .post(FILING_API_URL)
            .header(reqwest::header::AUTHORIZATION, &self.api_key)
            .header(reqwest::header::CONTENT_TYPE, "application/json")
            .body(serde_json::to_string(&query)?)
            .send()
            .await?;
        if !resp.status().is_success() {
            return Err(format!("filing search returned {}", resp.status()).into());
        }

        let body = resp.text().await?;
        let parsed: QueryResponse = serde_json::from_str(&body)?;
        let records = map_filings(parsed.filings);
        info!(ticker, count = records.len(), "Fetched filings");
        Ok(records)
    }
}

/// Convert raw API filings into [`FilingRecord`]s, dropping entries whose
/// filing date cannot be parsed.
fn map_filings(raw: Vec<RawFiling>) -> Vec<FilingRecord> {
    raw.into_iter()
        .filter_map(|filing| {
            let Some(filed) = dates::parse_lenient(&filing.filed_at) else {
                warn!(filed_at = %filing.filed_at, "Unparseable filing date, skipping");
                return None;
            };
            Some(FilingRecord {
                date: filed.date_naive(),
                form: FilingForm::from_code(&filing.form_type),
                description: filing.description,
                link: filing.link,
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_map_filings_parses_response_shape() {
        let body = r#"{
            "total": { "value": 2 },
            "filings": [
                {
                    "filedAt": "2025-02-14T16:30:00-05:00",
                    "formType": "8-K",
                    "description": "Current report",
                    "linkToFilingDetails": "https://www.sec.gov/Archives/edgar/data/1/8k.htm"
                },
                {
                    "filedAt": "2025-01-30T09:00:00-05:00",
                    "formType": "10-K",
                    "linkToFilingDetails": "https://www.sec.gov/Archives/edgar/data/1/10k.htm"
                }
            ]
        }"#;
        let parsed: QueryResponse = serde_json::from_str(body).unwrap();
        let records = map_filings(parsed.filings);
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].form, FilingForm::EightK);
        assert_eq!(records[0].date.to_string(), "2025-02-14");
        assert_eq!(records[1].form, FilingForm::TenK);
        assert!(records[1].description.is_empty());
    }

    #[test]
    fn test_map_filings_drops_bad_dates() {
        let raw = vec![RawFiling {
            filed_at: "not a date".to_string(),
            form_type: "10-Q".to_string(),
            description: String::new(),
            link: String::new(),
        }];
        assert!(map_filings(raw).is_empty());
    }

    #[test]
    fn test_unknown_form_type_preserved() {
        let raw = vec![RawFiling {
            filed_at: "2025-03-01T00:00:00Z".to_string(),
            form_type: "SC 13G".to_string(),
            description: String::new(),
            link: String::new(),
        }];
        let records = map_filings(raw);
        assert_eq!(records[0].form, FilingForm::Other("SC 13G".to_string()));
    }
}
