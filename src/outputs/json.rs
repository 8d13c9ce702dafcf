//! JSON rendering of scan reports.
//!
//! The news field is a flat sequence: successful entries are plain item
//! objects, failed tickers are `{"ticker": ..., "error": ...}` records, so
//! presentation layers can iterate without caring which is which until
//! they look for the `error` key.

use crate::models::ScanReport;
use std::error::Error;

/// Serialize a report as pretty-printed JSON.
pub fn render(report: &ScanReport) -> Result<String, Box<dyn Error>> {
    Ok(serde_json::to_string_pretty(report)?)
}
