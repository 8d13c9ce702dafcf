//! Human-readable rendering of scan reports.
//!
//! Groups records per ticker in the order they appear, one line per item
//! with the date, source tag, and headline, followed by the link indented
//! underneath. Filing sections, when present, follow the news.

use crate::models::{ScanRecord, ScanReport};

/// Render a report as plain text.
pub fn render(report: &ScanReport) -> String {
    let mut out = String::new();
    let mut current_ticker: Option<&str> = None;

    for record in &report.news {
        let ticker = match record {
            ScanRecord::Item(item) => item.ticker.as_str(),
            ScanRecord::Error { ticker, .. } => ticker.as_str(),
        };
        if current_ticker != Some(ticker) {
            if current_ticker.is_some() {
                out.push('\n');
            }
            out.push_str(&format!("== {ticker} ==\n"));
            current_ticker = Some(ticker);
        }
        match record {
            ScanRecord::Item(item) => {
                out.push_str(&format!(
                    "{}  [{}]  {}\n    {}\n",
                    item.date, item.source, item.headline, item.link
                ));
            }
            ScanRecord::Error { error, .. } => {
                out.push_str(&format!("  {error}\n"));
            }
        }
    }

    for ticker_filings in &report.filings {
        out.push_str(&format!("\n== {} filings ==\n", ticker_filings.ticker));
        for filing in &ticker_filings.filings {
            out.push_str(&format!(
                "{}  [{}]  {}\n    {}\n",
                filing.date, filing.form, filing.description, filing.link
            ));
        }
    }

    if out.is_empty() {
        out.push_str("No results.\n");
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{FilingForm, FilingRecord, NewsItem, NewsSource, TickerFilings};
    use chrono::NaiveDate;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_render_groups_by_ticker() {
        let report = ScanReport {
            news: vec![
                ScanRecord::Item(NewsItem::new(
                    "NVDA",
                    date(2025, 11, 10),
                    "NVIDIA announces record results",
                    "https://x/a".to_string(),
                    NewsSource::AggregatorNews,
                )),
                ScanRecord::Error {
                    ticker: "ZZZZ".to_string(),
                    error: "No recent news found in this timeframe.".to_string(),
                },
            ],
            filings: vec![],
        };
        let text = render(&report);
        assert!(text.contains("== NVDA =="));
        assert!(text.contains("== ZZZZ =="));
        assert!(text.contains("[Aggregator News]"));
        assert!(text.contains("https://x/a"));
        assert!(text.contains("No recent news found in this timeframe."));
    }

    #[test]
    fn test_render_filings_section() {
        let report = ScanReport {
            news: vec![],
            filings: vec![TickerFilings {
                ticker: "NVDA".to_string(),
                filings: vec![FilingRecord {
                    date: date(2025, 2, 14),
                    form: FilingForm::EightK,
                    description: "Current report".to_string(),
                    link: "https://sec/x".to_string(),
                }],
            }],
        };
        let text = render(&report);
        assert!(text.contains("== NVDA filings =="));
        assert!(text.contains("[8-K]"));
        assert!(text.contains("Current report"));
    }

    #[test]
    fn test_render_empty_report() {
        let report = ScanReport {
            news: vec![],
            filings: vec![],
        };
        assert_eq!(render(&report), "No results.\n");
    }
}
