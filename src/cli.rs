//! Command-line interface definitions for IR Scout.
//!
//! This module defines the CLI arguments and options using the `clap` crate.
//! The filing-repository credential can be provided via flag or environment
//! variable; its absence simply disables the filing lookup.

use clap::Parser;

/// Command-line arguments for the IR Scout application.
///
/// # Examples
///
/// ```sh
/// # Scan two tickers over the default 7-day window
/// ir_scout -t NVDA,AMD
///
/// # Month-long window, keyword-filtered, JSON output
/// ir_scout -t GME -d 30 -k earnings,dividend --threshold 80 --json
///
/// # Include regulatory filings (credential-gated)
/// ir_scout -t NVDA --filing-api-key YOUR_KEY
/// ```
#[derive(Parser, Debug)]
#[command(author, version, about)]
pub struct Cli {
    /// Ticker symbols to scan, comma separated (at most 5 are used)
    #[arg(short, long, value_delimiter = ',', required = true)]
    pub tickers: Vec<String>,

    /// Lookback window in days
    #[arg(short, long, default_value_t = 7)]
    pub days: i64,

    /// Keywords to filter headlines by, comma separated (fuzzy matched)
    #[arg(short, long, value_delimiter = ',')]
    pub keywords: Vec<String>,

    /// Minimum fuzzy-match score (0-100) a keyword must reach
    #[arg(long, default_value_t = 70)]
    pub threshold: u8,

    /// Emit the report as JSON instead of human-readable text
    #[arg(long)]
    pub json: bool,

    /// Write the report to a file instead of stdout
    #[arg(short, long)]
    pub output: Option<String>,

    /// Filing-search API key (enables the regulatory filings section)
    #[arg(long, env = "FILING_API_KEY")]
    pub filing_api_key: Option<String>,
}

/// Upper bound on tickers per scan; extras are dropped with a warning.
pub const MAX_TICKERS: usize = 5;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_parsing_defaults() {
        let cli = Cli::parse_from(["ir_scout", "--tickers", "NVDA,AMD"]);
        assert_eq!(cli.tickers, vec!["NVDA", "AMD"]);
        assert_eq!(cli.days, 7);
        assert_eq!(cli.threshold, 70);
        assert!(cli.keywords.is_empty());
        assert!(!cli.json);
        assert!(cli.output.is_none());
    }

    #[test]
    fn test_cli_short_flags() {
        let cli = Cli::parse_from(["ir_scout", "-t", "GME", "-d", "30", "-k", "earnings,dividend"]);
        assert_eq!(cli.tickers, vec!["GME"]);
        assert_eq!(cli.days, 30);
        assert_eq!(cli.keywords, vec!["earnings", "dividend"]);
    }

    #[test]
    fn test_cli_requires_tickers() {
        assert!(Cli::try_parse_from(["ir_scout"]).is_err());
    }

    #[test]
    fn test_cli_json_and_output() {
        let cli = Cli::parse_from(["ir_scout", "-t", "NVDA", "--json", "-o", "/tmp/report.json"]);
        assert!(cli.json);
        assert_eq!(cli.output.as_deref(), Some("/tmp/report.json"));
    }
}
