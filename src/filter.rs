//! Keyword filtering of aggregated headlines.
//!
//! Post-aggregation narrowing stage. Each headline is scored against every
//! caller keyword with a partial-ratio similarity: the keyword is slid
//! across same-length windows of the headline and the best window's
//! normalized Levenshtein similarity wins, scaled to 0–100. This tolerates
//! minor misspellings and truncation without requiring exact containment.

use crate::models::NewsItem;
use tracing::debug;

/// Keep only items where at least one keyword scores at or above the
/// threshold (0–100) against the lowercased headline.
///
/// An empty keyword list disables filtering entirely.
pub fn apply(items: Vec<NewsItem>, keywords: &[String], threshold: u8) -> Vec<NewsItem> {
    if keywords.is_empty() {
        return items;
    }
    let keywords: Vec<String> = keywords.iter().map(|k| k.to_lowercase()).collect();
    let before = items.len();
    let kept: Vec<NewsItem> = items
        .into_iter()
        .filter(|item| {
            let headline = item.headline.to_lowercase();
            keywords
                .iter()
                .any(|keyword| partial_ratio(keyword, &headline) >= f64::from(threshold))
        })
        .collect();
    debug!(before, after = kept.len(), threshold, "Applied keyword filter");
    kept
}

/// Best-window fuzzy similarity between a needle and a haystack, 0–100.
///
/// When the needle is at least as long as the haystack the two strings are
/// compared whole; otherwise every needle-sized character window of the
/// haystack is scored and the maximum wins. Exact containment scores 100.
pub fn partial_ratio(needle: &str, haystack: &str) -> f64 {
    if needle.is_empty() {
        return 100.0;
    }
    if haystack.is_empty() {
        return 0.0;
    }

    let needle_chars: Vec<char> = needle.chars().collect();
    let haystack_chars: Vec<char> = haystack.chars().collect();
    if needle_chars.len() >= haystack_chars.len() {
        return strsim::normalized_levenshtein(needle, haystack) * 100.0;
    }

    let mut best: f64 = 0.0;
    for window in haystack_chars.windows(needle_chars.len()) {
        let candidate: String = window.iter().collect();
        let score = strsim::normalized_levenshtein(needle, &candidate);
        if score > best {
            best = score;
            if best >= 1.0 {
                break;
            }
        }
    }
    best * 100.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::NewsSource;
    use chrono::NaiveDate;

    fn item(headline: &str) -> NewsItem {
        NewsItem::new(
            "NVDA",
            NaiveDate::from_ymd_opt(2025, 11, 10).unwrap(),
            headline,
            format!("https://x/{}", headline.len()),
            NewsSource::AggregatorNews,
        )
    }

    #[test]
    fn test_empty_keywords_pass_through() {
        let items = vec![item("NVIDIA beats estimates"), item("Dividend announced")];
        let kept = apply(items, &[], 80);
        assert_eq!(kept.len(), 2);
    }

    #[test]
    fn test_threshold_zero_retains_all() {
        let items = vec![item("NVIDIA beats estimates"), item("Dividend announced")];
        let kept = apply(items, &["unrelated".to_string()], 0);
        assert_eq!(kept.len(), 2);
    }

    #[test]
    fn test_threshold_100_exact_full_headline() {
        let items = vec![item("nvidia beats estimates")];
        let kept = apply(items, &["nvidia beats estimates".to_string()], 100);
        assert_eq!(kept.len(), 1);
    }

    #[test]
    fn test_exact_substring_scores_100() {
        assert_eq!(partial_ratio("earnings", "record earnings for q3"), 100.0);
    }

    #[test]
    fn test_misspelled_keyword_still_matches() {
        // A transposition costs two edits in an 8-char window: 6/8 = 75.
        let score = partial_ratio("earnigns", "record earnings for q3");
        assert!(score >= 70.0, "score was {score}");
    }

    #[test]
    fn test_unrelated_keyword_filtered_out() {
        let items = vec![item("NVIDIA announces record earnings")];
        let kept = apply(items, &["bankruptcy".to_string()], 80);
        assert!(kept.is_empty());
    }

    #[test]
    fn test_mixed_keywords_any_match_retains() {
        let items = vec![item("NVIDIA announces record earnings")];
        let kept = apply(
            items,
            &["bankruptcy".to_string(), "earnings".to_string()],
            90,
        );
        assert_eq!(kept.len(), 1);
    }

    #[test]
    fn test_partial_ratio_bounds() {
        assert_eq!(partial_ratio("", "anything"), 100.0);
        assert_eq!(partial_ratio("abc", ""), 0.0);
        let score = partial_ratio("zzzz", "aaaa");
        assert!((0.0..=100.0).contains(&score));
    }

    #[test]
    fn test_needle_longer_than_haystack() {
        let score = partial_ratio("a much longer keyword", "short");
        assert!(score < 50.0);
    }
}
