//! Source fetchers for ticker news mentions.
//!
//! Each submodule turns one raw remote document into a list of
//! [`crate::models::NewsItem`]s newer than a caller-supplied cutoff.
//!
//! # Sources
//!
//! | Source | Module | Document | Notes |
//! |--------|--------|----------|-------|
//! | Yahoo Finance | [`aggregator`] | ticker-scoped RSS feed | broad market news mentions |
//! | r/wallstreetbets | [`forum`] | ticker search Atom feed | community discussion |
//! | Official IR page | [`ir_page`] | free-form HTML | heuristic date-near-link extraction |
//!
//! # Common Contract
//!
//! Every fetcher is an async `fetch(..) -> FetchOutcome` taking a shared
//! client, the ticker, and a cutoff (plus the page URL for [`ir_page`]),
//! and never
//! propagates an error to its caller: network and parse failures become
//! [`crate::models::FetchOutcome::Failed`], which the orchestrator treats
//! as an empty contribution from that source only.

pub mod aggregator;
pub mod forum;
pub mod ir_page;

/// Browser-like User-Agent for endpoints that reject bare clients.
pub(crate) const BROWSER_UA: &str = "Mozilla/5.0";

/// Descriptive client identifier for the forum API, which requires one.
pub(crate) const FORUM_UA: &str = "ir_scout/0.1 (ticker news aggregation)";
