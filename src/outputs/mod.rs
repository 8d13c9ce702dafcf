//! Report rendering for scan results.
//!
//! # Submodules
//!
//! - [`json`]: Serializes a `ScanReport` to JSON for API-style consumption
//! - [`text`]: Human-readable rendering grouped per ticker
//!
//! Both renderers produce a `String`; the entry point decides whether it
//! goes to stdout or a file.

pub mod json;
pub mod text;
