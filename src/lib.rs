//! # nev-digest
//!
//! Daily news collection and analysis for the EV and smart-glass industry.
//!
//! The crate searches an external news API for configured competitors and
//! industry keywords, cleans and deduplicates the results into a flat JSON
//! store, and derives an emoji, keyword tags and a short summary for each
//! item when a digest is built.
//!
//! ## Quick Start
//!
//! ```rust
//! use nev_digest::{clean_content, Analyzer, Category, DedupStore, RawSearchResult};
//!
//! let mut store = DedupStore::new();
//! let result = RawSearchResult {
//!     url: Some("https://example.com/pdlc".to_string()),
//!     title: Some("PDLC Film Demand Rises".to_string()),
//!     content: Some(clean_content("PDLC film demand rises.  Read more")),
//!     ..RawSearchResult::default()
//! };
//! assert!(store.add(&result, Category::Industry, None, &[]));
//! assert!(!store.add(&result, Category::Industry, None, &[]));
//!
//! let item = &store.items()[0];
//! let analysis = Analyzer::new().analyze(&item.content, &item.title);
//! assert_eq!(analysis.keywords[0], "PDLC");
//! ```
//!
//! ## Pipeline
//!
//! - **Cleaning**: mojibake repair, boilerplate stripping, whitespace folding
//! - **Collection**: bilingual queries per subject, best-effort, no retries
//! - **Deduplication**: one stored item per URL, append-only
//! - **Analysis**: ordered emoji rules, keyword tagging, sentence scoring

mod error;
mod patterns;

/// Text normalization for search results.
pub mod cleaner;

/// Mojibake detection and repair.
pub mod encoding;

/// URL-keyed JSON store.
pub mod store;

/// Search service boundary and HTTP client.
pub mod search;

/// Daily collection run over configured subjects.
pub mod collector;

/// Leader-statement collection.
pub mod leaders;

/// Emoji, keyword and summary derivation.
pub mod analyzer;

/// Optional machine translation for summarization.
pub mod translate;

/// Monitor configuration.
pub mod config;

/// Digest projection for the report template.
pub mod report;

// Public API - re-exports
pub use analyzer::{AnalyzedItem, Analyzer};
pub use analyzer::summary::SummaryOptions;
pub use cleaner::clean_content;
pub use collector::Collector;
pub use config::MonitorConfig;
pub use error::{Error, Result};
pub use report::{build_digest, Digest};
pub use search::{RawSearchResult, SearchClient, SearchRequest, TavilyClient};
pub use store::{Category, DedupStore, StoredItem};
