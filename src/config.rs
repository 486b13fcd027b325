//! Monitor configuration.
//!
//! The configuration names the subjects the collector searches for. It is a
//! JSON file; a missing file means "no subjects", which makes a collection
//! run a no-op.
//!
//! ```json
//! {
//!   "competitors": [{ "name": "Gentex", "category": "Automotive" }],
//!   "industry_keywords": ["PDLC", "Electrochromic Glass"],
//!   "leaders": ["王传福 比亚迪 讲话"],
//!   "search": { "recency_days": 30, "max_results": 10 }
//! }
//! ```

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::{Error, Result};

/// Environment variable holding the search API key.
pub const API_KEY_ENV: &str = "TAVILY_API_KEY";

/// A tracked competitor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Competitor {
    pub name: String,
    /// Free-form segment tag, stored as the item's tag.
    #[serde(default)]
    pub category: String,
}

/// Search parameters shared by every query of a run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchSettings {
    /// Default: 30
    pub recency_days: u32,
    /// Default: 10
    pub max_results: u32,
    /// Optional domain allow-list applied to every query.
    pub include_domains: Vec<String>,
    /// Year appended to industry queries. Default: the current year.
    pub year: Option<i32>,
}

impl Default for SearchSettings {
    fn default() -> Self {
        Self {
            recency_days: 30,
            max_results: 10,
            include_domains: Vec::new(),
            year: None,
        }
    }
}

/// Leader-statement collection parameters.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LeaderSettings {
    /// Default: 7
    pub span_days: u32,
    /// Stop querying once this many statements are collected. Default: 20
    pub min_items: usize,
    /// Default: 200
    pub max_results: u32,
}

impl Default for LeaderSettings {
    fn default() -> Self {
        Self {
            span_days: 7,
            min_items: 20,
            max_results: 200,
        }
    }
}

/// Subjects and search settings for a collection run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MonitorConfig {
    pub competitors: Vec<Competitor>,
    pub industry_keywords: Vec<String>,
    /// Leader query phrases, `"<name> <company> <context>"`.
    pub leaders: Vec<String>,
    pub search: SearchSettings,
    pub leader_search: LeaderSettings,
}

impl MonitorConfig {
    /// Load from a JSON file. A missing file yields the empty default.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            debug!(path = %path.display(), "config file missing, using empty config");
            return Ok(Self::default());
        }

        let invalid = |reason: String| Error::InvalidConfig {
            path: path.to_path_buf(),
            reason,
        };
        let raw = fs::read_to_string(path).map_err(|e| invalid(e.to_string()))?;
        serde_json::from_str(&raw).map_err(|e| invalid(e.to_string()))
    }

    /// Whether the config names nothing to search for.
    #[must_use]
    pub fn has_no_subjects(&self) -> bool {
        self.competitors.is_empty() && self.industry_keywords.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_json_fills_defaults() {
        let config: MonitorConfig =
            serde_json::from_str(r#"{"industry_keywords":["PDLC"]}"#).unwrap_or_default();
        assert_eq!(config.industry_keywords, vec!["PDLC"]);
        assert!(config.competitors.is_empty());
        assert_eq!(config.search.recency_days, 30);
        assert_eq!(config.leader_search.min_items, 20);
    }

    #[test]
    fn competitor_category_is_optional() {
        let config: MonitorConfig =
            serde_json::from_str(r#"{"competitors":[{"name":"Gentex"}]}"#).unwrap_or_default();
        assert_eq!(config.competitors[0].name, "Gentex");
        assert_eq!(config.competitors[0].category, "");
    }

    #[test]
    fn missing_file_is_empty_config() {
        let config = MonitorConfig::load(Path::new("/nonexistent/nev/config.json"));
        assert!(matches!(config, Ok(ref c) if c.has_no_subjects()));
    }
}
