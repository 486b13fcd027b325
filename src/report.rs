//! Read side for the report template.
//!
//! Projects the most recent stored items through the analyzer into the
//! shape the daily page renders. Page layout itself lives elsewhere; this
//! module only produces data.

use std::fs;
use std::path::Path;

use chrono::Local;
use serde::Serialize;

use crate::analyzer::Analyzer;
use crate::leaders::LeaderProfile;
use crate::store::{DedupStore, StoreStats, StoredItem, TIMESTAMP_FORMAT};
use crate::Result;

/// One rendered news card.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DigestEntry {
    pub title: String,
    pub url: String,
    /// Analyzer summary, not the raw content.
    pub content: String,
    pub published_at: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub matched_competitors: Vec<String>,
    pub emoji: String,
    pub keywords: Vec<String>,
}

impl DigestEntry {
    fn from_item(item: &StoredItem, analyzer: &Analyzer) -> Self {
        let analysis = analyzer.analyze(&item.content, &item.title);
        Self {
            title: item.title.clone(),
            url: item.url.clone(),
            content: analysis.summary,
            published_at: item.published_date.clone(),
            matched_competitors: item.competitor.iter().cloned().collect(),
            emoji: analysis.emoji,
            keywords: analysis.keywords,
        }
    }
}

/// Competitor and industry sections of the daily page.
#[derive(Debug, Clone, Serialize)]
pub struct Digest {
    pub competitors: Vec<DigestEntry>,
    pub news: Vec<DigestEntry>,
    pub stats: StoreStats,
    pub updated_at: String,
    /// Leader cards, present only when a leader run happened.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub leaders: Vec<LeaderProfile>,
}

impl Digest {
    /// Total number of cards across both sections.
    #[must_use]
    pub fn len(&self) -> usize {
        self.competitors.len() + self.news.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Attach leader cards built by [`group_by_leader`](crate::leaders::group_by_leader).
    #[must_use]
    pub fn with_leaders(mut self, leaders: Vec<LeaderProfile>) -> Self {
        self.leaders = leaders;
        self
    }

    /// Write the digest as pretty JSON, creating parent directories.
    pub fn write_json(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }
        fs::write(path, serde_json::to_string_pretty(self)?)?;
        Ok(())
    }
}

/// Build the digest from the `limit` most recently fetched items.
#[must_use]
pub fn build_digest(store: &DedupStore, analyzer: &Analyzer, limit: usize) -> Digest {
    let data = store.report_data(limit);
    let project = |items: &[StoredItem]| {
        items
            .iter()
            .map(|item| DigestEntry::from_item(item, analyzer))
            .collect::<Vec<_>>()
    };

    Digest {
        competitors: project(&data.competitor_news),
        news: project(&data.industry_news),
        stats: data.stats,
        updated_at: Local::now().format(TIMESTAMP_FORMAT).to_string(),
        leaders: Vec::new(),
    }
}
