//! Flat JSON deduplication store.
//!
//! The store is a single JSON document holding every item ever collected,
//! keyed by URL. It is read once when a run starts and written once when it
//! ends; nothing is ever evicted.

use std::fs;
use std::path::Path;

use chrono::{Local, NaiveDateTime};
use serde::{Deserialize, Deserializer, Serialize};
use tracing::{debug, warn};

use crate::search::RawSearchResult;
use crate::{Error, Result};

/// Timestamp format for `fetched_at` and `last_update`.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Date format used when a source has no published date.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Default number of items handed to the report consumer.
pub const DEFAULT_REPORT_LIMIT: usize = 20;

/// Which digest section an item belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Category {
    /// News about a tracked competitor.
    Competitor,
    /// Industry-wide news.
    Industry,
}

/// An item persisted in the store. Never mutated after insertion.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoredItem {
    pub url: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub title: String,
    /// Cleaned content.
    #[serde(default, deserialize_with = "null_as_default")]
    pub content: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub published_date: String,
    pub fetched_at: String,
    pub category: Category,
    #[serde(default)]
    pub competitor: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub tags: Vec<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub score: f64,
}

/// Older store files were written with `null` for missing strings.
fn null_as_default<'de, D, T>(deserializer: D) -> std::result::Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

#[derive(Debug, Default, Serialize, Deserialize)]
struct StoreDocument {
    items: Vec<StoredItem>,
    #[serde(default, deserialize_with = "null_as_default")]
    last_update: String,
}

/// Summary counters for the report consumer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StoreStats {
    pub total_tracked: usize,
    pub last_update: String,
}

/// Most-recent-first slice of the store, split by category.
#[derive(Debug, Clone, Serialize)]
pub struct ReportData {
    pub competitor_news: Vec<StoredItem>,
    pub industry_news: Vec<StoredItem>,
    pub stats: StoreStats,
}

/// URL-keyed, append-only item store.
#[derive(Debug, Default)]
pub struct DedupStore {
    doc: StoreDocument,
    last_stamp: Option<NaiveDateTime>,
}

impl DedupStore {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Load a store from disk.
    ///
    /// A missing file yields an empty store. A file that exists but cannot be
    /// read or parsed is reported as [`Error::CorruptStore`] rather than being
    /// reset, so a damaged history is never silently overwritten.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            debug!(path = %path.display(), "store file missing, starting empty");
            return Ok(Self::new());
        }

        let corrupt = |reason: String| Error::CorruptStore {
            path: path.to_path_buf(),
            reason,
        };

        let raw = fs::read_to_string(path).map_err(|e| corrupt(e.to_string()))?;
        let mut doc: StoreDocument =
            serde_json::from_str(&raw).map_err(|e| corrupt(e.to_string()))?;

        let before = doc.items.len();
        let mut seen = std::collections::HashSet::new();
        doc.items.retain(|item| seen.insert(item.url.clone()));
        if doc.items.len() != before {
            warn!(
                path = %path.display(),
                dropped = before - doc.items.len(),
                "store file held duplicate URLs, keeping first occurrences"
            );
        }

        Ok(Self {
            doc,
            last_stamp: None,
        })
    }

    /// Stamp `last_update` and write the whole store to disk as pretty JSON.
    pub fn save(&mut self, path: &Path) -> Result<()> {
        self.doc.last_update = Local::now().format(TIMESTAMP_FORMAT).to_string();

        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }
        let json = serde_json::to_string_pretty(&self.doc)?;
        fs::write(path, json)?;

        debug!(path = %path.display(), items = self.doc.items.len(), "store saved");
        Ok(())
    }

    /// Add a search result unless its URL is missing or already stored.
    ///
    /// Returns `true` when the item was newly inserted.
    pub fn add(
        &mut self,
        item: &RawSearchResult,
        category: Category,
        competitor: Option<&str>,
        tags: &[String],
    ) -> bool {
        self.add_at(item, category, competitor, tags, Local::now().naive_local())
    }

    /// [`add`](Self::add) with an explicit clock reading.
    ///
    /// `fetched_at` never goes backwards within one store instance: a clock
    /// reading earlier than the previous stamp reuses the previous stamp.
    pub fn add_at(
        &mut self,
        item: &RawSearchResult,
        category: Category,
        competitor: Option<&str>,
        tags: &[String],
        now: NaiveDateTime,
    ) -> bool {
        let Some(url) = item.url.as_deref().filter(|u| !u.trim().is_empty()) else {
            return false;
        };
        if self.contains(url) {
            return false;
        }

        let stamp = match self.last_stamp {
            Some(last) if last > now => last,
            _ => now,
        };
        self.last_stamp = Some(stamp);

        let published_date = item
            .published_date
            .clone()
            .filter(|d| !d.trim().is_empty())
            .unwrap_or_else(|| stamp.format(DATE_FORMAT).to_string());

        self.doc.items.push(StoredItem {
            url: url.to_string(),
            title: item.title.clone().unwrap_or_default(),
            content: item.content.clone().unwrap_or_default(),
            published_date,
            fetched_at: stamp.format(TIMESTAMP_FORMAT).to_string(),
            category,
            competitor: competitor.map(str::to_string),
            tags: tags.iter().filter(|t| !t.is_empty()).cloned().collect(),
            score: item.score.unwrap_or(0.0),
        });
        true
    }

    /// Whether an item with exactly this URL is stored.
    #[must_use]
    pub fn contains(&self, url: &str) -> bool {
        self.doc.items.iter().any(|existing| existing.url == url)
    }

    /// All items in insertion order.
    #[must_use]
    pub fn items(&self) -> &[StoredItem] {
        &self.doc.items
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.doc.items.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.doc.items.is_empty()
    }

    /// Timestamp of the last save, empty if never saved.
    #[must_use]
    pub fn last_update(&self) -> &str {
        &self.doc.last_update
    }

    /// The `limit` most recently fetched items, partitioned by category.
    #[must_use]
    pub fn report_data(&self, limit: usize) -> ReportData {
        let mut recent: Vec<&StoredItem> = self.doc.items.iter().collect();
        // Stable sort keeps insertion order among identical stamps.
        recent.sort_by(|a, b| b.fetched_at.cmp(&a.fetched_at));
        recent.truncate(limit);

        let pick = |category: Category| {
            recent
                .iter()
                .filter(|item| item.category == category)
                .map(|item| (*item).clone())
                .collect::<Vec<_>>()
        };

        ReportData {
            competitor_news: pick(Category::Competitor),
            industry_news: pick(Category::Industry),
            stats: StoreStats {
                total_tracked: self.doc.items.len(),
                last_update: self.doc.last_update.clone(),
            },
        }
    }
}
