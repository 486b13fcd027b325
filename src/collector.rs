//! Daily collection run.
//!
//! Expands the configured subjects into bilingual query variants, runs them
//! one after another against a [`SearchClient`], and feeds every result
//! through the cleaner into the dedup store.

use chrono::{Datelike, Local};
use tracing::{debug, info};

use crate::cleaner::clean_content;
use crate::config::MonitorConfig;
use crate::search::{SearchClient, SearchRequest};
use crate::store::{Category, DedupStore};

/// A query plus the store metadata its results are filed under.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlannedQuery {
    pub query: String,
    pub category: Category,
    pub competitor: Option<String>,
    pub tag: String,
}

/// Expand the configured subjects into queries.
///
/// Each competitor gets a Chinese and an English news query; each industry
/// keyword gets a Chinese industry-news query and an English market-trends
/// query, both pinned to `year`.
#[must_use]
pub fn plan_queries(config: &MonitorConfig, year: i32) -> Vec<PlannedQuery> {
    let mut planned = Vec::with_capacity(2 * (config.competitors.len() + config.industry_keywords.len()));

    for competitor in &config.competitors {
        let name = competitor.name.trim();
        if name.is_empty() {
            continue;
        }
        for query in [format!("{name} 智能调光 新闻"), format!("{name} smart glass news")] {
            planned.push(PlannedQuery {
                query,
                category: Category::Competitor,
                competitor: Some(name.to_string()),
                tag: competitor.category.clone(),
            });
        }
    }

    for keyword in &config.industry_keywords {
        let keyword = keyword.trim();
        if keyword.is_empty() {
            continue;
        }
        for query in [
            format!("{keyword} 行业新闻 {year}"),
            format!("{keyword} market trends {year}"),
        ] {
            planned.push(PlannedQuery {
                query,
                category: Category::Industry,
                competitor: None,
                tag: keyword.to_string(),
            });
        }
    }

    planned
}

/// Runs the configured queries and files the results.
pub struct Collector<'a, C: SearchClient> {
    client: &'a C,
    config: &'a MonitorConfig,
}

impl<'a, C: SearchClient> Collector<'a, C> {
    #[must_use]
    pub fn new(client: &'a C, config: &'a MonitorConfig) -> Self {
        Self { client, config }
    }

    /// The queries a run would issue.
    #[must_use]
    pub fn planned_queries(&self) -> Vec<PlannedQuery> {
        let year = self.config.search.year.unwrap_or_else(|| Local::now().year());
        plan_queries(self.config, year)
    }

    /// Run every planned query once and add new results to `store`.
    ///
    /// Returns the number of newly stored items. A failed query contributes
    /// nothing and the run moves on; the caller persists the store.
    pub fn run_daily_check(&self, store: &mut DedupStore) -> usize {
        let planned = self.planned_queries();
        info!(queries = planned.len(), "starting collection run");

        let settings = &self.config.search;
        let mut added = 0;

        for plan in &planned {
            let request = SearchRequest::new(plan.query.as_str())
                .recency_days(settings.recency_days)
                .max_results(settings.max_results)
                .include_domains(&settings.include_domains);

            let results = self.client.search(&request);
            debug!(query = %plan.query, results = results.len(), "query finished");

            let tags = [plan.tag.clone()];
            for mut result in results {
                result.content = Some(clean_content(result.content.as_deref().unwrap_or_default()));
                if store.add(&result, plan.category, plan.competitor.as_deref(), &tags) {
                    added += 1;
                }
            }
        }

        info!(added, total = store.len(), "collection run finished");
        added
    }
}
