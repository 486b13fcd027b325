//! Industry-leader statement collection.
//!
//! Searches recent news for each configured leader phrase, keeps results
//! published inside the window, and stops as soon as enough statements are
//! gathered. Unlike the daily monitor this run does not touch the dedup
//! store; it produces a self-contained snapshot that can be written to the
//! reports directory.

use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Duration, Local, NaiveDate, NaiveDateTime};
use serde::Serialize;
use tracing::{debug, info};

use crate::config::LeaderSettings;
use crate::search::{SearchClient, SearchRequest};
use crate::store::{DATE_FORMAT, TIMESTAMP_FORMAT};
use crate::Result;

/// Content excerpts are cut to this many chars.
pub const EXCERPT_CHARS: usize = 600;

/// Statement previews on leader cards are cut to this many chars.
pub const PREVIEW_CHARS: usize = 100;

/// One search hit attributed to a leader query.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LeaderStatement {
    pub leader_query: String,
    pub url: String,
    pub title: String,
    pub content_excerpt: String,
    pub published_at: String,
    pub collected_at: String,
}

/// Bookkeeping for one collection run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LeaderRunStatus {
    pub min_required: usize,
    pub collected: usize,
    pub span_days: u32,
    pub time_range: String,
    pub run_at: String,
    pub logs: Vec<String>,
}

/// Result of [`LeaderCollector::run`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LeaderRun {
    pub status: LeaderRunStatus,
    pub results: Vec<LeaderStatement>,
}

impl LeaderRun {
    /// Write the run as `leader_statements_<timestamp>.json` under `dir`.
    pub fn write_to(&self, dir: &Path) -> Result<PathBuf> {
        fs::create_dir_all(dir)?;
        let stamp = Local::now().format("%Y-%m-%d_%H%M%S");
        let path = dir.join(format!("leader_statements_{stamp}.json"));
        fs::write(&path, serde_json::to_string_pretty(self)?)?;
        Ok(path)
    }
}

/// Parse the date part of a published-date string.
///
/// Accepts RFC 3339, RFC 2822, `YYYY-MM-DDTHH:MM:SS`, and a plain
/// `YYYY-MM-DD` prefix.
#[must_use]
pub fn parse_published_date(raw: &str) -> Option<NaiveDate> {
    let raw = raw.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.with_timezone(&Local).date_naive());
    }
    if let Ok(dt) = DateTime::parse_from_rfc2822(raw) {
        return Some(dt.with_timezone(&Local).date_naive());
    }
    if let Ok(dt) = NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S") {
        return Some(dt.date());
    }
    let head = raw.split([' ', 'T']).next().unwrap_or(raw);
    NaiveDate::parse_from_str(head, DATE_FORMAT).ok()
}

/// Collects leader statements from a [`SearchClient`].
pub struct LeaderCollector<'a, C: SearchClient> {
    client: &'a C,
    leaders: &'a [String],
    settings: &'a LeaderSettings,
}

impl<'a, C: SearchClient> LeaderCollector<'a, C> {
    #[must_use]
    pub fn new(client: &'a C, leaders: &'a [String], settings: &'a LeaderSettings) -> Self {
        Self {
            client,
            leaders,
            settings,
        }
    }

    /// Collect statements published in the last `span_days` days.
    #[must_use]
    pub fn run(&self) -> LeaderRun {
        self.run_at(Local::now().naive_local())
    }

    /// [`run`](Self::run) with an explicit clock reading.
    ///
    /// Results with no published date are kept; results whose date falls
    /// outside the window, or cannot be parsed, are dropped. Duplicates are
    /// detected on `url|title`.
    #[must_use]
    pub fn run_at(&self, now: NaiveDateTime) -> LeaderRun {
        let span = self.settings.span_days;
        let end = now.date();
        let start = Duration::try_days(i64::from(span))
            .and_then(|d| now.checked_sub_signed(d))
            .unwrap_or(NaiveDateTime::MIN)
            .date();
        let time_range = format!("{} to {}", start.format(DATE_FORMAT), end.format(DATE_FORMAT));
        let collected_at = now.format(TIMESTAMP_FORMAT).to_string();

        let mut logs = Vec::new();
        let mut results = Vec::new();
        let mut seen = HashSet::new();

        info!(leaders = self.leaders.len(), %time_range, "collecting leader statements");

        for query in self.leaders {
            let request = SearchRequest::new(query.as_str())
                .recency_days(span)
                .max_results(self.settings.max_results)
                .topic("news");
            let hits = self.client.search(&request);
            if hits.is_empty() {
                logs.push(format!("no results for query={query}"));
            }

            for hit in hits {
                let Some(url) = hit.url.filter(|u| !u.trim().is_empty()) else {
                    continue;
                };
                let title = hit.title.unwrap_or_default().trim().to_string();
                let published = hit.published_date.unwrap_or_default();

                if !published.trim().is_empty() {
                    match parse_published_date(&published) {
                        Some(date) if date >= start && date <= end => {}
                        _ => {
                            debug!(%url, %published, "outside window or unparseable, skipping");
                            continue;
                        }
                    }
                }

                if !seen.insert(format!("{url}|{title}")) {
                    continue;
                }

                results.push(LeaderStatement {
                    leader_query: query.clone(),
                    url,
                    title,
                    content_excerpt: hit
                        .content
                        .unwrap_or_default()
                        .chars()
                        .take(EXCERPT_CHARS)
                        .collect(),
                    published_at: published,
                    collected_at: collected_at.clone(),
                });
            }

            if results.len() >= self.settings.min_items {
                break;
            }
        }

        info!(collected = results.len(), "leader collection finished");

        LeaderRun {
            status: LeaderRunStatus {
                min_required: self.settings.min_items,
                collected: results.len(),
                span_days: span,
                time_range,
                run_at: collected_at,
                logs,
            },
            results,
        }
    }
}

/// A dated statement on a leader card.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StatementCard {
    pub date: String,
    pub url: String,
    pub content: String,
    pub key_insights: Vec<String>,
}

/// All statements attributed to one leader.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LeaderProfile {
    pub name: String,
    pub company: String,
    pub statements: Vec<StatementCard>,
}

/// Group statements by leader, in first-seen order.
///
/// The leader's name and company are the first two words of the query that
/// found the statement (`"王传福 比亚迪 讲话"` → `王传福`, `比亚迪`).
#[must_use]
pub fn group_by_leader(statements: &[LeaderStatement], today: NaiveDate) -> Vec<LeaderProfile> {
    let mut profiles: Vec<LeaderProfile> = Vec::new();

    for statement in statements {
        let mut words = statement.leader_query.split_whitespace();
        let name = words.next().unwrap_or_default().to_string();
        let company = words.next().unwrap_or_default().to_string();

        let date = if statement.published_at.is_empty() {
            today.format(DATE_FORMAT).to_string()
        } else {
            statement.published_at.chars().take(10).collect()
        };
        let preview: String = statement.content_excerpt.chars().take(PREVIEW_CHARS).collect();
        let card = StatementCard {
            date,
            url: statement.url.clone(),
            content: format!("{} - {preview}...", statement.title),
            key_insights: vec![statement.title.clone()],
        };

        match profiles.iter_mut().find(|p| p.name == name) {
            Some(profile) => profile.statements.push(card),
            None => profiles.push(LeaderProfile {
                name,
                company,
                statements: vec![card],
            }),
        }
    }

    profiles
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_common_date_shapes() {
        let d = NaiveDate::from_ymd_opt(2025, 11, 24);
        assert_eq!(parse_published_date("2025-11-24"), d);
        assert_eq!(parse_published_date("2025-11-24 08:30:00"), d);
        assert_eq!(parse_published_date("2025-11-24T08:30:00"), d);
        assert_eq!(parse_published_date("yesterday"), None);
    }

    #[test]
    fn grouping_uses_query_words_and_keeps_order() {
        let make = |query: &str, title: &str, published: &str| LeaderStatement {
            leader_query: query.to_string(),
            url: format!("https://news.example/{title}"),
            title: title.to_string(),
            content_excerpt: "x".repeat(150),
            published_at: published.to_string(),
            collected_at: String::new(),
        };
        let statements = vec![
            make("雷军 小米 发言", "a", "2025-11-25T10:00:00Z"),
            make("李斌 蔚来 采访", "b", ""),
            make("雷军 小米 发言", "c", "2025-11-26"),
        ];
        let today = NaiveDate::from_ymd_opt(2025, 11, 28).unwrap_or_default();

        let profiles = group_by_leader(&statements, today);
        assert_eq!(profiles.len(), 2);
        assert_eq!(profiles[0].name, "雷军");
        assert_eq!(profiles[0].company, "小米");
        assert_eq!(profiles[0].statements.len(), 2);
        assert_eq!(profiles[0].statements[0].date, "2025-11-25");
        assert_eq!(profiles[1].statements[0].date, "2025-11-28");
        assert_eq!(profiles[1].statements[0].content, format!("b - {}...", "x".repeat(100)));
    }
}
