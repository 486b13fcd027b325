use std::cell::RefCell;
use std::collections::HashMap;

use serde::Deserialize;

use nev_digest::collector::plan_queries;
use nev_digest::config::{Competitor, MonitorConfig};
use nev_digest::{Category, Collector, DedupStore, RawSearchResult, SearchClient, SearchRequest};

const RESULTS_FIXTURE: &str = include_str!("fixtures/search_results.json");
const CONFIG_FIXTURE: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/tests/fixtures/smart_glass_config.json");

#[derive(Deserialize)]
struct Fixture {
    results: Vec<RawSearchResult>,
}

/// Records every request and answers from a canned table.
#[derive(Default)]
struct FakeSearch {
    answers: HashMap<String, Vec<RawSearchResult>>,
    calls: RefCell<Vec<SearchRequest>>,
}

impl FakeSearch {
    fn answer(mut self, query: &str, results: Vec<RawSearchResult>) -> Self {
        self.answers.insert(query.to_string(), results);
        self
    }

    fn queries(&self) -> Vec<String> {
        self.calls.borrow().iter().map(|r| r.query.clone()).collect()
    }
}

impl SearchClient for FakeSearch {
    fn search(&self, request: &SearchRequest) -> Vec<RawSearchResult> {
        self.calls.borrow_mut().push(request.clone());
        self.answers.get(&request.query).cloned().unwrap_or_default()
    }
}

fn fixture_results() -> Vec<RawSearchResult> {
    serde_json::from_str::<Fixture>(RESULTS_FIXTURE)
        .expect("fixture parses")
        .results
}

fn industry_config(keyword: &str) -> MonitorConfig {
    let mut config = MonitorConfig {
        industry_keywords: vec![keyword.to_string()],
        ..MonitorConfig::default()
    };
    config.search.year = Some(2025);
    config
}

#[test]
fn empty_config_issues_no_queries() {
    let client = FakeSearch::default();
    let config = MonitorConfig::default();
    let mut store = DedupStore::new();

    let added = Collector::new(&client, &config).run_daily_check(&mut store);

    assert_eq!(added, 0);
    assert!(client.queries().is_empty());
    assert!(store.is_empty());
}

#[test]
fn results_are_cleaned_and_filed() {
    let client = FakeSearch::default().answer("PDLC 行业新闻 2025", fixture_results());
    let config = industry_config("PDLC");
    let mut store = DedupStore::new();

    let added = Collector::new(&client, &config).run_daily_check(&mut store);

    assert_eq!(added, 2, "the URL-less result is not stored");
    assert_eq!(client.queries(), vec!["PDLC 行业新闻 2025", "PDLC market trends 2025"]);

    let first = &store.items()[0];
    assert_eq!(first.category, Category::Industry);
    assert_eq!(first.tags, vec!["PDLC"]);
    assert_eq!(first.published_date, "2025-11-26");
    assert!(!first.content.contains("Read more"));
    assert!(!store.items()[1].content.contains("Click here"));
}

#[test]
fn second_run_adds_nothing() {
    let client = FakeSearch::default().answer("PDLC 行业新闻 2025", fixture_results());
    let config = industry_config("PDLC");
    let mut store = DedupStore::new();
    let collector = Collector::new(&client, &config);

    assert_eq!(collector.run_daily_check(&mut store), 2);
    assert_eq!(collector.run_daily_check(&mut store), 0);
    assert_eq!(store.len(), 2);
}

#[test]
fn same_url_from_two_queries_is_stored_once() {
    let results = fixture_results();
    let client = FakeSearch::default()
        .answer("Gentex 智能调光 新闻", results.clone())
        .answer("Gentex smart glass news", results);
    let config = MonitorConfig {
        competitors: vec![Competitor {
            name: "Gentex".to_string(),
            category: "Automotive".to_string(),
        }],
        ..MonitorConfig::default()
    };
    let mut store = DedupStore::new();

    let added = Collector::new(&client, &config).run_daily_check(&mut store);

    assert_eq!(added, 2);
    assert!(store
        .items()
        .iter()
        .all(|i| i.competitor.as_deref() == Some("Gentex") && i.category == Category::Competitor));
}

#[test]
fn failing_queries_do_not_stop_the_run() {
    // Every query but the last yields nothing, as a transport failure would.
    let client = FakeSearch::default().answer("PDLC market trends 2025", fixture_results());
    let config = industry_config("PDLC");
    let mut store = DedupStore::new();

    let added = Collector::new(&client, &config).run_daily_check(&mut store);

    assert_eq!(added, 2);
    assert_eq!(client.queries().len(), 2);
}

#[test]
fn requests_carry_search_settings() {
    let client = FakeSearch::default();
    let mut config = industry_config("SPD玻璃");
    config.search.recency_days = 3;
    config.search.max_results = 25;
    config.search.include_domains = vec!["https://www.cnevpost.com/".to_string()];

    Collector::new(&client, &config).run_daily_check(&mut DedupStore::new());

    let calls = client.calls.borrow();
    assert_eq!(calls.len(), 2);
    assert!(calls.iter().all(|r| r.recency_days == 3 && r.max_results == 25));
    assert_eq!(calls[0].include_domains, vec!["cnevpost.com"]);
}

#[test]
fn fixture_config_plans_bilingual_queries() {
    let config = MonitorConfig::load(std::path::Path::new(CONFIG_FIXTURE)).expect("config loads");
    let planned = plan_queries(&config, 2025);
    assert_eq!(planned.len(), 2 * (2 + 3));
    assert_eq!(planned[2].query, "京东方 智能调光 新闻");
    assert_eq!(planned[2].tag, "Display");
    assert_eq!(planned.last().map(|p| p.query.as_str()), Some("Electrochromic Glass market trends 2025"));
}
