//! Search service boundary.
//!
//! The collector talks to the external search API only through
//! [`SearchClient`]. [`TavilyClient`] is the production implementation: one
//! blocking JSON POST per query, no retries, and every failure mode
//! collapses to an empty result list after being logged.

use std::time::{Duration, Instant};

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};
use url::Url;

use crate::{Error, Result};

/// Default search endpoint.
pub const DEFAULT_ENDPOINT: &str = "https://api.tavily.com/search";

/// A single result as returned by the search service.
///
/// Every field is optional on the wire; a result without a URL cannot be
/// stored.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RawSearchResult {
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub content: Option<String>,
    #[serde(default)]
    pub published_date: Option<String>,
    #[serde(default)]
    pub score: Option<f64>,
}

/// One query against the search service.
#[derive(Debug, Clone, PartialEq)]
pub struct SearchRequest {
    pub query: String,
    /// Only return results published within this many days.
    pub recency_days: u32,
    /// Result cap.
    pub max_results: u32,
    /// Restrict results to these hosts.
    pub include_domains: Vec<String>,
    /// Service topic hint, e.g. `"news"`.
    pub topic: Option<String>,
}

impl SearchRequest {
    /// A request with the default recency window and result cap.
    #[must_use]
    pub fn new(query: impl Into<String>) -> Self {
        let defaults = SearchOptions::default();
        Self {
            query: query.into(),
            recency_days: defaults.recency_days,
            max_results: defaults.max_results,
            include_domains: Vec::new(),
            topic: None,
        }
    }

    #[must_use]
    pub fn recency_days(mut self, days: u32) -> Self {
        self.recency_days = days;
        self
    }

    #[must_use]
    pub fn max_results(mut self, max: u32) -> Self {
        self.max_results = max;
        self
    }

    /// Restrict to the given domains. Entries may be bare hosts or URLs.
    #[must_use]
    pub fn include_domains<I, S>(mut self, domains: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.include_domains = domains
            .into_iter()
            .filter_map(|d| normalize_domain(d.as_ref()))
            .collect();
        self
    }

    #[must_use]
    pub fn topic(mut self, topic: impl Into<String>) -> Self {
        self.topic = Some(topic.into());
        self
    }
}

/// Reduce a domain filter entry to a lowercase host without `www.`.
///
/// Returns `None` for entries with no usable host.
#[must_use]
pub fn normalize_domain(entry: &str) -> Option<String> {
    let entry = entry.trim();
    if entry.is_empty() {
        return None;
    }
    let host = if entry.contains("://") {
        Url::parse(entry).ok()?.host_str()?.to_string()
    } else {
        Url::parse(&format!("https://{entry}"))
            .ok()?
            .host_str()?
            .to_string()
    };
    let host = host.trim_end_matches('.').to_ascii_lowercase();
    Some(host.strip_prefix("www.").unwrap_or(&host).to_string())
}

/// Anything that can answer a search query.
///
/// Implementations must not fail: transport and service errors are logged
/// and reported as an empty result list.
pub trait SearchClient {
    fn search(&self, request: &SearchRequest) -> Vec<RawSearchResult>;
}

/// Settings for the HTTP search client.
#[derive(Debug, Clone, PartialEq)]
pub struct SearchOptions {
    pub endpoint: String,
    /// Per-request timeout.
    ///
    /// Default: 30 seconds
    pub timeout: Duration,
    /// Default: `"advanced"`
    pub search_depth: String,
    /// Default: 10
    pub max_results: u32,
    /// Default: 30
    pub recency_days: u32,
}

impl Default for SearchOptions {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            timeout: Duration::from_secs(30),
            search_depth: "advanced".to_string(),
            max_results: 10,
            recency_days: 30,
        }
    }
}

#[derive(Debug, Serialize)]
struct SearchPayload<'a> {
    api_key: &'a str,
    query: &'a str,
    search_depth: &'a str,
    include_answer: bool,
    max_results: u32,
    days: u32,
    #[serde(skip_serializing_if = "no_domains")]
    include_domains: &'a [String],
    #[serde(skip_serializing_if = "Option::is_none")]
    topic: Option<&'a str>,
}

fn no_domains(domains: &&[String]) -> bool {
    domains.is_empty()
}

#[derive(Debug, Deserialize)]
struct SearchResponse {
    #[serde(default)]
    results: Vec<RawSearchResult>,
}

/// Blocking client for the Tavily search API.
#[derive(Debug, Clone)]
pub struct TavilyClient {
    api_key: String,
    options: SearchOptions,
    http: reqwest::blocking::Client,
}

impl TavilyClient {
    /// Create a client with default options.
    pub fn new(api_key: impl Into<String>) -> Result<Self> {
        Self::with_options(api_key, SearchOptions::default())
    }

    /// Create a client with custom options.
    pub fn with_options(api_key: impl Into<String>, options: SearchOptions) -> Result<Self> {
        let http = reqwest::blocking::Client::builder()
            .timeout(options.timeout)
            .build()
            .map_err(|e| Error::Client(e.to_string()))?;
        Ok(Self {
            api_key: api_key.into(),
            options,
            http,
        })
    }

    #[must_use]
    pub fn options(&self) -> &SearchOptions {
        &self.options
    }

    fn payload<'a>(&'a self, request: &'a SearchRequest) -> SearchPayload<'a> {
        SearchPayload {
            api_key: &self.api_key,
            query: &request.query,
            search_depth: &self.options.search_depth,
            include_answer: false,
            max_results: request.max_results,
            days: request.recency_days,
            include_domains: &request.include_domains,
            topic: request.topic.as_deref(),
        }
    }

    /// Check that the service is reachable and the key is accepted.
    ///
    /// Sends one basic query capped at a single result.
    #[must_use]
    pub fn probe(&self, query: &str) -> ProbeReport {
        let request = SearchRequest::new(query).max_results(1);
        let payload = SearchPayload {
            search_depth: "basic",
            ..self.payload(&request)
        };

        let started = Instant::now();
        let outcome = match self.http.post(&self.options.endpoint).json(&payload).send() {
            Ok(response) => {
                let status = response.status().as_u16();
                let body = if status == 200 {
                    response.json::<SearchResponse>().ok()
                } else {
                    None
                };
                classify_status(status, body.as_ref())
            }
            Err(e) => ProbeStatus::Unreachable(e.to_string()),
        };

        ProbeReport {
            status: outcome,
            latency: started.elapsed(),
        }
    }
}

impl SearchClient for TavilyClient {
    fn search(&self, request: &SearchRequest) -> Vec<RawSearchResult> {
        debug!(query = %request.query, days = request.recency_days, "searching");

        let response = match self
            .http
            .post(&self.options.endpoint)
            .json(&self.payload(request))
            .send()
        {
            Ok(r) => r,
            Err(e) => {
                warn!(query = %request.query, error = %e, "search request failed");
                return Vec::new();
            }
        };

        let status = response.status();
        if status != reqwest::StatusCode::OK {
            warn!(query = %request.query, status = status.as_u16(), "search returned non-200");
            return Vec::new();
        }

        match response.json::<SearchResponse>() {
            Ok(body) => body.results,
            Err(e) => {
                warn!(query = %request.query, error = %e, "search response was not valid JSON");
                Vec::new()
            }
        }
    }
}

/// Outcome of a [`TavilyClient::probe`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProbeStatus {
    /// 200 OK; `has_results` is false when the query came back empty.
    Operational { has_results: bool, first_title: Option<String> },
    /// 401: the service is up but the key was rejected.
    InvalidKey,
    /// 429: the key is valid but currently over its limit.
    RateLimited,
    /// Any other status code.
    Unexpected(u16),
    /// Connection or timeout failure.
    Unreachable(String),
}

impl ProbeStatus {
    /// Whether the service answered at all.
    #[must_use]
    pub fn service_up(&self) -> bool {
        matches!(
            self,
            Self::Operational { .. } | Self::InvalidKey | Self::RateLimited
        )
    }

    /// Whether the key appears valid.
    #[must_use]
    pub fn key_valid(&self) -> bool {
        matches!(self, Self::Operational { .. } | Self::RateLimited)
    }
}

/// Probe outcome with round-trip latency.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProbeReport {
    pub status: ProbeStatus,
    pub latency: Duration,
}

fn classify_status(status: u16, body: Option<&SearchResponse>) -> ProbeStatus {
    match status {
        200 => {
            let first_title = body
                .and_then(|b| b.results.first())
                .map(|r| r.title.clone().unwrap_or_else(|| "No Title".to_string()));
            ProbeStatus::Operational {
                has_results: first_title.is_some(),
                first_title,
            }
        }
        401 => ProbeStatus::InvalidKey,
        429 => ProbeStatus::RateLimited,
        other => ProbeStatus::Unexpected(other),
    }
}
