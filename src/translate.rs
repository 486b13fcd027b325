//! Machine translation hook for summarization.
//!
//! The summarizer can translate predominantly non-Chinese text before
//! splitting it into sentences. Translation is optional and uncached; a
//! failure leaves the text untranslated.

use std::time::Duration;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::{Error, Result};

/// Below this share of CJK characters, text counts as foreign.
pub const FOREIGN_CJK_THRESHOLD: f64 = 0.10;

/// Anything that can translate text into the digest language.
pub trait Translator {
    fn translate(&self, text: &str) -> Result<String>;
}

/// Whether `c` is a CJK ideograph or CJK punctuation.
#[must_use]
pub fn is_cjk(c: char) -> bool {
    matches!(
        c,
        '\u{4E00}'..='\u{9FFF}'
            | '\u{3400}'..='\u{4DBF}'
            | '\u{F900}'..='\u{FAFF}'
            | '\u{3000}'..='\u{303F}'
            | '\u{FF00}'..='\u{FFEF}'
    )
}

/// Share of non-whitespace chars that are CJK. Empty text scores `0.0`.
#[must_use]
pub fn cjk_ratio(text: &str) -> f64 {
    let (cjk, total) = text
        .chars()
        .filter(|c| !c.is_whitespace())
        .fold((0usize, 0usize), |(cjk, total), c| {
            (cjk + usize::from(is_cjk(c)), total + 1)
        });
    if total == 0 {
        0.0
    } else {
        cjk as f64 / total as f64
    }
}

/// Whether text should be translated before summarization.
#[must_use]
pub fn needs_translation(text: &str) -> bool {
    !text.trim().is_empty() && cjk_ratio(text) < FOREIGN_CJK_THRESHOLD
}

#[derive(Debug, Serialize)]
struct TranslatePayload<'a> {
    q: &'a str,
    source: &'a str,
    target: &'a str,
    format: &'a str,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct TranslateResponse {
    translated_text: String,
}

/// Client for a LibreTranslate-compatible `/translate` endpoint.
#[derive(Debug, Clone)]
pub struct HttpTranslator {
    endpoint: String,
    target: String,
    http: reqwest::blocking::Client,
}

impl HttpTranslator {
    /// Translate into `target` (e.g. `"zh"`) via `endpoint`.
    pub fn new(endpoint: impl Into<String>, target: impl Into<String>) -> Result<Self> {
        let http = reqwest::blocking::Client::builder()
            .timeout(Duration::from_secs(10))
            .build()
            .map_err(|e| Error::Client(e.to_string()))?;
        Ok(Self {
            endpoint: endpoint.into(),
            target: target.into(),
            http,
        })
    }
}

impl Translator for HttpTranslator {
    fn translate(&self, text: &str) -> Result<String> {
        debug!(chars = text.chars().count(), "translating");
        let payload = TranslatePayload {
            q: text,
            source: "auto",
            target: &self.target,
            format: "text",
        };
        let response = self
            .http
            .post(&self.endpoint)
            .json(&payload)
            .send()
            .map_err(|e| Error::Translation(e.to_string()))?;
        if !response.status().is_success() {
            return Err(Error::Translation(format!("status {}", response.status())));
        }
        response
            .json::<TranslateResponse>()
            .map(|body| body.translated_text)
            .map_err(|e| Error::Translation(e.to_string()))
    }
}
