//! Compiled regex patterns for cleaning and analysis.
//!
//! All patterns are compiled once at first use using `LazyLock`.
//! Patterns are organized by the pipeline stage that uses them.

#![allow(clippy::expect_used)]

use std::sync::LazyLock;

use regex::Regex;

// =============================================================================
// Content Cleaning Patterns
// =============================================================================

/// Boilerplate phrases stripped from search result content, applied in order.
///
/// Words inside a phrase may be separated by any whitespace run.
///
/// The trailing `.*` variants swallow the rest of the text after a marker
/// (download prompts and infographic footers run to the end of the snippet).
pub static NOISE_PATTERNS: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    [
        r"(?i)Download.*PDF",
        r"(?i)Read\s+more",
        r"(?i)Click\s+here",
        r"(?i)Subscribe",
        r"(?i)Sign\s+up",
        r"(?i)Login",
        r"(?i)Register",
        r"(?i)\*\s+分割.*",
        r"(?i)下载免费样品.*",
        r"(?i)An\s+Infographic\s+Representation.*",
    ]
    .iter()
    .map(|p| Regex::new(p).expect("NOISE_PATTERNS regex"))
    .collect()
});

/// Matches runs of whitespace for normalization.
pub static WHITESPACE_NORMALIZE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s+").expect("WHITESPACE_NORMALIZE regex"));

// =============================================================================
// Analysis Patterns
// =============================================================================

/// Sentence boundaries.
///
/// Group 1 captures terminal punctuation so the punctuation stays with its
/// sentence. CJK terminators split unconditionally (CJK prose has no space
/// after them); Western terminators need trailing whitespace so decimals
/// like `3.5` survive.
pub static SENTENCE_BOUNDARY: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"([。！？])\s*|([.!?])\s+|\n+").expect("SENTENCE_BOUNDARY regex")
});

/// Capitalized English words in a title.
pub static CAPITALIZED_WORD: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\b[A-Z][a-z]+\b").expect("CAPITALIZED_WORD regex"));

/// Characters that are not part of a word.
pub static NON_WORD: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[^\w]").expect("NON_WORD regex"));
