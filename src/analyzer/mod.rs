//! Content analysis: emoji, keyword tags and a short summary per item.
//!
//! Everything here is recomputed on every report build and never persisted.

/// Emoji selection by ordered keyword rules.
pub mod emoji;

/// Keyword tagging.
pub mod keywords;

/// Sentence-scoring summarizer.
pub mod summary;

use serde::Serialize;

use crate::translate::Translator;
use summary::SummaryOptions;

/// Derived presentation data for one stored item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AnalyzedItem {
    pub emoji: String,
    pub keywords: Vec<String>,
    /// Plain text for short input, otherwise an HTML `<ul>`.
    pub summary: String,
}

/// Analyzer with a fixed summarization strategy.
///
/// # Example
///
/// ```rust
/// use nev_digest::analyzer::Analyzer;
///
/// let analyzer = Analyzer::new();
/// let item = analyzer.analyze("nothing matches", "Xyzzy Corp Update");
/// assert_eq!(item.emoji, "📰");
/// assert_eq!(item.keywords, vec!["Xyzzy", "Corp", "Update"]);
/// ```
#[derive(Default)]
pub struct Analyzer {
    options: SummaryOptions,
    translator: Option<Box<dyn Translator>>,
}

impl std::fmt::Debug for Analyzer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Analyzer")
            .field("options", &self.options)
            .field("translator", &self.translator.is_some())
            .finish()
    }
}

impl Analyzer {
    /// Analyzer with the default (untranslated, 3 to 5 point) strategy.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_options(options: SummaryOptions) -> Self {
        Self {
            options,
            translator: None,
        }
    }

    /// Attach a translator, used when the options ask for translation.
    #[must_use]
    pub fn with_translator(mut self, translator: Box<dyn Translator>) -> Self {
        self.translator = Some(translator);
        self
    }

    #[must_use]
    pub fn options(&self) -> &SummaryOptions {
        &self.options
    }

    /// Analyze one item's content and title.
    #[must_use]
    pub fn analyze(&self, content: &str, title: &str) -> AnalyzedItem {
        AnalyzedItem {
            emoji: emoji::select_emoji(title, content).to_string(),
            keywords: keywords::extract_keywords(content, title),
            summary: summary::summarize(content, &self.options, self.translator.as_deref()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Result;

    struct Tagging;

    impl Translator for Tagging {
        fn translate(&self, text: &str) -> Result<String> {
            Ok(format!("译文 {text}"))
        }
    }

    #[test]
    fn summary_only_reads_content() {
        let item = Analyzer::new().analyze("hello", "A much longer title that is ignored");
        assert_eq!(item.summary, "hello");
    }

    #[test]
    fn emoji_reads_title_and_content() {
        let item = Analyzer::new().analyze("专利申请", "Xyzzy");
        assert_eq!(item.emoji, "📜");
    }

    #[test]
    fn translator_is_used_only_with_translate_option() {
        let content = "The smart glass market keeps expanding. ".repeat(6);

        let plain = Analyzer::new().with_translator(Box::new(Tagging));
        assert!(!plain.analyze(&content, "t").summary.contains("译文"));

        let translating =
            Analyzer::with_options(SummaryOptions::translated()).with_translator(Box::new(Tagging));
        assert!(translating.analyze(&content, "t").summary.contains("译文"));
    }
}
