//! Extractive sentence summarization.
//!
//! Sentences are scored by position, domain keywords and length, and the
//! best few are rendered, in source order, as an HTML bullet list.

use tracing::warn;

use crate::patterns::SENTENCE_BOUNDARY;
use crate::translate::{needs_translation, Translator};

/// Bilingual terms that mark a sentence as informative. Lowercase.
pub const SUMMARY_KEYWORDS: &[&str] = &[
    "market", "growth", "revenue", "launch", "new", "sales", "profit", "市场", "增长", "营收",
    "发布", "推出", "销量", "利润", "同比", "环比",
];

const TERMINAL_PUNCTUATION: [char; 6] = ['。', '！', '？', '.', '!', '?'];

/// Summarization strategy.
///
/// The default is the untranslated variant that keeps three to five points;
/// [`SummaryOptions::translated`] is the variant that translates foreign text
/// first and always keeps exactly three.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SummaryOptions {
    /// Translate predominantly non-Chinese text before splitting.
    ///
    /// Has no effect unless the analyzer was given a translator.
    ///
    /// Default: `false`
    pub translate: bool,

    /// Fewest points kept once scoring kicks in. Default: 3
    pub min_points: usize,

    /// Most points kept. Default: 5
    pub max_points: usize,

    /// Text shorter than this (in chars) is returned unchanged. Default: 100
    pub short_text_chars: usize,

    /// With three or fewer sentences, text shorter than this is returned
    /// unchanged instead of as a list. Default: 200
    pub short_paragraph_chars: usize,

    /// Sentences this short or shorter are dropped. Default: 10
    pub min_sentence_chars: usize,

    /// Append `。` to kept sentences lacking terminal punctuation.
    ///
    /// Default: `false`
    pub ensure_terminal_punctuation: bool,
}

impl Default for SummaryOptions {
    fn default() -> Self {
        Self {
            translate: false,
            min_points: 3,
            max_points: 5,
            short_text_chars: 100,
            short_paragraph_chars: 200,
            min_sentence_chars: 10,
            ensure_terminal_punctuation: false,
        }
    }
}

impl SummaryOptions {
    /// Translate-first variant: exactly three points, punctuated.
    #[must_use]
    pub fn translated() -> Self {
        Self {
            translate: true,
            min_points: 3,
            max_points: 3,
            ensure_terminal_punctuation: true,
            ..Self::default()
        }
    }
}

/// Split text into trimmed sentences longer than `min_chars`.
///
/// Terminal punctuation stays attached to its sentence.
#[must_use]
pub fn split_sentences(text: &str, min_chars: usize) -> Vec<&str> {
    let mut pieces = Vec::new();
    let mut start = 0;

    for caps in SENTENCE_BOUNDARY.captures_iter(text) {
        let Some(whole) = caps.get(0) else { continue };
        let end = caps
            .get(1)
            .or_else(|| caps.get(2))
            .map_or(whole.start(), |punct| punct.end());
        pieces.push(&text[start..end]);
        start = whole.end();
    }
    pieces.push(&text[start..]);

    pieces
        .into_iter()
        .map(str::trim)
        .filter(|s| s.chars().count() > min_chars)
        .collect()
}

/// Heuristic informativeness score of the sentence at `index` of `total`.
#[must_use]
pub fn score_sentence(sentence: &str, index: usize, total: usize) -> u32 {
    let mut score = 0;
    if index == 0 {
        score += 5;
    }
    if index + 1 == total {
        score += 2;
    }

    let lowered = sentence.to_lowercase();
    let hits = SUMMARY_KEYWORDS.iter().filter(|k| lowered.contains(*k)).count();
    score += 2 * u32::try_from(hits).unwrap_or(u32::MAX / 2);

    if (20..=100).contains(&sentence.chars().count()) {
        score += 1;
    }
    score
}

/// Summarize `text` according to `options`.
///
/// Short input comes back unchanged; longer input becomes a `<ul>` of the
/// highest-scoring sentences in their original order.
///
/// # Examples
///
/// ```
/// use nev_digest::analyzer::summary::{summarize, SummaryOptions};
///
/// assert_eq!(summarize("hello", &SummaryOptions::default(), None), "hello");
/// assert_eq!(summarize("", &SummaryOptions::default(), None), "");
/// ```
#[must_use]
pub fn summarize(text: &str, options: &SummaryOptions, translator: Option<&dyn Translator>) -> String {
    let text = text.trim();
    if text.is_empty() {
        return String::new();
    }
    if text.chars().count() < options.short_text_chars {
        return text.to_string();
    }

    let translated;
    let text = match translator.filter(|_| options.translate && needs_translation(text)) {
        Some(translator) => match translator.translate(text) {
            Ok(t) => {
                translated = t;
                translated.trim()
            }
            Err(e) => {
                warn!(error = %e, "translation failed, summarizing original text");
                text
            }
        },
        None => text,
    };

    let sentences = split_sentences(text, options.min_sentence_chars);
    if sentences.is_empty() {
        return text.to_string();
    }

    if sentences.len() <= 3 {
        if text.chars().count() < options.short_paragraph_chars {
            return text.to_string();
        }
        return render_list(&sentences, options.ensure_terminal_punctuation);
    }

    let total = sentences.len();
    let mut scored: Vec<(u32, usize)> = sentences
        .iter()
        .enumerate()
        .map(|(i, s)| (score_sentence(s, i, total), i))
        .collect();
    // Stable: equal scores keep source order.
    scored.sort_by(|a, b| b.0.cmp(&a.0));

    let keep = (total / 2).clamp(options.min_points, options.max_points.max(options.min_points));
    scored.truncate(keep);
    scored.sort_by_key(|&(_, i)| i);

    let picked: Vec<&str> = scored.iter().map(|&(_, i)| sentences[i]).collect();
    render_list(&picked, options.ensure_terminal_punctuation)
}

fn render_list(sentences: &[&str], punctuate: bool) -> String {
    let mut html = String::from("<ul class=\"summary-points\">");
    for sentence in sentences {
        html.push_str("<li>");
        html.push_str(&escape_html(sentence));
        if punctuate && !sentence.ends_with(TERMINAL_PUNCTUATION) {
            html.push('。');
        }
        html.push_str("</li>");
    }
    html.push_str("</ul>");
    html
}

fn escape_html(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for ch in input.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(ch),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Error, Result};

    struct Upper;

    impl Translator for Upper {
        fn translate(&self, text: &str) -> Result<String> {
            Ok(text.to_uppercase())
        }
    }

    struct Broken;

    impl Translator for Broken {
        fn translate(&self, _text: &str) -> Result<String> {
            Err(Error::Translation("offline".to_string()))
        }
    }

    const FIVE_SENTENCES: &str = "Intro sentence about the glass industry today. \
        This sentence contains 增长 in the middle part. \
        This sentence contains nothing in the middle ok. \
        Another filler sentence without any signal here. \
        Closing sentence wraps the whole thing up now.";

    #[test]
    fn short_text_is_returned_unchanged() {
        assert_eq!(summarize("hello", &SummaryOptions::default(), None), "hello");
        assert_eq!(summarize("  hello  ", &SummaryOptions::default(), None), "hello");
    }

    #[test]
    fn split_keeps_punctuation_and_drops_fragments() {
        let sentences = split_sentences("Short. A longer sentence here! 调光玻璃销量同比增长百分之二十。下一句话也足够长吗？\nok", 10);
        assert_eq!(
            sentences,
            vec!["A longer sentence here!", "调光玻璃销量同比增长百分之二十。"]
        );
    }

    #[test]
    fn keyword_sentence_outranks_plain_sentence() {
        let with = "This sentence contains 增长 in the middle part.";
        let without = "This sentence contains nothing in the middle ok.";
        assert!(score_sentence(with, 2, 5) > score_sentence(without, 2, 5));
    }

    #[test]
    fn position_bonuses_apply() {
        let s = "plain words only, nothing more to say";
        assert_eq!(score_sentence(s, 0, 4), 6);
        assert_eq!(score_sentence(s, 3, 4), 3);
        assert_eq!(score_sentence(s, 1, 4), 1);
    }

    #[test]
    fn summary_keeps_best_sentences_in_order() {
        let summary = summarize(FIVE_SENTENCES, &SummaryOptions::default(), None);
        assert!(summary.starts_with("<ul"));
        assert_eq!(summary.matches("<li>").count(), 3);
        let intro = summary.find("Intro sentence").unwrap_or(usize::MAX);
        let growth = summary.find("增长").unwrap_or(usize::MAX);
        let closing = summary.find("Closing sentence").unwrap_or(usize::MAX);
        assert!(intro < growth && growth < closing);
        assert!(!summary.contains("contains nothing"));
    }

    #[test]
    fn point_count_scales_with_sentence_count() {
        let text = (0..12)
            .map(|i| format!("Sentence number {i} says something mildly useful."))
            .collect::<Vec<_>>()
            .join(" ");
        let summary = summarize(&text, &SummaryOptions::default(), None);
        assert_eq!(summary.matches("<li>").count(), 5);
    }

    #[test]
    fn few_long_sentences_become_a_full_list() {
        let sentence = format!("{} end.", "word ".repeat(25));
        let text = format!("{sentence} {sentence}");
        let summary = summarize(&text, &SummaryOptions::default(), None);
        assert_eq!(summary.matches("<li>").count(), 2);
    }

    #[test]
    fn few_sentences_in_short_paragraph_are_returned_as_is() {
        let text = "The first sentence is here and long. The second one follows it closely. \
            Third one ends it. Okay. xxxxxxxxxx";
        assert!((100..200).contains(&text.chars().count()));
        assert_eq!(summarize(text, &SummaryOptions::default(), None), text);
    }

    #[test]
    fn sentence_text_is_escaped() {
        let text = format!("{FIVE_SENTENCES} Tail <b>bold</b> & more text here.");
        let summary = summarize(&text, &SummaryOptions::default(), None);
        assert!(!summary.contains("<b>"));
    }

    #[test]
    fn translated_variant_uses_translator_and_keeps_three() {
        let summary = summarize(FIVE_SENTENCES, &SummaryOptions::translated(), Some(&Upper));
        assert!(summary.contains("INTRO SENTENCE"));
        assert_eq!(summary.matches("<li>").count(), 3);
    }

    #[test]
    fn translation_is_skipped_without_flag() {
        let summary = summarize(FIVE_SENTENCES, &SummaryOptions::default(), Some(&Upper));
        assert!(summary.contains("Intro sentence"));
    }

    #[test]
    fn translation_failure_falls_back_to_original() {
        let summary = summarize(FIVE_SENTENCES, &SummaryOptions::translated(), Some(&Broken));
        assert!(summary.contains("Intro sentence"));
    }

    #[test]
    fn terminal_punctuation_is_appended_when_requested() {
        let text = "第一句话讲述调光玻璃市场规模\n第二句话讲述电致变色技术进展\n第三句话讲述竞争对手新品发布\n第四句话讲述行业投融资动态情况\n第五句话讲述专利申请数量变化趋势\n第六句话讲述全年销量同比大幅增长\n第七句话讲述车载智能调光天窗订单\n第八句话讲述海外市场渠道拓展计划";
        let summary = summarize(text, &SummaryOptions::translated(), None);
        assert_eq!(summary.matches("。</li>").count(), 3);
    }
}
