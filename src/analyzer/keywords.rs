//! Keyword tagging.
//!
//! Three stages, each topping up the list until [`MAX_KEYWORDS`] is reached:
//! domain terms found anywhere in the text, capitalized English words from
//! the title, then any reasonably long title token.

use crate::patterns::{CAPITALIZED_WORD, NON_WORD};

/// Upper bound on keywords per item.
pub const MAX_KEYWORDS: usize = 5;

/// Domain terms, in priority order.
pub const TARGET_KEYWORDS: &[&str] = &[
    "市场规模",
    "增长",
    "智能眼镜",
    "电致变色",
    "Google",
    "AI",
    "投融资",
    "招聘",
    "专利",
    "趋势",
    "预测",
    "EC",
    "PDLC",
    "SPD",
    "LC",
    "Smart Glass",
    "Market Size",
    "Growth",
    "Smart Glasses",
    "Electrochromic",
    "Patent",
    "Investment",
    "Trend",
    "Forecast",
    "Recruitment",
    "Revenue",
    "Sales",
    "Partnership",
    "Collaboration",
    "Award",
    "Innovation",
];

struct KeywordSet(Vec<String>);

impl KeywordSet {
    fn is_full(&self) -> bool {
        self.0.len() >= MAX_KEYWORDS
    }

    /// Push unless present or full. Returns whether the set is now full.
    fn offer(&mut self, keyword: &str) -> bool {
        if !self.is_full() && !self.0.iter().any(|k| k == keyword) {
            self.0.push(keyword.to_string());
        }
        self.is_full()
    }
}

/// Extract up to five distinct keywords for an item.
///
/// # Examples
///
/// ```
/// use nev_digest::analyzer::keywords::extract_keywords;
///
/// let keywords = extract_keywords("PDLC film demand", "Gentex Expands Dimming Lineup");
/// assert_eq!(keywords[0], "PDLC");
/// assert!(keywords.contains(&"Gentex".to_string()));
/// ```
#[must_use]
pub fn extract_keywords(content: &str, title: &str) -> Vec<String> {
    let full_text = format!("{title} {content}").to_lowercase();
    let mut found = KeywordSet(Vec::with_capacity(MAX_KEYWORDS));

    for keyword in TARGET_KEYWORDS {
        if full_text.contains(&keyword.to_lowercase()) && found.offer(keyword) {
            return found.0;
        }
    }

    for word in CAPITALIZED_WORD.find_iter(title).map(|m| m.as_str()) {
        if word.chars().count() > 3 && found.offer(word) {
            return found.0;
        }
    }

    for token in title.split_whitespace() {
        let token = NON_WORD.replace_all(token, "");
        if token.chars().count() > 2 && found.offer(&token) {
            return found.0;
        }
    }

    found.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn target_keywords_come_first_in_list_order() {
        let keywords = extract_keywords("Electrochromic glass sales and AI growth", "");
        // "EC" matches inside "electrochromic"
        assert_eq!(keywords, vec!["AI", "EC", "Growth", "Electrochromic", "Sales"]);
    }

    #[test]
    fn capitalized_title_words_fill_up() {
        let keywords = extract_keywords("", "Xyzzy Corp Update");
        assert_eq!(keywords, vec!["Xyzzy", "Corp", "Update"]);
    }

    #[test]
    fn title_tokens_are_last_resort() {
        let keywords = extract_keywords("", "调光膜 出货量, up 12%");
        assert_eq!(keywords, vec!["调光膜", "出货量"]);
    }

    #[test]
    fn short_capitalized_words_are_skipped() {
        let keywords = extract_keywords("", "Big Win for Mirrors");
        assert_eq!(keywords, vec!["Mirrors", "Big", "Win", "for"]);
    }

    #[test]
    fn never_more_than_five_and_no_duplicates() {
        let title = "Alpha Beta Gamma Delta Epsilon Zeta Alpha Beta";
        let keywords = extract_keywords("PDLC PDLC", title);
        assert_eq!(keywords.len(), MAX_KEYWORDS);
        let mut unique = keywords.clone();
        unique.sort();
        unique.dedup();
        assert_eq!(unique.len(), keywords.len());
    }

    #[test]
    fn empty_input_yields_nothing() {
        assert!(extract_keywords("", "").is_empty());
    }
}
