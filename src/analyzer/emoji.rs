//! Emoji selection by ordered keyword rules.

/// Icon used when no rule matches.
pub const DEFAULT_EMOJI: &str = "📰";

/// `(needle, emoji)` rules, checked in order against lowercased text.
///
/// The first matching needle wins; there is no ranking beyond table order.
pub const EMOJI_RULES: &[(&str, &str)] = &[
    ("market", "📊"),
    ("growth", "📈"),
    ("forecast", "🔮"),
    ("report", "📑"),
    ("glass", "🪟"),
    ("smart", "🧠"),
    ("tech", "💻"),
    ("ai", "🤖"),
    ("car", "🚗"),
    ("auto", "🚙"),
    ("invest", "💰"),
    ("patent", "📜"),
    ("launch", "🚀"),
    ("new", "🆕"),
    ("trend", "📉"),
    ("gentex", "🏢"),
    ("view", "🏢"),
    ("boe", "🖥️"),
    ("wicue", "🕶️"),
    ("市场", "📊"),
    ("增长", "📈"),
    ("预测", "🔮"),
    ("报告", "📑"),
    ("玻璃", "🪟"),
    ("智能", "🧠"),
    ("技术", "💻"),
    ("汽车", "🚗"),
    ("投资", "💰"),
    ("专利", "📜"),
    ("发布", "🚀"),
    ("趋势", "📉"),
    ("招聘", "👥"),
    ("job", "👥"),
    ("京东方", "🖥️"),
    ("唯酷", "🕶️"),
];

/// Pick the emoji of the first rule whose needle occurs in `title + content`.
///
/// # Examples
///
/// ```
/// use nev_digest::analyzer::emoji::{select_emoji, DEFAULT_EMOJI};
///
/// assert_eq!(select_emoji("Electrochromic Glass ships", ""), "🪟");
/// assert_eq!(select_emoji("Xyzzy Corp Update", "nothing matches"), DEFAULT_EMOJI);
/// ```
#[must_use]
pub fn select_emoji(title: &str, content: &str) -> &'static str {
    select_from(EMOJI_RULES, &format!("{title} {content}").to_lowercase())
}

/// First-match lookup over an arbitrary rule table.
#[must_use]
pub fn select_from(rules: &[(&'static str, &'static str)], haystack: &str) -> &'static str {
    rules
        .iter()
        .find(|(needle, _)| haystack.contains(needle))
        .map_or(DEFAULT_EMOJI, |&(_, emoji)| emoji)
}
