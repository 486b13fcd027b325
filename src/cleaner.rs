//! Content cleaning for raw search result text.

use crate::encoding::repair_mojibake;
use crate::patterns::{NOISE_PATTERNS, WHITESPACE_NORMALIZE};

/// Normalize raw search result text.
///
/// Repairs mojibake, strips boilerplate phrases (calls-to-action, download and
/// subscription prompts) and collapses whitespace. The result is never
/// truncated; summarization needs the full text.
///
/// # Examples
///
/// ```
/// use nev_digest::cleaner::clean_content;
///
/// let cleaned = clean_content("  PDLC film  demand rises. Read more  ");
/// assert_eq!(cleaned, "PDLC film demand rises.");
/// ```
#[must_use]
pub fn clean_content(raw: &str) -> String {
    if raw.is_empty() {
        return String::new();
    }

    // Folding first keeps `.*` markers from stopping at a line break.
    let mut text = WHITESPACE_NORMALIZE
        .replace_all(&repair_mojibake(raw), " ")
        .into_owned();

    // Removing one phrase can join the halves of another ("ReadRead more more"),
    // so loop until a full pass changes nothing.
    loop {
        let mut changed = false;
        for re in NOISE_PATTERNS.iter() {
            if re.is_match(&text) {
                text = re.replace_all(&text, "").into_owned();
                changed = true;
            }
        }
        if !changed {
            break;
        }
    }

    WHITESPACE_NORMALIZE
        .replace_all(&text, " ")
        .trim()
        .to_string()
}
