//! Mojibake repair for search result text.
//!
//! Search snippets are sometimes UTF-8 bytes that were decoded as Latin-1 or
//! Windows-1252 somewhere upstream ("Ã©" instead of "é", "ä¸­" instead of
//! "中"). This module reverses that round-trip when it can, and leaves the
//! text untouched when it can't.

use std::borrow::Cow;

use encoding_rs::WINDOWS_1252;

/// Characters whose presence suggests a UTF-8 → Latin-1 mis-decode.
const MOJIBAKE_MARKERS: [char; 4] = ['é', 'å', 'ä', 'Ã'];

/// Whether the text contains characters typical of mis-decoded UTF-8.
#[must_use]
pub fn looks_like_mojibake(text: &str) -> bool {
    text.contains(MOJIBAKE_MARKERS)
}

/// Attempt to undo a UTF-8 → single-byte mis-decode.
///
/// Each char is mapped back to the byte it was decoded from (Latin-1 first,
/// Windows-1252 when the text uses its 0x80-0x9F punctuation), and the bytes
/// are decoded as strict UTF-8. Any failure along the way returns the input
/// unchanged.
///
/// # Examples
///
/// ```
/// use nev_digest::encoding::repair_mojibake;
///
/// assert_eq!(repair_mojibake("CafÃ©"), "Café");
/// assert_eq!(repair_mojibake("Café"), "Café");
/// ```
#[must_use]
pub fn repair_mojibake(text: &str) -> Cow<'_, str> {
    if !looks_like_mojibake(text) {
        return Cow::Borrowed(text);
    }

    let Some(bytes) = encode_latin1(text).or_else(|| encode_windows_1252(text)) else {
        return Cow::Borrowed(text);
    };

    match String::from_utf8(bytes) {
        Ok(fixed) => Cow::Owned(fixed),
        Err(_) => Cow::Borrowed(text),
    }
}

/// Encode as ISO-8859-1, failing on any char above U+00FF.
fn encode_latin1(text: &str) -> Option<Vec<u8>> {
    text.chars().map(|c| u8::try_from(u32::from(c)).ok()).collect()
}

/// Encode as Windows-1252, failing on any unmappable char.
fn encode_windows_1252(text: &str) -> Option<Vec<u8>> {
    let (bytes, _encoding_used, had_errors) = WINDOWS_1252.encode(text);
    if had_errors {
        None
    } else {
        Some(bytes.into_owned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn repairs_latin1_mojibake() {
        assert_eq!(repair_mojibake("CafÃ© rÃ©sumÃ©"), "Café résumé");
    }

    #[test]
    fn repairs_cjk_mojibake() {
        // "中国" as UTF-8 bytes read back as Latin-1
        let garbled: String = "中国".bytes().map(char::from).collect();
        assert!(looks_like_mojibake(&garbled));
        assert_eq!(repair_mojibake(&garbled), "中国");
    }

    #[test]
    fn repairs_windows1252_punctuation() {
        // U+2019 as UTF-8 (E2 80 99) read back as Windows-1252 is "â€™"
        assert_eq!(repair_mojibake("Itâ€™s Ã©lectrique"), "It\u{2019}s électrique");
    }

    #[test]
    fn keeps_legitimate_accents() {
        assert_eq!(repair_mojibake("Café"), "Café");
        assert!(matches!(repair_mojibake("Café"), Cow::Borrowed(_)));
    }

    #[test]
    fn keeps_mixed_script_text() {
        let text = "é 电致变色";
        assert_eq!(repair_mojibake(text), text);
    }

    #[test]
    fn skips_text_without_markers() {
        assert!(!looks_like_mojibake("plain ascii"));
        assert!(matches!(repair_mojibake("plain ascii"), Cow::Borrowed(_)));
    }
}
