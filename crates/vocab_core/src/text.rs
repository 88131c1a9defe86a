//! crates/vocab_core/src/text.rs
//!
//! Small text helpers shared by the enrichment step and the pages:
//! Arabic normalisation, translation cleanup, word highlighting and
//! number formatting.

use regex::Regex;
use std::sync::OnceLock;

fn diacritics_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    // Harakat, tanwin, shadda, sukun and the superscript alef.
    RE.get_or_init(|| Regex::new(r"[\u{064B}-\u{065F}\u{0670}]").unwrap())
}

fn html_tag_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"<[^>]*>").unwrap())
}

fn footnote_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"[0-9]+").unwrap())
}

fn bracket_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"[()\[\]]").unwrap())
}

/// Removes Arabic vowel marks so that a search can match an unvocalised verse.
pub fn strip_diacritics(arabic: &str) -> String {
    diacritics_re().replace_all(arabic, "").into_owned()
}

/// Cleans a verse translation: drops HTML markup and footnote numbers.
pub fn clean_translation(raw: &str) -> String {
    let without_tags = html_tag_re().replace_all(raw, "");
    footnote_re().replace_all(&without_tags, "").trim().to_string()
}

/// Builds a readable sentence from word-by-word glosses.
pub fn join_word_translations<'a, I>(glosses: I) -> String
where
    I: IntoIterator<Item = &'a str>,
{
    let joined = glosses
        .into_iter()
        .filter(|g| !g.is_empty())
        .collect::<Vec<_>>()
        .join(" ");
    bracket_re().replace_all(&joined, "").into_owned()
}

/// One run of verse text, either plain or an occurrence of the studied word.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Segment<'a> {
    pub text: &'a str,
    pub highlighted: bool,
}

/// Splits `verse` into plain runs and occurrences of `needle`.
///
/// When the word does not occur, the whole verse comes back as a single
/// plain segment.
pub fn highlight<'a>(verse: &'a str, needle: &str) -> Vec<Segment<'a>> {
    if needle.is_empty() {
        return vec![Segment { text: verse, highlighted: false }];
    }

    let mut segments = Vec::new();
    let mut cursor = 0;
    for (start, matched) in verse.match_indices(needle) {
        if start > cursor {
            segments.push(Segment { text: &verse[cursor..start], highlighted: false });
        }
        segments.push(Segment { text: matched, highlighted: true });
        cursor = start + matched.len();
    }
    if cursor < verse.len() || segments.is_empty() {
        segments.push(Segment { text: &verse[cursor..], highlighted: false });
    }
    segments
}

/// Formats an integer with thousands separators (2699 → "2,699").
pub fn format_number(n: u64) -> String {
    let digits = n.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}

/// Percentage of `part` in `total`, rounded to two decimals.
pub fn percentage(part: f64, total: f64) -> f64 {
    if total == 0.0 {
        return 0.0;
    }
    ((part / total) * 100.0 * 100.0).round() / 100.0
}

/// Shortens `text` to at most `max_chars` characters, appending `...` when cut.
pub fn truncate(text: &str, max_chars: usize) -> String {
    if text.chars().count() <= max_chars {
        return text.to_string();
    }
    let mut cut: String = text.chars().take(max_chars).collect();
    cut.push_str("...");
    cut
}
