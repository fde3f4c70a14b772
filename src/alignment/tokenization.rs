use std::sync::OnceLock;

use regex::Regex;

use crate::types::OriginalToken;

/// A word is a letter followed by letters/combining marks, or a run of digits.
const WORD_PATTERN: &str = r"\p{L}[\p{L}\p{M}]*|\p{N}+";
const NON_WORD_PATTERN: &str = r"[^\p{L}\p{N}]+";

fn word_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(WORD_PATTERN).expect("word pattern is valid"))
}

fn non_word_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(NON_WORD_PATTERN).expect("non-word pattern is valid"))
}

/// Comparison form shared by original and recognized words: lowercase, with
/// everything that is not a letter or digit removed.
pub fn normalize_word(word: &str) -> String {
    non_word_regex()
        .replace_all(&word.to_lowercase(), "")
        .into_owned()
}

pub fn tokenize_original(text: &str) -> Vec<OriginalToken> {
    word_regex()
        .find_iter(text)
        .enumerate()
        .map(|(index, m)| OriginalToken {
            index,
            text: m.as_str().to_string(),
            norm: normalize_word(m.as_str()),
            char_start: m.start(),
            char_end: m.end(),
        })
        .collect()
}
