//! Surface-form normalization
//!
//! Lower-cases, strips diacritics and drops everything that is not a letter
//! or a digit, for any script.

use unicode_general_category::{get_general_category, GeneralCategory};
use unicode_normalization::UnicodeNormalization;

/// Canonicalize a word's surface text.
///
/// Steps: per-character lowercase, NFD, keep only letters and numbers
/// (general categories L* and N*; every combining mark, punctuation and
/// symbol goes), NFC, trim. Returns an empty string when nothing survives,
/// which callers treat as "no token".
pub fn normalize(text: &str) -> String {
    let lower: String = text.chars().flat_map(char::to_lowercase).collect();
    let stripped: String = lower.nfd().filter(|&c| is_letter_or_number(c)).collect();
    let composed: String = stripped.nfc().collect();
    composed.trim().to_string()
}

/// Unicode general category L (any letter) or N (any number)
#[inline]
pub fn is_letter_or_number(c: char) -> bool {
    matches!(
        get_general_category(c),
        GeneralCategory::UppercaseLetter
            | GeneralCategory::LowercaseLetter
            | GeneralCategory::TitlecaseLetter
            | GeneralCategory::ModifierLetter
            | GeneralCategory::OtherLetter
            | GeneralCategory::DecimalNumber
            | GeneralCategory::LetterNumber
            | GeneralCategory::OtherNumber
    )
}

/// Stateless handle around [`normalize`], for code that prefers to pass a
/// normalizer value around
#[derive(Debug, Clone, Copy, Default)]
pub struct Normalizer;

impl Normalizer {
    #[inline]
    pub fn normalize(&self, text: &str) -> String {
        normalize(text)
    }
}
