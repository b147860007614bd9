//! Stopword sets
//!
//! Immutable sets of canonical words excluded from the co-occurrence graph.
//! Bundled lists come from the `stop-words` crate.

use rustc_hash::FxHashSet;
use stop_words::{get, LANGUAGE};

use super::normalize::normalize;
use crate::errors::{Result, TextRankError};

/// An immutable set of canonical stopwords
///
/// Every entry is passed through [`normalize`] on the way in, so lookups
/// with already-normalized tokens match regardless of the case or accents
/// in the source list.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StopwordSet {
    words: FxHashSet<String>,
}

impl StopwordSet {
    /// An empty set; nothing is a stopword
    pub fn empty() -> Self {
        Self::default()
    }

    /// Build a set from a word list
    pub fn from_words<S: AsRef<str>>(words: &[S]) -> Self {
        words.iter().map(|w| w.as_ref()).collect()
    }

    /// The bundled English list
    pub fn english() -> Self {
        Self::from_language(LANGUAGE::English)
    }

    /// Load the bundled list for a language code or name
    ///
    /// Supported: en, de, fr, es, it, pt, nl, ru, sv, no, da, fi, hu, tr, pl, ar
    pub fn for_language(language: &str) -> Result<Self> {
        let lang = match language.to_lowercase().as_str() {
            "en" | "english" => LANGUAGE::English,
            "de" | "german" => LANGUAGE::German,
            "fr" | "french" => LANGUAGE::French,
            "es" | "spanish" => LANGUAGE::Spanish,
            "it" | "italian" => LANGUAGE::Italian,
            "pt" | "portuguese" => LANGUAGE::Portuguese,
            "nl" | "dutch" => LANGUAGE::Dutch,
            "ru" | "russian" => LANGUAGE::Russian,
            "sv" | "swedish" => LANGUAGE::Swedish,
            "no" | "norwegian" => LANGUAGE::Norwegian,
            "da" | "danish" => LANGUAGE::Danish,
            "fi" | "finnish" => LANGUAGE::Finnish,
            "hu" | "hungarian" => LANGUAGE::Hungarian,
            "tr" | "turkish" => LANGUAGE::Turkish,
            "pl" | "polish" => LANGUAGE::Polish,
            "ar" | "arabic" => LANGUAGE::Arabic,
            _ => return Err(TextRankError::unsupported_language(language)),
        };
        Ok(Self::from_language(lang))
    }

    fn from_language(lang: LANGUAGE) -> Self {
        get(lang).iter().map(|s| s.to_string()).collect()
    }

    /// A new set holding this set's words plus `extra`
    pub fn with_words<S: AsRef<str>>(&self, extra: &[S]) -> Self {
        let mut words = self.words.clone();
        words.extend(extra.iter().map(|w| normalize(w.as_ref())).filter(|w| !w.is_empty()));
        Self { words }
    }

    /// A new set without the given words
    pub fn without_words<S: AsRef<str>>(&self, removed: &[S]) -> Self {
        let mut words = self.words.clone();
        for w in removed {
            words.remove(&normalize(w.as_ref()));
        }
        Self { words }
    }

    /// Check whether a canonical token is a stopword
    pub fn contains(&self, token: &str) -> bool {
        self.words.contains(token)
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.words.iter().map(String::as_str)
    }
}

impl<S: AsRef<str>> FromIterator<S> for StopwordSet {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        let words = iter
            .into_iter()
            .map(|w| normalize(w.as_ref()))
            .filter(|w| !w.is_empty())
            .collect();
        Self { words }
    }
}
