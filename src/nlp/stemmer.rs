//! Morphological normalization
//!
//! Stemming and lemmatization run as a pass over the filtered tokens before
//! the graph is built. An unsupported language is a configuration error and
//! is always propagated; a failed pass leaves the tokens untouched.

use std::borrow::Cow;

#[cfg(feature = "parallel")]
use rayon::prelude::*;
use rust_stemmers::{Algorithm, Stemmer};
use rustc_hash::{FxHashMap, FxHashSet};

use crate::errors::{Result, TextRankError};
use crate::types::Token;

/// Maps a canonical token onto its stem or lemma
pub trait MorphologicalNormalizer: Sync {
    fn normalize<'a>(&self, token: &'a str, language: &str) -> Result<Cow<'a, str>>;

    /// Normalize a whole token sequence in one language, preserving order
    ///
    /// Fails as a whole on the first error. Implementations with
    /// per-language setup override this to do that setup once.
    fn normalize_tokens(&self, tokens: &[Token], language: &str) -> Result<Vec<String>> {
        map_tokens(tokens, |t| self.normalize(&t.text, language).map(Cow::into_owned))
    }
}

/// Snowball stemmer for the languages `rust-stemmers` ships
#[derive(Debug, Clone, Copy, Default)]
pub struct SnowballStemmer;

impl SnowballStemmer {
    pub fn new() -> Self {
        Self
    }

    /// Resolve a language code or name to a Snowball algorithm
    pub fn algorithm(language: &str) -> Result<Algorithm> {
        let algorithm = match language.to_lowercase().as_str() {
            "ar" | "arabic" => Algorithm::Arabic,
            "da" | "danish" => Algorithm::Danish,
            "nl" | "dutch" => Algorithm::Dutch,
            "en" | "english" => Algorithm::English,
            "fi" | "finnish" => Algorithm::Finnish,
            "fr" | "french" => Algorithm::French,
            "de" | "german" => Algorithm::German,
            "el" | "greek" => Algorithm::Greek,
            "hu" | "hungarian" => Algorithm::Hungarian,
            "it" | "italian" => Algorithm::Italian,
            "no" | "norwegian" => Algorithm::Norwegian,
            "pt" | "portuguese" => Algorithm::Portuguese,
            "ro" | "romanian" => Algorithm::Romanian,
            "ru" | "russian" => Algorithm::Russian,
            "es" | "spanish" => Algorithm::Spanish,
            "sv" | "swedish" => Algorithm::Swedish,
            "ta" | "tamil" => Algorithm::Tamil,
            "tr" | "turkish" => Algorithm::Turkish,
            _ => return Err(TextRankError::unsupported_language(language)),
        };
        Ok(algorithm)
    }
}

impl MorphologicalNormalizer for SnowballStemmer {
    fn normalize<'a>(&self, token: &'a str, language: &str) -> Result<Cow<'a, str>> {
        let stemmer = Stemmer::create(Self::algorithm(language)?);
        Ok(stemmer.stem(token))
    }

    fn normalize_tokens(&self, tokens: &[Token], language: &str) -> Result<Vec<String>> {
        let stemmer = Stemmer::create(Self::algorithm(language)?);
        map_tokens(tokens, |t| Ok(stemmer.stem(&t.text).into_owned()))
    }
}

/// Lookup-table lemmatizer for a single language
///
/// Tokens missing from the table are returned unchanged.
#[derive(Debug, Clone)]
pub struct DictionaryLemmatizer {
    language: String,
    lemmas: FxHashMap<String, String>,
}

impl DictionaryLemmatizer {
    pub fn new(language: impl Into<String>) -> Self {
        Self {
            language: language.into().to_lowercase(),
            lemmas: FxHashMap::default(),
        }
    }

    /// Build from (form, lemma) pairs
    pub fn from_pairs<S: AsRef<str>, T: AsRef<str>>(language: impl Into<String>, pairs: &[(S, T)]) -> Self {
        let mut lemmatizer = Self::new(language);
        for (form, lemma) in pairs {
            lemmatizer.insert(form.as_ref(), lemma.as_ref());
        }
        lemmatizer
    }

    pub fn insert(&mut self, form: &str, lemma: &str) {
        self.lemmas.insert(form.to_string(), lemma.to_string());
    }

    pub fn len(&self) -> usize {
        self.lemmas.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lemmas.is_empty()
    }
}

impl MorphologicalNormalizer for DictionaryLemmatizer {
    fn normalize<'a>(&self, token: &'a str, language: &str) -> Result<Cow<'a, str>> {
        if !language.eq_ignore_ascii_case(&self.language) {
            return Err(TextRankError::unsupported_language(language));
        }
        Ok(match self.lemmas.get(token) {
            Some(lemma) => Cow::Owned(lemma.clone()),
            None => Cow::Borrowed(token),
        })
    }
}

/// Replace every token's text with its normalized form
///
/// All forms are computed before any token is touched, so on error the
/// slice is unchanged.
pub fn stem_tokens<N: MorphologicalNormalizer + ?Sized>(
    tokens: &mut [Token],
    normalizer: &N,
    language: &str,
) -> Result<()> {
    let stems = normalizer.normalize_tokens(tokens, language)?;
    for (token, stem) in tokens.iter_mut().zip(stems) {
        token.text = stem;
    }
    Ok(())
}

/// Map each distinct token to its normalized form
pub fn stem_table<N: MorphologicalNormalizer + ?Sized>(
    tokens: &[Token],
    normalizer: &N,
    language: &str,
) -> Result<FxHashMap<String, String>> {
    let mut seen = FxHashSet::default();
    let mut distinct = Vec::new();
    for token in tokens {
        if seen.insert(token.text.as_str()) {
            distinct.push(token.clone());
        }
    }
    let stems = normalizer.normalize_tokens(&distinct, language)?;
    let table = distinct.into_iter().map(|t| t.text).zip(stems).collect();
    Ok(table)
}

#[cfg(feature = "parallel")]
fn map_tokens<F>(tokens: &[Token], f: F) -> Result<Vec<String>>
where
    F: Fn(&Token) -> Result<String> + Sync + Send,
{
    tokens.par_iter().map(f).collect()
}

#[cfg(not(feature = "parallel"))]
fn map_tokens<F>(tokens: &[Token], f: F) -> Result<Vec<String>>
where
    F: Fn(&Token) -> Result<String> + Sync + Send,
{
    tokens.iter().map(f).collect()
}
