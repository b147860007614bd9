//! Part-of-speech and stopword filtering
//!
//! Decides which tagged words become graph tokens.

use super::normalize::normalize;
use super::stopwords::StopwordSet;
use crate::config::AcceptedTags;
use crate::types::{TaggedWord, Token};

/// Word filter combining an accepted-tag set with a stopword set
#[derive(Debug, Clone, Copy)]
pub struct TokenFilter<'a> {
    accepted: &'a AcceptedTags,
    stopwords: &'a StopwordSet,
}

impl<'a> TokenFilter<'a> {
    pub fn new(accepted: &'a AcceptedTags, stopwords: &'a StopwordSet) -> Self {
        Self {
            accepted,
            stopwords,
        }
    }

    /// Canonical form of `word` if it participates in ranking
    ///
    /// The tag is checked first, then the normalized text must be non-empty
    /// and not a stopword.
    pub fn accept(&self, word: &TaggedWord) -> Option<String> {
        if !self.accepted.contains(word.pos) {
            return None;
        }
        let canonical = normalize(&word.text);
        if canonical.is_empty() || self.stopwords.contains(&canonical) {
            return None;
        }
        Some(canonical)
    }

    /// Filter a tagged sequence into positioned tokens
    pub fn apply(&self, words: &[TaggedWord]) -> Vec<Token> {
        let mut tokens = Vec::with_capacity(words.len() / 2);
        for word in words {
            if let Some(text) = self.accept(word) {
                let position = tokens.len();
                tokens.push(Token::new(text, position));
            }
        }
        tokens
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::PosTag;

    fn word(text: &str, pos: PosTag) -> TaggedWord {
        TaggedWord::new(text, pos)
    }

    #[test]
    fn test_default_tags_accepted() {
        let tags = AcceptedTags::default();
        let stops = StopwordSet::empty();
        let filter = TokenFilter::new(&tags, &stops);

        assert_eq!(filter.accept(&word("Runs", PosTag::Verb)), Some("runs".into()));
        assert_eq!(filter.accept(&word("Fox", PosTag::Noun)), Some("fox".into()));
        assert_eq!(filter.accept(&word("déjà", PosTag::Foreign)), Some("deja".into()));
        assert_eq!(filter.accept(&word("We", PosTag::PersonalPronoun)), Some("we".into()));

        assert_eq!(filter.accept(&word("quick", PosTag::Adjective)), None);
        assert_eq!(filter.accept(&word("our", PosTag::PossessivePronoun)), None);
        assert_eq!(filter.accept(&word("the", PosTag::Determiner)), None);
    }

    #[test]
    fn test_stopwords_rejected_after_normalization() {
        let tags = AcceptedTags::default();
        let stops = StopwordSet::from_words(&["over"]);
        let filter = TokenFilter::new(&tags, &stops);

        assert_eq!(filter.accept(&word("OVER", PosTag::Noun)), None);
        assert_eq!(filter.accept(&word("over!", PosTag::Noun)), None);
    }

    #[test]
    fn test_empty_normalization_rejected() {
        let tags = AcceptedTags::default();
        let stops = StopwordSet::empty();
        let filter = TokenFilter::new(&tags, &stops);

        assert_eq!(filter.accept(&word("--", PosTag::Noun)), None);
    }

    #[test]
    fn test_custom_tag_set() {
        let tags = AcceptedTags::nouns_and_verbs();
        let stops = StopwordSet::empty();
        let filter = TokenFilter::new(&tags, &stops);

        assert_eq!(filter.accept(&word("we", PosTag::PersonalPronoun)), None);
        assert_eq!(filter.accept(&word("fox", PosTag::Noun)), Some("fox".into()));
    }

    #[test]
    fn test_apply_assigns_filtered_positions() {
        let tags = AcceptedTags::default();
        let stops = StopwordSet::from_words(&["the"]);
        let filter = TokenFilter::new(&tags, &stops);

        let words = vec![
            word("The", PosTag::Noun),
            word("fox", PosTag::Noun),
            word("quickly", PosTag::Adverb),
            word("runs", PosTag::Verb),
            word(".", PosTag::Punctuation),
        ];

        let tokens = filter.apply(&words);
        assert_eq!(tokens, vec![Token::new("fox", 0), Token::new("runs", 1)]);
    }
}
