//! Core data types
//!
//! Tagged words come in from an annotator, canonical tokens flow through the
//! graph builder, and keywords come out of the aggregator.

use serde::{Deserialize, Serialize};

/// Graph node key derived from a canonical token string
pub type NodeId = u32;

/// Coarse part-of-speech category
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PosTag {
    Noun,
    Verb,
    /// Modal auxiliary (can, must, would)
    Modal,
    Adjective,
    Adverb,
    PersonalPronoun,
    PossessivePronoun,
    Pronoun,
    Determiner,
    Preposition,
    Conjunction,
    Particle,
    Numeral,
    Foreign,
    Punctuation,
    Symbol,
    Other,
}

impl PosTag {
    /// Map a Penn Treebank tag onto a coarse category
    pub fn from_penn(tag: &str) -> Self {
        match tag {
            "PRP" => PosTag::PersonalPronoun,
            "PRP$" | "WP$" => PosTag::PossessivePronoun,
            "WP" | "EX" => PosTag::Pronoun,
            "FW" => PosTag::Foreign,
            "DT" | "PDT" | "WDT" => PosTag::Determiner,
            "IN" | "TO" => PosTag::Preposition,
            "CC" => PosTag::Conjunction,
            "RP" | "POS" => PosTag::Particle,
            "CD" => PosTag::Numeral,
            "SYM" | "$" | "#" => PosTag::Symbol,
            "MD" => PosTag::Modal,
            "UH" | "LS" => PosTag::Other,
            _ => match tag.as_bytes().first() {
                Some(b'V') => PosTag::Verb,
                Some(b'N') => PosTag::Noun,
                Some(b'J') => PosTag::Adjective,
                Some(b'R') => PosTag::Adverb,
                Some(b) if b.is_ascii_punctuation() => PosTag::Punctuation,
                _ => PosTag::Other,
            },
        }
    }

    /// Map a Universal Dependencies tag (as produced by spaCy) onto a coarse
    /// category
    pub fn from_universal(tag: &str) -> Self {
        match tag {
            "NOUN" | "PROPN" => PosTag::Noun,
            "VERB" | "AUX" => PosTag::Verb,
            "ADJ" => PosTag::Adjective,
            "ADV" => PosTag::Adverb,
            "PRON" => PosTag::PersonalPronoun,
            "DET" => PosTag::Determiner,
            "ADP" => PosTag::Preposition,
            "CCONJ" | "SCONJ" | "CONJ" => PosTag::Conjunction,
            "PART" => PosTag::Particle,
            "NUM" => PosTag::Numeral,
            "X" => PosTag::Foreign,
            "PUNCT" => PosTag::Punctuation,
            "SYM" => PosTag::Symbol,
            _ => PosTag::Other,
        }
    }

    /// Returns the snake_case name used in configuration files
    pub fn as_str(&self) -> &'static str {
        match self {
            PosTag::Noun => "noun",
            PosTag::Verb => "verb",
            PosTag::Modal => "modal",
            PosTag::Adjective => "adjective",
            PosTag::Adverb => "adverb",
            PosTag::PersonalPronoun => "personal_pronoun",
            PosTag::PossessivePronoun => "possessive_pronoun",
            PosTag::Pronoun => "pronoun",
            PosTag::Determiner => "determiner",
            PosTag::Preposition => "preposition",
            PosTag::Conjunction => "conjunction",
            PosTag::Particle => "particle",
            PosTag::Numeral => "numeral",
            PosTag::Foreign => "foreign",
            PosTag::Punctuation => "punctuation",
            PosTag::Symbol => "symbol",
            PosTag::Other => "other",
        }
    }
}

/// A word as delivered by an annotator: raw surface text plus its tag
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaggedWord {
    pub text: String,
    pub pos: PosTag,
}

impl TaggedWord {
    pub fn new(text: impl Into<String>, pos: PosTag) -> Self {
        Self {
            text: text.into(),
            pos,
        }
    }
}

/// A canonical token in the filtered sequence
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Token {
    /// Normalized surface form
    pub text: String,
    /// Index in the filtered sequence
    pub position: usize,
}

impl Token {
    pub fn new(text: impl Into<String>, position: usize) -> Self {
        Self {
            text: text.into(),
            position,
        }
    }

    /// Build a token sequence from already-canonical strings, numbering them
    /// in order
    pub fn sequence<S: AsRef<str>>(words: &[S]) -> Vec<Token> {
        words
            .iter()
            .enumerate()
            .map(|(i, w)| Token::new(w.as_ref(), i))
            .collect()
    }
}

/// A ranked keyword
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Keyword {
    pub text: String,
    pub score: f64,
}

impl Keyword {
    pub fn new(text: impl Into<String>, score: f64) -> Self {
        Self {
            text: text.into(),
            score,
        }
    }
}

/// Keywords ordered by descending score, ties broken by ascending text
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct KeywordResult {
    keywords: Vec<Keyword>,
    /// Power iterations performed by the ranker
    pub iterations: usize,
    /// Whether the ranker met its tolerance before running out of iterations
    pub converged: bool,
    /// Final L1 score movement
    pub delta: f64,
}

impl KeywordResult {
    /// Empty result for degenerate input
    pub fn empty() -> Self {
        Self {
            keywords: Vec::new(),
            iterations: 0,
            converged: true,
            delta: 0.0,
        }
    }

    /// Wrap keywords that are already in final order
    pub(crate) fn from_sorted(keywords: Vec<Keyword>, iterations: usize, converged: bool, delta: f64) -> Self {
        Self {
            keywords,
            iterations,
            converged,
            delta,
        }
    }

    pub fn keywords(&self) -> &[Keyword] {
        &self.keywords
    }

    pub fn into_keywords(self) -> Vec<Keyword> {
        self.keywords
    }

    pub fn iter(&self) -> impl Iterator<Item = &Keyword> {
        self.keywords.iter()
    }

    pub fn len(&self) -> usize {
        self.keywords.len()
    }

    pub fn is_empty(&self) -> bool {
        self.keywords.is_empty()
    }

    /// The first `n` keywords
    pub fn top_n(&self, n: usize) -> &[Keyword] {
        &self.keywords[..n.min(self.keywords.len())]
    }

    /// Score of a keyword, if present
    pub fn score(&self, text: &str) -> Option<f64> {
        self.keywords.iter().find(|k| k.text == text).map(|k| k.score)
    }

    /// Position of a keyword in the ordering, if present
    pub fn rank_of(&self, text: &str) -> Option<usize> {
        self.keywords.iter().position(|k| k.text == text)
    }

    /// Sum of all returned scores
    pub fn total_score(&self) -> f64 {
        self.keywords.iter().map(|k| k.score).sum()
    }
}

impl<'a> IntoIterator for &'a KeywordResult {
    type Item = &'a Keyword;
    type IntoIter = std::slice::Iter<'a, Keyword>;

    fn into_iter(self) -> Self::IntoIter {
        self.keywords.iter()
    }
}
