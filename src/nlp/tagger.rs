//! Linguistic annotation
//!
//! The extractor only needs an ordered sequence of (surface, tag) pairs.
//! Anything that can produce one implements [`Annotator`]; real taggers
//! (spaCy, a Penn Treebank tagger, ...) plug in via [`PretaggedAnnotator`]
//! or their own implementation. [`LexiconTagger`] is a small deterministic
//! English tagger good enough for keyword extraction without external
//! models.

use unicode_segmentation::UnicodeSegmentation;

use crate::types::{PosTag, TaggedWord};

/// Produces tagged words from raw text
pub trait Annotator {
    /// Tag `text`. Must be deterministic and may return nothing for empty or
    /// degenerate input.
    fn annotate(&self, text: &str) -> Vec<TaggedWord>;
}

impl<A: Annotator + ?Sized> Annotator for &A {
    fn annotate(&self, text: &str) -> Vec<TaggedWord> {
        (**self).annotate(text)
    }
}

impl<A: Annotator + ?Sized> Annotator for Box<A> {
    fn annotate(&self, text: &str) -> Vec<TaggedWord> {
        (**self).annotate(text)
    }
}

/// Rule-based English tagger
///
/// Splits on Unicode word boundaries, tags closed-class words from a fixed
/// lexicon, then falls back to suffix heuristics and finally to noun.
#[derive(Debug, Clone, Copy, Default)]
pub struct LexiconTagger;

impl LexiconTagger {
    pub fn new() -> Self {
        Self
    }

    /// Tag a single segment
    pub fn tag_word(&self, word: &str) -> PosTag {
        if !word.chars().any(char::is_alphanumeric) {
            return if word.chars().all(|c| c.is_ascii_punctuation() || is_general_punct(c)) {
                PosTag::Punctuation
            } else {
                PosTag::Symbol
            };
        }
        if word.chars().all(|c| c.is_numeric() || c == '.' || c == ',') {
            return PosTag::Numeral;
        }

        let lower = word.to_lowercase();
        if let Some(tag) = closed_class(&lower) {
            return tag;
        }

        let len = lower.chars().count();
        if len > 4 && lower.ends_with("ly") {
            PosTag::Adverb
        } else if len > 4 && (lower.ends_with("ing") || lower.ends_with("ed")) {
            PosTag::Verb
        } else if len > 5
            && ["ous", "ful", "ive", "able", "ible", "less", "ish"]
                .iter()
                .any(|s| lower.ends_with(s))
        {
            PosTag::Adjective
        } else {
            PosTag::Noun
        }
    }
}

impl Annotator for LexiconTagger {
    fn annotate(&self, text: &str) -> Vec<TaggedWord> {
        text.split_word_bounds()
            .filter(|seg| !seg.trim().is_empty())
            .map(|seg| TaggedWord::new(seg, self.tag_word(seg)))
            .collect()
    }
}

/// Replays words tagged elsewhere, ignoring the text passed to `annotate`
#[derive(Debug, Clone, Default)]
pub struct PretaggedAnnotator {
    words: Vec<TaggedWord>,
}

impl PretaggedAnnotator {
    pub fn new(words: Vec<TaggedWord>) -> Self {
        Self { words }
    }

    /// Load a JSON array of `{"text": ..., "pos": ...}` objects
    pub fn from_json(json: &str) -> crate::errors::Result<Self> {
        let words: Vec<TaggedWord> = serde_json::from_str(json)?;
        Ok(Self::new(words))
    }

    /// Build from (text, Penn Treebank tag) pairs
    pub fn from_penn<S: AsRef<str>, T: AsRef<str>>(pairs: &[(S, T)]) -> Self {
        let words = pairs
            .iter()
            .map(|(text, tag)| TaggedWord::new(text.as_ref(), PosTag::from_penn(tag.as_ref())))
            .collect();
        Self::new(words)
    }
}

impl Annotator for PretaggedAnnotator {
    fn annotate(&self, _text: &str) -> Vec<TaggedWord> {
        self.words.clone()
    }
}

fn is_general_punct(c: char) -> bool {
    matches!(
        c,
        '\u{2010}'..='\u{2027}' | '\u{00A1}' | '\u{00AB}' | '\u{00BB}' | '\u{00BF}' | '\u{3001}' | '\u{3002}'
    )
}

fn closed_class(word: &str) -> Option<PosTag> {
    let tag = match word {
        "i" | "you" | "he" | "she" | "it" | "we" | "they" | "me" | "him" | "us" | "them"
        | "myself" | "yourself" | "himself" | "herself" | "itself" | "ourselves"
        | "themselves" => PosTag::PersonalPronoun,
        "my" | "your" | "his" | "her" | "its" | "our" | "their" | "mine" | "yours" | "hers"
        | "ours" | "theirs" | "whose" => PosTag::PossessivePronoun,
        "who" | "whom" | "what" | "there" | "someone" | "anyone" | "everyone" | "nobody"
        | "something" | "anything" | "everything" | "nothing" => PosTag::Pronoun,
        "a" | "an" | "the" | "this" | "that" | "these" | "those" | "each" | "every" | "some"
        | "any" | "no" | "all" | "both" | "either" | "neither" | "which" | "another" => {
            PosTag::Determiner
        }
        "of" | "in" | "on" | "at" | "by" | "for" | "with" | "about" | "against" | "between"
        | "into" | "through" | "during" | "before" | "after" | "above" | "below" | "to"
        | "from" | "up" | "down" | "over" | "under" | "across" | "behind" | "beyond"
        | "near" | "within" | "without" | "upon" | "among" | "since" | "until" | "via" => {
            PosTag::Preposition
        }
        "and" | "or" | "but" | "nor" | "yet" | "so" | "if" | "because" | "although"
        | "though" | "while" | "whereas" | "unless" | "than" | "whether" => PosTag::Conjunction,
        "is" | "are" | "was" | "were" | "be" | "been" | "being" | "am" | "do" | "does"
        | "did" | "have" | "has" | "had" => PosTag::Verb,
        "will" | "would" | "can" | "could" | "shall" | "should" | "may" | "might"
        | "must" => PosTag::Modal,
        "not" | "very" | "too" | "also" | "just" | "only" | "then" | "now" | "here" | "again"
        | "always" | "never" | "often" | "still" | "even" | "already" | "soon" => {
            PosTag::Adverb
        }
        "one" | "two" | "three" | "four" | "five" | "six" | "seven" | "eight" | "nine"
        | "ten" | "hundred" | "thousand" | "million" => PosTag::Numeral,
        _ => return None,
    };
    Some(tag)
}
