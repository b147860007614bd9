//! Natural Language Processing components
//!
//! Normalization, stopword sets, part-of-speech filtering, the built-in
//! tagger and the morphological normalizers.

pub mod filter;
pub mod normalize;
pub mod stemmer;
pub mod stopwords;
pub mod tagger;
