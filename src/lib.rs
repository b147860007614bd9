//! # keyrank
//!
//! Keyword extraction from a single document using a TextRank-style
//! co-occurrence graph.
//!
//! The pipeline is:
//!
//! 1. Tag the text with an [`Annotator`](nlp::tagger::Annotator)
//! 2. Keep verbs, nouns, foreign words and personal pronouns, normalize them
//!    and drop stopwords
//! 3. Optionally stem or lemmatize the surviving tokens
//! 4. Slide a window over the tokens and accumulate distance-weighted edges
//! 5. Run PageRank over the graph
//! 6. Resolve node ids back to words and sort by score
//!
//! ```
//! use keyrank::{extract_keywords, StopwordSet};
//!
//! let stopwords = StopwordSet::from_words(&["the", "over"]);
//! let result = extract_keywords("The quick fox jumps over the lazy fox. The fox runs.", 2, &stopwords);
//! assert_eq!(result.keywords()[0].text, "fox");
//! ```

pub mod config;
pub mod errors;
pub mod graph;
pub mod nlp;
pub mod pagerank;
pub mod pipeline;
pub mod rank;
pub mod types;

pub use config::{AcceptedTags, NodeKeying, TextRankConfig, WindowCenter};
pub use errors::{Result, TextRankError};
pub use nlp::normalize::normalize;
pub use nlp::stopwords::StopwordSet;
pub use pipeline::extractor::{extract_keywords, rank, tokenize_and_filter, KeywordExtractor};
pub use types::{Keyword, KeywordResult, NodeId, PosTag, TaggedWord, Token};
