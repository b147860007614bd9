//! Error types
//!
//! Only configuration problems are errors. Short documents, empty graphs,
//! hash collisions and ranker non-convergence all produce (possibly empty)
//! results instead.

use thiserror::Error;

/// Errors surfaced by the keyword pipeline
#[derive(Debug, Error)]
pub enum TextRankError {
    /// A stemmer, lemmatizer or stopword list was asked for a language it
    /// does not support
    #[error("unsupported language: {language}")]
    UnsupportedLanguage { language: String },

    /// A configuration value is out of range
    #[error("invalid config `{field}`: {reason}")]
    InvalidConfig { field: &'static str, reason: String },

    /// A JSON configuration could not be parsed
    #[error("failed to parse config: {0}")]
    ConfigParse(#[from] serde_json::Error),
}

impl TextRankError {
    pub(crate) fn unsupported_language(language: impl Into<String>) -> Self {
        Self::UnsupportedLanguage {
            language: language.into(),
        }
    }

    pub(crate) fn invalid_config(field: &'static str, reason: impl Into<String>) -> Self {
        Self::InvalidConfig {
            field,
            reason: reason.into(),
        }
    }
}

/// Crate-wide result alias
pub type Result<T> = std::result::Result<T, TextRankError>;
