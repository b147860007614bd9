//! Extraction configuration
//!
//! Every knob that changes ranking output lives here so that two runs with
//! equal configs are guaranteed to produce equal results.
//!
//! # JSON shape
//!
//! ```json
//! {
//!   "window_radius": 2,
//!   "damping": 0.85,
//!   "tolerance": 1e-6,
//!   "max_iterations": 100,
//!   "window_center": "half_radius",
//!   "node_keying": "checksum",
//!   "accepted_tags": ["verb", "noun", "foreign", "personal_pronoun"],
//!   "stem_language": "en"
//! }
//! ```
//!
//! Omitted fields take their defaults.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::errors::{Result, TextRankError};
use crate::types::PosTag;

/// Which offset inside the window counts as "distance zero" when weighting
/// edges
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WindowCenter {
    /// `c = floor(radius / 2)`. Skews emphasis towards the right-hand side
    /// of the window; this is the classic behaviour of this extractor.
    #[default]
    HalfRadius,
    /// `c = radius`, the geometric centre of the window. Weights become
    /// symmetric around the centre token.
    Radius,
}

impl WindowCenter {
    /// Window offset that receives weight zero
    pub fn offset(&self, radius: usize) -> usize {
        match self {
            WindowCenter::HalfRadius => radius / 2,
            WindowCenter::Radius => radius,
        }
    }
}

/// How canonical strings are turned into graph node ids
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NodeKeying {
    /// 32-bit checksum of the token bytes. Distinct tokens may collide; the
    /// id table keeps whichever token was seen last.
    #[default]
    Checksum,
    /// Dense ids assigned per distinct string. Collision-free.
    Exact,
}

/// Part-of-speech categories allowed into the graph
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AcceptedTags(BTreeSet<PosTag>);

impl Default for AcceptedTags {
    fn default() -> Self {
        Self::new([
            PosTag::Verb,
            PosTag::Noun,
            PosTag::Foreign,
            PosTag::PersonalPronoun,
        ])
    }
}

impl AcceptedTags {
    pub fn new(tags: impl IntoIterator<Item = PosTag>) -> Self {
        Self(tags.into_iter().collect())
    }

    /// Nouns and verbs only, without foreign words or pronouns
    pub fn nouns_and_verbs() -> Self {
        Self::new([PosTag::Noun, PosTag::Verb])
    }

    pub fn contains(&self, tag: PosTag) -> bool {
        self.0.contains(&tag)
    }

    pub fn insert(&mut self, tag: PosTag) {
        self.0.insert(tag);
    }

    pub fn remove(&mut self, tag: PosTag) {
        self.0.remove(&tag);
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = PosTag> + '_ {
        self.0.iter().copied()
    }
}

/// Configuration for keyword extraction
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TextRankConfig {
    /// Half-width of the co-occurrence window; the window spans
    /// `2 * window_radius + 1` tokens
    pub window_radius: usize,
    /// PageRank damping factor
    pub damping: f64,
    /// Stop iterating once the L1 score movement drops below this
    pub tolerance: f64,
    /// Iteration budget; best-effort scores are returned when exhausted
    pub max_iterations: usize,
    pub window_center: WindowCenter,
    pub node_keying: NodeKeying,
    pub accepted_tags: AcceptedTags,
    /// Snowball language to stem tokens with before graph building
    pub stem_language: Option<String>,
}

impl Default for TextRankConfig {
    fn default() -> Self {
        Self {
            window_radius: 2,
            damping: 0.85,
            tolerance: 1e-6,
            max_iterations: 100,
            window_center: WindowCenter::default(),
            node_keying: NodeKeying::default(),
            accepted_tags: AcceptedTags::default(),
            stem_language: None,
        }
    }
}

impl TextRankConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse and validate a JSON configuration
    pub fn from_json(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn with_window_radius(mut self, window_radius: usize) -> Self {
        self.window_radius = window_radius;
        self
    }

    pub fn with_damping(mut self, damping: f64) -> Self {
        self.damping = damping;
        self
    }

    pub fn with_tolerance(mut self, tolerance: f64) -> Self {
        self.tolerance = tolerance;
        self
    }

    pub fn with_max_iterations(mut self, max_iterations: usize) -> Self {
        self.max_iterations = max_iterations;
        self
    }

    pub fn with_window_center(mut self, window_center: WindowCenter) -> Self {
        self.window_center = window_center;
        self
    }

    pub fn with_node_keying(mut self, node_keying: NodeKeying) -> Self {
        self.node_keying = node_keying;
        self
    }

    pub fn with_accepted_tags(mut self, accepted_tags: AcceptedTags) -> Self {
        self.accepted_tags = accepted_tags;
        self
    }

    pub fn with_stem_language(mut self, language: impl Into<String>) -> Self {
        self.stem_language = Some(language.into());
        self
    }

    /// Check every field, reporting the first one out of range
    pub fn validate(&self) -> Result<()> {
        if self.window_radius == 0 {
            return Err(TextRankError::invalid_config(
                "window_radius",
                "must be at least 1",
            ));
        }
        if !(self.damping > 0.0 && self.damping < 1.0) {
            return Err(TextRankError::invalid_config(
                "damping",
                format!("must be in (0, 1), got {}", self.damping),
            ));
        }
        if !(self.tolerance > 0.0 && self.tolerance.is_finite()) {
            return Err(TextRankError::invalid_config(
                "tolerance",
                format!("must be positive and finite, got {}", self.tolerance),
            ));
        }
        if self.max_iterations == 0 {
            return Err(TextRankError::invalid_config(
                "max_iterations",
                "must be at least 1",
            ));
        }
        if self.accepted_tags.is_empty() {
            return Err(TextRankError::invalid_config(
                "accepted_tags",
                "at least one tag must be accepted",
            ));
        }
        Ok(())
    }
}
