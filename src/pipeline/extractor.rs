//! Keyword extraction entry points
//!
//! [`KeywordExtractor`] runs the stages in order, threading artifacts
//! between them and notifying an optional [`PipelineObserver`] at each
//! boundary:
//!
//! 1. Tokenize (annotate, filter by tag, normalize, drop stopwords)
//! 2. Stem (only when `stem_language` is set)
//! 3. Build the co-occurrence graph
//! 4. Rank with PageRank
//! 5. Aggregate into ordered keywords
//!
//! The free functions [`tokenize_and_filter`], [`rank`] and
//! [`extract_keywords`] cover the common case with default settings.

use crate::config::TextRankConfig;
use crate::errors::Result;
use crate::graph::builder::GraphBuilder;
use crate::graph::csr::CsrGraph;
use crate::nlp::filter::TokenFilter;
use crate::nlp::stemmer::{stem_tokens, MorphologicalNormalizer, SnowballStemmer};
use crate::nlp::stopwords::StopwordSet;
use crate::nlp::tagger::{Annotator, LexiconTagger};
use crate::pagerank::StandardPageRank;
use crate::pipeline::observer::{
    NoopObserver, PipelineObserver, StageClock, StageReport, StageReportBuilder, STAGE_AGGREGATE,
    STAGE_GRAPH, STAGE_RANK, STAGE_STEM, STAGE_TOKENIZE,
};
use crate::rank::RankAggregator;
use crate::types::{KeywordResult, Token};

/// Enter a tracing span for a pipeline stage; the span closes at the end of
/// the enclosing block.
macro_rules! trace_stage {
    ($name:expr) => {
        let _span = tracing::info_span!("pipeline_stage", stage = $name).entered();
    };
}

/// Configured keyword extractor
///
/// Holds everything that stays fixed across calls; each call allocates its
/// own graph and tables, so a single extractor can be shared between
/// threads.
#[derive(Debug, Clone)]
pub struct KeywordExtractor<A = LexiconTagger, M = SnowballStemmer> {
    config: TextRankConfig,
    stopwords: StopwordSet,
    annotator: A,
    normalizer: M,
}

impl KeywordExtractor {
    /// Extractor with the built-in tagger and Snowball stemmer
    ///
    /// Fails if `config` does not validate.
    pub fn new(config: TextRankConfig, stopwords: StopwordSet) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            config,
            stopwords,
            annotator: LexiconTagger,
            normalizer: SnowballStemmer,
        })
    }
}

impl<A: Annotator, M: MorphologicalNormalizer> KeywordExtractor<A, M> {
    /// Swap in a different annotator
    pub fn with_annotator<B: Annotator>(self, annotator: B) -> KeywordExtractor<B, M> {
        KeywordExtractor {
            config: self.config,
            stopwords: self.stopwords,
            annotator,
            normalizer: self.normalizer,
        }
    }

    /// Swap in a different stemmer or lemmatizer
    pub fn with_normalizer<N: MorphologicalNormalizer>(self, normalizer: N) -> KeywordExtractor<A, N> {
        KeywordExtractor {
            config: self.config,
            stopwords: self.stopwords,
            annotator: self.annotator,
            normalizer,
        }
    }

    pub fn config(&self) -> &TextRankConfig {
        &self.config
    }

    pub fn stopwords(&self) -> &StopwordSet {
        &self.stopwords
    }

    /// Annotate `text` and keep the canonical tokens that pass the tag and
    /// stopword filters
    pub fn tokenize_and_filter(&self, text: &str) -> Vec<Token> {
        let words = self.annotator.annotate(text);
        TokenFilter::new(&self.config.accepted_tags, &self.stopwords).apply(&words)
    }

    /// Tokenize and, when a stem language is configured, stem
    pub fn prepare(&self, text: &str) -> Result<Vec<Token>> {
        let mut tokens = self.tokenize_and_filter(text);
        if let Some(language) = &self.config.stem_language {
            stem_tokens(&mut tokens, &self.normalizer, language)?;
        }
        Ok(tokens)
    }

    /// Rank an already-filtered token sequence
    pub fn rank(&self, tokens: &[Token]) -> KeywordResult {
        let graph = self.graph_builder().build_parallel(tokens);
        self.aggregator().rank(&graph)
    }

    /// Run the full pipeline on raw text
    pub fn extract(&self, text: &str) -> Result<KeywordResult> {
        self.extract_with_observer(text, &mut NoopObserver)
    }

    /// Run the full pipeline, reporting each stage to `observer`
    pub fn extract_with_observer(
        &self,
        text: &str,
        observer: &mut impl PipelineObserver,
    ) -> Result<KeywordResult> {
        let mut tokens = {
            trace_stage!(STAGE_TOKENIZE);
            observer.on_stage_start(STAGE_TOKENIZE);
            let clock = StageClock::start();
            let tokens = self.tokenize_and_filter(text);
            let report = StageReportBuilder::new(clock.elapsed())
                .tokens(tokens.len())
                .build();
            observer.on_stage_end(STAGE_TOKENIZE, &report);
            tokens
        };

        if let Some(language) = &self.config.stem_language {
            trace_stage!(STAGE_STEM);
            observer.on_stage_start(STAGE_STEM);
            let clock = StageClock::start();
            stem_tokens(&mut tokens, &self.normalizer, language)?;
            observer.on_stage_end(STAGE_STEM, &StageReport::new(clock.elapsed()));
        }
        observer.on_tokens(&tokens);

        let graph = {
            trace_stage!(STAGE_GRAPH);
            observer.on_stage_start(STAGE_GRAPH);
            let clock = StageClock::start();
            let graph = self.graph_builder().build_parallel(&tokens);
            let report = StageReportBuilder::new(clock.elapsed())
                .nodes(graph.node_count())
                .edges(graph.edge_count())
                .build();
            observer.on_stage_end(STAGE_GRAPH, &report);
            observer.on_graph(&graph);
            graph
        };

        let (csr, ranked) = {
            trace_stage!(STAGE_RANK);
            observer.on_stage_start(STAGE_RANK);
            let clock = StageClock::start();
            let csr = CsrGraph::from_graph(&graph);
            let ranked = StandardPageRank::from_config(&self.config).run(&csr);
            let report = StageReportBuilder::new(clock.elapsed())
                .iterations(ranked.iterations)
                .converged(ranked.converged)
                .residual(ranked.delta)
                .build();
            observer.on_stage_end(STAGE_RANK, &report);
            observer.on_rank(&ranked);
            (csr, ranked)
        };

        trace_stage!(STAGE_AGGREGATE);
        observer.on_stage_start(STAGE_AGGREGATE);
        let clock = StageClock::start();
        let result = RankAggregator::aggregate(&graph, &csr, &ranked);
        observer.on_stage_end(STAGE_AGGREGATE, &StageReport::new(clock.elapsed()));

        Ok(result)
    }

    fn graph_builder(&self) -> GraphBuilder<'_> {
        GraphBuilder::from_config(&self.config).with_stopwords(&self.stopwords)
    }

    fn aggregator(&self) -> RankAggregator {
        RankAggregator::new(StandardPageRank::from_config(&self.config))
    }
}

/// Tag `text` with the built-in tagger and keep verbs, nouns, foreign words
/// and personal pronouns that are not stopwords
pub fn tokenize_and_filter(text: &str, stopwords: &StopwordSet) -> Vec<Token> {
    let config = TextRankConfig::default();
    let words = LexiconTagger.annotate(text);
    TokenFilter::new(&config.accepted_tags, stopwords).apply(&words)
}

/// Rank a filtered token sequence with default settings
///
/// Returns an empty result when there are `2 * window_radius` tokens or
/// fewer.
pub fn rank(tokens: &[Token], window_radius: usize) -> KeywordResult {
    let config = TextRankConfig::default().with_window_radius(window_radius);
    let graph = GraphBuilder::from_config(&config).build_parallel(tokens);
    RankAggregator::new(StandardPageRank::from_config(&config)).rank(&graph)
}

/// Tokenize, filter and rank `text` in one call
pub fn extract_keywords(text: &str, window_radius: usize, stopwords: &StopwordSet) -> KeywordResult {
    let config = TextRankConfig::default().with_window_radius(window_radius);
    let tokens = tokenize_and_filter(text, stopwords);
    let graph = GraphBuilder::from_config(&config)
        .with_stopwords(stopwords)
        .build_parallel(&tokens);
    RankAggregator::new(StandardPageRank::from_config(&config)).rank(&graph)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::TextRankError;
    use crate::nlp::stemmer::DictionaryLemmatizer;
    use crate::nlp::tagger::PretaggedAnnotator;
    use crate::pipeline::observer::StageTimingObserver;
    use crate::types::{PosTag, TaggedWord};

    const FOX: &str = "The quick fox jumps over the lazy fox. The fox runs.";

    fn fox_stopwords() -> StopwordSet {
        StopwordSet::from_words(&["the", "over"])
    }

    #[test]
    fn test_fox_scenario() {
        let result = extract_keywords(FOX, 2, &fox_stopwords());

        assert!(result.score("the").is_none());
        assert!(result.score("over").is_none());

        let fox = result.rank_of("fox").unwrap();
        for other in ["quick", "jumps", "lazy", "runs"] {
            if let Some(pos) = result.rank_of(other) {
                assert!(fox <= pos, "fox ranked below {other}");
            }
        }
        assert_eq!(fox, 0);
    }

    #[test]
    fn test_fox_tokens() {
        let tokens = tokenize_and_filter(FOX, &fox_stopwords());
        let texts: Vec<_> = tokens.iter().map(|t| t.text.as_str()).collect();
        assert_eq!(texts, vec!["quick", "fox", "jumps", "lazy", "fox", "fox", "runs"]);
    }

    #[test]
    fn test_empty_input() {
        for radius in [1, 2, 5] {
            assert!(extract_keywords("", radius, &StopwordSet::empty()).is_empty());
        }
    }

    #[test]
    fn test_rank_short_sequence_is_empty() {
        let four = Token::sequence(&["a", "b", "c", "d"]);
        assert!(rank(&four, 2).is_empty());

        let five = Token::sequence(&["a", "b", "c", "d", "e"]);
        let result = rank(&five, 2);
        assert_eq!(result.len(), 5);
        assert!((result.total_score() - 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_extractor_rejects_invalid_config() {
        let err = KeywordExtractor::new(TextRankConfig::default().with_window_radius(0), StopwordSet::empty())
            .unwrap_err();
        assert!(matches!(err, TextRankError::InvalidConfig { .. }));
    }

    #[test]
    fn test_extractor_matches_free_function() {
        let extractor = KeywordExtractor::new(TextRankConfig::default(), fox_stopwords()).unwrap();
        assert_eq!(extractor.extract(FOX).unwrap(), extract_keywords(FOX, 2, &fox_stopwords()));
        assert_eq!(extractor.rank(&extractor.tokenize_and_filter(FOX)), extractor.extract(FOX).unwrap());
    }

    #[test]
    fn test_unsupported_stem_language_propagates() {
        let config = TextRankConfig::default().with_stem_language("klingon");
        let extractor = KeywordExtractor::new(config, fox_stopwords()).unwrap();

        let err = extractor.extract(FOX).unwrap_err();
        assert!(matches!(err, TextRankError::UnsupportedLanguage { .. }));
        assert!(extractor.prepare(FOX).is_err());
    }

    #[test]
    fn test_stemming_merges_forms() {
        let text = "Systems rank systems. Graphs rank graph nodes and system graphs.";
        let config = TextRankConfig::default().with_stem_language("en");
        let extractor = KeywordExtractor::new(config, StopwordSet::from_words(&["and"])).unwrap();

        let result = extractor.extract(text).unwrap();
        assert!(result.score("system").is_some());
        assert!(result.score("systems").is_none());
    }

    #[test]
    fn test_custom_annotator_and_lemmatizer() {
        let words = vec![
            TaggedWord::new("Mice", PosTag::Noun),
            TaggedWord::new("chase", PosTag::Verb),
            TaggedWord::new("cheese", PosTag::Noun),
            TaggedWord::new("and", PosTag::Conjunction),
            TaggedWord::new("mice", PosTag::Noun),
            TaggedWord::new("eat", PosTag::Verb),
            TaggedWord::new("cheese", PosTag::Noun),
        ];
        let extractor = KeywordExtractor::new(
            TextRankConfig::default().with_window_radius(1).with_stem_language("en"),
            StopwordSet::empty(),
        )
        .unwrap()
        .with_annotator(PretaggedAnnotator::new(words))
        .with_normalizer(DictionaryLemmatizer::from_pairs("en", &[("mice", "mouse")]));

        let tokens = extractor.prepare("ignored").unwrap();
        assert_eq!(tokens.len(), 6);
        assert_eq!(tokens[0].text, "mouse");

        let result = extractor.extract("ignored").unwrap();
        assert!(result.score("mouse").is_some());
        assert!(result.score("mice").is_none());
    }

    #[test]
    fn test_observer_sees_every_stage() {
        let config = TextRankConfig::default().with_stem_language("en");
        let extractor = KeywordExtractor::new(config, fox_stopwords()).unwrap();
        let mut obs = StageTimingObserver::new();

        extractor.extract_with_observer(FOX, &mut obs).unwrap();

        let names: Vec<_> = obs.reports().iter().map(|(n, _)| *n).collect();
        assert_eq!(
            names,
            vec![STAGE_TOKENIZE, STAGE_STEM, STAGE_GRAPH, STAGE_RANK, STAGE_AGGREGATE]
        );
        assert_eq!(obs.report(STAGE_TOKENIZE).unwrap().tokens, Some(7));
        assert_eq!(obs.report(STAGE_RANK).unwrap().converged, Some(true));
    }

    #[test]
    fn test_observer_skips_stem_stage_without_language() {
        let extractor = KeywordExtractor::new(TextRankConfig::default(), fox_stopwords()).unwrap();
        let mut obs = StageTimingObserver::new();
        extractor.extract_with_observer(FOX, &mut obs).unwrap();
        assert!(obs.report(STAGE_STEM).is_none());
        assert_eq!(obs.reports().len(), 4);
    }
}
