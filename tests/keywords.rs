//! End-to-end keyword extraction through the public API.

use keyrank::graph::CooccurrenceGraph;
use keyrank::nlp::tagger::PretaggedAnnotator;
use keyrank::pipeline::observer::PipelineObserver;
use keyrank::{
    extract_keywords, normalize, rank, tokenize_and_filter, KeywordExtractor, NodeKeying,
    StopwordSet, TextRankConfig, TextRankError, Token, WindowCenter,
};
use proptest::prelude::*;

const FOX: &str = "The quick fox jumps over the lazy fox. The fox runs.";

fn fox_stopwords() -> StopwordSet {
    StopwordSet::from_words(&["the", "over"])
}

fn texts(result: &keyrank::KeywordResult) -> Vec<&str> {
    result.iter().map(|k| k.text.as_str()).collect()
}

#[test]
fn fox_is_the_top_keyword() {
    let result = extract_keywords(FOX, 2, &fox_stopwords());

    assert_eq!(result.len(), 5);
    assert_eq!(result.keywords()[0].text, "fox");
    assert!(result.converged);
    assert!((result.total_score() - 1.0).abs() < 1e-9);

    let mut seen = texts(&result);
    seen.sort_unstable();
    assert_eq!(seen, vec!["fox", "jumps", "lazy", "quick", "runs"]);
}

#[test]
fn filtered_tokens_keep_order_and_positions() {
    let tokens = tokenize_and_filter(FOX, &fox_stopwords());
    let words: Vec<_> = tokens.iter().map(|t| t.text.as_str()).collect();

    assert_eq!(words, vec!["quick", "fox", "jumps", "lazy", "fox", "fox", "runs"]);
    assert!(tokens.iter().enumerate().all(|(i, t)| t.position == i));
}

#[test]
fn results_are_sorted_by_score_then_text() {
    let result = extract_keywords(FOX, 2, &fox_stopwords());

    for pair in result.keywords().windows(2) {
        let (a, b) = (&pair[0], &pair[1]);
        assert!(a.score > b.score || (a.score == b.score && a.text < b.text));
    }
}

#[test]
fn repeated_runs_are_identical() {
    let stopwords = StopwordSet::english();
    let text = "Compatibility of systems of linear constraints over the set of natural \
                numbers. Criteria of compatibility of a system of linear Diophantine \
                equations, strict inequations, and nonstrict inequations are considered.";

    let first = extract_keywords(text, 2, &stopwords);
    for _ in 0..5 {
        assert_eq!(extract_keywords(text, 2, &stopwords), first);
    }
}

#[test]
fn empty_and_short_inputs_yield_nothing() {
    let stopwords = StopwordSet::english();
    assert!(extract_keywords("", 2, &stopwords).is_empty());
    assert!(extract_keywords("   \n\t", 2, &stopwords).is_empty());
    assert!(extract_keywords("the of and", 2, &stopwords).is_empty());
}

#[test]
fn window_needs_more_than_twice_the_radius() {
    let five = Token::sequence(&["alpha", "beta", "gamma", "delta", "omega"]);
    let four = Token::sequence(&["alpha", "beta", "gamma", "delta"]);

    let ranked = rank(&five, 2);
    assert_eq!(ranked.len(), 5);
    // the far edge of the only window carries the heaviest weight
    assert_eq!(ranked.keywords()[0].text, "omega");

    assert!(rank(&four, 2).is_empty());
    assert!(rank(&five, 3).is_empty());
}

#[test]
fn oversized_radius_is_just_a_short_document() {
    let tokens = Token::sequence(&["a", "b", "c"]);
    assert!(rank(&tokens, usize::MAX).is_empty());
    assert!(extract_keywords(FOX, usize::MAX, &fox_stopwords()).is_empty());
}

#[test]
fn stopwords_never_surface() {
    let stopwords = StopwordSet::from_words(&["fox"]).with_words(&["the", "over"]);
    let result = extract_keywords(FOX, 1, &stopwords);

    assert!(!result.is_empty());
    assert!(result.score("fox").is_none());
}

#[test]
fn exact_keying_matches_checksum_keying() {
    let checksum = KeywordExtractor::new(TextRankConfig::default(), fox_stopwords()).unwrap();
    let exact = KeywordExtractor::new(
        TextRankConfig::default().with_node_keying(NodeKeying::Exact),
        fox_stopwords(),
    )
    .unwrap();

    let a = checksum.extract(FOX).unwrap();
    let b = exact.extract(FOX).unwrap();
    assert_eq!(texts(&a), texts(&b));
    for (x, y) in a.iter().zip(b.iter()) {
        assert!((x.score - y.score).abs() < 1e-12);
    }
}

#[test]
fn radius_centring_still_ranks_every_node() {
    let extractor = KeywordExtractor::new(
        TextRankConfig::default().with_window_center(WindowCenter::Radius),
        fox_stopwords(),
    )
    .unwrap();

    let result = extractor.extract(FOX).unwrap();
    assert_eq!(result.len(), 5);
    assert!((result.total_score() - 1.0).abs() < 1e-9);
}

#[test]
fn pretagged_input_bypasses_the_builtin_tagger() {
    let annotator = PretaggedAnnotator::from_penn(&[
        ("Graphs", "NNS"),
        ("rank", "VBP"),
        ("important", "JJ"),
        ("words", "NNS"),
        ("in", "IN"),
        ("long", "JJ"),
        ("documents", "NNS"),
        ("quickly", "RB"),
        ("and", "CC"),
        ("graphs", "NNS"),
        ("help", "VBP"),
    ]);
    let extractor = KeywordExtractor::new(TextRankConfig::default(), StopwordSet::empty())
        .unwrap()
        .with_annotator(annotator);

    let tokens = extractor.tokenize_and_filter("ignored");
    let words: Vec<_> = tokens.iter().map(|t| t.text.as_str()).collect();
    assert_eq!(words, vec!["graphs", "rank", "words", "documents", "graphs", "help"]);

    let result = extractor.extract("ignored").unwrap();
    assert!(result.score("important").is_none());
    assert!(result.score("graphs").is_some());
}

#[test]
fn config_is_validated_from_json() {
    let err = TextRankConfig::from_json(r#"{"damping": 1.5}"#).unwrap_err();
    assert!(matches!(err, TextRankError::InvalidConfig { field: "damping", .. }));

    let err = TextRankConfig::from_json("{not json").unwrap_err();
    assert!(matches!(err, TextRankError::ConfigParse(_)));

    let config = TextRankConfig::from_json(r#"{"window_radius": 3}"#).unwrap();
    assert_eq!(config.window_radius, 3);
    assert_eq!(config.max_iterations, 100);
}

#[test]
fn unknown_stem_language_is_reported() {
    let extractor = KeywordExtractor::new(
        TextRankConfig::default().with_stem_language("klingon"),
        fox_stopwords(),
    )
    .unwrap();

    let err = extractor.extract(FOX).unwrap_err();
    assert!(matches!(err, TextRankError::UnsupportedLanguage { .. }));
}

#[derive(Default)]
struct GraphSnapshot {
    tokens: usize,
    nodes: usize,
    edges: usize,
}

impl PipelineObserver for GraphSnapshot {
    fn on_tokens(&mut self, tokens: &[Token]) {
        self.tokens = tokens.len();
    }

    fn on_graph(&mut self, graph: &CooccurrenceGraph) {
        self.nodes = graph.node_count();
        self.edges = graph.edge_count();
    }
}

#[test]
fn observer_sees_intermediate_artifacts() {
    let extractor = KeywordExtractor::new(TextRankConfig::default(), fox_stopwords()).unwrap();
    let mut snapshot = GraphSnapshot::default();

    let result = extractor.extract_with_observer(FOX, &mut snapshot).unwrap();

    assert_eq!(snapshot.tokens, 7);
    assert_eq!(snapshot.nodes, 5);
    // J -> {Q, F, J, L}, L -> {F, J, L}, F -> {J, L, F, R}
    assert_eq!(snapshot.edges, 11);
    assert_eq!(result.len(), snapshot.nodes);
}

const VOCAB: &[&str] = &["alpha", "beta", "gamma", "delta", "omega", "sigma", "kappa", "theta"];

proptest! {
    #[test]
    fn prop_ranked_keywords_respect_stopwords(
        words in prop::collection::vec(prop::sample::select(VOCAB), 0..40),
        stopped in prop::sample::subsequence(VOCAB, 0..4),
        radius in 1usize..4,
    ) {
        let stopwords = StopwordSet::from_words(&stopped);
        let text = words.join(" ");
        let result = extract_keywords(&text, radius, &stopwords);

        let kept = words.iter().filter(|w| !stopped.contains(*w)).count();
        if kept <= 2 * radius {
            prop_assert!(result.is_empty());
        } else {
            prop_assert!((result.total_score() - 1.0).abs() < 1e-9);
        }
        for keyword in &result {
            prop_assert!(!stopwords.contains(&keyword.text));
            prop_assert!(VOCAB.contains(&keyword.text.as_str()));
            prop_assert!(keyword.score >= 0.0);
        }
    }

    #[test]
    fn prop_normalize_is_idempotent(s in "\\PC{0,24}") {
        let once = normalize(&s);
        prop_assert_eq!(normalize(&once), once.clone());
    }
}
