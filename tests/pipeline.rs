//! Cross-module integration scenarios exercising [`Registry`] +
//! [`PipelineBuilder`] + [`Tokenizer`] together the way a caller of this
//! crate actually would, rather than any single module in isolation.

use transduce_g2p::{Mapping, MappingConfig, PipelineBuilder, Registry, RuleRecord, Tokenizer};

fn compile(in_lang: &str, out_lang: &str, records: Vec<RuleRecord>) -> Mapping {
    Mapping::compile(records, MappingConfig::new(in_lang, out_lang)).unwrap()
}

#[test]
fn three_hop_pipeline_matches_whether_composed_pairwise_or_in_one_step() {
    let registry = Registry::build(vec![
        compile("fra", "fra-ipa", vec![RuleRecord::new("b", "b"), RuleRecord::new("j", "ʒ")]),
        compile(
            "fra-ipa",
            "eng-ipa",
            vec![RuleRecord::new("ʒ", "zh"), RuleRecord::new("õ", "AA N")],
        ),
        compile(
            "eng-ipa",
            "eng-arpabet",
            vec![RuleRecord::new("zh", "ZH "), RuleRecord::new("AA N", "AA N ")],
        ),
    ])
    .unwrap();

    let pipeline = PipelineBuilder::new(&registry).make("fra", "eng-arpabet").unwrap();
    assert_eq!(pipeline.transducers().len(), 3);

    let graph = pipeline.apply("bonjour");

    // Composing the tiers pairwise, left to right...
    let mut pairwise = graph.tiers[0].edges.clone();
    for tier in &graph.tiers[1..] {
        pairwise = transduce_g2p::compose_edges(&pairwise, &tier.edges);
    }
    pairwise.sort_unstable();
    pairwise.dedup();

    // ...agrees exactly with the graph's single-step composition.
    assert_eq!(pairwise, graph.composed_edges());
}

#[test]
fn tokenizer_splits_french_sentence_into_eight_alternating_segments() {
    let mapping = compile(
        "fra",
        "fra-ipa",
        vec![RuleRecord::new("c", "k"), RuleRecord::new("e", "e")],
    );
    let tokenizer = Tokenizer::from_mapping(&mapping);
    let segments = tokenizer.tokenize("ceci était 'un' test.");

    assert_eq!(segments.len(), 8);
    assert!(segments[0].is_word);
    assert_eq!(segments[0].text, "ceci");

    let tags: Vec<bool> = segments.iter().map(|s| s.is_word).collect();
    for pair in tags.windows(2) {
        assert_ne!(pair[0], pair[1], "adjacent segments must alternate word/non-word tags");
    }
}

#[test]
fn identity_pipeline_end_to_end() {
    let registry = Registry::build(Vec::new()).unwrap();
    let pipeline = PipelineBuilder::new(&registry).make("fra", "fra").unwrap();
    let graph = pipeline.apply("qwerty");
    assert_eq!(graph.output_string(), "qwerty");
    assert_eq!(
        graph.composed_edges(),
        (0..6).map(|i| (Some(i), Some(i))).collect::<Vec<_>>()
    );
}

#[test]
fn unknown_inventory_is_reported_as_invalid_language_code() {
    let registry = Registry::build(vec![compile("a", "b", vec![RuleRecord::new("x", "y")])]).unwrap();
    let err = PipelineBuilder::new(&registry).make("a", "nonexistent").unwrap_err();
    assert!(matches!(err, transduce_g2p::Error::InvalidLanguageCode { .. }));
    assert_eq!(err.cli_exit_code(), 3);
}

#[test]
fn tokenizer_then_pipeline_preserves_punctuation_verbatim() {
    let registry = Registry::build(vec![compile("fra", "fra-ipa", vec![RuleRecord::new("c", "k")])]).unwrap();
    let pipeline = PipelineBuilder::new(&registry).make("fra", "fra-ipa").unwrap();
    let tokenizer = registry.tokenizer_for("fra");

    let mut out = String::new();
    for token in tokenizer.tokenize("c'est ça!") {
        if token.is_word {
            out.push_str(pipeline.apply(&token.text).output_string());
        } else {
            out.push_str(&token.text);
        }
    }
    assert_eq!(out, "k'est ça!");
}
