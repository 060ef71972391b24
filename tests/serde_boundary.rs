//! An out-of-scope mapping-file loader (CSV/TSV/XLSX/JSON) is expected to
//! deserialize straight into this crate's data model rather than a
//! bespoke intermediate type. This exercises that boundary with JSON,
//! the one format `serde_json` gives us for free in tests.

use transduce_g2p::{Mapping, MappingConfig, RuleRecord};

#[test]
fn rule_record_round_trips_through_json() {
    let rule = RuleRecord::new("t", "d")
        .with_context_before("n")
        .with_context_after("s");
    let json = serde_json::to_string(&rule).unwrap();
    let back: RuleRecord = serde_json::from_str(&json).unwrap();
    assert_eq!(rule, back);
}

#[test]
fn rule_record_deserializes_from_loader_shaped_json() {
    let json = r#"{"in": "ph", "out": "f"}"#;
    let rule: RuleRecord = serde_json::from_str(json).unwrap();
    assert_eq!(rule.input, "ph");
    assert_eq!(rule.output, "f");
    assert_eq!(rule.context_before, None);
    assert_eq!(rule.context_after, None);
}

#[test]
fn mapping_config_deserializes_with_defaults_for_omitted_flags() {
    let json = r#"{"in_lang": "fra", "out_lang": "fra-ipa"}"#;
    let config: MappingConfig = serde_json::from_str(json).unwrap();
    assert_eq!(config.in_lang, "fra");
    assert!(config.case_sensitive);
    assert!(!config.as_is);
    assert!(!config.prevent_feeding);
    assert_eq!(config.norm_form, transduce_g2p::NormalizationForm::None);
}

#[test]
fn mapping_config_deserializes_abbreviations_as_a_plain_object() {
    let json = r#"{
        "in_lang": "fra",
        "out_lang": "fra-ipa",
        "norm_form": "NFC",
        "abbreviations": {"VOWEL": "a|e|i|o|u"}
    }"#;
    let config: MappingConfig = serde_json::from_str(json).unwrap();
    assert_eq!(config.norm_form, transduce_g2p::NormalizationForm::Nfc);
    assert_eq!(config.abbreviations.expand("VOWEL"), "(a|e|i|o|u)");
}

#[test]
fn a_loader_handed_mapping_compiles_and_runs() {
    let records: Vec<RuleRecord> =
        serde_json::from_str(r#"[{"in": "ph", "out": "f"}]"#).unwrap();
    let config: MappingConfig =
        serde_json::from_str(r#"{"in_lang": "eng", "out_lang": "eng-ipa"}"#).unwrap();
    let mapping = Mapping::compile(records, config).unwrap();
    let transducer = transduce_g2p::Transducer::new(mapping);
    assert_eq!(transducer.apply("phone").output_string, "fone");
}
