//! An immutable `Registry` built once from discovered mappings, in place
//! of a process-wide mutable global. A reload constructs a new `Registry`
//! and the caller swaps the shared reference atomically (e.g. behind an
//! `Arc` + `ArcSwap` one layer up); this crate only guarantees the value
//! itself never mutates after [`Registry::build`] returns.

use crate::error::{Error, Result};
use crate::graph::LanguageGraph;
use crate::mapping::Mapping;
use crate::tokenizer::Tokenizer;
use std::collections::HashMap;

/// The read-only set of compiled [`Mapping`]s and the [`LanguageGraph`]
/// derived from them: built once at startup and read-only thereafter.
pub struct Registry {
    mappings: HashMap<(String, String), Mapping>,
    graph: LanguageGraph,
}

impl Registry {
    /// Builds a registry from a list of compiled mappings. At most one
    /// direct mapping may exist per `(in_lang, out_lang)` pair; a
    /// duplicate edge is a `MalformedMapping` at registry-build time.
    pub fn build(mappings: Vec<Mapping>) -> Result<Registry> {
        let mut by_pair = HashMap::new();
        let mut graph = LanguageGraph::new();
        for mapping in mappings {
            let key = (mapping.in_lang().to_string(), mapping.out_lang().to_string());
            graph.add_edge(&key.0, &key.1);
            if by_pair.insert(key.clone(), mapping).is_some() {
                return Err(Error::malformed_mapping(
                    0,
                    format!(
                        "duplicate mapping registered for {} -> {}",
                        key.0, key.1
                    ),
                ));
            }
        }
        log::info!(
            "registry built with {} mapping(s) across {} inventor{}",
            by_pair.len(),
            graph.nodes().len(),
            if graph.nodes().len() == 1 { "y" } else { "ies" }
        );
        Ok(Registry {
            mappings: by_pair,
            graph,
        })
    }

    pub fn graph(&self) -> &LanguageGraph {
        &self.graph
    }

    pub fn get(&self, in_lang: &str, out_lang: &str) -> Result<&Mapping> {
        self.mappings
            .get(&(in_lang.to_string(), out_lang.to_string()))
            .ok_or_else(|| Error::MappingMissing {
                in_lang: in_lang.to_string(),
                out_lang: out_lang.to_string(),
            })
    }

    pub fn langs(&self) -> Vec<String> {
        self.graph.nodes()
    }

    pub fn outputs_for(&self, lang: &str) -> Result<Vec<String>> {
        self.graph.descendants(lang)
    }

    pub fn inputs_for(&self, lang: &str) -> Result<Vec<String>> {
        self.graph.ancestors(lang)
    }

    /// Implements the two-hop tokenizer selection heuristic: prefer a
    /// direct `-ipa` successor, then a two-hop path to an `-ipa` node,
    /// then the first direct successor, then the Unicode-category
    /// default.
    pub fn tokenizer_for(&self, in_lang: &str) -> Tokenizer {
        let Ok(mut successors) = self.graph.successors(in_lang) else {
            return Tokenizer::default_tokenizer();
        };
        successors.sort();

        if let Some(ipa) = successors.iter().find(|s| is_ipa_like(s)) {
            if let Ok(m) = self.get(in_lang, ipa) {
                return Tokenizer::from_mapping(m);
            }
        }

        for hop in &successors {
            if let Ok(second_hops) = self.graph.successors(hop) {
                if let Some(ipa) = second_hops.iter().find(|s| is_ipa_like(s)) {
                    if let (Ok(m1), Ok(m2)) = (self.get(in_lang, hop), self.get(hop, ipa)) {
                        return Tokenizer::from_mappings(&[m1, m2]);
                    }
                }
                break;
            }
        }

        if let Some(first) = successors.first() {
            if let Ok(m) = self.get(in_lang, first) {
                return Tokenizer::from_mapping(m);
            }
        }

        log::warn!(
            "no mapping-backed tokenizer found for \"{in_lang}\", using the Unicode-category default"
        );
        Tokenizer::default_tokenizer()
    }

    /// One-hop (or, when the direct edge is absent but the graph can
    /// route through it, the unique in-between mapping's) tokenizer for
    /// an explicit `(in_lang, out_lang)` pair.
    pub fn tokenizer_for_pair(&self, in_lang: &str, out_lang: &str) -> Tokenizer {
        match self.get(in_lang, out_lang) {
            Ok(m) => Tokenizer::from_mapping(m),
            Err(_) => self.tokenizer_for(in_lang),
        }
    }
}

fn is_ipa_like(lang: &str) -> bool {
    lang.ends_with("-ipa")
}
