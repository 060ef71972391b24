//! `transduce-g2p` is an index-preserving grapheme-to-phoneme (G2P)
//! transduction engine: it compiles declarative, context-sensitive
//! rewrite rules into executable matchers, applies them to produce
//! output text, and carries a full character-level alignment between
//! input and output across one or many chained conversion steps.
//!
//! # Overview
//!
//! A conversion is driven by a [`Registry`] of compiled [`Mapping`]s and
//! the [`LanguageGraph`] of inventory names they connect. Given
//! `(in_lang, out_lang)`, a [`PipelineBuilder`] resolves the shortest
//! path through the graph and composes the per-edge [`Transducer`]s into
//! a [`CompositeTransducer`]. Applying that composite to a string
//! produces a [`TransductionGraph`]: an ordered list of
//! [`TransductionTier`]s, each carrying the strings at that hop's
//! boundary and a many-to-many alignment edge set. A [`Tokenizer`] can
//! split input into word/non-word segments first so conversion and
//! alignment only touch the word segments.
//!
//! # Example
//!
//! ```
//! use transduce_g2p::{Mapping, MappingConfig, Registry, PipelineBuilder, RuleRecord};
//!
//! let mapping = Mapping::compile(
//!     vec![RuleRecord::new("a", "b")],
//!     MappingConfig::new("demo-in", "demo-out"),
//! )
//! .unwrap();
//! let registry = Registry::build(vec![mapping]).unwrap();
//! let pipeline = PipelineBuilder::new(&registry)
//!     .make("demo-in", "demo-out")
//!     .unwrap();
//! let graph = pipeline.apply("aa");
//! assert_eq!(graph.output_string(), "bb");
//! assert_eq!(graph.composed_edges(), vec![(Some(0), Some(0)), (Some(1), Some(1))]);
//! ```

pub mod abbreviation;
pub mod align;
pub mod charmap;
pub mod cli;
pub mod composite;
pub mod error;
pub mod graph;
pub mod mapping;
pub mod markers;
pub mod normalize;
pub mod pipeline;
pub mod registry;
pub mod rule;
pub mod tokenizer;
pub mod transducer;

pub use abbreviation::Abbreviations;
pub use align::{align, Edge};
pub use composite::{compose_edges, CompositeTransducer, TransductionGraph};
pub use error::{Error, Result, RuleCoordinates};
pub use graph::LanguageGraph;
pub use mapping::{Mapping, MappingConfig};
pub use normalize::{decode_escapes, normalize, NormalizationForm};
pub use pipeline::PipelineBuilder;
pub use registry::Registry;
pub use rule::{Rule, RuleRecord};
pub use tokenizer::{Token, Tokenizer};
pub use transducer::{AppliedRule, Transducer, TransductionTier};
