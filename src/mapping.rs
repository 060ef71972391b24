//! `Mapping` compilation: turns an ordered list of [`RuleRecord`]s plus
//! configuration flags into an ordered list of compiled [`Rule`]s,
//! applying a fixed seven-step pipeline. The step order is stable; tests
//! depend on it.

use crate::abbreviation::Abbreviations;
use crate::error::{Error, Result};
use crate::normalize::{self, NormalizationForm};
use crate::rule::{Rule, RuleRecord};
use serde::{Deserialize, Serialize};

/// Configuration flags for a [`Mapping`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MappingConfig {
    pub in_lang: String,
    pub out_lang: String,
    #[serde(default = "default_true")]
    pub case_sensitive: bool,
    #[serde(default)]
    pub escape_special: bool,
    #[serde(default)]
    pub norm_form: NormalizationForm,
    #[serde(default)]
    pub as_is: bool,
    #[serde(default)]
    pub out_delimiter: Option<String>,
    #[serde(default)]
    pub reverse: bool,
    #[serde(default)]
    pub abbreviations: Abbreviations,
    #[serde(default)]
    pub prevent_feeding: bool,
}

fn default_true() -> bool {
    true
}

impl MappingConfig {
    pub fn new(in_lang: impl Into<String>, out_lang: impl Into<String>) -> Self {
        MappingConfig {
            in_lang: in_lang.into(),
            out_lang: out_lang.into(),
            case_sensitive: true,
            escape_special: false,
            norm_form: NormalizationForm::None,
            as_is: false,
            out_delimiter: None,
            reverse: false,
            abbreviations: Abbreviations::new(),
            prevent_feeding: false,
        }
    }
}

/// A compiled, immutable mapping: an ordered list of [`Rule`]s plus the
/// configuration that produced them.
///
/// Mappings are immutable after compilation; the only way to get one is
/// [`Mapping::compile`].
#[derive(Debug, Clone)]
pub struct Mapping {
    config: MappingConfig,
    rules: Vec<Rule>,
}

impl Mapping {
    /// Runs the full compilation pipeline over `records` and `config`, in
    /// a fixed order:
    ///
    /// 1. reverse, 2. escape_special, 3. norm_form, 4. expand
    /// abbreviations, 5. lowercase (if not case-sensitive), 6. sort by
    /// descending input length (unless `as_is`), 7. compile each rule's
    /// matcher.
    pub fn compile(records: Vec<RuleRecord>, config: MappingConfig) -> Result<Mapping> {
        log::debug!(
            "compiling mapping {} -> {} ({} rules)",
            config.in_lang,
            config.out_lang,
            records.len()
        );

        let mut records = records;

        // 1. reverse
        if config.reverse {
            records = records.iter().map(RuleRecord::reversed).collect();
        }

        // 2. escape_special
        if config.escape_special {
            for r in &mut records {
                r.transform_fields(|s| regex::escape(s));
            }
        }

        // 3. norm_form (rule fields and abbreviation expansions both get it)
        let abbreviations = config.abbreviations.normalized(config.norm_form);
        if config.norm_form != NormalizationForm::None {
            for r in &mut records {
                r.transform_fields(|s| normalize::normalize(s, config.norm_form));
            }
        }

        // 4. expand abbreviations
        if !abbreviations.is_empty() {
            for r in &mut records {
                r.transform_fields(|s| abbreviations.expand(s));
            }
        }

        // 5. case_sensitive = false -> lowercase every field
        if !config.case_sensitive {
            for r in &mut records {
                r.transform_fields(|s| s.to_lowercase());
            }
        }

        // 6. sort by descending input length unless as_is (stable: equal
        // lengths keep their relative authored order).
        if !config.as_is {
            records.sort_by_key(|r| std::cmp::Reverse(stripped_len(&r.input)));
        }

        // 7. compile each rule's matcher
        let rules = records
            .into_iter()
            .enumerate()
            .map(|(i, r)| Rule::compile(r, i))
            .collect::<Result<Vec<_>>>()?;

        Ok(Mapping { config, rules })
    }

    pub fn in_lang(&self) -> &str {
        &self.config.in_lang
    }

    pub fn out_lang(&self) -> &str {
        &self.config.out_lang
    }

    pub fn config(&self) -> &MappingConfig {
        &self.config
    }

    pub fn rules(&self) -> &[Rule] {
        &self.rules
    }

    pub fn prevent_feeding(&self) -> bool {
        self.config.prevent_feeding
    }

    pub fn out_delimiter(&self) -> Option<&str> {
        self.config.out_delimiter.as_deref()
    }

    pub fn case_sensitive(&self) -> bool {
        self.config.case_sensitive
    }

    pub fn norm_form(&self) -> NormalizationForm {
        self.config.norm_form
    }

    /// The mapping's input inventory, used by the tokenizer and by
    /// `--check`: the post-compilation `in` field of every rule, with
    /// explicit index markers stripped. Derived directly from the rule
    /// table rather than from an expanded character set, so an
    /// abbreviation like `VOWEL` that survived into a rule's `in` field
    /// as `(a|e|i|o|u)` appears in the inventory as that literal token,
    /// not five separate entries.
    pub fn input_inventory(&self) -> Vec<String> {
        self.rules
            .iter()
            .map(|r| crate::markers::strip_index_markers(r.input_template()))
            .filter(|s| !s.is_empty())
            .collect()
    }

    /// The mapping's output inventory, used by `--check` to validate that
    /// a produced string's characters are all recognized outputs of this
    /// mapping.
    pub fn output_inventory(&self) -> Vec<String> {
        self.rules
            .iter()
            .map(|r| crate::markers::strip_index_markers(r.output_template()))
            .filter(|s| !s.is_empty())
            .collect()
    }

    /// Checks whether every character of `s` appears in some entry of the
    /// mapping's output inventory. Returns the list of characters that do
    /// not.
    pub fn validate_output(&self, s: &str) -> Vec<char> {
        let inventory_chars: std::collections::HashSet<char> = self
            .output_inventory()
            .iter()
            .flat_map(|tok| tok.chars())
            .collect();
        s.chars()
            .filter(|c| !inventory_chars.contains(c) && !c.is_whitespace())
            .collect()
    }
}

fn stripped_len(input: &str) -> usize {
    crate::markers::strip_index_markers(input).chars().count()
}
