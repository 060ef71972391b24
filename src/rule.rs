//! `Rule` and its compiled matcher: two separately anchored regexes
//! standing in for a single pattern with lookaround, which `regex` cannot
//! express.

use crate::charmap::CharMap;
use crate::error::{Error, Result};
use crate::markers::{has_index_markers, strip_index_markers};
use regex::{Regex, RegexBuilder};
use serde::{Deserialize, Serialize};

/// A single rewrite rule as authored in a mapping.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RuleRecord {
    #[serde(rename = "in")]
    pub input: String,
    #[serde(rename = "out")]
    pub output: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub context_before: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub context_after: Option<String>,
}

impl RuleRecord {
    pub fn new(input: impl Into<String>, output: impl Into<String>) -> Self {
        RuleRecord {
            input: input.into(),
            output: output.into(),
            context_before: None,
            context_after: None,
        }
    }

    pub fn with_context_before(mut self, pattern: impl Into<String>) -> Self {
        self.context_before = Some(pattern.into());
        self
    }

    pub fn with_context_after(mut self, pattern: impl Into<String>) -> Self {
        self.context_after = Some(pattern.into());
        self
    }

    /// Swaps `input`/`output`, used by `Mapping`'s `reverse` flag.
    pub(crate) fn reversed(&self) -> RuleRecord {
        RuleRecord {
            input: self.output.clone(),
            output: self.input.clone(),
            context_before: self.context_before.clone(),
            context_after: self.context_after.clone(),
        }
    }

    /// Applies a textual transform (escape decoding, normalization,
    /// abbreviation expansion, case lowering) to `input`, `output`, and
    /// both contexts when present.
    pub(crate) fn transform_fields(&mut self, mut f: impl FnMut(&str) -> String) {
        self.input = f(&self.input);
        self.output = f(&self.output);
        if let Some(c) = &mut self.context_before {
            *c = f(c);
        }
        if let Some(c) = &mut self.context_after {
            *c = f(c);
        }
    }
}

/// A compiled rule: the original record plus a two-pointer matcher built
/// from start/end-anchored regexes over the input and the surrounding
/// context.
#[derive(Debug, Clone)]
pub struct Rule {
    pub record: RuleRecord,
    input_regex: Regex,
    context_before_regex: Option<Regex>,
    context_after_regex: Option<Regex>,
}

impl Rule {
    pub(crate) fn compile(record: RuleRecord, rule_index: usize) -> Result<Rule> {
        let stripped_input = strip_index_markers(&record.input);
        if stripped_input.is_empty()
            && record.context_before.is_none()
            && record.context_after.is_none()
        {
            return Err(Error::malformed_mapping(
                rule_index,
                "empty input field with no surrounding context (unconstrained zero-width match)",
            ));
        }

        if has_index_markers(&record.input) != has_index_markers(&record.output) {
            return Err(Error::malformed_mapping(
                rule_index,
                "explicit index markers on only one side",
            ));
        }

        let input_regex = anchored(&stripped_input, Anchor::Start, rule_index)?;
        let context_before_regex = record
            .context_before
            .as_deref()
            .filter(|s| !s.is_empty())
            .map(|p| anchored(p, Anchor::End, rule_index))
            .transpose()?;
        let context_after_regex = record
            .context_after
            .as_deref()
            .filter(|s| !s.is_empty())
            .map(|p| anchored(p, Anchor::Start, rule_index))
            .transpose()?;

        Ok(Rule {
            record,
            input_regex,
            context_before_regex,
            context_after_regex,
        })
    }

    /// Raw (marker-bearing) input field, used by the Aligner.
    pub fn input_template(&self) -> &str {
        &self.record.input
    }

    /// Raw (marker-bearing) output field, used by the Aligner.
    pub fn output_template(&self) -> &str {
        &self.record.output
    }

    /// Char length of the stripped input pattern's literal portion, used
    /// only to drive a descending-length sort over a mapping's rules;
    /// actual matched length comes from [`Rule::match_len_at`].
    pub(crate) fn sort_key_len(&self) -> usize {
        strip_index_markers(&self.record.input).chars().count()
    }

    /// Tests whether this rule matches starting exactly at character
    /// index `i` of `cm`, returning the matched length in characters if
    /// so. Context checks run first so a failing context short-circuits
    /// before the (potentially wasteful) input search.
    pub(crate) fn match_len_at(&self, cm: &CharMap, i: usize) -> Option<usize> {
        if let Some(re) = &self.context_before_regex {
            if !re.is_match(cm.prefix(i)) {
                return None;
            }
        }
        let found = self.input_regex.find(cm.suffix(i))?;
        debug_assert_eq!(found.start(), 0, "input regex must be start-anchored");
        let char_len = cm.byte_len_to_char_len(i, found.end());
        if let Some(re) = &self.context_after_regex {
            if !re.is_match(cm.suffix(i + char_len)) {
                return None;
            }
        }
        Some(char_len)
    }
}

enum Anchor {
    Start,
    End,
}

fn anchored(pattern: &str, anchor: Anchor, rule_index: usize) -> Result<Regex> {
    let wrapped = match anchor {
        Anchor::Start => format!("^(?:{pattern})"),
        Anchor::End => format!("(?:{pattern})$"),
    };
    RegexBuilder::new(&wrapped)
        .build()
        .map_err(|e| Error::malformed_mapping(rule_index, e.to_string()))
}
