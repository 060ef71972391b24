//! Applies a single compiled [`Mapping`] to a string, producing output
//! text and a many-to-many [`TransductionTier`].

use crate::align::{self, Edge};
use crate::charmap::CharMap;
use crate::markers::strip_index_markers;
use crate::mapping::Mapping;

/// The per-step alignment produced by one [`Transducer::apply`] call.
///
/// `edges` is a flat, sorted, deduplicated `Vec<Edge>` - never a nested
/// structure keyed by index.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransductionTier {
    pub input_string: String,
    pub output_string: String,
    pub edges: Vec<Edge>,
}

impl TransductionTier {
    /// An identity tier: every input character maps one-to-one to the
    /// same-index output character. Used when `in_lang == out_lang`.
    pub fn identity(s: impl Into<String>) -> TransductionTier {
        let s = s.into();
        let edges = (0..s.chars().count())
            .map(|i| (Some(i), Some(i)))
            .collect();
        TransductionTier {
            output_string: s.clone(),
            input_string: s,
            edges,
        }
    }

    /// The reduced alignment: one representative `(input_idx,
    /// output_idx)` pair per unique input
    /// index, paired with the *maximum* aligned output index. Insertions
    /// (`None` input) are dropped since they have no input index to key
    /// on; deletions (`None` output) keep their input index with `None`.
    pub fn reduced(&self) -> Vec<(usize, Option<usize>)> {
        use std::collections::BTreeMap;
        let mut best: BTreeMap<usize, Option<usize>> = BTreeMap::new();
        for &(i, j) in &self.edges {
            let Some(i) = i else { continue };
            let entry = best.entry(i).or_insert(None);
            match (*entry, j) {
                (Some(cur), Some(new)) if new > cur => *entry = Some(new),
                (None, Some(new)) => *entry = Some(new),
                (_, None) if entry.is_none() => {}
                _ => {}
            }
        }
        best.into_iter().collect()
    }
}

/// One rule application recorded by [`Transducer::apply_with_trace`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppliedRule {
    pub rule_index: usize,
    pub input_template: String,
    pub output_template: String,
    pub matched_at: usize,
    pub before: String,
    pub after: String,
}

/// Applies a single [`Mapping`] to a string.
#[derive(Debug, Clone)]
pub struct Transducer {
    mapping: Mapping,
}

impl Transducer {
    pub fn new(mapping: Mapping) -> Transducer {
        Transducer { mapping }
    }

    pub fn mapping(&self) -> &Mapping {
        &self.mapping
    }

    pub fn in_lang(&self) -> &str {
        self.mapping.in_lang()
    }

    pub fn out_lang(&self) -> &str {
        self.mapping.out_lang()
    }

    /// Runs the transduction, discarding the debugger trace.
    pub fn apply(&self, s: &str) -> TransductionTier {
        self.apply_with_trace(s).0
    }

    /// Runs the transduction, also recording which rule fired where. The
    /// trace is empty wherever a character passed through as a literal
    /// (no rule matched).
    pub fn apply_with_trace(&self, s: &str) -> (TransductionTier, Vec<AppliedRule>) {
        let cur = crate::normalize::normalize(s, self.mapping.norm_form());
        let cur = if self.mapping.case_sensitive() {
            cur
        } else {
            cur.to_lowercase()
        };
        let cm = CharMap::new(&cur);
        let n_chars = cm.len_chars();

        let mut out = String::new();
        let mut edges: Vec<Edge> = Vec::new();
        let mut trace = Vec::new();
        let mut i = 0usize;
        let mut j = 0usize;

        while i < n_chars {
            let found = self.find_match(&cm, i);
            match found {
                Some((rule_index, m)) => {
                    let rule = &self.mapping.rules()[rule_index];
                    let is_last = i + m >= n_chars;
                    let mut output_piece = strip_index_markers(rule.output_template());
                    if let Some(delim) = self.mapping.out_delimiter() {
                        if !is_last {
                            output_piece.push_str(delim);
                        }
                    }
                    let n = output_piece.chars().count();

                    trace.push(AppliedRule {
                        rule_index,
                        input_template: rule.input_template().to_string(),
                        output_template: rule.output_template().to_string(),
                        matched_at: i,
                        before: cur.clone(),
                        after: String::new(), // filled in below once `out` is updated
                    });

                    out.push_str(&output_piece);
                    for (di, dj) in align::align(m, n, rule.input_template(), rule.output_template())
                    {
                        edges.push((di.map(|x| x + i), dj.map(|x| x + j)));
                    }

                    if let Some(last) = trace.last_mut() {
                        last.after = out.clone();
                    }

                    j += n;
                    // An epenthesis rule (m == 0) must still advance the
                    // input cursor by one logical position, or the scan
                    // never terminates.
                    i += m.max(1);
                }
                None => {
                    let ch = cm.slice(i, i + 1);
                    out.push_str(ch);
                    edges.push((Some(i), Some(j)));
                    i += 1;
                    j += 1;
                }
            }
        }

        edges.sort_unstable();
        edges.dedup();

        let tier = TransductionTier {
            input_string: cur,
            output_string: out,
            edges,
        };
        (tier, trace)
    }

    /// Scans the mapping's rules in order (already sorted by descending
    /// input length at compile time unless `as_is`) for the first one
    /// whose matcher succeeds at character index `i`.
    ///
    /// Every rule's matcher (input and context) is tested against `cm`,
    /// the untouched, already-normalized input - never against `out`. So
    /// a rule can never be credited with, or match against, another
    /// rule's output within the same pass: feeding is structurally
    /// impossible here regardless of `prevent_feeding`, since there is no
    /// second scan over produced output for it to guard against. The
    /// flag is accepted and carried on `Mapping` for source compatibility
    /// with mappings that declare it, but this engine never needs to
    /// consult it to keep the "no feeding within a pass" guarantee.
    fn find_match(&self, cm: &CharMap, i: usize) -> Option<(usize, usize)> {
        self.mapping
            .rules()
            .iter()
            .enumerate()
            .find_map(|(idx, rule)| rule.match_len_at(cm, i).map(|m| (idx, m)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mapping::MappingConfig;
    use crate::rule::RuleRecord;

    fn mapping(records: Vec<RuleRecord>) -> Mapping {
        Mapping::compile(records, MappingConfig::new("x", "y")).unwrap()
    }

    #[test]
    fn simple_substitution() {
        let t = Transducer::new(mapping(vec![RuleRecord::new("a", "b")]));
        let tier = t.apply("aa");
        assert_eq!(tier.output_string, "bb");
        assert_eq!(tier.edges, vec![(Some(0), Some(0)), (Some(1), Some(1))]);
    }

    #[test]
    fn context_after_gates_application() {
        let t = Transducer::new(mapping(vec![RuleRecord::new("t", "ch").with_context_after("e")]));
        let tier = t.apply("test");
        assert_eq!(tier.output_string, "chest");
        assert_eq!(
            tier.edges,
            vec![
                (Some(0), Some(0)),
                (Some(0), Some(1)),
                (Some(1), Some(2)),
                (Some(2), Some(3)),
                (Some(3), Some(4)),
            ]
        );
    }

    #[test]
    fn many_to_one_digraph_collapse() {
        let t = Transducer::new(mapping(vec![RuleRecord::new("te", "p")]));
        let tier = t.apply("test");
        assert_eq!(tier.output_string, "pst");
        assert_eq!(
            tier.edges,
            vec![
                (Some(0), Some(0)),
                (Some(1), Some(0)),
                (Some(2), Some(1)),
                (Some(3), Some(2)),
            ]
        );
    }

    #[test]
    fn explicit_metathesis_swaps_labeled_segments() {
        let t = Transducer::new(mapping(vec![RuleRecord::new("e{1}s{2}", "s{2}e{1}")]));
        let tier = t.apply("test");
        assert_eq!(tier.output_string, "tset");
        assert_eq!(
            tier.edges,
            vec![
                (Some(0), Some(0)),
                (Some(1), Some(2)),
                (Some(2), Some(1)),
                (Some(3), Some(3)),
            ]
        );
    }

    #[test]
    fn identity_law_for_passthrough() {
        let t = Transducer::new(mapping(vec![]));
        let tier = t.apply("hello");
        assert_eq!(tier.output_string, "hello");
        assert_eq!(
            tier.edges,
            (0..5).map(|i| (Some(i), Some(i))).collect::<Vec<_>>()
        );
    }

    #[test]
    fn out_delimiter_only_after_rule_matches_not_passthrough() {
        let mut cfg = MappingConfig::new("x", "y");
        cfg.out_delimiter = Some(" ".into());
        let m = Mapping::compile(vec![RuleRecord::new("a", "AY")], cfg).unwrap();
        let t = Transducer::new(m);
        let tier = t.apply("ab");
        // "a" matches the rule and gets a trailing delimiter; "b" passes
        // through literally with none - a delimiter marks a rule's
        // output, not every token boundary.
        assert_eq!(tier.output_string, "AY b");
    }

    #[test]
    fn out_delimiter_omitted_on_last_token() {
        let mut cfg = MappingConfig::new("x", "y");
        cfg.out_delimiter = Some(" ".into());
        let m = Mapping::compile(vec![RuleRecord::new("a", "AY")], cfg).unwrap();
        let t = Transducer::new(m);
        let tier = t.apply("a");
        assert_eq!(tier.output_string, "AY");
    }

    #[test]
    fn reduced_alignment_takes_max_output_index() {
        let t = Transducer::new(mapping(vec![RuleRecord::new("t", "ch")]));
        let tier = t.apply("t");
        assert_eq!(tier.reduced(), vec![(0, Some(1))]);
    }

    #[test]
    fn debugger_trace_records_rule_applications() {
        let t = Transducer::new(mapping(vec![RuleRecord::new("a", "b")]));
        let (_, trace) = t.apply_with_trace("a");
        assert_eq!(trace.len(), 1);
        assert_eq!(trace[0].matched_at, 0);
        assert_eq!(trace[0].after, "b");
    }
}
