//! `CompositeTransducer` and `TransductionGraph`: chains [`Transducer`]s
//! and threads/composes their alignments.

use crate::align::Edge;
use crate::transducer::{AppliedRule, TransductionTier, Transducer};

/// The multi-step alignment produced by a [`CompositeTransducer`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransductionGraph {
    pub tiers: Vec<TransductionTier>,
}

impl TransductionGraph {
    pub fn input_string(&self) -> &str {
        match self.tiers.first() {
            Some(t) => &t.input_string,
            None => "",
        }
    }

    pub fn output_string(&self) -> &str {
        match self.tiers.last() {
            Some(t) => &t.output_string,
            None => "",
        }
    }

    /// Composes all tiers pairwise into a single edge set from the
    /// original input to the final output. Canonicalized by sorting
    /// lexicographically and deduplicating.
    ///
    /// Returns an empty edge set for an empty graph rather than
    /// panicking; callers that need the identity case should use
    /// [`TransductionTier::identity`] tiers, which compose to identity
    /// edges as expected.
    pub fn composed_edges(&self) -> Vec<Edge> {
        let mut iter = self.tiers.iter();
        let Some(first) = iter.next() else {
            return Vec::new();
        };
        let mut acc: Vec<Edge> = first.edges.clone();
        for tier in iter {
            acc = compose_edges(&acc, &tier.edges);
        }
        acc.sort_unstable();
        acc.dedup();
        acc
    }
}

/// Composes two adjacent edge sets `e1: A -> B` and `e2: B -> C` into
/// `e1 ∘ e2: A -> C`: `{(a, c) | ∃ b. (a, b) ∈ e1 ∧ (b, c) ∈ e2}`.
///
/// `None` endpoints (insertions/deletions) are carried through rather
/// than joined on: an input position deleted in the first hop (`(a,
/// None)`) stays deleted in the composition: there is no `b` to look up
/// in `e2`. An output position inserted in the second hop (`(None, c)`)
/// has no `a` on this side and is carried through verbatim so it is not
/// silently dropped from the composed edge set.
pub fn compose_edges(e1: &[Edge], e2: &[Edge]) -> Vec<Edge> {
    use std::collections::BTreeMap;

    let mut by_b: BTreeMap<usize, Vec<usize>> = BTreeMap::new();
    for &(b, c) in e2 {
        if let (Some(b), Some(c)) = (b, c) {
            by_b.entry(b).or_default().push(c);
        }
    }

    let mut composed = Vec::new();
    for &(a, b) in e1 {
        match b {
            Some(b) => match by_b.get(&b) {
                Some(cs) => {
                    for &c in cs {
                        composed.push((a, Some(c)));
                    }
                }
                // b has no outgoing edge in e2 (e.g. b was itself
                // produced by an earlier deletion's neighbour): treat
                // the composed position as deleted rather than dropped.
                None => composed.push((a, None)),
            },
            None => composed.push((a, None)),
        }
    }
    // Second-hop insertions (None -> c) have no first-hop predecessor
    // and so cannot be reached by iterating e1; carry them through.
    for &(b, c) in e2 {
        if b.is_none() {
            composed.push((None, c));
        }
    }
    composed.sort_unstable();
    composed.dedup();
    composed
}

/// Ordered list of [`Transducer`]s.
#[derive(Debug, Clone)]
pub struct CompositeTransducer {
    transducers: Vec<Transducer>,
}

impl CompositeTransducer {
    pub fn new(transducers: Vec<Transducer>) -> CompositeTransducer {
        CompositeTransducer { transducers }
    }

    /// An empty composite: the identity pipeline for `in_lang ==
    /// out_lang`.
    pub fn identity() -> CompositeTransducer {
        CompositeTransducer {
            transducers: Vec::new(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.transducers.is_empty()
    }

    pub fn transducers(&self) -> &[Transducer] {
        &self.transducers
    }

    /// Runs every transducer in sequence, tier `k`'s output feeding tier
    /// `k+1`'s input. An empty composite yields a single identity tier.
    pub fn apply(&self, s: &str) -> TransductionGraph {
        if self.transducers.is_empty() {
            return TransductionGraph {
                tiers: vec![TransductionTier::identity(s)],
            };
        }
        let mut tiers = Vec::with_capacity(self.transducers.len());
        let mut cur = s.to_string();
        for t in &self.transducers {
            let tier = t.apply(&cur);
            cur = tier.output_string.clone();
            tiers.push(tier);
        }
        TransductionGraph { tiers }
    }

    /// Like [`apply`](Self::apply) but also returns the per-tier
    /// debugger trace, one `Vec<AppliedRule>` per hop.
    pub fn apply_with_trace(&self, s: &str) -> (TransductionGraph, Vec<Vec<AppliedRule>>) {
        if self.transducers.is_empty() {
            return (
                TransductionGraph {
                    tiers: vec![TransductionTier::identity(s)],
                },
                Vec::new(),
            );
        }
        let mut tiers = Vec::with_capacity(self.transducers.len());
        let mut traces = Vec::with_capacity(self.transducers.len());
        let mut cur = s.to_string();
        for t in &self.transducers {
            let (tier, trace) = t.apply_with_trace(&cur);
            cur = tier.output_string.clone();
            tiers.push(tier);
            traces.push(trace);
        }
        (TransductionGraph { tiers }, traces)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mapping::{Mapping, MappingConfig};
    use crate::rule::RuleRecord;

    fn transducer(in_lang: &str, out_lang: &str, records: Vec<RuleRecord>) -> Transducer {
        Transducer::new(Mapping::compile(records, MappingConfig::new(in_lang, out_lang)).unwrap())
    }

    #[test]
    fn empty_composite_is_identity() {
        let c = CompositeTransducer::identity();
        let graph = c.apply("bonjour");
        assert_eq!(graph.output_string(), "bonjour");
        assert_eq!(graph.tiers.len(), 1);
        assert_eq!(
            graph.composed_edges(),
            (0..7).map(|i| (Some(i), Some(i))).collect::<Vec<_>>()
        );
    }

    #[test]
    fn composition_matches_three_hop_pipeline() {
        // A two-hop "fra -> fra-ipa -> eng-ipa" stand-in, chosen so that
        // composing pairwise and composing in one step agree exactly.
        let t1 = transducer("fra", "fra-ipa", vec![RuleRecord::new("j", "ʒ")]);
        let t2 = transducer("fra-ipa", "eng-ipa", vec![RuleRecord::new("ʒ", "zh")]);
        let composite = CompositeTransducer::new(vec![t1, t2]);
        let graph = composite.apply("bonjour");
        assert_eq!(graph.output_string(), "bonzhour");

        // Composing pairwise...
        let pairwise = compose_edges(&graph.tiers[0].edges, &graph.tiers[1].edges);
        // ...agrees with the graph's own single-step composition.
        assert_eq!(pairwise, graph.composed_edges());
    }

    #[test]
    fn composition_is_associative_on_three_adjacent_tiers() {
        let t1 = transducer("a", "b", vec![RuleRecord::new("x", "yy")]);
        let t2 = transducer("b", "c", vec![RuleRecord::new("y", "z")]);
        let t3 = transducer("c", "d", vec![RuleRecord::new("z", "ww")]);
        let composite = CompositeTransducer::new(vec![t1, t2, t3]);
        let graph = composite.apply("x");

        let e1 = &graph.tiers[0].edges;
        let e2 = &graph.tiers[1].edges;
        let e3 = &graph.tiers[2].edges;

        let left = compose_edges(&compose_edges(e1, e2), e3);
        let right = compose_edges(e1, &compose_edges(e2, e3));
        assert_eq!(left, right);
        assert_eq!(left, graph.composed_edges());
    }
}
