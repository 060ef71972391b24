//! The pure function that produces a many-to-many character alignment for
//! a single rule application.
//!
//! Everything here is expressed in positions *relative* to the match
//! (`0..m` on the input side, `0..n` on the output side); the caller
//! ([`crate::transducer::Transducer`]) re-bases the result onto the
//! tier's absolute `(i, j)` cursors.

use crate::markers::{has_index_markers, parse_segments};
use std::collections::BTreeMap;

/// One alignment edge. `None` on either side marks an inserted
/// (epenthesis, no input character) or deleted (no output character)
/// position.
pub type Edge = (Option<usize>, Option<usize>);

/// Produces the edge set for one rule application matching `m` input
/// characters and producing `n` output characters, given the raw
/// (marker-bearing) `input_template`/`output_template` the rule was
/// declared with.
///
/// Callers must have already rejected templates with index markers on
/// only one side (that is a compile-time `MalformedMapping`, checked in
/// [`crate::rule::Rule::compile`], not a condition this function needs to
/// handle).
pub fn align(m: usize, n: usize, input_template: &str, output_template: &str) -> Vec<Edge> {
    let edges = match (m <= 1, n <= 1) {
        (true, true) => one_to_one(m, n),
        (true, false) => one_to_many(m, n),
        (false, true) => many_to_one(m, n),
        (false, false) => many_to_many(m, n, input_template, output_template),
    };
    edges
}

fn one_to_one(m: usize, n: usize) -> Vec<Edge> {
    let i = if m == 0 { None } else { Some(0) };
    let j = if n == 0 { None } else { Some(0) };
    if i.is_none() && j.is_none() {
        return Vec::new();
    }
    vec![(i, j)]
}

fn one_to_many(m: usize, n: usize) -> Vec<Edge> {
    let i = if m == 0 { None } else { Some(0) };
    (0..n).map(|k| (i, Some(k))).collect()
}

fn many_to_one(m: usize, n: usize) -> Vec<Edge> {
    let j = if n == 0 { None } else { Some(0) };
    (0..m).map(|k| (Some(k), j)).collect()
}

/// Pairs two position lists belonging to the same side-bucket (a label's
/// positions on each side, or the unlabeled leftovers): position-for-position
/// up to the shorter list, with any remainder attached to the last position
/// of the shorter side. This is the same default pairing rule used when
/// neither side carries explicit-index markers at all, applied here
/// recursively within one label/bucket.
fn pair_positions(ip: &[usize], op: &[usize]) -> Vec<Edge> {
    if ip.is_empty() && op.is_empty() {
        return Vec::new();
    }
    if ip.is_empty() {
        return op.iter().map(|&o| (None, Some(o))).collect();
    }
    if op.is_empty() {
        return ip.iter().map(|&i| (Some(i), None)).collect();
    }
    if ip.len() <= 1 {
        return op.iter().map(|&o| (Some(ip[0]), Some(o))).collect();
    }
    if op.len() <= 1 {
        return ip.iter().map(|&i| (Some(i), Some(op[0]))).collect();
    }
    let shared = ip.len().min(op.len());
    let mut edges: Vec<Edge> = (0..shared).map(|k| (Some(ip[k]), Some(op[k]))).collect();
    if ip.len() > shared {
        let last_op = op[shared - 1];
        edges.extend(ip[shared..].iter().map(|&i| (Some(i), Some(last_op))));
    } else if op.len() > shared {
        let last_ip = ip[shared - 1];
        edges.extend(op[shared..].iter().map(|&o| (Some(last_ip), Some(o))));
    }
    edges
}

/// Maps each char position of a (stripped) template string to the label
/// that covers it, in declaration order. Positions with no label are
/// omitted from `labeled` and collected separately.
fn label_positions(template: &str) -> (BTreeMap<u32, Vec<usize>>, Vec<usize>) {
    let mut labeled: BTreeMap<u32, Vec<usize>> = BTreeMap::new();
    let mut unlabeled = Vec::new();
    let mut pos = 0usize;
    for segment in parse_segments(template) {
        let len = segment.text.chars().count();
        match segment.label {
            Some(label) => labeled.entry(label).or_default().extend(pos..pos + len),
            None => unlabeled.extend(pos..pos + len),
        }
        pos += len;
    }
    (labeled, unlabeled)
}

fn many_to_many(m: usize, n: usize, input_template: &str, output_template: &str) -> Vec<Edge> {
    if has_index_markers(input_template) && has_index_markers(output_template) {
        return many_to_many_by_label(input_template, output_template);
    }
    pair_positions(&(0..m).collect::<Vec<_>>(), &(0..n).collect::<Vec<_>>())
}

fn many_to_many_by_label(input_template: &str, output_template: &str) -> Vec<Edge> {
    let (input_labeled, input_unlabeled) = label_positions(input_template);
    let (output_labeled, output_unlabeled) = label_positions(output_template);

    let mut labels: Vec<u32> = input_labeled
        .keys()
        .chain(output_labeled.keys())
        .copied()
        .collect();
    labels.sort_unstable();
    labels.dedup();

    let mut edges = Vec::new();
    for label in labels {
        let ip = input_labeled.get(&label).map(Vec::as_slice).unwrap_or(&[]);
        let op = output_labeled.get(&label).map(Vec::as_slice).unwrap_or(&[]);
        edges.extend(pair_positions(ip, op));
    }
    edges.extend(pair_positions(&input_unlabeled, &output_unlabeled));
    edges
}
