//! Abbreviation expansion: every literal occurrence of an abbreviation key
//! in a rule field is textually replaced with a parenthesized alternation
//! of its expansion.

use std::collections::BTreeMap;

/// Map from abbreviation key (e.g. `VOWEL`) to its alternation expansion
/// (e.g. `a|e|i|o|u`). Kept as a `BTreeMap` so expansion order is
/// deterministic and, crucially, so keys that are prefixes of other keys
/// are expanded longest-first (see [`expand`]).
#[derive(Debug, Clone, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Abbreviations(BTreeMap<String, String>);

impl Abbreviations {
    pub fn new() -> Self {
        Abbreviations(BTreeMap::new())
    }

    pub fn insert(&mut self, key: impl Into<String>, expansion: impl Into<String>) {
        self.0.insert(key.into(), expansion.into());
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Applies Unicode normalization to every expansion. Keys are left
    /// untouched since they are plain ASCII tokens by convention, not
    /// text participating in the conversion itself.
    pub fn normalized(&self, form: crate::normalize::NormalizationForm) -> Abbreviations {
        if form == crate::normalize::NormalizationForm::None {
            return self.clone();
        }
        Abbreviations(
            self.0
                .iter()
                .map(|(k, v)| (k.clone(), crate::normalize::normalize(v, form)))
                .collect(),
        )
    }

    /// Replaces every occurrence of every key in `field` with
    /// `(expansion)`. Keys are tried longest-first so an abbreviation
    /// whose name is a substring of another's is not expanded in its
    /// place.
    pub fn expand(&self, field: &str) -> String {
        if self.0.is_empty() {
            return field.to_string();
        }
        let mut keys: Vec<&str> = self.0.keys().map(String::as_str).collect();
        keys.sort_by_key(|k| std::cmp::Reverse(k.len()));

        let mut out = String::with_capacity(field.len());
        let mut rest = field;
        'outer: while !rest.is_empty() {
            for key in &keys {
                if let Some(tail) = rest.strip_prefix(key) {
                    out.push('(');
                    out.push_str(&self.0[*key]);
                    out.push(')');
                    rest = tail;
                    continue 'outer;
                }
            }
            let mut chars = rest.chars();
            let c = chars.next().expect("rest is non-empty");
            out.push(c);
            rest = chars.as_str();
        }
        out
    }
}

impl FromIterator<(String, String)> for Abbreviations {
    fn from_iter<T: IntoIterator<Item = (String, String)>>(iter: T) -> Self {
        Abbreviations(iter.into_iter().collect())
    }
}
