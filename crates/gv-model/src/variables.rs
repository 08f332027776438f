//! Output variables: string-keyed expressions with close-match lookup.

use gv_expr::Symbol;
use indexmap::IndexMap;

use crate::error::{ModelError, ModelResult};

/// How many suggestions a failed lookup offers.
const MAX_SUGGESTIONS: usize = 3;
/// Minimum similarity (0..=1) for a name to be suggested.
const SUGGESTION_CUTOFF: f64 = 0.6;

/// Named output expressions.
///
/// An entry may be declared without an expression; such entries are
/// dropped, with a warning, when the model is verified.
#[derive(Debug, Clone, Default)]
pub struct Variables {
    entries: IndexMap<String, Option<Symbol>>,
}

impl Variables {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, name: impl Into<String>, value: impl Into<Symbol>) -> Self {
        self.insert(name, value);
        self
    }

    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<Symbol>) {
        self.entries.insert(name.into(), Some(value.into()));
    }

    /// Declare an output that some submodel is expected to supply later.
    pub fn declare(&mut self, name: impl Into<String>) {
        self.entries.insert(name.into(), None);
    }

    /// Expression for `name`, if present and supplied.
    pub fn get(&self, name: &str) -> Option<&Symbol> {
        self.entries.get(name).and_then(Option::as_ref)
    }

    /// Exact lookup; a miss reports the closest known names.
    pub fn lookup(&self, name: &str) -> ModelResult<Option<&Symbol>> {
        match self.entries.get(name) {
            Some(value) => Ok(value.as_ref()),
            None => Err(ModelError::UnknownVariable {
                name: name.to_string(),
                suggestions: self.close_matches(name),
            }),
        }
    }

    /// Up to three known names similar to `name`, best first.
    pub fn close_matches(&self, name: &str) -> Vec<String> {
        let mut scored: Vec<(f64, &String)> = self
            .entries
            .keys()
            .map(|k| (similarity(name, k), k))
            .filter(|(score, _)| *score >= SUGGESTION_CUTOFF)
            .collect();
        scored.sort_by(|a, b| b.0.total_cmp(&a.0));
        scored
            .into_iter()
            .take(MAX_SUGGESTIONS)
            .map(|(_, k)| k.clone())
            .collect()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.entries.contains_key(name)
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, Option<&Symbol>)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_ref()))
    }

    /// Supplied expressions only.
    pub fn expressions(&self) -> impl Iterator<Item = &Symbol> {
        self.entries.values().flatten()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Add every entry of `other`; existing names are overwritten.
    pub fn extend_from(&mut self, other: &Variables) {
        for (k, v) in &other.entries {
            self.entries.insert(k.clone(), v.clone());
        }
    }

    /// Remove entries with no expression, returning their names.
    pub fn remove_unset(&mut self) -> Vec<String> {
        let missing: Vec<String> = self
            .entries
            .iter()
            .filter(|(_, v)| v.is_none())
            .map(|(k, _)| k.clone())
            .collect();
        self.entries.retain(|_, v| v.is_some());
        missing
    }
}

/// Similarity ratio from edit distance: 1 for equal strings, 0 for nothing in common.
fn similarity(a: &str, b: &str) -> f64 {
    let a: Vec<char> = a.chars().collect();
    let b: Vec<char> = b.chars().collect();
    let longest = a.len().max(b.len());
    if longest == 0 {
        return 1.0;
    }
    1.0 - levenshtein(&a, &b) as f64 / longest as f64
}

fn levenshtein(a: &[char], b: &[char]) -> usize {
    let mut prev: Vec<usize> = (0..=b.len()).collect();
    let mut curr = vec![0; b.len() + 1];
    for (i, ca) in a.iter().enumerate() {
        curr[0] = i + 1;
        for (j, cb) in b.iter().enumerate() {
            let cost = usize::from(ca != cb);
            curr[j + 1] = (prev[j] + cost).min(prev[j + 1] + 1).min(curr[j] + 1);
        }
        std::mem::swap(&mut prev, &mut curr);
    }
    prev[b.len()]
}
