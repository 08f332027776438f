//! Named parameter bundles attached to a model.

use gv_core::Real;
use gv_expr::Symbol;
use indexmap::IndexMap;

/// Flat, ordered set of named parameters and derived parameter expressions.
#[derive(Debug, Clone, Default)]
pub struct ParameterSet {
    entries: IndexMap<String, Symbol>,
}

impl ParameterSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an entry (builder style).
    pub fn with(mut self, name: impl Into<String>, value: impl Into<Symbol>) -> Self {
        self.insert(name, value);
        self
    }

    /// Add a free parameter named after its key.
    pub fn with_parameter(self, name: &str) -> Self {
        self.with(name, Symbol::parameter(name))
    }

    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<Symbol>) -> Option<Symbol> {
        self.entries.insert(name.into(), value.into())
    }

    pub fn get(&self, name: &str) -> Option<&Symbol> {
        self.entries.get(name)
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Symbol)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<S: Into<String>> FromIterator<(S, Real)> for ParameterSet {
    fn from_iter<I: IntoIterator<Item = (S, Real)>>(iter: I) -> Self {
        let mut set = Self::new();
        for (name, value) in iter {
            set.insert(name, value);
        }
        set
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keeps_insertion_order() {
        let set = ParameterSet::new()
            .with_parameter("Faraday constant")
            .with("Number of electrodes", 1.0);
        let names: Vec<_> = set.names().collect();
        assert_eq!(names, vec!["Faraday constant", "Number of electrodes"]);
        assert_eq!(set.get("Faraday constant").unwrap().to_string(), "Faraday constant");
    }

    #[test]
    fn collects_numeric_values() {
        let set: ParameterSet = [("a", 1.0), ("b", 2.0)].into_iter().collect();
        assert_eq!(set.len(), 2);
        assert_eq!(set.get("b").unwrap().to_string(), "2");
    }
}
