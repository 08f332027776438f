//! Identity-keyed equation dictionaries.

use gv_core::SymbolId;
use gv_expr::Symbol;
use indexmap::IndexMap;
use indexmap::map::Entry;

use crate::error::{ModelError, ModelResult};

/// Ordered map keyed by expression identity.
///
/// Two keys collide only if they are the same node (or a clone of it);
/// structurally identical expressions built separately are distinct keys.
/// Iteration follows insertion order.
#[derive(Debug, Clone)]
pub struct SymbolMap<V> {
    entries: IndexMap<SymbolId, (Symbol, V)>,
}

/// Variable (or concatenation) to expression.
pub type Equations = SymbolMap<Symbol>;

impl<V> Default for SymbolMap<V> {
    fn default() -> Self {
        Self {
            entries: IndexMap::new(),
        }
    }
}

impl<V> SymbolMap<V> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace the entry for `key`, returning the previous value.
    pub fn insert(&mut self, key: &Symbol, value: V) -> Option<V> {
        match self.entries.entry(key.id()) {
            Entry::Occupied(mut e) => Some(std::mem::replace(&mut e.get_mut().1, value)),
            Entry::Vacant(e) => {
                e.insert((key.clone(), value));
                None
            }
        }
    }

    pub fn get(&self, key: &Symbol) -> Option<&V> {
        self.get_id(key.id())
    }

    pub fn get_id(&self, id: SymbolId) -> Option<&V> {
        self.entries.get(&id).map(|(_, v)| v)
    }

    pub fn contains_key(&self, key: &Symbol) -> bool {
        self.entries.contains_key(&key.id())
    }

    pub fn contains_id(&self, id: SymbolId) -> bool {
        self.entries.contains_key(&id)
    }

    pub fn remove(&mut self, key: &Symbol) -> Option<V> {
        self.entries.shift_remove(&key.id()).map(|(_, v)| v)
    }

    pub fn keys(&self) -> impl Iterator<Item = &Symbol> {
        self.entries.values().map(|(k, _)| k)
    }

    pub fn values(&self) -> impl Iterator<Item = &V> {
        self.entries.values().map(|(_, v)| v)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&Symbol, &V)> {
        self.entries.values().map(|(k, v)| (k, v))
    }

    /// Values in place; keys cannot be changed.
    pub fn values_mut(&mut self) -> impl Iterator<Item = &mut V> {
        self.entries.values_mut().map(|(_, v)| v)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Keys of `self` whose identity is also a key of `other`.
    pub fn shared_keys<'a, W>(&'a self, other: &SymbolMap<W>) -> Vec<&'a Symbol> {
        self.keys().filter(|k| other.contains_key(k)).collect()
    }

    /// Fail with [`ModelError::DuplicateVariables`] if any key of `other` is already present.
    pub fn check_disjoint(&self, other: &SymbolMap<V>, dictionary: &'static str) -> ModelResult<()> {
        let shared = self.shared_keys(other);
        if shared.is_empty() {
            return Ok(());
        }
        Err(ModelError::DuplicateVariables {
            dictionary,
            variables: shared.iter().map(|k| k.to_string()).collect(),
        })
    }
}

impl<V: Clone> SymbolMap<V> {
    /// Append every entry of `other`; existing keys are overwritten in place.
    pub fn extend_from(&mut self, other: &SymbolMap<V>) {
        for (k, v) in other.iter() {
            self.insert(k, v.clone());
        }
    }
}

impl<V> FromIterator<(Symbol, V)> for SymbolMap<V> {
    fn from_iter<I: IntoIterator<Item = (Symbol, V)>>(iter: I) -> Self {
        let mut map = Self::new();
        for (k, v) in iter {
            map.insert(&k, v);
        }
        map
    }
}

impl<'a, V> IntoIterator for &'a SymbolMap<V> {
    type Item = (&'a Symbol, &'a V);
    type IntoIter = Box<dyn Iterator<Item = (&'a Symbol, &'a V)> + 'a>;

    fn into_iter(self) -> Self::IntoIter {
        Box::new(self.iter())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keys_compare_by_identity() {
        let c = Symbol::variable("c", "separator");
        let twin = Symbol::variable("c", "separator");
        let mut map = Equations::new();
        map.insert(&c, Symbol::scalar(1.0));
        assert!(map.contains_key(&c));
        assert!(map.contains_key(&c.clone()));
        assert!(!map.contains_key(&twin));
    }

    #[test]
    fn insert_replaces_and_keeps_order() {
        let a = Symbol::variable("a", "");
        let b = Symbol::variable("b", "");
        let mut map = SymbolMap::new();
        map.insert(&a, 1);
        map.insert(&b, 2);
        assert_eq!(map.insert(&a, 3), Some(1));
        let values: Vec<_> = map.values().copied().collect();
        assert_eq!(values, vec![3, 2]);
    }

    #[test]
    fn disjointness_reports_shared_keys() {
        let a = Symbol::variable("a", "");
        let b = Symbol::variable("b", "");
        let left: SymbolMap<i32> = [(a.clone(), 1), (b.clone(), 2)].into_iter().collect();
        let right: SymbolMap<i32> = [(b.clone(), 5)].into_iter().collect();
        let err = left.check_disjoint(&right, "rhs").unwrap_err();
        match err {
            ModelError::DuplicateVariables {
                dictionary,
                variables,
            } => {
                assert_eq!(dictionary, "rhs");
                assert_eq!(variables, vec!["b".to_string()]);
            }
            other => panic!("unexpected error: {other}"),
        }

        let other: SymbolMap<i32> = [(Symbol::variable("b", ""), 5)].into_iter().collect();
        assert!(left.check_disjoint(&other, "rhs").is_ok());
    }
}
