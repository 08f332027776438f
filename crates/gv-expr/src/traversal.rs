//! Tree traversal and rewriting.

use gv_core::SymbolId;

use crate::symbol::{Symbol, SymbolClass};

/// Lazy depth-first pre-order iterator over a subtree, starting at its root.
pub struct PreOrder<'a> {
    stack: Vec<&'a Symbol>,
}

impl<'a> Iterator for PreOrder<'a> {
    type Item = &'a Symbol;

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.stack.pop()?;
        // reversed so the first child is visited first
        self.stack.extend(node.children().iter().rev());
        Some(node)
    }
}

impl Symbol {
    /// Visit this node and every descendant, parents before children, left to right.
    pub fn pre_order(&self) -> PreOrder<'_> {
        PreOrder { stack: vec![self] }
    }

    /// True if any node in the subtree belongs to one of `classes`.
    pub fn has_symbol_of_classes(&self, classes: &[SymbolClass]) -> bool {
        self.pre_order().any(|s| classes.contains(&s.class()))
    }

    /// All `Variable` nodes in the subtree, in pre-order.
    pub fn variables(&self) -> impl Iterator<Item = &Symbol> {
        self.pre_order().filter(|s| s.is_variable())
    }

    /// True if a node with identity `id` occurs in the subtree.
    pub fn contains_id(&self, id: SymbolId) -> bool {
        self.pre_order().any(|s| s.id() == id)
    }

    /// Rebuild the tree, substituting every node for which `f` returns `Some`.
    ///
    /// Substituted nodes are not descended into. Subtrees with no substitutions
    /// are shared with the original and keep their identity; rebuilt parents
    /// get fresh identities.
    pub fn replace<F>(&self, f: &mut F) -> Symbol
    where
        F: FnMut(&Symbol) -> Option<Symbol>,
    {
        if let Some(new) = f(self) {
            return new;
        }
        if self.children().is_empty() {
            return self.clone();
        }
        let children: Vec<Symbol> = self.children().iter().map(|c| c.replace(f)).collect();
        let unchanged = children
            .iter()
            .zip(self.children())
            .all(|(new, old)| new.same(old));
        if unchanged {
            return self.clone();
        }
        Symbol::from_parts(self.kind().clone(), children, self.domain().clone())
    }
}
