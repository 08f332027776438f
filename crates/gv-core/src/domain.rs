//! Domain tags.
//!
//! A domain is an ordered list of region names (e.g. `["negative electrode",
//! "separator"]`). The empty domain means "lives everywhere" and is
//! compatible with any other domain.

use core::fmt;

#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct Domain(Vec<String>);

impl Domain {
    /// The empty domain.
    pub fn empty() -> Self {
        Self(Vec::new())
    }

    pub fn new<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self(names.into_iter().map(Into::into).collect())
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn names(&self) -> &[String] {
        &self.0
    }

    pub fn contains(&self, name: &str) -> bool {
        self.0.iter().any(|n| n == name)
    }

    /// Equal, or at least one side is the empty domain.
    pub fn is_compatible_with(&self, other: &Domain) -> bool {
        self == other || self.is_empty() || other.is_empty()
    }

    /// Append the names of `other` that are not already present, keeping order.
    pub fn union(&self, other: &Domain) -> Domain {
        let mut names = self.0.clone();
        for name in &other.0 {
            if !names.contains(name) {
                names.push(name.clone());
            }
        }
        Domain(names)
    }
}

/// A single named domain; `""` gives the empty domain.
impl From<&str> for Domain {
    fn from(name: &str) -> Self {
        if name.is_empty() {
            return Self::empty();
        }
        Self(vec![name.to_string()])
    }
}

impl From<Vec<String>> for Domain {
    fn from(names: Vec<String>) -> Self {
        Self(names)
    }
}

impl<const N: usize> From<[&str; N]> for Domain {
    fn from(names: [&str; N]) -> Self {
        Self::new(names)
    }
}

impl fmt::Display for Domain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[")?;
        for (i, name) in self.0.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "'{}'", name)?;
        }
        write!(f, "]")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_is_compatible_with_everything() {
        let d = Domain::from("separator");
        assert!(Domain::empty().is_compatible_with(&d));
        assert!(d.is_compatible_with(&Domain::empty()));
        assert!(!d.is_compatible_with(&Domain::from("negative electrode")));
        assert!(Domain::from("").is_empty());
    }

    #[test]
    fn union_keeps_order_and_dedups() {
        let a = Domain::from(["negative electrode", "separator"]);
        let b = Domain::from(["separator", "positive electrode"]);
        assert_eq!(
            a.union(&b),
            Domain::from(["negative electrode", "separator", "positive electrode"])
        );
    }

    #[test]
    fn display_lists_names() {
        let d = Domain::from(["a", "b"]);
        assert_eq!(d.to_string(), "['a', 'b']");
    }
}
