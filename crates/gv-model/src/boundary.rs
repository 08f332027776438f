//! Boundary conditions.

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use gv_expr::{Side, Symbol};
use serde::{Deserialize, Serialize};

use crate::error::{ModelError, ModelResult};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BcType {
    /// Prescribed value.
    Dirichlet,
    /// Prescribed flux.
    Neumann,
}

impl fmt::Display for BcType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BcType::Dirichlet => f.write_str("Dirichlet"),
            BcType::Neumann => f.write_str("Neumann"),
        }
    }
}

/// Exact, case-sensitive match on `"Dirichlet"` or `"Neumann"`.
impl FromStr for BcType {
    type Err = ModelError;

    fn from_str(s: &str) -> ModelResult<Self> {
        match s {
            "Dirichlet" => Ok(BcType::Dirichlet),
            "Neumann" => Ok(BcType::Neumann),
            other => Err(ModelError::InvalidBoundaryType {
                found: other.to_string(),
            }),
        }
    }
}

#[derive(Debug, Clone)]
pub struct BoundaryCondition {
    pub value: Symbol,
    pub kind: BcType,
}

/// Conditions on each side of one variable's domain.
#[derive(Debug, Clone, Default)]
pub struct BoundaryConditions {
    sides: BTreeMap<Side, BoundaryCondition>,
}

impl BoundaryConditions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the condition on `side` (builder style). Numbers become scalars.
    pub fn with(mut self, side: Side, value: impl Into<Symbol>, kind: BcType) -> Self {
        self.insert(side, value, kind);
        self
    }

    /// Like [`with`](Self::with) but with the type given by name.
    pub fn try_with(self, side: Side, value: impl Into<Symbol>, kind: &str) -> ModelResult<Self> {
        let kind = kind.parse()?;
        Ok(self.with(side, value, kind))
    }

    pub fn insert(&mut self, side: Side, value: impl Into<Symbol>, kind: BcType) {
        self.sides.insert(
            side,
            BoundaryCondition {
                value: value.into(),
                kind,
            },
        );
    }

    pub fn get(&self, side: Side) -> Option<&BoundaryCondition> {
        self.sides.get(&side)
    }

    pub fn iter(&self) -> impl Iterator<Item = (Side, &BoundaryCondition)> {
        self.sides.iter().map(|(s, bc)| (*s, bc))
    }

    /// Condition expressions, left side first.
    pub fn values(&self) -> impl Iterator<Item = &Symbol> {
        self.sides.values().map(|bc| &bc.value)
    }

    pub fn len(&self) -> usize {
        self.sides.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sides.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_exact_type_names() {
        assert_eq!("Dirichlet".parse::<BcType>().unwrap(), BcType::Dirichlet);
        assert_eq!("Neumann".parse::<BcType>().unwrap(), BcType::Neumann);
        for bad in ["dirichlet", "Robin", ""] {
            let err = bad.parse::<BcType>().unwrap_err();
            assert!(matches!(err, ModelError::InvalidBoundaryType { .. }));
        }
    }

    #[test]
    fn numbers_become_scalars() {
        let bcs = BoundaryConditions::new()
            .with(Side::Left, 0.0, BcType::Neumann)
            .try_with(Side::Right, 1.5, "Dirichlet")
            .unwrap();
        assert_eq!(bcs.len(), 2);
        let right = bcs.get(Side::Right).unwrap();
        assert_eq!(right.kind, BcType::Dirichlet);
        assert_eq!(right.value.to_string(), "1.5");
        let sides: Vec<_> = bcs.iter().map(|(s, _)| s).collect();
        assert_eq!(sides, vec![Side::Left, Side::Right]);
    }

    #[test]
    fn bad_type_name_is_rejected() {
        let err = BoundaryConditions::new()
            .try_with(Side::Left, 0.0, "Periodic")
            .unwrap_err();
        assert_eq!(
            err.to_string(),
            "boundary condition types must be Dirichlet or Neumann, not 'Periodic'"
        );
    }
}
