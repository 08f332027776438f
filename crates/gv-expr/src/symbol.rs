//! Core expression node types.

use core::fmt;
use core::ops::Range;
use std::sync::Arc;

use gv_core::{CoordSys, Domain, Real, SymbolId};

use crate::error::{ExprError, ExprResult};

/// Side of a one-dimensional domain.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Side {
    Left,
    Right,
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Side::Left => f.write_str("left"),
            Side::Right => f.write_str("right"),
        }
    }
}

/// Binary arithmetic operators.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BinaryOp {
    Add,
    Sub,
    Mul,
    Div,
    Pow,
}

impl BinaryOp {
    pub fn symbol(self) -> &'static str {
        match self {
            BinaryOp::Add => "+",
            BinaryOp::Sub => "-",
            BinaryOp::Mul => "*",
            BinaryOp::Div => "/",
            BinaryOp::Pow => "**",
        }
    }
}

/// What a node is, together with any data it carries beyond its children.
#[derive(Debug, Clone)]
pub enum SymbolKind {
    Scalar(Real),
    Parameter {
        name: String,
    },
    Time,
    /// A symbolic unknown of the model.
    Variable {
        name: String,
    },
    SpatialVariable {
        name: String,
        coord_sys: CoordSys,
    },
    /// Slices of the discretised solution vector; replaces `Variable` after discretisation.
    StateVector {
        name: String,
        y_slices: Vec<Range<usize>>,
    },
    Concatenation,
    Broadcast,
    Negate,
    Binary(BinaryOp),
    Gradient,
    Divergence,
    /// Integral of the single child over `integration_variable`.
    ///
    /// The integration variable is not a child and is not visited by traversal.
    Integral {
        integration_variable: Symbol,
    },
    BoundaryValue(Side),
}

/// Data-free discriminant of [`SymbolKind`], used for class membership tests.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SymbolClass {
    Scalar,
    Parameter,
    Time,
    Variable,
    SpatialVariable,
    StateVector,
    Concatenation,
    Broadcast,
    Negate,
    Binary,
    Gradient,
    Divergence,
    Integral,
    BoundaryValue,
}

impl SymbolKind {
    pub fn class(&self) -> SymbolClass {
        match self {
            SymbolKind::Scalar(_) => SymbolClass::Scalar,
            SymbolKind::Parameter { .. } => SymbolClass::Parameter,
            SymbolKind::Time => SymbolClass::Time,
            SymbolKind::Variable { .. } => SymbolClass::Variable,
            SymbolKind::SpatialVariable { .. } => SymbolClass::SpatialVariable,
            SymbolKind::StateVector { .. } => SymbolClass::StateVector,
            SymbolKind::Concatenation => SymbolClass::Concatenation,
            SymbolKind::Broadcast => SymbolClass::Broadcast,
            SymbolKind::Negate => SymbolClass::Negate,
            SymbolKind::Binary(_) => SymbolClass::Binary,
            SymbolKind::Gradient => SymbolClass::Gradient,
            SymbolKind::Divergence => SymbolClass::Divergence,
            SymbolKind::Integral { .. } => SymbolClass::Integral,
            SymbolKind::BoundaryValue(_) => SymbolClass::BoundaryValue,
        }
    }
}

#[derive(Debug)]
struct Node {
    id: SymbolId,
    kind: SymbolKind,
    children: Vec<Symbol>,
    domain: Domain,
}

/// Handle to an immutable expression node.
///
/// Cloning shares the node and therefore its identity. Every constructor
/// allocates a fresh [`SymbolId`], so two structurally identical expressions
/// built separately are distinct entities. Equality and hashing compare ids only.
#[derive(Clone)]
pub struct Symbol(Arc<Node>);

impl Symbol {
    pub(crate) fn from_parts(kind: SymbolKind, children: Vec<Symbol>, domain: Domain) -> Self {
        Symbol(Arc::new(Node {
            id: SymbolId::fresh(),
            kind,
            children,
            domain,
        }))
    }

    fn leaf(kind: SymbolKind, domain: Domain) -> Self {
        Self::from_parts(kind, Vec::new(), domain)
    }

    pub fn scalar(value: Real) -> Self {
        Self::leaf(SymbolKind::Scalar(value), Domain::empty())
    }

    pub fn parameter(name: impl Into<String>) -> Self {
        Self::leaf(SymbolKind::Parameter { name: name.into() }, Domain::empty())
    }

    pub fn time() -> Self {
        Self::leaf(SymbolKind::Time, Domain::empty())
    }

    pub fn variable(name: impl Into<String>, domain: impl Into<Domain>) -> Self {
        Self::leaf(SymbolKind::Variable { name: name.into() }, domain.into())
    }

    pub fn spatial_variable(
        name: impl Into<String>,
        domain: impl Into<Domain>,
        coord_sys: CoordSys,
    ) -> ExprResult<Self> {
        let name = name.into();
        let domain = domain.into();
        if domain.is_empty() {
            return Err(ExprError::EmptySpatialDomain { name });
        }
        Ok(Self::leaf(
            SymbolKind::SpatialVariable { name, coord_sys },
            domain,
        ))
    }

    pub fn state_vector(
        name: impl Into<String>,
        y_slices: Vec<Range<usize>>,
        domain: impl Into<Domain>,
    ) -> Self {
        Self::leaf(
            SymbolKind::StateVector {
                name: name.into(),
                y_slices,
            },
            domain.into(),
        )
    }

    /// Concatenate children whose domains are pairwise disjoint.
    pub fn concatenation(children: Vec<Symbol>) -> ExprResult<Self> {
        if children.is_empty() {
            return Err(ExprError::EmptyConcatenation);
        }
        let mut domain = Domain::empty();
        for child in &children {
            for name in child.domain().names() {
                if domain.contains(name) {
                    return Err(ExprError::OverlappingConcatenation { name: name.clone() });
                }
            }
            domain = domain.union(child.domain());
        }
        Ok(Self::from_parts(SymbolKind::Concatenation, children, domain))
    }

    pub fn broadcast(child: &Symbol, domain: impl Into<Domain>) -> Self {
        Self::from_parts(SymbolKind::Broadcast, vec![child.clone()], domain.into())
    }

    pub fn gradient(child: &Symbol) -> Self {
        Self::unary(SymbolKind::Gradient, child)
    }

    pub fn divergence(child: &Symbol) -> Self {
        Self::unary(SymbolKind::Divergence, child)
    }

    pub fn negate(child: &Symbol) -> Self {
        Self::unary(SymbolKind::Negate, child)
    }

    /// Integrate `child` over a spatial variable. The result has no domain.
    pub fn integral(child: &Symbol, integration_variable: &Symbol) -> ExprResult<Self> {
        if integration_variable.class() != SymbolClass::SpatialVariable {
            return Err(ExprError::InvalidIntegrationVariable {
                found: integration_variable.to_string(),
            });
        }
        Ok(Self::from_parts(
            SymbolKind::Integral {
                integration_variable: integration_variable.clone(),
            },
            vec![child.clone()],
            Domain::empty(),
        ))
    }

    /// Value of `child` on one side of its domain. The result has no domain.
    pub fn boundary_value(child: &Symbol, side: Side) -> Self {
        Self::from_parts(
            SymbolKind::BoundaryValue(side),
            vec![child.clone()],
            Domain::empty(),
        )
    }

    fn unary(kind: SymbolKind, child: &Symbol) -> Self {
        let domain = child.domain().clone();
        Self::from_parts(kind, vec![child.clone()], domain)
    }

    /// Combine two operands, rejecting operands that live on different domains.
    pub fn try_binary(op: BinaryOp, left: &Symbol, right: &Symbol) -> ExprResult<Self> {
        if !left.domain().is_compatible_with(right.domain()) {
            return Err(ExprError::DomainMismatch {
                op: op.symbol(),
                left: left.domain().clone(),
                right: right.domain().clone(),
            });
        }
        Ok(Self::binary(op, left, right))
    }

    /// Combine two operands; the result takes the left domain unless it is empty.
    pub(crate) fn binary(op: BinaryOp, left: &Symbol, right: &Symbol) -> Self {
        let domain = if left.domain().is_empty() {
            right.domain().clone()
        } else {
            left.domain().clone()
        };
        Self::from_parts(
            SymbolKind::Binary(op),
            vec![left.clone(), right.clone()],
            domain,
        )
    }

    pub fn id(&self) -> SymbolId {
        self.0.id
    }

    pub fn kind(&self) -> &SymbolKind {
        &self.0.kind
    }

    pub fn class(&self) -> SymbolClass {
        self.0.kind.class()
    }

    pub fn children(&self) -> &[Symbol] {
        &self.0.children
    }

    pub fn domain(&self) -> &Domain {
        &self.0.domain
    }

    /// Name of named leaves (variables, parameters, state vectors).
    pub fn name(&self) -> Option<&str> {
        match &self.0.kind {
            SymbolKind::Parameter { name }
            | SymbolKind::Variable { name }
            | SymbolKind::SpatialVariable { name, .. }
            | SymbolKind::StateVector { name, .. } => Some(name),
            _ => None,
        }
    }

    pub fn is_variable(&self) -> bool {
        self.class() == SymbolClass::Variable
    }

    pub fn is_concatenation(&self) -> bool {
        self.class() == SymbolClass::Concatenation
    }

    /// Coordinate system of a spatial variable.
    pub fn coord_sys(&self) -> Option<CoordSys> {
        match &self.0.kind {
            SymbolKind::SpatialVariable { coord_sys, .. } => Some(*coord_sys),
            _ => None,
        }
    }

    /// Same entity (identity, not structure).
    pub fn same(&self, other: &Symbol) -> bool {
        self.id() == other.id()
    }
}

impl PartialEq for Symbol {
    fn eq(&self, other: &Self) -> bool {
        self.same(other)
    }
}

impl Eq for Symbol {}

impl core::hash::Hash for Symbol {
    fn hash<H: core::hash::Hasher>(&self, state: &mut H) {
        self.id().hash(state);
    }
}

impl From<Real> for Symbol {
    fn from(value: Real) -> Self {
        Symbol::scalar(value)
    }
}

impl From<&Symbol> for Symbol {
    fn from(symbol: &Symbol) -> Self {
        symbol.clone()
    }
}

impl fmt::Debug for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}({}, id={})", self.class(), self, self.id())
    }
}

impl fmt::Display for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let children = self.children();
        match self.kind() {
            SymbolKind::Scalar(v) => write!(f, "{}", v),
            SymbolKind::Time => f.write_str("t"),
            SymbolKind::Parameter { name }
            | SymbolKind::Variable { name }
            | SymbolKind::SpatialVariable { name, .. } => f.write_str(name),
            SymbolKind::StateVector { y_slices, .. } => {
                f.write_str("y[")?;
                for (i, s) in y_slices.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{}:{}", s.start, s.end)?;
                }
                f.write_str("]")
            }
            SymbolKind::Concatenation => {
                f.write_str("concatenation(")?;
                for (i, c) in children.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{}", c)?;
                }
                f.write_str(")")
            }
            SymbolKind::Broadcast => write!(f, "broadcast({})", children[0]),
            SymbolKind::Negate => write!(f, "-{}", children[0]),
            SymbolKind::Binary(op) => {
                write!(f, "({} {} {})", children[0], op.symbol(), children[1])
            }
            SymbolKind::Gradient => write!(f, "grad({})", children[0]),
            SymbolKind::Divergence => write!(f, "div({})", children[0]),
            SymbolKind::Integral {
                integration_variable,
            } => write!(f, "integral({} d{})", children[0], integration_variable),
            SymbolKind::BoundaryValue(side) => {
                write!(f, "boundary value({}, {})", children[0], side)
            }
        }
    }
}
