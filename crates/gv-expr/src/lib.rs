//! gv-expr: symbolic expression trees for galvani models.
//!
//! Provides:
//! - `Symbol`, a cheaply clonable handle to an immutable node with a stable identity
//! - A closed set of node kinds (`SymbolKind`) and their data-free classes (`SymbolClass`)
//! - Lazy pre-order traversal and class membership tests
//! - Arithmetic operator overloads for assembling equations
//!
//! # Example
//!
//! ```
//! use gv_expr::{Symbol, SymbolClass};
//!
//! let c = Symbol::variable("c", "negative electrode");
//! let flux = Symbol::gradient(&c);
//! let dcdt = Symbol::divergence(&flux) * 2.0;
//!
//! assert!(dcdt.has_symbol_of_classes(&[SymbolClass::Divergence]));
//! assert_eq!(dcdt.variables().next().map(|v| v.id()), Some(c.id()));
//! ```

pub mod error;
pub mod ops;
pub mod symbol;
pub mod traversal;

// Re-exports for ergonomics
pub use error::{ExprError, ExprResult};
pub use symbol::{BinaryOp, Side, Symbol, SymbolClass, SymbolKind};
pub use traversal::PreOrder;
