//! Arithmetic operator overloads.
//!
//! Operators never fail: when both operands carry different non-empty
//! domains the result takes the left one. Use [`Symbol::try_binary`] when
//! the mismatch must be reported.

use gv_core::Real;

use crate::symbol::{BinaryOp, Symbol};

macro_rules! impl_binary_op {
    ($trait:ident, $method:ident, $op:expr) => {
        impl std::ops::$trait<Symbol> for Symbol {
            type Output = Symbol;
            fn $method(self, rhs: Symbol) -> Symbol {
                Symbol::binary($op, &self, &rhs)
            }
        }

        impl std::ops::$trait<&Symbol> for &Symbol {
            type Output = Symbol;
            fn $method(self, rhs: &Symbol) -> Symbol {
                Symbol::binary($op, self, rhs)
            }
        }

        impl std::ops::$trait<&Symbol> for Symbol {
            type Output = Symbol;
            fn $method(self, rhs: &Symbol) -> Symbol {
                Symbol::binary($op, &self, rhs)
            }
        }

        impl std::ops::$trait<Symbol> for &Symbol {
            type Output = Symbol;
            fn $method(self, rhs: Symbol) -> Symbol {
                Symbol::binary($op, self, &rhs)
            }
        }

        impl std::ops::$trait<Real> for Symbol {
            type Output = Symbol;
            fn $method(self, rhs: Real) -> Symbol {
                Symbol::binary($op, &self, &Symbol::scalar(rhs))
            }
        }

        impl std::ops::$trait<Real> for &Symbol {
            type Output = Symbol;
            fn $method(self, rhs: Real) -> Symbol {
                Symbol::binary($op, self, &Symbol::scalar(rhs))
            }
        }

        impl std::ops::$trait<Symbol> for Real {
            type Output = Symbol;
            fn $method(self, rhs: Symbol) -> Symbol {
                Symbol::binary($op, &Symbol::scalar(self), &rhs)
            }
        }
    };
}

impl_binary_op!(Add, add, BinaryOp::Add);
impl_binary_op!(Sub, sub, BinaryOp::Sub);
impl_binary_op!(Mul, mul, BinaryOp::Mul);
impl_binary_op!(Div, div, BinaryOp::Div);

impl std::ops::Neg for Symbol {
    type Output = Symbol;
    fn neg(self) -> Symbol {
        Symbol::negate(&self)
    }
}

impl std::ops::Neg for &Symbol {
    type Output = Symbol;
    fn neg(self) -> Symbol {
        Symbol::negate(self)
    }
}

impl Symbol {
    pub fn pow(&self, exponent: impl Into<Symbol>) -> Symbol {
        Symbol::binary(BinaryOp::Pow, self, &exponent.into())
    }
}
