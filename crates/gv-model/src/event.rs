//! Solver events.

use gv_expr::Symbol;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EventType {
    /// Stop the simulation when the expression crosses zero.
    Termination,
    /// Tell the solver a discontinuity occurs when the expression crosses zero.
    Discontinuity,
}

/// Zero-crossing of an expression, passed through to the solver unchanged.
#[derive(Debug, Clone)]
pub struct Event {
    pub name: String,
    pub expression: Symbol,
    pub event_type: EventType,
}

impl Event {
    pub fn new(name: impl Into<String>, expression: impl Into<Symbol>, event_type: EventType) -> Self {
        Self {
            name: name.into(),
            expression: expression.into(),
            event_type,
        }
    }

    pub fn termination(name: impl Into<String>, expression: impl Into<Symbol>) -> Self {
        Self::new(name, expression, EventType::Termination)
    }

    pub fn discontinuity(name: impl Into<String>, expression: impl Into<Symbol>) -> Self {
        Self::new(name, expression, EventType::Discontinuity)
    }
}
