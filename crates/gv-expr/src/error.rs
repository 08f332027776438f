//! Expression construction errors.

use gv_core::{Domain, GvError};
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ExprError {
    #[error("children of '{op}' have incompatible domains {left} and {right}")]
    DomainMismatch {
        op: &'static str,
        left: Domain,
        right: Domain,
    },

    #[error("domain of concatenated children must be disjoint, '{name}' repeats")]
    OverlappingConcatenation { name: String },

    #[error("cannot concatenate zero children")]
    EmptyConcatenation,

    #[error("spatial variable '{name}' must have a domain")]
    EmptySpatialDomain { name: String },

    #[error("integration variable must be a spatial variable, not '{found}'")]
    InvalidIntegrationVariable { found: String },
}

pub type ExprResult<T> = Result<T, ExprError>;

impl From<ExprError> for GvError {
    fn from(e: ExprError) -> Self {
        match e {
            ExprError::DomainMismatch { .. } | ExprError::OverlappingConcatenation { .. } => {
                GvError::Domain {
                    what: e.to_string(),
                }
            }
            _ => GvError::Invariant {
                what: e.to_string(),
            },
        }
    }
}
