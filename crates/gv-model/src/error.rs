//! Model assembly and verification errors.

use gv_core::{Domain, GvError};
use thiserror::Error;

pub type ModelResult<T> = Result<T, ModelError>;

#[derive(Error, Debug)]
pub enum ModelError {
    #[error(
        "variable '{variable}' and its equation in '{dictionary}' must have the same domain, \
         found {key_domain} and {equation_domain}"
    )]
    DomainMismatch {
        dictionary: &'static str,
        variable: String,
        key_domain: Domain,
        equation_domain: Domain,
    },

    #[error("model is overdetermined ({reason}): '{}'", .variables.join("', '"))]
    Overdetermined {
        reason: &'static str,
        variables: Vec<String>,
    },

    #[error("model is underdetermined (too many variables): '{}'", .variables.join("', '"))]
    Underdetermined { variables: Vec<String> },

    #[error("each variable in the algebraic eqn keys must appear in the eqn, '{variable}' does not")]
    AlgebraicKeyAbsent { variable: String },

    #[error("each algebraic equation must contain at least one StateVector, '{variable}' has none")]
    NoStateVector { variable: String },

    #[error("no initial condition given for variable '{variable}'")]
    MissingInitialCondition { variable: String },

    #[error("no boundary condition given for variable '{variable}' with equation '{equation}'")]
    MissingBoundaryCondition { variable: String, equation: String },

    #[error("submodel incompatible: duplicate variables in {dictionary}: '{}'", .variables.join("', '"))]
    DuplicateVariables {
        dictionary: &'static str,
        variables: Vec<String>,
    },

    #[error("boundary condition types must be Dirichlet or Neumann, not '{found}'")]
    InvalidBoundaryType { found: String },

    #[error(
        "no key set for variable '{variable}'; make sure it is included in either rhs, \
         algebraic or external_variables in an unmodified form (e.g. not broadcasted)"
    )]
    UnkeyedVariable { variable: String },

    #[error("'{name}' not found{}", suggestion_hint(.suggestions))]
    UnknownVariable {
        name: String,
        suggestions: Vec<String>,
    },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

fn suggestion_hint(suggestions: &[String]) -> String {
    if suggestions.is_empty() {
        String::new()
    } else {
        format!(", best matches are '{}'", suggestions.join("', '"))
    }
}

impl From<ModelError> for GvError {
    fn from(e: ModelError) -> Self {
        match e {
            ModelError::DomainMismatch { .. } => GvError::Domain {
                what: e.to_string(),
            },
            _ => GvError::Model {
                what: e.to_string(),
            },
        }
    }
}
