//! Mesh-specific error types.

use gv_core::{GvError, Real};

/// Mesh construction and combination errors.
#[derive(Debug, Clone, PartialEq)]
pub enum MeshError {
    /// The geometry uses a variable with no entry in the points specification.
    MissingPoints { domain: String, variable: String },

    /// Submeshes cannot be combined (misaligned edges, coordinate systems, repeat counts).
    DomainMismatch { what: String },

    /// No submeshes exist for the requested domain.
    UnknownDomain { domain: String },

    /// The geometry declares a domain with no submesh factory.
    MissingFactory { domain: String },

    /// Edges or point counts do not describe a valid submesh.
    InvalidSubmesh { what: String },

    /// Region bounds are not finite or not increasing.
    InvalidBounds { variable: String, min: Real, max: Real },

    /// Combination requested with no domains.
    EmptyCombination,

    /// Mesh configuration could not be read or resolved.
    Config { what: String },
}

pub type MeshResult<T> = Result<T, MeshError>;

impl std::fmt::Display for MeshError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MeshError::MissingPoints { domain, variable } => {
                write!(
                    f,
                    "Points not given for variable '{}' in domain '{}'",
                    variable, domain
                )
            }
            MeshError::DomainMismatch { what } => write!(f, "Domain error: {}", what),
            MeshError::UnknownDomain { domain } => {
                write!(f, "No submeshes for domain '{}'", domain)
            }
            MeshError::MissingFactory { domain } => {
                write!(f, "No submesh type given for domain '{}'", domain)
            }
            MeshError::InvalidSubmesh { what } => write!(f, "Invalid submesh: {}", what),
            MeshError::InvalidBounds { variable, min, max } if variable.is_empty() => {
                write!(
                    f,
                    "Invalid bounds: min={} must be finite and below max={}",
                    min, max
                )
            }
            MeshError::InvalidBounds { variable, min, max } => {
                write!(
                    f,
                    "Invalid bounds for '{}': min={} must be finite and below max={}",
                    variable, min, max
                )
            }
            MeshError::EmptyCombination => write!(f, "No submeshes given to combine"),
            MeshError::Config { what } => write!(f, "Mesh configuration error: {}", what),
        }
    }
}

impl std::error::Error for MeshError {}

impl From<GvError> for MeshError {
    fn from(err: GvError) -> Self {
        MeshError::InvalidSubmesh {
            what: err.to_string(),
        }
    }
}

impl From<serde_yaml::Error> for MeshError {
    fn from(err: serde_yaml::Error) -> Self {
        MeshError::Config {
            what: err.to_string(),
        }
    }
}

impl From<std::io::Error> for MeshError {
    fn from(err: std::io::Error) -> Self {
        MeshError::Config {
            what: err.to_string(),
        }
    }
}

impl From<MeshError> for GvError {
    fn from(err: MeshError) -> Self {
        match err {
            MeshError::DomainMismatch { what } => GvError::Domain { what },
            other => GvError::Invariant {
                what: other.to_string(),
            },
        }
    }
}
