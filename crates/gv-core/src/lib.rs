//! gv-core: stable foundation for galvani.
//!
//! Contains:
//! - numeric (Real + tolerances + float helpers)
//! - ids (stable compact IDs for expression nodes and model objects)
//! - domain (domain tags shared by expressions and meshes)
//! - coord (coordinate systems of spatial axes)
//! - error (shared error types)
//! - timing (opt-in elapsed-time reporting)

pub mod coord;
pub mod domain;
pub mod error;
pub mod ids;
pub mod numeric;
pub mod timing;

// Re-exports: nice ergonomics for downstream crates
pub use coord::CoordSys;
pub use domain::Domain;
pub use error::{GvError, GvResult};
pub use ids::*;
pub use numeric::*;
