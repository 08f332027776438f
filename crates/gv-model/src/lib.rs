//! gv-model: symbolic models and their well-posedness checks.
//!
//! Provides:
//! - `Model`: identity-keyed rhs / algebraic / initial / boundary dictionaries,
//!   output variables and events
//! - `Model::update` for merging submodels, with duplicate ownership detection
//! - `Model::check_well_posedness`, run before and after discretisation
//! - `ModelSettings` (YAML/JSON) and the default solver policy
//!
//! # Example
//!
//! ```
//! use gv_expr::{Side, Symbol};
//! use gv_model::{BcType, BoundaryConditions, Model};
//!
//! let c = Symbol::variable("c", "negative electrode");
//! let mut model = Model::new("diffusion");
//! model
//!     .set_rhs([(c.clone(), Symbol::divergence(&Symbol::gradient(&c)))])
//!     .unwrap();
//! model.set_initial_conditions([(c.clone(), 1.0)]).unwrap();
//! model.set_boundary_conditions([(
//!     c.clone(),
//!     BoundaryConditions::new()
//!         .with(Side::Left, 0.0, BcType::Neumann)
//!         .with(Side::Right, 0.0, BcType::Neumann),
//! )]);
//!
//! let report = model.check_well_posedness(false).unwrap();
//! assert!(report.is_clean());
//! ```

pub mod boundary;
pub mod equations;
pub mod error;
pub mod event;
pub mod model;
pub mod param;
pub mod settings;
pub mod solver;
pub mod variables;
pub mod well_posedness;

pub use boundary::{BcType, BoundaryCondition, BoundaryConditions};
pub use equations::{Equations, SymbolMap};
pub use error::{ModelError, ModelResult};
pub use event::{Event, EventType};
pub use model::{Discretised, Model};
pub use param::ParameterSet;
pub use settings::{ConvertFormat, ModelSettings};
pub use solver::SolverKind;
pub use variables::Variables;
pub use well_posedness::{ModelWarning, WellPosedness};
