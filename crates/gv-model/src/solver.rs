//! Default solver selection handed to the solver layer.

use std::fmt;

use crate::model::Model;

/// Family of time integrator a model should be solved with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SolverKind {
    /// General-purpose ODE integrator; the model has no algebraic equations.
    Ode,
    /// Sparse-direct DAE integrator; needs the Jacobian.
    SparseDae,
    /// Implicit DAE integrator in safe mode.
    SafeDae,
}

impl fmt::Display for SolverKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SolverKind::Ode => f.write_str("ODE solver"),
            SolverKind::SparseDae => f.write_str("sparse DAE solver"),
            SolverKind::SafeDae => f.write_str("DAE solver (safe mode)"),
        }
    }
}

impl Model {
    /// Pick a solver family from the equation structure and settings.
    pub fn default_solver(&self, sparse_dae_available: bool) -> SolverKind {
        if self.algebraic.is_empty() {
            SolverKind::Ode
        } else if sparse_dae_available && self.settings.use_jacobian {
            SolverKind::SparseDae
        } else {
            SolverKind::SafeDae
        }
    }
}
