//! Well-posedness verification.
//!
//! Checks run in a fixed order and stop at the first structural error:
//!
//! 1. [`Model::check_well_determined`]: every unknown has exactly one equation
//! 2. [`Model::check_algebraic_equations`]: algebraic equations involve their key
//! 3. [`Model::check_ics_bcs`]: initial and boundary conditions are present
//! 4. [`Model::check_default_variables_dictionaries`]: unsupplied outputs are dropped
//! 5. [`Model::check_variables`]: outputs only use keyed variables (debug mode,
//!    before discretisation)
//!
//! After discretisation, keys are still `Variable` nodes but equation bodies
//! refer to `StateVector` slices instead, so identity matching between keys
//! and bodies is relaxed where it would no longer hold.

use std::collections::HashSet;

use gv_core::SymbolId;
use gv_core::timing::{Timer, stage_timing};
use gv_expr::{Symbol, SymbolClass};

use crate::error::{ModelError, ModelResult};
use crate::model::Model;

/// Non-fatal findings of a successful verification.
#[derive(Debug, Clone, PartialEq)]
pub enum ModelWarning {
    /// Output variables that were declared but never supplied; they have
    /// been removed from the model.
    MissingOutputVariables { names: Vec<String> },
}

/// Outcome of [`Model::check_well_posedness`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct WellPosedness {
    pub warnings: Vec<ModelWarning>,
}

impl WellPosedness {
    pub fn is_clean(&self) -> bool {
        self.warnings.is_empty()
    }
}

/// Identities of every `Variable` node in `symbol`.
fn variable_ids(symbol: &Symbol) -> impl Iterator<Item = SymbolId> + '_ {
    symbol.variables().map(Symbol::id)
}

fn names_of(symbols: &[&Symbol]) -> Vec<String> {
    symbols.iter().map(|s| s.to_string()).collect()
}

impl Model {
    /// Verify the model, before (`post_discretisation == false`) or after an
    /// external discretisation pass.
    ///
    /// Unsupplied output variables are removed and reported as warnings;
    /// every other problem is an error.
    pub fn check_well_posedness(&mut self, post_discretisation: bool) -> ModelResult<WellPosedness> {
        let timer = Timer::start("well-posedness");
        tracing::debug!(model = %self.name, post_discretisation, "checking well-posedness");

        self.check_well_determined(post_discretisation)?;
        self.check_algebraic_equations(post_discretisation)?;
        self.check_ics_bcs()?;

        let mut report = WellPosedness::default();
        if let Some(warning) = self.check_default_variables_dictionaries() {
            report.warnings.push(warning);
        }

        // Outputs cannot be matched by identity once variables are rewritten
        if self.settings.debug_mode && !post_discretisation {
            self.check_variables()?;
        }

        timer.stop_and_record(&stage_timing::WELL_POSEDNESS);
        Ok(report)
    }

    /// Fail if the model has more equations than unknowns or vice versa.
    pub fn check_well_determined(&self, post_discretisation: bool) -> ModelResult<()> {
        let mut vars_in_rhs_keys: HashSet<SymbolId> = HashSet::new();
        let mut vars_in_algebraic_keys: HashSet<SymbolId> = HashSet::new();
        let mut vars_in_eqns: HashSet<SymbolId> = HashSet::new();

        // Keys may be concatenations, so look through the whole key tree too
        for (var, eqn) in self.rhs.iter() {
            vars_in_rhs_keys.extend(variable_ids(var));
            vars_in_eqns.extend(variable_ids(eqn));
        }
        for (var, eqn) in self.algebraic.iter() {
            vars_in_algebraic_keys.extend(variable_ids(var));
            vars_in_eqns.extend(variable_ids(eqn));
        }
        for bcs in self.boundary_conditions.values() {
            for value in bcs.values() {
                vars_in_eqns.extend(variable_ids(value));
            }
        }
        tracing::debug!(
            rhs_keys = vars_in_rhs_keys.len(),
            algebraic_keys = vars_in_algebraic_keys.len(),
            in_equations = vars_in_eqns.len(),
            "collected variable identities"
        );

        let repeated = self.variables_with_ids(|id| {
            vars_in_rhs_keys.contains(&id) && vars_in_algebraic_keys.contains(&id)
        });
        if !repeated.is_empty() {
            return Err(ModelError::Overdetermined {
                reason: "repeated keys",
                variables: names_of(&repeated),
            });
        }

        // rhs keys may be absent from the equations (dc/dt = -1 is fine)
        if !post_discretisation {
            let extra = self.variables_with_ids(|id| {
                vars_in_algebraic_keys.contains(&id) && !vars_in_eqns.contains(&id)
            });
            if !extra.is_empty() {
                return Err(ModelError::Overdetermined {
                    reason: "extra algebraic keys",
                    variables: names_of(&extra),
                });
            }
        }

        // Only external concatenations are expanded into their children here
        let mut external_ids: HashSet<SymbolId> = HashSet::new();
        for var in &self.external_variables {
            external_ids.insert(var.id());
            if var.is_concatenation() {
                external_ids.extend(var.children().iter().map(Symbol::id));
            }
        }

        let unbound = self.variables_with_ids(|id| {
            vars_in_eqns.contains(&id)
                && !vars_in_rhs_keys.contains(&id)
                && !vars_in_algebraic_keys.contains(&id)
                && !external_ids.contains(&id)
        });
        if !unbound.is_empty() {
            return Err(ModelError::Underdetermined {
                variables: names_of(&unbound),
            });
        }
        Ok(())
    }

    /// Fail if an algebraic equation does not involve its unknown.
    ///
    /// Before discretisation each key must appear in its own equation, in a
    /// boundary condition, or be a concatenation. After discretisation each
    /// equation must reference the solution vector.
    pub fn check_algebraic_equations(&self, post_discretisation: bool) -> ModelResult<()> {
        if post_discretisation {
            for (var, eqn) in self.algebraic.iter() {
                if !eqn.has_symbol_of_classes(&[SymbolClass::StateVector]) {
                    return Err(ModelError::NoStateVector {
                        variable: var.to_string(),
                    });
                }
            }
            return Ok(());
        }

        let vars_in_bcs: HashSet<SymbolId> = self
            .boundary_conditions
            .values()
            .flat_map(|bcs| bcs.values())
            .flat_map(|value| variable_ids(value))
            .collect();

        for (var, eqn) in self.algebraic.iter() {
            let present = eqn.contains_id(var.id())
                || vars_in_bcs.contains(&var.id())
                || var.is_concatenation();
            if !present {
                return Err(ModelError::AlgebraicKeyAbsent {
                    variable: var.to_string(),
                });
            }
        }
        Ok(())
    }

    /// Fail if a differential unknown has no initial condition, or a spatial
    /// equation has no boundary condition.
    ///
    /// Equations containing an integral (averaged or lumped quantities) do
    /// not need boundary conditions.
    pub fn check_ics_bcs(&self) -> ModelResult<()> {
        for var in self.rhs.keys() {
            if !self.initial_conditions.contains_key(var) {
                return Err(ModelError::MissingInitialCondition {
                    variable: var.to_string(),
                });
            }
        }

        for (var, eqn) in self.rhs.iter().chain(self.algebraic.iter()) {
            let spatial = eqn.has_symbol_of_classes(&[SymbolClass::Gradient, SymbolClass::Divergence]);
            if !spatial || eqn.has_symbol_of_classes(&[SymbolClass::Integral]) {
                continue;
            }
            let has_bc = self
                .boundary_conditions
                .keys()
                .any(|key| key.contains_id(var.id()));
            if !has_bc {
                return Err(ModelError::MissingBoundaryCondition {
                    variable: var.to_string(),
                    equation: eqn.to_string(),
                });
            }
        }
        Ok(())
    }

    /// Drop output variables that were declared but never supplied.
    ///
    /// Emits one warning covering all of them and returns it.
    pub fn check_default_variables_dictionaries(&mut self) -> Option<ModelWarning> {
        let missing = self.variables.remove_unset();
        if missing.is_empty() {
            return None;
        }
        tracing::warn!(
            model = %self.name,
            missing = ?missing,
            "standard output variables have not been supplied; they may be \
             required for testing or comparison with other models"
        );
        Some(ModelWarning::MissingOutputVariables { names: missing })
    }

    /// Fail if an output variable uses a `Variable` that is not a key of
    /// rhs or algebraic, nor external.
    ///
    /// Concatenation keys count through their direct children.
    pub fn check_variables(&self) -> ModelResult<()> {
        let mut keyed: HashSet<SymbolId> = HashSet::new();
        let keys = self
            .rhs
            .keys()
            .chain(self.algebraic.keys())
            .chain(self.external_variables.iter());
        for var in keys {
            if var.is_variable() {
                keyed.insert(var.id());
            } else if var.is_concatenation() {
                keyed.extend(var.children().iter().map(Symbol::id));
            }
        }

        for eqn in self.variables.expressions() {
            if let Some(var) = eqn.variables().find(|v| !keyed.contains(&v.id())) {
                return Err(ModelError::UnkeyedVariable {
                    variable: var.to_string(),
                });
            }
        }
        Ok(())
    }

    /// `Variable` nodes of equations, conditions and keys whose identity
    /// satisfies `pred`, first occurrence only, in model order.
    fn variables_with_ids<F>(&self, pred: F) -> Vec<&Symbol>
    where
        F: Fn(SymbolId) -> bool,
    {
        let mut seen: HashSet<SymbolId> = HashSet::new();
        let trees = self
            .rhs
            .iter()
            .chain(self.algebraic.iter())
            .flat_map(|(k, e)| [k, e])
            .chain(self.boundary_conditions.values().flat_map(|bcs| bcs.values()));
        let mut found = Vec::new();
        for tree in trees {
            for var in tree.variables() {
                if pred(var.id()) && seen.insert(var.id()) {
                    found.push(var);
                }
            }
        }
        found
    }
}
