//! The model: symbolic equation dictionaries plus output variables and events.

use std::collections::BTreeMap;

use gv_core::Real;
use gv_expr::Symbol;
use nalgebra::{DMatrix, DVector};

use crate::boundary::BoundaryConditions;
use crate::equations::{Equations, SymbolMap};
use crate::error::{ModelError, ModelResult};
use crate::event::Event;
use crate::param::ParameterSet;
use crate::settings::ModelSettings;
use crate::variables::Variables;

const DEFAULT_NAME: &str = "Unnamed model";

/// Fields filled in by a discretiser once equations have been rewritten
/// onto the solution vector.
#[derive(Debug, Clone, Default)]
pub struct Discretised {
    pub concatenated_rhs: Option<Symbol>,
    pub concatenated_algebraic: Option<Symbol>,
    pub concatenated_initial_conditions: Option<DVector<Real>>,
    pub mass_matrix: Option<DMatrix<Real>>,
    /// Inverse mass matrix of the differential part.
    pub mass_matrix_inv: Option<DMatrix<Real>>,
    pub jacobian: Option<Symbol>,
    pub jacobian_rhs: Option<Symbol>,
    pub jacobian_algebraic: Option<Symbol>,
}

/// A system of differential and algebraic equations in symbolic form.
///
/// Equation dictionaries are keyed by variable identity. Setters normalise
/// numbers into scalar nodes and reject keys whose domain is incompatible
/// with their equation.
#[derive(Debug, Clone)]
pub struct Model {
    pub name: String,
    pub options: BTreeMap<String, String>,
    pub settings: ModelSettings,
    pub param: Option<ParameterSet>,
    /// Variables supplied by an outside coupling; exempt from determinacy checks.
    pub external_variables: Vec<Symbol>,
    pub discretised: Discretised,

    pub(crate) rhs: Equations,
    pub(crate) algebraic: Equations,
    pub(crate) initial_conditions: Equations,
    pub(crate) boundary_conditions: SymbolMap<BoundaryConditions>,
    pub(crate) variables: Variables,
    pub(crate) events: Vec<Event>,
}

impl Default for Model {
    fn default() -> Self {
        Self::new(DEFAULT_NAME)
    }
}

impl Model {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            options: BTreeMap::new(),
            settings: ModelSettings::default(),
            param: None,
            external_variables: Vec::new(),
            discretised: Discretised::default(),
            rhs: Equations::new(),
            algebraic: Equations::new(),
            initial_conditions: Equations::new(),
            boundary_conditions: SymbolMap::new(),
            variables: Variables::new(),
            events: Vec::new(),
        }
    }

    pub fn with_settings(mut self, settings: ModelSettings) -> Self {
        self.settings = settings;
        self
    }

    /// Empty model with the same name and settings, and `options` if given
    /// (otherwise the current options).
    pub fn new_copy(&self, options: Option<BTreeMap<String, String>>) -> Self {
        let mut model = Self::new(self.name.clone());
        model.options = options.unwrap_or_else(|| self.options.clone());
        model.settings = self.settings;
        model
    }

    pub fn rhs(&self) -> &Equations {
        &self.rhs
    }

    pub fn algebraic(&self) -> &Equations {
        &self.algebraic
    }

    pub fn initial_conditions(&self) -> &Equations {
        &self.initial_conditions
    }

    pub fn boundary_conditions(&self) -> &SymbolMap<BoundaryConditions> {
        &self.boundary_conditions
    }

    pub fn variables(&self) -> &Variables {
        &self.variables
    }

    pub fn events(&self) -> &[Event] {
        &self.events
    }

    /// Time derivative of `key`.
    pub fn rhs_of(&self, key: &Symbol) -> Option<&Symbol> {
        self.rhs.get(key)
    }

    pub fn variable_names(&self) -> Vec<&str> {
        self.variables.names().collect()
    }

    /// Output variable by exact name; a miss suggests close names.
    pub fn variable(&self, name: &str) -> ModelResult<Option<&Symbol>> {
        self.variables.lookup(name)
    }

    /// Replace the differential equations.
    pub fn set_rhs<I, E>(&mut self, entries: I) -> ModelResult<()>
    where
        I: IntoIterator<Item = (Symbol, E)>,
        E: Into<Symbol>,
    {
        self.rhs = build_dictionary(entries, "rhs")?;
        Ok(())
    }

    /// Replace the algebraic equations (each expression is constrained to zero).
    pub fn set_algebraic<I, E>(&mut self, entries: I) -> ModelResult<()>
    where
        I: IntoIterator<Item = (Symbol, E)>,
        E: Into<Symbol>,
    {
        self.algebraic = build_dictionary(entries, "algebraic")?;
        Ok(())
    }

    /// Replace the initial conditions (initial guesses for algebraic variables).
    pub fn set_initial_conditions<I, E>(&mut self, entries: I) -> ModelResult<()>
    where
        I: IntoIterator<Item = (Symbol, E)>,
        E: Into<Symbol>,
    {
        self.initial_conditions = build_dictionary(entries, "initial_conditions")?;
        Ok(())
    }

    pub fn set_boundary_conditions<I>(&mut self, entries: I)
    where
        I: IntoIterator<Item = (Symbol, BoundaryConditions)>,
    {
        self.boundary_conditions = entries.into_iter().collect();
    }

    pub fn set_variables(&mut self, variables: Variables) {
        self.variables = variables;
    }

    pub fn variables_mut(&mut self) -> &mut Variables {
        &mut self.variables
    }

    pub fn set_events(&mut self, events: Vec<Event>) {
        self.events = events;
    }

    pub fn push_event(&mut self, event: Event) {
        self.events.push(event);
    }

    /// Merge the physics of each submodel into this model, in order.
    ///
    /// For each submodel the four equation dictionaries are checked for
    /// keys already owned by this model before anything is merged, so a
    /// conflicting submodel leaves the model as it was after the previous
    /// one. Output variables merge without checks (later names win) and
    /// events are appended.
    pub fn update<'a, I>(&mut self, submodels: I) -> ModelResult<()>
    where
        I: IntoIterator<Item = &'a Model>,
    {
        for submodel in submodels {
            self.rhs.check_disjoint(&submodel.rhs, "rhs")?;
            self.algebraic.check_disjoint(&submodel.algebraic, "algebraic")?;
            self.initial_conditions
                .check_disjoint(&submodel.initial_conditions, "initial_conditions")?;
            self.boundary_conditions
                .check_disjoint(&submodel.boundary_conditions, "boundary_conditions")?;

            self.rhs.extend_from(&submodel.rhs);
            self.algebraic.extend_from(&submodel.algebraic);
            self.initial_conditions
                .extend_from(&submodel.initial_conditions);
            self.boundary_conditions
                .extend_from(&submodel.boundary_conditions);
            self.variables.extend_from(&submodel.variables);
            self.events.extend(submodel.events.iter().cloned());

            tracing::debug!(
                model = %self.name,
                submodel = %submodel.name,
                rhs = self.rhs.len(),
                algebraic = self.algebraic.len(),
                "merged submodel"
            );
        }
        Ok(())
    }
}

/// Collect `entries`, normalising numbers and checking key/equation domains.
fn build_dictionary<I, E>(entries: I, dictionary: &'static str) -> ModelResult<Equations>
where
    I: IntoIterator<Item = (Symbol, E)>,
    E: Into<Symbol>,
{
    let mut map = Equations::new();
    for (key, eqn) in entries {
        let eqn: Symbol = eqn.into();
        if !key.domain().is_compatible_with(eqn.domain()) {
            return Err(ModelError::DomainMismatch {
                dictionary,
                variable: key.to_string(),
                key_domain: key.domain().clone(),
                equation_domain: eqn.domain().clone(),
            });
        }
        map.insert(&key, eqn);
    }
    Ok(map)
}
