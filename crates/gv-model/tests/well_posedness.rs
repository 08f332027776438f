//! Well-posedness checks on small battery-style models.

use std::collections::HashMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use gv_core::{CoordSys, SymbolId};
use gv_expr::{Side, Symbol};
use gv_model::{
    BcType, BoundaryConditions, Model, ModelError, ModelSettings, ModelWarning, Variables,
};
use nalgebra::DMatrix;
use proptest::prelude::*;
use tracing::Level;
use tracing_subscriber::layer::{Context, SubscriberExt};
use tracing_subscriber::Layer;

/// Counts warnings emitted while installed.
#[derive(Clone, Default)]
struct WarnCounter(Arc<AtomicUsize>);

impl<S: tracing::Subscriber> Layer<S> for WarnCounter {
    fn on_event(&self, event: &tracing::Event<'_>, _ctx: Context<'_, S>) {
        if *event.metadata().level() == Level::WARN {
            self.0.fetch_add(1, Ordering::SeqCst);
        }
    }
}

impl WarnCounter {
    /// Run `f` with this counter as the thread's subscriber.
    fn capture<T>(&self, f: impl FnOnce() -> T) -> T {
        let subscriber = tracing_subscriber::registry().with(self.clone());
        tracing::subscriber::with_default(subscriber, f)
    }

    fn count(&self) -> usize {
        self.0.load(Ordering::SeqCst)
    }
}

fn neumann() -> BoundaryConditions {
    BoundaryConditions::new()
        .with(Side::Left, 0.0, BcType::Neumann)
        .with(Side::Right, 0.0, BcType::Neumann)
}

fn diffusion(c: &Symbol) -> Symbol {
    Symbol::divergence(&Symbol::gradient(c))
}

/// Particle diffusion with a potential solved algebraically.
fn spm_like() -> (Model, Symbol, Symbol) {
    let c = Symbol::variable("c", "negative particle");
    let phi = Symbol::variable("phi", "");
    let mut model = Model::new("spm");
    model.set_rhs([(c.clone(), diffusion(&c))]).unwrap();
    model.set_algebraic([(phi.clone(), &phi - 1.0)]).unwrap();
    model
        .set_initial_conditions([(c.clone(), 1.0), (phi.clone(), 0.0)])
        .unwrap();
    model.set_boundary_conditions([(c.clone(), neumann())]);
    (model, c, phi)
}

#[test]
fn well_posed_model_passes() {
    let (mut model, _, _) = spm_like();
    let report = model.check_well_posedness(false).unwrap();
    assert!(report.is_clean());
}

#[test]
fn missing_initial_condition_round_trip() {
    let c = Symbol::variable("c", "");
    let mut model = Model::new("decay");
    model.set_rhs([(c.clone(), -&c)]).unwrap();

    let err = model.check_well_posedness(false).unwrap_err();
    match err {
        ModelError::MissingInitialCondition { variable } => assert_eq!(variable, "c"),
        other => panic!("unexpected error: {other}"),
    }

    model.set_initial_conditions([(c.clone(), 1.0)]).unwrap();
    assert!(model.check_well_posedness(false).is_ok());
}

#[test]
fn initial_conditions_match_by_identity() {
    let c = Symbol::variable("c", "");
    let lookalike = Symbol::variable("c", "");
    let mut model = Model::new("decay");
    model.set_rhs([(c.clone(), -&c)]).unwrap();
    model.set_initial_conditions([(lookalike, 1.0)]).unwrap();
    assert!(matches!(
        model.check_ics_bcs(),
        Err(ModelError::MissingInitialCondition { .. })
    ));
}

#[test]
fn repeated_keys_are_overdetermined() {
    let c = Symbol::variable("c", "");
    let mut model = Model::new("m");
    model.set_rhs([(c.clone(), 1.0)]).unwrap();
    model.set_algebraic([(c.clone(), &c - 1.0)]).unwrap();
    model.set_initial_conditions([(c.clone(), 0.0)]).unwrap();

    match model.check_well_posedness(false).unwrap_err() {
        ModelError::Overdetermined { reason, variables } => {
            assert_eq!(reason, "repeated keys");
            assert_eq!(variables, vec!["c".to_string()]);
        }
        other => panic!("unexpected error: {other}"),
    }
    // still overdetermined after discretisation
    assert!(matches!(
        model.check_well_determined(true),
        Err(ModelError::Overdetermined { .. })
    ));
}

#[test]
fn concatenated_keys_overlap_by_child() {
    let a = Symbol::variable("a", "negative electrode");
    let b = Symbol::variable("b", "separator");
    let ab = Symbol::concatenation(vec![a.clone(), b.clone()]).unwrap();
    let mut model = Model::new("m");
    model.set_rhs([(ab.clone(), 1.0)]).unwrap();
    model.set_algebraic([(b.clone(), &b * 2.0)]).unwrap();
    assert!(matches!(
        model.check_well_determined(false),
        Err(ModelError::Overdetermined { .. })
    ));
}

#[test]
fn unused_algebraic_key_is_overdetermined_only_before_discretisation() {
    let phi = Symbol::variable("phi", "");
    let mut model = Model::new("m");
    model.set_algebraic([(phi.clone(), 1.0)]).unwrap();

    match model.check_well_determined(false).unwrap_err() {
        ModelError::Overdetermined { reason, .. } => assert_eq!(reason, "extra algebraic keys"),
        other => panic!("unexpected error: {other}"),
    }
    assert!(model.check_well_determined(true).is_ok());
}

#[test]
fn unbound_variable_is_underdetermined() {
    let c = Symbol::variable("c", "");
    let j = Symbol::variable("j", "");
    let mut model = Model::new("m");
    model.set_rhs([(c.clone(), -&j)]).unwrap();
    model.set_initial_conditions([(c.clone(), 1.0)]).unwrap();

    match model.check_well_posedness(false).unwrap_err() {
        ModelError::Underdetermined { variables } => assert_eq!(variables, vec!["j".to_string()]),
        other => panic!("unexpected error: {other}"),
    }

    model.external_variables.push(j.clone());
    assert!(model.check_well_posedness(false).is_ok());
}

#[test]
fn variables_in_boundary_conditions_must_be_bound() {
    let (mut model, c, _) = spm_like();
    let flux = Symbol::variable("flux", "");
    model.set_boundary_conditions([(
        c.clone(),
        BoundaryConditions::new()
            .with(Side::Left, 0.0, BcType::Neumann)
            .with(Side::Right, &flux, BcType::Neumann),
    )]);
    assert!(matches!(
        model.check_well_posedness(false),
        Err(ModelError::Underdetermined { .. })
    ));
}

#[test]
fn external_concatenations_cover_their_children() {
    let t_n = Symbol::variable("T_n", "negative electrode");
    let t_s = Symbol::variable("T_s", "separator");
    let temperature = Symbol::concatenation(vec![t_n.clone(), t_s.clone()]).unwrap();
    let c = Symbol::variable("c", "");
    let mut model = Model::new("m");
    model.set_rhs([(c.clone(), &t_n + &t_s)]).unwrap();
    model.set_initial_conditions([(c.clone(), 0.0)]).unwrap();
    model.external_variables.push(temperature);
    assert!(model.check_well_determined(false).is_ok());
}

#[test]
fn concatenated_keys_bind_their_children() {
    // key identities are collected over the whole key tree
    let a = Symbol::variable("a", "negative electrode");
    let b = Symbol::variable("b", "separator");
    let ab = Symbol::concatenation(vec![a.clone(), b.clone()]).unwrap();
    let mut model = Model::new("m");
    model.set_rhs([(ab.clone(), diffusion(&ab))]).unwrap();
    model.set_initial_conditions([(ab.clone(), 0.0)]).unwrap();
    model.set_boundary_conditions([(ab.clone(), neumann())]);
    assert!(model.check_well_posedness(false).is_ok());
}

#[test]
fn algebraic_key_must_appear_in_its_equation() {
    let c = Symbol::variable("c", "");
    let phi = Symbol::variable("phi", "");
    let mut model = Model::new("m");
    model.set_rhs([(c.clone(), &phi * 2.0)]).unwrap();
    model.set_algebraic([(phi.clone(), &c - 1.0)]).unwrap();
    model.set_initial_conditions([(c.clone(), 0.0)]).unwrap();

    match model.check_well_posedness(false).unwrap_err() {
        ModelError::AlgebraicKeyAbsent { variable } => assert_eq!(variable, "phi"),
        other => panic!("unexpected error: {other}"),
    }

    // appearing in a boundary condition is enough
    model.set_boundary_conditions([(
        c.clone(),
        BoundaryConditions::new().with(Side::Right, &phi, BcType::Dirichlet),
    )]);
    assert!(model.check_well_posedness(false).is_ok());
}

#[test]
fn concatenated_algebraic_keys_are_exempt() {
    let a = Symbol::variable("a", "negative electrode");
    let b = Symbol::variable("b", "separator");
    let ab = Symbol::concatenation(vec![a.clone(), b.clone()]).unwrap();
    let same_children = Symbol::concatenation(vec![a.clone(), b.clone()]).unwrap();
    let mut model = Model::new("m");
    model.set_algebraic([(ab.clone(), &same_children - 1.0)]).unwrap();
    assert!(model.check_algebraic_equations(false).is_ok());
    assert!(model.check_well_posedness(false).is_ok());
}

#[test]
fn spatial_equations_need_boundary_conditions() {
    let c = Symbol::variable("c", "negative particle");
    let mut model = Model::new("m");
    model.set_rhs([(c.clone(), diffusion(&c))]).unwrap();
    model.set_initial_conditions([(c.clone(), 1.0)]).unwrap();

    match model.check_well_posedness(false).unwrap_err() {
        ModelError::MissingBoundaryCondition { variable, equation } => {
            assert_eq!(variable, "c");
            assert_eq!(equation, "div(grad(c))");
        }
        other => panic!("unexpected error: {other}"),
    }

    model.set_boundary_conditions([(c.clone(), neumann())]);
    assert!(model.check_well_posedness(false).is_ok());
}

#[test]
fn boundary_conditions_on_a_concatenation_cover_its_children() {
    let c_n = Symbol::variable("c_n", "negative electrode");
    let c_s = Symbol::variable("c_s", "separator");
    let c_e = Symbol::concatenation(vec![c_n.clone(), c_s.clone()]).unwrap();
    let mut model = Model::new("m");
    model.set_rhs([(c_n.clone(), diffusion(&c_n)), (c_s.clone(), diffusion(&c_s))])
        .unwrap();
    model
        .set_initial_conditions([(c_n.clone(), 1.0), (c_s.clone(), 1.0)])
        .unwrap();
    model.set_boundary_conditions([(c_e, neumann())]);
    assert!(model.check_ics_bcs().is_ok());
}

#[test]
fn integrals_relax_the_boundary_condition_check() {
    let x = Symbol::spatial_variable("x", "current collector", CoordSys::Cartesian).unwrap();
    let t_cell = Symbol::variable("T", "");
    let flux = Symbol::gradient(&Symbol::broadcast(&t_cell, "current collector"));
    let average = Symbol::integral(&flux, &x).unwrap();
    let mut model = Model::new("lumped thermal");
    model.set_rhs([(t_cell.clone(), -average)]).unwrap();
    model.set_initial_conditions([(t_cell.clone(), 298.15)]).unwrap();
    assert!(model.check_well_posedness(false).is_ok());
}

#[test]
fn missing_output_variable_is_dropped_with_one_warning() {
    let (mut model, c, _) = spm_like();
    let mut outputs = Variables::new().with("Particle concentration", &c);
    outputs.declare("Cell temperature");
    model.set_variables(outputs);

    let warnings = WarnCounter::default();
    let report = warnings.capture(|| model.check_well_posedness(false).unwrap());
    assert_eq!(warnings.count(), 1);
    assert_eq!(report.warnings.len(), 1);
    assert_eq!(
        report.warnings[0],
        ModelWarning::MissingOutputVariables {
            names: vec!["Cell temperature".to_string()]
        }
    );
    assert!(!model.variables().contains("Cell temperature"));
    assert_eq!(model.variable_names(), vec!["Particle concentration"]);

    // second pass has nothing left to report
    let report = warnings.capture(|| model.check_well_posedness(false).unwrap());
    assert!(report.is_clean());
    assert_eq!(warnings.count(), 1);
}

#[test]
fn debug_mode_checks_output_variables() {
    let (mut model, c, _) = spm_like();
    let stray = Symbol::variable("stray", "");
    model.set_variables(
        Variables::new()
            .with("Particle concentration", &c)
            .with("Broken output", &c + &stray),
    );

    // not checked outside debug mode
    assert!(model.check_well_posedness(false).is_ok());

    model.settings = ModelSettings {
        debug_mode: true,
        ..ModelSettings::default()
    };
    match model.check_well_posedness(false).unwrap_err() {
        ModelError::UnkeyedVariable { variable } => assert_eq!(variable, "stray"),
        other => panic!("unexpected error: {other}"),
    }

    model.external_variables.push(stray.clone());
    assert!(model.check_well_posedness(false).is_ok());

    model.external_variables.clear();
    model.set_variables(Variables::new().with("Particle concentration", &c));
    assert!(model.check_well_posedness(false).is_ok());
}

#[test]
fn debug_check_follows_variables_through_broadcasts() {
    let (mut model, c, _) = spm_like();
    model.settings.debug_mode = true;
    // a broadcast of an unkeyed variable still names that variable
    let q = Symbol::variable("q", "");
    model.set_variables(Variables::new().with("Heat", Symbol::broadcast(&q, "negative particle")));
    assert!(matches!(
        model.check_variables(),
        Err(ModelError::UnkeyedVariable { .. })
    ));
    model.set_variables(Variables::new().with("Heat", Symbol::broadcast(&c, "separator")));
    assert!(model.check_variables().is_ok());
}

/// Stand-in for a discretiser: every keyed variable becomes a state vector
/// slice and equation bodies are rewritten; keys are left alone.
fn discretise(model: &mut Model) {
    let mut slices: HashMap<SymbolId, Symbol> = HashMap::new();
    let mut offset = 0;
    for key in model.rhs().keys().chain(model.algebraic().keys()) {
        let sv = Symbol::state_vector(
            key.name().unwrap_or("y"),
            vec![offset..offset + 10],
            key.domain().clone(),
        );
        slices.insert(key.id(), sv);
        offset += 10;
    }
    let mut rewrite = |s: &Symbol| slices.get(&s.id()).cloned();

    let rhs: Vec<(Symbol, Symbol)> = model
        .rhs()
        .iter()
        .map(|(k, e)| (k.clone(), e.replace(&mut rewrite)))
        .collect();
    let algebraic: Vec<(Symbol, Symbol)> = model
        .algebraic()
        .iter()
        .map(|(k, e)| (k.clone(), e.replace(&mut rewrite)))
        .collect();
    model.discretised.concatenated_rhs =
        Some(Symbol::concatenation(rhs.iter().map(|(_, e)| e.clone()).collect()).unwrap());
    model.discretised.mass_matrix = Some(DMatrix::identity(offset, offset));
    model.set_rhs(rhs).unwrap();
    model.set_algebraic(algebraic).unwrap();
}

#[test]
fn discretised_model_passes_relaxed_checks() {
    let (mut model, c, _) = spm_like();
    model.settings.debug_mode = true;
    model.set_variables(Variables::new().with("Particle concentration", &c));
    assert!(model.check_well_posedness(false).is_ok());

    discretise(&mut model);
    assert!(model.rhs().values().all(|e| e.variables().next().is_none()));
    assert!(model.discretised.concatenated_rhs.is_some());
    assert_eq!(model.discretised.mass_matrix.as_ref().map(|m| m.nrows()), Some(20));
    assert!(model.check_well_posedness(true).is_ok());

    // the same rewritten model fails the identity-based checks
    assert!(matches!(
        model.check_well_determined(false),
        Err(ModelError::Overdetermined { .. })
    ));
}

#[test]
fn discretised_algebraic_equations_need_state_vectors() {
    let (mut model, _, phi) = spm_like();
    discretise(&mut model);
    model.set_algebraic([(phi.clone(), 0.5)]).unwrap();
    match model.check_well_posedness(true).unwrap_err() {
        ModelError::NoStateVector { variable } => assert_eq!(variable, "phi"),
        other => panic!("unexpected error: {other}"),
    }
}

proptest! {
    #[test]
    fn well_posed_iff_every_state_has_an_initial_condition(has_ic in prop::collection::vec(any::<bool>(), 1..8)) {
        let states: Vec<Symbol> = (0..has_ic.len())
            .map(|i| Symbol::variable(format!("c{i}"), ""))
            .collect();
        let mut model = Model::new("decays");
        model.set_rhs(states.iter().map(|c| (c.clone(), -c))).unwrap();
        model
            .set_initial_conditions(
                states
                    .iter()
                    .zip(&has_ic)
                    .filter(|(_, has)| **has)
                    .map(|(c, _)| (c.clone(), 1.0)),
            )
            .unwrap();

        let result = model.check_well_posedness(false);
        if has_ic.iter().all(|h| *h) {
            prop_assert!(result.is_ok());
        } else {
            let missing = matches!(result, Err(ModelError::MissingInitialCondition { .. }));
            prop_assert!(missing);
        }
    }
}
