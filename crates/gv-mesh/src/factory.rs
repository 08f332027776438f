//! Submesh factories and point-count specifications.

use std::collections::BTreeMap;
use std::fmt;

use gv_core::{CoordSys, Real, SymbolId, Tolerances, linspace, nearly_equal};
use gv_expr::Symbol;

use crate::error::{MeshError, MeshResult};
use crate::geometry::Region;
use crate::submesh::SubMesh1D;

/// Points per geometry variable, keyed by variable identity.
pub type PointsMap = BTreeMap<SymbolId, usize>;

/// Builds a submesh for one domain from its primary region.
pub trait SubmeshFactory: fmt::Debug {
    /// `pts` holds the point count of every variable of the domain.
    fn build(&self, region: &Region, pts: &PointsMap) -> MeshResult<SubMesh1D>;
}

/// Points requested for each spatial variable.
///
/// Lookups go through the variable's identity, so two variables that merely
/// share a name are distinct entries.
#[derive(Debug, Clone, Default)]
pub struct VarPts {
    pts: PointsMap,
}

impl VarPts {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set points for `variable` (builder style).
    pub fn with(mut self, variable: &Symbol, points: usize) -> Self {
        self.insert(variable, points);
        self
    }

    pub fn insert(&mut self, variable: &Symbol, points: usize) {
        self.pts.insert(variable.id(), points);
    }

    pub fn get(&self, variable: &Symbol) -> Option<usize> {
        self.pts.get(&variable.id()).copied()
    }

    pub fn get_id(&self, id: SymbolId) -> Option<usize> {
        self.pts.get(&id).copied()
    }

    pub fn len(&self) -> usize {
        self.pts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pts.is_empty()
    }
}

/// Mapping from domain name to the factory that discretises it.
#[derive(Debug, Default)]
pub struct SubmeshTypes {
    factories: BTreeMap<String, Box<dyn SubmeshFactory>>,
}

impl SubmeshTypes {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, domain: impl Into<String>, factory: impl SubmeshFactory + 'static) {
        self.factories.insert(domain.into(), Box::new(factory));
    }

    pub fn insert_boxed(&mut self, domain: impl Into<String>, factory: Box<dyn SubmeshFactory>) {
        self.factories.insert(domain.into(), factory);
    }

    pub fn get(&self, domain: &str) -> Option<&dyn SubmeshFactory> {
        self.factories.get(domain).map(|f| f.as_ref())
    }

    pub fn len(&self) -> usize {
        self.factories.len()
    }

    pub fn is_empty(&self) -> bool {
        self.factories.is_empty()
    }
}

fn single_variable(region: &Region) -> MeshResult<(&Symbol, Real, Real)> {
    let (var, bounds) = region.single().ok_or_else(|| MeshError::InvalidSubmesh {
        what: format!(
            "one-dimensional submesh needs exactly one variable, region has {}",
            region.len()
        ),
    })?;
    Ok((var, bounds.min, bounds.max))
}

fn points_for(var: &Symbol, pts: &PointsMap) -> MeshResult<usize> {
    let npts = pts
        .get(&var.id())
        .copied()
        .ok_or_else(|| MeshError::MissingPoints {
            domain: var.domain().to_string(),
            variable: var.name().unwrap_or_default().to_string(),
        })?;
    if npts == 0 {
        return Err(MeshError::InvalidSubmesh {
            what: format!(
                "'{}' needs at least one point",
                var.name().unwrap_or_default()
            ),
        });
    }
    Ok(npts)
}

/// Evenly spaced cells across the region.
#[derive(Debug, Clone, Copy, Default)]
pub struct Uniform1DSubMesh;

impl SubmeshFactory for Uniform1DSubMesh {
    fn build(&self, region: &Region, pts: &PointsMap) -> MeshResult<SubMesh1D> {
        let (var, min, max) = single_variable(region)?;
        let npts = points_for(var, pts)?;
        let coord_sys = var.coord_sys().unwrap_or(CoordSys::Cartesian);
        SubMesh1D::new(linspace(min, max, npts), coord_sys)
    }
}

/// Caller-supplied edges, checked against the region bounds and point count.
#[derive(Debug, Clone)]
pub struct UserSupplied1DSubMesh {
    edges: Vec<Real>,
}

impl UserSupplied1DSubMesh {
    pub fn new(edges: Vec<Real>) -> Self {
        Self { edges }
    }
}

impl SubmeshFactory for UserSupplied1DSubMesh {
    fn build(&self, region: &Region, pts: &PointsMap) -> MeshResult<SubMesh1D> {
        let (var, min, max) = single_variable(region)?;
        let npts = points_for(var, pts)?;
        if self.edges.len() != npts + 1 {
            return Err(MeshError::InvalidSubmesh {
                what: format!(
                    "{} edges given but {} points requested for '{}'",
                    self.edges.len(),
                    npts,
                    var.name().unwrap_or_default()
                ),
            });
        }
        let tol = Tolerances::default();
        let first = self.edges[0];
        let last = self.edges[self.edges.len() - 1];
        if !nearly_equal(first, min, tol) || !nearly_equal(last, max, tol) {
            return Err(MeshError::InvalidSubmesh {
                what: format!(
                    "edges span [{}, {}] but the region is [{}, {}]",
                    first, last, min, max
                ),
            });
        }
        let coord_sys = var.coord_sys().unwrap_or(CoordSys::Cartesian);
        SubMesh1D::new(self.edges.clone(), coord_sys)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::Bounds;

    fn region() -> (Symbol, Region) {
        let x = Symbol::spatial_variable("x_s", "separator", CoordSys::Cartesian).unwrap();
        let r = Region::new().with(&x, Bounds::new(0.4, 0.6).unwrap());
        (x, r)
    }

    #[test]
    fn uniform_has_requested_cells() {
        let (x, r) = region();
        let pts = VarPts::new().with(&x, 4);
        let sm = Uniform1DSubMesh.build(&r, &pts.pts).unwrap();
        assert_eq!(sm.npts(), 4);
        assert_eq!(sm.first_edge(), 0.4);
        assert_eq!(sm.last_edge(), 0.6);
        assert_eq!(sm.coord_sys(), CoordSys::Cartesian);
    }

    #[test]
    fn uniform_takes_coordinates_from_variable() {
        let r_p = Symbol::spatial_variable("r_p", "positive particle", CoordSys::SphericalPolar)
            .unwrap();
        let reg = Region::new().with(&r_p, Bounds::new(0.0, 1.0).unwrap());
        let pts = VarPts::new().with(&r_p, 3);
        let sm = Uniform1DSubMesh.build(&reg, &pts.pts).unwrap();
        assert_eq!(sm.coord_sys(), CoordSys::SphericalPolar);
    }

    #[test]
    fn user_supplied_checks_span_and_count() {
        let (x, r) = region();
        let pts = VarPts::new().with(&x, 2);
        let ok = UserSupplied1DSubMesh::new(vec![0.4, 0.45, 0.6]);
        assert_eq!(ok.build(&r, &pts.pts).unwrap().edges(), &[0.4, 0.45, 0.6]);

        let wrong_count = UserSupplied1DSubMesh::new(vec![0.4, 0.6]);
        assert!(wrong_count.build(&r, &pts.pts).is_err());

        let wrong_span = UserSupplied1DSubMesh::new(vec![0.3, 0.45, 0.6]);
        assert!(wrong_span.build(&r, &pts.pts).is_err());
    }

    #[test]
    fn lookup_is_by_identity() {
        let (x, _) = region();
        let twin = Symbol::spatial_variable("x_s", "separator", CoordSys::Cartesian).unwrap();
        let pts = VarPts::new().with(&x, 7);
        assert_eq!(pts.get(&x), Some(7));
        assert_eq!(pts.get(&twin), None);
    }
}
