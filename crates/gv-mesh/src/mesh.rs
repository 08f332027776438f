//! The mesh: submesh lists for every domain of a geometry.

use gv_core::timing::{Timer, stage_timing};
use gv_expr::Side;
use indexmap::IndexMap;

use crate::error::{MeshError, MeshResult};
use crate::factory::{PointsMap, SubmeshTypes, VarPts};
use crate::geometry::Geometry;
use crate::submesh::{SubMesh1D, combine_submesh_lists};

/// Domain that never receives ghost cells.
const TIME_DOMAIN: &str = "time";

/// Name of the derived ghost-cell domain on `side` of `domain`.
pub fn ghost_domain_name(domain: &str, side: Side) -> String {
    format!("{}_{} ghost cell", domain, side)
}

/// Submeshes for each domain, plus ghost-cell domains derived at construction.
///
/// Each domain maps to a list of identical submeshes, one per point of the
/// domain's secondary variable (a single entry when there is none). Lists of
/// domains sharing a secondary axis are positionally aligned. The mesh is
/// immutable once built.
#[derive(Debug, Clone)]
pub struct Mesh {
    submeshes: IndexMap<String, Vec<SubMesh1D>>,
    submesh_pts: IndexMap<String, PointsMap>,
}

impl Mesh {
    /// Discretise `geometry` with one factory per domain.
    ///
    /// Fails with [`MeshError::MissingPoints`] if any geometry variable has
    /// no entry in `var_pts`, and with [`MeshError::MissingFactory`] if a
    /// domain has no factory.
    pub fn new(geometry: &Geometry, submesh_types: &SubmeshTypes, var_pts: &VarPts) -> MeshResult<Self> {
        let timer = Timer::start("mesh construction");

        // Resolve points for every variable of every domain up front
        let mut submesh_pts: IndexMap<String, PointsMap> = IndexMap::new();
        for (domain, dg) in geometry.iter() {
            let pts = submesh_pts.entry(domain.to_string()).or_default();
            for var in dg.variables() {
                let n = var_pts
                    .get_id(var.id())
                    .ok_or_else(|| MeshError::MissingPoints {
                        domain: domain.to_string(),
                        variable: var.name().unwrap_or_default().to_string(),
                    })?;
                pts.insert(var.id(), n);
            }
        }

        let mut submeshes = IndexMap::new();
        for (domain, dg) in geometry.iter() {
            let pts = &submesh_pts[domain];

            // One copy of the primary submesh per secondary point.
            // With several secondary variables the last one decides.
            let repeats = match &dg.secondary {
                Some(secondary) => secondary
                    .variables()
                    .last()
                    .and_then(|v| pts.get(&v.id()).copied())
                    .unwrap_or(1),
                None => 1,
            };
            if repeats == 0 {
                return Err(MeshError::InvalidSubmesh {
                    what: format!("secondary axis of '{}' has no points", domain),
                });
            }

            let factory = submesh_types
                .get(domain)
                .ok_or_else(|| MeshError::MissingFactory {
                    domain: domain.to_string(),
                })?;
            let submesh = factory.build(&dg.primary, pts)?;
            tracing::debug!(domain, npts = submesh.npts(), repeats, "built submesh");
            submeshes.insert(domain.to_string(), vec![submesh; repeats]);
        }

        let mut mesh = Self {
            submeshes,
            submesh_pts,
        };
        mesh.add_ghost_meshes()?;
        timer.stop_and_record(&stage_timing::MESH_CONSTRUCTION);
        Ok(mesh)
    }

    /// Add left and right ghost-cell domains for every spatial domain, after the geometry domains.
    fn add_ghost_meshes(&mut self) -> MeshResult<()> {
        let spatial: Vec<(String, Vec<SubMesh1D>)> = self
            .submeshes
            .iter()
            .filter(|(domain, _)| domain.as_str() != TIME_DOMAIN)
            .map(|(d, l)| (d.clone(), l.clone()))
            .collect();

        for (domain, list) in spatial {
            let left = list
                .iter()
                .map(SubMesh1D::left_ghost)
                .collect::<MeshResult<Vec<_>>>()?;
            let right = list
                .iter()
                .map(SubMesh1D::right_ghost)
                .collect::<MeshResult<Vec<_>>>()?;
            self.submeshes
                .insert(ghost_domain_name(&domain, Side::Left), left);
            self.submeshes
                .insert(ghost_domain_name(&domain, Side::Right), right);
        }
        Ok(())
    }

    /// Submesh list of a domain.
    pub fn get(&self, domain: &str) -> Option<&[SubMesh1D]> {
        self.submeshes.get(domain).map(Vec::as_slice)
    }

    /// Submesh list of a domain, failing for unknown domains.
    pub fn submeshes(&self, domain: &str) -> MeshResult<&[SubMesh1D]> {
        self.get(domain).ok_or_else(|| MeshError::UnknownDomain {
            domain: domain.to_string(),
        })
    }

    pub fn contains(&self, domain: &str) -> bool {
        self.submeshes.contains_key(domain)
    }

    /// All domain names in geometry order, followed by the ghost-cell domains.
    pub fn domains(&self) -> impl Iterator<Item = &str> {
        self.submeshes.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &[SubMesh1D])> {
        self.submeshes
            .iter()
            .map(|(k, v)| (k.as_str(), v.as_slice()))
    }

    pub fn len(&self) -> usize {
        self.submeshes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.submeshes.is_empty()
    }

    /// Resolved points per variable for a geometry domain.
    pub fn submesh_pts(&self, domain: &str) -> Option<&PointsMap> {
        self.submesh_pts.get(domain)
    }

    /// Join the submeshes of adjacent domains end to end, one result per repeat.
    ///
    /// Fails with [`MeshError::DomainMismatch`] if neighbouring edges do not
    /// meet or coordinate systems differ.
    pub fn combine_submeshes(&self, domains: &[&str]) -> MeshResult<Vec<SubMesh1D>> {
        let lists = domains
            .iter()
            .map(|d| self.submeshes(d))
            .collect::<MeshResult<Vec<_>>>()?;
        combine_submesh_lists(&lists)
    }
}
