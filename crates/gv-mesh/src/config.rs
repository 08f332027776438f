//! YAML mesh configuration.
//!
//! A config names spatial variables and domains as strings; [`MeshConfig::resolve`]
//! binds those names to the variables of a concrete [`Geometry`].
//!
//! ```yaml
//! var_pts:
//!   x_n: 20
//!   x_s: 10
//! submesh_types:
//!   negative electrode:
//!     type: uniform
//!   separator:
//!     type: user_supplied
//!     edges: [0.5, 0.6, 0.75]
//! ```

use std::collections::BTreeMap;
use std::path::Path;

use gv_core::Real;
use serde::{Deserialize, Serialize};

use crate::error::{MeshError, MeshResult};
use crate::factory::{SubmeshFactory, SubmeshTypes, Uniform1DSubMesh, UserSupplied1DSubMesh, VarPts};
use crate::geometry::Geometry;
use crate::mesh::Mesh;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum SubmeshKind {
    Uniform,
    UserSupplied { edges: Vec<Real> },
}

impl SubmeshKind {
    pub fn factory(&self) -> Box<dyn SubmeshFactory> {
        match self {
            SubmeshKind::Uniform => Box::new(Uniform1DSubMesh),
            SubmeshKind::UserSupplied { edges } => Box::new(UserSupplied1DSubMesh::new(edges.clone())),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MeshConfig {
    /// Points per spatial variable, by variable name.
    #[serde(default)]
    pub var_pts: BTreeMap<String, usize>,
    /// Submesh type per domain.
    #[serde(default)]
    pub submesh_types: BTreeMap<String, SubmeshKind>,
}

impl MeshConfig {
    pub fn from_yaml_str(content: &str) -> MeshResult<Self> {
        Ok(serde_yaml::from_str(content)?)
    }

    pub fn load_yaml(path: &Path) -> MeshResult<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_yaml_str(&content)
    }

    pub fn to_yaml_string(&self) -> MeshResult<String> {
        Ok(serde_yaml::to_string(self)?)
    }

    /// Bind names to the variables and domains of `geometry`.
    ///
    /// Names that match nothing in the geometry are rejected. Geometry
    /// variables without a configured count are left out; mesh construction
    /// reports them as missing points.
    pub fn resolve(&self, geometry: &Geometry) -> MeshResult<(SubmeshTypes, VarPts)> {
        let mut var_pts = VarPts::new();
        for (name, &points) in &self.var_pts {
            let var = geometry
                .find_variable(name)
                .ok_or_else(|| MeshError::Config {
                    what: format!("variable '{}' does not appear in the geometry", name),
                })?;
            var_pts.insert(var, points);
        }

        let mut types = SubmeshTypes::new();
        for (domain, kind) in &self.submesh_types {
            if geometry.get(domain).is_none() {
                return Err(MeshError::Config {
                    what: format!("domain '{}' does not appear in the geometry", domain),
                });
            }
            types.insert_boxed(domain.clone(), kind.factory());
        }
        Ok((types, var_pts))
    }

    /// Resolve against `geometry` and build the mesh.
    pub fn build_mesh(&self, geometry: &Geometry) -> MeshResult<Mesh> {
        let (types, var_pts) = self.resolve(geometry)?;
        Mesh::new(geometry, &types, &var_pts)
    }
}
