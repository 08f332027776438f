//! gv-mesh: geometry discretisation for galvani.
//!
//! Provides:
//! - Geometry description (domains, primary/secondary regions, bounds)
//! - One-dimensional submeshes and the factories that build them
//! - `Mesh`: per-domain submesh lists with ghost cells and submesh combination
//! - YAML mesh configuration resolved against a geometry
//!
//! # Example
//!
//! ```
//! use gv_core::CoordSys;
//! use gv_expr::Symbol;
//! use gv_mesh::{Bounds, DomainGeometry, Geometry, Mesh, Region, SubmeshTypes, Uniform1DSubMesh, VarPts};
//!
//! let x_n = Symbol::spatial_variable("x_n", "negative electrode", CoordSys::Cartesian).unwrap();
//! let x_s = Symbol::spatial_variable("x_s", "separator", CoordSys::Cartesian).unwrap();
//!
//! let mut geometry = Geometry::new();
//! geometry.insert("negative electrode", DomainGeometry::new(
//!     Region::new().with(&x_n, Bounds::new(0.0, 0.5).unwrap()),
//! ));
//! geometry.insert("separator", DomainGeometry::new(
//!     Region::new().with(&x_s, Bounds::new(0.5, 0.75).unwrap()),
//! ));
//!
//! let mut types = SubmeshTypes::new();
//! types.insert("negative electrode", Uniform1DSubMesh);
//! types.insert("separator", Uniform1DSubMesh);
//!
//! let var_pts = VarPts::new().with(&x_n, 10).with(&x_s, 5);
//! let mesh = Mesh::new(&geometry, &types, &var_pts).unwrap();
//!
//! let whole = mesh.combine_submeshes(&["negative electrode", "separator"]).unwrap();
//! assert_eq!(whole[0].npts(), 15);
//! ```

pub mod config;
pub mod error;
pub mod factory;
pub mod geometry;
pub mod mesh;
pub mod submesh;

// Re-exports for ergonomics
pub use config::{MeshConfig, SubmeshKind};
pub use error::{MeshError, MeshResult};
pub use factory::{
    PointsMap, SubmeshFactory, SubmeshTypes, Uniform1DSubMesh, UserSupplied1DSubMesh, VarPts,
};
pub use geometry::{Bounds, DomainGeometry, Geometry, Region};
pub use mesh::{Mesh, ghost_domain_name};
pub use submesh::{SubMesh1D, combine_submesh_lists};
