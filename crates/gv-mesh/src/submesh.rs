//! One-dimensional submeshes.

use gv_core::{CoordSys, Real, ensure_finite};

use crate::error::{MeshError, MeshResult};

/// A discretised interval: strictly increasing edges plus a coordinate system.
///
/// Cell centres (`nodes`) and spacings are derived from the edges at
/// construction, so a `SubMesh1D` is always internally consistent.
#[derive(Debug, Clone, PartialEq)]
pub struct SubMesh1D {
    edges: Vec<Real>,
    nodes: Vec<Real>,
    d_edges: Vec<Real>,
    d_nodes: Vec<Real>,
    coord_sys: CoordSys,
}

impl SubMesh1D {
    /// Build a submesh, checking there are at least two finite, strictly increasing edges.
    pub fn new(edges: Vec<Real>, coord_sys: CoordSys) -> MeshResult<Self> {
        if edges.len() < 2 {
            return Err(MeshError::InvalidSubmesh {
                what: format!("need at least 2 edges, got {}", edges.len()),
            });
        }
        for &e in &edges {
            ensure_finite(e, "submesh edge")?;
        }
        if let Some(w) = edges.windows(2).find(|w| w[1] <= w[0]) {
            return Err(MeshError::InvalidSubmesh {
                what: format!("edges must be strictly increasing ({} then {})", w[0], w[1]),
            });
        }
        Ok(Self::from_valid_edges(edges, coord_sys))
    }

    fn from_valid_edges(edges: Vec<Real>, coord_sys: CoordSys) -> Self {
        let nodes: Vec<Real> = edges.windows(2).map(|w| 0.5 * (w[0] + w[1])).collect();
        let d_edges: Vec<Real> = edges.windows(2).map(|w| w[1] - w[0]).collect();
        let d_nodes: Vec<Real> = nodes.windows(2).map(|w| w[1] - w[0]).collect();
        Self {
            edges,
            nodes,
            d_edges,
            d_nodes,
            coord_sys,
        }
    }

    pub fn edges(&self) -> &[Real] {
        &self.edges
    }

    /// Cell centres.
    pub fn nodes(&self) -> &[Real] {
        &self.nodes
    }

    /// Cell widths.
    pub fn d_edges(&self) -> &[Real] {
        &self.d_edges
    }

    /// Distances between neighbouring cell centres.
    pub fn d_nodes(&self) -> &[Real] {
        &self.d_nodes
    }

    pub fn coord_sys(&self) -> CoordSys {
        self.coord_sys
    }

    /// Number of cells.
    pub fn npts(&self) -> usize {
        self.nodes.len()
    }

    pub fn first_edge(&self) -> Real {
        self.edges[0]
    }

    pub fn last_edge(&self) -> Real {
        self.edges[self.edges.len() - 1]
    }

    /// One-cell submesh mirrored across the left boundary: `[2*e0 - e1, e0]`.
    ///
    /// Fails if the mirrored edge overflows.
    pub fn left_ghost(&self) -> MeshResult<SubMesh1D> {
        let (e0, e1) = (self.edges[0], self.edges[1]);
        Self::new(vec![2.0 * e0 - e1, e0], self.coord_sys)
    }

    /// One-cell submesh mirrored across the right boundary: `[en, 2*en - en-1]`.
    pub fn right_ghost(&self) -> MeshResult<SubMesh1D> {
        let n = self.edges.len();
        let (prev, last) = (self.edges[n - 2], self.edges[n - 1]);
        Self::new(vec![last, 2.0 * last - prev], self.coord_sys)
    }
}

/// Combine positionally aligned submesh lists end to end.
///
/// `lists[k][j]` is the `j`-th repeat of the `k`-th domain. Each list must
/// have the same length; for every `j` the last edge of `lists[k][j]` must
/// match the first edge of `lists[k + 1][j]`, and all submeshes at position
/// `j` must share a coordinate system. Edges must meet exactly; the shared
/// edge appears once in the result. Returned submeshes own fresh edge vectors.
pub fn combine_submesh_lists(lists: &[&[SubMesh1D]]) -> MeshResult<Vec<SubMesh1D>> {
    let Some(first) = lists.first() else {
        return Err(MeshError::EmptyCombination);
    };
    let repeats = first.len();
    if lists.iter().any(|l| l.len() != repeats) {
        return Err(MeshError::DomainMismatch {
            what: "submeshes to combine have different numbers of repeats".into(),
        });
    }

    for pair in lists.windows(2) {
        for (left, right) in pair[0].iter().zip(pair[1].iter()) {
            if left.last_edge() != right.first_edge() {
                return Err(MeshError::DomainMismatch {
                    what: "submesh edges are not aligned".into(),
                });
            }
        }
    }

    let mut combined = Vec::with_capacity(repeats);
    for j in 0..repeats {
        let coord_sys = first[j].coord_sys();
        if lists.iter().any(|l| l[j].coord_sys() != coord_sys) {
            return Err(MeshError::DomainMismatch {
                what: "trying to combine two meshes in different coordinate systems".into(),
            });
        }
        let mut edges = first[j].edges().to_vec();
        for list in &lists[1..] {
            edges.extend_from_slice(&list[j].edges()[1..]);
        }
        combined.push(SubMesh1D::new(edges, coord_sys)?);
    }
    Ok(combined)
}
