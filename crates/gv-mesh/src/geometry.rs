//! Geometry description consumed by mesh construction.

use gv_core::Real;
use gv_expr::Symbol;
use indexmap::IndexMap;

use crate::error::{MeshError, MeshResult};

/// Closed interval `[min, max]` with `min < max`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds {
    pub min: Real,
    pub max: Real,
}

impl Bounds {
    pub fn new(min: Real, max: Real) -> MeshResult<Self> {
        if !(min.is_finite() && max.is_finite() && min < max) {
            return Err(MeshError::InvalidBounds {
                variable: String::new(),
                min,
                max,
            });
        }
        Ok(Self { min, max })
    }
}

/// Ordered list of (spatial variable, bounds) pairs describing one region.
#[derive(Debug, Clone, Default)]
pub struct Region {
    entries: Vec<(Symbol, Bounds)>,
}

impl Region {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a variable and its bounds (builder style).
    pub fn with(mut self, variable: &Symbol, bounds: Bounds) -> Self {
        self.entries.push((variable.clone(), bounds));
        self
    }

    pub fn iter(&self) -> impl Iterator<Item = (&Symbol, &Bounds)> {
        self.entries.iter().map(|(s, b)| (s, b))
    }

    pub fn variables(&self) -> impl Iterator<Item = &Symbol> {
        self.entries.iter().map(|(s, _)| s)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// The only entry of a one-dimensional region.
    pub fn single(&self) -> Option<(&Symbol, &Bounds)> {
        match self.entries.as_slice() {
            [(s, b)] => Some((s, b)),
            _ => None,
        }
    }
}

/// Regions of one domain.
///
/// The primary region is discretised by the domain's submesh factory. A
/// secondary region (e.g. the electrode axis a particle sits on) only sets
/// how many copies of the primary submesh are made.
#[derive(Debug, Clone)]
pub struct DomainGeometry {
    pub primary: Region,
    pub secondary: Option<Region>,
}

impl DomainGeometry {
    pub fn new(primary: Region) -> Self {
        Self {
            primary,
            secondary: None,
        }
    }

    pub fn with_secondary(mut self, secondary: Region) -> Self {
        self.secondary = Some(secondary);
        self
    }

    /// Every variable in the primary then secondary region.
    pub fn variables(&self) -> impl Iterator<Item = &Symbol> {
        self.primary
            .variables()
            .chain(self.secondary.iter().flat_map(|r| r.variables()))
    }
}

/// Mapping from domain name to its regions, in insertion order.
#[derive(Debug, Clone, Default)]
pub struct Geometry {
    domains: IndexMap<String, DomainGeometry>,
}

impl Geometry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace a domain.
    pub fn insert(&mut self, domain: impl Into<String>, geometry: DomainGeometry) {
        self.domains.insert(domain.into(), geometry);
    }

    pub fn get(&self, domain: &str) -> Option<&DomainGeometry> {
        self.domains.get(domain)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &DomainGeometry)> {
        self.domains.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn domains(&self) -> impl Iterator<Item = &str> {
        self.domains.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.domains.len()
    }

    pub fn is_empty(&self) -> bool {
        self.domains.is_empty()
    }

    /// Find a geometry variable by name (first match in domain order).
    pub fn find_variable(&self, name: &str) -> Option<&Symbol> {
        self.domains
            .values()
            .flat_map(|d| d.variables())
            .find(|v| v.name() == Some(name))
    }
}
