//! Coordinate systems for one-dimensional spatial axes.

use core::fmt;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum CoordSys {
    #[default]
    Cartesian,
    CylindricalPolar,
    SphericalPolar,
}

impl fmt::Display for CoordSys {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            CoordSys::Cartesian => "cartesian",
            CoordSys::CylindricalPolar => "cylindrical polar",
            CoordSys::SphericalPolar => "spherical polar",
        };
        f.write_str(s)
    }
}
