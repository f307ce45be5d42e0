//! Planar junction coordinates.
//!
//! All positions are metric offsets in a local Cartesian frame whose origin
//! is the central junction: `x` grows east, `y` grows north, `z` is
//! elevation.  Double precision keeps composed neighbor junctions, which are
//! anchored at computed approach positions, free of accumulated drift.

use std::f64::consts::FRAC_PI_2;

/// A point in the local junction frame, in metres.
#[derive(Copy, Clone, Debug, PartialEq, Default)]
pub struct Point3 {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl Point3 {
    pub const ORIGIN: Point3 = Point3 { x: 0.0, y: 0.0, z: 0.0 };

    #[inline]
    pub fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    /// Point at `radius` from `self` in direction `angle` (radians from the
    /// x-axis, counter-clockwise), with absolute elevation `z`.
    #[inline]
    pub fn polar_offset(self, radius: f64, angle: f64, z: f64) -> Self {
        Self {
            x: self.x + radius * angle.cos(),
            y: self.y + radius * angle.sin(),
            z,
        }
    }

    /// Horizontal distance, ignoring elevation.
    #[inline]
    pub fn planar_distance(self, other: Point3) -> f64 {
        (other.x - self.x).hypot(other.y - self.y)
    }

    /// Direction from `self` to `other` as an angle from the x-axis in
    /// `(-π, π]`.
    #[inline]
    pub fn heading_to(self, other: Point3) -> f64 {
        (other.y - self.y).atan2(other.x - self.x)
    }

    /// Clockwise angle from north of the direction from `self` to `other`,
    /// normalised into `[0, 2π)`.
    pub fn bearing_to(self, other: Point3) -> f64 {
        (FRAC_PI_2 - self.heading_to(other)).rem_euclid(std::f64::consts::TAU)
    }

    /// `true` for the origin of the local frame, i.e. the central junction.
    #[inline]
    pub fn is_planar_origin(self) -> bool {
        self.x == 0.0 && self.y == 0.0
    }
}

impl std::fmt::Display for Point3 {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({:.3}, {:.3}, {:.3})", self.x, self.y, self.z)
    }
}
