//! Core geometry types for local-space map data
//!
//! Points live on the ground plane: `x` grows east, `z` grows north, and the
//! height axis `y` is only introduced when geometry is written into a mesh.

use serde::Serialize;
use std::ops::{Add, Mul, Neg, Sub};

/// Vectors shorter than this normalize to zero instead of blowing up
pub const NORMALIZE_EPSILON: f64 = 1e-6;

/// A 2D point (or vector) on the local ground plane, in meters
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct Point2 {
    pub x: f64,
    pub z: f64,
}

impl Point2 {
    pub const ZERO: Point2 = Point2 { x: 0.0, z: 0.0 };

    pub const fn new(x: f64, z: f64) -> Self {
        Self { x, z }
    }

    pub fn dot(self, other: Point2) -> f64 {
        self.x * other.x + self.z * other.z
    }

    /// z-component of the 3D cross product; positive for a counter-clockwise turn
    pub fn cross(self, other: Point2) -> f64 {
        self.x * other.z - self.z * other.x
    }

    pub fn length(self) -> f64 {
        self.x.hypot(self.z)
    }

    pub fn distance(self, other: Point2) -> f64 {
        (self - other).length()
    }

    /// Unit vector in the same direction, or `ZERO` for degenerate input
    pub fn normalize(self) -> Point2 {
        let len = self.length();
        if len <= NORMALIZE_EPSILON {
            return Point2::ZERO;
        }
        Point2::new(self.x / len, self.z / len)
    }

    /// Rotate 90 degrees counter-clockwise
    pub fn perp(self) -> Point2 {
        Point2::new(-self.z, self.x)
    }

    pub fn is_zero(self) -> bool {
        self.x == 0.0 && self.z == 0.0
    }

    /// Lift onto the ground plane at height `y`
    pub fn at_height(self, y: f64) -> [f64; 3] {
        [self.x, y, self.z]
    }
}

impl Add for Point2 {
    type Output = Point2;
    fn add(self, rhs: Point2) -> Point2 {
        Point2::new(self.x + rhs.x, self.z + rhs.z)
    }
}

impl Sub for Point2 {
    type Output = Point2;
    fn sub(self, rhs: Point2) -> Point2 {
        Point2::new(self.x - rhs.x, self.z - rhs.z)
    }
}

impl Mul<f64> for Point2 {
    type Output = Point2;
    fn mul(self, rhs: f64) -> Point2 {
        Point2::new(self.x * rhs, self.z * rhs)
    }
}

impl Neg for Point2 {
    type Output = Point2;
    fn neg(self) -> Point2 {
        Point2::new(-self.x, -self.z)
    }
}

impl From<(f64, f64)> for Point2 {
    fn from((x, z): (f64, f64)) -> Self {
        Point2::new(x, z)
    }
}

/// Ordered local-space points derived from one way
pub type Polyline = Vec<Point2>;

/// Left and right rail points emitted for one centerline vertex
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct RailPair {
    pub left: Point2,
    pub right: Point2,
}

impl RailPair {
    /// Half the distance between the rails, i.e. the offset applied at this vertex
    pub fn half_span(&self) -> f64 {
        self.left.distance(self.right) * 0.5
    }
}

/// Offset ribbon around a centerline, one rail pair per centerline vertex
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Strip {
    pub pairs: Vec<RailPair>,
}

impl Strip {
    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    /// Consecutive rail pairs; each window becomes one quad
    pub fn segments(&self) -> impl Iterator<Item = (&RailPair, &RailPair)> {
        self.pairs.windows(2).map(|w| (&w[0], &w[1]))
    }
}
