//! Offset strip construction
//!
//! Extrudes a centerline into a ribbon of left/right rail points with mitered
//! joins. The same builder produces road surfaces and lane stripes, only the
//! half-width differs.

use crate::draw::geometry::{Point2, RailPair, Strip};
use serde::{Deserialize, Serialize};

/// Longest miter allowed, as a multiple of the half-width
pub const DEFAULT_MITER_LIMIT: f64 = 4.0;

/// Below this `miter . n2` the corner is treated as degenerate and not mitered
pub const DEFAULT_MIN_MITER_DENOMINATOR: f64 = 0.1;

/// Limits applied when solving interior miter lengths
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MiterLimits {
    pub limit_factor: f64,
    pub min_denominator: f64,
}

impl Default for MiterLimits {
    fn default() -> Self {
        Self {
            limit_factor: DEFAULT_MITER_LIMIT,
            min_denominator: DEFAULT_MIN_MITER_DENOMINATOR,
        }
    }
}

/// Build a strip using the default miter limits
pub fn build_strip(polyline: &[Point2], half_width: f64) -> Strip {
    build_strip_with_limits(polyline, half_width, &MiterLimits::default())
}

/// Build a strip with one rail pair per polyline vertex
///
/// Returns an empty strip for fewer than two points. Duplicate points yield
/// zero-length directions, which collapse that vertex's rails onto the
/// centerline instead of failing.
pub fn build_strip_with_limits(polyline: &[Point2], half_width: f64, limits: &MiterLimits) -> Strip {
    if polyline.len() < 2 {
        return Strip::default();
    }

    let last = polyline.len() - 1;
    let pairs = polyline
        .iter()
        .enumerate()
        .map(|(i, &p)| {
            let (miter, scale) = if i == 0 {
                ((polyline[1] - p).normalize().perp(), half_width)
            } else if i == last {
                ((p - polyline[i - 1]).normalize().perp(), half_width)
            } else {
                interior_miter(polyline[i - 1], p, polyline[i + 1], half_width, limits)
            };

            RailPair {
                left: p + miter * scale,
                right: p - miter * scale,
            }
        })
        .collect();

    Strip { pairs }
}

/// Miter direction and offset length at an interior vertex
fn interior_miter(
    prev: Point2,
    curr: Point2,
    next: Point2,
    half_width: f64,
    limits: &MiterLimits,
) -> (Point2, f64) {
    let n1 = (curr - prev).normalize().perp();
    let n2 = (next - curr).normalize().perp();
    let miter = (n1 + n2).normalize();

    // Full reversal: the normals cancel out
    if miter.is_zero() {
        return (n1, half_width);
    }

    let denom = miter.dot(n2);
    let scale = if denom.abs() < limits.min_denominator {
        half_width
    } else {
        (half_width / denom).abs()
    };

    (miter, scale.min(half_width * limits.limit_factor))
}
