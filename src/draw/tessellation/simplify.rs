//! Polyline simplification
//!
//! Douglas-Peucker over index ranges of a single backing slice. Kept vertices
//! are flagged in place, so large polylines never copy sub-slices.

use crate::draw::geometry::Point2;

/// Distance from `p` to the segment `a`-`b` (not the infinite line)
pub fn point_line_distance(p: Point2, a: Point2, b: Point2) -> f64 {
    let d = b - a;
    if d.x == 0.0 && d.z == 0.0 {
        return p.distance(a);
    }

    let t = ((p - a).dot(d) / d.dot(d)).clamp(0.0, 1.0);
    p.distance(a + d * t)
}

/// Douglas-Peucker polyline simplification
///
/// Returns the input unchanged when `epsilon <= 0` or there are fewer than
/// three points. Endpoints are always kept.
pub fn simplify_polyline(points: &[Point2], epsilon: f64) -> Vec<Point2> {
    if epsilon <= 0.0 || points.len() < 3 {
        return points.to_vec();
    }

    let last = points.len() - 1;
    let mut keep = vec![false; points.len()];
    keep[0] = true;
    keep[last] = true;

    // Each range strictly shrinks; ranges with no interior points are leaves
    let mut ranges = vec![(0usize, last)];
    while let Some((first, last)) = ranges.pop() {
        if last - first < 2 {
            continue;
        }

        let (index, dmax) = farthest_from_chord(points, first, last);
        if dmax > epsilon {
            keep[index] = true;
            ranges.push((index, last));
            ranges.push((first, index));
        }
    }

    points
        .iter()
        .zip(&keep)
        .filter_map(|(p, &k)| k.then_some(*p))
        .collect()
}

/// Interior point of `first..=last` farthest from the chord; earliest wins ties
fn farthest_from_chord(points: &[Point2], first: usize, last: usize) -> (usize, f64) {
    let start = points[first];
    let end = points[last];
    let mut dmax = 0.0;
    let mut index = first;

    for (i, &p) in points.iter().enumerate().take(last).skip(first + 1) {
        let d = point_line_distance(p, start, end);
        if d > dmax {
            dmax = d;
            index = i;
        }
    }

    (index, dmax)
}
