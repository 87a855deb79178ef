//! Simple-polygon triangulation by ear clipping
//!
//! The working ring is an intrusive doubly-linked list over vertex indices, so
//! clipping an ear is O(1). Rings are always walked counter-clockwise;
//! clockwise input is reversed up front.
//!
//! Self-intersecting or otherwise non-simple rings may run out of ears before
//! the ring is consumed. Triangulation then stops and keeps what it found.

use crate::draw::geometry::Point2;

/// Upper bound on clip passes, guards against pathological input
pub const MAX_EAR_CLIP_ITERATIONS: usize = 10_000;

/// Triangles produced by ear clipping, as indices into the input ring
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Triangulation {
    pub triangles: Vec<[usize; 3]>,
    /// False when clipping stopped before the ring was fully consumed
    pub complete: bool,
}

/// Signed shoelace area; positive for counter-clockwise rings
pub fn polygon_area(poly: &[Point2]) -> f64 {
    let n = poly.len();
    let twice: f64 = (0..n)
        .map(|i| poly[i].cross(poly[(i + 1) % n]))
        .sum();
    twice / 2.0
}

/// Barycentric inside-or-on-edge test; degenerate triangles contain nothing
pub fn point_in_triangle(p: Point2, a: Point2, b: Point2, c: Point2) -> bool {
    let v0 = c - a;
    let v1 = b - a;
    let v2 = p - a;

    let dot00 = v0.dot(v0);
    let dot01 = v0.dot(v1);
    let dot02 = v0.dot(v2);
    let dot11 = v1.dot(v1);
    let dot12 = v1.dot(v2);

    let denom = dot00 * dot11 - dot01 * dot01;
    if denom == 0.0 {
        return false;
    }
    let inv = 1.0 / denom;
    let u = (dot11 * dot02 - dot01 * dot12) * inv;
    let v = (dot00 * dot12 - dot01 * dot02) * inv;
    u >= 0.0 && v >= 0.0 && u + v <= 1.0
}

/// Triangulate a simple polygon, returning index triples into `polygon`
pub fn triangulate_polygon(polygon: &[Point2]) -> Vec<[usize; 3]> {
    ear_clip(polygon).triangles
}

/// Ear clipping with a completeness flag
pub fn ear_clip(polygon: &[Point2]) -> Triangulation {
    if polygon.len() < 3 {
        return Triangulation::default();
    }

    let mut ring = if polygon_area(polygon) < 0.0 {
        Ring::new((0..polygon.len()).rev())
    } else {
        Ring::new(0..polygon.len())
    };

    let mut triangles = Vec::with_capacity(polygon.len() - 2);
    let mut guard = 0;
    while ring.len > 2 && guard < MAX_EAR_CLIP_ITERATIONS {
        guard += 1;

        let Some(ear) = ring.find_ear(polygon) else {
            break;
        };
        triangles.push([ring.prev[ear], ear, ring.next[ear]]);
        ring.remove(ear);
    }

    Triangulation {
        triangles,
        complete: ring.len <= 2,
    }
}

/// Circular doubly-linked list of the vertices still in the polygon
struct Ring {
    prev: Vec<usize>,
    next: Vec<usize>,
    head: usize,
    len: usize,
}

impl Ring {
    fn new(order: impl Iterator<Item = usize>) -> Self {
        let order: Vec<usize> = order.collect();
        let n = order.len();
        let mut prev = vec![0; n];
        let mut next = vec![0; n];
        for (k, &v) in order.iter().enumerate() {
            prev[v] = order[(k + n - 1) % n];
            next[v] = order[(k + 1) % n];
        }
        Self { prev, next, head: order[0], len: n }
    }

    fn remove(&mut self, v: usize) {
        let (p, n) = (self.prev[v], self.next[v]);
        self.next[p] = n;
        self.prev[n] = p;
        if self.head == v {
            self.head = n;
        }
        self.len -= 1;
    }

    /// First ear in ring order starting at the head
    fn find_ear(&self, polygon: &[Point2]) -> Option<usize> {
        let mut curr = self.head;
        for _ in 0..self.len {
            if self.is_ear(polygon, curr) {
                return Some(curr);
            }
            curr = self.next[curr];
        }
        None
    }

    fn is_ear(&self, polygon: &[Point2], curr: usize) -> bool {
        let prev = self.prev[curr];
        let next = self.next[curr];
        let (a, b, c) = (polygon[prev], polygon[curr], polygon[next]);

        // Reflex and collinear corners are never ears
        if (b - a).cross(c - a) <= 0.0 {
            return false;
        }

        let mut j = self.next[next];
        while j != prev {
            if point_in_triangle(polygon[j], a, b, c) {
                return false;
            }
            j = self.next[j];
        }
        true
    }
}
