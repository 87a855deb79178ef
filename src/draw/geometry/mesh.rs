//! Flat mesh buffers ready for scene serialization
//!
//! A `MeshBuffer` mirrors the USD `Mesh` schema: flat point/normal arrays plus
//! per-face vertex counts and a flat face-vertex index list.

use super::types::{Point2, Strip};
use crate::error::{MapError, Result};
use serde::Serialize;

/// Up-facing normal shared by all ground-plane geometry
pub const UP_NORMAL: [f64; 3] = [0.0, 1.0, 0.0];

/// Axis-aligned bounds of a mesh
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Extent {
    pub min: [f64; 3],
    pub max: [f64; 3],
}

/// Accumulated geometry for one named mesh
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MeshBuffer {
    pub points: Vec<[f64; 3]>,
    /// Per-vertex normals; empty means the mesh carries none
    pub normals: Vec<[f64; 3]>,
    #[serde(rename = "faceVertexCounts")]
    pub face_vertex_counts: Vec<u32>,
    #[serde(rename = "faceVertexIndices")]
    pub face_vertex_indices: Vec<u32>,
    #[serde(rename = "displayColor")]
    pub display_color: [f32; 3],
}

impl MeshBuffer {
    pub fn new(display_color: [f32; 3]) -> Self {
        Self {
            points: Vec::new(),
            normals: Vec::new(),
            face_vertex_counts: Vec::new(),
            face_vertex_indices: Vec::new(),
            display_color,
        }
    }

    pub fn point_count(&self) -> usize {
        self.points.len()
    }

    pub fn face_count(&self) -> usize {
        self.face_vertex_counts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Emit one quad per pair of consecutive rail pairs at height `y`
    ///
    /// Quads do not share vertices, so each ribbon segment carries its own
    /// four points `[left_a, left_b, right_b, right_a]`.
    pub fn add_strip(&mut self, strip: &Strip, y: f64) {
        for (a, b) in strip.segments() {
            let start = self.points.len() as u32;
            self.points.extend_from_slice(&[
                a.left.at_height(y),
                b.left.at_height(y),
                b.right.at_height(y),
                a.right.at_height(y),
            ]);
            self.normals.extend(std::iter::repeat_n(UP_NORMAL, 4));
            self.face_vertex_counts.push(4);
            self.face_vertex_indices
                .extend_from_slice(&[start, start + 1, start + 2, start + 3]);
        }
    }

    /// Append a flat polygon ring and its triangles (indices into `ring`)
    pub fn add_triangulated_polygon(&mut self, ring: &[Point2], triangles: &[[usize; 3]], y: f64) {
        let base = self.points.len() as u32;
        for p in ring {
            self.points.push(p.at_height(y));
            self.normals.push(UP_NORMAL);
        }
        for tri in triangles {
            self.face_vertex_counts.push(3);
            self.face_vertex_indices
                .extend(tri.iter().map(|&i| base + i as u32));
        }
    }

    /// Merge another buffer's geometry after this one, re-basing its indices
    pub fn append(&mut self, other: &MeshBuffer) {
        let offset = self.points.len() as u32;
        self.points.extend_from_slice(&other.points);
        self.normals.extend_from_slice(&other.normals);
        self.face_vertex_counts.extend_from_slice(&other.face_vertex_counts);
        self.face_vertex_indices
            .extend(other.face_vertex_indices.iter().map(|&i| i + offset));
    }

    /// Axis-aligned bounds over all points, `None` for an empty buffer
    pub fn extent(&self) -> Option<Extent> {
        let first = *self.points.first()?;
        let mut min = first;
        let mut max = first;
        for p in &self.points[1..] {
            for axis in 0..3 {
                min[axis] = min[axis].min(p[axis]);
                max[axis] = max[axis].max(p[axis]);
            }
        }
        Some(Extent { min, max })
    }

    /// Check the face/index/normal invariants, naming the mesh in any error
    pub fn validate(&self, name: &str) -> Result<()> {
        let invalid = |reason: String| MapError::InvalidMesh {
            name: name.to_string(),
            reason,
        };

        let expected: u64 = self.face_vertex_counts.iter().map(|&c| c as u64).sum();
        if expected != self.face_vertex_indices.len() as u64 {
            return Err(invalid(format!(
                "face vertex counts sum to {} but there are {} indices",
                expected,
                self.face_vertex_indices.len()
            )));
        }
        if let Some(&bad) = self
            .face_vertex_indices
            .iter()
            .find(|&&i| i as usize >= self.points.len())
        {
            return Err(invalid(format!(
                "index {} out of range for {} points",
                bad,
                self.points.len()
            )));
        }
        if !self.normals.is_empty() && self.normals.len() != self.points.len() {
            return Err(invalid(format!(
                "{} normals for {} points",
                self.normals.len(),
                self.points.len()
            )));
        }
        Ok(())
    }
}
