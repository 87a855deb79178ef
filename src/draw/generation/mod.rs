//! Scene geometry generation from resolved map ways
//!
//! Turns ways from a `MapData` extract into flat mesh buffers, one way at a
//! time in parallel, then merges the per-way results in input order.
//!
//! # Submodules
//! - `roads` - Road ribbons and lane stripe overlays
//! - `buildings` - Triangulated building footprints

mod roads;
mod buildings;

use crate::draw::geometry::Polyline;
use crate::geo::{GeoNode, LocalProjection, NodeId};
use serde::Serialize;
use std::collections::HashMap;
use std::ops::AddAssign;

pub use roads::{generate_road_meshes, RoadMeshes};
pub use buildings::generate_building_mesh;

/// Counters describing what generation kept and what it recovered from
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct GenerationStats {
    pub road_ways_seen: usize,
    pub road_ways_emitted: usize,
    pub road_ways_dropped: usize,
    pub building_ways_seen: usize,
    pub building_ways_emitted: usize,
    pub building_ways_dropped: usize,
    /// Node references with no coordinates in the extract
    pub unresolved_nodes: usize,
    /// Footprints the ear clipper could not fully consume
    pub partial_triangulations: usize,
}

impl AddAssign for GenerationStats {
    fn add_assign(&mut self, other: Self) {
        self.road_ways_seen += other.road_ways_seen;
        self.road_ways_emitted += other.road_ways_emitted;
        self.road_ways_dropped += other.road_ways_dropped;
        self.building_ways_seen += other.building_ways_seen;
        self.building_ways_emitted += other.building_ways_emitted;
        self.building_ways_dropped += other.building_ways_dropped;
        self.unresolved_nodes += other.unresolved_nodes;
        self.partial_triangulations += other.partial_triangulations;
    }
}

/// Project a way's node ids, skipping ids missing from `nodes`
///
/// Returns the projected polyline and the number of skipped ids.
pub fn resolve_polyline(
    ids: &[NodeId],
    nodes: &HashMap<NodeId, GeoNode>,
    projection: &LocalProjection,
) -> (Polyline, usize) {
    let mut polyline = Vec::with_capacity(ids.len());
    let mut unresolved = 0;
    for id in ids {
        match nodes.get(id) {
            Some(node) => polyline.push(projection.project(node.lat, node.lon)),
            None => unresolved += 1,
        }
    }
    (polyline, unresolved)
}
