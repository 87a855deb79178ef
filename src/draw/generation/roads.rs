//! Road ribbon generation
//!
//! Each road way becomes a mitered ribbon at ground level, plus an optional
//! narrower lane stripe floating just above it.

use super::{resolve_polyline, GenerationStats};
use crate::config::SceneConfig;
use crate::draw::geometry::{MeshBuffer, Strip};
use crate::draw::tessellation::{build_strip_with_limits, simplify_polyline};
use crate::geo::{GeoNode, LocalProjection, NodeId, Way};
use log::debug;
use rayon::prelude::*;
use std::collections::HashMap;

/// Road surface and lane overlay buffers
#[derive(Debug, Clone, PartialEq)]
pub struct RoadMeshes {
    pub roads: MeshBuffer,
    pub lanes: MeshBuffer,
}

struct RoadPiece {
    road: Strip,
    lane: Option<Strip>,
}

/// Build the "Roads" and "Lanes" buffers for `ways`, in input order
pub fn generate_road_meshes(
    ways: &[&Way],
    nodes: &HashMap<NodeId, GeoNode>,
    projection: &LocalProjection,
    config: &SceneConfig,
) -> (RoadMeshes, GenerationStats) {
    let start = std::time::Instant::now();
    let half_width = config.road_half_width();
    let lane_half_width = config.lane_half_width();

    let pieces: Vec<(Option<RoadPiece>, usize)> = ways
        .par_iter()
        .map(|way| {
            let (mut polyline, unresolved) = resolve_polyline(&way.nodes, nodes, projection);
            if config.simplify > 0.0 {
                polyline = simplify_polyline(&polyline, config.simplify);
            }
            if polyline.len() < 2 {
                return (None, unresolved);
            }

            let road = build_strip_with_limits(&polyline, half_width, &config.miter);
            let lane = (lane_half_width > 0.0)
                .then(|| build_strip_with_limits(&polyline, lane_half_width, &config.miter));
            (Some(RoadPiece { road, lane }), unresolved)
        })
        .collect();

    let tessellate_time = start.elapsed();

    let mut meshes = RoadMeshes {
        roads: MeshBuffer::new(config.road_color),
        lanes: MeshBuffer::new(config.lane_color),
    };
    let mut stats = GenerationStats { road_ways_seen: ways.len(), ..Default::default() };

    // Merge sequentially so buffer order follows way order
    for (piece, unresolved) in pieces {
        stats.unresolved_nodes += unresolved;
        let Some(piece) = piece else {
            stats.road_ways_dropped += 1;
            continue;
        };
        meshes.roads.add_strip(&piece.road, 0.0);
        if let Some(lane) = &piece.lane {
            meshes.lanes.add_strip(lane, config.lane_height);
        }
        stats.road_ways_emitted += 1;
    }

    debug!(
        "roads: {} ways -> {} quads ({} lane quads), strips {:.2}ms, total {:.2}ms",
        ways.len(),
        meshes.roads.face_count(),
        meshes.lanes.face_count(),
        tessellate_time.as_secs_f64() * 1000.0,
        start.elapsed().as_secs_f64() * 1000.0
    );

    (meshes, stats)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geo::EARTH_RADIUS_M;
    use approx::assert_abs_diff_eq;

    // Inverse of the equator-centered projection, so tests can think in meters
    fn node_at(id: NodeId, x: f64, z: f64) -> (NodeId, GeoNode) {
        let lat = (z / EARTH_RADIUS_M).to_degrees();
        let lon = (x / EARTH_RADIUS_M).to_degrees();
        (id, GeoNode { id, lat, lon })
    }

    fn fixture() -> HashMap<NodeId, GeoNode> {
        [
            node_at(1, 0.0, 0.0),
            node_at(2, 10.0, 0.0),
            node_at(3, 10.0, 10.0),
            node_at(4, 0.0, 20.0),
        ]
        .into_iter()
        .collect()
    }

    fn origin() -> LocalProjection {
        LocalProjection::new(0.0, 0.0, 1.0)
    }

    #[test]
    fn test_straight_road_with_lane() {
        let way = Way::road(vec![1, 2]);
        let (meshes, stats) = generate_road_meshes(&[&way], &fixture(), &origin(), &SceneConfig::default());

        assert_eq!(meshes.roads.point_count(), 4);
        assert_eq!(meshes.roads.face_vertex_counts, vec![4]);
        assert_eq!(meshes.roads.face_vertex_indices, vec![0, 1, 2, 3]);
        // Default road is 6m wide
        assert_abs_diff_eq!(meshes.roads.points[0][2], 3.0, epsilon = 1e-6);
        assert_abs_diff_eq!(meshes.roads.points[3][2], -3.0, epsilon = 1e-6);
        assert_abs_diff_eq!(meshes.roads.points[1][0], 10.0, epsilon = 1e-6);

        assert_eq!(meshes.lanes.point_count(), 4);
        assert!(meshes.lanes.points.iter().all(|p| p[1] == 0.03));
        assert_abs_diff_eq!(meshes.lanes.points[0][2], 0.3, epsilon = 1e-6);

        assert_eq!(stats.road_ways_seen, 1);
        assert_eq!(stats.road_ways_emitted, 1);
        assert_eq!(stats.road_ways_dropped, 0);
    }

    #[test]
    fn test_lanes_disabled() {
        let config = SceneConfig { lane_width: 0.0, ..Default::default() };
        let way = Way::road(vec![1, 2, 3]);
        let (meshes, _) = generate_road_meshes(&[&way], &fixture(), &origin(), &config);
        assert_eq!(meshes.roads.face_count(), 2);
        assert!(meshes.lanes.is_empty());
    }

    #[test]
    fn test_unresolved_roads_are_dropped() {
        let short = Way::road(vec![1, 99]);
        let patched = Way::road(vec![1, 98, 2]);
        let (meshes, stats) =
            generate_road_meshes(&[&short, &patched], &fixture(), &origin(), &SceneConfig::default());

        assert_eq!(meshes.roads.face_count(), 1);
        assert_eq!(stats.road_ways_dropped, 1);
        assert_eq!(stats.road_ways_emitted, 1);
        assert_eq!(stats.unresolved_nodes, 2);
    }

    #[test]
    fn test_way_order_is_kept() {
        let first = Way::road(vec![3, 4]);
        let second = Way::road(vec![1, 2]);
        let (meshes, _) =
            generate_road_meshes(&[&first, &second], &fixture(), &origin(), &SceneConfig::default());
        assert!(meshes.roads.points[0][2] > 5.0);
        assert_abs_diff_eq!(meshes.roads.points[4][2], 3.0, epsilon = 1e-6);
        meshes.roads.validate("Roads").unwrap();
    }

    #[test]
    fn test_simplify_collapses_interior_points() {
        let nodes: HashMap<NodeId, GeoNode> =
            [node_at(1, 0.0, 0.0), node_at(2, 5.0, 0.01), node_at(3, 10.0, 0.0)]
                .into_iter()
                .collect();
        let way = Way::road(vec![1, 2, 3]);
        let config = SceneConfig { simplify: 1.0, ..Default::default() };
        let (meshes, _) = generate_road_meshes(&[&way], &nodes, &origin(), &config);
        assert_eq!(meshes.roads.face_count(), 1);
    }
}
