//! Building footprint generation
//!
//! Closed building rings are projected, optionally simplified and ear-clipped
//! into flat triangles at ground level.

use super::{resolve_polyline, GenerationStats};
use crate::draw::geometry::{MeshBuffer, Polyline};
use crate::draw::tessellation::{ear_clip, simplify_polyline};
use crate::geo::{GeoNode, LocalProjection, NodeId, Way};
use log::{debug, warn};
use rayon::prelude::*;
use std::collections::HashMap;

enum Footprint {
    /// Fewer than 4 ids or first id != last id
    OpenRing,
    /// Too few resolved points, or nothing could be triangulated
    Degenerate,
    Triangulated {
        ring: Polyline,
        triangles: Vec<[usize; 3]>,
        complete: bool,
    },
}

fn build_footprint(
    way: &Way,
    nodes: &HashMap<NodeId, GeoNode>,
    projection: &LocalProjection,
    tolerance: f64,
) -> (Footprint, usize) {
    if way.nodes.len() < 4 || !way.is_closed() {
        return (Footprint::OpenRing, 0);
    }

    // Closing id repeats the first one
    let open_ring = &way.nodes[..way.nodes.len() - 1];
    let (mut ring, unresolved) = resolve_polyline(open_ring, nodes, projection);
    if tolerance > 0.0 {
        ring = simplify_polyline(&ring, tolerance);
    }
    if ring.len() < 3 {
        return (Footprint::Degenerate, unresolved);
    }

    let triangulation = ear_clip(&ring);
    if triangulation.triangles.is_empty() {
        return (Footprint::Degenerate, unresolved);
    }
    (
        Footprint::Triangulated {
            ring,
            triangles: triangulation.triangles,
            complete: triangulation.complete,
        },
        unresolved,
    )
}

/// Build the "Buildings" buffer for `ways`, in input order
pub fn generate_building_mesh(
    ways: &[&Way],
    nodes: &HashMap<NodeId, GeoNode>,
    projection: &LocalProjection,
    tolerance: f64,
    color: [f32; 3],
) -> (MeshBuffer, GenerationStats) {
    let start = std::time::Instant::now();

    let footprints: Vec<(Footprint, usize)> = ways
        .par_iter()
        .map(|way| build_footprint(way, nodes, projection, tolerance))
        .collect();

    let mut mesh = MeshBuffer::new(color);
    let mut stats = GenerationStats { building_ways_seen: ways.len(), ..Default::default() };
    let mut open_rings = 0;

    for (index, (footprint, unresolved)) in footprints.into_iter().enumerate() {
        stats.unresolved_nodes += unresolved;
        match footprint {
            Footprint::OpenRing => {
                open_rings += 1;
                stats.building_ways_dropped += 1;
            }
            Footprint::Degenerate => stats.building_ways_dropped += 1,
            Footprint::Triangulated { ring, triangles, complete } => {
                if !complete {
                    warn!(
                        "building {}: ear clipping stopped early, {} of {} triangles emitted",
                        index,
                        triangles.len(),
                        ring.len() - 2
                    );
                    stats.partial_triangulations += 1;
                }
                mesh.add_triangulated_polygon(&ring, &triangles, 0.0);
                stats.building_ways_emitted += 1;
            }
        }
    }

    if open_rings > 0 {
        warn!("skipped {} building ways that are not closed rings", open_rings);
    }

    debug!(
        "buildings: {} ways -> {} triangles in {:.2}ms",
        ways.len(),
        mesh.face_count(),
        start.elapsed().as_secs_f64() * 1000.0
    );

    (mesh, stats)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::BUILDING_COLOR;
    use crate::geo::EARTH_RADIUS_M;
    use approx::assert_abs_diff_eq;

    fn node_at(id: NodeId, x: f64, z: f64) -> (NodeId, GeoNode) {
        let lat = (z / EARTH_RADIUS_M).to_degrees();
        let lon = (x / EARTH_RADIUS_M).to_degrees();
        (id, GeoNode { id, lat, lon })
    }

    fn fixture() -> HashMap<NodeId, GeoNode> {
        [
            node_at(1, 0.0, 0.0),
            node_at(2, 4.0, 0.0),
            node_at(3, 4.0, 4.0),
            node_at(4, 0.0, 4.0),
        ]
        .into_iter()
        .collect()
    }

    fn generate(ways: &[&Way]) -> (MeshBuffer, GenerationStats) {
        let projection = LocalProjection::new(0.0, 0.0, 1.0);
        generate_building_mesh(ways, &fixture(), &projection, 0.0, BUILDING_COLOR)
    }

    #[test]
    fn test_square_footprint() {
        let way = Way::building(vec![1, 2, 3, 4, 1]);
        let (mesh, stats) = generate(&[&way]);

        assert_eq!(mesh.point_count(), 4);
        assert_eq!(mesh.face_vertex_counts, vec![3, 3]);
        assert_eq!(mesh.normals.len(), 4);
        assert!(mesh.points.iter().all(|p| p[1] == 0.0));
        assert_abs_diff_eq!(mesh.points[2][0], 4.0, epsilon = 1e-6);
        assert_eq!(mesh.display_color, BUILDING_COLOR);
        mesh.validate("Buildings").unwrap();

        assert_eq!(stats.building_ways_emitted, 1);
        assert_eq!(stats.partial_triangulations, 0);
    }

    #[test]
    fn test_open_and_short_rings_are_dropped() {
        let open = Way::building(vec![1, 2, 3, 4]);
        let short = Way::building(vec![1, 2, 1]);
        let (mesh, stats) = generate(&[&open, &short]);
        assert!(mesh.is_empty());
        assert_eq!(stats.building_ways_seen, 2);
        assert_eq!(stats.building_ways_dropped, 2);
    }

    #[test]
    fn test_missing_node_shrinks_ring() {
        let way = Way::building(vec![1, 2, 99, 4, 1]);
        let (mesh, stats) = generate(&[&way]);
        assert_eq!(mesh.point_count(), 3);
        assert_eq!(mesh.face_count(), 1);
        assert_eq!(stats.unresolved_nodes, 1);

        let lost = Way::building(vec![1, 98, 99, 4, 1]);
        let (mesh, stats) = generate(&[&lost]);
        assert!(mesh.is_empty());
        assert_eq!(stats.building_ways_dropped, 1);
    }

    #[test]
    fn test_bowtie_counts_partial_triangulation() {
        // 1 -> 2 -> 4 -> 3 crosses itself
        let way = Way::building(vec![1, 2, 4, 3, 1]);
        let (mesh, stats) = generate(&[&way]);
        assert_eq!(mesh.face_count(), 1);
        assert_eq!(stats.partial_triangulations, 1);
        assert_eq!(stats.building_ways_emitted, 1);
    }

    #[test]
    fn test_buildings_are_appended_in_order() {
        let a = Way::building(vec![1, 2, 3, 4, 1]);
        let b = Way::building(vec![2, 3, 4, 2]);
        let (mesh, _) = generate(&[&a, &b]);
        assert_eq!(mesh.point_count(), 7);
        assert_eq!(mesh.face_count(), 3);
        assert!(mesh.face_vertex_indices[6..].iter().all(|&i| i >= 4));
        mesh.validate("Buildings").unwrap();
    }
}
