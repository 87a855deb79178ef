//! Map draw module - turns a parsed map extract into a renderable scene
//!
//! Pipeline:
//! 1. Validate the configuration and reject empty extracts
//! 2. Project node coordinates around the bbox center
//! 3. Extrude road ways into ribbons (plus lane stripes)
//! 4. Triangulate building footprints
//! 5. Collect the buffers into a `Scene` with meshes Roads, Lanes, Buildings

use crate::config::SceneConfig;
use crate::draw::generation::{generate_building_mesh, generate_road_meshes, GenerationStats};
use crate::draw::geometry::{MeshBuffer, Scene};
use crate::error::{MapError, Result};
use crate::geo::{BBox, LocalProjection, MapData, Way, WayKind};
use log::info;

pub const ROADS_MESH: &str = "Roads";
pub const LANES_MESH: &str = "Lanes";
pub const BUILDINGS_MESH: &str = "Buildings";

fn capped(data: &MapData, kind: WayKind, cap: usize) -> Vec<&Way> {
    let limit = if cap > 0 { cap } else { usize::MAX };
    data.ways_of(kind).take(limit).collect()
}

/// Build the full scene for `data` inside `bbox`
pub fn generate_scene(
    data: &MapData,
    bbox: &BBox,
    config: &SceneConfig,
) -> Result<(Scene, GenerationStats)> {
    let start = std::time::Instant::now();
    config.validate()?;
    bbox.validate()?;

    if data.nodes.is_empty() || data.ways.is_empty() {
        return Err(MapError::NoMapData);
    }

    let projection = LocalProjection::centered_on(bbox, config.scale);

    let road_ways = capped(data, WayKind::Road, config.max_ways);
    let (roads, mut stats) = generate_road_meshes(&road_ways, &data.nodes, &projection, config);

    let buildings = if config.include_buildings {
        let building_ways = capped(data, WayKind::Building, config.max_buildings);
        let (mesh, building_stats) = generate_building_mesh(
            &building_ways,
            &data.nodes,
            &projection,
            config.building_tolerance(),
            config.building_color,
        );
        stats += building_stats;
        mesh
    } else {
        MeshBuffer::new(config.building_color)
    };

    if roads.roads.is_empty() && buildings.is_empty() {
        return Err(MapError::EmptyScene);
    }

    let mut scene = Scene::new();
    scene.add_mesh(ROADS_MESH, roads.roads)?;
    scene.add_mesh(LANES_MESH, roads.lanes)?;
    scene.add_mesh(BUILDINGS_MESH, buildings)?;
    scene.validate()?;

    info!(
        "scene: {}/{} roads, {}/{} buildings, {} unresolved nodes, {} partial footprints ({:.2}ms)",
        stats.road_ways_emitted,
        stats.road_ways_seen,
        stats.building_ways_emitted,
        stats.building_ways_seen,
        stats.unresolved_nodes,
        stats.partial_triangulations,
        start.elapsed().as_secs_f64() * 1000.0
    );

    Ok((scene, stats))
}
