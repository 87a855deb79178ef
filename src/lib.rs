//! Convert OpenStreetMap road and building extracts into USDA scenes
//!
//! The library is a pure pipeline over in-memory data: a parsed extract goes
//! in, a `Scene` (and its `#usda 1.0` text) comes out. Fetching map data is
//! left to the caller; `geo::OverpassExtract` decodes a saved Overpass reply.
//!
//! ```ignore
//! let extract = OverpassExtract::from_file("data/paris.json")?;
//! let config = SceneConfig::default();
//! let filter = HighwayFilter::new(&config.highway_filter)?;
//! let data = extract.into_map_data(&filter, config.include_buildings);
//! let (scene, stats) = generate_scene(&data, &bbox, &config)?;
//! scene_to_file(&scene, "data/paris_roads.usda")?;
//! ```

pub mod config;
pub mod draw;
pub mod error;
pub mod geo;
pub mod map_draw;
pub mod serialize_usda;

pub use config::SceneConfig;
pub use draw::generation::GenerationStats;
pub use draw::geometry::{MeshBuffer, Scene};
pub use error::{MapError, Result};
pub use geo::{BBox, HighwayFilter, MapData, OverpassExtract};
pub use map_draw::generate_scene;
pub use serialize_usda::{scene_to_file, scene_to_string, write_scene};
