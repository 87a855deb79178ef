//! Geographic input side of the pipeline
//!
//! # Submodules
//! - `types` - Bounding boxes, nodes, ways and the parsed extract
//! - `projection` - Local equirectangular projection and bbox helpers
//! - `overpass` - Overpass query text and JSON response decoding

mod types;
mod projection;
mod overpass;

pub use types::{
    BBox,
    GeoNode,
    MapData,
    NodeId,
    Way,
    WayKind,
};

pub use projection::{
    bbox_from_center,
    project,
    LocalProjection,
    EARTH_RADIUS_M,
    KM_PER_DEG_LAT,
    KM_PER_DEG_LON,
};

pub use overpass::{
    build_query,
    HighwayFilter,
    OverpassExtract,
    DEFAULT_HIGHWAY_FILTER,
};
