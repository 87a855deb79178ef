//! Tessellation module for map geometry
//!
//! This module turns local-space centerlines and footprints into the
//! primitives the mesh assembler consumes.
//!
//! # Submodules
//! - `simplify` - Douglas-Peucker polyline simplification
//! - `strip` - Mitered offset strips for roads and lane stripes
//! - `polygon` - Ear-clipping triangulation for building footprints

mod simplify;
mod strip;
mod polygon;

pub use simplify::{
    point_line_distance,
    simplify_polyline,
};

pub use strip::{
    build_strip,
    build_strip_with_limits,
    MiterLimits,
    DEFAULT_MITER_LIMIT,
    DEFAULT_MIN_MITER_DENOMINATOR,
};

pub use polygon::{
    ear_clip,
    point_in_triangle,
    polygon_area,
    triangulate_polygon,
    Triangulation,
    MAX_EAR_CLIP_ITERATIONS,
};
