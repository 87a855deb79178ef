//! Geometry module for local-space map data
//!
//! This module provides the geometric types that flow between pipeline stages:
//! ground-plane points and polylines, offset strips, mesh buffers and scenes.
//!
//! # Submodules
//! - `types` - Core geometric primitives (Point2, Polyline, Strip)
//! - `mesh` - Flat mesh buffers with extents and invariant checks
//! - `scene` - Insertion-ordered named mesh collection

mod types;
mod mesh;
mod scene;

pub use types::{
    Point2,
    Polyline,
    RailPair,
    Strip,
    NORMALIZE_EPSILON,
};

pub use mesh::{
    Extent,
    MeshBuffer,
    UP_NORMAL,
};

pub use scene::{
    Scene,
    DEFAULT_ROOT_PRIM,
};
