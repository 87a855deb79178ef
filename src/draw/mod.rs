//! Geometry pipeline from projected map ways to mesh buffers
//!
//! # Submodules
//! - `geometry` - Core types: points, strips, mesh buffers and scenes
//! - `tessellation` - Simplification, ribbon extrusion and ear clipping
//! - `generation` - Per-way mesh generation for roads and buildings

pub mod geometry;
pub mod tessellation;
pub mod generation;
