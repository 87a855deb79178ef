//! Error taxonomy for the map-to-scene pipeline
//!
//! Unresolved node references and degenerate geometry are recovered locally
//! and never show up here; see `GenerationStats` for those counts.

use thiserror::Error;

/// Errors surfaced by the geometry pipeline
#[derive(Debug, Error)]
pub enum MapError {
    #[error("radius_km must be > 0, got {0}")]
    InvalidRadius(f64),

    #[error("invalid bbox: {0}")]
    InvalidBBox(String),

    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("no road data returned; try a different bbox or highway filter")]
    NoMapData,

    #[error("no usable road or building data found")]
    EmptyScene,

    #[error("scene already contains a mesh named '{0}'")]
    DuplicateMesh(String),

    #[error("mesh '{name}' is inconsistent: {reason}")]
    InvalidMesh { name: String, reason: String },

    #[error("invalid highway filter: {0}")]
    InvalidFilter(#[from] regex::Error),

    #[error("malformed Overpass payload: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, MapError>;
