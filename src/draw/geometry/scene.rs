//! Named, insertion-ordered collection of meshes
//!
//! Order matters: the serializer walks meshes in the order they were added,
//! which keeps the output document deterministic.

use super::mesh::MeshBuffer;
use crate::error::{MapError, Result};
use indexmap::IndexMap;

pub const DEFAULT_ROOT_PRIM: &str = "World";

/// Stage-level metadata plus the meshes parented under the root prim
#[derive(Debug, Clone, PartialEq)]
pub struct Scene {
    pub root_name: String,
    pub meters_per_unit: f64,
    pub up_axis: String,
    meshes: IndexMap<String, MeshBuffer>,
}

impl Scene {
    pub fn new() -> Self {
        Self {
            root_name: DEFAULT_ROOT_PRIM.to_string(),
            meters_per_unit: 1.0,
            up_axis: "Y".to_string(),
            meshes: IndexMap::new(),
        }
    }

    /// Add a mesh under a unique name
    pub fn add_mesh(&mut self, name: impl Into<String>, mesh: MeshBuffer) -> Result<()> {
        let name = name.into();
        if self.meshes.contains_key(&name) {
            return Err(MapError::DuplicateMesh(name));
        }
        self.meshes.insert(name, mesh);
        Ok(())
    }

    pub fn get(&self, name: &str) -> Option<&MeshBuffer> {
        self.meshes.get(name)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &MeshBuffer)> {
        self.meshes.iter().map(|(name, mesh)| (name.as_str(), mesh))
    }

    pub fn len(&self) -> usize {
        self.meshes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.meshes.is_empty()
    }

    /// Validate every mesh
    pub fn validate(&self) -> Result<()> {
        self.meshes
            .iter()
            .try_for_each(|(name, mesh)| mesh.validate(name))
    }
}

impl Default for Scene {
    fn default() -> Self {
        Self::new()
    }
}
