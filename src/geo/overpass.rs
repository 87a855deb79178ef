//! Overpass API adapter
//!
//! Builds the Overpass QL query for an extract and decodes an already
//! downloaded JSON response into `MapData`. Network access lives elsewhere.

use super::types::{BBox, GeoNode, MapData, NodeId, Way};
use crate::error::Result;
use anyhow::Context;
use regex::Regex;
use serde::Deserialize;
use std::collections::HashMap;
use std::path::Path;

pub const DEFAULT_HIGHWAY_FILTER: &str = "primary|secondary|tertiary|residential";

/// Overpass QL selecting highway ways (and optionally buildings) plus their nodes
pub fn build_query(bbox: &BBox, highway_regex: &str, include_buildings: bool) -> String {
    let area = format!("{},{},{},{}", bbox.south, bbox.west, bbox.north, bbox.east);
    let building_clause = if include_buildings {
        format!("  way[\"building\"]({});", area)
    } else {
        String::new()
    };

    format!(
        "[out:json][timeout:60];\n(\n  way[\"highway\"~\"{}\"]({});\n  {}\n);\n(._;>;);\nout body;",
        highway_regex, area, building_clause
    )
}

/// Regex over `highway` tag values; matches anywhere, like Overpass `~`
#[derive(Debug, Clone)]
pub struct HighwayFilter {
    pattern: Regex,
}

impl HighwayFilter {
    pub fn new(pattern: &str) -> Result<Self> {
        Ok(Self { pattern: Regex::new(pattern)? })
    }

    pub fn matches(&self, highway: &str) -> bool {
        self.pattern.is_match(highway)
    }
}

#[derive(Debug, Clone, Deserialize)]
struct RawElement {
    #[serde(rename = "type")]
    kind: String,
    id: i64,
    lat: Option<f64>,
    lon: Option<f64>,
    #[serde(default)]
    nodes: Vec<NodeId>,
    #[serde(default)]
    tags: HashMap<String, String>,
}

#[derive(Debug, Clone, Deserialize)]
struct RawResponse {
    #[serde(default)]
    elements: Vec<RawElement>,
}

/// A decoded Overpass `out body` response
#[derive(Debug, Clone)]
pub struct OverpassExtract {
    elements: Vec<RawElement>,
}

impl OverpassExtract {
    pub fn from_json_str(payload: &str) -> Result<Self> {
        let response: RawResponse = serde_json::from_str(payload)?;
        Ok(Self { elements: response.elements })
    }

    pub fn from_file<P: AsRef<Path>>(path: P) -> anyhow::Result<Self> {
        let path = path.as_ref();
        let payload = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read Overpass extract {}", path.display()))?;
        Self::from_json_str(&payload)
            .with_context(|| format!("Failed to decode Overpass extract {}", path.display()))
    }

    pub fn element_count(&self) -> usize {
        self.elements.len()
    }

    /// Split elements into nodes, road ways and building ways
    ///
    /// A way tagged both `highway` and `building` yields one way of each kind.
    /// Nodes without coordinates and non-node/way elements are ignored.
    pub fn into_map_data(self, filter: &HighwayFilter, include_buildings: bool) -> MapData {
        let mut data = MapData::new();
        for element in self.elements {
            match element.kind.as_str() {
                "node" => {
                    if let (Some(lat), Some(lon)) = (element.lat, element.lon) {
                        data.insert_node(GeoNode { id: element.id, lat, lon });
                    }
                }
                "way" => {
                    let is_road = element
                        .tags
                        .get("highway")
                        .is_some_and(|value| filter.matches(value));
                    let is_building = include_buildings && element.tags.contains_key("building");

                    match (is_road, is_building) {
                        (true, true) => {
                            data.push_way(Way::road(element.nodes.clone()));
                            data.push_way(Way::building(element.nodes));
                        }
                        (true, false) => data.push_way(Way::road(element.nodes)),
                        (false, true) => data.push_way(Way::building(element.nodes)),
                        (false, false) => {}
                    }
                }
                _ => {}
            }
        }
        data
    }
}
