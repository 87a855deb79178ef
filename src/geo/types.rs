//! Source map records: bounding boxes, nodes and ways
//!
//! These are plain data handed over by whatever fetched the map extract.

use crate::error::{MapError, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

pub type NodeId = i64;

/// Geographic bounding box in degrees
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BBox {
    pub south: f64,
    pub west: f64,
    pub north: f64,
    pub east: f64,
}

impl BBox {
    pub fn new(south: f64, west: f64, north: f64, east: f64) -> Result<Self> {
        let bbox = Self { south, west, north, east };
        bbox.validate()?;
        Ok(bbox)
    }

    pub fn validate(&self) -> Result<()> {
        let values = [self.south, self.west, self.north, self.east];
        if values.iter().any(|v| !v.is_finite()) {
            return Err(MapError::InvalidBBox(format!("non-finite coordinate in {}", self)));
        }
        if self.south >= self.north {
            return Err(MapError::InvalidBBox(format!(
                "south {} must be below north {}",
                self.south, self.north
            )));
        }
        if self.west >= self.east {
            return Err(MapError::InvalidBBox(format!(
                "west {} must be below east {}",
                self.west, self.east
            )));
        }
        Ok(())
    }

    /// Midpoint as `(lat, lon)`
    pub fn center(&self) -> (f64, f64) {
        ((self.south + self.north) / 2.0, (self.west + self.east) / 2.0)
    }
}

impl fmt::Display for BBox {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.5},{:.5},{:.5},{:.5}", self.south, self.west, self.north, self.east)
    }
}

/// Parses `south,west,north,east`
impl FromStr for BBox {
    type Err = MapError;

    fn from_str(s: &str) -> Result<Self> {
        let parts: Vec<&str> = s.split(',').map(str::trim).collect();
        if parts.len() != 4 {
            return Err(MapError::InvalidBBox(
                "bbox must be 'south,west,north,east'".to_string(),
            ));
        }
        let mut values = [0.0; 4];
        for (slot, part) in values.iter_mut().zip(&parts) {
            *slot = part
                .parse()
                .map_err(|_| MapError::InvalidBBox(format!("'{}' is not a number", part)))?;
        }
        BBox::new(values[0], values[1], values[2], values[3])
    }
}

/// A graph node from the source data
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoNode {
    pub id: NodeId,
    pub lat: f64,
    pub lon: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WayKind {
    Road,
    Building,
}

/// Ordered node references forming a line (road) or closed ring (building)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Way {
    pub nodes: Vec<NodeId>,
    pub kind: WayKind,
}

impl Way {
    pub fn road(nodes: Vec<NodeId>) -> Self {
        Self { nodes, kind: WayKind::Road }
    }

    pub fn building(nodes: Vec<NodeId>) -> Self {
        Self { nodes, kind: WayKind::Building }
    }

    /// First id repeats as the last one
    pub fn is_closed(&self) -> bool {
        self.nodes.len() > 1 && self.nodes.first() == self.nodes.last()
    }
}

/// A parsed extract: node coordinates plus ways in source order
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MapData {
    pub nodes: HashMap<NodeId, GeoNode>,
    pub ways: Vec<Way>,
}

impl MapData {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a node; a repeated id replaces the earlier coordinates
    pub fn insert_node(&mut self, node: GeoNode) {
        self.nodes.insert(node.id, node);
    }

    pub fn push_way(&mut self, way: Way) {
        self.ways.push(way);
    }

    pub fn ways_of(&self, kind: WayKind) -> impl Iterator<Item = &Way> {
        self.ways.iter().filter(move |w| w.kind == kind)
    }
}

impl FromIterator<GeoNode> for MapData {
    fn from_iter<I: IntoIterator<Item = GeoNode>>(iter: I) -> Self {
        let mut data = MapData::new();
        for node in iter {
            data.insert_node(node);
        }
        data
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bbox_parse_and_center() {
        let bbox: BBox = " 48.815, 2.224 ,48.902,2.469".parse().unwrap();
        assert_eq!(bbox.south, 48.815);
        assert_eq!(bbox.east, 2.469);
        let (lat, lon) = bbox.center();
        assert!((lat - 48.8585).abs() < 1e-12);
        assert!((lon - 2.3465).abs() < 1e-12);
        assert_eq!(bbox.to_string(), "48.81500,2.22400,48.90200,2.46900");
    }

    #[test]
    fn test_bbox_rejects_bad_input() {
        assert!("1,2,3".parse::<BBox>().is_err());
        assert!("a,2,3,4".parse::<BBox>().is_err());
        assert!(matches!(BBox::new(10.0, 0.0, 5.0, 1.0), Err(MapError::InvalidBBox(_))));
        assert!(BBox::new(0.0, 1.0, 5.0, 1.0).is_err());
        assert!(BBox::new(0.0, f64::NAN, 5.0, 1.0).is_err());
    }

    #[test]
    fn test_way_closed() {
        assert!(Way::building(vec![1, 2, 3, 1]).is_closed());
        assert!(!Way::building(vec![1, 2, 3]).is_closed());
        assert!(!Way::road(vec![1]).is_closed());
    }

    #[test]
    fn test_map_data_by_kind() {
        let mut data: MapData = [GeoNode { id: 1, lat: 0.0, lon: 0.0 }].into_iter().collect();
        data.push_way(Way::road(vec![1, 2]));
        data.push_way(Way::building(vec![1, 2, 3, 1]));
        data.push_way(Way::road(vec![3, 4]));
        assert_eq!(data.nodes.len(), 1);
        assert_eq!(data.ways_of(WayKind::Road).count(), 2);
        assert_eq!(data.ways_of(WayKind::Building).count(), 1);
    }
}
