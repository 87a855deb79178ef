//! Pipeline tunables
//!
//! Every numeric knob the generator uses lives here; the algorithms take
//! their parameters explicitly and bake in no defaults of their own.

use crate::draw::tessellation::MiterLimits;
use crate::error::{MapError, Result};
use crate::geo::DEFAULT_HIGHWAY_FILTER;
use anyhow::Context;
use serde::{Deserialize, Serialize};
use std::path::Path;

pub const ROAD_COLOR: [f32; 3] = [0.38, 0.40, 0.44];
pub const LANE_COLOR: [f32; 3] = [0.94, 0.92, 0.78];
pub const BUILDING_COLOR: [f32; 3] = [0.25, 0.33, 0.5];

/// Settings for turning a map extract into a scene
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SceneConfig {
    /// Full road width in meters
    pub road_width: f64,
    /// Multiplier applied to `road_width`
    pub width_scale: f64,
    /// Full lane stripe width in meters; 0 disables lane stripes
    pub lane_width: f64,
    /// Height of lane stripes above the road surface, avoids z-fighting
    pub lane_height: f64,
    /// Multiplier applied to projected coordinates
    pub scale: f64,
    /// Road simplification tolerance in meters; 0 disables
    pub simplify: f64,
    /// Building simplification tolerance; falls back to `simplify`
    pub building_simplify: Option<f64>,
    /// Road way cap; 0 means unlimited
    pub max_ways: usize,
    /// Building way cap; 0 means unlimited
    pub max_buildings: usize,
    pub include_buildings: bool,
    /// Regex over `highway` tag values
    pub highway_filter: String,
    pub miter: MiterLimits,
    pub road_color: [f32; 3],
    pub lane_color: [f32; 3],
    pub building_color: [f32; 3],
}

impl Default for SceneConfig {
    fn default() -> Self {
        Self {
            road_width: 6.0,
            width_scale: 1.0,
            lane_width: 0.6,
            lane_height: 0.03,
            scale: 1.0,
            simplify: 0.0,
            building_simplify: None,
            max_ways: 0,
            max_buildings: 0,
            include_buildings: true,
            highway_filter: DEFAULT_HIGHWAY_FILTER.to_string(),
            miter: MiterLimits::default(),
            road_color: ROAD_COLOR,
            lane_color: LANE_COLOR,
            building_color: BUILDING_COLOR,
        }
    }
}

impl SceneConfig {
    pub fn from_json_str(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn from_json_file<P: AsRef<Path>>(path: P) -> anyhow::Result<Self> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config {}", path.display()))?;
        let config = Self::from_json_str(&json)
            .with_context(|| format!("Failed to parse config {}", path.display()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn road_half_width(&self) -> f64 {
        self.road_width * self.width_scale / 2.0
    }

    /// Zero when lane stripes are disabled
    pub fn lane_half_width(&self) -> f64 {
        if self.lane_width > 0.0 {
            self.lane_width / 2.0
        } else {
            0.0
        }
    }

    pub fn building_tolerance(&self) -> f64 {
        self.building_simplify.unwrap_or(self.simplify)
    }

    pub fn validate(&self) -> Result<()> {
        let positive = [
            ("road_width", self.road_width),
            ("width_scale", self.width_scale),
            ("scale", self.scale),
        ];
        for (name, value) in positive {
            if !value.is_finite() || value <= 0.0 {
                return Err(invalid(format!("{} must be > 0, got {}", name, value)));
            }
        }

        let non_negative = [
            ("lane_width", self.lane_width),
            ("simplify", self.simplify),
            ("building_simplify", self.building_tolerance()),
        ];
        for (name, value) in non_negative {
            if !value.is_finite() || value < 0.0 {
                return Err(invalid(format!("{} must be >= 0, got {}", name, value)));
            }
        }

        if !self.lane_height.is_finite() {
            return Err(invalid(format!("lane_height must be finite, got {}", self.lane_height)));
        }
        if !self.miter.limit_factor.is_finite() || self.miter.limit_factor < 1.0 {
            return Err(invalid(format!(
                "miter limit_factor must be >= 1, got {}",
                self.miter.limit_factor
            )));
        }
        let min_denominator = self.miter.min_denominator;
        if min_denominator.is_nan() || min_denominator <= 0.0 || min_denominator > 1.0 {
            return Err(invalid(format!(
                "miter min_denominator must be in (0, 1], got {}",
                self.miter.min_denominator
            )));
        }
        Ok(())
    }
}

fn invalid(reason: String) -> MapError {
    MapError::InvalidConfig(reason)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = SceneConfig::default();
        assert_eq!(config.road_half_width(), 3.0);
        assert_eq!(config.lane_half_width(), 0.3);
        assert_eq!(config.building_tolerance(), 0.0);
        assert_eq!(config.miter.limit_factor, 4.0);
        assert_eq!(config.miter.min_denominator, 0.1);
        config.validate().unwrap();
    }

    #[test]
    fn test_partial_json_keeps_defaults() {
        let config = SceneConfig::from_json_str(
            r#"{"road_width": 8.0, "width_scale": 0.5, "simplify": 1.5, "miter": {"limit_factor": 2.0}}"#,
        )
        .unwrap();
        assert_eq!(config.road_half_width(), 2.0);
        assert_eq!(config.building_tolerance(), 1.5);
        assert_eq!(config.miter.limit_factor, 2.0);
        assert_eq!(config.miter.min_denominator, 0.1);
        assert_eq!(config.lane_width, 0.6);
    }

    #[test]
    fn test_building_tolerance_override() {
        let config = SceneConfig { simplify: 2.0, building_simplify: Some(0.0), ..Default::default() };
        assert_eq!(config.building_tolerance(), 0.0);
    }

    #[test]
    fn test_lane_stripes_disabled() {
        let config = SceneConfig { lane_width: 0.0, ..Default::default() };
        assert_eq!(config.lane_half_width(), 0.0);
        config.validate().unwrap();
    }

    #[test]
    fn test_validate_rejects() {
        let bad = [
            SceneConfig { road_width: 0.0, ..Default::default() },
            SceneConfig { scale: -1.0, ..Default::default() },
            SceneConfig { simplify: f64::NAN, ..Default::default() },
            SceneConfig { building_simplify: Some(-0.5), ..Default::default() },
            SceneConfig { lane_height: f64::INFINITY, ..Default::default() },
            SceneConfig { miter: MiterLimits { limit_factor: 0.5, min_denominator: 0.1 }, ..Default::default() },
            SceneConfig { miter: MiterLimits { limit_factor: 4.0, min_denominator: 0.0 }, ..Default::default() },
        ];
        for config in bad {
            assert!(matches!(config.validate(), Err(MapError::InvalidConfig(_))), "{:?}", config);
        }
    }
}
