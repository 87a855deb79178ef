//! Local map projection
//!
//! Equirectangular approximation around a reference point. Good enough for a
//! city-sized extent; distortion grows with distance from the reference.

use super::types::BBox;
use crate::draw::geometry::Point2;
use crate::error::{MapError, Result};

/// Equatorial radius used for the projection, in meters
pub const EARTH_RADIUS_M: f64 = 6_378_137.0;

/// Kilometers per degree of latitude
pub const KM_PER_DEG_LAT: f64 = 110.574;

/// Kilometers per degree of longitude at the equator
pub const KM_PER_DEG_LON: f64 = 111.32;

/// Project `(lat, lon)` onto the plane tangent at `(lat0, lon0)`; x east, z north
pub fn project(lat: f64, lon: f64, lat0: f64, lon0: f64) -> Point2 {
    let x = (lon - lon0).to_radians() * lat0.to_radians().cos() * EARTH_RADIUS_M;
    let z = (lat - lat0).to_radians() * EARTH_RADIUS_M;
    Point2::new(x, z)
}

/// Square-ish bounding box of `radius_km` around a center point
pub fn bbox_from_center(center_lat: f64, center_lon: f64, radius_km: f64) -> Result<BBox> {
    if radius_km.is_nan() || radius_km <= 0.0 {
        return Err(MapError::InvalidRadius(radius_km));
    }

    let lat_delta = radius_km / KM_PER_DEG_LAT;
    let cos_lat = center_lat.to_radians().cos();
    let lon_delta = if cos_lat.abs() < 1e-6 {
        radius_km / KM_PER_DEG_LON
    } else {
        radius_km / (KM_PER_DEG_LON * cos_lat)
    };

    BBox::new(
        center_lat - lat_delta,
        center_lon - lon_delta,
        center_lat + lat_delta,
        center_lon + lon_delta,
    )
}

/// Projection around a fixed reference point with a uniform output scale
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LocalProjection {
    pub lat0: f64,
    pub lon0: f64,
    pub scale: f64,
}

impl LocalProjection {
    pub fn new(lat0: f64, lon0: f64, scale: f64) -> Self {
        Self { lat0, lon0, scale }
    }

    /// Centered on the bbox midpoint
    pub fn centered_on(bbox: &BBox, scale: f64) -> Self {
        let (lat0, lon0) = bbox.center();
        Self::new(lat0, lon0, scale)
    }

    pub fn project(&self, lat: f64, lon: f64) -> Point2 {
        project(lat, lon, self.lat0, self.lon0) * self.scale
    }
}
