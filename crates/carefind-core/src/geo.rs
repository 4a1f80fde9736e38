//! Great-circle distance between coordinates.

use serde::{Deserialize, Serialize};

use crate::CoreError;

/// Mean Earth radius used by the haversine formula.
pub const EARTH_RADIUS_KM: f64 = 6371.0;

/// A WGS84 point in decimal degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinate {
    pub lat: f64,
    pub lng: f64,
}

impl Coordinate {
    /// Builds a coordinate, rejecting latitudes outside `[-90, 90]` and
    /// longitudes outside `[-180, 180]` (NaN is rejected by both checks).
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::InvalidLatitude`] or [`CoreError::InvalidLongitude`].
    pub fn new(lat: f64, lng: f64) -> Result<Self, CoreError> {
        let coord = Self { lat, lng };
        coord.validate()?;
        Ok(coord)
    }

    /// Checks that an already-constructed coordinate is in range.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::InvalidLatitude`] or [`CoreError::InvalidLongitude`].
    pub fn validate(&self) -> Result<(), CoreError> {
        if !(-90.0..=90.0).contains(&self.lat) {
            return Err(CoreError::InvalidLatitude(self.lat));
        }
        if !(-180.0..=180.0).contains(&self.lng) {
            return Err(CoreError::InvalidLongitude(self.lng));
        }
        Ok(())
    }

    /// Distance to `other` in kilometres. See [`distance_km`].
    #[must_use]
    pub fn distance_km(&self, other: &Coordinate) -> f64 {
        distance_km(*self, *other)
    }
}

impl std::fmt::Display for Coordinate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{},{}", self.lat, self.lng)
    }
}

/// Haversine great-circle distance in kilometres.
///
/// Deltas are taken as absolute values and the cosine product is formed
/// from the smaller latitude first, so swapping `a` and `b` produces the
/// bit-identical result. Out-of-range input yields an unspecified number.
#[must_use]
pub fn distance_km(a: Coordinate, b: Coordinate) -> f64 {
    let (lo, hi) = if a.lat <= b.lat {
        (a.lat, b.lat)
    } else {
        (b.lat, a.lat)
    };

    let delta_lat = (hi - lo).to_radians();
    let delta_lng = (a.lng - b.lng).abs().to_radians();

    let sin_lat = (delta_lat / 2.0).sin();
    let sin_lng = (delta_lng / 2.0).sin();

    let h = sin_lat * sin_lat + lo.to_radians().cos() * hi.to_radians().cos() * sin_lng * sin_lng;

    // Rounding can push h a hair past 1.0 for antipodal points.
    2.0 * EARTH_RADIUS_KM * h.min(1.0).sqrt().asin()
}
