//! Provider seam for place search and place detail lookups.

use std::future::Future;

use carefind_core::{BusinessHours, Coordinate};

use crate::error::PlacesError;

/// Detail fields requested for every candidate.
pub const DETAIL_FIELDS: &[&str] = &[
    "place_id",
    "name",
    "formatted_address",
    "vicinity",
    "formatted_phone_number",
    "website",
    "geometry",
    "opening_hours",
];

/// One search hit that carried the minimum usable shape (id, name and an
/// in-range location). Category is assigned by the aggregator.
#[derive(Debug, Clone, PartialEq)]
pub struct PlaceHit {
    pub provider_id: String,
    pub name: String,
    pub location: Coordinate,
    pub formatted_address: Option<String>,
    pub vicinity: Option<String>,
}

/// Richer attributes for one place. Every field is optional; absent fields
/// fall back to the coarse search record.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PlaceDetails {
    pub name: Option<String>,
    pub location: Option<Coordinate>,
    pub formatted_address: Option<String>,
    pub vicinity: Option<String>,
    pub phone: Option<String>,
    pub website: Option<String>,
    pub hours: Option<BusinessHours>,
}

/// A places backend able to run keyword searches around a point and fetch
/// per-place details.
pub trait PlacesProvider: Send + Sync {
    /// Searches for `keyword` within `radius_m` metres of `center`.
    fn search(
        &self,
        keyword: &str,
        center: Coordinate,
        radius_m: f64,
    ) -> impl Future<Output = Result<Vec<PlaceHit>, PlacesError>> + Send;

    /// Fetches the requested detail `fields` for one place.
    fn details(
        &self,
        provider_id: &str,
        fields: &[&str],
    ) -> impl Future<Output = Result<PlaceDetails, PlacesError>> + Send;
}
