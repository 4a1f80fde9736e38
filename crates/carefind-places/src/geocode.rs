//! Free-text place name to coordinate lookup via a Nominatim-compatible API.

use std::future::Future;
use std::time::Duration;

use carefind_core::Coordinate;
use reqwest::{Client, Url};
use serde::Deserialize;

use crate::error::PlacesError;

/// The best match for a geocoding query.
#[derive(Debug, Clone, PartialEq)]
pub struct GeocodeResult {
    pub position: Coordinate,
    pub display_name: String,
}

/// Resolves a human-entered place description to a coordinate.
pub trait Geocoder: Send + Sync {
    fn geocode(
        &self,
        query: &str,
    ) -> impl Future<Output = Result<GeocodeResult, PlacesError>> + Send;
}

// Nominatim returns coordinates as decimal strings.
#[derive(Debug, Deserialize)]
struct NominatimPlace {
    lat: String,
    lon: String,
    #[serde(default)]
    display_name: String,
}

pub struct NominatimClient {
    client: Client,
    base_url: Url,
}

impl NominatimClient {
    /// # Errors
    ///
    /// Returns [`PlacesError::Http`] if the `reqwest::Client` cannot be built,
    /// or [`PlacesError::InvalidBaseUrl`] if `base_url` does not parse.
    pub fn new(base_url: &str, timeout_secs: u64, user_agent: &str) -> Result<Self, PlacesError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .user_agent(user_agent)
            .build()?;

        let normalised = format!("{}/", base_url.trim_end_matches('/'));
        let base_url = Url::parse(&normalised).map_err(|e| PlacesError::InvalidBaseUrl {
            url: base_url.to_string(),
            reason: e.to_string(),
        })?;

        Ok(Self { client, base_url })
    }

    fn search_url(&self, query: &str) -> Result<Url, PlacesError> {
        let mut url = self
            .base_url
            .join("search")
            .map_err(|e| PlacesError::InvalidBaseUrl {
                url: self.base_url.to_string(),
                reason: e.to_string(),
            })?;
        url.query_pairs_mut()
            .append_pair("format", "json")
            .append_pair("q", query)
            .append_pair("limit", "1");
        Ok(url)
    }
}

impl Geocoder for NominatimClient {
    async fn geocode(&self, query: &str) -> Result<GeocodeResult, PlacesError> {
        let query = query.trim();
        if query.is_empty() {
            return Err(PlacesError::EmptyQuery);
        }

        let url = self.search_url(query)?;
        let body = self
            .client
            .get(url)
            .send()
            .await?
            .error_for_status()?
            .text()
            .await?;

        let places: Vec<NominatimPlace> =
            serde_json::from_str(&body).map_err(|e| PlacesError::Deserialize {
                context: format!("geocode(q={query})"),
                source: e,
            })?;

        let no_match = || PlacesError::NoGeocodeMatch {
            query: query.to_string(),
        };
        let place = places.into_iter().next().ok_or_else(no_match)?;

        let lat: f64 = place.lat.trim().parse().map_err(|_| no_match())?;
        let lng: f64 = place.lon.trim().parse().map_err(|_| no_match())?;
        let position = Coordinate::new(lat, lng).map_err(|_| no_match())?;

        tracing::debug!(query, %position, "geocoded");
        Ok(GeocodeResult {
            position,
            display_name: place.display_name,
        })
    }
}
