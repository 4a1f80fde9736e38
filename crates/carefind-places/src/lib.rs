//! External place lookups for carefind.
//!
//! Wraps the places search/detail provider and the geocoder behind small
//! traits, and builds the two pipeline stages that talk to them: the
//! candidate aggregator (concurrent keyword searches merged by provider id)
//! and the detail resolver (per-candidate enrichment with coarse fallback).

pub mod aggregate;
pub mod error;
pub mod geocode;
pub mod google;
pub mod provider;
pub mod resolve;

mod retry;

pub use aggregate::{aggregate_candidates, AggregateOutcome};
pub use error::PlacesError;
pub use geocode::{GeocodeResult, Geocoder, NominatimClient};
pub use google::GooglePlacesClient;
pub use provider::{PlaceDetails, PlaceHit, PlacesProvider, DETAIL_FIELDS};
pub use resolve::{resolve_all, resolve_candidate};
