//! Detail resolution: enrich each candidate, falling back to the coarse record.

use std::time::Duration;

use carefind_core::{EnrichedResource, RawCandidate};
use futures::stream::{self, StreamExt};

use crate::error::PlacesError;
use crate::provider::{PlaceDetails, PlacesProvider, DETAIL_FIELDS};

/// Enriches one candidate with a detail lookup.
///
/// Never fails: on any lookup error or timeout the coarse candidate fields
/// are used as-is. The resource id is always the candidate's provider id.
pub async fn resolve_candidate<P: PlacesProvider>(
    provider: &P,
    candidate: &RawCandidate,
    country: &str,
    call_timeout: Duration,
) -> EnrichedResource {
    let coarse = EnrichedResource::from_candidate(candidate, country);

    let lookup = tokio::time::timeout(
        call_timeout,
        provider.details(&candidate.provider_id, DETAIL_FIELDS),
    )
    .await
    .unwrap_or_else(|_| {
        Err(PlacesError::Timeout {
            operation: format!("details '{}'", candidate.provider_id),
            timeout_ms: call_timeout.as_millis(),
        })
    });

    match lookup {
        Ok(details) => merge_details(coarse, details),
        Err(e) => {
            tracing::warn!(
                provider_id = %candidate.provider_id,
                error = %e,
                "detail lookup failed; using search record"
            );
            coarse
        }
    }
}

/// Resolves every candidate with at most `max_concurrent` lookups in
/// flight. Output order matches input order.
pub async fn resolve_all<P: PlacesProvider>(
    provider: &P,
    candidates: &[RawCandidate],
    country: &str,
    max_concurrent: usize,
    call_timeout: Duration,
) -> Vec<EnrichedResource> {
    stream::iter(candidates)
        .map(|candidate| resolve_candidate(provider, candidate, country, call_timeout))
        .buffered(max_concurrent.max(1))
        .collect()
        .await
}

/// Detail values win wherever they are present.
fn merge_details(coarse: EnrichedResource, details: PlaceDetails) -> EnrichedResource {
    EnrichedResource {
        id: coarse.id,
        name: details.name.unwrap_or(coarse.name),
        category: coarse.category,
        location: details.location.unwrap_or(coarse.location),
        address: details.formatted_address.unwrap_or(coarse.address),
        city: details.vicinity.unwrap_or(coarse.city),
        country: coarse.country,
        phone: details.phone.or(coarse.phone),
        website: details.website.or(coarse.website),
        hours: details.hours.or(coarse.hours),
    }
}
