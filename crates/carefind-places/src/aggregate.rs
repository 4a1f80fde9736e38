//! Candidate aggregation: fan out keyword searches, merge, deduplicate.

use std::collections::HashSet;
use std::time::Duration;

use carefind_core::{CategorySpec, Coordinate, RawCandidate};
use futures::future::join_all;

use crate::error::PlacesError;
use crate::provider::PlacesProvider;

/// Deduplicated candidates plus counters describing how the searches went.
#[derive(Debug, Clone, Default)]
pub struct AggregateOutcome {
    /// Unique candidates in first-seen order.
    pub candidates: Vec<RawCandidate>,
    pub searches_attempted: usize,
    pub searches_failed: usize,
    /// Hits discarded because their provider id was already registered.
    pub duplicates_dropped: usize,
}

impl AggregateOutcome {
    /// `true` when at least one search ran and every one of them failed.
    #[must_use]
    pub fn all_failed(&self) -> bool {
        self.searches_attempted > 0 && self.searches_failed == self.searches_attempted
    }
}

/// Runs one search per keyword of every category around `center`, all
/// concurrently, and merges the hits by provider id.
///
/// A search that errors or exceeds `call_timeout` contributes nothing and
/// is counted in [`AggregateOutcome::searches_failed`]. Results are merged
/// in category order, then keyword order, so when a place appears under
/// several categories the first configured category keeps it.
pub async fn aggregate_candidates<P: PlacesProvider>(
    provider: &P,
    categories: &[CategorySpec],
    center: Coordinate,
    radius_km: f64,
    call_timeout: Duration,
) -> AggregateOutcome {
    let radius_m = radius_km * 1000.0;

    let searches = categories.iter().flat_map(|spec| {
        spec.keywords
            .iter()
            .map(move |keyword| (spec.label, keyword.as_str()))
    });

    let results = join_all(searches.map(|(label, keyword)| async move {
        let result = match tokio::time::timeout(
            call_timeout,
            provider.search(keyword, center, radius_m),
        )
        .await
        {
            Ok(result) => result,
            Err(_) => Err(PlacesError::Timeout {
                operation: format!("search '{keyword}'"),
                timeout_ms: call_timeout.as_millis(),
            }),
        };
        (label, keyword, result)
    }))
    .await;

    let mut outcome = AggregateOutcome {
        searches_attempted: results.len(),
        ..AggregateOutcome::default()
    };
    let mut seen: HashSet<String> = HashSet::new();

    for (label, keyword, result) in results {
        let hits = match result {
            Ok(hits) => hits,
            Err(e) => {
                outcome.searches_failed += 1;
                tracing::warn!(
                    category = %label,
                    keyword,
                    error = %e,
                    "places search failed; contributing no candidates"
                );
                continue;
            }
        };

        for hit in hits {
            if !seen.insert(hit.provider_id.clone()) {
                outcome.duplicates_dropped += 1;
                continue;
            }
            outcome.candidates.push(RawCandidate {
                provider_id: hit.provider_id,
                name: hit.name,
                location: hit.location,
                category: label,
                rough_address: hit.formatted_address,
                vicinity: hit.vicinity,
            });
        }
    }

    tracing::info!(
        searches = outcome.searches_attempted,
        failed = outcome.searches_failed,
        unique = outcome.candidates.len(),
        duplicates = outcome.duplicates_dropped,
        "candidate aggregation complete"
    );

    outcome
}

#[cfg(test)]
#[path = "aggregate_test.rs"]
mod tests;
