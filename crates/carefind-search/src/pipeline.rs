//! End-to-end nearby resource search.

use std::time::Duration;

use carefind_classifier::{Language, RelevanceAdapter, RelevanceClassifier};
use carefind_core::{AppConfig, CategoryFilter, CategorySpec, Coordinate, RankedResource};
use carefind_places::{aggregate_candidates, resolve_all, PlacesProvider};

use crate::error::SearchError;
use crate::rank::{rank, RankOptions, RelevanceCheck};

/// Tunables for one pipeline run.
#[derive(Debug, Clone)]
pub struct PipelineOptions {
    /// Upper bound on any single provider or classifier call, including
    /// that call's own retries.
    pub call_timeout: Duration,
    pub max_concurrent_lookups: usize,
    pub rank: RankOptions,
    pub default_country: String,
    /// Whether to run the relevance filter when a classifier is available.
    pub use_relevance: bool,
}

impl PipelineOptions {
    #[must_use]
    pub fn from_config(config: &AppConfig) -> Self {
        Self {
            call_timeout: call_timeout(
                config.request_timeout_secs,
                config.max_retries,
                config.retry_backoff_base_ms,
            ),
            max_concurrent_lookups: config.max_concurrent_lookups,
            rank: RankOptions {
                max_concurrent_classifications: config.max_concurrent_classifications,
                classifier_budget: config.classifier_budget,
            },
            default_country: config.default_country.clone(),
            use_relevance: true,
        }
    }
}

impl Default for PipelineOptions {
    fn default() -> Self {
        Self {
            call_timeout: Duration::from_secs(10),
            max_concurrent_lookups: 8,
            rank: RankOptions::default(),
            default_country: "United States".to_string(),
            use_relevance: true,
        }
    }
}

/// Per-attempt timeout times attempts, plus the worst-case jittered
/// back-off between them.
fn call_timeout(request_timeout_secs: u64, max_retries: u32, backoff_base_ms: u64) -> Duration {
    let attempts = u64::from(max_retries) + 1;
    let backoff_ms: u64 = (0..max_retries.min(10))
        .map(|n| backoff_base_ms.saturating_mul(1 << n).min(30_000))
        .fold(0, u64::saturating_add);
    Duration::from_secs(request_timeout_secs.saturating_mul(attempts))
        + Duration::from_millis(backoff_ms.saturating_mul(5) / 4)
}

/// Finds support resources near `center`.
///
/// Aggregates candidates for every configured category, resolves their
/// details, then filters by `category`, relevance (when a classifier is
/// given and enabled), and radius, ordered nearest first.
///
/// # Errors
///
/// Returns [`SearchError::InvalidInput`] for an out-of-range center or a
/// negative or non-finite radius, before any external call, and
/// [`SearchError::AllSearchesFailed`] when every place search failed.
#[allow(clippy::too_many_arguments)]
pub async fn find_nearby_resources<P, C>(
    provider: &P,
    classifier: Option<&RelevanceAdapter<C>>,
    categories: &[CategorySpec],
    center: Coordinate,
    radius_km: f64,
    category: CategoryFilter,
    language: Language,
    options: &PipelineOptions,
) -> Result<Vec<RankedResource>, SearchError>
where
    P: PlacesProvider,
    C: RelevanceClassifier,
{
    center
        .validate()
        .map_err(|e| SearchError::InvalidInput(e.to_string()))?;
    if !radius_km.is_finite() || radius_km < 0.0 {
        return Err(SearchError::InvalidInput(format!(
            "radius must be a finite, non-negative number of kilometres, got {radius_km}"
        )));
    }

    tracing::info!(%center, radius_km, %category, ?language, "searching for nearby resources");

    let outcome =
        aggregate_candidates(provider, categories, center, radius_km, options.call_timeout).await;
    if outcome.all_failed() {
        return Err(SearchError::AllSearchesFailed {
            attempted: outcome.searches_attempted,
        });
    }

    let resources = resolve_all(
        provider,
        &outcome.candidates,
        &options.default_country,
        options.max_concurrent_lookups,
        options.call_timeout,
    )
    .await;

    let relevance = classifier
        .filter(|_| options.use_relevance)
        .map(|adapter| RelevanceCheck { adapter, language });

    Ok(rank(resources, center, radius_km, category, relevance, options.rank).await)
}
