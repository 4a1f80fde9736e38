//! Geofilter and ranker: category, distance, radius, relevance, sort.

use carefind_classifier::{Language, RelevanceAdapter, RelevanceClassifier};
use carefind_core::{distance_km, CategoryFilter, Coordinate, EnrichedResource, RankedResource};
use futures::stream::{self, StreamExt};

/// Limits applied to the relevance step.
#[derive(Debug, Clone, Copy)]
pub struct RankOptions {
    pub max_concurrent_classifications: usize,
    /// Maximum classifier calls in one ranking run. Only in-radius
    /// resources draw on it; those past the budget are kept unclassified.
    pub classifier_budget: usize,
}

impl Default for RankOptions {
    fn default() -> Self {
        Self {
            max_concurrent_classifications: 4,
            classifier_budget: 100,
        }
    }
}

/// A relevance filter request: which adapter to ask, in which language.
pub struct RelevanceCheck<'a, C> {
    pub adapter: &'a RelevanceAdapter<C>,
    pub language: Language,
}

impl<C> Clone for RelevanceCheck<'_, C> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<C> Copy for RelevanceCheck<'_, C> {}

/// Filters and orders `resources` around `center`.
///
/// Steps run in order: category filter, distance computation, inclusive
/// radius filter, optional relevance filter, stable ascending sort by
/// distance. Resources at equal distance keep their input order. Only
/// in-radius resources draw on the classifier budget.
pub async fn rank<C: RelevanceClassifier>(
    resources: Vec<EnrichedResource>,
    center: Coordinate,
    radius_km: f64,
    category: CategoryFilter,
    relevance: Option<RelevanceCheck<'_, C>>,
    options: RankOptions,
) -> Vec<RankedResource> {
    let total = resources.len();
    let resources: Vec<EnrichedResource> = resources
        .into_iter()
        .filter(|r| category.matches(r.category))
        .collect();
    let after_category = resources.len();

    let in_radius = within_radius(resources, center, radius_km);
    let after_radius = in_radius.len();

    let mut ranked = match relevance {
        Some(check) => filter_relevant(in_radius, check, options).await,
        None => in_radius,
    };
    sort_by_distance(&mut ranked);

    tracing::info!(
        total,
        after_category,
        after_radius,
        ranked = ranked.len(),
        %category,
        radius_km,
        "ranking complete"
    );
    ranked
}

/// Classifies up to the budget with bounded concurrency and drops the
/// resources the classifier rejected. Order is preserved.
async fn filter_relevant<C: RelevanceClassifier>(
    resources: Vec<RankedResource>,
    check: RelevanceCheck<'_, C>,
    options: RankOptions,
) -> Vec<RankedResource> {
    let budget = options.classifier_budget;
    if resources.len() > budget {
        tracing::info!(
            budget,
            unclassified = resources.len() - budget,
            "classifier budget exhausted; keeping the rest unclassified"
        );
    }

    let verdicts: Vec<bool> = stream::iter(resources.iter().enumerate())
        .map(|(i, ranked)| async move {
            if i < budget {
                check
                    .adapter
                    .is_relevant(&ranked.resource, check.language)
                    .await
            } else {
                true
            }
        })
        .buffered(options.max_concurrent_classifications.max(1))
        .collect()
        .await;

    resources
        .into_iter()
        .zip(verdicts)
        .filter_map(|(resource, keep)| keep.then_some(resource))
        .collect()
}

/// Attaches distances, drops everything beyond `radius_km` and sorts
/// ascending. The sort is stable.
#[must_use]
pub fn by_distance(
    resources: Vec<EnrichedResource>,
    center: Coordinate,
    radius_km: f64,
) -> Vec<RankedResource> {
    let mut ranked = within_radius(resources, center, radius_km);
    sort_by_distance(&mut ranked);
    ranked
}

/// Attaches distances and keeps resources with `distance <= radius_km`,
/// in input order.
fn within_radius(
    resources: Vec<EnrichedResource>,
    center: Coordinate,
    radius_km: f64,
) -> Vec<RankedResource> {
    resources
        .into_iter()
        .map(|resource| {
            let distance_km = distance_km(center, resource.location);
            RankedResource {
                resource,
                distance_km,
            }
        })
        .filter(|r| r.distance_km <= radius_km)
        .collect()
}

fn sort_by_distance(ranked: &mut [RankedResource]) {
    ranked.sort_by(|a, b| a.distance_km.total_cmp(&b.distance_km));
}

#[cfg(test)]
#[path = "rank_test.rs"]
mod tests;
