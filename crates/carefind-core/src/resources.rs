//! Resource records as they move through the discovery pipeline.

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::geo::Coordinate;
use crate::hours::BusinessHours;
use crate::CoreError;

/// The closed set of resource categories searched for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CategoryLabel {
    #[serde(rename = "Support Group")]
    SupportGroup,
    #[serde(rename = "Treatment Center")]
    TreatmentCenter,
    Counseling,
    #[serde(rename = "Financial Aid")]
    FinancialAid,
    Hospice,
    Transportation,
}

impl CategoryLabel {
    pub const ALL: [CategoryLabel; 6] = [
        CategoryLabel::SupportGroup,
        CategoryLabel::TreatmentCenter,
        CategoryLabel::Counseling,
        CategoryLabel::FinancialAid,
        CategoryLabel::Hospice,
        CategoryLabel::Transportation,
    ];

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            CategoryLabel::SupportGroup => "Support Group",
            CategoryLabel::TreatmentCenter => "Treatment Center",
            CategoryLabel::Counseling => "Counseling",
            CategoryLabel::FinancialAid => "Financial Aid",
            CategoryLabel::Hospice => "Hospice",
            CategoryLabel::Transportation => "Transportation",
        }
    }
}

impl std::fmt::Display for CategoryLabel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CategoryLabel {
    type Err = CoreError;

    /// Accepts the display label in any case, with spaces, dashes or
    /// underscores between words (`"support-group"`, `"Support Group"`).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = normalise_label(s);
        CategoryLabel::ALL
            .into_iter()
            .find(|label| normalise_label(label.as_str()) == wanted)
            .ok_or_else(|| CoreError::UnknownCategory(s.to_string()))
    }
}

fn normalise_label(s: &str) -> String {
    s.trim()
        .chars()
        .filter(|c| !matches!(c, ' ' | '-' | '_'))
        .flat_map(char::to_lowercase)
        .collect()
}

/// Category selection for ranking: everything, or one exact label.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CategoryFilter {
    #[default]
    All,
    Only(CategoryLabel),
}

impl CategoryFilter {
    #[must_use]
    pub fn matches(self, label: CategoryLabel) -> bool {
        match self {
            CategoryFilter::All => true,
            CategoryFilter::Only(wanted) => wanted == label,
        }
    }
}

impl FromStr for CategoryFilter {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.trim().eq_ignore_ascii_case("all") {
            return Ok(CategoryFilter::All);
        }
        s.parse().map(CategoryFilter::Only)
    }
}

impl std::fmt::Display for CategoryFilter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CategoryFilter::All => f.write_str("All"),
            CategoryFilter::Only(label) => label.fmt(f),
        }
    }
}

/// A single place returned by one keyword search, before enrichment.
///
/// The same `provider_id` may appear in many searches.
#[derive(Debug, Clone, PartialEq)]
pub struct RawCandidate {
    pub provider_id: String,
    pub name: String,
    pub location: Coordinate,
    pub category: CategoryLabel,
    /// Provider-formatted address from the search result, if any.
    pub rough_address: Option<String>,
    /// Short neighbourhood/locality string from the search result.
    pub vicinity: Option<String>,
}

/// A deduplicated place merged with any detail-lookup data.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EnrichedResource {
    pub id: String,
    pub name: String,
    pub category: CategoryLabel,
    pub location: Coordinate,
    pub address: String,
    pub city: String,
    pub country: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub website: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hours: Option<BusinessHours>,
}

impl EnrichedResource {
    /// Coarse record built from a search hit alone.
    #[must_use]
    pub fn from_candidate(candidate: &RawCandidate, country: &str) -> Self {
        Self {
            id: candidate.provider_id.clone(),
            name: candidate.name.clone(),
            category: candidate.category,
            location: candidate.location,
            address: candidate.rough_address.clone().unwrap_or_default(),
            city: candidate.vicinity.clone().unwrap_or_default(),
            country: country.to_string(),
            phone: None,
            website: None,
            hours: None,
        }
    }
}

/// An enriched resource that survived filtering, with its distance from
/// the reference point.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RankedResource {
    #[serde(flatten)]
    pub resource: EnrichedResource,
    pub distance_km: f64,
}
