//! Conversion from raw Google Places JSON into provider-neutral records.

use carefind_core::{BusinessHours, Coordinate};

use super::response::{DetailsResponse, PlaceResult, TextSearchResponse};
use crate::error::PlacesError;
use crate::provider::{PlaceDetails, PlaceHit};

/// Checks the envelope `status` field.
///
/// `OK` passes; `ZERO_RESULTS` passes only when `allow_zero` is set (text
/// search); `OVER_QUERY_LIMIT` maps to [`PlacesError::RateLimited`]; every
/// other value, including a missing status, is an [`PlacesError::ApiStatus`].
pub(crate) fn check_status(body: &serde_json::Value, allow_zero: bool) -> Result<(), PlacesError> {
    let status = body
        .get("status")
        .and_then(serde_json::Value::as_str)
        .unwrap_or("MISSING_STATUS");

    match status {
        "OK" => Ok(()),
        "ZERO_RESULTS" if allow_zero => Ok(()),
        "OVER_QUERY_LIMIT" => Err(PlacesError::RateLimited),
        other => Err(PlacesError::ApiStatus {
            status: other.to_string(),
            message: body
                .get("error_message")
                .and_then(serde_json::Value::as_str)
                .unwrap_or_default()
                .to_string(),
        }),
    }
}

/// Parses a text-search body into hits, dropping results that lack an id,
/// a name, or an in-range location.
pub(crate) fn parse_search_hits(
    body: serde_json::Value,
    context: &str,
) -> Result<Vec<PlaceHit>, PlacesError> {
    check_status(&body, true)?;

    let response: TextSearchResponse =
        serde_json::from_value(body).map_err(|e| PlacesError::Deserialize {
            context: context.to_string(),
            source: e,
        })?;

    let total = response.results.len();
    let hits: Vec<PlaceHit> = response
        .results
        .into_iter()
        .filter_map(|v| serde_json::from_value::<PlaceResult>(v).ok())
        .filter_map(into_hit)
        .collect();

    if hits.len() < total {
        tracing::debug!(
            context,
            total,
            kept = hits.len(),
            "dropped search results without id, name or location"
        );
    }

    Ok(hits)
}

fn into_hit(result: PlaceResult) -> Option<PlaceHit> {
    let provider_id = non_empty(result.place_id)?;
    let name = non_empty(result.name)?;
    let location = location_of(result.geometry.as_ref())?;
    Some(PlaceHit {
        provider_id,
        name,
        location,
        formatted_address: non_empty(result.formatted_address),
        vicinity: non_empty(result.vicinity),
    })
}

/// Parses a details body. A non-OK status or a missing `result` object is
/// an error; malformed individual fields are simply absent.
pub(crate) fn parse_details(
    body: serde_json::Value,
    context: &str,
) -> Result<PlaceDetails, PlacesError> {
    check_status(&body, false)?;

    let response: DetailsResponse =
        serde_json::from_value(body).map_err(|e| PlacesError::Deserialize {
            context: context.to_string(),
            source: e,
        })?;

    let raw = response.result.ok_or_else(|| PlacesError::ApiStatus {
        status: "MISSING_RESULT".to_string(),
        message: format!("{context} returned no result object"),
    })?;
    let result = serde_json::from_value::<PlaceResult>(raw).unwrap_or_default();

    Ok(PlaceDetails {
        name: non_empty(result.name),
        location: location_of(result.geometry.as_ref()),
        formatted_address: non_empty(result.formatted_address),
        vicinity: non_empty(result.vicinity),
        phone: non_empty(result.formatted_phone_number),
        website: non_empty(result.website),
        hours: result
            .opening_hours
            .and_then(|h| BusinessHours::from_weekday_text(&h.weekday_text)),
    })
}

fn location_of(geometry: Option<&super::response::Geometry>) -> Option<Coordinate> {
    let loc = geometry?.location.as_ref()?;
    Coordinate::new(loc.lat, loc.lng).ok()
}

fn non_empty(value: Option<String>) -> Option<String> {
    value
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn ok_and_zero_results_pass_for_search() {
        assert!(check_status(&json!({"status": "OK"}), true).is_ok());
        assert!(check_status(&json!({"status": "ZERO_RESULTS"}), true).is_ok());
    }

    #[test]
    fn zero_results_fails_for_details() {
        assert!(matches!(
            check_status(&json!({"status": "ZERO_RESULTS"}), false),
            Err(PlacesError::ApiStatus { ref status, .. }) if status == "ZERO_RESULTS"
        ));
    }

    #[test]
    fn over_query_limit_is_rate_limited() {
        assert!(matches!(
            check_status(&json!({"status": "OVER_QUERY_LIMIT"}), true),
            Err(PlacesError::RateLimited)
        ));
    }

    #[test]
    fn denied_status_carries_message() {
        let err = check_status(
            &json!({"status": "REQUEST_DENIED", "error_message": "bad key"}),
            true,
        )
        .unwrap_err();
        assert!(
            matches!(err, PlacesError::ApiStatus { ref status, ref message } if status == "REQUEST_DENIED" && message == "bad key")
        );
    }

    #[test]
    fn missing_status_is_an_error() {
        assert!(check_status(&json!({"results": []}), true).is_err());
    }

    #[test]
    fn search_hits_skip_incomplete_records() {
        let body = json!({
            "status": "OK",
            "results": [
                {
                    "place_id": "a",
                    "name": "Alpha Oncology",
                    "formatted_address": "1 Main St",
                    "geometry": {"location": {"lat": 40.0, "lng": -74.0}}
                },
                {"place_id": "b", "geometry": {"location": {"lat": 40.0, "lng": -74.0}}},
                {"place_id": "c", "name": "No Geometry"},
                {"place_id": "d", "name": "Bad Lat", "geometry": {"location": {"lat": 123.0, "lng": 0.0}}},
                {"place_id": "e", "name": "Wrong Types", "geometry": {"location": {"lat": "x", "lng": 0.0}}},
                {"place_id": "  ", "name": "Blank Id", "geometry": {"location": {"lat": 1.0, "lng": 1.0}}},
                "not an object"
            ]
        });
        let hits = parse_search_hits(body, "test").unwrap();
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].provider_id, "a");
        assert_eq!(hits[0].formatted_address.as_deref(), Some("1 Main St"));
        assert!(hits[0].vicinity.is_none());
    }

    #[test]
    fn details_parse_optional_fields() {
        let body = json!({
            "status": "OK",
            "result": {
                "place_id": "a",
                "name": "Alpha Oncology",
                "formatted_address": "1 Main St, Newark, NJ 07102, USA",
                "vicinity": "Newark",
                "formatted_phone_number": "(555) 010-0000",
                "website": "",
                "opening_hours": {"weekday_text": ["Monday: 8:00 AM \u{2013} 4:00 PM"]}
            }
        });
        let details = parse_details(body, "test").unwrap();
        assert_eq!(details.name.as_deref(), Some("Alpha Oncology"));
        assert_eq!(details.vicinity.as_deref(), Some("Newark"));
        assert_eq!(details.phone.as_deref(), Some("(555) 010-0000"));
        assert!(details.website.is_none(), "blank website is absent");
        assert!(details.location.is_none());
        assert!(details.hours.unwrap().monday.is_some());
    }

    #[test]
    fn details_keep_good_fields_next_to_a_malformed_one() {
        let body = json!({
            "status": "OK",
            "result": {
                "name": 42,
                "formatted_phone_number": "(555) 010-0000",
                "website": "https://alpha.example",
                "formatted_address": "1 Main St",
                "opening_hours": "always"
            }
        });
        let details = parse_details(body, "test").unwrap();
        assert!(details.name.is_none());
        assert!(details.hours.is_none());
        assert_eq!(details.phone.as_deref(), Some("(555) 010-0000"));
        assert_eq!(details.website.as_deref(), Some("https://alpha.example"));
        assert_eq!(details.formatted_address.as_deref(), Some("1 Main St"));
    }

    #[test]
    fn details_result_that_is_not_an_object_is_empty() {
        let body = json!({"status": "OK", "result": "nothing here"});
        let details = parse_details(body, "test").unwrap();
        assert_eq!(details, PlaceDetails::default());
    }

    #[test]
    fn search_hit_with_malformed_optional_field_is_kept() {
        let body = json!({
            "status": "OK",
            "results": [{
                "place_id": "a",
                "name": "Alpha",
                "vicinity": 7,
                "formatted_address": ["1 Main St"],
                "geometry": {"location": {"lat": 40.0, "lng": -74.0}}
            }]
        });
        let hits = parse_search_hits(body, "test").unwrap();
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].name, "Alpha");
        assert!(hits[0].vicinity.is_none());
        assert!(hits[0].formatted_address.is_none());
    }

    #[test]
    fn details_without_result_is_error() {
        assert!(parse_details(json!({"status": "OK"}), "test").is_err());
    }
}
