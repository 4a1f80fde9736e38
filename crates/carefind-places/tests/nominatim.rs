//! Integration tests for `NominatimClient` using wiremock HTTP mocks.

use carefind_places::{Geocoder, NominatimClient, PlacesError};
use wiremock::matchers::{header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn test_client(base_url: &str) -> NominatimClient {
    NominatimClient::new(base_url, 5, "carefind-test/0.1")
        .expect("client construction should not fail")
}

#[tokio::test]
async fn geocode_returns_first_match() {
    let server = MockServer::start().await;

    let body = serde_json::json!([
        {
            "lat": "30.2711286",
            "lon": "-97.7436995",
            "display_name": "Austin, Travis County, Texas, United States"
        }
    ]);

    Mock::given(method("GET"))
        .and(path("/search"))
        .and(query_param("format", "json"))
        .and(query_param("q", "Austin, TX"))
        .and(query_param("limit", "1"))
        .and(header("user-agent", "carefind-test/0.1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(&body))
        .expect(1)
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let result = client.geocode("  Austin, TX ").await.expect("should geocode");

    assert!((result.position.lat - 30.271_128_6).abs() < 1e-9);
    assert!((result.position.lng + 97.743_699_5).abs() < 1e-9);
    assert_eq!(
        result.display_name,
        "Austin, Travis County, Texas, United States"
    );
}

#[tokio::test]
async fn empty_result_list_is_no_match() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/search"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([])))
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let err = client.geocode("Nowhereville").await.unwrap_err();
    assert!(matches!(err, PlacesError::NoGeocodeMatch { ref query } if query == "Nowhereville"));
}

#[tokio::test]
async fn out_of_range_coordinate_is_no_match() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/search"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([
            { "lat": "91.5", "lon": "0", "display_name": "Broken" }
        ])))
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let err = client.geocode("broken").await.unwrap_err();
    assert!(matches!(err, PlacesError::NoGeocodeMatch { .. }));
}

#[tokio::test]
async fn http_error_status_is_surfaced() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/search"))
        .respond_with(ResponseTemplate::new(429))
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let err = client.geocode("Austin").await.unwrap_err();
    assert!(matches!(err, PlacesError::Http(_)));
}
