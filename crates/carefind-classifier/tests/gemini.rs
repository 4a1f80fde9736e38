//! Integration tests for `GeminiClient` using wiremock HTTP mocks.

use std::time::Duration;

use carefind_classifier::{
    ClassifierError, GeminiClient, Language, RelevanceAdapter, RelevanceClassifier,
};
use carefind_core::{CategoryLabel, Coordinate, EnrichedResource};
use wiremock::matchers::{body_partial_json, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn test_client(base_url: &str) -> GeminiClient {
    GeminiClient::with_base_url("test-key", 5, "carefind-test/0.1", base_url)
        .expect("client construction should not fail")
}

fn answer_body(text: &str) -> serde_json::Value {
    serde_json::json!({
        "candidates": [
            { "content": { "parts": [ { "text": text } ], "role": "model" } }
        ]
    })
}

fn resource() -> EnrichedResource {
    EnrichedResource {
        id: "place-7".to_string(),
        name: "Sunrise Transportation".to_string(),
        category: CategoryLabel::Transportation,
        location: Coordinate {
            lat: 41.88,
            lng: -87.63,
        },
        address: "200 State St".to_string(),
        city: "Chicago".to_string(),
        country: "United States".to_string(),
        phone: None,
        website: None,
        hours: None,
    }
}

#[tokio::test]
async fn classify_posts_prompt_and_returns_text() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/models/gemini-1.5-flash:generateContent"))
        .and(query_param("key", "test-key"))
        .and(body_partial_json(serde_json::json!({
            "contents": [ { "parts": [ { "text": "Is this oncology?" } ] } ],
            "generationConfig": { "temperature": 0.0, "maxOutputTokens": 4 }
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(answer_body("Yes")))
        .expect(1)
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let answer = client
        .classify("Is this oncology?")
        .await
        .expect("classify should succeed");
    assert_eq!(answer, "Yes");
}

#[tokio::test]
async fn non_success_status_is_an_error() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(403).set_body_string("API key not valid"))
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let err = client.classify("q").await.unwrap_err();
    assert!(
        matches!(err, ClassifierError::Status { status: 403, ref body } if body.contains("not valid"))
    );
}

#[tokio::test]
async fn missing_candidates_is_missing_answer() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(serde_json::json!({ "promptFeedback": {} })),
        )
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let err = client.classify("q").await.unwrap_err();
    assert!(matches!(err, ClassifierError::MissingAnswer));
}

#[tokio::test]
async fn adapter_drops_on_no_and_keeps_on_server_error() {
    let server = MockServer::start().await;

    // The first call answers "No", every later call is a 500.
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_json(answer_body("No")))
        .up_to_n_times(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let adapter = RelevanceAdapter::new(test_client(&server.uri()), Duration::from_secs(5));
    assert!(!adapter.is_relevant(&resource(), Language::English).await);
    assert!(adapter.is_relevant(&resource(), Language::English).await);
}
