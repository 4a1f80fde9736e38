//! HTTP client for the Google Places web service (text search + details).

mod parse;
mod response;

use std::time::Duration;

use carefind_core::Coordinate;
use reqwest::{Client, Url};

use crate::error::PlacesError;
use crate::provider::{PlaceDetails, PlaceHit, PlacesProvider};
use crate::retry::retry_with_backoff;

const DEFAULT_BASE_URL: &str = "https://maps.googleapis.com/maps/api/place/";

/// Client for the Google Places web service.
///
/// Use [`GooglePlacesClient::new`] for production or
/// [`GooglePlacesClient::with_base_url`] to point at a mock server in tests.
/// Transient failures are retried with jittered exponential back-off.
pub struct GooglePlacesClient {
    client: Client,
    api_key: String,
    base_url: Url,
    max_retries: u32,
    backoff_base_ms: u64,
}

impl GooglePlacesClient {
    /// Creates a client pointed at the production Places API.
    ///
    /// # Errors
    ///
    /// Returns [`PlacesError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed.
    pub fn new(
        api_key: &str,
        timeout_secs: u64,
        user_agent: &str,
        max_retries: u32,
        backoff_base_ms: u64,
    ) -> Result<Self, PlacesError> {
        Self::with_base_url(
            api_key,
            timeout_secs,
            user_agent,
            max_retries,
            backoff_base_ms,
            DEFAULT_BASE_URL,
        )
    }

    /// Creates a client with a custom base URL (for testing with wiremock).
    ///
    /// # Errors
    ///
    /// Returns [`PlacesError::Http`] if the `reqwest::Client` cannot be built,
    /// or [`PlacesError::InvalidBaseUrl`] if `base_url` does not parse.
    pub fn with_base_url(
        api_key: &str,
        timeout_secs: u64,
        user_agent: &str,
        max_retries: u32,
        backoff_base_ms: u64,
        base_url: &str,
    ) -> Result<Self, PlacesError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(timeout_secs.min(10)))
            .user_agent(user_agent)
            .build()?;

        // Exactly one trailing slash so `Url::join` appends instead of
        // replacing the last path segment.
        let normalised = format!("{}/", base_url.trim_end_matches('/'));
        let base_url = Url::parse(&normalised).map_err(|e| PlacesError::InvalidBaseUrl {
            url: base_url.to_string(),
            reason: e.to_string(),
        })?;

        Ok(Self {
            client,
            api_key: api_key.to_owned(),
            base_url,
            max_retries,
            backoff_base_ms,
        })
    }

    /// Builds an endpoint URL with percent-encoded query parameters. The API
    /// key is appended last.
    fn build_url(&self, endpoint: &str, params: &[(&str, &str)]) -> Result<Url, PlacesError> {
        let mut url = self
            .base_url
            .join(endpoint)
            .map_err(|e| PlacesError::InvalidBaseUrl {
                url: self.base_url.to_string(),
                reason: e.to_string(),
            })?;
        {
            let mut pairs = url.query_pairs_mut();
            for (k, v) in params {
                pairs.append_pair(k, v);
            }
            pairs.append_pair("key", &self.api_key);
        }
        Ok(url)
    }

    /// Sends a single GET, asserts a 2xx status and parses the body as JSON.
    async fn fetch_json(&self, url: &Url, context: &str) -> Result<serde_json::Value, PlacesError> {
        let response = self.client.get(url.clone()).send().await?;
        let response = response.error_for_status()?;
        let body = response.text().await?;
        serde_json::from_str(&body).map_err(|e| PlacesError::Deserialize {
            context: context.to_string(),
            source: e,
        })
    }

    /// Fetches and parses `url`, retrying transport failures and envelope
    /// statuses that signal a transient provider condition.
    async fn request_checked<T>(
        &self,
        url: &Url,
        context: &str,
        parse: impl Fn(serde_json::Value, &str) -> Result<T, PlacesError>,
    ) -> Result<T, PlacesError> {
        let parse = &parse;
        retry_with_backoff(self.max_retries, self.backoff_base_ms, || async move {
            let body = self.fetch_json(url, context).await?;
            parse(body, context)
        })
        .await
    }
}

impl PlacesProvider for GooglePlacesClient {
    async fn search(
        &self,
        keyword: &str,
        center: Coordinate,
        radius_m: f64,
    ) -> Result<Vec<PlaceHit>, PlacesError> {
        let query = format!("{keyword} near me");
        let location = center.to_string();
        let radius = format!("{radius_m:.0}");
        let url = self.build_url(
            "textsearch/json",
            &[
                ("query", &query),
                ("location", &location),
                ("radius", &radius),
            ],
        )?;

        let context = format!("textsearch(query={query})");
        let hits = self
            .request_checked(&url, &context, parse::parse_search_hits)
            .await?;
        tracing::debug!(keyword, count = hits.len(), "places text search complete");
        Ok(hits)
    }

    async fn details(
        &self,
        provider_id: &str,
        fields: &[&str],
    ) -> Result<PlaceDetails, PlacesError> {
        let fields = fields.join(",");
        let url = self.build_url(
            "details/json",
            &[("place_id", provider_id), ("fields", &fields)],
        )?;
        let context = format!("details(place_id={provider_id})");
        self.request_checked(&url, &context, parse::parse_details)
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_client(base_url: &str) -> GooglePlacesClient {
        GooglePlacesClient::with_base_url("test-key", 5, "carefind-test/0.1", 0, 0, base_url)
            .expect("client construction should not fail")
    }

    #[test]
    fn build_url_appends_endpoint_and_key() {
        let client = test_client("https://maps.example.com/maps/api/place");
        let url = client
            .build_url("details/json", &[("place_id", "abc"), ("fields", "name,website")])
            .unwrap();
        assert_eq!(
            url.as_str(),
            "https://maps.example.com/maps/api/place/details/json?place_id=abc&fields=name%2Cwebsite&key=test-key"
        );
    }

    #[test]
    fn build_url_tolerates_trailing_slashes() {
        let client = test_client("https://maps.example.com/api//");
        let url = client.build_url("textsearch/json", &[]).unwrap();
        assert_eq!(
            url.as_str(),
            "https://maps.example.com/api/textsearch/json?key=test-key"
        );
    }

    #[test]
    fn build_url_encodes_query_text() {
        let client = test_client("https://maps.example.com");
        let url = client
            .build_url("textsearch/json", &[("query", "cancer support & care")])
            .unwrap();
        assert!(
            url.as_str().contains("cancer+support+%26+care"),
            "query should be form-encoded: {url}"
        );
    }

    #[test]
    fn invalid_base_url_is_rejected() {
        let result =
            GooglePlacesClient::with_base_url("k", 5, "ua", 0, 0, "not a url");
        assert!(matches!(result, Err(PlacesError::InvalidBaseUrl { .. })));
    }
}
