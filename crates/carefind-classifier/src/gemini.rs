//! Gemini `generateContent` client used as the relevance classifier.

use std::time::Duration;

use reqwest::{Client, Url};
use serde::{Deserialize, Serialize};

use crate::error::ClassifierError;
use crate::RelevanceClassifier;

const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta/";
const MODEL: &str = "gemini-1.5-flash";

/// Client for the Gemini generative language API.
///
/// Generation is pinned to deterministic, very short answers: temperature
/// and top-p are zero and output is capped at a few tokens.
pub struct GeminiClient {
    client: Client,
    api_key: String,
    base_url: Url,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateRequest<'a> {
    contents: [Content<'a>; 1],
    generation_config: GenerationConfig,
}

#[derive(Serialize)]
struct Content<'a> {
    role: &'static str,
    parts: [Part<'a>; 1],
}

#[derive(Serialize)]
struct Part<'a> {
    text: &'a str,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerationConfig {
    temperature: f32,
    top_p: f32,
    max_output_tokens: u32,
}

#[derive(Debug, Default, Deserialize)]
struct GenerateResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: Option<CandidateContent>,
}

#[derive(Debug, Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<CandidatePart>,
}

#[derive(Debug, Deserialize)]
struct CandidatePart {
    text: Option<String>,
}

impl GeminiClient {
    /// # Errors
    ///
    /// Returns [`ClassifierError::Http`] if the `reqwest::Client` cannot be
    /// constructed.
    pub fn new(api_key: &str, timeout_secs: u64, user_agent: &str) -> Result<Self, ClassifierError> {
        Self::with_base_url(api_key, timeout_secs, user_agent, DEFAULT_BASE_URL)
    }

    /// Creates a client with a custom base URL (for testing with wiremock).
    ///
    /// # Errors
    ///
    /// Returns [`ClassifierError::Http`] if the `reqwest::Client` cannot be
    /// built, or [`ClassifierError::InvalidBaseUrl`] if `base_url` does not
    /// parse.
    pub fn with_base_url(
        api_key: &str,
        timeout_secs: u64,
        user_agent: &str,
        base_url: &str,
    ) -> Result<Self, ClassifierError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .user_agent(user_agent)
            .build()?;

        let normalised = format!("{}/", base_url.trim_end_matches('/'));
        let base_url = Url::parse(&normalised).map_err(|e| ClassifierError::InvalidBaseUrl {
            url: base_url.to_string(),
            reason: e.to_string(),
        })?;

        Ok(Self {
            client,
            api_key: api_key.to_owned(),
            base_url,
        })
    }

    fn endpoint(&self) -> Result<Url, ClassifierError> {
        let mut url = self
            .base_url
            .join(&format!("models/{MODEL}:generateContent"))
            .map_err(|e| ClassifierError::InvalidBaseUrl {
                url: self.base_url.to_string(),
                reason: e.to_string(),
            })?;
        url.query_pairs_mut().append_pair("key", &self.api_key);
        Ok(url)
    }
}

impl RelevanceClassifier for GeminiClient {
    async fn classify(&self, prompt: &str) -> Result<String, ClassifierError> {
        let request = GenerateRequest {
            contents: [Content {
                role: "user",
                parts: [Part { text: prompt }],
            }],
            generation_config: GenerationConfig {
                temperature: 0.0,
                top_p: 0.0,
                max_output_tokens: 4,
            },
        };

        let response = self
            .client
            .post(self.endpoint()?)
            .json(&request)
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;
        if !status.is_success() {
            return Err(ClassifierError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let parsed: GenerateResponse =
            serde_json::from_str(&body).map_err(|e| ClassifierError::Deserialize {
                context: format!("{MODEL}:generateContent"),
                source: e,
            })?;

        let answer = parsed
            .candidates
            .into_iter()
            .next()
            .and_then(|c| c.content)
            .and_then(|c| c.parts.into_iter().next())
            .and_then(|p| p.text)
            .ok_or(ClassifierError::MissingAnswer)?;

        tracing::debug!(answer = %answer.trim(), "classifier answered");
        Ok(answer)
    }
}
