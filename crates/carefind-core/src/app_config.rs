use std::path::PathBuf;

use crate::ConfigError;

#[derive(Clone)]
pub struct AppConfig {
    pub log_level: String,
    /// Only `find` needs it; see [`AppConfig::require_places_key`].
    pub places_api_key: Option<String>,
    /// Absent key disables relevance classification entirely.
    pub gemini_api_key: Option<String>,
    pub categories_path: Option<PathBuf>,
    pub geocoder_url: String,
    pub request_timeout_secs: u64,
    pub user_agent: String,
    pub max_concurrent_lookups: usize,
    pub max_concurrent_classifications: usize,
    pub classifier_budget: usize,
    pub max_retries: u32,
    pub retry_backoff_base_ms: u64,
    pub default_country: String,
}

impl AppConfig {
    /// # Errors
    ///
    /// Returns `ConfigError::MissingEnvVar` when no places key was configured.
    pub fn require_places_key(&self) -> Result<&str, ConfigError> {
        self.places_api_key
            .as_deref()
            .ok_or_else(|| ConfigError::MissingEnvVar("GOOGLE_PLACES_API_KEY".to_string()))
    }
}

impl std::fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppConfig")
            .field("log_level", &self.log_level)
            .field(
                "places_api_key",
                &self.places_api_key.as_ref().map(|_| "[redacted]"),
            )
            .field(
                "gemini_api_key",
                &self.gemini_api_key.as_ref().map(|_| "[redacted]"),
            )
            .field("categories_path", &self.categories_path)
            .field("geocoder_url", &self.geocoder_url)
            .field("request_timeout_secs", &self.request_timeout_secs)
            .field("user_agent", &self.user_agent)
            .field("max_concurrent_lookups", &self.max_concurrent_lookups)
            .field(
                "max_concurrent_classifications",
                &self.max_concurrent_classifications,
            )
            .field("classifier_budget", &self.classifier_budget)
            .field("max_retries", &self.max_retries)
            .field("retry_backoff_base_ms", &self.retry_backoff_base_ms)
            .field("default_country", &self.default_country)
            .finish()
    }
}
