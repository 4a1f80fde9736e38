use crate::app_config::AppConfig;
use crate::ConfigError;

pub const DEFAULT_GEOCODER_URL: &str = "https://nominatim.openstreetmap.org";

/// Reads `.env` (if present) into the process environment, then builds the
/// configuration from it.
///
/// # Errors
///
/// Returns `ConfigError` when any value fails to parse.
pub fn load_app_config() -> Result<AppConfig, ConfigError> {
    dotenvy::dotenv().ok();
    load_app_config_from_env()
}

/// Builds the configuration from the current process environment only.
///
/// # Errors
///
/// See [`load_app_config`].
pub fn load_app_config_from_env() -> Result<AppConfig, ConfigError> {
    build_app_config(|key| std::env::var(key))
}

/// Builds configuration from an arbitrary variable lookup. Blank values
/// count as unset for keys and paths.
fn build_app_config<F>(lookup: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    use std::path::PathBuf;

    let optional = |var: &str| -> Option<String> {
        lookup(var)
            .ok()
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
    };

    let or_default = |var: &str, default: &str| -> String {
        lookup(var).unwrap_or_else(|_| default.to_string())
    };

    let at_least_one = |var: &str, default: &str| -> Result<usize, ConfigError> {
        match parse_var(var, &or_default(var, default))? {
            0 => Err(ConfigError::InvalidEnvVar {
                var: var.to_string(),
                reason: "must be at least 1".to_string(),
            }),
            n => Ok(n),
        }
    };

    let places_api_key = optional("GOOGLE_PLACES_API_KEY");
    let gemini_api_key = optional("GEMINI_API_KEY");

    let log_level = or_default("CAREFIND_LOG_LEVEL", "info");
    let categories_path = optional("CAREFIND_CATEGORIES_PATH").map(PathBuf::from);
    let geocoder_url = or_default("CAREFIND_GEOCODER_URL", DEFAULT_GEOCODER_URL);

    let request_timeout_secs: u64 = parse_var(
        "CAREFIND_REQUEST_TIMEOUT_SECS",
        &or_default("CAREFIND_REQUEST_TIMEOUT_SECS", "10"),
    )?;
    if request_timeout_secs == 0 {
        return Err(ConfigError::InvalidEnvVar {
            var: "CAREFIND_REQUEST_TIMEOUT_SECS".to_string(),
            reason: "must be at least 1".to_string(),
        });
    }
    let user_agent = or_default("CAREFIND_USER_AGENT", "carefind/0.1 (resource-discovery)");
    let max_concurrent_lookups = at_least_one("CAREFIND_MAX_CONCURRENT_LOOKUPS", "8")?;
    let max_concurrent_classifications =
        at_least_one("CAREFIND_MAX_CONCURRENT_CLASSIFICATIONS", "4")?;
    let classifier_budget: usize = parse_var(
        "CAREFIND_CLASSIFIER_BUDGET",
        &or_default("CAREFIND_CLASSIFIER_BUDGET", "100"),
    )?;
    let max_retries: u32 = parse_var(
        "CAREFIND_MAX_RETRIES",
        &or_default("CAREFIND_MAX_RETRIES", "2"),
    )?;
    let retry_backoff_base_ms: u64 = parse_var(
        "CAREFIND_RETRY_BACKOFF_BASE_MS",
        &or_default("CAREFIND_RETRY_BACKOFF_BASE_MS", "500"),
    )?;
    let default_country = or_default("CAREFIND_DEFAULT_COUNTRY", "United States");

    Ok(AppConfig {
        log_level,
        places_api_key,
        gemini_api_key,
        categories_path,
        geocoder_url,
        request_timeout_secs,
        user_agent,
        max_concurrent_lookups,
        max_concurrent_classifications,
        classifier_budget,
        max_retries,
        retry_backoff_base_ms,
        default_country,
    })
}

fn parse_var<T>(var: &str, raw: &str) -> Result<T, ConfigError>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    raw.trim().parse().map_err(|e: T::Err| ConfigError::InvalidEnvVar {
        var: var.to_string(),
        reason: format!("'{raw}': {e}"),
    })
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
