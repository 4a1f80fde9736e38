//! Jittered exponential back-off for transient provider failures.

use std::future::Future;
use std::time::Duration;

use crate::error::PlacesError;

const MAX_DELAY_MS: u64 = 30_000;

/// Transport timeouts, connection failures, HTTP 5xx, `OVER_QUERY_LIMIT`
/// and `UNKNOWN_ERROR` are transient. Anything else fails the same way on a
/// second attempt.
pub(crate) fn is_retriable(err: &PlacesError) -> bool {
    match err {
        PlacesError::Http(e) => {
            e.is_timeout() || e.is_connect() || e.status().is_some_and(|s| s.is_server_error())
        }
        PlacesError::RateLimited => true,
        PlacesError::ApiStatus { status, .. } => status == "UNKNOWN_ERROR",
        PlacesError::Deserialize { .. }
        | PlacesError::Timeout { .. }
        | PlacesError::InvalidBaseUrl { .. }
        | PlacesError::EmptyQuery
        | PlacesError::NoGeocodeMatch { .. } => false,
    }
}

/// Nominal wait before retry number `retry` (1-based): `base * 2^(retry-1)`,
/// capped at 30 s.
fn nominal_delay_ms(retry: u32, backoff_base_ms: u64) -> u64 {
    let factor = 1u64 << retry.saturating_sub(1).min(10);
    backoff_base_ms.saturating_mul(factor).min(MAX_DELAY_MS)
}

/// Scales `nominal_ms` by a random factor in `[0.75, 1.25)`.
#[allow(
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss,
    clippy::cast_precision_loss
)]
fn jittered(nominal_ms: u64) -> Duration {
    let scale = 0.75 + rand::random::<f64>() * 0.5;
    Duration::from_millis((nominal_ms as f64 * scale) as u64)
}

/// Runs `operation` until it succeeds, fails permanently, or has been
/// retried `max_retries` times.
pub(crate) async fn retry_with_backoff<T, F, Fut>(
    max_retries: u32,
    backoff_base_ms: u64,
    mut operation: F,
) -> Result<T, PlacesError>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, PlacesError>>,
{
    let mut retries = 0u32;
    loop {
        let err = match operation().await {
            Ok(value) => return Ok(value),
            Err(err) if retries < max_retries && is_retriable(&err) => err,
            Err(err) => return Err(err),
        };

        retries += 1;
        let delay = jittered(nominal_delay_ms(retries, backoff_base_ms));
        tracing::warn!(
            retry = retries,
            max_retries,
            delay_ms = u64::try_from(delay.as_millis()).unwrap_or(u64::MAX),
            error = %err,
            "transient places failure; backing off"
        );
        tokio::time::sleep(delay).await;
    }
}
