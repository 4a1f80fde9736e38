use carefind_core::{AppConfig, Coordinate};
use carefind_places::{Geocoder, NominatimClient};

pub(crate) fn geocoder(config: &AppConfig) -> anyhow::Result<NominatimClient> {
    Ok(NominatimClient::new(
        &config.geocoder_url,
        config.request_timeout_secs,
        &config.user_agent,
    )?)
}

/// Geocodes `query` and returns the coordinate, logging the matched name.
pub(crate) async fn resolve_center(config: &AppConfig, query: &str) -> anyhow::Result<Coordinate> {
    let result = geocoder(config)?.geocode(query).await?;
    tracing::info!(query, matched = %result.display_name, position = %result.position, "search center geocoded");
    Ok(result.position)
}

/// Prints the best match for `query`.
///
/// # Errors
///
/// Returns an error if the query is empty, the geocoder is unreachable or
/// nothing matched.
pub(crate) async fn run_geocode(config: &AppConfig, query: &str) -> anyhow::Result<()> {
    let result = geocoder(config)?.geocode(query).await?;
    println!("{}", result.display_name);
    println!("{:.6}, {:.6}", result.position.lat, result.position.lng);
    Ok(())
}
