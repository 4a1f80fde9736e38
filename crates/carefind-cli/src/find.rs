use anyhow::Context;
use carefind_classifier::{GeminiClient, Language, RelevanceAdapter};
use carefind_core::{
    default_categories, load_categories, AppConfig, Coordinate, RankedResource,
};
use carefind_places::GooglePlacesClient;
use carefind_search::{find_nearby_resources, PipelineOptions};
use chrono::{Datelike, Local};

use crate::FindArgs;

/// Runs one nearby search and prints the ranked results.
///
/// # Errors
///
/// Returns an error if the places key is missing, clients cannot be built, the center cannot be
/// resolved, the input is invalid, or every place search failed.
pub(crate) async fn run_find(config: &AppConfig, args: &FindArgs) -> anyhow::Result<()> {
    let places_api_key = config.require_places_key()?;

    let center = match (args.lat, args.lng, args.near.as_deref()) {
        (Some(lat), Some(lng), _) => Coordinate::new(lat, lng)?,
        (_, _, Some(query)) => crate::geocode::resolve_center(config, query).await?,
        _ => anyhow::bail!("either --lat/--lng or --near is required"),
    };

    let categories = match &config.categories_path {
        Some(path) => load_categories(path)
            .with_context(|| format!("loading categories from {}", path.display()))?,
        None => default_categories(),
    };

    let places = GooglePlacesClient::new(
        places_api_key,
        config.request_timeout_secs,
        &config.user_agent,
        config.max_retries,
        config.retry_backoff_base_ms,
    )?;

    let mut options = PipelineOptions::from_config(config);
    options.use_relevance = !args.no_relevance;

    let classifier = match config.gemini_api_key.as_deref() {
        Some(key) if options.use_relevance => Some(RelevanceAdapter::new(
            GeminiClient::new(key, config.request_timeout_secs, &config.user_agent)?,
            options.call_timeout,
        )),
        Some(_) => None,
        None => {
            tracing::info!("no classifier key configured; relevance filter disabled");
            None
        }
    };

    let ranked = find_nearby_resources(
        &places,
        classifier.as_ref(),
        &categories,
        center,
        args.radius,
        args.category,
        Language::from_tag(&args.language),
        &options,
    )
    .await?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&ranked)?);
    } else {
        print_table(&ranked);
    }
    Ok(())
}

fn print_table(ranked: &[RankedResource]) {
    if ranked.is_empty() {
        println!("no resources found");
        return;
    }

    let now = Local::now();
    let (weekday, time) = (now.weekday(), now.time());

    println!(
        "{:>8}  {:<17}{:<6}{:<40}ADDRESS",
        "KM", "CATEGORY", "OPEN", "NAME"
    );
    for entry in ranked {
        let r = &entry.resource;
        let open = match &r.hours {
            Some(hours) if hours.is_open_at(weekday, time) => "yes",
            Some(_) => "no",
            None => "-",
        };
        println!(
            "{:>8.2}  {:<17}{:<6}{:<40}{}",
            entry.distance_km,
            r.category.as_str(),
            open,
            truncate(&r.name, 38),
            r.address
        );
    }
}

pub(crate) fn truncate(text: &str, max_chars: usize) -> String {
    if text.chars().count() > max_chars {
        format!("{}...", text.chars().take(max_chars.saturating_sub(3)).collect::<String>())
    } else {
        text.to_string()
    }
}
