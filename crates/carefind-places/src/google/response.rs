//! Wire shapes for the Google Places web service.
//!
//! Every field is optional and parsed on its own: a field of the wrong
//! shape is absent, and the rest of its record still parses.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer};

#[derive(Debug, Deserialize)]
pub(crate) struct TextSearchResponse {
    #[serde(default)]
    pub results: Vec<serde_json::Value>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct DetailsResponse {
    #[serde(default)]
    pub result: Option<serde_json::Value>,
}

#[derive(Debug, Default, Deserialize)]
pub(crate) struct PlaceResult {
    #[serde(default, deserialize_with = "lenient")]
    pub place_id: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub name: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub formatted_address: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub vicinity: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub formatted_phone_number: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub website: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub geometry: Option<Geometry>,
    #[serde(default, deserialize_with = "lenient")]
    pub opening_hours: Option<OpeningHours>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct Geometry {
    #[serde(default, deserialize_with = "lenient")]
    pub location: Option<LatLng>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct LatLng {
    pub lat: f64,
    pub lng: f64,
}

#[derive(Debug, Deserialize)]
pub(crate) struct OpeningHours {
    #[serde(default)]
    pub weekday_text: Vec<String>,
}

/// Any value that does not deserialize as `T` becomes `None`.
fn lenient<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    Ok(serde_json::from_value(value).ok())
}
