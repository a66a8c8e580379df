//! Provider response models
//!
//! Wire structs mirror the weatherapi.com JSON and stay private to this crate.
//! [`decode_current`], [`decode_forecast`] and [`decode_search`] turn a raw body
//! into the public types, failing with [`ProviderError::Malformed`] when a
//! required field is missing or has the wrong type.

use serde::Deserialize;

use crate::error::ProviderError;

// ============================================================================
// Public types
// ============================================================================

/// Current conditions for one place, copied verbatim from the provider
#[derive(Clone, Debug, Default, PartialEq)]
pub struct CurrentConditions {
    pub location: String,
    pub region: String,
    pub country: String,
    /// Textual condition, e.g. "Partly cloudy"
    pub condition: String,
    /// Icon reference as returned (usually a protocol-relative URL)
    pub icon: String,
    pub temp_c: f64,
    /// Relative humidity in percent
    pub humidity: u8,
    pub wind_kph: f64,
    /// Provider timestamp string, e.g. "2024-01-15 12:00"
    pub last_updated: String,
}

/// One entry of the daily forecast
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ForecastDay {
    /// Provider date string (`YYYY-MM-DD`)
    pub date: String,
    pub avg_temp_c: f64,
}

/// Combined current conditions and daily forecast
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ForecastReport {
    pub current: CurrentConditions,
    /// Days in provider order
    pub days: Vec<ForecastDay>,
}

// ============================================================================
// Wire format
// ============================================================================

#[derive(Debug, Deserialize)]
struct CurrentResponse {
    location: WireLocation,
    current: WireCurrent,
}

#[derive(Debug, Deserialize)]
struct ForecastResponse {
    location: WireLocation,
    current: WireCurrent,
    forecast: WireForecast,
}

#[derive(Debug, Deserialize)]
struct WireLocation {
    name: String,
    #[serde(default)]
    region: String,
    #[serde(default)]
    country: String,
}

#[derive(Debug, Deserialize)]
struct WireCurrent {
    last_updated: String,
    temp_c: f64,
    humidity: u8,
    wind_kph: f64,
    condition: WireCondition,
}

#[derive(Debug, Deserialize)]
struct WireCondition {
    text: String,
    icon: String,
}

#[derive(Debug, Deserialize)]
struct WireForecast {
    forecastday: Vec<WireForecastDay>,
}

#[derive(Debug, Deserialize)]
struct WireForecastDay {
    date: String,
    day: WireDay,
}

#[derive(Debug, Deserialize)]
struct WireDay {
    avgtemp_c: f64,
}

#[derive(Debug, Deserialize)]
struct WireSearchItem {
    name: String,
}

/// Error body: `{"error": {"code": 1006, "message": "..."}}`
#[derive(Debug, Deserialize)]
struct ErrorResponse {
    error: ErrorBody,
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    message: String,
}

impl CurrentConditions {
    fn from_wire(location: WireLocation, current: WireCurrent) -> Self {
        Self {
            location: location.name,
            region: location.region,
            country: location.country,
            condition: current.condition.text,
            icon: current.condition.icon,
            temp_c: current.temp_c,
            humidity: current.humidity,
            wind_kph: current.wind_kph,
            last_updated: current.last_updated,
        }
    }
}

// ============================================================================
// Decoding
// ============================================================================

/// Decode a `current.json` body
pub fn decode_current(body: &str) -> Result<CurrentConditions, ProviderError> {
    let data: CurrentResponse = serde_json::from_str(body)?;
    Ok(CurrentConditions::from_wire(data.location, data.current))
}

/// Decode a `forecast.json` body
pub fn decode_forecast(body: &str) -> Result<ForecastReport, ProviderError> {
    let data: ForecastResponse = serde_json::from_str(body)?;
    let days = data
        .forecast
        .forecastday
        .into_iter()
        .map(|d| ForecastDay {
            date: d.date,
            avg_temp_c: d.day.avgtemp_c,
        })
        .collect();

    Ok(ForecastReport {
        current: CurrentConditions::from_wire(data.location, data.current),
        days,
    })
}

/// Decode a `search.json` body into place names, keeping provider order
pub fn decode_search(body: &str) -> Result<Vec<String>, ProviderError> {
    let items: Vec<WireSearchItem> = serde_json::from_str(body)?;
    Ok(items.into_iter().map(|item| item.name).collect())
}

/// Extract the provider's error message from a failure body, if it has one
pub fn decode_error_message(body: &str) -> Option<String> {
    serde_json::from_str::<ErrorResponse>(body)
        .ok()
        .map(|e| e.error.message)
}
