//! weatherapi.com provider client
//!
//! Typed access to the three endpoints the lookup app uses: `search.json`
//! (autocomplete), `current.json` and `forecast.json`. Every body is decoded
//! into explicit structs; a body that does not fit surfaces as
//! [`ProviderError::Malformed`] instead of propagating to the UI.

pub mod client;
pub mod error;
pub mod models;

pub use client::{
    DEFAULT_BASE_URL, FORECAST_DAYS, ProviderConfig, WeatherApiClient, WeatherProvider,
};
pub use error::{ErrorKind, ProviderError};
pub use models::{CurrentConditions, ForecastDay, ForecastReport};
