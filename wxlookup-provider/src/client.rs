//! weatherapi.com client
//!
//! The app talks to the provider through [`WeatherProvider`], so tests can swap
//! in a fake. [`WeatherApiClient`] is the HTTP implementation.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use tracing::{debug, instrument, warn};

use crate::error::ProviderError;
use crate::models::{self, CurrentConditions, ForecastReport};

/// Default provider endpoint
pub const DEFAULT_BASE_URL: &str = "https://api.weatherapi.com/v1";

/// Number of days requested from the forecast endpoint
pub const FORECAST_DAYS: u8 = 7;

/// Provider client configuration
#[derive(Clone)]
pub struct ProviderConfig {
    /// API base URL without trailing slash
    pub base_url: String,
    pub api_key: String,
    /// Request timeout. `None` keeps the transport default.
    pub timeout: Option<Duration>,
}

impl ProviderConfig {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            api_key: api_key.into(),
            timeout: None,
        }
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }
}

// The key must never end up in logs.
impl std::fmt::Debug for ProviderConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ProviderConfig")
            .field("base_url", &self.base_url)
            .field("api_key", &"<redacted>")
            .field("timeout", &self.timeout)
            .finish()
    }
}

/// Weather data source used by the app
#[async_trait]
pub trait WeatherProvider: Send + Sync {
    /// Place names matching a partial query, in provider order
    async fn search(&self, query: &str) -> Result<Vec<String>, ProviderError>;

    /// Current conditions for a city
    async fn current(&self, city: &str) -> Result<CurrentConditions, ProviderError>;

    /// Current conditions plus a `days`-long daily forecast
    async fn forecast(&self, city: &str, days: u8) -> Result<ForecastReport, ProviderError>;
}

/// HTTP client for weatherapi.com
#[derive(Debug, Clone)]
pub struct WeatherApiClient {
    http: Client,
    config: ProviderConfig,
}

impl WeatherApiClient {
    pub fn new(config: ProviderConfig) -> Result<Self, ProviderError> {
        if config.api_key.trim().is_empty() {
            return Err(ProviderError::Config("API key is empty".into()));
        }

        let mut builder = Client::builder();
        if let Some(timeout) = config.timeout {
            builder = builder.timeout(timeout);
        }
        let http = builder
            .build()
            .map_err(|e| ProviderError::Config(e.to_string()))?;

        Ok(Self { http, config })
    }

    pub fn config(&self) -> &ProviderConfig {
        &self.config
    }

    fn url(&self, endpoint: &str, query: &str) -> String {
        format!(
            "{}/{}?key={}&q={}",
            self.config.base_url.trim_end_matches('/'),
            endpoint,
            urlencoding::encode(&self.config.api_key),
            urlencoding::encode(query)
        )
    }

    /// GET a URL and return the body of a success response
    async fn get_body(&self, url: &str) -> Result<String, ProviderError> {
        let response = self.http.get(url).send().await?;
        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            let message = models::decode_error_message(&body);
            warn!(status = status.as_u16(), ?message, "provider rejected request");
            return Err(ProviderError::Status {
                status: status.as_u16(),
                message,
            });
        }

        Ok(body)
    }
}

#[async_trait]
impl WeatherProvider for WeatherApiClient {
    #[instrument(skip(self))]
    async fn search(&self, query: &str) -> Result<Vec<String>, ProviderError> {
        let body = self.get_body(&self.url("search.json", query)).await?;
        let names = models::decode_search(&body)?;
        debug!(count = names.len(), "search results");
        Ok(names)
    }

    #[instrument(skip(self))]
    async fn current(&self, city: &str) -> Result<CurrentConditions, ProviderError> {
        let body = self.get_body(&self.url("current.json", city)).await?;
        let current = models::decode_current(&body)?;
        debug!(location = %current.location, "current conditions");
        Ok(current)
    }

    #[instrument(skip(self))]
    async fn forecast(&self, city: &str, days: u8) -> Result<ForecastReport, ProviderError> {
        let url = format!("{}&days={}", self.url("forecast.json", city), days);
        let body = self.get_body(&url).await?;
        let report = models::decode_forecast(&body)?;
        debug!(
            location = %report.current.location,
            days = report.days.len(),
            "forecast"
        );
        Ok(report)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client() -> WeatherApiClient {
        WeatherApiClient::new(ProviderConfig::new("k3y").with_base_url("http://localhost:1/v1/"))
            .unwrap()
    }

    #[test]
    fn test_url_encodes_query() {
        let url = client().url("current.json", "São Paulo & co");
        assert_eq!(
            url,
            "http://localhost:1/v1/current.json?key=k3y&q=S%C3%A3o%20Paulo%20%26%20co"
        );
    }

    #[test]
    fn test_empty_key_rejected() {
        let err = WeatherApiClient::new(ProviderConfig::new("  ")).unwrap_err();
        assert!(matches!(err, ProviderError::Config(_)));
    }

    #[test]
    fn test_debug_redacts_key() {
        let rendered = format!("{:?}", ProviderConfig::new("super-secret"));
        assert!(!rendered.contains("super-secret"));
        assert!(rendered.contains("<redacted>"));
    }
}
