//! Command-line and environment configuration

use std::path::PathBuf;
use std::time::Duration;

use clap::Parser;
use thiserror::Error;
use wxlookup_provider::{DEFAULT_BASE_URL, ProviderConfig};

use crate::state::Tier;

/// Key baked in at build time, used when neither flag nor env provides one
const BUILD_API_KEY: Option<&str> = option_env!("WEATHER_API_KEY");

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("no API key: pass --api-key or set WEATHER_API_KEY")]
    MissingApiKey,

    #[error("no cache directory for the default log file; pass --log-file")]
    NoLogDir,
}

/// Terminal weather lookup
#[derive(Parser, Debug)]
#[command(name = "wxlookup")]
#[command(about = "Look up current weather and a 7-day forecast from weatherapi.com")]
pub struct Args {
    /// weatherapi.com API key
    #[arg(long, env = "WEATHER_API_KEY", hide_env_values = true)]
    pub api_key: Option<String>,

    /// Provider base URL
    #[arg(long, env = "WEATHER_API_BASE_URL", default_value = DEFAULT_BASE_URL)]
    pub base_url: String,

    /// Capability tier
    #[arg(long, value_enum, default_value_t = Tier::Forecast)]
    pub tier: Tier,

    /// City to search on start
    #[arg(long, short)]
    pub city: Option<String>,

    /// Delay before a suggestion lookup is sent (0 = immediately)
    #[arg(long, default_value = "0")]
    pub suggest_debounce_ms: u64,

    /// Log file (default: <cache dir>/wxlookup/wxlookup.log)
    #[arg(long)]
    pub log_file: Option<PathBuf>,

    /// Enable debug mode (F12 to toggle overlay)
    #[arg(long)]
    pub debug: bool,
}

/// Resolved start-up configuration
#[derive(Debug, Clone)]
pub struct Config {
    pub provider: ProviderConfig,
    pub tier: Tier,
    pub city: Option<String>,
    pub suggest_debounce: Option<Duration>,
    pub log_file: PathBuf,
    pub debug: bool,
}

impl Args {
    pub fn resolve(self) -> Result<Config, ConfigError> {
        let api_key = resolve_api_key(self.api_key, BUILD_API_KEY)?;
        let log_file = match self.log_file {
            Some(path) => path,
            None => default_log_file()?,
        };

        Ok(Config {
            provider: ProviderConfig::new(api_key).with_base_url(self.base_url),
            tier: self.tier,
            city: self.city.filter(|city| !city.trim().is_empty()),
            suggest_debounce: (self.suggest_debounce_ms > 0)
                .then(|| Duration::from_millis(self.suggest_debounce_ms)),
            log_file,
            debug: self.debug,
        })
    }
}

/// Flag/env key first, then the build-time key; blank keys count as missing
fn resolve_api_key(given: Option<String>, baked: Option<&str>) -> Result<String, ConfigError> {
    given
        .map(|key| key.trim().to_string())
        .filter(|key| !key.is_empty())
        .or_else(|| {
            baked
                .map(str::trim)
                .filter(|key| !key.is_empty())
                .map(str::to_string)
        })
        .ok_or(ConfigError::MissingApiKey)
}

fn default_log_file() -> Result<PathBuf, ConfigError> {
    dirs::cache_dir()
        .map(|dir| dir.join("wxlookup").join("wxlookup.log"))
        .ok_or(ConfigError::NoLogDir)
}
