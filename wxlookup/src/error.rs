use std::io;
use std::path::PathBuf;

use thiserror::Error;
use wxlookup_provider::ProviderError;

use crate::config::ConfigError;

/// Start-up and terminal failures; printed to stderr before exiting
#[derive(Debug, Error)]
pub enum AppError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("could not create provider client: {0}")]
    Provider(#[from] ProviderError),

    #[error("could not open log file {}: {source}", path.display())]
    LogFile { path: PathBuf, source: io::Error },

    #[error("could not install logger: {0}")]
    Logger(String),

    #[error("terminal error: {0}")]
    Terminal(#[from] io::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages() {
        let err = AppError::from(ConfigError::MissingApiKey);
        assert_eq!(
            err.to_string(),
            "no API key: pass --api-key or set WEATHER_API_KEY"
        );

        let err = AppError::LogFile {
            path: PathBuf::from("/nope/wx.log"),
            source: io::Error::new(io::ErrorKind::NotFound, "missing"),
        };
        assert_eq!(err.to_string(), "could not open log file /nope/wx.log: missing");
    }
}
