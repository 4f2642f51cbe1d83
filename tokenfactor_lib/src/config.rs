//! Process configuration for the completion provider.
//!
//! The market-data provider needs no credentials. The completion API key is
//! read once at startup and carried in an explicit `Config` value; nothing
//! in the pipeline reads the environment after that.

/// Environment variable holding the completion-provider API key.
const API_KEY_VAR: &str = "OPENAI_API_KEY";

/// Configuration injected into the clients.
#[derive(Debug, Clone)]
pub struct Config {
    pub completion_api_key: String,
}

/// Error raised when required configuration is absent.
#[derive(thiserror::Error, Debug)]
pub enum ConfigError {
    #[error("missing environment variable {0}")]
    MissingVar(&'static str),
}

impl Config {
    /// Loads configuration from the process environment, reading a `.env`
    /// file first if one is present.
    pub fn from_env() -> Result<Self, ConfigError> {
        let _ = dotenvy::dotenv();
        let completion_api_key =
            std::env::var(API_KEY_VAR).map_err(|_| ConfigError::MissingVar(API_KEY_VAR))?;
        Ok(Self { completion_api_key })
    }
}
