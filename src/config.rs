use std::env;

use thiserror::Error;

pub(crate) const API_URL_VAR: &str = "TXTRACK_API_URL";
pub(crate) const API_KEY_VAR: &str = "TXTRACK_API_KEY";
pub(crate) const LOG_VAR: &str = "TXTRACK_LOG";

const DEFAULT_LOG_FILTER: &str = "txtrack=info";

#[derive(Error, Debug, PartialEq, Eq)]
pub(crate) enum ConfigError {
    #[error("{0} is not set")]
    Missing(&'static str),
    #[error("{0} is empty")]
    Empty(&'static str),
}

#[derive(Clone)]
pub(crate) struct Config {
    pub(crate) api_url: String,
    pub(crate) api_key: String,
    pub(crate) log_filter: String,
}

impl std::fmt::Debug for Config {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Config")
            .field("api_url", &self.api_url)
            .field("api_key", &"********")
            .field("log_filter", &self.log_filter)
            .finish()
    }
}

impl Config {
    /// Read settings from the environment, loading `.env` first if present.
    pub(crate) fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|name| env::var(name).ok())
    }

    pub(crate) fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let required = |name: &'static str| -> Result<String, ConfigError> {
            let value = lookup(name).ok_or(ConfigError::Missing(name))?;
            let value = value.trim().to_string();
            if value.is_empty() {
                return Err(ConfigError::Empty(name));
            }
            Ok(value)
        };

        Ok(Self {
            api_url: required(API_URL_VAR)?,
            api_key: required(API_KEY_VAR)?,
            log_filter: lookup(LOG_VAR)
                .filter(|f| !f.trim().is_empty())
                .unwrap_or_else(|| DEFAULT_LOG_FILTER.to_string()),
        })
    }
}
