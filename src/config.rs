//! Runtime Configuration
//!
//! Settings come from environment variables, read once at startup. The only
//! required value is the data.gov.in API key; everything else has a default.

use std::time::Duration;
use thiserror::Error;

use crate::sources::{self, Dataset};

/// Environment variable holding the data.gov.in API key.
pub const API_KEY_VAR: &str = "DATA_GOV_API_KEY";
/// Optional endpoint overrides (useful for self-hosted mirrors and tests).
pub const AGRICULTURE_URL_VAR: &str = "AGRICULTURE_API_URL";
pub const RAINFALL_URL_VAR: &str = "RAINFALL_API_URL";
/// Optional cache TTL override, in seconds.
pub const CACHE_TTL_VAR: &str = "CACHE_TTL_SECS";

const DEFAULT_CACHE_TTL: Duration = Duration::from_secs(3600);

/// Startup failures. These halt the process before any query is served.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("DATA_GOV_API_KEY is not set; export a data.gov.in API key before starting")]
    MissingApiKey,
}

#[derive(Debug, Clone)]
pub struct Settings {
    pub api_key: String,
    pub agriculture_url: String,
    pub rainfall_url: String,
    pub cache_ttl: Duration,
}

impl Settings {
    /// Read settings from the environment. A missing or blank API key is the
    /// one fatal condition.
    pub fn from_env() -> Result<Self, ConfigError> {
        let api_key = std::env::var(API_KEY_VAR)
            .ok()
            .filter(|key| !key.trim().is_empty())
            .ok_or(ConfigError::MissingApiKey)?;

        let agriculture_url = std::env::var(AGRICULTURE_URL_VAR)
            .unwrap_or_else(|_| sources::AGRICULTURE_API_URL.to_string());
        let rainfall_url = std::env::var(RAINFALL_URL_VAR)
            .unwrap_or_else(|_| sources::RAINFALL_API_URL.to_string());

        let cache_ttl = std::env::var(CACHE_TTL_VAR)
            .ok()
            .and_then(|raw| raw.parse::<u64>().ok())
            .map(Duration::from_secs)
            .unwrap_or(DEFAULT_CACHE_TTL);

        Ok(Settings {
            api_key,
            agriculture_url,
            rainfall_url,
            cache_ttl,
        })
    }

    /// Default endpoints and TTL with an explicit key. Used by tests and
    /// embedders that manage credentials themselves.
    pub fn with_api_key(api_key: impl Into<String>) -> Self {
        Settings {
            api_key: api_key.into(),
            agriculture_url: sources::AGRICULTURE_API_URL.to_string(),
            rainfall_url: sources::RAINFALL_API_URL.to_string(),
            cache_ttl: DEFAULT_CACHE_TTL,
        }
    }

    /// Endpoint URL for a dataset.
    pub fn endpoint(&self, dataset: Dataset) -> &str {
        match dataset {
            Dataset::Agriculture => &self.agriculture_url,
            Dataset::Rainfall => &self.rainfall_url,
        }
    }
}
