//! Configuration Module
//!
//! Loads client configuration from environment variables.

use std::env;
use std::time::Duration;

use crate::cache::default_reap_interval;

/// Default PokeAPI base URL
pub const DEFAULT_BASE_URL: &str = "https://pokeapi.co/api/v2/";

/// Client configuration parameters.
///
/// All values can be configured via environment variables with sensible defaults.
#[derive(Debug, Clone)]
pub struct Config {
    /// Base URL of the PokeAPI, always ending in `/`
    pub base_url: String,
    /// Cache entry TTL in seconds
    pub cache_ttl: u64,
    /// Reaper tick period in milliseconds; `None` means half the TTL
    pub reap_interval_ms: Option<u64>,
    /// HTTP request timeout in seconds
    pub request_timeout: u64,
}

impl Config {
    /// Creates a new Config by loading values from environment variables.
    ///
    /// # Environment Variables
    /// - `POKEAPI_BASE_URL` - API base URL (default: https://pokeapi.co/api/v2/)
    /// - `CACHE_TTL` - Cache TTL in seconds (default: 600)
    /// - `REAP_INTERVAL_MS` - Reaper tick in milliseconds (default: half the TTL)
    /// - `REQUEST_TIMEOUT` - HTTP timeout in seconds (default: 10)
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            base_url: env::var("POKEAPI_BASE_URL")
                .ok()
                .filter(|v| !v.trim().is_empty())
                .map(|v| normalize_base_url(&v))
                .unwrap_or(defaults.base_url),
            cache_ttl: env::var("CACHE_TTL")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.cache_ttl),
            reap_interval_ms: env::var("REAP_INTERVAL_MS")
                .ok()
                .and_then(|v| v.parse().ok()),
            request_timeout: env::var("REQUEST_TIMEOUT")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.request_timeout),
        }
    }

    pub fn cache_ttl(&self) -> Duration {
        Duration::from_secs(self.cache_ttl)
    }

    /// Returns the reaper tick, falling back to half the TTL.
    pub fn reap_interval(&self) -> Duration {
        self.reap_interval_ms
            .map(Duration::from_millis)
            .unwrap_or_else(|| default_reap_interval(self.cache_ttl()))
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            cache_ttl: 600,
            reap_interval_ms: None,
            request_timeout: 10,
        }
    }
}

/// Trims whitespace and guarantees a trailing slash.
pub fn normalize_base_url(url: &str) -> String {
    let trimmed = url.trim().trim_end_matches('/');
    format!("{}/", trimmed)
}
