//! PokeAPI Client
//!
//! Fetches and decodes API responses, consulting the [`TtlCache`] first.

use std::sync::Arc;

use serde::{de::DeserializeOwned, Serialize};
use tracing::debug;

use crate::cache::TtlCache;
use crate::config::{normalize_base_url, Config};
use crate::error::{PokedexError, Result};
use crate::models::{LocationResponse, LocationsResponse, PokemonResponse};

/// HTTP client for the PokeAPI.
///
/// Every request URL doubles as its cache key. On a hit the cached bytes are
/// decoded and the network is skipped; on a miss the live response is decoded,
/// re-serialized and stored before being returned.
#[derive(Debug, Clone)]
pub struct PokeApiClient {
    http: reqwest::Client,
    base_url: String,
    cache: Arc<TtlCache>,
}

impl PokeApiClient {
    /// Creates a client from configuration, sharing `cache`.
    pub fn new(config: &Config, cache: Arc<TtlCache>) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(config.request_timeout())
            .build()
            .map_err(|source| PokedexError::Http {
                url: config.base_url.clone(),
                source,
            })?;

        Ok(Self::with_http_client(&config.base_url, http, cache))
    }

    /// Creates a client around an existing `reqwest::Client`.
    pub fn with_http_client(base_url: &str, http: reqwest::Client, cache: Arc<TtlCache>) -> Self {
        Self {
            http,
            base_url: normalize_base_url(base_url),
            cache,
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn cache(&self) -> &Arc<TtlCache> {
        &self.cache
    }

    /// URL of the first page of location areas.
    pub fn first_locations_url(&self) -> String {
        format!("{}location-area/", self.base_url)
    }

    /// Fetches one page of location areas by its absolute URL.
    pub async fn locations(&self, page_url: &str) -> Result<LocationsResponse> {
        self.fetch_json(page_url).await
    }

    pub async fn location_area(&self, name: &str) -> Result<LocationResponse> {
        let url = format!("{}location-area/{}", self.base_url, name);
        self.fetch_json(&url).await
    }

    pub async fn pokemon(&self, name: &str) -> Result<PokemonResponse> {
        let url = format!("{}pokemon/{}", self.base_url, name);
        self.fetch_json(&url).await
    }

    /// Returns the decoded body of `url`, served from the cache when present.
    pub async fn fetch_json<T>(&self, url: &str) -> Result<T>
    where
        T: DeserializeOwned + Serialize,
    {
        if let Some(cached) = self.cache.get(url).await {
            debug!(url, bytes = cached.len(), "Cache hit");
            return serde_json::from_slice(&cached).map_err(|source| PokedexError::CorruptCache {
                url: url.to_string(),
                source,
            });
        }

        debug!(url, "Cache miss, fetching");
        let decoded: T = self.fetch_live(url).await?;

        let encoded = serde_json::to_vec(&decoded).map_err(|source| PokedexError::Encode {
            url: url.to_string(),
            source,
        })?;
        self.cache.add(url, encoded).await;

        Ok(decoded)
    }

    async fn fetch_live<T: DeserializeOwned>(&self, url: &str) -> Result<T> {
        let http_err = |source| PokedexError::Http {
            url: url.to_string(),
            source,
        };

        let response = self.http.get(url).send().await.map_err(http_err)?;
        let status = response.status();
        if !status.is_success() {
            return Err(PokedexError::Status {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }

        let body = response.bytes().await.map_err(http_err)?;
        serde_json::from_slice(&body).map_err(|source| PokedexError::Decode {
            url: url.to_string(),
            source,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    fn client(base_url: &str) -> PokeApiClient {
        let cache = Arc::new(TtlCache::new(Duration::from_secs(60)));
        PokeApiClient::with_http_client(base_url, reqwest::Client::new(), cache)
    }

    #[tokio::test]
    async fn test_urls_are_built_from_base() {
        let client = client("http://localhost:1/api/v2");

        assert_eq!(client.base_url(), "http://localhost:1/api/v2/");
        assert_eq!(
            client.first_locations_url(),
            "http://localhost:1/api/v2/location-area/"
        );
    }

    #[tokio::test]
    async fn test_cache_hit_skips_network() {
        // Nothing listens on this port; only a cache hit can succeed
        let client = client("http://127.0.0.1:9/");
        let url = format!("{}pokemon/ditto", client.base_url());
        let body = br#"{"name":"ditto","base_experience":101,"height":3,"weight":40}"#;
        client.cache().add(url, body.to_vec()).await;

        let ditto = client.pokemon("ditto").await.unwrap();
        assert_eq!(ditto.name, "ditto");
        assert_eq!(ditto.catch_difficulty(), 101);
    }

    #[tokio::test]
    async fn test_corrupt_cached_payload() {
        let client = client("http://127.0.0.1:9/");
        let url = format!("{}pokemon/ditto", client.base_url());
        client.cache().add(url, b"not json".to_vec()).await;

        let err = client.pokemon("ditto").await.unwrap_err();
        assert!(matches!(err, PokedexError::CorruptCache { .. }));
    }
}
