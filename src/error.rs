//! Error types for the Pokedex client
//!
//! The cache itself has no error path; these cover the HTTP fetch, payload
//! decoding, and command usage around it.

use thiserror::Error;

// == Pokedex Error Enum ==
/// Unified error type for API access and command handling.
#[derive(Error, Debug)]
pub enum PokedexError {
    /// Transport-level failure talking to the API
    #[error("request to {url} failed: {source}")]
    Http {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    /// API answered with a non-success status
    #[error("{url} returned status {status}")]
    Status { url: String, status: u16 },

    /// Live response body did not match the expected shape
    #[error("could not decode the response from {url}: {source}")]
    Decode {
        url: String,
        #[source]
        source: serde_json::Error,
    },

    /// Cached payload no longer decodes into the expected shape
    #[error("cached response for {url} seems to be broken: {source}")]
    CorruptCache {
        url: String,
        #[source]
        source: serde_json::Error,
    },

    /// Decoded response could not be re-serialized for caching
    #[error("could not store the response for {url} into cache: {source}")]
    Encode {
        url: String,
        #[source]
        source: serde_json::Error,
    },

    /// Command invoked with the wrong arguments
    #[error("{0}")]
    Usage(String),
}

// == Result Type Alias ==
/// Convenience Result type for the Pokedex client.
pub type Result<T> = std::result::Result<T, PokedexError>;
