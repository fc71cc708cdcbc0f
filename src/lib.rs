//! Pokedex - A REPL client for the PokeAPI
//!
//! Memoizes API responses in an in-memory cache whose entries are reaped
//! after a fixed TTL.

pub mod api;
pub mod cache;
pub mod config;
pub mod error;
pub mod models;
pub mod repl;
pub mod tasks;

pub use api::PokeApiClient;
pub use cache::TtlCache;
pub use config::Config;
pub use error::{PokedexError, Result};
pub use repl::Session;
