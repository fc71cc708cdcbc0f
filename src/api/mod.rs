//! API Module
//!
//! HTTP access to the PokeAPI, memoized through the response cache.
//!
//! # Endpoints
//! - `GET location-area/` - Paginated list of location areas
//! - `GET location-area/{name}` - Pokemon encountered in one area
//! - `GET pokemon/{name}` - A single Pokemon

pub mod client;

pub use client::PokeApiClient;
