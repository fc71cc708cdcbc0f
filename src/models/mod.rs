//! Response models for the PokeAPI
//!
//! Partial mappings of the JSON bodies the REPL consumes. Unmapped fields are
//! ignored on decode and dropped when a response is re-serialized for caching.

pub mod location;
pub mod pokemon;

// Re-export commonly used types
pub use location::{LocationResponse, LocationsResponse, NamedResource, PokemonEncounter};
pub use pokemon::{PokemonAbility, PokemonResponse, PokemonStat, PokemonType};
