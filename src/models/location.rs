//! Location models for the PokeAPI `location-area` endpoints

use serde::{Deserialize, Serialize};

/// A `{ name, url }` reference to another API resource.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NamedResource {
    pub name: String,
    pub url: String,
}

/// One page of location areas (GET /location-area/).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LocationsResponse {
    pub count: u32,
    /// URL of the next page, `None` on the last page
    pub next: Option<String>,
    /// URL of the previous page, `None` on the first page
    pub previous: Option<String>,
    pub results: Vec<NamedResource>,
}

/// A single location area (GET /location-area/{name}).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LocationResponse {
    pub location: NamedResource,
    #[serde(default)]
    pub pokemon_encounters: Vec<PokemonEncounter>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PokemonEncounter {
    pub pokemon: NamedResource,
}
