//! Wire-schema DTOs for the PokeAPI.
//!
//! # Design
//! These types mirror only the subset of the PokeAPI payload this client
//! uses; unknown fields are ignored. Wire names are declared per field with
//! serde attributes, so the mapping is fixed at compile time. The mock
//! server defines its own copies of the schema; integration tests catch any
//! drift between the two crates.

use serde::{Deserialize, Serialize};

/// A single Pokémon as returned by `GET /pokemon/{name}`.
///
/// `height` and `weight` are in decimetres and hectograms. They are signed
/// because the schema does not forbid negatives and the decoder should not
/// reject what the server sends.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pokemon {
    pub name: String,
    pub height: i32,
    pub weight: i32,
    #[serde(default)]
    pub sprites: Sprites,
}

/// Image URLs for a Pokémon. Only the default front sprite is mapped.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Sprites {
    #[serde(rename = "front_default", default)]
    pub front_default: Option<String>,
}

/// A named reference to a Pokémon detail resource.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PokemonBasic {
    pub name: String,
    pub url: String,
}

/// Body of `GET /pokemon?limit=n`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PokemonListResponse {
    pub results: Vec<PokemonBasic>,
}
