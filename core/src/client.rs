//! Stateless HTTP request builder and response parser for the PokeAPI.
//!
//! # Design
//! `PokeApiClient` holds only a `base_url` and carries no mutable state
//! between calls. Each operation is split into a `build_*` method that
//! produces an `HttpRequest` and a `parse_*` method that consumes an
//! `HttpResponse`. Someone else executes the HTTP round-trip: a `Transport`,
//! an `AsyncTransport`, or the caller directly.
//!
//! Parsing decodes the body only on a 2xx status. Any other status becomes
//! `ApiResponse::Failure` without looking at the body.

use serde::de::DeserializeOwned;

use crate::error::ApiError;
use crate::http::{HttpMethod, HttpRequest, HttpResponse};
use crate::response::ApiResponse;
use crate::types::{Pokemon, PokemonListResponse};

/// Synchronous, stateless client for the PokeAPI.
#[derive(Debug, Clone)]
pub struct PokeApiClient {
    base_url: String,
}

impl PokeApiClient {
    pub fn new(base_url: &str) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// `GET {base}/pokemon/{name}`. `name` is inserted verbatim.
    pub fn build_pokemon_details(&self, name: &str) -> HttpRequest {
        get(format!("{}/pokemon/{name}", self.base_url))
    }

    /// `GET {base}/pokemon?limit={limit}`.
    pub fn build_pokemon_list(&self, limit: u32) -> HttpRequest {
        get(format!("{}/pokemon?limit={limit}", self.base_url))
    }

    pub fn parse_pokemon_details(&self, response: HttpResponse) -> Result<ApiResponse<Pokemon>, ApiError> {
        decode_on_success(response)
    }

    pub fn parse_pokemon_list(
        &self,
        response: HttpResponse,
    ) -> Result<ApiResponse<PokemonListResponse>, ApiError> {
        decode_on_success(response)
    }
}

fn get(path: String) -> HttpRequest {
    HttpRequest {
        method: HttpMethod::Get,
        path,
        headers: Vec::new(),
    }
}

fn decode_on_success<T: DeserializeOwned>(response: HttpResponse) -> Result<ApiResponse<T>, ApiError> {
    let status = response.status;
    if !response.is_success() {
        return Ok(ApiResponse::Failure {
            status,
            body: response.body,
        });
    }
    let body = serde_json::from_str(&response.body).map_err(|source| ApiError::Decode { status, source })?;
    Ok(ApiResponse::Success { status, body })
}
