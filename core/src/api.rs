//! The two PokeAPI operations, wired to a transport.
//!
//! Each call is one build → execute → parse pass over a `PokeApiClient`.
//! Nothing is cached or shared between calls, so concurrent invocations are
//! independent of each other.

use crate::client::PokeApiClient;
use crate::config::ClientConfig;
use crate::error::ApiError;
use crate::response::ApiResponse;
use crate::transport::{AsyncTransport, ReqwestTransport, Transport, UreqTransport};
use crate::types::{Pokemon, PokemonListResponse};

/// Blocking PokeAPI client.
#[derive(Debug, Clone)]
pub struct BlockingPokeApi<T = UreqTransport> {
    client: PokeApiClient,
    transport: T,
}

impl BlockingPokeApi<UreqTransport> {
    pub fn from_config(config: &ClientConfig) -> Self {
        Self::new(PokeApiClient::new(&config.base_url), UreqTransport::new(config))
    }
}

impl<T: Transport> BlockingPokeApi<T> {
    pub fn new(client: PokeApiClient, transport: T) -> Self {
        Self { client, transport }
    }

    pub fn client(&self) -> &PokeApiClient {
        &self.client
    }

    /// Fetch `/pokemon/{name}`.
    ///
    /// A non-2xx status is returned as `Ok(ApiResponse::Failure)`.
    /// Transport and decode failures are `Err`.
    #[tracing::instrument(skip(self), level = "debug")]
    pub fn get_pokemon_details(&self, name: &str) -> Result<ApiResponse<Pokemon>, ApiError> {
        let request = self.client.build_pokemon_details(name);
        let response = self.transport.execute(&request)?;
        self.client.parse_pokemon_details(response)
    }

    /// Fetch `/pokemon?limit={limit}`.
    #[tracing::instrument(skip(self), level = "debug")]
    pub fn get_pokemon_list(&self, limit: u32) -> Result<ApiResponse<PokemonListResponse>, ApiError> {
        let request = self.client.build_pokemon_list(limit);
        let response = self.transport.execute(&request)?;
        self.client.parse_pokemon_list(response)
    }
}

/// Async PokeAPI client.
///
/// Dropping a pending `get_*` future abandons the in-flight request and
/// yields nothing.
#[derive(Debug, Clone)]
pub struct AsyncPokeApi<T = ReqwestTransport> {
    client: PokeApiClient,
    transport: T,
}

impl AsyncPokeApi<ReqwestTransport> {
    pub fn from_config(config: &ClientConfig) -> Result<Self, ApiError> {
        Ok(Self::new(
            PokeApiClient::new(&config.base_url),
            ReqwestTransport::new(config)?,
        ))
    }
}

impl<T: AsyncTransport> AsyncPokeApi<T> {
    pub fn new(client: PokeApiClient, transport: T) -> Self {
        Self { client, transport }
    }

    pub fn client(&self) -> &PokeApiClient {
        &self.client
    }

    #[tracing::instrument(skip(self), level = "debug")]
    pub async fn get_pokemon_details(&self, name: &str) -> Result<ApiResponse<Pokemon>, ApiError> {
        let request = self.client.build_pokemon_details(name);
        let response = self.transport.execute(&request).await?;
        self.client.parse_pokemon_details(response)
    }

    #[tracing::instrument(skip(self), level = "debug")]
    pub async fn get_pokemon_list(&self, limit: u32) -> Result<ApiResponse<PokemonListResponse>, ApiError> {
        let request = self.client.build_pokemon_list(limit);
        let response = self.transport.execute(&request).await?;
        self.client.parse_pokemon_list(response)
    }
}
