//! Typed client for the public PokeAPI.
//!
//! # Overview
//! Builds `HttpRequest` values and parses `HttpResponse` values without
//! touching the network (host-does-IO pattern). `BlockingPokeApi` (ureq) and
//! `AsyncPokeApi` (reqwest) pair that core with a transport and expose the
//! two operations: `get_pokemon_details` and `get_pokemon_list`.
//!
//! # Design
//! - `PokeApiClient` is stateless. It holds only `base_url`.
//! - Each operation is split into `build_*` (produces request) and
//!   `parse_*` (consumes response), so the I/O boundary is explicit.
//! - A non-2xx status is data (`ApiResponse::Failure`). Transport and
//!   decode failures are `ApiError`s.
//! - DTOs are defined independently from the mock-pokeapi crate;
//!   integration tests catch schema drift.

pub mod api;
pub mod client;
pub mod config;
pub mod error;
pub mod http;
pub mod response;
pub mod transport;
pub mod types;

pub use api::{AsyncPokeApi, BlockingPokeApi};
pub use client::PokeApiClient;
pub use config::ClientConfig;
pub use error::{ApiError, BoxError};
pub use http::{HttpMethod, HttpRequest, HttpResponse};
pub use response::ApiResponse;
pub use transport::{AsyncTransport, ReqwestTransport, Transport, UreqTransport};
pub use types::{Pokemon, PokemonBasic, PokemonListResponse, Sprites};
