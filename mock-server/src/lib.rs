//! Simulated PokeAPI for tests and local development.
//!
//! Responses come from two places. Scripted responses queued with
//! `MockPokeApi::enqueue` are served first, in FIFO order, whatever the
//! request. Once the queue is empty, requests are routed against the
//! fixture store. Every request is recorded either way and can be inspected
//! with `take_request`.

use std::{
    collections::VecDeque,
    sync::{Arc, Mutex, MutexGuard},
};

use axum::{
    body::Body,
    extract::{Request, State},
    http::{header::CONTENT_TYPE, HeaderValue, Method, StatusCode},
    response::{IntoResponse, Response},
    Router,
};
use serde::{Deserialize, Serialize};
use tokio::net::TcpListener;

/// Prefix used for the `url` field of list entries.
pub const RESOURCE_BASE: &str = "https://pokeapi.co/api/v2";

const DEFAULT_LIMIT: usize = 20;
const NOT_FOUND_BODY: &str = r#"{"error":"Not Found"}"#;
const JSON: &str = "application/json";

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Sprites {
    pub front_default: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pokemon {
    pub id: u32,
    pub name: String,
    pub height: i32,
    pub weight: i32,
    pub sprites: Sprites,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct NamedResource {
    pub name: String,
    pub url: String,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PokemonList {
    pub count: usize,
    pub results: Vec<NamedResource>,
}

/// A canned response served ahead of fixture routing.
///
/// The body is sent byte-for-byte. No `content-type` header is set unless
/// one is given.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MockResponse {
    pub status: u16,
    pub body: Vec<u8>,
    pub content_type: Option<String>,
}

impl MockResponse {
    pub fn new(status: u16) -> Self {
        Self {
            status,
            body: Vec::new(),
            content_type: None,
        }
    }

    pub fn with_body(mut self, body: impl Into<Vec<u8>>) -> Self {
        self.body = body.into();
        self
    }

    pub fn with_content_type(mut self, content_type: impl Into<String>) -> Self {
        self.content_type = Some(content_type.into());
        self
    }

    /// Shorthand for a JSON body with `content-type: application/json`.
    pub fn json(status: u16, body: impl Into<Vec<u8>>) -> Self {
        Self::new(status).with_body(body).with_content_type(JSON)
    }
}

/// Method and path (including query string) of a received request.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RecordedRequest {
    pub method: String,
    pub path: String,
}

#[derive(Default)]
struct Inner {
    fixtures: Vec<Pokemon>,
    queue: VecDeque<MockResponse>,
    requests: VecDeque<RecordedRequest>,
}

/// Handle to the simulated server's state. Clones share the same state.
#[derive(Clone, Default)]
pub struct MockPokeApi {
    inner: Arc<Mutex<Inner>>,
}

impl MockPokeApi {
    /// Server with no fixtures: every unscripted request is a 404.
    pub fn new() -> Self {
        Self::default()
    }

    /// Server seeded with a handful of first-generation Pokémon.
    pub fn with_fixtures() -> Self {
        let api = Self::new();
        for pokemon in default_fixtures() {
            api.insert(pokemon);
        }
        api
    }

    /// Add or replace a fixture, keyed by name. Fixtures stay ordered by id.
    pub fn insert(&self, pokemon: Pokemon) {
        let mut inner = self.lock();
        inner.fixtures.retain(|p| p.name != pokemon.name);
        let at = inner.fixtures.partition_point(|p| p.id < pokemon.id);
        inner.fixtures.insert(at, pokemon);
    }

    pub fn enqueue(&self, response: MockResponse) {
        self.lock().queue.push_back(response);
    }

    /// Oldest request not yet taken.
    pub fn take_request(&self) -> Option<RecordedRequest> {
        self.lock().requests.pop_front()
    }

    /// Number of requests recorded and not yet taken.
    pub fn request_count(&self) -> usize {
        self.lock().requests.len()
    }

    pub fn router(&self) -> Router {
        Router::new().fallback(handle).with_state(self.clone())
    }

    pub async fn serve(self, listener: TcpListener) -> Result<(), std::io::Error> {
        axum::serve(listener, self.router()).await
    }

    fn lock(&self) -> MutexGuard<'_, Inner> {
        // A panicking test thread must not wedge every other request.
        self.inner.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

/// Serve a fixture-backed server on `listener`.
pub async fn run(listener: TcpListener) -> Result<(), std::io::Error> {
    MockPokeApi::with_fixtures().serve(listener).await
}

async fn handle(State(api): State<MockPokeApi>, request: Request) -> Response {
    let method = request.method().clone();
    let uri = request.uri();
    let path = uri.path().to_string();
    let full_path = uri
        .path_and_query()
        .map(|pq| pq.as_str().to_string())
        .unwrap_or_else(|| path.clone());
    let query = uri.query().map(str::to_string);

    tracing::debug!(%method, path = %full_path, "mock request");

    let mut inner = api.lock();
    inner.requests.push_back(RecordedRequest {
        method: method.to_string(),
        path: full_path,
    });

    if let Some(scripted) = inner.queue.pop_front() {
        return scripted_response(scripted);
    }

    if method != Method::GET {
        return json(StatusCode::METHOD_NOT_ALLOWED, r#"{"error":"Method Not Allowed"}"#.to_string());
    }

    if path == "/pokemon" || path == "/pokemon/" {
        return list(&inner.fixtures, query.as_deref());
    }
    let found = path
        .strip_prefix("/pokemon/")
        .map(|name| name.trim_end_matches('/'))
        .and_then(|name| inner.fixtures.iter().find(|p| p.name == name));
    match found {
        Some(pokemon) => to_json(StatusCode::OK, pokemon),
        None => json(StatusCode::NOT_FOUND, NOT_FOUND_BODY.to_string()),
    }
}

fn list(fixtures: &[Pokemon], query: Option<&str>) -> Response {
    let limit = match parse_limit(query) {
        Ok(limit) => limit,
        Err(value) => {
            let body = serde_json::json!({ "error": format!("invalid limit '{value}'") });
            return json(StatusCode::BAD_REQUEST, body.to_string());
        }
    };
    let results = fixtures
        .iter()
        .take(limit)
        .map(|p| NamedResource {
            name: p.name.clone(),
            url: format!("{RESOURCE_BASE}/pokemon/{}/", p.id),
        })
        .collect();
    to_json(
        StatusCode::OK,
        &PokemonList {
            count: fixtures.len(),
            results,
        },
    )
}

/// `limit` from the query string, `DEFAULT_LIMIT` if absent.
fn parse_limit(query: Option<&str>) -> Result<usize, String> {
    let value = query
        .into_iter()
        .flat_map(|q| q.split('&'))
        .find_map(|pair| pair.strip_prefix("limit="));
    match value {
        None => Ok(DEFAULT_LIMIT),
        Some(v) => v.parse().map_err(|_| v.to_string()),
    }
}

fn to_json<T: Serialize>(status: StatusCode, value: &T) -> Response {
    match serde_json::to_string(value) {
        Ok(body) => json(status, body),
        Err(err) => json(
            StatusCode::INTERNAL_SERVER_ERROR,
            serde_json::json!({ "error": err.to_string() }).to_string(),
        ),
    }
}

fn json(status: StatusCode, body: String) -> Response {
    (status, [(CONTENT_TYPE, JSON)], body).into_response()
}

fn scripted_response(scripted: MockResponse) -> Response {
    let mut response = Response::new(Body::from(scripted.body));
    *response.status_mut() = StatusCode::from_u16(scripted.status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
    if let Some(value) = scripted.content_type.and_then(|ct| HeaderValue::from_str(&ct).ok()) {
        response.headers_mut().insert(CONTENT_TYPE, value);
    }
    response
}

fn sprite(id: u32) -> Sprites {
    Sprites {
        front_default: Some(format!(
            "https://raw.githubusercontent.com/PokeAPI/sprites/master/sprites/pokemon/{id}.png"
        )),
    }
}

pub fn default_fixtures() -> Vec<Pokemon> {
    [
        (1, "bulbasaur", 7, 69),
        (2, "ivysaur", 10, 130),
        (3, "venusaur", 20, 1000),
        (4, "charmander", 6, 85),
        (25, "pikachu", 4, 60),
    ]
    .into_iter()
    .map(|(id, name, height, weight)| Pokemon {
        id,
        name: name.to_string(),
        height,
        weight,
        sprites: sprite(id),
    })
    .collect()
}
