use axum::http::{header::CONTENT_TYPE, Request, StatusCode};
use http_body_util::BodyExt;
use mock_pokeapi::{MockPokeApi, MockResponse, Pokemon, PokemonList, RecordedRequest};
use tower::ServiceExt;

async fn body_json<T: serde::de::DeserializeOwned>(response: axum::response::Response) -> T {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

async fn body_bytes(response: axum::response::Response) -> bytes::Bytes {
    response.into_body().collect().await.unwrap().to_bytes()
}

fn get(uri: &str) -> Request<String> {
    Request::builder().uri(uri).body(String::new()).unwrap()
}

// --- fixtures: details ---

#[tokio::test]
async fn get_pokemon_by_name() {
    let api = MockPokeApi::with_fixtures();
    let resp = api.router().oneshot(get("/pokemon/pikachu")).await.unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
    let pokemon: Pokemon = body_json(resp).await;
    assert_eq!(pokemon.id, 25);
    assert_eq!(pokemon.name, "pikachu");
    assert_eq!(pokemon.height, 4);
    assert_eq!(pokemon.weight, 60);
    assert!(pokemon.sprites.front_default.is_some());
}

#[tokio::test]
async fn get_pokemon_tolerates_trailing_slash() {
    let api = MockPokeApi::with_fixtures();
    let resp = api.router().oneshot(get("/pokemon/ivysaur/")).await.unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
}

#[tokio::test]
async fn get_unknown_pokemon_returns_404_json() {
    let api = MockPokeApi::with_fixtures();
    let resp = api.router().oneshot(get("/pokemon/pokemoninexistente")).await.unwrap();

    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    let body: serde_json::Value = body_json(resp).await;
    assert_eq!(body["error"], "Not Found");
}

#[tokio::test]
async fn name_match_is_case_sensitive() {
    let api = MockPokeApi::with_fixtures();
    let resp = api.router().oneshot(get("/pokemon/Pikachu")).await.unwrap();
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn unknown_route_returns_404() {
    let api = MockPokeApi::with_fixtures();
    let resp = api.router().oneshot(get("/berry/cheri")).await.unwrap();
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn non_get_is_rejected() {
    let api = MockPokeApi::with_fixtures();
    let req = Request::builder()
        .method("DELETE")
        .uri("/pokemon/pikachu")
        .body(String::new())
        .unwrap();
    let resp = api.router().oneshot(req).await.unwrap();
    assert_eq!(resp.status(), StatusCode::METHOD_NOT_ALLOWED);
}

// --- fixtures: list ---

#[tokio::test]
async fn list_honours_limit_and_order() {
    let api = MockPokeApi::with_fixtures();
    let resp = api.router().oneshot(get("/pokemon?limit=2")).await.unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
    let list: PokemonList = body_json(resp).await;
    assert_eq!(list.count, 5);
    assert_eq!(list.results.len(), 2);
    assert_eq!(list.results[0].name, "bulbasaur");
    assert_eq!(list.results[0].url, "https://pokeapi.co/api/v2/pokemon/1/");
    assert_eq!(list.results[1].name, "ivysaur");
}

#[tokio::test]
async fn list_without_limit_returns_everything_seeded() {
    let api = MockPokeApi::with_fixtures();
    let resp = api.router().oneshot(get("/pokemon")).await.unwrap();
    let list: PokemonList = body_json(resp).await;
    assert_eq!(list.results.len(), 5);
    assert_eq!(list.results[4].name, "pikachu");
}

#[tokio::test]
async fn list_with_bad_limit_returns_400() {
    let api = MockPokeApi::with_fixtures();
    let resp = api.router().oneshot(get("/pokemon?limit=lots")).await.unwrap();
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn empty_server_lists_nothing() {
    let api = MockPokeApi::new();
    let resp = api.router().oneshot(get("/pokemon?limit=3")).await.unwrap();
    let list: PokemonList = body_json(resp).await;
    assert!(list.results.is_empty());
}

// --- scripted queue ---

#[tokio::test]
async fn scripted_responses_win_over_fixtures_in_fifo_order() {
    let api = MockPokeApi::with_fixtures();
    api.enqueue(MockResponse::new(503).with_body("down"));
    api.enqueue(MockResponse::new(200).with_body(r#"{"results":[]}"#));

    let resp = api.router().oneshot(get("/pokemon/pikachu")).await.unwrap();
    assert_eq!(resp.status(), StatusCode::SERVICE_UNAVAILABLE);
    assert_eq!(&body_bytes(resp).await[..], b"down");

    let resp = api.router().oneshot(get("/pokemon/pikachu")).await.unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(&body_bytes(resp).await[..], br#"{"results":[]}"#);

    // Queue drained: back to fixtures.
    let resp = api.router().oneshot(get("/pokemon/pikachu")).await.unwrap();
    let pokemon: Pokemon = body_json(resp).await;
    assert_eq!(pokemon.name, "pikachu");
}

#[tokio::test]
async fn requests_are_recorded_with_query() {
    let api = MockPokeApi::new();
    api.router().oneshot(get("/pokemon/pikachu")).await.unwrap();
    api.router().oneshot(get("/pokemon?limit=2")).await.unwrap();

    assert_eq!(api.request_count(), 2);
    assert_eq!(
        api.take_request(),
        Some(RecordedRequest {
            method: "GET".to_string(),
            path: "/pokemon/pikachu".to_string(),
        })
    );
    assert_eq!(api.take_request().unwrap().path, "/pokemon?limit=2");
    assert!(api.take_request().is_none());
}

#[tokio::test]
async fn scripted_plain_body_has_no_content_type() {
    let api = MockPokeApi::new();
    api.enqueue(MockResponse::new(503).with_body("maintenance"));

    let resp = api.router().oneshot(get("/pokemon/pikachu")).await.unwrap();

    assert_eq!(resp.status(), StatusCode::SERVICE_UNAVAILABLE);
    assert!(resp.headers().get(CONTENT_TYPE).is_none());
}

#[tokio::test]
async fn scripted_content_type_is_sent() {
    let api = MockPokeApi::new();
    api.enqueue(MockResponse::json(200, r#"{"results":[]}"#));
    api.enqueue(MockResponse::new(500).with_body("oops").with_content_type("text/plain"));

    let resp = api.router().oneshot(get("/pokemon?limit=1")).await.unwrap();
    assert_eq!(resp.headers()[CONTENT_TYPE], "application/json");

    let resp = api.router().oneshot(get("/pokemon?limit=1")).await.unwrap();
    assert_eq!(resp.headers()[CONTENT_TYPE], "text/plain");
}

#[tokio::test]
async fn fixture_responses_are_json() {
    let api = MockPokeApi::with_fixtures();
    let resp = api.router().oneshot(get("/pokemon/missingno")).await.unwrap();
    assert_eq!(resp.headers()[CONTENT_TYPE], "application/json");
}

#[tokio::test]
async fn scripted_body_is_sent_byte_for_byte() {
    let api = MockPokeApi::new();
    api.enqueue(MockResponse::new(404).with_body(b"\xff\xfeNot Found".to_vec()));

    let resp = api.router().oneshot(get("/pokemon/pikachu")).await.unwrap();
    assert_eq!(&body_bytes(resp).await[..], b"\xff\xfeNot Found");
}
