use std::sync::Arc;

use axum::http::{HeaderName, HeaderValue, StatusCode};
use axum_test::TestServer;
use serde_json::json;

use cinelist_api::error::AppResult;
use cinelist_api::middleware::{ProxyHeaderIdentity, OWNER_ID_HEADER};
use cinelist_api::models::CatalogMovie;
use cinelist_api::routes::create_router;
use cinelist_api::services::catalog::CatalogProvider;
use cinelist_api::services::{FavoriteService, ShareService};
use cinelist_api::state::AppState;
use cinelist_api::store::MemoryStore;

/// Catalog stub returning a fixed result set, standing in for TMDB.
struct StaticCatalog(Vec<CatalogMovie>);

#[async_trait::async_trait]
impl CatalogProvider for StaticCatalog {
    async fn search(&self, _query: &str) -> AppResult<Vec<CatalogMovie>> {
        Ok(self.0.clone())
    }
}

fn create_test_server() -> TestServer {
    let store = Arc::new(MemoryStore::new());
    let catalog = StaticCatalog(vec![CatalogMovie {
        tmdb_id: 27205,
        title: "Inception".to_string(),
        poster_path: Some("/inception.jpg".to_string()),
        rating: 8.3,
        release_date: "2010-07-15".parse().ok(),
        overview: None,
    }]);

    let state = AppState::new(
        FavoriteService::new(store.clone()),
        ShareService::new(store.clone(), store),
        Arc::new(catalog),
        Arc::new(ProxyHeaderIdentity::new()),
    );

    TestServer::new(create_router(state)).unwrap()
}

fn user(id: &str) -> (HeaderName, HeaderValue) {
    (
        HeaderName::from_static(OWNER_ID_HEADER),
        HeaderValue::from_str(id).unwrap(),
    )
}

fn inception() -> serde_json::Value {
    json!({
        "tmdb_id": 27205,
        "title": "Inception",
        "poster_path": "/inception.jpg",
        "rating": 8.3,
        "release_date": "2010-07-15"
    })
}

fn interstellar() -> serde_json::Value {
    json!({
        "tmdb_id": 157336,
        "title": "Interstellar",
        "poster_path": "/interstellar.jpg",
        "rating": 8.4,
        "release_date": "2014-11-05"
    })
}

#[tokio::test]
async fn test_health_check() {
    let server = create_test_server();
    let response = server.get("/health").await;
    response.assert_status_ok();
}

#[tokio::test]
async fn test_search_requires_identity() {
    let server = create_test_server();

    let response = server.get("/api/search").add_query_param("query", "inception").await;
    response.assert_status(StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_search_proxies_the_catalog() {
    let server = create_test_server();
    let (name, value) = user("1");

    let response = server
        .get("/api/search")
        .add_query_param("query", "inception")
        .add_header(name, value)
        .await;
    response.assert_status_ok();

    let movies: Vec<serde_json::Value> = response.json();
    assert_eq!(movies.len(), 1);
    assert_eq!(movies[0]["tmdb_id"], 27205);
    assert_eq!(movies[0]["title"], "Inception");
}

#[tokio::test]
async fn test_add_and_list_favorites() {
    let server = create_test_server();
    let (name, value) = user("1");

    let response = server
        .post("/api/favorites")
        .json(&inception())
        .add_header(name.clone(), value.clone())
        .await;
    response.assert_status(StatusCode::CREATED);

    let created: serde_json::Value = response.json();
    assert_eq!(created["tmdb_id"], 27205);
    assert_eq!(created["title"], "Inception");
    assert!(created["added_at"].is_string());

    let response = server
        .get("/api/favorites")
        .add_header(name, value)
        .await;
    response.assert_status_ok();

    let favorites: Vec<serde_json::Value> = response.json();
    assert_eq!(favorites.len(), 1);
    assert_eq!(favorites[0]["tmdb_id"], 27205);
}

#[tokio::test]
async fn test_adding_the_same_movie_twice_conflicts() {
    let server = create_test_server();
    let (name, value) = user("1");

    let first = server
        .post("/api/favorites")
        .json(&inception())
        .add_header(name.clone(), value.clone())
        .await;
    first.assert_status(StatusCode::CREATED);

    let second = server
        .post("/api/favorites")
        .json(&inception())
        .add_header(name, value)
        .await;
    second.assert_status(StatusCode::CONFLICT);
}

#[tokio::test]
async fn test_two_users_may_save_the_same_movie() {
    let server = create_test_server();

    for id in ["1", "2"] {
        let (name, value) = user(id);
        let response = server
            .post("/api/favorites")
            .json(&inception())
            .add_header(name, value)
            .await;
        response.assert_status(StatusCode::CREATED);
    }
}

#[tokio::test]
async fn test_malformed_favorite_is_rejected() {
    let server = create_test_server();
    let (name, value) = user("1");

    let mut payload = inception();
    payload["rating"] = json!(11.0);

    let response = server
        .post("/api/favorites")
        .json(&payload)
        .add_header(name, value)
        .await;
    response.assert_status(StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_remove_succeeds_once_then_is_not_found() {
    let server = create_test_server();
    let (name, value) = user("1");

    server
        .post("/api/favorites")
        .json(&inception())
        .add_header(name.clone(), value.clone())
        .await
        .assert_status(StatusCode::CREATED);

    let removed = server
        .delete("/api/favorites/27205")
        .add_header(name.clone(), value.clone())
        .await;
    removed.assert_status(StatusCode::NO_CONTENT);

    let repeated = server
        .delete("/api/favorites/27205")
        .add_header(name, value)
        .await;
    repeated.assert_status(StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_removing_another_users_favorite_is_not_found() {
    let server = create_test_server();
    let (alice_name, alice_value) = user("1");
    let (bob_name, bob_value) = user("2");

    server
        .post("/api/favorites")
        .json(&inception())
        .add_header(alice_name, alice_value)
        .await
        .assert_status(StatusCode::CREATED);

    let response = server
        .delete("/api/favorites/27205")
        .add_header(bob_name, bob_value)
        .await;
    response.assert_status(StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_sharing_an_empty_list_is_rejected() {
    let server = create_test_server();
    let (name, value) = user("1");

    let response = server
        .post("/api/share/generate")
        .add_header(name, value)
        .await;
    response.assert_status(StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn test_shared_list_is_frozen_at_creation() {
    let server = create_test_server();
    let (name, value) = user("1");

    server
        .post("/api/favorites")
        .json(&inception())
        .add_header(name.clone(), value.clone())
        .await
        .assert_status(StatusCode::CREATED);

    let response = server
        .post("/api/share/generate")
        .add_header(name.clone(), value.clone())
        .await;
    response.assert_status(StatusCode::CREATED);

    let list: serde_json::Value = response.json();
    let token = list["token"].as_str().unwrap().to_string();
    assert_eq!(list["favorites"].as_array().unwrap().len(), 1);

    // the live list keeps moving; the shared copy must not
    server
        .post("/api/favorites")
        .json(&interstellar())
        .add_header(name.clone(), value.clone())
        .await
        .assert_status(StatusCode::CREATED);
    server
        .delete("/api/favorites/27205")
        .add_header(name.clone(), value.clone())
        .await
        .assert_status(StatusCode::NO_CONTENT);

    // retrieval needs no identity header
    let response = server.get(&format!("/api/share/{token}")).await;
    response.assert_status_ok();

    let frozen: serde_json::Value = response.json();
    let members = frozen["favorites"].as_array().unwrap();
    assert_eq!(members.len(), 1);
    assert_eq!(members[0]["tmdb_id"], 27205);

    let live = server.get("/api/favorites").add_header(name, value).await;
    let favorites: Vec<serde_json::Value> = live.json();
    assert_eq!(favorites.len(), 1);
    assert_eq!(favorites[0]["tmdb_id"], 157336);
}

#[tokio::test]
async fn test_shared_list_members_are_newest_first() {
    let server = create_test_server();
    let (name, value) = user("1");

    for movie in [inception(), interstellar()] {
        server
            .post("/api/favorites")
            .json(&movie)
            .add_header(name.clone(), value.clone())
            .await
            .assert_status(StatusCode::CREATED);
    }

    let response = server
        .post("/api/share/generate")
        .add_header(name, value)
        .await;
    let list: serde_json::Value = response.json();
    let token = list["token"].as_str().unwrap();

    let retrieved = server.get(&format!("/api/share/{token}")).await;
    let frozen: serde_json::Value = retrieved.json();
    let ids: Vec<i64> = frozen["favorites"]
        .as_array()
        .unwrap()
        .iter()
        .map(|f| f["tmdb_id"].as_i64().unwrap())
        .collect();
    assert_eq!(ids, vec![157336, 27205]);
}

#[tokio::test]
async fn test_retrieving_a_never_issued_token_is_not_found() {
    let server = create_test_server();

    let response = server
        .get("/api/share/00000000-0000-4000-8000-000000000000")
        .await;
    response.assert_status(StatusCode::NOT_FOUND);
}
