#![allow(dead_code)]

use axum::body::Body;
use axum::http::{header, Method, Request, StatusCode};
use axum::Router;
use http_body_util::BodyExt;
use pizza_restaurants::{app, apply_migrations, seed::seed, AppState, Store};
use serde_json::Value;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use std::str::FromStr;
use tower::ServiceExt;

/// Fresh in-memory store with the fixture set. One connection so every query sees the same database.
pub async fn seeded_store() -> Store {
    let options = SqliteConnectOptions::from_str("sqlite::memory:")
        .unwrap()
        .foreign_keys(true);
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .idle_timeout(None)
        .max_lifetime(None)
        .connect_with(options)
        .await
        .unwrap();
    let store = Store::from_pool(pool);
    apply_migrations(store.pool()).await.unwrap();
    seed(&store).await.unwrap();
    store
}

pub fn router(store: &Store) -> Router {
    app(AppState::new(store.clone()))
}

pub struct TestResponse {
    pub status: StatusCode,
    pub content_type: Option<String>,
    pub raw: Vec<u8>,
}

impl TestResponse {
    pub fn json(&self) -> Value {
        serde_json::from_slice(&self.raw).unwrap()
    }

    pub fn text(&self) -> String {
        String::from_utf8(self.raw.clone()).unwrap()
    }
}

pub async fn send(store: &Store, req: Request<Body>) -> TestResponse {
    let res = router(store).oneshot(req).await.unwrap();
    let status = res.status();
    let content_type = res
        .headers()
        .get(header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .map(str::to_string);
    let raw = res.into_body().collect().await.unwrap().to_bytes().to_vec();
    TestResponse {
        status,
        content_type,
        raw,
    }
}

pub async fn get(store: &Store, uri: &str) -> TestResponse {
    send(
        store,
        Request::builder().uri(uri).body(Body::empty()).unwrap(),
    )
    .await
}

pub async fn delete(store: &Store, uri: &str) -> TestResponse {
    send(
        store,
        Request::builder()
            .method(Method::DELETE)
            .uri(uri)
            .body(Body::empty())
            .unwrap(),
    )
    .await
}

pub async fn post_raw(store: &Store, uri: &str, body: impl Into<Body>) -> TestResponse {
    send(
        store,
        Request::builder()
            .method(Method::POST)
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(body.into())
            .unwrap(),
    )
    .await
}

pub async fn post_json(store: &Store, uri: &str, body: Value) -> TestResponse {
    post_raw(store, uri, body.to_string()).await
}

pub async fn edge_count(store: &Store) -> usize {
    store.list_restaurant_pizzas().await.unwrap().len()
}
