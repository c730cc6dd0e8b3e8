//! Shared helpers for the integration suites: an app instance backed by an
//! in-memory database, plus request plumbing.

#![allow(dead_code)]

use api_lib::{
    adapters::{DbAdapter, HmacTokenAdapter},
    web::{build_router, state::AppState},
};
use axum::{
    body::Body,
    http::{Request, StatusCode},
    Router,
};
use chrono::Duration;
use serde_json::Value;
use sqlx::sqlite::SqlitePoolOptions;
use std::sync::Arc;
use tower::ServiceExt;

/// Builds the full router against a fresh in-memory SQLite database.
///
/// The pool is capped at a single connection: every connection to
/// `sqlite::memory:` opens its own database, so one shared connection is what
/// makes the migrations visible to the handlers.
pub async fn test_app() -> Router {
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .idle_timeout(None)
        .max_lifetime(None)
        .connect("sqlite::memory:")
        .await
        .expect("failed to open in-memory database");

    let db = Arc::new(DbAdapter::new(pool));
    db.run_migrations().await.expect("failed to run migrations");

    let tokens = Arc::new(HmacTokenAdapter::new("integration-test-secret", Duration::hours(1)));

    build_router(Arc::new(AppState { db, tokens }))
}

/// Builds a request with an optional bearer token and optional JSON body.
pub fn json_request(
    method: &str,
    uri: &str,
    token: Option<&str>,
    body: Option<Value>,
) -> Request<Body> {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header("authorization", format!("Bearer {}", token));
    }
    match body {
        Some(json) => builder
            .header("content-type", "application/json")
            .body(Body::from(serde_json::to_vec(&json).unwrap()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    }
}

/// Sends a request through the router and returns the status plus the body,
/// parsed as JSON when possible and wrapped as a string otherwise.
pub async fn send(app: &Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = app.clone().oneshot(request).await.expect("request failed");
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("failed to read body");

    let body = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes)
            .unwrap_or_else(|_| Value::String(String::from_utf8_lossy(&bytes).into_owned()))
    };
    (status, body)
}

/// Registers a user and returns their access token.
pub async fn register(app: &Router, email: &str, password: &str) -> String {
    let (status, body) = send(
        app,
        json_request(
            "POST",
            "/auth/register",
            None,
            Some(serde_json::json!({ "email": email, "password": password })),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED, "registration failed: {}", body);
    body["accessToken"].as_str().expect("missing accessToken").to_string()
}

/// Creates a note and returns its JSON representation.
pub async fn create_note(app: &Router, token: &str, body: Value) -> Value {
    let (status, note) = send(app, json_request("POST", "/notes", Some(token), Some(body))).await;
    assert_eq!(status, StatusCode::CREATED, "note creation failed: {}", note);
    note
}

/// Lists notes, optionally the trashed ones.
pub async fn list_notes(app: &Router, token: &str, trashed: bool) -> Vec<Value> {
    let uri = if trashed { "/notes?trashed=1" } else { "/notes" };
    let (status, body) = send(app, json_request("GET", uri, Some(token), None)).await;
    assert_eq!(status, StatusCode::OK, "listing failed: {}", body);
    body.as_array().expect("expected an array").clone()
}
