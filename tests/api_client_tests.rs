// SPDX-License-Identifier: MIT

//! API client tests against a local stub backend.
//!
//! Each test serves a purpose-built axum router on an ephemeral port and
//! points an `ApiClient` at it, so header injection and error
//! classification are observed over a real HTTP round trip.

mod common;

use axum::extract::Path;
use axum::http::{header, HeaderMap, StatusCode};
use axum::routing::{get, post};
use axum::{Json, Router};
use common::{sample_session, serve, temp_store, unreachable_base_url};
use sehatsathi_portal::api::ApiClient;
use sehatsathi_portal::error::ApiError;
use serde_json::{json, Value};
use std::sync::{Arc, Mutex};

/// Requests seen by the stub, one entry per request: every Authorization
/// header value on that request.
type AuthLog = Arc<Mutex<Vec<Vec<String>>>>;

fn auth_logging_router(log: AuthLog) -> Router {
    Router::new().route(
        "/api/pharmacy/stocks",
        get(move |headers: HeaderMap| {
            let log = log.clone();
            async move {
                let auths: Vec<String> = headers
                    .get_all(header::AUTHORIZATION)
                    .iter()
                    .filter_map(|v| v.to_str().ok())
                    .map(str::to_string)
                    .collect();
                log.lock().unwrap().push(auths);
                Json(Vec::<Value>::new())
            }
        }),
    )
}

#[tokio::test]
async fn token_is_attached_as_single_bearer_header() {
    let log: AuthLog = Arc::new(Mutex::new(Vec::new()));
    let base = serve(auth_logging_router(log.clone())).await;

    let (store, _dir) = temp_store();
    store.save(&sample_session("tok-abc", "pharmacy"));

    let client = ApiClient::new(base, store);
    client.pharmacy_stocks().await.expect("Stub call failed");

    let seen = log.lock().unwrap().clone();
    assert_eq!(seen.len(), 1);
    assert_eq!(seen[0], vec!["Bearer tok-abc".to_string()]);
}

#[tokio::test]
async fn no_session_means_no_authorization_header() {
    let log: AuthLog = Arc::new(Mutex::new(Vec::new()));
    let base = serve(auth_logging_router(log.clone())).await;

    let (store, _dir) = temp_store();
    let client = ApiClient::new(base, store);
    client.pharmacy_stocks().await.expect("Stub call failed");

    let seen = log.lock().unwrap().clone();
    assert_eq!(seen.len(), 1);
    assert!(seen[0].is_empty());
}

#[tokio::test]
async fn empty_stored_token_sends_no_header() {
    let log: AuthLog = Arc::new(Mutex::new(Vec::new()));
    let base = serve(auth_logging_router(log.clone())).await;

    let (store, _dir) = temp_store();
    store.save(&sample_session("", "pharmacy"));

    let client = ApiClient::new(base, store);
    client.pharmacy_stocks().await.expect("Stub call failed");

    let seen = log.lock().unwrap().clone();
    assert!(seen[0].is_empty());
}

#[tokio::test]
async fn backend_detail_field_becomes_the_error_message() {
    let app = Router::new().route(
        "/api/government/dashboard",
        get(|| async {
            (
                StatusCode::FORBIDDEN,
                Json(json!({"detail": "Access denied"})),
            )
        }),
    );
    let base = serve(app).await;
    let (store, _dir) = temp_store();
    let client = ApiClient::new(base, store);

    let err = client.government_dashboard().await.unwrap_err();
    match err {
        ApiError::Http {
            status,
            ref message,
            ref raw,
        } => {
            assert_eq!(status, 403);
            assert_eq!(message, "Access denied");
            assert_eq!(raw.as_ref().unwrap()["detail"], "Access denied");
        }
        other => panic!("Expected Http error, got {other:?}"),
    }
    assert_eq!(err.status(), 403);
}

#[tokio::test]
async fn unparsable_error_body_falls_back_to_status_line() {
    let app = Router::new().route(
        "/api/users/pending",
        get(|| async { (StatusCode::INTERNAL_SERVER_ERROR, "stack trace goes here") }),
    );
    let base = serve(app).await;
    let (store, _dir) = temp_store();
    let client = ApiClient::new(base, store);

    let err = client.pending_users().await.unwrap_err();
    assert_eq!(err.status(), 500);
    assert_eq!(err.to_string(), "HTTP 500: Internal Server Error");
}

#[tokio::test]
async fn json_error_body_without_detail_also_falls_back() {
    let app = Router::new().route(
        "/api/users/pending",
        get(|| async { (StatusCode::NOT_FOUND, Json(json!({"error": "nope"}))) }),
    );
    let base = serve(app).await;
    let (store, _dir) = temp_store();
    let client = ApiClient::new(base, store);

    let err = client.pending_users().await.unwrap_err();
    match err {
        ApiError::Http { status, message, raw } => {
            assert_eq!(status, 404);
            assert_eq!(message, "HTTP 404: Not Found");
            // The unparsed body is still carried along
            assert_eq!(raw.unwrap()["error"], "nope");
        }
        other => panic!("Expected Http error, got {other:?}"),
    }
}

#[tokio::test]
async fn unreachable_server_classifies_as_status_zero() {
    let base = unreachable_base_url().await;
    let (store, _dir) = temp_store();
    let client = ApiClient::new(base, store);

    let err = client.health().await.unwrap_err();
    assert!(err.is_unreachable());
    assert_eq!(err.status(), 0);
    assert_eq!(
        err.to_string(),
        "Network error: Unable to connect to server. Please check if the backend is running."
    );
}

#[tokio::test]
async fn malformed_success_body_is_a_decode_error() {
    let app = Router::new().route("/api/auth/me", get(|| async { "not json at all" }));
    let base = serve(app).await;
    let (store, _dir) = temp_store();
    let client = ApiClient::new(base, store);

    let err = client.current_user().await.unwrap_err();
    assert!(matches!(err, ApiError::Decode(_)));
    assert_eq!(err.status(), 0);
}

#[tokio::test]
async fn login_parses_full_response() {
    let app = Router::new().route(
        "/login",
        post(|Json(body): Json<Value>| async move {
            assert_eq!(body["username"], "govt_admin");
            assert_eq!(body["password"], "govt123");
            Json(json!({
                "access_token": "jwt-xyz",
                "token_type": "bearer",
                "role": "government",
                "user": {
                    "id": 2,
                    "username": "govt_admin",
                    "user_type": "government",
                    "pharmacy_name": null,
                    "is_approved": true
                }
            }))
        }),
    );
    let base = serve(app).await;
    let (store, _dir) = temp_store();
    let client = ApiClient::new(base, store);

    let response = client.login("govt_admin", "govt123").await.unwrap();
    assert_eq!(response.access_token, "jwt-xyz");
    assert_eq!(response.token_type, "bearer");
    assert_eq!(response.role, "government");
    assert_eq!(response.user.username, "govt_admin");
}

#[tokio::test]
async fn register_round_trips_requires_approval() {
    use sehatsathi_portal::models::RegisterData;
    use validator::Validate;

    let app = Router::new().route(
        "/api/auth/register",
        post(|Json(body): Json<Value>| async move {
            assert_eq!(body["user_type"], "pharmacy");
            Json(json!({
                "message": "User registered successfully",
                "requires_approval": true
            }))
        }),
    );
    let base = serve(app).await;
    let (store, _dir) = temp_store();
    let client = ApiClient::new(base, store);

    let data = RegisterData {
        username: "green_cross".to_string(),
        email: "owner@greencross.example".to_string(),
        password: "s3cret-pass".to_string(),
        user_type: "pharmacy".to_string(),
        pharmacy_name: Some("Green Cross".to_string()),
        license_number: Some("LIC-99".to_string()),
        address: None,
        phone: None,
    };
    data.validate().expect("Payload should be valid");

    let response = client.register(&data).await.unwrap();
    assert!(response.requires_approval);
    assert_eq!(response.message, "User registered successfully");
}

#[tokio::test]
async fn approve_user_hits_the_id_path() {
    let app = Router::new().route(
        "/api/users/{id}/approve",
        post(|Path(id): Path<i64>| async move {
            Json(json!({"message": format!("User {id} approved successfully")}))
        }),
    );
    let base = serve(app).await;
    let (store, _dir) = temp_store();
    let client = ApiClient::new(base, store);

    let response = client.approve_user(42).await.unwrap();
    assert_eq!(response.message, "User 42 approved successfully");
}

#[tokio::test]
async fn stock_list_parses() {
    let app = Router::new().route(
        "/api/pharmacy/stocks",
        get(|| async {
            Json(json!([{
                "id": 1,
                "pharmacy_id": 7,
                "medicine_name": "Paracetamol 500mg",
                "quantity": 120,
                "price": 12.5,
                "expiry_date": "2027-01-31",
                "batch_number": "B-77",
                "created_at": "2026-07-01 10:00:00"
            }]))
        }),
    );
    let base = serve(app).await;
    let (store, _dir) = temp_store();
    let client = ApiClient::new(base, store);

    let stocks = client.pharmacy_stocks().await.unwrap();
    assert_eq!(stocks.len(), 1);
    assert_eq!(stocks[0].medicine_name, "Paracetamol 500mg");
    assert_eq!(stocks[0].quantity, 120);
}
