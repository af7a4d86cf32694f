// SPDX-License-Identifier: MIT

use sehatsathi_portal::models::User;
use sehatsathi_portal::session::{SessionStore, StoredSession};
use tempfile::TempDir;

/// Create a session store backed by a fresh temp directory.
///
/// The `TempDir` must stay alive for the duration of the test.
#[allow(dead_code)]
pub fn temp_store() -> (SessionStore, TempDir) {
    let dir = TempDir::new().expect("Failed to create temp dir");
    let store = SessionStore::new(dir.path().join("session.json"));
    (store, dir)
}

#[allow(dead_code)]
pub fn sample_user(user_type: &str) -> User {
    User {
        id: 7,
        username: "city_pharmacy".to_string(),
        email: "owner@citypharmacy.example".to_string(),
        user_type: user_type.to_string(),
        is_approved: true,
        pharmacy_name: Some("City Pharmacy".to_string()),
        license_number: Some("LIC-1234".to_string()),
        address: Some("MG Road".to_string()),
        phone: Some("9999999999".to_string()),
    }
}

#[allow(dead_code)]
pub fn sample_session(token: &str, role: &str) -> StoredSession {
    StoredSession {
        access_token: token.to_string(),
        token_type: "bearer".to_string(),
        role: role.to_string(),
        user: sample_user(role),
    }
}

/// Serve an axum router on an ephemeral local port, returning its base URL.
///
/// The server task runs until the test process exits.
#[allow(dead_code)]
pub async fn serve(app: axum::Router) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind test listener");
    let addr = listener.local_addr().expect("No local addr");
    tokio::spawn(async move {
        axum::serve(listener, app).await.ok();
    });
    format!("http://{}", addr)
}

/// An address nothing is listening on (the listener is bound, then dropped).
#[allow(dead_code)]
pub async fn unreachable_base_url() -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind probe listener");
    let addr = listener.local_addr().expect("No local addr");
    drop(listener);
    format!("http://{}", addr)
}
