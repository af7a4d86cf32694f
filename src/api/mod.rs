// SPDX-License-Identifier: MIT

//! SehatSathi backend API client.
//!
//! Handles:
//! - Request building against the configured base URL
//! - Bearer-token injection from the persisted session store
//! - Normalizing transport and HTTP failures into [`ApiError`]
//!
//! Centralizing these here means every screen can treat failures uniformly
//! instead of re-implementing transport and parsing logic per call site.

use crate::error::{ApiError, ApiResult};
use crate::models::{
    AddStockData, GovernmentDashboard, LoginResponse, MessageResponse, PharmacySignupData,
    PharmacySignupResponse, PharmacyStock, RegisterData, RegisterResponse, StockWithPharmacy,
    User,
};
use crate::session::SessionStore;
use reqwest::header;
use serde::de::DeserializeOwned;
use serde::Serialize;

/// SehatSathi API client.
#[derive(Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
    store: SessionStore,
}

impl ApiClient {
    /// Create a new client for the given backend base URL.
    ///
    /// The session store supplies the bearer token for authenticated calls.
    pub fn new(base_url: impl Into<String>, store: SessionStore) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
            store,
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    // ─── Auth API ────────────────────────────────────────────────────────────

    /// Log in with username and password.
    pub async fn login(&self, username: &str, password: &str) -> ApiResult<LoginResponse> {
        let body = serde_json::json!({
            "username": username,
            "password": password,
        });
        self.post_json("/login", &body).await
    }

    /// Register a new account.
    pub async fn register(&self, data: &RegisterData) -> ApiResult<RegisterResponse> {
        self.post_json("/api/auth/register", data).await
    }

    /// Fetch the authenticated user afresh from the backend.
    pub async fn current_user(&self) -> ApiResult<User> {
        self.get_json("/api/auth/me").await
    }

    // ─── Pharmacy API ────────────────────────────────────────────────────────

    /// Submit a pharmacy registration; the backend generates credentials.
    pub async fn pharmacy_signup(
        &self,
        data: &PharmacySignupData,
    ) -> ApiResult<PharmacySignupResponse> {
        self.post_json("/pharmacy/signup", data).await
    }

    /// List the authenticated pharmacy's stock rows.
    pub async fn pharmacy_stocks(&self) -> ApiResult<Vec<PharmacyStock>> {
        self.get_json("/api/pharmacy/stocks").await
    }

    /// Add a stock row for the authenticated pharmacy.
    pub async fn add_pharmacy_stock(&self, data: &AddStockData) -> ApiResult<MessageResponse> {
        self.post_json("/api/pharmacy/stocks", data).await
    }

    // ─── Government API ──────────────────────────────────────────────────────

    /// Aggregate statistics for the oversight console.
    pub async fn government_dashboard(&self) -> ApiResult<GovernmentDashboard> {
        self.get_json("/api/government/dashboard").await
    }

    /// Pharmacy accounts awaiting approval.
    pub async fn pending_users(&self) -> ApiResult<Vec<User>> {
        self.get_json("/api/users/pending").await
    }

    /// Approve a pending pharmacy account.
    pub async fn approve_user(&self, user_id: i64) -> ApiResult<MessageResponse> {
        self.post_empty(&format!("/api/users/{}/approve", user_id))
            .await
    }

    /// Every approved pharmacy's stock rows (admin view).
    pub async fn all_stocks(&self) -> ApiResult<Vec<StockWithPharmacy>> {
        self.get_json("/api/admin/all-stocks").await
    }

    // ─── Misc ────────────────────────────────────────────────────────────────

    /// Backend liveness probe (`GET /`).
    pub async fn health(&self) -> ApiResult<MessageResponse> {
        self.get_json("/").await
    }

    // ─── Transport ───────────────────────────────────────────────────────────

    /// Generic GET request with JSON response.
    async fn get_json<T: DeserializeOwned>(&self, endpoint: &str) -> ApiResult<T> {
        let request = self.http.get(format!("{}{}", self.base_url, endpoint));
        self.send(request).await
    }

    /// Generic POST request with JSON body and JSON response.
    async fn post_json<T: DeserializeOwned, B: Serialize + ?Sized>(
        &self,
        endpoint: &str,
        body: &B,
    ) -> ApiResult<T> {
        let request = self
            .http
            .post(format!("{}{}", self.base_url, endpoint))
            .json(body);
        self.send(request).await
    }

    /// Generic POST request without a body.
    async fn post_empty<T: DeserializeOwned>(&self, endpoint: &str) -> ApiResult<T> {
        let request = self.http.post(format!("{}{}", self.base_url, endpoint));
        self.send(request).await
    }

    /// Attach standard headers, send, and normalize the outcome.
    ///
    /// The bearer token is re-read from the session store on every call, so
    /// a login or logout between calls takes effect immediately.
    async fn send<T: DeserializeOwned>(&self, request: reqwest::RequestBuilder) -> ApiResult<T> {
        let mut request = request.header(header::CONTENT_TYPE, "application/json");

        if let Some(token) = self.store.token() {
            request = request.bearer_auth(token);
        }

        let response = request.send().await.map_err(ApiError::Unreachable)?;
        self.check_response_json(response).await
    }

    /// Check response status and parse the JSON body.
    async fn check_response_json<T: DeserializeOwned>(
        &self,
        response: reqwest::Response,
    ) -> ApiResult<T> {
        let status = response.status();
        if !status.is_success() {
            let raw: Option<serde_json::Value> = response.json().await.ok();
            let message = raw
                .as_ref()
                .and_then(|body| body.get("detail"))
                .and_then(|detail| detail.as_str())
                .map(str::to_string)
                .unwrap_or_else(|| {
                    format!(
                        "HTTP {}: {}",
                        status.as_u16(),
                        status.canonical_reason().unwrap_or("Unknown Error")
                    )
                });

            tracing::debug!(status = status.as_u16(), message = %message, "API request failed");
            return Err(ApiError::Http {
                status: status.as_u16(),
                message,
                raw,
            });
        }

        response.json().await.map_err(ApiError::Decode)
    }
}
