// SPDX-License-Identifier: MIT

//! SehatSathi Portal: terminal client for the SehatSathi
//! healthcare-coordination backend.
//!
//! This crate provides the session, auth and API-client machinery behind
//! the pharmacy inventory dashboard and the government oversight console.

pub mod api;
pub mod auth;
pub mod config;
pub mod error;
pub mod models;
pub mod portal;
pub mod session;

use api::ApiClient;
use auth::{AuthController, Navigator};
use config::Config;
use session::SessionStore;
use std::sync::Arc;

/// Shared portal services, wired from one config.
pub struct Portal {
    pub config: Config,
    pub api: ApiClient,
    pub auth: AuthController,
}

impl Portal {
    /// Build the service graph: one session store shared by the API client
    /// (token injection) and the auth controller (session lifecycle).
    pub fn new(config: Config, navigator: Arc<dyn Navigator>) -> Self {
        let store = SessionStore::new(config.session_file.clone());
        let api = ApiClient::new(config.api_base_url.as_str(), store.clone());
        let auth = AuthController::new(api.clone(), store, navigator);
        Self { config, api, auth }
    }
}
