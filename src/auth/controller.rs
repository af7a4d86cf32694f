// SPDX-License-Identifier: MIT

//! Auth session controller.
//!
//! The single writer of session state. Mediates between the API client, the
//! persisted session store and the in-memory state consumed by the rest of
//! the portal. State changes are published on a watch channel so guards and
//! screens can re-evaluate whenever the session settles or changes.

use crate::api::ApiClient;
use crate::auth::{Navigator, Route};
use crate::error::ApiError;
use crate::models::{Role, User};
use crate::session::{SessionStore, StoredSession};
use std::sync::Arc;
use tokio::sync::watch;

/// Session lifecycle.
///
/// `Initializing` lasts from construction until [`AuthController::initialize`]
/// has checked the persisted store; guards must not redirect before then.
#[derive(Debug, Clone, PartialEq)]
pub enum AuthState {
    Initializing,
    Authenticated(User),
    Anonymous,
}

impl AuthState {
    pub fn user(&self) -> Option<&User> {
        match self {
            AuthState::Authenticated(user) => Some(user),
            _ => None,
        }
    }
}

/// Errors surfaced by login.
///
/// API failures are reduced to their display message here; callers render
/// them inline and never branch on status codes.
#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    #[error("Invalid user role")]
    InvalidRole,

    #[error("{0}")]
    Login(String),
}

/// Owns the current session and the operations that change it.
pub struct AuthController {
    api: ApiClient,
    store: SessionStore,
    navigator: Arc<dyn Navigator>,
    state: watch::Sender<AuthState>,
}

impl AuthController {
    /// Create a controller in the `Initializing` state.
    pub fn new(api: ApiClient, store: SessionStore, navigator: Arc<dyn Navigator>) -> Self {
        let (state, _) = watch::channel(AuthState::Initializing);
        Self {
            api,
            store,
            navigator,
            state,
        }
    }

    /// Restore the session from the persisted store.
    ///
    /// Purely local: the stored user snapshot is trusted as-is, no token
    /// re-validation happens here.
    pub fn initialize(&self) {
        let next = match self.store.current_user() {
            Some(user) => {
                tracing::info!(username = %user.username, "Restored session from disk");
                AuthState::Authenticated(user)
            }
            None => AuthState::Anonymous,
        };
        self.state.send_replace(next);
    }

    /// Log in and navigate to the dashboard matching the returned role.
    ///
    /// The session is persisted and the in-memory user set before the role
    /// check, so a response carrying an unrecognized role fails the call but
    /// leaves the stored record in place (matching the deployed behavior;
    /// see DESIGN.md).
    pub async fn login(&self, username: &str, password: &str) -> Result<(), AuthError> {
        let response = self
            .api
            .login(username, password)
            .await
            .map_err(|e: ApiError| AuthError::Login(e.to_string()))?;

        self.store.save(&StoredSession {
            access_token: response.access_token,
            token_type: response.token_type,
            role: response.role.clone(),
            user: response.user.clone(),
        });
        self.state
            .send_replace(AuthState::Authenticated(response.user.clone()));

        match Role::parse(&response.role) {
            Some(Role::Pharmacy) => self.navigator.navigate(Route::PharmacyDashboard),
            Some(Role::Government) | Some(Role::Admin) => {
                self.navigator.navigate(Route::GovernmentConsole)
            }
            None => {
                tracing::warn!(role = %response.role, "Login returned unrecognized role");
                return Err(AuthError::InvalidRole);
            }
        }

        tracing::info!(username = %response.user.username, role = %response.role, "Logged in");
        Ok(())
    }

    /// Clear the session and return to the home screen. Never fails.
    pub fn logout(&self) {
        self.store.clear();
        self.state.send_replace(AuthState::Anonymous);
        self.navigator.navigate(Route::Home);
        tracing::info!("Logged out");
    }

    /// Re-fetch the current user from the backend.
    ///
    /// On success the in-memory user and the `user` field of the persisted
    /// record are updated; token and role stay untouched. On any failure
    /// (including an authorization failure) existing state is left intact:
    /// a transient refresh failure must not evict a valid session.
    pub async fn refresh(&self) -> Result<(), ApiError> {
        let user = self.api.current_user().await?;
        self.store.update_user(&user);
        self.state
            .send_replace(AuthState::Authenticated(user));
        Ok(())
    }

    /// Current state snapshot.
    pub fn state(&self) -> AuthState {
        self.state.borrow().clone()
    }

    /// Subscribe to state changes.
    pub fn subscribe(&self) -> watch::Receiver<AuthState> {
        self.state.subscribe()
    }

    pub fn current_user(&self) -> Option<User> {
        self.state.borrow().user().cloned()
    }

    pub fn is_authenticated(&self) -> bool {
        self.current_user().is_some()
    }
}
