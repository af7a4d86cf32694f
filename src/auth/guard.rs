// SPDX-License-Identifier: MIT

//! Role-gated access guard.
//!
//! The decision of whether a screen may render is a pure function of the
//! auth state; the redirect itself is a separate navigation effect. That
//! split keeps the decision independently testable.

use crate::auth::{AuthState, Navigator, Route};
use crate::models::Role;
use std::sync::Arc;
use tokio::sync::watch;

/// Outcome of evaluating a guard against the current auth state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GuardDecision {
    /// Session restore has not settled yet: show a placeholder, do not
    /// redirect.
    Wait,
    /// Access denied: render nothing and navigate to the given route.
    Redirect(Route),
    /// Render the guarded content.
    Render,
}

/// Evaluate a guard.
///
/// An empty `allowed` set admits any authenticated user. An authenticated
/// user whose role tag is unrecognized is denied whenever a role set was
/// given.
pub fn evaluate(state: &AuthState, allowed: &[Role], fallback: Route) -> GuardDecision {
    match state {
        AuthState::Initializing => GuardDecision::Wait,
        AuthState::Anonymous => GuardDecision::Redirect(fallback),
        AuthState::Authenticated(user) => {
            if allowed.is_empty() {
                return GuardDecision::Render;
            }
            match user.role() {
                Some(role) if allowed.contains(&role) => GuardDecision::Render,
                _ => GuardDecision::Redirect(fallback),
            }
        }
    }
}

/// A guard bound to a live auth-state subscription.
///
/// Re-evaluates on every observed state change and emits at most one
/// redirect per settled state, so a logout while the guarded screen is open
/// redirects immediately but repeated checks of the same state do not pile
/// up navigations.
pub struct RouteGuard {
    states: watch::Receiver<AuthState>,
    allowed: Vec<Role>,
    fallback: Route,
    navigator: Arc<dyn Navigator>,
    redirected: bool,
}

impl RouteGuard {
    pub fn new(
        states: watch::Receiver<AuthState>,
        allowed: impl Into<Vec<Role>>,
        navigator: Arc<dyn Navigator>,
    ) -> Self {
        Self {
            states,
            allowed: allowed.into(),
            fallback: Route::Home,
            navigator,
            redirected: false,
        }
    }

    pub fn with_fallback(mut self, fallback: Route) -> Self {
        self.fallback = fallback;
        self
    }

    /// Evaluate against the latest state and emit the redirect effect if one
    /// is due.
    pub fn check(&mut self) -> GuardDecision {
        if self.states.has_changed().unwrap_or(false) {
            self.redirected = false;
        }
        let state = self.states.borrow_and_update().clone();
        let decision = evaluate(&state, &self.allowed, self.fallback);

        match decision {
            GuardDecision::Redirect(route) => {
                if !self.redirected {
                    self.redirected = true;
                    self.navigator.navigate(route);
                }
            }
            GuardDecision::Wait | GuardDecision::Render => {
                self.redirected = false;
            }
        }
        decision
    }

    /// Wait until the auth state settles, then evaluate.
    ///
    /// Returns the first non-`Wait` decision. If the controller goes away
    /// while still initializing, the last observed decision is returned.
    pub async fn settle(&mut self) -> GuardDecision {
        loop {
            let decision = self.check();
            if decision != GuardDecision::Wait {
                return decision;
            }
            if self.states.changed().await.is_err() {
                return decision;
            }
        }
    }
}
