// SPDX-License-Identifier: MIT

//! Government oversight console.

use crate::api::ApiClient;
use crate::models::{GovernmentDashboard, StockWithPharmacy, User};

/// State behind the oversight console's tabs.
pub struct GovernmentConsole {
    api: ApiClient,
    pub overview: Option<GovernmentDashboard>,
    pub pending: Vec<User>,
    pub all_stocks: Vec<StockWithPharmacy>,
    pub error: Option<String>,
}

impl GovernmentConsole {
    pub fn new(api: ApiClient) -> Self {
        Self {
            api,
            overview: None,
            pending: Vec::new(),
            all_stocks: Vec::new(),
            error: None,
        }
    }

    /// Load the aggregate statistics tab.
    pub async fn load_overview(&mut self) {
        match self.api.government_dashboard().await {
            Ok(dashboard) => {
                self.overview = Some(dashboard);
                self.error = None;
            }
            Err(e) => {
                tracing::warn!(error = %e, "Failed to load government dashboard");
                self.error = Some(e.to_string());
            }
        }
    }

    /// Load pharmacies awaiting approval.
    pub async fn load_pending(&mut self) {
        match self.api.pending_users().await {
            Ok(users) => {
                self.pending = users;
                self.error = None;
            }
            Err(e) => {
                tracing::warn!(error = %e, "Failed to load pending approvals");
                self.error = Some(e.to_string());
            }
        }
    }

    /// Load every approved pharmacy's stock rows.
    pub async fn load_all_stocks(&mut self) {
        match self.api.all_stocks().await {
            Ok(stocks) => {
                self.all_stocks = stocks;
                self.error = None;
            }
            Err(e) => {
                tracing::warn!(error = %e, "Failed to load all stocks");
                self.error = Some(e.to_string());
            }
        }
    }

    /// Approve a pending pharmacy, then refresh the affected tabs.
    pub async fn approve(&mut self, user_id: i64) -> Result<String, String> {
        match self.api.approve_user(user_id).await {
            Ok(response) => {
                self.load_pending().await;
                self.load_overview().await;
                Ok(response.message)
            }
            Err(e) => Err(e.to_string()),
        }
    }
}
