// SPDX-License-Identifier: MIT

//! Pharmacy inventory dashboard.

use crate::api::ApiClient;
use crate::models::{AddStockData, PharmacyStock, User};
use chrono::{Duration, NaiveDate, Utc};
use validator::Validate;

/// Quantity below which a stock row is shown as running low.
const LOW_STOCK_THRESHOLD: i64 = 50;

/// Days ahead within which an expiry date counts as "expiring soon".
const EXPIRY_WARNING_DAYS: i64 = 30;

/// Client-side stock row classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StockAlert {
    Ok,
    LowStock,
    ExpiringSoon,
}

/// State behind the pharmacy inventory screen.
pub struct PharmacyDashboard {
    api: ApiClient,
    pub medicines: Vec<PharmacyStock>,
    pub error: Option<String>,
}

impl PharmacyDashboard {
    pub fn new(api: ApiClient) -> Self {
        Self {
            api,
            medicines: Vec::new(),
            error: None,
        }
    }

    /// Load the pharmacy's stock list. Failures land in `self.error`.
    pub async fn load(&mut self) {
        match self.api.pharmacy_stocks().await {
            Ok(stocks) => {
                self.medicines = stocks;
                self.error = None;
            }
            Err(e) => {
                tracing::warn!(error = %e, "Failed to load pharmacy stocks");
                self.error = Some(e.to_string());
            }
        }
    }

    /// Validate and submit a new stock row, then reload the list.
    ///
    /// Unapproved accounts are blocked client-side before any request is
    /// made; the backend enforces the same rule.
    pub async fn add_medicine(
        &mut self,
        user: &User,
        data: &AddStockData,
    ) -> Result<String, String> {
        if !user.is_approved {
            return Err(
                "Pharmacy account must be approved by government before adding medicines"
                    .to_string(),
            );
        }

        if let Err(errors) = data.validate() {
            return Err(first_validation_message(&errors));
        }

        match self.api.add_pharmacy_stock(data).await {
            Ok(response) => {
                self.load().await;
                Ok(response.message)
            }
            Err(e) => Err(e.to_string()),
        }
    }

    /// Classify a stock row for display.
    ///
    /// Expiry wins over quantity when both apply. Uses today's date; see
    /// [`classify_stock`] for the date-injected version.
    pub fn alert_for(stock: &PharmacyStock) -> StockAlert {
        classify_stock(stock, Utc::now().date_naive())
    }
}

/// Classify a stock row against a given "today".
///
/// An unparseable expiry date never counts as expiring.
pub fn classify_stock(stock: &PharmacyStock, today: NaiveDate) -> StockAlert {
    if let Ok(expiry) = NaiveDate::parse_from_str(&stock.expiry_date, "%Y-%m-%d") {
        if expiry <= today + Duration::days(EXPIRY_WARNING_DAYS) {
            return StockAlert::ExpiringSoon;
        }
    }
    if stock.quantity < LOW_STOCK_THRESHOLD {
        return StockAlert::LowStock;
    }
    StockAlert::Ok
}

fn first_validation_message(errors: &validator::ValidationErrors) -> String {
    errors
        .field_errors()
        .values()
        .flat_map(|errs| errs.iter())
        .filter_map(|err| err.message.as_ref())
        .map(|msg| msg.to_string())
        .next()
        .unwrap_or_else(|| "Invalid input".to_string())
}
