// SPDX-License-Identifier: MIT

//! Pharmacy stock models.

use serde::{Deserialize, Serialize};
use validator::Validate;

/// A stock row as stored by the backend for one pharmacy.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PharmacyStock {
    pub id: i64,
    pub pharmacy_id: i64,
    pub medicine_name: String,
    pub quantity: i64,
    pub price: f64,
    /// Expiry date as an ISO `YYYY-MM-DD` string
    pub expiry_date: String,
    pub batch_number: String,
    #[serde(default)]
    pub created_at: String,
}

/// A stock row joined with its pharmacy, as served to the oversight console.
#[derive(Debug, Clone, Deserialize)]
pub struct StockWithPharmacy {
    #[serde(flatten)]
    pub stock: PharmacyStock,
    pub pharmacy_name: Option<String>,
    pub address: Option<String>,
}

/// Payload for `POST /api/pharmacy/stocks`.
#[derive(Debug, Clone, Serialize, Validate)]
pub struct AddStockData {
    #[validate(length(min = 1, message = "Medicine name is required"))]
    pub medicine_name: String,
    #[validate(range(min = 0, message = "Quantity cannot be negative"))]
    pub quantity: i64,
    #[validate(range(min = 0.0, message = "Price cannot be negative"))]
    pub price: f64,
    #[validate(length(min = 1, message = "Expiry date is required"))]
    pub expiry_date: String,
    pub batch_number: String,
}

/// Simple `{"message": ...}` acknowledgement used by several endpoints.
#[derive(Debug, Clone, Deserialize)]
pub struct MessageResponse {
    pub message: String,
}
