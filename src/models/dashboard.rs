// SPDX-License-Identifier: MIT

//! Government oversight dashboard models.
//!
//! These mirror the aggregate payload served by `/api/government/dashboard`.
//! The numbers are computed entirely by the backend; this side only renders
//! them.

use serde::Deserialize;

/// Full dashboard payload for the oversight console.
#[derive(Debug, Clone, Deserialize)]
pub struct GovernmentDashboard {
    pub statistics: DashboardStatistics,
    #[serde(default)]
    pub recent_pharmacies: Vec<RecentPharmacy>,
    #[serde(default)]
    pub low_stock_medicines: Vec<LowStockMedicine>,
    #[serde(default)]
    pub expiring_medicines: Vec<ExpiringMedicine>,
    #[serde(default)]
    pub top_medicines: Vec<TopMedicine>,
}

/// Headline counters.
#[derive(Debug, Clone, Deserialize)]
pub struct DashboardStatistics {
    pub total_pharmacies: i64,
    pub pending_approvals: i64,
    pub total_medicines: i64,
    pub low_stock_count: i64,
    pub expiring_soon_count: i64,
}

/// Recently registered pharmacy row.
#[derive(Debug, Clone, Deserialize)]
pub struct RecentPharmacy {
    pub username: String,
    pub pharmacy_name: Option<String>,
    pub address: Option<String>,
    #[serde(default)]
    pub created_at: String,
    #[serde(default)]
    pub is_approved: bool,
}

/// Medicine below the backend's low-stock threshold.
#[derive(Debug, Clone, Deserialize)]
pub struct LowStockMedicine {
    pub medicine_name: String,
    pub quantity: i64,
    pub pharmacy_name: Option<String>,
    pub address: Option<String>,
}

/// Medicine expiring within the backend's warning window.
#[derive(Debug, Clone, Deserialize)]
pub struct ExpiringMedicine {
    pub medicine_name: String,
    pub expiry_date: String,
    pub pharmacy_name: Option<String>,
    pub address: Option<String>,
}

/// Medicine ranked by total availability across pharmacies.
#[derive(Debug, Clone, Deserialize)]
pub struct TopMedicine {
    pub medicine_name: String,
    pub total_quantity: i64,
    pub pharmacy_count: i64,
}
