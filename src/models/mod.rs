// SPDX-License-Identifier: MIT

//! Data models for the portal.

pub mod dashboard;
pub mod stock;
pub mod user;

pub use dashboard::{DashboardStatistics, GovernmentDashboard};
pub use stock::{AddStockData, MessageResponse, PharmacyStock, StockWithPharmacy};
pub use user::{
    LoginResponse, PharmacySignupData, PharmacySignupResponse, RegisterData, RegisterResponse,
    Role, User,
};
