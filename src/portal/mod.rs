// SPDX-License-Identifier: MIT

//! Dashboard view-models consumed by the terminal frontend.

pub mod government;
pub mod pharmacy;

pub use government::GovernmentConsole;
pub use pharmacy::{PharmacyDashboard, StockAlert};
