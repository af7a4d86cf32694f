// SPDX-License-Identifier: MIT

//! Persisted session state.

pub mod store;

pub use store::{SessionStore, StoredSession};
