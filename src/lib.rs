//! Retail Champions client
//!
//! Operator and admin client for the Retail Champions contest platform.
//! This library provides the backend API client, contest registration with
//! client-side validation, the live draw poller and spin controller, admin
//! list panels with CSV export, and the VIP member portal.

#![allow(non_snake_case)]

pub mod admin;
pub mod api;
pub mod config;
pub mod export;
pub mod forms;
pub mod handlers;
pub mod lottery;
pub mod middleware;
pub mod models;
pub mod services;
pub mod storage;
pub mod utils;

// Re-export commonly used types
pub use config::Settings;
pub use utils::errors::{RetailChampionsError, Result};

// Re-export main components for easy access
pub use lottery::{LotteryPoller, SpinController};
pub use services::ServiceFactory;
pub use storage::LocalStorage;

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Library name
pub const NAME: &str = env!("CARGO_PKG_NAME");

/// Get library information
pub fn info() -> String {
    format!("{} v{}", NAME, VERSION)
}
