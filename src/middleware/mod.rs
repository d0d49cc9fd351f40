//! Middleware module
//!
//! Session checks that run before protected commands

pub mod auth;

// Re-export commonly used middleware
pub use auth::{DenyReason, GuardDecision, RouteGuard};
