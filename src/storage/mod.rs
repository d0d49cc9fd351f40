//! Local state storage
//!
//! This module persists the auth tokens and cached user records between runs

pub mod local;

pub use local::{LocalStorage, TOKEN_KEY, USER_KEY, VIP_TOKEN_KEY, VIP_USER_KEY};
