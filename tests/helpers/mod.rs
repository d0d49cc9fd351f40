//! Test helpers module
//!
//! Mock backend, test context and JSON fixtures shared by the integration tests.

#![allow(dead_code)]

pub mod api_mock;
pub mod test_context;
pub mod test_data;

pub use api_mock::*;
pub use test_context::*;
pub use test_data::*;
