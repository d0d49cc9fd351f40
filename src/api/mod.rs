//! Backend API layer
//!
//! Endpoint configuration, response envelope and the shared HTTP client

pub mod client;
pub mod endpoints;
pub mod envelope;
pub mod query;

pub use client::{ApiClient, AuthScope};
pub use endpoints::Endpoints;
pub use envelope::{ApiEnvelope, ApiFieldError, ListPayload, Page, Pagination};
pub use query::{ListQuery, SortOrder};
