//! Admin panels
//!
//! List, filter, delete and bulk-delete over every admin-managed collection

pub mod panel;

pub use panel::{AdminPanel, PanelSource, BULK_DELETE_CONFIRMATION};
