//! Response envelope and list payload shapes
//!
//! Every backend response is `{success, data?, message?, errors?}`.

use serde::{Deserialize, Serialize};
use crate::utils::errors::FieldErrors;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiFieldError {
    #[serde(alias = "path", alias = "param")]
    pub field: String,
    #[serde(alias = "msg")]
    pub message: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ApiEnvelope<T> {
    #[serde(default)]
    pub success: bool,
    #[serde(default = "Option::default")]
    pub data: Option<T>,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub errors: Vec<ApiFieldError>,
}

impl<T> ApiEnvelope<T> {
    /// Server field errors keyed by field name
    pub fn field_errors(&self) -> FieldErrors {
        let mut mapped = FieldErrors::new();
        for error in &self.errors {
            mapped.add(&error.field, error.message.clone());
        }
        mapped
    }
}

/// Pagination block returned with list endpoints
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Pagination {
    pub page: u32,
    pub limit: u32,
    #[serde(alias = "totalItems")]
    pub total: u64,
    #[serde(alias = "totalPages")]
    pub pages: u32,
}

/// List data, either a bare array or a paginated object
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum ListPayload<T> {
    Plain(Vec<T>),
    Paged {
        #[serde(alias = "users", alias = "packages", alias = "pins", alias = "members",
                alias = "lotteries", alias = "referrals", alias = "images", alias = "packs")]
        items: Vec<T>,
        #[serde(default)]
        pagination: Option<Pagination>,
    },
}

/// One fetched page of records
#[derive(Debug, Clone, PartialEq)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub pagination: Pagination,
}

impl<T> From<ListPayload<T>> for Page<T> {
    fn from(payload: ListPayload<T>) -> Self {
        match payload {
            ListPayload::Plain(items) => {
                let total = items.len() as u64;
                Page {
                    items,
                    pagination: Pagination {
                        page: 1,
                        limit: total as u32,
                        total,
                        pages: 1,
                    },
                }
            }
            ListPayload::Paged { items, pagination } => {
                let pagination = pagination.unwrap_or_else(|| Pagination {
                    page: 1,
                    limit: items.len() as u32,
                    total: items.len() as u64,
                    pages: 1,
                });
                Page { items, pagination }
            }
        }
    }
}

impl<T> Page<T> {
    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_envelope_with_field_errors() {
        let json = r#"{"success": false, "message": "Validation failed",
                       "errors": [{"field": "phoneNumber", "message": "Already registered"}]}"#;
        let envelope: ApiEnvelope<serde_json::Value> = serde_json::from_str(json).unwrap();
        assert!(!envelope.success);
        assert!(envelope.data.is_none());
        assert_eq!(envelope.field_errors().get("phoneNumber"), Some("Already registered"));
    }

    #[test]
    fn test_plain_list_payload() {
        let payload: ListPayload<u32> = serde_json::from_str("[1, 2, 3]").unwrap();
        let page: Page<u32> = payload.into();
        assert_eq!(page.len(), 3);
        assert_eq!(page.pagination.total, 3);
    }

    #[test]
    fn test_paged_list_payload_alias() {
        let json = r#"{"users": [1, 2], "pagination": {"page": 2, "limit": 2, "total": 9, "pages": 5}}"#;
        let payload: ListPayload<u32> = serde_json::from_str(json).unwrap();
        let page: Page<u32> = payload.into();
        assert_eq!(page.items, vec![1, 2]);
        assert_eq!(page.pagination.pages, 5);
    }
}
