//! List query parameters shared by every admin list endpoint

use std::collections::BTreeMap;
use serde::{Deserialize, Serialize};
use url::Url;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    Asc,
    Desc,
}

impl SortOrder {
    pub fn as_str(&self) -> &'static str {
        match self {
            SortOrder::Asc => "asc",
            SortOrder::Desc => "desc",
        }
    }
}

/// Pagination, sort and filter parameters for a list request
#[derive(Debug, Clone, PartialEq)]
pub struct ListQuery {
    pub page: u32,
    pub limit: u32,
    pub sort_by: Option<String>,
    pub sort_order: SortOrder,
    pub search: Option<String>,
    pub filters: BTreeMap<String, String>,
}

impl Default for ListQuery {
    fn default() -> Self {
        Self {
            page: 1,
            limit: 20,
            sort_by: None,
            sort_order: SortOrder::Desc,
            search: None,
            filters: BTreeMap::new(),
        }
    }
}

impl ListQuery {
    pub fn new() -> Self {
        Self::default()
    }

    /// Query that fetches everything in one page, used by exports
    pub fn all() -> Self {
        Self {
            limit: 0,
            ..Self::default()
        }
    }

    pub fn page(mut self, page: u32) -> Self {
        self.page = page.max(1);
        self
    }

    pub fn limit(mut self, limit: u32) -> Self {
        self.limit = limit;
        self
    }

    pub fn sort(mut self, field: &str, order: SortOrder) -> Self {
        self.sort_by = Some(field.to_string());
        self.sort_order = order;
        self
    }

    pub fn search(mut self, term: &str) -> Self {
        let term = term.trim();
        self.search = if term.is_empty() { None } else { Some(term.to_string()) };
        self
    }

    pub fn filter(mut self, key: &str, value: &str) -> Self {
        self.filters.insert(key.to_string(), value.to_string());
        self
    }

    /// Append the parameters to a URL's query string
    pub fn apply(&self, mut url: Url) -> Url {
        {
            let mut pairs = url.query_pairs_mut();
            pairs.append_pair("page", &self.page.to_string());
            if self.limit > 0 {
                pairs.append_pair("limit", &self.limit.to_string());
            } else {
                pairs.append_pair("all", "true");
            }
            if let Some(sort_by) = &self.sort_by {
                pairs.append_pair("sortBy", sort_by);
                pairs.append_pair("sortOrder", self.sort_order.as_str());
            }
            if let Some(search) = &self.search {
                pairs.append_pair("search", search);
            }
            for (key, value) in &self.filters {
                pairs.append_pair(key, value);
            }
        }
        url
    }
}
