//! Generic admin list panel
//!
//! Every admin screen is the same loop: fetch a page, render it as a table,
//! mutate one row, then re-fetch the page. Nothing is updated optimistically.

use async_trait::async_trait;
use tracing::{debug, info, warn};
use crate::api::{ListQuery, Page, SortOrder};
use crate::export::{render_table, Tabular};
use crate::models::{GalleryItem, Lottery, Package, Pin, RechargePack, Registrant, VipMember};
use crate::services::{
    GalleryService, LotteryService, PackageService, PinService, RechargePackService, UserService,
    VipService,
};
use crate::utils::errors::{RetailChampionsError, Result};
use crate::utils::helpers::create_pagination_info;
use crate::utils::logging;

/// Exact text an operator must type before an irreversible bulk delete
pub const BULK_DELETE_CONFIRMATION: &str = "DELETE";

/// A backend collection an admin panel can list and delete from
#[async_trait]
pub trait PanelSource: Send + Sync {
    type Record: Tabular + Clone + Send + Sync;

    /// Panel title, also used as the export file stem
    const NAME: &'static str;

    async fn fetch_page(&self, query: &ListQuery) -> Result<Page<Self::Record>>;

    async fn delete_record(&self, id: &str) -> Result<Option<String>>;

    async fn delete_all_records(&self) -> Result<Option<String>> {
        Err(RetailChampionsError::InvalidInput(format!(
            "Bulk delete is not available for {}",
            Self::NAME
        )))
    }

    fn record_id(record: &Self::Record) -> &str;

    /// Text matched by the client-side filter
    fn search_text(record: &Self::Record) -> String;
}

/// One admin screen over a [`PanelSource`]
pub struct AdminPanel<S: PanelSource> {
    source: S,
    query: ListQuery,
    page: Option<Page<S::Record>>,
    filter: Option<String>,
    sort: Option<(usize, SortOrder)>,
}

impl<S: PanelSource> AdminPanel<S> {
    pub fn new(source: S) -> Self {
        Self {
            source,
            query: ListQuery::new(),
            page: None,
            filter: None,
            sort: None,
        }
    }

    pub fn with_query(source: S, query: ListQuery) -> Self {
        Self {
            query,
            ..Self::new(source)
        }
    }

    pub fn query(&self) -> &ListQuery {
        &self.query
    }

    pub fn page(&self) -> Option<&Page<S::Record>> {
        self.page.as_ref()
    }

    /// Fetch the current page from the server
    pub async fn refresh(&mut self) -> Result<&Page<S::Record>> {
        debug!(panel = S::NAME, page = self.query.page, "Refreshing admin panel");
        let page = self.source.fetch_page(&self.query).await?;
        Ok(self.page.insert(page))
    }

    /// Replace pagination/sort/search parameters and re-fetch
    pub async fn set_query(&mut self, query: ListQuery) -> Result<&Page<S::Record>> {
        self.query = query;
        self.refresh().await
    }

    pub async fn next_page(&mut self) -> Result<&Page<S::Record>> {
        let pages = self.page.as_ref().map(|p| p.pagination.pages).unwrap_or(1);
        if self.query.page < pages {
            self.query.page += 1;
        }
        self.refresh().await
    }

    pub async fn previous_page(&mut self) -> Result<&Page<S::Record>> {
        self.query.page = self.query.page.saturating_sub(1).max(1);
        self.refresh().await
    }

    /// Delete one record, then re-fetch the page
    pub async fn delete(&mut self, id: &str) -> Result<Option<String>> {
        let message = self.source.delete_record(id).await?;
        info!(panel = S::NAME, id = id, "Record deleted");
        self.refresh().await?;
        Ok(message)
    }

    /// Irreversible bulk delete. No request is sent unless `confirmation`
    /// is exactly `DELETE`.
    pub async fn bulk_delete(&mut self, confirmation: &str) -> Result<Option<String>> {
        if confirmation != BULK_DELETE_CONFIRMATION {
            warn!(panel = S::NAME, "Bulk delete rejected: confirmation text mismatch");
            return Err(RetailChampionsError::ConfirmationRequired);
        }
        let message = self.source.delete_all_records().await?;
        logging::log_admin_action("bulk_delete", Some(S::NAME), message.as_deref());
        self.query.page = 1;
        self.refresh().await?;
        Ok(message)
    }

    /// Filter the fetched page locally; an empty term clears the filter
    pub fn set_filter(&mut self, term: &str) {
        let term = term.trim();
        self.filter = if term.is_empty() {
            None
        } else {
            Some(term.to_lowercase())
        };
    }

    /// Sort the fetched page locally by a table column
    pub fn sort_by_column(&mut self, column: usize, order: SortOrder) {
        self.sort = Some((column, order));
    }

    pub fn clear_sort(&mut self) {
        self.sort = None;
    }

    /// Rows of the fetched page after the local filter and sort
    pub fn visible(&self) -> Vec<S::Record> {
        let Some(page) = &self.page else {
            return Vec::new();
        };

        let mut rows: Vec<S::Record> = page
            .items
            .iter()
            .filter(|record| match &self.filter {
                Some(term) => S::search_text(record).to_lowercase().contains(term),
                None => true,
            })
            .cloned()
            .collect();

        if let Some((column, order)) = self.sort {
            rows.sort_by_cached_key(|record| {
                record.cells().get(column).cloned().unwrap_or_default().to_lowercase()
            });
            if order == SortOrder::Desc {
                rows.reverse();
            }
        }
        rows
    }

    pub fn find(&self, id: &str) -> Option<&S::Record> {
        self.page
            .as_ref()
            .and_then(|p| p.items.iter().find(|record| S::record_id(record) == id))
    }

    pub fn render(&self) -> String {
        let rows = self.visible();
        let mut out = format!("{}\n", S::NAME);
        out.push_str(&render_table(&rows));
        if let Some(page) = &self.page {
            out.push_str(&create_pagination_info(
                page.pagination.page,
                page.pagination.pages,
                page.pagination.total,
            ));
            out.push('\n');
        }
        out
    }
}

#[async_trait]
impl PanelSource for UserService {
    type Record = Registrant;
    const NAME: &'static str = "Users";

    async fn fetch_page(&self, query: &ListQuery) -> Result<Page<Registrant>> {
        self.list(query).await
    }

    async fn delete_record(&self, id: &str) -> Result<Option<String>> {
        self.delete(id).await
    }

    async fn delete_all_records(&self) -> Result<Option<String>> {
        self.delete_all().await
    }

    fn record_id(record: &Registrant) -> &str {
        &record.id
    }

    fn search_text(record: &Registrant) -> String {
        format!(
            "{} {} {}",
            record.name,
            record.phone_number,
            record.coupon_code.as_deref().unwrap_or_default()
        )
    }
}

#[async_trait]
impl PanelSource for PackageService {
    type Record = Package;
    const NAME: &'static str = "Packages";

    async fn fetch_page(&self, query: &ListQuery) -> Result<Page<Package>> {
        self.list(query).await
    }

    async fn delete_record(&self, id: &str) -> Result<Option<String>> {
        self.delete(id).await
    }

    fn record_id(record: &Package) -> &str {
        &record.id
    }

    fn search_text(record: &Package) -> String {
        format!("{} {}", record.name, record.description.as_deref().unwrap_or_default())
    }
}

#[async_trait]
impl PanelSource for PinService {
    type Record = Pin;
    const NAME: &'static str = "Pins";

    async fn fetch_page(&self, query: &ListQuery) -> Result<Page<Pin>> {
        self.list(query).await
    }

    async fn delete_record(&self, id: &str) -> Result<Option<String>> {
        self.delete(id).await
    }

    fn record_id(record: &Pin) -> &str {
        &record.id
    }

    fn search_text(record: &Pin) -> String {
        let package = record.package.as_ref().map(|p| p.label()).unwrap_or_default();
        format!("{} {}", record.code, package)
    }
}

#[async_trait]
impl PanelSource for RechargePackService {
    type Record = RechargePack;
    const NAME: &'static str = "Recharge Packs";

    async fn fetch_page(&self, query: &ListQuery) -> Result<Page<RechargePack>> {
        self.list(query).await
    }

    async fn delete_record(&self, id: &str) -> Result<Option<String>> {
        self.delete(id).await
    }

    fn record_id(record: &RechargePack) -> &str {
        &record.id
    }

    fn search_text(record: &RechargePack) -> String {
        format!("{} {}", record.name, record.description.as_deref().unwrap_or_default())
    }
}

#[async_trait]
impl PanelSource for VipService {
    type Record = VipMember;
    const NAME: &'static str = "VIP Members";

    async fn fetch_page(&self, query: &ListQuery) -> Result<Page<VipMember>> {
        self.list(query).await
    }

    async fn delete_record(&self, id: &str) -> Result<Option<String>> {
        self.delete(id).await
    }

    fn record_id(record: &VipMember) -> &str {
        &record.id
    }

    fn search_text(record: &VipMember) -> String {
        format!(
            "{} {} {}",
            record.name,
            record.coupon_code,
            record.phone_number.as_deref().unwrap_or_default()
        )
    }
}

#[async_trait]
impl PanelSource for LotteryService {
    type Record = Lottery;
    const NAME: &'static str = "Contest History";

    async fn fetch_page(&self, query: &ListQuery) -> Result<Page<Lottery>> {
        self.history(query).await
    }

    async fn delete_record(&self, id: &str) -> Result<Option<String>> {
        self.delete(id).await
    }

    async fn delete_all_records(&self) -> Result<Option<String>> {
        self.clear_history().await
    }

    fn record_id(record: &Lottery) -> &str {
        &record.id
    }

    fn search_text(record: &Lottery) -> String {
        let winner = record.winner.as_ref().map(|w| w.name.as_str()).unwrap_or_default();
        format!("{} {}", record.event_name, winner)
    }
}

#[async_trait]
impl PanelSource for GalleryService {
    type Record = GalleryItem;
    const NAME: &'static str = "Gallery";

    async fn fetch_page(&self, query: &ListQuery) -> Result<Page<GalleryItem>> {
        self.list(query).await
    }

    async fn delete_record(&self, id: &str) -> Result<Option<String>> {
        self.delete(id).await
    }

    fn record_id(record: &GalleryItem) -> &str {
        &record.id
    }

    fn search_text(record: &GalleryItem) -> String {
        record.caption.clone().unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;
    use assert_matches::assert_matches;
    use crate::api::Pagination;

    #[derive(Debug, Clone)]
    struct Row {
        id: String,
        name: String,
    }

    impl Tabular for Row {
        fn headers() -> Vec<&'static str> {
            vec!["Id", "Name"]
        }

        fn cells(&self) -> Vec<String> {
            vec![self.id.clone(), self.name.clone()]
        }
    }

    #[derive(Debug, Clone, Default)]
    struct FakeSource {
        fetches: Arc<AtomicUsize>,
        bulk_deletes: Arc<AtomicUsize>,
    }

    #[async_trait]
    impl PanelSource for FakeSource {
        type Record = Row;
        const NAME: &'static str = "Rows";

        async fn fetch_page(&self, _query: &ListQuery) -> Result<Page<Row>> {
            self.fetches.fetch_add(1, Ordering::SeqCst);
            let items = vec![
                Row { id: "1".to_string(), name: "Meera".to_string() },
                Row { id: "2".to_string(), name: "arjun".to_string() },
                Row { id: "3".to_string(), name: "Zoya".to_string() },
            ];
            Ok(Page {
                pagination: Pagination { page: 1, limit: 20, total: 3, pages: 1 },
                items,
            })
        }

        async fn delete_record(&self, _id: &str) -> Result<Option<String>> {
            Ok(None)
        }

        async fn delete_all_records(&self) -> Result<Option<String>> {
            self.bulk_deletes.fetch_add(1, Ordering::SeqCst);
            Ok(Some("All rows deleted".to_string()))
        }

        fn record_id(record: &Row) -> &str {
            &record.id
        }

        fn search_text(record: &Row) -> String {
            record.name.clone()
        }
    }

    #[tokio::test]
    async fn test_bulk_delete_requires_exact_confirmation() {
        let source = FakeSource::default();
        let mut panel = AdminPanel::new(source.clone());

        for attempt in ["delete", "DELETE ", "", "Delete"] {
            let result = panel.bulk_delete(attempt).await;
            assert_matches!(result, Err(RetailChampionsError::ConfirmationRequired));
        }
        assert_eq!(source.bulk_deletes.load(Ordering::SeqCst), 0);
        assert_eq!(source.fetches.load(Ordering::SeqCst), 0);

        let message = panel.bulk_delete("DELETE").await.unwrap();
        assert_eq!(message.as_deref(), Some("All rows deleted"));
        assert_eq!(source.bulk_deletes.load(Ordering::SeqCst), 1);
        assert_eq!(source.fetches.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_delete_refetches_page() {
        let source = FakeSource::default();
        let mut panel = AdminPanel::new(source.clone());
        panel.refresh().await.unwrap();
        panel.delete("2").await.unwrap();
        assert_eq!(source.fetches.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn test_local_filter_and_sort() {
        let mut panel = AdminPanel::new(FakeSource::default());
        assert!(panel.visible().is_empty());
        panel.refresh().await.unwrap();

        panel.set_filter("MEE");
        let rows = panel.visible();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].name, "Meera");

        panel.set_filter("  ");
        panel.sort_by_column(1, SortOrder::Asc);
        let names: Vec<String> = panel.visible().into_iter().map(|r| r.name).collect();
        assert_eq!(names, vec!["arjun", "Meera", "Zoya"]);

        panel.sort_by_column(1, SortOrder::Desc);
        assert_eq!(panel.visible()[0].name, "Zoya");
        assert_eq!(panel.find("3").map(|r| r.name.as_str()), Some("Zoya"));
    }

    #[tokio::test]
    async fn test_render_includes_pagination() {
        let mut panel = AdminPanel::new(FakeSource::default());
        panel.refresh().await.unwrap();
        let rendered = panel.render();
        assert!(rendered.starts_with("Rows\n"));
        assert!(rendered.contains("Meera"));
    }
}
