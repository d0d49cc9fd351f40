//! Lottery service implementation
//!
//! Thin wrappers over the lottery endpoints. Draw sequencing and winner
//! selection happen on the server; this service only issues requests.

use serde_json::json;
use tracing::{debug, info};
use crate::api::{ApiClient, AuthScope, ListQuery, Page};
use crate::models::{CreateLotteryRequest, Lottery, Participant, SpinResult, StatusSnapshot};
use crate::utils::errors::{RetailChampionsError, Result};
use crate::utils::logging;

/// Lottery service for the live draw and its history
#[derive(Debug, Clone)]
pub struct LotteryService {
    client: ApiClient,
}

impl LotteryService {
    /// Create a new LotteryService instance
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }

    /// Create a draw for a package tier
    pub async fn create(&self, event_name: &str, package_id: &str) -> Result<Lottery> {
        if event_name.trim().is_empty() {
            return Err(RetailChampionsError::InvalidInput("Event name is required".to_string()));
        }
        if package_id.trim().is_empty() {
            return Err(RetailChampionsError::InvalidInput("Package is required".to_string()));
        }

        let request = CreateLotteryRequest {
            event_name: event_name.trim().to_string(),
            package: package_id.trim().to_string(),
        };
        let url = self.client.endpoints().lottery_create()?;
        let lottery: Lottery = self.client.post_json(url, &request, AuthScope::Admin).await?;

        logging::log_admin_action("lottery_create", Some(&lottery.id), Some(&lottery.event_name));
        Ok(lottery)
    }

    /// Currently running draw, if any
    pub async fn active(&self) -> Result<Option<Lottery>> {
        let url = self.client.endpoints().lottery_active()?;
        match self.client.get_optional::<Lottery>(url, AuthScope::Admin).await {
            Ok(lottery) => Ok(lottery),
            Err(RetailChampionsError::Api { status: 404, .. }) => Ok(None),
            Err(e) => Err(e),
        }
    }

    pub async fn status(&self, lottery_id: &str) -> Result<StatusSnapshot> {
        debug!(lottery_id = lottery_id, "Fetching lottery status");
        let url = self.client.endpoints().lottery_status(lottery_id)?;
        self.client.get(url, AuthScope::Admin).await
    }

    pub async fn participants(&self, lottery_id: &str) -> Result<Vec<Participant>> {
        debug!(lottery_id = lottery_id, "Fetching lottery participants");
        let url = self.client.endpoints().lottery_participants(lottery_id)?;
        self.client.get(url, AuthScope::Admin).await
    }

    /// Ask the server to run the next elimination round
    pub async fn spin(&self, lottery_id: &str) -> Result<SpinResult> {
        info!(lottery_id = lottery_id, "Requesting spin");
        let url = self.client.endpoints().lottery_spin(lottery_id)?;
        self.client.post_json(url, &json!({}), AuthScope::Admin).await
    }

    pub async fn winners(&self, lottery_id: &str) -> Result<Vec<Participant>> {
        let url = self.client.endpoints().lottery_winner(lottery_id)?;
        self.client.get(url, AuthScope::Admin).await
    }

    pub async fn history(&self, query: &ListQuery) -> Result<Page<Lottery>> {
        let url = query.apply(self.client.endpoints().lottery_history()?);
        self.client.get_page(url, AuthScope::Admin).await
    }

    pub async fn delete(&self, lottery_id: &str) -> Result<Option<String>> {
        let url = self.client.endpoints().lottery(lottery_id)?;
        let message = self.client.delete(url, AuthScope::Admin).await?;
        logging::log_admin_action("lottery_delete", Some(lottery_id), None);
        Ok(message)
    }

    /// Delete every finished draw and its winners
    pub async fn clear_history(&self) -> Result<Option<String>> {
        let url = self.client.endpoints().lottery_history()?;
        let message = self.client.delete(url, AuthScope::Admin).await?;
        logging::log_admin_action("lottery_history_clear", None, None);
        Ok(message)
    }
}
