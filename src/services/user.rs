//! User service implementation
//!
//! This service handles contest registration and the admin registrant list:
//! listing with filters, counting, single and bulk deletion.

use tracing::{debug, info};
use crate::api::{ApiClient, AuthScope, ListQuery, Page};
use crate::forms::RegistrationForm;
use crate::models::{Registrant, RegistrationResult, UserCount};
use crate::utils::errors::Result;
use crate::utils::helpers::mask_identifier;
use crate::utils::logging;

/// User service for registrants
#[derive(Debug, Clone)]
pub struct UserService {
    client: ApiClient,
}

impl UserService {
    /// Create a new UserService instance
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }

    /// Validate and submit a registration.
    ///
    /// Validation failures return before any request is sent.
    pub async fn register(&self, form: &RegistrationForm) -> Result<RegistrationResult> {
        form.validate()?;

        debug!(
            phone = %mask_identifier(&form.phone_number),
            aadhaar = %mask_identifier(&form.aadhaar_number),
            package = %form.package_id,
            "Submitting registration"
        );
        let url = self.client.endpoints().user_register()?;
        let result: RegistrationResult = self
            .client
            .post_multipart(url, form.to_multipart()?, AuthScope::Public)
            .await?;

        info!(vip = result.is_vip(), coupon = ?result.coupon(), "Registration accepted");
        Ok(result)
    }

    pub async fn list(&self, query: &ListQuery) -> Result<Page<Registrant>> {
        let url = query.apply(self.client.endpoints().users()?);
        self.client.get_page(url, AuthScope::Admin).await
    }

    pub async fn count(&self) -> Result<u64> {
        let url = self.client.endpoints().user_count()?;
        let count: UserCount = self.client.get(url, AuthScope::Admin).await?;
        Ok(count.count)
    }

    pub async fn delete(&self, user_id: &str) -> Result<Option<String>> {
        let url = self.client.endpoints().user(user_id)?;
        let message = self.client.delete(url, AuthScope::Admin).await?;
        logging::log_admin_action("user_delete", Some(user_id), None);
        Ok(message)
    }

    /// Delete every registrant
    pub async fn delete_all(&self) -> Result<Option<String>> {
        let url = self.client.endpoints().users_bulk_delete()?;
        let message = self.client.delete(url, AuthScope::Admin).await?;
        logging::log_admin_action("user_delete_all", None, message.as_deref());
        Ok(message)
    }
}
