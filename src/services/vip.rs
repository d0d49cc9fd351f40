//! VIP membership service
//!
//! Members sign in with the coupon code issued at registration. Each member
//! can generate a referral (leader) code that attributes new sign-ups to them.

use serde_json::json;
use tracing::info;
use crate::api::{ApiClient, AuthScope, ListQuery, Page};
use crate::models::{CouponVerification, GeneratedReferral, Referral, VipCredentials, VipMember, VipSession};
use crate::storage::{VIP_TOKEN_KEY, VIP_USER_KEY};
use crate::utils::errors::{RetailChampionsError, Result};
use crate::utils::logging;

#[derive(Debug, Clone)]
pub struct VipService {
    client: ApiClient,
}

impl VipService {
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }

    pub async fn verify_coupon(&self, coupon_code: &str) -> Result<CouponVerification> {
        let coupon_code = coupon_code.trim();
        if coupon_code.is_empty() {
            return Err(RetailChampionsError::InvalidInput("Coupon code is required".to_string()));
        }
        let url = self.client.endpoints().vip_verify_coupon()?;
        self.client
            .post_json(url, &json!({ "couponCode": coupon_code }), AuthScope::Public)
            .await
    }

    /// First-time password for a verified coupon
    pub async fn set_password(&self, coupon_code: &str, password: &str, confirm: &str) -> Result<Option<String>> {
        if password.len() < 6 {
            return Err(RetailChampionsError::InvalidInput(
                "Password must be at least 6 characters".to_string(),
            ));
        }
        if password != confirm {
            return Err(RetailChampionsError::InvalidInput("Passwords do not match".to_string()));
        }
        let credentials = VipCredentials {
            coupon_code: coupon_code.trim().to_string(),
            password: password.to_string(),
        };
        let url = self.client.endpoints().vip_set_password()?;
        self.client.post_action(url, &credentials, AuthScope::Public).await
    }

    /// Log in and persist the VIP session
    pub async fn login(&self, coupon_code: &str, password: &str) -> Result<VipMember> {
        let credentials = VipCredentials {
            coupon_code: coupon_code.trim().to_string(),
            password: password.to_string(),
        };
        let url = self.client.endpoints().vip_login()?;
        let session: VipSession = self.client.post_json(url, &credentials, AuthScope::Public).await?;

        let storage = self.client.storage();
        storage.set(VIP_TOKEN_KEY, session.token)?;
        storage.set(VIP_USER_KEY, serde_json::to_string(&session.member)?)?;

        info!(member_id = %session.member.id, "VIP member logged in");
        Ok(session.member)
    }

    pub fn logout(&self) -> Result<()> {
        let storage = self.client.storage();
        storage.remove(VIP_TOKEN_KEY)?;
        storage.remove(VIP_USER_KEY)?;
        Ok(())
    }

    pub async fn profile(&self) -> Result<VipMember> {
        let url = self.client.endpoints().vip_profile()?;
        self.client.get(url, AuthScope::Vip).await
    }

    /// Members attributed to the logged-in member's referral code
    pub async fn referrals(&self) -> Result<Page<Referral>> {
        let url = self.client.endpoints().vip_referrals()?;
        self.client.get_page(url, AuthScope::Vip).await
    }

    pub async fn generate_referral(&self) -> Result<String> {
        let url = self.client.endpoints().vip_generate_referral()?;
        let generated: GeneratedReferral = self.client.post_json(url, &json!({}), AuthScope::Vip).await?;
        info!(referral_code = %generated.referral_code, "Generated referral code");
        Ok(generated.referral_code)
    }

    /// Admin: list all VIP members
    pub async fn list(&self, query: &ListQuery) -> Result<Page<VipMember>> {
        let url = query.apply(self.client.endpoints().vip_members()?);
        self.client.get_page(url, AuthScope::Admin).await
    }

    /// Admin: delete a VIP member
    pub async fn delete(&self, member_id: &str) -> Result<Option<String>> {
        let url = self.client.endpoints().vip_member(member_id)?;
        let message = self.client.delete(url, AuthScope::Admin).await?;
        logging::log_admin_action("vip_delete", Some(member_id), None);
        Ok(message)
    }
}
