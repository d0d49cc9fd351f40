//! Endpoint URL builders
//!
//! Every path the client calls, resolved against one base origin.

use url::Url;
use crate::utils::errors::Result;

#[derive(Debug, Clone)]
pub struct Endpoints {
    base: Url,
}

impl Endpoints {
    pub fn new(base_url: &str) -> Result<Self> {
        let normalized = if base_url.ends_with('/') {
            base_url.to_string()
        } else {
            format!("{}/", base_url)
        };
        Ok(Self {
            base: Url::parse(&normalized)?,
        })
    }

    pub fn base(&self) -> &Url {
        &self.base
    }

    fn path(&self, path: &str) -> Result<Url> {
        Ok(self.base.join(path)?)
    }

    fn with_id(&self, prefix: &str, id: &str, suffix: &str) -> Result<Url> {
        let encoded = urlencoding::encode(id);
        if suffix.is_empty() {
            self.path(&format!("{}/{}", prefix, encoded))
        } else {
            self.path(&format!("{}/{}/{}", prefix, encoded, suffix))
        }
    }

    // Authentication

    pub fn login(&self) -> Result<Url> {
        self.path("auth/login")
    }

    // Lottery

    pub fn lottery_create(&self) -> Result<Url> {
        self.path("lottery/create")
    }

    pub fn lottery_active(&self) -> Result<Url> {
        self.path("lottery/active")
    }

    pub fn lottery_status(&self, lottery_id: &str) -> Result<Url> {
        self.with_id("lottery", lottery_id, "status")
    }

    pub fn lottery_participants(&self, lottery_id: &str) -> Result<Url> {
        self.with_id("lottery", lottery_id, "participants")
    }

    pub fn lottery_spin(&self, lottery_id: &str) -> Result<Url> {
        self.with_id("lottery", lottery_id, "spin")
    }

    pub fn lottery_winner(&self, lottery_id: &str) -> Result<Url> {
        self.with_id("lottery", lottery_id, "winner")
    }

    pub fn lottery_history(&self) -> Result<Url> {
        self.path("lottery/history")
    }

    pub fn lottery(&self, lottery_id: &str) -> Result<Url> {
        self.with_id("lottery", lottery_id, "")
    }

    // Users

    pub fn user_register(&self) -> Result<Url> {
        self.path("users/register")
    }

    pub fn users(&self) -> Result<Url> {
        self.path("users")
    }

    pub fn user(&self, user_id: &str) -> Result<Url> {
        self.with_id("users", user_id, "")
    }

    pub fn users_bulk_delete(&self) -> Result<Url> {
        self.path("users/delete-all")
    }

    pub fn user_count(&self) -> Result<Url> {
        self.path("users/count")
    }

    // Packages, pins and recharge packs

    pub fn packages(&self) -> Result<Url> {
        self.path("packages")
    }

    pub fn package(&self, package_id: &str) -> Result<Url> {
        self.with_id("packages", package_id, "")
    }

    pub fn pins(&self) -> Result<Url> {
        self.path("pins")
    }

    pub fn pin(&self, pin_id: &str) -> Result<Url> {
        self.with_id("pins", pin_id, "")
    }

    pub fn pins_generate(&self) -> Result<Url> {
        self.path("pins/generate")
    }

    pub fn pin_stats(&self) -> Result<Url> {
        self.path("pins/stats")
    }

    pub fn recharge_packs(&self) -> Result<Url> {
        self.path("recharge-packs")
    }

    pub fn recharge_pack(&self, pack_id: &str) -> Result<Url> {
        self.with_id("recharge-packs", pack_id, "")
    }

    // VIP

    pub fn vip_verify_coupon(&self) -> Result<Url> {
        self.path("vip/verify-coupon")
    }

    pub fn vip_set_password(&self) -> Result<Url> {
        self.path("vip/set-password")
    }

    pub fn vip_login(&self) -> Result<Url> {
        self.path("vip/login")
    }

    pub fn vip_profile(&self) -> Result<Url> {
        self.path("vip/profile")
    }

    pub fn vip_members(&self) -> Result<Url> {
        self.path("vip/members")
    }

    pub fn vip_member(&self, member_id: &str) -> Result<Url> {
        self.with_id("vip/members", member_id, "")
    }

    pub fn vip_referrals(&self) -> Result<Url> {
        self.path("vip/referrals")
    }

    pub fn vip_generate_referral(&self) -> Result<Url> {
        self.path("vip/generate-referral")
    }

    // Gallery

    pub fn gallery(&self) -> Result<Url> {
        self.path("gallery")
    }

    pub fn gallery_upload(&self) -> Result<Url> {
        self.path("gallery/upload")
    }

    pub fn gallery_item(&self, item_id: &str) -> Result<Url> {
        self.with_id("gallery", item_id, "")
    }
}
