//! Route guard
//!
//! Checks the stored session before a protected admin or VIP view renders.
//! Only token presence and the cached role claim are checked; token validity
//! is left to the server.

use tracing::{debug, warn};
use crate::models::AuthUser;
use crate::storage::{LocalStorage, TOKEN_KEY, USER_KEY, VIP_TOKEN_KEY, VIP_USER_KEY};
use crate::utils::errors::{RetailChampionsError, Result};

/// Why access was denied
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DenyReason {
    MissingToken,
    MissingUser,
    MalformedUser,
    NotAdmin,
}

/// Outcome of a guard check
#[derive(Debug, Clone, PartialEq)]
pub enum GuardDecision {
    Allow(AuthUser),
    RedirectToLogin(DenyReason),
}

impl GuardDecision {
    pub fn is_allowed(&self) -> bool {
        matches!(self, GuardDecision::Allow(_))
    }

    /// Convert a denial into an error for command handlers
    pub fn into_result(self) -> Result<AuthUser> {
        match self {
            GuardDecision::Allow(user) => Ok(user),
            GuardDecision::RedirectToLogin(reason) => Err(RetailChampionsError::Unauthorized(
                format!("Please log in as an administrator ({:?})", reason),
            )),
        }
    }
}

/// Guard for admin-only views
#[derive(Debug, Clone)]
pub struct RouteGuard {
    storage: LocalStorage,
}

impl RouteGuard {
    /// Create a new RouteGuard over local storage
    pub fn new(storage: LocalStorage) -> Self {
        Self { storage }
    }

    /// Check admin access
    pub fn check_admin(&self) -> GuardDecision {
        if self.storage.get(TOKEN_KEY).map_or(true, |t| t.is_empty()) {
            debug!("Route guard: no token stored");
            return GuardDecision::RedirectToLogin(DenyReason::MissingToken);
        }

        let Some(raw_user) = self.storage.get(USER_KEY) else {
            debug!("Route guard: no user stored");
            return GuardDecision::RedirectToLogin(DenyReason::MissingUser);
        };

        let user: AuthUser = match serde_json::from_str(&raw_user) {
            Ok(user) => user,
            Err(e) => {
                warn!(error = %e, "Route guard: stored user is not valid JSON");
                return GuardDecision::RedirectToLogin(DenyReason::MalformedUser);
            }
        };

        if !user.is_admin() {
            warn!(user_id = %user.id, role = %user.role, "Unauthorized admin access attempt");
            return GuardDecision::RedirectToLogin(DenyReason::NotAdmin);
        }

        debug!(user_id = %user.id, "Admin authentication successful");
        GuardDecision::Allow(user)
    }

    /// Require admin access or fail with an authorization error
    pub fn require_admin(&self) -> Result<AuthUser> {
        self.check_admin().into_result()
    }

    /// Check that a VIP session is stored
    pub fn require_vip(&self) -> Result<()> {
        let has_token = self.storage.get(VIP_TOKEN_KEY).map_or(false, |t| !t.is_empty());
        let has_user = self
            .storage
            .get(VIP_USER_KEY)
            .map_or(false, |raw| serde_json::from_str::<serde_json::Value>(&raw).is_ok());

        if has_token && has_user {
            Ok(())
        } else {
            Err(RetailChampionsError::Unauthorized(
                "Please log in with your VIP coupon code".to_string(),
            ))
        }
    }
}
