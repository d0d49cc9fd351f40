//! Authentication service implementation
//!
//! This service handles admin login and logout. A successful login stores the
//! bearer token and the user record in local storage; logout clears both.

use tracing::{debug, info};
use crate::api::{ApiClient, AuthScope};
use crate::forms::{FieldSchema, FormData, FormSchema};
use crate::models::{AuthUser, LoginRequest, LoginResponse};
use crate::storage::{TOKEN_KEY, USER_KEY};
use crate::utils::errors::Result;

/// Authentication service for admin sessions
#[derive(Debug, Clone)]
pub struct AuthService {
    client: ApiClient,
}

impl AuthService {
    /// Create a new AuthService instance
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }

    fn login_schema() -> FormSchema {
        FormSchema::new(vec![
            FieldSchema::new("email", "Email")
                .required()
                .pattern(r"^[^@\s]+@[^@\s]+\.[^@\s]+$", "Enter a valid email address"),
            FieldSchema::new("password", "Password").required().length(6, 128),
        ])
    }

    /// Log in as an administrator and persist the session
    pub async fn login(&self, email: &str, password: &str) -> Result<AuthUser> {
        Self::login_schema().check(
            &FormData::new().text("email", email).text("password", password),
        )?;

        debug!(email = %email, "Attempting admin login");
        let request = LoginRequest {
            email: email.trim().to_string(),
            password: password.to_string(),
        };

        let url = self.client.endpoints().login()?;
        let response: LoginResponse = self.client.post_json(url, &request, AuthScope::Public).await?;

        let storage = self.client.storage();
        storage.set(TOKEN_KEY, response.token)?;
        storage.set(USER_KEY, serde_json::to_string(&response.user)?)?;

        info!(user_id = %response.user.id, role = %response.user.role, "Admin logged in");
        Ok(response.user)
    }

    /// Clear the stored session
    pub fn logout(&self) -> Result<()> {
        let storage = self.client.storage();
        storage.remove(TOKEN_KEY)?;
        storage.remove(USER_KEY)?;
        info!("Admin logged out");
        Ok(())
    }

    /// Cached user record, if one is stored and parses
    pub fn current_user(&self) -> Option<AuthUser> {
        self.client
            .storage()
            .get(USER_KEY)
            .and_then(|raw| serde_json::from_str(&raw).ok())
    }
}
