//! Admin session command handlers

use tracing::info;
use crate::middleware::auth::GuardDecision;
use crate::services::ServiceFactory;
use crate::utils::errors::Result;

/// Handle `login`
pub async fn handle_login(services: &ServiceFactory, email: &str, password: &str) -> Result<()> {
    let user = services.auth_service.login(email, password).await?;
    if !user.is_admin() {
        println!("Logged in as {}, but this account has no admin access.", user.email);
        return Ok(());
    }
    println!("Logged in as {} ({})", user.name.as_deref().unwrap_or(&user.email), user.role);
    Ok(())
}

/// Handle `logout`
pub fn handle_logout(services: &ServiceFactory) -> Result<()> {
    services.auth_service.logout()?;
    println!("Logged out.");
    Ok(())
}

/// Handle `whoami`
pub fn handle_whoami(services: &ServiceFactory) -> Result<()> {
    match services.guard.check_admin() {
        GuardDecision::Allow(user) => {
            println!("{} <{}> role={}", user.name.as_deref().unwrap_or("-"), user.email, user.role);
        }
        GuardDecision::RedirectToLogin(reason) => {
            info!(reason = ?reason, "No admin session");
            println!("Not logged in. Run `retail-champions login --email <EMAIL>`.");
        }
    }
    Ok(())
}
