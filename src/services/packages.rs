//! Package, PIN and recharge pack services

use tracing::debug;
use crate::api::{ApiClient, AuthScope, ListQuery, Page};
use crate::models::{
    CreatePackageRequest, GeneratePinsRequest, Package, Pin, PinStats, RechargePack,
    RechargePackRequest, UpdatePackageRequest,
};
use crate::utils::errors::{RetailChampionsError, Result};
use crate::utils::logging;

/// Contest tier packages
#[derive(Debug, Clone)]
pub struct PackageService {
    client: ApiClient,
}

impl PackageService {
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }

    /// Packages are public so the registration form can list them
    pub async fn list(&self, query: &ListQuery) -> Result<Page<Package>> {
        let url = query.apply(self.client.endpoints().packages()?);
        self.client.get_page(url, AuthScope::Public).await
    }

    pub async fn create(&self, request: &CreatePackageRequest) -> Result<Package> {
        if request.name.trim().is_empty() {
            return Err(RetailChampionsError::InvalidInput("Package name is required".to_string()));
        }
        if request.price <= 0.0 {
            return Err(RetailChampionsError::InvalidInput("Package price must be positive".to_string()));
        }
        let url = self.client.endpoints().packages()?;
        let package: Package = self.client.post_json(url, request, AuthScope::Admin).await?;
        logging::log_admin_action("package_create", Some(&package.id), Some(&package.name));
        Ok(package)
    }

    pub async fn update(&self, package_id: &str, request: &UpdatePackageRequest) -> Result<Package> {
        let url = self.client.endpoints().package(package_id)?;
        let package = self.client.put_json(url, request, AuthScope::Admin).await?;
        logging::log_admin_action("package_update", Some(package_id), None);
        Ok(package)
    }

    pub async fn delete(&self, package_id: &str) -> Result<Option<String>> {
        let url = self.client.endpoints().package(package_id)?;
        let message = self.client.delete(url, AuthScope::Admin).await?;
        logging::log_admin_action("package_delete", Some(package_id), None);
        Ok(message)
    }
}

/// Package-scoped registration PINs
#[derive(Debug, Clone)]
pub struct PinService {
    client: ApiClient,
}

impl PinService {
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }

    pub async fn list(&self, query: &ListQuery) -> Result<Page<Pin>> {
        let url = query.apply(self.client.endpoints().pins()?);
        self.client.get_page(url, AuthScope::Admin).await
    }

    /// Ask the server to generate `count` PINs for a package
    pub async fn generate(&self, package_id: &str, count: u32) -> Result<Vec<Pin>> {
        if count == 0 {
            return Err(RetailChampionsError::InvalidInput("PIN count must be at least 1".to_string()));
        }
        debug!(package_id = package_id, count = count, "Generating PINs");
        let request = GeneratePinsRequest {
            package: package_id.to_string(),
            count,
        };
        let url = self.client.endpoints().pins_generate()?;
        let pins: Vec<Pin> = self.client.post_json(url, &request, AuthScope::Admin).await?;
        logging::log_admin_action("pins_generate", Some(package_id), Some(&pins.len().to_string()));
        Ok(pins)
    }

    pub async fn stats(&self) -> Result<PinStats> {
        let url = self.client.endpoints().pin_stats()?;
        self.client.get(url, AuthScope::Admin).await
    }

    pub async fn delete(&self, pin_id: &str) -> Result<Option<String>> {
        let url = self.client.endpoints().pin(pin_id)?;
        let message = self.client.delete(url, AuthScope::Admin).await?;
        logging::log_admin_action("pin_delete", Some(pin_id), None);
        Ok(message)
    }
}

/// Recharge packs
#[derive(Debug, Clone)]
pub struct RechargePackService {
    client: ApiClient,
}

impl RechargePackService {
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }

    pub async fn list(&self, query: &ListQuery) -> Result<Page<RechargePack>> {
        let url = query.apply(self.client.endpoints().recharge_packs()?);
        self.client.get_page(url, AuthScope::Public).await
    }

    pub async fn create(&self, request: &RechargePackRequest) -> Result<RechargePack> {
        if request.amount <= 0.0 {
            return Err(RetailChampionsError::InvalidInput("Recharge amount must be positive".to_string()));
        }
        let url = self.client.endpoints().recharge_packs()?;
        let pack: RechargePack = self.client.post_json(url, request, AuthScope::Admin).await?;
        logging::log_admin_action("recharge_pack_create", Some(&pack.id), Some(&pack.name));
        Ok(pack)
    }

    pub async fn update(&self, pack_id: &str, request: &RechargePackRequest) -> Result<RechargePack> {
        let url = self.client.endpoints().recharge_pack(pack_id)?;
        let pack = self.client.put_json(url, request, AuthScope::Admin).await?;
        logging::log_admin_action("recharge_pack_update", Some(pack_id), None);
        Ok(pack)
    }

    pub async fn delete(&self, pack_id: &str) -> Result<Option<String>> {
        let url = self.client.endpoints().recharge_pack(pack_id)?;
        let message = self.client.delete(url, AuthScope::Admin).await?;
        logging::log_admin_action("recharge_pack_delete", Some(pack_id), None);
        Ok(message)
    }
}
