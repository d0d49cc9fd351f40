//! Services module
//!
//! This module contains one service per backend resource family

pub mod auth;
pub mod gallery;
pub mod lottery;
pub mod packages;
pub mod user;
pub mod vip;

// Re-export commonly used services
pub use auth::AuthService;
pub use gallery::GalleryService;
pub use lottery::LotteryService;
pub use packages::{PackageService, PinService, RechargePackService};
pub use user::UserService;
pub use vip::VipService;

use crate::api::ApiClient;
use crate::config::settings::Settings;
use crate::middleware::RouteGuard;
use crate::storage::LocalStorage;
use crate::utils::errors::Result;

/// Service factory for creating and managing all services
#[derive(Debug, Clone)]
pub struct ServiceFactory {
    pub settings: Settings,
    pub client: ApiClient,
    pub guard: RouteGuard,
    pub auth_service: AuthService,
    pub lottery_service: LotteryService,
    pub user_service: UserService,
    pub package_service: PackageService,
    pub pin_service: PinService,
    pub recharge_service: RechargePackService,
    pub vip_service: VipService,
    pub gallery_service: GalleryService,
}

impl ServiceFactory {
    /// Create a new ServiceFactory with all services sharing one client
    pub fn new(settings: Settings, storage: LocalStorage) -> Result<Self> {
        let client = ApiClient::new(&settings, storage.clone())?;

        Ok(Self {
            guard: RouteGuard::new(storage),
            auth_service: AuthService::new(client.clone()),
            lottery_service: LotteryService::new(client.clone()),
            user_service: UserService::new(client.clone()),
            package_service: PackageService::new(client.clone()),
            pin_service: PinService::new(client.clone()),
            recharge_service: RechargePackService::new(client.clone()),
            vip_service: VipService::new(client.clone()),
            gallery_service: GalleryService::new(client.clone()),
            client,
            settings,
        })
    }
}
