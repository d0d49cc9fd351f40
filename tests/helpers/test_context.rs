//! Test context for unified test setup
//!
//! Builds settings pointed at the mock backend, a file-backed storage in a
//! temporary directory and the full service factory.

use std::sync::Once;
use std::time::Duration;
use serde_json::json;
use tempfile::TempDir;
use RetailChampions::config::Settings;
use RetailChampions::services::ServiceFactory;
use RetailChampions::storage::{LocalStorage, TOKEN_KEY, USER_KEY};

use super::api_mock::ApiMockServer;

static INIT: Once = Once::new();

/// Initialize logging for tests (called once)
pub fn init_test_logging() {
    INIT.call_once(|| {
        let _ = tracing_subscriber::fmt()
            .with_env_filter("RetailChampions=debug")
            .with_test_writer()
            .try_init();
    });
}

/// Timings used by the integration tests
#[derive(Debug, Clone)]
pub struct TestConfig {
    pub poll_interval: Duration,
    pub spin_duration: Duration,
    pub admin_session: bool,
}

impl Default for TestConfig {
    fn default() -> Self {
        Self {
            poll_interval: Duration::from_millis(100),
            spin_duration: Duration::from_millis(200),
            admin_session: true,
        }
    }
}

/// Unified test context that manages all test components
pub struct TestContext {
    pub api: ApiMockServer,
    pub settings: Settings,
    pub storage: LocalStorage,
    pub services: ServiceFactory,
    pub temp_dir: TempDir,
}

impl TestContext {
    /// Context with an admin session already stored
    pub async fn new() -> Self {
        Self::new_with_config(TestConfig::default()).await
    }

    pub async fn new_with_config(config: TestConfig) -> Self {
        init_test_logging();

        let api = ApiMockServer::new().await;
        let temp_dir = tempfile::tempdir().expect("Failed to create temp dir");

        let mut settings = Settings::default();
        settings.api.base_url = api.api_url();
        settings.api.timeout_seconds = Some(10);
        settings.lottery.poll_interval_ms = config.poll_interval.as_millis() as u64;
        settings.lottery.spin_duration_ms = config.spin_duration.as_millis() as u64;
        settings.storage.path = temp_dir.path().join("storage.json");
        settings.export.output_dir = temp_dir.path().join("exports");

        let storage = LocalStorage::open(&settings.storage.path).expect("Failed to open storage");
        if config.admin_session {
            store_admin_session(&storage);
        }

        let services = ServiceFactory::new(settings.clone(), storage.clone())
            .expect("Failed to create services");

        Self {
            api,
            settings,
            storage,
            services,
            temp_dir,
        }
    }
}

pub const TEST_TOKEN: &str = "test-admin-token";

pub fn store_admin_session(storage: &LocalStorage) {
    storage.set(TOKEN_KEY, TEST_TOKEN).expect("Failed to store token");
    let user = json!({"_id": "admin1", "name": "Admin", "email": "admin@example.com", "role": "admin"});
    storage.set(USER_KEY, user.to_string()).expect("Failed to store user");
}
