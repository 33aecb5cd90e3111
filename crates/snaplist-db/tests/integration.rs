//! Offline unit tests for snaplist-db pool configuration.
//! These tests do not open a database.

use snaplist_core::{AppConfig, Environment};
use snaplist_db::{ListingStore, PoolConfig};

fn app_config() -> AppConfig {
    AppConfig {
        env: Environment::Test,
        log_level: "info".to_string(),
        database_url: "sqlite://example.db".to_string(),
        db_max_connections: 3,
        db_acquire_timeout_secs: 9,
        max_images: 7,
        default_language: "en".to_string(),
        price_table_path: None,
        ai_base_url: None,
        ai_api_key: None,
        ai_timeout_secs: 30,
        ai_user_agent: "ua".to_string(),
    }
}

#[test]
fn pool_config_from_app_config_uses_core_values() {
    let pool_config = PoolConfig::from_app_config(&app_config());
    assert_eq!(pool_config.max_connections, 3);
    assert_eq!(pool_config.acquire_timeout_secs, 9);
}

#[test]
fn store_from_app_config_uses_max_images() {
    let store = ListingStore::from_app_config(&app_config());
    assert_eq!(store.max_images(), 7);
}
