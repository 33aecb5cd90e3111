use std::path::PathBuf;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Environment {
    Development,
    Test,
    Production,
}

impl std::fmt::Display for Environment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Environment::Development => write!(f, "development"),
            Environment::Test => write!(f, "test"),
            Environment::Production => write!(f, "production"),
        }
    }
}

#[derive(Clone)]
pub struct AppConfig {
    pub env: Environment,
    pub log_level: String,
    pub database_url: String,
    pub db_max_connections: u32,
    pub db_acquire_timeout_secs: u64,
    pub max_images: usize,
    pub default_language: String,
    pub price_table_path: Option<PathBuf>,
    /// When unset, the local fallback provider is used.
    pub ai_base_url: Option<String>,
    pub ai_api_key: Option<String>,
    pub ai_timeout_secs: u64,
    pub ai_user_agent: String,
}

impl std::fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppConfig")
            .field("env", &self.env)
            .field("log_level", &self.log_level)
            .field("database_url", &self.database_url)
            .field("db_max_connections", &self.db_max_connections)
            .field("db_acquire_timeout_secs", &self.db_acquire_timeout_secs)
            .field("max_images", &self.max_images)
            .field("default_language", &self.default_language)
            .field("price_table_path", &self.price_table_path)
            .field("ai_base_url", &self.ai_base_url)
            .field(
                "ai_api_key",
                &self.ai_api_key.as_ref().map(|_| "[redacted]"),
            )
            .field("ai_timeout_secs", &self.ai_timeout_secs)
            .field("ai_user_agent", &self.ai_user_agent)
            .finish()
    }
}
