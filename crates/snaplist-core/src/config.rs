use crate::app_config::{AppConfig, Environment};
use crate::ConfigError;

/// Load application configuration from environment variables.
///
/// Calls `dotenvy::dotenv().ok()` to load `.env` files before reading env vars.
///
/// # Errors
///
/// Returns `ConfigError` if a value is present but invalid.
pub fn load_app_config() -> Result<AppConfig, ConfigError> {
    dotenvy::dotenv().ok();
    load_app_config_from_env()
}

/// Load application configuration from environment variables already in the process.
///
/// Unlike [`load_app_config`], this does NOT load `.env` files.
///
/// # Errors
///
/// Returns `ConfigError` if a value is present but invalid.
pub fn load_app_config_from_env() -> Result<AppConfig, ConfigError> {
    build_app_config(|key| std::env::var(key))
}

/// Build application configuration using the provided env-var lookup function.
///
/// Decoupled from the process environment so tests can pass a `HashMap` lookup.
fn build_app_config<F>(lookup: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    use std::path::PathBuf;

    let or_default = |var: &str, default: &str| -> String {
        lookup(var).unwrap_or_else(|_| default.to_string())
    };

    // Blank values count as unset for optional settings.
    let optional = |var: &str| -> Option<String> {
        lookup(var)
            .ok()
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
    };

    let invalid = |var: &str, reason: String| ConfigError::InvalidEnvVar {
        var: var.to_string(),
        reason,
    };

    let parse_u32 = |var: &str, default: &str| -> Result<u32, ConfigError> {
        or_default(var, default)
            .parse::<u32>()
            .map_err(|e| invalid(var, e.to_string()))
    };

    let parse_u64 = |var: &str, default: &str| -> Result<u64, ConfigError> {
        or_default(var, default)
            .parse::<u64>()
            .map_err(|e| invalid(var, e.to_string()))
    };

    let parse_usize = |var: &str, default: &str| -> Result<usize, ConfigError> {
        or_default(var, default)
            .parse::<usize>()
            .map_err(|e| invalid(var, e.to_string()))
    };

    let env = parse_environment(&or_default("SNAPLIST_ENV", "development"))?;
    let log_level = or_default("SNAPLIST_LOG_LEVEL", "info");
    let database_url = or_default("SNAPLIST_DATABASE_URL", "sqlite://snaplist.db?mode=rwc");

    let db_max_connections = parse_u32("SNAPLIST_DB_MAX_CONNECTIONS", "5")?;
    if db_max_connections == 0 {
        return Err(invalid(
            "SNAPLIST_DB_MAX_CONNECTIONS",
            "must be at least 1".to_string(),
        ));
    }
    let db_acquire_timeout_secs = parse_u64("SNAPLIST_DB_ACQUIRE_TIMEOUT_SECS", "10")?;

    let max_images = parse_usize("SNAPLIST_MAX_IMAGES", "5")?;
    if max_images == 0 {
        return Err(invalid("SNAPLIST_MAX_IMAGES", "must be at least 1".to_string()));
    }

    let default_language = or_default("SNAPLIST_DEFAULT_LANGUAGE", "en");
    let price_table_path = optional("SNAPLIST_PRICE_TABLE_PATH").map(PathBuf::from);

    let ai_base_url = optional("SNAPLIST_AI_BASE_URL");
    let ai_api_key = optional("SNAPLIST_AI_API_KEY");
    let ai_timeout_secs = parse_u64("SNAPLIST_AI_TIMEOUT_SECS", "30")?;
    let ai_user_agent = or_default("SNAPLIST_AI_USER_AGENT", "snaplist/0.1 (listing-generator)");

    Ok(AppConfig {
        env,
        log_level,
        database_url,
        db_max_connections,
        db_acquire_timeout_secs,
        max_images,
        default_language,
        price_table_path,
        ai_base_url,
        ai_api_key,
        ai_timeout_secs,
        ai_user_agent,
    })
}

/// Parse a string into an `Environment` variant.
///
/// # Errors
///
/// Returns `ConfigError::InvalidEnvVar` for anything other than
/// `development`, `test` or `production`.
fn parse_environment(s: &str) -> Result<Environment, ConfigError> {
    match s {
        "development" => Ok(Environment::Development),
        "test" => Ok(Environment::Test),
        "production" => Ok(Environment::Production),
        other => Err(ConfigError::InvalidEnvVar {
            var: "SNAPLIST_ENV".to_string(),
            reason: format!("unknown environment '{other}'"),
        }),
    }
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
