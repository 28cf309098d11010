use std::path::PathBuf;

use crate::app_config::{AppConfig, Environment};
use crate::ConfigError;

/// Load application configuration from environment variables.
///
/// Calls `dotenvy::dotenv().ok()` to load `.env` files before reading env vars.
///
/// # Errors
///
/// Returns `ConfigError` if required env vars are missing or values are invalid.
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
/// Returns `ConfigError` if required env vars are missing or values are invalid.
pub fn load_app_config_from_env() -> Result<AppConfig, ConfigError> {
    build_app_config(|key| std::env::var(key))
}

/// Settings needed to read and render the catalog without a database.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatalogSettings {
    pub catalog_path: PathBuf,
    pub currency_symbol: String,
    pub log_level: String,
}

/// Load only the catalog-related settings; `DATABASE_URL` is not required.
///
/// Calls `dotenvy::dotenv().ok()` first, like [`load_app_config`].
#[must_use]
pub fn load_catalog_settings() -> CatalogSettings {
    dotenvy::dotenv().ok();
    build_catalog_settings(|key| std::env::var(key))
}

fn build_catalog_settings<F>(lookup: F) -> CatalogSettings
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    let or_default = |var: &str, default: &str| -> String {
        lookup(var).unwrap_or_else(|_| default.to_string())
    };

    CatalogSettings {
        catalog_path: PathBuf::from(or_default(
            "STOREFRONT_CATALOG_PATH",
            "./config/products.yaml",
        )),
        currency_symbol: or_default("STOREFRONT_CURRENCY_SYMBOL", "৳"),
        log_level: or_default("STOREFRONT_LOG_LEVEL", "info"),
    }
}

/// Build application configuration using the provided env-var lookup function.
///
/// Parsing and validation are decoupled from the process environment so tests
/// can drive them with a plain `HashMap` lookup.
fn build_app_config<F>(lookup: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    use std::net::SocketAddr;

    let require = |var: &str| -> Result<String, ConfigError> {
        lookup(var).map_err(|_| ConfigError::MissingEnvVar(var.to_string()))
    };

    let or_default = |var: &str, default: &str| -> String {
        lookup(var).unwrap_or_else(|_| default.to_string())
    };

    let parse_num = |var: &str, default: &str| -> Result<u64, ConfigError> {
        let raw = or_default(var, default);
        raw.parse::<u64>().map_err(|e| ConfigError::InvalidEnvVar {
            var: var.to_string(),
            reason: e.to_string(),
        })
    };

    let narrow_u32 = |var: &str, value: u64| -> Result<u32, ConfigError> {
        u32::try_from(value).map_err(|e| ConfigError::InvalidEnvVar {
            var: var.to_string(),
            reason: e.to_string(),
        })
    };

    let database_url = require("DATABASE_URL")?;
    let env = parse_environment(&or_default("STOREFRONT_ENV", "development"))?;

    let raw_bind = or_default("STOREFRONT_BIND_ADDR", "0.0.0.0:3000");
    let bind_addr = raw_bind
        .parse::<SocketAddr>()
        .map_err(|e| ConfigError::InvalidEnvVar {
            var: "STOREFRONT_BIND_ADDR".to_string(),
            reason: e.to_string(),
        })?;

    let CatalogSettings {
        catalog_path,
        currency_symbol,
        log_level,
    } = build_catalog_settings(&lookup);

    let db_max_connections = narrow_u32(
        "STOREFRONT_DB_MAX_CONNECTIONS",
        parse_num("STOREFRONT_DB_MAX_CONNECTIONS", "10")?,
    )?;
    let db_min_connections = narrow_u32(
        "STOREFRONT_DB_MIN_CONNECTIONS",
        parse_num("STOREFRONT_DB_MIN_CONNECTIONS", "1")?,
    )?;
    if db_min_connections > db_max_connections {
        return Err(ConfigError::InvalidEnvVar {
            var: "STOREFRONT_DB_MIN_CONNECTIONS".to_string(),
            reason: format!(
                "must not exceed STOREFRONT_DB_MAX_CONNECTIONS ({db_max_connections})"
            ),
        });
    }
    let db_acquire_timeout_secs = parse_num("STOREFRONT_DB_ACQUIRE_TIMEOUT_SECS", "10")?;

    let rate_limit_per_minute =
        usize::try_from(parse_num("STOREFRONT_RATE_LIMIT_PER_MINUTE", "120")?).map_err(|e| {
            ConfigError::InvalidEnvVar {
                var: "STOREFRONT_RATE_LIMIT_PER_MINUTE".to_string(),
                reason: e.to_string(),
            }
        })?;

    Ok(AppConfig {
        database_url,
        env,
        bind_addr,
        log_level,
        catalog_path,
        currency_symbol,
        db_max_connections,
        db_min_connections,
        db_acquire_timeout_secs,
        rate_limit_per_minute,
    })
}

/// Parse a string into an `Environment` variant.
fn parse_environment(s: &str) -> Result<Environment, ConfigError> {
    match s {
        "development" => Ok(Environment::Development),
        "test" => Ok(Environment::Test),
        "production" => Ok(Environment::Production),
        other => Err(ConfigError::InvalidEnvVar {
            var: "STOREFRONT_ENV".to_string(),
            reason: format!("expected development, test, or production; got '{other}'"),
        }),
    }
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
