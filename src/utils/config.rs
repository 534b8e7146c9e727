use std::env;
use std::path::PathBuf;
use std::time::Duration;

use crate::services::checkout_service::CheckoutFlow;

pub const DEFAULT_CATALOG_PATH: &str = "db/data.json";

#[derive(Debug, Clone)]
pub struct Config {
    pub catalog_path: PathBuf,
    pub notification_ttl: Duration,
    pub allow_empty_orders: bool,
    pub log_level: String,
    pub environment: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            catalog_path: PathBuf::from(DEFAULT_CATALOG_PATH),
            notification_ttl: Duration::from_secs(3),
            allow_empty_orders: true,
            log_level: "info".to_string(),
            environment: "development".to_string(),
        }
    }
}

impl Config {
    pub fn from_env() -> anyhow::Result<Self> {
        dotenv::dotenv().ok();
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds a config from an arbitrary variable source.
    pub fn from_lookup<F>(lookup: F) -> anyhow::Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Config::default();

        let notification_ttl = match lookup("NOTIFICATION_TTL_SECS") {
            Some(raw) => Duration::from_secs(raw.trim().parse::<u64>().map_err(|_| {
                anyhow::anyhow!("NOTIFICATION_TTL_SECS must be a whole number of seconds, got '{}'", raw)
            })?),
            None => defaults.notification_ttl,
        };

        let allow_empty_orders = match lookup("ALLOW_EMPTY_ORDERS") {
            Some(raw) => parse_bool(&raw)
                .ok_or_else(|| anyhow::anyhow!("ALLOW_EMPTY_ORDERS must be true or false, got '{}'", raw))?,
            None => defaults.allow_empty_orders,
        };

        let config = Config {
            catalog_path: lookup("CATALOG_PATH")
                .map(PathBuf::from)
                .unwrap_or(defaults.catalog_path),
            notification_ttl,
            allow_empty_orders,
            log_level: lookup("LOG_LEVEL").unwrap_or(defaults.log_level),
            environment: lookup("APP_ENV").unwrap_or(defaults.environment),
        };

        config.validate()?;
        tracing::debug!("Config: successfully loaded for {} environment", config.environment);
        Ok(config)
    }

    fn validate(&self) -> Result<(), anyhow::Error> {
        if self.catalog_path.as_os_str().is_empty() {
            return Err(anyhow::anyhow!("CATALOG_PATH must not be empty"));
        }

        if self.notification_ttl.is_zero() {
            return Err(anyhow::anyhow!("NOTIFICATION_TTL_SECS must be greater than zero"));
        }

        Ok(())
    }

    pub fn is_production(&self) -> bool {
        self.environment == "production"
    }

    pub fn checkout_flow(&self) -> CheckoutFlow {
        CheckoutFlow::new(self.notification_ttl, self.allow_empty_orders)
    }
}

fn parse_bool(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}
