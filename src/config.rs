use std::{env, path::PathBuf, time::Duration};

use anyhow::Context;

const DEV_JWT_SECRET: &str = "storefront-dev-secret";

/// Where records live: the external REST store or an in-process one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreLocation {
    Remote(String),
    Memory { seed: Option<PathBuf> },
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub store: StoreLocation,
    pub store_timeout: Duration,
    pub host: String,
    pub port: u16,
    pub jwt_secret: String,
    pub token_ttl_hours: i64,
}

impl AppConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        let store_url = env::var("STORE_BASE_URL").context("STORE_BASE_URL is not set")?;
        let store = if store_url.trim().eq_ignore_ascii_case("memory") {
            StoreLocation::Memory {
                seed: env::var("STORE_SEED_FILE").ok().map(PathBuf::from),
            }
        } else {
            StoreLocation::Remote(store_url)
        };

        let host = env::var("APP_HOST").unwrap_or_else(|_| "127.0.0.1".to_string());
        let port = env::var("APP_PORT")
            .ok()
            .and_then(|p| p.parse::<u16>().ok())
            .unwrap_or(3000);
        let store_timeout = env::var("STORE_TIMEOUT_SECS")
            .ok()
            .and_then(|s| s.parse::<u64>().ok())
            .map(Duration::from_secs)
            .unwrap_or(Duration::from_secs(30));
        let token_ttl_hours = env::var("TOKEN_TTL_HOURS")
            .ok()
            .and_then(|h| h.parse::<i64>().ok())
            .filter(|h| *h > 0)
            .unwrap_or(24);
        let jwt_secret = match env::var("JWT_SECRET") {
            Ok(secret) if !secret.is_empty() => secret,
            _ => {
                tracing::warn!("JWT_SECRET is not set, falling back to the development secret");
                DEV_JWT_SECRET.to_string()
            }
        };

        Ok(Self {
            store,
            store_timeout,
            host,
            port,
            jwt_secret,
            token_ttl_hours,
        })
    }
}
