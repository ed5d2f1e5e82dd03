//! Configuration management

use std::net::{IpAddr, SocketAddr};

use config::{Config, Environment, File};
use serde::Deserialize;

use crate::error::AppError;

#[derive(Debug, Deserialize, Clone)]
pub struct AppConfig {
    pub app: AppSettings,
    pub database: DatabaseSettings,
    pub access_cache: AccessCacheSettings,
}

#[derive(Debug, Deserialize, Clone)]
pub struct AppSettings {
    pub env: String,
    pub host: String,
    pub port: u16,
    pub name: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct DatabaseSettings {
    pub url: String,
    pub max_connections: u32,
    pub min_connections: u32,
}

/// Staleness window for cached role access snapshots.
#[derive(Debug, Deserialize, Clone)]
pub struct AccessCacheSettings {
    pub ttl_minutes: u64,
}

impl AppConfig {
    pub fn load() -> Result<Self, AppError> {
        let env = std::env::var("APP_ENV").unwrap_or_else(|_| "development".into());
        let config = Config::builder()
            .set_default("app.env", "development")?
            .set_default("app.host", "127.0.0.1")?
            .set_default("app.port", 8080)?
            .set_default("app.name", "hris-server")?
            .set_default("database.max_connections", 10)?
            .set_default("database.min_connections", 1)?
            .set_default(
                "access_cache.ttl_minutes",
                crate::constants::ACCESS_CACHE_TTL_MINUTES as i64,
            )?
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name(&format!("config/{}", env)).required(false))
            .add_source(Environment::default().separator("__").try_parsing(true))
            .build()?;
        Ok(config.try_deserialize()?)
    }

    /// Socket address the server binds, from `app.host` and `app.port`.
    /// `app.host` must be a literal IP, not a hostname.
    pub fn bind_addr(&self) -> Result<SocketAddr, AppError> {
        let host: IpAddr = self
            .app
            .host
            .parse()
            .map_err(|_| AppError::InvalidBindAddress(self.app.host.clone()))?;
        Ok(SocketAddr::from((host, self.app.port)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(host: &str) -> AppConfig {
        AppConfig {
            app: AppSettings {
                env: "test".to_string(),
                host: host.to_string(),
                port: 8080,
                name: "hris-server".to_string(),
            },
            database: DatabaseSettings {
                url: "postgres://localhost/hris".to_string(),
                max_connections: 5,
                min_connections: 1,
            },
            access_cache: AccessCacheSettings { ttl_minutes: 15 },
        }
    }

    #[test]
    fn test_bind_addr() {
        let addr = config("127.0.0.1").bind_addr().unwrap();
        assert_eq!(addr.to_string(), "127.0.0.1:8080");
    }

    #[test]
    fn test_bind_addr_rejects_hostname() {
        let result = config("localhost").bind_addr();
        assert!(matches!(result, Err(AppError::InvalidBindAddress(_))));
    }
}
