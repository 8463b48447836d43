//! Server Configuration
//!
//! Everything comes from environment variables with sensible defaults.

use std::net::{IpAddr, SocketAddr};
use std::path::PathBuf;

use thiserror::Error;

pub const DEFAULT_PORT: u16 = 3000;
pub const DEFAULT_ENVIRONMENT: &str = "development";
pub const DEFAULT_UPSTREAM_URL: &str = "http://listapro-backend-service:8080";

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("invalid {key}: {value:?}")]
    Invalid { key: &'static str, value: String },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    pub host: IpAddr,
    pub port: u16,
    /// Reported by the probes (`LISTAPRO_ENV`)
    pub environment: String,
    pub version: String,
    /// Origin of the REST backend; `/api/...` is forwarded to `{upstream}/api/...`
    pub upstream_url: String,
    /// Built UI served for every non-API path
    pub static_dir: Option<PathBuf>,
}

impl ServerConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let host = match var("LISTAPRO_HOST") {
            Some(value) => value.trim().parse().map_err(|_| ConfigError::Invalid {
                key: "LISTAPRO_HOST",
                value,
            })?,
            None => IpAddr::from([0, 0, 0, 0]),
        };
        let port = match var("PORT") {
            Some(value) => value
                .trim()
                .parse()
                .map_err(|_| ConfigError::Invalid { key: "PORT", value })?,
            None => DEFAULT_PORT,
        };

        Ok(Self {
            host,
            port,
            environment: var("LISTAPRO_ENV").unwrap_or_else(|| DEFAULT_ENVIRONMENT.to_string()),
            version: env!("CARGO_PKG_VERSION").to_string(),
            upstream_url: var("LISTAPRO_UPSTREAM_URL")
                .unwrap_or_else(|| DEFAULT_UPSTREAM_URL.to_string())
                .trim_end_matches('/')
                .to_string(),
            static_dir: var("LISTAPRO_STATIC_DIR").map(PathBuf::from),
        })
    }

    pub fn addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }
}
