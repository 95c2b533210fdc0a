//! Server configuration from the environment.

use std::net::{AddrParseError, SocketAddr};
use std::path::PathBuf;

use axum::http::HeaderValue;
use axum::http::header::InvalidHeaderValue;

/// Directory holding the reference data files.
pub const DATA_DIR_VAR: &str = "METRO_DATA_DIR";
/// Address the HTTP server listens on.
pub const BIND_ADDR_VAR: &str = "METRO_BIND_ADDR";
/// Browser origin allowed to call the API with credentials.
pub const ALLOWED_ORIGIN_VAR: &str = "METRO_ALLOWED_ORIGIN";

const DEFAULT_DATA_DIR: &str = "data";
const DEFAULT_BIND_ADDR: &str = "127.0.0.1:8080";
const DEFAULT_ALLOWED_ORIGIN: &str = "http://localhost:3000";

/// Error reading the server configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("invalid METRO_BIND_ADDR {value:?}: {source}")]
    InvalidBindAddr {
        value: String,
        #[source]
        source: AddrParseError,
    },

    #[error("invalid METRO_ALLOWED_ORIGIN {value:?}: {source}")]
    InvalidOrigin {
        value: String,
        #[source]
        source: InvalidHeaderValue,
    },
}

/// Process-level settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    pub data_dir: PathBuf,
    pub bind_addr: SocketAddr,
    pub allowed_origin: HeaderValue,
}

impl ServerConfig {
    /// Read `METRO_DATA_DIR`, `METRO_BIND_ADDR` and `METRO_ALLOWED_ORIGIN`,
    /// falling back to `data`, `127.0.0.1:8080` and `http://localhost:3000`.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let data_dir = lookup(DATA_DIR_VAR)
            .filter(|v| !v.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_DATA_DIR.to_string());

        let addr = lookup(BIND_ADDR_VAR)
            .filter(|v| !v.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_BIND_ADDR.to_string());
        let bind_addr = addr
            .trim()
            .parse()
            .map_err(|source| ConfigError::InvalidBindAddr {
                value: addr.clone(),
                source,
            })?;

        let origin = lookup(ALLOWED_ORIGIN_VAR)
            .filter(|v| !v.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_ALLOWED_ORIGIN.to_string());
        let allowed_origin =
            HeaderValue::from_str(origin.trim()).map_err(|source| ConfigError::InvalidOrigin {
                value: origin.clone(),
                source,
            })?;

        Ok(Self {
            data_dir: PathBuf::from(data_dir),
            bind_addr,
            allowed_origin,
        })
    }
}
