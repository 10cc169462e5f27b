//! # Backend Configuration
//!
//! [`InventoryConfig`] names the inventory service host and every endpoint
//! path the client calls. It is handed to
//! [`HttpInventoryClient::new`](crate::clients::HttpInventoryClient::new)
//! explicitly; nothing reads configuration from globals.
//!
//! Every field has a default matching the stock backend, so a TOML file only
//! needs the keys it overrides:
//!
//! ```toml
//! host = "http://inventory.internal:8080/"
//! request_timeout_ms = 5000
//! ```

use reqwest::Url;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;
use thiserror::Error;

use crate::clients::InventoryError;

/// Errors raised while loading configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Failed to parse config as TOML: {0}")]
    Parse(#[from] toml::de::Error),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct InventoryConfig {
    pub host: String,
    pub get_products_path: String,
    pub get_product_by_id_path: String,
    pub increase_path: String,
    pub decrease_path: String,
    pub create_path: String,
    pub update_path: String,
    /// Per-request timeout. Unset means requests may hang indefinitely.
    pub request_timeout_ms: Option<u64>,
}

impl Default for InventoryConfig {
    fn default() -> Self {
        Self {
            host: "http://localhost:8080/".to_string(),
            get_products_path: "product/getAllIdentifiers".to_string(),
            get_product_by_id_path: "product/getByID".to_string(),
            increase_path: "product/increaseQuantity".to_string(),
            decrease_path: "product/decreaseQuantity".to_string(),
            create_path: "product/create".to_string(),
            update_path: "product/updateProduct".to_string(),
            request_timeout_ms: None,
        }
    }
}

impl InventoryConfig {
    /// Default paths against a different host.
    pub fn with_host(host: impl Into<String>) -> Self {
        Self {
            host: host.into(),
            ..Self::default()
        }
    }

    pub fn from_toml_str(text: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(text)?)
    }

    /// Reads and parses a TOML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&text)
    }

    pub fn request_timeout(&self) -> Option<Duration> {
        self.request_timeout_ms.map(Duration::from_millis)
    }

    /// Joins `path` onto the host.
    ///
    /// The host is treated as a directory even without a trailing slash, so
    /// `http://h/api` + `product/getByID` gives `http://h/api/product/getByID`.
    pub fn endpoint(&self, path: &str) -> Result<Url, InventoryError> {
        let mut host = self.host.clone();
        if !host.ends_with('/') {
            host.push('/');
        }
        let base = Url::parse(&host)
            .map_err(|e| InventoryError::InvalidConfig(format!("host {:?}: {}", self.host, e)))?;
        base.join(path.trim_start_matches('/'))
            .map_err(|e| InventoryError::InvalidConfig(format!("path {:?}: {}", path, e)))
    }
}
