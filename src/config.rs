//! TOML configuration for the payment service binding and the catalogue backend.
//!
//! ```toml
//! [services.payment]
//! url = "http://payment:8082"
//! timeout_ms = 3000
//!
//! [payment]
//! max_retries = 1
//!
//! [catalogue]
//! backend = "rocksdb"
//! path = "/var/lib/storefront/catalogue"
//! ```

use crate::error::{Result, StorefrontError};
use serde::Deserialize;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

pub const PAYMENT_SERVICE: &str = "payment";
pub const DEFAULT_PAYMENT_URL: &str = "http://localhost:8082";

/// Where and how to reach one logical service.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ServiceEndpoint {
    pub url: String,
    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,
    #[serde(default = "default_connect_timeout_ms")]
    pub connect_timeout_ms: u64,
}

impl ServiceEndpoint {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            timeout_ms: default_timeout_ms(),
            connect_timeout_ms: default_connect_timeout_ms(),
        }
    }
}

fn default_timeout_ms() -> u64 {
    5_000
}

fn default_connect_timeout_ms() -> u64 {
    1_000
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct PaymentConfig {
    /// Logical name of the payment service in `[services]`.
    pub service: String,
    /// Retries after an undelivered request. Zero or one.
    pub max_retries: u8,
}

impl Default for PaymentConfig {
    fn default() -> Self {
        Self {
            service: PAYMENT_SERVICE.to_string(),
            max_retries: 0,
        }
    }
}

/// Catalogue storage backend, chosen once at startup.
#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
#[serde(tag = "backend", rename_all = "kebab-case")]
pub enum StorageBackend {
    #[default]
    InMemory,
    #[serde(rename = "rocksdb")]
    RocksDb { path: PathBuf },
}

#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
#[serde(default)]
pub struct CatalogueConfig {
    #[serde(flatten)]
    pub storage: StorageBackend,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub services: BTreeMap<String, ServiceEndpoint>,
    pub payment: PaymentConfig,
    pub catalogue: CatalogueConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        let mut services = BTreeMap::new();
        services.insert(
            PAYMENT_SERVICE.to_string(),
            ServiceEndpoint::new(DEFAULT_PAYMENT_URL),
        );
        Self {
            services,
            payment: PaymentConfig::default(),
            catalogue: CatalogueConfig::default(),
        }
    }
}

impl AppConfig {
    /// Parses a TOML document, filling in the default payment binding when absent.
    pub fn from_toml(source: &str) -> Result<Self> {
        let mut config: AppConfig =
            toml::from_str(source).map_err(|e| StorefrontError::Config(e.to_string()))?;
        config
            .services
            .entry(PAYMENT_SERVICE.to_string())
            .or_insert_with(|| ServiceEndpoint::new(DEFAULT_PAYMENT_URL));
        config.validate()?;
        Ok(config)
    }

    pub fn load(path: &Path) -> Result<Self> {
        let source = std::fs::read_to_string(path)?;
        Self::from_toml(&source)
    }

    pub fn validate(&self) -> Result<()> {
        if self.payment.max_retries > 1 {
            return Err(StorefrontError::Config(format!(
                "payment.max_retries must be 0 or 1, got {}",
                self.payment.max_retries
            )));
        }
        for (name, endpoint) in &self.services {
            if endpoint.timeout_ms == 0 {
                return Err(StorefrontError::Config(format!(
                    "services.{name}.timeout_ms must be greater than zero"
                )));
            }
        }
        Ok(())
    }
}
