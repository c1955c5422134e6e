use crate::config::{AppConfig, ServiceEndpoint};
use crate::error::{Result, StorefrontError};
use std::collections::BTreeMap;

/// Logical service names bound to concrete endpoints.
///
/// The bindings come from configuration; nothing here performs discovery.
#[derive(Debug, Clone, Default)]
pub struct ServiceRegistry {
    endpoints: BTreeMap<String, ServiceEndpoint>,
}

impl ServiceRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_config(config: &AppConfig) -> Self {
        Self {
            endpoints: config.services.clone(),
        }
    }

    pub fn bind(&mut self, name: impl Into<String>, endpoint: ServiceEndpoint) {
        self.endpoints.insert(name.into(), endpoint);
    }

    pub fn resolve(&self, name: &str) -> Result<&ServiceEndpoint> {
        self.endpoints.get(name).ok_or_else(|| {
            StorefrontError::Config(format!("no endpoint configured for service '{name}'"))
        })
    }
}
