//! Adapters for the domain ports: the HTTP payment client and the catalogue
//! storage backends.

pub mod in_memory;
pub mod payment_client;
#[cfg(feature = "storage-rocksdb")]
pub mod rocksdb;
pub mod services;

use crate::config::{CatalogueConfig, StorageBackend};
use crate::domain::ports::ProductRepositoryBox;
use crate::error::Result;
use in_memory::InMemoryProductRepository;
use tracing::info;
#[cfg(not(feature = "storage-rocksdb"))]
use tracing::warn;

/// Resolves the configured catalogue backend into a single repository.
///
/// Called once at startup; everything downstream only sees the trait object.
pub fn open_product_repository(config: &CatalogueConfig) -> Result<ProductRepositoryBox> {
    match &config.storage {
        StorageBackend::InMemory => {
            info!("using in-memory catalogue storage");
            Ok(Box::new(InMemoryProductRepository::new()))
        }
        #[cfg(feature = "storage-rocksdb")]
        StorageBackend::RocksDb { path } => {
            info!(path = %path.display(), "using RocksDB catalogue storage");
            Ok(Box::new(self::rocksdb::RocksDbProductRepository::open(path)?))
        }
        #[cfg(not(feature = "storage-rocksdb"))]
        StorageBackend::RocksDb { path } => {
            warn!(
                "RocksDB catalogue storage requested at {}, but the 'storage-rocksdb' feature is not enabled; falling back to in-memory storage",
                path.display()
            );
            Ok(Box::new(InMemoryProductRepository::new()))
        }
    }
}
