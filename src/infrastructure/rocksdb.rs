use crate::domain::ports::ProductRepository;
use crate::domain::product::Product;
use crate::error::{Result, StorefrontError};
use async_trait::async_trait;
use rocksdb::{ColumnFamily, ColumnFamilyDescriptor, DB, IteratorMode, Options};
use std::path::Path;
use std::sync::Arc;

/// Column Family holding catalogue products, keyed by SKU.
pub const CF_PRODUCTS: &str = "products";

/// A persistent product repository using RocksDB.
///
/// Products are stored as JSON under their SKU in the `products` column family.
/// `Clone` shares the underlying `Arc<DB>`.
#[derive(Clone)]
pub struct RocksDbProductRepository {
    db: Arc<DB>,
}

impl RocksDbProductRepository {
    /// Opens or creates a RocksDB instance at `path`, creating the
    /// `products` column family when missing.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let mut opts = Options::default();
        opts.create_if_missing(true);
        opts.create_missing_column_families(true);

        let cf_products = ColumnFamilyDescriptor::new(CF_PRODUCTS, Options::default());
        let db = DB::open_cf_descriptors(&opts, path, vec![cf_products])?;

        Ok(Self { db: Arc::new(db) })
    }

    fn products(&self) -> Result<&ColumnFamily> {
        self.db.cf_handle(CF_PRODUCTS).ok_or_else(|| {
            StorefrontError::Io(std::io::Error::other("Products column family not found"))
        })
    }
}

#[async_trait]
impl ProductRepository for RocksDbProductRepository {
    async fn store(&self, product: Product) -> Result<()> {
        let cf = self.products()?;
        let value = serde_json::to_vec(&product)?;
        self.db.put_cf(cf, product.sku.as_bytes(), value)?;
        Ok(())
    }

    async fn get(&self, sku: &str) -> Result<Option<Product>> {
        let cf = self.products()?;
        match self.db.get_pinned_cf(cf, sku.as_bytes())? {
            Some(bytes) => Ok(Some(serde_json::from_slice(&bytes)?)),
            None => Ok(None),
        }
    }

    async fn get_all(&self) -> Result<Vec<Product>> {
        let cf = self.products()?;
        let mut products = Vec::new();
        for item in self.db.iterator_cf(cf, IteratorMode::Start) {
            let (_key, value) = item?;
            products.push(serde_json::from_slice(&value)?);
        }
        Ok(products)
    }

    async fn remove(&self, sku: &str) -> Result<bool> {
        let cf = self.products()?;
        // Just check if the key exists without copying the value
        let existed = self.db.get_pinned_cf(cf, sku.as_bytes())?.is_some();
        if existed {
            self.db.delete_cf(cf, sku.as_bytes())?;
        }
        Ok(existed)
    }
}
