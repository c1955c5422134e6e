use crate::domain::ports::ProductRepository;
use crate::domain::product::Product;
use crate::error::Result;
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

/// A thread-safe in-memory product repository.
///
/// Uses `Arc<RwLock<HashMap<String, Product>>>` keyed by SKU so clones share
/// the same catalogue. Contents are lost when the process exits.
#[derive(Default, Clone)]
pub struct InMemoryProductRepository {
    products: Arc<RwLock<HashMap<String, Product>>>,
}

impl InMemoryProductRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ProductRepository for InMemoryProductRepository {
    async fn store(&self, product: Product) -> Result<()> {
        let mut products = self.products.write().await;
        products.insert(product.sku.clone(), product);
        Ok(())
    }

    async fn get(&self, sku: &str) -> Result<Option<Product>> {
        let products = self.products.read().await;
        Ok(products.get(sku).cloned())
    }

    async fn get_all(&self) -> Result<Vec<Product>> {
        let products = self.products.read().await;
        Ok(products.values().cloned().collect())
    }

    async fn remove(&self, sku: &str) -> Result<bool> {
        let mut products = self.products.write().await;
        Ok(products.remove(sku).is_some())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn product(sku: &str) -> Product {
        Product {
            sku: sku.to_string(),
            brand: "Mu".to_string(),
            title: format!("Product {sku}"),
            description: String::new(),
            price: dec!(9.99),
            qty: 1,
            categories: vec!["Toys".to_string()],
        }
    }

    #[tokio::test]
    async fn test_in_memory_store_and_get() {
        let repo = InMemoryProductRepository::new();
        repo.store(product("A-1")).await.unwrap();

        let retrieved = repo.get("A-1").await.unwrap().unwrap();
        assert_eq!(retrieved, product("A-1"));
        assert!(repo.get("B-2").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_in_memory_overwrite_and_remove() {
        let repo = InMemoryProductRepository::new();
        repo.store(product("A-1")).await.unwrap();

        let mut updated = product("A-1");
        updated.qty = 42;
        repo.store(updated.clone()).await.unwrap();

        let all = repo.get_all().await.unwrap();
        assert_eq!(all, vec![updated]);

        assert!(repo.remove("A-1").await.unwrap());
        assert!(!repo.remove("A-1").await.unwrap());
        assert!(repo.get_all().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_clones_share_state() {
        let repo = InMemoryProductRepository::new();
        let other = repo.clone();
        repo.store(product("A-1")).await.unwrap();
        assert!(other.get("A-1").await.unwrap().is_some());
    }
}
