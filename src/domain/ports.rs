use super::payment::{PaymentRequest, PaymentResponse};
use super::product::Product;
use crate::error::{AuthorizationError, Result};
use async_trait::async_trait;

/// Authorizes charges against an external payment provider.
///
/// One call per attempt; a decline comes back as `Ok` with `authorised = false`.
#[async_trait]
pub trait PaymentAuthorizer: Send + Sync {
    async fn authorize(
        &self,
        request: &PaymentRequest,
    ) -> std::result::Result<PaymentResponse, AuthorizationError>;
}

/// Storage capability for the product catalogue.
#[async_trait]
pub trait ProductRepository: Send + Sync {
    async fn store(&self, product: Product) -> Result<()>;
    async fn get(&self, sku: &str) -> Result<Option<Product>>;
    async fn get_all(&self) -> Result<Vec<Product>>;
    async fn remove(&self, sku: &str) -> Result<bool>;
}

pub type PaymentAuthorizerBox = Box<dyn PaymentAuthorizer>;
pub type ProductRepositoryBox = Box<dyn ProductRepository>;
