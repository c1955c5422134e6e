use crate::error::{Result, StorefrontError};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Separator between category names in flat exports such as the CSV
/// `categories` column, so it can never appear inside a name.
pub const CATEGORY_SEPARATOR: char = ';';

/// A catalogue entry, keyed by its SKU.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub sku: String,
    pub brand: String,
    pub title: String,
    pub description: String,
    pub price: Decimal,
    pub qty: u32,
    pub categories: Vec<String>,
}

impl Product {
    /// Checks the invariants a product must hold before it is stored.
    pub fn validate(&self) -> Result<()> {
        if self.sku.trim().is_empty() {
            return Err(StorefrontError::Validation(
                "Product SKU must not be empty".to_string(),
            ));
        }
        if let Some(bad) = self
            .categories
            .iter()
            .find(|c| c.contains(CATEGORY_SEPARATOR))
        {
            return Err(StorefrontError::Validation(format!(
                "Product {} has category {bad:?} containing '{CATEGORY_SEPARATOR}'",
                self.sku
            )));
        }
        Ok(())
    }

    /// Case-insensitive membership test against this product's categories.
    pub fn in_category(&self, category: &str) -> bool {
        self.categories
            .iter()
            .any(|c| c.eq_ignore_ascii_case(category))
    }

    /// True when the filter is empty or the product carries any of its categories.
    pub fn matches_any(&self, categories: &[String]) -> bool {
        categories.is_empty() || categories.iter().any(|c| self.in_category(c))
    }
}
