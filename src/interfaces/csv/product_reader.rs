use crate::domain::product::{CATEGORY_SEPARATOR, Product};
use crate::error::{Result, StorefrontError};
use rust_decimal::Decimal;
use serde::Deserialize;
use std::io::Read;

#[derive(Debug, Deserialize)]
struct ProductRow {
    sku: String,
    brand: String,
    title: String,
    description: String,
    price: Decimal,
    qty: u32,
    #[serde(default)]
    categories: String,
}

impl ProductRow {
    fn into_product(self) -> Result<Product> {
        if self.sku.is_empty() {
            return Err(StorefrontError::Validation(
                "Product SKU must not be empty".to_string(),
            ));
        }
        if self.price < Decimal::ZERO {
            return Err(StorefrontError::Validation(format!(
                "Product {} has a negative price",
                self.sku
            )));
        }
        let categories = self
            .categories
            .split(CATEGORY_SEPARATOR)
            .map(str::trim)
            .filter(|c| !c.is_empty())
            .map(String::from)
            .collect();

        Ok(Product {
            sku: self.sku,
            brand: self.brand,
            title: self.title,
            description: self.description,
            price: self.price,
            qty: self.qty,
            categories,
        })
    }
}

/// Reads catalogue products from a CSV source.
///
/// Expects the header `sku,brand,title,description,price,qty,categories`,
/// with categories separated by `;`. Whitespace around fields is trimmed.
pub struct ProductReader<R: Read> {
    reader: csv::Reader<R>,
}

impl<R: Read> ProductReader<R> {
    pub fn new(source: R) -> Self {
        let reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .flexible(true)
            .from_reader(source);
        Self { reader }
    }

    /// Lazily deserializes one product per row; a bad row yields an `Err` item.
    pub fn products(self) -> impl Iterator<Item = Result<Product>> {
        self.reader
            .into_deserialize::<ProductRow>()
            .map(|row| row.map_err(StorefrontError::from).and_then(ProductRow::into_product))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    const HEADER: &str = "sku, brand, title, description, price, qty, categories";

    #[test]
    fn test_reader_valid_stream() {
        let data = format!(
            "{HEADER}\nMU-1, Mu, Bowl, Ceramic bowl, 12.50, 3, Food; Accessories\nMU-2, Mu, Ball, Rubber ball, 2.5, 10,"
        );
        let products: Vec<Result<Product>> = ProductReader::new(data.as_bytes()).products().collect();

        assert_eq!(products.len(), 2);
        let bowl = products[0].as_ref().unwrap();
        assert_eq!(bowl.sku, "MU-1");
        assert_eq!(bowl.price, dec!(12.50));
        assert_eq!(bowl.categories, vec!["Food", "Accessories"]);

        let ball = products[1].as_ref().unwrap();
        assert_eq!(ball.qty, 10);
        assert!(ball.categories.is_empty());
    }

    #[test]
    fn test_reader_malformed_line() {
        let data = format!(
            "{HEADER}\nMU-1, Mu, Bowl, Ceramic bowl, cheap, 3, Food\nMU-2, Mu, Ball, Rubber ball, -1, 1, Toys"
        );
        let products: Vec<Result<Product>> = ProductReader::new(data.as_bytes()).products().collect();

        assert!(matches!(products[0], Err(StorefrontError::Csv(_))));
        assert!(matches!(products[1], Err(StorefrontError::Validation(_))));
    }
}
