use crate::domain::product::{CATEGORY_SEPARATOR, Product};
use crate::error::Result;
use std::io::Write;

pub const HEADER: [&str; 7] = [
    "sku",
    "brand",
    "title",
    "description",
    "price",
    "qty",
    "categories",
];

/// Writes products as CSV in the same layout `ProductReader` accepts.
pub struct ProductWriter<W: Write> {
    writer: csv::Writer<W>,
}

impl<W: Write> ProductWriter<W> {
    pub fn new(sink: W) -> Self {
        Self {
            writer: csv::Writer::from_writer(sink),
        }
    }

    pub fn write_products<'a>(
        &mut self,
        products: impl IntoIterator<Item = &'a Product>,
    ) -> Result<()> {
        self.writer.write_record(HEADER)?;
        let separator = CATEGORY_SEPARATOR.to_string();
        for product in products {
            let price = product.price.to_string();
            let qty = product.qty.to_string();
            let categories = product.categories.join(separator.as_str());
            self.writer.write_record([
                product.sku.as_str(),
                product.brand.as_str(),
                product.title.as_str(),
                product.description.as_str(),
                price.as_str(),
                qty.as_str(),
                categories.as_str(),
            ])?;
        }
        self.writer.flush()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::interfaces::csv::product_reader::ProductReader;
    use rust_decimal_macros::dec;

    #[test]
    fn test_written_products_read_back() {
        let product = Product {
            sku: "MU-1".to_string(),
            brand: "Mu".to_string(),
            title: "Bowl, large".to_string(),
            description: "Ceramic".to_string(),
            price: dec!(12.50),
            qty: 3,
            categories: vec!["Food".to_string(), "Accessories".to_string()],
        };

        let mut buffer = Vec::new();
        ProductWriter::new(&mut buffer)
            .write_products([&product])
            .unwrap();

        let text = String::from_utf8(buffer.clone()).unwrap();
        assert!(text.starts_with("sku,brand,title,description,price,qty,categories\n"));
        assert!(text.contains("\"Bowl, large\""));

        let read: Vec<Product> = ProductReader::new(buffer.as_slice())
            .products()
            .collect::<Result<_>>()
            .unwrap();
        assert_eq!(read, vec![product]);
    }
}
