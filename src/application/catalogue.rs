use crate::domain::ports::ProductRepositoryBox;
use crate::domain::product::Product;
use crate::error::{Result, StorefrontError};
use std::collections::BTreeMap;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum SortOrder {
    #[default]
    Sku,
    Title,
    Price,
}

/// Filter, ordering and page selection for catalogue listings.
#[derive(Debug, Clone, PartialEq)]
pub struct ProductQuery {
    pub categories: Vec<String>,
    pub order: SortOrder,
    /// 1-based page number.
    pub page: usize,
    pub size: usize,
}

impl Default for ProductQuery {
    fn default() -> Self {
        Self {
            categories: Vec::new(),
            order: SortOrder::default(),
            page: 1,
            size: 10,
        }
    }
}

/// Catalogue read and write operations over whichever repository was
/// resolved at startup.
pub struct Catalogue {
    repository: ProductRepositoryBox,
}

impl Catalogue {
    pub fn new(repository: ProductRepositoryBox) -> Self {
        Self { repository }
    }

    pub async fn add(&self, product: Product) -> Result<()> {
        product.validate()?;
        self.repository.store(product).await
    }

    pub async fn get(&self, sku: &str) -> Result<Option<Product>> {
        self.repository.get(sku).await
    }

    pub async fn remove(&self, sku: &str) -> Result<bool> {
        self.repository.remove(sku).await
    }

    pub async fn list(&self, query: &ProductQuery) -> Result<Vec<Product>> {
        if query.size == 0 {
            return Err(StorefrontError::Validation(
                "Page size must be positive".to_string(),
            ));
        }

        let mut products = self.matching(&query.categories).await?;
        match query.order {
            SortOrder::Sku => products.sort_by(|a, b| a.sku.cmp(&b.sku)),
            SortOrder::Title => {
                products.sort_by(|a, b| a.title.cmp(&b.title).then_with(|| a.sku.cmp(&b.sku)))
            }
            SortOrder::Price => {
                products.sort_by(|a, b| a.price.cmp(&b.price).then_with(|| a.sku.cmp(&b.sku)))
            }
        }

        let skip = query.page.saturating_sub(1).saturating_mul(query.size);
        Ok(products.into_iter().skip(skip).take(query.size).collect())
    }

    pub async fn count(&self, categories: &[String]) -> Result<usize> {
        Ok(self.matching(categories).await?.len())
    }

    /// Every category in use, sorted and without duplicates.
    ///
    /// Names that differ only in ASCII case are one category, as they are when
    /// filtering; the lexicographically smallest spelling is reported.
    pub async fn categories(&self) -> Result<Vec<String>> {
        let products = self.repository.get_all().await?;
        let mut names: BTreeMap<String, String> = BTreeMap::new();
        for name in products.into_iter().flat_map(|p| p.categories) {
            names
                .entry(name.to_ascii_lowercase())
                .and_modify(|kept| {
                    if name < *kept {
                        *kept = name.clone();
                    }
                })
                .or_insert(name);
        }
        Ok(names.into_values().collect())
    }

    async fn matching(&self, categories: &[String]) -> Result<Vec<Product>> {
        let products = self.repository.get_all().await?;
        Ok(products
            .into_iter()
            .filter(|p| p.matches_any(categories))
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::in_memory::InMemoryProductRepository;
    use rust_decimal::Decimal;
    use rust_decimal_macros::dec;

    fn product(sku: &str, title: &str, price: Decimal, categories: &[&str]) -> Product {
        Product {
            sku: sku.to_string(),
            brand: "Mu".to_string(),
            title: title.to_string(),
            description: String::new(),
            price,
            qty: 1,
            categories: categories.iter().map(|c| c.to_string()).collect(),
        }
    }

    async fn seeded() -> Catalogue {
        let catalogue = Catalogue::new(Box::new(InMemoryProductRepository::new()));
        for p in [
            product("S-3", "Catnip", dec!(4.99), &["Toys", "Treats"]),
            product("S-1", "Bed", dec!(49.00), &["Beds"]),
            product("S-2", "Ball", dec!(2.50), &["Toys"]),
            product("S-4", "Collar", dec!(12.00), &["Accessories"]),
        ] {
            catalogue.add(p).await.unwrap();
        }
        catalogue
    }

    fn skus(products: &[Product]) -> Vec<&str> {
        products.iter().map(|p| p.sku.as_str()).collect()
    }

    #[tokio::test]
    async fn test_list_sorted_by_sku_by_default() {
        let catalogue = seeded().await;
        let all = catalogue.list(&ProductQuery::default()).await.unwrap();
        assert_eq!(skus(&all), vec!["S-1", "S-2", "S-3", "S-4"]);
    }

    #[tokio::test]
    async fn test_list_by_price_with_category_filter() {
        let catalogue = seeded().await;
        let query = ProductQuery {
            categories: vec!["toys".to_string()],
            order: SortOrder::Price,
            ..Default::default()
        };
        let toys = catalogue.list(&query).await.unwrap();
        assert_eq!(skus(&toys), vec!["S-2", "S-3"]);
        assert_eq!(catalogue.count(&query.categories).await.unwrap(), 2);
    }

    #[tokio::test]
    async fn test_pagination() {
        let catalogue = seeded().await;
        let page = |page| ProductQuery {
            order: SortOrder::Title,
            page,
            size: 3,
            ..Default::default()
        };

        let first = catalogue.list(&page(1)).await.unwrap();
        assert_eq!(skus(&first), vec!["S-2", "S-1", "S-3"]);
        let second = catalogue.list(&page(2)).await.unwrap();
        assert_eq!(skus(&second), vec!["S-4"]);
        assert!(catalogue.list(&page(3)).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_zero_page_size_is_rejected() {
        let catalogue = seeded().await;
        let query = ProductQuery {
            size: 0,
            ..Default::default()
        };
        assert!(matches!(
            catalogue.list(&query).await,
            Err(StorefrontError::Validation(_))
        ));
    }

    #[tokio::test]
    async fn test_categories_are_unique_and_sorted() {
        let catalogue = seeded().await;
        assert_eq!(
            catalogue.categories().await.unwrap(),
            vec!["Accessories", "Beds", "Toys", "Treats"]
        );
    }

    #[tokio::test]
    async fn test_categories_fold_case_like_the_filter() {
        let catalogue = seeded().await;
        catalogue
            .add(product("S-5", "Mouse", dec!(1.50), &["toys", "BEDS"]))
            .await
            .unwrap();

        let categories = catalogue.categories().await.unwrap();
        assert_eq!(categories, vec!["Accessories", "BEDS", "Toys", "Treats"]);
        for name in &categories {
            let query = vec![name.to_string()];
            assert!(catalogue.count(&query).await.unwrap() > 0);
        }
        assert_eq!(catalogue.count(&["toys".to_string()]).await.unwrap(), 3);
    }

    #[tokio::test]
    async fn test_add_rejects_category_with_separator() {
        let catalogue = seeded().await;
        let err = catalogue
            .add(product("S-6", "Tin", dec!(3), &["Food;Treats"]))
            .await
            .unwrap_err();
        assert!(matches!(err, StorefrontError::Validation(_)));
        assert!(catalogue.get("S-6").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_add_get_remove() {
        let catalogue = seeded().await;
        assert!(catalogue.add(product(" ", "Nameless", dec!(1), &[])).await.is_err());

        assert_eq!(catalogue.get("S-4").await.unwrap().unwrap().title, "Collar");
        assert!(catalogue.remove("S-4").await.unwrap());
        assert!(catalogue.get("S-4").await.unwrap().is_none());
        assert_eq!(catalogue.count(&[]).await.unwrap(), 3);
    }
}
