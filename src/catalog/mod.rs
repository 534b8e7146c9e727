pub mod provider;

pub use provider::{CatalogError, CatalogProvider, JsonFileCatalogProvider, StaticCatalogProvider};

use std::collections::HashSet;
use tracing::{error, info, warn};
use validator::Validate;

use crate::models::product::{CatalogItem, ProductId};

/// The read-only list of purchasable items for a session, in source order.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    items: Vec<CatalogItem>,
}

impl Catalog {
    /// Builds a catalog from raw records, skipping invalid records and
    /// repeated ids (the first occurrence wins).
    pub fn new(records: Vec<CatalogItem>) -> Self {
        let mut seen = HashSet::new();
        let mut items = Vec::with_capacity(records.len());

        for record in records {
            if let Err(e) = record.validate() {
                warn!("Skipping invalid catalog record {}: {}", record.id, e);
                continue;
            }
            if !seen.insert(record.id) {
                warn!("Skipping catalog record with duplicate id {}", record.id);
                continue;
            }
            items.push(record);
        }

        Self { items }
    }

    /// One-shot load. A provider failure is logged and yields an empty catalog.
    pub async fn load(provider: &dyn CatalogProvider) -> Self {
        info!("Loading catalog from {}", provider.describe());
        match provider.load().await {
            Ok(records) => {
                let catalog = Catalog::new(records);
                info!("Catalog loaded with {} items", catalog.len());
                catalog
            }
            Err(e) => {
                error!("Error fetching catalog data: {}", e);
                Catalog::default()
            }
        }
    }

    pub fn find(&self, id: ProductId) -> Option<&CatalogItem> {
        self.items.iter().find(|item| item.id == id)
    }

    pub fn items(&self) -> &[CatalogItem] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::product::Price;

    fn item(id: u32, name: &str, cents: u64) -> CatalogItem {
        CatalogItem::new(id, name, "images/item.jpg", Price::from_cents(cents))
    }

    #[test]
    fn keeps_source_order_and_first_duplicate() {
        let catalog = Catalog::new(vec![
            item(3, "Lemon Meringue Pie", 500),
            item(1, "Waffle with Berries", 650),
            item(3, "Impostor Pie", 100),
        ]);

        let ids: Vec<u32> = catalog.items().iter().map(|i| i.id.0).collect();
        assert_eq!(ids, vec![3, 1]);
        assert_eq!(catalog.find(ProductId(3)).unwrap().name, "Lemon Meringue Pie");
    }

    #[test]
    fn drops_invalid_records() {
        let catalog = Catalog::new(vec![item(1, "", 100), item(2, "Red Velvet Cake", 450)]);
        assert_eq!(catalog.len(), 1);
        assert!(catalog.find(ProductId(1)).is_none());
    }

    #[tokio::test]
    async fn load_from_static_provider() {
        let provider = StaticCatalogProvider::new(vec![item(1, "Classic Tiramisu", 550)]);
        let catalog = Catalog::load(&provider).await;
        assert_eq!(catalog.len(), 1);
    }

    #[tokio::test]
    async fn missing_file_yields_empty_catalog() {
        let provider = JsonFileCatalogProvider::new("does/not/exist.json");
        let catalog = Catalog::load(&provider).await;
        assert!(catalog.is_empty());
    }
}
