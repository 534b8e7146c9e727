use async_trait::async_trait;
use std::path::PathBuf;
use thiserror::Error;

use crate::models::product::CatalogItem;

#[derive(Error, Debug)]
pub enum CatalogError {
    #[error("Failed to read catalog file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Malformed catalog data: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Source of catalog records, loaded once per session.
#[async_trait]
pub trait CatalogProvider: Send + Sync {
    async fn load(&self) -> Result<Vec<CatalogItem>, CatalogError>;
    fn describe(&self) -> String;
}

/// Reads a JSON array of `{ id, name, image, price }` records.
pub struct JsonFileCatalogProvider {
    path: PathBuf,
}

impl JsonFileCatalogProvider {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

#[async_trait]
impl CatalogProvider for JsonFileCatalogProvider {
    async fn load(&self) -> Result<Vec<CatalogItem>, CatalogError> {
        let raw = tokio::fs::read_to_string(&self.path)
            .await
            .map_err(|source| CatalogError::Io {
                path: self.path.clone(),
                source,
            })?;

        let items: Vec<CatalogItem> = serde_json::from_str(&raw)?;
        tracing::debug!("Read {} catalog records from {}", items.len(), self.path.display());
        Ok(items)
    }

    fn describe(&self) -> String {
        format!("json file {}", self.path.display())
    }
}

/// Fixed in-memory catalog.
#[derive(Debug, Clone, Default)]
pub struct StaticCatalogProvider {
    items: Vec<CatalogItem>,
}

impl StaticCatalogProvider {
    pub fn new(items: Vec<CatalogItem>) -> Self {
        Self { items }
    }
}

#[async_trait]
impl CatalogProvider for StaticCatalogProvider {
    async fn load(&self) -> Result<Vec<CatalogItem>, CatalogError> {
        Ok(self.items.clone())
    }

    fn describe(&self) -> String {
        format!("static list of {} items", self.items.len())
    }
}
