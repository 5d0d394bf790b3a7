use std::collections::HashMap;
use std::sync::RwLock;

use async_trait::async_trait;

use pricewise_core::{Entity, ProductId, SeasonId};
use pricewise_products::{Product, Season};

use super::{ProductStore, SeasonStore, StoreError};

/// In-memory product store for tests/dev.
#[derive(Debug, Default)]
pub struct InMemoryProductStore {
    inner: RwLock<HashMap<ProductId, Product>>,
}

impl InMemoryProductStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed or overwrite a product.
    pub fn insert(&self, product: Product) -> Result<(), StoreError> {
        let mut map = self
            .inner
            .write()
            .map_err(|_| StoreError::Unavailable("product store lock poisoned".to_string()))?;
        map.insert(product.id(), product);
        Ok(())
    }

    pub fn len(&self) -> Result<usize, StoreError> {
        self.inner
            .read()
            .map(|m| m.len())
            .map_err(|_| StoreError::Unavailable("product store lock poisoned".to_string()))
    }

    pub fn is_empty(&self) -> Result<bool, StoreError> {
        Ok(self.len()? == 0)
    }
}

#[async_trait]
impl ProductStore for InMemoryProductStore {
    async fn find_by_id(&self, id: ProductId) -> Result<Option<Product>, StoreError> {
        let map = self
            .inner
            .read()
            .map_err(|_| StoreError::Unavailable("product store lock poisoned".to_string()))?;
        Ok(map.get(&id).cloned())
    }

    async fn save(&self, product: Product) -> Result<Product, StoreError> {
        self.insert(product.clone())?;
        Ok(product)
    }
}

/// In-memory season store for tests/dev.
#[derive(Debug, Default)]
pub struct InMemorySeasonStore {
    inner: RwLock<HashMap<SeasonId, Season>>,
}

impl InMemorySeasonStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&self, season: Season) -> Result<(), StoreError> {
        let mut map = self
            .inner
            .write()
            .map_err(|_| StoreError::Unavailable("season store lock poisoned".to_string()))?;
        map.insert(season.id(), season);
        Ok(())
    }
}

#[async_trait]
impl SeasonStore for InMemorySeasonStore {
    async fn find_by_id(&self, id: SeasonId) -> Result<Option<Season>, StoreError> {
        let map = self
            .inner
            .read()
            .map_err(|_| StoreError::Unavailable("season store lock poisoned".to_string()))?;
        Ok(map.get(&id).cloned())
    }
}
