//! Product and season storage abstractions.
//!
//! The discount pipeline reads a product, mutates it and writes it back in one
//! request. Stores only promise that a single `save` is atomic; two requests
//! racing on the same product can still overwrite each other.

pub mod in_memory;
pub mod postgres;

use std::sync::Arc;

use async_trait::async_trait;
use thiserror::Error;

use pricewise_core::{ProductId, SeasonId};
use pricewise_products::{Product, Season};

pub use in_memory::{InMemoryProductStore, InMemorySeasonStore};
pub use postgres::PostgresStore;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum StoreError {
    #[error("database error in {operation}: {message}")]
    Database { operation: String, message: String },

    #[error("store unavailable: {0}")]
    Unavailable(String),

    #[error("corrupt record: {0}")]
    Corrupt(String),
}

#[async_trait]
pub trait ProductStore: Send + Sync {
    async fn find_by_id(&self, id: ProductId) -> Result<Option<Product>, StoreError>;

    /// Upsert by id. Returns the product as stored.
    async fn save(&self, product: Product) -> Result<Product, StoreError>;
}

#[async_trait]
pub trait SeasonStore: Send + Sync {
    async fn find_by_id(&self, id: SeasonId) -> Result<Option<Season>, StoreError>;
}

#[async_trait]
impl<S> ProductStore for Arc<S>
where
    S: ProductStore + ?Sized,
{
    async fn find_by_id(&self, id: ProductId) -> Result<Option<Product>, StoreError> {
        (**self).find_by_id(id).await
    }

    async fn save(&self, product: Product) -> Result<Product, StoreError> {
        (**self).save(product).await
    }
}

#[async_trait]
impl<S> SeasonStore for Arc<S>
where
    S: SeasonStore + ?Sized,
{
    async fn find_by_id(&self, id: SeasonId) -> Result<Option<Season>, StoreError> {
        (**self).find_by_id(id).await
    }
}
