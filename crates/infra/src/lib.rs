//! Infrastructure layer: product/season storage and discount orchestration.

pub mod discount_service;
pub mod store;

pub use discount_service::{DiscountService, ProductResponse, ServiceError};
pub use store::{
    InMemoryProductStore, InMemorySeasonStore, PostgresStore, ProductStore, SeasonStore, StoreError,
};
