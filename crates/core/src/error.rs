//! Domain error model.

use std::collections::BTreeMap;

use thiserror::Error;

use crate::id::ProductId;

/// Result type used across the domain layer.
pub type DomainResult<T> = Result<T, DomainError>;

/// Field name -> human readable message, ordered for stable output.
pub type FieldErrors = BTreeMap<String, String>;

/// Domain-level error.
///
/// Keep this focused on deterministic, business/domain failures (validation,
/// missing products, stock rules). Infrastructure concerns belong elsewhere.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// The requested product id does not resolve.
    #[error("Product not found with ID: {0}")]
    ProductNotFound(ProductId),

    /// The product has no stock left (quantity <= 0).
    #[error("Product is out of stock.")]
    ProductOutOfStock(ProductId),

    /// Discount type outside of {PERCENTAGE, FLAT}.
    #[error("Invalid discount type: {0}")]
    InvalidDiscountType(String),

    /// A request failed validation; one message per offending field.
    #[error("Validation failed")]
    Validation(FieldErrors),

    /// An identifier was invalid (e.g. parse failure).
    #[error("invalid identifier: {0}")]
    InvalidId(String),
}

impl DomainError {
    pub fn product_not_found(id: ProductId) -> Self {
        Self::ProductNotFound(id)
    }

    pub fn out_of_stock(id: ProductId) -> Self {
        Self::ProductOutOfStock(id)
    }

    pub fn invalid_discount_type(raw: impl Into<String>) -> Self {
        Self::InvalidDiscountType(raw.into())
    }

    pub fn invalid_id(msg: impl Into<String>) -> Self {
        Self::InvalidId(msg.into())
    }

    /// Single-field validation failure.
    pub fn validation(field: impl Into<String>, msg: impl Into<String>) -> Self {
        let mut errors = FieldErrors::new();
        errors.insert(field.into(), msg.into());
        Self::Validation(errors)
    }
}
