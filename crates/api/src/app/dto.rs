use serde::Deserialize;

use pricewise_core::{DomainError, FieldErrors, ProductId};
use pricewise_products::{DiscountRequest, DiscountType};

// -------------------------
// Request DTOs
// -------------------------

/// Raw `POST /product/discount` body. Every field is optional at this layer so
/// that missing fields can be reported together instead of failing on the first.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DiscountRequestBody {
    pub product_id: Option<i64>,
    pub discount_type: Option<String>,
    pub discount_value: Option<f64>,
    pub seasonal_discount_active: Option<bool>,
}

impl DiscountRequestBody {
    /// Field checks first, then discount type parsing.
    pub fn validate(self) -> Result<DiscountRequest, DomainError> {
        let mut errors = FieldErrors::new();

        if self.product_id.is_none() {
            errors.insert("productId".to_string(), "Product ID is required".to_string());
        }
        if self.discount_type.is_none() {
            errors.insert("discountType".to_string(), "Discount type is required".to_string());
        }
        match self.discount_value {
            None => {
                errors.insert("discountValue".to_string(), "Discount value is required".to_string());
            }
            Some(v) if v < 0.0 => {
                errors.insert(
                    "discountValue".to_string(),
                    "Discount value must be non-negative".to_string(),
                );
            }
            Some(_) => {}
        }

        match (self.product_id, self.discount_type, self.discount_value) {
            (Some(product_id), Some(discount_type), Some(discount_value)) if errors.is_empty() => {
                let discount_type: DiscountType = discount_type.parse()?;
                DiscountRequest::new(
                    ProductId::new(product_id),
                    discount_type,
                    discount_value,
                    self.seasonal_discount_active,
                )
            }
            _ => Err(DomainError::Validation(errors)),
        }
    }
}
