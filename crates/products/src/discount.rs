use core::str::FromStr;

use serde::{Deserialize, Serialize};

use pricewise_core::{DomainError, DomainResult, ProductId};

/// How the base discount is expressed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum DiscountType {
    /// `discount_value` is a percentage of the current price.
    Percentage,
    /// `discount_value` is an absolute amount off the current price.
    Flat,
}

impl DiscountType {
    pub fn as_str(&self) -> &'static str {
        match self {
            DiscountType::Percentage => "PERCENTAGE",
            DiscountType::Flat => "FLAT",
        }
    }
}

impl core::fmt::Display for DiscountType {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DiscountType {
    type Err = DomainError;

    /// Case-insensitive; anything else is `InvalidDiscountType`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if trimmed.eq_ignore_ascii_case("PERCENTAGE") {
            Ok(DiscountType::Percentage)
        } else if trimmed.eq_ignore_ascii_case("FLAT") {
            Ok(DiscountType::Flat)
        } else {
            Err(DomainError::invalid_discount_type(trimmed))
        }
    }
}

/// A validated request to discount one product.
#[derive(Debug, Clone, PartialEq)]
pub struct DiscountRequest {
    product_id: ProductId,
    discount_type: DiscountType,
    discount_value: f64,
    seasonal_discount_active: Option<bool>,
}

impl DiscountRequest {
    /// Rejects negative and non-finite discount values.
    pub fn new(
        product_id: ProductId,
        discount_type: DiscountType,
        discount_value: f64,
        seasonal_discount_active: Option<bool>,
    ) -> DomainResult<Self> {
        if !discount_value.is_finite() {
            return Err(DomainError::validation(
                "discountValue",
                "Discount value must be a finite number",
            ));
        }
        if discount_value < 0.0 {
            return Err(DomainError::validation(
                "discountValue",
                "Discount value must be non-negative",
            ));
        }

        Ok(Self {
            product_id,
            discount_type,
            discount_value,
            seasonal_discount_active,
        })
    }

    pub fn product_id(&self) -> ProductId {
        self.product_id
    }

    pub fn discount_type(&self) -> DiscountType {
        self.discount_type
    }

    pub fn discount_value(&self) -> f64 {
        self.discount_value
    }

    /// The caller's seasonal flag; `None` means "not specified".
    pub fn seasonal_discount_active(&self) -> Option<bool> {
        self.seasonal_discount_active
    }
}
