//! Discount application pipeline (application-level orchestration).
//!
//! ```text
//! DiscountRequest
//!   ↓
//! 1. Load product (ProductNotFound)
//!   ↓
//! 2. Stock gate (ProductOutOfStock when quantity <= 0)
//!   ↓
//! 3. Compute price (pure, DiscountCalculator)
//!   ↓
//! 4. Update price + seasonal flag, auto-assign a season if the product has none
//!   ↓
//! 5. Save and respond from the saved product
//! ```
//!
//! The calculator stays pure; every log line about a discount is emitted here.
//! There is no locking around steps 1-5: concurrent requests for the same
//! product can interleave and the last save wins.

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, error, info, instrument, warn};

use pricewise_core::{Clock, DomainError, Entity, ProductId};
use pricewise_products::{DiscountCalculator, DiscountRequest, Product, SeasonPicker};

use crate::store::{ProductStore, SeasonStore, StoreError};

/// Response shape shared by the discount and lookup operations.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductResponse {
    pub product_id: ProductId,
    pub product_name: String,
    pub final_price: f64,
}

impl From<&Product> for ProductResponse {
    fn from(product: &Product) -> Self {
        Self {
            product_id: product.id(),
            product_name: product.name().to_string(),
            final_price: product.price(),
        }
    }
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ServiceError {
    #[error(transparent)]
    Domain(#[from] DomainError),

    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Applies discounts to stored products.
///
/// - `P`: product store
/// - `S`: season store
/// - `C`: clock used for seasonal eligibility
/// - `K`: season picker used for automatic season assignment
#[derive(Debug)]
pub struct DiscountService<P, S, C, K> {
    products: P,
    seasons: S,
    clock: C,
    picker: K,
}

impl<P, S, C, K> DiscountService<P, S, C, K> {
    pub fn new(products: P, seasons: S, clock: C, picker: K) -> Self {
        Self {
            products,
            seasons,
            clock,
            picker,
        }
    }
}

impl<P, S, C, K> DiscountService<P, S, C, K>
where
    P: ProductStore,
    S: SeasonStore,
    C: Clock,
    K: SeasonPicker,
{
    #[instrument(
        skip(self, request),
        fields(
            product_id = %request.product_id(),
            discount_type = %request.discount_type(),
            discount_value = request.discount_value(),
        )
    )]
    pub async fn apply_discount(&self, request: &DiscountRequest) -> Result<ProductResponse, ServiceError> {
        info!("processing discount");

        let mut product = self.load(request.product_id()).await?;
        info!(
            product_name = product.name(),
            price = product.price(),
            quantity = product.quantity(),
            "product found"
        );

        if !product.is_in_stock() {
            warn!(product_name = product.name(), "product is out of stock");
            return Err(DomainError::out_of_stock(product.id()).into());
        }

        let today = self.clock.today();
        let breakdown = DiscountCalculator::breakdown(&product, request, today);
        debug!(
            original_price = breakdown.original_price,
            after_base_discount = breakdown.after_base_discount,
            "applied base discount"
        );
        match breakdown.eligibility.rate() {
            Some(rate) => info!(
                rate,
                after_seasonal_discount = breakdown.after_seasonal_discount,
                "seasonal discount applied"
            ),
            None => info!(reason = ?breakdown.eligibility, "no seasonal discount applied"),
        }
        if breakdown.clamped {
            warn!("computed price was negative, clamped to 0");
        }
        info!(final_price = breakdown.final_price, "final discounted price");

        let seasonal_flag = request.seasonal_discount_active().unwrap_or(false);
        product.apply_discount_result(breakdown.final_price, seasonal_flag);
        debug!(seasonal_discount_active = seasonal_flag, "updated product");

        if product.needs_season() {
            self.assign_fallback_season(&mut product).await?;
        }

        let saved = self.products.save(product).await?;
        let response = ProductResponse::from(&saved);
        info!(
            product_name = %response.product_name,
            final_price = response.final_price,
            "product saved"
        );
        Ok(response)
    }

    #[instrument(skip(self), fields(product_id = %id))]
    pub async fn get_product(&self, id: ProductId) -> Result<ProductResponse, ServiceError> {
        let product = self.load(id).await?;
        info!(product_name = product.name(), price = product.price(), "product details retrieved");
        Ok(ProductResponse::from(&product))
    }

    async fn load(&self, id: ProductId) -> Result<Product, ServiceError> {
        match self.products.find_by_id(id).await? {
            Some(product) => Ok(product),
            None => {
                error!(product_id = %id, "product not found");
                Err(DomainError::product_not_found(id).into())
            }
        }
    }

    /// Attach a picked season; a missing season leaves the product as is.
    async fn assign_fallback_season(&self, product: &mut Product) -> Result<(), StoreError> {
        let season_id = self.picker.pick();
        info!(season_id = %season_id, "picked fallback season");

        match self.seasons.find_by_id(season_id).await? {
            Some(season) => {
                info!(
                    season_id = %season.id,
                    season_name = %season.name,
                    product_name = product.name(),
                    "assigned season to product"
                );
                product.assign_season(season);
            }
            None => warn!(season_id = %season_id, "no season found, product left without season"),
        }
        Ok(())
    }
}
