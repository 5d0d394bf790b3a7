use serde::{Deserialize, Serialize};

use pricewise_core::{Entity, ProductId};

use crate::season::Season;

/// A sellable product and its current (possibly already discounted) price.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    id: ProductId,
    name: String,
    price: f64,
    quantity: i32,
    seasonal_discount_active: bool,
    season: Option<Season>,
}

impl Product {
    pub fn new(id: ProductId, name: impl Into<String>, price: f64, quantity: i32) -> Self {
        Self {
            id,
            name: name.into(),
            price,
            quantity,
            seasonal_discount_active: false,
            season: None,
        }
    }

    pub fn with_seasonal_discount_active(mut self, active: bool) -> Self {
        self.seasonal_discount_active = active;
        self
    }

    pub fn with_season(mut self, season: Season) -> Self {
        self.season = Some(season);
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn price(&self) -> f64 {
        self.price
    }

    pub fn quantity(&self) -> i32 {
        self.quantity
    }

    pub fn seasonal_discount_active(&self) -> bool {
        self.seasonal_discount_active
    }

    pub fn season(&self) -> Option<&Season> {
        self.season.as_ref()
    }

    /// Stock check gate: nothing can be discounted once quantity hits zero.
    pub fn is_in_stock(&self) -> bool {
        self.quantity > 0
    }

    /// Products without a season are candidates for automatic assignment.
    pub fn needs_season(&self) -> bool {
        self.season.is_none()
    }

    /// Record the outcome of a discount application.
    pub fn apply_discount_result(&mut self, final_price: f64, seasonal_discount_active: bool) {
        self.price = final_price;
        self.seasonal_discount_active = seasonal_discount_active;
    }

    pub fn assign_season(&mut self, season: Season) {
        self.season = Some(season);
    }
}

impl Entity for Product {
    type Id = ProductId;

    fn id(&self) -> Self::Id {
        self.id
    }
}
