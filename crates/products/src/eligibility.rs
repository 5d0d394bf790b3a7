//! Seasonal discount eligibility.
//!
//! A product earns its season's discount only when every condition holds:
//! the caller asked for it, the product has seasonal discounts switched on, the
//! product has a season with both dates set, and today falls inside that
//! season (bounds inclusive).

use chrono::NaiveDate;

use crate::product::Product;

/// Outcome of the eligibility check, with the first failing condition.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Eligibility {
    /// Seasonal discount applies at `rate` percent.
    Eligible { rate: f64 },
    /// The request flag was absent or false.
    NotRequested,
    /// The product's own seasonal flag is off.
    ProductFlagOff,
    /// The product has no season.
    NoSeason,
    /// The season is missing a start or end date.
    SeasonUndated,
    /// Today is outside the season window.
    OutOfSeason,
}

impl Eligibility {
    pub fn evaluate(product: &Product, requested: Option<bool>, today: NaiveDate) -> Self {
        if requested != Some(true) {
            return Eligibility::NotRequested;
        }
        if !product.seasonal_discount_active() {
            return Eligibility::ProductFlagOff;
        }
        let Some(season) = product.season() else {
            return Eligibility::NoSeason;
        };
        if !season.is_dated() {
            return Eligibility::SeasonUndated;
        }
        if !season.covers(today) {
            return Eligibility::OutOfSeason;
        }
        Eligibility::Eligible {
            rate: season.discount_rate,
        }
    }

    pub fn is_eligible(&self) -> bool {
        matches!(self, Eligibility::Eligible { .. })
    }

    /// Seasonal rate to apply, if eligible.
    pub fn rate(&self) -> Option<f64> {
        match self {
            Eligibility::Eligible { rate } => Some(*rate),
            _ => None,
        }
    }
}

/// Pure predicate form of [`Eligibility::evaluate`].
pub fn is_eligible(product: &Product, requested: Option<bool>, today: NaiveDate) -> bool {
    Eligibility::evaluate(product, requested, today).is_eligible()
}
