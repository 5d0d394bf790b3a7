//! Money arithmetic helpers.
//!
//! Prices are stored and serialized as `f64`, but every calculation runs on
//! `Decimal` and is rounded back to cents on the way out.

use rust_decimal::prelude::*;

/// Prices are rounded to cents.
pub const DECIMAL_PLACES: u32 = 2;

const HUNDRED: Decimal = Decimal::ONE_HUNDRED;

/// Convert f64 to Decimal for calculation.
///
/// NaN maps to zero. Values beyond the `Decimal` range (infinities included)
/// saturate to `Decimal::MAX` / `Decimal::MIN`, so an oversized discount still
/// drives the price to the floor instead of vanishing.
#[inline]
pub fn to_decimal(value: f64) -> Decimal {
    if value.is_nan() {
        return Decimal::ZERO;
    }
    Decimal::from_f64(value).unwrap_or(if value > 0.0 { Decimal::MAX } else { Decimal::MIN })
}

/// Round half-up to cents.
#[inline]
pub fn round_money(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(DECIMAL_PLACES, RoundingStrategy::MidpointAwayFromZero)
}

/// Convert Decimal back to f64 for storage, rounded to cents.
#[inline]
pub fn to_f64(value: Decimal) -> f64 {
    round_money(value).to_f64().unwrap_or_default()
}

/// `price - price * percent / 100`.
///
/// A reduction too large to represent can only come from a percentage far above
/// 100, which the non-negative floor turns into zero anyway.
pub fn reduce_by_percent(price: Decimal, percent: Decimal) -> Decimal {
    price
        .checked_mul(percent / HUNDRED)
        .and_then(|cut| price.checked_sub(cut))
        .unwrap_or(Decimal::ZERO)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rounds_midpoint_up() {
        let rounded = round_money(Decimal::new(19995, 3)); // 19.995
        assert_eq!(rounded, Decimal::new(2000, 2));
        assert_eq!(to_f64(Decimal::new(19995, 3)), 20.0);

        let rounded = round_money(Decimal::new(19994, 3)); // 19.994
        assert_eq!(rounded, Decimal::new(1999, 2));
    }

    #[test]
    fn nan_is_zero() {
        assert_eq!(to_decimal(f64::NAN), Decimal::ZERO);
    }

    #[test]
    fn out_of_range_input_saturates() {
        assert_eq!(to_decimal(1e30), Decimal::MAX);
        assert_eq!(to_decimal(f64::INFINITY), Decimal::MAX);
        assert_eq!(to_decimal(-1e30), Decimal::MIN);
        assert_eq!(to_decimal(f64::NEG_INFINITY), Decimal::MIN);
    }

    #[test]
    fn percent_reduction() {
        assert_eq!(reduce_by_percent(Decimal::from(200), Decimal::from(10)), Decimal::from(180));
        assert_eq!(reduce_by_percent(Decimal::from(50), Decimal::ZERO), Decimal::from(50));
        assert!(reduce_by_percent(Decimal::from(50), Decimal::from(150)) < Decimal::ZERO);
    }

    #[test]
    fn overflowing_percent_collapses_to_zero() {
        assert_eq!(reduce_by_percent(Decimal::MAX, Decimal::MAX), Decimal::ZERO);
    }
}
