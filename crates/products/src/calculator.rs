//! Discounted price calculation.
//!
//! Order of operations:
//!
//! ```text
//! product.price
//!   ↓ base discount (PERCENTAGE: -price*v/100, FLAT: -v)
//!   ↓ seasonal discount (-price*rate/100), only when eligible
//!   ↓ clamp at 0
//!   ↓ round half-up to cents
//! final price
//! ```
//!
//! The seasonal discount is always taken from the base-discounted price.

use chrono::NaiveDate;
use rust_decimal::Decimal;

use crate::discount::{DiscountRequest, DiscountType};
use crate::eligibility::Eligibility;
use crate::money::{reduce_by_percent, to_decimal, to_f64};
use crate::product::Product;

/// Every intermediate step of one price computation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PriceBreakdown {
    pub original_price: f64,
    pub discount_type: DiscountType,
    /// Price after the base discount, before clamping (may be negative).
    pub after_base_discount: f64,
    pub eligibility: Eligibility,
    /// Price after the seasonal step, before clamping.
    pub after_seasonal_discount: f64,
    /// The unclamped result was negative and was raised to zero.
    pub clamped: bool,
    pub final_price: f64,
}

/// Stateless price calculator.
#[derive(Debug, Default, Copy, Clone)]
pub struct DiscountCalculator;

impl DiscountCalculator {
    /// Final price for `product` under `request`, as of `today`.
    pub fn compute_price(product: &Product, request: &DiscountRequest, today: NaiveDate) -> f64 {
        Self::breakdown(product, request, today).final_price
    }

    /// Same computation as [`compute_price`](Self::compute_price), keeping intermediates.
    pub fn breakdown(product: &Product, request: &DiscountRequest, today: NaiveDate) -> PriceBreakdown {
        let original = to_decimal(product.price());
        let value = to_decimal(request.discount_value());

        let after_base = match request.discount_type() {
            DiscountType::Percentage => reduce_by_percent(original, value),
            DiscountType::Flat => original.checked_sub(value).unwrap_or(Decimal::MIN),
        };

        let eligibility = Eligibility::evaluate(product, request.seasonal_discount_active(), today);
        let after_seasonal = match eligibility.rate() {
            Some(rate) => reduce_by_percent(after_base, to_decimal(rate)),
            None => after_base,
        };

        let clamped = after_seasonal < Decimal::ZERO;
        let final_price = if clamped { Decimal::ZERO } else { after_seasonal };

        PriceBreakdown {
            original_price: product.price(),
            discount_type: request.discount_type(),
            after_base_discount: to_f64(after_base),
            eligibility,
            after_seasonal_discount: to_f64(after_seasonal),
            clamped,
            final_price: to_f64(final_price),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::season::Season;
    use pricewise_core::{ProductId, SeasonId};

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 6, 15).unwrap()
    }

    fn current_season(rate: f64) -> Season {
        Season::new(
            SeasonId::new(1),
            "Summer",
            NaiveDate::from_ymd_opt(2025, 6, 1),
            NaiveDate::from_ymd_opt(2025, 8, 31),
            rate,
        )
    }

    fn product(price: f64) -> Product {
        Product::new(ProductId::new(1), "Widget", price, 5)
    }

    fn request(discount_type: DiscountType, value: f64, seasonal: Option<bool>) -> DiscountRequest {
        DiscountRequest::new(ProductId::new(1), discount_type, value, seasonal).unwrap()
    }

    #[test]
    fn percentage_discount_without_season() {
        let price = DiscountCalculator::compute_price(
            &product(100.0),
            &request(DiscountType::Percentage, 10.0, Some(false)),
            today(),
        );
        assert_eq!(price, 90.0);
    }

    #[test]
    fn flat_discount_larger_than_price_clamps_to_zero() {
        let breakdown = DiscountCalculator::breakdown(
            &product(100.0),
            &request(DiscountType::Flat, 150.0, None),
            today(),
        );
        assert_eq!(breakdown.after_base_discount, -50.0);
        assert!(breakdown.clamped);
        assert_eq!(breakdown.final_price, 0.0);
    }

    #[test]
    fn seasonal_discount_stacks_on_base_discount() {
        let product = product(200.0)
            .with_seasonal_discount_active(true)
            .with_season(current_season(20.0));
        let breakdown = DiscountCalculator::breakdown(
            &product,
            &request(DiscountType::Percentage, 10.0, Some(true)),
            today(),
        );
        assert_eq!(breakdown.after_base_discount, 180.0);
        assert_eq!(breakdown.eligibility, Eligibility::Eligible { rate: 20.0 });
        assert_eq!(breakdown.final_price, 144.0);
    }

    #[test]
    fn seasonal_discount_applies_after_flat_discount() {
        let product = product(100.0)
            .with_seasonal_discount_active(true)
            .with_season(current_season(20.0));
        let price = DiscountCalculator::compute_price(
            &product,
            &request(DiscountType::Flat, 10.0, Some(true)),
            today(),
        );
        // (100 - 10) * 0.8, not 100 * 0.8 - 10
        assert_eq!(price, 72.0);
        assert_ne!(price, 70.0);
    }

    #[test]
    fn any_failed_condition_yields_pre_seasonal_price() {
        let eligible = product(200.0)
            .with_seasonal_discount_active(true)
            .with_season(current_season(20.0));
        let base = request(DiscountType::Percentage, 10.0, Some(true));

        let mut undated = current_season(20.0);
        undated.end_date = None;

        let cases = [
            (eligible.clone(), request(DiscountType::Percentage, 10.0, None), today()),
            (eligible.clone(), request(DiscountType::Percentage, 10.0, Some(false)), today()),
            (eligible.clone().with_seasonal_discount_active(false), base.clone(), today()),
            (product(200.0).with_seasonal_discount_active(true), base.clone(), today()),
            (eligible.clone().with_season(undated), base.clone(), today()),
            (eligible.clone(), base.clone(), NaiveDate::from_ymd_opt(2025, 9, 1).unwrap()),
        ];

        for (product, request, day) in cases {
            assert_eq!(DiscountCalculator::compute_price(&product, &request, day), 180.0);
        }
    }

    #[test]
    fn result_is_rounded_half_up_to_cents() {
        // 33.33 * (1 - 0.15) = 28.3305
        let price = DiscountCalculator::compute_price(
            &product(33.33),
            &request(DiscountType::Percentage, 15.0, None),
            today(),
        );
        assert_eq!(price, 28.33);

        // 10.01 * 0.5 = 5.005 -> 5.01
        let price = DiscountCalculator::compute_price(
            &product(10.01),
            &request(DiscountType::Percentage, 50.0, None),
            today(),
        );
        assert_eq!(price, 5.01);
    }

    #[test]
    fn zero_percent_keeps_price() {
        let price = DiscountCalculator::compute_price(
            &product(19.99),
            &request(DiscountType::Percentage, 0.0, None),
            today(),
        );
        assert_eq!(price, 19.99);
    }

    #[test]
    fn discounts_beyond_decimal_range_still_clamp_to_zero() {
        for discount_type in [DiscountType::Flat, DiscountType::Percentage] {
            let price = DiscountCalculator::compute_price(
                &product(100.0),
                &request(discount_type, 1e30, None),
                today(),
            );
            assert_eq!(price, 0.0, "{discount_type} 1e30 on 100");
        }
    }

    #[test]
    fn price_beyond_decimal_range_is_not_zeroed() {
        let price = DiscountCalculator::compute_price(
            &product(1e29),
            &request(DiscountType::Percentage, 0.0, None),
            today(),
        );
        assert!(price > 7.9e28);
    }

    #[cfg(test)]
    mod proptest_tests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #![proptest_config(ProptestConfig {
                cases: 1000,
                ..ProptestConfig::default()
            })]

            /// Property: percentage discounts in [0, 100] never go below zero
            /// nor above the original price, and land on whole cents.
            #[test]
            fn percentage_result_is_bounded_and_rounded(
                cents in 0u64..100_000_000u64,
                pct in 0u32..=100u32,
            ) {
                let price = cents as f64 / 100.0;
                let result = DiscountCalculator::compute_price(
                    &product(price),
                    &request(DiscountType::Percentage, pct as f64, None),
                    today(),
                );

                let expected = to_f64(reduce_by_percent(to_decimal(price), Decimal::from(pct)));
                prop_assert_eq!(result, expected);
                prop_assert!(result >= 0.0);
                prop_assert!(result <= price);
                prop_assert!(((result * 100.0).round() - result * 100.0).abs() < 1e-6);
            }

            /// Property: a flat discount at least as large as the price yields zero.
            #[test]
            fn flat_at_or_above_price_is_zero(
                cents in 0u64..100_000_000u64,
                extra in 0u64..100_000u64,
            ) {
                let price = cents as f64 / 100.0;
                let discount = (cents + extra) as f64 / 100.0;
                let result = DiscountCalculator::compute_price(
                    &product(price),
                    &request(DiscountType::Flat, discount, None),
                    today(),
                );
                prop_assert_eq!(result, 0.0);
            }

            /// Property: the calculator never returns a negative price.
            #[test]
            fn never_negative(
                price in 0.0f64..1_000_000.0,
                value in 0.0f64..10_000_000.0,
                flat in any::<bool>(),
                rate in 0.0f64..=100.0,
                seasonal in any::<bool>(),
            ) {
                let discount_type = if flat { DiscountType::Flat } else { DiscountType::Percentage };
                let product = product(price)
                    .with_seasonal_discount_active(true)
                    .with_season(current_season(rate));
                let result = DiscountCalculator::compute_price(
                    &product,
                    &request(discount_type, value, Some(seasonal)),
                    today(),
                );
                prop_assert!(result >= 0.0);
            }
        }
    }
}
