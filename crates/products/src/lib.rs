//! Products pricing domain module.
//!
//! This crate contains the business rules for discounting products, implemented
//! purely as deterministic domain logic (no IO, no HTTP, no storage, no logging).
//! The only non-determinism, random season assignment, sits behind
//! [`SeasonPicker`].

pub mod calculator;
pub mod discount;
pub mod eligibility;
pub mod money;
pub mod product;
pub mod season;
pub mod season_assignment;

pub use calculator::{DiscountCalculator, PriceBreakdown};
pub use discount::{DiscountRequest, DiscountType};
pub use eligibility::{Eligibility, is_eligible};
pub use product::Product;
pub use season::Season;
pub use season_assignment::{
    AUTO_ASSIGN_SEASON_IDS, FixedSeasonPicker, RandomSeasonPicker, SeasonPicker,
};
