//! Fallback season assignment for products that have none.
//!
//! Products without a season get one of the seasons in
//! [`AUTO_ASSIGN_SEASON_IDS`], chosen at random, the first time a discount is
//! applied to them. This is existing behaviour clients depend on, not a
//! pricing rule; it lives behind [`SeasonPicker`] so it can be replaced or made
//! deterministic without touching the calculator.

use std::sync::Mutex;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use pricewise_core::SeasonId;

/// Candidate seasons for automatic assignment.
pub const AUTO_ASSIGN_SEASON_IDS: [SeasonId; 3] = [SeasonId::new(1), SeasonId::new(2), SeasonId::new(3)];

/// Chooses which season to attach to a season-less product.
pub trait SeasonPicker: Send + Sync {
    fn pick(&self) -> SeasonId;
}

impl<P> SeasonPicker for std::sync::Arc<P>
where
    P: SeasonPicker + ?Sized,
{
    fn pick(&self) -> SeasonId {
        (**self).pick()
    }
}

/// Uniform pick over [`AUTO_ASSIGN_SEASON_IDS`].
#[derive(Debug)]
pub struct RandomSeasonPicker {
    rng: Mutex<StdRng>,
}

impl RandomSeasonPicker {
    /// Entropy-seeded picker.
    pub fn new() -> Self {
        Self {
            rng: Mutex::new(StdRng::from_entropy()),
        }
    }

    /// Reproducible sequence of picks for a given seed.
    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: Mutex::new(StdRng::seed_from_u64(seed)),
        }
    }
}

impl Default for RandomSeasonPicker {
    fn default() -> Self {
        Self::new()
    }
}

impl SeasonPicker for RandomSeasonPicker {
    fn pick(&self) -> SeasonId {
        let idx = match self.rng.lock() {
            Ok(mut rng) => rng.gen_range(0..AUTO_ASSIGN_SEASON_IDS.len()),
            // A poisoned lock still holds a usable RNG.
            Err(poisoned) => poisoned.into_inner().gen_range(0..AUTO_ASSIGN_SEASON_IDS.len()),
        };
        AUTO_ASSIGN_SEASON_IDS[idx]
    }
}

/// Always picks the same season.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct FixedSeasonPicker(pub SeasonId);

impl SeasonPicker for FixedSeasonPicker {
    fn pick(&self) -> SeasonId {
        self.0
    }
}
