use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use pricewise_core::{Entity, SeasonId};

/// A time-bounded sale period carrying an extra percentage discount.
///
/// Read-only from the pricing domain's point of view. Either bound may be
/// missing in storage; an undated season never grants a discount.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Season {
    pub id: SeasonId,
    pub name: String,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    /// Percentage, 0-100.
    pub discount_rate: f64,
}

impl Season {
    pub fn new(
        id: SeasonId,
        name: impl Into<String>,
        start_date: Option<NaiveDate>,
        end_date: Option<NaiveDate>,
        discount_rate: f64,
    ) -> Self {
        Self {
            id,
            name: name.into(),
            start_date,
            end_date,
            discount_rate,
        }
    }

    /// Both bounds are set.
    pub fn is_dated(&self) -> bool {
        self.start_date.is_some() && self.end_date.is_some()
    }

    /// `date` falls within `[start_date, end_date]`, bounds inclusive.
    pub fn covers(&self, date: NaiveDate) -> bool {
        match (self.start_date, self.end_date) {
            (Some(start), Some(end)) => start <= date && date <= end,
            _ => false,
        }
    }
}

impl Entity for Season {
    type Id = SeasonId;

    fn id(&self) -> Self::Id {
        self.id
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn winter() -> Season {
        Season::new(
            SeasonId::new(1),
            "Winter",
            Some(date(2024, 12, 1)),
            Some(date(2025, 2, 28)),
            15.0,
        )
    }

    #[test]
    fn covers_is_inclusive_on_both_ends() {
        let season = winter();
        assert!(season.covers(date(2024, 12, 1)));
        assert!(season.covers(date(2025, 1, 15)));
        assert!(season.covers(date(2025, 2, 28)));
        assert!(!season.covers(date(2024, 11, 30)));
        assert!(!season.covers(date(2025, 3, 1)));
    }

    #[test]
    fn undated_season_covers_nothing() {
        let mut season = winter();
        season.end_date = None;
        assert!(!season.is_dated());
        assert!(!season.covers(date(2025, 1, 15)));
    }

    #[test]
    fn json_uses_camel_case() {
        let json = serde_json::to_value(winter()).unwrap();
        assert_eq!(json["startDate"], "2024-12-01");
        assert_eq!(json["discountRate"], 15.0);
    }
}
