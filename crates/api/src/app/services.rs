//! Service wiring: picks stores, clock and season picker from configuration.

use std::sync::Arc;

use chrono::{Datelike, NaiveDate};
use tracing::info;

use pricewise_core::{Clock, ProductId, SeasonId, SystemClock};
use pricewise_infra::{
    DiscountService, InMemoryProductStore, InMemorySeasonStore, PostgresStore, ProductStore,
    SeasonStore, StoreError,
};
use pricewise_products::{Product, RandomSeasonPicker, Season, SeasonPicker};

use crate::config::{AppConfig, Persistence};

pub type DynDiscountService =
    DiscountService<Arc<dyn ProductStore>, Arc<dyn SeasonStore>, Arc<dyn Clock>, Arc<dyn SeasonPicker>>;

/// Shared state handed to every handler through an `Extension`.
pub struct AppServices {
    pub discounts: DynDiscountService,
}

impl AppServices {
    pub fn new(
        products: Arc<dyn ProductStore>,
        seasons: Arc<dyn SeasonStore>,
        clock: Arc<dyn Clock>,
        picker: Arc<dyn SeasonPicker>,
    ) -> Self {
        Self {
            discounts: DiscountService::new(products, seasons, clock, picker),
        }
    }

    /// In-memory wiring over caller-owned stores.
    pub fn in_memory(
        products: Arc<InMemoryProductStore>,
        seasons: Arc<InMemorySeasonStore>,
        clock: Arc<dyn Clock>,
        picker: Arc<dyn SeasonPicker>,
    ) -> Self {
        Self::new(products, seasons, clock, picker)
    }
}

pub async fn build_services(config: &AppConfig) -> Result<AppServices, StoreError> {
    let clock: Arc<dyn Clock> = Arc::new(SystemClock);
    let picker: Arc<dyn SeasonPicker> = match config.season_picker_seed {
        Some(seed) => Arc::new(RandomSeasonPicker::seeded(seed)),
        None => Arc::new(RandomSeasonPicker::new()),
    };

    match &config.persistence {
        Persistence::Postgres { database_url } => {
            let store = Arc::new(PostgresStore::connect(database_url).await?);
            store.migrate().await?;
            info!("using postgres stores");
            Ok(AppServices::new(store.clone(), store, clock, picker))
        }
        Persistence::InMemory { seed_demo_data } => {
            let products = Arc::new(InMemoryProductStore::new());
            let seasons = Arc::new(InMemorySeasonStore::new());
            if *seed_demo_data {
                seed_demo(&products, &seasons, clock.today().year())?;
                let seeded = products.len()?;
                info!(products = seeded, "seeded demo data");
            }
            info!("using in-memory stores");
            Ok(AppServices::in_memory(products, seasons, clock, picker))
        }
    }
}

/// Seasons 1-3 (the auto-assignment pool) plus a handful of products.
fn seed_demo(
    products: &InMemoryProductStore,
    seasons: &InMemorySeasonStore,
    year: i32,
) -> Result<(), StoreError> {
    let date = |month, day| NaiveDate::from_ymd_opt(year, month, day);

    seasons.insert(Season::new(SeasonId::new(1), "Summer", date(6, 1), date(8, 31), 20.0))?;
    seasons.insert(Season::new(SeasonId::new(2), "Autumn", date(9, 1), date(11, 30), 10.0))?;
    seasons.insert(Season::new(SeasonId::new(3), "Spring", date(3, 1), date(5, 31), 15.0))?;

    products.insert(Product::new(ProductId::new(1), "Widget", 100.0, 10))?;
    products.insert(Product::new(ProductId::new(2), "Gadget", 200.0, 5))?;
    products.insert(Product::new(ProductId::new(3), "Gizmo", 50.0, 0))?;
    Ok(())
}
