//! Postgres-backed product and season stores.
//!
//! ## Schema
//!
//! ```text
//! seasons (id BIGSERIAL PK, name, start_date DATE, end_date DATE, discount_rate DOUBLE)
//! products (id BIGSERIAL PK, name, price DOUBLE, quantity INT,
//!           seasonal_discount_active BOOL, season_id BIGINT -> seasons.id)
//! ```
//!
//! Every column except the keys is nullable, matching rows written by older
//! clients. Missing values read back as empty name, zero price/quantity and an
//! inactive seasonal flag.
//!
//! ## Error Mapping
//!
//! | SQLx Error | StoreError |
//! |------------|------------|
//! | Database | `Database` |
//! | PoolClosed / PoolTimedOut / Io | `Unavailable` |
//! | ColumnDecode / Decode | `Corrupt` |
//! | Other | `Database` |

use async_trait::async_trait;
use chrono::NaiveDate;
use sqlx::postgres::PgPoolOptions;
use sqlx::{PgPool, Row};
use tracing::instrument;

use pricewise_core::{Entity, ProductId, SeasonId};
use pricewise_products::{Product, Season};

use super::{ProductStore, SeasonStore, StoreError};

const SCHEMA: &[&str] = &[
    r#"
    CREATE TABLE IF NOT EXISTS seasons (
        id BIGSERIAL PRIMARY KEY,
        name TEXT,
        start_date DATE,
        end_date DATE,
        discount_rate DOUBLE PRECISION
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS products (
        id BIGSERIAL PRIMARY KEY,
        name TEXT,
        price DOUBLE PRECISION,
        quantity INTEGER,
        seasonal_discount_active BOOLEAN,
        season_id BIGINT REFERENCES seasons (id)
    )
    "#,
];

/// Postgres store serving both products and seasons from one pool.
///
/// `PgPool` is internally reference counted, so cloning the store is cheap.
#[derive(Debug, Clone)]
pub struct PostgresStore {
    pool: PgPool,
}

impl PostgresStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn connect(database_url: &str) -> Result<Self, StoreError> {
        let pool = PgPoolOptions::new()
            .max_connections(10)
            .connect(database_url)
            .await
            .map_err(|e| map_sqlx_error("connect", e))?;
        Ok(Self::new(pool))
    }

    /// Create the tables if they do not exist yet. Idempotent.
    pub async fn migrate(&self) -> Result<(), StoreError> {
        for statement in SCHEMA {
            sqlx::query(statement)
                .execute(&self.pool)
                .await
                .map_err(|e| map_sqlx_error("migrate", e))?;
        }
        Ok(())
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }
}

#[async_trait]
impl ProductStore for PostgresStore {
    #[instrument(skip(self), fields(product_id = %id))]
    async fn find_by_id(&self, id: ProductId) -> Result<Option<Product>, StoreError> {
        let row = sqlx::query(
            r#"
            SELECT
                p.id,
                p.name,
                p.price,
                p.quantity,
                p.seasonal_discount_active,
                s.id AS season_id,
                s.name AS season_name,
                s.start_date,
                s.end_date,
                s.discount_rate
            FROM products p
            LEFT JOIN seasons s ON s.id = p.season_id
            WHERE p.id = $1
            "#,
        )
        .bind(id.get())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| map_sqlx_error("find_product", e))?;

        let Some(row) = row else {
            return Ok(None);
        };

        let decode = |e: sqlx::Error| map_sqlx_error("find_product", e);

        let name: Option<String> = row.try_get("name").map_err(decode)?;
        let price: Option<f64> = row.try_get("price").map_err(decode)?;
        let quantity: Option<i32> = row.try_get("quantity").map_err(decode)?;
        let active: Option<bool> = row.try_get("seasonal_discount_active").map_err(decode)?;

        let mut product = Product::new(
            id,
            name.unwrap_or_default(),
            price.unwrap_or(0.0),
            quantity.unwrap_or(0),
        )
        .with_seasonal_discount_active(active.unwrap_or(false));

        let season_id: Option<i64> = row.try_get("season_id").map_err(decode)?;
        if let Some(season_id) = season_id {
            let season_name: Option<String> = row.try_get("season_name").map_err(decode)?;
            let start_date: Option<NaiveDate> = row.try_get("start_date").map_err(decode)?;
            let end_date: Option<NaiveDate> = row.try_get("end_date").map_err(decode)?;
            let rate: Option<f64> = row.try_get("discount_rate").map_err(decode)?;
            product.assign_season(Season::new(
                SeasonId::new(season_id),
                season_name.unwrap_or_default(),
                start_date,
                end_date,
                rate.unwrap_or(0.0),
            ));
        }

        Ok(Some(product))
    }

    #[instrument(skip(self, product), fields(product_id = %product.id()))]
    async fn save(&self, product: Product) -> Result<Product, StoreError> {
        sqlx::query(
            r#"
            INSERT INTO products (id, name, price, quantity, seasonal_discount_active, season_id)
            VALUES ($1, $2, $3, $4, $5, $6)
            ON CONFLICT (id) DO UPDATE SET
                name = EXCLUDED.name,
                price = EXCLUDED.price,
                quantity = EXCLUDED.quantity,
                seasonal_discount_active = EXCLUDED.seasonal_discount_active,
                season_id = EXCLUDED.season_id
            "#,
        )
        .bind(product.id().get())
        .bind(product.name())
        .bind(product.price())
        .bind(product.quantity())
        .bind(product.seasonal_discount_active())
        .bind(product.season().map(|s| s.id.get()))
        .execute(&self.pool)
        .await
        .map_err(|e| map_sqlx_error("save_product", e))?;

        Ok(product)
    }
}

#[async_trait]
impl SeasonStore for PostgresStore {
    #[instrument(skip(self), fields(season_id = %id))]
    async fn find_by_id(&self, id: SeasonId) -> Result<Option<Season>, StoreError> {
        let row = sqlx::query(
            r#"
            SELECT id, name, start_date, end_date, discount_rate
            FROM seasons
            WHERE id = $1
            "#,
        )
        .bind(id.get())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| map_sqlx_error("find_season", e))?;

        let Some(row) = row else {
            return Ok(None);
        };

        let decode = |e: sqlx::Error| map_sqlx_error("find_season", e);
        let name: Option<String> = row.try_get("name").map_err(decode)?;
        let start_date: Option<NaiveDate> = row.try_get("start_date").map_err(decode)?;
        let end_date: Option<NaiveDate> = row.try_get("end_date").map_err(decode)?;
        let rate: Option<f64> = row.try_get("discount_rate").map_err(decode)?;

        Ok(Some(Season::new(
            id,
            name.unwrap_or_default(),
            start_date,
            end_date,
            rate.unwrap_or(0.0),
        )))
    }
}

fn map_sqlx_error(operation: &str, err: sqlx::Error) -> StoreError {
    match err {
        sqlx::Error::Database(db_err) => StoreError::Database {
            operation: operation.to_string(),
            message: db_err.message().to_string(),
        },
        sqlx::Error::PoolClosed | sqlx::Error::PoolTimedOut => {
            StoreError::Unavailable(format!("connection pool unavailable in {}", operation))
        }
        sqlx::Error::Io(e) => StoreError::Unavailable(format!("io error in {}: {}", operation, e)),
        sqlx::Error::ColumnDecode { index, source } => {
            StoreError::Corrupt(format!("column {} in {}: {}", index, operation, source))
        }
        sqlx::Error::Decode(e) => StoreError::Corrupt(format!("decode error in {}: {}", operation, e)),
        other => StoreError::Database {
            operation: operation.to_string(),
            message: other.to_string(),
        },
    }
}
