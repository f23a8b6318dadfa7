use async_trait::async_trait;
use horizon_core::repository::{decode_blob, encode_blob, BOOKINGS_BLOB, FLIGHTS_BLOB};
use horizon_core::{LedgerSnapshot, LedgerStore, StoreError};
use horizon_shared::{Booking, Flight};
use sqlx::postgres::PgPoolOptions;
use sqlx::{Pool, Postgres};
use std::time::Duration;
use tracing::{debug, info};

const CREATE_TABLE: &str = r#"
    CREATE TABLE IF NOT EXISTS ledger_blobs (
        name TEXT PRIMARY KEY,
        payload TEXT NOT NULL,
        updated_at TIMESTAMPTZ NOT NULL DEFAULT now()
    )
"#;

const UPSERT_BLOB: &str = r#"
    INSERT INTO ledger_blobs (name, payload, updated_at)
    VALUES ($1, $2, now())
    ON CONFLICT (name) DO UPDATE
    SET payload = EXCLUDED.payload, updated_at = EXCLUDED.updated_at
"#;

/// Both blobs as rows of `ledger_blobs`, replaced together in one transaction
#[derive(Clone)]
pub struct PostgresStore {
    pool: Pool<Postgres>,
}

impl PostgresStore {
    pub async fn connect(connection_string: &str) -> Result<Self, StoreError> {
        let pool = PgPoolOptions::new()
            .max_connections(5)
            .acquire_timeout(Duration::from_secs(3))
            .connect(connection_string)
            .await
            .map_err(StoreError::backend)?;

        let store = Self { pool };
        store.ensure_schema().await?;
        Ok(store)
    }

    async fn ensure_schema(&self) -> Result<(), StoreError> {
        info!("Ensuring ledger_blobs table exists...");
        sqlx::query(CREATE_TABLE)
            .execute(&self.pool)
            .await
            .map_err(StoreError::backend)?;
        Ok(())
    }

    async fn read_blob(&self, name: &str) -> Result<Option<String>, StoreError> {
        sqlx::query_scalar::<_, String>("SELECT payload FROM ledger_blobs WHERE name = $1")
            .bind(name)
            .fetch_optional(&self.pool)
            .await
            .map_err(StoreError::backend)
    }
}

#[async_trait]
impl LedgerStore for PostgresStore {
    async fn load(&self) -> Result<LedgerSnapshot, StoreError> {
        let flights = self.read_blob(FLIGHTS_BLOB).await?;
        let bookings = self.read_blob(BOOKINGS_BLOB).await?;
        Ok(LedgerSnapshot {
            flights: decode_blob(flights.as_deref())?,
            bookings: decode_blob(bookings.as_deref())?,
        })
    }

    async fn save(&self, flights: &[Flight], bookings: &[Booking]) -> Result<(), StoreError> {
        let flights = encode_blob(flights)?;
        let bookings = encode_blob(bookings)?;

        let mut tx = self.pool.begin().await.map_err(StoreError::backend)?;
        for (name, payload) in [(FLIGHTS_BLOB, flights), (BOOKINGS_BLOB, bookings)] {
            sqlx::query(UPSERT_BLOB)
                .bind(name)
                .bind(payload)
                .execute(&mut *tx)
                .await
                .map_err(StoreError::backend)?;
        }
        tx.commit().await.map_err(StoreError::backend)?;

        debug!("Ledger written to postgres");
        Ok(())
    }

    fn name(&self) -> &'static str {
        "postgres"
    }
}
