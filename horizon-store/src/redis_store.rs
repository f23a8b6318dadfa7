use async_trait::async_trait;
use horizon_core::repository::{decode_blob, encode_blob, BOOKINGS_BLOB, FLIGHTS_BLOB};
use horizon_core::{LedgerSnapshot, LedgerStore, StoreError};
use horizon_shared::{Booking, Flight};
use redis::AsyncCommands;
use tracing::{debug, info};

/// Blobs live under `<prefix>:flights` and `<prefix>:bookings`
pub struct RedisStore {
    client: redis::Client,
    prefix: String,
}

impl RedisStore {
    pub fn new(connection_string: &str, prefix: &str) -> Result<Self, StoreError> {
        let client = redis::Client::open(connection_string).map_err(StoreError::backend)?;
        info!("Redis store with key prefix {}", prefix);
        Ok(Self {
            client,
            prefix: prefix.to_string(),
        })
    }

    fn key(&self, blob: &str) -> String {
        format!("{}:{}", self.prefix, blob)
    }

    async fn connection(&self) -> Result<redis::aio::MultiplexedConnection, StoreError> {
        self.client
            .get_multiplexed_async_connection()
            .await
            .map_err(StoreError::backend)
    }
}

#[async_trait]
impl LedgerStore for RedisStore {
    async fn load(&self) -> Result<LedgerSnapshot, StoreError> {
        let mut conn = self.connection().await?;
        let flights: Option<String> = conn
            .get(self.key(FLIGHTS_BLOB))
            .await
            .map_err(StoreError::backend)?;
        let bookings: Option<String> = conn
            .get(self.key(BOOKINGS_BLOB))
            .await
            .map_err(StoreError::backend)?;

        Ok(LedgerSnapshot {
            flights: decode_blob(flights.as_deref())?,
            bookings: decode_blob(bookings.as_deref())?,
        })
    }

    async fn save(&self, flights: &[Flight], bookings: &[Booking]) -> Result<(), StoreError> {
        let flights = encode_blob(flights)?;
        let bookings = encode_blob(bookings)?;
        let mut conn = self.connection().await?;

        // MULTI/EXEC so readers never see one blob without the other
        let _: () = redis::pipe()
            .atomic()
            .set(self.key(FLIGHTS_BLOB), flights)
            .ignore()
            .set(self.key(BOOKINGS_BLOB), bookings)
            .ignore()
            .query_async(&mut conn)
            .await
            .map_err(StoreError::backend)?;

        debug!("Ledger written to redis under {}", self.prefix);
        Ok(())
    }

    fn name(&self) -> &'static str {
        "redis"
    }
}
