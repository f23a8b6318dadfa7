use async_trait::async_trait;
use horizon_shared::{Booking, Flight};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Mutex;

/// Blob holding the flight catalog
pub const FLIGHTS_BLOB: &str = "flights";
/// Blob holding the booking ledger
pub const BOOKINGS_BLOB: &str = "bookings";

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Storage backend error: {0}")]
    Backend(String),
}

impl StoreError {
    pub fn backend(err: impl std::fmt::Display) -> Self {
        StoreError::Backend(err.to_string())
    }
}

/// Both collections as read from, or written to, durable storage
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LedgerSnapshot {
    pub flights: Vec<Flight>,
    pub bookings: Vec<Booking>,
}

/// Durable storage port for the ledger.
///
/// Implementations keep two named blobs and overwrite both in full on every
/// `save`. A blob that does not exist loads as an empty collection.
#[async_trait]
pub trait LedgerStore: Send + Sync {
    async fn load(&self) -> Result<LedgerSnapshot, StoreError>;

    async fn save(&self, flights: &[Flight], bookings: &[Booking]) -> Result<(), StoreError>;

    /// Short engine name for logs
    fn name(&self) -> &'static str;
}

pub fn encode_blob<T: Serialize>(items: &[T]) -> Result<String, StoreError> {
    Ok(serde_json::to_string(items)?)
}

/// Missing or blank blobs decode to an empty list
pub fn decode_blob<T: DeserializeOwned>(raw: Option<&str>) -> Result<Vec<T>, StoreError> {
    match raw.map(str::trim) {
        None | Some("") => Ok(Vec::new()),
        Some(text) => Ok(serde_json::from_str(text)?),
    }
}

/// Process-local store. Blobs are kept serialized so a load returns fresh copies.
#[derive(Default)]
pub struct MemoryStore {
    blobs: Mutex<HashMap<&'static str, String>>,
    fail_saves: AtomicBool,
    saves: AtomicUsize,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every subsequent `save` fail, as a full disk or dropped connection would
    pub fn set_fail_saves(&self, fail: bool) {
        self.fail_saves.store(fail, Ordering::SeqCst);
    }

    pub fn save_count(&self) -> usize {
        self.saves.load(Ordering::SeqCst)
    }

    fn blob(&self, name: &str) -> Result<Option<String>, StoreError> {
        let blobs = self
            .blobs
            .lock()
            .map_err(|_| StoreError::backend("memory store lock poisoned"))?;
        Ok(blobs.get(name).cloned())
    }
}

#[async_trait]
impl LedgerStore for MemoryStore {
    async fn load(&self) -> Result<LedgerSnapshot, StoreError> {
        Ok(LedgerSnapshot {
            flights: decode_blob(self.blob(FLIGHTS_BLOB)?.as_deref())?,
            bookings: decode_blob(self.blob(BOOKINGS_BLOB)?.as_deref())?,
        })
    }

    async fn save(&self, flights: &[Flight], bookings: &[Booking]) -> Result<(), StoreError> {
        if self.fail_saves.load(Ordering::SeqCst) {
            return Err(StoreError::backend("memory store is refusing writes"));
        }

        let flights = encode_blob(flights)?;
        let bookings = encode_blob(bookings)?;

        let mut blobs = self
            .blobs
            .lock()
            .map_err(|_| StoreError::backend("memory store lock poisoned"))?;
        blobs.insert(FLIGHTS_BLOB, flights);
        blobs.insert(BOOKINGS_BLOB, bookings);
        self.saves.fetch_add(1, Ordering::SeqCst);

        tracing::debug!("Memory store saved ledger");
        Ok(())
    }

    fn name(&self) -> &'static str {
        "memory"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_blank_blob() {
        let flights: Vec<Flight> = decode_blob(None).unwrap();
        assert!(flights.is_empty());

        let flights: Vec<Flight> = decode_blob(Some("  \n")).unwrap();
        assert!(flights.is_empty());

        let broken: Result<Vec<Flight>, _> = decode_blob(Some("{not json"));
        assert!(matches!(broken, Err(StoreError::Serialization(_))));
    }

    #[tokio::test]
    async fn test_memory_store_empty_then_saved() {
        let store = MemoryStore::new();
        assert_eq!(store.load().await.unwrap(), LedgerSnapshot::default());

        store.save(&[], &[]).await.unwrap();
        assert_eq!(store.save_count(), 1);

        store.set_fail_saves(true);
        assert!(store.save(&[], &[]).await.is_err());
        assert_eq!(store.save_count(), 1);
    }
}
