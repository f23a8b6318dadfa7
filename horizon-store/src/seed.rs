use horizon_core::repository::decode_blob;
use horizon_core::{LedgerSnapshot, StoreError};

const SEED_FLIGHTS: &str = include_str!("../seed/flights.json");

/// Catalog used when storage holds no flights yet. Ships with no bookings.
pub fn bundled() -> Result<LedgerSnapshot, StoreError> {
    Ok(LedgerSnapshot {
        flights: decode_blob(Some(SEED_FLIGHTS))?,
        bookings: Vec::new(),
    })
}
