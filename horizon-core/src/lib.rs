pub mod identity;
pub mod reference;
pub mod repository;

use uuid::Uuid;

pub use identity::{Actor, Role};
pub use repository::{LedgerSnapshot, LedgerStore, MemoryStore, StoreError};

/// Coarse classification of ledger failures, used by callers to pick a response
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    NotFound,
    Unauthorized,
    CapacityExceeded,
    Conflict,
    Invalid,
    Storage,
}

#[derive(Debug, thiserror::Error)]
pub enum LedgerError {
    #[error("Flight not found: {0}")]
    FlightNotFound(Uuid),

    #[error("Booking not found: {0}")]
    BookingNotFound(Uuid),

    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error("Insufficient seats: requested {requested}, available {available}")]
    CapacityExceeded {
        requested: u32,
        available: u32,
    },

    #[error("Flight has {active} active booking(s)")]
    Conflict {
        flight_id: Uuid,
        active: usize,
    },

    #[error("Validation failed: {0}")]
    Invalid(String),

    #[error("Storage failure: {0}")]
    Storage(#[from] StoreError),
}

impl LedgerError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            LedgerError::FlightNotFound(_) | LedgerError::BookingNotFound(_) => ErrorKind::NotFound,
            LedgerError::Unauthorized(_) => ErrorKind::Unauthorized,
            LedgerError::CapacityExceeded { .. } => ErrorKind::CapacityExceeded,
            LedgerError::Conflict { .. } => ErrorKind::Conflict,
            LedgerError::Invalid(_) => ErrorKind::Invalid,
            LedgerError::Storage(_) => ErrorKind::Storage,
        }
    }
}

pub type LedgerResult<T> = Result<T, LedgerError>;
