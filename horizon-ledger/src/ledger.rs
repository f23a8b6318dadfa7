use chrono::Utc;
use horizon_core::{LedgerError, LedgerResult, LedgerSnapshot, LedgerStore};
use horizon_shared::{Booking, Flight, LedgerEvent};
use std::sync::Arc;
use tokio::sync::broadcast;
use tracing::{error, info, warn};
use uuid::Uuid;

/// Both collections. Operations mutate a staged clone and only swap it in
/// once the store has accepted it.
#[derive(Debug, Clone, Default)]
pub(crate) struct LedgerState {
    pub(crate) flights: Vec<Flight>,
    pub(crate) bookings: Vec<Booking>,
}

impl LedgerState {
    pub(crate) fn flight_index(&self, flight_id: Uuid) -> LedgerResult<usize> {
        self.flights
            .iter()
            .position(|f| f.id == flight_id)
            .ok_or(LedgerError::FlightNotFound(flight_id))
    }

    pub(crate) fn booking_index(&self, booking_id: Uuid) -> LedgerResult<usize> {
        self.bookings
            .iter()
            .position(|b| b.id == booking_id)
            .ok_or(LedgerError::BookingNotFound(booking_id))
    }

    pub(crate) fn flight_mut(&mut self, flight_id: Uuid) -> Option<&mut Flight> {
        self.flights.iter_mut().find(|f| f.id == flight_id)
    }

    /// Confirmed bookings on a flight
    pub(crate) fn active_bookings(&self, flight_id: Uuid) -> impl Iterator<Item = &Booking> {
        self.bookings
            .iter()
            .filter(move |b| b.flight_id == flight_id && b.is_confirmed())
    }

    pub(crate) fn confirmed_passengers(&self, flight_id: Uuid) -> u32 {
        self.active_bookings(flight_id).map(|b| b.passenger_count).sum()
    }
}

/// The single writer of the flight catalog and the booking ledger.
///
/// Constructed once at startup and handed to whoever needs it. Every
/// mutating operation validates first, persists both collections through the
/// injected [`LedgerStore`], then commits in memory and broadcasts a
/// [`LedgerEvent`]. A failed save leaves the in-memory state untouched.
pub struct InventoryLedger {
    pub(crate) state: LedgerState,
    store: Arc<dyn LedgerStore>,
    events: Option<broadcast::Sender<LedgerEvent>>,
}

impl InventoryLedger {
    /// Load both collections, falling back to `seed` for any that is absent or empty
    pub async fn open(store: Arc<dyn LedgerStore>, seed: LedgerSnapshot) -> LedgerResult<Self> {
        let loaded = store.load().await?;

        let flights = if loaded.flights.is_empty() {
            info!("No stored flights in {} store, using {} seed flights", store.name(), seed.flights.len());
            seed.flights
        } else {
            loaded.flights
        };
        let bookings = if loaded.bookings.is_empty() {
            seed.bookings
        } else {
            loaded.bookings
        };

        let ledger = Self {
            state: LedgerState { flights, bookings },
            store,
            events: None,
        };

        for discrepancy in ledger.audit() {
            warn!(
                "Seat count mismatch on flight {} ({}): capacity {}, available {}, confirmed passengers {}",
                discrepancy.flight_number,
                discrepancy.flight_id,
                discrepancy.seat_capacity,
                discrepancy.available_seats,
                discrepancy.confirmed_passengers
            );
        }

        info!(
            "Ledger opened with {} flights and {} bookings",
            ledger.state.flights.len(),
            ledger.state.bookings.len()
        );
        Ok(ledger)
    }

    /// Broadcast committed changes on `tx`
    pub fn with_events(mut self, tx: broadcast::Sender<LedgerEvent>) -> Self {
        self.events = Some(tx);
        self
    }

    pub(crate) fn stage(&self) -> LedgerState {
        self.state.clone()
    }

    /// Persist `staged`, then make it the live state
    pub(crate) async fn commit(&mut self, staged: LedgerState) -> LedgerResult<()> {
        if let Err(e) = self.store.save(&staged.flights, &staged.bookings).await {
            error!("Failed to persist ledger to {} store: {}", self.store.name(), e);
            return Err(LedgerError::Storage(e));
        }
        self.state = staged;
        Ok(())
    }

    pub(crate) fn publish(&self, event: LedgerEvent) {
        if let Some(tx) = &self.events {
            // No subscribers is fine
            let _ = tx.send(event);
        }
    }

    pub(crate) fn now() -> i64 {
        Utc::now().timestamp()
    }

    /// Flights whose booked seat count disagrees with their confirmed bookings
    pub fn audit(&self) -> Vec<SeatDiscrepancy> {
        self.state
            .flights
            .iter()
            .filter_map(|flight| {
                let confirmed = self.state.confirmed_passengers(flight.id);
                let consistent = flight.available_seats <= flight.seat_capacity
                    && flight.booked_seats() == confirmed;
                if consistent {
                    None
                } else {
                    Some(SeatDiscrepancy {
                        flight_id: flight.id,
                        flight_number: flight.flight_number.clone(),
                        seat_capacity: flight.seat_capacity,
                        available_seats: flight.available_seats,
                        confirmed_passengers: confirmed,
                    })
                }
            })
            .collect()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SeatDiscrepancy {
    pub flight_id: Uuid,
    pub flight_number: String,
    pub seat_capacity: u32,
    pub available_seats: u32,
    pub confirmed_passengers: u32,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{customer, sample_flight};
    use horizon_core::MemoryStore;
    use horizon_shared::PassengerDetail;

    #[tokio::test]
    async fn test_open_uses_seed_when_store_empty() {
        let store = Arc::new(MemoryStore::new());
        let seed = LedgerSnapshot {
            flights: vec![sample_flight(180, 29900)],
            bookings: vec![],
        };

        let ledger = InventoryLedger::open(store.clone(), seed).await.unwrap();

        assert_eq!(ledger.flights().len(), 1);
        assert_eq!(store.save_count(), 0);
    }

    #[tokio::test]
    async fn test_open_prefers_stored_flights() {
        let store = Arc::new(MemoryStore::new());
        let stored = sample_flight(50, 100);
        store.save(&[stored.clone()], &[]).await.unwrap();

        let seed = LedgerSnapshot {
            flights: vec![sample_flight(180, 29900), sample_flight(90, 100)],
            bookings: vec![],
        };
        let ledger = InventoryLedger::open(store, seed).await.unwrap();

        assert_eq!(ledger.flights(), &[stored][..]);
    }

    #[tokio::test]
    async fn test_failed_save_leaves_state_untouched() {
        let store = Arc::new(MemoryStore::new());
        let flight = sample_flight(180, 29900);
        let flight_id = flight.id;
        let mut ledger = InventoryLedger::open(
            store.clone(),
            LedgerSnapshot { flights: vec![flight], bookings: vec![] },
        )
        .await
        .unwrap();

        store.set_fail_saves(true);
        let result = ledger
            .create_booking(flight_id, &customer("alice"), 2, vec![
                PassengerDetail::new("Alice", 30),
                PassengerDetail::new("Sam", 8),
            ])
            .await;

        assert!(matches!(result, Err(LedgerError::Storage(_))));
        assert_eq!(ledger.flight(flight_id).unwrap().available_seats, 180);
        assert!(ledger.bookings_for_user("alice").is_empty());
    }

    #[tokio::test]
    async fn test_audit_reports_drift() {
        let mut flight = sample_flight(180, 29900);
        flight.available_seats = 170;
        let ledger = InventoryLedger::open(
            Arc::new(MemoryStore::new()),
            LedgerSnapshot { flights: vec![flight.clone()], bookings: vec![] },
        )
        .await
        .unwrap();

        let drift = ledger.audit();
        assert_eq!(drift.len(), 1);
        assert_eq!(drift[0].flight_id, flight.id);
        assert_eq!(drift[0].confirmed_passengers, 0);
    }

    #[tokio::test]
    async fn test_events_are_broadcast_after_commit() {
        let flight = sample_flight(180, 29900);
        let flight_id = flight.id;
        let (tx, mut rx) = broadcast::channel(16);
        let mut ledger = InventoryLedger::open(
            Arc::new(MemoryStore::new()),
            LedgerSnapshot { flights: vec![flight], bookings: vec![] },
        )
        .await
        .unwrap()
        .with_events(tx);

        let booking = ledger
            .create_booking(flight_id, &customer("alice"), 1, vec![PassengerDetail::new("Alice", 30)])
            .await
            .unwrap();

        match rx.try_recv().unwrap() {
            LedgerEvent::BookingConfirmed { booking_id, available_seats, .. } => {
                assert_eq!(booking_id, booking.id);
                assert_eq!(available_seats, 179);
            }
            other => panic!("unexpected event {:?}", other),
        }
    }
}
