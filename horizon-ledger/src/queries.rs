use horizon_core::{Actor, LedgerError, LedgerResult};
use horizon_shared::{Booking, Flight, FlightQuery};
use uuid::Uuid;

use crate::ledger::InventoryLedger;

/// Read-side views. None of these touch storage.
impl InventoryLedger {
    pub fn flights(&self) -> &[Flight] {
        &self.state.flights
    }

    pub fn flight(&self, flight_id: Uuid) -> Option<&Flight> {
        self.state.flights.iter().find(|f| f.id == flight_id)
    }

    pub fn search_flights(&self, query: &FlightQuery) -> Vec<&Flight> {
        self.state.flights.iter().filter(|f| query.matches(f)).collect()
    }

    pub fn booking(&self, booking_id: Uuid) -> Option<&Booking> {
        self.state.bookings.iter().find(|b| b.id == booking_id)
    }

    /// Every booking owned by `user_id`, in creation order, cancelled ones included
    pub fn bookings_for_user(&self, user_id: &str) -> Vec<&Booking> {
        self.state
            .bookings
            .iter()
            .filter(|b| b.is_owned_by(user_id))
            .collect()
    }

    /// The whole ledger for admins; nothing for anyone else
    pub fn all_bookings(&self, actor: &Actor) -> Vec<&Booking> {
        if !actor.is_admin() {
            return Vec::new();
        }
        self.state.bookings.iter().collect()
    }

    /// A single booking as seen by `actor`. Other users' bookings read as missing.
    pub fn booking_for(&self, actor: &Actor, booking_id: Uuid) -> LedgerResult<&Booking> {
        self.booking(booking_id)
            .filter(|b| actor.can_access(&b.user_id))
            .ok_or(LedgerError::BookingNotFound(booking_id))
    }
}
