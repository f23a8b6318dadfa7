use horizon_core::{LedgerError, LedgerResult};
use horizon_shared::BookingStatus;
use tracing::{debug, warn};

use crate::ledger::LedgerState;

/// What a status change did to seat availability
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Transition {
    Unchanged,
    Cancelled { restored: u32 },
    Reconfirmed { reserved: u32 },
}

impl LedgerState {
    /// The only place a booking's status changes. Seats move with the status:
    /// confirmed -> cancelled gives them back, cancelled -> confirmed takes them
    /// again, and a no-op change touches nothing.
    pub(crate) fn transition(&mut self, booking_idx: usize, target: BookingStatus) -> LedgerResult<Transition> {
        let (booking_id, current, flight_id, count) = {
            let b = &self.bookings[booking_idx];
            (b.id, b.status, b.flight_id, b.passenger_count)
        };

        if current == target {
            debug!("Booking {} already {}", booking_id, target);
            return Ok(Transition::Unchanged);
        }

        let outcome = match target {
            BookingStatus::Cancelled => {
                match self.flight_mut(flight_id) {
                    Some(flight) => {
                        let restored = flight.available_seats.saturating_add(count);
                        if restored > flight.seat_capacity {
                            warn!(
                                "Restoring {} seats on flight {} would exceed capacity {}, clamping",
                                count, flight_id, flight.seat_capacity
                            );
                        }
                        flight.available_seats = restored.min(flight.seat_capacity);
                    }
                    None => warn!(
                        "Cancelling booking {} whose flight {} is no longer in the catalog",
                        booking_id, flight_id
                    ),
                }
                Transition::Cancelled { restored: count }
            }
            BookingStatus::Confirmed => {
                let flight = self
                    .flight_mut(flight_id)
                    .ok_or(LedgerError::FlightNotFound(flight_id))?;
                if count > flight.available_seats {
                    return Err(LedgerError::CapacityExceeded {
                        requested: count,
                        available: flight.available_seats,
                    });
                }
                flight.available_seats -= count;
                Transition::Reconfirmed { reserved: count }
            }
        };

        let booking = &mut self.bookings[booking_idx];
        booking.status = target;
        booking.touch();
        Ok(outcome)
    }
}
