use chrono::Utc;
use horizon_core::reference::booking_reference;
use horizon_core::{Actor, LedgerError, LedgerResult};
use horizon_shared::{Booking, BookingPatch, BookingStatus, LedgerEvent, PassengerDetail};
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::ledger::InventoryLedger;
use crate::transitions::Transition;

fn validate_passengers(passenger_count: u32, passengers: &[PassengerDetail]) -> LedgerResult<()> {
    if passenger_count == 0 {
        return Err(LedgerError::Invalid("passenger count must be at least 1".to_string()));
    }
    if passengers.len() != passenger_count as usize {
        return Err(LedgerError::Invalid(format!(
            "expected {} passenger record(s), got {}",
            passenger_count,
            passengers.len()
        )));
    }
    if passengers.iter().any(|p| p.name.expose().trim().is_empty()) {
        return Err(LedgerError::Invalid("every passenger needs a name".to_string()));
    }
    Ok(())
}

impl InventoryLedger {
    /// Book `passenger_count` seats on a flight for `actor`.
    ///
    /// The booking is confirmed immediately, priced at the flight's current
    /// fare and carries a snapshot of the flight as it is now.
    pub async fn create_booking(
        &mut self,
        flight_id: Uuid,
        actor: &Actor,
        passenger_count: u32,
        passengers: Vec<PassengerDetail>,
    ) -> LedgerResult<Booking> {
        let mut staged = self.stage();
        let flight_idx = staged.flight_index(flight_id)?;
        let flight = &mut staged.flights[flight_idx];

        validate_passengers(passenger_count, &passengers)?;
        if passenger_count > flight.available_seats {
            warn!(
                "Rejected booking of {} seats on flight {}: {} available",
                passenger_count, flight.flight_number, flight.available_seats
            );
            return Err(LedgerError::CapacityExceeded {
                requested: passenger_count,
                available: flight.available_seats,
            });
        }

        let total_price_nuc = flight
            .price_nuc
            .checked_mul(i64::from(passenger_count))
            .ok_or_else(|| LedgerError::Invalid("total price out of range".to_string()))?;

        flight.available_seats -= passenger_count;
        let available_seats = flight.available_seats;

        let now = Utc::now();
        let booking = Booking {
            id: Uuid::new_v4(),
            reference: booking_reference(),
            user_id: actor.user_id.clone(),
            flight_id,
            passenger_count,
            passengers,
            total_price_nuc,
            status: BookingStatus::Confirmed,
            booked_on: now.date_naive(),
            flight: flight.snapshot(),
            created_at: now,
            updated_at: now,
        };
        staged.bookings.push(booking.clone());

        self.commit(staged).await?;

        info!(
            "Booking {} confirmed: {} seat(s) on flight {}, {} left",
            booking.reference, passenger_count, flight_id, available_seats
        );
        self.publish(LedgerEvent::BookingConfirmed {
            booking_id: booking.id,
            flight_id,
            passenger_count,
            available_seats,
            timestamp: Self::now(),
        });

        Ok(booking)
    }

    /// Cancel a booking on behalf of its owner.
    ///
    /// Seats go back to the flight only on the confirmed -> cancelled change;
    /// cancelling an already cancelled booking returns it as is.
    pub async fn cancel_booking(&mut self, booking_id: Uuid, actor: &Actor) -> LedgerResult<Booking> {
        let mut staged = self.stage();
        let idx = staged.booking_index(booking_id)?;

        if !staged.bookings[idx].is_owned_by(&actor.user_id) {
            warn!("User {} tried to cancel booking {} they do not own", actor.user_id, booking_id);
            return Err(LedgerError::Unauthorized(
                "only the booking owner may cancel it".to_string(),
            ));
        }

        let outcome = staged.transition(idx, BookingStatus::Cancelled)?;
        let booking = staged.bookings[idx].clone();
        if outcome == Transition::Unchanged {
            return Ok(booking);
        }

        self.commit(staged).await?;
        info!("Booking {} cancelled by owner", booking.reference);
        self.publish_transition(&booking, outcome);

        Ok(booking)
    }

    /// Apply a patch to a booking. Admins may patch any booking, customers only their own.
    ///
    /// Status changes share the cancellation path's seat accounting, so a
    /// booking flipped back to confirmed takes its seats again.
    pub async fn update_booking(
        &mut self,
        booking_id: Uuid,
        patch: BookingPatch,
        actor: &Actor,
    ) -> LedgerResult<Booking> {
        let mut staged = self.stage();
        let idx = staged.booking_index(booking_id)?;

        if !actor.can_access(&staged.bookings[idx].user_id) {
            warn!("User {} tried to update booking {} they do not own", actor.user_id, booking_id);
            return Err(LedgerError::Unauthorized(
                "only the booking owner or an admin may update it".to_string(),
            ));
        }

        if patch.is_empty() {
            debug!("Empty patch for booking {}", booking_id);
            return Ok(staged.bookings[idx].clone());
        }

        let passengers_changed = match patch.passengers {
            Some(passengers) => {
                let booking = &mut staged.bookings[idx];
                validate_passengers(booking.passenger_count, &passengers)?;
                booking.passengers = passengers;
                booking.touch();
                true
            }
            None => false,
        };

        let outcome = match patch.status {
            Some(status) => staged.transition(idx, status)?,
            None => Transition::Unchanged,
        };

        if outcome == Transition::Unchanged && !passengers_changed {
            return Ok(staged.bookings[idx].clone());
        }

        let booking = staged.bookings[idx].clone();
        self.commit(staged).await?;
        info!("Booking {} updated by {} ({})", booking.reference, actor.user_id, actor.role);

        if outcome == Transition::Unchanged {
            self.publish(LedgerEvent::BookingUpdated {
                booking_id: booking.id,
                timestamp: Self::now(),
            });
        } else {
            self.publish_transition(&booking, outcome);
        }

        Ok(booking)
    }

    fn publish_transition(&self, booking: &Booking, outcome: Transition) {
        let available_seats = self
            .flight(booking.flight_id)
            .map(|f| f.available_seats)
            .unwrap_or(0);

        let event = match outcome {
            Transition::Cancelled { restored } => LedgerEvent::BookingCancelled {
                booking_id: booking.id,
                flight_id: booking.flight_id,
                passenger_count: restored,
                available_seats,
                timestamp: Self::now(),
            },
            Transition::Reconfirmed { reserved } => LedgerEvent::BookingConfirmed {
                booking_id: booking.id,
                flight_id: booking.flight_id,
                passenger_count: reserved,
                available_seats,
                timestamp: Self::now(),
            },
            Transition::Unchanged => return,
        };
        self.publish(event);
    }
}
