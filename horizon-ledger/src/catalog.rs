use horizon_core::{Actor, LedgerError, LedgerResult};
use horizon_shared::{Flight, FlightPatch, LedgerEvent, NewFlight, PLACEHOLDER_IMAGE};
use tracing::{info, warn};
use uuid::Uuid;

use crate::ledger::InventoryLedger;

fn require_text(field: &str, value: &str) -> LedgerResult<()> {
    if value.trim().is_empty() {
        return Err(LedgerError::Invalid(format!("{} must not be empty", field)));
    }
    Ok(())
}

fn image_or_placeholder(image: Option<String>) -> Option<String> {
    match image {
        Some(img) if !img.trim().is_empty() => Some(img),
        _ => Some(PLACEHOLDER_IMAGE.to_string()),
    }
}

/// Field rules shared by new and edited flights
fn validate_flight(flight: &Flight) -> LedgerResult<()> {
    require_text("flight number", &flight.flight_number)?;
    require_text("origin", &flight.origin)?;
    require_text("destination", &flight.destination)?;
    require_text("aircraft", &flight.aircraft)?;

    if flight.origin.eq_ignore_ascii_case(&flight.destination) {
        return Err(LedgerError::Invalid("origin and destination must differ".to_string()));
    }
    if flight.price_nuc < 0 {
        return Err(LedgerError::Invalid("price must not be negative".to_string()));
    }
    if flight.seat_capacity == 0 {
        return Err(LedgerError::Invalid("seat capacity must be at least 1".to_string()));
    }
    Ok(())
}

impl InventoryLedger {
    /// Add a flight to the catalog with every seat available
    pub async fn add_flight(&mut self, new: NewFlight, actor: &Actor) -> LedgerResult<Flight> {
        actor.require_admin("add flights")?;

        let flight = Flight {
            id: Uuid::new_v4(),
            flight_number: new.flight_number,
            origin: new.origin,
            destination: new.destination,
            date: new.date,
            departure_time: new.departure_time,
            arrival_time: new.arrival_time,
            duration_minutes: new.duration_minutes,
            price_nuc: new.price_nuc,
            aircraft: new.aircraft,
            status: new.status,
            seat_capacity: new.seat_capacity,
            available_seats: new.seat_capacity,
            image: image_or_placeholder(new.image),
            description: new.description,
            amenities: new.amenities,
        };
        validate_flight(&flight)?;

        let mut staged = self.stage();
        staged.flights.push(flight.clone());
        self.commit(staged).await?;

        info!("Flight {} ({}) added with {} seats", flight.flight_number, flight.id, flight.seat_capacity);
        self.publish(LedgerEvent::FlightAdded {
            flight_id: flight.id,
            available_seats: flight.available_seats,
            timestamp: Self::now(),
        });
        Ok(flight)
    }

    /// Apply an admin edit to a flight.
    ///
    /// A new seat capacity keeps every confirmed seat booked: availability
    /// becomes `capacity - booked`, and a capacity below `booked` is refused.
    pub async fn update_flight(&mut self, flight_id: Uuid, patch: FlightPatch, actor: &Actor) -> LedgerResult<Flight> {
        actor.require_admin("update flights")?;

        let mut staged = self.stage();
        let idx = staged.flight_index(flight_id)?;
        let booked = staged.confirmed_passengers(flight_id);
        let mut flight = staged.flights[idx].clone();

        if let Some(v) = patch.flight_number {
            flight.flight_number = v;
        }
        if let Some(v) = patch.origin {
            flight.origin = v;
        }
        if let Some(v) = patch.destination {
            flight.destination = v;
        }
        if let Some(v) = patch.date {
            flight.date = v;
        }
        if let Some(v) = patch.departure_time {
            flight.departure_time = v;
        }
        if let Some(v) = patch.arrival_time {
            flight.arrival_time = v;
        }
        if let Some(v) = patch.duration_minutes {
            flight.duration_minutes = v;
        }
        if let Some(v) = patch.price_nuc {
            flight.price_nuc = v;
        }
        if let Some(v) = patch.aircraft {
            flight.aircraft = v;
        }
        if let Some(v) = patch.status {
            flight.status = v;
        }
        if let Some(v) = patch.image {
            flight.image = image_or_placeholder(Some(v));
        }
        if let Some(v) = patch.description {
            flight.description = Some(v).filter(|d| !d.trim().is_empty());
        }
        if let Some(v) = patch.amenities {
            flight.amenities = v;
        }
        if let Some(capacity) = patch.seat_capacity {
            if capacity < booked {
                return Err(LedgerError::Invalid(format!(
                    "seat capacity {} is below the {} seat(s) already booked",
                    capacity, booked
                )));
            }
            flight.seat_capacity = capacity;
            flight.available_seats = capacity - booked;
        }
        validate_flight(&flight)?;

        staged.flights[idx] = flight.clone();
        self.commit(staged).await?;

        info!("Flight {} ({}) updated", flight.flight_number, flight.id);
        self.publish(LedgerEvent::FlightUpdated {
            flight_id,
            available_seats: flight.available_seats,
            timestamp: Self::now(),
        });
        Ok(flight)
    }

    /// Remove a flight that no confirmed booking references.
    /// Cancelled bookings keep their snapshot of it.
    pub async fn delete_flight(&mut self, flight_id: Uuid, actor: &Actor) -> LedgerResult<Flight> {
        actor.require_admin("delete flights")?;

        let mut staged = self.stage();
        let idx = staged.flight_index(flight_id)?;

        let active = staged.active_bookings(flight_id).count();
        if active > 0 {
            warn!("Refusing to delete flight {}: {} active booking(s)", flight_id, active);
            return Err(LedgerError::Conflict { flight_id, active });
        }

        let removed = staged.flights.remove(idx);
        self.commit(staged).await?;

        info!("Flight {} ({}) deleted", removed.flight_number, removed.id);
        self.publish(LedgerEvent::FlightRemoved {
            flight_id,
            timestamp: Self::now(),
        });
        Ok(removed)
    }
}
