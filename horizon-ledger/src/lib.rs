pub mod bookings;
pub mod catalog;
pub mod ledger;
pub mod queries;
mod transitions;

pub use ledger::{InventoryLedger, SeatDiscrepancy};

#[cfg(test)]
pub(crate) mod testing {
    use crate::InventoryLedger;
    use chrono::{NaiveDate, NaiveTime, Utc};
    use horizon_core::{Actor, LedgerSnapshot, MemoryStore};
    use horizon_shared::{
        Booking, BookingStatus, Flight, FlightStatus, NewFlight, PassengerDetail,
    };
    use std::sync::Arc;
    use uuid::Uuid;

    pub fn customer(id: &str) -> Actor {
        Actor::customer(id)
    }

    pub fn admin(id: &str) -> Actor {
        Actor::admin(id)
    }

    pub fn sample_flight(capacity: u32, price_nuc: i64) -> Flight {
        Flight {
            id: Uuid::new_v4(),
            flight_number: "OH101".to_string(),
            origin: "JFK".to_string(),
            destination: "LAX".to_string(),
            date: NaiveDate::from_ymd_opt(2026, 12, 1).unwrap(),
            departure_time: NaiveTime::from_hms_opt(8, 0, 0).unwrap(),
            arrival_time: NaiveTime::from_hms_opt(11, 30, 0).unwrap(),
            duration_minutes: 330,
            price_nuc,
            aircraft: "Boeing 737-800".to_string(),
            status: FlightStatus::OnTime,
            seat_capacity: capacity,
            available_seats: capacity,
            image: None,
            description: None,
            amenities: vec!["Wi-Fi".to_string()],
        }
    }

    pub fn new_flight(capacity: u32) -> NewFlight {
        NewFlight {
            flight_number: "OH202".to_string(),
            origin: "BOS".to_string(),
            destination: "ORD".to_string(),
            date: NaiveDate::from_ymd_opt(2026, 12, 5).unwrap(),
            departure_time: NaiveTime::from_hms_opt(14, 15, 0).unwrap(),
            arrival_time: NaiveTime::from_hms_opt(16, 5, 0).unwrap(),
            duration_minutes: 170,
            price_nuc: 15900,
            aircraft: "Airbus A320".to_string(),
            status: FlightStatus::OnTime,
            seat_capacity: capacity,
            image: None,
            description: None,
            amenities: vec![],
        }
    }

    pub fn passengers(n: u32) -> Vec<PassengerDetail> {
        (0..n)
            .map(|i| PassengerDetail::new(format!("Passenger {}", i + 1), 30))
            .collect()
    }

    /// A confirmed booking on `flight` that has not gone through the ledger
    pub fn booking_on(flight: &Flight, user_id: &str, count: u32) -> Booking {
        let now = Utc::now();
        Booking {
            id: Uuid::new_v4(),
            reference: "OHTEST00001".to_string(),
            user_id: user_id.to_string(),
            flight_id: flight.id,
            passenger_count: count,
            passengers: passengers(count),
            total_price_nuc: flight.price_nuc * i64::from(count),
            status: BookingStatus::Confirmed,
            booked_on: now.date_naive(),
            flight: flight.snapshot(),
            created_at: now,
            updated_at: now,
        }
    }

    pub async fn ledger_with(flights: Vec<Flight>) -> (InventoryLedger, Arc<MemoryStore>) {
        let store = Arc::new(MemoryStore::new());
        let seed = LedgerSnapshot {
            flights,
            bookings: vec![],
        };
        let ledger = InventoryLedger::open(store.clone(), seed).await.unwrap();
        (ledger, store)
    }
}
