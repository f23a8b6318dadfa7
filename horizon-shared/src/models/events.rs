use uuid::Uuid;

/// Emitted by the ledger after a mutation has been persisted.
/// `available_seats` is the flight's availability after the change.
#[derive(Debug, serde::Serialize, serde::Deserialize, Clone, PartialEq)]
#[serde(tag = "type", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum LedgerEvent {
    BookingConfirmed {
        booking_id: Uuid,
        flight_id: Uuid,
        passenger_count: u32,
        available_seats: u32,
        timestamp: i64,
    },
    BookingCancelled {
        booking_id: Uuid,
        flight_id: Uuid,
        passenger_count: u32,
        available_seats: u32,
        timestamp: i64,
    },
    BookingUpdated {
        booking_id: Uuid,
        timestamp: i64,
    },
    FlightAdded {
        flight_id: Uuid,
        available_seats: u32,
        timestamp: i64,
    },
    FlightUpdated {
        flight_id: Uuid,
        available_seats: u32,
        timestamp: i64,
    },
    FlightRemoved {
        flight_id: Uuid,
        timestamp: i64,
    },
}

impl LedgerEvent {
    pub fn flight_id(&self) -> Option<Uuid> {
        match self {
            LedgerEvent::BookingConfirmed { flight_id, .. }
            | LedgerEvent::BookingCancelled { flight_id, .. }
            | LedgerEvent::FlightAdded { flight_id, .. }
            | LedgerEvent::FlightUpdated { flight_id, .. }
            | LedgerEvent::FlightRemoved { flight_id, .. } => Some(*flight_id),
            LedgerEvent::BookingUpdated { .. } => None,
        }
    }

    /// SSE event name
    pub fn kind(&self) -> &'static str {
        match self {
            LedgerEvent::BookingConfirmed { .. } => "booking.confirmed",
            LedgerEvent::BookingCancelled { .. } => "booking.cancelled",
            LedgerEvent::BookingUpdated { .. } => "booking.updated",
            LedgerEvent::FlightAdded { .. } => "flight.added",
            LedgerEvent::FlightUpdated { .. } => "flight.updated",
            LedgerEvent::FlightRemoved { .. } => "flight.removed",
        }
    }
}
