pub mod models;
pub mod pii;

pub use models::booking::{Booking, BookingPatch, BookingStatus, PassengerDetail};
pub use models::events::LedgerEvent;
pub use models::flight::{
    Flight, FlightPatch, FlightQuery, FlightSnapshot, FlightStatus, NewFlight, PLACEHOLDER_IMAGE,
};
pub use pii::Masked;
