use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

use crate::models::flight::FlightSnapshot;
use crate::pii::Masked;

/// Booking status. Bookings are never deleted, only moved between these two.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum BookingStatus {
    Confirmed,
    Cancelled,
}

impl fmt::Display for BookingStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BookingStatus::Confirmed => f.write_str("CONFIRMED"),
            BookingStatus::Cancelled => f.write_str("CANCELLED"),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PassengerDetail {
    pub name: Masked<String>,
    pub age: u8,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub seat: Option<String>,
}

impl PassengerDetail {
    pub fn new(name: impl Into<String>, age: u8) -> Self {
        Self {
            name: Masked(name.into()),
            age,
            seat: None,
        }
    }

    pub fn with_seat(mut self, seat: impl Into<String>) -> Self {
        self.seat = Some(seat.into());
        self
    }
}

/// A customer's reservation on one flight
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Booking {
    pub id: Uuid,
    pub reference: String,
    pub user_id: String,
    pub flight_id: Uuid,
    pub passenger_count: u32,
    pub passengers: Vec<PassengerDetail>,
    /// Fixed at booking time; later price changes do not reach it.
    pub total_price_nuc: i64,
    pub status: BookingStatus,
    pub booked_on: NaiveDate,
    pub flight: FlightSnapshot,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Booking {
    pub fn is_confirmed(&self) -> bool {
        self.status == BookingStatus::Confirmed
    }

    pub fn is_owned_by(&self, user_id: &str) -> bool {
        self.user_id == user_id
    }

    pub fn touch(&mut self) {
        self.updated_at = Utc::now();
    }
}

/// The fields that may be changed on an existing booking
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct BookingPatch {
    pub status: Option<BookingStatus>,
    pub passengers: Option<Vec<PassengerDetail>>,
}

impl BookingPatch {
    pub fn status(status: BookingStatus) -> Self {
        Self {
            status: Some(status),
            ..Default::default()
        }
    }

    pub fn is_empty(&self) -> bool {
        self.status.is_none() && self.passengers.is_none()
    }
}
