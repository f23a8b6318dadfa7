use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Image used when an admin adds a flight without one.
pub const PLACEHOLDER_IMAGE: &str = "/images/flights/placeholder.jpg";

/// Operational status shown on the departures board
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum FlightStatus {
    OnTime,
    Delayed,
    Cancelled,
}

impl fmt::Display for FlightStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            FlightStatus::OnTime => "On Time",
            FlightStatus::Delayed => "Delayed",
            FlightStatus::Cancelled => "Cancelled",
        };
        f.write_str(label)
    }
}

/// A scheduled flight in the catalog.
///
/// `available_seats` is owned by the ledger: it only moves through booking,
/// cancellation and capacity changes, and always stays within
/// `0..=seat_capacity`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Flight {
    pub id: Uuid,
    pub flight_number: String,
    pub origin: String,
    pub destination: String,
    pub date: NaiveDate,
    pub departure_time: NaiveTime,
    pub arrival_time: NaiveTime,
    pub duration_minutes: u32,
    pub price_nuc: i64,
    pub aircraft: String,
    pub status: FlightStatus,
    pub seat_capacity: u32,
    pub available_seats: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default)]
    pub amenities: Vec<String>,
}

impl Flight {
    /// Seats currently held by confirmed bookings
    pub fn booked_seats(&self) -> u32 {
        self.seat_capacity.saturating_sub(self.available_seats)
    }

    /// Freeze the descriptive fields a booking keeps
    pub fn snapshot(&self) -> FlightSnapshot {
        FlightSnapshot {
            flight_number: self.flight_number.clone(),
            origin: self.origin.clone(),
            destination: self.destination.clone(),
            date: self.date,
            departure_time: self.departure_time,
            arrival_time: self.arrival_time,
            duration_minutes: self.duration_minutes,
            aircraft: self.aircraft.clone(),
            status: self.status,
            image: self.image.clone(),
        }
    }
}

/// Copy of a flight's descriptive fields as they were when a booking was made.
/// Later catalog edits never touch it.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct FlightSnapshot {
    pub flight_number: String,
    pub origin: String,
    pub destination: String,
    pub date: NaiveDate,
    pub departure_time: NaiveTime,
    pub arrival_time: NaiveTime,
    pub duration_minutes: u32,
    pub aircraft: String,
    pub status: FlightStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
}

impl FlightSnapshot {
    pub fn route(&self) -> String {
        format!("{} - {}", self.origin, self.destination)
    }
}

/// Admin input for a new catalog entry. Id and availability are assigned by the ledger.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewFlight {
    pub flight_number: String,
    pub origin: String,
    pub destination: String,
    pub date: NaiveDate,
    pub departure_time: NaiveTime,
    pub arrival_time: NaiveTime,
    pub duration_minutes: u32,
    pub price_nuc: i64,
    pub aircraft: String,
    #[serde(default = "default_status")]
    pub status: FlightStatus,
    pub seat_capacity: u32,
    #[serde(default)]
    pub image: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub amenities: Vec<String>,
}

fn default_status() -> FlightStatus {
    FlightStatus::OnTime
}

/// The fields an admin may change on an existing flight.
/// Availability is not patchable; it follows bookings and capacity.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FlightPatch {
    pub flight_number: Option<String>,
    pub origin: Option<String>,
    pub destination: Option<String>,
    pub date: Option<NaiveDate>,
    pub departure_time: Option<NaiveTime>,
    pub arrival_time: Option<NaiveTime>,
    pub duration_minutes: Option<u32>,
    pub price_nuc: Option<i64>,
    pub aircraft: Option<String>,
    pub status: Option<FlightStatus>,
    pub seat_capacity: Option<u32>,
    pub image: Option<String>,
    pub description: Option<String>,
    pub amenities: Option<Vec<String>>,
}

/// Catalog search filter; unset fields match everything
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FlightQuery {
    pub origin: Option<String>,
    pub destination: Option<String>,
    pub date: Option<NaiveDate>,
    pub seats: Option<u32>,
}

impl FlightQuery {
    pub fn matches(&self, flight: &Flight) -> bool {
        let same = |wanted: &Option<String>, actual: &str| {
            wanted
                .as_deref()
                .map_or(true, |w| w.eq_ignore_ascii_case(actual))
        };

        same(&self.origin, &flight.origin)
            && same(&self.destination, &flight.destination)
            && self.date.map_or(true, |d| d == flight.date)
            && self.seats.map_or(true, |n| flight.available_seats >= n)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn flight() -> Flight {
        Flight {
            id: Uuid::new_v4(),
            flight_number: "OH101".to_string(),
            origin: "JFK".to_string(),
            destination: "LAX".to_string(),
            date: NaiveDate::from_ymd_opt(2026, 12, 1).unwrap(),
            departure_time: NaiveTime::from_hms_opt(8, 0, 0).unwrap(),
            arrival_time: NaiveTime::from_hms_opt(11, 30, 0).unwrap(),
            duration_minutes: 330,
            price_nuc: 29900,
            aircraft: "Boeing 737".to_string(),
            status: FlightStatus::OnTime,
            seat_capacity: 180,
            available_seats: 170,
            image: None,
            description: None,
            amenities: vec![],
        }
    }

    #[test]
    fn test_booked_seats() {
        assert_eq!(flight().booked_seats(), 10);
    }

    #[test]
    fn test_status_wire_format() {
        let json = serde_json::to_string(&FlightStatus::OnTime).unwrap();
        assert_eq!(json, "\"ON_TIME\"");
        assert_eq!(FlightStatus::OnTime.to_string(), "On Time");
    }

    #[test]
    fn test_query_matching() {
        let f = flight();

        assert!(FlightQuery::default().matches(&f));
        assert!(FlightQuery {
            origin: Some("jfk".to_string()),
            seats: Some(170),
            ..Default::default()
        }
        .matches(&f));
        assert!(!FlightQuery {
            seats: Some(171),
            ..Default::default()
        }
        .matches(&f));
        assert!(!FlightQuery {
            destination: Some("SFO".to_string()),
            ..Default::default()
        }
        .matches(&f));
    }

    #[test]
    fn test_patch_rejects_available_seats() {
        let result: Result<FlightPatch, _> =
            serde_json::from_str(r#"{"available_seats": 500}"#);
        assert!(result.is_err());
    }
}
