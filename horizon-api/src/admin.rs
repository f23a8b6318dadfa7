use axum::{
    extract::State,
    http::header,
    response::IntoResponse,
    routing::get,
    Json, Router,
};
use horizon_shared::Booking;
use serde::Serialize;

use crate::{error::AppError, middleware::AuthUser, state::AppState};

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/v1/admin/bookings", get(all_bookings))
        .route("/v1/admin/bookings/export", get(export_bookings))
}

/// GET /v1/admin/bookings
///
/// Non-admins get an empty list rather than an error.
async fn all_bookings(
    State(state): State<AppState>,
    AuthUser(actor): AuthUser,
) -> Json<Vec<Booking>> {
    let ledger = state.ledger.lock().await;
    Json(ledger.all_bookings(&actor).into_iter().cloned().collect())
}

// ============================================================================
// CSV export
// ============================================================================

#[derive(Debug, Serialize)]
struct BookingCsvRow<'a> {
    reference: &'a str,
    user_id: &'a str,
    flight_number: &'a str,
    route: String,
    date: String,
    passengers: u32,
    total_price_nuc: i64,
    status: String,
    booked_on: String,
}

impl<'a> From<&'a Booking> for BookingCsvRow<'a> {
    fn from(b: &'a Booking) -> Self {
        Self {
            reference: &b.reference,
            user_id: &b.user_id,
            flight_number: &b.flight.flight_number,
            route: b.flight.route(),
            date: b.flight.date.to_string(),
            passengers: b.passenger_count,
            total_price_nuc: b.total_price_nuc,
            status: b.status.to_string(),
            booked_on: b.booked_on.to_string(),
        }
    }
}

pub fn bookings_csv(bookings: &[&Booking]) -> Result<Vec<u8>, AppError> {
    let mut wtr = csv::Writer::from_writer(Vec::new());
    for booking in bookings {
        wtr.serialize(BookingCsvRow::from(*booking))
            .map_err(|e| AppError::InternalServerError(format!("CSV encoding failed: {}", e)))?;
    }
    wtr.into_inner()
        .map_err(|e| AppError::InternalServerError(format!("CSV flush failed: {}", e)))
}

/// GET /v1/admin/bookings/export
async fn export_bookings(
    State(state): State<AppState>,
    AuthUser(actor): AuthUser,
) -> Result<impl IntoResponse, AppError> {
    if !actor.is_admin() {
        return Err(AppError::AuthorizationError("Only admins may export bookings".to_string()));
    }

    let ledger = state.ledger.lock().await;
    let body = bookings_csv(&ledger.all_bookings(&actor))?;

    Ok((
        [
            (header::CONTENT_TYPE, "text/csv; charset=utf-8"),
            (header::CONTENT_DISPOSITION, "attachment; filename=\"bookings.csv\""),
        ],
        body,
    ))
}
