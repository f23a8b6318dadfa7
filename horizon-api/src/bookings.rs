use axum::{
    extract::State,
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use horizon_shared::{Booking, BookingPatch, PassengerDetail};
use serde::Deserialize;
use uuid::Uuid;

use crate::{
    error::AppError,
    extract::{AppJson, AppPath},
    middleware::AuthUser,
    state::AppState,
};

#[derive(Debug, Deserialize)]
pub struct CreateBookingRequest {
    pub flight_id: Uuid,
    /// Defaults to the number of passenger records
    pub passenger_count: Option<u32>,
    pub passengers: Vec<PassengerDetail>,
}

fn record_count(len: usize) -> Result<u32, AppError> {
    u32::try_from(len).map_err(|_| AppError::ValidationError(format!("Too many passenger records: {}", len)))
}

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/v1/bookings", get(my_bookings).post(create_booking))
        .route("/v1/bookings/{id}", get(get_booking).patch(update_booking))
        .route("/v1/bookings/{id}/cancel", post(cancel_booking))
}

/// POST /v1/bookings
async fn create_booking(
    State(state): State<AppState>,
    AuthUser(actor): AuthUser,
    AppJson(req): AppJson<CreateBookingRequest>,
) -> Result<(StatusCode, Json<Booking>), AppError> {
    let count = match req.passenger_count {
        Some(count) => count,
        None => record_count(req.passengers.len())?,
    };

    let mut ledger = state.ledger.lock().await;
    let booking = ledger
        .create_booking(req.flight_id, &actor, count, req.passengers)
        .await?;

    Ok((StatusCode::CREATED, Json(booking)))
}

/// GET /v1/bookings
async fn my_bookings(
    State(state): State<AppState>,
    AuthUser(actor): AuthUser,
) -> Json<Vec<Booking>> {
    let ledger = state.ledger.lock().await;
    Json(ledger.bookings_for_user(&actor.user_id).into_iter().cloned().collect())
}

/// GET /v1/bookings/{id}
async fn get_booking(
    State(state): State<AppState>,
    AuthUser(actor): AuthUser,
    AppPath(booking_id): AppPath<Uuid>,
) -> Result<Json<Booking>, AppError> {
    let ledger = state.ledger.lock().await;
    let booking = ledger.booking_for(&actor, booking_id)?;
    Ok(Json(booking.clone()))
}

/// POST /v1/bookings/{id}/cancel
async fn cancel_booking(
    State(state): State<AppState>,
    AuthUser(actor): AuthUser,
    AppPath(booking_id): AppPath<Uuid>,
) -> Result<Json<Booking>, AppError> {
    let mut ledger = state.ledger.lock().await;
    let booking = ledger.cancel_booking(booking_id, &actor).await?;
    Ok(Json(booking))
}

/// PATCH /v1/bookings/{id}
async fn update_booking(
    State(state): State<AppState>,
    AuthUser(actor): AuthUser,
    AppPath(booking_id): AppPath<Uuid>,
    AppJson(patch): AppJson<BookingPatch>,
) -> Result<Json<Booking>, AppError> {
    let mut ledger = state.ledger.lock().await;
    let booking = ledger.update_booking(booking_id, patch, &actor).await?;
    Ok(Json(booking))
}
