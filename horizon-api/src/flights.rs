use axum::{
    extract::State,
    http::StatusCode,
    routing::get,
    Json, Router,
};
use horizon_shared::{Flight, FlightPatch, FlightQuery, NewFlight};
use uuid::Uuid;

use crate::{
    error::AppError,
    extract::{AppJson, AppPath, AppQuery},
    middleware::AuthUser,
    state::AppState,
};

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/v1/flights", get(search_flights).post(add_flight))
        .route(
            "/v1/flights/{id}",
            get(get_flight).patch(update_flight).delete(delete_flight),
        )
}

/// GET /v1/flights?origin=JFK&destination=LAX&date=2026-12-01&seats=2
async fn search_flights(
    State(state): State<AppState>,
    AppQuery(query): AppQuery<FlightQuery>,
) -> Json<Vec<Flight>> {
    let ledger = state.ledger.lock().await;
    Json(ledger.search_flights(&query).into_iter().cloned().collect())
}

/// GET /v1/flights/{id}
async fn get_flight(
    State(state): State<AppState>,
    AppPath(flight_id): AppPath<Uuid>,
) -> Result<Json<Flight>, AppError> {
    let ledger = state.ledger.lock().await;
    ledger
        .flight(flight_id)
        .cloned()
        .map(Json)
        .ok_or_else(|| AppError::NotFoundError(format!("Flight not found: {}", flight_id)))
}

/// POST /v1/flights
async fn add_flight(
    State(state): State<AppState>,
    AuthUser(actor): AuthUser,
    AppJson(req): AppJson<NewFlight>,
) -> Result<(StatusCode, Json<Flight>), AppError> {
    let mut ledger = state.ledger.lock().await;
    let flight = ledger.add_flight(req, &actor).await?;
    Ok((StatusCode::CREATED, Json(flight)))
}

/// PATCH /v1/flights/{id}
async fn update_flight(
    State(state): State<AppState>,
    AuthUser(actor): AuthUser,
    AppPath(flight_id): AppPath<Uuid>,
    AppJson(patch): AppJson<FlightPatch>,
) -> Result<Json<Flight>, AppError> {
    let mut ledger = state.ledger.lock().await;
    let flight = ledger.update_flight(flight_id, patch, &actor).await?;
    Ok(Json(flight))
}

/// DELETE /v1/flights/{id}
async fn delete_flight(
    State(state): State<AppState>,
    AuthUser(actor): AuthUser,
    AppPath(flight_id): AppPath<Uuid>,
) -> Result<StatusCode, AppError> {
    let mut ledger = state.ledger.lock().await;
    ledger.delete_flight(flight_id, &actor).await?;
    Ok(StatusCode::NO_CONTENT)
}
