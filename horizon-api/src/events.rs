use axum::{
    extract::State,
    response::sse::{Event, KeepAlive, Sse},
    routing::get,
    Router,
};
use futures_util::{Stream, StreamExt};
use serde::Deserialize;
use std::convert::Infallible;
use tokio_stream::wrappers::BroadcastStream;
use uuid::Uuid;

use crate::{extract::AppQuery, state::AppState};

#[derive(Debug, Deserialize)]
pub struct EventFilter {
    pub flight_id: Option<Uuid>,
}

pub fn routes() -> Router<AppState> {
    Router::new().route("/v1/events", get(stream_events))
}

/// GET /v1/events[?flight_id=...]
///
/// Streams committed ledger changes so open views can refresh availability.
async fn stream_events(
    State(state): State<AppState>,
    AppQuery(filter): AppQuery<EventFilter>,
) -> Sse<impl Stream<Item = Result<Event, Infallible>>> {
    let rx = state.events.subscribe();

    let stream = BroadcastStream::new(rx).filter_map(move |result| {
        let wanted = filter.flight_id;
        async move {
            // Lagged receivers just miss events
            let event = result.ok()?;
            if let Some(id) = wanted {
                if event.flight_id() != Some(id) {
                    return None;
                }
            }
            Event::default()
                .event(event.kind())
                .json_data(&event)
                .ok()
                .map(Ok)
        }
    });

    Sse::new(stream).keep_alive(KeepAlive::default())
}
