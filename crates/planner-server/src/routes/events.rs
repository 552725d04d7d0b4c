use axum::extract::{Query, State};
use axum::Json;
use serde::Deserialize;

use planner_core::projector;

use crate::error::AppError;
use crate::routes::parse_date;
use crate::state::AppState;

#[derive(Deserialize)]
pub struct EventsQuery {
    pub date: Option<String>,
}

/// GET /api/events?date=YYYY-MM-DD — the day's tasks projected as
/// calendar events. Clicking one in the UI round-trips the embedded
/// `taskId`/`timeSlot` into a toggle call.
pub async fn list_events(
    State(app): State<AppState>,
    Query(query): Query<EventsQuery>,
) -> Result<Json<serde_json::Value>, AppError> {
    let date = match &query.date {
        Some(s) => parse_date(s)?,
        None => app.store.selected_date().await,
    };
    let outcome = app.store.load_for_date(date).await?;
    let snapshot = match outcome.applied() {
        Some(snapshot) => snapshot,
        None => app.store.snapshot().await,
    };
    let events = projector::calendar_events(&snapshot, app.store.registry(), date);
    Ok(Json(serde_json::json!({
        "date": date.to_string(),
        "events": events,
    })))
}
