use axum::extract::State;
use axum::Json;

use planner_core::projector;
use planner_core::roster::Roster;

use crate::error::AppError;
use crate::state::AppState;

/// GET /api/state — project name, selected date, and progress summary.
pub async fn get_state(State(app): State<AppState>) -> Result<Json<serde_json::Value>, AppError> {
    let snapshot = app.store.snapshot().await;
    Ok(Json(serde_json::json!({
        "project": app.project,
        "date": app.store.selected_date().await.to_string(),
        "progress": projector::progress_percentage(&snapshot),
        "completed": snapshot.completed_count(),
        "total": snapshot.total(),
    })))
}

/// GET /api/slots — the registry's labels, in order.
pub async fn get_slots(State(app): State<AppState>) -> Json<serde_json::Value> {
    let labels: Vec<&str> = app.store.registry().labels().collect();
    Json(serde_json::json!({ "slots": labels }))
}

/// GET /api/roster — members with their badge color and initial.
pub async fn get_roster(State(app): State<AppState>) -> Json<serde_json::Value> {
    let members: Vec<serde_json::Value> = app
        .roster
        .members()
        .iter()
        .map(|name| {
            serde_json::json!({
                "name": name,
                "initial": Roster::initial_for(name),
                "color": app.roster.color_for(name),
            })
        })
        .collect();
    Json(serde_json::json!({ "members": members }))
}
