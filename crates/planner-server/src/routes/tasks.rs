use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use chrono::NaiveDate;
use serde::Deserialize;

use planner_core::projector;
use planner_core::store::{NewTaskFields, Snapshot};
use planner_core::task::Priority;

use crate::error::AppError;
use crate::routes::parse_date;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Request bodies
// ---------------------------------------------------------------------------

#[derive(Deserialize)]
pub struct ListQuery {
    pub date: Option<String>,
}

#[derive(Deserialize)]
pub struct AddTaskBody {
    pub date: String,
    pub slot: String,
    pub title: String,
    #[serde(default)]
    pub priority: Option<Priority>,
    #[serde(default)]
    pub assignee: Option<String>,
}

#[derive(Deserialize)]
pub struct SlotBody {
    pub slot: String,
}

#[derive(Deserialize)]
pub struct EditTitleBody {
    pub slot: String,
    pub title: String,
}

#[derive(Deserialize)]
pub struct ReassignBody {
    pub slot: String,
    pub assignee: String,
}

#[derive(Deserialize)]
pub struct DeleteQuery {
    pub slot: String,
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

fn day_view(date: NaiveDate, snapshot: &Snapshot) -> serde_json::Value {
    let slots: Vec<serde_json::Value> = snapshot
        .buckets()
        .iter()
        .map(|bucket| {
            serde_json::json!({
                "label": &bucket.label,
                "completed": bucket.tasks.iter().filter(|t| t.completed).count(),
                "total": bucket.tasks.len(),
                "tasks": &bucket.tasks,
            })
        })
        .collect();
    serde_json::json!({
        "date": date.to_string(),
        "progress": projector::progress_percentage(snapshot),
        "slots": slots,
    })
}

/// GET /api/tasks?date=YYYY-MM-DD — load and return the day's slot buckets.
/// Without a date, re-serves the currently selected day.
pub async fn list_tasks(
    State(app): State<AppState>,
    Query(query): Query<ListQuery>,
) -> Result<Json<serde_json::Value>, AppError> {
    let date = match &query.date {
        Some(s) => parse_date(s)?,
        None => app.store.selected_date().await,
    };
    let outcome = app.store.load_for_date(date).await?;
    let snapshot = match outcome.applied() {
        Some(snapshot) => snapshot,
        // Overtaken by a newer selection; serve whatever is current.
        None => app.store.snapshot().await,
    };
    Ok(Json(day_view(date, &snapshot)))
}

/// POST /api/tasks — add a task to a slot on a date.
pub async fn add_task(
    State(app): State<AppState>,
    Json(body): Json<AddTaskBody>,
) -> Result<(StatusCode, Json<serde_json::Value>), AppError> {
    let date = parse_date(&body.date)?;
    if let Some(assignee) = &body.assignee {
        if !app.roster.contains(assignee) {
            return Err(planner_core::PlannerError::UnknownAssignee(assignee.clone()).into());
        }
    }
    let fields = NewTaskFields {
        title: body.title,
        priority: body.priority.unwrap_or_default(),
        assignee: body
            .assignee
            .unwrap_or_else(|| planner_core::roster::UNASSIGNED.to_string()),
    };
    let task = app.store.add_task(&body.slot, fields, date).await?;
    Ok((StatusCode::CREATED, Json(serde_json::to_value(task)?)))
}

/// POST /api/tasks/:id/toggle — flip completion.
pub async fn toggle_task(
    State(app): State<AppState>,
    Path(id): Path<String>,
    Json(body): Json<SlotBody>,
) -> Result<Json<serde_json::Value>, AppError> {
    let task = app.store.toggle_completion(&body.slot, &id).await?;
    Ok(Json(serde_json::to_value(task)?))
}

/// PUT /api/tasks/:id/title — rename.
pub async fn edit_title(
    State(app): State<AppState>,
    Path(id): Path<String>,
    Json(body): Json<EditTitleBody>,
) -> Result<Json<serde_json::Value>, AppError> {
    let task = app.store.edit_title(&body.slot, &id, &body.title).await?;
    Ok(Json(serde_json::to_value(task)?))
}

/// PUT /api/tasks/:id/assignee — hand the task to a roster member.
pub async fn reassign_task(
    State(app): State<AppState>,
    Path(id): Path<String>,
    Json(body): Json<ReassignBody>,
) -> Result<Json<serde_json::Value>, AppError> {
    if !app.roster.contains(&body.assignee) {
        return Err(planner_core::PlannerError::UnknownAssignee(body.assignee).into());
    }
    let task = app.store.reassign(&body.slot, &id, &body.assignee).await?;
    Ok(Json(serde_json::to_value(task)?))
}

/// DELETE /api/tasks/:id?slot=… — remove a task from its slot.
pub async fn delete_task(
    State(app): State<AppState>,
    Path(id): Path<String>,
    Query(query): Query<DeleteQuery>,
) -> Result<Json<serde_json::Value>, AppError> {
    app.store.delete_task(&query.slot, &id).await?;
    Ok(Json(serde_json::json!({ "id": id, "deleted": true })))
}
