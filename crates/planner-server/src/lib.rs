pub mod auth;
pub mod error;
pub mod routes;
pub mod state;

use axum::middleware;
use axum::routing::{delete, get, post, put};
use axum::Router;
use tower_http::cors::{Any, CorsLayer};

pub use state::AppState;

/// Build the axum Router with all API routes and middleware.
/// Used by `serve()` and available for integration testing.
pub fn build_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        // Auth
        .route("/api/auth/signin", post(routes::auth::signin))
        .route("/api/auth/signout", post(routes::auth::signout))
        // State
        .route("/api/state", get(routes::meta::get_state))
        .route("/api/slots", get(routes::meta::get_slots))
        .route("/api/roster", get(routes::meta::get_roster))
        // Tasks
        .route("/api/tasks", get(routes::tasks::list_tasks))
        .route("/api/tasks", post(routes::tasks::add_task))
        .route("/api/tasks/{id}/toggle", post(routes::tasks::toggle_task))
        .route("/api/tasks/{id}/title", put(routes::tasks::edit_title))
        .route(
            "/api/tasks/{id}/assignee",
            put(routes::tasks::reassign_task),
        )
        .route("/api/tasks/{id}", delete(routes::tasks::delete_task))
        // Calendar events
        .route("/api/events", get(routes::events::list_events))
        .layer(middleware::from_fn_with_state(
            state.auth.clone(),
            auth::auth_middleware,
        ))
        .layer(cors)
        .with_state(state)
}

/// Start the planner API server.
pub async fn serve(state: AppState, port: u16, open_browser: bool) -> anyhow::Result<()> {
    let addr = format!("0.0.0.0:{port}");
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    serve_on(state, listener, open_browser).await
}

/// Start the planner API server on a pre-bound listener.
///
/// Unlike `serve`, this accepts a `TcpListener` that was already bound so the
/// caller can read the actual port before starting (useful when `port = 0` and
/// the OS picks a free port).
pub async fn serve_on(
    state: AppState,
    listener: tokio::net::TcpListener,
    open_browser: bool,
) -> anyhow::Result<()> {
    let actual_port = listener.local_addr()?.port();
    let app = build_router(state);

    tracing::info!("planner API listening on http://localhost:{actual_port}");

    if open_browser {
        let url = format!("http://localhost:{actual_port}");
        let _ = open::that(&url);
    }

    axum::serve(listener, app).await?;
    Ok(())
}
