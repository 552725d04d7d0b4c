use std::sync::Arc;

use docstore_client::IdentityProvider;
use planner_core::roster::Roster;
use planner_core::store::TaskStore;

use crate::auth::AuthState;

/// Shared application state passed to all route handlers.
#[derive(Clone)]
pub struct AppState {
    pub project: String,
    pub roster: Roster,
    pub store: Arc<TaskStore>,
    pub auth: AuthState,
}

impl AppState {
    pub fn new(
        project: impl Into<String>,
        roster: Roster,
        store: Arc<TaskStore>,
        provider: Option<Arc<dyn IdentityProvider>>,
    ) -> Self {
        AppState {
            project: project.into(),
            roster,
            store,
            auth: match provider {
                Some(p) => AuthState::with_provider(p),
                None => AuthState::disabled(),
            },
        }
    }
}
