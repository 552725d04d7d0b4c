use std::collections::HashMap;
use std::sync::Arc;

use axum::{
    body::Body,
    extract::{Request, State},
    http::header,
    middleware::Next,
    response::Response,
};
use docstore_client::{IdentityProvider, Session};
use tokio::sync::RwLock;
use uuid::Uuid;

pub const SESSION_COOKIE: &str = "planner_session";

/// Session registry backed by an identity provider.
///
/// With no provider configured the middleware is a transparent no-op — the
/// planner runs open for local single-user use. With a provider, signing in
/// exchanges credentials for a server-side session keyed by an opaque token
/// carried in the `planner_session` cookie.
#[derive(Clone)]
pub struct AuthState {
    provider: Option<Arc<dyn IdentityProvider>>,
    sessions: Arc<RwLock<HashMap<String, Session>>>,
}

impl AuthState {
    /// No identity service — all requests pass through.
    pub fn disabled() -> Self {
        AuthState {
            provider: None,
            sessions: Arc::new(RwLock::new(HashMap::new())),
        }
    }

    pub fn with_provider(provider: Arc<dyn IdentityProvider>) -> Self {
        AuthState {
            provider: Some(provider),
            sessions: Arc::new(RwLock::new(HashMap::new())),
        }
    }

    pub fn enabled(&self) -> bool {
        self.provider.is_some()
    }

    pub fn provider(&self) -> Option<&Arc<dyn IdentityProvider>> {
        self.provider.as_ref()
    }

    /// Register a signed-in session; returns the cookie token.
    pub async fn open_session(&self, session: Session) -> String {
        let token = Uuid::new_v4().to_string();
        self.sessions.write().await.insert(token.clone(), session);
        token
    }

    /// Drop a session, returning it so the identity token can be revoked.
    pub async fn close_session(&self, token: &str) -> Option<Session> {
        self.sessions.write().await.remove(token)
    }

    pub async fn is_valid(&self, token: &str) -> bool {
        self.sessions.read().await.contains_key(token)
    }
}

/// Pull the session token out of the request's `Cookie` header.
pub fn session_token(headers: &axum::http::HeaderMap) -> Option<String> {
    let cookies = headers.get(header::COOKIE)?.to_str().ok()?;
    for part in cookies.split(';') {
        if let Some(val) = part.trim().strip_prefix("planner_session=") {
            return Some(val.to_string());
        }
    }
    None
}

/// Axum middleware gating `/api/*` behind a valid session cookie.
///
/// Evaluated in order:
/// 1. No provider configured → passthrough
/// 2. `/api/auth/*` → passthrough (sign-in must be reachable)
/// 3. Non-API paths → passthrough
/// 4. Valid `planner_session` cookie → passthrough
/// 5. Otherwise → 401 JSON
pub async fn auth_middleware(
    State(auth): State<AuthState>,
    req: Request,
    next: Next,
) -> Response {
    if !auth.enabled() {
        return next.run(req).await;
    }

    let path = req.uri().path();
    if path.starts_with("/api/auth/") || !path.starts_with("/api/") {
        return next.run(req).await;
    }

    if let Some(token) = session_token(req.headers()) {
        if auth.is_valid(&token).await {
            return next.run(req).await;
        }
    }

    Response::builder()
        .status(401)
        .header("Content-Type", "application/json")
        .body(Body::from(r#"{"error":"unauthorized"}"#))
        .expect("infallible: all header values are valid ASCII")
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
