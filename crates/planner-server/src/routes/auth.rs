use axum::extract::State;
use axum::http::header;
use axum::http::HeaderMap;
use axum::Json;
use serde::Deserialize;

use crate::auth::{session_token, SESSION_COOKIE};
use crate::error::AppError;
use crate::state::AppState;

#[derive(Deserialize)]
pub struct SigninBody {
    pub email: String,
    pub password: String,
}

/// POST /api/auth/signin — exchange credentials for a session cookie.
pub async fn signin(
    State(app): State<AppState>,
    Json(body): Json<SigninBody>,
) -> Result<(HeaderMap, Json<serde_json::Value>), AppError> {
    let Some(provider) = app.auth.provider() else {
        return Err(AppError::bad_request("authentication is not configured"));
    };

    let session = provider.sign_in(&body.email, &body.password).await?;
    let user_id = session.user_id.clone();
    let token = app.auth.open_session(session).await;
    tracing::info!(%user_id, "session opened");

    let cookie = format!("{SESSION_COOKIE}={token}; HttpOnly; SameSite=Lax; Path=/");
    let mut headers = HeaderMap::new();
    headers.insert(
        header::SET_COOKIE,
        cookie.parse().expect("infallible: token is a uuid"),
    );
    Ok((headers, Json(serde_json::json!({ "userId": user_id }))))
}

/// POST /api/auth/signout — close the session and clear the cookie.
///
/// Token revocation at the identity service is best-effort; the local
/// session is gone either way.
pub async fn signout(
    State(app): State<AppState>,
    headers: HeaderMap,
) -> Result<(HeaderMap, Json<serde_json::Value>), AppError> {
    if let Some(token) = session_token(&headers) {
        if let Some(session) = app.auth.close_session(&token).await {
            if let Some(provider) = app.auth.provider() {
                if let Err(err) = provider.sign_out(&session.id_token).await {
                    tracing::warn!(%err, "identity sign-out failed; session closed locally");
                }
            }
        }
    }

    let clear = format!("{SESSION_COOKIE}=; Max-Age=0; HttpOnly; Path=/");
    let mut out = HeaderMap::new();
    out.insert(
        header::SET_COOKIE,
        clear.parse().expect("infallible: static cookie string"),
    );
    Ok((out, Json(serde_json::json!({ "signedOut": true }))))
}
