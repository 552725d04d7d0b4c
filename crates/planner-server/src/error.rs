use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use docstore_client::DocstoreError;
use planner_core::PlannerError;

// ---------------------------------------------------------------------------
// Internal sentinels for explicit statuses
// ---------------------------------------------------------------------------

/// Private sentinel carrying an explicit HTTP 400 through the
/// `anyhow::Error` chain without touching the `PlannerError` enum.
#[derive(Debug)]
struct BadRequestError(String);

impl std::fmt::Display for BadRequestError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::error::Error for BadRequestError {}

/// Private sentinel carrying an explicit HTTP 401.
#[derive(Debug)]
struct UnauthorizedError(String);

impl std::fmt::Display for UnauthorizedError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::error::Error for UnauthorizedError {}

// ---------------------------------------------------------------------------
// AppError — unified error type for HTTP responses
// ---------------------------------------------------------------------------

/// Unified error type for HTTP responses.
#[derive(Debug)]
pub struct AppError(pub anyhow::Error);

impl AppError {
    /// Construct a 400 Bad Request error with the given message.
    pub fn bad_request(msg: impl Into<String>) -> Self {
        Self(BadRequestError(msg.into()).into())
    }

    /// Construct a 401 Unauthorized error.
    pub fn unauthorized(msg: impl Into<String>) -> Self {
        Self(UnauthorizedError(msg.into()).into())
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        // Explicit sentinels first, then the domain enums.
        if let Some(b) = self.0.downcast_ref::<BadRequestError>() {
            let body = serde_json::json!({ "error": b.0.clone() });
            return (StatusCode::BAD_REQUEST, axum::Json(body)).into_response();
        }
        if let Some(u) = self.0.downcast_ref::<UnauthorizedError>() {
            let body = serde_json::json!({ "error": u.0.clone() });
            return (StatusCode::UNAUTHORIZED, axum::Json(body)).into_response();
        }

        let status = if let Some(e) = self.0.downcast_ref::<PlannerError>() {
            match e {
                PlannerError::NotInitialized
                | PlannerError::EmptyTitle
                | PlannerError::UnknownSlot(_)
                | PlannerError::UnknownAssignee(_)
                | PlannerError::InvalidTimeLabel(_)
                | PlannerError::InvalidDate(_)
                | PlannerError::InvalidPriority(_) => StatusCode::BAD_REQUEST,
                PlannerError::TaskNotFound(_) => StatusCode::NOT_FOUND,
                PlannerError::Gateway(_) => StatusCode::BAD_GATEWAY,
                PlannerError::Io(_) | PlannerError::Yaml(_) | PlannerError::Json(_) => {
                    StatusCode::INTERNAL_SERVER_ERROR
                }
            }
        } else if let Some(e) = self.0.downcast_ref::<DocstoreError>() {
            match e {
                DocstoreError::Auth(_) => StatusCode::UNAUTHORIZED,
                _ => StatusCode::BAD_GATEWAY,
            }
        } else {
            StatusCode::INTERNAL_SERVER_ERROR
        };

        let body = serde_json::json!({ "error": self.0.to_string() });
        (status, axum::Json(body)).into_response()
    }
}

impl<E> From<E> for AppError
where
    E: Into<anyhow::Error>,
{
    fn from(err: E) -> Self {
        Self(err.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_title_maps_to_400() {
        let err = AppError(PlannerError::EmptyTitle.into());
        assert_eq!(err.into_response().status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn unknown_slot_maps_to_400() {
        let err = AppError(PlannerError::UnknownSlot("4:00 PM - 5:00 PM".into()).into());
        assert_eq!(err.into_response().status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn unknown_assignee_maps_to_400() {
        let err = AppError(PlannerError::UnknownAssignee("Nobody".into()).into());
        assert_eq!(err.into_response().status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn invalid_date_maps_to_400() {
        let err = AppError(PlannerError::InvalidDate("June 1st".into()).into());
        assert_eq!(err.into_response().status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn task_not_found_maps_to_404() {
        let err = AppError(PlannerError::TaskNotFound("t-1".into()).into());
        assert_eq!(err.into_response().status(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn gateway_error_maps_to_502() {
        let err = AppError(PlannerError::Gateway("store unreachable".into()).into());
        assert_eq!(err.into_response().status(), StatusCode::BAD_GATEWAY);
    }

    #[test]
    fn identity_rejection_maps_to_401() {
        let err = AppError(DocstoreError::Auth("INVALID_PASSWORD".into()).into());
        assert_eq!(err.into_response().status(), StatusCode::UNAUTHORIZED);
    }

    #[test]
    fn unknown_error_maps_to_500() {
        let err = AppError(anyhow::anyhow!("something unexpected"));
        assert_eq!(
            err.into_response().status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn bad_request_constructor_maps_to_400() {
        let err = AppError::bad_request("no such roster member");
        assert_eq!(err.into_response().status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn unauthorized_constructor_maps_to_401() {
        let err = AppError::unauthorized("sign in first");
        assert_eq!(err.into_response().status(), StatusCode::UNAUTHORIZED);
    }

    #[test]
    fn response_body_is_json_error_object() {
        let err = AppError(PlannerError::TaskNotFound("t-1".into()).into());
        let response = err.into_response();
        let ct = response
            .headers()
            .get(axum::http::header::CONTENT_TYPE)
            .expect("should have content-type");
        assert!(ct.to_str().unwrap().contains("application/json"));
    }
}
