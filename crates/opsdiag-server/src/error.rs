use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use opsdiag_core::error::OpsdiagError;

// ---------------------------------------------------------------------------
// Internal sentinel for explicit 400 Bad Request errors
// ---------------------------------------------------------------------------

/// Carries an explicit 400 through the `anyhow::Error` chain for request
/// problems that have no `OpsdiagError` counterpart.
#[derive(Debug)]
struct BadRequestError(String);

impl std::fmt::Display for BadRequestError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::error::Error for BadRequestError {}

// ---------------------------------------------------------------------------
// AppError: unified error type for HTTP responses
// ---------------------------------------------------------------------------

#[derive(Debug)]
pub struct AppError(pub anyhow::Error);

impl AppError {
    pub fn bad_request(msg: impl Into<String>) -> Self {
        Self(BadRequestError(msg.into()).into())
    }

    pub fn join(e: tokio::task::JoinError) -> Self {
        Self(anyhow::anyhow!("task join error: {e}"))
    }
}

fn status_for(e: &OpsdiagError) -> StatusCode {
    match e {
        OpsdiagError::InvalidSlug(_)
        | OpsdiagError::InvalidProduct(_)
        | OpsdiagError::InvalidLever(_)
        | OpsdiagError::InvalidFeedbackKind(_)
        | OpsdiagError::InvalidRollupPolicy(_)
        | OpsdiagError::EmptyFeedback => StatusCode::BAD_REQUEST,
        OpsdiagError::FeedbackNotFound(_) => StatusCode::NOT_FOUND,
        OpsdiagError::DiagnosticExists { .. } => StatusCode::CONFLICT,
        OpsdiagError::MixedRollupInput { .. } => StatusCode::UNPROCESSABLE_ENTITY,
        OpsdiagError::Fetch(_) => StatusCode::BAD_GATEWAY,
        OpsdiagError::InvalidConfig(_)
        | OpsdiagError::Io(_)
        | OpsdiagError::Yaml(_)
        | OpsdiagError::Json(_) => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = if self.0.downcast_ref::<BadRequestError>().is_some() {
            StatusCode::BAD_REQUEST
        } else if let Some(e) = self.0.downcast_ref::<OpsdiagError>() {
            status_for(e)
        } else {
            StatusCode::INTERNAL_SERVER_ERROR
        };

        if status.is_server_error() {
            tracing::error!(error = %self.0, "request failed");
        }

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

    fn status(e: OpsdiagError) -> StatusCode {
        AppError(e.into()).into_response().status()
    }

    #[test]
    fn invalid_input_maps_to_400() {
        assert_eq!(status(OpsdiagError::InvalidLever("cost".into())), StatusCode::BAD_REQUEST);
        assert_eq!(status(OpsdiagError::EmptyFeedback), StatusCode::BAD_REQUEST);
        assert_eq!(status(OpsdiagError::InvalidSlug("BAD".into())), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn feedback_not_found_maps_to_404() {
        assert_eq!(status(OpsdiagError::FeedbackNotFound("F9".into())), StatusCode::NOT_FOUND);
    }

    #[test]
    fn duplicate_diagnostic_maps_to_409() {
        let e = OpsdiagError::DiagnosticExists {
            client: "acme".into(),
            product: "basic".into(),
        };
        assert_eq!(status(e), StatusCode::CONFLICT);
    }

    #[test]
    fn mixed_rollup_maps_to_422() {
        let e = OpsdiagError::MixedRollupInput {
            expected: "year 2026".into(),
            found: "year 2027".into(),
        };
        assert_eq!(status(e), StatusCode::UNPROCESSABLE_ENTITY);
    }

    #[test]
    fn fetch_failure_maps_to_502() {
        assert_eq!(status(OpsdiagError::Fetch("timeout".into())), StatusCode::BAD_GATEWAY);
    }

    #[test]
    fn io_error_maps_to_500() {
        let e = OpsdiagError::Io(std::io::Error::other("disk full"));
        assert_eq!(status(e), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn bad_request_constructor_maps_to_400() {
        let response = AppError::bad_request("limit must be positive").into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn non_core_error_maps_to_500() {
        let response = AppError(anyhow::anyhow!("something unexpected")).into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
