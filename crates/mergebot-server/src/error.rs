use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use mergebot_core::MergebotError;

/// Unified error type for HTTP responses.
#[derive(Debug)]
pub struct AppError(pub anyhow::Error);

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = if let Some(e) = self.0.downcast_ref::<MergebotError>() {
            match e {
                // Fixed, documented body shape for webhook rejection.
                MergebotError::InvalidSignature => {
                    (StatusCode::UNAUTHORIZED, "Invalid signature".to_string())
                }
                MergebotError::Fetch { .. } => (StatusCode::BAD_GATEWAY, e.to_string()),
                MergebotError::ReviewService(_)
                | MergebotError::Persistence(_)
                | MergebotError::Comment { .. }
                | MergebotError::Merge { .. }
                | MergebotError::Json(_) => (StatusCode::INTERNAL_SERVER_ERROR, e.to_string()),
            }
        } else {
            (StatusCode::INTERNAL_SERVER_ERROR, self.0.to_string())
        };

        let body = serde_json::json!({ "error": message });
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
