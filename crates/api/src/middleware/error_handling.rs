//! # Error Handling Middleware
//!
//! Maps workflow errors to HTTP status codes and a `{"error": message}` JSON
//! body so every endpoint fails the same way.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use leavedesk_core::errors::HrError;
use serde_json::json;

/// Application error wrapper that provides HTTP status code mapping
///
/// Handlers return `Result<_, AppError>` and use `?` on any `HrResult`.
///
/// # Example
///
/// ```
/// use axum::Json;
/// use leavedesk_api::middleware::error_handling::AppError;
/// use leavedesk_core::errors::HrError;
///
/// async fn handler(found: bool) -> Result<Json<&'static str>, AppError> {
///     if !found {
///         return Err(AppError(HrError::NotFound("Leave request not found".into())));
///     }
///     Ok(Json("ok"))
/// }
/// # fn main() {}
/// ```
#[derive(Debug)]
pub struct AppError(pub HrError);

impl AppError {
    pub fn status(&self) -> StatusCode {
        match &self.0 {
            HrError::NotFound(_) => StatusCode::NOT_FOUND,
            HrError::Validation(_) => StatusCode::BAD_REQUEST,
            HrError::Authentication(_) => StatusCode::UNAUTHORIZED,
            HrError::Authorization(_) => StatusCode::FORBIDDEN,
            HrError::Conflict(_) => StatusCode::CONFLICT,
            HrError::InsufficientBalance { .. } => StatusCode::UNPROCESSABLE_ENTITY,
            HrError::Database(_) => StatusCode::INTERNAL_SERVER_ERROR,
            HrError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();

        // Infrastructure failures are logged in full but answered generically
        let message = if status.is_server_error() {
            tracing::error!(error = ?self.0, "Request failed");
            "Internal server error".to_string()
        } else {
            self.0.to_string()
        };
        let body = Json(json!({ "error": message }));

        (status, body).into_response()
    }
}

impl From<HrError> for AppError {
    fn from(err: HrError) -> Self {
        AppError(err)
    }
}
