/// Error types for Feature Service
///
/// Store failures travel unchanged from the repository through the service
/// and are turned into HTTP responses only here.
use crate::db::RepositoryError;
use actix_web::{error::ResponseError, http::StatusCode, HttpResponse};
use thiserror::Error;

/// Result type for feature-service operations
pub type Result<T> = std::result::Result<T, AppError>;

/// Application error types
#[derive(Debug, Error)]
pub enum AppError {
    /// Backing store failed or was unreachable
    #[error("Persistence error: {0}")]
    Persistence(#[from] RepositoryError),
}

impl ResponseError for AppError {
    fn status_code(&self) -> StatusCode {
        match self {
            AppError::Persistence(RepositoryError::Unavailable(_)) => StatusCode::SERVICE_UNAVAILABLE,
            AppError::Persistence(RepositoryError::Database(_)) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        let status = self.status_code();
        let error_msg = self.to_string();

        tracing::error!(status = status.as_u16(), error = %error_msg, "Request failed");

        HttpResponse::build(status).json(serde_json::json!({
            "error": error_msg,
            "status": status.as_u16(),
        }))
    }
}
