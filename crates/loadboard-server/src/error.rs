use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use loadboard_app::envelope::ErrorEnvelope;
use thiserror::Error;
use tracing::error;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Malformed payload: {0}")]
    MalformedPayload(String),

    #[error("{}", service_message(.0))]
    Service(#[from] loadboard_types::Error),

    #[error("Internal error: {0}")]
    InternalError(String),
}

/// Validation and store errors carry their own message, without the
/// workspace error prefix.
fn service_message(err: &loadboard_types::Error) -> String {
    match err {
        loadboard_types::Error::Validation(e) => e.to_string(),
        loadboard_types::Error::Store(e) => e.to_string(),
        other => other.to_string(),
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = match &self {
            AppError::MalformedPayload(_) => StatusCode::BAD_REQUEST,
            AppError::Service(e) if e.is_validation() => StatusCode::BAD_REQUEST,
            AppError::Service(_) => StatusCode::INTERNAL_SERVER_ERROR,
            AppError::InternalError(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };

        if status.is_server_error() {
            error!("API error: {}", self);
        }

        (status, Json(ErrorEnvelope::new(self.to_string()))).into_response()
    }
}
