use axum::{
    response::{IntoResponse, Response, Redirect},
    http::StatusCode,
};
use crate::errors::AppError;

// The IntoResponse trait implementation converts AppError into a well-formed HTTP response.
impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        match self {
            // Authentication errors send the visitor back to the login form
            AppError::Auth(msg) => {
                tracing::warn!("Authentication failure: {}", msg);
                Redirect::to("/login").into_response()
            }

            AppError::Session(e) => {
                tracing::error!("Session store failure: {}", e);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    format!("Session error: {}", e)
                ).into_response()
            }

            // Missing templates are a deployment problem, not a client one
            AppError::File(e) => {
                tracing::error!("File failure: {}", e);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    format!("File error: {}", e)
                ).into_response()
            }

            AppError::Upload(e) => (
                StatusCode::BAD_REQUEST,
                format!("Upload error: {}", e)
            ).into_response(),
        }
    }
}
