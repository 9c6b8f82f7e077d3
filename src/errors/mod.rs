// Failure types for the dashboard: infrastructure errors end the request, hosting errors become notices.
use axum::extract::multipart::MultipartError;
use thiserror::Error;

pub mod hosting;
pub mod response;

pub use hosting::HostingError;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Authentication error: {0}")]
    Auth(String),

    #[error("Session error: {0}")]
    Session(#[from] tower_sessions::session::Error),

    #[error("File error: {0}")]
    File(#[from] std::io::Error),

    #[error("Upload error: {0}")]
    Upload(#[from] MultipartError),
}

pub type AppResult<T> = Result<T, AppError>;
