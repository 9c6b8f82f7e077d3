use axum::{
    extract::{Multipart, Path, State},
    response::{IntoResponse, Response, Redirect},
    Extension,
};
use tower_sessions::Session;
use crate::app::AppState;
use crate::errors::{AppResult, HostingError};
use crate::flash;
use crate::middleware::CurrentUser;

pub async fn upload_file(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
    session: Session,
    mut multipart: Multipart,
) -> AppResult<Response> {
    let outcome = match read_upload_filename(&mut multipart).await? {
        Some(filename) => state.hosting.upload_file(&user.username, &filename).await,
        None => Err(HostingError::NoFileSelected),
    };

    match outcome {
        Ok(()) => flash::success(&session, "File uploaded successfully!").await?,
        Err(err) => {
            tracing::info!("Upload rejected for {}: {}", user.username, err);
            flash::rejection(&session, &err).await?;
        }
    }

    Ok(Redirect::to("/dashboard").into_response())
}

// Returns the filename of the `file` field; its contents are drained and dropped
async fn read_upload_filename(multipart: &mut Multipart) -> AppResult<Option<String>> {
    let mut filename = None;

    while let Some(mut field) = multipart.next_field().await? {
        let name = field.name().unwrap_or("").to_string();
        if name != "file" {
            tracing::warn!("Unexpected form field: {}", name);
            continue;
        }

        let file_name = field.file_name().unwrap_or("").to_string();
        let mut size = 0;
        while let Some(chunk) = field.chunk().await? {
            size += chunk.len();
        }
        tracing::debug!("Received upload {} ({} bytes)", file_name, size);
        filename = Some(file_name);
    }

    Ok(filename)
}

pub async fn delete_file(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
    session: Session,
    Path(filename): Path<String>,
) -> AppResult<Response> {
    tracing::info!("Attempting to delete {} for user {}", filename, user.username);

    // Unknown files are ignored without a notice
    if state.hosting.delete_file(&user.username, &filename).await.is_ok() {
        flash::success(&session, "File deleted!").await?;
    }

    Ok(Redirect::to("/dashboard").into_response())
}
