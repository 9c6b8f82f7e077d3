use axum::{
    extract::{Path, State},
    response::{IntoResponse, Response, Redirect},
    Extension,
};
use tower_sessions::Session;
use crate::app::AppState;
use crate::errors::AppResult;
use crate::flash;
use crate::middleware::CurrentUser;
use crate::views::{self, escape_html};

pub async fn start_process(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
    session: Session,
    Path(filename): Path<String>,
) -> AppResult<Response> {
    match state.hosting.start_process(&user.username, &filename).await {
        Ok(process) => {
            flash::success(&session, format!("Process {} started!", process.id())).await?;
        }
        Err(err) => {
            tracing::info!("Start rejected for {} ({}): {}", user.username, filename, err);
            flash::rejection(&session, &err).await?;
        }
    }
    Ok(Redirect::to("/dashboard").into_response())
}

// Stop and restart ignore unknown or foreign ids without a notice
pub async fn stop_process(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
    session: Session,
    Path(process_id): Path<String>,
) -> AppResult<Response> {
    if state.hosting.stop_process(&user.username, &process_id).await.is_ok() {
        flash::success(&session, "Process stopped!").await?;
    }
    Ok(Redirect::to("/dashboard").into_response())
}

pub async fn restart_process(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
    session: Session,
    Path(process_id): Path<String>,
) -> AppResult<Response> {
    if state.hosting.restart_process(&user.username, &process_id).await.is_ok() {
        flash::success(&session, "Process restarted!").await?;
    }
    Ok(Redirect::to("/dashboard").into_response())
}

pub async fn view_logs(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
    session: Session,
    Path(process_id): Path<String>,
) -> AppResult<Response> {
    tracing::info!("Viewing logs for process: {}", process_id);

    let process = match state.hosting.visible_process(&user.username, &process_id).await {
        Ok(process) => process,
        Err(err) => {
            flash::rejection(&session, &err).await?;
            return Ok(Redirect::to("/dashboard").into_response());
        }
    };

    views::render(&session, "logs.html", &[
        ("filename", escape_html(process.filename())),
        ("status", process.status().to_string()),
        ("logs", escape_html(&process.simulated_log())),
    ]).await
}
