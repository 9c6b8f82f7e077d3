use axum::{
    extract::State,
    response::Response,
    Extension,
};
use chrono::Utc;
use tower_sessions::Session;
use crate::app::AppState;
use crate::errors::{AppError, AppResult};
use crate::middleware::CurrentUser;
use crate::models::proxy_file_size;
use crate::views::{self, escape_html, path_segment};

pub const RECENT_ANNOUNCEMENTS: usize = 3;
// Shown on the dashboard; nothing is measured
const SYSTEM_LOAD: u32 = 25;

pub async fn serve_user_dashboard(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
    session: Session,
) -> AppResult<Response> {
    tracing::info!("Accessing user dashboard");

    let account = state.hosting
        .account(&user.username)
        .await
        .ok_or_else(|| AppError::Auth(format!("User {} not found", user.username)))?;

    let processes = state.hosting.processes_for(&user.username).await;
    let announcements = state.hosting.recent_announcements(RECENT_ANNOUNCEMENTS).await;
    let now = Utc::now();

    let files_html = account.files.iter().map(|file| {
        format!(
            r#"<tr>
                <td>{}</td>
                <td>{}</td>
                <td class="action-cell">
                    <a href="/start/{}" class="start-btn">Start</a>
                    <a href="/delete/{}" class="delete-btn">Delete</a>
                </td>
            </tr>"#,
            escape_html(file),
            views::file_size(proxy_file_size(file)),
            path_segment(file),
            path_segment(file)
        )
    }).collect::<Vec<_>>().join("\n");

    let processes_html = processes.iter().map(|process| {
        format!(
            r#"<tr>
                <td>{}</td>
                <td>{}</td>
                <td class="status-{}">{}</td>
                <td>{}</td>
                <td>{}%</td>
                <td>{} MB</td>
                <td class="action-cell">
                    <a href="/stop/{}" class="stop-btn">Stop</a>
                    <a href="/restart_file/{}" class="restart-btn">Restart</a>
                    <a href="/view_logs/{}" class="view-btn">Logs</a>
                </td>
            </tr>"#,
            escape_html(process.id()),
            escape_html(process.filename()),
            process.status(),
            process.status(),
            views::relative_time(process.start_time(), now),
            process.cpu(),
            process.memory(),
            path_segment(process.id()),
            path_segment(process.id()),
            path_segment(process.id())
        )
    }).collect::<Vec<_>>().join("\n");

    let announcements_html = announcements.iter().map(|announcement| {
        format!(
            r#"<li class="announcement">
                <p>{}</p>
                <small>{} &middot; {}</small>
            </li>"#,
            escape_html(&announcement.message),
            escape_html(&announcement.author),
            views::relative_time(announcement.timestamp, now)
        )
    }).collect::<Vec<_>>().join("\n");

    let plan = if account.is_premium { "Premium" } else { "Free" };

    tracing::debug!(
        "Dashboard for {}: {} files, {} processes",
        user.username,
        account.files.len(),
        processes.len()
    );

    views::render(&session, "dashboard.html", &[
        ("username", escape_html(&account.username)),
        ("plan", plan.to_string()),
        ("file_count", account.files.len().to_string()),
        ("max_files", account.max_files.to_string()),
        ("storage_used", views::file_size(account.storage_used())),
        ("system_load", SYSTEM_LOAD.to_string()),
        ("files", files_html),
        ("processes", processes_html),
        ("announcements", announcements_html),
    ]).await
}
