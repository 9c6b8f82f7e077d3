use axum::{
    extract::{Form, Path, State},
    response::{IntoResponse, Response, Redirect},
    Extension,
};
use chrono::Utc;
use tower_sessions::Session;
use crate::app::AppState;
use crate::errors::{AppResult, HostingError};
use crate::flash;
use crate::middleware::CurrentUser;
use crate::models::AnnouncementForm;
use crate::views::{self, escape_html, path_segment};

fn yes_no(flag: bool) -> &'static str {
    if flag { "yes" } else { "no" }
}

pub async fn serve_admin_panel(
    State(state): State<AppState>,
    session: Session,
) -> AppResult<Response> {
    let accounts = state.hosting.accounts().await;
    let processes = state.hosting.all_processes().await;
    let now = Utc::now();

    let users_html = accounts.iter().map(|account| {
        let (action, label) = if account.is_blocked {
            ("unblock", "Unblock")
        } else {
            ("block", "Block")
        };
        format!(
            r#"<tr>
                <td>{}</td>
                <td>{}</td>
                <td>{}</td>
                <td>{}/{}</td>
                <td>{}</td>
                <td class="action-cell">
                    <form method="post" action="/admin/{}/{}"><button type="submit">{}</button></form>
                </td>
            </tr>"#,
            escape_html(&account.username),
            yes_no(account.is_admin),
            yes_no(account.is_premium),
            account.files.len(),
            account.max_files,
            yes_no(account.is_blocked),
            action,
            path_segment(&account.username),
            label
        )
    }).collect::<Vec<_>>().join("\n");

    let processes_html = processes.iter().map(|process| {
        format!(
            r#"<tr>
                <td><a href="/view_logs/{}">{}</a></td>
                <td>{}</td>
                <td>{}</td>
                <td class="status-{}">{}</td>
                <td>{}</td>
            </tr>"#,
            path_segment(process.id()),
            escape_html(process.id()),
            escape_html(process.owner()),
            escape_html(process.filename()),
            process.status(),
            process.status(),
            views::relative_time(process.start_time(), now)
        )
    }).collect::<Vec<_>>().join("\n");

    views::render(&session, "admin.html", &[
        ("user_count", accounts.len().to_string()),
        ("process_count", processes.len().to_string()),
        ("users", users_html),
        ("processes", processes_html),
    ]).await
}

pub async fn make_announcement(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
    session: Session,
    Form(form): Form<AnnouncementForm>,
) -> AppResult<Response> {
    match state.hosting.post_announcement(&user.username, &form.message).await {
        Ok(_) => flash::success(&session, "Announcement posted!").await?,
        Err(HostingError::EmptyAnnouncement) => {}
        Err(err) => flash::rejection(&session, &err).await?,
    }
    Ok(Redirect::to("/admin").into_response())
}

pub async fn block_user(
    state: State<AppState>,
    user: Extension<CurrentUser>,
    session: Session,
    Path(username): Path<String>,
) -> AppResult<Response> {
    set_blocked(state, user, session, username, true).await
}

pub async fn unblock_user(
    state: State<AppState>,
    user: Extension<CurrentUser>,
    session: Session,
    Path(username): Path<String>,
) -> AppResult<Response> {
    set_blocked(state, user, session, username, false).await
}

async fn set_blocked(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
    session: Session,
    username: String,
    blocked: bool,
) -> AppResult<Response> {
    match state.hosting.set_blocked(&user.username, &username, blocked).await {
        Ok(()) => {
            let verb = if blocked { "blocked" } else { "unblocked" };
            flash::success(&session, format!("User {} {}.", username, verb)).await?;
        }
        Err(err) => flash::rejection(&session, &err).await?,
    }
    Ok(Redirect::to("/admin").into_response())
}
