use axum::{
    extract::{Request, State},
    middleware::Next,
    response::{IntoResponse, Redirect, Response},
};
use tower_sessions::Session;
use crate::app::AppState;
use crate::errors::{AppResult, HostingError};
use crate::flash;

pub const USERNAME_KEY: &str = "username";
// Cached at login for navigation only; authorization always asks the store
pub const IS_ADMIN_KEY: &str = "is_admin";

/// Identity of the logged-in caller, inserted by the guards.
#[derive(Debug, Clone)]
pub struct CurrentUser {
    pub username: String,
}

pub async fn session_username(session: &Session) -> AppResult<Option<String>> {
    Ok(session
        .get::<String>(USERNAME_KEY)
        .await?
        .filter(|username| !username.is_empty()))
}

pub async fn require_auth(
    session: Session,
    mut req: Request,
    next: Next,
) -> AppResult<Response> {
    match session_username(&session).await? {
        Some(username) => {
            req.extensions_mut().insert(CurrentUser { username });
            Ok(next.run(req).await)
        }
        None => Ok(Redirect::to("/login").into_response()),
    }
}

pub async fn require_admin(
    State(state): State<AppState>,
    session: Session,
    mut req: Request,
    next: Next,
) -> AppResult<Response> {
    let Some(username) = session_username(&session).await? else {
        return Ok(Redirect::to("/login").into_response());
    };

    if !state.hosting.is_admin(&username).await {
        tracing::warn!("{} was refused admin access to {}", username, req.uri().path());
        flash::rejection(&session, &HostingError::AdminRequired).await?;
        return Ok(Redirect::to("/dashboard").into_response());
    }

    req.extensions_mut().insert(CurrentUser { username });
    Ok(next.run(req).await)
}
