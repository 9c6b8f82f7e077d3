use axum::{
    extract::{Form, State},
    response::{IntoResponse, Response, Redirect},
};
use tower_sessions::Session;
use crate::app::AppState;
use crate::errors::AppResult;
use crate::flash;
use crate::middleware::{session_username, USERNAME_KEY, IS_ADMIN_KEY};
use crate::models::{LoginForm, RegisterForm};
use crate::views;

pub async fn serve_home(session: Session) -> AppResult<Response> {
    if session_username(&session).await?.is_some() {
        return Ok(Redirect::to("/dashboard").into_response());
    }
    views::render(&session, "index.html", &[]).await
}

pub async fn serve_login_page(session: Session) -> AppResult<Response> {
    views::render(&session, "login.html", &[]).await
}

pub async fn serve_register_page(session: Session) -> AppResult<Response> {
    views::render(&session, "register.html", &[]).await
}

#[axum::debug_handler]
pub async fn handle_login(
    State(state): State<AppState>,
    session: Session,
    Form(login_form): Form<LoginForm>,
) -> AppResult<Response> {
    tracing::info!("Login attempt for user: {}", login_form.username);

    match state.hosting.authenticate(&login_form.username, &login_form.password).await {
        Ok(account) => {
            session.cycle_id().await?;
            session.insert(USERNAME_KEY, &account.username).await?;
            session.insert(IS_ADMIN_KEY, account.is_admin).await?;
            flash::success(&session, "Login successful!").await?;
            tracing::info!("User logged in: {}", account.username);
            Ok(Redirect::to("/dashboard").into_response())
        }
        Err(err) => {
            tracing::info!("Login rejected for {}: {}", login_form.username, err);
            flash::rejection(&session, &err).await?;
            views::render(&session, "login.html", &[]).await
        }
    }
}

pub async fn handle_register(
    State(state): State<AppState>,
    session: Session,
    Form(register_form): Form<RegisterForm>,
) -> AppResult<Response> {
    match state.hosting.register(&register_form.username, &register_form.password).await {
        Ok(()) => {
            flash::success(&session, "Registration successful! Please login.").await?;
            Ok(Redirect::to("/login").into_response())
        }
        Err(err) => {
            tracing::info!("Registration rejected for {}: {}", register_form.username, err);
            flash::rejection(&session, &err).await?;
            views::render(&session, "register.html", &[]).await
        }
    }
}

#[axum::debug_handler]
pub async fn handle_logout(
    session: Session,
) -> AppResult<Response> {
    if let Some(username) = session.remove::<String>(USERNAME_KEY).await? {
        tracing::info!("User logged out: {}", username);
    }
    session.remove::<bool>(IS_ADMIN_KEY).await?;
    flash::success(&session, "Logged out successfully!").await?;
    Ok(Redirect::to("/").into_response())
}
