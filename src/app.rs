use std::sync::Arc;
use axum::{
    routing::{get, post},
    Router,
    extract::DefaultBodyLimit,
    middleware::{from_fn, from_fn_with_state},
};
use sha2::{Digest, Sha512};
use tower_http::{
    services::ServeDir,
    limit::RequestBodyLimitLayer,
    trace::TraceLayer,
};
use tower_sessions::{cookie::{Key, SameSite}, MemoryStore, SessionManagerLayer};
use crate::{
    config::Config,
    handlers,
    middleware::{require_admin, require_auth},
    services::HostingService,
};

// Application state that can be shared between handlers
#[derive(Clone)]
pub struct AppState {
    pub hosting: HostingService,
    pub config: Arc<Config>,
}

impl AppState {
    pub fn new(config: Config) -> Self {
        Self {
            hosting: HostingService::new(&config),
            config: Arc::new(config),
        }
    }
}

// Signing keys need 64 bytes; any secret length is accepted by hashing it
fn session_key(secret: &str) -> Key {
    Key::from(Sha512::digest(secret.as_bytes()).as_slice())
}

pub fn build_router(state: AppState) -> Router {
    let config = state.config.clone();

    let session_layer = SessionManagerLayer::new(MemoryStore::default())
        .with_secure(config.session.secure)
        .with_same_site(SameSite::Lax)
        .with_name(config.session.cookie_name.clone())
        .with_signed(session_key(&config.session.secret));

    let user_routes = Router::new()
        .route("/dashboard", get(handlers::serve_user_dashboard))
        .route("/upload", post(handlers::upload_file))
        .route("/start/:filename", get(handlers::start_process))
        .route("/stop/:process_id", get(handlers::stop_process))
        .route("/restart_file/:process_id", get(handlers::restart_process))
        .route("/delete/:filename", get(handlers::delete_file))
        .route("/view_logs/:process_id", get(handlers::view_logs))
        .route_layer(from_fn(require_auth));

    let admin_routes = Router::new()
        .route("/admin", get(handlers::serve_admin_panel))
        .route("/make_announcement", post(handlers::make_announcement))
        .route("/admin/block/:username", post(handlers::block_user))
        .route("/admin/unblock/:username", post(handlers::unblock_user))
        .route_layer(from_fn_with_state(state.clone(), require_admin));

    Router::new()
        .route("/", get(handlers::serve_home))
        .route("/login", get(handlers::serve_login_page).post(handlers::handle_login))
        .route("/register", get(handlers::serve_register_page).post(handlers::handle_register))
        .route("/logout", get(handlers::handle_logout))
        .merge(user_routes)
        .merge(admin_routes)

        // Static files
        .nest_service("/static", ServeDir::new("static"))

        .layer(session_layer)
        .layer(TraceLayer::new_for_http())

        // File upload limits from config
        .layer(DefaultBodyLimit::disable())
        .layer(RequestBodyLimitLayer::new(config.upload.max_file_size))

        .with_state(state)
}

#[cfg(test)]
mod tests;
