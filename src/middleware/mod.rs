mod auth;

pub use auth::{require_auth, require_admin, session_username, CurrentUser, USERNAME_KEY, IS_ADMIN_KEY};
