mod auth;
mod dashboard;
mod files;
mod processes;
mod admin;

pub use auth::{serve_home, serve_login_page, handle_login, serve_register_page, handle_register, handle_logout};
pub use dashboard::serve_user_dashboard;
pub use files::{upload_file, delete_file};
pub use processes::{start_process, stop_process, restart_process, view_logs};
pub use admin::{serve_admin_panel, make_announcement, block_user, unblock_user};
