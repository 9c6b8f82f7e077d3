use axum::{
    body::{to_bytes, Body},
    http::{header, Request, StatusCode},
    response::Response,
};
use tower::ServiceExt;
use super::*;

const BOUNDARY: &str = "pyhost-test-boundary";

/// Drives the router like a browser: keeps the session cookie between calls.
struct TestClient {
    app: Router,
    state: AppState,
    cookie: Option<String>,
}

impl TestClient {
    fn new() -> Self {
        let state = AppState::new(Config::bare());
        Self {
            app: build_router(state.clone()),
            state,
            cookie: None,
        }
    }

    async fn send(&mut self, mut request: Request<Body>) -> Response {
        if let Some(cookie) = &self.cookie {
            request.headers_mut().insert(header::COOKIE, cookie.parse().unwrap());
        }
        let response = self.app.clone().oneshot(request).await.unwrap();

        if let Some(set_cookie) = response.headers().get(header::SET_COOKIE) {
            let pair = set_cookie.to_str().unwrap().split(';').next().unwrap().to_string();
            self.cookie = match pair.split_once('=') {
                Some((_, value)) if !value.is_empty() => Some(pair),
                _ => None,
            };
        }
        response
    }

    async fn get(&mut self, path: &str) -> Response {
        self.send(Request::get(path).body(Body::empty()).unwrap()).await
    }

    async fn post_form(&mut self, path: &str, fields: &[(&str, &str)]) -> Response {
        let body = fields
            .iter()
            .map(|(k, v)| format!("{}={}", urlencoding::encode(k), urlencoding::encode(v)))
            .collect::<Vec<_>>()
            .join("&");
        let request = Request::post(path)
            .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
            .body(Body::from(body))
            .unwrap();
        self.send(request).await
    }

    async fn upload(&mut self, filename: &str) -> Response {
        let body = format!(
            "--{b}\r\nContent-Disposition: form-data; name=\"file\"; filename=\"{f}\"\r\n\
             Content-Type: text/x-python\r\n\r\nprint('hello')\r\n--{b}--\r\n",
            b = BOUNDARY,
            f = filename
        );
        let request = Request::post("/upload")
            .header(header::CONTENT_TYPE, format!("multipart/form-data; boundary={}", BOUNDARY))
            .body(Body::from(body))
            .unwrap();
        self.send(request).await
    }

    async fn login(&mut self, username: &str, password: &str) -> Response {
        self.post_form("/login", &[("username", username), ("password", password)]).await
    }

    async fn register_and_login(&mut self, username: &str, password: &str) {
        let response = self.post_form("/register", &[("username", username), ("password", password)]).await;
        assert_redirect(&response, "/login");
        let response = self.login(username, password).await;
        assert_redirect(&response, "/dashboard");
    }
}

fn assert_redirect(response: &Response, location: &str) {
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(response.headers()[header::LOCATION], location);
}

async fn body_text(response: Response) -> String {
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    String::from_utf8(bytes.to_vec()).unwrap()
}

#[tokio::test]
async fn protected_routes_redirect_anonymous_visitors_to_login() {
    let mut client = TestClient::new();
    for path in ["/dashboard", "/admin", "/start/bot.py", "/stop/abc123", "/view_logs/abc123"] {
        let response = client.get(path).await;
        assert_redirect(&response, "/login");
    }
    let response = client.post_form("/make_announcement", &[("message", "hi")]).await;
    assert_redirect(&response, "/login");
}

#[tokio::test]
async fn home_sends_logged_in_users_to_the_dashboard() {
    let mut client = TestClient::new();
    assert_eq!(client.get("/").await.status(), StatusCode::OK);

    client.register_and_login("alice", "password1").await;
    assert_redirect(&client.get("/").await, "/dashboard");
}

#[tokio::test]
async fn login_failures_show_the_right_notice() {
    let mut client = TestClient::new();
    client.state.hosting.register("alice", "password1").await.unwrap();

    let response = client.login("alice", "wrong").await;
    assert_eq!(response.status(), StatusCode::OK);
    assert!(body_text(response).await.contains("Invalid credentials!"));

    client.state.hosting.set_blocked("admin", "alice", true).await.unwrap();
    let response = client.login("alice", "password1").await;
    let page = body_text(response).await;
    assert!(page.contains("Your account is blocked!"));
    assert!(!page.contains("Invalid credentials!"));
}

#[tokio::test]
async fn registration_errors_rerender_the_form() {
    let mut client = TestClient::new();
    let response = client.post_form("/register", &[("username", "alice"), ("password", "12345")]).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert!(body_text(response).await.contains("Password must be at least 6 characters!"));
    assert!(client.state.hosting.account("alice").await.is_none());
}

#[tokio::test]
async fn upload_start_delete_scenario() {
    let mut client = TestClient::new();
    client.register_and_login("alice", "password1").await;

    assert_redirect(&client.upload("bot.py").await, "/dashboard");
    assert_redirect(&client.get("/start/bot.py").await, "/dashboard");

    let processes = client.state.hosting.processes_for("alice").await;
    assert_eq!(processes.len(), 1);
    assert_eq!(processes[0].owner(), "alice");
    assert_eq!(processes[0].status(), crate::models::ProcessStatus::Running);

    let dashboard = body_text(client.get("/dashboard").await).await;
    assert!(dashboard.contains(&format!("Process {} started!", processes[0].id())));
    assert!(dashboard.contains("bot.py"));

    assert_redirect(&client.get("/delete/bot.py").await, "/dashboard");
    assert!(client.state.hosting.account("alice").await.unwrap().files.is_empty());
    assert!(client.state.hosting.processes_for("alice").await.is_empty());
}

#[tokio::test]
async fn upload_notices_cover_each_outcome() {
    let mut client = TestClient::new();
    client.register_and_login("alice", "password1").await;
    client.get("/dashboard").await;

    client.upload("bot.py").await;
    client.upload("bot.py").await;
    client.upload("notes.txt").await;

    let dashboard = body_text(client.get("/dashboard").await).await;
    assert!(dashboard.contains("File uploaded successfully!"));
    assert!(dashboard.contains(r#"<div class="notice notice-warning">File already exists!</div>"#));
    assert!(dashboard.contains("Only Python (.py) files are allowed"));
    assert_eq!(client.state.hosting.account("alice").await.unwrap().files, vec!["bot.py"]);
}

#[tokio::test]
async fn starting_someone_elses_file_reports_not_found() {
    let mut client = TestClient::new();
    client.state.hosting.register("bob", "password1").await.unwrap();
    client.state.hosting.upload_file("bob", "bot.py").await.unwrap();
    client.register_and_login("alice", "password1").await;

    assert_redirect(&client.get("/start/bot.py").await, "/dashboard");
    assert!(body_text(client.get("/dashboard").await).await.contains("File not found!"));
    assert!(client.state.hosting.all_processes().await.is_empty());
}

#[tokio::test]
async fn dashboard_shows_the_last_three_announcements_in_order() {
    let mut client = TestClient::new();
    client.login("admin", "admin123").await;

    for message in ["Alpha news", "Bravo news", "Charlie news", "Delta news"] {
        let response = client.post_form("/make_announcement", &[("message", message)]).await;
        assert_redirect(&response, "/admin");
    }

    let dashboard = body_text(client.get("/dashboard").await).await;
    assert!(!dashboard.contains("Alpha news"));
    let positions: Vec<usize> = ["Bravo news", "Charlie news", "Delta news"]
        .iter()
        .map(|m| dashboard.find(m).unwrap())
        .collect();
    assert!(positions[0] < positions[1] && positions[1] < positions[2]);
}

#[tokio::test]
async fn non_admins_cannot_post_announcements() {
    let mut client = TestClient::new();
    client.register_and_login("alice", "password1").await;

    let response = client.post_form("/make_announcement", &[("message", "hijack")]).await;
    assert_redirect(&response, "/dashboard");
    assert!(client.state.hosting.recent_announcements(10).await.is_empty());

    let dashboard = body_text(client.get("/dashboard").await).await;
    assert!(dashboard.contains(r#"<div class="notice notice-error">Admin access required!</div>"#));

    assert_redirect(&client.get("/admin").await, "/dashboard");
}

#[tokio::test]
async fn admin_panel_lists_accounts_with_block_actions() {
    let mut client = TestClient::new();
    client.login("admin", "admin123").await;
    assert_eq!(client.get("/admin").await.status(), StatusCode::OK);

    client.state.hosting.register("carol", "password1").await.unwrap();
    client.state.hosting.set_blocked("admin", "carol", true).await.unwrap();
    let panel = body_text(client.get("/admin").await).await;
    assert!(panel.contains("carol"));
    assert!(panel.contains(r#"action="/admin/unblock/carol""#));
}

#[tokio::test]
async fn admins_block_and_unblock_users() {
    let mut client = TestClient::new();
    client.state.hosting.register("alice", "password1").await.unwrap();
    client.login("admin", "admin123").await;

    assert_redirect(&client.post_form("/admin/block/alice", &[]).await, "/admin");
    assert!(client.state.hosting.account("alice").await.unwrap().is_blocked);

    assert_redirect(&client.post_form("/admin/block/admin", &[]).await, "/admin");
    assert!(!client.state.hosting.account("admin").await.unwrap().is_blocked);
    assert!(body_text(client.get("/admin").await).await.contains("You cannot block your own account!"));

    client.post_form("/admin/unblock/alice", &[]).await;
    assert!(!client.state.hosting.account("alice").await.unwrap().is_blocked);
}

#[tokio::test]
async fn logs_are_rendered_for_the_owner_only() {
    let mut client = TestClient::new();
    client.state.hosting.register("bob", "password1").await.unwrap();
    client.state.hosting.upload_file("bob", "bot.py").await.unwrap();
    let foreign = client.state.hosting.start_process("bob", "bot.py").await.unwrap();

    client.register_and_login("alice", "password1").await;
    client.upload("mine.py").await;
    client.get("/start/mine.py").await;
    let own = client.state.hosting.processes_for("alice").await.remove(0);

    let response = client.get(&format!("/view_logs/{}", own.id())).await;
    assert_eq!(response.status(), StatusCode::OK);
    let page = body_text(response).await;
    assert!(page.contains(&format!("Process ID: {}", own.id())));
    assert!(page.contains("Status: running"));

    assert_redirect(&client.get(&format!("/view_logs/{}", foreign.id())).await, "/dashboard");
}

#[tokio::test]
async fn stop_and_restart_round_trip_through_routes() {
    let mut client = TestClient::new();
    client.register_and_login("alice", "password1").await;
    client.upload("bot.py").await;
    client.get("/start/bot.py").await;
    let id = client.state.hosting.processes_for("alice").await[0].id().to_string();

    assert_redirect(&client.get(&format!("/stop/{}", id)).await, "/dashboard");
    assert_eq!(
        client.state.hosting.processes_for("alice").await[0].status(),
        crate::models::ProcessStatus::Stopped
    );

    assert_redirect(&client.get(&format!("/restart_file/{}", id)).await, "/dashboard");
    assert_eq!(
        client.state.hosting.processes_for("alice").await[0].status(),
        crate::models::ProcessStatus::Running
    );

    assert_redirect(&client.get("/stop/unknown").await, "/dashboard");
}

#[tokio::test]
async fn logout_clears_the_identity() {
    let mut client = TestClient::new();
    client.register_and_login("alice", "password1").await;

    assert_redirect(&client.get("/logout").await, "/");
    assert_redirect(&client.get("/dashboard").await, "/login");
}
