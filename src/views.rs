//! Page rendering: templates under `templates/` with `{{name}}` placeholders.

use std::borrow::Cow;
use axum::response::{Html, IntoResponse, Response};
use chrono::{DateTime, Utc};
use tower_sessions::Session;
use crate::errors::{AppError, AppResult};
use crate::flash::{self, Notice};
use crate::middleware::{session_username, IS_ADMIN_KEY};

const TEMPLATE_DIR: &str = "templates";

pub fn load_template(name: &str) -> AppResult<String> {
    let path = format!("{}/{}", TEMPLATE_DIR, name);
    std::fs::read_to_string(&path).map_err(|e| {
        tracing::error!("Failed to read template {}: {}", path, e);
        AppError::File(e)
    })
}

/// Substitutes every `{{name}}` in one pass, so substituted values are never
/// scanned again. Unknown placeholders are left as they are.
pub fn fill(template: &str, vars: &[(&str, String)]) -> String {
    let mut out = String::with_capacity(template.len());
    let mut rest = template;

    while let Some(start) = rest.find("{{") {
        out.push_str(&rest[..start]);
        let after = &rest[start + 2..];
        match after.find("}}") {
            Some(end) => {
                let key = &after[..end];
                match vars.iter().find(|(name, _)| *name == key) {
                    Some((_, value)) => out.push_str(value),
                    None => out.push_str(&rest[start..start + 2 + end + 2]),
                }
                rest = &after[end + 2..];
            }
            None => {
                out.push_str(&rest[start..]);
                rest = "";
            }
        }
    }
    out.push_str(rest);
    out
}

pub fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

/// Percent-encodes a value used as a single path segment.
pub fn path_segment(value: &str) -> Cow<'_, str> {
    urlencoding::encode(value)
}

pub fn relative_time(then: DateTime<Utc>, now: DateTime<Utc>) -> String {
    let seconds = (now - then).num_seconds();

    fn plural(n: i64, unit: &str) -> String {
        format!("{} {}{} ago", n, unit, if n > 1 { "s" } else { "" })
    }

    match seconds {
        s if s < 60 => "Just now".to_string(),
        s if s < 3_600 => plural(s / 60, "minute"),
        s if s < 86_400 => plural(s / 3_600, "hour"),
        s if s < 2_592_000 => plural(s / 86_400, "day"),
        s if s < 31_536_000 => plural(s / 2_592_000, "month"),
        s => plural(s / 31_536_000, "year"),
    }
}

pub fn file_size(bytes: u64) -> String {
    const KB: u64 = 1024;
    const MB: u64 = KB * 1024;
    const GB: u64 = MB * 1024;

    match bytes {
        b if b < KB => format!("{} B", b),
        b if b < MB => format!("{:.1} KB", b as f64 / KB as f64),
        b if b < GB => format!("{:.1} MB", b as f64 / MB as f64),
        b => format!("{:.1} GB", b as f64 / GB as f64),
    }
}

fn render_notices(notices: &[Notice]) -> String {
    notices
        .iter()
        .map(|notice| format!(
            r#"<div class="notice notice-{}">{}</div>"#,
            notice.level.as_str(),
            escape_html(&notice.message)
        ))
        .collect::<Vec<_>>()
        .join("\n")
}

async fn render_nav(session: &Session) -> AppResult<String> {
    let Some(username) = session_username(session).await? else {
        return Ok(r#"<a href="/login">Login</a> <a href="/register">Register</a>"#.to_string());
    };

    let mut nav = String::from(r#"<a href="/dashboard">Dashboard</a>"#);
    if session.get::<bool>(IS_ADMIN_KEY).await?.unwrap_or(false) {
        nav.push_str(r#" <a href="/admin">Admin</a>"#);
    }
    nav.push_str(&format!(
        r#" <a href="/logout">Logout ({})</a>"#,
        escape_html(&username)
    ));
    Ok(nav)
}

/// Renders a template with the navigation bar and any pending notices.
/// `vars` values must already be escaped.
pub async fn render(session: &Session, template: &str, vars: &[(&str, String)]) -> AppResult<Response> {
    let page = load_template(template)?;
    let notices = flash::take(session).await?;

    let mut all = vec![
        ("nav", render_nav(session).await?),
        ("notices", render_notices(&notices)),
    ];
    all.extend(vars.iter().cloned());

    Ok(Html(fill(&page, &all)).into_response())
}
