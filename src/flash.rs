//! One-shot notices carried in the session until the next rendered page.

use serde::{Deserialize, Serialize};
use tower_sessions::Session;
use crate::errors::{AppResult, HostingError};

const FLASH_KEY: &str = "_flashes";

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum NoticeLevel {
    Success,
    Warning,
    Error,
}

impl NoticeLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            NoticeLevel::Success => "success",
            NoticeLevel::Warning => "warning",
            NoticeLevel::Error => "error",
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub level: NoticeLevel,
    pub message: String,
}

pub async fn push(session: &Session, level: NoticeLevel, message: impl Into<String>) -> AppResult<()> {
    let mut notices = session
        .get::<Vec<Notice>>(FLASH_KEY)
        .await?
        .unwrap_or_default();
    notices.push(Notice { level, message: message.into() });
    session.insert(FLASH_KEY, notices).await?;
    Ok(())
}

pub async fn success(session: &Session, message: impl Into<String>) -> AppResult<()> {
    push(session, NoticeLevel::Success, message).await
}

pub async fn rejection(session: &Session, err: &HostingError) -> AppResult<()> {
    push(session, err.level(), err.to_string()).await
}

/// Drains every pending notice, oldest first.
pub async fn take(session: &Session) -> AppResult<Vec<Notice>> {
    Ok(session
        .remove::<Vec<Notice>>(FLASH_KEY)
        .await?
        .unwrap_or_default())
}
