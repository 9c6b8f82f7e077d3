use chrono::Utc;
use crate::errors::HostingError;
use crate::models::Announcement;
use super::HostingService;

impl HostingService {
    pub async fn post_announcement(&self, author: &str, message: &str) -> Result<Announcement, HostingError> {
        let accounts = self.stores.accounts.read().await;
        if !accounts.get(author).is_some_and(|account| account.is_admin) {
            return Err(HostingError::AdminRequired);
        }
        if message.trim().is_empty() {
            return Err(HostingError::EmptyAnnouncement);
        }

        let announcement = Announcement {
            message: message.to_string(),
            author: author.to_string(),
            timestamp: Utc::now(),
        };
        self.stores.announcements.write().await.push(announcement.clone());
        tracing::info!("{} posted an announcement", author);
        Ok(announcement)
    }

    /// The newest `count` announcements, oldest of them first.
    pub async fn recent_announcements(&self, count: usize) -> Vec<Announcement> {
        let log = self.stores.announcements.read().await;
        log[log.len().saturating_sub(count)..].to_vec()
    }
}
