use crate::errors::HostingError;
use super::HostingService;

impl HostingService {
    /// Records an uploaded filename. The `max_files` quota is not checked here.
    pub async fn upload_file(&self, username: &str, filename: &str) -> Result<(), HostingError> {
        if !filename.ends_with(&self.settings.allowed_extension) {
            return Err(HostingError::UnsupportedExtension(self.settings.allowed_extension.clone()));
        }

        let mut accounts = self.stores.accounts.write().await;
        let account = accounts.get_mut(username).ok_or(HostingError::UserNotFound)?;

        if account.owns(filename) {
            return Err(HostingError::DuplicateFile);
        }

        account.files.push(filename.to_string());
        tracing::info!("{} uploaded {}", username, filename);
        Ok(())
    }

    /// Removes the file and every process the caller started from it.
    /// Returns how many processes went with it.
    pub async fn delete_file(&self, username: &str, filename: &str) -> Result<usize, HostingError> {
        let mut accounts = self.stores.accounts.write().await;
        let mut processes = self.stores.processes.write().await;

        let account = accounts.get_mut(username).ok_or(HostingError::UserNotFound)?;
        if !account.owns(filename) {
            return Err(HostingError::FileNotFound);
        }
        account.files.retain(|f| f != filename);

        let before = processes.len();
        processes.retain(|_, p| !(p.filename() == filename && p.is_owned_by(username)));
        let removed = before - processes.len();

        tracing::info!("{} deleted {} ({} processes removed)", username, filename, removed);
        Ok(removed)
    }
}
