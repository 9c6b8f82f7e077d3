use crate::errors::HostingError;
use crate::models::Account;
use super::HostingService;

const MIN_USERNAME_LEN: usize = 3;
const MIN_PASSWORD_LEN: usize = 6;

impl HostingService {
    /// Creates an account with registration defaults. Checks run in order and
    /// the first failure wins.
    pub async fn register(&self, username: &str, password: &str) -> Result<(), HostingError> {
        let mut accounts = self.stores.accounts.write().await;

        if accounts.contains_key(username) {
            return Err(HostingError::UsernameTaken);
        }
        if username.chars().count() < MIN_USERNAME_LEN {
            return Err(HostingError::UsernameTooShort);
        }
        if password.chars().count() < MIN_PASSWORD_LEN {
            return Err(HostingError::PasswordTooShort);
        }

        let account = Account::new(username, password, self.settings.default_max_files);
        accounts.insert(username.to_string(), account);
        tracing::info!("Registered account: {}", username);
        Ok(())
    }

    /// Blocked accounts get their own rejection, even with a wrong password.
    /// Every other failure collapses to `InvalidCredentials`.
    pub async fn authenticate(&self, username: &str, password: &str) -> Result<Account, HostingError> {
        let accounts = self.stores.accounts.read().await;
        match accounts.get(username) {
            Some(account) if account.is_blocked => Err(HostingError::AccountBlocked),
            Some(account) if account.password == password => Ok(account.clone()),
            _ => Err(HostingError::InvalidCredentials),
        }
    }

    pub async fn account(&self, username: &str) -> Option<Account> {
        self.stores.accounts.read().await.get(username).cloned()
    }

    pub async fn is_admin(&self, username: &str) -> bool {
        self.stores
            .accounts
            .read()
            .await
            .get(username)
            .is_some_and(|account| account.is_admin)
    }

    pub async fn accounts(&self) -> Vec<Account> {
        let mut accounts: Vec<Account> = self.stores.accounts.read().await.values().cloned().collect();
        accounts.sort_by(|a, b| a.username.cmp(&b.username));
        accounts
    }

    pub async fn set_blocked(&self, actor: &str, username: &str, blocked: bool) -> Result<(), HostingError> {
        let mut accounts = self.stores.accounts.write().await;

        if !accounts.get(actor).is_some_and(|account| account.is_admin) {
            return Err(HostingError::AdminRequired);
        }
        if blocked && actor == username {
            return Err(HostingError::SelfBlock);
        }

        let account = accounts.get_mut(username).ok_or(HostingError::UserNotFound)?;
        account.is_blocked = blocked;
        tracing::info!("{} set blocked={} on {}", actor, blocked, username);
        Ok(())
    }
}
