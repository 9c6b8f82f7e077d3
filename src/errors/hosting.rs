use thiserror::Error;
use crate::flash::NoticeLevel;

/// Rejections from the hosting stores. The `Display` text is shown to the
/// user as-is.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum HostingError {
    #[error("Username already exists!")]
    UsernameTaken,

    #[error("Username must be at least 3 characters!")]
    UsernameTooShort,

    #[error("Password must be at least 6 characters!")]
    PasswordTooShort,

    #[error("Invalid credentials!")]
    InvalidCredentials,

    #[error("Your account is blocked!")]
    AccountBlocked,

    #[error("User not found!")]
    UserNotFound,

    #[error("You cannot block your own account!")]
    SelfBlock,

    #[error("Admin access required!")]
    AdminRequired,

    #[error("No file selected")]
    NoFileSelected,

    #[error("Only Python ({0}) files are allowed")]
    UnsupportedExtension(String),

    #[error("File already exists!")]
    DuplicateFile,

    #[error("File not found!")]
    FileNotFound,

    #[error("Process not found!")]
    ProcessNotFound,

    #[error("Announcement is empty")]
    EmptyAnnouncement,
}

impl HostingError {
    pub fn level(&self) -> NoticeLevel {
        match self {
            HostingError::DuplicateFile => NoticeLevel::Warning,
            _ => NoticeLevel::Error,
        }
    }
}
