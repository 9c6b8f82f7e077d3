mod account;
mod announcement;
mod forms;
mod process;

pub use account::{Account, proxy_file_size};
pub use announcement::Announcement;
pub use forms::{LoginForm, RegisterForm, AnnouncementForm};
pub use process::{ProcessRecord, ProcessStatus};
