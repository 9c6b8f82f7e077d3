mod hosting;
mod accounts;
mod files;
mod processes;
mod announcements;

pub use hosting::HostingService;
