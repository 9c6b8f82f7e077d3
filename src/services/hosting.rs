use std::collections::HashMap;
use std::sync::Arc;
use chrono::Utc;
use tokio::sync::RwLock;
use crate::config::Config;
use crate::models::{Account, Announcement, ProcessRecord};

// Lock order for operations spanning stores: accounts, processes, announcements.
pub(super) struct Stores {
    pub(super) accounts: RwLock<HashMap<String, Account>>,
    pub(super) processes: RwLock<HashMap<String, ProcessRecord>>,
    pub(super) announcements: RwLock<Vec<Announcement>>,
}

#[derive(Debug, Clone)]
pub(super) struct HostingSettings {
    pub(super) default_max_files: u32,
    pub(super) allowed_extension: String,
    pub(super) cpu: u32,
    pub(super) memory: u32,
}

/// In-memory credential store, process registry and announcement log.
/// Cloning shares the same stores.
#[derive(Clone)]
pub struct HostingService {
    pub(super) stores: Arc<Stores>,
    pub(super) settings: Arc<HostingSettings>,
}

impl HostingService {
    pub fn new(config: &Config) -> Self {
        let settings = HostingSettings {
            default_max_files: config.account.default_max_files,
            allowed_extension: config.upload.allowed_extension.clone(),
            cpu: config.process.cpu,
            memory: config.process.memory,
        };

        let seed = &config.seed;
        let mut admin = Account::new(&seed.admin_username, &seed.admin_password, seed.admin_max_files);
        admin.is_admin = true;
        admin.is_premium = true;

        let mut processes = HashMap::new();
        let mut announcements = Vec::new();

        if seed.demo_data {
            admin.files = vec!["test.py".to_string(), "bot.py".to_string()];
            announcements.push(Announcement {
                message: "GOKU FREE HOSTING".to_string(),
                author: "DEV - @gokuuuu_1".to_string(),
                timestamp: Utc::now(),
            });
            let demo = ProcessRecord::started(
                "abc123".to_string(),
                "test.py",
                &admin.username,
                settings.cpu,
                settings.memory,
            );
            processes.insert(demo.id().to_string(), demo);
        }

        tracing::info!(
            "Seeded administrator {} (demo data: {})",
            admin.username,
            seed.demo_data
        );

        let mut accounts = HashMap::new();
        accounts.insert(admin.username.clone(), admin);

        Self {
            stores: Arc::new(Stores {
                accounts: RwLock::new(accounts),
                processes: RwLock::new(processes),
                announcements: RwLock::new(announcements),
            }),
            settings: Arc::new(settings),
        }
    }
}
