use uuid::Uuid;
use crate::errors::HostingError;
use crate::models::ProcessRecord;
use super::HostingService;

const PROCESS_ID_LEN: usize = 8;

fn new_process_id() -> String {
    let mut id = Uuid::new_v4().simple().to_string();
    id.truncate(PROCESS_ID_LEN);
    id
}

fn sorted(mut records: Vec<ProcessRecord>) -> Vec<ProcessRecord> {
    records.sort_by(|a, b| a.start_time().cmp(&b.start_time()).then_with(|| a.id().cmp(b.id())));
    records
}

impl HostingService {
    pub async fn start_process(&self, username: &str, filename: &str) -> Result<ProcessRecord, HostingError> {
        // Held across the insert so a concurrent delete cannot orphan the record
        let accounts = self.stores.accounts.read().await;
        if !accounts.get(username).is_some_and(|account| account.owns(filename)) {
            return Err(HostingError::FileNotFound);
        }

        let mut processes = self.stores.processes.write().await;
        let id = loop {
            let candidate = new_process_id();
            if !processes.contains_key(&candidate) {
                break candidate;
            }
        };

        let record = ProcessRecord::started(
            id.clone(),
            filename,
            username,
            self.settings.cpu,
            self.settings.memory,
        );
        processes.insert(id.clone(), record.clone());
        tracing::info!("{} started process {} for {}", username, id, filename);
        Ok(record)
    }

    pub async fn stop_process(&self, username: &str, process_id: &str) -> Result<(), HostingError> {
        let mut processes = self.stores.processes.write().await;
        let record = processes
            .get_mut(process_id)
            .filter(|p| p.is_owned_by(username))
            .ok_or(HostingError::ProcessNotFound)?;
        record.stop();
        tracing::info!("{} stopped process {}", username, process_id);
        Ok(())
    }

    pub async fn restart_process(&self, username: &str, process_id: &str) -> Result<(), HostingError> {
        let mut processes = self.stores.processes.write().await;
        let record = processes
            .get_mut(process_id)
            .filter(|p| p.is_owned_by(username))
            .ok_or(HostingError::ProcessNotFound)?;
        record.restart();
        tracing::info!("{} restarted process {}", username, process_id);
        Ok(())
    }

    /// A process as seen by `viewer`: owners see their own, admins see all.
    pub async fn visible_process(&self, viewer: &str, process_id: &str) -> Result<ProcessRecord, HostingError> {
        let accounts = self.stores.accounts.read().await;
        let is_admin = accounts.get(viewer).is_some_and(|account| account.is_admin);

        let processes = self.stores.processes.read().await;
        processes
            .get(process_id)
            .filter(|p| is_admin || p.is_owned_by(viewer))
            .cloned()
            .ok_or(HostingError::ProcessNotFound)
    }

    pub async fn processes_for(&self, username: &str) -> Vec<ProcessRecord> {
        let processes = self.stores.processes.read().await;
        sorted(processes.values().filter(|p| p.is_owned_by(username)).cloned().collect())
    }

    pub async fn all_processes(&self) -> Vec<ProcessRecord> {
        sorted(self.stores.processes.read().await.values().cloned().collect())
    }
}
