use std::fmt;
use chrono::{DateTime, Utc};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProcessStatus {
    Running,
    Stopped,
}

impl ProcessStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ProcessStatus::Running => "running",
            ProcessStatus::Stopped => "stopped",
        }
    }
}

impl fmt::Display for ProcessStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A mock "running program". Nothing is executed; only the status and start
/// time ever change, and the owner is fixed at creation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProcessRecord {
    id: String,
    filename: String,
    owner: String,
    status: ProcessStatus,
    start_time: DateTime<Utc>,
    cpu: u32,
    memory: u32,
}

impl ProcessRecord {
    pub fn started(id: String, filename: &str, owner: &str, cpu: u32, memory: u32) -> Self {
        Self {
            id,
            filename: filename.to_string(),
            owner: owner.to_string(),
            status: ProcessStatus::Running,
            start_time: Utc::now(),
            cpu,
            memory,
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn filename(&self) -> &str {
        &self.filename
    }

    pub fn owner(&self) -> &str {
        &self.owner
    }

    pub fn status(&self) -> ProcessStatus {
        self.status
    }

    pub fn start_time(&self) -> DateTime<Utc> {
        self.start_time
    }

    pub fn cpu(&self) -> u32 {
        self.cpu
    }

    pub fn memory(&self) -> u32 {
        self.memory
    }

    pub fn is_owned_by(&self, username: &str) -> bool {
        self.owner == username
    }

    pub fn stop(&mut self) {
        self.status = ProcessStatus::Stopped;
    }

    pub fn restart(&mut self) {
        self.status = ProcessStatus::Running;
        self.start_time = Utc::now();
    }

    /// Placeholder log text; there is no real process output to show.
    pub fn simulated_log(&self) -> String {
        let mut log = format!("Process ID: {}\n", self.id);
        log.push_str(&format!("Status: {}\n", self.status));
        log.push_str(&format!("Started: {}\n", self.start_time.format("%Y-%m-%d %H:%M:%S")));
        log.push_str("\n[Simulated logs - uploaded files are never executed]\n");
        log.push_str("2025-12-09 17:30:00 - Process started\n");
        log.push_str("2025-12-09 17:30:05 - Initializing modules\n");
        log.push_str("2025-12-09 17:30:10 - Main loop running\n");
        log
    }
}
