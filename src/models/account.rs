#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Account {
    pub username: String,
    pub password: String,   // Plaintext, the service keeps nothing durable
    pub is_admin: bool,
    pub is_premium: bool,
    pub files: Vec<String>, // Upload order, no duplicates
    pub max_files: u32,     // Displayed quota, never enforced
    pub is_blocked: bool,
}

impl Account {
    pub fn new(username: &str, password: &str, max_files: u32) -> Self {
        Self {
            username: username.to_string(),
            password: password.to_string(),
            is_admin: false,
            is_premium: false,
            files: Vec::new(),
            max_files,
            is_blocked: false,
        }
    }

    pub fn owns(&self, filename: &str) -> bool {
        self.files.iter().any(|f| f == filename)
    }

    pub fn storage_used(&self) -> u64 {
        self.files.iter().map(|f| proxy_file_size(f)).sum()
    }
}

/// Size shown for an uploaded file: one KiB per character of its name.
pub fn proxy_file_size(filename: &str) -> u64 {
    filename.chars().count() as u64 * 1024
}
