use config::{builder::DefaultState, ConfigBuilder, ConfigError};
use serde::Deserialize;

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub server: ServerConfig,
    pub session: SessionConfig,
    pub upload: UploadConfig,
    pub account: AccountConfig,
    pub process: ProcessConfig,
    pub seed: SeedConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

#[derive(Debug, Deserialize, Clone)]
pub struct SessionConfig {
    pub secret: String,
    pub cookie_name: String,
    pub secure: bool,
}

#[derive(Debug, Deserialize, Clone)]
pub struct UploadConfig {
    pub max_file_size: usize,  // in bytes
    pub allowed_extension: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct AccountConfig {
    pub default_max_files: u32,
}

// Reported figures for mock processes, nothing is measured
#[derive(Debug, Deserialize, Clone)]
pub struct ProcessConfig {
    pub cpu: u32,
    pub memory: u32,  // in MB
}

#[derive(Debug, Deserialize, Clone)]
pub struct SeedConfig {
    pub admin_username: String,
    pub admin_password: String,
    pub admin_max_files: u32,
    pub demo_data: bool,
}

impl Config {
    /// Layers built-in defaults, `config/default.toml`, `APP_*` variables and
    /// finally `PORT` / `SESSION_SECRET`.
    pub fn load() -> Result<Self, ConfigError> {
        let mut builder = Self::with_defaults()?
            .add_source(config::File::with_name("config/default").required(false))
            .add_source(
                config::Environment::with_prefix("APP")
                    .prefix_separator("_")
                    .separator("__"),
            );

        if let Ok(port) = std::env::var("PORT") {
            builder = builder.set_override("server.port", port)?;
        }
        if let Ok(secret) = std::env::var("SESSION_SECRET") {
            builder = builder.set_override("session.secret", secret)?;
        }

        builder.build()?.try_deserialize()
    }

    fn with_defaults() -> Result<ConfigBuilder<DefaultState>, ConfigError> {
        config::Config::builder()
            .set_default("server.host", "0.0.0.0")?
            .set_default("server.port", 5000_i64)?
            .set_default("session.secret", "dev-secret-key-12345")?
            .set_default("session.cookie_name", "session")?
            .set_default("session.secure", false)?
            .set_default("upload.max_file_size", 10_i64 * 1024 * 1024)?
            .set_default("upload.allowed_extension", ".py")?
            .set_default("account.default_max_files", 10_i64)?
            .set_default("process.cpu", 25_i64)?
            .set_default("process.memory", 128_i64)?
            .set_default("seed.admin_username", "admin")?
            .set_default("seed.admin_password", "admin123")?
            .set_default("seed.admin_max_files", 50_i64)?
            .set_default("seed.demo_data", true)
    }
}

#[cfg(test)]
impl Config {
    pub fn defaults() -> Self {
        Self::with_defaults()
            .and_then(|builder| builder.build())
            .and_then(|config| config.try_deserialize())
            .expect("built-in defaults must deserialize")
    }

    /// Defaults without the demo files, announcement and process.
    pub fn bare() -> Self {
        let mut config = Self::defaults();
        config.seed.demo_data = false;
        config
    }
}
