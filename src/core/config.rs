use anyhow::{bail, Context, Result};
use serde::Deserialize;
use std::path::PathBuf;

use crate::models::enrollment::FormVariant;

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub server: ServerConfig,
    pub logging: LoggingConfig,
    #[serde(default)]
    pub storage: StorageConfig,
    #[serde(default)]
    pub attendance: AttendanceConfig,
    #[serde(default)]
    pub enrollment: EnrollmentConfig,
    #[serde(default)]
    pub sessions: SessionConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    pub port: Option<u16>,
    pub unix_socket: Option<PathBuf>,
    #[serde(default = "default_num_threads")]
    pub num_threads: usize,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,
    #[serde(default = "default_log_format")]
    pub format: String,
    #[serde(default = "default_console")]
    pub console: bool,
}

#[derive(Debug, Clone, Deserialize)]
pub struct StorageConfig {
    /// Key-value log file. `None` or `""` keeps clock records in memory only.
    #[serde(default = "default_kv_path")]
    pub path: Option<PathBuf>,
    /// Compact the log on startup after replay
    #[serde(default = "default_compact_on_start")]
    pub compact_on_start: bool,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AttendanceConfig {
    #[serde(default = "default_simulated_latency_ms")]
    pub simulated_latency_ms: u64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct EnrollmentConfig {
    #[serde(default)]
    pub form_variant: FormVariant,
    #[serde(default = "default_iris_scanner_online")]
    pub iris_scanner_online: bool,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SessionConfig {
    #[serde(default = "default_idle_timeout")]
    pub idle_timeout: i64,
    #[serde(default = "default_sweep_interval")]
    pub sweep_interval: u64,
    #[serde(default = "default_session_capacity")]
    pub capacity: usize,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            path: default_kv_path(),
            compact_on_start: default_compact_on_start(),
        }
    }
}

impl Default for AttendanceConfig {
    fn default() -> Self {
        Self {
            simulated_latency_ms: default_simulated_latency_ms(),
        }
    }
}

impl Default for EnrollmentConfig {
    fn default() -> Self {
        Self {
            form_variant: FormVariant::default(),
            iris_scanner_online: default_iris_scanner_online(),
        }
    }
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            idle_timeout: default_idle_timeout(),
            sweep_interval: default_sweep_interval(),
            capacity: default_session_capacity(),
        }
    }
}

// Default value functions
fn default_num_threads() -> usize {
    num_cpus::get()
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_format() -> String {
    "json".to_string()
}

fn default_console() -> bool {
    false
}

fn default_kv_path() -> Option<PathBuf> {
    Some(PathBuf::from("abis.kv"))
}

fn default_compact_on_start() -> bool {
    true
}

fn default_simulated_latency_ms() -> u64 {
    1000
}

fn default_iris_scanner_online() -> bool {
    false
}

fn default_idle_timeout() -> i64 {
    7200 // 2 hours
}

fn default_sweep_interval() -> u64 {
    300 // 5 minutes
}

fn default_session_capacity() -> usize {
    1024
}

impl Config {
    /// Load configuration from a TOML file
    pub fn from_file(path: &PathBuf) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .context(format!("Failed to read config file: {}", path.display()))?;

        Self::from_toml(&content)
    }

    pub fn from_toml(content: &str) -> Result<Self> {
        let config: Config = toml::from_str(content)
            .context("Failed to parse config file")?;

        config.validate()?;

        Ok(config)
    }

    /// Validate configuration values
    pub fn validate(&self) -> Result<()> {
        if self.server.port.is_none() && self.server.unix_socket.is_none() {
            bail!("Either port or unix_socket must be specified in server config");
        }

        if let Some(port) = self.server.port {
            if port == 0 {
                bail!("Server port must be greater than 0");
            }
        }

        if self.server.num_threads == 0 {
            bail!("num_threads must be greater than 0");
        }

        let valid_levels = ["trace", "debug", "info", "warn", "error"];
        if !valid_levels.contains(&self.logging.level.as_str()) {
            bail!(
                "Invalid log level '{}'. Must be one of: trace, debug, info, warn, error",
                self.logging.level
            );
        }

        let valid_formats = ["json", "console"];
        if !valid_formats.contains(&self.logging.format.as_str()) {
            bail!(
                "Invalid log format '{}'. Must be one of: json, console",
                self.logging.format
            );
        }

        if self.attendance.simulated_latency_ms > 30_000 {
            bail!("simulated_latency_ms must not exceed 30000");
        }

        if self.sessions.idle_timeout <= 0 {
            bail!("idle_timeout must be greater than 0");
        }

        if self.sessions.sweep_interval == 0 {
            bail!("sweep_interval must be greater than 0");
        }

        if self.sessions.idle_timeout <= self.sessions.sweep_interval as i64 {
            bail!(
                "idle_timeout ({}) must be greater than sweep_interval ({})",
                self.sessions.idle_timeout,
                self.sessions.sweep_interval
            );
        }

        if self.sessions.capacity == 0 {
            bail!("session capacity must be greater than 0");
        }

        Ok(())
    }
}
