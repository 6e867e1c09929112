//! Configuration for the Paralegal gateway bot
//!
//! The control-plane connection is configured entirely through the
//! environment (`BOT_API_URL`, `BOT_API_TOKEN`); local settings such as
//! the heartbeat cadence live in `~/.paralegal/config.json`.

use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;
use thiserror::Error;
use tracing::{debug, info};

pub mod paths;

pub use paths::{config_path, data_dir};

/// Environment variable holding the control-plane base URL.
pub const ENV_API_URL: &str = "BOT_API_URL";
/// Environment variable holding the bot bearer credential.
pub const ENV_API_TOKEN: &str = "BOT_API_TOKEN";

/// Default per-request timeout.
pub const DEFAULT_TIMEOUT_MS: u64 = 30_000;

/// Errors in configuration systems
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("{0} environment variable is required")]
    MissingEnv(&'static str),

    #[error("config io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("config parse error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, ConfigError>;

/// Connection parameters for the control-plane gateway.
#[derive(Debug, Clone)]
pub struct GatewayConfig {
    /// Control-plane base URL, e.g. `https://example.legal`
    pub base_url: String,
    /// Bot credential sent as `Authorization: BotToken <token>`
    pub bot_token: String,
    /// Per-request timeout
    pub timeout: Duration,
}

impl GatewayConfig {
    pub fn new(base_url: impl Into<String>, bot_token: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            bot_token: bot_token.into(),
            timeout: Duration::from_millis(DEFAULT_TIMEOUT_MS),
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Build from the environment. Fails fast with the name of the
    /// missing variable so a misconfigured container dies loudly.
    pub fn from_env() -> Result<Self> {
        let base_url = read_env(ENV_API_URL).ok_or(ConfigError::MissingEnv(ENV_API_URL))?;
        let bot_token = read_env(ENV_API_TOKEN).ok_or(ConfigError::MissingEnv(ENV_API_TOKEN))?;
        Ok(Self::new(base_url, bot_token))
    }

    /// Whether both required environment variables are present. Tool
    /// factories use this to drop the gateway capability entirely
    /// instead of handing the agent a tool that fails on first use.
    pub fn env_is_configured() -> bool {
        read_env(ENV_API_URL).is_some() && read_env(ENV_API_TOKEN).is_some()
    }
}

fn read_env(name: &str) -> Option<String> {
    match std::env::var(name) {
        Ok(v) if !v.trim().is_empty() => Some(v),
        _ => None,
    }
}

/// Heartbeat loop settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HeartbeatSettings {
    #[serde(default = "default_heartbeat_enabled")]
    pub enabled: bool,
    #[serde(default = "default_heartbeat_interval")]
    pub interval_s: u64,
}

impl Default for HeartbeatSettings {
    fn default() -> Self {
        Self {
            enabled: default_heartbeat_enabled(),
            interval_s: default_heartbeat_interval(),
        }
    }
}

fn default_heartbeat_enabled() -> bool {
    true
}

fn default_heartbeat_interval() -> u64 {
    30 * 60
}

/// Notification settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NotifySettings {
    #[serde(default = "default_urgency")]
    pub default_urgency: String,
}

impl Default for NotifySettings {
    fn default() -> Self {
        Self {
            default_urgency: default_urgency(),
        }
    }
}

fn default_urgency() -> String {
    "normal".to_string()
}

/// Local bot settings (everything that is not the connection itself)
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Settings {
    #[serde(default)]
    pub heartbeat: HeartbeatSettings,
    #[serde(default)]
    pub notify: NotifySettings,
}

impl Settings {
    /// Load settings from the default location
    pub async fn load() -> Result<Self> {
        let path = config_path();
        Self::load_from(&path).await
    }

    /// Load from a specific location
    pub async fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            info!("no settings at {:?}, using defaults", path);
            return Ok(Settings::default());
        }

        debug!("loading settings from {:?}", path);
        let content = tokio::fs::read_to_string(path).await?;
        let settings: Settings = serde_json::from_str(&content)?;
        Ok(settings)
    }

    /// Save settings to the default location
    pub async fn save(&self) -> Result<()> {
        let path = config_path();
        self.save_to(&path).await
    }

    /// Save to a specific location
    pub async fn save_to(&self, path: &Path) -> Result<()> {
        debug!("saving settings to {:?}", path);

        if let Some(parent) = path.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }

        let content = serde_json::to_string_pretty(self)?;
        tokio::fs::write(path, content).await?;
        Ok(())
    }

    pub fn heartbeat_interval(&self) -> Duration {
        Duration::from_secs(self.heartbeat.interval_s)
    }
}
