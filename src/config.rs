use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::Path;
use std::time::Duration;
use url::Url;

use crate::finger::FINGER_PORT;
use crate::webdir::DEFAULT_USER_AGENT;

#[derive(Debug, Deserialize, Clone, Default)]
pub struct Config {
    #[serde(default)]
    pub finger: FingerConfig,
    #[serde(default)]
    pub directory: DirectoryConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct FingerConfig {
    #[serde(default = "default_name_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for FingerConfig {
    fn default() -> Self {
        Self {
            host: default_name_host(),
            port: default_port(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

impl FingerConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

fn default_name_host() -> String {
    "linux.mit.edu".to_string()
}
fn default_port() -> u16 {
    FINGER_PORT
}
fn default_timeout_secs() -> u64 {
    10
}

#[derive(Debug, Deserialize, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum DirectoryBackend {
    /// HTML search page.
    #[default]
    Web,
    /// Finger queries against `finger_host`.
    Finger,
}

#[derive(Debug, Deserialize, Clone)]
pub struct DirectoryConfig {
    #[serde(default)]
    pub backend: DirectoryBackend,
    #[serde(default = "default_url")]
    pub url: String,
    #[serde(default = "default_options")]
    pub options: String,
    #[serde(default = "default_directory_host")]
    pub finger_host: String,
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
}

impl Default for DirectoryConfig {
    fn default() -> Self {
        Self {
            backend: DirectoryBackend::default(),
            url: default_url(),
            options: default_options(),
            finger_host: default_directory_host(),
            user_agent: default_user_agent(),
        }
    }
}

impl DirectoryConfig {
    /// The search endpoint as a URL; only `http` and `https` are accepted.
    pub fn endpoint(&self) -> Result<Url> {
        let url = Url::parse(&self.url)
            .with_context(|| format!("directory.url is not a valid URL: {}", self.url))?;
        match url.scheme() {
            "http" | "https" => Ok(url),
            other => anyhow::bail!("directory.url must be http or https, got '{}'", other),
        }
    }
}

fn default_url() -> String {
    "http://web.mit.edu/bin/cgicso".to_string()
}
fn default_options() -> String {
    "general".to_string()
}
fn default_directory_host() -> String {
    "web.mit.edu".to_string()
}
fn default_user_agent() -> String {
    DEFAULT_USER_AGENT.to_string()
}

pub fn load_config(path: &Path) -> Result<Config> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file: {}", path.display()))?;

    let config: Config = toml::from_str(&content).with_context(|| "Failed to parse config file")?;

    validate(&config)?;
    Ok(config)
}

pub fn validate(config: &Config) -> Result<()> {
    // Validate finger
    if config.finger.host.trim().is_empty() {
        anyhow::bail!("finger.host must not be empty");
    }
    if config.finger.port == 0 {
        anyhow::bail!("finger.port must be > 0");
    }
    if config.finger.timeout_secs == 0 {
        anyhow::bail!("finger.timeout_secs must be > 0");
    }

    // Validate directory
    match config.directory.backend {
        DirectoryBackend::Web => {
            config.directory.endpoint()?;
        }
        DirectoryBackend::Finger => {
            if config.directory.finger_host.trim().is_empty() {
                anyhow::bail!("directory.finger_host must not be empty for the finger backend");
            }
        }
    }

    Ok(())
}
