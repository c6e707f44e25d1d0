// src/config.rs
//! Client configuration - environment first, optional YAML file second, defaults last

use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::app_log;
use crate::utils::{normalize_base_path, normalize_base_url};

pub const DEFAULT_CONFIG_FILE: &str = "screener.yaml";
pub const DEFAULT_BASE_PATH: &str = "/alternate/";
pub const DEFAULT_TIMEOUT_SECS: u64 = 400;
pub const DEFAULT_REFRESH_DELAY_MS: u64 = 2000;
pub const DEFAULT_DEBOUNCE_MS: u64 = 800;
pub const DEFAULT_MIN_QUERY_LEN: usize = 2;
pub const DEFAULT_DOWNLOAD_DIR: &str = "downloads";

const ENV_BASE_URL: &str = "SCREENER_API_BASE_URL";
const ENV_BASE_PATH: &str = "SCREENER_BASE_PATH";
const ENV_CONFIG: &str = "SCREENER_CONFIG";
const ENV_TIMEOUT: &str = "SCREENER_TIMEOUT_SECONDS";
const ENV_DOWNLOAD_DIR: &str = "SCREENER_DOWNLOAD_DIR";

#[derive(Debug, Clone)]
pub struct ClientConfig {
    pub api_base_url: String,
    pub base_path: String,
    pub timeout_seconds: u64,
    /// Gap between an upload ack and the status/list refresh
    pub refresh_delay: Duration,
    pub debounce: Duration,
    pub min_query_len: usize,
    pub download_dir: PathBuf,
}

/// Shape of `screener.yaml`. Every key is optional.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct ConfigFile {
    pub api_base_url: Option<String>,
    pub base_path: Option<String>,
    pub timeout_seconds: Option<u64>,
    pub refresh_delay_ms: Option<u64>,
    pub debounce_ms: Option<u64>,
    pub min_query_len: Option<usize>,
    pub download_dir: Option<PathBuf>,
}

impl ConfigFile {
    pub fn parse(content: &str) -> Result<Self> {
        serde_yaml::from_str(content).context("Failed to parse screener config")
    }

    fn read(path: &Path) -> Result<Option<Self>> {
        if !path.exists() {
            return Ok(None);
        }

        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        Self::parse(&content).map(Some)
    }
}

impl ClientConfig {
    pub fn new(api_base_url: &str) -> Self {
        Self {
            api_base_url: normalize_base_url(api_base_url),
            base_path: DEFAULT_BASE_PATH.to_string(),
            timeout_seconds: DEFAULT_TIMEOUT_SECS,
            refresh_delay: Duration::from_millis(DEFAULT_REFRESH_DELAY_MS),
            debounce: Duration::from_millis(DEFAULT_DEBOUNCE_MS),
            min_query_len: DEFAULT_MIN_QUERY_LEN,
            download_dir: PathBuf::from(DEFAULT_DOWNLOAD_DIR),
        }
    }

    pub fn with_refresh_delay(mut self, delay: Duration) -> Self {
        self.refresh_delay = delay;
        self
    }

    pub fn with_debounce(mut self, debounce: Duration) -> Self {
        self.debounce = debounce;
        self
    }

    pub fn with_download_dir(mut self, dir: PathBuf) -> Self {
        self.download_dir = dir;
        self
    }

    /// Load from the process environment and the optional config file.
    /// `base_url` wins over every other source.
    pub fn load(base_url: Option<String>) -> Result<Self> {
        let config_path = std::env::var(ENV_CONFIG).unwrap_or_else(|_| DEFAULT_CONFIG_FILE.into());
        let file = ConfigFile::read(Path::new(&config_path))?;

        if file.is_some() {
            app_log!(info, "Loaded client configuration from {}", config_path);
        }

        Self::from_sources(file.unwrap_or_default(), |key| {
            if key == ENV_BASE_URL && base_url.is_some() {
                return base_url.clone();
            }
            std::env::var(key).ok()
        })
    }

    /// Merge an already parsed file with an environment lookup.
    /// Environment values win over file values.
    pub fn from_sources<F>(file: ConfigFile, env: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let api_base_url = env(ENV_BASE_URL)
            .or(file.api_base_url)
            .ok_or_else(|| anyhow::anyhow!("{} environment variable not set", ENV_BASE_URL))?;

        let mut config = Self::new(&api_base_url);
        config.validate()?;

        if let Some(path) = env(ENV_BASE_PATH).or(file.base_path) {
            config.base_path = normalize_base_path(&path);
        }

        if let Some(raw) = env(ENV_TIMEOUT) {
            config.timeout_seconds = raw
                .parse::<u64>()
                .with_context(|| format!("{} must be a number of seconds", ENV_TIMEOUT))?;
        } else if let Some(secs) = file.timeout_seconds {
            config.timeout_seconds = secs;
        }

        if let Some(ms) = file.refresh_delay_ms {
            config.refresh_delay = Duration::from_millis(ms);
        }
        if let Some(ms) = file.debounce_ms {
            config.debounce = Duration::from_millis(ms);
        }
        if let Some(len) = file.min_query_len {
            config.min_query_len = len;
        }
        if let Some(dir) = env(ENV_DOWNLOAD_DIR).map(PathBuf::from).or(file.download_dir) {
            config.download_dir = dir;
        }

        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if !(self.api_base_url.starts_with("http://") || self.api_base_url.starts_with("https://"))
        {
            anyhow::bail!(
                "API base URL must start with http:// or https://, got: {}",
                self.api_base_url
            );
        }
        Ok(())
    }
}
