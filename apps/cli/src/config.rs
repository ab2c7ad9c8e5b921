//! CLI configuration

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Name of the optional config file under the platform config directory
const CONFIG_FILE: &str = "config.toml";

/// CLI configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CliConfig {
    /// REST API base URL
    #[serde(default = "default_api_base_url")]
    pub api_base_url: String,

    /// Session file (platform config directory if not specified)
    #[serde(default)]
    pub session_file: Option<PathBuf>,

    /// Log level
    #[serde(default = "default_log_level")]
    pub log_level: String,

    /// HTTP request timeout in seconds; 0 waits indefinitely
    #[serde(default)]
    pub timeout_secs: u64,

    /// Work against built-in demo data instead of the backend
    #[serde(default)]
    pub offline: bool,

    /// Problems found while loading, reported once logging is up
    #[serde(skip)]
    warnings: Vec<String>,
}

fn default_api_base_url() -> String {
    api_client::DEFAULT_API_BASE_URL.to_string()
}

fn default_log_level() -> String {
    "warn".to_string()
}

impl Default for CliConfig {
    fn default() -> Self {
        Self {
            api_base_url: default_api_base_url(),
            session_file: None,
            log_level: default_log_level(),
            timeout_secs: 0,
            offline: false,
            warnings: Vec::new(),
        }
    }
}

impl CliConfig {
    /// Load configuration from the config file and environment
    ///
    /// Precedence, lowest first: defaults, config file, environment.
    pub fn load() -> Result<Self, ConfigError> {
        // Load .env file if present
        dotenvy::dotenv().ok();

        let mut config = match std::env::var("TASKBOARD_CONFIG") {
            // An explicitly named file must exist
            Ok(path) => Self::from_file(Path::new(&path))?,
            Err(_) => match Self::find_config_file() {
                Some(path) => Self::from_file(&path)?,
                None => Self::default(),
            },
        };

        config.apply_overrides(|name| std::env::var(name).ok());
        Ok(config)
    }

    /// Parse a TOML config file
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Ok(toml::from_str(&contents)?)
    }

    /// Apply `TASKBOARD_*` overrides looked up through `var`
    pub fn apply_overrides<F>(&mut self, var: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(url) = var("TASKBOARD_API_BASE_URL") {
            self.api_base_url = url;
        }

        if let Some(path) = var("TASKBOARD_SESSION_FILE") {
            self.session_file = Some(PathBuf::from(path));
        }

        if let Some(level) = var("TASKBOARD_LOG_LEVEL") {
            self.log_level = level;
        }

        if let Some(secs) = var("TASKBOARD_TIMEOUT_SECS") {
            match secs.parse() {
                Ok(secs) => self.timeout_secs = secs,
                Err(_) => self
                    .warnings
                    .push(format!("Ignoring invalid TASKBOARD_TIMEOUT_SECS: {secs}")),
            }
        }

        if let Some(val) = var("TASKBOARD_OFFLINE") {
            self.offline = matches!(val.trim(), "1" | "true" | "yes");
        }
    }

    /// Problems found while loading that did not stop it
    pub fn warnings(&self) -> &[String] {
        &self.warnings
    }

    /// Where the session is persisted
    pub fn session_path(&self) -> PathBuf {
        self.session_file
            .clone()
            .unwrap_or_else(session::default_session_path)
    }

    /// HTTP request timeout; zero disables it
    pub fn timeout(&self) -> Option<Duration> {
        (self.timeout_secs > 0).then(|| Duration::from_secs(self.timeout_secs))
    }

    /// Find the config file in standard locations
    fn find_config_file() -> Option<PathBuf> {
        let locations = [
            PathBuf::from("taskboard.toml"),
            dirs::config_dir()
                .map(|p| p.join(session::APP_DIR).join(CONFIG_FILE))
                .unwrap_or_default(),
        ];

        locations.into_iter().find(|p| p.is_file())
    }
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    FileRead(#[from] std::io::Error),

    #[error("Failed to parse config file: {0}")]
    Parse(#[from] toml::de::Error),
}
