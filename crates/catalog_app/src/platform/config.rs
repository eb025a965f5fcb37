use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::Context;
use catalog_engine::{FetchSettings, DEFAULT_CODEFORCES_API, DEFAULT_KATTIS_BASE};
use serde::{Deserialize, Serialize};

use super::logging::LogDestination;

pub(crate) const DEFAULT_CONFIG_FILENAME: &str = "catalog.ron";

/// Settings read from `catalog.ron`. Every field is optional in the file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub(crate) struct AppConfig {
    pub database: PathBuf,
    pub feedback_file: PathBuf,
    /// Handle credited for `add` when `--by` is not given.
    pub submitter: String,
    pub log_destination: LogDestination,
    pub log_level: String,
    pub fetch: FetchConfig,
    pub codeforces_api: String,
    pub kattis_base: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            database: PathBuf::from("data/catalog.sqlite"),
            feedback_file: PathBuf::from("data/feedback.ron"),
            submitter: String::new(),
            log_destination: LogDestination::File,
            log_level: "info".to_string(),
            fetch: FetchConfig::default(),
            codeforces_api: DEFAULT_CODEFORCES_API.to_string(),
            kattis_base: DEFAULT_KATTIS_BASE.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub(crate) struct FetchConfig {
    pub connect_timeout_secs: u64,
    pub request_timeout_secs: u64,
    pub redirect_limit: usize,
    pub max_bytes: u64,
    pub user_agent: Option<String>,
}

impl Default for FetchConfig {
    fn default() -> Self {
        let defaults = FetchSettings::default();
        Self {
            connect_timeout_secs: defaults.connect_timeout.as_secs(),
            request_timeout_secs: defaults.request_timeout.as_secs(),
            redirect_limit: defaults.redirect_limit,
            max_bytes: defaults.max_bytes,
            user_agent: None,
        }
    }
}

impl FetchConfig {
    pub fn to_settings(&self) -> FetchSettings {
        let mut settings = FetchSettings {
            connect_timeout: Duration::from_secs(self.connect_timeout_secs),
            request_timeout: Duration::from_secs(self.request_timeout_secs),
            redirect_limit: self.redirect_limit,
            max_bytes: self.max_bytes,
            ..FetchSettings::default()
        };
        if let Some(agent) = self.user_agent.as_deref().filter(|a| !a.trim().is_empty()) {
            settings.user_agent = agent.to_string();
        }
        settings
    }
}

impl AppConfig {
    /// A missing file yields the defaults; a malformed one is an error.
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let content = match fs::read_to_string(path) {
            Ok(text) => text,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => return Ok(Self::default()),
            Err(err) => {
                return Err(err).with_context(|| format!("reading config {}", path.display()))
            }
        };
        ron::from_str(&content).with_context(|| format!("parsing config {}", path.display()))
    }

    /// Relative paths in the config are taken relative to the config file.
    pub fn resolve_paths(mut self, config_path: &Path) -> Self {
        let base = config_path
            .parent()
            .filter(|p| !p.as_os_str().is_empty())
            .map(Path::to_path_buf);
        if let Some(base) = base {
            if self.database.is_relative() {
                self.database = base.join(&self.database);
            }
            if self.feedback_file.is_relative() {
                self.feedback_file = base.join(&self.feedback_file);
            }
        }
        self
    }
}
