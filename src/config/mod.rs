//! Project configuration
//!
//! Read from `<project>/.carmelia/config.yaml`. A missing file means
//! defaults; zero values in a present file are filled from the defaults too.

use std::fs;
use std::path::{Path, PathBuf};

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::errors::{CarmeliaError, Result};

/// Config file path relative to the project root
pub const CONFIG_FILE: &str = ".carmelia/config.yaml";

const DEFAULT_OUTPUT: &str = "./.carmelia/requests";
const DEFAULT_TIMEOUT_MS: u64 = 30_000;
const DEFAULT_MAX_HISTORY: u32 = 10;

/// Settings for the request runner
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct RunnerConfig {
    /// Request timeout in milliseconds
    pub timeout: u64,
    pub follow_redirects: bool,
    pub max_history: u32,
}

impl Default for RunnerConfig {
    fn default() -> Self {
        Self {
            timeout: DEFAULT_TIMEOUT_MS,
            follow_redirects: true,
            max_history: DEFAULT_MAX_HISTORY,
        }
    }
}

/// Values applied to new requests
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DefaultsConfig {
    pub headers: IndexMap<String, String>,
}

impl Default for DefaultsConfig {
    fn default() -> Self {
        let mut headers = IndexMap::new();
        headers.insert("Content-Type".to_string(), "application/json".to_string());
        headers.insert("Accept".to_string(), "application/json".to_string());
        Self { headers }
    }
}

/// Carmelia project configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub version: u32,
    /// Request tree root, relative to the project
    pub output: String,
    pub runner: RunnerConfig,
    pub defaults: DefaultsConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            version: 1,
            output: DEFAULT_OUTPUT.to_string(),
            runner: RunnerConfig::default(),
            defaults: DefaultsConfig::default(),
        }
    }
}

impl Config {
    /// Load the project config, falling back to defaults when there is none
    pub fn load(project: &Path) -> Result<Self> {
        let path = project.join(CONFIG_FILE);

        let content = match fs::read_to_string(&path) {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                debug!(path = %path.display(), "No project config, using defaults");
                return Ok(Self::default());
            }
            Err(e) => {
                return Err(CarmeliaError::Config(format!(
                    "Failed to read {}: {}",
                    path.display(),
                    e
                )))
            }
        };

        Self::parse(&content)
            .map_err(|e| CarmeliaError::Config(format!("Invalid {}: {}", path.display(), e)))
    }

    /// Parse config YAML and fill zero values with defaults
    pub fn parse(content: &str) -> Result<Self> {
        if content.trim().is_empty() {
            return Ok(Self::default());
        }

        let mut config: Config = serde_yaml::from_str(content)?;

        if config.runner.timeout == 0 {
            config.runner.timeout = DEFAULT_TIMEOUT_MS;
        }
        if config.runner.max_history == 0 {
            config.runner.max_history = DEFAULT_MAX_HISTORY;
        }
        if config.output.is_empty() {
            config.output = DEFAULT_OUTPUT.to_string();
        }

        Ok(config)
    }

    /// Request tree root for a project
    pub fn requests_dir(&self, project: &Path) -> PathBuf {
        let output = Path::new(&self.output);
        if output.is_absolute() {
            output.to_path_buf()
        } else {
            project.join(output.strip_prefix(".").unwrap_or(output))
        }
    }

    pub fn to_yaml(&self) -> Result<String> {
        Ok(serde_yaml::to_string(self)?)
    }
}
