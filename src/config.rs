//! Configuration loading.
//!
//! Search order:
//! 1. `.cloudguard.yaml` / `.cloudguard.yml` / `.cloudguard.json` /
//!    `.cloudguard.toml` in the working directory
//! 2. `~/.config/cloudguard/config.yaml`
//! 3. Built-in defaults
//!
//! CLI flags override whatever the file provides.

use crate::error::{CloudGuardError, Result};
use crate::model::Provider;
use crate::source::SourceMode;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use tracing::debug;

const PROJECT_CONFIG_NAMES: &[&str] = &[
    ".cloudguard.yaml",
    ".cloudguard.yml",
    ".cloudguard.json",
    ".cloudguard.toml",
];

fn default_base_url() -> String {
    "http://localhost:8000".to_string()
}

fn default_timeout_secs() -> u64 {
    30
}

/// Backend API settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ApiConfig {
    pub base_url: String,
    pub timeout_secs: u64,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

/// Scan source strategy settings.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SourceConfig {
    pub mode: SourceMode,
}

fn default_provider() -> Provider {
    Provider::Aws
}

/// Defaults applied when the CLI omits scan parameters.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ScanConfig {
    pub provider: Provider,
    pub scan_types: Vec<String>,
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            provider: default_provider(),
            scan_types: Vec::new(),
        }
    }
}

/// Main configuration structure for cloudguard.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub api: ApiConfig,
    pub source: SourceConfig,
    pub scan: ScanConfig,
}

impl Config {
    /// Load configuration from a file, dispatching the parser on the
    /// extension.
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path).map_err(|e| {
            CloudGuardError::Config(format!("failed to read {}: {e}", path.display()))
        })?;

        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .unwrap_or("")
            .to_lowercase();

        match ext.as_str() {
            "yaml" | "yml" => serde_yaml::from_str(&content).map_err(|e| {
                CloudGuardError::Config(format!("invalid YAML in {}: {e}", path.display()))
            }),
            "json" => serde_json::from_str(&content).map_err(|e| {
                CloudGuardError::Config(format!("invalid JSON in {}: {e}", path.display()))
            }),
            "toml" => toml::from_str(&content).map_err(|e| {
                CloudGuardError::Config(format!("invalid TOML in {}: {e}", path.display()))
            }),
            _ => Err(CloudGuardError::Config(format!(
                "unsupported config format: {}",
                path.display()
            ))),
        }
    }

    /// Load configuration from the working directory or the global config,
    /// falling back to defaults. Parse failures are reported and skipped so
    /// a broken file never silently changes behavior.
    pub fn load(dir: Option<&Path>) -> Self {
        if let Some(root) = dir {
            for name in PROJECT_CONFIG_NAMES {
                let path = root.join(name);
                if !path.exists() {
                    continue;
                }
                match Self::from_file(&path) {
                    Ok(config) => {
                        debug!(path = %path.display(), "loaded config");
                        return config;
                    }
                    Err(e) => {
                        eprintln!("Warning: ignoring config {}: {e}", path.display());
                    }
                }
            }
        }

        if let Some(config_dir) = dirs::config_dir() {
            let path = config_dir.join("cloudguard").join("config.yaml");
            if path.exists() {
                match Self::from_file(&path) {
                    Ok(config) => {
                        debug!(path = %path.display(), "loaded global config");
                        return config;
                    }
                    Err(e) => {
                        eprintln!("Warning: ignoring config {}: {e}", path.display());
                    }
                }
            }
        }

        Self::default()
    }
}
