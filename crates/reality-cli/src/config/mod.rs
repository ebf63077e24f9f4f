//! Configuration management.
//!
//! Settings live in a TOML file under the platform config directory. The
//! `REALITYCTL_CONFIG` environment variable points at a different file.

use anyhow::Result;
use directories::ProjectDirs;
use reality::{ProtocolVariant, SniCandidates, TemplateLayout};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::output::OutputFormat;

/// Environment variable overriding the config file location
pub const CONFIG_ENV: &str = "REALITYCTL_CONFIG";

/// Where xray reads its configuration on a stock install
pub const DEFAULT_DAEMON_CONFIG: &str = "/usr/local/etc/xray/config.json";

/// Service unit restarted after a live install
pub const DEFAULT_SERVICE_UNIT: &str = "xray";

/// Staging directory for generated files, relative to the working directory
pub const DEFAULT_STAGING_DIR: &str = "reality-out";

/// CLI configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Default output format.
    pub output_format: Option<OutputFormat>,

    /// Default protocol variant.
    pub variant: Option<ProtocolVariant>,

    /// Domains to pick the SNI from when none is given.
    pub sni_candidates: Option<Vec<String>>,

    /// Directory for staged documents.
    pub staging_dir: Option<String>,

    /// Live daemon configuration path.
    pub daemon_config_path: Option<String>,

    /// Service unit restarted after a live install.
    pub service_unit: Option<String>,

    /// Run log that share links are appended to.
    pub log_file: Option<String>,

    /// Custom server template.
    pub server_template: Option<String>,

    /// Custom client template.
    pub client_template: Option<String>,

    /// Always show explanations (as if --explain was passed).
    #[serde(default)]
    pub explain_by_default: bool,

    /// Tags the synthesizer looks for in templates.
    #[serde(default)]
    pub layout: TemplateLayout,
}

impl Config {
    /// Get the config file path.
    pub fn path() -> Result<PathBuf> {
        if let Ok(path) = std::env::var(CONFIG_ENV) {
            if !path.is_empty() {
                return Ok(PathBuf::from(path));
            }
        }

        let dirs = ProjectDirs::from("dev", "reality", "realityctl")
            .ok_or_else(|| anyhow::anyhow!("Could not determine config directory"))?;

        Ok(dirs.config_dir().join("config.toml"))
    }

    /// Load configuration from file.
    pub fn load() -> Result<Self> {
        let path = Self::path()?;

        if !path.exists() {
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(&path)?;
        let config: Config = toml::from_str(&content)?;

        Ok(config)
    }

    /// Save configuration to file.
    pub fn save(&self) -> Result<()> {
        let path = Self::path()?;

        // Ensure parent directory exists
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = toml::to_string_pretty(self)?;
        std::fs::write(&path, content)?;

        Ok(())
    }

    /// SNI candidates, falling back to the built-in list
    pub fn sni_candidates(&self) -> SniCandidates {
        self.sni_candidates
            .clone()
            .filter(|list| !list.is_empty())
            .map_or_else(SniCandidates::default, SniCandidates::new)
    }

    /// Staging directory with `~` and variables expanded
    pub fn staging_dir(&self) -> Result<PathBuf> {
        expand_path(self.staging_dir.as_deref().unwrap_or(DEFAULT_STAGING_DIR))
    }

    /// Live daemon config path with `~` and variables expanded
    pub fn daemon_config_path(&self) -> Result<PathBuf> {
        expand_path(
            self.daemon_config_path
                .as_deref()
                .unwrap_or(DEFAULT_DAEMON_CONFIG),
        )
    }

    /// Service unit name
    pub fn service_unit(&self) -> &str {
        self.service_unit.as_deref().unwrap_or(DEFAULT_SERVICE_UNIT)
    }
}

/// Expand `~` and `$VAR` in a configured path.
pub fn expand_path(raw: &str) -> Result<PathBuf> {
    let expanded = shellexpand::full(raw)
        .map_err(|e| anyhow::anyhow!("Cannot expand path {}: {}", raw, e))?;
    Ok(PathBuf::from(expanded.as_ref()))
}
