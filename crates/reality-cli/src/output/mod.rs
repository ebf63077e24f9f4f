//! Output formatting for different formats.

use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Available output formats.
#[derive(Debug, Clone, Copy, Default, ValueEnum, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Human-readable summary with colors
    #[default]
    Pretty,
    /// JSON output
    Json,
    /// YAML output
    Yaml,
}

impl OutputFormat {
    /// Serialize `value` for the structured formats.
    ///
    /// Returns `None` for [`OutputFormat::Pretty`], which each command renders itself.
    pub fn render<T: Serialize>(self, value: &T) -> anyhow::Result<Option<String>> {
        match self {
            Self::Pretty => Ok(None),
            Self::Json => Ok(Some(serde_json::to_string_pretty(value)?)),
            Self::Yaml => Ok(Some(serde_yaml::to_string(value)?.trim_end().to_string())),
        }
    }
}

impl FromStr for OutputFormat {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "pretty" | "text" => Ok(Self::Pretty),
            "json" => Ok(Self::Json),
            "yaml" | "yml" => Ok(Self::Yaml),
            _ => anyhow::bail!(
                "Unknown output format: {}\n\
                 Valid formats: pretty, json, yaml",
                s
            ),
        }
    }
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Pretty => write!(f, "pretty"),
            Self::Json => write!(f, "json"),
            Self::Yaml => write!(f, "yaml"),
        }
    }
}
