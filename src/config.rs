//! Configuration management with layered loading
//!
//! Precedence (lowest to highest):
//! 1. Compiled defaults
//! 2. Global config: `$XDG_CONFIG_HOME/navsets/navsets.toml`
//! 3. Environment variables: `NAVSETS_*` prefix

use std::path::PathBuf;

use config::{Config, Environment, File};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};

use crate::application::ApplicationError;
use crate::domain::AttributeSelector;

/// Raw settings for intermediate parsing (fields are Option to detect
/// "not specified", so unset layers inherit from the one below).
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct RawSettings {
    pub sets_file: Option<PathBuf>,
    pub default_attribute: Option<AttributeSelector>,
}

/// Unified configuration for navsets.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct Settings {
    /// Saved-sets file used when `--sets` is not given
    pub sets_file: PathBuf,
    /// Attribute the clash-set pass groups by when `--attribute` is not given
    pub default_attribute: AttributeSelector,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            sets_file: PathBuf::from("navsets-sets.json"),
            default_attribute: AttributeSelector::Category,
        }
    }
}

impl Settings {
    /// Load settings with layered precedence.
    pub fn load() -> Result<Self, ApplicationError> {
        let mut builder = Config::builder();

        if let Some(path) = Self::global_config_path() {
            if path.exists() {
                builder = builder.add_source(File::from(path));
            }
        }

        builder = builder.add_source(Environment::with_prefix("NAVSETS"));

        let raw: RawSettings = builder
            .build()
            .and_then(|c| c.try_deserialize())
            .map_err(|e| ApplicationError::Config {
                message: e.to_string(),
            })?;

        Ok(Self::default().merge(raw))
    }

    /// Overlay raw settings onto self; unspecified fields keep their value.
    pub fn merge(self, raw: RawSettings) -> Self {
        Self {
            sets_file: raw.sets_file.unwrap_or(self.sets_file),
            default_attribute: raw.default_attribute.unwrap_or(self.default_attribute),
        }
    }

    /// Render the effective settings as TOML (for `navsets config`).
    pub fn to_toml(&self) -> Result<String, ApplicationError> {
        toml::to_string_pretty(self).map_err(|e| ApplicationError::Config {
            message: e.to_string(),
        })
    }

    /// Path of the global config file: `$XDG_CONFIG_HOME/navsets/navsets.toml`.
    pub fn global_config_path() -> Option<PathBuf> {
        ProjectDirs::from("", "", "navsets").map(|dirs| dirs.config_dir().join("navsets.toml"))
    }
}
