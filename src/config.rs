//! Configuration management with layered loading
//!
//! Precedence (lowest to highest):
//! 1. Compiled defaults
//! 2. Global config: `$XDG_CONFIG_HOME/nodequery/nodequery.toml`
//! 3. Local config: `<dir>/.nodequery.toml`
//! 4. Environment variables: `NODEQUERY_*` prefix

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use config::{Config, Environment};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

use crate::application::error::{SettingsError, SettingsResult};
use crate::application::property::ATTRIBUTE_MARKER;

/// Property resolution settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct ResolverSettings {
    /// Prefix marking a property name as an attribute name (default: `@`)
    pub attribute_marker: char,
}

impl Default for ResolverSettings {
    fn default() -> Self {
        Self {
            attribute_marker: ATTRIBUTE_MARKER,
        }
    }
}

/// Raw resolver settings for intermediate parsing (Option to detect "not specified").
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct RawResolverSettings {
    pub attribute_marker: Option<String>,
}

/// Raw settings for intermediate parsing.
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct RawSettings {
    pub resolver: RawResolverSettings,
}

/// Unified configuration for nodequery.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct Settings {
    pub resolver: ResolverSettings,
}

/// Get the XDG config directory for nodequery.
pub fn global_config_dir() -> Option<PathBuf> {
    ProjectDirs::from("", "", "nodequery").map(|dirs| dirs.config_dir().to_path_buf())
}

/// Get the path to the global config file.
pub fn global_config_path() -> Option<PathBuf> {
    global_config_dir().map(|dir| dir.join("nodequery.toml"))
}

/// Get the path to the local config file in a directory.
pub fn local_config_path(dir: &Path) -> PathBuf {
    dir.join(".nodequery.toml")
}

/// Load a TOML file into RawSettings for manual merging.
fn load_raw_settings(path: &Path) -> SettingsResult<RawSettings> {
    let content = std::fs::read_to_string(path).map_err(|source| SettingsError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    toml::from_str(&content).map_err(|e| SettingsError::Parse {
        path: path.to_path_buf(),
        message: e.to_string(),
    })
}

/// Validate an attribute marker: exactly one char, neither whitespace nor alphanumeric.
fn parse_marker(key: &str, value: &str) -> SettingsResult<char> {
    let mut chars = value.chars();
    match (chars.next(), chars.next()) {
        (Some(c), None) if !c.is_alphanumeric() && !c.is_whitespace() => Ok(c),
        _ => Err(SettingsError::Invalid {
            key: key.to_string(),
            message: format!("expected a single punctuation character, got '{}'", value),
        }),
    }
}

impl Settings {
    /// Merge overlay config onto self: overlay wins where specified.
    fn merge_with(&self, overlay: &RawSettings) -> SettingsResult<Self> {
        let attribute_marker = match overlay.resolver.attribute_marker.as_deref() {
            Some(value) => parse_marker("resolver.attribute_marker", value)?,
            None => self.resolver.attribute_marker,
        };
        Ok(Self {
            resolver: ResolverSettings { attribute_marker },
        })
    }

    /// Load settings with layered precedence from the real global config
    /// file and process environment.
    ///
    /// # Arguments
    /// * `local_dir` - Optional directory holding a `.nodequery.toml`
    pub fn load(local_dir: Option<&Path>) -> SettingsResult<Self> {
        Self::load_with(global_config_path().as_deref(), local_dir, None)
    }

    /// Load settings from explicit sources.
    ///
    /// # Arguments
    /// * `global_path` - Global config file, skipped if None or missing
    /// * `local_dir` - Optional directory holding a `.nodequery.toml`
    /// * `vars` - Environment to read `NODEQUERY_*` overrides from; None reads the process environment
    #[instrument(level = "debug", skip(vars))]
    pub fn load_with(
        global_path: Option<&Path>,
        local_dir: Option<&Path>,
        vars: Option<HashMap<String, String>>,
    ) -> SettingsResult<Self> {
        let mut current = Self::default();

        if let Some(global_path) = global_path {
            if global_path.exists() {
                debug!(path = %global_path.display(), "Loading global config");
                current = current.merge_with(&load_raw_settings(global_path)?)?;
            }
        }

        if let Some(dir) = local_dir {
            let local_path = local_config_path(dir);
            if local_path.exists() {
                debug!(path = %local_path.display(), "Loading local config");
                current = current.merge_with(&load_raw_settings(&local_path)?)?;
            }
        }

        current.apply_env_overrides(vars)
    }

    /// Apply NODEQUERY_* environment variables as explicit overrides.
    ///
    /// `vars` replaces the process environment when given.
    fn apply_env_overrides(mut self, vars: Option<HashMap<String, String>>) -> SettingsResult<Self> {
        let config = Config::builder()
            .add_source(
                Environment::with_prefix("NODEQUERY")
                    .prefix_separator("_")
                    .separator("__")
                    .source(vars),
            )
            .build()?;

        if let Ok(val) = config.get_string("resolver.attribute_marker") {
            self.resolver.attribute_marker = parse_marker("resolver.attribute_marker", &val)?;
        }

        Ok(self)
    }
}
