//! Per-environment YAML configuration.
//!
//! # Layout
//!
//! ```text
//! config/
//!   dev.yaml
//!   prod.yaml
//! ```
//!
//! Each file is a flat or nested YAML mapping. Every top-level key becomes a
//! template variable; `image_tag` and `version` can be overridden from the
//! command line via [`Overrides`].
//!
//! # API pattern
//!
//! - `config_path_at(dir, env)` — pure path construction
//! - `load_at(path)` — load an explicit file
//! - `load_for(dir, env)` — path construction + load

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use serde_yaml::{Mapping, Value};

use crate::environment::Environment;
use crate::error::ConfigError;

/// Key holding the container image tag.
pub const IMAGE_TAG_KEY: &str = "image_tag";
/// Key holding the application version.
pub const VERSION_KEY: &str = "version";

// ---------------------------------------------------------------------------
// Config
// ---------------------------------------------------------------------------

/// The configuration mapping for one environment.
///
/// Serializes transparently as the underlying mapping, so it can be handed to
/// a template engine as-is.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Config(pub Mapping);

impl Config {
    pub fn as_mapping(&self) -> &Mapping {
        &self.0
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    /// Insert or replace a top-level key with a string value.
    pub fn set_str(&mut self, key: &str, value: impl Into<String>) {
        self.0
            .insert(Value::String(key.to_string()), Value::String(value.into()));
    }

    /// Scalar value formatted for human display; `None` when absent or null.
    pub fn get_display(&self, key: &str) -> Option<String> {
        match self.get(key)? {
            Value::Null => None,
            Value::String(s) => Some(s.clone()),
            Value::Bool(b) => Some(b.to_string()),
            Value::Number(n) => Some(n.to_string()),
            other => serde_yaml::to_string(other)
                .ok()
                .map(|s| s.trim_end().to_string()),
        }
    }

    /// Apply command-line overrides. Empty or absent values are ignored.
    pub fn apply_overrides(&mut self, overrides: &Overrides) {
        if let Some(tag) = non_empty(overrides.image_tag.as_deref()) {
            tracing::debug!(image_tag = tag, "overriding image tag");
            self.set_str(IMAGE_TAG_KEY, tag);
        }
        if let Some(version) = non_empty(overrides.version.as_deref()) {
            tracing::debug!(version, "overriding version");
            self.set_str(VERSION_KEY, version);
        }
    }
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.is_empty())
}

/// Command-line values that replace keys of the loaded [`Config`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Overrides {
    pub image_tag: Option<String>,
    pub version: Option<String>,
}

// ---------------------------------------------------------------------------
// Load
// ---------------------------------------------------------------------------

/// `<config_dir>/<env>.yaml` — pure, no I/O.
pub fn config_path_at(config_dir: &Path, env: Environment) -> PathBuf {
    config_dir.join(format!("{}.yaml", env.as_str()))
}

/// Load a configuration mapping from `path`.
///
/// Returns `ConfigError::NotFound` if absent (checked before reading),
/// `ConfigError::Parse` (with path + line context) if malformed YAML and
/// `ConfigError::NotAMapping` if the document is not a mapping. An empty
/// document loads as an empty mapping. `<<: *anchor` merge keys are resolved.
pub fn load_at(path: &Path) -> Result<Config, ConfigError> {
    if !path.exists() {
        return Err(ConfigError::NotFound {
            path: path.to_path_buf(),
        });
    }
    let contents = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let parse_err = |source: serde_yaml::Error| ConfigError::Parse {
        path: path.to_path_buf(),
        source,
    };
    let mut value: Value = serde_yaml::from_str(&contents).map_err(parse_err)?;
    value.apply_merge().map_err(parse_err)?;
    let config = match value {
        Value::Null => Config::default(),
        Value::Mapping(values) => Config(values),
        _ => {
            return Err(ConfigError::NotAMapping {
                path: path.to_path_buf(),
            })
        }
    };
    tracing::debug!(path = %path.display(), keys = config.0.len(), "loaded configuration");
    Ok(config)
}

/// Load `<config_dir>/<env>.yaml`.
pub fn load_for(config_dir: &Path, env: Environment) -> Result<Config, ConfigError> {
    load_at(&config_path_at(config_dir, env))
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
