//! Error types for stencil-core.

use std::path::PathBuf;

use thiserror::Error;

/// All errors that can arise while loading an environment configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The configuration file did not exist at the expected path.
    #[error("configuration file {} not found", path.display())]
    NotFound { path: PathBuf },

    /// The file exists but could not be read.
    #[error("failed to read configuration at {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// YAML parse error — includes file path and line context from serde_yaml.
    #[error("failed to parse configuration at {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },

    /// Valid YAML whose top level is a list or scalar.
    #[error("configuration at {} must be a mapping of keys to values", path.display())]
    NotAMapping { path: PathBuf },
}

/// Unknown environment name on the command line.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown environment '{0}'; expected: dev, prod")]
pub struct UnknownEnvironment(pub String);
