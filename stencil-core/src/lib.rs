//! stencil core library — environments, configuration loading, overrides.
//!
//! - [`environment`] — the [`Environment`] deployment targets
//! - [`config`] — [`Config`] loading from `config/<env>.yaml` and [`Overrides`]
//! - [`error`] — [`ConfigError`]

pub mod config;
pub mod environment;
pub mod error;

pub use config::{Config, Overrides};
pub use environment::Environment;
pub use error::{ConfigError, UnknownEnvironment};
