//! Deployment targets selectable on the command line.

use std::fmt;
use std::str::FromStr;

use crate::error::UnknownEnvironment;

/// A named deployment target. Selects `config/<env>.yaml` and the output
/// subdirectory.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Environment {
    Dev,
    Prod,
}

impl Environment {
    /// All environments in a stable order.
    pub fn all() -> &'static [Environment] {
        &[Environment::Dev, Environment::Prod]
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Environment::Dev => "dev",
            Environment::Prod => "prod",
        }
    }
}

impl fmt::Display for Environment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Environment {
    type Err = UnknownEnvironment;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Environment::all()
            .iter()
            .find(|env| env.as_str() == s)
            .copied()
            .ok_or_else(|| UnknownEnvironment(s.to_string()))
    }
}
