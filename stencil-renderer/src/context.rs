//! Template context — the configuration mapping as Tera variables.

use stencil_core::Config;
use tera::Context;

use crate::error::RenderError;

/// Build a Tera context in which every top-level config key is a variable.
///
/// Nested mappings and sequences are reachable with `a.b` and `a[0]`. The
/// mapping goes through `serde_json`, so keys must be strings or numbers.
pub fn build_context(config: &Config) -> Result<Context, RenderError> {
    let value = serde_json::to_value(config)?;
    Ok(Context::from_value(value)?)
}
