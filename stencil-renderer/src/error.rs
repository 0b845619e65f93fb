//! Error types for stencil-renderer.

use std::path::PathBuf;

use thiserror::Error;

/// All errors that can arise from template loading, rendering and writing.
#[derive(Debug, Error)]
pub enum RenderError {
    /// The template root directory does not exist.
    #[error("template directory {} not found", path.display())]
    TemplateRootNotFound { path: PathBuf },

    /// A template from the fixed table has no file under the template root.
    #[error("template {name} not found at {}", path.display())]
    TemplateNotFound { name: String, path: PathBuf },

    /// Tera failed to parse or render a template (undefined variable, bad syntax, ...).
    #[error("failed to render template {name}")]
    Template {
        name: String,
        #[source]
        source: tera::Error,
    },

    /// Tera rejected the template set as a whole (e.g. a syntax error in a partial).
    #[error("failed to load templates: {0}")]
    Tera(#[from] tera::Error),

    /// The configuration mapping could not be turned into a template context.
    #[error("context serialization error: {0}")]
    Context(#[from] serde_json::Error),

    /// Filesystem error while loading templates or writing output.
    #[error("I/O error at {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Convenience constructor for [`RenderError::Io`].
pub(crate) fn io_err(path: impl Into<PathBuf>, source: std::io::Error) -> RenderError {
    RenderError::Io {
        path: path.into(),
        source,
    }
}
