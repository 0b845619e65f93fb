//! Render the fixed manifest table for one configuration.

use std::path::{Path, PathBuf};

use stencil_core::Config;

use crate::context::build_context;
use crate::engine::TemplateEngine;
use crate::error::{io_err, RenderError};
use crate::templates::TemplateRef;
use crate::writer::{write_output, WriteResult};

/// One manifest produced by [`render_all`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedFile {
    pub template: TemplateRef,
    pub path: PathBuf,
    pub write: WriteResult,
}

/// Render every template in [`TemplateRef::all`] order into `output_dir`.
///
/// `output_dir` (and its parents) is created before the first write unless
/// `dry_run` is set. `on_rendered` runs after each file so callers can report
/// progress as it happens. The first failure aborts the remaining templates.
pub fn render_all<F>(
    config: &Config,
    template_root: &Path,
    output_dir: &Path,
    dry_run: bool,
    mut on_rendered: F,
) -> Result<Vec<RenderedFile>, RenderError>
where
    F: FnMut(&RenderedFile),
{
    let mut engine = TemplateEngine::new(template_root)?;
    let ctx = build_context(config)?;

    if !dry_run {
        std::fs::create_dir_all(output_dir).map_err(|e| io_err(output_dir, e))?;
    }

    let mut rendered = Vec::new();
    for template in TemplateRef::all() {
        let content = engine.render(template, &ctx)?;
        let path = template.output_path(output_dir);
        let write = write_output(&path, &content, dry_run)?;
        tracing::debug!(template = %template.name(), path = %path.display(), "rendered");

        let file = RenderedFile {
            template: *template,
            path,
            write,
        };
        on_rendered(&file);
        rendered.push(file);
    }
    Ok(rendered)
}
