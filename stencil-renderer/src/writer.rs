//! Atomic writer for rendered manifests.
//!
//! 1. Normalise line endings to LF.
//! 2. Compare with the file already on disk → skip if identical.
//! 3. Write to `<path>.stencil.tmp`.
//! 4. Rename to the final path (atomic on POSIX), replacing any existing file.

use std::path::{Path, PathBuf};

use crate::error::{io_err, RenderError};

/// Outcome of an individual file write.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WriteResult {
    /// File was written (content changed or did not previously exist).
    Written { path: PathBuf },
    /// File was skipped — the destination already holds the same bytes.
    Unchanged { path: PathBuf },
    /// `--dry-run` mode: the file *would* have been written.
    WouldWrite { path: PathBuf },
}

/// Atomically write `content` to `path`, creating parent directories.
pub fn write_output(path: &Path, content: &str, dry_run: bool) -> Result<WriteResult, RenderError> {
    let tmp = PathBuf::from(format!("{}.stencil.tmp", path.display()));
    write_output_with_tmp(path, content, dry_run, &tmp)
}

fn write_output_with_tmp(
    path: &Path,
    content: &str,
    dry_run: bool,
    tmp: &Path,
) -> Result<WriteResult, RenderError> {
    let normalized = content.replace("\r\n", "\n");
    let content = normalized.as_str();

    if let Ok(existing) = std::fs::read(path) {
        if existing == content.as_bytes() {
            tracing::debug!("unchanged: {}", path.display());
            return Ok(WriteResult::Unchanged {
                path: path.to_path_buf(),
            });
        }
    }

    if dry_run {
        tracing::info!("[dry-run] would write: {}", path.display());
        return Ok(WriteResult::WouldWrite {
            path: path.to_path_buf(),
        });
    }

    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).map_err(|e| io_err(parent, e))?;
    }
    std::fs::write(tmp, content).map_err(|e| io_err(tmp, e))?;

    if let Err(e) = std::fs::rename(tmp, path) {
        let _ = std::fs::remove_file(tmp);
        return Err(io_err(path, e));
    }

    tracing::info!("wrote: {}", path.display());
    Ok(WriteResult::Written {
        path: path.to_path_buf(),
    })
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
