//! Tera rendering engine over a template directory.
//!
//! Only the templates of the fixed table are compiled, each one when it is
//! first rendered, so unrelated files under the template root are never read.
//! Shared snippets live in `<root>/_partials/`; every `*.j2` file there is
//! registered up front under its `/`-separated relative path
//! (`_partials/labels.yaml.j2`) so table templates can `{% include %}` it.
//!
//! Sources are normalised on load: CRLF becomes LF, a block tag (`{% ... %}`)
//! or comment (`{# ... #}`) swallows the newline that follows it, and
//! indentation in front of one is dropped. Tags on their own line therefore
//! leave no trace in the rendered manifest.

use std::path::{Path, PathBuf};

use tera::{Context, Tera};

use crate::error::{io_err, RenderError};
use crate::templates::{TemplateRef, TEMPLATE_SUFFIX};

/// Directory under the template root holding includable partials.
pub const PARTIALS_DIR: &str = "_partials";

// ---------------------------------------------------------------------------
// Template loading helpers
// ---------------------------------------------------------------------------

fn normalize_template_name(path: &Path) -> String {
    path.to_string_lossy().replace('\\', "/")
}

fn collect_template_files(dir: &Path, out: &mut Vec<PathBuf>) -> Result<(), RenderError> {
    let entries = std::fs::read_dir(dir).map_err(|e| io_err(dir, e))?;
    for entry in entries {
        let entry = entry.map_err(|e| io_err(dir, e))?;
        let path = entry.path();
        let meta = entry.metadata().map_err(|e| io_err(&path, e))?;
        if meta.is_dir() {
            collect_template_files(&path, out)?;
        } else if meta.is_file() {
            out.push(path);
        }
    }
    Ok(())
}

fn read_template(path: &Path) -> Result<String, RenderError> {
    let contents = std::fs::read_to_string(path).map_err(|e| io_err(path, e))?;
    Ok(trim_blocks(&contents.replace("\r\n", "\n")))
}

/// `*.j2` files under `<root>/_partials/`, named relative to `root`.
fn load_partials(root: &Path) -> Result<Vec<(String, String)>, RenderError> {
    let dir = root.join(PARTIALS_DIR);
    if !dir.is_dir() {
        return Ok(vec![]);
    }
    let mut files = Vec::new();
    collect_template_files(&dir, &mut files)?;
    files.sort();
    let mut partials = Vec::new();
    for path in files {
        let is_template = path
            .file_name()
            .and_then(|n| n.to_str())
            .is_some_and(|n| n.ends_with(TEMPLATE_SUFFIX));
        if !is_template {
            continue;
        }
        let rel = path.strip_prefix(root).unwrap_or(path.as_path());
        partials.push((normalize_template_name(rel), read_template(&path)?));
    }
    Ok(partials)
}

/// Earliest block tag or comment opener in `s`, with the matching closer.
fn next_tag(s: &str) -> Option<(usize, &'static str)> {
    let block = s.find("{%").map(|i| (i, "%}"));
    let comment = s.find("{#").map(|i| (i, "#}"));
    match (block, comment) {
        (Some(b), Some(c)) => Some(if c.0 < b.0 { c } else { b }),
        (b, c) => b.or(c),
    }
}

/// Keyword of a block tag body, ignoring `-` whitespace modifiers.
fn block_keyword(inner: &str) -> &str {
    inner.trim_matches(|c: char| c == '-' || c.is_whitespace())
}

/// Offset of the `{% endraw %}` tag in `s`.
fn find_endraw(s: &str) -> Option<usize> {
    let mut offset = 0;
    while let Some(i) = s[offset..].find("{%") {
        let start = offset + i;
        let end = s[start..].find("%}")? + start;
        if block_keyword(&s[start + 2..end]) == "endraw" {
            return Some(start);
        }
        offset = end + 2;
    }
    None
}

/// Apply block whitespace control to a template source.
///
/// - the first newline directly after a `{% ... %}` tag or `{# ... #}`
///   comment is removed;
/// - spaces and tabs between the start of a line and such a tag are removed.
///
/// `{{ ... }}` expressions are left alone, and so is the body of a
/// `{% raw %}` section. A `{%` or `{#` inside a string literal of an
/// expression is still taken for a tag opener.
pub fn trim_blocks(source: &str) -> String {
    let mut out = String::with_capacity(source.len());
    let mut rest = source;
    let mut at_line_start = true;
    let mut search_from = 0;

    while let Some((found, close)) = next_tag(&rest[search_from..]) {
        let start = search_from + found;
        search_from = 0;
        let (before, tag_and_after) = rest.split_at(start);

        let (line_start, starts_line) = match before.rfind('\n') {
            Some(i) => (i + 1, true),
            None => (0, at_line_start),
        };
        let indent = &before[line_start..];
        if starts_line && indent.chars().all(|c| c == ' ' || c == '\t') {
            out.push_str(&before[..line_start]);
        } else {
            out.push_str(before);
        }

        let Some(end) = tag_and_after.find(close) else {
            // Unterminated tag; leave it for Tera to report.
            out.push_str(tag_and_after);
            return out;
        };
        let tag_end = end + close.len();
        let tag = &tag_and_after[..tag_end];
        out.push_str(tag);
        rest = &tag_and_after[tag_end..];

        match rest.strip_prefix('\n') {
            Some(after_newline) => {
                rest = after_newline;
                at_line_start = true;
            }
            None => at_line_start = false,
        }

        if close == "%}" && block_keyword(&tag[2..tag.len() - 2]) == "raw" {
            search_from = find_endraw(rest).unwrap_or(rest.len());
        }
    }
    out.push_str(rest);
    out
}

// ---------------------------------------------------------------------------
// TemplateEngine
// ---------------------------------------------------------------------------

/// Tera-based engine rendering the fixed template table from one root.
pub struct TemplateEngine {
    tera: Tera,
    template_root: PathBuf,
}

impl TemplateEngine {
    /// Prepare an engine over `template_root`, registering its partials.
    pub fn new(template_root: impl Into<PathBuf>) -> Result<Self, RenderError> {
        let template_root = template_root.into();
        if !template_root.is_dir() {
            return Err(RenderError::TemplateRootNotFound {
                path: template_root,
            });
        }
        let partials = load_partials(&template_root)?;
        tracing::debug!(
            root = %template_root.display(),
            partials = partials.len(),
            "prepared template engine"
        );

        let mut tera = Tera::default();
        tera.autoescape_on(vec![]);
        tera.add_raw_templates(partials)?;
        Ok(TemplateEngine {
            tera,
            template_root,
        })
    }

    /// Load, compile and render one template from the fixed table with `ctx`.
    pub fn render(&mut self, template: &TemplateRef, ctx: &Context) -> Result<String, RenderError> {
        let name = template.name();
        let path = template.source_path(&self.template_root);
        if !path.is_file() {
            return Err(RenderError::TemplateNotFound { path, name });
        }
        let source = read_template(&path)?;
        if let Err(source) = self.tera.add_raw_template(&name, &source) {
            return Err(RenderError::Template { name, source });
        }
        self.tera
            .render(&name, ctx)
            .map_err(|source| RenderError::Template { name, source })
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
