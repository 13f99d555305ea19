//! Formatting pass over changed files.
//!
//! Runs once after the generator has staged its writes. Every pending change
//! the formatter supports is rewritten in place; everything else is left
//! as written. Formatter failures propagate to the caller.

use camino::{Utf8Path, Utf8PathBuf};
use mtw_core::error::MtwError;
use mtw_core::tree::Tree;
use serde::Serialize;
use serde_json::Value;
use tracing::{debug, info};
use crate::ConfigResult;

/// A formatter for staged files
pub trait Formatter {
    /// Short name for logs
    fn name(&self) -> &'static str;

    /// Whether this formatter handles `path`
    fn supports(&self, path: &Utf8Path) -> bool;

    /// Produce the formatted content
    fn format(&self, path: &Utf8Path, content: &[u8]) -> ConfigResult<Vec<u8>>;
}

/// Re-indents JSON files, keeping key order
#[derive(Debug, Clone)]
pub struct JsonFormatter {
    indent: usize,
}

impl JsonFormatter {
    pub fn new(indent: usize) -> Self {
        Self { indent }
    }
}

impl Default for JsonFormatter {
    fn default() -> Self {
        Self::new(2)
    }
}

impl Formatter for JsonFormatter {
    fn name(&self) -> &'static str {
        "json"
    }

    fn supports(&self, path: &Utf8Path) -> bool {
        path.extension().is_some_and(|ext| ext.eq_ignore_ascii_case("json"))
    }

    fn format(&self, path: &Utf8Path, content: &[u8]) -> ConfigResult<Vec<u8>> {
        let value: Value = serde_json::from_slice(content)
            .map_err(|e| MtwError::Format {
                path: path.to_string(),
                message: e.to_string(),
            })?;

        let indent = " ".repeat(self.indent);
        let mut output = Vec::with_capacity(content.len());
        let formatter = serde_json::ser::PrettyFormatter::with_indent(indent.as_bytes());
        let mut serializer = serde_json::Serializer::with_formatter(&mut output, formatter);
        value.serialize(&mut serializer)
            .map_err(|e| MtwError::Format {
                path: path.to_string(),
                message: e.to_string(),
            })?;

        output.push(b'\n');
        Ok(output)
    }
}

/// Format every staged change `formatter` supports. Returns the files whose
/// content changed.
pub fn format_files(tree: &mut dyn Tree, formatter: &dyn Formatter) -> ConfigResult<Vec<Utf8PathBuf>> {
    let mut formatted = Vec::new();

    for change in tree.changes() {
        if !formatter.supports(&change.path) {
            debug!("Skipping {} ({} formatter)", change.path, formatter.name());
            continue;
        }

        let output = formatter.format(&change.path, &change.content)?;
        if output != change.content {
            tree.write(&change.path, output)?;
            formatted.push(change.path);
        }
    }

    if !formatted.is_empty() {
        info!("Formatted {} file(s) with the {} formatter", formatted.len(), formatter.name());
    }

    Ok(formatted)
}
