//! Path utilities for workspace-relative file operations.
//!
//! Tree paths are always relative to the workspace root; these helpers
//! normalize them and refuse anything that would escape the root.

use crate::error::{MtwError, MtwResult};
use camino::{Utf8Component, Utf8Path, Utf8PathBuf};

/// Normalize a path by resolving . and .. components
pub fn normalize_path(path: &Utf8Path) -> Utf8PathBuf {
    let mut components = Vec::new();

    for component in path.components() {
        match component {
            Utf8Component::CurDir => {},
            Utf8Component::ParentDir => {
                // Keep leading .. so escaping stays visible
                match components.last() {
                    Some(Utf8Component::Normal(_)) => {
                        components.pop();
                    },
                    _ => components.push(component),
                }
            },
            other => {
                components.push(other);
            },
        }
    }

    components.iter().collect()
}

/// Check if a path is safe (relative, no directory traversal)
pub fn is_safe_path(path: &Utf8Path) -> bool {
    if path.is_absolute() {
        return false;
    }

    let mut depth = 0i32;

    for component in path.components() {
        match component {
            Utf8Component::CurDir => {},
            Utf8Component::ParentDir => {
                depth -= 1;
                if depth < 0 {
                    return false;
                }
            },
            Utf8Component::Normal(_) => {
                depth += 1;
            },
            _ => {
                return false;
            },
        }
    }

    true
}

/// Turn a caller-supplied path into a normalized tree key
pub fn tree_path(path: &Utf8Path) -> MtwResult<Utf8PathBuf> {
    let normalized = normalize_path(path);
    if normalized.as_str().is_empty() || !is_safe_path(&normalized) {
        return Err(MtwError::PathOutsideWorkspace {
            path: path.to_string(),
        });
    }

    Ok(normalized)
}
