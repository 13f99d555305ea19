//! Staged workspace file tree.
//!
//! Generators never touch the disk directly. They read and write through a
//! [`Tree`], which records every write as a pending change; the host decides
//! whether to commit those changes (or only print them for a dry run).
//!
//! Paths are relative to the workspace root and are normalized before use.

mod fs;
mod memory;

pub use fs::FsTree;
pub use memory::MemoryTree;

use crate::error::MtwResult;
use camino::{Utf8Path, Utf8PathBuf};
use std::collections::BTreeMap;
use std::fmt;

/// Workspace file system as seen by a generator
pub trait Tree {
    /// Absolute location of the workspace root
    fn root(&self) -> &Utf8Path;

    /// Read a file, staged content first. `None` when it does not exist.
    fn read(&self, path: &Utf8Path) -> MtwResult<Option<Vec<u8>>>;

    /// Stage new content for a file
    fn write(&mut self, path: &Utf8Path, content: Vec<u8>) -> MtwResult<()>;

    /// Pending changes, sorted by path
    fn changes(&self) -> Vec<FileChange>;

    /// Check whether a file exists (staged or on the backing store)
    fn exists(&self, path: &Utf8Path) -> bool {
        matches!(self.read(path), Ok(Some(_)))
    }

    /// Read a file as UTF-8
    fn read_to_string(&self, path: &Utf8Path) -> MtwResult<Option<String>> {
        match self.read(path)? {
            Some(bytes) => String::from_utf8(bytes).map(Some).map_err(|e| {
                crate::error::MtwError::io(
                    format!("{} is not valid UTF-8", path),
                    std::io::Error::new(std::io::ErrorKind::InvalidData, e),
                )
            }),
            None => Ok(None),
        }
    }
}

/// Kind of a pending change
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChangeKind {
    Create,
    Update,
}

/// A pending write recorded by a tree
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileChange {
    pub path: Utf8PathBuf,
    pub kind: ChangeKind,
    pub content: Vec<u8>,
}

impl fmt::Display for ChangeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ChangeKind::Create => f.write_str("CREATE"),
            ChangeKind::Update => f.write_str("UPDATE"),
        }
    }
}

impl fmt::Display for FileChange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.kind, self.path)
    }
}

/// Write staging shared by tree implementations
#[derive(Debug, Default)]
struct Staging {
    staged: BTreeMap<Utf8PathBuf, FileChange>,
}

impl Staging {
    fn get(&self, path: &Utf8Path) -> Option<&[u8]> {
        self.staged.get(path).map(|change| change.content.as_slice())
    }

    /// Record a write against the committed content of the same file.
    /// Writing back the committed bytes drops the pending change.
    fn record(&mut self, path: Utf8PathBuf, content: Vec<u8>, committed: Option<&[u8]>) {
        match committed {
            Some(original) if original == content.as_slice() => {
                self.staged.remove(&path);
            },
            Some(_) => {
                self.staged.insert(path.clone(), FileChange { path, kind: ChangeKind::Update, content });
            },
            None => {
                self.staged.insert(path.clone(), FileChange { path, kind: ChangeKind::Create, content });
            },
        }
    }

    fn changes(&self) -> Vec<FileChange> {
        self.staged.values().cloned().collect()
    }

    fn take(&mut self) -> Vec<FileChange> {
        std::mem::take(&mut self.staged).into_values().collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_staging_create_then_update() {
        let mut staging = Staging::default();
        staging.record("a.json".into(), b"{}".to_vec(), None);
        staging.record("b.json".into(), b"new".to_vec(), Some(&b"old"[..]));

        let changes = staging.changes();
        assert_eq!(changes.len(), 2);
        assert_eq!(changes[0].kind, ChangeKind::Create);
        assert_eq!(changes[1].kind, ChangeKind::Update);
        assert_eq!(changes[1].to_string(), "UPDATE b.json");
    }

    #[test]
    fn test_staging_revert_to_committed() {
        let mut staging = Staging::default();
        staging.record("a.json".into(), b"changed".to_vec(), Some(&b"same"[..]));
        staging.record("a.json".into(), b"same".to_vec(), Some(&b"same"[..]));

        assert!(staging.changes().is_empty());
        assert!(staging.get(Utf8Path::new("a.json")).is_none());
    }
}
