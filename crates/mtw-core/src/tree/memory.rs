//! In-memory tree for tests and embedding hosts.

use super::{FileChange, Staging, Tree};
use crate::error::MtwResult;
use crate::utils::path::tree_path;
use camino::{Utf8Path, Utf8PathBuf};
use std::collections::BTreeMap;

/// Tree whose committed files live in a map
#[derive(Debug)]
pub struct MemoryTree {
    root: Utf8PathBuf,
    files: BTreeMap<Utf8PathBuf, Vec<u8>>,
    staging: Staging,
}

impl MemoryTree {
    /// Create an empty tree
    pub fn new() -> Self {
        Self {
            root: Utf8PathBuf::from("/virtual"),
            files: BTreeMap::new(),
            staging: Staging::default(),
        }
    }

    /// Add a committed file
    pub fn with_file(mut self, path: &str, content: impl Into<Vec<u8>>) -> Self {
        self.files.insert(crate::utils::path::normalize_path(Utf8Path::new(path)), content.into());
        self
    }
}

impl Default for MemoryTree {
    fn default() -> Self {
        Self::new()
    }
}

impl Tree for MemoryTree {
    fn root(&self) -> &Utf8Path {
        &self.root
    }

    fn read(&self, path: &Utf8Path) -> MtwResult<Option<Vec<u8>>> {
        let key = tree_path(path)?;
        Ok(self
            .staging
            .get(&key)
            .or_else(|| self.files.get(&key).map(Vec::as_slice))
            .map(<[u8]>::to_vec))
    }

    fn write(&mut self, path: &Utf8Path, content: Vec<u8>) -> MtwResult<()> {
        let key = tree_path(path)?;
        let committed = self.files.get(&key).map(Vec::as_slice);
        self.staging.record(key, content, committed);
        Ok(())
    }

    fn changes(&self) -> Vec<FileChange> {
        self.staging.changes()
    }
}
