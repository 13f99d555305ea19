//! Disk-backed tree.

use super::{FileChange, Staging, Tree};
use crate::error::{MtwError, MtwResult};
use crate::utils::path::tree_path;
use camino::{Utf8Path, Utf8PathBuf};
use tracing::debug;

/// Tree over a workspace directory. Reads fall through to disk, writes are
/// staged until [`FsTree::flush`].
#[derive(Debug)]
pub struct FsTree {
    root: Utf8PathBuf,
    staging: Staging,
}

impl FsTree {
    /// Create a tree rooted at the workspace directory
    pub fn new(root: impl Into<Utf8PathBuf>) -> Self {
        Self {
            root: root.into(),
            staging: Staging::default(),
        }
    }

    fn read_disk(&self, key: &Utf8Path) -> MtwResult<Option<Vec<u8>>> {
        let full = self.root.join(key);
        match std::fs::read(&full) {
            Ok(bytes) => Ok(Some(bytes)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(MtwError::io(format!("Failed to read {}", full), e)),
        }
    }

    /// Commit every staged change to disk and return what was written
    pub async fn flush(&mut self) -> MtwResult<Vec<FileChange>> {
        let changes = self.staging.take();

        for change in &changes {
            let full = self.root.join(&change.path);
            if let Some(parent) = full.parent() {
                tokio::fs::create_dir_all(parent).await
                    .map_err(|e| MtwError::io(format!("Failed to create directory {}", parent), e))?;
            }

            tokio::fs::write(&full, &change.content).await
                .map_err(|e| MtwError::io(format!("Failed to write {}", full), e))?;

            debug!("Flushed {}", change);
        }

        Ok(changes)
    }
}

impl Tree for FsTree {
    fn root(&self) -> &Utf8Path {
        &self.root
    }

    fn read(&self, path: &Utf8Path) -> MtwResult<Option<Vec<u8>>> {
        let key = tree_path(path)?;
        if let Some(staged) = self.staging.get(&key) {
            return Ok(Some(staged.to_vec()));
        }
        self.read_disk(&key)
    }

    fn write(&mut self, path: &Utf8Path, content: Vec<u8>) -> MtwResult<()> {
        let key = tree_path(path)?;
        let committed = self.read_disk(&key)?;
        self.staging.record(key, content, committed.as_deref());
        Ok(())
    }

    fn changes(&self) -> Vec<FileChange> {
        self.staging.changes()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tree::ChangeKind;
    use tempfile::TempDir;

    fn temp_tree() -> (TempDir, FsTree) {
        let temp_dir = TempDir::new().unwrap();
        let root = Utf8PathBuf::try_from(temp_dir.path().to_path_buf()).unwrap();
        (temp_dir, FsTree::new(root))
    }

    #[test]
    fn test_reads_fall_through_to_disk() {
        let (temp_dir, tree) = temp_tree();
        std::fs::write(temp_dir.path().join("package.json"), "{}").unwrap();

        assert_eq!(tree.read(Utf8Path::new("package.json")).unwrap(), Some(b"{}".to_vec()));
        assert!(tree.exists(Utf8Path::new("./package.json")));
        assert!(!tree.exists(Utf8Path::new("missing.json")));
    }

    #[test]
    fn test_writes_are_staged() {
        let (temp_dir, mut tree) = temp_tree();
        std::fs::write(temp_dir.path().join("package.json"), "{}").unwrap();

        tree.write(Utf8Path::new("package.json"), b"{\"a\":1}".to_vec()).unwrap();

        // Disk untouched until flush
        let on_disk = std::fs::read_to_string(temp_dir.path().join("package.json")).unwrap();
        assert_eq!(on_disk, "{}");
        assert_eq!(tree.read_to_string(Utf8Path::new("package.json")).unwrap().unwrap(), "{\"a\":1}");
        assert_eq!(tree.changes()[0].kind, ChangeKind::Update);
    }

    #[test]
    fn test_rejects_paths_outside_root() {
        let (_temp_dir, mut tree) = temp_tree();

        let result = tree.write(Utf8Path::new("../outside.json"), Vec::new());
        assert!(matches!(result, Err(MtwError::PathOutsideWorkspace { .. })));
        assert!(tree.read(Utf8Path::new("/etc/passwd")).is_err());
    }

    #[tokio::test]
    async fn test_flush_commits_changes() {
        let (temp_dir, mut tree) = temp_tree();

        tree.write(Utf8Path::new("apps/web/new.json"), b"{}".to_vec()).unwrap();
        let written = tree.flush().await.unwrap();

        assert_eq!(written.len(), 1);
        assert_eq!(written[0].kind, ChangeKind::Create);
        assert!(tree.changes().is_empty());
        let on_disk = std::fs::read_to_string(temp_dir.path().join("apps/web/new.json")).unwrap();
        assert_eq!(on_disk, "{}");
    }
}
