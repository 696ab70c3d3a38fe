use std::io;
use std::path::{Path, PathBuf};
use std::time::{Duration, SystemTime};
use log::{warn, debug};
use uuid::Uuid;
use crate::core::constants::SCRATCH_PREFIX;
use crate::error::types::{Result, CleanupWarning};
use crate::fs_err;

/// Removes a scratch directory tree.
pub type ScratchRemover = fn(&Path) -> io::Result<()>;

pub fn remove_tree(path: &Path) -> io::Result<()> {
    std::fs::remove_dir_all(path)
}

/// Uniquely named scratch directory owned by a single conversion.
///
/// Created inside the output directory so the staged archive can be renamed
/// into place without crossing filesystems. [`ScratchWorkspace::close`] removes
/// it and reports failures; dropping an unclosed workspace removes it on a
/// best-effort basis.
#[derive(Debug)]
pub struct ScratchWorkspace {
    path: PathBuf,
    created_at: SystemTime,
    closed: bool,
}

impl ScratchWorkspace {
    pub fn create_in(base_path: impl AsRef<Path>) -> Result<Self> {
        let uuid = Uuid::new_v4();
        let path = base_path.as_ref().join(format!("{}{}", SCRATCH_PREFIX, uuid.simple()));
        fs_err!(std::fs::create_dir(&path), CreateDir, path)?;

        debug!("Created scratch directory: {}", path.display());

        Ok(Self {
            path,
            created_at: SystemTime::now(),
            closed: false,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn exists(&self) -> bool {
        self.path.exists()
    }

    pub fn join(&self, path: impl AsRef<Path>) -> PathBuf {
        self.path.join(path)
    }

    pub fn age(&self) -> Duration {
        SystemTime::now()
            .duration_since(self.created_at)
            .unwrap_or(Duration::from_secs(0))
    }

    /// Removes the directory tree, returning a warning instead of an error on failure.
    pub fn close(self) -> Option<CleanupWarning> {
        self.close_with(remove_tree)
    }

    /// Like [`ScratchWorkspace::close`], removing the tree with `remover`.
    pub fn close_with(mut self, remover: ScratchRemover) -> Option<CleanupWarning> {
        self.closed = true;
        self.remove(remover)
    }

    fn remove(&self, remover: ScratchRemover) -> Option<CleanupWarning> {
        debug!("Removing scratch directory {} after {} ms", self.path.display(), self.age().as_millis());
        match remover(&self.path) {
            Ok(()) => None,
            Err(e) if e.kind() == io::ErrorKind::NotFound => None,
            Err(e) => {
                warn!("Failed to remove scratch directory {}: {}", self.path.display(), e);
                Some(CleanupWarning {
                    path: self.path.clone(),
                    reason: e.to_string(),
                })
            }
        }
    }
}

impl Drop for ScratchWorkspace {
    fn drop(&mut self) {
        if !self.closed {
            let _ = self.remove(remove_tree);
        }
    }
}
