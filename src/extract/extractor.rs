use std::fs::{self, File};
use std::io;
use std::path::Path;
use std::fmt::Debug;
use log::debug;
use zip::ZipArchive;
use crate::error::types::ExtractError;
use super::result::{ArchiveListing, ExtractSummary};

// Combining the traits into a single trait to avoid trait object limitations
pub trait ArchiveExtractor: Send + Sync + Debug {
    fn extract(&self, archive_path: &Path, output_dir: &Path) -> Result<ExtractSummary, ExtractError>;
    fn list(&self, archive_path: &Path) -> Result<ArchiveListing, ExtractError>;
    fn clone_box(&self) -> Box<dyn ArchiveExtractor>;
}

impl Clone for Box<dyn ArchiveExtractor> {
    fn clone(&self) -> Self {
        self.clone_box()
    }
}

#[derive(Debug, Clone, Default)]
pub struct ZipExtractor;

impl ZipExtractor {
    pub fn new() -> Self {
        Self
    }

    fn open(&self, archive_path: &Path) -> Result<ZipArchive<File>, ExtractError> {
        let file = File::open(archive_path).map_err(ExtractError::Open)?;
        Ok(ZipArchive::new(file)?)
    }
}

fn io_err(path: &Path) -> impl FnOnce(io::Error) -> ExtractError + '_ {
    move |source| ExtractError::Io {
        path: path.to_path_buf(),
        source,
    }
}

impl ArchiveExtractor for ZipExtractor {
    fn extract(&self, archive_path: &Path, output_dir: &Path) -> Result<ExtractSummary, ExtractError> {
        let mut archive = self.open(archive_path)?;
        debug!("Extracting {} entries from {}", archive.len(), archive_path.display());

        let mut summary = ExtractSummary::default();

        for i in 0..archive.len() {
            let mut entry = archive.by_index(i)?;

            let relative = match entry.enclosed_name() {
                Some(path) => path.to_owned(),
                None => return Err(ExtractError::UnsafeEntry(entry.name().to_string())),
            };
            let output_path = output_dir.join(&relative);

            if entry.is_dir() {
                fs::create_dir_all(&output_path).map_err(io_err(&output_path))?;
                summary.directories += 1;
                continue;
            }

            if let Some(parent) = output_path.parent() {
                fs::create_dir_all(parent).map_err(io_err(parent))?;
            }

            let mut output_file = File::create(&output_path).map_err(io_err(&output_path))?;
            let written = io::copy(&mut entry, &mut output_file).map_err(io_err(&output_path))?;

            #[cfg(unix)]
            {
                use std::os::unix::fs::PermissionsExt;
                if let Some(mode) = entry.unix_mode() {
                    // Keep the owner able to delete and overwrite what we extracted.
                    let mode = (mode & 0o7777) | 0o600;
                    fs::set_permissions(&output_path, fs::Permissions::from_mode(mode))
                        .map_err(io_err(&output_path))?;
                }
            }

            summary.files += 1;
            summary.bytes += written;
        }

        debug!(
            "Extracted {} files ({} bytes) and {} directories",
            summary.files, summary.bytes, summary.directories
        );
        Ok(summary)
    }

    fn list(&self, archive_path: &Path) -> Result<ArchiveListing, ExtractError> {
        let mut archive = self.open(archive_path)?;
        let mut entries = Vec::with_capacity(archive.len());

        for i in 0..archive.len() {
            let entry = archive.by_index(i)?;
            entries.push(entry.name().replace('\\', "/"));
        }

        Ok(ArchiveListing::new(entries))
    }

    fn clone_box(&self) -> Box<dyn ArchiveExtractor> {
        Box::new(self.clone())
    }
}
