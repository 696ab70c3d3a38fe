use std::fs::File;
use std::io::{self, Seek, Write};
use std::path::Path;
use log::{debug, info};
use tempfile::NamedTempFile;
use walkdir::WalkDir;
use zip::write::SimpleFileOptions;
use zip::ZipWriter;
use crate::core::config::CompressionMode;
use crate::error::types::PackError;
use crate::fs::FileOperation;

/// Entries at or above this size need zip64 extra fields.
const ZIP64_THRESHOLD: u64 = u32::MAX as u64;

fn needs_zip64(len: u64) -> bool {
    len >= ZIP64_THRESHOLD
}

/// What ended up in a written archive.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct PackSummary {
    /// Archive-relative names in the order they were written.
    pub entries: Vec<String>,
    pub bytes: u64,
}

/// Re-archives the regular files of a directory tree into a zip file.
#[derive(Debug, Clone, Copy, Default)]
pub struct ArchiveWriter {
    compression: CompressionMode,
}

impl ArchiveWriter {
    pub fn new(compression: CompressionMode) -> Self {
        Self { compression }
    }

    /// Writes `source_dir` into an archive staged in `staging_dir`, then renames
    /// it over `destination`. An existing destination is only replaced once the
    /// new archive is complete.
    pub fn write_to(&self, source_dir: &Path, destination: &Path, staging_dir: &Path) -> Result<PackSummary, PackError> {
        let mut staged = NamedTempFile::new_in(staging_dir)?;
        debug!("Staging archive at {}", staged.path().display());

        let summary = self.write_archive(source_dir, staged.as_file_mut())?;
        staged.as_file().sync_all()?;

        staged.persist(destination).map_err(|e| PackError::Io(e.error))?;
        info!("Wrote {} entries ({} bytes) to {}", summary.entries.len(), summary.bytes, destination.display());
        Ok(summary)
    }

    /// Walks `source_dir` in directory-entry order (unsorted) and writes every
    /// regular file with a path relative to `source_dir`.
    pub fn write_archive<W: Write + Seek>(&self, source_dir: &Path, target: W) -> Result<PackSummary, PackError> {
        let options = SimpleFileOptions::default().compression_method(self.compression.method());
        let mut zip = ZipWriter::new(target);
        let mut summary = PackSummary::default();

        for entry in WalkDir::new(source_dir).follow_links(false) {
            let entry = entry?;
            if !entry.file_type().is_file() {
                continue;
            }

            let relative = entry
                .path()
                .strip_prefix(source_dir)
                .map_err(|e| PackError::Io(io::Error::new(io::ErrorKind::Other, e)))?;
            let name = relative
                .to_archive_name()
                .ok_or_else(|| PackError::NonUtf8Name(entry.path().to_path_buf()))?;
            let len = entry.metadata()?.len();

            let mut input = File::open(entry.path()).map_err(|source| PackError::Read {
                path: entry.path().to_path_buf(),
                source,
            })?;

            zip.start_file(name.as_str(), options.large_file(needs_zip64(len)))?;
            let written = io::copy(&mut input, &mut zip).map_err(|source| PackError::Read {
                path: entry.path().to_path_buf(),
                source,
            })?;
            debug!("Added {} ({} bytes)", name, written);

            summary.bytes += written;
            summary.entries.push(name);
        }

        zip.finish()?;
        Ok(summary)
    }
}
