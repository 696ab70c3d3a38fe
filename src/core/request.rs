use std::path::{Path, PathBuf};
use crate::error::types::{CleanupWarning, Result};
use crate::fs::FileOperation;

/// Source archive and output directory for one conversion.
///
/// Both paths are checked on construction; [`ConversionRequest::validate`]
/// repeats the check because the filesystem can change before the
/// conversion actually starts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConversionRequest {
    source_archive: PathBuf,
    output_dir: PathBuf,
}

impl ConversionRequest {
    pub fn new(source_archive: impl Into<PathBuf>, output_dir: impl Into<PathBuf>) -> Result<Self> {
        let request = Self {
            source_archive: source_archive.into(),
            output_dir: output_dir.into(),
        };
        request.validate()?;
        Ok(request)
    }

    pub fn validate(&self) -> Result<()> {
        self.source_archive.validate_source_archive()?;
        self.output_dir.validate_output_dir()
    }

    pub fn source_archive(&self) -> &Path {
        &self.source_archive
    }

    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }
}

#[derive(Debug, Clone)]
pub struct ConversionOutput {
    /// Absolute path of the written archive.
    pub archive_path: PathBuf,
    /// Archive-relative entry names, in write order.
    pub entries: Vec<String>,
    pub bytes: u64,
    pub cleanup_warning: Option<CleanupWarning>,
}

pub type ConversionResult = Result<ConversionOutput>;
