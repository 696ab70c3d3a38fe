use std::fmt;
use std::io;
use std::path::PathBuf;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, ConvertError>;

#[derive(Error, Debug)]
pub enum ConvertError {
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Extraction of {} failed: {source}", .archive.display())]
    ExtractionFailed {
        archive: PathBuf,
        #[source]
        source: ExtractError,
    },

    #[error("Resource directory not found: {}", .0.display())]
    ResourceNotFound(PathBuf),

    #[error("Failed to write archive {}: {source}", .path.display())]
    ArchiveWriteFailed {
        path: PathBuf,
        #[source]
        source: PackError,
    },

    #[error("File system error: {0}")]
    FileSystem(#[from] FileSystemError),

    #[error("A conversion is already in progress")]
    Busy,

    #[error("Conversion worker terminated unexpectedly: {0}")]
    Worker(String),
}

#[derive(Error, Debug)]
pub enum ExtractError {
    #[error("cannot open archive: {0}")]
    Open(#[source] io::Error),

    #[error("invalid archive: {0}")]
    Archive(#[from] zip::result::ZipError),

    #[error("entry '{0}' escapes the extraction directory")]
    UnsafeEntry(String),

    #[error("I/O error at {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

#[derive(Error, Debug)]
pub enum PackError {
    #[error("directory walk failed: {0}")]
    Walk(#[from] walkdir::Error),

    #[error("cannot read {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("file name is not valid UTF-8: {}", .0.display())]
    NonUtf8Name(PathBuf),

    #[error("zip error: {0}")]
    Zip(#[from] zip::result::ZipError),

    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
}

#[derive(Error, Debug)]
pub enum FileSystemError {
    #[error("Failed to create directory {path}: {reason}")]
    CreateDir {
        path: PathBuf,
        reason: String,
    },
}

/// Non-fatal: the scratch workspace could not be fully removed.
///
/// Never turns a successful conversion into a failure; it is logged and
/// carried alongside the result instead.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CleanupWarning {
    pub path: PathBuf,
    pub reason: String,
}

impl fmt::Display for CleanupWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Failed to remove scratch directory {}: {}", self.path.display(), self.reason)
    }
}

impl ConvertError {
    /// Short machine-friendly name of the error kind.
    pub fn kind(&self) -> &'static str {
        match self {
            ConvertError::InvalidInput(_) => "InvalidInput",
            ConvertError::ExtractionFailed { .. } => "ExtractionFailed",
            ConvertError::ResourceNotFound(_) => "ResourceNotFound",
            ConvertError::ArchiveWriteFailed { .. } => "ArchiveWriteFailed",
            ConvertError::FileSystem(_) => "FileSystem",
            ConvertError::Busy => "Busy",
            ConvertError::Worker(_) => "Worker",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_kinds() {
        assert_eq!(ConvertError::InvalidInput("x".into()).kind(), "InvalidInput");
        assert_eq!(ConvertError::ResourceNotFound(PathBuf::from("resources/app")).kind(), "ResourceNotFound");
        assert_eq!(ConvertError::Busy.kind(), "Busy");
    }

    #[test]
    fn test_resource_not_found_names_path() {
        let err = ConvertError::ResourceNotFound(PathBuf::from("resources/app"));
        assert!(err.to_string().contains("resources/app"));
    }

    #[test]
    fn test_cleanup_warning_display() {
        let warning = CleanupWarning {
            path: PathBuf::from("/out/.sb3_scratch-1"),
            reason: "permission denied".to_string(),
        };
        let text = warning.to_string();
        assert!(text.contains(".sb3_scratch-1"));
        assert!(text.contains("permission denied"));
    }
}
