use std::path::{Component, Path};
use log::debug;
use crate::error::types::{Result, ConvertError};

pub trait FileOperation {
    fn validate_source_archive(&self) -> Result<()>;
    fn validate_output_dir(&self) -> Result<()>;
    fn target_file_name(&self, extension: &str) -> Result<String>;
    fn to_archive_name(&self) -> Option<String>;
}

impl FileOperation for Path {
    fn validate_source_archive(&self) -> Result<()> {
        if self.as_os_str().is_empty() {
            return Err(ConvertError::InvalidInput("no source archive selected".to_string()));
        }
        let metadata = self.metadata().map_err(|_| {
            ConvertError::InvalidInput(format!("source archive does not exist: {}", self.display()))
        })?;
        if !metadata.is_file() {
            return Err(ConvertError::InvalidInput(format!(
                "source archive is not a regular file: {}",
                self.display()
            )));
        }
        Ok(())
    }

    fn validate_output_dir(&self) -> Result<()> {
        if self.as_os_str().is_empty() {
            return Err(ConvertError::InvalidInput("no output directory selected".to_string()));
        }
        let metadata = self.metadata().map_err(|_| {
            ConvertError::InvalidInput(format!("output directory does not exist: {}", self.display()))
        })?;
        if !metadata.is_dir() {
            return Err(ConvertError::InvalidInput(format!(
                "output path is not a directory: {}",
                self.display()
            )));
        }
        if metadata.permissions().readonly() {
            return Err(ConvertError::InvalidInput(format!(
                "output directory is not writable: {}",
                self.display()
            )));
        }
        Ok(())
    }

    /// `app.zip` -> `app.<extension>`; only the last extension is replaced.
    fn target_file_name(&self, extension: &str) -> Result<String> {
        let stem = self
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .filter(|s| !s.is_empty())
            .ok_or_else(|| {
                ConvertError::InvalidInput(format!("cannot derive a file name from {}", self.display()))
            })?;
        debug!("Derived stem '{}' from {}", stem, self.display());
        Ok(format!("{}.{}", stem, extension))
    }

    /// Joins the normal components with `/`, the separator zip entries use.
    /// `None` if any component is not valid UTF-8.
    fn to_archive_name(&self) -> Option<String> {
        let mut parts = Vec::new();
        for component in self.components() {
            if let Component::Normal(part) = component {
                parts.push(part.to_str()?);
            }
        }
        Some(parts.join("/"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs::File;
    use std::path::PathBuf;
    use tempfile::tempdir;

    #[test]
    fn test_target_file_name() {
        assert_eq!(Path::new("/in/app.zip").target_file_name("sb3").unwrap(), "app.sb3");
        assert_eq!(Path::new("my.game.zip").target_file_name("sb3").unwrap(), "my.game.sb3");
        assert_eq!(Path::new("noext").target_file_name("sb3").unwrap(), "noext.sb3");
        assert!(Path::new("").target_file_name("sb3").is_err());
    }

    #[test]
    fn test_archive_name_normalization() {
        let path: PathBuf = ["assets", "icons", "icon.png"].iter().collect();
        assert_eq!(path.to_archive_name().as_deref(), Some("assets/icons/icon.png"));
        assert_eq!(Path::new("./main.js").to_archive_name().as_deref(), Some("main.js"));
    }

    #[cfg(unix)]
    #[test]
    fn test_archive_name_rejects_non_utf8() {
        use std::ffi::OsStr;
        use std::os::unix::ffi::OsStrExt;

        let path = Path::new("assets").join(OsStr::from_bytes(b"icon\xff.png"));
        assert_eq!(path.to_archive_name(), None);
    }

    #[test]
    fn test_source_validation() {
        let temp = tempdir().unwrap();
        let archive = temp.path().join("app.zip");

        assert!(matches!(archive.validate_source_archive(), Err(ConvertError::InvalidInput(_))));
        File::create(&archive).unwrap();
        assert!(archive.validate_source_archive().is_ok());

        // A directory is not an archive
        assert!(matches!(temp.path().validate_source_archive(), Err(ConvertError::InvalidInput(_))));
        assert!(matches!(Path::new("").validate_source_archive(), Err(ConvertError::InvalidInput(_))));
    }

    #[test]
    fn test_output_dir_validation() {
        let temp = tempdir().unwrap();
        assert!(temp.path().validate_output_dir().is_ok());

        let missing = temp.path().join("missing");
        assert!(matches!(missing.validate_output_dir(), Err(ConvertError::InvalidInput(_))));

        let file = temp.path().join("file.txt");
        File::create(&file).unwrap();
        assert!(matches!(file.validate_output_dir(), Err(ConvertError::InvalidInput(_))));
    }
}
