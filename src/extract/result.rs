use std::fmt;
use crate::core::constants::RESOURCE_DIR;

/// Counts gathered while extracting an archive.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct ExtractSummary {
    pub files: usize,
    pub directories: usize,
    pub bytes: u64,
}

/// Entry names of an archive, read without extracting it.
#[derive(Debug, Clone)]
pub struct ArchiveListing {
    entries: Vec<String>,
}

impl ArchiveListing {
    pub fn new(entries: Vec<String>) -> Self {
        Self { entries }
    }

    pub fn entries(&self) -> &[String] {
        &self.entries
    }

    fn resource_prefix() -> String {
        format!("{}/", RESOURCE_DIR)
    }

    pub fn has_resource_dir(&self) -> bool {
        let prefix = Self::resource_prefix();
        self.entries.iter().any(|name| name.starts_with(&prefix))
    }

    /// File entries under the resource directory, relative to it.
    pub fn resource_files(&self) -> Vec<String> {
        let prefix = Self::resource_prefix();
        self.entries
            .iter()
            .filter(|name| !name.ends_with('/'))
            .filter_map(|name| name.strip_prefix(&prefix))
            .filter(|rest| !rest.is_empty())
            .map(String::from)
            .collect()
    }
}

impl fmt::Display for ArchiveListing {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if !self.has_resource_dir() {
            return write!(f, "{} entries, no {} directory", self.entries.len(), RESOURCE_DIR);
        }
        writeln!(f, "{} entries, {} files under {}:", self.entries.len(), self.resource_files().len(), RESOURCE_DIR)?;
        for file in self.resource_files() {
            writeln!(f, "  {}", file)?;
        }
        Ok(())
    }
}
