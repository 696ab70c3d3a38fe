use super::constants::DEFAULT_TARGET_EXTENSION;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OverwritePolicy {
    /// Silently replace an existing destination archive.
    #[default]
    Overwrite,
    /// Fail with `InvalidInput` if the destination already exists.
    Refuse,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CompressionMode {
    #[default]
    Deflated,
    Stored,
}

impl CompressionMode {
    pub fn method(self) -> zip::CompressionMethod {
        match self {
            CompressionMode::Deflated => zip::CompressionMethod::Deflated,
            CompressionMode::Stored => zip::CompressionMethod::Stored,
        }
    }
}

#[derive(Debug, Clone)]
pub struct ConvertConfig {
    target_extension: String,
    overwrite: OverwritePolicy,
    compression: CompressionMode,
}

impl ConvertConfig {
    pub fn builder() -> ConvertConfigBuilder {
        ConvertConfigBuilder::new()
    }

    pub fn target_extension(&self) -> &str {
        &self.target_extension
    }

    pub fn overwrite(&self) -> OverwritePolicy {
        self.overwrite
    }

    pub fn compression(&self) -> CompressionMode {
        self.compression
    }
}

pub struct ConvertConfigBuilder {
    target_extension: String,
    overwrite: OverwritePolicy,
    compression: CompressionMode,
}

impl Default for ConvertConfigBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl ConvertConfigBuilder {
    pub fn new() -> Self {
        Self {
            target_extension: DEFAULT_TARGET_EXTENSION.to_string(),
            overwrite: OverwritePolicy::default(),
            compression: CompressionMode::default(),
        }
    }

    /// Accepts the extension with or without a leading dot.
    pub fn target_extension(mut self, extension: impl Into<String>) -> Self {
        let extension = extension.into();
        self.target_extension = extension.trim_start_matches('.').to_string();
        self
    }

    pub fn overwrite(mut self, policy: OverwritePolicy) -> Self {
        self.overwrite = policy;
        self
    }

    pub fn compression(mut self, mode: CompressionMode) -> Self {
        self.compression = mode;
        self
    }

    pub fn build(self) -> ConvertConfig {
        let target_extension = if self.target_extension.is_empty() {
            DEFAULT_TARGET_EXTENSION.to_string()
        } else {
            self.target_extension
        };

        ConvertConfig {
            target_extension,
            overwrite: self.overwrite,
            compression: self.compression,
        }
    }
}

impl Default for ConvertConfig {
    fn default() -> Self {
        Self::builder().build()
    }
}
