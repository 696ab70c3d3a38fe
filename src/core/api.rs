use std::path::{Path, PathBuf};
use std::sync::{mpsc, Arc};
use std::thread::{self, JoinHandle};
use log::{debug, info, warn};
use crate::error::types::{ConvertError, ExtractError, Result};
use crate::extract::{ArchiveExtractor, ArchiveListing, ZipExtractor};
use crate::fs::{remove_tree, FileOperation, ScratchRemover, ScratchWorkspace};
use crate::pack::{ArchiveWriter, PackSummary};
use super::config::{ConvertConfig, OverwritePolicy};
use super::constants::RESOURCE_DIR;
use super::guard::{ConversionGuard, ConversionToken};
use super::progress::{ChannelSink, ProgressEvent, ProgressSink, Stage};
use super::request::{ConversionOutput, ConversionRequest, ConversionResult};

/// Operations for repackaging a packaged application archive.
///
/// # Examples
///
/// ```no_run
/// use sb3_tools::core::{ConvertApi, ConvertApiOps, ConversionRequest, LogSink};
///
/// let api = ConvertApi::new();
/// let request = ConversionRequest::new("app.zip", "out").unwrap();
/// let output = api.convert(&request, &LogSink).unwrap();
/// println!("Wrote {}", output.archive_path.display());
/// ```
pub trait ConvertApiOps {
    /// Runs a conversion on the calling thread, reporting to `sink`.
    fn convert(&self, request: &ConversionRequest, sink: &dyn ProgressSink) -> ConversionResult;

    /// Lists an archive without extracting it.
    fn inspect(&self, archive_path: &Path) -> Result<ArchiveListing>;

    /// Starts a conversion on a background thread. Fails with
    /// [`ConvertError::Busy`] while another spawned conversion is running.
    fn spawn(&self, request: ConversionRequest) -> Result<ConversionHandle>;
}

/// Main API for converting archives.
///
/// Clones share the same in-flight slot, so at most one spawned conversion
/// runs per `ConvertApi` family.
///
/// ```no_run
/// use sb3_tools::core::{ConvertApi, ConvertConfig, OverwritePolicy};
///
/// let config = ConvertConfig::builder()
///     .overwrite(OverwritePolicy::Refuse)
///     .build();
///
/// let api = ConvertApi::builder()
///     .with_config(config)
///     .build();
/// ```
#[derive(Debug, Clone)]
pub struct ConvertApi {
    config: Arc<ConvertConfig>,
    extractor: Box<dyn ArchiveExtractor>,
    remover: ScratchRemover,
    guard: ConversionGuard,
}

impl Default for ConvertApi {
    fn default() -> Self {
        Self::new()
    }
}

impl ConvertApi {
    pub fn builder() -> ConvertApiBuilder {
        ConvertApiBuilder::new()
    }

    pub fn new() -> Self {
        Self::builder().build()
    }

    pub fn config(&self) -> &ConvertConfig {
        &self.config
    }

    pub fn is_busy(&self) -> bool {
        self.guard.is_active()
    }

    /// Where the output archive for `request` will be written.
    pub fn destination_for(&self, request: &ConversionRequest) -> Result<PathBuf> {
        let file_name = request
            .source_archive()
            .target_file_name(self.config.target_extension())?;
        let output_dir = std::fs::canonicalize(request.output_dir()).map_err(|e| {
            ConvertError::InvalidInput(format!(
                "cannot resolve output directory {}: {}",
                request.output_dir().display(),
                e
            ))
        })?;
        Ok(output_dir.join(file_name))
    }

    fn check_destination(&self, request: &ConversionRequest, destination: &Path) -> Result<()> {
        let source = std::fs::canonicalize(request.source_archive()).map_err(|e| {
            ConvertError::InvalidInput(format!(
                "cannot resolve source archive {}: {}",
                request.source_archive().display(),
                e
            ))
        })?;
        if source == destination {
            return Err(ConvertError::InvalidInput(format!(
                "destination would replace the source archive: {}",
                destination.display()
            )));
        }
        if self.config.overwrite() == OverwritePolicy::Refuse && destination.exists() {
            return Err(ConvertError::InvalidInput(format!(
                "destination already exists: {}",
                destination.display()
            )));
        }
        if destination.is_dir() {
            return Err(ConvertError::InvalidInput(format!(
                "destination is a directory: {}",
                destination.display()
            )));
        }
        Ok(())
    }

    fn run_pipeline(
        &self,
        request: &ConversionRequest,
        workspace: &ScratchWorkspace,
        destination: &Path,
        sink: &dyn ProgressSink,
    ) -> Result<PackSummary> {
        sink.stage(Stage::Extracting);
        sink.log_line(&format!("Extracting {}", request.source_archive().display()), false);
        let extract_dir = workspace.join("extracted");
        std::fs::create_dir(&extract_dir).map_err(|e| ConvertError::ExtractionFailed {
            archive: request.source_archive().to_path_buf(),
            source: ExtractError::Io {
                path: extract_dir.clone(),
                source: e,
            },
        })?;
        let extracted = self
            .extractor
            .extract(request.source_archive(), &extract_dir)
            .map_err(|source| ConvertError::ExtractionFailed {
                archive: request.source_archive().to_path_buf(),
                source,
            })?;
        debug!("Extracted {} files into {}", extracted.files, extract_dir.display());

        sink.stage(Stage::LocatingResources);
        let resource_dir = extract_dir.join(RESOURCE_DIR);
        if !resource_dir.is_dir() {
            return Err(ConvertError::ResourceNotFound(PathBuf::from(RESOURCE_DIR)));
        }

        sink.stage(Stage::Writing);
        sink.log_line(&format!("Creating {}", destination.display()), false);
        ArchiveWriter::new(self.config.compression())
            .write_to(&resource_dir, destination, workspace.path())
            .map_err(|source| ConvertError::ArchiveWriteFailed {
                path: destination.to_path_buf(),
                source,
            })
    }
}

impl ConvertApiOps for ConvertApi {
    fn convert(&self, request: &ConversionRequest, sink: &dyn ProgressSink) -> ConversionResult {
        sink.stage(Stage::Validating);
        let destination = request
            .validate()
            .and_then(|_| self.destination_for(request))
            .and_then(|destination| self.check_destination(request, &destination).map(|_| destination));
        let destination = match destination {
            Ok(destination) => destination,
            Err(e) => {
                sink.log_line(&e.to_string(), true);
                return Err(e);
            }
        };

        let workspace = match ScratchWorkspace::create_in(request.output_dir()) {
            Ok(workspace) => workspace,
            Err(e) => {
                sink.log_line(&e.to_string(), true);
                return Err(e);
            }
        };
        sink.log_line(&format!("Created scratch directory {}", workspace.path().display()), false);

        let outcome = self.run_pipeline(request, &workspace, &destination, sink);

        sink.stage(Stage::CleaningUp);
        let cleanup_warning = workspace.close_with(self.remover);
        match &cleanup_warning {
            Some(warning) => sink.log_line(&warning.to_string(), true),
            None => sink.log_line("Temporary files removed", false),
        }

        match outcome {
            Ok(summary) => {
                info!("Converted {} -> {}", request.source_archive().display(), destination.display());
                sink.log_line(&format!("Output file: {}", destination.display()), false);
                sink.stage(Stage::Done);
                Ok(ConversionOutput {
                    archive_path: destination,
                    entries: summary.entries,
                    bytes: summary.bytes,
                    cleanup_warning,
                })
            }
            Err(e) => {
                warn!("Conversion of {} failed: {}", request.source_archive().display(), e);
                sink.log_line(&e.to_string(), true);
                Err(e)
            }
        }
    }

    fn inspect(&self, archive_path: &Path) -> Result<ArchiveListing> {
        archive_path.validate_source_archive()?;
        self.extractor
            .list(archive_path)
            .map_err(|source| ConvertError::ExtractionFailed {
                archive: archive_path.to_path_buf(),
                source,
            })
    }

    fn spawn(&self, request: ConversionRequest) -> Result<ConversionHandle> {
        let token = self.guard.try_acquire()?;
        let (tx, rx) = mpsc::channel();
        let api = self.clone();

        let worker = thread::Builder::new()
            .name("sb3-convert".to_string())
            .spawn(move || {
                let _token: ConversionToken = token;
                let sink = ChannelSink::new(tx);
                api.convert(&request, &sink)
            })
            .map_err(|e| ConvertError::Worker(e.to_string()))?;

        Ok(ConversionHandle { events: rx, worker })
    }
}

/// A conversion running on a background thread.
///
/// The event stream ends when the worker finishes; [`ConversionHandle::wait`]
/// then yields the result.
#[derive(Debug)]
pub struct ConversionHandle {
    events: mpsc::Receiver<ProgressEvent>,
    worker: JoinHandle<ConversionResult>,
}

impl ConversionHandle {
    pub fn events(&self) -> mpsc::Iter<'_, ProgressEvent> {
        self.events.iter()
    }

    pub fn try_event(&self) -> Option<ProgressEvent> {
        self.events.try_recv().ok()
    }

    pub fn is_finished(&self) -> bool {
        self.worker.is_finished()
    }

    pub fn wait(self) -> ConversionResult {
        self.worker.join().unwrap_or_else(|panic| {
            let reason = panic
                .downcast_ref::<&str>()
                .map(|s| s.to_string())
                .or_else(|| panic.downcast_ref::<String>().cloned())
                .unwrap_or_else(|| "worker panicked".to_string());
            Err(ConvertError::Worker(reason))
        })
    }
}

/// Builder for [`ConvertApi`].
#[derive(Default)]
pub struct ConvertApiBuilder {
    config: Option<ConvertConfig>,
    extractor: Option<Box<dyn ArchiveExtractor>>,
    remover: Option<ScratchRemover>,
}

impl ConvertApiBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(mut self, config: ConvertConfig) -> Self {
        self.config = Some(config);
        self
    }

    pub fn with_extractor(mut self, extractor: Box<dyn ArchiveExtractor>) -> Self {
        self.extractor = Some(extractor);
        self
    }

    /// Replaces how the scratch directory is removed after a conversion.
    pub fn with_scratch_remover(mut self, remover: ScratchRemover) -> Self {
        self.remover = Some(remover);
        self
    }

    pub fn build(self) -> ConvertApi {
        ConvertApi {
            config: Arc::new(self.config.unwrap_or_default()),
            extractor: self.extractor.unwrap_or_else(|| Box::new(ZipExtractor::new())),
            remover: self.remover.unwrap_or(remove_tree),
            guard: ConversionGuard::new(),
        }
    }
}
