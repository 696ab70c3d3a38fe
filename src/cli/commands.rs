use std::path::Path;
use log::{error, info, warn};
use crate::core::api::ConvertApiOps;
use crate::core::progress::ProgressEvent;
use crate::core::request::{ConversionOutput, ConversionRequest};
use crate::error::types::Result;

pub fn convert_archive(
    api: &dyn ConvertApiOps,
    archive: &Path,
    output_dir: &Path,
    quiet: bool,
) -> Result<ConversionOutput> {
    let request = ConversionRequest::new(archive, output_dir)?;
    let handle = api.spawn(request)?;

    for event in handle.events() {
        match event {
            ProgressEvent::Progress { percent, message } => {
                if !quiet {
                    println!("[{:>3}%] {}", percent, message);
                }
            }
            ProgressEvent::Log { message, is_error: true } => error!("{}", message),
            ProgressEvent::Log { message, is_error: false } => info!("{}", message),
        }
    }

    let output = handle.wait()?;
    if let Some(warning) = &output.cleanup_warning {
        warn!("{}", warning);
    }
    println!("{}", output.archive_path.display());
    Ok(output)
}

pub fn inspect_archive(api: &dyn ConvertApiOps, archive: &Path) -> Result<()> {
    let listing = api.inspect(archive)?;
    println!("{}", listing);
    Ok(())
}
