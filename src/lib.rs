pub mod cli;
pub mod core;
pub mod error;
pub mod extract;
pub mod fs;
pub mod pack;

pub use crate::core::api::{ConvertApi, ConvertApiOps, ConversionHandle};
pub use crate::core::config::ConvertConfig;
pub use crate::core::progress::{ProgressSink, ProgressEvent, Stage};
pub use crate::core::request::{ConversionRequest, ConversionOutput, ConversionResult};
pub use crate::error::types::{ConvertError, ExtractError, PackError, FileSystemError, CleanupWarning, Result};
