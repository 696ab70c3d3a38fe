mod extractor;
mod result;

pub use extractor::{ArchiveExtractor, ZipExtractor};
pub use result::{ArchiveListing, ExtractSummary};
