mod writer;

pub use writer::{ArchiveWriter, PackSummary};
