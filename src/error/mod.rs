pub mod types;

/// Wraps an `io::Result` into a `FileSystemError` variant carrying the path.
#[macro_export]
macro_rules! fs_err {
    ($result:expr, $variant:ident, $path:expr) => {
        $result.map_err(|e| $crate::error::types::ConvertError::FileSystem(
            $crate::error::types::FileSystemError::$variant {
                path: $path.to_path_buf(),
                reason: e.to_string(),
            },
        ))
    };
}

pub use types::*;
