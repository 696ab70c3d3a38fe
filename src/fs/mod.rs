mod temp;
mod traits;

pub use temp::{remove_tree, ScratchRemover, ScratchWorkspace};
pub use traits::FileOperation;
