//! Application layer: hierarchy files and tree snapshots
//!
//! The tree never persists itself; this layer is the caller that does.

pub mod error;
pub mod error_ext;
pub mod hierarchy;

pub use error::{ApplicationError, ApplicationResult};
pub use error_ext::IoResultExt;
pub use hierarchy::{load_tree, save_tree, HierarchyFile, NodeEntry, RootEntry};
