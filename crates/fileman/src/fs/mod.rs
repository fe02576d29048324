//! Filesystem capabilities for Fileman
//!
//! Provides the async [`FileSystem`] trait consumed by the operations and the
//! host implementation:
//! - `RealFs`: OS filesystem, each effect isolated on the blocking pool

mod real;
mod traits;

pub use real::RealFs;
pub(crate) use real::isolated;
pub use traits::{DIR_MODE, DirEntry, FILE_MODE, FileSystem, FileType};
