//! Filesystem capability trait

use async_trait::async_trait;
use std::path::Path;

use crate::error::Result;

/// Mode bits for files created by the tool (rw-r--r--).
pub const FILE_MODE: u32 = 0o644;

/// Mode bits for directories created by the tool (rwxr-xr-x).
pub const DIR_MODE: u32 = 0o755;

/// The filesystem capabilities the operations consume.
///
/// Implementations hold no cache: every call observes the current state of
/// the underlying storage.
#[async_trait]
pub trait FileSystem: Send + Sync {
    /// Type of the entity at `path`, following symlinks. `None` if absent or
    /// not inspectable.
    async fn file_type(&self, path: &Path) -> Option<FileType>;

    /// Create `path` exclusively and seed it with `contents`.
    ///
    /// Fails with `AlreadyExists` if anything appears at `path` first, even
    /// when it was created after the caller's own existence check.
    async fn create_file(&self, path: &Path, contents: &[u8]) -> Result<()>;

    /// Read a file's contents.
    async fn read_file(&self, path: &Path) -> Result<Vec<u8>>;

    /// Append `content` under an exclusive lock.
    ///
    /// If the file is non-empty and its last byte is not `\n`, a single
    /// newline is written first; separator and content go out in one write.
    async fn append_entry(&self, path: &Path, content: &[u8]) -> Result<()>;

    /// Remove a file.
    async fn remove_file(&self, path: &Path) -> Result<()>;

    /// Create a single directory (parents must exist).
    async fn create_dir(&self, path: &Path) -> Result<()>;

    /// Entries of a directory in enumeration order, `.` and `..` excluded.
    async fn read_dir(&self, path: &Path) -> Result<Vec<DirEntry>>;

    /// Remove a directory only if it holds no entries; fails with `NotEmpty` otherwise.
    async fn remove_empty_dir(&self, path: &Path) -> Result<()>;

    /// Check for a regular file.
    async fn is_file(&self, path: &Path) -> bool {
        self.file_type(path).await == Some(FileType::File)
    }

    /// Check for a directory.
    async fn is_dir(&self, path: &Path) -> bool {
        self.file_type(path).await == Some(FileType::Directory)
    }
}

/// File type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileType {
    /// Regular file
    File,
    /// Directory
    Directory,
    /// Device, socket, fifo or anything else
    Other,
}

impl FileType {
    /// Check if this is a file.
    pub fn is_file(&self) -> bool {
        matches!(self, FileType::File)
    }

    /// Check if this is a directory.
    pub fn is_dir(&self) -> bool {
        matches!(self, FileType::Directory)
    }
}

/// Directory entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DirEntry {
    /// Entry name (not full path)
    pub name: String,
    /// Entry type
    pub file_type: FileType,
}
