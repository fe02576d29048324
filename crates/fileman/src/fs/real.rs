//! Host filesystem backend.
//!
//! [`RealFs`] performs every effect as an isolated task on tokio's blocking
//! pool. The caller keeps ownership of its argument state and only moves owned
//! copies into the task, so a panic or cancellation inside the effect cannot
//! leave caller-visible state half-updated. A task that ends without reporting
//! surfaces as [`Error::Abnormal`].
//!
//! | Operation | Guarantee |
//! |-----------|-----------|
//! | `create_file` | `O_CREAT \| O_EXCL` with mode 0644 |
//! | `append_entry` | exclusive `flock` around inspect-and-append, blocking |
//! | `create_dir` | mode 0755, no parents |
//! | `remove_empty_dir` | refuses any directory with entries |

use async_trait::async_trait;
use std::fs::{self, DirBuilder, File, OpenOptions};
use std::io::{ErrorKind, Read, Seek, SeekFrom, Write};
use std::path::{Path, PathBuf};

use super::traits::{DirEntry, FileSystem, FileType};
#[cfg(unix)]
use super::traits::{DIR_MODE, FILE_MODE};
use crate::error::{Entity, Error, Result};

/// Filesystem backed by the host OS.
#[derive(Debug, Clone, Copy, Default)]
pub struct RealFs;

impl RealFs {
    pub fn new() -> Self {
        Self
    }
}

/// Run a blocking effect in isolation and wait for its outcome.
pub(crate) async fn isolated<T, F>(target: &Path, effect: F) -> Result<T>
where
    F: FnOnce() -> Result<T> + Send + 'static,
    T: Send + 'static,
{
    match tokio::task::spawn_blocking(effect).await {
        Ok(result) => result,
        Err(_join_err) => {
            #[cfg(feature = "logging")]
            tracing::error!(
                target: "fileman::fs",
                path = %target.display(),
                panicked = _join_err.is_panic(),
                "isolated effect terminated abnormally"
            );
            Err(Error::Abnormal(target.display().to_string()))
        }
    }
}

fn label(path: &Path) -> String {
    path.display().to_string()
}

fn classify(meta: &fs::Metadata) -> FileType {
    if meta.is_file() {
        FileType::File
    } else if meta.is_dir() {
        FileType::Directory
    } else {
        FileType::Other
    }
}

fn create_file_blocking(path: &Path, contents: &[u8]) -> Result<()> {
    let mut options = OpenOptions::new();
    options.write(true).create_new(true);
    #[cfg(unix)]
    {
        use std::os::unix::fs::OpenOptionsExt;
        options.mode(FILE_MODE);
    }
    let mut file = options.open(path).map_err(|e| match e.kind() {
        ErrorKind::AlreadyExists => Error::already_exists(Entity::File, label(path)),
        _ => Error::io("create file", label(path), e),
    })?;
    file.write_all(contents)
        .map_err(|e| Error::io("write to file", label(path), e))
}

/// Decide the separator and write it together with `content`.
fn append_locked(file: &mut File, content: &[u8]) -> std::io::Result<()> {
    let len = file.metadata()?.len();
    let mut buf = Vec::with_capacity(content.len() + 1);
    if len > 0 {
        file.seek(SeekFrom::End(-1))?;
        let mut last = [0u8; 1];
        file.read_exact(&mut last)?;
        if last[0] != b'\n' {
            buf.push(b'\n');
        }
    }
    buf.extend_from_slice(content);
    // O_APPEND: the write lands at end of file regardless of the read cursor
    file.write_all(&buf)
}

fn append_entry_blocking(path: &Path, content: &[u8]) -> Result<()> {
    let mut file = OpenOptions::new()
        .read(true)
        .append(true)
        .open(path)
        .map_err(|e| match e.kind() {
            ErrorKind::NotFound => Error::not_found(Entity::File, label(path)),
            _ => Error::io("open file", label(path), e),
        })?;

    file.lock()
        .map_err(|e| Error::io("lock file", label(path), e))?;
    let written = append_locked(&mut file, content)
        .map_err(|e| Error::io("write to file", label(path), e));
    let unlocked = file
        .unlock()
        .map_err(|e| Error::io("unlock file", label(path), e));
    written?;
    unlocked
}

fn read_dir_blocking(path: &Path) -> Result<Vec<DirEntry>> {
    let entries = fs::read_dir(path).map_err(|e| Error::io("open directory", label(path), e))?;
    let mut out = Vec::new();
    for entry in entries {
        let entry = entry.map_err(|e| Error::io("read directory", label(path), e))?;
        // Follow symlinks like stat(2); entries that cannot be inspected are skipped.
        let Ok(meta) = fs::metadata(entry.path()) else {
            continue;
        };
        out.push(DirEntry {
            name: entry.file_name().to_string_lossy().into_owned(),
            file_type: classify(&meta),
        });
    }
    Ok(out)
}

fn remove_empty_dir_blocking(path: &Path) -> Result<()> {
    let mut entries =
        fs::read_dir(path).map_err(|e| Error::io("open directory", label(path), e))?;
    if entries.next().is_some() {
        return Err(Error::NotEmpty(label(path)));
    }
    fs::remove_dir(path).map_err(|e| match e.kind() {
        ErrorKind::DirectoryNotEmpty => Error::NotEmpty(label(path)),
        _ => Error::io("delete directory", label(path), e),
    })
}

#[async_trait]
impl FileSystem for RealFs {
    async fn file_type(&self, path: &Path) -> Option<FileType> {
        let owned = path.to_path_buf();
        isolated(path, move || Ok(fs::metadata(&owned).ok().map(|m| classify(&m))))
            .await
            .ok()
            .flatten()
    }

    async fn create_file(&self, path: &Path, contents: &[u8]) -> Result<()> {
        let owned = path.to_path_buf();
        let contents = contents.to_vec();
        isolated(path, move || create_file_blocking(&owned, &contents)).await
    }

    async fn read_file(&self, path: &Path) -> Result<Vec<u8>> {
        let owned: PathBuf = path.to_path_buf();
        isolated(path, move || {
            fs::read(&owned).map_err(|e| match e.kind() {
                ErrorKind::NotFound => Error::not_found(Entity::File, label(&owned)),
                _ => Error::io("read file", label(&owned), e),
            })
        })
        .await
    }

    async fn append_entry(&self, path: &Path, content: &[u8]) -> Result<()> {
        let owned = path.to_path_buf();
        let content = content.to_vec();
        isolated(path, move || append_entry_blocking(&owned, &content)).await
    }

    async fn remove_file(&self, path: &Path) -> Result<()> {
        let owned = path.to_path_buf();
        isolated(path, move || {
            fs::remove_file(&owned).map_err(|e| match e.kind() {
                ErrorKind::NotFound => Error::not_found(Entity::File, label(&owned)),
                _ => Error::io("delete file", label(&owned), e),
            })
        })
        .await
    }

    async fn create_dir(&self, path: &Path) -> Result<()> {
        let owned = path.to_path_buf();
        isolated(path, move || {
            let mut builder = DirBuilder::new();
            #[cfg(unix)]
            {
                use std::os::unix::fs::DirBuilderExt;
                builder.mode(DIR_MODE);
            }
            builder.create(&owned).map_err(|e| match e.kind() {
                ErrorKind::AlreadyExists => Error::already_exists(Entity::Directory, label(&owned)),
                _ => Error::io("create directory", label(&owned), e),
            })
        })
        .await
    }

    async fn read_dir(&self, path: &Path) -> Result<Vec<DirEntry>> {
        let owned = path.to_path_buf();
        isolated(path, move || read_dir_blocking(&owned)).await
    }

    async fn remove_empty_dir(&self, path: &Path) -> Result<()> {
        let owned = path.to_path_buf();
        isolated(path, move || remove_empty_dir_blocking(&owned)).await
    }
}
