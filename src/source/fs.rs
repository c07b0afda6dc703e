//! Filesystem-backed drop entries.
//!
//! Dropped paths become `RawEntry` values whose directories are enumerated lazily, one page of
//! children per `read_entries` call. Hidden files and known system files are filtered out of
//! directory listings; user-provided top-level paths are never filtered.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use futures::future::BoxFuture;

use super::leaf_name;
use crate::error::AppError;
use crate::models::entry::{DirectoryReader, DirectorySource, FileContents, FileSource, RawEntry};
use crate::models::settings::IngestSettings;

/// System file names that should be filtered out regardless of location.
const SYSTEM_FILES: &[&str] = &[".DS_Store", "Thumbs.db", "desktop.ini"];

/// Directory names that should be skipped during enumeration.
const SYSTEM_DIRS: &[&str] = &["__MACOSX"];

const DEFAULT_CONTENT_TYPE: &str = "application/octet-stream";

/// Returns true if the given file/directory name should be excluded.
fn is_hidden_or_system(name: &str) -> bool {
    name.starts_with('.') || SYSTEM_FILES.contains(&name) || SYSTEM_DIRS.contains(&name)
}

#[derive(Debug, Clone, Copy)]
pub struct FsOptions {
    pub batch_size: usize,
    pub skip_hidden: bool,
}

impl From<&IngestSettings> for FsOptions {
    fn from(settings: &IngestSettings) -> Self {
        Self {
            batch_size: settings.directory_batch_size.max(1),
            skip_hidden: settings.skip_hidden,
        }
    }
}

pub struct FsFile {
    name: String,
    full_path: String,
    location: PathBuf,
}

impl FileSource for FsFile {
    fn name(&self) -> &str {
        &self.name
    }

    fn full_path(&self) -> &str {
        &self.full_path
    }

    fn read(&self) -> BoxFuture<'_, crate::error::Result<FileContents>> {
        Box::pin(async move {
            let bytes = tokio::fs::read(&self.location).await.map_err(|e| {
                AppError::FileAccess(format!("{}: {}", self.location.display(), e))
            })?;
            let content_type = infer::get(&bytes)
                .map(|kind| kind.mime_type())
                .unwrap_or(DEFAULT_CONTENT_TYPE)
                .to_string();
            Ok(FileContents {
                size: bytes.len() as u64,
                bytes,
                content_type,
                original_name: self.name.clone(),
            })
        })
    }
}

pub struct FsDirectory {
    name: String,
    full_path: String,
    location: PathBuf,
    options: FsOptions,
}

impl DirectorySource for FsDirectory {
    fn name(&self) -> &str {
        &self.name
    }

    fn full_path(&self) -> &str {
        &self.full_path
    }

    fn create_reader(&self) -> Box<dyn DirectoryReader> {
        Box::new(FsDirectoryReader {
            full_path: self.full_path.clone(),
            location: self.location.clone(),
            options: self.options,
            read_dir: None,
            exhausted: false,
        })
    }
}

struct FsDirectoryReader {
    full_path: String,
    location: PathBuf,
    options: FsOptions,
    read_dir: Option<tokio::fs::ReadDir>,
    exhausted: bool,
}

impl FsDirectoryReader {
    async fn next_batch(&mut self) -> crate::error::Result<Vec<RawEntry>> {
        if self.exhausted {
            return Ok(Vec::new());
        }
        let dir_error = |location: &Path, e: std::io::Error| {
            AppError::DirectoryRead(format!("{}: {}", location.display(), e))
        };

        if self.read_dir.is_none() {
            let rd = tokio::fs::read_dir(&self.location)
                .await
                .map_err(|e| dir_error(&self.location, e))?;
            self.read_dir = Some(rd);
        }
        let Some(read_dir) = self.read_dir.as_mut() else {
            return Ok(Vec::new());
        };

        // Filtered children do not count toward the page, so an empty page always means the
        // listing is exhausted.
        let mut batch = Vec::new();
        while batch.len() < self.options.batch_size {
            let Some(child) = read_dir
                .next_entry()
                .await
                .map_err(|e| dir_error(&self.location, e))?
            else {
                self.exhausted = true;
                break;
            };
            let name = match child.file_name().to_str() {
                Some(n) => n.to_string(),
                None => continue,
            };
            if self.options.skip_hidden && is_hidden_or_system(&name) {
                continue;
            }
            let child_path = child.path();
            // Follow symlinks so linked files and folders resolve like real ones.
            let metadata = match tokio::fs::metadata(&child_path).await {
                Ok(m) => m,
                Err(e) => {
                    // A dangling or looping link, or a child removed since listing, is not
                    // an enumeration failure.
                    let is_link = child
                        .file_type()
                        .await
                        .map(|t| t.is_symlink())
                        .unwrap_or(false);
                    if is_link || e.kind() == std::io::ErrorKind::NotFound {
                        log::warn!("Skipping unresolvable entry {}: {}", child_path.display(), e);
                        continue;
                    }
                    return Err(dir_error(&child_path, e));
                }
            };
            let full_path = format!("{}/{}", self.full_path, name);
            if metadata.is_file() {
                batch.push(file_entry(name, full_path, child_path));
            } else if metadata.is_dir() {
                batch.push(directory_entry(name, full_path, child_path, self.options));
            }
        }
        Ok(batch)
    }
}

impl DirectoryReader for FsDirectoryReader {
    fn read_entries(&mut self) -> BoxFuture<'_, crate::error::Result<Vec<RawEntry>>> {
        Box::pin(self.next_batch())
    }
}

fn file_entry(name: String, full_path: String, location: PathBuf) -> RawEntry {
    RawEntry::File(Arc::new(FsFile {
        name,
        full_path,
        location,
    }))
}

fn directory_entry(
    name: String,
    full_path: String,
    location: PathBuf,
    options: FsOptions,
) -> RawEntry {
    RawEntry::Directory(Arc::new(FsDirectory {
        name,
        full_path,
        location,
        options,
    }))
}

/// Turns dropped paths into raw entries rooted at the drop.
///
/// Each dropped path becomes a top-level entry named after its last component, with a full
/// path of `/<name>`. Returns a `DirectoryRead` error if any path does not exist.
pub async fn entries_from_paths(
    paths: &[String],
    options: FsOptions,
) -> crate::error::Result<Vec<RawEntry>> {
    let mut entries = Vec::with_capacity(paths.len());
    for path_str in paths {
        let path = Path::new(path_str);
        let metadata = match tokio::fs::metadata(path).await {
            Ok(m) => m,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return Err(AppError::DirectoryRead(format!(
                    "Path does not exist: {}",
                    path_str
                )));
            }
            Err(e) => return Err(AppError::DirectoryRead(format!("{}: {}", path_str, e))),
        };
        let name = match path.file_name().and_then(|n| n.to_str()) {
            Some(n) => n.to_string(),
            None => leaf_name(path_str).to_string(),
        };
        let full_path = format!("/{}", name);
        if metadata.is_file() {
            entries.push(file_entry(name, full_path, path.to_path_buf()));
        } else if metadata.is_dir() {
            entries.push(directory_entry(
                name,
                full_path,
                path.to_path_buf(),
                options,
            ));
        }
    }
    Ok(entries)
}
