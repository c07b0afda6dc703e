//! Entry models for the drop pipeline: raw drop items, resolved leaves, and routing results.

use std::fmt;
use std::sync::Arc;

use futures::future::BoxFuture;

use crate::models::session::Identity;

/// Bytes and file attributes produced by a leaf's content accessor.
#[derive(Debug, Clone)]
pub struct FileContents {
    pub bytes: Vec<u8>,
    pub size: u64,
    pub content_type: String,
    /// Leaf name as reported by the source (last path segment).
    pub original_name: String,
}

/// A dropped leaf file.
pub trait FileSource: Send + Sync {
    fn name(&self) -> &str;

    /// Slash-delimited path relative to the drop root. May carry a leading `/`.
    fn full_path(&self) -> &str;

    fn read(&self) -> BoxFuture<'_, crate::error::Result<FileContents>>;
}

/// Paginated child enumeration for one directory.
///
/// Each call returns the next batch of children; an empty batch signals exhaustion.
/// A new batch must not be requested before the previous call resolved, which `&mut self`
/// enforces.
pub trait DirectoryReader: Send {
    fn read_entries(&mut self) -> BoxFuture<'_, crate::error::Result<Vec<RawEntry>>>;
}

/// A dropped directory.
pub trait DirectorySource: Send + Sync {
    fn name(&self) -> &str;

    fn full_path(&self) -> &str;

    fn create_reader(&self) -> Box<dyn DirectoryReader>;
}

/// An item from a drop event.
#[derive(Clone)]
pub enum RawEntry {
    File(Arc<dyn FileSource>),
    Directory(Arc<dyn DirectorySource>),
}

impl RawEntry {
    pub fn name(&self) -> &str {
        match self {
            RawEntry::File(f) => f.name(),
            RawEntry::Directory(d) => d.name(),
        }
    }

    pub fn is_directory(&self) -> bool {
        matches!(self, RawEntry::Directory(_))
    }
}

impl fmt::Debug for RawEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RawEntry::File(file) => f.debug_tuple("File").field(&file.full_path()).finish(),
            RawEntry::Directory(dir) => f.debug_tuple("Directory").field(&dir.full_path()).finish(),
        }
    }
}

/// A leaf file after directory resolution. Never a directory by construction.
#[derive(Clone)]
pub struct ResolvedFileEntry {
    /// Drop-root relative path without a leading `/`, e.g. `d/sub/b.txt`.
    pub path: String,
    pub source: Arc<dyn FileSource>,
}

impl ResolvedFileEntry {
    pub fn new(source: Arc<dyn FileSource>) -> Self {
        let path = source.full_path().trim_start_matches('/').to_string();
        Self { path, source }
    }

    pub fn name(&self) -> &str {
        self.source.name()
    }
}

impl fmt::Debug for ResolvedFileEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ResolvedFileEntry")
            .field("path", &self.path)
            .finish()
    }
}

/// Durable location of an uploaded file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RemoteReference {
    pub download_url: String,
    pub storage_path: String,
}

/// Ephemeral in-process reference to file bytes (`blob:<uuid>`).
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct LocalHandle(pub String);

impl LocalHandle {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for LocalHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureReason {
    FileAccess,
    Upload,
    Metadata,
}

impl fmt::Display for FailureReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            FailureReason::FileAccess => "File access error",
            FailureReason::Upload => "Upload error",
            FailureReason::Metadata => "Metadata write error",
        };
        f.write_str(s)
    }
}

/// Result of routing one resolved entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProcessedEntry {
    Remote {
        name: String,
        reference: RemoteReference,
    },
    Local {
        name: String,
        handle: LocalHandle,
    },
    Failed {
        name: String,
        reason: FailureReason,
        message: String,
    },
}

impl ProcessedEntry {
    pub fn name(&self) -> &str {
        match self {
            ProcessedEntry::Remote { name, .. }
            | ProcessedEntry::Local { name, .. }
            | ProcessedEntry::Failed { name, .. } => name,
        }
    }
}

/// A locally handled entry on its way to the prefix normalizer.
///
/// `name` is optional because a source may report an entry without one; a missing name halts
/// prefix stripping for the whole batch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NamedItem {
    pub name: Option<String>,
    pub handle: LocalHandle,
}

/// One element of the batch handed to the downstream consumer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeliveredFile {
    pub name: String,
    pub handle: LocalHandle,
}

/// Bookkeeping for a successful upload, kept by the orchestrator for reporting.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RemoteHandled {
    pub name: String,
    pub reference: RemoteReference,
}

/// Bookkeeping for a failed entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FailedEntry {
    pub name: String,
    pub reason: FailureReason,
    pub message: String,
}

/// Summary of one processed drop.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DropOutcome {
    pub reset_scene: bool,
    pub remote: Vec<RemoteHandled>,
    pub delivered: Vec<DeliveredFile>,
    pub failed: Vec<FailedEntry>,
}

/// Upload destination for one entry.
pub fn storage_path_for(upload_root: &str, identity: &Identity, relative_name: &str) -> String {
    format!("{}/{}/uploads/{}", upload_root, identity.uid, relative_name)
}
