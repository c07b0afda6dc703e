//! In-memory drop entries.
//!
//! Hosts that already hold the dropped bytes (or tests) build entry trees directly. Directories
//! hand out their children in fixed-size pages, and files or directories can be marked
//! unreadable to exercise failure paths.

use std::sync::Arc;

use futures::future::BoxFuture;

use super::leaf_name;
use crate::error::AppError;
use crate::models::entry::{DirectoryReader, DirectorySource, FileContents, FileSource, RawEntry};

const DEFAULT_BATCH_SIZE: usize = 100;

pub struct MemoryFile {
    full_path: String,
    content_type: String,
    contents: std::result::Result<Vec<u8>, String>,
}

impl FileSource for MemoryFile {
    fn name(&self) -> &str {
        leaf_name(&self.full_path)
    }

    fn full_path(&self) -> &str {
        &self.full_path
    }

    fn read(&self) -> BoxFuture<'_, crate::error::Result<FileContents>> {
        Box::pin(async move {
            match &self.contents {
                Ok(bytes) => Ok(FileContents {
                    bytes: bytes.clone(),
                    size: bytes.len() as u64,
                    content_type: self.content_type.clone(),
                    original_name: self.name().to_string(),
                }),
                Err(msg) => Err(AppError::FileAccess(format!("{}: {}", self.full_path, msg))),
            }
        })
    }
}

pub struct MemoryDirectory {
    full_path: String,
    children: Vec<RawEntry>,
    batch_size: usize,
    /// Enumeration fails on this call index (0-based) when set.
    fail_on_call: Option<usize>,
}

impl MemoryDirectory {
    pub fn new(full_path: &str, children: Vec<RawEntry>) -> Self {
        Self {
            full_path: full_path.to_string(),
            children,
            batch_size: DEFAULT_BATCH_SIZE,
            fail_on_call: None,
        }
    }

    pub fn with_batch_size(mut self, batch_size: usize) -> Self {
        self.batch_size = batch_size.max(1);
        self
    }

    /// Make the `call`-th enumeration request (0-based) fail.
    pub fn failing_on_call(mut self, call: usize) -> Self {
        self.fail_on_call = Some(call);
        self
    }

    pub fn into_entry(self) -> RawEntry {
        RawEntry::Directory(Arc::new(self))
    }
}

impl DirectorySource for MemoryDirectory {
    fn name(&self) -> &str {
        leaf_name(&self.full_path)
    }

    fn full_path(&self) -> &str {
        &self.full_path
    }

    fn create_reader(&self) -> Box<dyn DirectoryReader> {
        Box::new(MemoryDirectoryReader {
            full_path: self.full_path.clone(),
            pending: self.children.clone(),
            batch_size: self.batch_size,
            fail_on_call: self.fail_on_call,
            calls: 0,
        })
    }
}

struct MemoryDirectoryReader {
    full_path: String,
    pending: Vec<RawEntry>,
    batch_size: usize,
    fail_on_call: Option<usize>,
    calls: usize,
}

impl DirectoryReader for MemoryDirectoryReader {
    fn read_entries(&mut self) -> BoxFuture<'_, crate::error::Result<Vec<RawEntry>>> {
        Box::pin(async move {
            let call = self.calls;
            self.calls += 1;
            if self.fail_on_call == Some(call) {
                return Err(AppError::DirectoryRead(format!(
                    "{}: enumeration failed",
                    self.full_path
                )));
            }
            let take = self.batch_size.min(self.pending.len());
            Ok(self.pending.drain(..take).collect())
        })
    }
}

/// A readable file with an `application/octet-stream` content type.
pub fn file(full_path: &str, bytes: impl Into<Vec<u8>>) -> RawEntry {
    typed_file(full_path, "application/octet-stream", bytes)
}

pub fn typed_file(full_path: &str, content_type: &str, bytes: impl Into<Vec<u8>>) -> RawEntry {
    RawEntry::File(Arc::new(MemoryFile {
        full_path: full_path.to_string(),
        content_type: content_type.to_string(),
        contents: Ok(bytes.into()),
    }))
}

/// A file whose content accessor always fails.
pub fn unreadable_file(full_path: &str, message: &str) -> RawEntry {
    RawEntry::File(Arc::new(MemoryFile {
        full_path: full_path.to_string(),
        content_type: String::new(),
        contents: Err(message.to_string()),
    }))
}

pub fn directory(full_path: &str, children: Vec<RawEntry>) -> RawEntry {
    MemoryDirectory::new(full_path, children).into_entry()
}
