//! Directory resolver: flattens a dropped mix of files and directories into leaf files.
//!
//! Each directory is drained with a pull loop: request the next page of children, stop on the
//! first empty page. Pages of one directory are requested strictly one after another, while
//! sibling entries resolve concurrently. Every call returns its own owned list; nothing is
//! accumulated outside the call tree.

use std::sync::Arc;

use futures::future::{try_join_all, BoxFuture};
use futures::FutureExt;

use crate::models::entry::{DirectorySource, RawEntry, ResolvedFileEntry};

/// Resolve dropped entries into a flat list of leaf files.
///
/// Entries keep their drop position: a file stays where it was dropped and a directory's
/// leaves occupy one contiguous run in its place. Any enumeration failure anywhere in the tree
/// rejects the whole resolution; no partial list is returned.
pub fn resolve_entries(
    entries: Vec<RawEntry>,
) -> BoxFuture<'static, crate::error::Result<Vec<ResolvedFileEntry>>> {
    async move {
        let branches = try_join_all(entries.into_iter().map(resolve_entry)).await?;
        Ok(branches.into_iter().flatten().collect())
    }
    .boxed()
}

async fn resolve_entry(entry: RawEntry) -> crate::error::Result<Vec<ResolvedFileEntry>> {
    match entry {
        RawEntry::File(file) => Ok(vec![ResolvedFileEntry::new(file)]),
        RawEntry::Directory(dir) => expand_directory(dir).await,
    }
}

async fn expand_directory(
    dir: Arc<dyn DirectorySource>,
) -> crate::error::Result<Vec<ResolvedFileEntry>> {
    let mut reader = dir.create_reader();
    let mut children = Vec::new();
    loop {
        let batch = reader.read_entries().await?;
        if batch.is_empty() {
            break;
        }
        children.extend(batch);
    }
    log::debug!(
        "Expanded directory {} ({} children)",
        dir.full_path(),
        children.len()
    );
    resolve_entries(children).await
}
