//! Drop command for native drag-and-drop.
//!
//! A native drop delivers absolute paths plus the modifier state. Paths are wrapped as
//! filesystem entries and run through the orchestrator.

use crate::api::{MetadataStore, SessionProvider, UploadService};
use crate::models::entry::DropOutcome;
use crate::services::orchestrator::{DropConsumer, DropEvent, IngestionOrchestrator, Modifiers};
use crate::source::fs::{entries_from_paths, FsOptions};

/// Resolves, routes, and delivers the files behind dropped paths.
///
/// - Regular files are taken as dropped.
/// - Directories are enumerated recursively; hidden and system children are skipped when
///   `skip_hidden` is set.
/// - Returns an error if any path does not exist or a directory cannot be read.
pub async fn handle_dropped_paths<U, M, S, C>(
    paths: Vec<String>,
    modifiers: Modifiers,
    orchestrator: &IngestionOrchestrator<U, M, S, C>,
) -> Result<DropOutcome, String>
where
    U: UploadService,
    M: MetadataStore,
    S: SessionProvider,
    C: DropConsumer,
{
    let options = FsOptions::from(orchestrator.router().settings());
    let entries = entries_from_paths(&paths, options)
        .await
        .map_err(|e| e.to_string())?;
    orchestrator
        .handle_drop(DropEvent::new(entries, modifiers))
        .await
        .map_err(|e| e.to_string())
}
