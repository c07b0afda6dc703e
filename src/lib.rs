//! Drag-and-drop ingestion: resolves dropped files and folders into leaf files, uploads
//! cloud-eligible files for signed-in users, and hands the rest to a scene loader as local
//! handles with a shared folder prefix stripped.

pub mod api;
pub mod commands;
pub mod error;
pub mod models;
pub mod services;
pub mod source;
pub mod storage;

pub use error::{AppError, Result};
pub use models::entry::{DeliveredFile, DropOutcome, ProcessedEntry, RawEntry};
pub use services::orchestrator::{DropConsumer, DropEvent, IngestionOrchestrator, Modifiers};
pub use services::router::EntryRouter;
