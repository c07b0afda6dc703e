//! Local JSON persistence.
//!
//! Upload metadata records and ingestion settings are kept in JSON files. Every write goes to
//! disk immediately so a crash never loses an acknowledged record.

pub mod metadata;
pub mod settings;
