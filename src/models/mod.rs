//! Data models for the drop ingestion pipeline.
//!
//! Raw drop entries and routing results live in `entry`; persisted shapes (metadata records,
//! settings) use camelCase JSON.

pub mod entry;
pub mod metadata;
pub mod session;
pub mod settings;
