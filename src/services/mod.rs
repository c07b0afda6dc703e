//! Business logic layer.
//!
//! The drop pipeline lives here: directory resolution, per-entry routing, prefix
//! normalization, and the orchestrator that sequences them. Called by the `commands` layer;
//! reaches remote storage and the metadata store only through the `api` traits.

pub mod handles;
pub mod normalizer;
pub mod orchestrator;
pub mod resolver;
pub mod router;

#[cfg(test)]
pub(crate) mod fakes;
