//! Host-facing command handlers.
//!
//! This module is the entry point for the embedding application's drop and settings events.
//! Handlers perform parameter conversion and forward to the `services` layer; errors are
//! flattened to strings for the host. Commands should not contain business logic directly.

pub mod drop;
pub mod settings;
