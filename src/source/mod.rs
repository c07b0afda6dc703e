//! Concrete drop sources.
//!
//! A native drop hands over absolute paths, which `fs` turns into lazily enumerated entries.
//! `memory` builds entry trees from owned bytes for embedding hosts and tests.

pub mod fs;
pub mod memory;

/// Last segment of a slash-delimited path.
pub(crate) fn leaf_name(full_path: &str) -> &str {
    full_path
        .trim_end_matches('/')
        .rsplit('/')
        .next()
        .unwrap_or(full_path)
}
