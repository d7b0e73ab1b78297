//! Content loaders for reading battle data from files.
//!
//! Every loader parses RON and reports failures through [`anyhow`] with the
//! offending file or entry named in the message.

pub mod arena;
pub mod monsters;
pub mod spellbooks;

pub use arena::{ArenaLoader, ArenaSpec};
pub use monsters::{MonsterLoader, MonsterTemplate, builtin_catalog};
pub use spellbooks::{SpellbookLoader, Spellbooks};

use std::path::Path;

/// Common result type for loaders.
pub type LoadResult<T> = anyhow::Result<T>;

/// Helper function to read file contents.
pub(crate) fn read_file(path: &Path) -> LoadResult<String> {
    std::fs::read_to_string(path)
        .map_err(|e| anyhow::anyhow!("Failed to read file {}: {}", path.display(), e))
}
