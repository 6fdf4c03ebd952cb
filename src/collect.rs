use std::path::PathBuf;

use crate::classify::OsFilesystem;
use crate::engine::{ErrorPolicy, TraversalEngine, WalkConfig};
use crate::error::DirlocError;
use crate::results::Collection;
use crate::traits::Filesystem;

/// Walk `seeds` on the real filesystem and materialize every record.
pub fn collect<I, P>(seeds: I, recursive: bool) -> Result<Collection, DirlocError>
where
    I: IntoIterator<Item = P>,
    P: Into<PathBuf>,
{
    collect_with(OsFilesystem, seeds, recursive)
}

/// Eager traversal: drive a fail-fast engine to the end.
///
/// The first failure of any kind aborts the walk; the partial record list
/// is dropped with it.
pub fn collect_with<F, I, P>(fs: F, seeds: I, recursive: bool) -> Result<Collection, DirlocError>
where
    F: Filesystem,
    I: IntoIterator<Item = P>,
    P: Into<PathBuf>,
{
    let config = WalkConfig {
        recursive,
        policy: ErrorPolicy::FailFast,
    };
    let mut engine = TraversalEngine::new(fs, seeds, config)?;

    let mut records = Vec::new();
    while let Some(record) = engine.advance()? {
        records.try_reserve(1)?;
        records.push(record);
    }

    Ok(Collection {
        records,
        stats: engine.stats(),
    })
}
