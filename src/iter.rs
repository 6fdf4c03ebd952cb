use std::iter::FusedIterator;
use std::path::PathBuf;

use crate::classify::OsFilesystem;
use crate::engine::TraversalEngine;
use crate::error::DirlocError;
use crate::record::PathRecord;
use crate::results::ScanStats;
use crate::traits::Filesystem;

/// Lazy, pull-based traversal.
///
/// Each record is handed over by value; nothing is retained between calls.
/// A failure mid-walk ends the iteration like exhaustion does, but the
/// failure stays available through [`terminal_error`](Files::terminal_error)
/// and [`into_result`](Files::into_result).
///
/// Dropping a `Files` before exhaustion releases every queued path.
pub struct Files<F: Filesystem = OsFilesystem> {
    engine: TraversalEngine<F>,
}

impl Files<OsFilesystem> {
    pub fn new<I, P>(seeds: I, recursive: bool) -> Self
    where
        I: IntoIterator<Item = P>,
        P: Into<PathBuf>,
    {
        Self::with_filesystem(OsFilesystem, seeds, recursive)
    }
}

impl<F: Filesystem> Files<F> {
    pub fn with_filesystem<I, P>(fs: F, seeds: I, recursive: bool) -> Self
    where
        I: IntoIterator<Item = P>,
        P: Into<PathBuf>,
    {
        Self {
            engine: TraversalEngine::skip_and_stop(fs, seeds, recursive),
        }
    }

    /// The failure that ended iteration early, if any.
    pub fn terminal_error(&self) -> Option<&DirlocError> {
        self.engine.terminal_error()
    }

    /// Paths still waiting to be visited.
    pub fn pending(&self) -> usize {
        self.engine.pending()
    }

    pub fn stats(&self) -> ScanStats {
        self.engine.stats()
    }

    /// Stop early, releasing every queued path. Returns how many were
    /// released.
    pub fn close(mut self) -> usize {
        self.engine.release()
    }

    /// `Err` with the terminal failure if the walk ended because of one.
    pub fn into_result(mut self) -> Result<(), DirlocError> {
        match self.engine.take_terminal_error() {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }
}

impl<F: Filesystem> Iterator for Files<F> {
    type Item = PathRecord;

    fn next(&mut self) -> Option<PathRecord> {
        self.engine.advance().ok().flatten()
    }
}

impl<F: Filesystem> FusedIterator for Files<F> {}
