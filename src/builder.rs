use std::path::PathBuf;

use crate::classify::OsFilesystem;
use crate::collect::collect_with;
use crate::error::DirlocError;
use crate::iter::Files;
use crate::results::Collection;
use crate::sort::SortSpec;
use crate::traits::Filesystem;

// ---------------------------------------------------------------------------
// ScanBuilder
// ---------------------------------------------------------------------------

/// Entry point for configuring a traversal.
///
/// Created via [`dirloc::scan()`](crate::scan). Add seed paths, pick
/// recursion, then either stream with [`files()`](ScanBuilder::files) or
/// materialize with [`collect()`](ScanBuilder::collect).
///
/// # Example
///
/// ```rust,no_run
/// use dirloc::{SortKey, SortSpec};
///
/// let collection = dirloc::scan()
///     .path("src")
///     .recursive(true)
///     .sorted(SortSpec::descending(SortKey::Lines))
///     .collect()?;
///
/// for record in &collection.records {
///     println!("{} {}", record.path.display(), record.line_count);
/// }
/// # Ok::<(), dirloc::DirlocError>(())
/// ```
pub struct ScanBuilder<F: Filesystem = OsFilesystem> {
    fs:        F,
    seeds:     Vec<PathBuf>,
    recursive: bool,
    sort:      Option<SortSpec>,
}

impl Default for ScanBuilder<OsFilesystem> {
    fn default() -> Self {
        Self {
            fs:        OsFilesystem,
            seeds:     Vec::new(),
            recursive: false,
            sort:      None,
        }
    }
}

impl<F: Filesystem> ScanBuilder<F> {
    // ── Seeds ─────────────────────────────────────────────────────────────

    /// Add one seed path. Seeds are visited in reverse order of addition.
    pub fn path(mut self, p: impl Into<PathBuf>) -> Self {
        self.seeds.push(p.into());
        self
    }

    /// Add several seed paths.
    pub fn paths<I, P>(mut self, ps: I) -> Self
    where
        I: IntoIterator<Item = P>,
        P: Into<PathBuf>,
    {
        self.seeds.extend(ps.into_iter().map(Into::into));
        self
    }

    // ── Options ───────────────────────────────────────────────────────────

    /// Descend into nested directories. Off by default: directory seeds
    /// are then listed one level deep and nested directories are skipped.
    pub fn recursive(mut self, yes: bool) -> Self {
        self.recursive = yes;
        self
    }

    /// Sort the collected records. Only applies to [`collect()`](Self::collect).
    pub fn sorted(mut self, spec: SortSpec) -> Self {
        self.sort = Some(spec);
        self
    }

    /// Swap the filesystem implementation.
    pub fn filesystem<G: Filesystem>(self, fs: G) -> ScanBuilder<G> {
        ScanBuilder {
            fs,
            seeds:     self.seeds,
            recursive: self.recursive,
            sort:      self.sort,
        }
    }

    // ── Execute ───────────────────────────────────────────────────────────

    /// Stream records lazily. A failure mid-walk ends the stream; see
    /// [`Files::terminal_error`].
    pub fn files(self) -> Files<F> {
        Files::with_filesystem(self.fs, self.seeds, self.recursive)
    }

    /// Walk everything, then sort if requested.
    ///
    /// # Errors
    ///
    /// The first stat, listing, open or mapping failure aborts the walk.
    pub fn collect(self) -> Result<Collection, DirlocError> {
        let mut collection = collect_with(self.fs, self.seeds, self.recursive)?;
        if let Some(spec) = self.sort {
            collection.sort(spec);
        }
        Ok(collection)
    }
}
