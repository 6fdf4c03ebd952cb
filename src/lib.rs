//! # dirloc
//!
//! Per-file line counts and byte sizes for a set of paths, optionally
//! descending into directories.
//!
//! The core is a stack-driven walker ([`engine::TraversalEngine`]) that
//! classifies each path without following symlinks, expands directories
//! into their children and counts `\n` bytes in regular files. It is
//! drained two ways:
//!
//! - [`Files`]: lazy iterator, one record at a time; a failure mid-walk
//!   ends the stream.
//! - [`collect()`]: eager, every record in memory for sorting; the first
//!   failure aborts.
//!
//! # Quick Start
//!
//! ```rust
//! use std::fs;
//!
//! let dir = tempfile::tempdir().unwrap();
//! fs::write(dir.path().join("a.txt"), "one\ntwo\n").unwrap();
//! fs::write(dir.path().join("b.txt"), "").unwrap();
//!
//! let mut lines: Vec<u64> = dirloc::scan()
//!     .path(dir.path())
//!     .files()
//!     .map(|r| r.line_count)
//!     .collect();
//! lines.sort();
//!
//! assert_eq!(lines, vec![0, 2]);
//! ```
//!
//! # Custom Filesystems
//!
//! Implement [`Filesystem`] to walk something other than the OS
//! filesystem, e.g. an in-memory tree with a fixed listing order.

#![deny(unsafe_code)]

pub mod cancel;
pub mod cli;
pub mod engine;
pub mod format;
pub mod sort;

mod builder;
mod classify;
mod collect;
mod counter;
mod error;
mod expand;
mod iter;
mod queue;
mod record;
mod results;
mod traits;

// ── Public re-exports ─────────────────────────────────────────────────────────

pub use builder::ScanBuilder;
pub use cancel::{drain, CancellationToken};
pub use classify::{classify, OsFilesystem};
pub use collect::{collect, collect_with};
pub use counter::{count_file_lines, count_terminators};
pub use error::{DirlocError, FailureKind};
pub use expand::{expand, join_child};
pub use format::{shorten_path, Template, TemplateWriter};
pub use iter::Files;
pub use queue::TraversalQueue;
pub use record::{Classified, PathKind, PathRecord};
pub use results::{Collection, ScanStats};
pub use sort::{sort_records, SortKey, SortOrder, SortSpec};
pub use traits::{Filesystem, RecordSink};

// ── Entry point ───────────────────────────────────────────────────────────────

/// Create a new [`ScanBuilder`] over the real filesystem.
pub fn scan() -> ScanBuilder {
    ScanBuilder::default()
}
