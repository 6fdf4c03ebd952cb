use std::path::PathBuf;

/// One visited non-directory path and what was measured for it.
///
/// Directories never become records; the engine consumes them by
/// expanding them into their children.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PathRecord {
    /// The path exactly as it was built during traversal (seed, or parent
    /// joined with an entry name).
    pub path: PathBuf,

    /// File size from metadata. Always 0 for [`PathKind::Other`].
    pub byte_size: u64,

    /// Number of `\n` bytes in the content. Not "lines" in the editor
    /// sense: `a\nb` counts 1. Always 0 for [`PathKind::Other`].
    pub line_count: u64,
}

impl PathRecord {
    pub(crate) fn file(path: PathBuf, byte_size: u64, line_count: u64) -> Self {
        Self {
            path,
            byte_size,
            line_count,
        }
    }

    /// Record for a symlink, device, socket, fifo and the like.
    pub(crate) fn other(path: PathBuf) -> Self {
        Self {
            path,
            byte_size: 0,
            line_count: 0,
        }
    }
}

/// Three-way classification of a path, decided without following symlinks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PathKind {
    /// A directory.
    Directory,

    /// A regular file.
    RegularFile,

    /// Anything else (symlinks, device files, pipes, sockets, etc.).
    Other,
}

/// The result of classifying a path: its kind plus the size reported by
/// metadata.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Classified {
    pub kind: PathKind,
    pub size: u64,
}
