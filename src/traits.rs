use std::ffi::OsString;
use std::path::Path;

use crate::error::DirlocError;
use crate::record::{Classified, PathRecord};

/// The filesystem queries the traversal engine performs.
///
/// [`OsFilesystem`](crate::OsFilesystem) is the real implementation. Tests
/// and embedders can supply their own, e.g. an in-memory tree with a fixed
/// listing order.
///
/// # Example
///
/// ```rust
/// use std::ffi::OsString;
/// use std::path::Path;
/// use dirloc::{Classified, DirlocError, Filesystem, PathKind};
///
/// /// Every path is an empty regular file.
/// struct Flat;
///
/// impl Filesystem for Flat {
///     fn classify(&self, _path: &Path) -> Result<Classified, DirlocError> {
///         Ok(Classified { kind: PathKind::RegularFile, size: 0 })
///     }
///     fn list(&self, _dir: &Path) -> Result<Vec<OsString>, DirlocError> {
///         Ok(Vec::new())
///     }
///     fn count_lines(&self, _path: &Path, _size: u64) -> Result<u64, DirlocError> {
///         Ok(0)
///     }
/// }
/// ```
pub trait Filesystem {
    /// Classify `path` without dereferencing symlinks.
    ///
    /// Fails with [`DirlocError::Stat`] when the metadata query fails.
    fn classify(&self, path: &Path) -> Result<Classified, DirlocError>;

    /// Names of the immediate children of `dir`, in listing order. Any `.`
    /// and `..` pseudo-entries are skipped by the caller.
    ///
    /// Fails with [`DirlocError::DirectoryOpen`] or
    /// [`DirlocError::DirectoryRead`].
    fn list(&self, dir: &Path) -> Result<Vec<OsString>, DirlocError>;

    /// Count `\n` bytes in the regular file at `path`, whose size is
    /// already known to be `size`.
    fn count_lines(&self, path: &Path, size: u64) -> Result<u64, DirlocError>;
}

impl<F: Filesystem + ?Sized> Filesystem for &F {
    fn classify(&self, path: &Path) -> Result<Classified, DirlocError> {
        (**self).classify(path)
    }

    fn list(&self, dir: &Path) -> Result<Vec<OsString>, DirlocError> {
        (**self).list(dir)
    }

    fn count_lines(&self, path: &Path, size: u64) -> Result<u64, DirlocError> {
        (**self).count_lines(path, size)
    }
}

/// Receives records drained from a traversal, one at a time.
///
/// Implemented by [`TemplateWriter`](crate::format::TemplateWriter) for
/// printing and by `Vec<PathRecord>` for collecting.
pub trait RecordSink {
    fn accept(&mut self, record: &PathRecord) -> std::io::Result<()>;
}

impl RecordSink for Vec<PathRecord> {
    fn accept(&mut self, record: &PathRecord) -> std::io::Result<()> {
        self.push(record.clone());
        Ok(())
    }
}
