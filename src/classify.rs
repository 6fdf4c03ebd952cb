use std::ffi::OsString;
use std::fs;
use std::path::Path;

use log::trace;

use crate::counter;
use crate::error::DirlocError;
use crate::expand;
use crate::record::{Classified, PathKind};
use crate::traits::Filesystem;

/// The real filesystem: `lstat` for classification, `readdir` for listing,
/// a read-only memory map for line counting.
#[derive(Debug, Clone, Copy, Default)]
pub struct OsFilesystem;

impl Filesystem for OsFilesystem {
    fn classify(&self, path: &Path) -> Result<Classified, DirlocError> {
        classify(path)
    }

    fn list(&self, dir: &Path) -> Result<Vec<OsString>, DirlocError> {
        expand::list_dir(dir)
    }

    fn count_lines(&self, path: &Path, size: u64) -> Result<u64, DirlocError> {
        counter::count_file_lines(path, size)
    }
}

/// Classify `path` from its own metadata; a symlink is [`PathKind::Other`]
/// whatever it points to.
pub fn classify(path: &Path) -> Result<Classified, DirlocError> {
    let meta = fs::symlink_metadata(path).map_err(|source| DirlocError::Stat {
        path: path.to_path_buf(),
        source,
    })?;

    let ft = meta.file_type();
    let kind = if ft.is_dir() {
        PathKind::Directory
    } else if ft.is_file() {
        PathKind::RegularFile
    } else {
        PathKind::Other
    };

    trace!("classified {} as {:?}", path.display(), kind);
    Ok(Classified {
        kind,
        size: meta.len(),
    })
}
