use std::ffi::{OsStr, OsString};
use std::fs;
use std::path::{Path, PathBuf};

use log::debug;

use crate::error::DirlocError;
use crate::queue::TraversalQueue;
use crate::traits::Filesystem;

/// List the immediate children of `dir` in the order the OS returns them.
///
/// The directory handle is closed before this returns, on success or error.
pub(crate) fn list_dir(dir: &Path) -> Result<Vec<OsString>, DirlocError> {
    let entries = fs::read_dir(dir).map_err(|source| DirlocError::DirectoryOpen {
        path: dir.to_path_buf(),
        source,
    })?;

    let mut names = Vec::new();
    for entry in entries {
        let entry = entry.map_err(|source| DirlocError::DirectoryRead {
            path: dir.to_path_buf(),
            source,
        })?;
        names.try_reserve(1)?;
        names.push(entry.file_name());
    }
    Ok(names)
}

fn is_pseudo_entry(name: &OsStr) -> bool {
    name == "." || name == ".."
}

/// Build a child path: a separator is inserted only when `parent` does not
/// already end with one.
pub fn join_child(parent: &Path, name: &OsStr) -> PathBuf {
    let parent = parent.as_os_str();
    let has_trailing_separator = parent
        .as_encoded_bytes()
        .last()
        .is_some_and(|&b| std::path::is_separator(b as char));

    let mut joined = OsString::with_capacity(parent.len() + name.len() + 1);
    joined.push(parent);
    if !has_trailing_separator {
        joined.push(std::path::MAIN_SEPARATOR_STR);
    }
    joined.push(name);
    PathBuf::from(joined)
}

/// Replace `dir` with its immediate children on `queue`, pushed in listing
/// order and skipping `.` and `..`. Returns how many children were pushed.
///
/// Only one level: nested directories are pushed like any other entry and
/// expanded later only if the engine decides to.
pub fn expand<F: Filesystem>(
    fs: &F,
    queue: &mut TraversalQueue,
    dir: &Path,
) -> Result<usize, DirlocError> {
    let mut count = 0;
    for name in fs.list(dir)? {
        if is_pseudo_entry(&name) {
            continue;
        }
        queue.push(join_child(dir, &name))?;
        count += 1;
    }
    debug!("expanded {} ({} entries)", dir.display(), count);
    Ok(count)
}
