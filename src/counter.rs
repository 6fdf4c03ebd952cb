use std::fs::File;
use std::path::Path;

use memmap2::Mmap;

use crate::error::DirlocError;

/// Count `\n` bytes in the regular file at `path`.
///
/// `size` comes from the earlier stat. A zero size short-circuits to 0 with
/// no further I/O; otherwise the file is opened and mapped read-only.
pub fn count_file_lines(path: &Path, size: u64) -> Result<u64, DirlocError> {
    if size == 0 {
        return Ok(0);
    }

    let file = File::open(path).map_err(|source| DirlocError::FileOpen {
        path: path.to_path_buf(),
        source,
    })?;

    let map = map_read_only(&file).map_err(|source| DirlocError::Map {
        path: path.to_path_buf(),
        source,
    })?;

    Ok(count_terminators(&map))
}

#[allow(unsafe_code)]
fn map_read_only(file: &File) -> std::io::Result<Mmap> {
    // SAFETY: the map is read-only and dropped before count_file_lines
    // returns. A concurrent truncation by another process can still fault;
    // that is the usual mmap caveat and accepted here.
    unsafe { Mmap::map(file) }
}

/// Number of line terminators in `content`; a final line without one is
/// not counted.
pub fn count_terminators(content: &[u8]) -> u64 {
    bytecount::count(content, b'\n') as u64
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn counts_terminators_not_lines() {
        assert_eq!(count_terminators(b"l1\nl2\nl3"), 2);
        assert_eq!(count_terminators(b"l1\nl2\nl3\n"), 3);
        assert_eq!(count_terminators(b""), 0);
        assert_eq!(count_terminators(b"\n\n"), 2);
    }

    #[test]
    fn counts_past_nul_bytes() {
        assert_eq!(count_terminators(b"a\0b\nc\0\n"), 2);
    }

    #[test]
    fn counts_a_mapped_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("f.txt");
        fs::write(&path, "one\ntwo\nthree").unwrap();
        assert_eq!(count_file_lines(&path, 13).unwrap(), 2);
    }

    #[test]
    fn zero_size_skips_io() {
        let dir = tempfile::tempdir().unwrap();
        // Never opened, so a missing file is fine.
        assert_eq!(count_file_lines(&dir.path().join("missing"), 0).unwrap(), 0);
    }

    #[test]
    fn unopenable_file_is_reported() {
        let dir = tempfile::tempdir().unwrap();
        let err = count_file_lines(&dir.path().join("missing"), 10).unwrap_err();
        assert!(matches!(err, DirlocError::FileOpen { .. }));
    }
}
