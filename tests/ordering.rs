//! Traversal order and error policies over an in-memory filesystem with a
//! fixed listing order.

use std::cell::Cell;
use std::collections::HashMap;
use std::ffi::OsString;
use std::io;
use std::path::{Path, PathBuf};

use dirloc::engine::{ErrorPolicy, TraversalEngine, WalkConfig};
use dirloc::{
    collect_with, count_terminators, scan, Classified, DirlocError, Files, Filesystem, PathKind,
};

// ---------------------------------------------------------------------------
// MemFs
// ---------------------------------------------------------------------------

enum Node {
    Dir(Vec<&'static str>),
    File(&'static str),
    Other,
    /// A directory that cannot be opened.
    Locked,
}

#[derive(Default)]
struct MemFs {
    nodes: HashMap<PathBuf, Node>,
    classified: Cell<usize>,
    counted: Cell<usize>,
}

impl MemFs {
    fn with(mut self, path: &str, node: Node) -> Self {
        self.nodes.insert(PathBuf::from(path), node);
        self
    }
}

impl Filesystem for MemFs {
    fn classify(&self, path: &Path) -> Result<Classified, DirlocError> {
        self.classified.set(self.classified.get() + 1);
        let (kind, size) = match self.nodes.get(path) {
            Some(Node::Dir(_)) | Some(Node::Locked) => (PathKind::Directory, 0),
            Some(Node::File(content)) => (PathKind::RegularFile, content.len() as u64),
            Some(Node::Other) => (PathKind::Other, 0),
            None => {
                return Err(DirlocError::Stat {
                    path: path.to_path_buf(),
                    source: io::Error::from(io::ErrorKind::NotFound),
                })
            }
        };
        Ok(Classified { kind, size })
    }

    fn list(&self, dir: &Path) -> Result<Vec<OsString>, DirlocError> {
        match self.nodes.get(dir) {
            Some(Node::Dir(children)) => Ok(children.iter().map(OsString::from).collect()),
            _ => Err(DirlocError::DirectoryOpen {
                path: dir.to_path_buf(),
                source: io::Error::from(io::ErrorKind::PermissionDenied),
            }),
        }
    }

    fn count_lines(&self, path: &Path, _size: u64) -> Result<u64, DirlocError> {
        self.counted.set(self.counted.get() + 1);
        match self.nodes.get(path) {
            Some(Node::File(content)) => Ok(count_terminators(content.as_bytes())),
            _ => Err(DirlocError::FileOpen {
                path: path.to_path_buf(),
                source: io::Error::from(io::ErrorKind::NotFound),
            }),
        }
    }
}

/// ```
/// root/
///   a      "1\n"
///   b/
///     x    "1\n2\n"
///     y    ""
///   c      "1\n2\n3\n"
/// ```
fn tree() -> MemFs {
    MemFs::default()
        .with("root", Node::Dir(vec!["a", "b", "c"]))
        .with("root/a", Node::File("1\n"))
        .with("root/b", Node::Dir(vec!["x", "y"]))
        .with("root/b/x", Node::File("1\n2\n"))
        .with("root/b/y", Node::File(""))
        .with("root/c", Node::File("1\n2\n3\n"))
}

fn paths(fs: &MemFs, seeds: &[&str], recursive: bool) -> Vec<String> {
    Files::with_filesystem(fs, seeds.iter().copied(), recursive)
        .map(|r| r.path.to_string_lossy().into_owned())
        .collect()
}

// ---------------------------------------------------------------------------
// Order
// ---------------------------------------------------------------------------

#[test]
fn children_are_visited_in_reverse_listing_order() {
    let fs = MemFs::default()
        .with("d", Node::Dir(vec!["a", "b", "c"]))
        .with("d/a", Node::File(""))
        .with("d/b", Node::File(""))
        .with("d/c", Node::File(""));
    assert_eq!(paths(&fs, &["d"], true), ["d/c", "d/b", "d/a"]);
}

#[test]
fn nested_directories_are_visited_depth_first() {
    let fs = tree();
    assert_eq!(
        paths(&fs, &["root"], true),
        ["root/c", "root/b/y", "root/b/x", "root/a"]
    );
}

#[test]
fn later_seeds_are_visited_first() {
    let fs = tree();
    assert_eq!(
        paths(&fs, &["root/a", "root/c"], false),
        ["root/c", "root/a"]
    );
}

#[test]
fn non_recursive_skips_nested_directories() {
    let fs = tree();
    assert_eq!(paths(&fs, &["root"], false), ["root/c", "root/a"]);
}

#[test]
fn trailing_separator_seed_joins_once() {
    let fs = MemFs::default()
        .with("d/", Node::Dir(vec!["f"]))
        .with("d/f", Node::File(""));
    assert_eq!(paths(&fs, &["d/"], false), ["d/f"]);
}

#[test]
fn pseudo_entries_from_a_listing_are_skipped() {
    let fs = MemFs::default()
        .with("d", Node::Dir(vec![".", "f", ".."]))
        .with("d/f", Node::File("1\n"));
    assert_eq!(paths(&fs, &["d"], true), ["d/f"]);
}

// ---------------------------------------------------------------------------
// Records
// ---------------------------------------------------------------------------

#[test]
fn other_entries_get_zero_size_and_lines() {
    let fs = MemFs::default()
        .with("d", Node::Dir(vec!["sock"]))
        .with("d/sock", Node::Other);
    let records: Vec<_> = Files::with_filesystem(&fs, ["d"], false).collect();
    assert_eq!(records.len(), 1);
    assert_eq!((records[0].byte_size, records[0].line_count), (0, 0));
    assert_eq!(fs.counted.get(), 0);
}

#[test]
fn empty_files_are_not_counted() {
    let fs = tree();
    let records = collect_with(&fs, ["root"], true).unwrap().into_records();
    assert_eq!(records.len(), 4);
    // root/b/y is empty, so only three files reach count_lines.
    assert_eq!(fs.counted.get(), 3);
}

#[test]
fn line_counts_flow_into_records() {
    let fs = tree();
    let records = collect_with(&fs, ["root"], true).unwrap().into_records();
    let lines: Vec<u64> = records.iter().map(|r| r.line_count).collect();
    assert_eq!(lines, [3, 0, 2, 1]);
}

// ---------------------------------------------------------------------------
// Abandonment
// ---------------------------------------------------------------------------

#[test]
fn dropping_a_half_consumed_iterator_stops_all_work() {
    let fs = tree();
    let mut files = Files::with_filesystem(&fs, ["root"], true);
    assert_eq!(files.next().map(|r| r.path), Some(PathBuf::from("root/c")));
    assert_eq!(files.pending(), 2);
    let classified = fs.classified.get();
    drop(files);

    // Nothing queued survives the drop, and a new walk starts from scratch.
    assert_eq!(fs.classified.get(), classified);
    assert_eq!(
        paths(&fs, &["root"], true),
        ["root/c", "root/b/y", "root/b/x", "root/a"]
    );
}

// ---------------------------------------------------------------------------
// Error policies
// ---------------------------------------------------------------------------

fn tree_with_locked_dir() -> MemFs {
    // Visit order: c, locked (fails), b, a.
    MemFs::default()
        .with("r", Node::Dir(vec!["a", "b", "locked", "c"]))
        .with("r/a", Node::File("1\n"))
        .with("r/b", Node::File("1\n"))
        .with("r/c", Node::File("1\n"))
        .with("r/locked", Node::Locked)
}

#[test]
fn fail_fast_aborts_the_whole_collection() {
    let fs = tree_with_locked_dir();
    let err = collect_with(&fs, ["r"], true).unwrap_err();
    assert!(matches!(err, DirlocError::DirectoryOpen { .. }));
    assert_eq!(err.path(), Some(Path::new("r/locked")));
}

#[test]
fn skip_and_stop_ends_the_stream_at_the_failure() {
    let fs = tree_with_locked_dir();
    let mut files = Files::with_filesystem(&fs, ["r"], true);
    let seen: Vec<_> = files.by_ref().map(|r| r.path).collect();
    assert_eq!(seen, [PathBuf::from("r/c")]);
    assert!(matches!(
        files.terminal_error(),
        Some(DirlocError::DirectoryOpen { .. })
    ));
    assert_eq!(files.pending(), 0);
}

#[test]
fn non_recursive_ignores_unlistable_nested_directories() {
    let fs = tree_with_locked_dir();
    let collection = collect_with(&fs, ["r"], false).unwrap();
    assert_eq!(collection.len(), 3);
}

#[test]
fn seeding_failure_under_fail_fast_fails_construction() {
    let fs = tree_with_locked_dir();
    let config = WalkConfig {
        recursive: false,
        policy: ErrorPolicy::FailFast,
    };
    let result = TraversalEngine::new(&fs, ["r/locked"], config);
    assert!(matches!(result, Err(DirlocError::DirectoryOpen { .. })));
}

#[test]
fn seeding_failure_under_skip_and_stop_yields_nothing() {
    let fs = tree_with_locked_dir();
    let mut files = Files::with_filesystem(&fs, ["r", "r/locked"], false);
    assert!(files.next().is_none());
    assert!(files.into_result().is_err());
}

#[test]
fn counting_failure_is_fatal_for_eager() {
    // Classified as a file by size, but count_lines cannot find content.
    struct Flaky;
    impl Filesystem for Flaky {
        fn classify(&self, _path: &Path) -> Result<Classified, DirlocError> {
            Ok(Classified {
                kind: PathKind::RegularFile,
                size: 10,
            })
        }
        fn list(&self, _dir: &Path) -> Result<Vec<OsString>, DirlocError> {
            Ok(Vec::new())
        }
        fn count_lines(&self, path: &Path, _size: u64) -> Result<u64, DirlocError> {
            Err(DirlocError::Map {
                path: path.to_path_buf(),
                source: io::Error::other("mmap failed"),
            })
        }
    }

    let err = scan().filesystem(Flaky).path("f").collect().unwrap_err();
    assert!(matches!(err, DirlocError::Map { .. }));
}
