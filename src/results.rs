use std::time::Duration;

use crate::record::PathRecord;
use crate::sort::{sort_records, SortSpec};

/// The output of an eager traversal: every record, in visit order until
/// sorted.
#[derive(Debug)]
pub struct Collection {
    /// Records in the order the engine produced them.
    pub records: Vec<PathRecord>,

    /// Scan statistics.
    pub stats: ScanStats,
}

impl Collection {
    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Reorder the records; the set of records is unchanged.
    pub fn sort(&mut self, spec: SortSpec) {
        sort_records(&mut self.records, spec);
    }

    pub fn into_records(self) -> Vec<PathRecord> {
        self.records
    }
}

/// Performance statistics for a traversal.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScanStats {
    /// Regular files counted.
    pub files: usize,

    /// Non-directory, non-regular entries (symlinks, devices, ...).
    pub others: usize,

    /// Directories expanded into their children.
    pub directories: usize,

    /// Wall-clock time from engine construction to exhaustion.
    pub duration: Duration,
}

impl ScanStats {
    pub(crate) fn compute(
        files: usize,
        others: usize,
        directories: usize,
        duration: Duration,
    ) -> Self {
        Self {
            files,
            others,
            directories,
            duration,
        }
    }

    /// Number of records produced.
    pub fn records(&self) -> usize {
        self.files + self.others
    }
}
