//! Ordering of eagerly collected records.

use std::cmp::Ordering;

use crate::record::PathRecord;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortKey {
    /// Byte-wise comparison of the path.
    Path,
    /// Line count.
    Lines,
    /// Byte size.
    Bytes,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortOrder {
    #[default]
    Ascending,
    Descending,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SortSpec {
    pub key: SortKey,
    pub order: SortOrder,
}

impl SortSpec {
    pub fn new(key: SortKey, order: SortOrder) -> Self {
        Self { key, order }
    }

    pub fn ascending(key: SortKey) -> Self {
        Self::new(key, SortOrder::Ascending)
    }

    pub fn descending(key: SortKey) -> Self {
        Self::new(key, SortOrder::Descending)
    }

    /// Comparator for this key and direction.
    pub fn compare(&self, a: &PathRecord, b: &PathRecord) -> Ordering {
        let ord = match self.key {
            SortKey::Path => a
                .path
                .as_os_str()
                .as_encoded_bytes()
                .cmp(b.path.as_os_str().as_encoded_bytes()),
            SortKey::Lines => a.line_count.cmp(&b.line_count),
            SortKey::Bytes => a.byte_size.cmp(&b.byte_size),
        };
        match self.order {
            SortOrder::Ascending => ord,
            SortOrder::Descending => ord.reverse(),
        }
    }
}

/// Stable sort of `records` by `spec`.
pub fn sort_records(records: &mut [PathRecord], spec: SortSpec) {
    records.sort_by(|a, b| spec.compare(a, b));
}
