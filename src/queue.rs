use std::path::PathBuf;

use crate::error::DirlocError;

/// LIFO stack of paths that have not been classified yet.
///
/// Backed by a `Vec`, pushing and popping at the tail. Because it is a
/// stack, the last child pushed for a directory is the first one visited.
/// No duplicate elimination and no cycle detection.
#[derive(Debug, Default)]
pub struct TraversalQueue {
    pending: Vec<PathBuf>,
}

impl TraversalQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Push a path. Fails only if the backing storage cannot grow.
    pub fn push(&mut self, path: PathBuf) -> Result<(), DirlocError> {
        self.pending.try_reserve(1)?;
        self.pending.push(path);
        Ok(())
    }

    /// Remove the most recently pushed path.
    pub fn pop(&mut self) -> Option<PathBuf> {
        self.pending.pop()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    pub fn len(&self) -> usize {
        self.pending.len()
    }

    /// Release every pending entry and return how many there were.
    pub fn release(&mut self) -> usize {
        let released = self.pending.len();
        self.pending.clear();
        self.pending.shrink_to_fit();
        released
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pops_in_reverse_push_order() {
        let mut q = TraversalQueue::new();
        for name in ["a", "b", "c"] {
            q.push(PathBuf::from(name)).unwrap();
        }
        let order: Vec<_> = std::iter::from_fn(|| q.pop()).collect();
        assert_eq!(
            order,
            vec![PathBuf::from("c"), PathBuf::from("b"), PathBuf::from("a")]
        );
        assert!(q.is_empty());
    }

    #[test]
    fn keeps_duplicates() {
        let mut q = TraversalQueue::new();
        q.push(PathBuf::from("same")).unwrap();
        q.push(PathBuf::from("same")).unwrap();
        assert_eq!(q.len(), 2);
    }

    #[test]
    fn release_empties_the_stack() {
        let mut q = TraversalQueue::new();
        q.push(PathBuf::from("x")).unwrap();
        q.push(PathBuf::from("y")).unwrap();
        assert_eq!(q.release(), 2);
        assert!(q.is_empty());
        assert_eq!(q.release(), 0);
    }
}
