use std::io;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use crate::record::PathRecord;
use crate::traits::RecordSink;

/// Cooperative "stop after the current record" flag.
///
/// Clones share the same flag, so one clone can live in a signal handler
/// while another is checked by the consumption loop.
#[derive(Debug, Clone, Default)]
pub struct CancellationToken {
    cancelled: Arc<AtomicBool>,
}

impl CancellationToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.cancelled.store(true, Ordering::SeqCst);
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::SeqCst)
    }
}

/// Feed `records` into `sink` until they run out or `token` is cancelled.
///
/// The token is checked before each record is pulled, so a cancelled
/// traversal does no further filesystem work. Returns how many records
/// were emitted.
pub fn drain<I, S>(records: I, sink: &mut S, token: &CancellationToken) -> io::Result<usize>
where
    I: IntoIterator<Item = PathRecord>,
    S: RecordSink + ?Sized,
{
    let mut records = records.into_iter();
    let mut emitted = 0;
    while !token.is_cancelled() {
        let Some(record) = records.next() else {
            break;
        };
        sink.accept(&record)?;
        emitted += 1;
    }
    Ok(emitted)
}
