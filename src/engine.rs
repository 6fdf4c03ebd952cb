use std::path::PathBuf;
use std::time::{Duration, Instant};

use log::debug;

use crate::classify::OsFilesystem;
use crate::error::DirlocError;
use crate::expand::expand;
use crate::queue::TraversalQueue;
use crate::record::{PathKind, PathRecord};
use crate::results::ScanStats;
use crate::traits::Filesystem;

// ---------------------------------------------------------------------------
// ErrorPolicy
// ---------------------------------------------------------------------------

/// What a failure mid-walk does to the traversal.
///
/// Either way the engine is finished afterwards and its queue released;
/// the policies differ only in what the caller sees.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorPolicy {
    /// Surface the first failure as `Err` from [`TraversalEngine::advance`].
    FailFast,

    /// Log the failure and report plain exhaustion. The failure is kept and
    /// can be inspected with [`TraversalEngine::terminal_error`].
    SkipAndStop,
}

// ---------------------------------------------------------------------------
// WalkConfig
// ---------------------------------------------------------------------------

/// Traversal parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WalkConfig {
    /// Descend into directories found during the walk. When off, directory
    /// seeds are expanded exactly one level at construction and every
    /// directory popped later is discarded.
    pub recursive: bool,
    pub policy: ErrorPolicy,
}

impl Default for WalkConfig {
    fn default() -> Self {
        Self {
            recursive: false,
            policy: ErrorPolicy::FailFast,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    Running,
    Finished,
}

#[derive(Debug, Default)]
struct Counters {
    files: usize,
    others: usize,
    directories: usize,
}

// ---------------------------------------------------------------------------
// TraversalEngine
// ---------------------------------------------------------------------------

/// Work-stack driven walker producing one [`PathRecord`] per `advance()`.
///
/// Both the lazy [`Files`](crate::Files) iterator and the eager
/// [`collect`](crate::collect()) drain are built on this type; they
/// differ only in [`ErrorPolicy`].
///
/// Once `advance()` has returned `Ok(None)` or `Err`, every later call
/// returns `Ok(None)`.
pub struct TraversalEngine<F: Filesystem = OsFilesystem> {
    fs: F,
    queue: TraversalQueue,
    config: WalkConfig,
    state: State,
    counters: Counters,
    terminal_error: Option<DirlocError>,
    started: Instant,
    elapsed: Option<Duration>,
}

impl TraversalEngine<OsFilesystem> {
    /// Engine over the real filesystem.
    pub fn from_seeds<I, P>(seeds: I, config: WalkConfig) -> Result<Self, DirlocError>
    where
        I: IntoIterator<Item = P>,
        P: Into<PathBuf>,
    {
        Self::new(OsFilesystem, seeds, config)
    }
}

impl<F: Filesystem> TraversalEngine<F> {
    /// Build an engine and seed its stack.
    ///
    /// Recursive walks push every seed as-is. Non-recursive walks classify
    /// each seed and replace a directory seed with one level of its
    /// children.
    ///
    /// # Errors
    ///
    /// Under [`ErrorPolicy::FailFast`], a seed that cannot be classified or
    /// expanded fails construction. Under [`ErrorPolicy::SkipAndStop`] the
    /// engine is returned already finished instead.
    pub fn new<I, P>(fs: F, seeds: I, config: WalkConfig) -> Result<Self, DirlocError>
    where
        I: IntoIterator<Item = P>,
        P: Into<PathBuf>,
    {
        let mut engine = Self::unseeded(fs, config);
        if let Err(err) = engine.seed(seeds) {
            engine.fail(err)?;
        }
        Ok(engine)
    }

    /// Skip-and-stop engine; seeding failures leave it finished.
    pub(crate) fn skip_and_stop<I, P>(fs: F, seeds: I, recursive: bool) -> Self
    where
        I: IntoIterator<Item = P>,
        P: Into<PathBuf>,
    {
        let config = WalkConfig {
            recursive,
            policy: ErrorPolicy::SkipAndStop,
        };
        let mut engine = Self::unseeded(fs, config);
        if let Err(err) = engine.seed(seeds) {
            engine.stop(err);
        }
        engine
    }

    fn unseeded(fs: F, config: WalkConfig) -> Self {
        Self {
            fs,
            queue: TraversalQueue::new(),
            config,
            state: State::Running,
            counters: Counters::default(),
            terminal_error: None,
            started: Instant::now(),
            elapsed: None,
        }
    }

    fn seed<I, P>(&mut self, seeds: I) -> Result<(), DirlocError>
    where
        I: IntoIterator<Item = P>,
        P: Into<PathBuf>,
    {
        for seed in seeds {
            let path = seed.into();
            if self.config.recursive {
                self.queue.push(path)?;
                continue;
            }

            if self.fs.classify(&path)?.kind == PathKind::Directory {
                expand(&self.fs, &mut self.queue, &path)?;
                self.counters.directories += 1;
            } else {
                self.queue.push(path)?;
            }
        }
        Ok(())
    }

    /// Produce the next record, `Ok(None)` when the walk is over.
    pub fn advance(&mut self) -> Result<Option<PathRecord>, DirlocError> {
        if self.state == State::Finished {
            return Ok(None);
        }

        match self.step() {
            Ok(Some(record)) => Ok(Some(record)),
            Ok(None) => {
                self.finish();
                Ok(None)
            }
            Err(err) => self.fail(err),
        }
    }

    fn step(&mut self) -> Result<Option<PathRecord>, DirlocError> {
        while let Some(path) = self.queue.pop() {
            let classified = self.fs.classify(&path)?;
            match classified.kind {
                PathKind::Directory if self.config.recursive => {
                    expand(&self.fs, &mut self.queue, &path)?;
                    self.counters.directories += 1;
                }
                PathKind::Directory => {
                    debug!("not descending into {}", path.display());
                }
                PathKind::RegularFile => {
                    let lines = if classified.size > 0 {
                        self.fs.count_lines(&path, classified.size)?
                    } else {
                        0
                    };
                    self.counters.files += 1;
                    return Ok(Some(PathRecord::file(path, classified.size, lines)));
                }
                PathKind::Other => {
                    self.counters.others += 1;
                    return Ok(Some(PathRecord::other(path)));
                }
            }
        }
        Ok(None)
    }

    fn finish(&mut self) {
        if self.state == State::Running {
            self.state = State::Finished;
            self.elapsed = Some(self.started.elapsed());
        }
    }

    fn fail(&mut self, err: DirlocError) -> Result<Option<PathRecord>, DirlocError> {
        match self.config.policy {
            ErrorPolicy::FailFast => {
                self.release();
                Err(err)
            }
            ErrorPolicy::SkipAndStop => {
                self.stop(err);
                Ok(None)
            }
        }
    }

    fn stop(&mut self, err: DirlocError) {
        let released = self.release();
        debug!("traversal stopped early, {released} pending paths dropped: {err}");
        self.terminal_error = Some(err);
    }

    // ── Inspection ────────────────────────────────────────────────────────

    pub fn config(&self) -> WalkConfig {
        self.config
    }

    /// Paths still waiting to be classified.
    pub fn pending(&self) -> usize {
        self.queue.len()
    }

    pub fn is_finished(&self) -> bool {
        self.state == State::Finished
    }

    /// The failure that ended a [`ErrorPolicy::SkipAndStop`] walk, if any.
    pub fn terminal_error(&self) -> Option<&DirlocError> {
        self.terminal_error.as_ref()
    }

    pub(crate) fn take_terminal_error(&mut self) -> Option<DirlocError> {
        self.terminal_error.take()
    }

    /// Counts so far. Duration stops when the walk finishes.
    pub fn stats(&self) -> ScanStats {
        ScanStats::compute(
            self.counters.files,
            self.counters.others,
            self.counters.directories,
            self.elapsed.unwrap_or_else(|| self.started.elapsed()),
        )
    }

    /// Drop every pending path and finish the walk. Returns how many were
    /// released.
    pub fn release(&mut self) -> usize {
        let released = self.queue.release();
        self.finish();
        released
    }

    fn abandon(&mut self) -> usize {
        let released = self.release();
        if released > 0 {
            debug!("traversal abandoned, released {released} pending paths");
        }
        released
    }
}

impl<F: Filesystem> Drop for TraversalEngine<F> {
    fn drop(&mut self) {
        self.abandon();
    }
}
