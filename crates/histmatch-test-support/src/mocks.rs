//! Mock implementations of core port traits.

use std::collections::{HashMap, HashSet};
use std::sync::{Arc, Mutex, PoisonError};

use histmatch_core::domain::{MatchResult, PixelGrid};
use histmatch_core::ports::{ImageSource, ProgressEvent, ProgressSink, ResultOutput};

/// Mock implementation of `ImageSource` for testing.
///
/// Serves pre-built grids keyed by their path, fails on demand, and counts
/// loads for assertions.
pub struct MockImageSource {
    grids: HashMap<String, PixelGrid>,
    failing: HashSet<String>,
    load_count: Arc<Mutex<usize>>,
}

impl MockImageSource {
    /// Creates a mock source serving `grids` under their own paths.
    #[must_use]
    pub fn new(grids: Vec<PixelGrid>) -> Self {
        Self {
            grids: grids
                .into_iter()
                .map(|g| (g.path().to_owned(), g))
                .collect(),
            failing: HashSet::new(),
            load_count: Arc::new(Mutex::new(0)),
        }
    }

    /// Creates an empty mock source. Every load fails.
    #[must_use]
    pub fn empty() -> Self {
        Self::new(vec![])
    }

    /// Makes loading `path` fail with a decode error.
    #[must_use]
    pub fn with_failure(mut self, path: impl Into<String>) -> Self {
        self.failing.insert(path.into());
        self
    }

    /// Returns the number of `load` calls made so far.
    #[must_use]
    pub fn load_count(&self) -> usize {
        *self
            .load_count
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
    }
}

impl ImageSource for MockImageSource {
    fn load(&self, path: &str) -> anyhow::Result<PixelGrid> {
        *self
            .load_count
            .lock()
            .unwrap_or_else(PoisonError::into_inner) += 1;

        if self.failing.contains(path) {
            anyhow::bail!("mock decode failure for {path}");
        }
        self.grids
            .get(path)
            .cloned()
            .ok_or_else(|| anyhow::anyhow!("no such image: {path}"))
    }
}

/// What a [`MockResultOutput`] has received so far.
#[derive(Debug, Default)]
struct OutputLog {
    written: Vec<MatchResult>,
    flushes: usize,
    written_at_last_flush: usize,
}

/// In-memory `ResultOutput` that records writes and flushes.
#[derive(Default)]
pub struct MockResultOutput {
    log: Mutex<OutputLog>,
}

impl MockResultOutput {
    /// Creates an output with nothing recorded.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn with_log<T>(&self, f: impl FnOnce(&mut OutputLog) -> T) -> T {
        f(&mut self.log.lock().unwrap_or_else(PoisonError::into_inner))
    }

    /// Returns every result written, in write order.
    #[must_use]
    pub fn results(&self) -> Vec<MatchResult> {
        self.with_log(|log| log.written.clone())
    }

    /// Returns the paths of the written results, in write order.
    #[must_use]
    pub fn paths(&self) -> Vec<String> {
        self.with_log(|log| log.written.iter().map(|r| r.path.clone()).collect())
    }

    /// Returns the number of `flush` calls.
    #[must_use]
    pub fn flush_count(&self) -> usize {
        self.with_log(|log| log.flushes)
    }

    /// Returns true if every written result was followed by a flush.
    #[must_use]
    pub fn is_flushed(&self) -> bool {
        self.with_log(|log| log.flushes > 0 && log.written_at_last_flush == log.written.len())
    }
}

impl ResultOutput for MockResultOutput {
    fn write(&self, result: &MatchResult) -> anyhow::Result<()> {
        self.with_log(|log| log.written.push(result.clone()));
        Ok(())
    }

    fn flush(&self) -> anyhow::Result<()> {
        self.with_log(|log| {
            log.flushes += 1;
            log.written_at_last_flush = log.written.len();
        });
        Ok(())
    }
}

/// Mock implementation of `ProgressSink` for testing.
///
/// Captures events for later assertions.
pub struct MockProgressSink {
    events: Arc<Mutex<Vec<ProgressEvent>>>,
}

impl MockProgressSink {
    /// Creates a new mock progress sink.
    #[must_use]
    pub fn new() -> Self {
        Self {
            events: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Returns all captured events.
    #[must_use]
    pub fn events(&self) -> Vec<ProgressEvent> {
        self.events
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Returns the number of `Started` events.
    #[must_use]
    pub fn started_count(&self) -> usize {
        self.count(|e| matches!(e, ProgressEvent::Started { .. }))
    }

    /// Returns the number of `Completed` events.
    #[must_use]
    pub fn completed_count(&self) -> usize {
        self.count(|e| matches!(e, ProgressEvent::Completed { .. }))
    }

    /// Returns the number of `Failed` events.
    #[must_use]
    pub fn failed_count(&self) -> usize {
        self.count(|e| matches!(e, ProgressEvent::Failed { .. }))
    }

    /// Returns the processed count from the `Finished` event, if any.
    #[must_use]
    pub fn finished_count(&self) -> Option<usize> {
        self.events().iter().find_map(|e| match e {
            ProgressEvent::Finished { processed } => Some(*processed),
            _ => None,
        })
    }

    fn count(&self, pred: impl Fn(&ProgressEvent) -> bool) -> usize {
        self.events().iter().filter(|e| pred(e)).count()
    }
}

impl Default for MockProgressSink {
    fn default() -> Self {
        Self::new()
    }
}

impl ProgressSink for MockProgressSink {
    fn on_event(&self, event: ProgressEvent) {
        self.events
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(event);
    }
}
