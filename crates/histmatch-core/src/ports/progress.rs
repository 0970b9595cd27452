//! Progress reporting port for UI integration.

/// Events emitted while profiling a batch of images.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProgressEvent {
    /// Profiling started for an image.
    Started {
        /// Path to the image.
        path: String,
        /// Index in the batch (0-based).
        index: usize,
        /// Total images in batch.
        total: usize,
    },
    /// Profiling completed for an image.
    Completed {
        /// Path to the image.
        path: String,
        /// Index in the batch (0-based).
        index: usize,
    },
    /// An image failed to load or profile. The batch is aborted.
    Failed {
        /// Path to the image.
        path: String,
        /// Reason for the failure.
        reason: String,
    },
    /// All images have been profiled.
    Finished {
        /// Total images profiled.
        processed: usize,
    },
}

/// Port for receiving progress events.
///
/// Batches are profiled in parallel, so events may arrive from several
/// threads and out of index order.
pub trait ProgressSink: Send + Sync {
    /// Called when a progress event occurs.
    fn on_event(&self, event: ProgressEvent);
}
