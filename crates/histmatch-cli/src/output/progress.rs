//! Progress bar adapter using indicatif.

use histmatch_core::{ProgressEvent, ProgressSink};
use indicatif::{ProgressBar as IndicatifBar, ProgressStyle};

/// Progress bar adapter for CLI output.
pub struct ProgressBar {
    bar: Option<IndicatifBar>,
}

impl ProgressBar {
    /// Creates a new progress bar.
    ///
    /// # Arguments
    ///
    /// * `total` - Number of images in the batch
    /// * `quiet` - If true, suppress all output
    /// * `show_bar` - If true, draw a bar; otherwise events are only logged at debug level
    #[must_use]
    pub fn new(total: u64, quiet: bool, show_bar: bool) -> Self {
        if quiet || !show_bar {
            return Self { bar: None };
        }

        let bar = IndicatifBar::new(total);
        if let Ok(style) = ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} ({eta}) {msg}")
        {
            bar.set_style(style.progress_chars("#>-"));
        }

        Self { bar: Some(bar) }
    }
}

impl ProgressSink for ProgressBar {
    fn on_event(&self, event: ProgressEvent) {
        match event {
            ProgressEvent::Started { path, total, .. } => {
                if let Some(bar) = &self.bar {
                    bar.set_length(total as u64);
                    bar.set_message(path);
                }
            }
            ProgressEvent::Completed { .. } => {
                if let Some(bar) = &self.bar {
                    bar.inc(1);
                }
            }
            ProgressEvent::Failed { path, reason } => {
                if let Some(bar) = &self.bar {
                    bar.abandon_with_message(format!("Failed: {path}"));
                }
                tracing::debug!("Profiling failed for {path}: {reason}");
            }
            ProgressEvent::Finished { processed } => {
                if let Some(bar) = &self.bar {
                    bar.finish_with_message(format!("Done: {processed} profiled"));
                }
            }
        }
    }
}
