//! Batch and query entry points composing the image source with the
//! profiler and matcher.

use rayon::prelude::*;
use tracing::{debug, info};

use crate::domain::{ImageProfile, MatchResult};
use crate::error::{Error, Result};
use crate::modules::{find_top_matches, ImageProfiler};
use crate::ports::{ImageSource, ProgressEvent, ProgressSink};

/// Loads images through an [`ImageSource`] and profiles or ranks them.
pub struct Pipeline<'a> {
    source: &'a dyn ImageSource,
    profiler: ImageProfiler,
    progress: Option<&'a dyn ProgressSink>,
}

impl<'a> Pipeline<'a> {
    /// Creates a pipeline with a default profiler and no progress reporting.
    #[must_use]
    pub fn new(source: &'a dyn ImageSource) -> Self {
        Self {
            source,
            profiler: ImageProfiler::default(),
            progress: None,
        }
    }

    /// Uses `profiler` for every image.
    #[must_use]
    pub fn with_profiler(mut self, profiler: ImageProfiler) -> Self {
        self.profiler = profiler;
        self
    }

    /// Reports batch progress to `sink`.
    #[must_use]
    pub fn with_progress(mut self, sink: &'a dyn ProgressSink) -> Self {
        self.progress = Some(sink);
        self
    }

    fn emit(&self, event: ProgressEvent) {
        if let Some(sink) = self.progress {
            sink.on_event(event);
        }
    }

    /// Loads and profiles a single image.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidImage`] if the source fails or the image has
    /// no pixels.
    pub fn profile(&self, path: &str) -> Result<ImageProfile> {
        let grid = self
            .source
            .load(path)
            .map_err(|e| Error::invalid_image(path, format!("{e:#}")))?;
        debug!("Loaded {path} ({}x{})", grid.width(), grid.height());
        self.profiler.build_profile(&grid)
    }

    /// Profiles every path, preserving input order.
    ///
    /// Images are profiled in parallel. Any failure aborts the batch and no
    /// partial list is returned.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidImage`] for an image that fails. When several
    /// fail, which one is reported depends on scheduling.
    pub fn profile_all<S>(&self, paths: &[S]) -> Result<Vec<ImageProfile>>
    where
        S: AsRef<str> + Sync,
    {
        let total = paths.len();
        info!("Profiling {total} images");

        let profiles = paths
            .par_iter()
            .enumerate()
            .map(|(index, path)| {
                let path = path.as_ref();
                self.emit(ProgressEvent::Started {
                    path: path.to_owned(),
                    index,
                    total,
                });
                match self.profile(path) {
                    Ok(profile) => {
                        self.emit(ProgressEvent::Completed {
                            path: path.to_owned(),
                            index,
                        });
                        Ok(profile)
                    }
                    Err(e) => {
                        self.emit(ProgressEvent::Failed {
                            path: path.to_owned(),
                            reason: e.to_string(),
                        });
                        Err(e)
                    }
                }
            })
            .collect::<Result<Vec<_>>>()?;

        self.emit(ProgressEvent::Finished {
            processed: profiles.len(),
        });
        Ok(profiles)
    }

    /// Profiles the query image and ranks `candidates` against it.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidK`] if `k` is zero, or
    /// [`Error::InvalidImage`] if the query cannot be profiled.
    pub fn find_top_matches(
        &self,
        query_path: &str,
        candidates: &[ImageProfile],
        k: usize,
    ) -> Result<Vec<MatchResult>> {
        if k == 0 {
            return Err(Error::InvalidK(k));
        }
        let query = self.profile(query_path)?;
        let matches = find_top_matches(&query, candidates, k)?;
        debug!(
            "Ranked {} candidates against {query_path}, kept {}",
            candidates.len(),
            matches.len()
        );
        Ok(matches)
    }
}
