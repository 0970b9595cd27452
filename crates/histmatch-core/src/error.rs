//! Error type for profiling and ranking.

/// Errors surfaced by the core pipeline.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The image could not be loaded or has no pixels.
    #[error("invalid image '{path}': {reason}")]
    InvalidImage {
        /// Identifier of the offending image.
        path: String,
        /// What went wrong.
        reason: String,
    },

    /// The requested number of matches was not positive.
    #[error("number of matches must be at least 1, got {0}")]
    InvalidK(usize),
}

impl Error {
    pub(crate) fn invalid_image(path: &str, reason: impl Into<String>) -> Self {
        Self::InvalidImage {
            path: path.to_owned(),
            reason: reason.into(),
        }
    }
}

/// Result alias for core operations.
pub type Result<T> = std::result::Result<T, Error>;
