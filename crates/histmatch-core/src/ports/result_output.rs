//! Result output port for writing ranked matches.

use crate::domain::MatchResult;

/// Port for outputting match results.
pub trait ResultOutput: Send + Sync {
    /// Writes a single match result.
    ///
    /// # Errors
    ///
    /// Returns an error if writing fails.
    fn write(&self, result: &MatchResult) -> anyhow::Result<()>;

    /// Flushes any buffered output.
    ///
    /// # Errors
    ///
    /// Returns an error if flushing fails.
    fn flush(&self) -> anyhow::Result<()>;
}
