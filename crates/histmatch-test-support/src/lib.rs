//! Test support utilities for histmatch.
//!
//! Provides mocks of the core ports and synthetic pixel-grid builders, so
//! profiling and ranking can be tested without image files.
//!
//! # Example
//!
//! ```
//! use histmatch_test_support::{MockImageSource, SyntheticGridBuilder};
//!
//! let red = SyntheticGridBuilder::red(2, 2).with_path("red.png");
//! let blue = SyntheticGridBuilder::blue(2, 2).with_path("blue.png");
//!
//! let source = MockImageSource::new(vec![red, blue]);
//! ```

mod builders;
mod mocks;

pub use builders::SyntheticGridBuilder;
pub use mocks::{MockImageSource, MockProgressSink, MockResultOutput};
