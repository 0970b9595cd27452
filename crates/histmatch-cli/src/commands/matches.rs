//! Match command - rank candidate images against a query image.

use std::path::PathBuf;

use anyhow::{bail, Result};
use clap::Args;
use histmatch_adapters::{collect_image_paths, FsImageSource};
use histmatch_core::{MatchResult, Pipeline, ResultOutput};
use tracing::info;

use super::{CommonArgs, OutputFormat};
use crate::config::AppConfig;
use crate::output::{JsonOutput, ProgressBar};

/// Number of matches reported when neither CLI nor config sets one.
const DEFAULT_TOP_K: usize = 10;

/// Parse and validate a match count (at least 1).
fn parse_top_k(s: &str) -> Result<usize, String> {
    let value: usize = s
        .parse()
        .map_err(|_| format!("'{s}' is not a valid count"))?;
    if value == 0 {
        Err("must be at least 1".to_string())
    } else {
        Ok(value)
    }
}

/// Arguments for the match command.
#[derive(Args, Clone, Debug)]
pub struct MatchArgs {
    /// Query image
    pub query: PathBuf,

    /// Candidate files or directories
    #[arg(required = true)]
    pub candidates: Vec<PathBuf>,

    /// Number of matches to report
    #[arg(short = 'k', long, value_parser = parse_top_k)]
    pub top_k: Option<usize>,

    #[command(flatten)]
    pub common: CommonArgs,
}

impl MatchArgs {
    /// Apply configuration file values, respecting CLI precedence.
    #[must_use]
    pub fn with_config(mut self, config: &AppConfig) -> Self {
        self.common.apply_config(config);
        self.top_k = self.top_k.or(config.matching.top_k);
        self
    }

    /// Match count with fallback to the built-in default.
    fn top_k(&self) -> usize {
        self.top_k.unwrap_or(DEFAULT_TOP_K)
    }
}

/// Run the match command.
///
/// Expects `args` to have been processed through `with_config()` first.
pub fn run(args: &MatchArgs) -> Result<Vec<MatchResult>> {
    let candidates: Vec<String> = collect_image_paths(&args.candidates, args.common.recursive)
        .iter()
        .map(|p| p.to_string_lossy().into_owned())
        .collect();

    if candidates.is_empty() {
        bail!("No candidate images found");
    }
    info!(
        "Matching {} against {} candidates",
        args.query.display(),
        candidates.len()
    );

    let source = FsImageSource::new();
    let progress = ProgressBar::new(
        candidates.len() as u64,
        args.common.quiet,
        args.common.show_progress(),
    );
    let pipeline = Pipeline::new(&source)
        .with_profiler(args.common.profiler())
        .with_progress(&progress);

    let profiles = pipeline.profile_all(&candidates)?;
    let query = args.query.to_string_lossy();
    let matches = pipeline.find_top_matches(&query, &profiles, args.top_k())?;

    let output = JsonOutput::stdout();
    match args.common.format() {
        OutputFormat::Jsonl => {
            for result in &matches {
                output.write(result)?;
            }
        }
        OutputFormat::Json => output.write_array(&matches, args.common.pretty)?,
    }
    output.flush()?;

    Ok(matches)
}
