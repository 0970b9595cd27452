//! Stats command - print per-channel statistics for images.

use std::path::PathBuf;

use anyhow::Result;
use clap::Args;
use histmatch_adapters::{collect_image_paths, FsImageSource};
use histmatch_core::{ChannelStats, ImageProfile, Pipeline, ResultOutput};
use serde::Serialize;
use tracing::{info, warn};

use super::{CommonArgs, OutputFormat};
use crate::config::AppConfig;
use crate::output::{JsonOutput, ProgressBar};

/// Arguments for the stats command.
#[derive(Args, Clone, Debug)]
pub struct StatsArgs {
    /// Files or directories to profile
    #[arg(required = true)]
    pub paths: Vec<PathBuf>,

    /// Include the 256-bin histogram of each channel
    #[arg(long)]
    pub histogram: bool,

    #[command(flatten)]
    pub common: CommonArgs,
}

impl StatsArgs {
    /// Apply configuration file values, respecting CLI precedence.
    #[must_use]
    pub fn with_config(mut self, config: &AppConfig) -> Self {
        self.common.apply_config(config);
        self
    }
}

/// Statistics of one channel as printed by the CLI.
#[derive(Debug, Serialize)]
pub struct ChannelReport {
    /// Smallest intensity present.
    pub min: u8,
    /// Largest intensity present.
    pub max: u8,
    /// Median intensity under the selected rule.
    pub median: u8,
    /// Population mean.
    pub mean: f64,
    /// Population standard deviation.
    pub std_dev: f64,
    /// Bin counts, present only with `--histogram`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub histogram: Option<Vec<u64>>,
}

impl ChannelReport {
    fn new(stats: &ChannelStats, with_histogram: bool) -> Self {
        Self {
            min: stats.min,
            max: stats.max,
            median: stats.median,
            mean: stats.mean,
            std_dev: stats.std_dev,
            histogram: with_histogram.then(|| stats.histogram.bins().to_vec()),
        }
    }
}

/// Profile of one image as printed by the CLI.
#[derive(Debug, Serialize)]
pub struct ProfileReport {
    /// Image path as discovered.
    pub path: String,
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
    /// Red channel statistics.
    pub red: ChannelReport,
    /// Green channel statistics.
    pub green: ChannelReport,
    /// Blue channel statistics.
    pub blue: ChannelReport,
}

impl ProfileReport {
    fn new(profile: &ImageProfile, with_histogram: bool) -> Self {
        Self {
            path: profile.path.clone(),
            width: profile.width,
            height: profile.height,
            red: ChannelReport::new(&profile.red, with_histogram),
            green: ChannelReport::new(&profile.green, with_histogram),
            blue: ChannelReport::new(&profile.blue, with_histogram),
        }
    }
}

/// Run the stats command.
///
/// Expects `args` to have been processed through `with_config()` first.
pub fn run(args: &StatsArgs) -> Result<Vec<ProfileReport>> {
    let paths: Vec<String> = collect_image_paths(&args.paths, args.common.recursive)
        .iter()
        .map(|p| p.to_string_lossy().into_owned())
        .collect();

    if paths.is_empty() {
        warn!("No images found");
    }
    info!("Profiling {} images", paths.len());

    let source = FsImageSource::new();
    let progress = ProgressBar::new(
        paths.len() as u64,
        args.common.quiet,
        args.common.show_progress(),
    );
    let pipeline = Pipeline::new(&source)
        .with_profiler(args.common.profiler())
        .with_progress(&progress);

    let reports: Vec<ProfileReport> = pipeline
        .profile_all(&paths)?
        .iter()
        .map(|profile| ProfileReport::new(profile, args.histogram))
        .collect();

    write_reports(
        &JsonOutput::stdout(),
        &reports,
        args.common.format(),
        args.common.pretty,
    )?;

    Ok(reports)
}

/// Writes reports in the requested format and flushes the output.
fn write_reports(
    output: &JsonOutput,
    reports: &[ProfileReport],
    format: OutputFormat,
    pretty: bool,
) -> Result<()> {
    match format {
        OutputFormat::Jsonl => {
            for report in reports {
                output.write_line(report)?;
            }
        }
        OutputFormat::Json => output.write_array(reports, pretty)?,
    }
    output.flush()
}
