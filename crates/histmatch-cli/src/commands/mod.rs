//! CLI command definitions and handlers.

pub mod matches;
pub mod stats;

use std::io::IsTerminal;

use clap::{Args, Parser, Subcommand, ValueEnum};
use histmatch_core::{ImageProfiler, MedianRule, ProfilerConfig};

use crate::config::AppConfig;

/// Histmatch - rank images by color-histogram similarity
#[derive(Parser)]
#[command(name = "histmatch")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Commands,
}

/// Available subcommands
#[derive(Subcommand)]
pub enum Commands {
    /// Rank candidate images by similarity to a query image
    Match(matches::MatchArgs),
    /// Print per-channel statistics for images
    Stats(stats::StatsArgs),
}

/// Process exit codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExitCode {
    /// Command completed.
    Success = 0,
    /// Invalid input, unreadable image or I/O failure.
    Error = 2,
}

impl From<ExitCode> for std::process::ExitCode {
    fn from(code: ExitCode) -> Self {
        Self::from(code as u8)
    }
}

/// Output format for results.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// JSON Lines (one JSON object per line)
    #[default]
    Jsonl,
    /// Single JSON array
    Json,
}

impl OutputFormat {
    fn from_config(s: &str) -> Option<Self> {
        match s {
            "json" => Some(Self::Json),
            "jsonl" => Some(Self::Jsonl),
            _ => None,
        }
    }
}

/// Median rule selectable on the command line.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum MedianRuleArg {
    /// First bin reaching half the samples
    #[default]
    Legacy,
    /// Mean of the two middle samples for even counts
    Exact,
}

impl MedianRuleArg {
    fn from_config(s: &str) -> Option<Self> {
        match s {
            "legacy" => Some(Self::Legacy),
            "exact" => Some(Self::Exact),
            _ => None,
        }
    }
}

impl From<MedianRuleArg> for MedianRule {
    fn from(rule: MedianRuleArg) -> Self {
        match rule {
            MedianRuleArg::Legacy => Self::Legacy,
            MedianRuleArg::Exact => Self::Exact,
        }
    }
}

/// Arguments shared by every subcommand.
#[derive(Args, Clone, Debug, Default)]
#[allow(clippy::struct_excessive_bools)]
pub struct CommonArgs {
    /// Recurse into subdirectories
    #[arg(short, long)]
    pub recursive: bool,

    /// Output format
    #[arg(long, value_enum)]
    pub format: Option<OutputFormat>,

    /// Pretty-print JSON output (only affects --format json)
    #[arg(long)]
    pub pretty: bool,

    /// Median rule for channel statistics
    #[arg(long, value_enum)]
    pub median_rule: Option<MedianRuleArg>,

    /// Show progress bar
    #[arg(long)]
    pub progress: bool,

    /// Suppress progress output
    #[arg(short, long)]
    pub quiet: bool,
}

impl CommonArgs {
    /// Apply configuration file values, respecting CLI precedence.
    ///
    /// Layering priority (lowest to highest):
    /// 1. Hardcoded defaults (in accessor methods)
    /// 2. Config file values (XDG, then project-local)
    /// 3. CLI arguments (already set on self)
    pub fn apply_config(&mut self, config: &AppConfig) {
        if !self.recursive {
            self.recursive = config.general.recursive.unwrap_or(false);
        }

        if self.format.is_none() {
            self.format = config
                .output
                .format
                .as_deref()
                .and_then(OutputFormat::from_config);
        }

        if self.median_rule.is_none() {
            self.median_rule = config
                .stats
                .median_rule
                .as_deref()
                .and_then(MedianRuleArg::from_config);
        }

        if !self.pretty {
            self.pretty = config.output.pretty.unwrap_or(false);
        }
        if !self.progress {
            self.progress = config.output.progress.unwrap_or(false);
        }
    }

    /// Output format with fallback to JSONL.
    #[must_use]
    pub fn format(&self) -> OutputFormat {
        self.format.unwrap_or_default()
    }

    /// Profiler configured with the selected median rule.
    #[must_use]
    pub fn profiler(&self) -> ImageProfiler {
        ImageProfiler::new(ProfilerConfig {
            median_rule: self.median_rule.unwrap_or_default().into(),
        })
    }

    /// Whether a progress bar should be drawn on stderr.
    #[must_use]
    pub fn show_progress(&self) -> bool {
        !self.quiet && (self.progress || std::io::stderr().is_terminal())
    }
}
