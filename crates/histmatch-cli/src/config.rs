//! Configuration file support for histmatch.
//!
//! Supports TOML configuration from:
//! - XDG config: `~/.config/histmatch/config.toml` (lowest priority)
//! - Project-local: `.histmatch.toml` (searched up directory tree)
//! - CLI flags (highest priority, applied separately)

use std::path::{Path, PathBuf};

use serde::Deserialize;
use tracing::{debug, info, warn};

/// Project-local config file name.
const PROJECT_CONFIG: &str = ".histmatch.toml";

/// Top-level configuration structure.
#[derive(Debug, Default, Clone, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// General options.
    pub general: GeneralConfig,
    /// Matching settings.
    #[serde(rename = "match")]
    pub matching: MatchConfig,
    /// Statistics settings.
    pub stats: StatsConfig,
    /// Output formatting settings.
    pub output: OutputConfig,
}

/// General configuration options.
#[derive(Debug, Default, Clone, Deserialize)]
#[serde(default)]
pub struct GeneralConfig {
    /// Recurse into subdirectories by default.
    pub recursive: Option<bool>,
}

/// Matching configuration.
#[derive(Debug, Default, Clone, Deserialize)]
#[serde(default)]
pub struct MatchConfig {
    /// Number of matches to report.
    pub top_k: Option<usize>,
}

/// Statistics configuration.
#[derive(Debug, Default, Clone, Deserialize)]
#[serde(default)]
pub struct StatsConfig {
    /// Median rule: "legacy" or "exact".
    pub median_rule: Option<String>,
}

/// Output formatting configuration.
#[derive(Debug, Default, Clone, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Output format: "json" or "jsonl".
    pub format: Option<String>,
    /// Pretty-print JSON output.
    pub pretty: Option<bool>,
    /// Show progress bar.
    pub progress: Option<bool>,
}

impl AppConfig {
    /// Load configuration from XDG and project-local files.
    ///
    /// Priority (lowest to highest):
    /// 1. XDG config: `~/.config/histmatch/config.toml`
    /// 2. Project-local: `.histmatch.toml` (searched up from cwd)
    ///
    /// Missing files are silently ignored. Invalid values are reported as
    /// warnings and dropped so the built-in defaults apply.
    pub fn load() -> Self {
        let mut config = Self::default();

        if let Some(xdg_path) = xdg_config_path() {
            if xdg_path.exists() {
                info!("Loading XDG config: {}", xdg_path.display());
                if let Some(xdg_config) = load_file(&xdg_path) {
                    config = xdg_config;
                }
            } else {
                debug!("XDG config not found: {}", xdg_path.display());
            }
        }

        if let Some(project_path) = find_project_config() {
            info!("Loading project config: {}", project_path.display());
            if let Some(project_config) = load_file(&project_path) {
                config.merge(project_config);
            }
        }

        for problem in config.validate() {
            eprintln!("warning: {problem}");
        }

        config
    }

    /// Clears out-of-range values and returns a message for each one.
    fn validate(&mut self) -> Vec<String> {
        let mut problems = Vec::new();

        if self.matching.top_k == Some(0) {
            problems.push("match.top_k must be at least 1, got 0".to_string());
            self.matching.top_k = None;
        }

        if let Some(rule) = self.stats.median_rule.take() {
            if rule == "legacy" || rule == "exact" {
                self.stats.median_rule = Some(rule);
            } else {
                problems.push(format!(
                    "stats.median_rule must be 'legacy' or 'exact', got '{rule}'"
                ));
            }
        }

        if let Some(format) = self.output.format.take() {
            if format == "json" || format == "jsonl" {
                self.output.format = Some(format);
            } else {
                problems.push(format!(
                    "output.format must be 'json' or 'jsonl', got '{format}'"
                ));
            }
        }

        problems
    }

    /// Merge another config into this one.
    /// Values from `other` override values in `self` when present.
    fn merge(&mut self, other: Self) {
        self.general.recursive = other.general.recursive.or(self.general.recursive);

        self.matching.top_k = other.matching.top_k.or(self.matching.top_k);

        self.stats.median_rule = other
            .stats
            .median_rule
            .or_else(|| self.stats.median_rule.take());

        self.output.format = other.output.format.or_else(|| self.output.format.take());
        self.output.pretty = other.output.pretty.or(self.output.pretty);
        self.output.progress = other.output.progress.or(self.output.progress);
    }
}

/// Get the XDG config file path.
fn xdg_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join("histmatch").join("config.toml"))
}

/// Find project-local config by searching up from current directory.
fn find_project_config() -> Option<PathBuf> {
    let cwd = std::env::current_dir().ok()?;
    find_config_in_parents(&cwd)
}

/// Search for `.histmatch.toml` in the given directory and its parents.
fn find_config_in_parents(start: &Path) -> Option<PathBuf> {
    start
        .ancestors()
        .map(|dir| dir.join(PROJECT_CONFIG))
        .find(|path| path.exists())
}

/// Load and parse a TOML config file.
fn load_file(path: &Path) -> Option<AppConfig> {
    let content = match std::fs::read_to_string(path) {
        Ok(c) => c,
        Err(e) => {
            warn!("Failed to read config file {}: {e}", path.display());
            return None;
        }
    };

    match toml::from_str(&content) {
        Ok(config) => Some(config),
        Err(e) => {
            warn!("Failed to parse config file {}: {e}", path.display());
            None
        }
    }
}
