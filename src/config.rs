//! Run configuration for perfcmp
//!
//! Every knob has a default matching the standard benchmark layout:
//! `../results/perf-results-*/perf-pg{11..=18}-report.txt`. A TOML file may
//! override any subset of fields.
//!
//! # Example
//!
//! ```
//! use perfcmp::config::ComparisonConfig;
//!
//! let config = ComparisonConfig::from_toml_str("max_version = 17").unwrap();
//! assert_eq!(config.min_version, 11);
//! assert_eq!(config.max_version, 17);
//! ```

use crate::error::{CompareError, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Environment variable naming an optional TOML override file
pub const CONFIG_ENV_VAR: &str = "PERFCMP_CONFIG";

/// Configuration for locating, parsing and summarizing perf reports
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ComparisonConfig {
    /// Parent directory searched when no results directory is given
    #[serde(default = "default_results_base")]
    pub results_base: PathBuf,

    /// Glob pattern (relative to `results_base`) for results directories
    #[serde(default = "default_results_pattern")]
    pub results_pattern: String,

    /// First version probed (inclusive)
    #[serde(default = "default_min_version")]
    pub min_version: u32,

    /// Last version probed (inclusive)
    #[serde(default = "default_max_version")]
    pub max_version: u32,

    /// Reports must be strictly larger than this to count as present
    #[serde(default = "default_min_report_bytes")]
    pub min_report_bytes: u64,

    /// File name of the CSV written into the results directory
    #[serde(default = "default_output_file")]
    pub output_file: String,

    /// Functions listed per version in the console summary
    #[serde(default = "default_top_n")]
    pub top_n: usize,

    /// Maximum number of versions shown in the console summary
    #[serde(default = "default_summary_versions")]
    pub summary_versions: usize,

    /// Function names in the summary are cut to this many characters
    #[serde(default = "default_summary_name_width")]
    pub summary_name_width: usize,

    /// Function names in per-version status lines are cut to this many characters
    #[serde(default = "default_status_name_width")]
    pub status_name_width: usize,
}

fn default_results_base() -> PathBuf {
    PathBuf::from("../results")
}

fn default_results_pattern() -> String {
    "perf-results-*".to_string()
}

fn default_min_version() -> u32 {
    11
}

fn default_max_version() -> u32 {
    18
}

fn default_min_report_bytes() -> u64 {
    100
}

fn default_output_file() -> String {
    "comparison.csv".to_string()
}

fn default_top_n() -> usize {
    5
}

fn default_summary_versions() -> usize {
    3
}

fn default_summary_name_width() -> usize {
    50
}

fn default_status_name_width() -> usize {
    40
}

impl Default for ComparisonConfig {
    fn default() -> Self {
        Self {
            results_base: default_results_base(),
            results_pattern: default_results_pattern(),
            min_version: default_min_version(),
            max_version: default_max_version(),
            min_report_bytes: default_min_report_bytes(),
            output_file: default_output_file(),
            top_n: default_top_n(),
            summary_versions: default_summary_versions(),
            summary_name_width: default_summary_name_width(),
            status_name_width: default_status_name_width(),
        }
    }
}

impl ComparisonConfig {
    /// Load configuration overrides from a TOML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(path.as_ref())?;
        Self::from_toml_str(&content)
    }

    /// Parse configuration overrides from a TOML string
    ///
    /// Missing fields keep their defaults; the result is validated.
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: Self =
            toml::from_str(content).map_err(|e| CompareError::Config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Check field combinations that would make a run meaningless
    pub fn validate(&self) -> Result<()> {
        if self.min_version > self.max_version {
            return Err(CompareError::Config(format!(
                "min_version ({}) is greater than max_version ({})",
                self.min_version, self.max_version
            )));
        }
        if self.output_file.is_empty() {
            return Err(CompareError::Config("output_file is empty".to_string()));
        }
        if self.results_pattern.is_empty() {
            return Err(CompareError::Config(
                "results_pattern is empty".to_string(),
            ));
        }
        Ok(())
    }

    /// Versions probed for reports, ascending
    pub fn versions(&self) -> std::ops::RangeInclusive<u32> {
        self.min_version..=self.max_version
    }
}
