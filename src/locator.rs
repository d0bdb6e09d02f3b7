//! Report discovery
//!
//! Resolves the results directory (explicit or newest `perf-results-*`) and
//! probes it for one `perf-pg{version}-report.txt` per PostgreSQL version.

use crate::config::ComparisonConfig;
use crate::error::{CompareError, Result};
use std::fs;
use std::path::{Path, PathBuf};

/// Path of the report for `version` inside `results_dir`
pub fn report_path(results_dir: &Path, version: u32) -> PathBuf {
    results_dir.join(format!("perf-pg{}-report.txt", version))
}

/// Resolve the directory holding the reports
///
/// An explicit directory is taken as given. Otherwise the lexicographically
/// last directory matching `config.results_pattern` under
/// `config.results_base` wins; result directories carry sortable timestamps,
/// so that is the newest run.
pub fn resolve_results_dir(
    explicit: Option<&Path>,
    config: &ComparisonConfig,
) -> Result<PathBuf> {
    if let Some(dir) = explicit {
        return Ok(dir.to_path_buf());
    }

    // The base is a literal path; only `results_pattern` may hold wildcards
    let base = glob::Pattern::escape(&config.results_base.to_string_lossy());
    let pattern_str = Path::new(&base)
        .join(&config.results_pattern)
        .to_string_lossy()
        .into_owned();

    let entries = glob::glob(&pattern_str)
        .map_err(|e| CompareError::Config(format!("bad results_pattern: {}", e)))?;

    let mut matching: Vec<PathBuf> = entries
        .filter_map(|entry| match entry {
            Ok(path) => Some(path),
            Err(e) => {
                tracing::warn!("Skipping unreadable results entry: {}", e);
                None
            }
        })
        .filter(|path| path.is_dir())
        .collect();
    matching.sort();

    tracing::debug!(
        "{} results directories match {}",
        matching.len(),
        pattern_str
    );

    matching.pop().ok_or_else(|| CompareError::NoResultsDir {
        base: config.results_base.clone(),
        pattern: config.results_pattern.clone(),
    })
}

/// Versions whose report exists and is larger than `config.min_report_bytes`
///
/// Ascending order. Truncated or empty reports are left out so a crashed
/// benchmark run does not show up as a version with no hot functions.
pub fn find_versions(results_dir: &Path, config: &ComparisonConfig) -> Vec<u32> {
    config
        .versions()
        .filter(|&version| {
            let report = report_path(results_dir, version);
            match fs::metadata(&report) {
                Ok(meta) if meta.is_file() && meta.len() > config.min_report_bytes => true,
                Ok(meta) => {
                    tracing::debug!(
                        "PG{}: {} too small ({} bytes)",
                        version,
                        report.display(),
                        meta.len()
                    );
                    false
                }
                Err(_) => {
                    tracing::debug!("PG{}: no report at {}", version, report.display());
                    false
                }
            }
        })
        .collect()
}
