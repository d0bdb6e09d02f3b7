//! Cross-version aggregation
//!
//! Parses every located report and keeps the versions that produced at least
//! one function with self time.

use crate::config::ComparisonConfig;
use crate::error::{CompareError, Result};
use crate::locator::report_path;
use crate::report_parser::{parse_report, FunctionRecord};
use std::collections::BTreeMap;
use std::path::Path;

/// Version -> functions sorted by self overhead (descending)
///
/// Only versions with data are present; iteration is in ascending version order.
pub type VersionData = BTreeMap<u32, Vec<FunctionRecord>>;

/// Console status line for one version
pub fn status_line(
    version: u32,
    functions: &[FunctionRecord],
    config: &ComparisonConfig,
) -> String {
    match functions.first() {
        Some(top) => format!(
            "✓ PG{}: {} functions (top: {}... {:.2}%)",
            version,
            functions.len(),
            top.short_name(config.status_name_width),
            top.overhead
        ),
        None => format!("⚠ PG{}: No functions with Self > 0%", version),
    }
}

/// Insert one version's parse result, dropping it when empty
pub fn add_version(data: &mut VersionData, version: u32, functions: Vec<FunctionRecord>) {
    if functions.is_empty() {
        tracing::warn!("PG{} report produced no functions", version);
        return;
    }
    data.insert(version, functions);
}

/// Parse the reports of `versions` found in `results_dir`
///
/// Prints one status line per version. Fails with [`CompareError::NoData`]
/// when no version yields any function.
pub fn load_all_data(
    results_dir: &Path,
    versions: &[u32],
    config: &ComparisonConfig,
) -> Result<VersionData> {
    let mut data = VersionData::new();

    for &version in versions {
        let functions = parse_report(&report_path(results_dir, version));
        println!("{}", status_line(version, &functions, config));
        add_version(&mut data, version, functions);
    }
    println!();

    if data.is_empty() {
        return Err(CompareError::NoData);
    }
    Ok(data)
}
