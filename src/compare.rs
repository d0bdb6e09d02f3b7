//! End-to-end comparison run: locate, parse, aggregate, export, summarize

use crate::aggregate::load_all_data;
use crate::config::ComparisonConfig;
use crate::csv_output::export_csv;
use crate::error::{CompareError, Result};
use crate::locator::{find_versions, resolve_results_dir};
use crate::summary::{print_summary, rule};
use std::path::{Path, PathBuf};

/// Run the whole comparison and return the path of the written CSV
///
/// Nothing is written unless at least one version produced data.
pub fn run(results_dir: Option<&Path>, config: &ComparisonConfig) -> Result<PathBuf> {
    let results_dir = resolve_results_dir(results_dir, config)?;
    println!("Parsing: {}", results_dir.display());
    println!();

    let versions = find_versions(&results_dir, config);
    if versions.is_empty() {
        return Err(CompareError::NoVersions { dir: results_dir });
    }
    println!("Found versions: {:?}", versions);
    println!();

    let data = load_all_data(&results_dir, &versions, config)?;

    let csv_file = export_csv(&results_dir, &data, config)?;
    print_summary(&data, config);

    println!("{}", rule());
    println!("✓ Complete!");
    println!();
    println!("📊 Import to Excel: {}", csv_file.display());

    Ok(csv_file)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::locator::report_path;
    use std::fs;
    use tempfile::TempDir;

    const HEADER: &str = "# Children      Self  Command  Shared Object  Symbol";

    fn write_report(dir: &Path, version: u32, rows: &[&str]) {
        let mut content = format!("# perf report\n#\n{}\n#\n", HEADER);
        for row in rows {
            content.push_str(row);
            content.push('\n');
        }
        fs::write(report_path(dir, version), content).unwrap();
    }

    #[test]
    fn test_run_writes_comparison() {
        let tmp = TempDir::new().unwrap();
        write_report(
            tmp.path(),
            11,
            &["  10.00%   5.00%  postgres  postgres  [.] foo"],
        );
        write_report(
            tmp.path(),
            12,
            &[
                "  10.00%   7.50%  postgres  postgres  [.] foo",
                "   4.00%   3.00%  postgres  postgres  [.] baz",
            ],
        );

        let csv = run(Some(tmp.path()), &ComparisonConfig::default()).unwrap();
        let content = fs::read_to_string(csv).unwrap();
        assert_eq!(
            content,
            "Function,PG11 (%),PG12 (%),Δ 11→12\nfoo,5.00,7.50,+2.50\nbaz,0.00,3.00,+3.00\n"
        );
    }

    #[test]
    fn test_run_without_versions_fails_before_output() {
        let tmp = TempDir::new().unwrap();
        let err = run(Some(tmp.path()), &ComparisonConfig::default()).unwrap_err();

        assert!(matches!(err, CompareError::NoVersions { .. }));
        assert!(!tmp.path().join("comparison.csv").exists());
    }

    #[test]
    fn test_run_with_only_empty_reports_writes_nothing() {
        let tmp = TempDir::new().unwrap();
        write_report(
            tmp.path(),
            14,
            &["  40.00%   0.00%  postgres  postgres  [.] PostgresMain"],
        );

        let err = run(Some(tmp.path()), &ComparisonConfig::default()).unwrap_err();
        assert!(matches!(err, CompareError::NoData));
        assert!(!tmp.path().join("comparison.csv").exists());
    }

    #[test]
    fn test_run_auto_discovers_latest_results() {
        let base = TempDir::new().unwrap();
        let old = base.path().join("perf-results-20240101");
        let new = base.path().join("perf-results-20240202");
        fs::create_dir(&old).unwrap();
        fs::create_dir(&new).unwrap();
        write_report(&new, 17, &["  9.00%  9.00%  postgres  postgres  [.] newest"]);

        let config = ComparisonConfig {
            results_base: base.path().to_path_buf(),
            ..Default::default()
        };
        let csv = run(None, &config).unwrap();
        assert_eq!(csv, new.join("comparison.csv"));
        assert!(!old.join("comparison.csv").exists());
    }
}
