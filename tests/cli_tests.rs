// End-to-end tests for the perfcmp binary

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use std::path::Path;
use tempfile::TempDir;

const HEADER: &str = "# Children      Self  Command          Shared Object        Symbol";

fn write_report(dir: &Path, version: u32, rows: &[&str]) {
    let mut content = String::from(
        "# To display the perf.data header info, please use --header/--header-only options.\n#\n",
    );
    content.push_str(HEADER);
    content.push_str("\n# ........  ........  ...............  ...................  ........\n#\n\n");
    for row in rows {
        content.push_str(row);
        content.push('\n');
    }
    fs::write(dir.join(format!("perf-pg{}-report.txt", version)), content).unwrap();
}

fn perfcmp() -> Command {
    let mut cmd = Command::cargo_bin("perfcmp").unwrap();
    cmd.env_remove("PERFCMP_CONFIG").env_remove("RUST_LOG");
    cmd
}

// ============================================================================
// Successful runs
// ============================================================================

#[test]
fn test_explicit_results_dir() {
    let tmp = TempDir::new().unwrap();
    write_report(
        tmp.path(),
        11,
        &["    10.00%     5.00%  postgres  postgres  [.] foo"],
    );
    write_report(
        tmp.path(),
        12,
        &[
            "    10.00%     7.50%  postgres  postgres  [.] foo",
            "     3.00%     3.00%  postgres  postgres  [.] baz",
        ],
    );

    perfcmp()
        .arg(tmp.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("Found versions: [11, 12]"))
        .stdout(predicate::str::contains("✓ PG11: 1 functions"))
        .stdout(predicate::str::contains("✓ PG12: 2 functions"))
        .stdout(predicate::str::contains("Total unique functions: 2"))
        .stdout(predicate::str::contains("TOP 5 FUNCTIONS BY VERSION"))
        .stdout(predicate::str::contains("PostgreSQL 12:"))
        .stdout(predicate::str::contains("✓ Complete!"));

    let csv = fs::read_to_string(tmp.path().join("comparison.csv")).unwrap();
    assert_eq!(
        csv,
        "Function,PG11 (%),PG12 (%),Δ 11→12\nfoo,5.00,7.50,+2.50\nbaz,0.00,3.00,+3.00\n"
    );
}

#[test]
fn test_empty_version_is_excluded_with_warning() {
    let tmp = TempDir::new().unwrap();
    write_report(
        tmp.path(),
        13,
        &["    50.00%     0.00%  postgres  postgres  [.] PostgresMain"],
    );
    write_report(
        tmp.path(),
        14,
        &["     6.00%     6.00%  postgres  postgres  [.] ExecInterpExpr"],
    );

    perfcmp()
        .arg(tmp.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("⚠ PG13: No functions with Self > 0%"))
        .stdout(predicate::str::contains("✓ PG14: 1 functions"));

    let csv = fs::read_to_string(tmp.path().join("comparison.csv")).unwrap();
    assert_eq!(csv, "Function,PG14 (%)\nExecInterpExpr,6.00\n");
}

#[test]
fn test_auto_discovery_uses_latest_results_dir() {
    let tmp = TempDir::new().unwrap();
    let work = tmp.path().join("scripts");
    let results = tmp.path().join("results");
    let older = results.join("perf-results-20240101_000000");
    let newer = results.join("perf-results-20240601_000000");
    for dir in [&work, &older, &newer] {
        fs::create_dir_all(dir).unwrap();
    }
    write_report(
        &older,
        11,
        &["    10.00%     5.00%  postgres  postgres  [.] stale"],
    );
    write_report(
        &newer,
        16,
        &["    10.00%     4.25%  postgres  postgres  [.] fresh"],
    );

    perfcmp()
        .current_dir(&work)
        .assert()
        .success()
        .stdout(predicate::str::contains("perf-results-20240601_000000"))
        .stdout(predicate::str::contains("Found versions: [16]"));

    assert!(newer.join("comparison.csv").exists());
    assert!(!older.join("comparison.csv").exists());
}

#[test]
fn test_config_override_from_env() {
    let tmp = TempDir::new().unwrap();
    write_report(
        tmp.path(),
        11,
        &["    10.00%     5.00%  postgres  postgres  [.] foo"],
    );
    write_report(
        tmp.path(),
        12,
        &["    10.00%     2.00%  postgres  postgres  [.] foo"],
    );
    let config = tmp.path().join("perfcmp.toml");
    fs::write(&config, "max_version = 11\noutput_file = \"pg11.csv\"\n").unwrap();

    perfcmp()
        .env("PERFCMP_CONFIG", &config)
        .arg(tmp.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("Found versions: [11]"));

    let csv = fs::read_to_string(tmp.path().join("pg11.csv")).unwrap();
    assert_eq!(csv, "Function,PG11 (%)\nfoo,5.00\n");
}

// ============================================================================
// Fatal conditions
// ============================================================================

#[test]
fn test_no_versions_found() {
    let tmp = TempDir::new().unwrap();
    fs::write(tmp.path().join("perf-pg15-report.txt"), "too small").unwrap();

    perfcmp()
        .arg(tmp.path())
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("No PostgreSQL versions found"));

    assert!(!tmp.path().join("comparison.csv").exists());
}

#[test]
fn test_no_data_parsed() {
    let tmp = TempDir::new().unwrap();
    fs::write(
        tmp.path().join("perf-pg11-report.txt"),
        "this report has no column header at all\n".repeat(10),
    )
    .unwrap();

    perfcmp()
        .arg(tmp.path())
        .assert()
        .failure()
        .code(1)
        .stdout(predicate::str::contains("⚠ PG11"))
        .stderr(predicate::str::contains("No data parsed"))
        .stderr(predicate::str::contains("'Self' column > 0%"));

    assert!(!tmp.path().join("comparison.csv").exists());
}

#[test]
fn test_no_results_directory() {
    let tmp = TempDir::new().unwrap();
    let work = tmp.path().join("scripts");
    fs::create_dir_all(&work).unwrap();

    perfcmp()
        .current_dir(&work)
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("No results found"));
}

#[test]
fn test_bad_config_file() {
    let tmp = TempDir::new().unwrap();
    let config = tmp.path().join("perfcmp.toml");
    fs::write(&config, "min_version = 18\nmax_version = 11\n").unwrap();

    perfcmp()
        .env("PERFCMP_CONFIG", &config)
        .arg(tmp.path())
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("PERFCMP_CONFIG"));
}

#[test]
fn test_help_mentions_results_dir() {
    perfcmp()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("RESULTS_DIR"));
}
