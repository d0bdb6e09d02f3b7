//! CLI argument parsing for perfcmp

use clap::Parser;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "perfcmp")]
#[command(version)]
#[command(
    about = "Compare perf report self-overhead across PostgreSQL versions",
    long_about = "Reads perf-pg{11..18}-report.txt from a results directory, writes \
                  comparison.csv next to them and prints the hottest functions per version.\n\n\
                  Set PERFCMP_CONFIG to a TOML file to override defaults; set RUST_LOG for \
                  diagnostics."
)]
pub struct Cli {
    /// Results directory (default: newest ../results/perf-results-*)
    #[arg(value_name = "RESULTS_DIR")]
    pub results_dir: Option<PathBuf>,
}
