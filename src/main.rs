use anyhow::{Context, Result};
use clap::Parser;
use perfcmp::{cli::Cli, compare, config};
use tracing_subscriber::EnvFilter;

/// Initialize tracing subscriber for diagnostics on stderr
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

/// Load overrides from `PERFCMP_CONFIG` when set
fn load_config() -> Result<config::ComparisonConfig> {
    match std::env::var_os(config::CONFIG_ENV_VAR) {
        Some(path) => config::ComparisonConfig::from_file(&path).with_context(|| {
            format!(
                "Failed to load {} from {}",
                config::CONFIG_ENV_VAR,
                std::path::Path::new(&path).display()
            )
        }),
        None => Ok(config::ComparisonConfig::default()),
    }
}

fn main() -> Result<()> {
    let args = Cli::parse();

    init_tracing();

    let config = load_config()?;
    tracing::debug!("Using configuration: {:?}", config);

    compare::run(args.results_dir.as_deref(), &config)?;
    Ok(())
}
