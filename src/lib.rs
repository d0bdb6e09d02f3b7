//! perfcmp - compare `perf report` self-overhead across PostgreSQL versions
//!
//! This library locates one perf report per PostgreSQL version, extracts
//! per-function self-time percentages, and exports a CSV comparison with
//! version-to-version deltas plus a console summary.

pub mod aggregate;
pub mod cli;
pub mod compare;
pub mod config;
pub mod csv_output;
pub mod error;
pub mod locator;
pub mod report_parser;
pub mod summary;
