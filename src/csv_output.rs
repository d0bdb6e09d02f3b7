//! CSV comparison table
//!
//! One row per function seen in any version, one overhead column per version
//! and one delta column per consecutive version pair:
//!
//! ```text
//! Function,PG11 (%),PG12 (%),Δ 11→12
//! foo,5.00,7.50,+2.50
//! baz,0.00,3.00,+3.00
//! ```

use crate::aggregate::VersionData;
use crate::config::ComparisonConfig;
use crate::error::Result;
use crate::report_parser::FunctionRecord;
use std::collections::{BTreeMap, BTreeSet, HashMap};
use std::fs;
use std::path::{Path, PathBuf};

/// Function name -> self overhead for one version
pub type OverheadLookup = HashMap<String, f64>;

/// Build the name -> overhead lookup for one version
///
/// When a symbol appears more than once (e.g. under two shared objects) the
/// later record wins. `functions` is sorted descending, so that is the lowest
/// overhead listed for the name.
pub fn overhead_lookup(functions: &[FunctionRecord]) -> OverheadLookup {
    let mut lookup = OverheadLookup::with_capacity(functions.len());
    for func in functions {
        lookup.insert(func.function.clone(), func.overhead);
    }
    lookup
}

/// One function across all compared versions
#[derive(Debug, Clone, PartialEq)]
pub struct ComparisonRow {
    pub function: String,
    /// Self overhead per version, in table version order (0.0 when absent)
    pub values: Vec<f64>,
}

impl ComparisonRow {
    /// Later minus earlier, for each consecutive version pair
    pub fn deltas(&self) -> Vec<f64> {
        self.values.windows(2).map(|w| w[1] - w[0]).collect()
    }
}

/// Per-function, per-version overhead matrix
#[derive(Debug, Clone)]
pub struct ComparisonTable {
    versions: Vec<u32>,
    rows: Vec<ComparisonRow>,
}

impl ComparisonTable {
    /// Build the table from parsed report data
    pub fn build(data: &VersionData) -> Self {
        let lookups: BTreeMap<u32, OverheadLookup> = data
            .iter()
            .map(|(&version, functions)| (version, overhead_lookup(functions)))
            .collect();
        Self::from_lookups(&lookups)
    }

    /// Build the table from per-version lookups
    ///
    /// Rows are ordered by the newest version's overhead, highest first.
    /// Functions with equal overhead there stay in name order.
    pub fn from_lookups(lookups: &BTreeMap<u32, OverheadLookup>) -> Self {
        let versions: Vec<u32> = lookups.keys().copied().collect();

        let all_funcs: BTreeSet<&str> = lookups
            .values()
            .flat_map(|lookup| lookup.keys().map(String::as_str))
            .collect();

        let mut rows: Vec<ComparisonRow> = all_funcs
            .into_iter()
            .map(|func| ComparisonRow {
                function: func.to_string(),
                values: lookups
                    .values()
                    .map(|lookup| lookup.get(func).copied().unwrap_or(0.0))
                    .collect(),
            })
            .collect();

        // Newest version is the last column
        if !versions.is_empty() {
            rows.sort_by(|a, b| {
                let latest_a = a.values.last().copied().unwrap_or(0.0);
                let latest_b = b.values.last().copied().unwrap_or(0.0);
                latest_b.total_cmp(&latest_a)
            });
        }

        Self { versions, rows }
    }

    pub fn versions(&self) -> &[u32] {
        &self.versions
    }

    pub fn rows(&self) -> &[ComparisonRow] {
        &self.rows
    }

    /// Generate CSV header row
    fn header(&self) -> String {
        let mut headers = vec!["Function".to_string()];

        for v in &self.versions {
            headers.push(format!("PG{} (%)", v));
        }

        for pair in self.versions.windows(2) {
            headers.push(format!("Δ {}→{}", pair[0], pair[1]));
        }

        headers
            .iter()
            .map(|h| Self::escape_field(h))
            .collect::<Vec<_>>()
            .join(",")
    }

    /// Escape CSV field (handle commas, quotes, newlines)
    fn escape_field(field: &str) -> String {
        if field.contains(',') || field.contains('"') || field.contains('\n') {
            format!("\"{}\"", field.replace('"', "\"\""))
        } else {
            field.to_string()
        }
    }

    /// Format a row as CSV
    fn format_row(row: &ComparisonRow) -> String {
        let mut fields = vec![Self::escape_field(&row.function)];

        fields.extend(row.values.iter().map(|v| format!("{:.2}", v)));
        fields.extend(row.deltas().iter().map(|d| format!("{:+.2}", d)));

        fields.join(",")
    }

    /// Generate CSV output as string
    pub fn to_csv(&self) -> String {
        let mut output = String::new();

        output.push_str(&self.header());
        output.push('\n');

        for row in &self.rows {
            output.push_str(&Self::format_row(row));
            output.push('\n');
        }

        output
    }
}

/// Write `comparison.csv` (or `config.output_file`) into `results_dir`
///
/// Returns the path written.
pub fn export_csv(
    results_dir: &Path,
    data: &VersionData,
    config: &ComparisonConfig,
) -> Result<PathBuf> {
    let output = results_dir.join(&config.output_file);
    let table = ComparisonTable::build(data);

    println!("Total unique functions: {}", table.rows().len());

    fs::write(&output, table.to_csv())?;
    tracing::debug!(
        "Wrote {} rows x {} versions to {}",
        table.rows().len(),
        table.versions().len(),
        output.display()
    );

    println!("✓ Saved: {}", output.display());
    Ok(output)
}
