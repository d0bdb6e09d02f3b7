//! Console summary of the hottest functions per version

use crate::aggregate::VersionData;
use crate::config::ComparisonConfig;

const RULE_WIDTH: usize = 80;

/// Horizontal rule used around summary blocks
pub fn rule() -> String {
    "=".repeat(RULE_WIDTH)
}

/// Render the top functions of the first `config.summary_versions` versions
pub fn format_summary(data: &VersionData, config: &ComparisonConfig) -> String {
    let mut out = String::new();

    out.push_str(&rule());
    out.push('\n');
    out.push_str(&format!("TOP {} FUNCTIONS BY VERSION\n", config.top_n));
    out.push_str(&rule());
    out.push_str("\n\n");

    for (version, functions) in data.iter().take(config.summary_versions) {
        out.push_str(&format!("PostgreSQL {}:\n", version));
        for (rank, func) in functions.iter().take(config.top_n).enumerate() {
            out.push_str(&format!(
                "  {}. {:6.2}%  {}\n",
                rank + 1,
                func.overhead,
                func.short_name(config.summary_name_width)
            ));
        }
        out.push('\n');
    }

    out
}

/// Print the summary block to stdout
pub fn print_summary(data: &VersionData, config: &ComparisonConfig) {
    print!("{}", format_summary(data, config));
}
