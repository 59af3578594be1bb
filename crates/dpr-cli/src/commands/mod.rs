pub mod calc;
pub mod compare;
pub mod dice;
pub mod export;
pub mod init;

use std::path::Path;

use dpr_mechanics::NamedBuild;

/// Read and parse a set file.
fn load_sets(file: &Path) -> Result<Vec<NamedBuild>, String> {
    let content = std::fs::read_to_string(file)
        .map_err(|e| format!("cannot read {}: {e}", file.display()))?;
    let builds =
        dpr_mechanics::parse_sets(&content).map_err(|e| format!("{}: {e}", file.display()))?;

    if builds.is_empty() {
        return Err(format!("{} contains no sets", file.display()));
    }
    Ok(builds)
}

/// Format a damage value for tables.
fn fmt_damage(value: f64) -> String {
    format!("{value:.2}")
}

/// Format a fraction as a percentage.
fn fmt_percent(fraction: f64) -> String {
    format!("{:.0}%", fraction * 100.0)
}
