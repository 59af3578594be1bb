use std::fs;
use std::path::Path;

pub fn run(file: &Path) -> Result<(), String> {
    if file.exists() {
        return Err(format!("'{}' already exists", file.display()));
    }

    let content = dpr_mechanics::snapshot::starter_sets_json().map_err(|e| e.to_string())?;
    fs::write(file, content).map_err(|e| format!("cannot write {}: {e}", file.display()))?;

    println!("Created set file {}", file.display());
    println!("  Weapon 1  starter weapon set");
    println!("  Spell 1   starter spell set");
    println!();
    println!("Get started:");
    println!("  dpr calc {}      # Expected damage per set", file.display());
    println!("  dpr compare {}   # Rank the sets", file.display());

    Ok(())
}
