use std::path::Path;

use chrono::Utc;
use dpr_mechanics::{BuildResult, NamedBuild, RulesConfig};

pub fn run(file: &Path, format: &str, output: Option<&Path>) -> Result<(), String> {
    let builds = super::load_sets(file)?;
    let results = dpr_mechanics::compute_all(&builds, &RulesConfig::default());

    let content = match format {
        "json" => export_json(&builds, &results)?,
        "summary" | "text" => dpr_mechanics::summary::render_summary(&builds, &results),
        _ => {
            return Err(format!(
                "unsupported format: \"{format}\". Use: json, summary"
            ));
        }
    };

    if let Some(path) = output {
        std::fs::write(path, &content)
            .map_err(|e| format!("cannot write to {}: {e}", path.display()))?;
        println!("  Exported to {}", path.display());
    } else {
        print!("{content}");
    }

    Ok(())
}

fn export_json(builds: &[NamedBuild], results: &[BuildResult]) -> Result<String, String> {
    let sets: Vec<_> = builds
        .iter()
        .zip(results)
        .map(|(named, result)| {
            serde_json::json!({
                "name": named.name,
                "input": named.build,
                "result": result,
            })
        })
        .collect();

    let export = serde_json::json!({
        "exported_at": Utc::now().to_rfc3339(),
        "sets": sets,
        "comparison": dpr_mechanics::rank(builds, results),
    });

    let mut text = serde_json::to_string_pretty(&export)
        .map_err(|e| format!("JSON serialization error: {e}"))?;
    text.push('\n');
    Ok(text)
}
