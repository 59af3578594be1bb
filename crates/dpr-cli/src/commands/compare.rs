use std::path::Path;

use colored::Colorize;
use comfy_table::{ContentArrangement, Table};
use dpr_mechanics::{BuildResult, RulesConfig, Standing};

use super::fmt_damage;

const NOT_APPLICABLE: &str = "-";

pub fn run(file: &Path) -> Result<(), String> {
    let builds = super::load_sets(file)?;
    let results = dpr_mechanics::compute_all(&builds, &RulesConfig::default());
    let rows = dpr_mechanics::rank(&builds, &results);

    let mut table = Table::new();
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec![
        "Set",
        "Type",
        "Base",
        "Sneak",
        "Imbue",
        "Unscaled",
        "Scaled Dice",
        "Avg Hit",
        "Avg Crit",
        "Total",
        "vs Best",
    ]);

    for ((row, named), result) in rows.iter().zip(&builds).zip(&results) {
        let standing = match row.standing {
            Standing::Best => "Best".green().bold().to_string(),
            other => other.to_string(),
        };
        let mut cells = vec![row.name.clone(), named.build.kind().to_string()];
        cells.extend(category_cells(result));
        cells.push(fmt_damage(row.total));
        cells.push(standing);
        table.add_row(cells);
    }

    println!("{table}");
    println!();
    println!("  {} sets", rows.len());

    Ok(())
}

/// Weapon categories, then spell hit and crit averages.
fn category_cells(result: &BuildResult) -> Vec<String> {
    let na = || NOT_APPLICABLE.to_string();
    match result {
        BuildResult::Weapon(weapon) => {
            let avg = &weapon.averages;
            vec![
                fmt_damage(avg.base),
                fmt_damage(avg.sneak),
                fmt_damage(avg.imbue),
                fmt_damage(avg.unscaled),
                fmt_damage(avg.scaled_dice),
                na(),
                na(),
            ]
        }
        BuildResult::Spell(spell) => vec![
            na(),
            na(),
            na(),
            na(),
            na(),
            fmt_damage(spell.average_base_hit),
            fmt_damage(spell.average_crit_hit),
        ],
    }
}
