use std::path::Path;

use colored::Colorize;
use comfy_table::{ContentArrangement, Table};
use dpr_mechanics::{BuildResult, NamedBuild, RulesConfig, SpellDamage, WeaponDamage};

use super::{fmt_damage, fmt_percent};

pub fn run(file: &Path, set: Option<&str>, rolls: bool) -> Result<(), String> {
    let mut builds = super::load_sets(file)?;

    if let Some(name) = set {
        builds.retain(|b| b.name.eq_ignore_ascii_case(name));
        if builds.is_empty() {
            return Err(format!("set not found: \"{name}\""));
        }
    }

    let rules = RulesConfig::default();
    for (i, named) in builds.iter().enumerate() {
        if i > 0 {
            println!();
        }
        print_build(named, &named.build.compute(&rules), rolls);
    }

    Ok(())
}

fn print_build(named: &NamedBuild, result: &BuildResult, rolls: bool) {
    println!(
        "  {} [{}]",
        named.name.bold().underline(),
        named.build.kind().dimmed()
    );
    println!();

    match result {
        BuildResult::Weapon(weapon) => print_weapon(weapon, rolls),
        BuildResult::Spell(spell) => print_spell(spell),
    }
}

fn print_weapon(result: &WeaponDamage, rolls: bool) {
    let p = &result.probabilities;
    println!(
        "  miss {}  graze {}  hit {}  crit {}  19-20 crit {}",
        fmt_percent(p.miss),
        fmt_percent(p.graze),
        fmt_percent(p.normal),
        fmt_percent(p.normal_crit),
        fmt_percent(p.special_crit),
    );
    println!(
        "  multi-strike x{:.2}  reaper x{:.3} ({:.1}% reduction)",
        result.scaling.multi_strike,
        result.scaling.reaper,
        result.scaling.reaper_reduction_percent()
    );
    println!();

    let avg = &result.averages;
    let mut table = Table::new();
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec!["Category", "Average"]);
    table.add_row(vec!["Base".to_string(), fmt_damage(avg.base)]);
    table.add_row(vec!["Sneak".to_string(), fmt_damage(avg.sneak)]);
    table.add_row(vec!["Imbue".to_string(), fmt_damage(avg.imbue)]);
    table.add_row(vec!["Unscaled".to_string(), fmt_damage(avg.unscaled)]);
    table.add_row(vec!["Scaled Dice".to_string(), fmt_damage(avg.scaled_dice)]);
    println!("{table}");
    println!();
    println!("  Total: {}", fmt_damage(result.total).bold());

    if rolls {
        println!();
        println!("{}", roll_table(result));
    }
}

fn roll_table(result: &WeaponDamage) -> Table {
    let mut table = Table::new();
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec![
        "Roll",
        "Outcome",
        "Base",
        "Sneak",
        "Imbue",
        "Unscaled",
        "Scaled Dice",
        "Total",
    ]);
    for row in &result.table.rows {
        let d = &row.damage;
        table.add_row(vec![
            row.roll.to_string(),
            row.outcome.to_string(),
            fmt_damage(d.base),
            fmt_damage(d.sneak),
            fmt_damage(d.imbue),
            fmt_damage(d.unscaled),
            fmt_damage(d.scaled_dice),
            fmt_damage(row.total()),
        ]);
    }
    table
}

fn print_spell(result: &SpellDamage) {
    let bonuses = &result.bonuses;
    println!(
        "  bonus spell power +{}  bonus crit damage +{}",
        bonuses.power(),
        fmt_percent(bonuses.crit_damage)
    );
    println!();

    if result.sources.is_empty() {
        println!("  No damage sources.");
        return;
    }

    let mut table = Table::new();
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec!["Source", "Profile", "Hit", "Crit", "Average"]);
    for source in &result.sources {
        for component in &source.components {
            table.add_row(vec![
                format!("{} (x{})", source.name, source.hit_count),
                component.label.clone(),
                fmt_damage(component.average_hit),
                fmt_damage(component.average_crit),
                fmt_damage(component.average),
            ]);
        }
    }
    println!("{table}");
    println!();
    println!("  Total: {}", fmt_damage(result.total).bold());
}
