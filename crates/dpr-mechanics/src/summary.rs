//! Plain-text summaries of builds and their expected damage.

use crate::build::{Build, BuildResult, NamedBuild};
use crate::config::RulesConfig;
use crate::spell::SpellInput;
use crate::weapon::{WeaponInput, portion::effective_melee_power};

const RULE: &str = "========================================";

/// Format a number with at most two decimals and no trailing zeros.
fn num(value: f64) -> String {
    let rounded = (value * 100.0).round() / 100.0;
    // Avoid "-0".
    format!("{}", rounded + 0.0)
}

/// Archer's focus as the engine applied it, after the stack cap.
struct FocusApplied {
    stacks: u32,
    power: f64,
}

impl FocusApplied {
    fn new(input: &WeaponInput, result: &BuildResult) -> Self {
        let (melee_power, stacks) = match result {
            BuildResult::Weapon(weapon) => {
                (weapon.portions.melee_power, weapon.portions.archers_focus)
            }
            BuildResult::Spell(_) => effective_melee_power(input, &RulesConfig::default()),
        };
        Self {
            stacks,
            power: melee_power - input.melee_power,
        }
    }
}

fn weapon_lines(input: &WeaponInput, focus: &FocusApplied, lines: &mut Vec<String>) {
    lines.push("--- Base Damage ---".to_string());
    lines.push(format!("Weapon Dice [W]: {}", num(input.weapon_dice)));
    lines.push(format!(
        "Damage: {} + {}",
        input.weapon_damage,
        num(input.bonus_damage)
    ));
    lines.push(format!("Melee/Ranged Power: {}", num(input.melee_power)));
    if input.archers_focus > 0 {
        let improved = if input.improved_archers_focus {
            ", Improved"
        } else {
            ""
        };
        lines.push(format!(
            "Archer's Focus: {} stacks (+{} RP){improved}",
            focus.stacks,
            num(focus.power)
        ));
    }
    lines.push(format!("Spell Power: {}", num(input.spell_power)));
    let kind = if input.doubleshot {
        "Doubleshot"
    } else {
        "Doublestrike"
    };
    lines.push(format!("Multi-Strike: {}% ({kind})", num(input.multi_strike)));
    if input.reaper_skulls > 0 {
        lines.push(format!("Reaper Skulls: {}", input.reaper_skulls));
    }

    lines.push(String::new());
    lines.push("--- Critical Profile ---".to_string());
    lines.push(format!("Threat Range: {}", input.crit_threat));
    lines.push(format!("Multiplier: x{}", num(input.crit_multiplier)));
    lines.push(format!("Seeker: +{}", input.seeker_damage));
    lines.push(format!(
        "19-20 Multiplier: +{}",
        num(input.crit_multiplier_19_20)
    ));

    lines.push(String::new());
    lines.push("--- Hit/Miss Profile ---".to_string());
    lines.push(format!("Miss on Roll <=: {}", input.miss_threshold));
    lines.push(format!("Graze on Roll <=: {}", input.graze_threshold));
    lines.push(format!("Graze Damage: {}%", num(input.graze_percent)));

    if !input.unscaled.is_empty() {
        lines.push(String::new());
        lines.push("--- Unscaled Damage ---".to_string());
        for (i, source) in input.unscaled.iter().enumerate() {
            let multi = if source.multi_strike { "Yes" } else { "No" };
            let crit_only = if source.on_crit_only {
                ", On Crit Only"
            } else {
                ""
            };
            lines.push(format!(
                "Source {}: {} @ {}% Proc, Multi-Strike: {multi}{crit_only}",
                i + 1,
                source.dice,
                num(source.proc_chance)
            ));
        }
    }

    if input.sneak_dice > 0 || input.sneak_bonus != 0.0 {
        lines.push(String::new());
        lines.push("--- Sneak Attack ---".to_string());
        lines.push(format!(
            "Damage: {}d6 + {}",
            input.sneak_dice,
            num(input.sneak_bonus)
        ));
    }

    let imbue = &input.imbue;
    if imbue.active {
        let stat = if imbue.uses_spell_power {
            "Spell Power"
        } else {
            "Melee Power"
        };
        lines.push(String::new());
        lines.push("--- Imbue Dice ---".to_string());
        lines.push(format!("Dice: {}d{}", imbue.dice_count, imbue.die_size));
        lines.push(format!(
            "Scaling: {}% of {stat}",
            num(imbue.scaling_percent)
        ));
        if imbue.crits {
            lines.push("Can Crit: Yes".to_string());
        }
    }

    let scaled: Vec<_> = input.scaled_dice.iter().filter(|s| s.enabled).collect();
    if !scaled.is_empty() {
        lines.push(String::new());
        lines.push("--- Scaled Dice ---".to_string());
        for (i, source) in scaled.iter().enumerate() {
            let imbue_scaling = if source.imbue_scaling {
                ", Imbue Scaling"
            } else {
                ""
            };
            lines.push(format!(
                "Source {}: {} @ {}% Proc, {}% Scaling{imbue_scaling}",
                i + 1,
                source.dice,
                num(source.proc_chance),
                num(source.scaling_percent)
            ));
        }
    }
}

fn spell_lines(input: &SpellInput, lines: &mut Vec<String>) {
    let toggles = [
        (input.metamagic.empower, "Empower"),
        (input.metamagic.maximize, "Maximize"),
        (input.metamagic.intensify, "Intensify"),
        (input.boosts.wellspring, "Wellspring of Power"),
        (input.boosts.night_horrors, "Night Horrors"),
    ];
    let active: Vec<&str> = toggles
        .iter()
        .filter(|(on, _)| *on)
        .map(|&(_, name)| name)
        .collect();
    lines.push("--- Metamagics & Boosts ---".to_string());
    lines.push(if active.is_empty() {
        "None".to_string()
    } else {
        active.join(", ")
    });

    lines.push(String::new());
    lines.push("--- Spell Power Profiles ---".to_string());
    for profile in &input.profiles {
        let element = if profile.element.trim().is_empty() {
            "Unnamed"
        } else {
            profile.element.as_str()
        };
        lines.push(format!(
            "Profile {} ({element}): {} SP, {}% Chance, +{}% Damage",
            profile.id,
            num(profile.spell_power),
            num(profile.crit_chance * 100.0),
            num(profile.crit_damage * 100.0)
        ));
    }

    lines.push(String::new());
    lines.push("--- Spell Damage Sources ---".to_string());
    for source in &input.sources {
        lines.push(format!(
            "Source \"{}\" (x{} hits):",
            source.name, source.hit_count
        ));
        lines.push(format!(
            "  - Base: {} + ({} per CL) @ CL {}",
            source.base, source.per_level, source.caster_level
        ));
        for scaling in &source.scalings {
            lines.push(format!(
                "  - Extra: {} + ({} per CL) [Uses SP {}]",
                scaling.base, scaling.per_level, scaling.profile_id
            ));
        }
    }
}

fn average_lines(result: &BuildResult, lines: &mut Vec<String>) {
    lines.push(String::new());
    lines.push("--- AVERAGES ---".to_string());
    match result {
        BuildResult::Weapon(weapon) => {
            let avg = &weapon.averages;
            lines.push(format!("Total Avg Damage: {:.2}", weapon.total));
            lines.push(format!(
                "Avg Base: {:.2}, Avg Sneak: {:.2}, Avg Imbue: {:.2}, Avg Unscaled: {:.2}, Avg Scaled Dice: {:.2}",
                avg.base, avg.sneak, avg.imbue, avg.unscaled, avg.scaled_dice
            ));
        }
        BuildResult::Spell(spell) => {
            lines.push(format!("Total Average Damage: {:.2}", spell.total));
        }
    }
}

/// Render one build with its result.
pub fn render_build(named: &NamedBuild, result: &BuildResult) -> String {
    let mut lines = vec![
        RULE.to_string(),
        format!("  Set: {}", named.name),
        RULE.to_string(),
    ];
    match &named.build {
        Build::Weapon(input) => {
            let focus = FocusApplied::new(input, result);
            weapon_lines(input, &focus, &mut lines);
        }
        Build::Spell(input) => spell_lines(input, &mut lines),
    }
    average_lines(result, &mut lines);
    lines.join("\n")
}

/// Render every build, separated by blank lines.
pub fn render_summary(builds: &[NamedBuild], results: &[BuildResult]) -> String {
    let blocks: Vec<String> = builds
        .iter()
        .zip(results)
        .map(|(named, result)| render_build(named, result))
        .collect();
    let mut text = blocks.join("\n\n");
    text.push('\n');
    text
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::spell::{Metamagic, ScalingComponent, SpellDamageSource, SpellPowerProfile};
    use crate::weapon::UnscaledSource;

    fn render(builds: &[NamedBuild]) -> String {
        let results = crate::build::compute_all(builds, &RulesConfig::default());
        render_summary(builds, &results)
    }

    #[test]
    fn number_formatting() {
        assert_eq!(num(7.0), "7");
        assert_eq!(num(1.5), "1.5");
        assert_eq!(num(2.05 * 100.0), "205");
        assert_eq!(num(-0.0), "0");
    }

    #[test]
    fn spell_summary() {
        let build = NamedBuild::new(
            "Caster",
            Build::Spell(SpellInput {
                metamagic: Metamagic {
                    empower: true,
                    ..Metamagic::default()
                },
                profiles: vec![SpellPowerProfile {
                    id: 1,
                    element: "Fire".to_string(),
                    spell_power: 25.0,
                    crit_chance: 0.0,
                    crit_damage: 0.5,
                }],
                sources: vec![SpellDamageSource {
                    id: 1,
                    name: "Bolt".to_string(),
                    base: "10".to_string(),
                    per_level: "1".to_string(),
                    caster_level: 10,
                    hit_count: 2,
                    scalings: vec![ScalingComponent {
                        id: 1,
                        base: "4".to_string(),
                        per_level: "0".to_string(),
                        profile_id: 1,
                    }],
                }],
                ..SpellInput::default()
            }),
        );
        insta::assert_snapshot!(render(&[build]), @r#"
        ========================================
          Set: Caster
        ========================================
        --- Metamagics & Boosts ---
        Empower

        --- Spell Power Profiles ---
        Profile 1 (Fire): 25 SP, 0% Chance, +50% Damage

        --- Spell Damage Sources ---
        Source "Bolt" (x2 hits):
          - Base: 10 + (1 per CL) @ CL 10
          - Extra: 4 + (0 per CL) [Uses SP 1]

        --- AVERAGES ---
        Total Average Damage: 96.00
        "#);
    }

    #[test]
    fn weapon_summary_sections() {
        let build = NamedBuild::new(
            "Bow",
            Build::Weapon(WeaponInput {
                weapon_dice: 2.0,
                weapon_damage: "1d8".to_string(),
                archers_focus: 3,
                doubleshot: true,
                multi_strike: 40.0,
                sneak_dice: 2,
                unscaled: vec![UnscaledSource {
                    dice: "2d6".to_string(),
                    on_crit_only: true,
                    ..UnscaledSource::default()
                }],
                ..WeaponInput::default()
            }),
        );
        let text = render(&[build]);
        assert!(text.contains("  Set: Bow"));
        assert!(text.contains("Damage: 1d8 + 0"));
        assert!(text.contains("Archer's Focus: 3 stacks (+15 RP)"));
        assert!(text.contains("Multi-Strike: 40% (Doubleshot)"));
        assert!(text.contains("Source 1: 2d6 @ 100% Proc, Multi-Strike: No, On Crit Only"));
        assert!(text.contains("--- Sneak Attack ---\nDamage: 2d6 + 0"));
        assert!(!text.contains("--- Imbue Dice ---"));
        assert!(text.contains("Total Avg Damage: "));
        assert!(text.ends_with('\n'));
    }

    #[test]
    fn archers_focus_shows_capped_stacks() {
        let build = NamedBuild::new(
            "Longbow",
            Build::Weapon(WeaponInput {
                archers_focus: u32::MAX,
                ..WeaponInput::default()
            }),
        );
        let text = render(&[build]);
        assert!(text.contains("Archer's Focus: 15 stacks (+75 RP)"));

        let improved = NamedBuild::new(
            "Longbow",
            Build::Weapon(WeaponInput {
                archers_focus: 40,
                improved_archers_focus: true,
                melee_power: 30.0,
                ..WeaponInput::default()
            }),
        );
        let text = render(&[improved]);
        assert!(text.contains("Archer's Focus: 25 stacks (+125 RP), Improved"));
    }

    #[test]
    fn multiple_sets_are_separated() {
        let builds = vec![
            NamedBuild::new("A", Build::Weapon(WeaponInput::default())),
            NamedBuild::new("B", Build::Spell(SpellInput::default())),
        ];
        let text = render(&builds);
        assert_eq!(text.matches("  Set: ").count(), 2);
        assert!(text.contains("None"));
    }
}
