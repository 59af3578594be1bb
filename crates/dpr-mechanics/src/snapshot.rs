//! Mapping flat form-field snapshots into typed build inputs.
//!
//! A snapshot is a JSON object whose keys are form field names such as
//! `"weapon-dice"` or `"spell-power-2"`. Repeating rows carry an integer id
//! suffix; rows are always ordered by that id. Values may be JSON numbers,
//! numeric strings or booleans. Blank or missing fields fall back to the
//! field's default and never produce an error.

use std::collections::BTreeSet;

use serde_json::{Map, Value, json};

use crate::build::{Build, NamedBuild};
use crate::error::{MechError, MechResult};
use crate::spell::{
    Boosts, Metamagic, ScalingComponent, SpellDamageSource, SpellInput, SpellPowerProfile,
};
use crate::weapon::{Imbue, ScaledDiceSource, UnscaledSource, WeaponInput};

/// A flat key/value input snapshot.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Snapshot {
    values: Map<String, Value>,
}

impl From<Map<String, Value>> for Snapshot {
    fn from(values: Map<String, Value>) -> Self {
        Self { values }
    }
}

impl Snapshot {
    /// Create an empty snapshot.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a field, builder style.
    pub fn with(mut self, key: &str, value: impl Into<Value>) -> Self {
        self.values.insert(key.to_string(), value.into());
        self
    }

    /// Raw value of a field.
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.values.get(key)
    }

    /// The underlying map.
    pub fn into_map(self) -> Map<String, Value> {
        self.values
    }

    /// A numeric field. `None` when missing, blank or not numeric.
    pub fn number(&self, key: &str) -> Option<f64> {
        let value = match self.values.get(key)? {
            Value::Number(n) => n.as_f64(),
            Value::String(s) => s.trim().parse::<f64>().ok(),
            _ => None,
        };
        value.filter(|v| v.is_finite())
    }

    /// A numeric field with a default.
    pub fn number_or(&self, key: &str, default: f64) -> f64 {
        self.number(key).unwrap_or(default)
    }

    /// A non-negative integer field with a default. Fractions are truncated.
    pub fn count_or(&self, key: &str, default: u32) -> u32 {
        self.number(key).map_or(default, |v| v.trunc().max(0.0) as u32)
    }

    /// A boolean field. Missing fields are false.
    pub fn flag(&self, key: &str) -> bool {
        match self.values.get(key) {
            Some(Value::Bool(b)) => *b,
            Some(Value::String(s)) => matches!(s.trim(), "true" | "on"),
            Some(Value::Number(n)) => n.as_f64().is_some_and(|v| v != 0.0),
            _ => false,
        }
    }

    /// A text field. Numbers are rendered as text.
    pub fn text(&self, key: &str) -> Option<String> {
        match self.values.get(key)? {
            Value::String(s) => Some(s.clone()),
            Value::Number(n) => Some(n.to_string()),
            _ => None,
        }
    }

    /// A text field with a default for missing fields.
    pub fn text_or(&self, key: &str, default: &str) -> String {
        self.text(key).unwrap_or_else(|| default.to_string())
    }

    /// A text field with a default for missing or blank fields.
    fn label_or(&self, key: &str, default: impl FnOnce() -> String) -> String {
        self.text(key)
            .filter(|s| !s.trim().is_empty())
            .unwrap_or_else(default)
    }

    /// Ids of every row whose key is `prefix` followed by an integer.
    pub fn row_ids(&self, prefixes: &[&str]) -> Vec<u32> {
        let ids: BTreeSet<u32> = self
            .values
            .keys()
            .filter_map(|key| {
                prefixes
                    .iter()
                    .find_map(|prefix| key.strip_prefix(prefix)?.parse::<u32>().ok())
            })
            .collect();
        ids.into_iter().collect()
    }
}

/// Map a weapon snapshot into a typed input.
pub fn weapon_input(s: &Snapshot) -> WeaponInput {
    let unscaled = s
        .row_ids(&["unscaled-damage-"])
        .into_iter()
        .map(|id| UnscaledSource {
            id,
            dice: s.text_or(&format!("unscaled-damage-{id}"), ""),
            proc_chance: s.number_or(&format!("unscaled-proc-chance-{id}"), 100.0),
            multi_strike: s.flag(&format!("unscaled-doublestrike-{id}")),
            on_crit_only: s.flag(&format!("unscaled-on-crit-{id}")),
        })
        .collect();

    let scaled_dice = s
        .row_ids(&["scaled-dice-base-", "scaled-dice-enabled-"])
        .into_iter()
        .map(|id| ScaledDiceSource {
            id,
            enabled: s.flag(&format!("scaled-dice-enabled-{id}")),
            dice: s.text_or(&format!("scaled-dice-base-{id}"), ""),
            proc_chance: s.number_or(&format!("scaled-dice-proc-chance-{id}"), 100.0),
            scaling_percent: s.number_or(&format!("scaled-dice-scaling-percent-{id}"), 100.0),
            imbue_scaling: s.flag(&format!("scaled-dice-scaling-toggle-{id}")),
        })
        .collect();

    WeaponInput {
        weapon_dice: s.number_or("weapon-dice", 0.0),
        weapon_damage: s.text_or("weapon-damage", ""),
        bonus_damage: s.number_or("bonus-base-damage", 0.0),
        melee_power: s.number_or("melee-power", 0.0),
        archers_focus: s.count_or("archers-focus", 0),
        improved_archers_focus: s.flag("improved-archers-focus"),
        spell_power: s.number_or("spell-power", 0.0),
        crit_threat: s.text_or("crit-threat", "20"),
        crit_multiplier: s.number_or("crit-multiplier", 2.0),
        crit_multiplier_19_20: s.number_or("crit-multiplier-19-20", 0.0),
        seeker_damage: s.text_or("seeker-damage", ""),
        sneak_dice: s.count_or("sneak-attack-dice", 0),
        sneak_bonus: s.number_or("sneak-bonus", 0.0),
        miss_threshold: s.count_or("miss-threshold", 1).max(1),
        graze_threshold: s.count_or("graze-threshold", 0),
        graze_percent: s.number_or("graze-percent", 0.0),
        multi_strike: s.number_or("doublestrike", 0.0),
        doubleshot: s.flag("is-doubleshot"),
        reaper_skulls: s.count_or("reaper-skulls", 0),
        imbue: Imbue {
            active: s.flag("imbue-active"),
            dice_count: s.count_or("imbue-dice-count", 0),
            die_size: s.count_or("imbue-die-type", 6),
            scaling_percent: s.number_or("imbue-scaling", 100.0),
            uses_spell_power: s.flag("imbue-uses-spellpower"),
            crits: s.flag("imbue-crits"),
        },
        unscaled,
        scaled_dice,
    }
}

/// Map a spell snapshot into a typed input.
pub fn spell_input(s: &Snapshot) -> SpellInput {
    let profiles = s
        .row_ids(&["spell-power-type-", "spell-power-"])
        .into_iter()
        .map(|id| SpellPowerProfile {
            id,
            element: s.text_or(&format!("spell-power-type-{id}"), ""),
            spell_power: s.number_or(&format!("spell-power-{id}"), 0.0),
            crit_chance: s.number_or(&format!("spell-crit-chance-{id}"), 0.0) / 100.0,
            crit_damage: s.number_or(&format!("spell-crit-damage-{id}"), 0.0) / 100.0,
        })
        .collect();

    let sources = s
        .row_ids(&["spell-name-", "spell-damage-"])
        .into_iter()
        .map(|id| {
            let scaling_prefix = format!("additional-scaling-base-{id}-");
            let scalings = s
                .row_ids(&[scaling_prefix.as_str()])
                .into_iter()
                .map(|sid| ScalingComponent {
                    id: sid,
                    base: s.text_or(&format!("additional-scaling-base-{id}-{sid}"), ""),
                    per_level: s.text_or(&format!("additional-scaling-cl-{id}-{sid}"), ""),
                    profile_id: s.count_or(&format!("additional-scaling-sp-select-{id}-{sid}"), 1),
                })
                .collect();
            SpellDamageSource {
                id,
                name: s.label_or(&format!("spell-name-{id}"), || format!("Source {id}")),
                base: s.text_or(&format!("spell-damage-{id}"), ""),
                per_level: s.text_or(&format!("spell-cl-scaling-{id}"), ""),
                caster_level: s.count_or(&format!("caster-level-{id}"), 0),
                hit_count: s.count_or(&format!("spell-hit-count-{id}"), 1),
                scalings,
            }
        })
        .collect();

    SpellInput {
        metamagic: Metamagic {
            empower: s.flag("metamagic-empower"),
            intensify: s.flag("metamagic-intensify"),
            maximize: s.flag("metamagic-maximize"),
        },
        boosts: Boosts {
            wellspring: s.flag("boost-wellspring"),
            night_horrors: s.flag("boost-night-horrors"),
        },
        profiles,
        sources,
    }
}

/// Map one snapshot of a set file, naming it `Set {position}` if unnamed.
pub fn named_build(s: &Snapshot, position: usize) -> MechResult<NamedBuild> {
    let name = s.label_or("tabName", || format!("Set {position}"));
    let kind = s.text_or("type", "weapon");
    let build = match kind.trim().to_lowercase().as_str() {
        "weapon" => Build::Weapon(weapon_input(s)),
        "spell" => Build::Spell(spell_input(s)),
        _ => return Err(MechError::UnknownBuildType(kind)),
    };
    Ok(NamedBuild::new(name, build))
}

/// Parse a set file: a JSON array of snapshots, or a single snapshot.
pub fn parse_sets(json: &str) -> MechResult<Vec<NamedBuild>> {
    let value: Value = serde_json::from_str(json)?;
    let items = match value {
        Value::Array(items) => items,
        obj @ Value::Object(_) => vec![obj],
        _ => {
            return Err(MechError::InvalidSnapshot(
                "expected an array of sets".to_string(),
            ));
        }
    };

    let builds: Vec<NamedBuild> = items
        .into_iter()
        .enumerate()
        .map(|(index, item)| match item {
            Value::Object(map) => named_build(&Snapshot::from(map), index + 1),
            _ => Err(MechError::InvalidSnapshot(format!(
                "set {} is not an object",
                index + 1
            ))),
        })
        .collect::<MechResult<_>>()?;

    tracing::debug!(sets = builds.len(), "parsed set file");
    Ok(builds)
}

fn literal(value: Value) -> Snapshot {
    match value {
        Value::Object(values) => Snapshot::from(values),
        _ => Snapshot::new(),
    }
}

/// The starter weapon set.
pub fn weapon_template() -> Snapshot {
    literal(json!({
        "type": "weapon",
        "weapon-dice": 7,
        "weapon-damage": "1d10+3",
        "bonus-base-damage": 125,
        "crit-threat": "15-20",
        "crit-multiplier": 4,
        "seeker-damage": "0",
        "crit-multiplier-19-20": 2,
        "miss-threshold": 1,
        "graze-threshold": 5,
        "graze-percent": 20,
        "doublestrike": 0,
        "is-doubleshot": false,
        "melee-power": 0,
        "spell-power": 0,
        "archers-focus": 0,
        "improved-archers-focus": false,
        "reaper-skulls": "0",
        "sneak-attack-dice": 0,
        "sneak-bonus": 0,
        "imbue-active": false,
        "imbue-dice-count": 0,
        "imbue-die-type": 6,
        "imbue-scaling": 100,
        "imbue-uses-spellpower": false,
        "imbue-crits": false,
    }))
}

/// The starter spell set.
pub fn spell_template() -> Snapshot {
    literal(json!({
        "type": "spell",
        "metamagic-empower": true,
        "metamagic-maximize": true,
        "metamagic-intensify": true,
        "boost-wellspring": false,
        "boost-night-horrors": false,
        "spell-name-1": "Spell 1",
        "spell-damage-1": "10d6",
        "spell-cl-scaling-1": "1d6",
        "caster-level-1": 20,
        "spell-hit-count-1": 1,
        "spell-power-type-1": "",
        "spell-power-1": 1000,
        "spell-crit-chance-1": 75,
        "spell-crit-damage-1": 205,
    }))
}

/// A set file holding the starter weapon and spell sets.
pub fn starter_sets_json() -> MechResult<String> {
    let sets: Vec<Value> = [
        weapon_template().with("tabName", "Weapon 1"),
        spell_template().with("tabName", "Spell 1"),
    ]
    .into_iter()
    .map(|s| Value::Object(s.into_map()))
    .collect();
    Ok(serde_json::to_string_pretty(&sets)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn number_coercion() {
        let s = Snapshot::new()
            .with("a", 12)
            .with("b", " 7.5 ")
            .with("c", "")
            .with("d", true)
            .with("e", "abc");
        assert_eq!(s.number("a"), Some(12.0));
        assert_eq!(s.number("b"), Some(7.5));
        assert_eq!(s.number("c"), None);
        assert_eq!(s.number("d"), None);
        assert_eq!(s.number("e"), None);
        assert_eq!(s.number("missing"), None);
        assert_eq!(s.count_or("b", 0), 7);
        assert_eq!(s.count_or("c", 3), 3);
    }

    #[test]
    fn flag_coercion() {
        let s = Snapshot::new()
            .with("a", true)
            .with("b", "on")
            .with("c", 1)
            .with("d", "false")
            .with("e", 0);
        assert!(s.flag("a"));
        assert!(s.flag("b"));
        assert!(s.flag("c"));
        assert!(!s.flag("d"));
        assert!(!s.flag("e"));
        assert!(!s.flag("missing"));
    }

    #[test]
    fn row_ids_sorted_numerically() {
        let s = Snapshot::new()
            .with("unscaled-damage-10", "1d6")
            .with("unscaled-damage-2", "1d4")
            .with("unscaled-damage-x", "1d8")
            .with("unscaled-proc-chance-2", 50);
        assert_eq!(s.row_ids(&["unscaled-damage-"]), vec![2, 10]);
    }

    #[test]
    fn weapon_template_maps_to_starter_build() {
        let input = weapon_input(&weapon_template());
        assert!((input.weapon_dice - 7.0).abs() < f64::EPSILON);
        assert_eq!(input.weapon_damage, "1d10+3");
        assert_eq!(input.crit_threat, "15-20");
        assert_eq!(input.graze_threshold, 5);
        assert_eq!(input.reaper_skulls, 0);
        assert_eq!(input.imbue.die_size, 6);
        assert_eq!(input.seeker_damage, "0");
    }

    #[test]
    fn weapon_blank_fields_use_defaults() {
        let s = Snapshot::new()
            .with("crit-multiplier", "")
            .with("miss-threshold", 0);
        let input = weapon_input(&s);
        assert!((input.crit_multiplier - 2.0).abs() < f64::EPSILON);
        assert_eq!(input.miss_threshold, 1);
        assert_eq!(input.crit_threat, "20");
    }

    #[test]
    fn huge_imbue_dice_count_stays_finite() {
        let s = Snapshot::new()
            .with("imbue-active", true)
            .with("imbue-dice-count", 1e12);
        let input = weapon_input(&s);
        assert_eq!(input.imbue.dice_count, u32::MAX);

        let result = crate::weapon::compute_weapon_damage(&input);
        assert!(result.total.is_finite());
        assert_eq!(result.portions.imbue_dice, u32::MAX);
    }

    #[test]
    fn weapon_rows() {
        let s = Snapshot::new()
            .with("unscaled-damage-1", "2d6")
            .with("unscaled-doublestrike-1", true)
            .with("unscaled-damage-2", "10")
            .with("unscaled-proc-chance-2", "25")
            .with("unscaled-on-crit-2", true)
            .with("scaled-dice-enabled-1", true)
            .with("scaled-dice-base-1", "3d6")
            .with("scaled-dice-scaling-toggle-1", true)
            .with("scaled-dice-base-2", "1d4");
        let input = weapon_input(&s);
        assert_eq!(input.unscaled.len(), 2);
        assert!(input.unscaled[0].multi_strike);
        assert!((input.unscaled[0].proc_chance - 100.0).abs() < f64::EPSILON);
        assert!((input.unscaled[1].proc_chance - 25.0).abs() < f64::EPSILON);
        assert!(input.unscaled[1].on_crit_only);

        assert_eq!(input.scaled_dice.len(), 2);
        assert!(input.scaled_dice[0].enabled);
        assert!(input.scaled_dice[0].imbue_scaling);
        assert!(!input.scaled_dice[1].enabled);
    }

    #[test]
    fn spell_template_maps_to_starter_build() {
        let input = spell_input(&spell_template());
        assert!(input.metamagic.empower && input.metamagic.intensify && input.metamagic.maximize);
        assert_eq!(input.profiles.len(), 1);
        let profile = &input.profiles[0];
        assert_eq!(profile.id, 1);
        assert!((profile.crit_chance - 0.75).abs() < 1e-12);
        assert!((profile.crit_damage - 2.05).abs() < 1e-12);
        assert_eq!(input.sources.len(), 1);
        assert_eq!(input.sources[0].name, "Spell 1");
        assert_eq!(input.sources[0].caster_level, 20);
    }

    #[test]
    fn spell_rows_and_scalings() {
        let s = Snapshot::new()
            .with("spell-power-type-2", "Cold")
            .with("spell-power-2", 300)
            .with("spell-power-type-1", "Fire")
            .with("spell-name-1", "")
            .with("spell-damage-1", "5d6")
            .with("additional-scaling-base-1-3", "2d6")
            .with("additional-scaling-cl-1-3", "1d4")
            .with("additional-scaling-sp-select-1-3", "2")
            .with("additional-scaling-base-1-1", "6");
        let input = spell_input(&s);
        let ids: Vec<u32> = input.profiles.iter().map(|p| p.id).collect();
        assert_eq!(ids, vec![1, 2]);
        assert_eq!(input.profiles[1].element, "Cold");

        let source = &input.sources[0];
        assert_eq!(source.name, "Source 1");
        assert_eq!(source.hit_count, 1);
        assert_eq!(source.scalings.len(), 2);
        assert_eq!(source.scalings[0].id, 1);
        assert_eq!(source.scalings[0].profile_id, 1);
        assert_eq!(source.scalings[1].profile_id, 2);
        assert_eq!(source.scalings[1].per_level, "1d4");
    }

    #[test]
    fn parse_sets_names_and_types() {
        let json = r#"[
            {"type": "weapon", "tabName": "Axe", "weapon-dice": 2},
            {"type": "spell"},
            {}
        ]"#;
        let builds = parse_sets(json).unwrap();
        assert_eq!(builds.len(), 3);
        assert_eq!(builds[0].name, "Axe");
        assert_eq!(builds[1].name, "Set 2");
        assert_eq!(builds[1].build.kind(), "spell");
        assert_eq!(builds[2].build.kind(), "weapon");
    }

    #[test]
    fn parse_sets_errors() {
        assert!(matches!(
            parse_sets(r#"[{"type": "bard"}]"#),
            Err(MechError::UnknownBuildType(t)) if t == "bard"
        ));
        assert!(matches!(
            parse_sets("[1]"),
            Err(MechError::InvalidSnapshot(_))
        ));
        assert!(matches!(parse_sets("42"), Err(MechError::InvalidSnapshot(_))));
        assert!(matches!(parse_sets("[{"), Err(MechError::Json(_))));
    }

    #[test]
    fn starter_file_round_trips() {
        let json = starter_sets_json().unwrap();
        let builds = parse_sets(&json).unwrap();
        assert_eq!(builds.len(), 2);
        assert_eq!(builds[0].name, "Weapon 1");
        assert_eq!(builds[1].name, "Spell 1");
    }
}
