//! Typed weapon build inputs.

use serde::{Deserialize, Serialize};

/// Bonus weapon dice that may scale with a power stat.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Imbue {
    /// Whether imbue is toggled on. An active imbue rolls one extra die.
    pub active: bool,
    /// Imbue dice from gear and enhancements.
    pub dice_count: u32,
    /// Faces on each imbue die.
    pub die_size: u32,
    /// Share of the power stat applied, in percent.
    pub scaling_percent: f64,
    /// Scale with spell power instead of melee/ranged power.
    pub uses_spell_power: bool,
    /// Imbue damage is applied a second time on critical hits.
    pub crits: bool,
}

impl Default for Imbue {
    fn default() -> Self {
        Self {
            active: false,
            dice_count: 0,
            die_size: 6,
            scaling_percent: 100.0,
            uses_spell_power: false,
            crits: false,
        }
    }
}

/// Flat-rolling damage that ignores power.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct UnscaledSource {
    /// Stable row id.
    pub id: u32,
    /// Damage dice expression.
    pub dice: String,
    /// Proc chance in percent.
    pub proc_chance: f64,
    /// Whether the damage repeats on multi-strike.
    pub multi_strike: bool,
    /// Whether the damage only triggers on critical hits.
    pub on_crit_only: bool,
}

impl Default for UnscaledSource {
    fn default() -> Self {
        Self {
            id: 0,
            dice: String::new(),
            proc_chance: 100.0,
            multi_strike: false,
            on_crit_only: false,
        }
    }
}

/// Dice damage that scales with melee/ranged power.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScaledDiceSource {
    /// Stable row id.
    pub id: u32,
    /// Whether this source is counted.
    pub enabled: bool,
    /// Base dice expression.
    pub dice: String,
    /// Proc chance in percent.
    pub proc_chance: f64,
    /// Share of melee/ranged power applied, in percent.
    pub scaling_percent: f64,
    /// Gains bonus dice from imbue dice count.
    pub imbue_scaling: bool,
}

impl Default for ScaledDiceSource {
    fn default() -> Self {
        Self {
            id: 0,
            enabled: true,
            dice: String::new(),
            proc_chance: 100.0,
            scaling_percent: 100.0,
            imbue_scaling: false,
        }
    }
}

/// Everything needed to compute expected weapon damage.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WeaponInput {
    /// Weapon dice multiplier `[W]`.
    pub weapon_dice: f64,
    /// Damage expression of one `[W]`.
    pub weapon_damage: String,
    /// Flat bonus added after weapon dice.
    pub bonus_damage: f64,
    /// Melee/ranged power.
    pub melee_power: f64,
    /// Archer's focus stacks.
    pub archers_focus: u32,
    /// Improved archer's focus raises the stack cap.
    pub improved_archers_focus: bool,
    /// Spell power, used by imbue when configured.
    pub spell_power: f64,
    /// Critical threat specification, e.g. `"15-20"`.
    pub crit_threat: String,
    /// Critical multiplier.
    pub crit_multiplier: f64,
    /// Extra multiplier on natural 19-20 criticals.
    pub crit_multiplier_19_20: f64,
    /// Seeker damage expression, multiplied on criticals only.
    pub seeker_damage: String,
    /// Sneak attack dice (d6).
    pub sneak_dice: u32,
    /// Flat sneak attack bonus.
    pub sneak_bonus: f64,
    /// Rolls at or below this miss.
    pub miss_threshold: u32,
    /// Rolls at or below this graze.
    pub graze_threshold: u32,
    /// Graze damage in percent of weapon damage.
    pub graze_percent: f64,
    /// Multi-strike chance in percent.
    pub multi_strike: f64,
    /// Doubleshot lifts the multi-strike cap.
    pub doubleshot: bool,
    /// Reaper difficulty skulls.
    pub reaper_skulls: u32,
    /// Imbue dice configuration.
    pub imbue: Imbue,
    /// Unscaled damage sources in row order.
    pub unscaled: Vec<UnscaledSource>,
    /// Scaled dice sources in row order.
    pub scaled_dice: Vec<ScaledDiceSource>,
}

impl Default for WeaponInput {
    fn default() -> Self {
        Self {
            weapon_dice: 0.0,
            weapon_damage: String::new(),
            bonus_damage: 0.0,
            melee_power: 0.0,
            archers_focus: 0,
            improved_archers_focus: false,
            spell_power: 0.0,
            crit_threat: "20".to_string(),
            crit_multiplier: 2.0,
            crit_multiplier_19_20: 0.0,
            seeker_damage: String::new(),
            sneak_dice: 0,
            sneak_bonus: 0.0,
            miss_threshold: 1,
            graze_threshold: 0,
            graze_percent: 0.0,
            multi_strike: 0.0,
            doubleshot: false,
            reaper_skulls: 0,
            imbue: Imbue::default(),
            unscaled: Vec::new(),
            scaled_dice: Vec::new(),
        }
    }
}
