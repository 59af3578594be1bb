//! Game constants used by the weapon and spell engines.

use serde::{Deserialize, Serialize};

use crate::dice::Die;

/// Tunable rule constants. `Default` carries the standard values.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RulesConfig {
    /// Melee/ranged power granted per archer's focus stack.
    pub archers_focus_power: f64,
    /// Maximum archer's focus stacks.
    pub archers_focus_cap: u32,
    /// Maximum archer's focus stacks with the improved version.
    pub improved_archers_focus_cap: u32,
    /// Die rolled for each sneak attack die.
    pub sneak_die: Die,
    /// Sneak attack scales with power at this multiple of the normal rate.
    pub sneak_power_rate: f64,
    /// Imbue dice needed to grant scaled-dice sources a bonus step.
    pub scaled_dice_imbue_threshold: u32,
    /// Bonus dice a scaled-dice source gains per threshold step.
    pub scaled_dice_per_threshold: u32,
    /// Multi-strike cap in percent, lifted by doubleshot.
    pub multi_strike_cap: f64,
    /// Highest reaper skull count.
    pub max_reaper_skulls: u32,
    /// Spell power from Empower.
    pub empower_power: f64,
    /// Spell power from Intensify.
    pub intensify_power: f64,
    /// Spell power from Maximize.
    pub maximize_power: f64,
    /// Spell power from Wellspring of Power.
    pub wellspring_power: f64,
    /// Crit damage fraction from Wellspring of Power.
    pub wellspring_crit_damage: f64,
    /// Crit damage fraction from Night Horrors.
    pub night_horrors_crit_damage: f64,
    /// Spell crit multiplier before any crit damage bonus.
    pub spell_base_crit_multiplier: f64,
}

impl Default for RulesConfig {
    fn default() -> Self {
        Self {
            archers_focus_power: 5.0,
            archers_focus_cap: 15,
            improved_archers_focus_cap: 25,
            sneak_die: Die::D6,
            sneak_power_rate: 1.5,
            scaled_dice_imbue_threshold: 7,
            scaled_dice_per_threshold: 1,
            multi_strike_cap: 100.0,
            max_reaper_skulls: 10,
            empower_power: 75.0,
            intensify_power: 75.0,
            maximize_power: 150.0,
            wellspring_power: 150.0,
            wellspring_crit_damage: 0.20,
            night_horrors_crit_damage: 0.25,
            spell_base_crit_multiplier: 2.0,
        }
    }
}

impl RulesConfig {
    /// Set the archer's focus caps (normal, improved).
    pub fn with_archers_focus_caps(mut self, cap: u32, improved_cap: u32) -> Self {
        self.archers_focus_cap = cap;
        self.improved_archers_focus_cap = improved_cap;
        self
    }

    /// Set the imbue-dice threshold and bonus dice for scaled-dice sources.
    ///
    /// A threshold of zero is raised to one.
    pub fn with_scaled_dice_step(mut self, threshold: u32, dice_per_step: u32) -> Self {
        self.scaled_dice_imbue_threshold = threshold.max(1);
        self.scaled_dice_per_threshold = dice_per_step;
        self
    }

    /// Set the multi-strike cap in percent.
    pub fn with_multi_strike_cap(mut self, cap: f64) -> Self {
        self.multi_strike_cap = cap;
        self
    }

    /// Set the spell crit multiplier before bonuses.
    pub fn with_spell_base_crit_multiplier(mut self, multiplier: f64) -> Self {
        self.spell_base_crit_multiplier = multiplier;
        self
    }

    /// Archer's focus cap for the given variant.
    pub fn focus_cap(&self, improved: bool) -> u32 {
        if improved {
            self.improved_archers_focus_cap
        } else {
            self.archers_focus_cap
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_values() {
        let rules = RulesConfig::default();
        assert_eq!(rules.archers_focus_cap, 15);
        assert_eq!(rules.improved_archers_focus_cap, 25);
        assert_eq!(rules.sneak_die, Die::D6);
        assert_eq!(rules.scaled_dice_imbue_threshold, 7);
        assert_eq!(rules.scaled_dice_per_threshold, 1);
        assert_eq!(rules.max_reaper_skulls, 10);
        assert!((rules.multi_strike_cap - 100.0).abs() < f64::EPSILON);
        assert!((rules.spell_base_crit_multiplier - 2.0).abs() < f64::EPSILON);
    }

    #[test]
    fn builder_chain() {
        let rules = RulesConfig::default()
            .with_archers_focus_caps(10, 20)
            .with_scaled_dice_step(5, 2)
            .with_multi_strike_cap(50.0);
        assert_eq!(rules.focus_cap(false), 10);
        assert_eq!(rules.focus_cap(true), 20);
        assert_eq!(rules.scaled_dice_imbue_threshold, 5);
        assert_eq!(rules.scaled_dice_per_threshold, 2);
        assert!((rules.multi_strike_cap - 50.0).abs() < f64::EPSILON);
    }

    #[test]
    fn zero_threshold_raised() {
        let rules = RulesConfig::default().with_scaled_dice_step(0, 1);
        assert_eq!(rules.scaled_dice_imbue_threshold, 1);
    }
}
