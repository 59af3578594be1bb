//! Raw damage portions, before outcome probabilities are applied.

use serde::{Deserialize, Serialize};

use crate::config::RulesConfig;
use crate::dice::{self, DiceExpr};

use super::input::{ScaledDiceSource, UnscaledSource, WeaponInput};

/// Unscaled damage accumulated by trigger and multi-strike behaviour.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct UnscaledBuckets {
    /// On any hit, repeats on multi-strike.
    pub normal_multi: f64,
    /// On any hit, does not repeat.
    pub normal_single: f64,
    /// On critical hits only, repeats on multi-strike.
    pub crit_multi: f64,
    /// On critical hits only, does not repeat.
    pub crit_single: f64,
}

impl UnscaledBuckets {
    /// Add one source's expected damage to its bucket.
    pub fn add(&mut self, source: &UnscaledSource) {
        let damage = dice::evaluate(&source.dice) * source.proc_chance / 100.0;
        let bucket = match (source.on_crit_only, source.multi_strike) {
            (false, true) => &mut self.normal_multi,
            (false, false) => &mut self.normal_single,
            (true, true) => &mut self.crit_multi,
            (true, false) => &mut self.crit_single,
        };
        *bucket += damage;
    }

    /// Damage that repeats on multi-strike, across both triggers.
    pub fn with_multi_strike(&self) -> f64 {
        self.normal_multi + self.crit_multi
    }

    /// Damage that never repeats, across both triggers.
    pub fn without_multi_strike(&self) -> f64 {
        self.normal_single + self.crit_single
    }
}

/// The contribution of one scaled-dice source.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScaledDiceLine {
    /// Row id of the source.
    pub id: u32,
    /// Expected value of the base dice.
    pub base_average: f64,
    /// Bonus dice granted by imbue dice.
    pub added_dice: u32,
    /// Expected value of the bonus dice.
    pub added_average: f64,
    /// `1 + power * scaling / 100`.
    pub power_multiplier: f64,
    /// Proc chance as a fraction.
    pub proc_chance: f64,
    /// Expected damage of the source on a hit.
    pub damage: f64,
}

/// Damage of each component on a regular hit, before probabilities.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DamagePortions {
    /// Melee/ranged power including archer's focus.
    pub melee_power: f64,
    /// Archer's focus stacks after the cap.
    pub archers_focus: u32,
    /// `1 + melee_power / 100`.
    pub power_multiplier: f64,
    /// `[W]` dice average times weapon dice, plus bonus damage.
    pub weapon_base: f64,
    /// Weapon damage after power.
    pub weapon: f64,
    /// Seeker damage after power.
    pub seeker: f64,
    /// Expected sneak attack dice before power.
    pub sneak_dice: f64,
    /// Sneak attack damage after power.
    pub sneak: f64,
    /// Imbue dice rolled (including the toggle die).
    pub imbue_dice: u32,
    /// Expected value of the imbue dice before power.
    pub imbue_dice_average: f64,
    /// Power stat feeding imbue.
    pub imbue_power: f64,
    /// Imbue damage after power.
    pub imbue: f64,
    /// Unscaled damage buckets.
    pub unscaled: UnscaledBuckets,
    /// Per-source scaled dice contributions.
    pub scaled_dice_lines: Vec<ScaledDiceLine>,
    /// Sum of scaled dice contributions.
    pub scaled_dice: f64,
}

/// Melee/ranged power with archer's focus added.
pub fn effective_melee_power(input: &WeaponInput, rules: &RulesConfig) -> (f64, u32) {
    let stacks = input
        .archers_focus
        .min(rules.focus_cap(input.improved_archers_focus));
    (
        input.melee_power + f64::from(stacks) * rules.archers_focus_power,
        stacks,
    )
}

fn scaled_dice_line(
    source: &ScaledDiceSource,
    melee_power: f64,
    imbue_dice_count: u32,
    rules: &RulesConfig,
) -> ScaledDiceLine {
    let base_average = dice::evaluate(&source.dice);

    let added_dice = if source.imbue_scaling {
        (imbue_dice_count / rules.scaled_dice_imbue_threshold.max(1))
            .saturating_mul(rules.scaled_dice_per_threshold)
    } else {
        0
    };
    // Bonus dice match the face count of the base dice.
    let added_average = DiceExpr::parse(&source.dice)
        .map_or(0.0, |expr| f64::from(added_dice) * expr.die.average());

    let power_multiplier = 1.0 + melee_power * (source.scaling_percent / 100.0) / 100.0;
    let proc_chance = source.proc_chance / 100.0;

    ScaledDiceLine {
        id: source.id,
        base_average,
        added_dice,
        added_average,
        power_multiplier,
        proc_chance,
        damage: (base_average + added_average) * power_multiplier * proc_chance,
    }
}

/// Compute every damage portion for a weapon build.
pub fn compute_portions(input: &WeaponInput, rules: &RulesConfig) -> DamagePortions {
    let (melee_power, archers_focus) = effective_melee_power(input, rules);
    let power_multiplier = 1.0 + melee_power / 100.0;

    let weapon_base = dice::evaluate(&input.weapon_damage) * input.weapon_dice + input.bonus_damage;
    let weapon = weapon_base * power_multiplier;
    let seeker = dice::evaluate(&input.seeker_damage) * power_multiplier;

    let sneak_dice = f64::from(input.sneak_dice) * rules.sneak_die.average();
    let sneak = (sneak_dice + input.sneak_bonus)
        * (1.0 + rules.sneak_power_rate * melee_power / 100.0);

    let imbue = &input.imbue;
    let imbue_dice = if imbue.active {
        imbue.dice_count.saturating_add(1)
    } else {
        0
    };
    let imbue_dice_average = f64::from(imbue_dice) * (f64::from(imbue.die_size) + 1.0) / 2.0;
    let imbue_power = if imbue.uses_spell_power {
        input.spell_power
    } else {
        melee_power
    };
    let imbue_damage =
        imbue_dice_average * (1.0 + imbue_power * (imbue.scaling_percent / 100.0) / 100.0);

    let mut unscaled = UnscaledBuckets::default();
    for source in &input.unscaled {
        unscaled.add(source);
    }

    let scaled_dice_lines: Vec<ScaledDiceLine> = input
        .scaled_dice
        .iter()
        .filter(|source| source.enabled)
        .map(|source| scaled_dice_line(source, melee_power, imbue.dice_count, rules))
        .collect();
    let scaled_dice = scaled_dice_lines.iter().map(|line| line.damage).sum();

    DamagePortions {
        melee_power,
        archers_focus,
        power_multiplier,
        weapon_base,
        weapon,
        seeker,
        sneak_dice,
        sneak,
        imbue_dice,
        imbue_dice_average,
        imbue_power,
        imbue: imbue_damage,
        unscaled,
        scaled_dice_lines,
        scaled_dice,
    }
}
