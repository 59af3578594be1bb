//! Expected weapon damage per attack round.
//!
//! The computation runs in fixed stages:
//! 1. **Portions**: damage of each component on a regular hit.
//! 2. **Probabilities**: the d20 outcome distribution.
//! 3. **Averages**: portions weighted by outcome, then scaled once by
//!    multi-strike and the reaper penalty.
//! 4. **Table**: the same rules applied face by face.
//!
//! The mean of the table's total column equals the grand total.

pub mod input;
pub mod portion;
pub mod table;

pub use input::{Imbue, ScaledDiceSource, UnscaledSource, WeaponInput};
pub use portion::{DamagePortions, ScaledDiceLine, UnscaledBuckets, compute_portions};
pub use table::{CritProfile, RollRow, RollTable};

use serde::{Deserialize, Serialize};

use crate::config::RulesConfig;
use crate::dice;
use crate::probability::{AttackThresholds, OutcomeProbabilities, distribution_for};
use crate::scaling::{CategoryDamage, DamageScaling, MultiStrike, RawCategoryDamage};

/// The result of a weapon damage computation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeaponDamage {
    /// Damage portions on a regular hit.
    pub portions: DamagePortions,
    /// Size of the critical threat range.
    pub threat_size: u32,
    /// Miss, graze and crit boundaries.
    pub thresholds: AttackThresholds,
    /// Outcome probabilities.
    pub probabilities: OutcomeProbabilities,
    /// Critical and graze multipliers.
    pub crit: CritProfile,
    /// Effective multi-strike.
    pub multi_strike: MultiStrike,
    /// Multi-strike and reaper multipliers.
    pub scaling: DamageScaling,
    /// Expected damage per category.
    pub averages: CategoryDamage,
    /// Expected total damage.
    pub total: f64,
    /// Damage on each face of the d20.
    pub table: RollTable,
}

/// Outcome-weighted raw damage, before multi-strike and reaper.
pub fn average_raw(
    portions: &DamagePortions,
    probabilities: &OutcomeProbabilities,
    crit: &CritProfile,
) -> RawCategoryDamage {
    let p = probabilities;
    let hit = p.hit();
    let crit_chance = p.crit();
    let crit_weapon = portions.weapon + portions.seeker;
    let unscaled = &portions.unscaled;

    let imbue_chance = if crit.imbue_crits {
        hit + crit_chance
    } else {
        hit
    };

    RawCategoryDamage {
        base: crit_weapon * crit.special_multiplier * p.special_crit
            + crit_weapon * crit.multiplier * p.normal_crit
            + portions.weapon * p.normal
            + portions.weapon * crit.graze_fraction * p.graze,
        sneak: portions.sneak * (1.0 - p.miss),
        imbue: portions.imbue * imbue_chance,
        unscaled_multi: unscaled.normal_multi * hit + unscaled.crit_multi * crit_chance,
        unscaled_single: unscaled.normal_single * hit + unscaled.crit_single * crit_chance,
        scaled_dice: portions.scaled_dice * hit,
    }
}

/// Compute expected weapon damage with the standard rules.
pub fn compute_weapon_damage(input: &WeaponInput) -> WeaponDamage {
    compute_weapon_damage_with(input, &RulesConfig::default())
}

/// Compute expected weapon damage with custom rule constants.
pub fn compute_weapon_damage_with(input: &WeaponInput, rules: &RulesConfig) -> WeaponDamage {
    let portions = compute_portions(input, rules);
    tracing::debug!(
        weapon = portions.weapon,
        seeker = portions.seeker,
        sneak = portions.sneak,
        imbue = portions.imbue,
        scaled_dice = portions.scaled_dice,
        melee_power = portions.melee_power,
        "weapon portions"
    );

    let threat_size = dice::range_size(&input.crit_threat);
    let thresholds = AttackThresholds::new(input.miss_threshold, input.graze_threshold, threat_size);
    let probabilities = distribution_for(&thresholds);
    tracing::debug!(
        miss = probabilities.miss,
        graze = probabilities.graze,
        normal = probabilities.normal,
        normal_crit = probabilities.normal_crit,
        special_crit = probabilities.special_crit,
        "outcome probabilities"
    );

    let crit = CritProfile::from_input(input);
    let multi_strike = MultiStrike::new(input.multi_strike, input.doubleshot, rules.multi_strike_cap);
    let skulls = input.reaper_skulls.min(rules.max_reaper_skulls);
    let scaling = DamageScaling::new(multi_strike, skulls);

    let averages = scaling.apply(&average_raw(&portions, &probabilities, &crit));
    let total = averages.total();
    tracing::debug!(
        base = averages.base,
        sneak = averages.sneak,
        imbue = averages.imbue,
        unscaled = averages.unscaled,
        scaled_dice = averages.scaled_dice,
        multi_strike = scaling.multi_strike,
        reaper = scaling.reaper,
        total,
        "weapon averages"
    );

    let table = RollTable::build(&thresholds, &portions, &crit, &scaling);

    WeaponDamage {
        portions,
        threat_size,
        thresholds,
        probabilities,
        crit,
        multi_strike,
        scaling,
        averages,
        total,
        table,
    }
}
