//! Per-roll damage breakdown for all twenty faces of the attack die.

use serde::{Deserialize, Serialize};

use crate::probability::{AttackThresholds, D20_FACES, Outcome};
use crate::scaling::{CategoryDamage, DamageScaling, RawCategoryDamage};

use super::input::WeaponInput;
use super::portion::DamagePortions;

/// Critical and graze multipliers of a weapon build.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CritProfile {
    /// Multiplier on a regular critical.
    pub multiplier: f64,
    /// Multiplier on a 19-20 critical (regular plus the 19-20 bonus).
    pub special_multiplier: f64,
    /// Share of weapon damage dealt on a graze.
    pub graze_fraction: f64,
    /// Imbue damage applies again on criticals.
    pub imbue_crits: bool,
}

impl CritProfile {
    /// Read the critical profile of a weapon build.
    pub fn from_input(input: &WeaponInput) -> Self {
        Self {
            multiplier: input.crit_multiplier,
            special_multiplier: input.crit_multiplier + input.crit_multiplier_19_20,
            graze_fraction: input.graze_percent / 100.0,
            imbue_crits: input.imbue.crits,
        }
    }
}

/// Raw damage dealt when an attack lands with the given outcome.
pub fn raw_damage_for(
    outcome: Outcome,
    portions: &DamagePortions,
    crit: &CritProfile,
) -> RawCategoryDamage {
    let unscaled = &portions.unscaled;
    let imbue_on_crit = if crit.imbue_crits {
        portions.imbue * 2.0
    } else {
        portions.imbue
    };

    match outcome {
        Outcome::Miss => RawCategoryDamage::default(),
        Outcome::Graze => RawCategoryDamage {
            base: portions.weapon * crit.graze_fraction,
            sneak: portions.sneak,
            ..RawCategoryDamage::default()
        },
        Outcome::Hit => RawCategoryDamage {
            base: portions.weapon,
            sneak: portions.sneak,
            imbue: portions.imbue,
            unscaled_multi: unscaled.normal_multi,
            unscaled_single: unscaled.normal_single,
            scaled_dice: portions.scaled_dice,
        },
        Outcome::Critical | Outcome::SpecialCritical => {
            let multiplier = if outcome == Outcome::SpecialCritical {
                crit.special_multiplier
            } else {
                crit.multiplier
            };
            RawCategoryDamage {
                base: (portions.weapon + portions.seeker) * multiplier,
                sneak: portions.sneak,
                imbue: imbue_on_crit,
                unscaled_multi: unscaled.normal_multi + unscaled.crit_multi,
                unscaled_single: unscaled.normal_single + unscaled.crit_single,
                scaled_dice: portions.scaled_dice,
            }
        }
    }
}

/// Damage for one face of the attack die.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RollRow {
    /// The natural roll (1-20).
    pub roll: u32,
    /// How the roll was classified.
    pub outcome: Outcome,
    /// Scaled damage per category.
    pub damage: CategoryDamage,
}

impl RollRow {
    /// Total damage of the row.
    pub fn total(&self) -> f64 {
        self.damage.total()
    }
}

/// The twenty-row breakdown.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RollTable {
    /// One row per face, in roll order.
    pub rows: Vec<RollRow>,
}

impl RollTable {
    /// Build the table for a set of thresholds and portions.
    pub fn build(
        thresholds: &AttackThresholds,
        portions: &DamagePortions,
        crit: &CritProfile,
        scaling: &DamageScaling,
    ) -> Self {
        let rows = thresholds
            .faces()
            .map(|(roll, outcome)| RollRow {
                roll,
                outcome,
                damage: scaling.apply(&raw_damage_for(outcome, portions, crit)),
            })
            .collect();
        Self { rows }
    }

    /// Mean damage per category over all faces.
    pub fn mean(&self) -> CategoryDamage {
        let mut sum = CategoryDamage::default();
        for row in &self.rows {
            sum.base += row.damage.base;
            sum.sneak += row.damage.sneak;
            sum.imbue += row.damage.imbue;
            sum.unscaled += row.damage.unscaled;
            sum.scaled_dice += row.damage.scaled_dice;
        }
        let faces = f64::from(D20_FACES);
        CategoryDamage {
            base: sum.base / faces,
            sneak: sum.sneak / faces,
            imbue: sum.imbue / faces,
            unscaled: sum.unscaled / faces,
            scaled_dice: sum.scaled_dice / faces,
        }
    }

    /// Mean of the total column.
    pub fn mean_total(&self) -> f64 {
        self.rows.iter().map(RollRow::total).sum::<f64>() / f64::from(D20_FACES)
    }

    /// The row for a natural roll.
    pub fn row(&self, roll: u32) -> Option<&RollRow> {
        self.rows.iter().find(|row| row.roll == roll)
    }
}
