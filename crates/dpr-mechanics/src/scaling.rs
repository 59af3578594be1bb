//! Multi-strike and reaper scaling.
//!
//! Category damage is carried in two forms. [`RawCategoryDamage`] is what the
//! portion and probability stages produce. [`CategoryDamage`] is final damage
//! and can only be obtained through [`DamageScaling::apply`], which applies
//! multi-strike and the reaper penalty exactly once.

use serde::{Deserialize, Serialize};

/// Reaper damage multiplier for a skull count.
///
/// One to six skulls use `20 / (s² + s + 24)`, seven and above use
/// `5 / (4s - 8)`. Both forms give 0.25 at seven skulls.
pub fn reaper_multiplier(skulls: u32) -> f64 {
    match skulls {
        0 => 1.0,
        1..=6 => reaper_low(skulls),
        _ => reaper_high(skulls),
    }
}

fn reaper_low(skulls: u32) -> f64 {
    let s = f64::from(skulls);
    20.0 / (s * s + s + 24.0)
}

fn reaper_high(skulls: u32) -> f64 {
    let s = f64::from(skulls);
    5.0 / (4.0 * s - 8.0)
}

/// Chance for an attack to strike again, as a multiplier.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MultiStrike {
    /// Effective rate as a fraction (1.0 = 100%).
    pub rate: f64,
}

impl MultiStrike {
    /// Build from a percentage. The rate is capped at `cap` percent unless
    /// doubleshot is set.
    pub fn new(percent: f64, doubleshot: bool, cap: f64) -> Self {
        let percent = if doubleshot { percent } else { percent.min(cap) };
        Self {
            rate: percent / 100.0,
        }
    }

    /// `1 + rate`.
    pub fn multiplier(&self) -> f64 {
        1.0 + self.rate
    }
}

/// Per-category damage before multi-strike and reaper scaling.
///
/// Unscaled damage is split by whether multi-strike applies to it.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct RawCategoryDamage {
    /// Weapon and seeker damage.
    pub base: f64,
    /// Sneak attack damage.
    pub sneak: f64,
    /// Imbue dice damage.
    pub imbue: f64,
    /// Unscaled damage that repeats on multi-strike.
    pub unscaled_multi: f64,
    /// Unscaled damage that does not repeat.
    pub unscaled_single: f64,
    /// Power-scaled dice damage.
    pub scaled_dice: f64,
}

/// Final per-category damage.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct CategoryDamage {
    /// Weapon and seeker damage.
    pub base: f64,
    /// Sneak attack damage.
    pub sneak: f64,
    /// Imbue dice damage.
    pub imbue: f64,
    /// Unscaled damage.
    pub unscaled: f64,
    /// Power-scaled dice damage.
    pub scaled_dice: f64,
}

impl CategoryDamage {
    /// Sum of all five categories.
    pub fn total(&self) -> f64 {
        self.base + self.sneak + self.imbue + self.unscaled + self.scaled_dice
    }
}

/// The final multipliers applied to every damage category.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DamageScaling {
    /// Multi-strike multiplier (`1 + rate`).
    pub multi_strike: f64,
    /// Reaper multiplier.
    pub reaper: f64,
}

impl DamageScaling {
    /// Scaling for a multi-strike setting and skull count.
    pub fn new(multi_strike: MultiStrike, reaper_skulls: u32) -> Self {
        Self {
            multi_strike: multi_strike.multiplier(),
            reaper: reaper_multiplier(reaper_skulls),
        }
    }

    /// Apply multi-strike and reaper to raw damage.
    pub fn apply(&self, raw: &RawCategoryDamage) -> CategoryDamage {
        let both = self.multi_strike * self.reaper;
        CategoryDamage {
            base: raw.base * both,
            sneak: raw.sneak * both,
            imbue: raw.imbue * both,
            unscaled: (raw.unscaled_multi * self.multi_strike + raw.unscaled_single) * self.reaper,
            scaled_dice: raw.scaled_dice * both,
        }
    }

    /// Fraction of damage removed by the reaper penalty, in percent.
    pub fn reaper_reduction_percent(&self) -> f64 {
        (1.0 - self.reaper) * 100.0
    }
}

impl Default for DamageScaling {
    fn default() -> Self {
        Self {
            multi_strike: 1.0,
            reaper: 1.0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reaper_known_values() {
        assert!((reaper_multiplier(0) - 1.0).abs() < 1e-12);
        assert!((reaper_multiplier(1) - 20.0 / 26.0).abs() < 1e-12);
        assert!((reaper_multiplier(6) - 20.0 / 66.0).abs() < 1e-12);
        assert!((reaper_multiplier(7) - 0.25).abs() < 1e-12);
        assert!((reaper_multiplier(10) - 5.0 / 32.0).abs() < 1e-12);
    }

    #[test]
    fn reaper_strictly_decreasing() {
        for skulls in 0..10 {
            assert!(
                reaper_multiplier(skulls + 1) < reaper_multiplier(skulls),
                "not decreasing at {skulls}"
            );
        }
    }

    #[test]
    fn reaper_formulas_meet_at_seven() {
        assert!((reaper_low(7) - reaper_high(7)).abs() < 1e-12);
        assert!((reaper_multiplier(7) - reaper_low(7)).abs() < 1e-12);
    }

    #[test]
    fn multi_strike_capped_without_doubleshot() {
        assert!((MultiStrike::new(150.0, false, 100.0).multiplier() - 2.0).abs() < 1e-12);
        assert!((MultiStrike::new(150.0, true, 100.0).multiplier() - 2.5).abs() < 1e-12);
        assert!((MultiStrike::new(25.0, false, 100.0).multiplier() - 1.25).abs() < 1e-12);
    }

    #[test]
    fn apply_scales_each_category_once() {
        let scaling = DamageScaling {
            multi_strike: 1.5,
            reaper: 0.5,
        };
        let raw = RawCategoryDamage {
            base: 100.0,
            sneak: 10.0,
            imbue: 20.0,
            unscaled_multi: 8.0,
            unscaled_single: 4.0,
            scaled_dice: 40.0,
        };
        let out = scaling.apply(&raw);
        assert!((out.base - 75.0).abs() < 1e-12);
        assert!((out.sneak - 7.5).abs() < 1e-12);
        assert!((out.imbue - 15.0).abs() < 1e-12);
        assert!((out.unscaled - 8.0).abs() < 1e-12);
        assert!((out.scaled_dice - 30.0).abs() < 1e-12);
        assert!((out.total() - 135.5).abs() < 1e-12);
    }

    #[test]
    fn reduction_percent() {
        let scaling = DamageScaling::new(MultiStrike::new(0.0, false, 100.0), 7);
        assert!((scaling.reaper_reduction_percent() - 75.0).abs() < 1e-9);
    }
}
