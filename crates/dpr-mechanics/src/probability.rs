//! The d20 outcome model.
//!
//! Every face of the attack die is classified into exactly one outcome.
//! Classification checks, in order: miss, graze, 19-20 critical, critical,
//! normal hit. The first match wins, so overlapping thresholds resolve in
//! favour of the earlier outcome.

use serde::{Deserialize, Serialize};

/// Number of faces on the attack die.
pub const D20_FACES: u32 = 20;

/// The outcome of a single attack roll.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Outcome {
    /// No damage at all.
    Miss,
    /// A partial hit dealing a fraction of weapon damage.
    Graze,
    /// A regular hit.
    Hit,
    /// A critical hit outside the 19-20 band.
    Critical,
    /// A critical hit on a natural 19 or 20, which adds the 19-20 multiplier.
    SpecialCritical,
}

impl Outcome {
    /// True for both kinds of critical hit.
    pub fn is_critical(self) -> bool {
        matches!(self, Self::Critical | Self::SpecialCritical)
    }

    /// True for regular and critical hits. Grazes are not hits.
    pub fn is_hit(self) -> bool {
        matches!(self, Self::Hit | Self::Critical | Self::SpecialCritical)
    }
}

impl std::fmt::Display for Outcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Miss => write!(f, "Miss"),
            Self::Graze => write!(f, "Graze"),
            Self::Hit => write!(f, "Hit"),
            Self::Critical | Self::SpecialCritical => write!(f, "Critical"),
        }
    }
}

/// Miss, graze and critical boundaries on the d20.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttackThresholds {
    /// Rolls at or below this miss. Never below 1: a natural 1 always misses.
    pub miss: u32,
    /// Rolls at or below this (and above `miss`) graze.
    pub graze: u32,
    /// First roll of the critical threat range.
    pub crit_start: u32,
}

impl AttackThresholds {
    /// Build thresholds from a miss threshold, graze threshold and threat size.
    ///
    /// The threat size is clamped to `1..=20`.
    pub fn new(miss: u32, graze: u32, threat_size: u32) -> Self {
        let threat_size = threat_size.clamp(1, D20_FACES);
        Self {
            miss: miss.max(1),
            graze,
            crit_start: D20_FACES + 1 - threat_size,
        }
    }

    /// Classify a single roll.
    pub fn classify(&self, roll: u32) -> Outcome {
        if roll <= self.miss {
            Outcome::Miss
        } else if roll <= self.graze {
            Outcome::Graze
        } else if roll >= 19 && roll >= self.crit_start {
            Outcome::SpecialCritical
        } else if roll >= self.crit_start {
            Outcome::Critical
        } else {
            Outcome::Hit
        }
    }

    /// Classify every face from 1 to 20.
    pub fn faces(&self) -> impl Iterator<Item = (u32, Outcome)> + '_ {
        (1..=D20_FACES).map(|roll| (roll, self.classify(roll)))
    }
}

/// How many of the twenty faces land in each outcome.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutcomeCounts {
    /// Faces that miss.
    pub miss: u32,
    /// Faces that graze.
    pub graze: u32,
    /// Faces that hit normally.
    pub normal: u32,
    /// Faces that crit outside 19-20.
    pub normal_crit: u32,
    /// Faces that crit on 19-20.
    pub special_crit: u32,
}

impl OutcomeCounts {
    /// Sum of all counts. Always 20 for counts produced by [`distribution`].
    pub fn total(&self) -> u32 {
        self.miss + self.graze + self.normal + self.normal_crit + self.special_crit
    }
}

/// Probability of each outcome, every value a multiple of 1/20.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct OutcomeProbabilities {
    /// Chance of a miss.
    pub miss: f64,
    /// Chance of a graze.
    pub graze: f64,
    /// Chance of a regular hit.
    pub normal: f64,
    /// Chance of a critical outside 19-20.
    pub normal_crit: f64,
    /// Chance of a critical on 19-20.
    pub special_crit: f64,
    /// The face counts the fractions were derived from.
    pub counts: OutcomeCounts,
}

impl OutcomeProbabilities {
    /// Convert face counts into fractions of 20.
    pub fn from_counts(counts: OutcomeCounts) -> Self {
        let faces = f64::from(D20_FACES);
        Self {
            miss: f64::from(counts.miss) / faces,
            graze: f64::from(counts.graze) / faces,
            normal: f64::from(counts.normal) / faces,
            normal_crit: f64::from(counts.normal_crit) / faces,
            special_crit: f64::from(counts.special_crit) / faces,
            counts,
        }
    }

    /// Chance of any critical hit.
    pub fn crit(&self) -> f64 {
        f64::from(self.counts.normal_crit + self.counts.special_crit) / f64::from(D20_FACES)
    }

    /// Chance of a regular or critical hit.
    pub fn hit(&self) -> f64 {
        f64::from(self.counts.normal + self.counts.normal_crit + self.counts.special_crit)
            / f64::from(D20_FACES)
    }

    /// Probability of a given outcome.
    pub fn of(&self, outcome: Outcome) -> f64 {
        match outcome {
            Outcome::Miss => self.miss,
            Outcome::Graze => self.graze,
            Outcome::Hit => self.normal,
            Outcome::Critical => self.normal_crit,
            Outcome::SpecialCritical => self.special_crit,
        }
    }
}

/// Tally outcomes over all twenty faces.
pub fn distribution_for(thresholds: &AttackThresholds) -> OutcomeProbabilities {
    let mut counts = OutcomeCounts::default();
    for (_, outcome) in thresholds.faces() {
        match outcome {
            Outcome::Miss => counts.miss += 1,
            Outcome::Graze => counts.graze += 1,
            Outcome::Hit => counts.normal += 1,
            Outcome::Critical => counts.normal_crit += 1,
            Outcome::SpecialCritical => counts.special_crit += 1,
        }
    }
    OutcomeProbabilities::from_counts(counts)
}

/// Outcome probabilities for a miss threshold, graze threshold and threat size.
pub fn distribution(
    miss_threshold: u32,
    graze_threshold: u32,
    threat_range_size: u32,
) -> OutcomeProbabilities {
    distribution_for(&AttackThresholds::new(
        miss_threshold,
        graze_threshold,
        threat_range_size,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn approx(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-12
    }

    #[test]
    fn fifteen_to_twenty_without_graze() {
        let p = distribution(1, 0, 6);
        assert_eq!(
            p.counts,
            OutcomeCounts {
                miss: 1,
                graze: 0,
                normal: 13,
                normal_crit: 4,
                special_crit: 2,
            }
        );
        assert!(approx(p.miss, 0.05));
        assert!(approx(p.normal, 0.65));
        assert!(approx(p.normal_crit, 0.20));
        assert!(approx(p.special_crit, 0.10));
        assert!(approx(p.crit(), 0.30));
        assert!(approx(p.hit(), 0.95));
    }

    #[test]
    fn graze_band() {
        let p = distribution(1, 5, 6);
        assert_eq!(p.counts.miss, 1);
        assert_eq!(p.counts.graze, 4);
        assert_eq!(p.counts.normal, 9);
        assert!(approx(p.hit(), 0.75));
    }

    #[test]
    fn natural_twenty_only_is_special() {
        let p = distribution(1, 0, 1);
        assert_eq!(p.counts.special_crit, 1);
        assert_eq!(p.counts.normal_crit, 0);
        assert_eq!(p.counts.normal, 18);
    }

    #[test]
    fn miss_threshold_floor_is_one() {
        let p = distribution(0, 0, 1);
        assert_eq!(p.counts.miss, 1);
    }

    #[test]
    fn miss_takes_precedence_over_crit() {
        // Thresholds overlap the whole threat range.
        let t = AttackThresholds::new(19, 20, 20);
        assert_eq!(t.classify(19), Outcome::Miss);
        assert_eq!(t.classify(20), Outcome::Graze);
        let p = distribution_for(&t);
        assert_eq!(p.counts.miss, 19);
        assert_eq!(p.counts.graze, 1);
        assert!(approx(p.hit(), 0.0));
    }

    #[test]
    fn oversized_threat_is_clamped() {
        let t = AttackThresholds::new(1, 0, 40);
        assert_eq!(t.crit_start, 1);
        assert_eq!(t.classify(2), Outcome::Critical);
    }

    #[test]
    fn outcome_labels() {
        assert_eq!(Outcome::Miss.to_string(), "Miss");
        assert_eq!(Outcome::Graze.to_string(), "Graze");
        assert_eq!(Outcome::Hit.to_string(), "Hit");
        assert_eq!(Outcome::Critical.to_string(), "Critical");
        assert_eq!(Outcome::SpecialCritical.to_string(), "Critical");
        assert!(Outcome::SpecialCritical.is_critical());
        assert!(!Outcome::Graze.is_hit());
    }

    proptest! {
        #[test]
        fn fractions_sum_to_one(miss in 0u32..25, graze in 0u32..25, threat in 0u32..25) {
            let p = distribution(miss, graze, threat);
            prop_assert_eq!(p.counts.total(), D20_FACES);
            let sum = p.miss + p.graze + p.normal + p.normal_crit + p.special_crit;
            prop_assert!((sum - 1.0).abs() < 1e-12);
            prop_assert!((p.hit() - (p.normal + p.crit())).abs() < 1e-12);
        }
    }
}
