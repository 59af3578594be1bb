//! Expected damage-per-round for d20 weapon and spell builds.
//!
//! Inputs are typed [`WeaponInput`] and [`SpellInput`] values, built directly
//! or mapped from flat form-field snapshots. Weapon damage is computed from
//! the exact d20 outcome distribution, with a per-face breakdown whose mean
//! equals the reported total. Named builds can be ranked against each other.

/// Named builds, their results, and ranking.
pub mod build;
/// Ranking totals against the best one.
pub mod compare;
/// Game-rule constants.
pub mod config;
/// Dice notation and threat ranges.
pub mod dice;
/// Error types used throughout the crate.
pub mod error;
/// The d20 outcome distribution.
pub mod probability;
/// Multi-strike and reaper scaling.
pub mod scaling;
/// Flat form-field snapshots.
pub mod snapshot;
/// Spell damage across spell power profiles.
pub mod spell;
/// Plain-text build summaries.
pub mod summary;
/// Weapon damage per attack round.
pub mod weapon;

/// Re-export build types.
pub use build::{Build, BuildResult, NamedBuild, compute_all, rank};
/// Re-export comparison types.
pub use compare::{ComparisonRow, Standing, compare};
/// Re-export rule constants.
pub use config::RulesConfig;
/// Re-export dice types.
pub use dice::{DiceExpr, Die, ThreatRange};
/// Re-export error types.
pub use error::{MechError, MechResult};
/// Re-export outcome types.
pub use probability::{Outcome, OutcomeProbabilities};
/// Re-export snapshot entry points.
pub use snapshot::{Snapshot, parse_sets};
/// Re-export spell types.
pub use spell::{SpellDamage, SpellInput, compute_spell_damage, compute_spell_damage_with};
/// Re-export weapon types.
pub use weapon::{WeaponDamage, WeaponInput, compute_weapon_damage, compute_weapon_damage_with};
