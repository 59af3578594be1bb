//! Named builds and their computed results.

use serde::{Deserialize, Serialize};

use crate::compare::{ComparisonRow, compare};
use crate::config::RulesConfig;
use crate::spell::{SpellDamage, SpellInput, compute_spell_damage_with};
use crate::weapon::{WeaponDamage, WeaponInput, compute_weapon_damage_with};

/// A weapon or spell configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Build {
    /// A weapon attack build.
    Weapon(WeaponInput),
    /// A spellcasting build.
    Spell(SpellInput),
}

impl Build {
    /// Short kind label.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Weapon(_) => "weapon",
            Self::Spell(_) => "spell",
        }
    }

    /// Compute expected damage.
    pub fn compute(&self, rules: &RulesConfig) -> BuildResult {
        match self {
            Self::Weapon(input) => BuildResult::Weapon(compute_weapon_damage_with(input, rules)),
            Self::Spell(input) => BuildResult::Spell(compute_spell_damage_with(input, rules)),
        }
    }
}

/// A build with a display name.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NamedBuild {
    /// Display name.
    pub name: String,
    /// The configuration.
    #[serde(flatten)]
    pub build: Build,
}

impl NamedBuild {
    /// Create a named build.
    pub fn new(name: impl Into<String>, build: Build) -> Self {
        Self {
            name: name.into(),
            build,
        }
    }
}

/// The result of computing a [`Build`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum BuildResult {
    /// Weapon damage result.
    Weapon(WeaponDamage),
    /// Spell damage result.
    Spell(SpellDamage),
}

impl BuildResult {
    /// Expected total damage.
    pub fn total(&self) -> f64 {
        match self {
            Self::Weapon(result) => result.total,
            Self::Spell(result) => result.total,
        }
    }
}

/// Compute every build in order.
pub fn compute_all(builds: &[NamedBuild], rules: &RulesConfig) -> Vec<BuildResult> {
    builds.iter().map(|b| b.build.compute(rules)).collect()
}

/// Compare a set of builds by total damage.
pub fn rank(builds: &[NamedBuild], results: &[BuildResult]) -> Vec<ComparisonRow> {
    compare(
        builds
            .iter()
            .zip(results)
            .map(|(build, result)| (build.name.as_str(), result.total())),
    )
}
