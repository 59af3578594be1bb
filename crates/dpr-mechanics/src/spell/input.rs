//! Typed spell build inputs.

use serde::{Deserialize, Serialize};

/// Metamagic feats, each adding flat spell power.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Metamagic {
    /// Empower Spell.
    pub empower: bool,
    /// Intensify Spell.
    pub intensify: bool,
    /// Maximize Spell.
    pub maximize: bool,
}

/// Temporary boosts.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Boosts {
    /// Wellspring of Power: spell power and crit damage.
    pub wellspring: bool,
    /// Night Horrors: crit damage only.
    pub night_horrors: bool,
}

/// An elemental damage channel with its own power and crit stats.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SpellPowerProfile {
    /// Stable profile id, referenced by scaling components.
    pub id: u32,
    /// Element label, e.g. "Fire".
    pub element: String,
    /// Spell power.
    pub spell_power: f64,
    /// Crit chance as a fraction.
    pub crit_chance: f64,
    /// Crit damage bonus as a fraction.
    pub crit_damage: f64,
}

/// Extra damage within a source that scales off another profile.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScalingComponent {
    /// Stable row id within the source.
    pub id: u32,
    /// Base dice expression.
    pub base: String,
    /// Dice expression added per caster level.
    pub per_level: String,
    /// Profile whose stats scale this component.
    pub profile_id: u32,
}

impl Default for ScalingComponent {
    fn default() -> Self {
        Self {
            id: 0,
            base: String::new(),
            per_level: String::new(),
            profile_id: 1,
        }
    }
}

/// One spell or effect dealing damage.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SpellDamageSource {
    /// Stable source id.
    pub id: u32,
    /// Display name.
    pub name: String,
    /// Base dice expression.
    pub base: String,
    /// Dice expression added per caster level.
    pub per_level: String,
    /// Caster level.
    pub caster_level: u32,
    /// Times the damage lands per cast.
    pub hit_count: u32,
    /// Additional components scaling off other profiles.
    pub scalings: Vec<ScalingComponent>,
}

impl Default for SpellDamageSource {
    fn default() -> Self {
        Self {
            id: 0,
            name: String::new(),
            base: String::new(),
            per_level: String::new(),
            caster_level: 0,
            hit_count: 1,
            scalings: Vec::new(),
        }
    }
}

/// Everything needed to compute expected spell damage.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SpellInput {
    /// Metamagic toggles.
    pub metamagic: Metamagic,
    /// Boost toggles.
    pub boosts: Boosts,
    /// Spell power profiles in row order.
    pub profiles: Vec<SpellPowerProfile>,
    /// Damage sources in row order.
    pub sources: Vec<SpellDamageSource>,
}

impl SpellInput {
    /// The profile with the given id, or the first profile if none matches.
    pub fn profile_or_first(&self, id: u32) -> Option<&SpellPowerProfile> {
        self.profiles
            .iter()
            .find(|profile| profile.id == id)
            .or_else(|| self.profiles.first())
    }
}
