//! Expected spell damage across spell power profiles.
//!
//! Each source deals base plus per-caster-level damage scaled by profile 1
//! (or the first profile), and each additional scaling component is scaled
//! by the profile it references. Component averages are summed and
//! multiplied by the source's hit count.

pub mod input;

pub use input::{
    Boosts, Metamagic, ScalingComponent, SpellDamageSource, SpellInput, SpellPowerProfile,
};

use serde::{Deserialize, Serialize};

use crate::config::RulesConfig;
use crate::dice;

/// Profile id that scales a source's base damage.
pub const BASE_PROFILE_ID: u32 = 1;

/// Flat bonuses from metamagic and boosts, shared by every profile.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct SpellBonuses {
    /// Spell power from metamagic.
    pub metamagic_power: f64,
    /// Spell power from boosts.
    pub boost_power: f64,
    /// Crit damage fraction from boosts.
    pub crit_damage: f64,
}

impl SpellBonuses {
    /// Collect the bonuses granted by an input's toggles.
    pub fn from_input(input: &SpellInput, rules: &RulesConfig) -> Self {
        let mut bonuses = Self::default();
        let metamagic = &input.metamagic;
        if metamagic.empower {
            bonuses.metamagic_power += rules.empower_power;
        }
        if metamagic.intensify {
            bonuses.metamagic_power += rules.intensify_power;
        }
        if metamagic.maximize {
            bonuses.metamagic_power += rules.maximize_power;
        }
        if input.boosts.wellspring {
            bonuses.boost_power += rules.wellspring_power;
            bonuses.crit_damage += rules.wellspring_crit_damage;
        }
        if input.boosts.night_horrors {
            bonuses.crit_damage += rules.night_horrors_crit_damage;
        }
        bonuses
    }

    /// Total flat spell power bonus.
    pub fn power(&self) -> f64 {
        self.metamagic_power + self.boost_power
    }
}

/// Expected damage of one component of a source.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComponentDamage {
    /// Label naming the profile, e.g. `SP 2: Fire`.
    pub label: String,
    /// Id of the profile that scaled this component.
    pub profile_id: u32,
    /// Unscaled damage: base plus per-level times caster level.
    pub damage: f64,
    /// Damage of a non-critical hit.
    pub average_hit: f64,
    /// Damage of a critical hit.
    pub average_crit: f64,
    /// Crit-weighted expected damage.
    pub average: f64,
}

/// Expected damage of a whole source.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SourceDamage {
    /// Source id.
    pub id: u32,
    /// Source name.
    pub name: String,
    /// Times the damage lands.
    pub hit_count: u32,
    /// Per-component breakdown.
    pub components: Vec<ComponentDamage>,
    /// Sum of component averages times hit count.
    pub total: f64,
}

/// The result of a spell damage computation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpellDamage {
    /// Bonuses applied to every profile.
    pub bonuses: SpellBonuses,
    /// Per-source results in input order.
    pub sources: Vec<SourceDamage>,
    /// Sum of all source totals.
    pub total: f64,
    /// Sum of every component's non-critical hit, ignoring hit counts.
    pub average_base_hit: f64,
    /// Sum of every component's critical hit, ignoring hit counts.
    pub average_crit_hit: f64,
}

fn component_damage(
    damage: f64,
    profile: &SpellPowerProfile,
    bonuses: &SpellBonuses,
    rules: &RulesConfig,
) -> ComponentDamage {
    let power_multiplier = 1.0 + (profile.spell_power + bonuses.power()) / 100.0;
    let crit_multiplier =
        rules.spell_base_crit_multiplier + profile.crit_damage + bonuses.crit_damage;

    let average_hit = damage * power_multiplier;
    let average_crit = average_hit * crit_multiplier;
    let average =
        average_hit * (1.0 - profile.crit_chance) + average_crit * profile.crit_chance;

    let element = if profile.element.is_empty() {
        "Unnamed"
    } else {
        profile.element.as_str()
    };
    ComponentDamage {
        label: format!("SP {}: {element}", profile.id),
        profile_id: profile.id,
        damage,
        average_hit,
        average_crit,
        average,
    }
}

fn source_damage(
    source: &SpellDamageSource,
    input: &SpellInput,
    bonuses: &SpellBonuses,
    rules: &RulesConfig,
) -> SourceDamage {
    let level = f64::from(source.caster_level);
    let mut components = Vec::with_capacity(source.scalings.len() + 1);

    if let Some(profile) = input.profile_or_first(BASE_PROFILE_ID) {
        let damage = dice::evaluate(&source.base) + dice::evaluate(&source.per_level) * level;
        components.push(component_damage(damage, profile, bonuses, rules));
    }

    for scaling in &source.scalings {
        let Some(profile) = input.profile_or_first(scaling.profile_id) else {
            continue;
        };
        let damage = dice::evaluate(&scaling.base) + dice::evaluate(&scaling.per_level) * level;
        components.push(component_damage(damage, profile, bonuses, rules));
    }

    let total = components.iter().map(|c| c.average).sum::<f64>() * f64::from(source.hit_count);
    tracing::debug!(
        source = %source.name,
        components = components.len(),
        total,
        "spell source"
    );

    SourceDamage {
        id: source.id,
        name: source.name.clone(),
        hit_count: source.hit_count,
        components,
        total,
    }
}

/// Compute expected spell damage with the standard rules.
pub fn compute_spell_damage(input: &SpellInput) -> SpellDamage {
    compute_spell_damage_with(input, &RulesConfig::default())
}

/// Compute expected spell damage with custom rule constants.
pub fn compute_spell_damage_with(input: &SpellInput, rules: &RulesConfig) -> SpellDamage {
    let bonuses = SpellBonuses::from_input(input, rules);
    tracing::debug!(
        power = bonuses.power(),
        crit_damage = bonuses.crit_damage,
        "spell bonuses"
    );

    let sources: Vec<SourceDamage> = input
        .sources
        .iter()
        .map(|source| source_damage(source, input, &bonuses, rules))
        .collect();

    let total = sources.iter().map(|s| s.total).sum();
    let components = sources.iter().flat_map(|s| s.components.iter());
    let (average_base_hit, average_crit_hit) = components
        .fold((0.0, 0.0), |(hit, crit), c| (hit + c.average_hit, crit + c.average_crit));

    SpellDamage {
        bonuses,
        sources,
        total,
        average_base_hit,
        average_crit_hit,
    }
}
