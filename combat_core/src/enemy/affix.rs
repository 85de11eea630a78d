//! Affix - Modular special rules attached to elite and stronger enemies

use crate::types::{StatBonus, StatKind};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Affix {
    /// +50% defense
    Armored,
    /// +10% dodge
    Swift,
    /// Heals for 15% of damage dealt
    Vampiric,
    /// Regenerates HP every turn
    Regenerating,
    /// Reflects 20% of damage taken
    Thorns,
    /// Basic attacks poison
    Venomous,
    /// +25% damage
    Frenzied,
    /// +30% max HP
    Fortified,
}

impl Affix {
    pub fn all() -> &'static [Affix] {
        &[
            Affix::Armored,
            Affix::Swift,
            Affix::Vampiric,
            Affix::Regenerating,
            Affix::Thorns,
            Affix::Venomous,
            Affix::Frenzied,
            Affix::Fortified,
        ]
    }

    /// Multiplier this affix applies to a scaled base stat
    pub fn stat_multiplier(&self, stat: StatKind) -> f64 {
        match (self, stat) {
            (Affix::Armored, StatKind::Defense) => 1.5,
            (Affix::Frenzied, StatKind::Damage) => 1.25,
            (Affix::Fortified, StatKind::MaxHp) => 1.3,
            _ => 1.0,
        }
    }

    /// Flat base-layer additions, which may depend on level
    pub fn flat_bonuses(&self, level: u32) -> Vec<StatBonus> {
        match self {
            Affix::Swift => vec![StatBonus::new(StatKind::Dodge, 0.10)],
            Affix::Vampiric => vec![StatBonus::new(StatKind::Lifesteal, 0.15)],
            Affix::Regenerating => {
                vec![StatBonus::new(StatKind::RegenPerTurn, 2.0 + level as f64)]
            }
            _ => Vec::new(),
        }
    }

    /// Fraction of damage taken sent back to the attacker
    pub fn thorns_fraction(&self) -> f64 {
        match self {
            Affix::Thorns => 0.20,
            _ => 0.0,
        }
    }

    /// Effect and duration applied to the target on a landed basic attack
    pub fn on_hit_effect(&self) -> Option<(&'static str, u32)> {
        match self {
            Affix::Venomous => Some(("poison", 3)),
            _ => None,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Affix::Armored => "Armored",
            Affix::Swift => "Swift",
            Affix::Vampiric => "Vampiric",
            Affix::Regenerating => "Regenerating",
            Affix::Thorns => "Thorns",
            Affix::Venomous => "Venomous",
            Affix::Frenzied => "Frenzied",
            Affix::Fortified => "Fortified",
        }
    }
}
