//! CharacterClass - Hero classes, attributes and level formulas

use crate::types::{ResourceKind, StatBonus, StatKind};
use serde::{Deserialize, Serialize};

/// The four core attributes
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Attributes {
    pub strength: u32,
    pub dexterity: u32,
    pub intelligence: u32,
    pub vitality: u32,
}

impl Attributes {
    pub const fn new(strength: u32, dexterity: u32, intelligence: u32, vitality: u32) -> Self {
        Attributes {
            strength,
            dexterity,
            intelligence,
            vitality,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CharacterClass {
    Warrior,
    Mage,
    Rogue,
    Cleric,
}

impl CharacterClass {
    pub fn all() -> &'static [CharacterClass] {
        &[
            CharacterClass::Warrior,
            CharacterClass::Mage,
            CharacterClass::Rogue,
            CharacterClass::Cleric,
        ]
    }

    pub fn name(&self) -> &'static str {
        match self {
            CharacterClass::Warrior => "Warrior",
            CharacterClass::Mage => "Mage",
            CharacterClass::Rogue => "Rogue",
            CharacterClass::Cleric => "Cleric",
        }
    }

    pub fn resource(&self) -> ResourceKind {
        match self {
            CharacterClass::Warrior => ResourceKind::Rage,
            CharacterClass::Mage | CharacterClass::Cleric => ResourceKind::Mana,
            CharacterClass::Rogue => ResourceKind::Energy,
        }
    }

    /// Ability this class starts with, by id in the ability table
    pub fn starting_ability(&self) -> &'static str {
        match self {
            CharacterClass::Warrior => "cleave",
            CharacterClass::Mage => "fireball",
            CharacterClass::Rogue => "backstab",
            CharacterClass::Cleric => "smite",
        }
    }

    /// Level-1 attributes
    pub fn base_attributes(&self) -> Attributes {
        match self {
            CharacterClass::Warrior => Attributes::new(12, 6, 3, 12),
            CharacterClass::Mage => Attributes::new(3, 6, 14, 7),
            CharacterClass::Rogue => Attributes::new(6, 14, 4, 8),
            CharacterClass::Cleric => Attributes::new(8, 5, 11, 10),
        }
    }

    /// Attributes gained per level after the first
    pub fn growth(&self) -> Attributes {
        match self {
            CharacterClass::Warrior => Attributes::new(2, 1, 0, 2),
            CharacterClass::Mage => Attributes::new(0, 1, 3, 1),
            CharacterClass::Rogue => Attributes::new(1, 3, 0, 1),
            CharacterClass::Cleric => Attributes::new(1, 1, 2, 2),
        }
    }

    fn defense_per_level(&self) -> f64 {
        match self {
            CharacterClass::Warrior => 1.0,
            CharacterClass::Cleric => 0.75,
            CharacterClass::Mage | CharacterClass::Rogue => 0.5,
        }
    }

    pub fn attributes_at(&self, level: u32) -> Attributes {
        let base = self.base_attributes();
        let growth = self.growth();
        let gained = level.saturating_sub(1);
        Attributes {
            strength: base.strength + growth.strength * gained,
            dexterity: base.dexterity + growth.dexterity * gained,
            intelligence: base.intelligence + growth.intelligence * gained,
            vitality: base.vitality + growth.vitality * gained,
        }
    }

    fn primary(&self, attrs: &Attributes) -> f64 {
        match self {
            CharacterClass::Warrior => attrs.strength as f64,
            CharacterClass::Mage => attrs.intelligence as f64,
            CharacterClass::Rogue => attrs.dexterity as f64,
            CharacterClass::Cleric => (attrs.strength + attrs.intelligence) as f64 / 2.0,
        }
    }

    /// Base-layer stats for a level
    ///
    /// Defense only comes from level growth here, so every class starts at 0.
    pub fn base_stats(&self, level: u32) -> Vec<StatBonus> {
        let level = level.max(1);
        let attrs = self.attributes_at(level);
        let gained = (level - 1) as f64;

        let max_resource = match self.resource() {
            ResourceKind::Mana => 30.0 + attrs.intelligence as f64 * 5.0,
            ResourceKind::Rage | ResourceKind::Energy => 100.0,
        };

        vec![
            StatBonus::new(StatKind::MaxHp, 40.0 + attrs.vitality as f64 * 6.0),
            StatBonus::new(StatKind::MaxResource, max_resource),
            StatBonus::new(StatKind::Damage, 2.0 + self.primary(&attrs) * 0.5 + gained),
            StatBonus::new(StatKind::Defense, (gained * self.defense_per_level()).floor()),
            StatBonus::new(StatKind::CritChance, 0.05 + attrs.dexterity as f64 * 0.005),
            StatBonus::new(StatKind::Dodge, attrs.dexterity as f64 * 0.004),
        ]
    }
}

impl ResourceKind {
    /// Rage builds up in combat; other pools start full
    pub fn starts_full(&self) -> bool {
        !matches!(self, ResourceKind::Rage)
    }

    /// Passive gain each turn
    pub fn regen_per_turn(&self) -> u32 {
        match self {
            ResourceKind::Mana => 4,
            ResourceKind::Energy => 10,
            ResourceKind::Rage => 0,
        }
    }

    /// Gain for landing a hit
    pub fn gain_on_hit(&self) -> u32 {
        match self {
            ResourceKind::Rage => 10,
            _ => 0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn stat(stats: &[StatBonus], kind: StatKind) -> f64 {
        stats.iter().filter(|b| b.stat == kind).map(|b| b.value).sum()
    }

    #[test]
    fn test_level_one_defense_is_zero() {
        for class in CharacterClass::all() {
            assert_eq!(stat(&class.base_stats(1), StatKind::Defense), 0.0, "{class:?}");
        }
    }

    #[test]
    fn test_growth() {
        let attrs = CharacterClass::Warrior.attributes_at(5);
        assert_eq!(attrs.strength, 20);
        assert_eq!(attrs.intelligence, 3);
        assert_eq!(stat(&CharacterClass::Warrior.base_stats(5), StatKind::Defense), 4.0);
    }

    #[test]
    fn test_warrior_level_one() {
        let stats = CharacterClass::Warrior.base_stats(1);
        assert_eq!(stat(&stats, StatKind::MaxHp), 112.0);
        assert_eq!(stat(&stats, StatKind::Damage), 8.0);
        assert_eq!(stat(&stats, StatKind::MaxResource), 100.0);
    }

    #[test]
    fn test_resources() {
        assert_eq!(CharacterClass::Warrior.resource(), ResourceKind::Rage);
        assert!(!ResourceKind::Rage.starts_full());
        assert!(ResourceKind::Mana.starts_full());
        assert_eq!(ResourceKind::Rage.gain_on_hit(), 10);
    }
}
