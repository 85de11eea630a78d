//! Core types shared across the combat engine

use serde::{Deserialize, Serialize};

/// Every stat the aggregation pipeline knows about
///
/// Talents, gear, run items and effects all target stats through this
/// enumeration rather than free-form strings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StatKind {
    MaxHp,
    MaxResource,
    Defense,
    Damage,
    /// Chance to land a critical hit (0.0 - 1.0)
    CritChance,
    /// Chance to avoid an incoming hit entirely (0.0 - 1.0)
    Dodge,
    /// Fraction of dealt damage returned as healing
    Lifesteal,
    /// HP restored at the end of each turn
    RegenPerTurn,
    /// Bonus gold fraction on rewards
    GoldFind,
    FireDamage,
    IceDamage,
    LightningDamage,
    ShadowDamage,
}

impl StatKind {
    /// Get all stat kinds in aggregation order
    pub fn all() -> &'static [StatKind] {
        &[
            StatKind::MaxHp,
            StatKind::MaxResource,
            StatKind::Defense,
            StatKind::Damage,
            StatKind::CritChance,
            StatKind::Dodge,
            StatKind::Lifesteal,
            StatKind::RegenPerTurn,
            StatKind::GoldFind,
            StatKind::FireDamage,
            StatKind::IceDamage,
            StatKind::LightningDamage,
            StatKind::ShadowDamage,
        ]
    }

    /// The element this stat adds damage for, if any
    pub fn element(&self) -> Option<Element> {
        match self {
            StatKind::FireDamage => Some(Element::Fire),
            StatKind::IceDamage => Some(Element::Ice),
            StatKind::LightningDamage => Some(Element::Lightning),
            StatKind::ShadowDamage => Some(Element::Shadow),
            _ => None,
        }
    }

    /// Whether this stat is a fractional chance/ratio rather than a whole amount
    pub fn is_fractional(&self) -> bool {
        matches!(
            self,
            StatKind::CritChance | StatKind::Dodge | StatKind::Lifesteal | StatKind::GoldFind
        )
    }
}

/// Elemental damage types
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Element {
    Fire,
    Ice,
    Lightning,
    Shadow,
}

impl Element {
    pub fn all() -> &'static [Element] {
        &[Element::Fire, Element::Ice, Element::Lightning, Element::Shadow]
    }

    /// The stat that carries flat damage of this element
    pub fn stat_kind(&self) -> StatKind {
        match self {
            Element::Fire => StatKind::FireDamage,
            Element::Ice => StatKind::IceDamage,
            Element::Lightning => StatKind::LightningDamage,
            Element::Shadow => StatKind::ShadowDamage,
        }
    }
}

/// The class-specific pool abilities are paid from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResourceKind {
    Mana,
    Rage,
    Energy,
}

/// Item and run-item rarity, ordered from most common to rarest
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Rarity {
    Common,
    Uncommon,
    Rare,
    Legendary,
}

impl Rarity {
    pub fn all() -> &'static [Rarity] {
        &[Rarity::Common, Rarity::Uncommon, Rarity::Rare, Rarity::Legendary]
    }

    /// Bonus magnitude multiplier for generated items of this rarity
    pub fn stat_multiplier(&self) -> f64 {
        match self {
            Rarity::Common => 1.0,
            Rarity::Uncommon => 1.25,
            Rarity::Rare => 1.6,
            Rarity::Legendary => 2.2,
        }
    }
}

/// Equipment slot for gear
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EquipmentSlot {
    Weapon,
    Helmet,
    Armor,
    Boots,
    Ring,
    Amulet,
}

impl EquipmentSlot {
    /// Get all equipment slots
    pub fn all() -> &'static [EquipmentSlot] {
        &[
            EquipmentSlot::Weapon,
            EquipmentSlot::Helmet,
            EquipmentSlot::Armor,
            EquipmentSlot::Boots,
            EquipmentSlot::Ring,
            EquipmentSlot::Amulet,
        ]
    }
}

/// A single `stat += value` contribution
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StatBonus {
    pub stat: StatKind,
    pub value: f64,
}

impl StatBonus {
    pub fn new(stat: StatKind, value: f64) -> Self {
        StatBonus { stat, value }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_element_round_trip_through_stat() {
        for element in Element::all() {
            assert_eq!(element.stat_kind().element(), Some(*element));
        }
        assert_eq!(StatKind::Damage.element(), None);
    }

    #[test]
    fn test_rarity_ordering() {
        assert!(Rarity::Legendary > Rarity::Rare);
        assert!(Rarity::Uncommon > Rarity::Common);
    }

    #[test]
    fn test_stat_kind_serializes_snake_case() {
        let json = serde_json::to_string(&StatKind::CritChance).unwrap();
        assert_eq!(json, "\"crit_chance\"");
    }
}
