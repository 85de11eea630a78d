//! Equipment - Gear items with enchantments and enhancement levels

use crate::types::{EquipmentSlot, Rarity, StatBonus, StatKind};
use serde::{Deserialize, Serialize};

/// Fraction of each positive base bonus added per enhancement level
pub const ENHANCEMENT_STEP: f64 = 0.10;

/// A piece of equipment
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Equipment {
    pub name: String,
    pub slot: EquipmentSlot,
    pub rarity: Rarity,
    /// Flat stat bonuses rolled on the item
    pub bonuses: Vec<StatBonus>,
    #[serde(default)]
    pub enchantment: Option<Enchantment>,
    /// Upgrade level; each level adds `ENHANCEMENT_STEP` of every positive bonus
    #[serde(default)]
    pub enhancement_level: u32,
}

/// An enchantment adds one flat bonus on top of the item's own
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Enchantment {
    pub name: String,
    pub bonus: StatBonus,
}

impl Enchantment {
    pub fn new(name: impl Into<String>, stat: StatKind, value: f64) -> Self {
        Enchantment {
            name: name.into(),
            bonus: StatBonus::new(stat, value),
        }
    }
}

impl Equipment {
    /// The generic item handed out when a loot pool has nothing to offer
    pub fn fallback() -> Self {
        Equipment {
            name: "Worn Trinket".to_string(),
            slot: EquipmentSlot::Amulet,
            rarity: Rarity::Common,
            bonuses: vec![StatBonus::new(StatKind::MaxHp, 5.0)],
            enchantment: None,
            enhancement_level: 0,
        }
    }

    /// Bonuses granted by the enhancement level alone
    pub fn enhancement_bonuses(&self) -> Vec<StatBonus> {
        if self.enhancement_level == 0 {
            return Vec::new();
        }
        let step = ENHANCEMENT_STEP * self.enhancement_level as f64;
        self.bonuses
            .iter()
            .filter(|b| b.value > 0.0)
            .map(|b| StatBonus::new(b.stat, b.value * step))
            .collect()
    }

    /// Every flat bonus: rolled bonuses, then enhancement, then enchantment
    pub fn flat_bonuses(&self) -> Vec<StatBonus> {
        let mut all = self.bonuses.clone();
        all.extend(self.enhancement_bonuses());
        if let Some(enchantment) = &self.enchantment {
            all.push(enchantment.bonus);
        }
        all
    }

    /// Raise the enhancement level by one
    pub fn enhance(&mut self) {
        self.enhancement_level += 1;
    }
}
