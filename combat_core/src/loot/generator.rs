//! LootGenerator - Rarity-weighted equipment drops scaled by depth

use super::equipment::{Enchantment, Equipment};
use super::rarity::{depth_multiplier, roll_rarity};
use crate::config::LootConstants;
use crate::types::{Element, EquipmentSlot, Rarity, StatBonus, StatKind};
use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// A droppable item before its numbers are rolled
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ItemTemplate {
    pub name: String,
    pub slot: EquipmentSlot,
    pub rarity: Rarity,
    pub bonuses: Vec<StatBonus>,
}

impl ItemTemplate {
    fn new(name: &str, slot: EquipmentSlot, rarity: Rarity, bonuses: &[(StatKind, f64)]) -> Self {
        ItemTemplate {
            name: name.to_string(),
            slot,
            rarity,
            bonuses: bonuses.iter().map(|(s, v)| StatBonus::new(*s, *v)).collect(),
        }
    }
}

/// Generates equipment drops from a template pool
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LootGenerator {
    pub templates: Vec<ItemTemplate>,
    #[serde(default)]
    pub bands: LootConstants,
}

impl Default for LootGenerator {
    fn default() -> Self {
        Self::with_defaults(LootConstants::default())
    }
}

impl LootGenerator {
    /// Create a generator over a custom template pool
    pub fn new(templates: Vec<ItemTemplate>, bands: LootConstants) -> Self {
        LootGenerator { templates, bands }
    }

    /// Create a generator with the built-in template pool
    pub fn with_defaults(bands: LootConstants) -> Self {
        use EquipmentSlot::*;
        use Rarity::*;
        use StatKind::*;

        let templates = vec![
            ItemTemplate::new("Rusty Sword", Weapon, Common, &[(Damage, 3.0)]),
            ItemTemplate::new("Leather Cap", Helmet, Common, &[(Defense, 1.0), (MaxHp, 5.0)]),
            ItemTemplate::new("Padded Vest", Armor, Common, &[(Defense, 2.0)]),
            ItemTemplate::new("Worn Boots", Boots, Common, &[(Dodge, 0.02)]),
            ItemTemplate::new("Steel Longsword", Weapon, Uncommon, &[(Damage, 5.0), (CritChance, 0.02)]),
            ItemTemplate::new("Chainmail", Armor, Uncommon, &[(Defense, 4.0), (MaxHp, 10.0)]),
            ItemTemplate::new("Copper Ring", Ring, Uncommon, &[(CritChance, 0.03)]),
            ItemTemplate::new("Runed Axe", Weapon, Rare, &[(Damage, 8.0), (FireDamage, 3.0)]),
            ItemTemplate::new("Knight's Helm", Helmet, Rare, &[(Defense, 4.0), (MaxHp, 20.0)]),
            ItemTemplate::new("Amulet of Leeching", Amulet, Rare, &[(Lifesteal, 0.05), (Damage, 2.0)]),
            ItemTemplate::new("Dragonfang", Weapon, Legendary, &[(Damage, 12.0), (FireDamage, 6.0), (CritChance, 0.05)]),
            ItemTemplate::new("Aegis Plate", Armor, Legendary, &[(Defense, 9.0), (MaxHp, 40.0), (RegenPerTurn, 2.0)]),
        ];
        LootGenerator { templates, bands }
    }

    /// Generate the drops for a defeated enemy
    ///
    /// Normal enemies drop one item; bosses drop several, each rolled as if
    /// `boss_level_bonus` levels deeper.
    pub fn generate_loot(&self, level: u32, is_boss: bool, rng: &mut impl Rng) -> Vec<Equipment> {
        let (count, depth) = if is_boss {
            (self.bands.boss_drop_count.max(1), level + self.bands.boss_level_bonus)
        } else {
            (1, level)
        };
        (0..count).map(|_| self.generate_item(depth, rng)).collect()
    }

    /// Generate a single item for a depth
    pub fn generate_item(&self, depth: u32, rng: &mut impl Rng) -> Equipment {
        let rarity = roll_rarity(depth, &self.bands, rng);
        let pool: Vec<&ItemTemplate> = self.templates.iter().filter(|t| t.rarity == rarity).collect();

        let Some(template) = pool.choose(rng) else {
            debug!(?rarity, depth, "empty loot pool, using fallback item");
            return Equipment::fallback();
        };

        let scale = depth_multiplier(depth, &self.bands);
        let bonuses = template
            .bonuses
            .iter()
            .map(|b| {
                let roll = rng.gen_range(0.9..=1.1);
                StatBonus::new(b.stat, round_bonus(b.stat, b.value * scale * roll))
            })
            .collect();

        let enchantment = roll_enchantment(rarity, scale, rng);
        debug!(item = %template.name, ?rarity, depth, "generated loot");

        Equipment {
            name: template.name.clone(),
            slot: template.slot,
            rarity,
            bonuses,
            enchantment,
            enhancement_level: 0,
        }
    }
}

/// Rare items sometimes and legendary items always carry an elemental enchantment
fn roll_enchantment(rarity: Rarity, scale: f64, rng: &mut impl Rng) -> Option<Enchantment> {
    let chance = match rarity {
        Rarity::Legendary => 1.0,
        Rarity::Rare => 0.3,
        _ => 0.0,
    };
    if chance <= 0.0 || !rng.gen_bool(chance) {
        return None;
    }
    let element = *Element::all().choose(rng)?;
    let name = match element {
        Element::Fire => "Flametongue",
        Element::Ice => "Frostbite",
        Element::Lightning => "Stormcall",
        Element::Shadow => "Nightshade",
    };
    let value = (2.0 * scale * rarity.stat_multiplier()).round();
    Some(Enchantment::new(name, element.stat_kind(), value))
}

/// Whole stats round to integers (at least 1); fractional stats keep three decimals
fn round_bonus(stat: StatKind, value: f64) -> f64 {
    if stat.is_fractional() {
        (value * 1000.0).round() / 1000.0
    } else {
        value.round().max(1.0)
    }
}
