//! RunItem - Items scoped to a single dungeon run

use super::rarity::{depth_multiplier, roll_rarity};
use crate::config::LootConstants;
use crate::types::{Element, Rarity};
use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use tracing::debug;

/// What a run item modifies
///
/// Percent-style entries are stored in percent units (10.0 = 10%).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RunItemStat {
    DamagePercent,
    FlatDamage,
    DefensePercent,
    FlatDefense,
    Dodge,
    Lifesteal,
    RegenPerTurn,
    GoldPercent,
    CritChance,
    FireDamage,
    IceDamage,
    LightningDamage,
    ShadowDamage,
}

impl RunItemStat {
    /// The elemental flat-damage entry for an element
    pub fn for_element(element: Element) -> Self {
        match element {
            Element::Fire => RunItemStat::FireDamage,
            Element::Ice => RunItemStat::IceDamage,
            Element::Lightning => RunItemStat::LightningDamage,
            Element::Shadow => RunItemStat::ShadowDamage,
        }
    }
}

/// A modifier-bearing item owned by one dungeon run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunItem {
    pub name: String,
    pub rarity: Rarity,
    pub stat_modifiers: BTreeMap<RunItemStat, f64>,
    /// Copies of this item picked up; modifiers count once per copy
    pub stack_count: u32,
}

impl RunItem {
    pub fn new(name: impl Into<String>, rarity: Rarity) -> Self {
        RunItem {
            name: name.into(),
            rarity,
            stat_modifiers: BTreeMap::new(),
            stack_count: 1,
        }
    }

    /// Builder-style modifier
    pub fn with_modifier(mut self, stat: RunItemStat, value: f64) -> Self {
        *self.stat_modifiers.entry(stat).or_insert(0.0) += value;
        self
    }

    /// Total contribution of one stat across all copies
    pub fn total(&self, stat: RunItemStat) -> f64 {
        self.stat_modifiers.get(&stat).copied().unwrap_or(0.0) * self.stack_count as f64
    }

    /// The item handed out when no template matches the rolled rarity
    pub fn fallback() -> Self {
        RunItem::new("Lucky Pebble", Rarity::Common).with_modifier(RunItemStat::GoldPercent, 5.0)
    }
}

/// Template for a run item before magnitudes are scaled
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunItemTemplate {
    pub name: String,
    pub rarity: Rarity,
    pub modifiers: Vec<(RunItemStat, f64)>,
}

impl RunItemTemplate {
    fn new(name: &str, rarity: Rarity, modifiers: &[(RunItemStat, f64)]) -> Self {
        RunItemTemplate {
            name: name.to_string(),
            rarity,
            modifiers: modifiers.to_vec(),
        }
    }
}

/// Rolls run items found as treasure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunItemFactory {
    pub templates: Vec<RunItemTemplate>,
    #[serde(default)]
    pub bands: LootConstants,
}

impl Default for RunItemFactory {
    fn default() -> Self {
        Self::with_defaults(LootConstants::default())
    }
}

impl RunItemFactory {
    pub fn new(templates: Vec<RunItemTemplate>, bands: LootConstants) -> Self {
        RunItemFactory { templates, bands }
    }

    /// Factory with the built-in treasure table
    pub fn with_defaults(bands: LootConstants) -> Self {
        use Rarity::*;
        use RunItemStat::*;

        let templates = vec![
            RunItemTemplate::new("Whetstone", Common, &[(FlatDamage, 2.0)]),
            RunItemTemplate::new("Iron Buckle", Common, &[(FlatDefense, 2.0)]),
            RunItemTemplate::new("Coin Purse", Common, &[(GoldPercent, 10.0)]),
            RunItemTemplate::new("Feather Charm", Uncommon, &[(Dodge, 3.0)]),
            RunItemTemplate::new("War Paint", Uncommon, &[(DamagePercent, 8.0)]),
            RunItemTemplate::new("Troll Tooth", Uncommon, &[(RegenPerTurn, 2.0)]),
            RunItemTemplate::new("Ember Shard", Uncommon, &[(FireDamage, 3.0)]),
            RunItemTemplate::new("Vampire Fang", Rare, &[(Lifesteal, 5.0)]),
            RunItemTemplate::new("Keen Eye", Rare, &[(CritChance, 5.0), (DamagePercent, 5.0)]),
            RunItemTemplate::new("Tower Sigil", Rare, &[(DefensePercent, 15.0), (FlatDefense, 2.0)]),
            RunItemTemplate::new("Storm Heart", Legendary, &[(LightningDamage, 6.0), (CritChance, 5.0)]),
            RunItemTemplate::new("Crown of Ash", Legendary, &[(DamagePercent, 20.0), (ShadowDamage, 4.0)]),
        ];
        RunItemFactory { templates, bands }
    }

    /// Roll a run item for a depth
    pub fn generate_run_item(&self, depth: u32, rng: &mut impl Rng) -> RunItem {
        let rarity = roll_rarity(depth, &self.bands, rng);
        let pool: Vec<&RunItemTemplate> =
            self.templates.iter().filter(|t| t.rarity == rarity).collect();

        let Some(template) = pool.choose(rng) else {
            debug!(?rarity, depth, "empty run item pool, using fallback");
            return RunItem::fallback();
        };

        let scale = depth_multiplier(depth, &self.bands);
        let mut item = RunItem::new(template.name.clone(), rarity);
        for (stat, value) in &template.modifiers {
            let scaled = (value * scale * 10.0).round() / 10.0;
            item = item.with_modifier(*stat, scaled);
        }
        debug!(item = %item.name, ?rarity, depth, "generated run item");
        item
    }
}
