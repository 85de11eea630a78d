//! HeroTransientCombatState - Run-item bonuses folded into one stat source

use crate::loot::{RunItem, RunItemStat};
use crate::source::{priority, StatSource};
use crate::stat_block::{ModifierLayer, StatAccumulator};
use crate::types::{Element, StatKind};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Bonuses a hero carries for the rest of the current run
///
/// Always rebuilt from the full run-item set; never patched in place.
/// Fractions are stored as decimals (0.05 = 5%).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct HeroTransientCombatState {
    pub damage_percent: f64,
    pub flat_damage: f64,
    pub defense_percent: f64,
    pub flat_defense: f64,
    pub dodge: f64,
    pub lifesteal: f64,
    pub regen_per_turn: f64,
    pub gold_percent: f64,
    pub crit_chance: f64,
    pub elemental_flat: BTreeMap<Element, f64>,
}

impl HeroTransientCombatState {
    /// Sum a run-item set into a fresh state
    pub fn from_items<'a>(items: impl IntoIterator<Item = &'a RunItem>) -> Self {
        let mut state = HeroTransientCombatState::default();
        for item in items {
            for stat in item.stat_modifiers.keys() {
                state.add(*stat, item.total(*stat));
            }
        }
        state
    }

    fn add(&mut self, stat: RunItemStat, value: f64) {
        match stat {
            RunItemStat::DamagePercent => self.damage_percent += value / 100.0,
            RunItemStat::FlatDamage => self.flat_damage += value,
            RunItemStat::DefensePercent => self.defense_percent += value / 100.0,
            RunItemStat::FlatDefense => self.flat_defense += value,
            RunItemStat::Dodge => self.dodge += value / 100.0,
            RunItemStat::Lifesteal => self.lifesteal += value / 100.0,
            RunItemStat::RegenPerTurn => self.regen_per_turn += value,
            RunItemStat::GoldPercent => self.gold_percent += value / 100.0,
            RunItemStat::CritChance => self.crit_chance += value / 100.0,
            RunItemStat::FireDamage => self.add_elemental(Element::Fire, value),
            RunItemStat::IceDamage => self.add_elemental(Element::Ice, value),
            RunItemStat::LightningDamage => self.add_elemental(Element::Lightning, value),
            RunItemStat::ShadowDamage => self.add_elemental(Element::Shadow, value),
        }
    }

    fn add_elemental(&mut self, element: Element, value: f64) {
        *self.elemental_flat.entry(element).or_insert(0.0) += value;
    }

    /// Drop every bonus
    pub fn clear(&mut self) {
        *self = HeroTransientCombatState::default();
    }

    pub fn is_empty(&self) -> bool {
        *self == HeroTransientCombatState::default()
    }
}

impl StatSource for HeroTransientCombatState {
    fn id(&self) -> &str {
        "run_items"
    }

    fn priority(&self) -> i32 {
        priority::TRANSIENT
    }

    fn apply(&self, stats: &mut StatAccumulator) {
        use ModifierLayer::{TransientFlat, TransientPercent};

        stats.add(TransientPercent, StatKind::Damage, self.damage_percent);
        stats.add(TransientFlat, StatKind::Damage, self.flat_damage);
        stats.add(TransientPercent, StatKind::Defense, self.defense_percent);
        stats.add(TransientFlat, StatKind::Defense, self.flat_defense);
        stats.add(TransientFlat, StatKind::Dodge, self.dodge);
        stats.add(TransientFlat, StatKind::Lifesteal, self.lifesteal);
        stats.add(TransientFlat, StatKind::RegenPerTurn, self.regen_per_turn);
        stats.add(TransientFlat, StatKind::GoldFind, self.gold_percent);
        stats.add(TransientFlat, StatKind::CritChance, self.crit_chance);
        for (element, value) in &self.elemental_flat {
            stats.add(TransientFlat, element.stat_kind(), *value);
        }
    }
}
