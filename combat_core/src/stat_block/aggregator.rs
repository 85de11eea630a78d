//! StatAccumulator - Collects stat modifications before resolving a snapshot

use super::computed::CombatantStats;
use super::stat_value::StatValue;
use crate::config::DamageConstants;
use crate::types::{Element, StatKind};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Which composition step a contribution belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ModifierLayer {
    Base,
    GearFlat,
    TalentFlat,
    TalentPercent,
    MetaPercent,
    TransientPercent,
    TransientFlat,
    /// Multiplicative factor from an active effect
    EffectFactor,
}

/// Accumulates stat modifications from various sources
///
/// This is used during stat resolution to collect all modifications
/// before turning them into a `CombatantStats` snapshot. Stats are keyed
/// in a `BTreeMap` so iteration order never depends on hashing.
#[derive(Debug, Clone, Default)]
pub struct StatAccumulator {
    stats: BTreeMap<StatKind, StatValue>,
}

impl StatAccumulator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a contribution to one layer of a stat
    pub fn add(&mut self, layer: ModifierLayer, stat: StatKind, value: f64) {
        let entry = self.stats.entry(stat).or_default();
        match layer {
            ModifierLayer::Base => entry.base += value,
            ModifierLayer::GearFlat => entry.gear_flat += value,
            ModifierLayer::TalentFlat => entry.talent_flat += value,
            ModifierLayer::TalentPercent => entry.talent_percent += value,
            ModifierLayer::MetaPercent => entry.meta_percent += value,
            ModifierLayer::TransientPercent => entry.transient_percent += value,
            ModifierLayer::TransientFlat => entry.transient_flat += value,
            ModifierLayer::EffectFactor => entry.effect_factors.push(value),
        }
    }

    /// Get the layered value of a stat (zero if nothing touched it)
    pub fn get(&self, stat: StatKind) -> StatValue {
        self.stats.get(&stat).cloned().unwrap_or_default()
    }

    /// Final value for a single stat
    pub fn compute(&self, stat: StatKind) -> f64 {
        self.stats.get(&stat).map(StatValue::compute).unwrap_or(0.0)
    }

    /// Final value rounded to a whole, non-negative amount
    pub fn compute_whole(&self, stat: StatKind) -> u32 {
        whole(self.compute(stat))
    }

    /// Iterate over every touched stat in a stable order
    pub fn iter(&self) -> impl Iterator<Item = (&StatKind, &StatValue)> {
        self.stats.iter()
    }

    /// Resolve into a snapshot, clamping every stat to its legal range
    pub fn resolve(
        &self,
        current_hp: u32,
        current_resource: u32,
        limits: &DamageConstants,
    ) -> CombatantStats {
        let max_hp = whole(self.compute(StatKind::MaxHp));
        let max_resource = whole(self.compute(StatKind::MaxResource));

        let mut elemental_damage = BTreeMap::new();
        for element in Element::all() {
            let amount = whole(self.compute(element.stat_kind()));
            if amount > 0 {
                elemental_damage.insert(*element, amount);
            }
        }

        CombatantStats {
            max_hp,
            current_hp: current_hp.min(max_hp),
            max_resource,
            current_resource: current_resource.min(max_resource),
            defense: whole(self.compute(StatKind::Defense)),
            damage: whole(self.compute(StatKind::Damage)),
            crit_chance: self
                .compute(StatKind::CritChance)
                .clamp(0.0, limits.max_crit_chance),
            dodge: self.compute(StatKind::Dodge).clamp(0.0, limits.max_dodge),
            lifesteal: self.compute(StatKind::Lifesteal).max(0.0),
            regen_per_turn: whole(self.compute(StatKind::RegenPerTurn)),
            gold_find: self.compute(StatKind::GoldFind).max(0.0),
            elemental_damage,
        }
    }
}

/// Round to a whole, non-negative amount
fn whole(value: f64) -> u32 {
    if value.is_finite() && value > 0.0 {
        value.round().min(u32::MAX as f64) as u32
    } else {
        0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_layers_land_in_the_right_bucket() {
        let mut acc = StatAccumulator::new();
        acc.add(ModifierLayer::Base, StatKind::Damage, 10.0);
        acc.add(ModifierLayer::GearFlat, StatKind::Damage, 4.0);
        acc.add(ModifierLayer::TalentPercent, StatKind::Damage, 0.5);

        let damage = acc.get(StatKind::Damage);
        assert!((damage.base - 10.0).abs() < f64::EPSILON);
        assert!((damage.gear_flat - 4.0).abs() < f64::EPSILON);
        assert!((acc.compute(StatKind::Damage) - 21.0).abs() < 1e-9);
    }

    #[test]
    fn test_untouched_stat_is_zero() {
        let acc = StatAccumulator::new();
        assert!((acc.compute(StatKind::Defense) - 0.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_resolve_clamps() {
        let mut acc = StatAccumulator::new();
        acc.add(ModifierLayer::Base, StatKind::MaxHp, 50.0);
        acc.add(ModifierLayer::Base, StatKind::Defense, -20.0);
        acc.add(ModifierLayer::Base, StatKind::Dodge, 2.0);
        acc.add(ModifierLayer::Base, StatKind::CritChance, -0.5);

        let limits = DamageConstants::default();
        let stats = acc.resolve(80, 10, &limits);

        assert_eq!(stats.max_hp, 50);
        assert_eq!(stats.current_hp, 50);
        assert_eq!(stats.defense, 0);
        assert!((stats.dodge - limits.max_dodge).abs() < f64::EPSILON);
        assert!((stats.crit_chance - 0.0).abs() < f64::EPSILON);
        assert_eq!(stats.current_resource, 0);
    }

    #[test]
    fn test_resolve_collects_elements() {
        let mut acc = StatAccumulator::new();
        acc.add(ModifierLayer::GearFlat, StatKind::FireDamage, 6.0);
        acc.add(ModifierLayer::TransientFlat, StatKind::IceDamage, 2.4);

        let stats = acc.resolve(0, 0, &DamageConstants::default());
        assert_eq!(stats.elemental_damage.get(&Element::Fire), Some(&6));
        assert_eq!(stats.elemental_damage.get(&Element::Ice), Some(&2));
        assert!(!stats.elemental_damage.contains_key(&Element::Shadow));
    }
}
