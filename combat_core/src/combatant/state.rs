//! CombatantState - One actor's live battle data and its mutation entry points

use super::class::CharacterClass;
use super::result::{DamageTaken, EffectApplication, Revival, TickResult};
use crate::ability::AbilityConfiguration;
use crate::config::CombatRules;
use crate::defense::mitigate;
use crate::effect::{EffectSpec, EffectStack};
use crate::enemy::EnemyDefinition;
use crate::loot::Equipment;
use crate::run::HeroTransientCombatState;
use crate::source::{BaseStatsSource, GearSource, MetaProgression, StatSource, TalentTreeSource};
use crate::stat_block::{accumulate, CombatantStats, ModifierLayer, StatAccumulator};
use crate::types::{EquipmentSlot, ResourceKind, StatBonus, StatKind};
use std::collections::BTreeMap;
use tracing::{debug, info, trace, warn};

/// Whether an actor is the hero or an enemy, with the data that goes with it
#[derive(Debug, Clone, PartialEq)]
pub enum CombatantKind {
    Hero { class: CharacterClass },
    Enemy(EnemyDefinition),
}

/// One combat actor
///
/// Owns its effect stacks and cooldown counters exclusively. Stats are
/// never stored; `resolve_stats` derives them from the current inputs.
#[derive(Debug, Clone)]
pub struct CombatantState {
    pub id: String,
    pub name: String,
    kind: CombatantKind,
    pub level: u32,
    resource_kind: ResourceKind,
    base: BaseStatsSource,
    equipment: BTreeMap<EquipmentSlot, Equipment>,
    talent_tree: TalentTreeSource,
    meta: MetaProgression,
    transient: HeroTransientCombatState,
    /// Active effects in application order
    effects: Vec<EffectStack>,
    cooldowns: BTreeMap<String, u32>,
    pub abilities: Vec<AbilityConfiguration>,
    current_hp: u32,
    current_resource: u32,
    revival_charges: u32,
    /// Set once when a boss first drops under the enrage threshold; never re-armed
    enrage: Option<EnrageBonus>,
}

/// Bonus locked in when enrage triggers
#[derive(Debug, Clone, Copy, PartialEq)]
struct EnrageBonus {
    damage_percent: f64,
    crit_chance: f64,
}

impl CombatantState {
    fn new(
        id: String,
        name: String,
        kind: CombatantKind,
        level: u32,
        resource_kind: ResourceKind,
        base: BaseStatsSource,
    ) -> Self {
        let mut state = CombatantState {
            id,
            name,
            kind,
            level,
            resource_kind,
            base,
            equipment: BTreeMap::new(),
            talent_tree: TalentTreeSource::new(),
            meta: MetaProgression::new(),
            transient: HeroTransientCombatState::default(),
            effects: Vec::new(),
            cooldowns: BTreeMap::new(),
            abilities: Vec::new(),
            current_hp: 0,
            current_resource: 0,
            revival_charges: 0,
            enrage: None,
        };
        state.restore_pools();
        state
    }

    /// A hero of a class at a level, full HP
    pub fn hero(class: CharacterClass, level: u32) -> Self {
        let level = level.max(1);
        let base = BaseStatsSource::new("class", class.base_stats(level));
        Self::new(
            "hero".to_string(),
            class.name().to_string(),
            CombatantKind::Hero { class },
            level,
            class.resource(),
            base,
        )
    }

    /// An enemy built from its definition, full HP and resource
    pub fn enemy(definition: EnemyDefinition) -> Self {
        let id = definition.name.to_lowercase().replace(' ', "_");
        let base = BaseStatsSource::new("enemy", definition.base_stats());
        let name = definition.name.clone();
        let level = definition.level;
        Self::new(
            id,
            name,
            CombatantKind::Enemy(definition),
            level,
            ResourceKind::Energy,
            base,
        )
    }

    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = id.into();
        self
    }

    /// Replace the base layer and refill pools
    pub fn with_base_stats(mut self, stats: Vec<StatBonus>) -> Self {
        self.base = BaseStatsSource::new(self.base.id().to_string(), stats);
        self.restore_pools();
        self
    }

    pub fn with_revivals(mut self, charges: u32) -> Self {
        self.revival_charges = charges;
        self
    }

    pub fn with_ability(mut self, ability: AbilityConfiguration) -> Self {
        self.abilities.push(ability);
        self
    }

    /// Pull current HP and resource back under their maximums
    fn clamp_pools(&mut self) {
        let acc = self.breakdown();
        self.current_hp = self.current_hp.min(acc.compute_whole(StatKind::MaxHp));
        self.current_resource = self
            .current_resource
            .min(acc.compute_whole(StatKind::MaxResource));
    }

    fn restore_pools(&mut self) {
        let acc = self.breakdown();
        self.current_hp = acc.compute_whole(StatKind::MaxHp);
        self.current_resource = if self.resource_kind.starts_full() {
            acc.compute_whole(StatKind::MaxResource)
        } else {
            0
        };
    }

    pub fn kind(&self) -> &CombatantKind {
        &self.kind
    }

    pub fn class(&self) -> Option<CharacterClass> {
        match &self.kind {
            CombatantKind::Hero { class } => Some(*class),
            CombatantKind::Enemy(_) => None,
        }
    }

    pub fn enemy_definition(&self) -> Option<&EnemyDefinition> {
        match &self.kind {
            CombatantKind::Enemy(definition) => Some(definition),
            CombatantKind::Hero { .. } => None,
        }
    }

    pub fn is_hero(&self) -> bool {
        matches!(self.kind, CombatantKind::Hero { .. })
    }

    pub fn resource_kind(&self) -> ResourceKind {
        self.resource_kind
    }

    // === Inputs ===

    /// Equip an item, returning whatever was in its slot
    pub fn equip(&mut self, item: Equipment) -> Option<Equipment> {
        let previous = self.equipment.insert(item.slot, item);
        self.clamp_pools();
        previous
    }

    pub fn unequip(&mut self, slot: EquipmentSlot) -> Option<Equipment> {
        let removed = self.equipment.remove(&slot);
        self.clamp_pools();
        removed
    }

    pub fn equipped(&self, slot: EquipmentSlot) -> Option<&Equipment> {
        self.equipment.get(&slot)
    }

    /// Replace the run-item bonuses wholesale
    pub fn set_transient(&mut self, transient: HeroTransientCombatState) {
        self.transient = transient;
        self.clamp_pools();
    }

    pub fn clear_transient(&mut self) {
        self.transient.clear();
        self.clamp_pools();
    }

    pub fn transient(&self) -> &HeroTransientCombatState {
        &self.transient
    }

    pub fn talent_tree(&self) -> &TalentTreeSource {
        &self.talent_tree
    }

    pub fn set_talent_tree(&mut self, tree: TalentTreeSource) {
        self.talent_tree = tree;
        self.clamp_pools();
    }

    pub fn meta(&self) -> &MetaProgression {
        &self.meta
    }

    pub fn set_meta(&mut self, meta: MetaProgression) {
        self.meta = meta;
        self.clamp_pools();
    }

    pub fn ability(&self, id: &str) -> Option<&AbilityConfiguration> {
        self.abilities.iter().find(|a| a.id() == id)
    }

    pub fn ability_mut(&mut self, id: &str) -> Option<&mut AbilityConfiguration> {
        self.abilities.iter_mut().find(|a| a.id() == id)
    }

    // === Stats ===

    /// Every modifier layer per stat, before rounding and clamping
    pub fn breakdown(&self) -> StatAccumulator {
        let gear: Vec<GearSource<'_>> = self.equipment.values().map(GearSource::new).collect();

        let mut sources: Vec<&dyn StatSource> = Vec::new();
        sources.push(&self.base);
        sources.extend(gear.iter().map(|g| g as &dyn StatSource));
        sources.push(&self.talent_tree);
        sources.push(&self.meta);
        sources.push(&self.transient);
        sources.extend(self.effects.iter().map(|e| e as &dyn StatSource));

        let mut acc = accumulate(&sources);
        if let Some(bonus) = self.enrage {
            acc.add(ModifierLayer::TransientPercent, StatKind::Damage, bonus.damage_percent);
            acc.add(ModifierLayer::TransientFlat, StatKind::CritChance, bonus.crit_chance);
        }
        acc
    }

    /// Resolved snapshot of every combat number
    pub fn resolve_stats(&self, rules: &CombatRules) -> CombatantStats {
        self.breakdown()
            .resolve(self.current_hp, self.current_resource, &rules.constants.damage)
    }

    pub fn max_hp(&self) -> u32 {
        self.breakdown().compute_whole(StatKind::MaxHp)
    }

    pub fn max_resource(&self) -> u32 {
        self.breakdown().compute_whole(StatKind::MaxResource)
    }

    pub fn current_hp(&self) -> u32 {
        self.current_hp
    }

    pub fn current_resource(&self) -> u32 {
        self.current_resource
    }

    pub fn hp_fraction(&self) -> f64 {
        let max = self.max_hp();
        if max == 0 {
            return 0.0;
        }
        (self.current_hp as f64 / max as f64).clamp(0.0, 1.0)
    }

    pub fn is_alive(&self) -> bool {
        self.current_hp > 0
    }

    pub fn revival_charges(&self) -> u32 {
        self.revival_charges
    }

    pub fn is_enraged(&self) -> bool {
        self.enrage.is_some()
    }

    fn can_enrage(&self) -> bool {
        self.enemy_definition().is_some_and(|d| d.tier.enrages())
    }

    fn thorns_fraction(&self) -> f64 {
        self.enemy_definition().map_or(0.0, EnemyDefinition::thorns_fraction)
    }

    // === HP and resource ===

    /// Take a hit: subtract defense-adjusted damage, clamped at 0 HP
    ///
    /// Negative amounts are a caller error and change nothing. Any
    /// non-negative amount removes at least `min_damage`.
    pub fn take_damage(&mut self, amount: i64, rules: &CombatRules) -> DamageTaken {
        if amount < 0 {
            warn!(actor = %self.id, amount, "rejected negative damage");
            return DamageTaken::none(self.current_hp);
        }
        let raw = u32::try_from(amount).unwrap_or(u32::MAX);
        let defense = self.resolve_stats(rules).defense;
        let after_defense = mitigate(raw, defense, rules.constants.damage.min_damage);

        let hp_before = self.current_hp;
        self.current_hp = hp_before.saturating_sub(after_defense);
        let dealt = hp_before - self.current_hp;

        let reflected = (dealt as f64 * self.thorns_fraction()).floor() as u32;
        let enraged = self.check_enrage(rules);

        debug!(actor = %self.id, raw, defense, dealt, hp = self.current_hp, "took damage");
        DamageTaken {
            raw,
            after_defense,
            dealt,
            hp_before,
            hp_after: self.current_hp,
            killing_blow: hp_before > 0 && self.current_hp == 0,
            enraged,
            reflected,
        }
    }

    fn check_enrage(&mut self, rules: &CombatRules) -> bool {
        if self.enrage.is_some() || !self.can_enrage() || self.current_hp == 0 {
            return false;
        }
        let enrage = &rules.constants.enrage;
        if self.hp_fraction() > enrage.hp_threshold {
            return false;
        }
        self.enrage = Some(EnrageBonus {
            damage_percent: enrage.damage_bonus,
            crit_chance: enrage.crit_bonus,
        });
        info!(actor = %self.id, hp = self.current_hp, "enraged");
        true
    }

    /// Remove HP directly, bypassing defense (DoT ticks, thorns)
    pub fn lose_hp(&mut self, amount: u32) -> u32 {
        let before = self.current_hp;
        self.current_hp = before.saturating_sub(amount);
        before - self.current_hp
    }

    /// Restore HP up to max; returns the amount actually healed
    pub fn heal(&mut self, amount: i64) -> u32 {
        if amount < 0 {
            warn!(actor = %self.id, amount, "rejected negative heal");
            return 0;
        }
        let amount = u32::try_from(amount).unwrap_or(u32::MAX);
        let max_hp = self.max_hp();
        let before = self.current_hp;
        self.current_hp = before.saturating_add(amount).min(max_hp);
        self.current_hp.saturating_sub(before)
    }

    /// Pay a resource cost; false (and nothing spent) if it cannot be afforded
    pub fn spend_resource(&mut self, cost: u32) -> bool {
        if cost > self.current_resource {
            return false;
        }
        self.current_resource -= cost;
        true
    }

    /// Gain resource up to max; returns the amount actually gained
    pub fn gain_resource(&mut self, amount: u32) -> u32 {
        let max = self.max_resource();
        let before = self.current_resource;
        self.current_resource = before.saturating_add(amount).min(max);
        self.current_resource.saturating_sub(before)
    }

    // === Effects ===

    /// Apply a named effect from the registry; unknown names become a generic DoT
    pub fn apply_effect(
        &mut self,
        name: &str,
        duration: u32,
        rules: &CombatRules,
    ) -> Option<EffectApplication> {
        let spec = rules.effects.resolve(name);
        self.apply_effect_spec(spec, duration)
    }

    /// Create or refresh an effect stack
    ///
    /// A zero duration would create an already-expired effect, so it is ignored.
    pub fn apply_effect_spec(&mut self, spec: EffectSpec, duration: u32) -> Option<EffectApplication> {
        if duration == 0 {
            warn!(actor = %self.id, effect = %spec.name, "ignored zero-duration effect");
            return None;
        }

        let (stacks, duration, refreshed) =
            match self.effects.iter_mut().find(|e| e.name() == spec.name) {
                Some(existing) => {
                    existing.refresh(duration);
                    (existing.stacks, existing.duration, true)
                }
                None => {
                    self.effects.push(EffectStack::new(spec.clone(), duration));
                    (1, duration, false)
                }
            };

        self.clamp_pools();
        debug!(actor = %self.id, effect = %spec.name, stacks, duration, refreshed, "effect applied");
        Some(EffectApplication {
            effect: spec.name,
            stacks,
            duration,
            refreshed,
        })
    }

    pub fn effects(&self) -> &[EffectStack] {
        &self.effects
    }

    pub fn effect(&self, name: &str) -> Option<&EffectStack> {
        self.effects.iter().find(|e| e.name() == name)
    }

    pub fn remove_effect(&mut self, name: &str) -> Option<EffectStack> {
        let index = self.effects.iter().position(|e| e.name() == name)?;
        let removed = self.effects.remove(index);
        self.clamp_pools();
        Some(removed)
    }

    /// Stunned, frozen or otherwise unable to act this turn
    pub fn is_incapacitated(&self) -> bool {
        self.effects
            .iter()
            .any(|e| e.is_active() && e.spec.prevents_action)
    }

    // === Cooldowns ===

    /// Turns left before an ability can be used again
    pub fn cooldown(&self, ability_id: &str) -> u32 {
        self.cooldowns.get(ability_id).copied().unwrap_or(0)
    }

    pub fn set_cooldown(&mut self, ability_id: &str, turns: u32) {
        if turns == 0 {
            self.cooldowns.remove(ability_id);
        } else {
            self.cooldowns.insert(ability_id.to_string(), turns);
        }
    }

    // === Turn processing ===

    /// End-of-turn upkeep
    ///
    /// Effects tick in application order: their damage and healing are
    /// summed, expired stacks are dropped, then damage lands before any
    /// healing or regeneration. Cooldowns drop by one, floor 0.
    pub fn tick(&mut self, rules: &CombatRules) -> TickResult {
        let regen = self.resolve_stats(rules).regen_per_turn;

        let mut dot = 0.0;
        let mut hot = 0.0;
        let mut expired = Vec::new();
        for effect in &mut self.effects {
            let tick = effect.tick();
            dot += tick.damage;
            hot += tick.heal;
            if tick.expired {
                expired.push(effect.name().to_string());
            }
        }
        self.effects.retain(EffectStack::is_active);
        self.clamp_pools();

        let dot_damage = self.lose_hp(dot.round().max(0.0) as u32);
        let healed = if self.is_alive() {
            self.heal(hot.round() as i64 + regen as i64)
        } else {
            0
        };

        let resource_regen = if self.is_hero() {
            self.resource_kind.regen_per_turn()
        } else {
            rules.constants.ai.enemy_resource_regen
        };
        let resource_gained = self.gain_resource(resource_regen);

        for turns in self.cooldowns.values_mut() {
            *turns = turns.saturating_sub(1);
        }
        self.cooldowns.retain(|_, turns| *turns > 0);

        trace!(actor = %self.id, dot_damage, healed, expired = expired.len(), "tick");
        TickResult {
            dot_damage,
            healed,
            resource_gained,
            expired,
            defeated: dot_damage > 0 && !self.is_alive(),
        }
    }

    /// Spend a revival charge to come back from 0 HP
    ///
    /// HP and resource are restored to `floor(max × restore_fraction)`.
    /// When that HP would be 0 nothing happens and the charge is kept.
    pub fn try_revive(&mut self, rules: &CombatRules) -> Option<Revival> {
        if self.is_alive() || self.revival_charges == 0 {
            return None;
        }
        let fraction = rules.constants.revival.restore_fraction;
        let acc = self.breakdown();
        let hp = (acc.compute_whole(StatKind::MaxHp) as f64 * fraction).floor() as u32;
        let resource = (acc.compute_whole(StatKind::MaxResource) as f64 * fraction).floor() as u32;

        // A revival that restores no HP would leave the actor dead; keep the charge
        if hp == 0 {
            warn!(actor = %self.id, "revival would restore no HP");
            return None;
        }

        self.revival_charges -= 1;
        self.current_hp = hp;
        self.current_resource = resource;

        info!(actor = %self.id, hp = self.current_hp, charges = self.revival_charges, "revived");
        Some(Revival {
            hp: self.current_hp,
            resource: self.current_resource,
            charges_left: self.revival_charges,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::enemy::{Affix, Archetype, EnemyTier};
    use crate::loot::{RunItem, RunItemStat};
    use crate::types::Rarity;

    fn dummy(hp: f64, defense: f64) -> CombatantState {
        CombatantState::enemy(EnemyDefinition::new(Archetype::Swarm, EnemyTier::Normal, 1))
            .with_base_stats(vec![
                StatBonus::new(StatKind::MaxHp, hp),
                StatBonus::new(StatKind::MaxResource, 50.0),
                StatBonus::new(StatKind::Defense, defense),
            ])
    }

    #[test]
    fn test_hero_starts_full() {
        let hero = CombatantState::hero(CharacterClass::Mage, 1);
        assert_eq!(hero.current_hp(), hero.max_hp());
        assert_eq!(hero.current_resource(), hero.max_resource());

        let warrior = CombatantState::hero(CharacterClass::Warrior, 1);
        assert_eq!(warrior.current_resource(), 0);
    }

    #[test]
    fn test_take_damage_subtracts_defense() {
        let rules = CombatRules::default();
        let mut target = dummy(50.0, 4.0);
        let taken = target.take_damage(10, &rules);
        assert_eq!(taken.after_defense, 6);
        assert_eq!(taken.dealt, 6);
        assert_eq!(target.current_hp(), 44);
    }

    #[test]
    fn test_take_damage_floor_and_clamp() {
        let rules = CombatRules::default();
        let mut target = dummy(5.0, 100.0);
        assert_eq!(target.take_damage(3, &rules).dealt, 1);
        assert_eq!(target.take_damage(0, &rules).dealt, 1);

        let taken = dummy(5.0, 0.0).take_damage(500, &rules);
        assert_eq!(taken.hp_after, 0);
        assert_eq!(taken.dealt, 5);
        assert!(taken.killing_blow);
    }

    #[test]
    fn test_negative_damage_rejected() {
        let rules = CombatRules::default();
        let mut target = dummy(50.0, 0.0);
        let taken = target.take_damage(-7, &rules);
        assert_eq!(taken.dealt, 0);
        assert_eq!(target.current_hp(), 50);
    }

    #[test]
    fn test_heal_clamps_to_max() {
        let rules = CombatRules::default();
        let mut target = dummy(50.0, 0.0);
        target.take_damage(20, &rules);
        assert_eq!(target.heal(5), 5);
        assert_eq!(target.heal(100), 15);
        assert_eq!(target.heal(-3), 0);
        assert_eq!(target.current_hp(), 50);
    }

    #[test]
    fn test_enrage_triggers_once() {
        let rules = CombatRules::default();
        let definition = EnemyDefinition::new(Archetype::Berserker, EnemyTier::Boss, 1);
        let mut boss = CombatantState::enemy(definition).with_base_stats(vec![
            StatBonus::new(StatKind::MaxHp, 100.0),
            StatBonus::new(StatKind::Damage, 20.0),
            StatBonus::new(StatKind::CritChance, 0.1),
        ]);

        assert!(!boss.take_damage(50, &rules).enraged);
        assert!(boss.take_damage(25, &rules).enraged);
        assert!(!boss.take_damage(5, &rules).enraged);
        assert!(!boss.take_damage(5, &rules).enraged);

        let stats = boss.resolve_stats(&rules);
        // One +10% damage and one +2% crit, however many hits landed below threshold
        assert_eq!(stats.damage, 22);
        assert!((stats.crit_chance - 0.12).abs() < 1e-9);
    }

    #[test]
    fn test_normal_enemy_never_enrages() {
        let rules = CombatRules::default();
        let mut enemy = dummy(100.0, 0.0);
        assert!(!enemy.take_damage(90, &rules).enraged);
        assert!(!enemy.is_enraged());
    }

    #[test]
    fn test_thorns_reflects() {
        let rules = CombatRules::default();
        let definition =
            EnemyDefinition::new(Archetype::Tank, EnemyTier::Elite, 1).with_affix(Affix::Thorns);
        let mut enemy = CombatantState::enemy(definition)
            .with_base_stats(vec![StatBonus::new(StatKind::MaxHp, 100.0)]);
        assert_eq!(enemy.take_damage(20, &rules).reflected, 4);
    }

    #[test]
    fn test_apply_effect_refresh() {
        let rules = CombatRules::default();
        let mut target = dummy(50.0, 10.0);

        let first = target.apply_effect("sunder", 2, &rules).unwrap();
        assert_eq!((first.stacks, first.duration, first.refreshed), (1, 2, false));

        let second = target.apply_effect("sunder", 1, &rules).unwrap();
        assert_eq!((second.stacks, second.duration, second.refreshed), (2, 2, true));

        // 10 * (1 - 0.1 * 2)
        assert_eq!(target.resolve_stats(&rules).defense, 8);
        assert!(target.apply_effect("sunder", 0, &rules).is_none());
    }

    #[test]
    fn test_different_effects_multiply() {
        let rules = CombatRules::default();
        let mut target = dummy(50.0, 100.0);
        target.apply_effect("sunder", 3, &rules);
        target.apply_effect("fortify", 3, &rules);
        // 100 * 0.9 * 1.5
        assert_eq!(target.resolve_stats(&rules).defense, 135);
    }

    #[test]
    fn test_unknown_effect_is_generic_dot() {
        let rules = CombatRules::default();
        let mut target = dummy(50.0, 0.0);
        target.apply_effect("hex", 2, &rules);
        let tick = target.tick(&rules);
        assert_eq!(tick.dot_damage, 3);
        assert_eq!(target.current_hp(), 47);
    }

    #[test]
    fn test_tick_dot_then_expire() {
        let rules = CombatRules::default();
        let mut target = dummy(50.0, 20.0);
        target.apply_effect("poison", 2, &rules);
        target.apply_effect("poison", 2, &rules);

        // DoT bypasses defense: 3 * 2 stacks
        let first = target.tick(&rules);
        assert_eq!(first.dot_damage, 6);
        assert!(first.expired.is_empty());

        let second = target.tick(&rules);
        assert_eq!(second.dot_damage, 6);
        assert_eq!(second.expired, vec!["poison".to_string()]);
        assert!(target.effects().is_empty());
        assert_eq!(target.current_hp(), 38);
    }

    #[test]
    fn test_tick_cooldowns_floor_zero() {
        let rules = CombatRules::default();
        let mut actor = dummy(50.0, 0.0);
        actor.set_cooldown("heavy_strike", 2);
        actor.tick(&rules);
        assert_eq!(actor.cooldown("heavy_strike"), 1);
        actor.tick(&rules);
        actor.tick(&rules);
        assert_eq!(actor.cooldown("heavy_strike"), 0);
    }

    #[test]
    fn test_stun_incapacitates_until_expired() {
        let rules = CombatRules::default();
        let mut actor = dummy(50.0, 0.0);
        actor.apply_effect("stun", 1, &rules);
        assert!(actor.is_incapacitated());
        actor.tick(&rules);
        assert!(!actor.is_incapacitated());
    }

    #[test]
    fn test_revive() {
        let rules = CombatRules::default();
        let mut hero = CombatantState::hero(CharacterClass::Mage, 1).with_revivals(1);
        let max_hp = hero.max_hp();
        let max_resource = hero.max_resource();

        assert!(hero.try_revive(&rules).is_none());
        hero.take_damage(10_000, &rules);
        let revival = hero.try_revive(&rules).unwrap();
        assert_eq!(revival.hp, max_hp / 2);
        assert_eq!(revival.resource, max_resource / 2);
        assert_eq!(revival.charges_left, 0);

        hero.take_damage(10_000, &rules);
        assert!(hero.try_revive(&rules).is_none());
    }

    #[test]
    fn test_transient_and_clear() {
        let rules = CombatRules::default();
        let mut hero = CombatantState::hero(CharacterClass::Warrior, 1);
        let before = hero.resolve_stats(&rules).damage;

        let item = RunItem::new("Whetstone", Rarity::Common).with_modifier(RunItemStat::FlatDamage, 2.0);
        hero.set_transient(HeroTransientCombatState::from_items([&item]));
        assert_eq!(hero.resolve_stats(&rules).damage, before + 2);

        hero.clear_transient();
        assert_eq!(hero.resolve_stats(&rules).damage, before);
    }

    #[test]
    fn test_equipment_adds_flat() {
        let rules = CombatRules::default();
        let mut hero = CombatantState::hero(CharacterClass::Warrior, 1);
        let before = hero.resolve_stats(&rules).defense;
        let mut vest = Equipment::fallback();
        vest.slot = EquipmentSlot::Armor;
        vest.bonuses = vec![StatBonus::new(StatKind::Defense, 3.0)];
        assert!(hero.equip(vest).is_none());
        assert_eq!(hero.resolve_stats(&rules).defense, before + 3);
        assert!(hero.unequip(EquipmentSlot::Armor).is_some());
    }

    #[test]
    fn test_unequip_pulls_hp_under_new_max() {
        let rules = CombatRules::default();
        let mut hero = CombatantState::hero(CharacterClass::Warrior, 1);
        let base_max = hero.max_hp();
        let mut amulet = Equipment::fallback();
        amulet.name = "Heart Amulet".to_string();
        amulet.bonuses = vec![StatBonus::new(StatKind::MaxHp, 40.0)];
        amulet.slot = EquipmentSlot::Amulet;
        hero.equip(amulet);
        hero.heal(1_000);
        assert_eq!(hero.current_hp(), base_max + 40);

        hero.unequip(EquipmentSlot::Amulet);
        assert_eq!(hero.max_hp(), base_max);
        assert_eq!(hero.current_hp(), base_max);

        hero.take_damage(10, &rules);
        assert_eq!(hero.current_hp(), base_max - 10);
    }

    #[test]
    fn test_expired_effect_pulls_pools_under_new_max() {
        let rules = CombatRules::default();
        let mut actor = dummy(100.0, 0.0);
        let spec = EffectSpec::new("vigor", 1)
            .with_factor(StatKind::MaxHp, 1.5)
            .with_factor(StatKind::MaxResource, 2.0);
        actor.apply_effect_spec(spec, 1);
        actor.heal(1_000);
        actor.gain_resource(1_000);
        assert_eq!(actor.current_hp(), 150);
        assert_eq!(actor.current_resource(), 100);

        let tick = actor.tick(&rules);
        assert_eq!(tick.expired, vec!["vigor".to_string()]);
        assert_eq!(actor.current_hp(), 100);
        assert!(actor.current_resource() <= actor.max_resource());
    }

    #[test]
    fn test_dropping_meta_pulls_hp_under_new_max() {
        let mut hero = CombatantState::hero(CharacterClass::Cleric, 1);
        let base_max = hero.max_hp();
        let mut meta = MetaProgression::new();
        meta.add_percent(StatKind::MaxHp, 50.0);
        hero.set_meta(meta);
        hero.heal(1_000);
        assert!(hero.current_hp() > base_max);

        hero.set_meta(MetaProgression::new());
        assert_eq!(hero.current_hp(), base_max);
    }

    #[test]
    fn test_revival_that_restores_nothing_keeps_charge() {
        let rules = CombatRules::default();
        let mut actor = dummy(1.0, 0.0).with_revivals(1);
        actor.lose_hp(1);
        assert!(actor.try_revive(&rules).is_none());
        assert_eq!(actor.revival_charges(), 1);
        assert!(!actor.is_alive());
    }

    #[test]
    fn test_spend_and_gain_resource() {
        let mut actor = dummy(10.0, 0.0);
        assert!(actor.spend_resource(20));
        assert_eq!(actor.current_resource(), 30);
        assert!(!actor.spend_resource(31));
        assert_eq!(actor.gain_resource(100), 20);
    }
}
