//! Combat resolution - Hits, abilities and enemy actions between combatants

use super::error::CombatError;
use super::event::{CombatEvent, HitEvent};
use crate::ability::SecondaryEffect;
use crate::combatant::{CombatantState, DamageTaken, EffectApplication};
use crate::config::CombatRules;
use crate::defense::{apply_variance, roll_crit, roll_dodge};
use crate::effect::EffectSpec;
use crate::enemy::{EffectTarget, EnemyAction};
use crate::types::StatKind;
use rand::Rng;
use serde::{Deserialize, Serialize};

/// Result of one strike from attacker to defender
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StrikeOutcome {
    pub hit: HitEvent,
    /// `None` when the strike was dodged
    pub damage: Option<DamageTaken>,
    pub lifesteal_healed: u32,
    pub reflected: u32,
}

impl StrikeOutcome {
    pub fn landed(&self) -> bool {
        !self.hit.is_dodge
    }

    pub fn dealt(&self) -> u32 {
        self.damage.as_ref().map_or(0, |d| d.dealt)
    }
}

/// Summary of a hero ability use
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AbilityReport {
    pub ability: String,
    pub total_damage: u32,
    pub targets_hit: usize,
    pub killed: usize,
}

fn log_effect(log: &mut Vec<CombatEvent>, target: &str, applied: Option<EffectApplication>) {
    if let Some(applied) = applied {
        log.push(CombatEvent::EffectApplied {
            target: target.to_string(),
            effect: applied.effect,
            stacks: applied.stacks,
            duration: applied.duration,
        });
    }
}

/// Resolve one strike: dodge, crit, defense, lifesteal, thorns
///
/// Random draws happen in a fixed order (dodge, variance, crit) so a
/// seeded source replays identically.
pub fn strike(
    attacker: &mut CombatantState,
    defender: &mut CombatantState,
    base: u32,
    with_variance: bool,
    rules: &CombatRules,
    rng: &mut impl Rng,
    log: &mut Vec<CombatEvent>,
) -> StrikeOutcome {
    let damage_rules = &rules.constants.damage;
    let attack = attacker.resolve_stats(rules);
    let defense = defender.resolve_stats(rules);

    if roll_dodge(defense.dodge, rng) {
        let hit = HitEvent {
            amount: 0,
            is_critical: false,
            is_dodge: true,
        };
        log.push(CombatEvent::hit(&attacker.id, &defender.id, hit));
        return StrikeOutcome {
            hit,
            ..Default::default()
        };
    }

    let mut raw = if with_variance {
        apply_variance(base, damage_rules.basic_attack_variance, damage_rules.min_damage, rng)
    } else {
        base.max(damage_rules.min_damage)
    };
    let is_critical = roll_crit(attack.crit_chance, rng);
    if is_critical {
        raw = (raw as f64 * damage_rules.crit_multiplier).round() as u32;
    }

    let taken = defender.take_damage(raw as i64, rules);
    let hit = HitEvent {
        amount: taken.dealt,
        is_critical,
        is_dodge: false,
    };
    log.push(CombatEvent::hit(&attacker.id, &defender.id, hit));
    if taken.enraged {
        log.push(CombatEvent::Enraged {
            actor: defender.id.clone(),
        });
    }

    let lifesteal = (taken.dealt as f64 * attack.lifesteal).floor() as i64;
    let lifesteal_healed = if lifesteal > 0 { attacker.heal(lifesteal) } else { 0 };
    if lifesteal_healed > 0 {
        log.push(CombatEvent::Healed {
            target: attacker.id.clone(),
            amount: lifesteal_healed,
        });
    }

    let reflected = attacker.lose_hp(taken.reflected);
    if reflected > 0 {
        let thorns = HitEvent {
            amount: reflected,
            ..Default::default()
        };
        log.push(CombatEvent::hit(&defender.id, &attacker.id, thorns));
    }

    attacker.gain_resource(attacker.resource_kind().gain_on_hit());

    StrikeOutcome {
        hit,
        damage: Some(taken),
        lifesteal_healed,
        reflected,
    }
}

/// A basic attack: resolved damage plus elemental damage, with variance
///
/// Enemies with on-hit affixes apply their effects when the attack lands.
pub fn basic_attack(
    attacker: &mut CombatantState,
    defender: &mut CombatantState,
    rules: &CombatRules,
    rng: &mut impl Rng,
    log: &mut Vec<CombatEvent>,
) -> StrikeOutcome {
    let stats = attacker.resolve_stats(rules);
    let base = stats.damage + stats.total_elemental_damage();
    let outcome = strike(attacker, defender, base, true, rules, rng, log);

    if outcome.landed() && defender.is_alive() {
        let on_hit = attacker
            .enemy_definition()
            .map(|d| d.on_hit_effects())
            .unwrap_or_default();
        for (effect, duration) in on_hit {
            let applied = defender.apply_effect(effect, duration, rules);
            log_effect(log, &defender.id, applied);
        }
    }
    outcome
}

/// Carry out an action the enemy AI already chose and paid for
pub fn execute_enemy_action(
    enemy: &mut CombatantState,
    hero: &mut CombatantState,
    action: EnemyAction,
    rules: &CombatRules,
    rng: &mut impl Rng,
    log: &mut Vec<CombatEvent>,
) -> Option<StrikeOutcome> {
    let ability = match action {
        EnemyAction::BasicAttack => return Some(basic_attack(enemy, hero, rules, rng, log)),
        EnemyAction::Ability(ability) => ability,
    };
    let profile = ability.profile();

    let mut outcome = None;
    if profile.damage_multiplier > 0.0 {
        let damage = enemy.resolve_stats(rules).damage;
        let base = (damage as f64 * profile.damage_multiplier).round() as u32;
        outcome = Some(strike(enemy, hero, base, false, rules, rng, log));
    }
    let landed = outcome.as_ref().map_or(true, StrikeOutcome::landed);

    if profile.heal_fraction > 0.0 {
        let amount = (enemy.max_hp() as f64 * profile.heal_fraction).floor() as i64;
        let healed = enemy.heal(amount);
        if healed > 0 {
            log.push(CombatEvent::Healed {
                target: enemy.id.clone(),
                amount: healed,
            });
        }
    }

    if let Some(effect) = profile.effect {
        match effect.target {
            EffectTarget::User => {
                let applied = enemy.apply_effect(effect.effect, effect.duration, rules);
                log_effect(log, &enemy.id, applied);
            }
            EffectTarget::Opponent if landed && hero.is_alive() => {
                let applied = hero.apply_effect(effect.effect, effect.duration, rules);
                log_effect(log, &hero.id, applied);
            }
            EffectTarget::Opponent => {}
        }
    }
    outcome
}

/// Use a configured hero ability against a group of enemies
///
/// Every check runs before anything is spent, so an `Err` leaves the
/// battle untouched.
pub fn use_hero_ability(
    hero: &mut CombatantState,
    ability_id: &str,
    targets: &mut [CombatantState],
    primary: usize,
    rules: &CombatRules,
    rng: &mut impl Rng,
    log: &mut Vec<CombatEvent>,
) -> Result<AbilityReport, CombatError> {
    if !hero.is_alive() {
        return Err(CombatError::ActorDefeated(hero.name.clone()));
    }
    let config = hero
        .ability(ability_id)
        .ok_or_else(|| CombatError::UnknownAbility(ability_id.to_string()))?;
    let resolved = config.resolve();
    let aoe_count = if resolved.aoe {
        config.variant().target_count.max(1) as usize
    } else {
        1
    };

    let turns = hero.cooldown(ability_id);
    if turns > 0 {
        return Err(CombatError::OnCooldown {
            ability: ability_id.to_string(),
            turns,
        });
    }
    let target = targets.get(primary).ok_or(CombatError::InvalidTarget(primary))?;
    if !target.is_alive() {
        return Err(CombatError::ActorDefeated(target.name.clone()));
    }
    if resolved.resource_cost > hero.current_resource() {
        return Err(CombatError::CannotAfford {
            ability: ability_id.to_string(),
            cost: resolved.resource_cost,
            available: hero.current_resource(),
        });
    }

    hero.spend_resource(resolved.resource_cost);
    hero.set_cooldown(ability_id, resolved.cooldown);
    log.push(CombatEvent::ActionChosen {
        actor: hero.id.clone(),
        action: ability_id.to_string(),
    });

    let stats = hero.resolve_stats(rules);
    let elemental = resolved.element.map_or(0, |e| stats.elemental(e));
    let base = resolved.damage.round() as u32 + stats.damage + elemental;

    // Primary first, then other living targets in order
    let mut order: Vec<usize> = vec![primary];
    order.extend((0..targets.len()).filter(|i| *i != primary && targets[*i].is_alive()));

    let mut report = AbilityReport {
        ability: ability_id.to_string(),
        ..Default::default()
    };
    let mut hit_so_far = 0;

    for &index in order.iter().take(aoe_count) {
        let target = &mut targets[index];
        let outcome = strike(hero, target, base, false, rules, rng, log);
        hit_so_far += 1;
        record(&mut report, &outcome, target);
        if outcome.landed() && target.is_alive() {
            apply_on_hit(&resolved.effects, target, rules, log);
        }
    }

    for effect in &resolved.effects {
        if let SecondaryEffect::Chain { fraction } = effect {
            let Some(&index) = order.get(hit_so_far) else {
                break;
            };
            hit_so_far += 1;
            let target = &mut targets[index];
            if !target.is_alive() {
                continue;
            }
            let chained = (base as f64 * fraction).round() as u32;
            let outcome = strike(hero, target, chained, false, rules, rng, log);
            record(&mut report, &outcome, target);
        }
    }

    for effect in &resolved.effects {
        match effect {
            SecondaryEffect::ExecuteAoe { splash_fraction } if !targets[primary].is_alive() => {
                let splash = (base as f64 * splash_fraction).round() as i64;
                for target in targets.iter_mut().filter(|t| t.is_alive()) {
                    let taken = target.take_damage(splash, rules);
                    let hit = HitEvent {
                        amount: taken.dealt,
                        ..Default::default()
                    };
                    log.push(CombatEvent::hit(&hero.id, &target.id, hit));
                    report.total_damage += taken.dealt;
                    if taken.killing_blow {
                        report.killed += 1;
                    }
                }
            }
            SecondaryEffect::Lifesteal { fraction } => {
                let amount = (report.total_damage as f64 * fraction).floor() as i64;
                let healed = hero.heal(amount);
                if healed > 0 {
                    log.push(CombatEvent::Healed {
                        target: hero.id.clone(),
                        amount: healed,
                    });
                }
            }
            _ => {}
        }
    }

    Ok(report)
}

fn record(report: &mut AbilityReport, outcome: &StrikeOutcome, target: &CombatantState) {
    if !outcome.landed() {
        return;
    }
    report.targets_hit += 1;
    report.total_damage += outcome.dealt();
    if outcome.damage.as_ref().is_some_and(|d| d.killing_blow) && !target.is_alive() {
        report.killed += 1;
    }
}

/// Talent effects that ride on each landed hit
fn apply_on_hit(
    effects: &[SecondaryEffect],
    target: &mut CombatantState,
    rules: &CombatRules,
    log: &mut Vec<CombatEvent>,
) {
    let max_stacks = rules.constants.effects.default_max_stacks;
    for effect in effects {
        let applied = match effect {
            SecondaryEffect::ArmorShred { factor, duration } => {
                let spec = EffectSpec::new("armor_shred", max_stacks)
                    .debuff()
                    .with_factor(StatKind::Defense, *factor);
                target.apply_effect_spec(spec, *duration)
            }
            SecondaryEffect::Bleed {
                damage_per_turn,
                duration,
            } => {
                let spec = EffectSpec::damage_over_time("bleed", *damage_per_turn, max_stacks);
                target.apply_effect_spec(spec, *duration)
            }
            _ => None,
        };
        log_effect(log, &target.id, applied);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ability::AbilityConfiguration;
    use crate::combatant::CharacterClass;
    use crate::config::default_abilities;
    use crate::enemy::{Affix, Archetype, EnemyDefinition, EnemyTier};
    use crate::types::StatBonus;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn flat_rules() -> CombatRules {
        let mut rules = CombatRules::default();
        rules.constants.damage.basic_attack_variance = 0.0;
        rules
    }

    fn dummy(name: &str, hp: f64, damage: f64, defense: f64) -> CombatantState {
        CombatantState::enemy(EnemyDefinition::new(Archetype::Swarm, EnemyTier::Normal, 1))
            .with_id(name)
            .with_base_stats(vec![
                StatBonus::new(StatKind::MaxHp, hp),
                StatBonus::new(StatKind::MaxResource, 100.0),
                StatBonus::new(StatKind::Damage, damage),
                StatBonus::new(StatKind::Defense, defense),
            ])
    }

    fn hero_with(ability: &str) -> CombatantState {
        let config = AbilityConfiguration::new(default_abilities()[ability].clone()).unwrap();
        CombatantState::hero(CharacterClass::Mage, 1)
            .with_base_stats(vec![
                StatBonus::new(StatKind::MaxHp, 100.0),
                StatBonus::new(StatKind::MaxResource, 100.0),
                StatBonus::new(StatKind::Damage, 10.0),
            ])
            .with_ability(config)
    }

    #[test]
    fn test_basic_attack_exact_without_variance() {
        let rules = flat_rules();
        let mut rng = StdRng::seed_from_u64(1);
        let mut log = Vec::new();
        let mut attacker = dummy("a", 50.0, 10.0, 0.0);
        let mut defender = dummy("d", 50.0, 0.0, 3.0);

        let outcome = basic_attack(&mut attacker, &mut defender, &rules, &mut rng, &mut log);
        assert_eq!(outcome.dealt(), 7);
        assert_eq!(defender.current_hp(), 43);
        assert_eq!(log.len(), 1);
    }

    #[test]
    fn test_lifesteal_heals_attacker() {
        let rules = flat_rules();
        let mut rng = StdRng::seed_from_u64(1);
        let mut log = Vec::new();
        let mut attacker = dummy("a", 50.0, 10.0, 0.0).with_base_stats(vec![
            StatBonus::new(StatKind::MaxHp, 50.0),
            StatBonus::new(StatKind::Damage, 10.0),
            StatBonus::new(StatKind::Lifesteal, 0.5),
        ]);
        attacker.lose_hp(20);
        let mut defender = dummy("d", 50.0, 0.0, 0.0);

        let outcome = basic_attack(&mut attacker, &mut defender, &rules, &mut rng, &mut log);
        assert_eq!(outcome.lifesteal_healed, 5);
        assert_eq!(attacker.current_hp(), 35);
    }

    #[test]
    fn test_venomous_poisons() {
        let rules = flat_rules();
        let mut rng = StdRng::seed_from_u64(1);
        let mut log = Vec::new();
        let definition =
            EnemyDefinition::new(Archetype::Assassin, EnemyTier::Elite, 1).with_affix(Affix::Venomous);
        let mut enemy = CombatantState::enemy(definition).with_base_stats(vec![
            StatBonus::new(StatKind::MaxHp, 50.0),
            StatBonus::new(StatKind::Damage, 5.0),
        ]);
        let mut hero = dummy("hero", 100.0, 0.0, 0.0);

        basic_attack(&mut enemy, &mut hero, &rules, &mut rng, &mut log);
        assert_eq!(hero.effect("poison").map(|e| e.stacks), Some(1));
    }

    #[test]
    fn test_ability_errors_change_nothing() {
        let rules = flat_rules();
        let mut rng = StdRng::seed_from_u64(1);
        let mut log = Vec::new();
        let mut hero = hero_with("fireball");
        let mut targets = vec![dummy("t", 50.0, 0.0, 0.0)];

        let unknown = use_hero_ability(&mut hero, "nope", &mut targets, 0, &rules, &mut rng, &mut log);
        assert_eq!(unknown, Err(CombatError::UnknownAbility("nope".to_string())));

        let bad_target = use_hero_ability(&mut hero, "fireball", &mut targets, 3, &rules, &mut rng, &mut log);
        assert_eq!(bad_target, Err(CombatError::InvalidTarget(3)));

        hero.spend_resource(95);
        let broke = use_hero_ability(&mut hero, "fireball", &mut targets, 0, &rules, &mut rng, &mut log);
        assert_eq!(
            broke,
            Err(CombatError::CannotAfford {
                ability: "fireball".to_string(),
                cost: 15,
                available: 5,
            })
        );
        assert!(log.is_empty());
        assert_eq!(targets[0].current_hp(), 50);
    }

    #[test]
    fn test_ability_spends_and_cools_down() {
        let rules = flat_rules();
        let mut rng = StdRng::seed_from_u64(1);
        let mut log = Vec::new();
        let mut hero = hero_with("fireball");
        let mut targets = vec![dummy("t", 100.0, 0.0, 0.0)];

        let report = use_hero_ability(&mut hero, "fireball", &mut targets, 0, &rules, &mut rng, &mut log).unwrap();
        // 12 base + 10 damage stat
        assert_eq!(report.total_damage, 22);
        assert_eq!(hero.current_resource(), 85);
        assert_eq!(hero.cooldown("fireball"), 1);

        let again = use_hero_ability(&mut hero, "fireball", &mut targets, 0, &rules, &mut rng, &mut log);
        assert_eq!(
            again,
            Err(CombatError::OnCooldown {
                ability: "fireball".to_string(),
                turns: 1,
            })
        );
    }

    #[test]
    fn test_aoe_hits_several_targets() {
        let rules = flat_rules();
        let mut rng = StdRng::seed_from_u64(1);
        let mut log = Vec::new();
        let mut hero = hero_with("cleave");
        let mut targets = vec![
            dummy("a", 100.0, 0.0, 0.0),
            dummy("b", 100.0, 0.0, 0.0),
            dummy("c", 100.0, 0.0, 0.0),
            dummy("d", 100.0, 0.0, 0.0),
        ];

        let report = use_hero_ability(&mut hero, "cleave", &mut targets, 1, &rules, &mut rng, &mut log).unwrap();
        // Wide cleave hits three targets for 8 + 10
        assert_eq!(report.targets_hit, 3);
        assert_eq!(report.total_damage, 54);
        assert_eq!(targets[3].current_hp(), 100);
    }

    #[test]
    fn test_talent_bleed_applies() {
        let rules = flat_rules();
        let mut rng = StdRng::seed_from_u64(1);
        let mut log = Vec::new();
        let mut hero = hero_with("backstab");
        hero.ability_mut("backstab").unwrap().select_talent(2, "hemorrhage").unwrap();
        let mut targets = vec![dummy("t", 100.0, 0.0, 0.0)];

        use_hero_ability(&mut hero, "backstab", &mut targets, 0, &rules, &mut rng, &mut log).unwrap();
        let bleed = targets[0].effect("bleed").unwrap();
        assert_eq!(bleed.duration, 2);
        assert!((bleed.damage_per_turn() - 5.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_chain_jumps_to_second_target() {
        let rules = flat_rules();
        let mut rng = StdRng::seed_from_u64(1);
        let mut log = Vec::new();
        let mut hero = hero_with("fireball");
        hero.ability_mut("fireball").unwrap().select_talent(2, "chain").unwrap();
        let mut targets = vec![dummy("a", 100.0, 0.0, 0.0), dummy("b", 100.0, 0.0, 0.0)];

        let report = use_hero_ability(&mut hero, "fireball", &mut targets, 0, &rules, &mut rng, &mut log).unwrap();
        // 22 on the primary, half of it on the next target
        assert_eq!(targets[0].current_hp(), 78);
        assert_eq!(targets[1].current_hp(), 89);
        assert_eq!(report.targets_hit, 2);
        assert_eq!(report.total_damage, 33);
    }

    #[test]
    fn test_execute_splashes_after_kill() {
        let rules = flat_rules();
        let mut rng = StdRng::seed_from_u64(1);
        let mut log = Vec::new();
        let mut hero = hero_with("cleave");
        let cleave = hero.ability_mut("cleave").unwrap();
        cleave.select_variant("focused").unwrap();
        cleave.select_talent(3, "executioner").unwrap();
        let mut targets = vec![
            dummy("a", 20.0, 0.0, 0.0),
            dummy("b", 100.0, 0.0, 0.0),
            dummy("c", 100.0, 0.0, 0.0),
        ];

        let report = use_hero_ability(&mut hero, "cleave", &mut targets, 0, &rules, &mut rng, &mut log).unwrap();
        // Focused cleave hits for 14 + 10; the kill splashes 12 to everyone left
        assert!(!targets[0].is_alive());
        assert_eq!(targets[1].current_hp(), 88);
        assert_eq!(targets[2].current_hp(), 88);
        assert_eq!(report.killed, 1);
        assert_eq!(report.total_damage, 44);
    }

    #[test]
    fn test_no_splash_without_kill() {
        let rules = flat_rules();
        let mut rng = StdRng::seed_from_u64(1);
        let mut log = Vec::new();
        let mut hero = hero_with("cleave");
        let cleave = hero.ability_mut("cleave").unwrap();
        cleave.select_variant("focused").unwrap();
        cleave.select_talent(3, "executioner").unwrap();
        let mut targets = vec![dummy("a", 100.0, 0.0, 0.0), dummy("b", 100.0, 0.0, 0.0)];

        use_hero_ability(&mut hero, "cleave", &mut targets, 0, &rules, &mut rng, &mut log).unwrap();
        assert_eq!(targets[0].current_hp(), 76);
        assert_eq!(targets[1].current_hp(), 100);
    }

    #[test]
    fn test_talent_lifesteal_heals_from_damage_dealt() {
        let rules = flat_rules();
        let mut rng = StdRng::seed_from_u64(1);
        let mut log = Vec::new();
        let mut hero = hero_with("backstab");
        hero.ability_mut("backstab").unwrap().select_talent(3, "blood_drinker").unwrap();
        hero.lose_hp(50);
        let mut targets = vec![dummy("t", 100.0, 0.0, 0.0)];

        let report = use_hero_ability(&mut hero, "backstab", &mut targets, 0, &rules, &mut rng, &mut log).unwrap();
        // 25 dealt, a quarter of it (floored) comes back
        assert_eq!(report.total_damage, 25);
        assert_eq!(targets[0].current_hp(), 75);
        assert_eq!(hero.current_hp(), 56);
        assert!(log
            .iter()
            .any(|e| matches!(e, CombatEvent::Healed { amount: 6, .. })));
    }

    #[test]
    fn test_armor_shred_lowers_defense_for_next_hit() {
        let rules = flat_rules();
        let mut rng = StdRng::seed_from_u64(1);
        let mut log = Vec::new();
        let mut hero = hero_with("cleave");
        let cleave = hero.ability_mut("cleave").unwrap();
        cleave.select_variant("focused").unwrap();
        cleave.select_talent(2, "sunder").unwrap();
        let mut targets = vec![dummy("t", 100.0, 0.0, 20.0)];

        use_hero_ability(&mut hero, "cleave", &mut targets, 0, &rules, &mut rng, &mut log).unwrap();
        // 24 against 20 defense, then defense drops to 20 × 0.85
        assert_eq!(targets[0].current_hp(), 96);
        let shred = targets[0].effect("armor_shred").unwrap();
        assert_eq!((shred.stacks, shred.duration), (1, 3));
        assert_eq!(targets[0].resolve_stats(&rules).defense, 17);

        hero.set_cooldown("cleave", 0);
        use_hero_ability(&mut hero, "cleave", &mut targets, 0, &rules, &mut rng, &mut log).unwrap();
        // 24 against 17, then a second stack: 20 × (1 - 0.15 × 2)
        assert_eq!(targets[0].current_hp(), 89);
        assert_eq!(targets[0].resolve_stats(&rules).defense, 14);
    }

    #[test]
    fn test_enemy_self_buff() {
        let rules = flat_rules();
        let mut rng = StdRng::seed_from_u64(1);
        let mut log = Vec::new();
        let mut enemy = dummy("e", 100.0, 10.0, 0.0);
        let mut hero = dummy("h", 100.0, 0.0, 0.0);

        let outcome = execute_enemy_action(
            &mut enemy,
            &mut hero,
            EnemyAction::Ability(crate::enemy::EnemyAbility::WarCry),
            &rules,
            &mut rng,
            &mut log,
        );
        assert!(outcome.is_none());
        assert!(enemy.effect("frenzy").is_some());
        assert_eq!(hero.current_hp(), 100);
    }
}
