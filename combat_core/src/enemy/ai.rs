//! EnemyAI - Priority-table action selection for enemies

use super::ability::{AbilityCategory, EnemyAbility};
use super::definition::EnemyDefinition;
use crate::combatant::CombatantState;
use crate::config::CombatRules;
use rand::Rng;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// What an enemy does with its turn
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "ability", rename_all = "snake_case")]
pub enum EnemyAction {
    BasicAttack,
    Ability(EnemyAbility),
}

impl EnemyAction {
    pub fn label(&self) -> &'static str {
        match self {
            EnemyAction::BasicAttack => "basic_attack",
            EnemyAction::Ability(ability) => ability.id(),
        }
    }
}

/// Battle state the AI may look at beyond its own combatant
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BattleContext {
    pub turn: u32,
    /// Target's HP as a fraction of its max
    pub target_hp_fraction: f64,
}

impl BattleContext {
    pub fn new(turn: u32, target: &CombatantState) -> Self {
        BattleContext {
            turn,
            target_hp_fraction: target.hp_fraction(),
        }
    }
}

/// Abilities the actor could use right now: off cooldown, affordable, gate open
pub fn eligible_abilities(
    definition: &EnemyDefinition,
    actor: &CombatantState,
    context: &BattleContext,
) -> Vec<EnemyAbility> {
    let self_hp = actor.hp_fraction();
    definition
        .abilities
        .iter()
        .copied()
        .filter(|ability| {
            actor.cooldown(ability.id()) == 0
                && ability.profile().resource_cost <= actor.current_resource()
                && ability.gate_open(self_hp, context.target_hp_fraction)
        })
        .collect()
}

/// Pick an action without committing it
///
/// Always consumes exactly one random draw, so the same seed and state
/// always pick the same action.
pub fn select_action(
    definition: &EnemyDefinition,
    actor: &CombatantState,
    context: &BattleContext,
    rules: &CombatRules,
    rng: &mut impl Rng,
) -> EnemyAction {
    let profile = definition.archetype.profile();
    let roll: f64 = rng.gen();

    let mut eligible = eligible_abilities(definition, actor, context);
    if roll >= profile.ability_use_bonus || eligible.is_empty() {
        return EnemyAction::BasicAttack;
    }
    eligible.sort_by_key(|a| profile.category_rank(a.category()));

    // (a) defend when low
    if profile.prefers_defense_when_low && actor.hp_fraction() <= profile.healing_threshold {
        if let Some(ability) = eligible
            .iter()
            .find(|a| a.category() == AbilityCategory::Defensive)
        {
            return EnemyAction::Ability(*ability);
        }
    }

    // (b) finish a weakened target
    if profile.prefers_execute_when_enemy_low
        && context.target_hp_fraction <= rules.constants.ai.low_target_hp
    {
        let finisher = eligible.iter().find(|a| a.is_execute()).or_else(|| {
            eligible
                .iter()
                .find(|a| a.category() == AbilityCategory::Tactical)
        });
        if let Some(ability) = finisher {
            return EnemyAction::Ability(*ability);
        }
    }

    // (c) first eligible in preference order
    eligible
        .first()
        .map(|a| EnemyAction::Ability(*a))
        .unwrap_or(EnemyAction::BasicAttack)
}

/// Choose an action and commit it: set the ability's cooldown and pay its cost
pub fn choose_action(
    actor: &mut CombatantState,
    context: &BattleContext,
    rules: &CombatRules,
    rng: &mut impl Rng,
) -> EnemyAction {
    let Some(definition) = actor.enemy_definition() else {
        return EnemyAction::BasicAttack;
    };
    let action = select_action(definition, actor, context, rules, rng);

    if let EnemyAction::Ability(ability) = action {
        let profile = ability.profile();
        actor.set_cooldown(ability.id(), profile.cooldown);
        actor.spend_resource(profile.resource_cost);
    }
    debug!(actor = %actor.id, action = action.label(), turn = context.turn, "enemy chose action");
    action
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::enemy::{Archetype, EnemyTier};
    use crate::types::{StatBonus, StatKind};
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    /// Always rolls zero, so every archetype tries an ability
    struct AlwaysLow;

    impl rand::RngCore for AlwaysLow {
        fn next_u32(&mut self) -> u32 {
            0
        }
        fn next_u64(&mut self) -> u64 {
            0
        }
        fn fill_bytes(&mut self, dest: &mut [u8]) {
            dest.fill(0);
        }
        fn try_fill_bytes(&mut self, dest: &mut [u8]) -> Result<(), rand::Error> {
            dest.fill(0);
            Ok(())
        }
    }

    fn enemy(archetype: Archetype) -> CombatantState {
        CombatantState::enemy(EnemyDefinition::new(archetype, EnemyTier::Normal, 3)).with_base_stats(
            vec![
                StatBonus::new(StatKind::MaxHp, 100.0),
                StatBonus::new(StatKind::MaxResource, 100.0),
                StatBonus::new(StatKind::Damage, 10.0),
            ],
        )
    }

    fn context(target_hp: f64) -> BattleContext {
        BattleContext {
            turn: 1,
            target_hp_fraction: target_hp,
        }
    }

    #[test]
    fn test_cooldown_filters() {
        let mut actor = enemy(Archetype::Swarm);
        let definition = actor.enemy_definition().unwrap().clone();
        assert_eq!(eligible_abilities(&definition, &actor, &context(1.0)), vec![EnemyAbility::Rend]);
        actor.set_cooldown("rend", 1);
        assert!(eligible_abilities(&definition, &actor, &context(1.0)).is_empty());
    }

    #[test]
    fn test_gate_filters() {
        let actor = enemy(Archetype::Assassin);
        let definition = actor.enemy_definition().unwrap().clone();
        let healthy = eligible_abilities(&definition, &actor, &context(1.0));
        assert!(!healthy.contains(&EnemyAbility::Execute));
        let weak = eligible_abilities(&definition, &actor, &context(0.2));
        assert!(weak.contains(&EnemyAbility::Execute));
    }

    #[test]
    fn test_unaffordable_filtered() {
        let mut actor = enemy(Archetype::Swarm);
        let definition = actor.enemy_definition().unwrap().clone();
        let all = actor.current_resource();
        actor.spend_resource(all);
        assert!(eligible_abilities(&definition, &actor, &context(1.0)).is_empty());
    }

    #[test]
    fn test_defends_when_low() {
        let rules = CombatRules::default();
        let mut actor = enemy(Archetype::Tank);
        actor.take_damage(70, &rules);
        let action = choose_action(&mut actor, &context(1.0), &rules, &mut AlwaysLow);
        assert_eq!(action, EnemyAction::Ability(EnemyAbility::ShieldWall));
        assert_eq!(actor.cooldown("shield_wall"), 4);
        assert_eq!(actor.current_resource(), 90);
    }

    #[test]
    fn test_executes_low_target() {
        let rules = CombatRules::default();
        let mut actor = enemy(Archetype::Berserker);
        let action = choose_action(&mut actor, &context(0.2), &rules, &mut AlwaysLow);
        assert_eq!(action, EnemyAction::Ability(EnemyAbility::Execute));

        // With the execute on cooldown, the tactical shout is next
        let action = choose_action(&mut actor, &context(0.2), &rules, &mut AlwaysLow);
        assert_eq!(action, EnemyAction::Ability(EnemyAbility::WarCry));
    }

    #[test]
    fn test_preference_order() {
        let rules = CombatRules::default();
        let mut actor = enemy(Archetype::Caster);
        let action = choose_action(&mut actor, &context(1.0), &rules, &mut AlwaysLow);
        assert_eq!(action, EnemyAction::Ability(EnemyAbility::Fireball));
    }

    #[test]
    fn test_basic_attack_when_roll_fails() {
        let rules = CombatRules::default();
        let actor = enemy(Archetype::Caster);
        let definition = actor.enemy_definition().unwrap().clone();

        // Highest possible draw never beats any ability_use_bonus
        struct AlwaysHigh;
        impl rand::RngCore for AlwaysHigh {
            fn next_u32(&mut self) -> u32 {
                u32::MAX
            }
            fn next_u64(&mut self) -> u64 {
                u64::MAX
            }
            fn fill_bytes(&mut self, dest: &mut [u8]) {
                dest.fill(0xff);
            }
            fn try_fill_bytes(&mut self, dest: &mut [u8]) -> Result<(), rand::Error> {
                dest.fill(0xff);
                Ok(())
            }
        }
        let action = select_action(&definition, &actor, &context(1.0), &rules, &mut AlwaysHigh);
        assert_eq!(action, EnemyAction::BasicAttack);
    }

    #[test]
    fn test_deterministic_for_seed() {
        let rules = CombatRules::default();
        let run = |seed: u64| {
            let mut rng = StdRng::seed_from_u64(seed);
            let mut actor = enemy(Archetype::EliteGuard);
            (0..10)
                .map(|_| {
                    let action = choose_action(&mut actor, &context(0.5), &rules, &mut rng);
                    actor.tick(&rules);
                    action
                })
                .collect::<Vec<_>>()
        };
        assert_eq!(run(99), run(99));
    }
}
