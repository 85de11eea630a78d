//! Battle - Turn loop between one hero and a group of enemies

use super::error::CombatError;
use super::event::CombatEvent;
use super::resolution::{basic_attack, execute_enemy_action, use_hero_ability};
use crate::combatant::CombatantState;
use crate::config::CombatRules;
use crate::enemy::{choose_action, BattleContext, Reward};
use rand::Rng;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BattleOutcome {
    Ongoing,
    Victory,
    Defeat,
}

/// What the player asked the hero to do this turn
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum HeroAction {
    Attack { target: usize },
    Ability { id: String, target: usize },
    Wait,
}

/// A running battle
///
/// Each `take_turn` is one full cycle: hero acts and ticks, then every
/// living enemy acts and ticks, with deaths settled after each actor.
#[derive(Debug, Clone)]
pub struct Battle {
    rules: CombatRules,
    hero: CombatantState,
    enemies: Vec<CombatantState>,
    defeated: Vec<bool>,
    turn: u32,
    outcome: BattleOutcome,
    log: Vec<CombatEvent>,
}

impl Battle {
    pub fn new(hero: CombatantState, enemies: Vec<CombatantState>, rules: CombatRules) -> Self {
        let defeated = vec![false; enemies.len()];
        let mut battle = Battle {
            rules,
            hero,
            enemies,
            defeated,
            turn: 0,
            outcome: BattleOutcome::Ongoing,
            log: Vec::new(),
        };
        battle.settle();
        battle
    }

    pub fn hero(&self) -> &CombatantState {
        &self.hero
    }

    pub fn hero_mut(&mut self) -> &mut CombatantState {
        &mut self.hero
    }

    pub fn enemies(&self) -> &[CombatantState] {
        &self.enemies
    }

    pub fn rules(&self) -> &CombatRules {
        &self.rules
    }

    pub fn turn(&self) -> u32 {
        self.turn
    }

    pub fn outcome(&self) -> BattleOutcome {
        self.outcome
    }

    pub fn events(&self) -> &[CombatEvent] {
        &self.log
    }

    /// Hand the accumulated events to a renderer, clearing the log
    pub fn drain_events(&mut self) -> Vec<CombatEvent> {
        std::mem::take(&mut self.log)
    }

    /// The event log as JSON
    pub fn events_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(&self.log)
    }

    /// Index of the first enemy still standing
    pub fn first_living_enemy(&self) -> Option<usize> {
        self.enemies.iter().position(CombatantState::is_alive)
    }

    /// Rewards for every enemy defeated so far
    pub fn rewards(&self) -> Reward {
        self.enemies
            .iter()
            .zip(&self.defeated)
            .filter(|(_, defeated)| **defeated)
            .filter_map(|(enemy, _)| enemy.enemy_definition().map(|d| d.reward()))
            .fold(Reward::default(), |total, reward| total + reward)
    }

    /// Play one full turn
    ///
    /// A refused hero action returns `Err` before anything changes.
    pub fn take_turn(
        &mut self,
        action: HeroAction,
        rng: &mut impl Rng,
    ) -> Result<BattleOutcome, CombatError> {
        if self.outcome != BattleOutcome::Ongoing {
            return Err(CombatError::BattleOver);
        }

        self.hero_phase(action, rng)?;
        self.turn += 1;

        let tick = self.hero.tick(&self.rules);
        self.log.extend(CombatEvent::from_tick(&self.hero.id, &tick));
        if self.settle() != BattleOutcome::Ongoing {
            return Ok(self.outcome);
        }

        self.enemy_phase(rng);
        Ok(self.outcome)
    }

    fn hero_phase(&mut self, action: HeroAction, rng: &mut impl Rng) -> Result<(), CombatError> {
        if self.hero.is_incapacitated() {
            self.log.push(CombatEvent::Incapacitated {
                actor: self.hero.id.clone(),
            });
            return Ok(());
        }

        match action {
            HeroAction::Attack { target } => {
                let enemy = self
                    .enemies
                    .get_mut(target)
                    .ok_or(CombatError::InvalidTarget(target))?;
                if !enemy.is_alive() {
                    return Err(CombatError::ActorDefeated(enemy.name.clone()));
                }
                self.log.push(CombatEvent::ActionChosen {
                    actor: self.hero.id.clone(),
                    action: "basic_attack".to_string(),
                });
                basic_attack(&mut self.hero, enemy, &self.rules, rng, &mut self.log);
            }
            HeroAction::Ability { id, target } => {
                let report = use_hero_ability(
                    &mut self.hero,
                    &id,
                    &mut self.enemies,
                    target,
                    &self.rules,
                    rng,
                    &mut self.log,
                )?;
                debug!(ability = %report.ability, damage = report.total_damage, "hero used ability");
            }
            HeroAction::Wait => {
                self.log.push(CombatEvent::ActionChosen {
                    actor: self.hero.id.clone(),
                    action: "wait".to_string(),
                });
            }
        }
        Ok(())
    }

    fn enemy_phase(&mut self, rng: &mut impl Rng) {
        for index in 0..self.enemies.len() {
            if !self.enemies[index].is_alive() {
                continue;
            }
            let enemy = &mut self.enemies[index];

            if enemy.is_incapacitated() {
                self.log.push(CombatEvent::Incapacitated {
                    actor: enemy.id.clone(),
                });
            } else {
                let context = BattleContext::new(self.turn, &self.hero);
                let action = choose_action(enemy, &context, &self.rules, rng);
                self.log.push(CombatEvent::ActionChosen {
                    actor: enemy.id.clone(),
                    action: action.label().to_string(),
                });
                execute_enemy_action(enemy, &mut self.hero, action, &self.rules, rng, &mut self.log);
            }

            let tick = enemy.tick(&self.rules);
            self.log.extend(CombatEvent::from_tick(&enemy.id, &tick));

            if self.settle() != BattleOutcome::Ongoing {
                return;
            }
        }
    }

    /// Resolve deaths; a hero revival is always tried before defeat is declared
    fn settle(&mut self) -> BattleOutcome {
        if !self.hero.is_alive() {
            match self.hero.try_revive(&self.rules) {
                Some(revival) => self.log.push(CombatEvent::Revived {
                    actor: self.hero.id.clone(),
                    hp: revival.hp,
                    resource: revival.resource,
                }),
                None => {
                    self.log.push(CombatEvent::Defeated {
                        actor: self.hero.id.clone(),
                    });
                    info!(turn = self.turn, "battle lost");
                    self.outcome = BattleOutcome::Defeat;
                    return self.outcome;
                }
            }
        }

        for (enemy, defeated) in self.enemies.iter_mut().zip(self.defeated.iter_mut()) {
            if *defeated || enemy.is_alive() {
                continue;
            }
            if let Some(revival) = enemy.try_revive(&self.rules) {
                self.log.push(CombatEvent::Revived {
                    actor: enemy.id.clone(),
                    hp: revival.hp,
                    resource: revival.resource,
                });
                continue;
            }
            *defeated = true;
            self.log.push(CombatEvent::Defeated {
                actor: enemy.id.clone(),
            });
        }

        if self.defeated.iter().all(|d| *d) {
            info!(turn = self.turn, "battle won");
            self.outcome = BattleOutcome::Victory;
        }
        self.outcome
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::combatant::CharacterClass;
    use crate::enemy::{Archetype, EnemyDefinition, EnemyTier};
    use crate::types::{StatBonus, StatKind};
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn weakling() -> CombatantState {
        CombatantState::enemy(EnemyDefinition::new(Archetype::Swarm, EnemyTier::Normal, 1))
            .with_base_stats(vec![
                StatBonus::new(StatKind::MaxHp, 5.0),
                StatBonus::new(StatKind::Damage, 1.0),
            ])
    }

    #[test]
    fn test_victory_and_rewards() {
        let mut rng = StdRng::seed_from_u64(5);
        let hero = CombatantState::hero(CharacterClass::Warrior, 3);
        let mut battle = Battle::new(hero, vec![weakling()], CombatRules::default());

        let mut turns = 0;
        while battle.outcome() == BattleOutcome::Ongoing && turns < 20 {
            let target = battle.first_living_enemy().unwrap();
            battle.take_turn(HeroAction::Attack { target }, &mut rng).unwrap();
            turns += 1;
        }
        assert_eq!(battle.outcome(), BattleOutcome::Victory);
        assert_eq!(battle.rewards(), Reward { xp: 15, gold: 8 });
        assert!(battle
            .events()
            .iter()
            .any(|e| matches!(e, CombatEvent::Defeated { .. })));
    }

    #[test]
    fn test_turn_after_end_is_refused() {
        let mut rng = StdRng::seed_from_u64(5);
        let hero = CombatantState::hero(CharacterClass::Warrior, 1);
        let mut battle = Battle::new(hero, Vec::new(), CombatRules::default());
        assert_eq!(battle.outcome(), BattleOutcome::Victory);
        assert_eq!(
            battle.take_turn(HeroAction::Wait, &mut rng),
            Err(CombatError::BattleOver)
        );
    }

    #[test]
    fn test_refused_action_does_not_advance() {
        let mut rng = StdRng::seed_from_u64(5);
        let hero = CombatantState::hero(CharacterClass::Warrior, 1);
        let mut battle = Battle::new(hero, vec![weakling()], CombatRules::default());
        let result = battle.take_turn(HeroAction::Attack { target: 4 }, &mut rng);
        assert_eq!(result, Err(CombatError::InvalidTarget(4)));
        assert_eq!(battle.turn(), 0);
        assert!(battle.events().is_empty());
    }

    #[test]
    fn test_events_serialize() {
        let mut rng = StdRng::seed_from_u64(8);
        let hero = CombatantState::hero(CharacterClass::Rogue, 1);
        let mut battle = Battle::new(hero, vec![weakling()], CombatRules::default());
        battle.take_turn(HeroAction::Wait, &mut rng).unwrap();
        let json = battle.events_json().unwrap();
        assert!(json.contains("\"event\":\"action_chosen\""));
    }
}
