//! Combat resolution - Hits, abilities, the event log and the battle loop

mod battle;
mod error;
mod event;
mod resolution;

pub use battle::{Battle, BattleOutcome, HeroAction};
pub use error::CombatError;
pub use event::{CombatEvent, HitEvent};
pub use resolution::{
    basic_attack, execute_enemy_action, strike, use_hero_ability, AbilityReport, StrikeOutcome,
};
