//! Enemies - Archetypes, tiers, affixes, abilities and the AI that drives them

mod ability;
mod affix;
mod ai;
mod archetype;
mod definition;
mod tier;

pub use ability::{AbilityCategory, AbilityEffect, AbilityProfile, EffectTarget, EnemyAbility, GateSubject};
pub use affix::Affix;
pub use ai::{choose_action, eligible_abilities, select_action, BattleContext, EnemyAction};
pub use archetype::{Archetype, ArchetypeProfile};
pub use definition::{tier_for_roll, EnemyDefinition, Reward, BOSS_LEVEL_MARGIN};
pub use tier::EnemyTier;
