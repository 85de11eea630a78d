//! combat_core - Turn-based RPG combat engine
//!
//! This library provides:
//! - Stat aggregation: layered stat sources folded into a resolved snapshot
//! - Effects: stacking buffs and debuffs with duration decay
//! - Abilities: variants and talent tiers composed into final numbers
//! - Combatants: live per-actor state with damage, healing, effects and ticks
//! - Enemy AI: archetype-weighted, cooldown- and HP-gated action selection
//! - Loot: depth-scaled, rarity-gated equipment and run items

pub mod ability;
pub mod combat;
pub mod combatant;
pub mod config;
pub mod defense;
pub mod effect;
pub mod enemy;
pub mod loot;
pub mod prelude;
pub mod run;
pub mod source;
pub mod stat_block;
pub mod types;

// Re-export core types for convenience
pub use ability::{AbilityConfiguration, AbilityDefinition, AbilityError, ResolvedAbility};
pub use combat::{Battle, BattleOutcome, CombatError, CombatEvent, HeroAction, HitEvent};
pub use combatant::{CharacterClass, CombatantState, DamageTaken, TickResult};
pub use config::{default_abilities, CombatRules, ConfigError, GameConstants};
pub use effect::{EffectModifier, EffectRegistry, EffectSpec, EffectStack};
pub use enemy::{choose_action, Archetype, BattleContext, EnemyAction, EnemyDefinition, EnemyTier};
pub use loot::{Equipment, LootGenerator, RunItem, RunItemFactory};
pub use run::{DungeonRun, HeroTransientCombatState};
pub use source::StatSource;
pub use stat_block::{CombatantStats, StatAccumulator, StatValue};
pub use types::{Element, Rarity, ResourceKind, StatKind};
