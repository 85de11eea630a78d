//! Prelude module for convenient imports
//!
//! ```rust
//! use combat_core::prelude::*;
//! ```

// Stats
pub use crate::stat_block::{CombatantStats, StatAccumulator, StatValue};
pub use crate::types::{Element, EquipmentSlot, Rarity, ResourceKind, StatBonus, StatKind};

// Sources
pub use crate::source::{GearSource, MetaProgression, StatSource, TalentTreeSource};

// Effects
pub use crate::effect::{EffectRegistry, EffectSpec, EffectStack};

// Abilities
pub use crate::ability::{AbilityConfiguration, AbilityDefinition};

// Combatants and battle
pub use crate::combat::{Battle, BattleOutcome, CombatError, CombatEvent, HeroAction};
pub use crate::combatant::{CharacterClass, CombatantState};
pub use crate::enemy::{choose_action, Affix, Archetype, BattleContext, EnemyAction, EnemyDefinition, EnemyTier, Reward};

// Loot and runs
pub use crate::loot::{Equipment, LootGenerator, RunItem, RunItemFactory};
pub use crate::run::DungeonRun;

// Config
pub use crate::config::{default_abilities, load_ability_configs, CombatRules, GameConstants};
