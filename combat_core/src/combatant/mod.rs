//! Combatants - Hero classes and live per-actor battle state

mod class;
mod result;
mod state;

pub use class::{Attributes, CharacterClass};
pub use result::{DamageTaken, EffectApplication, Revival, TickResult};
pub use state::{CombatantKind, CombatantState};
