//! CombatError - Caller-visible failures on the player action path

use thiserror::Error;

/// Why a hero action was refused; a refused action changes nothing
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CombatError {
    #[error("Cannot afford '{ability}': costs {cost}, have {available}")]
    CannotAfford {
        ability: String,
        cost: u32,
        available: u32,
    },
    #[error("'{ability}' is on cooldown for {turns} more turn(s)")]
    OnCooldown { ability: String, turns: u32 },
    #[error("Unknown ability '{0}'")]
    UnknownAbility(String),
    #[error("{0} is defeated")]
    ActorDefeated(String),
    #[error("No target at index {0}")]
    InvalidTarget(usize),
    #[error("The battle is already over")]
    BattleOver,
}
