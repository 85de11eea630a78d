//! Results of combatant mutations, for the battle log and renderers

use serde::{Deserialize, Serialize};

/// Outcome of `take_damage`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DamageTaken {
    /// Incoming amount before defense
    pub raw: u32,
    /// `max(min_damage, raw - defense)`
    pub after_defense: u32,
    /// HP actually removed
    pub dealt: u32,
    pub hp_before: u32,
    pub hp_after: u32,
    pub killing_blow: bool,
    /// This hit pushed a boss into its one-time enrage
    pub enraged: bool,
    /// Damage the defender's thorns send back to the attacker
    pub reflected: u32,
}

impl DamageTaken {
    /// Rejected input: nothing happened
    pub fn none(hp: u32) -> Self {
        DamageTaken {
            hp_before: hp,
            hp_after: hp,
            ..Default::default()
        }
    }
}

/// Outcome of applying or refreshing a named effect
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EffectApplication {
    pub effect: String,
    pub stacks: u32,
    pub duration: u32,
    /// The effect was already active and got refreshed
    pub refreshed: bool,
}

/// What one end-of-turn tick did to a combatant
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TickResult {
    pub dot_damage: u32,
    pub healed: u32,
    pub resource_gained: u32,
    /// Effects whose duration ran out, in application order
    pub expired: Vec<String>,
    pub defeated: bool,
}

/// Outcome of a consumed revival
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Revival {
    pub hp: u32,
    pub resource: u32,
    pub charges_left: u32,
}
