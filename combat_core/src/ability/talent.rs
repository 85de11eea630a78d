//! Talent options and the secondary effects they grant

use serde::{Deserialize, Serialize};

/// A single selectable talent within one tier
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TalentOption {
    pub id: String,
    pub name: String,
    /// Damage change as a decimal (0.20 = +20%, -0.10 = -10%)
    #[serde(default)]
    pub damage_percent: f64,
    /// Resource cost change as a decimal
    #[serde(default)]
    pub cost_percent: f64,
    /// Turns added to (or removed from) the cooldown
    #[serde(default)]
    pub cooldown_delta: i32,
    #[serde(default)]
    pub effects: Vec<SecondaryEffect>,
}

/// Extra on-hit behaviour a talent can attach to an ability
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum SecondaryEffect {
    /// Reduce the target's defense by `factor` for `duration` turns
    ArmorShred { factor: f64, duration: u32 },
    /// Jump to a second target for `fraction` of the damage
    Chain { fraction: f64 },
    /// On a killing blow, splash `splash_fraction` of the hit to nearby foes
    ExecuteAoe { splash_fraction: f64 },
    /// Heal for `fraction` of damage dealt
    Lifesteal { fraction: f64 },
    /// Damage-over-time bleed on the target
    Bleed { damage_per_turn: f64, duration: u32 },
}

impl TalentOption {
    /// Damage multiplier contributed by this talent
    pub fn damage_multiplier(&self) -> f64 {
        1.0 + self.damage_percent
    }

    /// Cost multiplier contributed by this talent
    pub fn cost_multiplier(&self) -> f64 {
        1.0 + self.cost_percent
    }
}
