//! CombatEvent - Observational log entries for renderers

use crate::combatant::TickResult;
use serde::{Deserialize, Serialize};

/// Per-hit payload: how much landed and how
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct HitEvent {
    pub amount: u32,
    pub is_critical: bool,
    pub is_dodge: bool,
}

/// Something that happened in battle
///
/// Purely observational: nothing in the engine reads events back.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum CombatEvent {
    ActionChosen {
        actor: String,
        action: String,
    },
    Hit {
        attacker: String,
        target: String,
        amount: u32,
        is_critical: bool,
        is_dodge: bool,
    },
    EffectApplied {
        target: String,
        effect: String,
        stacks: u32,
        duration: u32,
    },
    EffectExpired {
        target: String,
        effect: String,
    },
    DotDamage {
        target: String,
        amount: u32,
    },
    Healed {
        target: String,
        amount: u32,
    },
    Incapacitated {
        actor: String,
    },
    Enraged {
        actor: String,
    },
    Revived {
        actor: String,
        hp: u32,
        resource: u32,
    },
    Defeated {
        actor: String,
    },
}

impl CombatEvent {
    pub fn hit(attacker: &str, target: &str, hit: HitEvent) -> Self {
        CombatEvent::Hit {
            attacker: attacker.to_string(),
            target: target.to_string(),
            amount: hit.amount,
            is_critical: hit.is_critical,
            is_dodge: hit.is_dodge,
        }
    }

    /// Events describing an end-of-turn tick
    pub fn from_tick(actor: &str, tick: &TickResult) -> Vec<CombatEvent> {
        let mut events = Vec::new();
        if tick.dot_damage > 0 {
            events.push(CombatEvent::DotDamage {
                target: actor.to_string(),
                amount: tick.dot_damage,
            });
        }
        if tick.healed > 0 {
            events.push(CombatEvent::Healed {
                target: actor.to_string(),
                amount: tick.healed,
            });
        }
        for effect in &tick.expired {
            events.push(CombatEvent::EffectExpired {
                target: actor.to_string(),
                effect: effect.clone(),
            });
        }
        events
    }
}
