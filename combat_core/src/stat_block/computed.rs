//! CombatantStats - The resolved stat snapshot for one actor

use crate::types::Element;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Final combat numbers for one actor at one moment
///
/// Derived on demand from every modifier source and never persisted.
/// `current_hp` is always within `[0, max_hp]`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CombatantStats {
    pub max_hp: u32,
    pub current_hp: u32,
    pub max_resource: u32,
    pub current_resource: u32,
    pub defense: u32,
    pub damage: u32,
    pub crit_chance: f64,
    pub dodge: f64,
    pub lifesteal: f64,
    pub regen_per_turn: u32,
    pub gold_find: f64,
    pub elemental_damage: BTreeMap<Element, u32>,
}

impl CombatantStats {
    /// Fraction of HP remaining (0.0 - 1.0)
    pub fn hp_fraction(&self) -> f64 {
        if self.max_hp == 0 {
            return 0.0;
        }
        (self.current_hp as f64 / self.max_hp as f64).clamp(0.0, 1.0)
    }

    /// Fraction of resource remaining (0.0 - 1.0)
    pub fn resource_fraction(&self) -> f64 {
        if self.max_resource == 0 {
            return 0.0;
        }
        (self.current_resource as f64 / self.max_resource as f64).clamp(0.0, 1.0)
    }

    /// Sum of flat elemental damage across all elements
    pub fn total_elemental_damage(&self) -> u32 {
        self.elemental_damage.values().sum()
    }

    /// Elemental damage of one element
    pub fn elemental(&self, element: Element) -> u32 {
        self.elemental_damage.get(&element).copied().unwrap_or(0)
    }

    pub fn is_alive(&self) -> bool {
        self.current_hp > 0
    }
}
