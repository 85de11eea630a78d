//! StatValue - The layered modifier container for one stat

use serde::{Deserialize, Serialize};

/// Represents a stat built from every modifier layer, in a fixed order
///
/// Final value is calculated as:
/// `((base + gear_flat + talent_flat) × (1 + talent% + meta%) × (1 + transient%) + transient_flat) × Π(effect factors)`
///
/// - `base`: Class/level formula (or enemy scaling)
/// - `gear_flat`: Equipment, enchantment and enhancement bonuses
/// - `talent_flat`: Flat talent-tree bonuses
/// - `talent_percent` / `meta_percent`: Summed before multiplying
/// - `transient_percent` / `transient_flat`: Run items and battle-scoped bonuses
/// - `effect_factors`: Active buff/debuff factors, applied last
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StatValue {
    pub base: f64,
    pub gear_flat: f64,
    pub talent_flat: f64,
    /// Sum of talent percentages (as decimal, e.g., 0.40 = 40%)
    pub talent_percent: f64,
    /// Sum of permanent meta-progression percentages
    pub meta_percent: f64,
    pub transient_percent: f64,
    pub transient_flat: f64,
    /// One entry per active effect touching this stat
    pub effect_factors: Vec<f64>,
}

impl StatValue {
    /// Create a new StatValue with the given base
    pub fn with_base(base: f64) -> Self {
        StatValue {
            base,
            ..Default::default()
        }
    }

    /// Steps 1-3: every flat contribution
    pub fn total_flat(&self) -> f64 {
        self.base + self.gear_flat + self.talent_flat
    }

    /// Steps 4-5: talent and meta percentages sum before multiplying
    pub fn percent_multiplier(&self) -> f64 {
        1.0 + self.talent_percent + self.meta_percent
    }

    /// Value before active effects are applied
    pub fn compute_without_effects(&self) -> f64 {
        let scaled = self.total_flat() * self.percent_multiplier();
        scaled * (1.0 + self.transient_percent) + self.transient_flat
    }

    /// Product of all effect factors
    pub fn effect_multiplier(&self) -> f64 {
        self.effect_factors.iter().product()
    }

    /// Calculate the final value through all seven layers
    pub fn compute(&self) -> f64 {
        self.compute_without_effects() * self.effect_multiplier()
    }

    /// Reset to just the base value
    pub fn reset_to_base(&mut self) {
        *self = StatValue::with_base(self.base);
    }
}
