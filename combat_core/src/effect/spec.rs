//! EffectSpec - What a named buff or debuff does per stack

use crate::types::StatKind;
use serde::{Deserialize, Serialize};

/// One thing an effect does while active
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum EffectModifier {
    /// Scales a stat; the deviation from 1.0 grows linearly with stacks
    Factor { stat: StatKind, factor: f64 },
    /// Damage dealt to the owner each tick, per stack
    DamagePerTurn { amount: f64 },
    /// Healing granted to the owner each tick, per stack
    HealPerTurn { amount: f64 },
}

/// Definition of a named effect
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EffectSpec {
    pub name: String,
    pub modifiers: Vec<EffectModifier>,
    pub max_stacks: u32,
    #[serde(default)]
    pub is_debuff: bool,
    /// Owner skips its action while this is active (stun, freeze)
    #[serde(default)]
    pub prevents_action: bool,
}

impl EffectSpec {
    pub fn new(name: impl Into<String>, max_stacks: u32) -> Self {
        EffectSpec {
            name: name.into(),
            modifiers: Vec::new(),
            max_stacks: max_stacks.max(1),
            is_debuff: false,
            prevents_action: false,
        }
    }

    pub fn debuff(mut self) -> Self {
        self.is_debuff = true;
        self
    }

    pub fn preventing_action(mut self) -> Self {
        self.prevents_action = true;
        self
    }

    pub fn with_factor(mut self, stat: StatKind, factor: f64) -> Self {
        self.modifiers.push(EffectModifier::Factor { stat, factor });
        self
    }

    pub fn with_damage_per_turn(mut self, amount: f64) -> Self {
        self.modifiers.push(EffectModifier::DamagePerTurn { amount });
        self
    }

    pub fn with_heal_per_turn(mut self, amount: f64) -> Self {
        self.modifiers.push(EffectModifier::HealPerTurn { amount });
        self
    }

    /// A damage-only debuff, used for unknown effect names and ad-hoc bleeds
    pub fn damage_over_time(name: impl Into<String>, amount: f64, max_stacks: u32) -> Self {
        EffectSpec::new(name, max_stacks)
            .debuff()
            .with_damage_per_turn(amount)
    }

    /// Sum of per-stack damage modifiers
    pub fn damage_per_turn(&self) -> f64 {
        self.modifiers
            .iter()
            .map(|m| match m {
                EffectModifier::DamagePerTurn { amount } => *amount,
                _ => 0.0,
            })
            .sum()
    }

    /// Sum of per-stack healing modifiers
    pub fn heal_per_turn(&self) -> f64 {
        self.modifiers
            .iter()
            .map(|m| match m {
                EffectModifier::HealPerTurn { amount } => *amount,
                _ => 0.0,
            })
            .sum()
    }
}
