//! EffectStack - An active named effect with stacks and remaining duration

use super::spec::{EffectModifier, EffectSpec};
use crate::source::{priority, StatSource};
use crate::stat_block::{ModifierLayer, StatAccumulator};
use crate::types::StatKind;
use serde::{Deserialize, Serialize};

/// What one turn of decay produced
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct EffectTick {
    pub damage: f64,
    pub heal: f64,
    /// Duration reached zero on this tick
    pub expired: bool,
}

/// An active buff or debuff on one combatant
///
/// `stacks` stays within `[1, spec.max_stacks]`; the stack is active
/// exactly while `duration > 0`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EffectStack {
    pub spec: EffectSpec,
    pub stacks: u32,
    pub duration: u32,
}

impl EffectStack {
    /// First application of an effect
    pub fn new(spec: EffectSpec, duration: u32) -> Self {
        EffectStack {
            spec,
            stacks: 1,
            duration,
        }
    }

    pub fn name(&self) -> &str {
        &self.spec.name
    }

    pub fn is_active(&self) -> bool {
        self.duration > 0
    }

    /// Reapplication: one more stack up to the cap, duration never shortened
    pub fn refresh(&mut self, duration: u32) {
        self.stacks = (self.stacks + 1).min(self.spec.max_stacks.max(1));
        self.duration = self.duration.max(duration);
    }

    /// Stacked factor for a stat, if this effect touches it
    ///
    /// `1 + (factor - 1) × stacks`, floored at zero.
    pub fn factor(&self, stat: StatKind) -> Option<f64> {
        let mut touched = false;
        let mut combined = 1.0;
        for modifier in &self.spec.modifiers {
            if let EffectModifier::Factor { stat: s, factor } = modifier {
                if *s == stat {
                    touched = true;
                    combined *= (1.0 + (factor - 1.0) * self.stacks as f64).max(0.0);
                }
            }
        }
        touched.then_some(combined)
    }

    /// Damage this effect deals per tick at the current stack count
    pub fn damage_per_turn(&self) -> f64 {
        self.spec.damage_per_turn() * self.stacks as f64
    }

    /// Healing this effect grants per tick at the current stack count
    pub fn heal_per_turn(&self) -> f64 {
        self.spec.heal_per_turn() * self.stacks as f64
    }

    /// Apply per-turn damage and healing, then decrement the duration
    pub fn tick(&mut self) -> EffectTick {
        if !self.is_active() {
            return EffectTick {
                expired: true,
                ..Default::default()
            };
        }
        let damage = self.damage_per_turn();
        let heal = self.heal_per_turn();
        self.duration -= 1;
        EffectTick {
            damage,
            heal,
            expired: self.duration == 0,
        }
    }
}

impl StatSource for EffectStack {
    fn id(&self) -> &str {
        &self.spec.name
    }

    fn priority(&self) -> i32 {
        priority::EFFECT
    }

    fn apply(&self, stats: &mut StatAccumulator) {
        if !self.is_active() {
            return;
        }
        for stat in StatKind::all() {
            if let Some(factor) = self.factor(*stat) {
                stats.add(ModifierLayer::EffectFactor, *stat, factor);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sunder() -> EffectSpec {
        EffectSpec::new("sunder", 3)
            .debuff()
            .with_factor(StatKind::Defense, 0.9)
    }

    #[test]
    fn test_linear_factor_stacking() {
        let mut stack = EffectStack::new(sunder(), 3);
        stack.refresh(3);
        stack.refresh(3);
        assert_eq!(stack.stacks, 3);
        // 1 + (0.9 - 1) * 3 = 0.7, not 0.9^3
        let factor = stack.factor(StatKind::Defense).unwrap();
        assert!((factor - 0.7).abs() < 1e-9);
    }

    #[test]
    fn test_stacks_cap() {
        let mut stack = EffectStack::new(sunder(), 3);
        for _ in 0..10 {
            stack.refresh(3);
        }
        assert_eq!(stack.stacks, 3);
    }

    #[test]
    fn test_refresh_never_shortens() {
        let mut stack = EffectStack::new(sunder(), 5);
        stack.refresh(2);
        assert_eq!(stack.duration, 5);
        stack.refresh(7);
        assert_eq!(stack.duration, 7);
    }

    #[test]
    fn test_dot_is_additive_per_stack() {
        let mut stack = EffectStack::new(EffectSpec::damage_over_time("poison", 3.0, 5), 2);
        stack.refresh(2);
        assert!((stack.damage_per_turn() - 6.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_tick_damages_then_expires() {
        let mut stack = EffectStack::new(EffectSpec::damage_over_time("burn", 4.0, 3), 2);

        let first = stack.tick();
        assert!((first.damage - 4.0).abs() < f64::EPSILON);
        assert!(!first.expired);
        assert!(stack.is_active());

        let second = stack.tick();
        assert!((second.damage - 4.0).abs() < f64::EPSILON);
        assert!(second.expired);
        assert!(!stack.is_active());
    }

    #[test]
    fn test_untouched_stat_has_no_factor() {
        let stack = EffectStack::new(sunder(), 1);
        assert!(stack.factor(StatKind::Damage).is_none());
    }

    #[test]
    fn test_factor_floor_at_zero() {
        let spec = EffectSpec::new("cripple", 5).with_factor(StatKind::Dodge, 0.5);
        let mut stack = EffectStack::new(spec, 3);
        for _ in 0..4 {
            stack.refresh(3);
        }
        assert!((stack.factor(StatKind::Dodge).unwrap() - 0.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_stat_source_pushes_factor() {
        let stack = EffectStack::new(sunder(), 2);
        let mut acc = StatAccumulator::new();
        acc.add(ModifierLayer::Base, StatKind::Defense, 10.0);
        stack.apply(&mut acc);
        assert!((acc.compute(StatKind::Defense) - 9.0).abs() < 1e-9);
    }
}
