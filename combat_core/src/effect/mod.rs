//! Effects - Named buffs and debuffs with stacking and duration decay

mod spec;
mod stack;

pub use spec::{EffectModifier, EffectSpec};
pub use stack::{EffectStack, EffectTick};

use crate::config::GameConstants;
use crate::types::StatKind;
use std::collections::BTreeMap;
use tracing::warn;

/// Registry of known effect definitions
#[derive(Debug, Clone, Default)]
pub struct EffectRegistry {
    specs: BTreeMap<String, EffectSpec>,
    generic_dot_damage: f64,
    default_max_stacks: u32,
}

impl EffectRegistry {
    /// Create an empty registry; unknown names still resolve to a generic DoT
    pub fn new(constants: &GameConstants) -> Self {
        EffectRegistry {
            specs: BTreeMap::new(),
            generic_dot_damage: constants.effects.generic_dot_damage,
            default_max_stacks: constants.effects.default_max_stacks.max(1),
        }
    }

    /// Register an effect, replacing any earlier one with the same name
    pub fn register(&mut self, spec: EffectSpec) {
        self.specs.insert(spec.name.clone(), spec);
    }

    /// Get an effect definition by name
    pub fn get(&self, name: &str) -> Option<&EffectSpec> {
        self.specs.get(name)
    }

    /// Get an effect definition, falling back to a generic DoT for unknown names
    pub fn resolve(&self, name: &str) -> EffectSpec {
        match self.specs.get(name) {
            Some(spec) => spec.clone(),
            None => {
                warn!(effect = name, "unknown effect, using generic damage over time");
                EffectSpec::damage_over_time(name, self.generic_dot_damage, self.default_max_stacks)
            }
        }
    }

    /// Registered effect names in sorted order
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.specs.keys().map(String::as_str)
    }

    /// Load the default effect presets
    pub fn with_defaults(constants: &GameConstants) -> Self {
        let mut registry = Self::new(constants);
        let stacks = registry.default_max_stacks;

        registry.register(EffectSpec::damage_over_time("poison", 3.0, stacks));
        registry.register(EffectSpec::damage_over_time("burn", 4.0, 3));
        registry.register(EffectSpec::damage_over_time("bleed", 2.0, stacks));

        registry.register(
            EffectSpec::new("sunder", 3)
                .debuff()
                .with_factor(StatKind::Defense, 0.9),
        );
        registry.register(
            EffectSpec::new("weakness", 3)
                .debuff()
                .with_factor(StatKind::Damage, 0.8),
        );
        registry.register(EffectSpec::new("fortify", 1).with_factor(StatKind::Defense, 1.5));
        registry.register(EffectSpec::new("frenzy", 3).with_factor(StatKind::Damage, 1.3));
        registry.register(EffectSpec::new("evasive", 1).with_factor(StatKind::Dodge, 1.5));

        registry.register(EffectSpec::new("stun", 1).debuff().preventing_action());
        registry.register(
            EffectSpec::new("freeze", 1)
                .debuff()
                .preventing_action()
                .with_factor(StatKind::Dodge, 0.0),
        );

        registry.register(EffectSpec::new("regeneration", 3).with_heal_per_turn(4.0));

        registry
    }
}
