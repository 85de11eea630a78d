//! StatSource - Trait and implementations for stat providers

mod base_stats;
mod gear;
mod meta;
mod talent_tree;

pub use base_stats::BaseStatsSource;
pub use gear::GearSource;
pub use meta::MetaProgression;
pub use talent_tree::{TalentNodeModifier, TalentTreeSource};

use crate::stat_block::StatAccumulator;

/// Priority of each built-in source, lowest applied first
pub mod priority {
    pub const BASE: i32 = -100;
    pub const GEAR: i32 = 0;
    pub const TALENT_TREE: i32 = 100;
    pub const META: i32 = 150;
    pub const TRANSIENT: i32 = 200;
    pub const EFFECT: i32 = 300;
}

/// Trait for anything that contributes stats to a combatant
pub trait StatSource {
    /// Unique identifier for this source
    fn id(&self) -> &str;

    /// Priority for application order (higher = applied later)
    /// Default priority is gear's.
    fn priority(&self) -> i32 {
        priority::GEAR
    }

    /// Apply this source's stats to the accumulator
    fn apply(&self, stats: &mut StatAccumulator);
}
