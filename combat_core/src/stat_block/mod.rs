//! Stat aggregation - folding every modifier source into a resolved snapshot

mod aggregator;
mod computed;
mod stat_value;

pub use aggregator::{ModifierLayer, StatAccumulator};
pub use computed::CombatantStats;
pub use stat_value::StatValue;

use crate::config::DamageConstants;
use crate::source::StatSource;

/// Fold a set of sources into an accumulator
///
/// Sources are applied in ascending priority; ties keep their given
/// order, so the same inputs always sum in the same sequence.
pub fn accumulate(sources: &[&dyn StatSource]) -> StatAccumulator {
    let mut sorted: Vec<&dyn StatSource> = sources.to_vec();
    sorted.sort_by_key(|s| s.priority());

    let mut accumulator = StatAccumulator::new();
    for source in sorted {
        source.apply(&mut accumulator);
    }
    accumulator
}

/// Resolve a set of sources straight into a stat snapshot
pub fn resolve_sources(
    sources: &[&dyn StatSource],
    current_hp: u32,
    current_resource: u32,
    limits: &DamageConstants,
) -> CombatantStats {
    accumulate(sources).resolve(current_hp, current_resource, limits)
}
