//! MetaProgression - Permanent percentage bonuses carried between runs

use crate::source::{priority, StatSource};
use crate::stat_block::{ModifierLayer, StatAccumulator};
use crate::types::StatKind;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Permanent account-level percentage bonuses
///
/// These sum with talent percentages before multiplying.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MetaProgression {
    /// Percent bonus per stat (20.0 = +20%)
    percent: BTreeMap<StatKind, f64>,
}

impl MetaProgression {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add to the permanent percent bonus of a stat
    pub fn add_percent(&mut self, stat: StatKind, percent: f64) {
        *self.percent.entry(stat).or_insert(0.0) += percent;
    }

    pub fn percent(&self, stat: StatKind) -> f64 {
        self.percent.get(&stat).copied().unwrap_or(0.0)
    }
}

impl StatSource for MetaProgression {
    fn id(&self) -> &str {
        "meta_progression"
    }

    fn priority(&self) -> i32 {
        priority::META
    }

    fn apply(&self, stats: &mut StatAccumulator) {
        for (stat, percent) in &self.percent {
            stats.add(ModifierLayer::MetaPercent, *stat, percent / 100.0);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_meta_percent_accumulates() {
        let mut meta = MetaProgression::new();
        meta.add_percent(StatKind::Defense, 5.0);
        meta.add_percent(StatKind::Defense, 10.0);
        assert!((meta.percent(StatKind::Defense) - 15.0).abs() < f64::EPSILON);

        let mut acc = StatAccumulator::new();
        meta.apply(&mut acc);
        assert!((acc.get(StatKind::Defense).meta_percent - 0.15).abs() < 1e-9);
    }
}
