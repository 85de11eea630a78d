//! BaseStatsSource - Stats from the class formula or enemy scaling

use crate::source::{priority, StatSource};
use crate::stat_block::{ModifierLayer, StatAccumulator};
use crate::types::StatBonus;

/// Base stats, already evaluated from level and attributes
///
/// Heroes build this from their class formula and enemies from their
/// archetype/tier scaling; either way it is the first layer applied.
#[derive(Debug, Clone)]
pub struct BaseStatsSource {
    id: String,
    stats: Vec<StatBonus>,
}

impl BaseStatsSource {
    /// Create a new base stats source
    pub fn new(id: impl Into<String>, stats: Vec<StatBonus>) -> Self {
        BaseStatsSource {
            id: id.into(),
            stats,
        }
    }

    pub fn stats(&self) -> &[StatBonus] {
        &self.stats
    }
}

impl StatSource for BaseStatsSource {
    fn id(&self) -> &str {
        &self.id
    }

    fn priority(&self) -> i32 {
        priority::BASE
    }

    fn apply(&self, stats: &mut StatAccumulator) {
        for bonus in &self.stats {
            stats.add(ModifierLayer::Base, bonus.stat, bonus.value);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::StatKind;

    #[test]
    fn test_base_stats_land_in_base_layer() {
        let source = BaseStatsSource::new(
            "hero",
            vec![
                StatBonus::new(StatKind::MaxHp, 100.0),
                StatBonus::new(StatKind::Damage, 12.0),
            ],
        );
        let mut acc = StatAccumulator::new();
        source.apply(&mut acc);

        assert!((acc.get(StatKind::MaxHp).base - 100.0).abs() < f64::EPSILON);
        assert!((acc.get(StatKind::Damage).gear_flat - 0.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_base_stats_priority() {
        let source = BaseStatsSource::new("hero", Vec::new());
        assert_eq!(source.priority(), -100);
    }
}
