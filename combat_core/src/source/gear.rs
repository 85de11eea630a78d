//! GearSource - Stats from equipped items

use crate::loot::Equipment;
use crate::source::{priority, StatSource};
use crate::stat_block::{ModifierLayer, StatAccumulator};

/// Stats from one equipped item, including its enchantment and enhancement level
pub struct GearSource<'a> {
    /// The equipped item
    pub item: &'a Equipment,
}

impl<'a> GearSource<'a> {
    /// Create a new gear source
    pub fn new(item: &'a Equipment) -> Self {
        GearSource { item }
    }
}

impl StatSource for GearSource<'_> {
    fn id(&self) -> &str {
        &self.item.name
    }

    fn priority(&self) -> i32 {
        priority::GEAR
    }

    fn apply(&self, stats: &mut StatAccumulator) {
        for bonus in self.item.flat_bonuses() {
            stats.add(ModifierLayer::GearFlat, bonus.stat, bonus.value);
        }
    }
}
