//! Loot - Equipment drops, rarity rolls and run-scoped items

mod equipment;
mod generator;
mod rarity;
mod run_item;

pub use equipment::{Enchantment, Equipment, ENHANCEMENT_STEP};
pub use generator::{ItemTemplate, LootGenerator};
pub use rarity::{depth_multiplier, rarity_for_roll, roll_rarity};
pub use run_item::{RunItem, RunItemFactory, RunItemStat, RunItemTemplate};
