//! Depth-gated rarity rolls and magnitude scaling

use crate::config::{LootConstants, RarityBand};
use crate::types::Rarity;
use rand::Rng;

/// Roll a rarity for a depth using a single uniform draw
pub fn roll_rarity(depth: u32, bands: &LootConstants, rng: &mut impl Rng) -> Rarity {
    let roll: f64 = rng.gen();
    rarity_for_roll(depth, roll, bands)
}

/// Map a roll in `[0, 1)` to a rarity, checking bands from rarest to most common
///
/// The first band whose depth gate is met and whose threshold the roll
/// falls under wins; anything else is Common.
pub fn rarity_for_roll(depth: u32, roll: f64, bands: &LootConstants) -> Rarity {
    let ordered: [(Rarity, RarityBand); 3] = [
        (Rarity::Legendary, bands.legendary),
        (Rarity::Rare, bands.rare),
        (Rarity::Uncommon, bands.uncommon),
    ];
    ordered
        .iter()
        .find(|(_, band)| depth >= band.min_depth && roll < band.roll_below)
        .map(|(rarity, _)| *rarity)
        .unwrap_or(Rarity::Common)
}

/// Magnitude multiplier for a depth: `1 + depth × scaling`
pub fn depth_multiplier(depth: u32, bands: &LootConstants) -> f64 {
    1.0 + depth as f64 * bands.depth_scaling
}
