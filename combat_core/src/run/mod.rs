//! Dungeon run - The active run-item set and the hero bonuses derived from it

mod transient;

pub use transient::HeroTransientCombatState;

use crate::combatant::CombatantState;
use crate::loot::RunItem;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

/// One dungeon run's treasure
///
/// The only writer of the run-item set. Every change rebuilds the
/// derived bonuses from scratch and hands them to the hero, so the hero
/// never carries bonuses from an item set that no longer exists.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DungeonRun {
    pub depth: u32,
    items: Vec<RunItem>,
    transient: HeroTransientCombatState,
}

impl DungeonRun {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn items(&self) -> &[RunItem] {
        &self.items
    }

    /// Bonuses the hero carries from the current items
    pub fn transient(&self) -> &HeroTransientCombatState {
        &self.transient
    }

    /// Pick up an item; a copy of an item already held adds to its stack count
    pub fn add_item(&mut self, item: RunItem, hero: &mut CombatantState) {
        match self
            .items
            .iter_mut()
            .find(|held| held.name == item.name && held.stat_modifiers == item.stat_modifiers)
        {
            Some(held) => held.stack_count += item.stack_count.max(1),
            None => self.items.push(item),
        }
        self.recompute(hero);
    }

    /// Drop one copy of an item by name; returns whether anything was removed
    pub fn remove_item(&mut self, name: &str, hero: &mut CombatantState) -> bool {
        let Some(index) = self.items.iter().position(|item| item.name == name) else {
            return false;
        };
        if self.items[index].stack_count > 1 {
            self.items[index].stack_count -= 1;
        } else {
            self.items.remove(index);
        }
        self.recompute(hero);
        true
    }

    /// Move one floor deeper
    pub fn descend(&mut self) -> u32 {
        self.depth += 1;
        debug!(depth = self.depth, "descended");
        self.depth
    }

    /// Leave the dungeon: every run item and derived bonus is discarded
    pub fn end_run(&mut self, hero: &mut CombatantState) {
        info!(depth = self.depth, items = self.items.len(), "run ended");
        self.items.clear();
        self.depth = 0;
        self.recompute(hero);
    }

    fn recompute(&mut self, hero: &mut CombatantState) {
        self.transient = HeroTransientCombatState::from_items(&self.items);
        hero.set_transient(self.transient.clone());
    }
}
