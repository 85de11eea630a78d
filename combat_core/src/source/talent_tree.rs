//! TalentTreeSource - Stats from allocated talent-tree nodes

use crate::source::{priority, StatSource};
use crate::stat_block::{ModifierLayer, StatAccumulator};
use crate::types::StatKind;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Stats from talent tree nodes
///
/// This holds a flat list of allocated node IDs.
/// Tree structure, connections, and point budgets are handled elsewhere;
/// this source only cares about "what nodes give what stats".
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TalentTreeSource {
    /// List of allocated node IDs, in allocation order
    pub allocated_nodes: Vec<String>,
    /// Mapping from node ID to stat modifiers
    node_stats: BTreeMap<String, Vec<TalentNodeModifier>>,
}

/// A stat modifier from a talent node
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TalentNodeModifier {
    pub stat: StatKind,
    pub value: f64,
    /// Whether `value` is a percentage (20.0 = +20%) instead of a flat amount
    pub is_percent: bool,
}

impl TalentNodeModifier {
    pub fn flat(stat: StatKind, value: f64) -> Self {
        TalentNodeModifier {
            stat,
            value,
            is_percent: false,
        }
    }

    pub fn percent(stat: StatKind, value: f64) -> Self {
        TalentNodeModifier {
            stat,
            value,
            is_percent: true,
        }
    }
}

impl TalentTreeSource {
    /// Create a new talent tree source with no allocated nodes
    pub fn new() -> Self {
        Self::default()
    }

    /// Create with pre-defined node stats mapping
    pub fn with_node_stats(node_stats: BTreeMap<String, Vec<TalentNodeModifier>>) -> Self {
        TalentTreeSource {
            allocated_nodes: Vec::new(),
            node_stats,
        }
    }

    /// Allocate a node
    pub fn allocate(&mut self, node_id: impl Into<String>) {
        let node_id = node_id.into();
        if !self.allocated_nodes.contains(&node_id) {
            self.allocated_nodes.push(node_id);
        }
    }

    /// Deallocate a node
    pub fn deallocate(&mut self, node_id: &str) {
        self.allocated_nodes.retain(|n| n != node_id);
    }

    /// Register stats for a node ID
    pub fn register_node(&mut self, node_id: impl Into<String>, modifiers: Vec<TalentNodeModifier>) {
        self.node_stats.insert(node_id.into(), modifiers);
    }

    /// Get the modifiers for a node
    pub fn get_node_modifiers(&self, node_id: &str) -> Option<&Vec<TalentNodeModifier>> {
        self.node_stats.get(node_id)
    }
}

impl StatSource for TalentTreeSource {
    fn id(&self) -> &str {
        "talent_tree"
    }

    fn priority(&self) -> i32 {
        priority::TALENT_TREE
    }

    fn apply(&self, stats: &mut StatAccumulator) {
        for node_id in &self.allocated_nodes {
            let Some(modifiers) = self.node_stats.get(node_id) else {
                continue;
            };
            for modifier in modifiers {
                if modifier.is_percent {
                    stats.add(ModifierLayer::TalentPercent, modifier.stat, modifier.value / 100.0);
                } else {
                    stats.add(ModifierLayer::TalentFlat, modifier.stat, modifier.value);
                }
            }
        }
    }
}
