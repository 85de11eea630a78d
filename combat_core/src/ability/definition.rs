//! AbilityDefinition - The immutable base of a hero ability

use super::talent::TalentOption;
use crate::types::{Element, ResourceKind};
use serde::{Deserialize, Serialize};

/// Base ability: identity, resource and the variants/talents it offers
/// Loaded from TOML configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AbilityDefinition {
    /// Unique ability identifier
    pub id: String,
    /// Display name
    pub name: String,
    /// Pool the ability is paid from
    pub resource: ResourceKind,
    /// Alternate configurations; exactly one is active at a time
    pub variants: Vec<AbilityVariant>,
    /// Optional talent choices per tier
    #[serde(default)]
    pub talents: TalentTiers,
}

/// One shape of an ability (damage, cost, cooldown, area)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AbilityVariant {
    pub id: String,
    pub name: String,
    pub base_damage: f64,
    pub mana_cost: f64,
    pub cooldown: u32,
    #[serde(default)]
    pub aoe: bool,
    #[serde(default = "default_target_count")]
    pub target_count: u32,
    /// Element whose flat bonus the ability adds on hit
    #[serde(default)]
    pub element: Option<Element>,
}

fn default_target_count() -> u32 {
    1
}

/// Talent choices for the three tiers
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TalentTiers {
    #[serde(default)]
    pub tier1: Vec<TalentOption>,
    #[serde(default)]
    pub tier2: Vec<TalentOption>,
    #[serde(default)]
    pub tier3: Vec<TalentOption>,
}

impl TalentTiers {
    /// Options for a tier (1-3)
    pub fn tier(&self, tier: u8) -> Option<&[TalentOption]> {
        match tier {
            1 => Some(&self.tier1),
            2 => Some(&self.tier2),
            3 => Some(&self.tier3),
            _ => None,
        }
    }
}

impl AbilityDefinition {
    /// Look up a variant by ID
    pub fn variant(&self, id: &str) -> Option<&AbilityVariant> {
        self.variants.iter().find(|v| v.id == id)
    }

    /// Fallback single-variant ability used when configuration can't be loaded
    pub fn power_strike() -> Self {
        AbilityDefinition {
            id: "power_strike".to_string(),
            name: "Power Strike".to_string(),
            resource: ResourceKind::Rage,
            variants: vec![AbilityVariant {
                id: "standard".to_string(),
                name: "Power Strike".to_string(),
                base_damage: 10.0,
                mana_cost: 20.0,
                cooldown: 2,
                aoe: false,
                target_count: 1,
                element: None,
            }],
            talents: TalentTiers::default(),
        }
    }
}
