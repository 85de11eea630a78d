//! AbilityConfiguration - A base ability plus its selected variant and talents

use super::definition::{AbilityDefinition, AbilityVariant};
use super::talent::{SecondaryEffect, TalentOption};
use super::AbilityError;
use crate::types::{Element, ResourceKind};
use serde::{Deserialize, Serialize};

/// Number of talent tiers per ability
pub const TALENT_TIERS: usize = 3;

/// An ability as the hero currently has it set up
///
/// Switching variants or talents is free and never touches the base
/// definition; every final number is derived on request.
#[derive(Debug, Clone)]
pub struct AbilityConfiguration {
    definition: AbilityDefinition,
    variant_index: usize,
    talents: [Option<usize>; TALENT_TIERS],
}

/// Final, ready-to-use numbers for a configured ability
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResolvedAbility {
    pub ability_id: String,
    pub name: String,
    pub resource: ResourceKind,
    pub damage: f64,
    pub resource_cost: u32,
    pub cooldown: u32,
    pub aoe: bool,
    pub target_count: u32,
    pub element: Option<Element>,
    pub effects: Vec<SecondaryEffect>,
}

impl AbilityConfiguration {
    /// Configure an ability with its first variant and no talents
    pub fn new(definition: AbilityDefinition) -> Result<Self, AbilityError> {
        if definition.variants.is_empty() {
            return Err(AbilityError::NoVariants(definition.id));
        }
        Ok(AbilityConfiguration {
            definition,
            variant_index: 0,
            talents: [None; TALENT_TIERS],
        })
    }

    pub fn definition(&self) -> &AbilityDefinition {
        &self.definition
    }

    pub fn id(&self) -> &str {
        &self.definition.id
    }

    /// The active variant
    pub fn variant(&self) -> &AbilityVariant {
        &self.definition.variants[self.variant_index]
    }

    /// Switch to another variant by ID
    pub fn select_variant(&mut self, variant_id: &str) -> Result<(), AbilityError> {
        let index = self
            .definition
            .variants
            .iter()
            .position(|v| v.id == variant_id)
            .ok_or_else(|| AbilityError::UnknownVariant {
                ability: self.definition.id.clone(),
                variant: variant_id.to_string(),
            })?;
        self.variant_index = index;
        Ok(())
    }

    /// Select a talent in a tier (1-3), replacing any previous pick in that tier
    pub fn select_talent(&mut self, tier: u8, talent_id: &str) -> Result<(), AbilityError> {
        let slot = tier_slot(tier)?;
        let options = self
            .definition
            .talents
            .tier(tier)
            .ok_or(AbilityError::InvalidTier(tier))?;
        let index = options
            .iter()
            .position(|t| t.id == talent_id)
            .ok_or_else(|| AbilityError::UnknownTalent {
                ability: self.definition.id.clone(),
                tier,
                talent: talent_id.to_string(),
            })?;
        self.talents[slot] = Some(index);
        Ok(())
    }

    /// Clear the talent selection for a tier
    pub fn clear_talent(&mut self, tier: u8) -> Result<(), AbilityError> {
        let slot = tier_slot(tier)?;
        self.talents[slot] = None;
        Ok(())
    }

    /// The selected talent for a tier, if any
    pub fn talent(&self, tier: u8) -> Option<&TalentOption> {
        let slot = tier_slot(tier).ok()?;
        let index = self.talents[slot]?;
        self.definition.talents.tier(tier)?.get(index)
    }

    /// All selected talents in tier order
    pub fn active_talents(&self) -> impl Iterator<Item = &TalentOption> + '_ {
        (1..=TALENT_TIERS as u8).filter_map(move |tier| self.talent(tier))
    }

    /// Variant damage scaled by every selected talent's damage multiplier
    pub fn final_damage(&self) -> f64 {
        let multiplier: f64 = self.active_talents().map(|t| t.damage_multiplier()).product();
        (self.variant().base_damage * multiplier).max(0.0)
    }

    /// Variant cost scaled by every selected talent's cost multiplier
    pub fn final_resource_cost(&self) -> u32 {
        let multiplier: f64 = self.active_talents().map(|t| t.cost_multiplier()).product();
        (self.variant().mana_cost * multiplier).max(0.0).round() as u32
    }

    /// Variant cooldown adjusted by talent deltas, floored at zero
    pub fn final_cooldown(&self) -> u32 {
        let delta: i64 = self.active_talents().map(|t| t.cooldown_delta as i64).sum();
        (self.variant().cooldown as i64 + delta).max(0) as u32
    }

    /// Targets hit, counting a chain jump as one extra target
    pub fn final_target_count(&self) -> u32 {
        let chains = self
            .secondary_effects()
            .iter()
            .filter(|e| matches!(e, SecondaryEffect::Chain { .. }))
            .count() as u32;
        self.variant().target_count.max(1) + chains
    }

    /// Secondary effects from all selected talents, in tier order
    pub fn secondary_effects(&self) -> Vec<SecondaryEffect> {
        self.active_talents()
            .flat_map(|t| t.effects.iter().cloned())
            .collect()
    }

    /// Snapshot of every final number
    pub fn resolve(&self) -> ResolvedAbility {
        let variant = self.variant();
        ResolvedAbility {
            ability_id: self.definition.id.clone(),
            name: variant.name.clone(),
            resource: self.definition.resource,
            damage: self.final_damage(),
            resource_cost: self.final_resource_cost(),
            cooldown: self.final_cooldown(),
            aoe: variant.aoe,
            target_count: self.final_target_count(),
            element: variant.element,
            effects: self.secondary_effects(),
        }
    }
}

fn tier_slot(tier: u8) -> Result<usize, AbilityError> {
    if (1..=TALENT_TIERS as u8).contains(&tier) {
        Ok(tier as usize - 1)
    } else {
        Err(AbilityError::InvalidTier(tier))
    }
}
