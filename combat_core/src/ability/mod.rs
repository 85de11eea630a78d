//! Hero abilities - definitions, talents and configured final numbers

mod configuration;
mod definition;
mod talent;

pub use configuration::{AbilityConfiguration, ResolvedAbility, TALENT_TIERS};
pub use definition::{AbilityDefinition, AbilityVariant, TalentTiers};
pub use talent::{SecondaryEffect, TalentOption};

use thiserror::Error;

/// Ability configuration error
#[derive(Error, Debug, Clone, PartialEq)]
pub enum AbilityError {
    #[error("Ability '{0}' defines no variants")]
    NoVariants(String),
    #[error("Ability '{ability}' has no variant '{variant}'")]
    UnknownVariant { ability: String, variant: String },
    #[error("Ability '{ability}' has no tier {tier} talent '{talent}'")]
    UnknownTalent {
        ability: String,
        tier: u8,
        talent: String,
    },
    #[error("Talent tier must be 1-3, got {0}")]
    InvalidTier(u8),
}
