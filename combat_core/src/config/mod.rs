//! Configuration loading from TOML files

mod abilities;
mod constants;

pub use abilities::{default_abilities, load_ability_configs, parse_ability_configs};
pub use constants::{
    AiConstants, DamageConstants, EffectConstants, EnrageConstants, GameConstants, LootConstants,
    RarityBand, RevivalConstants,
};

use crate::effect::EffectRegistry;
use std::fs;
use std::path::Path;
use thiserror::Error;

/// Configuration loading error
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    IoError(#[from] std::io::Error),
    #[error("Failed to parse TOML: {0}")]
    ParseError(#[from] toml::de::Error),
    #[error("Configuration validation error: {0}")]
    ValidationError(String),
}

/// Load a TOML file and deserialize it
pub fn load_toml<T: serde::de::DeserializeOwned>(path: &Path) -> Result<T, ConfigError> {
    let content = fs::read_to_string(path)?;
    let config: T = toml::from_str(&content)?;
    Ok(config)
}

/// Load a TOML string and deserialize it
pub fn parse_toml<T: serde::de::DeserializeOwned>(content: &str) -> Result<T, ConfigError> {
    let config: T = toml::from_str(content)?;
    Ok(config)
}

/// Everything a stateful combat operation needs to know about the rules
///
/// Passed by reference into damage, effect and tick entry points so that
/// tuning never lives in hidden globals.
#[derive(Debug, Clone)]
pub struct CombatRules {
    pub constants: GameConstants,
    pub effects: EffectRegistry,
}

impl Default for CombatRules {
    fn default() -> Self {
        let constants = GameConstants::default();
        let effects = EffectRegistry::with_defaults(&constants);
        CombatRules { constants, effects }
    }
}

impl CombatRules {
    /// Build rules from a constants TOML document, keeping default effect presets
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        let constants: GameConstants = parse_toml(content)?;
        validate_constants(&constants)?;
        let effects = EffectRegistry::with_defaults(&constants);
        Ok(CombatRules { constants, effects })
    }

    /// Load rules from a constants TOML file
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }
}

fn validate_constants(constants: &GameConstants) -> Result<(), ConfigError> {
    if constants.effects.default_max_stacks == 0 {
        return Err(ConfigError::ValidationError(
            "effects.default_max_stacks must be at least 1".to_string(),
        ));
    }
    if !(0.0..1.0).contains(&constants.damage.basic_attack_variance) {
        return Err(ConfigError::ValidationError(format!(
            "damage.basic_attack_variance must be in [0, 1), got {}",
            constants.damage.basic_attack_variance
        )));
    }
    if !(0.0..=1.0).contains(&constants.revival.restore_fraction) {
        return Err(ConfigError::ValidationError(format!(
            "revival.restore_fraction must be in [0, 1], got {}",
            constants.revival.restore_fraction
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rules_from_toml() {
        let rules = CombatRules::from_toml_str("[effects]\ngeneric_dot_damage = 7.0\n").unwrap();
        assert!((rules.constants.effects.generic_dot_damage - 7.0).abs() < f64::EPSILON);
        assert!(rules.effects.get("poison").is_some());
    }

    #[test]
    fn test_rules_reject_zero_stack_cap() {
        let result = CombatRules::from_toml_str("[effects]\ndefault_max_stacks = 0\n");
        assert!(matches!(result, Err(ConfigError::ValidationError(_))));
    }

    #[test]
    fn test_rules_reject_bad_toml() {
        let result = CombatRules::from_toml_str("[damage\n");
        assert!(matches!(result, Err(ConfigError::ParseError(_))));
    }
}
