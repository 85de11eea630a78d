//! Ability configuration loading

use crate::ability::AbilityDefinition;
use super::ConfigError;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;

/// Container for ability definitions
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AbilitiesConfig {
    #[serde(rename = "abilities")]
    pub abilities: Vec<AbilityDefinition>,
}

/// Load ability definitions from a TOML file
pub fn load_ability_configs(path: &Path) -> Result<BTreeMap<String, AbilityDefinition>, ConfigError> {
    let config: AbilitiesConfig = super::load_toml(path)?;
    into_map(config)
}

/// Load ability definitions from a TOML string
pub fn parse_ability_configs(content: &str) -> Result<BTreeMap<String, AbilityDefinition>, ConfigError> {
    let config: AbilitiesConfig = super::parse_toml(content)?;
    into_map(config)
}

fn into_map(config: AbilitiesConfig) -> Result<BTreeMap<String, AbilityDefinition>, ConfigError> {
    let mut map = BTreeMap::new();
    for ability in config.abilities {
        if ability.variants.is_empty() {
            return Err(ConfigError::ValidationError(format!(
                "ability '{}' has no variants",
                ability.id
            )));
        }
        map.insert(ability.id.clone(), ability);
    }
    Ok(map)
}

/// Get default ability definitions
pub fn default_abilities() -> BTreeMap<String, AbilityDefinition> {
    let toml = include_str!("../../config/abilities.toml");
    parse_ability_configs(toml).unwrap_or_else(|err| {
        tracing::warn!(%err, "embedded ability config failed to load, using fallback");
        let mut map = BTreeMap::new();
        let strike = AbilityDefinition::power_strike();
        map.insert(strike.id.clone(), strike);
        map
    })
}
