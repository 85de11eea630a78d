//! Game constants configuration

use super::{parse_toml, ConfigError};
use serde::{Deserialize, Serialize};

/// Tunable game constants
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GameConstants {
    #[serde(default)]
    pub effects: EffectConstants,
    #[serde(default)]
    pub damage: DamageConstants,
    #[serde(default)]
    pub enrage: EnrageConstants,
    #[serde(default)]
    pub revival: RevivalConstants,
    #[serde(default)]
    pub loot: LootConstants,
    #[serde(default)]
    pub ai: AiConstants,
}

impl GameConstants {
    /// Parse constants from TOML; missing sections and fields keep their defaults
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        parse_toml(content)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EffectConstants {
    /// Stack cap for effects that don't declare their own
    #[serde(default = "default_max_stacks")]
    pub default_max_stacks: u32,
    /// Per-turn damage of the fallback effect used for unknown names
    #[serde(default = "default_generic_dot_damage")]
    pub generic_dot_damage: f64,
}

impl Default for EffectConstants {
    fn default() -> Self {
        EffectConstants {
            default_max_stacks: default_max_stacks(),
            generic_dot_damage: default_generic_dot_damage(),
        }
    }
}

fn default_max_stacks() -> u32 {
    5
}
fn default_generic_dot_damage() -> f64 {
    3.0
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DamageConstants {
    /// Smallest amount a landed hit can deal after defense
    #[serde(default = "default_min_damage")]
    pub min_damage: u32,
    /// Uniform +/- variance on basic attacks (0.15 = 85% - 115%)
    #[serde(default = "default_variance")]
    pub basic_attack_variance: f64,
    /// Damage multiplier applied on a critical hit
    #[serde(default = "default_crit_multiplier")]
    pub crit_multiplier: f64,
    #[serde(default = "default_max_crit_chance")]
    pub max_crit_chance: f64,
    #[serde(default = "default_max_dodge")]
    pub max_dodge: f64,
}

impl Default for DamageConstants {
    fn default() -> Self {
        DamageConstants {
            min_damage: default_min_damage(),
            basic_attack_variance: default_variance(),
            crit_multiplier: default_crit_multiplier(),
            max_crit_chance: default_max_crit_chance(),
            max_dodge: default_max_dodge(),
        }
    }
}

fn default_min_damage() -> u32 {
    1
}
fn default_variance() -> f64 {
    0.15
}
fn default_crit_multiplier() -> f64 {
    1.5
}
fn default_max_crit_chance() -> f64 {
    0.75
}
fn default_max_dodge() -> f64 {
    0.60
}

/// Boss-tier low-HP enrage
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EnrageConstants {
    /// HP fraction at or below which the enrage fires
    #[serde(default = "default_enrage_threshold")]
    pub hp_threshold: f64,
    #[serde(default = "default_enrage_damage_bonus")]
    pub damage_bonus: f64,
    #[serde(default = "default_enrage_crit_bonus")]
    pub crit_bonus: f64,
}

impl Default for EnrageConstants {
    fn default() -> Self {
        EnrageConstants {
            hp_threshold: default_enrage_threshold(),
            damage_bonus: default_enrage_damage_bonus(),
            crit_bonus: default_enrage_crit_bonus(),
        }
    }
}

fn default_enrage_threshold() -> f64 {
    0.30
}
fn default_enrage_damage_bonus() -> f64 {
    0.10
}
fn default_enrage_crit_bonus() -> f64 {
    0.02
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RevivalConstants {
    /// Fraction of max HP and resource restored on revival
    #[serde(default = "default_restore_fraction")]
    pub restore_fraction: f64,
}

impl Default for RevivalConstants {
    fn default() -> Self {
        RevivalConstants {
            restore_fraction: default_restore_fraction(),
        }
    }
}

fn default_restore_fraction() -> f64 {
    0.5
}

/// One depth-gated rarity band: reachable from `min_depth`, hit when the roll is below `roll_below`
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct RarityBand {
    pub min_depth: u32,
    pub roll_below: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LootConstants {
    #[serde(default = "default_legendary_band")]
    pub legendary: RarityBand,
    #[serde(default = "default_rare_band")]
    pub rare: RarityBand,
    #[serde(default = "default_uncommon_band")]
    pub uncommon: RarityBand,
    /// Bonus magnitude growth per depth level
    #[serde(default = "default_depth_scaling")]
    pub depth_scaling: f64,
    /// Extra depth boss drops are rolled at
    #[serde(default = "default_boss_level_bonus")]
    pub boss_level_bonus: u32,
    #[serde(default = "default_boss_drop_count")]
    pub boss_drop_count: u32,
}

impl Default for LootConstants {
    fn default() -> Self {
        LootConstants {
            legendary: default_legendary_band(),
            rare: default_rare_band(),
            uncommon: default_uncommon_band(),
            depth_scaling: default_depth_scaling(),
            boss_level_bonus: default_boss_level_bonus(),
            boss_drop_count: default_boss_drop_count(),
        }
    }
}

fn default_legendary_band() -> RarityBand {
    RarityBand {
        min_depth: 5,
        roll_below: 0.15,
    }
}
fn default_rare_band() -> RarityBand {
    RarityBand {
        min_depth: 3,
        roll_below: 0.35,
    }
}
fn default_uncommon_band() -> RarityBand {
    RarityBand {
        min_depth: 2,
        roll_below: 0.60,
    }
}
fn default_depth_scaling() -> f64 {
    0.10
}
fn default_boss_level_bonus() -> u32 {
    2
}
fn default_boss_drop_count() -> u32 {
    3
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AiConstants {
    /// Target HP fraction that counts as "low" for execute preferences
    #[serde(default = "default_low_target_hp")]
    pub low_target_hp: f64,
    /// Resource an enemy recovers each end of turn
    #[serde(default = "default_enemy_resource_regen")]
    pub enemy_resource_regen: u32,
}

impl Default for AiConstants {
    fn default() -> Self {
        AiConstants {
            low_target_hp: default_low_target_hp(),
            enemy_resource_regen: default_enemy_resource_regen(),
        }
    }
}

fn default_low_target_hp() -> f64 {
    0.30
}
fn default_enemy_resource_regen() -> u32 {
    5
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let constants = GameConstants::from_toml_str("[enrage]\nhp_threshold = 0.25\n").unwrap();
        assert!((constants.enrage.hp_threshold - 0.25).abs() < f64::EPSILON);
        assert!((constants.enrage.damage_bonus - 0.10).abs() < f64::EPSILON);
        assert_eq!(constants.loot.boss_drop_count, 3);
    }

    #[test]
    fn test_default_constants() {
        let constants = GameConstants::default();
        assert_eq!(constants.effects.default_max_stacks, 5);
        assert_eq!(constants.damage.min_damage, 1);
        assert!((constants.damage.basic_attack_variance - 0.15).abs() < f64::EPSILON);
        assert!((constants.enrage.hp_threshold - 0.30).abs() < f64::EPSILON);
        assert_eq!(constants.loot.legendary.min_depth, 5);
    }

    #[test]
    fn test_parse_constants() {
        let toml = r#"
[damage]
crit_multiplier = 2.0

[enrage]
damage_bonus = 0.25

[loot.rare]
min_depth = 4
roll_below = 0.30
"#;

        let constants: GameConstants = toml::from_str(toml).unwrap();
        assert!((constants.damage.crit_multiplier - 2.0).abs() < f64::EPSILON);
        // Unspecified fields keep their defaults
        assert_eq!(constants.damage.min_damage, 1);
        assert!((constants.enrage.damage_bonus - 0.25).abs() < f64::EPSILON);
        assert!((constants.enrage.crit_bonus - 0.02).abs() < f64::EPSILON);
        assert_eq!(constants.loot.rare.min_depth, 4);
        assert_eq!(constants.loot.legendary.min_depth, 5);
    }
}
