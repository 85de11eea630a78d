//! Archetype - Behavioral profiles controlling stat shape and AI preferences

use super::ability::{AbilityCategory, EnemyAbility};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Archetype {
    Tank,
    Berserker,
    Assassin,
    Caster,
    Healer,
    Trickster,
    EliteGuard,
    Swarm,
}

/// One row of the archetype table
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ArchetypeProfile {
    pub hp_multiplier: f64,
    pub damage_multiplier: f64,
    pub defense_multiplier: f64,
    /// Chance per turn to prefer an ability over a basic attack
    pub ability_use_bonus: f64,
    /// Self-HP fraction at or below which defensive abilities take precedence
    pub healing_threshold: f64,
    pub prefers_defense_when_low: bool,
    pub prefers_execute_when_enemy_low: bool,
    /// Category order used to rank preferred abilities
    pub ability_priority: &'static [AbilityCategory],
    /// Abilities this archetype knows, in declared preference order
    pub preferred_abilities: &'static [EnemyAbility],
}

impl Archetype {
    pub fn all() -> &'static [Archetype] {
        &[
            Archetype::Tank,
            Archetype::Berserker,
            Archetype::Assassin,
            Archetype::Caster,
            Archetype::Healer,
            Archetype::Trickster,
            Archetype::EliteGuard,
            Archetype::Swarm,
        ]
    }

    pub fn profile(&self) -> ArchetypeProfile {
        use AbilityCategory::*;
        use EnemyAbility::*;

        match self {
            Archetype::Tank => ArchetypeProfile {
                hp_multiplier: 1.5,
                damage_multiplier: 0.8,
                defense_multiplier: 1.6,
                ability_use_bonus: 0.30,
                healing_threshold: 0.40,
                prefers_defense_when_low: true,
                prefers_execute_when_enemy_low: false,
                ability_priority: &[Defensive, CrowdControl, Offensive, Tactical],
                preferred_abilities: &[ShieldWall, ShieldBash, HeavyStrike],
            },
            Archetype::Berserker => ArchetypeProfile {
                hp_multiplier: 1.1,
                damage_multiplier: 1.4,
                defense_multiplier: 0.7,
                ability_use_bonus: 0.35,
                healing_threshold: 0.0,
                prefers_defense_when_low: false,
                prefers_execute_when_enemy_low: true,
                ability_priority: &[Offensive, Tactical, CrowdControl, Defensive],
                preferred_abilities: &[HeavyStrike, WarCry, Execute, Rend],
            },
            Archetype::Assassin => ArchetypeProfile {
                hp_multiplier: 0.8,
                damage_multiplier: 1.3,
                defense_multiplier: 0.6,
                ability_use_bonus: 0.40,
                healing_threshold: 0.25,
                prefers_defense_when_low: false,
                prefers_execute_when_enemy_low: true,
                ability_priority: &[Tactical, Offensive, CrowdControl, Defensive],
                preferred_abilities: &[Execute, PoisonStab, Smokescreen],
            },
            Archetype::Caster => ArchetypeProfile {
                hp_multiplier: 0.8,
                damage_multiplier: 1.2,
                defense_multiplier: 0.5,
                ability_use_bonus: 0.50,
                healing_threshold: 0.35,
                prefers_defense_when_low: true,
                prefers_execute_when_enemy_low: false,
                ability_priority: &[Offensive, CrowdControl, Defensive, Tactical],
                preferred_abilities: &[Fireball, FrostNova, Weaken, LastStand],
            },
            Archetype::Healer => ArchetypeProfile {
                hp_multiplier: 1.0,
                damage_multiplier: 0.8,
                defense_multiplier: 0.9,
                ability_use_bonus: 0.45,
                healing_threshold: 0.60,
                prefers_defense_when_low: true,
                prefers_execute_when_enemy_low: false,
                ability_priority: &[Defensive, CrowdControl, Offensive, Tactical],
                preferred_abilities: &[Heal, Weaken, HeavyStrike],
            },
            Archetype::Trickster => ArchetypeProfile {
                hp_multiplier: 0.9,
                damage_multiplier: 1.0,
                defense_multiplier: 0.8,
                ability_use_bonus: 0.45,
                healing_threshold: 0.0,
                prefers_defense_when_low: false,
                prefers_execute_when_enemy_low: false,
                ability_priority: &[Tactical, CrowdControl, Offensive, Defensive],
                preferred_abilities: &[Smokescreen, ShieldBash, PoisonStab],
            },
            Archetype::EliteGuard => ArchetypeProfile {
                hp_multiplier: 1.3,
                damage_multiplier: 1.1,
                defense_multiplier: 1.3,
                ability_use_bonus: 0.35,
                healing_threshold: 0.35,
                prefers_defense_when_low: true,
                prefers_execute_when_enemy_low: true,
                ability_priority: &[CrowdControl, Defensive, Offensive, Tactical],
                preferred_abilities: &[Sunder, ShieldWall, HeavyStrike, Execute],
            },
            Archetype::Swarm => ArchetypeProfile {
                hp_multiplier: 0.6,
                damage_multiplier: 0.7,
                defense_multiplier: 0.5,
                ability_use_bonus: 0.15,
                healing_threshold: 0.0,
                prefers_defense_when_low: false,
                prefers_execute_when_enemy_low: false,
                ability_priority: &[Offensive, Tactical, CrowdControl, Defensive],
                preferred_abilities: &[Rend],
            },
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Archetype::Tank => "Tank",
            Archetype::Berserker => "Berserker",
            Archetype::Assassin => "Assassin",
            Archetype::Caster => "Caster",
            Archetype::Healer => "Healer",
            Archetype::Trickster => "Trickster",
            Archetype::EliteGuard => "Elite Guard",
            Archetype::Swarm => "Swarm",
        }
    }
}

impl ArchetypeProfile {
    /// Rank of a category in this archetype's priority list (unlisted sorts last)
    pub fn category_rank(&self, category: AbilityCategory) -> usize {
        self.ability_priority
            .iter()
            .position(|c| *c == category)
            .unwrap_or(self.ability_priority.len())
    }
}
