//! EnemyDefinition - Archetype, tier, affixes and level for one enemy

use super::ability::EnemyAbility;
use super::affix::Affix;
use super::archetype::Archetype;
use super::tier::EnemyTier;
use crate::types::{StatBonus, StatKind};
use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use tracing::debug;

/// Bosses are always at least this many levels above the hero
pub const BOSS_LEVEL_MARGIN: u32 = 2;

/// Experience and gold granted for a kill
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Reward {
    pub xp: u32,
    pub gold: u32,
}

impl std::ops::Add for Reward {
    type Output = Reward;

    fn add(self, other: Reward) -> Reward {
        Reward {
            xp: self.xp + other.xp,
            gold: self.gold + other.gold,
        }
    }
}

/// Everything that makes an enemy what it is, before battle state
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EnemyDefinition {
    pub name: String,
    pub archetype: Archetype,
    pub tier: EnemyTier,
    affixes: BTreeSet<Affix>,
    pub level: u32,
    pub abilities: Vec<EnemyAbility>,
}

impl EnemyDefinition {
    /// An enemy with no affixes that knows its archetype's abilities
    pub fn new(archetype: Archetype, tier: EnemyTier, level: u32) -> Self {
        let name = match tier.title() {
            "" => archetype.name().to_string(),
            title => format!("{} {}", title, archetype.name()),
        };
        EnemyDefinition {
            name,
            archetype,
            tier,
            affixes: BTreeSet::new(),
            level: level.max(1),
            abilities: archetype.profile().preferred_abilities.to_vec(),
        }
    }

    pub fn affixes(&self) -> &BTreeSet<Affix> {
        &self.affixes
    }

    pub fn has_affix(&self, affix: Affix) -> bool {
        self.affixes.contains(&affix)
    }

    /// Attach an affix; refused once the tier's affix cap is reached
    pub fn add_affix(&mut self, affix: Affix) -> bool {
        if self.affixes.contains(&affix) {
            return true;
        }
        if self.affixes.len() >= self.tier.max_affixes() {
            return false;
        }
        self.affixes.insert(affix)
    }

    /// Builder form of `add_affix`
    pub fn with_affix(mut self, affix: Affix) -> Self {
        self.add_affix(affix);
        self
    }

    fn affix_multiplier(&self, stat: StatKind) -> f64 {
        self.affixes.iter().map(|a| a.stat_multiplier(stat)).product()
    }

    /// Base-layer stats: level scaling × archetype × tier × affixes
    pub fn base_stats(&self) -> Vec<StatBonus> {
        let profile = self.archetype.profile();
        let level = self.level as f64;

        let max_hp = (30.0 + 12.0 * level)
            * profile.hp_multiplier
            * self.tier.hp_multiplier()
            * self.affix_multiplier(StatKind::MaxHp);
        let damage = (5.0 + 2.0 * level)
            * profile.damage_multiplier
            * self.tier.damage_multiplier()
            * self.affix_multiplier(StatKind::Damage);
        let defense =
            level * 0.5 * profile.defense_multiplier * self.affix_multiplier(StatKind::Defense);

        let mut stats = vec![
            StatBonus::new(StatKind::MaxHp, max_hp),
            StatBonus::new(StatKind::MaxResource, 50.0 + 5.0 * level),
            StatBonus::new(StatKind::Damage, damage),
            StatBonus::new(StatKind::Defense, defense),
            StatBonus::new(StatKind::CritChance, 0.05),
            StatBonus::new(StatKind::Dodge, 0.03),
        ];
        for affix in &self.affixes {
            stats.extend(affix.flat_bonuses(self.level));
        }
        stats
    }

    /// Total thorns reflection across affixes
    pub fn thorns_fraction(&self) -> f64 {
        self.affixes.iter().map(Affix::thorns_fraction).sum()
    }

    /// Effects applied to the target by a landed basic attack
    pub fn on_hit_effects(&self) -> Vec<(&'static str, u32)> {
        self.affixes.iter().filter_map(Affix::on_hit_effect).collect()
    }

    pub fn reward(&self) -> Reward {
        let level = self.level as f64;
        let mult = self.tier.reward_multiplier();
        Reward {
            xp: ((10.0 + 5.0 * level) * mult).round() as u32,
            gold: ((5.0 + 3.0 * level) * mult).round() as u32,
        }
    }

    /// Roll an enemy for a depth
    ///
    /// Bosses are always at least two levels above the hero, whatever the
    /// depth-derived level would have been.
    pub fn generate(depth: u32, hero_level: u32, is_boss: bool, rng: &mut impl Rng) -> Self {
        let tier = tier_for_roll(depth, rng.gen(), is_boss);
        let archetype = if is_boss {
            // Swarm makes for a poor boss
            *Archetype::all()[..7].choose(rng).unwrap_or(&Archetype::Tank)
        } else {
            *Archetype::all().choose(rng).unwrap_or(&Archetype::Swarm)
        };

        let depth_level = depth.max(1) + rng.gen_range(0..=1);
        let level = if is_boss {
            depth_level.max(hero_level + BOSS_LEVEL_MARGIN)
        } else {
            depth_level
        };

        let mut definition = EnemyDefinition::new(archetype, tier, level);
        let max = tier.max_affixes();
        if max > 0 {
            let min = if tier.is_boss() { 1 } else { 0 };
            let count = rng.gen_range(min..=max);
            for affix in Affix::all().choose_multiple(rng, count) {
                definition.add_affix(*affix);
            }
        }

        debug!(
            name = %definition.name,
            level,
            affixes = definition.affixes.len(),
            "generated enemy"
        );
        definition
    }
}

/// Map a roll to a tier; elites and champions need some depth first
pub fn tier_for_roll(depth: u32, roll: f64, is_boss: bool) -> EnemyTier {
    if is_boss {
        return if depth >= 8 && roll < 0.20 {
            EnemyTier::Legendary
        } else {
            EnemyTier::Boss
        };
    }
    if depth >= 4 && roll < 0.10 {
        EnemyTier::Champion
    } else if depth >= 2 && roll < 0.30 {
        EnemyTier::Elite
    } else {
        EnemyTier::Normal
    }
}
