//! EnemyTier - Difficulty bands scaling stats, affixes and rewards

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EnemyTier {
    Normal,
    Elite,
    Champion,
    Boss,
    Legendary,
}

impl EnemyTier {
    pub fn all() -> &'static [EnemyTier] {
        &[
            EnemyTier::Normal,
            EnemyTier::Elite,
            EnemyTier::Champion,
            EnemyTier::Boss,
            EnemyTier::Legendary,
        ]
    }

    pub fn hp_multiplier(&self) -> f64 {
        match self {
            EnemyTier::Normal => 1.0,
            EnemyTier::Elite => 1.5,
            EnemyTier::Champion => 2.0,
            EnemyTier::Boss => 3.0,
            EnemyTier::Legendary => 4.0,
        }
    }

    pub fn damage_multiplier(&self) -> f64 {
        match self {
            EnemyTier::Normal => 1.0,
            EnemyTier::Elite => 1.2,
            EnemyTier::Champion => 1.35,
            EnemyTier::Boss => 1.5,
            EnemyTier::Legendary => 1.75,
        }
    }

    pub fn max_affixes(&self) -> usize {
        match self {
            EnemyTier::Normal => 0,
            EnemyTier::Elite => 1,
            EnemyTier::Champion => 2,
            EnemyTier::Boss => 3,
            EnemyTier::Legendary => 4,
        }
    }

    pub fn reward_multiplier(&self) -> f64 {
        match self {
            EnemyTier::Normal => 1.0,
            EnemyTier::Elite => 1.5,
            EnemyTier::Champion => 2.0,
            EnemyTier::Boss => 3.0,
            EnemyTier::Legendary => 5.0,
        }
    }

    /// Boss-class enemies gain a one-time bonus when pushed to low HP
    pub fn enrages(&self) -> bool {
        matches!(self, EnemyTier::Boss | EnemyTier::Legendary)
    }

    pub fn is_boss(&self) -> bool {
        self.enrages()
    }

    pub fn title(&self) -> &'static str {
        match self {
            EnemyTier::Normal => "",
            EnemyTier::Elite => "Elite",
            EnemyTier::Champion => "Champion",
            EnemyTier::Boss => "Boss",
            EnemyTier::Legendary => "Legendary",
        }
    }
}
