//! EnemyAbility - The closed set of enemy abilities and their data table

use serde::{Deserialize, Serialize};

/// Broad role of an ability, used by archetype priorities
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AbilityCategory {
    Offensive,
    Defensive,
    Tactical,
    CrowdControl,
}

/// Whose HP an ability's threshold gate looks at
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GateSubject {
    SelfHp,
    TargetHp,
}

/// Who receives an ability's effect
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EffectTarget {
    User,
    Opponent,
}

/// A named effect an ability applies
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct AbilityEffect {
    pub effect: &'static str,
    pub duration: u32,
    pub target: EffectTarget,
}

/// One row of the enemy ability table
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AbilityProfile {
    pub category: AbilityCategory,
    pub cooldown: u32,
    /// `0.0` means always eligible; otherwise the subject's HP fraction must be at or below it
    pub hp_threshold: f64,
    pub gate_subject: GateSubject,
    /// Scales the user's damage stat; zero for non-damaging abilities
    pub damage_multiplier: f64,
    pub resource_cost: u32,
    /// Fraction of the user's max HP restored
    pub heal_fraction: f64,
    pub effect: Option<AbilityEffect>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EnemyAbility {
    HeavyStrike,
    Rend,
    PoisonStab,
    Fireball,
    Execute,
    ShieldWall,
    Heal,
    LastStand,
    WarCry,
    Smokescreen,
    Weaken,
    Sunder,
    ShieldBash,
    FrostNova,
}

#[allow(clippy::too_many_arguments)]
fn row(
    category: AbilityCategory,
    cooldown: u32,
    hp_threshold: f64,
    gate_subject: GateSubject,
    damage_multiplier: f64,
    resource_cost: u32,
    heal_fraction: f64,
    effect: Option<AbilityEffect>,
) -> AbilityProfile {
    AbilityProfile {
        category,
        cooldown,
        hp_threshold,
        gate_subject,
        damage_multiplier,
        resource_cost,
        heal_fraction,
        effect,
    }
}

fn opponent(effect: &'static str, duration: u32) -> Option<AbilityEffect> {
    Some(AbilityEffect {
        effect,
        duration,
        target: EffectTarget::Opponent,
    })
}

fn user(effect: &'static str, duration: u32) -> Option<AbilityEffect> {
    Some(AbilityEffect {
        effect,
        duration,
        target: EffectTarget::User,
    })
}

impl EnemyAbility {
    pub fn all() -> &'static [EnemyAbility] {
        use EnemyAbility::*;
        &[
            HeavyStrike, Rend, PoisonStab, Fireball, Execute, ShieldWall, Heal, LastStand, WarCry,
            Smokescreen, Weaken, Sunder, ShieldBash, FrostNova,
        ]
    }

    pub fn profile(&self) -> AbilityProfile {
        use AbilityCategory::*;
        use GateSubject::*;

        match self {
            EnemyAbility::HeavyStrike => row(Offensive, 2, 0.0, TargetHp, 1.6, 10, 0.0, None),
            EnemyAbility::Rend => row(Offensive, 2, 0.0, TargetHp, 1.1, 10, 0.0, opponent("bleed", 3)),
            EnemyAbility::PoisonStab => row(Offensive, 3, 0.0, TargetHp, 0.8, 10, 0.0, opponent("poison", 3)),
            EnemyAbility::Fireball => row(Offensive, 3, 0.0, TargetHp, 1.4, 20, 0.0, opponent("burn", 2)),
            EnemyAbility::Execute => row(Tactical, 3, 0.30, TargetHp, 2.2, 15, 0.0, None),
            EnemyAbility::ShieldWall => row(Defensive, 4, 0.50, SelfHp, 0.0, 10, 0.0, user("fortify", 3)),
            EnemyAbility::Heal => row(Defensive, 3, 0.50, SelfHp, 0.0, 20, 0.25, None),
            EnemyAbility::LastStand => row(Defensive, 6, 0.25, SelfHp, 0.0, 0, 0.40, user("fortify", 2)),
            EnemyAbility::WarCry => row(Tactical, 5, 0.0, SelfHp, 0.0, 15, 0.0, user("frenzy", 3)),
            EnemyAbility::Smokescreen => row(Tactical, 4, 0.0, SelfHp, 0.0, 10, 0.0, user("evasive", 2)),
            EnemyAbility::Weaken => row(CrowdControl, 3, 0.0, TargetHp, 0.5, 10, 0.0, opponent("weakness", 3)),
            EnemyAbility::Sunder => row(CrowdControl, 2, 0.0, TargetHp, 1.0, 10, 0.0, opponent("sunder", 3)),
            EnemyAbility::ShieldBash => row(CrowdControl, 4, 0.0, TargetHp, 0.7, 15, 0.0, opponent("stun", 1)),
            EnemyAbility::FrostNova => row(CrowdControl, 5, 0.0, TargetHp, 0.9, 20, 0.0, opponent("freeze", 1)),
        }
    }

    /// Cooldown key used in a combatant's cooldown map
    pub fn id(&self) -> &'static str {
        match self {
            EnemyAbility::HeavyStrike => "heavy_strike",
            EnemyAbility::Rend => "rend",
            EnemyAbility::PoisonStab => "poison_stab",
            EnemyAbility::Fireball => "fireball",
            EnemyAbility::Execute => "execute",
            EnemyAbility::ShieldWall => "shield_wall",
            EnemyAbility::Heal => "heal",
            EnemyAbility::LastStand => "last_stand",
            EnemyAbility::WarCry => "war_cry",
            EnemyAbility::Smokescreen => "smokescreen",
            EnemyAbility::Weaken => "weaken",
            EnemyAbility::Sunder => "sunder",
            EnemyAbility::ShieldBash => "shield_bash",
            EnemyAbility::FrostNova => "frost_nova",
        }
    }

    pub fn category(&self) -> AbilityCategory {
        self.profile().category
    }

    /// Finisher that only unlocks against a weakened target
    pub fn is_execute(&self) -> bool {
        let profile = self.profile();
        profile.gate_subject == GateSubject::TargetHp && profile.hp_threshold > 0.0
    }

    /// Whether the HP gate lets this ability be used
    pub fn gate_open(&self, self_hp: f64, target_hp: f64) -> bool {
        let profile = self.profile();
        if profile.hp_threshold <= 0.0 {
            return true;
        }
        let hp = match profile.gate_subject {
            GateSubject::SelfHp => self_hp,
            GateSubject::TargetHp => target_hp,
        };
        hp <= profile.hp_threshold
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_gates() {
        assert!(EnemyAbility::HeavyStrike.gate_open(1.0, 1.0));
        assert!(!EnemyAbility::Execute.gate_open(0.1, 0.5));
        assert!(EnemyAbility::Execute.gate_open(1.0, 0.30));
        assert!(!EnemyAbility::Heal.gate_open(0.8, 0.1));
        assert!(EnemyAbility::Heal.gate_open(0.4, 1.0));
    }

    #[test]
    fn test_execute_classification() {
        assert!(EnemyAbility::Execute.is_execute());
        assert!(!EnemyAbility::Heal.is_execute());
        assert!(!EnemyAbility::HeavyStrike.is_execute());
    }

    #[test]
    fn test_ids_unique() {
        let mut ids: Vec<&str> = EnemyAbility::all().iter().map(|a| a.id()).collect();
        ids.sort();
        ids.dedup();
        assert_eq!(ids.len(), EnemyAbility::all().len());
    }
}
