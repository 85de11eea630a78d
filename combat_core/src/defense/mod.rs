//! Defense - Flat mitigation with a damage floor, dodge and crit rolls

use rand::Rng;

/// Damage left after flat defense, never below `min_damage`
///
/// `max(min_damage, raw - defense)`; defense is unsigned so it can never
/// add damage.
pub fn mitigate(raw: u32, defense: u32, min_damage: u32) -> u32 {
    raw.saturating_sub(defense).max(min_damage)
}

/// Roll whether a hit is avoided
pub fn roll_dodge(dodge: f64, rng: &mut impl Rng) -> bool {
    roll_chance(dodge, rng)
}

/// Roll whether a hit lands critically
pub fn roll_crit(crit_chance: f64, rng: &mut impl Rng) -> bool {
    roll_chance(crit_chance, rng)
}

/// Uniform `[1 - variance, 1 + variance]` scaling of a base amount, floor `min_damage`
pub fn apply_variance(base: u32, variance: f64, min_damage: u32, rng: &mut impl Rng) -> u32 {
    if variance <= 0.0 {
        return base.max(min_damage);
    }
    let scale = rng.gen_range(1.0 - variance..=1.0 + variance);
    let rolled = (base as f64 * scale).round();
    (rolled.max(0.0) as u32).max(min_damage)
}

fn roll_chance(chance: f64, rng: &mut impl Rng) -> bool {
    if chance <= 0.0 {
        return false;
    }
    rng.gen::<f64>() < chance.min(1.0)
}
