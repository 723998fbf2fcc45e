use fastrand::Rng;

use crate::combat::constants::{
    CRIT_MULTIPLIER, DOUBLE_HIT_MULTIPLIER, HEAL_BASE, ROLL_VARIANCE,
};

/// The outcome of a single attack roll
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AttackRoll {
    /// The damage before any multipliers
    pub base: u32,
    /// The final damage, after all multipliers have been applied and the
    /// result was floored
    pub damage: u32,
    pub critical: bool,
    pub double_hit: bool,
}

/// Checks a percentage chance (0-100) against the rng
pub(crate) fn roll_chance(chance: u8, rng: &mut Rng) -> bool {
    rng.f64() < f64::from(chance) / 100.0
}

/// `base` plus a uniform roll in `[-ROLL_VARIANCE, ROLL_VARIANCE]`, never
/// below 0
#[allow(clippy::cast_sign_loss)]
pub(crate) fn roll_around(base: i32, rng: &mut Rng) -> u32 {
    (base + rng.i32(-ROLL_VARIANCE..=ROLL_VARIANCE)).max(0) as u32
}

/// Rolls the damage of an attack. The crit roll happens first, the double
/// hit roll second. If both land, both multipliers apply. Enemies can not
/// double hit and pass 0 as `double_chance`
#[must_use]
#[allow(clippy::cast_sign_loss, clippy::cast_possible_truncation)]
pub fn roll_attack(
    strength: i32,
    crit_chance: u8,
    double_chance: u8,
    rng: &mut Rng,
) -> AttackRoll {
    let base = roll_around(strength, rng);
    let mut damage = f64::from(base);

    let critical = roll_chance(crit_chance, rng);
    if critical {
        damage *= CRIT_MULTIPLIER;
    }

    let double_hit = roll_chance(double_chance, rng);
    if double_hit {
        damage *= DOUBLE_HIT_MULTIPLIER;
    }

    AttackRoll {
        base,
        damage: damage.floor() as u32,
        critical,
        double_hit,
    }
}

/// Rolls the amount of hp a single potion restores
#[must_use]
pub fn roll_heal(rng: &mut Rng) -> u32 {
    roll_around(HEAL_BASE, rng)
}
