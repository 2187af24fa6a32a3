//! Pure battle rules.
//!
//! Every function here is a plain computation over numbers: no entity is
//! mutated and no clock or RNG is read, so the damage and healing formulas can
//! be tested in isolation.

use strum::Display;

use crate::entities::Difficulty;

// ── Difficulty tables ────────────────────────────────────────────────────────

/// Player max HP for each preset.
pub fn starting_max_hp(difficulty: Difficulty) -> u32 {
    match difficulty {
        Difficulty::Easy => 300,
        Difficulty::Hard => 100,
        Difficulty::Cheat => 1_000_000,
    }
}

// ── Fight timing ─────────────────────────────────────────────────────────────

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Display)]
#[strum(serialize_all = "UPPERCASE")]
pub enum HitTier {
    Perfect,
    Good,
    Okay,
    Miss,
}

impl HitTier {
    pub fn base_damage(self) -> u32 {
        match self {
            HitTier::Perfect => 10,
            HitTier::Good => 7,
            HitTier::Okay => 4,
            HitTier::Miss => 1,
        }
    }

    pub fn message(self) -> &'static str {
        match self {
            HitTier::Perfect => "PERFECT HIT! YOU HIT CRAZY DAMAGE!",
            HitTier::Good => "GOOD HIT! YOU DEALT GREAT DAMAGE!",
            HitTier::Okay => "OKAY HIT! YOU DEALT SOME DAMAGE.",
            HitTier::Miss => "MISS... YOU DEALT LITTLE DAMAGE.",
        }
    }
}

/// Classify a marker position (relative to the bar's left edge).
///
/// Landing inside `[target_start, target_start + target_width]` is always
/// PERFECT.  Otherwise the distance to the bar's midpoint picks the tier:
/// under a quarter of the bar is GOOD, under half is OKAY, anything else MISS.
pub fn classify_hit(marker: i32, bar_width: i32, target_start: i32, target_width: i32) -> HitTier {
    if marker >= target_start && marker <= target_start + target_width {
        return HitTier::Perfect;
    }
    let distance = (marker - bar_width / 2).abs();
    if distance < bar_width / 4 {
        HitTier::Good
    } else if distance < bar_width / 2 {
        HitTier::Okay
    } else {
        HitTier::Miss
    }
}

/// Player damage drops to 80% once the boss is under 40% HP.
pub fn boss_ratio_modifier(boss_hp: u32, boss_max_hp: u32) -> f64 {
    if boss_max_hp == 0 {
        return 1.0;
    }
    let ratio = boss_hp as f64 / boss_max_hp as f64;
    if ratio < 0.4 {
        0.8
    } else {
        1.0
    }
}

/// `max(base, floor((base + boost) × ratio_modifier × player_modifier))`.
pub fn fight_damage(tier: HitTier, attack_boost: u32, ratio_modifier: f64, player_modifier: f64) -> u32 {
    let base = tier.base_damage();
    let scaled = ((base + attack_boost) as f64 * ratio_modifier * player_modifier).floor();
    base.max(scaled as u32)
}

// ── ACT effects ──────────────────────────────────────────────────────────────

/// JOKE heals the boss by a fifth of its missing HP, rounded down.
pub fn joke_heal(boss_hp: u32, boss_max_hp: u32) -> u32 {
    boss_max_hp.saturating_sub(boss_hp) / 5
}

/// CHECK CODE makes the boss hit harder, compounding each time.
pub const CHECK_CODE_MULTIPLIER: f32 = 1.10;

/// ORZ doubles the player's damage for one FIGHT.
pub const ORZ_MULTIPLIER: f32 = 2.0;

/// Damage an attack-pattern hit actually delivers after the boss's modifier.
pub fn boss_hit_damage(base: u32, boss_damage_modifier: f32) -> u32 {
    (base as f64 * boss_damage_modifier as f64).floor() as u32
}
