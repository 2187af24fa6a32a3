//! Boss attack patterns.
//!
//! Each pattern is a small self-contained simulation driven by absolute
//! millisecond timestamps.  The battle owns the player and both bullet lists;
//! a pattern only borrows them through [`PatternContext`] for the duration of
//! one `initialize` or `execute` call.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::audio::{Cue, CueSink};
use crate::compute::boss_hit_damage;
use crate::entities::{Bullet, Column};
use crate::geometry::{Point, Rect};
use crate::player::{DamageOutcome, Player};

pub mod gunner;
pub mod homing;
pub mod moving_gap;
pub mod random_projectile;
pub mod vertical_laser;

pub use gunner::GunnerAttack;
pub use homing::HomingProjectileAttack;
pub use moving_gap::MovingGapAttack;
pub use random_projectile::RandomProjectileAttack;
pub use vertical_laser::VerticalLaserAttack;

/// Number of equal-width lanes the laser pattern divides the arena into.
pub const LANE_COUNT: usize = 6;

// ── Contract ─────────────────────────────────────────────────────────────────

pub trait AttackPattern {
    fn name(&self) -> &'static str;

    /// Reset timers to `ctx.now`, clear this pattern's projectiles, lay out a
    /// fresh randomized field and apply the cycle's difficulty scaling.
    fn initialize(&mut self, ctx: &mut PatternContext<'_>);

    /// Advance one tick.  Safe to call after finishing; it does nothing then.
    fn execute(&mut self, ctx: &mut PatternContext<'_>);

    fn is_finished(&self) -> bool;

    /// Extra geometry the renderer should draw on top of the bullets.
    fn overlay(&self, arena: &Rect) -> Overlay;

    /// Whether the player may fire while this pattern runs.
    fn allows_shooting(&self) -> bool {
        false
    }

    /// The scaled constants currently in effect.
    fn tuning(&self) -> Tuning;
}

/// Headline numbers of a pattern's configuration, comparable across variants.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Tuning {
    pub duration_ms: u64,
    pub damage: u32,
    pub speed: i32,
    pub spawn_cap: u32,
}

impl Tuning {
    /// At least one headline number is strictly higher than in `other`.
    pub fn is_harder_than(&self, other: &Tuning) -> bool {
        self.duration_ms > other.duration_ms
            || self.damage > other.damage
            || self.speed > other.speed
            || self.spawn_cap > other.spawn_cap
    }
}

// ── Overlay geometry ─────────────────────────────────────────────────────────

#[derive(Clone, Debug, PartialEq)]
pub struct ColumnShape {
    pub top: Rect,
    pub bottom: Rect,
    pub boxes: Vec<Rect>,
}

impl ColumnShape {
    pub fn of(column: &Column, arena: &Rect) -> Self {
        ColumnShape {
            top: column.top_rect(arena),
            bottom: column.bottom_rect(arena),
            boxes: column.box_rects().collect(),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct LaneShape {
    /// Zero-based lane index.
    pub lane: usize,
    pub rect: Rect,
    /// False while only the warning strip is showing.
    pub active: bool,
}

#[derive(Clone, Debug, Default, PartialEq)]
pub enum Overlay {
    #[default]
    None,
    Columns(Vec<ColumnShape>),
    Lanes(Vec<LaneShape>),
    /// The blinking "!" shown before homing shots launch.
    Warning(Option<Point>),
}

// ── Shared per-call context ──────────────────────────────────────────────────

pub struct PatternContext<'a> {
    /// Wall-clock milliseconds for this call.
    pub now: u64,
    pub arena: Rect,
    /// Completed rotations through every pattern.
    pub cycle: u32,
    pub boss_damage_modifier: f32,
    pub player: &'a mut Player,
    pub boss_bullets: &'a mut Vec<Bullet>,
    pub player_bullets: &'a mut Vec<Bullet>,
    pub cues: &'a mut dyn CueSink,
}

impl PatternContext<'_> {
    /// Deliver one pattern hit to the player.  Returns true when the player is
    /// dead afterwards.
    pub fn strike_player(&mut self, base_damage: u32) -> bool {
        let amount = boss_hit_damage(base_damage, self.boss_damage_modifier);
        match self.player.take_damage(amount, self.now) {
            DamageOutcome::Ignored => {}
            outcome => {
                log::trace!("player hit: {:?}, hp now {}", outcome, self.player.hp());
                self.cues.trigger(Cue::DamageTaken);
            }
        }
        self.player.is_dead()
    }

    pub fn clear_bullets(&mut self) {
        self.boss_bullets.clear();
        self.player_bullets.clear();
    }

    /// Move every boss bullet (re-aiming homing ones first), drop those that
    /// left the field and consume those touching the player.  Returns true if
    /// a hit killed the player; the remaining bullets are discarded then.
    pub fn sweep_boss_bullets(&mut self) -> bool {
        let target = self.player.hitbox().center();
        let field = self.arena;
        let mut i = 0;
        while i < self.boss_bullets.len() {
            let bullet = &mut self.boss_bullets[i];
            bullet.home_toward(target);
            bullet.advance();

            if bullet.is_out_of_bounds(&field) {
                self.boss_bullets.remove(i);
                continue;
            }
            if bullet.bounds().intersects(&self.player.hitbox()) {
                let damage = bullet.damage;
                self.boss_bullets.remove(i);
                if self.strike_player(damage) {
                    self.clear_bullets();
                    return true;
                }
                continue;
            }
            i += 1;
        }
        false
    }
}

// ── Helpers shared by several patterns ───────────────────────────────────────

/// Absolute-time stopwatch.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub(crate) struct Since(pub u64);

impl Since {
    pub fn elapsed(self, now: u64) -> u64 {
        now.saturating_sub(self.0)
    }
}

/// A random point on the arena's outline.
pub fn random_edge_point(rng: &mut impl Rng, arena: &Rect) -> Point {
    match rng.gen_range(0..4) {
        0 => Point::new(arena.x + rng.gen_range(0..arena.width), arena.y),
        1 => Point::new(arena.right(), arena.y + rng.gen_range(0..arena.height)),
        2 => Point::new(arena.x + rng.gen_range(0..arena.width), arena.bottom()),
        _ => Point::new(arena.x, arena.y + rng.gen_range(0..arena.height)),
    }
}

pub fn lane_width(arena: &Rect) -> i32 {
    arena.width / LANE_COUNT as i32
}

pub fn lane_rect(arena: &Rect, lane: usize) -> Rect {
    let w = lane_width(arena);
    Rect::new(arena.x + lane as i32 * w, arena.y, w, arena.height)
}

/// Lane under horizontal position `x`, clamped to the outermost lanes.
pub fn lane_at(arena: &Rect, x: i32) -> usize {
    let w = lane_width(arena).max(1);
    let lane = (x - arena.x).div_euclid(w);
    lane.clamp(0, LANE_COUNT as i32 - 1) as usize
}

/// Random gap top inside the arena, leaving `clearance` pixels below it.
pub(crate) fn random_gap_y(rng: &mut impl Rng, arena: &Rect, clearance: i32) -> i32 {
    arena.y + rng.gen_range(0..(arena.height - clearance).max(1))
}

pub(crate) fn pattern_rng(seed: Option<u64>, salt: u64) -> StdRng {
    match seed {
        Some(seed) => StdRng::seed_from_u64(seed.wrapping_add(salt)),
        None => StdRng::from_entropy(),
    }
}

/// The five patterns in the order the boss uses them.
pub fn standard_rotation(seed: Option<u64>) -> Vec<Box<dyn AttackPattern>> {
    vec![
        Box::new(MovingGapAttack::new(pattern_rng(seed, 0))),
        Box::new(RandomProjectileAttack::new(pattern_rng(seed, 1))),
        Box::new(HomingProjectileAttack::new(pattern_rng(seed, 2))),
        Box::new(VerticalLaserAttack::new(pattern_rng(seed, 3))),
        Box::new(GunnerAttack::new(pattern_rng(seed, 4))),
    ]
}
