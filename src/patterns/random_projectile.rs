//! Orbs fly into the arena from random points along its outline.

use rand::rngs::StdRng;
use rand::Rng;

use super::{AttackPattern, Overlay, PatternContext, Since, Tuning};
use crate::entities::{Bullet, BulletTag};
use crate::geometry::Rect;

const SPAWN_INTERVAL_MS: u64 = 100;
const ORB_SIZE: i32 = 35;
const MIN_SPEED: i32 = 3;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RandomProjectileConfig {
    pub spawn_cap: u32,
    pub damage: u32,
    /// Upper bound of each velocity component, pixels per tick.
    pub max_speed: i32,
}

impl RandomProjectileConfig {
    pub const BASE: RandomProjectileConfig = RandomProjectileConfig {
        spawn_cap: 100,
        damage: 10,
        max_speed: 4,
    };
}

/// Only the spawn cap grows: twice as many orbs.
pub fn scale_for_cycle(base: RandomProjectileConfig, cycle: u32) -> RandomProjectileConfig {
    if cycle == 0 {
        return base;
    }
    RandomProjectileConfig { spawn_cap: base.spawn_cap * 2, ..base }
}

pub struct RandomProjectileAttack {
    rng: StdRng,
    config: RandomProjectileConfig,
    last_spawn: Since,
    spawned: u32,
    finished: bool,
}

impl RandomProjectileAttack {
    pub fn new(rng: StdRng) -> Self {
        RandomProjectileAttack {
            rng,
            config: RandomProjectileConfig::BASE,
            last_spawn: Since::default(),
            spawned: 0,
            finished: false,
        }
    }

    pub fn config(&self) -> RandomProjectileConfig {
        self.config
    }

    pub fn spawned(&self) -> u32 {
        self.spawned
    }

    /// An orb just outside a random side, heading inward with a random
    /// sideways drift.
    fn spawn_orb(&mut self, arena: &Rect) -> Bullet {
        let half = ORB_SIZE / 2;
        let inward = self.rng.gen_range(MIN_SPEED..=self.config.max_speed);
        let mut drift = self.rng.gen_range(MIN_SPEED..=self.config.max_speed);
        if self.rng.gen_bool(0.5) {
            drift = -drift;
        }
        let along_x = arena.x + self.rng.gen_range(0..arena.width.max(1));
        let along_y = arena.y + self.rng.gen_range(0..arena.height.max(1));

        let (x, y, vx, vy) = match self.rng.gen_range(0..4) {
            0 => (along_x, arena.y - half, drift, inward),
            1 => (arena.right() + half, along_y, -inward, drift),
            2 => (along_x, arena.bottom() + half, drift, -inward),
            _ => (arena.x - half, along_y, inward, drift),
        };
        Bullet::straight(x, y, ORB_SIZE, vx, vy, self.config.damage, BulletTag::Orb)
    }
}

impl AttackPattern for RandomProjectileAttack {
    fn name(&self) -> &'static str {
        "random projectile"
    }

    fn initialize(&mut self, ctx: &mut PatternContext<'_>) {
        self.config = scale_for_cycle(RandomProjectileConfig::BASE, ctx.cycle);
        self.last_spawn = Since(ctx.now);
        self.spawned = 0;
        self.finished = false;
        ctx.clear_bullets();
        log::debug!("random projectile: {:?}", self.config);
    }

    fn execute(&mut self, ctx: &mut PatternContext<'_>) {
        if self.finished {
            return;
        }

        if self.spawned < self.config.spawn_cap && self.last_spawn.elapsed(ctx.now) >= SPAWN_INTERVAL_MS {
            let orb = self.spawn_orb(&ctx.arena);
            ctx.boss_bullets.push(orb);
            self.spawned += 1;
            self.last_spawn = Since(ctx.now);
        }

        if ctx.sweep_boss_bullets() {
            self.finished = true;
            return;
        }

        if self.spawned >= self.config.spawn_cap && ctx.boss_bullets.is_empty() {
            self.finished = true;
        }
    }

    fn is_finished(&self) -> bool {
        self.finished
    }

    fn overlay(&self, _arena: &Rect) -> Overlay {
        Overlay::None
    }

    fn tuning(&self) -> Tuning {
        Tuning {
            duration_ms: 0,
            damage: self.config.damage,
            speed: self.config.max_speed,
            spawn_cap: self.config.spawn_cap,
        }
    }
}
