//! A blinking warning, then seekers that chase the player.
//!
//! Nothing spawns during the warning delay.  When it ends a burst of
//! [`BURST_SIZE`] seekers launches at once from random edge points; after that
//! one more follows every `spawn_interval_ms` until the cap is reached.

use rand::rngs::StdRng;

use super::{random_edge_point, AttackPattern, Overlay, PatternContext, Since, Tuning};
use crate::audio::Cue;
use crate::entities::Bullet;
use crate::geometry::{Point, Rect};

pub const WARNING_DELAY_MS: u64 = 2000;
/// Half-period of the warning marker's blink.
pub const BLINK_MS: u64 = 500;
pub const BURST_SIZE: u32 = 5;
const SEEKER_SIZE: i32 = 45;
const SEEKER_SPEED: f64 = 5.0;
/// Vertical offset of the warning marker from the arena top.
const WARNING_OFFSET_Y: i32 = 180;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct HomingConfig {
    pub duration_ms: u64,
    pub damage: u32,
    pub spawn_interval_ms: u64,
    pub spawn_cap: u32,
}

impl HomingConfig {
    pub const BASE: HomingConfig = HomingConfig {
        duration_ms: 7000,
        damage: 15,
        spawn_interval_ms: 2000,
        spawn_cap: 10,
    };
}

pub fn scale_for_cycle(base: HomingConfig, cycle: u32) -> HomingConfig {
    if cycle == 0 {
        return base;
    }
    HomingConfig {
        duration_ms: base.duration_ms + 3000,
        damage: base.damage + 10,
        spawn_interval_ms: base.spawn_interval_ms.saturating_sub(500),
        spawn_cap: base.spawn_cap + 5,
    }
}

pub struct HomingProjectileAttack {
    rng: StdRng,
    config: HomingConfig,
    started: Since,
    last_spawn: Since,
    spawned: u32,
    launched: bool,
    warning: Option<Point>,
    finished: bool,
}

impl HomingProjectileAttack {
    pub fn new(rng: StdRng) -> Self {
        HomingProjectileAttack {
            rng,
            config: HomingConfig::BASE,
            started: Since::default(),
            last_spawn: Since::default(),
            spawned: 0,
            launched: false,
            warning: None,
            finished: false,
        }
    }

    pub fn config(&self) -> HomingConfig {
        self.config
    }

    pub fn spawned(&self) -> u32 {
        self.spawned
    }

    /// Whether the initial burst has gone out.
    pub fn has_launched(&self) -> bool {
        self.launched
    }

    /// Position of the "!" marker while it is lit.
    pub fn warning(&self) -> Option<Point> {
        self.warning
    }

    fn spawn_seeker(&mut self, ctx: &mut PatternContext<'_>) {
        let at = random_edge_point(&mut self.rng, &ctx.arena);
        ctx.boss_bullets.push(Bullet::homing(at.x, at.y, SEEKER_SIZE, self.config.damage, SEEKER_SPEED));
        self.spawned += 1;
    }

    fn finish(&mut self, ctx: &mut PatternContext<'_>) {
        self.finished = true;
        self.warning = None;
        ctx.clear_bullets();
    }
}

impl AttackPattern for HomingProjectileAttack {
    fn name(&self) -> &'static str {
        "homing projectile"
    }

    fn initialize(&mut self, ctx: &mut PatternContext<'_>) {
        self.config = scale_for_cycle(HomingConfig::BASE, ctx.cycle);
        self.started = Since(ctx.now);
        self.last_spawn = Since(ctx.now);
        self.spawned = 0;
        self.launched = false;
        self.finished = false;
        self.warning = Some(Point::new(ctx.arena.center().x, ctx.arena.y + WARNING_OFFSET_Y));
        ctx.clear_bullets();
        ctx.cues.trigger(Cue::HomingWarning);
        log::debug!("homing projectile: {:?}", self.config);
    }

    fn execute(&mut self, ctx: &mut PatternContext<'_>) {
        if self.finished {
            return;
        }
        let elapsed = self.started.elapsed(ctx.now);

        if !self.launched {
            if elapsed >= WARNING_DELAY_MS {
                let burst = BURST_SIZE.min(self.config.spawn_cap);
                for _ in 0..burst {
                    self.spawn_seeker(ctx);
                }
                self.launched = true;
                self.warning = None;
                self.last_spawn = Since(ctx.now);
                ctx.cues.trigger(Cue::HomingLaunch);
                log::trace!("homing burst of {} at {}", burst, ctx.now);
            } else {
                let lit = (elapsed / BLINK_MS) % 2 == 0;
                self.warning = lit.then(|| Point::new(ctx.arena.center().x, ctx.arena.y + WARNING_OFFSET_Y));
            }
        } else if self.spawned < self.config.spawn_cap
            && self.last_spawn.elapsed(ctx.now) >= self.config.spawn_interval_ms
        {
            self.spawn_seeker(ctx);
            self.last_spawn = Since(ctx.now);
        }

        if self.launched && ctx.sweep_boss_bullets() {
            self.finish(ctx);
            return;
        }

        let all_spent = self.launched && ctx.boss_bullets.is_empty() && self.spawned >= self.config.spawn_cap;
        if elapsed >= self.config.duration_ms || all_spent {
            self.finish(ctx);
        }
    }

    fn is_finished(&self) -> bool {
        self.finished
    }

    fn overlay(&self, _arena: &Rect) -> Overlay {
        Overlay::Warning(self.warning)
    }

    fn tuning(&self) -> Tuning {
        Tuning {
            duration_ms: self.config.duration_ms,
            damage: self.config.damage,
            speed: SEEKER_SPEED as i32,
            spawn_cap: self.config.spawn_cap,
        }
    }
}
