//! Vertical lasers over six equal lanes.
//!
//! A fixed number of steps each light three random lanes: first a warning
//! strip, then the damaging beam.  Afterwards a final phase repeatedly locks
//! onto whichever lane the player is in at the moment the warning appears and
//! fires there, until the phase's time runs out.

use rand::rngs::StdRng;
use rand::seq::index::sample;

use super::{lane_at, lane_rect, AttackPattern, LaneShape, Overlay, PatternContext, Since, Tuning, LANE_COUNT};
use crate::audio::Cue;
use crate::geometry::Rect;

pub const STEP_COUNT: usize = 4;
pub const LANES_PER_STEP: usize = 3;
pub const FINAL_PHASE_MS: u64 = 10_000;
const FINAL_WARNING_MS: u64 = 1000;
const FINAL_ACTIVE_MS: u64 = 500;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct VerticalLaserConfig {
    pub damage: u32,
    pub warning_ms: u64,
    pub active_ms: u64,
}

impl VerticalLaserConfig {
    pub const BASE: VerticalLaserConfig = VerticalLaserConfig {
        damage: 30,
        warning_ms: 1500,
        active_ms: 1000,
    };
}

/// Harder hits with half the warning and beam time.
pub fn scale_for_cycle(base: VerticalLaserConfig, cycle: u32) -> VerticalLaserConfig {
    if cycle == 0 {
        return base;
    }
    VerticalLaserConfig {
        damage: base.damage + 10,
        warning_ms: base.warning_ms / 2,
        active_ms: base.active_ms / 2,
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Phase {
    Step(usize),
    Final,
}

pub struct VerticalLaserAttack {
    rng: StdRng,
    config: VerticalLaserConfig,
    phase: Phase,
    /// Whether the current lanes are firing rather than warning.
    firing: bool,
    phase_since: Since,
    final_since: Since,
    lanes: Vec<usize>,
    finished: bool,
}

impl VerticalLaserAttack {
    pub fn new(rng: StdRng) -> Self {
        VerticalLaserAttack {
            rng,
            config: VerticalLaserConfig::BASE,
            phase: Phase::Step(0),
            firing: false,
            phase_since: Since::default(),
            final_since: Since::default(),
            lanes: Vec::new(),
            finished: false,
        }
    }

    pub fn config(&self) -> VerticalLaserConfig {
        self.config
    }

    /// Lanes currently warning or firing.
    pub fn lanes(&self) -> &[usize] {
        &self.lanes
    }

    pub fn is_firing(&self) -> bool {
        self.firing
    }

    pub fn in_final_phase(&self) -> bool {
        self.phase == Phase::Final
    }

    /// Step index, or `None` once the final phase has begun.
    pub fn step(&self) -> Option<usize> {
        match self.phase {
            Phase::Step(i) => Some(i),
            Phase::Final => None,
        }
    }

    fn pick_step_lanes(&mut self) {
        self.lanes = sample(&mut self.rng, LANE_COUNT, LANES_PER_STEP).into_vec();
        self.lanes.sort_unstable();
    }

    fn lock_onto_player(&mut self, ctx: &PatternContext<'_>) {
        let center = ctx.player.hitbox().center();
        self.lanes = vec![lane_at(&ctx.arena, center.x)];
    }

    fn warn(&mut self, ctx: &mut PatternContext<'_>) {
        self.firing = false;
        self.phase_since = Since(ctx.now);
        ctx.cues.trigger(Cue::LaserCharge);
    }

    fn warning_ms(&self) -> u64 {
        match self.phase {
            Phase::Step(_) => self.config.warning_ms,
            Phase::Final => FINAL_WARNING_MS,
        }
    }

    fn active_ms(&self) -> u64 {
        match self.phase {
            Phase::Step(_) => self.config.active_ms,
            Phase::Final => FINAL_ACTIVE_MS,
        }
    }

    fn finish(&mut self, ctx: &mut PatternContext<'_>) {
        self.finished = true;
        self.firing = false;
        self.lanes.clear();
        ctx.clear_bullets();
    }
}

impl AttackPattern for VerticalLaserAttack {
    fn name(&self) -> &'static str {
        "vertical laser"
    }

    fn initialize(&mut self, ctx: &mut PatternContext<'_>) {
        self.config = scale_for_cycle(VerticalLaserConfig::BASE, ctx.cycle);
        self.phase = Phase::Step(0);
        self.final_since = Since(ctx.now);
        self.finished = false;
        ctx.clear_bullets();
        self.pick_step_lanes();
        self.warn(ctx);
        log::debug!("vertical laser: {:?}, first lanes {:?}", self.config, self.lanes);
    }

    fn execute(&mut self, ctx: &mut PatternContext<'_>) {
        if self.finished {
            return;
        }
        if self.phase == Phase::Final && self.final_since.elapsed(ctx.now) >= FINAL_PHASE_MS {
            self.finish(ctx);
            return;
        }

        let in_phase = self.phase_since.elapsed(ctx.now);
        if !self.firing {
            if in_phase >= self.warning_ms() {
                self.firing = true;
                self.phase_since = Since(ctx.now);
                ctx.cues.trigger(Cue::LaserFire);
            }
            // The beam only hurts from the tick after it lights up.
            return;
        }

        if in_phase >= self.active_ms() {
            match self.phase {
                Phase::Step(i) if i + 1 < STEP_COUNT => {
                    self.phase = Phase::Step(i + 1);
                    self.pick_step_lanes();
                }
                Phase::Step(_) => {
                    self.phase = Phase::Final;
                    self.final_since = Since(ctx.now);
                    self.lock_onto_player(ctx);
                }
                Phase::Final => self.lock_onto_player(ctx),
            }
            self.warn(ctx);
            return;
        }

        let hitbox = ctx.player.hitbox();
        let hit = self.lanes.iter().any(|&lane| lane_rect(&ctx.arena, lane).intersects(&hitbox));
        if hit && ctx.strike_player(self.config.damage) {
            self.finish(ctx);
        }
    }

    fn is_finished(&self) -> bool {
        self.finished
    }

    fn overlay(&self, arena: &Rect) -> Overlay {
        Overlay::Lanes(
            self.lanes
                .iter()
                .map(|&lane| LaneShape {
                    lane,
                    rect: lane_rect(arena, lane),
                    active: self.firing,
                })
                .collect(),
        )
    }

    fn tuning(&self) -> Tuning {
        Tuning {
            duration_ms: FINAL_PHASE_MS,
            damage: self.config.damage,
            speed: 0,
            spawn_cap: (STEP_COUNT * LANES_PER_STEP) as u32,
        }
    }
}
