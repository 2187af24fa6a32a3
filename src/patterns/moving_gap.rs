//! Pillars with a single opening scroll right-to-left through the arena.

use rand::rngs::StdRng;

use super::{random_gap_y, AttackPattern, ColumnShape, Overlay, PatternContext, Since, Tuning};
use crate::entities::Column;
use crate::geometry::Rect;

const PILLAR_WIDTH: i32 = 60;
const GAP_HEIGHT: i32 = 80;
/// Space kept below the top of any gap so it always fits inside the arena.
const GAP_CLEARANCE: i32 = 100;
const PILLAR_SPACING: i32 = 500;
/// First pillar spawns this far right of the arena.
const SPAWN_OFFSET: i32 = 200;
/// Pillars are dropped once fully this far left of the arena.
const DESPAWN_MARGIN: i32 = 200;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct MovingGapConfig {
    pub duration_ms: u64,
    pub damage: u32,
    /// Pixels per tick.
    pub speed: i32,
    pub pillar_count: u32,
}

impl MovingGapConfig {
    pub const BASE: MovingGapConfig = MovingGapConfig {
        duration_ms: 8000,
        damage: 20,
        speed: 5,
        pillar_count: 8,
    };
}

/// Longer run, harder hits, double speed and twice the pillars.
pub fn scale_for_cycle(base: MovingGapConfig, cycle: u32) -> MovingGapConfig {
    if cycle == 0 {
        return base;
    }
    MovingGapConfig {
        duration_ms: base.duration_ms + 6000,
        damage: base.damage + 5,
        speed: base.speed + 5,
        pillar_count: base.pillar_count * 2,
    }
}

pub struct MovingGapAttack {
    rng: StdRng,
    config: MovingGapConfig,
    started: Since,
    columns: Vec<Column>,
    finished: bool,
}

impl MovingGapAttack {
    pub fn new(rng: StdRng) -> Self {
        MovingGapAttack {
            rng,
            config: MovingGapConfig::BASE,
            started: Since::default(),
            columns: Vec::new(),
            finished: false,
        }
    }

    pub fn config(&self) -> MovingGapConfig {
        self.config
    }

    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    fn finish(&mut self, ctx: &mut PatternContext<'_>) {
        self.finished = true;
        self.columns.clear();
        ctx.clear_bullets();
    }
}

impl AttackPattern for MovingGapAttack {
    fn name(&self) -> &'static str {
        "moving gap"
    }

    fn initialize(&mut self, ctx: &mut PatternContext<'_>) {
        self.config = scale_for_cycle(MovingGapConfig::BASE, ctx.cycle);
        self.started = Since(ctx.now);
        self.finished = false;
        ctx.clear_bullets();

        let arena = ctx.arena;
        self.columns = (0..self.config.pillar_count as i32)
            .map(|i| {
                let x = arena.right() + SPAWN_OFFSET + i * PILLAR_SPACING;
                let gap_y = random_gap_y(&mut self.rng, &arena, GAP_CLEARANCE);
                Column::new(x, PILLAR_WIDTH, gap_y, GAP_HEIGHT)
            })
            .collect();
        log::debug!("moving gap: {:?}, {} pillars", self.config, self.columns.len());
    }

    fn execute(&mut self, ctx: &mut PatternContext<'_>) {
        if self.finished {
            return;
        }
        let arena = ctx.arena;

        for column in &mut self.columns {
            column.x -= self.config.speed;
        }
        let limit = arena.x - DESPAWN_MARGIN;
        self.columns.retain(|c| c.x + c.width >= limit);

        let hitbox = ctx.player.hitbox();
        if self.columns.iter().any(|c| c.blocks(&arena, &hitbox)) && ctx.strike_player(self.config.damage) {
            self.finish(ctx);
            return;
        }

        if self.started.elapsed(ctx.now) > self.config.duration_ms && self.columns.is_empty() {
            self.finished = true;
        }
    }

    fn is_finished(&self) -> bool {
        self.finished
    }

    fn overlay(&self, arena: &Rect) -> Overlay {
        Overlay::Columns(self.columns.iter().map(|c| ColumnShape::of(c, arena)).collect())
    }

    fn tuning(&self) -> Tuning {
        Tuning {
            duration_ms: self.config.duration_ms,
            damage: self.config.damage,
            speed: self.config.speed,
            spawn_cap: self.config.pillar_count,
        }
    }
}
