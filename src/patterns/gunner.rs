//! Pillars whose openings are plugged with shootable boxes.  The player turns
//! into a ship for the duration and must shoot a way through.

use rand::rngs::StdRng;

use super::{random_gap_y, AttackPattern, ColumnShape, Overlay, PatternContext, Since, Tuning};
use crate::entities::{Bullet, BulletTag, Column};
use crate::geometry::Rect;
use crate::player::PlayerForm;

const COLUMN_WIDTH: i32 = 50;
const GAP_HEIGHT: i32 = 130;
const BOXES_PER_GAP: i32 = 3;
const BOX_SIZE: i32 = 40;
const BOX_SPACING: i32 = 5;
const COLUMN_SPACING: i32 = 300;

pub const SHOT_SIZE: i32 = 10;
pub const SHOT_SPEED: i32 = 10;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct GunnerConfig {
    pub duration_ms: u64,
    pub damage: u32,
    pub speed: i32,
    pub column_count: u32,
}

impl GunnerConfig {
    pub const BASE: GunnerConfig = GunnerConfig {
        duration_ms: 8000,
        damage: 20,
        speed: 4,
        column_count: 5,
    };
}

pub fn scale_for_cycle(base: GunnerConfig, cycle: u32) -> GunnerConfig {
    if cycle == 0 {
        return base;
    }
    GunnerConfig {
        duration_ms: base.duration_ms + 2000,
        damage: base.damage + 5,
        speed: base.speed + 2,
        column_count: base.column_count * 2,
    }
}

/// The shot the player's ship fires from its nose.
pub fn player_shot(hitbox: &Rect) -> Bullet {
    let nose = hitbox.center();
    Bullet::straight(hitbox.right() + SHOT_SIZE / 2, nose.y, SHOT_SIZE, SHOT_SPEED, 0, 0, BulletTag::PlayerShot)
}

pub struct GunnerAttack {
    rng: StdRng,
    config: GunnerConfig,
    started: Since,
    columns: Vec<Column>,
    finished: bool,
}

impl GunnerAttack {
    pub fn new(rng: StdRng) -> Self {
        GunnerAttack {
            rng,
            config: GunnerConfig::BASE,
            started: Since::default(),
            columns: Vec::new(),
            finished: false,
        }
    }

    pub fn config(&self) -> GunnerConfig {
        self.config
    }

    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    fn build_column(&mut self, arena: &Rect, index: i32) -> Column {
        let x = arena.right() + index * COLUMN_SPACING;
        let gap_y = random_gap_y(&mut self.rng, arena, GAP_HEIGHT);
        let mut column = Column::new(x, COLUMN_WIDTH, gap_y, GAP_HEIGHT);
        column.box_size = BOX_SIZE;
        column.box_rows = (0..BOXES_PER_GAP).map(|i| gap_y + i * (BOX_SIZE + BOX_SPACING)).collect();
        column
    }

    /// Each player shot is spent on the first thing it touches: a box (which
    /// breaks), else a solid half of a pillar (which does not).
    fn resolve_shots(&mut self, ctx: &mut PatternContext<'_>) {
        let arena = ctx.arena;
        let columns = &mut self.columns;
        ctx.player_bullets.retain(|shot| {
            let bounds = shot.bounds();
            for column in columns.iter_mut() {
                if let Some(hit) = column.box_rows.iter().position(|&row| column.box_rect(row).intersects(&bounds)) {
                    column.box_rows.remove(hit);
                    return false;
                }
                if column.top_rect(&arena).intersects(&bounds) || column.bottom_rect(&arena).intersects(&bounds) {
                    return false;
                }
            }
            true
        });
    }

    fn touches_player(&self, arena: &Rect, hitbox: &Rect) -> bool {
        self.columns
            .iter()
            .any(|c| c.blocks(arena, hitbox) || c.box_rects().any(|b| b.intersects(hitbox)))
    }

    fn finish(&mut self, ctx: &mut PatternContext<'_>) {
        self.finished = true;
        self.columns.clear();
        ctx.player.set_form(PlayerForm::Soul);
        ctx.clear_bullets();
    }
}

impl AttackPattern for GunnerAttack {
    fn name(&self) -> &'static str {
        "gunner"
    }

    fn initialize(&mut self, ctx: &mut PatternContext<'_>) {
        self.config = scale_for_cycle(GunnerConfig::BASE, ctx.cycle);
        self.started = Since(ctx.now);
        self.finished = false;
        ctx.clear_bullets();
        ctx.player.set_form(PlayerForm::Ship);

        let arena = ctx.arena;
        self.columns = (0..self.config.column_count as i32).map(|i| self.build_column(&arena, i)).collect();
        log::debug!("gunner: {:?}, {} columns", self.config, self.columns.len());
    }

    fn execute(&mut self, ctx: &mut PatternContext<'_>) {
        if self.finished {
            return;
        }
        let arena = ctx.arena;

        for column in &mut self.columns {
            column.x -= self.config.speed;
        }
        self.columns.retain(|c| c.x + c.width >= arena.x);

        self.resolve_shots(ctx);

        let hitbox = ctx.player.hitbox();
        if self.touches_player(&arena, &hitbox) && ctx.strike_player(self.config.damage) {
            self.finish(ctx);
            return;
        }

        if self.started.elapsed(ctx.now) > self.config.duration_ms && self.columns.is_empty() {
            self.finish(ctx);
        }
    }

    fn is_finished(&self) -> bool {
        self.finished
    }

    fn overlay(&self, arena: &Rect) -> Overlay {
        Overlay::Columns(self.columns.iter().map(|c| ColumnShape::of(c, arena)).collect())
    }

    fn allows_shooting(&self) -> bool {
        !self.finished
    }

    fn tuning(&self) -> Tuning {
        Tuning {
            duration_ms: self.config.duration_ms,
            damage: self.config.damage,
            speed: self.config.speed,
            spawn_cap: self.config.column_count,
        }
    }
}
