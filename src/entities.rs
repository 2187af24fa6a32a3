//! Battle entity types: plain data plus the few helpers that keep each
//! entity's own invariants.  The player lives in `player.rs`.

use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString, IntoStaticStr};

use crate::geometry::{Point, Rect};

// ── Difficulty & state ───────────────────────────────────────────────────────

/// Starting-HP preset chosen on the settings screen.
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumIter,
    EnumString,
)]
#[strum(serialize_all = "UPPERCASE", ascii_case_insensitive)]
#[serde(rename_all = "UPPERCASE")]
pub enum Difficulty {
    #[default]
    Easy,
    Hard,
    Cheat,
}

impl Difficulty {
    pub fn description(self) -> &'static str {
        match self {
            Difficulty::Easy => "Easy Mode (300 HP) - Great for beginners!",
            Difficulty::Hard => "Hard Mode (100 HP) - A Challenge!",
            Difficulty::Cheat => "Cheat Mode - A MILLION HP.",
        }
    }

    pub fn next(self) -> Difficulty {
        match self {
            Difficulty::Easy => Difficulty::Hard,
            Difficulty::Hard => Difficulty::Cheat,
            Difficulty::Cheat => Difficulty::Easy,
        }
    }

    pub fn previous(self) -> Difficulty {
        match self {
            Difficulty::Easy => Difficulty::Cheat,
            Difficulty::Hard => Difficulty::Easy,
            Difficulty::Cheat => Difficulty::Hard,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Display)]
pub enum BattleState {
    MainMenu,
    Instructions,
    Settings,
    Intro,
    PlayerMenu,
    PlayerFightTiming,
    PlayerAct,
    PlayerItemSelect,
    Dialog,
    BossAttack,
    Win,
    Lose,
}

// ── Projectiles ───────────────────────────────────────────────────────────────

/// Renderer hint only; the core never branches on it.
#[derive(Clone, Copy, Debug, PartialEq, Eq, IntoStaticStr)]
#[strum(serialize_all = "snake_case")]
pub enum BulletTag {
    Orb,
    Seeker,
    PlayerShot,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum BulletKind {
    /// Keeps the velocity it was spawned with.
    Straight,
    /// Re-aims at the target every tick before moving.
    Homing { speed: f64 },
}

#[derive(Clone, Debug, PartialEq)]
pub struct Bullet {
    /// Centre of the bounding box.
    pub x: i32,
    pub y: i32,
    pub vx: i32,
    pub vy: i32,
    /// Edge length of the square bounding box.
    pub size: i32,
    pub damage: u32,
    pub kind: BulletKind,
    pub tag: BulletTag,
}

impl Bullet {
    pub fn straight(x: i32, y: i32, size: i32, vx: i32, vy: i32, damage: u32, tag: BulletTag) -> Self {
        Bullet { x, y, vx, vy, size, damage, kind: BulletKind::Straight, tag }
    }

    /// A homing projectile starts at rest; the first `home_toward` gives it a heading.
    pub fn homing(x: i32, y: i32, size: i32, damage: u32, speed: f64) -> Self {
        Bullet {
            x,
            y,
            vx: 0,
            vy: 0,
            size,
            damage,
            kind: BulletKind::Homing { speed },
            tag: BulletTag::Seeker,
        }
    }

    pub fn is_homing(&self) -> bool {
        matches!(self.kind, BulletKind::Homing { .. })
    }

    /// Point the velocity at `target` with the bullet's fixed speed.  The target
    /// is looked up by the caller each tick; the bullet holds no reference to it.
    /// A bullet sitting exactly on its target keeps its previous velocity.
    pub fn home_toward(&mut self, target: Point) {
        let BulletKind::Homing { speed } = self.kind else {
            return;
        };
        let dx = (target.x - self.x) as f64;
        let dy = (target.y - self.y) as f64;
        let dist = (dx * dx + dy * dy).sqrt();
        if dist > 0.0 {
            self.vx = (speed * dx / dist) as i32;
            self.vy = (speed * dy / dist) as i32;
        }
    }

    pub fn advance(&mut self) {
        self.x += self.vx;
        self.y += self.vy;
    }

    pub fn bounds(&self) -> Rect {
        Rect::centered_on(Point::new(self.x, self.y), self.size, self.size)
    }

    /// True once the centre is more than one bullet-size outside `area`.
    pub fn is_out_of_bounds(&self, area: &Rect) -> bool {
        self.x < area.x - self.size
            || self.x > area.right() + self.size
            || self.y < area.y - self.size
            || self.y > area.bottom() + self.size
    }
}

// ── Boss ──────────────────────────────────────────────────────────────────────

#[derive(Clone, Debug, PartialEq)]
pub struct Boss {
    name: String,
    hp: u32,
    max_hp: u32,
    region: Rect,
}

impl Boss {
    pub fn new(name: impl Into<String>, max_hp: u32, region: Rect) -> Self {
        Boss { name: name.into(), hp: max_hp, max_hp, region }
    }

    /// Start below full health.  Clamped to max HP.
    pub fn with_hp(mut self, hp: u32) -> Self {
        self.hp = hp.min(self.max_hp);
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn hp(&self) -> u32 {
        self.hp
    }

    pub fn max_hp(&self) -> u32 {
        self.max_hp
    }

    pub fn region(&self) -> Rect {
        self.region
    }

    /// HP never drops below zero.
    pub fn damage(&mut self, amount: u32) {
        self.hp = self.hp.saturating_sub(amount);
    }

    /// HP never rises above max.
    pub fn heal(&mut self, amount: u32) {
        self.hp = self.hp.saturating_add(amount).min(self.max_hp);
    }

    /// `hp / max_hp`, or 0.0 for a boss with no max HP.
    pub fn hp_ratio(&self) -> f64 {
        if self.max_hp == 0 {
            return 0.0;
        }
        self.hp as f64 / self.max_hp as f64
    }

    pub fn is_defeated(&self) -> bool {
        self.hp == 0
    }
}

// ── Items ─────────────────────────────────────────────────────────────────────

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ItemEffect {
    /// Restore a fixed amount, capped at max HP.
    Heal(u32),
    /// Restore all missing HP.
    FullHeal,
    /// Zero the next `charges` damage events.
    Shield { charges: u32 },
    /// Flat bonus added to the next FIGHT computation.
    AttackBoost(u32),
}

#[derive(Clone, Debug, PartialEq)]
pub struct Item {
    pub name: String,
    pub description: String,
    pub effect: ItemEffect,
    quantity: u32,
}

impl Item {
    pub fn new(name: impl Into<String>, description: impl Into<String>, effect: ItemEffect, quantity: u32) -> Self {
        Item { name: name.into(), description: description.into(), effect, quantity }
    }

    pub fn quantity(&self) -> u32 {
        self.quantity
    }

    /// Take one unit.  Returns false (and changes nothing) when none are left.
    pub fn use_one(&mut self) -> bool {
        if self.quantity == 0 {
            return false;
        }
        self.quantity -= 1;
        true
    }
}

// ── Pillar columns ────────────────────────────────────────────────────────────

/// A vertical pillar with an opening.  Only `x`, `gap_y`, `gap_height` and the
/// box rows are stored; every rectangle is derived from them on demand against
/// the current arena, so geometry can never go stale after a move.
#[derive(Clone, Debug, PartialEq)]
pub struct Column {
    pub x: i32,
    pub width: i32,
    pub gap_y: i32,
    pub gap_height: i32,
    /// Top edge of each shootable box still inside the gap.
    pub box_rows: Vec<i32>,
    pub box_size: i32,
}

impl Column {
    pub fn new(x: i32, width: i32, gap_y: i32, gap_height: i32) -> Self {
        Column { x, width, gap_y, gap_height, box_rows: Vec::new(), box_size: 0 }
    }

    pub fn top_rect(&self, arena: &Rect) -> Rect {
        Rect::new(self.x, arena.y, self.width, self.gap_y - arena.y)
    }

    pub fn bottom_rect(&self, arena: &Rect) -> Rect {
        let gap_bottom = self.gap_y + self.gap_height;
        Rect::new(self.x, gap_bottom, self.width, arena.bottom() - gap_bottom)
    }

    pub fn box_rect(&self, row: i32) -> Rect {
        Rect::new(self.x + (self.width - self.box_size) / 2, row, self.box_size, self.box_size)
    }

    pub fn box_rects(&self) -> impl Iterator<Item = Rect> + '_ {
        self.box_rows.iter().map(|&row| self.box_rect(row))
    }

    /// Either solid half of the pillar overlaps `target`.
    pub fn blocks(&self, arena: &Rect, target: &Rect) -> bool {
        self.top_rect(arena).intersects(target) || self.bottom_rect(arena).intersects(target)
    }
}
