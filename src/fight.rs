//! The FIGHT timing minigame: a marker sweeping back and forth over a bar.

use crate::compute::{classify_hit, HitTier};

pub const BAR_WIDTH: i32 = 400;
pub const TARGET_WIDTH: i32 = 100;
/// Pixels the marker moves each tick.
pub const MARKER_SPEED: i32 = 5;
/// How far past either end of the bar the marker travels before turning.
pub const OVERSHOOT: i32 = 40;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FightBar {
    /// Marker position relative to the bar's left edge.
    marker: i32,
    moving_right: bool,
    confirmed: bool,
}

impl Default for FightBar {
    fn default() -> Self {
        FightBar::new()
    }
}

impl FightBar {
    pub fn new() -> Self {
        FightBar { marker: 0, moving_right: true, confirmed: false }
    }

    /// Marker back to the left end, moving right, ready for one confirm.
    pub fn reset(&mut self) {
        *self = FightBar::new();
    }

    pub fn marker(&self) -> i32 {
        self.marker
    }

    pub fn is_moving_right(&self) -> bool {
        self.moving_right
    }

    pub fn is_confirmed(&self) -> bool {
        self.confirmed
    }

    /// Left edge of the perfect zone, relative to the bar.
    pub fn target_start() -> i32 {
        BAR_WIDTH / 2 - TARGET_WIDTH / 2
    }

    /// One tick of marker motion.  Frozen once confirmed.
    pub fn advance(&mut self) {
        if self.confirmed {
            return;
        }
        if self.moving_right {
            self.marker += MARKER_SPEED;
            if self.marker >= BAR_WIDTH + OVERSHOOT {
                self.moving_right = false;
            }
        } else {
            self.marker -= MARKER_SPEED;
            if self.marker <= -OVERSHOOT {
                self.moving_right = true;
            }
        }
    }

    /// Lock in the current marker position.  Only the first confirm after a
    /// reset yields a tier; repeats return `None` so one intent can never
    /// apply damage twice.
    pub fn confirm(&mut self) -> Option<HitTier> {
        if self.confirmed {
            return None;
        }
        self.confirmed = true;
        Some(self.tier())
    }

    /// Tier the marker would score right now.
    pub fn tier(&self) -> HitTier {
        classify_hit(self.marker, BAR_WIDTH, FightBar::target_start(), TARGET_WIDTH)
    }
}
