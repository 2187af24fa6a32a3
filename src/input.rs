//! Semantic input events, already decoupled from any keyboard layout.

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum CycleDir {
    Forward,
    Backward,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Input {
    /// Direction key went down.  Moves the player while held during a boss
    /// attack; navigates menus everywhere else.
    Press(Direction),
    /// Direction key went up.
    Release(Direction),
    Confirm,
    Cancel,
    Cycle(CycleDir),
    /// Fire a shot; ignored unless the active pattern allows shooting.
    Shoot,
}

/// Level-triggered movement flags, read once per tick.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct MoveIntents {
    pub up: bool,
    pub down: bool,
    pub left: bool,
    pub right: bool,
}

impl MoveIntents {
    pub fn set(&mut self, dir: Direction, held: bool) {
        match dir {
            Direction::Up => self.up = held,
            Direction::Down => self.down = held,
            Direction::Left => self.left = held,
            Direction::Right => self.right = held,
        }
    }

    /// Per-tick displacement.  Opposite keys cancel; the two axes are independent.
    pub fn delta(&self, speed: i32) -> (i32, i32) {
        let mut dx = 0;
        let mut dy = 0;
        if self.left {
            dx -= speed;
        }
        if self.right {
            dx += speed;
        }
        if self.up {
            dy -= speed;
        }
        if self.down {
            dy += speed;
        }
        (dx, dy)
    }
}
