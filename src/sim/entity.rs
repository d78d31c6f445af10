//! Shared building blocks for every simulated object
//!
//! Entities compose these pieces instead of inheriting a common base:
//! every entity owns a [`Rect`], movers add a [`MoveGate`], and only the
//! ship, rocks and lasers carry hit points or attack values.

use glam::IVec2;
use serde::{Deserialize, Serialize};

use crate::elapsed;

/// Axis-aligned bounding box in screen pixels (y grows downward)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Rect {
    pub pos: IVec2,
    pub size: IVec2,
}

impl Rect {
    pub const fn new(x: i32, y: i32, w: i32, h: i32) -> Self {
        Self {
            pos: IVec2::new(x, y),
            size: IVec2::new(w, h),
        }
    }

    #[inline]
    pub fn left(&self) -> i32 {
        self.pos.x
    }

    #[inline]
    pub fn right(&self) -> i32 {
        self.pos.x + self.size.x
    }

    #[inline]
    pub fn top(&self) -> i32 {
        self.pos.y
    }

    #[inline]
    pub fn bottom(&self) -> i32 {
        self.pos.y + self.size.y
    }

    #[inline]
    pub fn width(&self) -> i32 {
        self.size.x
    }

    #[inline]
    pub fn height(&self) -> i32 {
        self.size.y
    }

    /// Center point (integer division, rounds toward the top-left)
    pub fn center(&self) -> IVec2 {
        IVec2::new(
            self.pos.x + self.size.x.div_euclid(2),
            self.pos.y + self.size.y.div_euclid(2),
        )
    }

    /// Rect of `size` centered on `center`
    pub fn centered_on(center: IVec2, size: IVec2) -> Self {
        Self {
            pos: IVec2::new(
                center.x - size.x.div_euclid(2),
                center.y - size.y.div_euclid(2),
            ),
            size,
        }
    }

    #[inline]
    pub fn move_by(&mut self, delta: IVec2) {
        self.pos += delta;
    }

    pub fn set_position(&mut self, x: i32, y: i32) {
        self.pos = IVec2::new(x, y);
    }

    /// Strict overlap test: shared edges do not count and empty rects never overlap
    pub fn overlaps(&self, other: &Rect) -> bool {
        if self.size.x <= 0 || self.size.y <= 0 || other.size.x <= 0 || other.size.y <= 0 {
            return false;
        }
        self.left() < other.right()
            && other.left() < self.right()
            && self.top() < other.bottom()
            && other.top() < self.bottom()
    }
}

/// Rock size tier, ordered so smaller rocks yield to larger ones
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub enum SizeTier {
    Small,
    Medium,
    Large,
}

impl SizeTier {
    pub const ALL: [SizeTier; 3] = [SizeTier::Small, SizeTier::Medium, SizeTier::Large];
}

/// Diagonal heading of a rock; there is no axial variant
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    DownLeft,
    DownRight,
    UpLeft,
    UpRight,
}

impl Direction {
    pub const ALL: [Direction; 4] = [
        Direction::DownLeft,
        Direction::DownRight,
        Direction::UpLeft,
        Direction::UpRight,
    ];

    #[inline]
    pub fn heads_left(self) -> bool {
        matches!(self, Direction::DownLeft | Direction::UpLeft)
    }

    #[inline]
    pub fn heads_up(self) -> bool {
        matches!(self, Direction::UpLeft | Direction::UpRight)
    }

    /// Same vertical component, horizontal component pointing right
    pub fn toward_right(self) -> Self {
        if self.heads_up() {
            Direction::UpRight
        } else {
            Direction::DownRight
        }
    }

    pub fn toward_left(self) -> Self {
        if self.heads_up() {
            Direction::UpLeft
        } else {
            Direction::DownLeft
        }
    }

    /// Same horizontal component, vertical component pointing down
    pub fn toward_down(self) -> Self {
        if self.heads_left() {
            Direction::DownLeft
        } else {
            Direction::DownRight
        }
    }

    pub fn toward_up(self) -> Self {
        if self.heads_left() {
            Direction::UpLeft
        } else {
            Direction::UpRight
        }
    }

    /// Unit signs of the heading (screen coordinates, +y is down)
    pub fn signs(self) -> IVec2 {
        match self {
            Direction::DownLeft => IVec2::new(-1, 1),
            Direction::DownRight => IVec2::new(1, 1),
            Direction::UpLeft => IVec2::new(-1, -1),
            Direction::UpRight => IVec2::new(1, -1),
        }
    }
}

/// Time-gated movement: a step is taken only once `delay` ms have passed
/// since the previous one, decoupling movement rate from frame rate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct MoveGate {
    pub last_move_time: u64,
}

impl MoveGate {
    #[inline]
    pub fn ready(&self, now: u64, delay: u64) -> bool {
        elapsed(now, self.last_move_time) >= delay
    }

    /// Apply `velocity` to `rect` if the gate is open; returns whether it moved
    pub fn step(&mut self, rect: &mut Rect, velocity: IVec2, now: u64, delay: u64) -> bool {
        if !self.ready(now, delay) {
            return false;
        }
        rect.move_by(velocity);
        self.last_move_time = now;
        true
    }
}
