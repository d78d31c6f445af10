//! Falling rocks
//!
//! Rocks drift diagonally, bounce off the screen edges and the force field
//! above the freighter, and ricochet off rocks of equal or larger size.

use glam::IVec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::entity::{Direction, MoveGate, Rect, SizeTier};
use super::state::Screen;
use crate::platform::{SpriteSizes, TextureId};
use crate::rand_int;
use crate::tuning::RockTuning;

/// What a rock update means for the session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RockUpdate {
    /// The rock reached the force field this frame
    pub hit_force_field: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Rock {
    pub rect: Rect,
    pub size: SizeTier,
    pub direction: Direction,
    pub hp: f32,
    pub max_hp: f32,
    /// Damage dealt to the freighter on contact; equals `max_hp`
    pub atk: f32,
    /// Higher is faster
    pub move_speed: i32,
    /// Pixels per step along each axis
    pub speed: IVec2,
    pub velocity: IVec2,
    pub gate: MoveGate,
    pub alive: bool,
    /// Large rocks show a cracked texture once hurt
    pub damaged: bool,
}

impl Rock {
    /// Rock with randomized stats for its tier, placed at the origin
    pub fn new<R: Rng + ?Sized>(
        rng: &mut R,
        size: SizeTier,
        tuning: &RockTuning,
        sprites: &SpriteSizes,
    ) -> Self {
        let class = tuning.class(size);
        let direction = if rng.random_bool(0.5) {
            Direction::DownLeft
        } else {
            Direction::DownRight
        };
        let mut rock = Self {
            rect: Rect::default(),
            size,
            direction,
            hp: class.hp,
            max_hp: class.hp,
            atk: class.hp,
            move_speed: rand_int(rng, class.move_speed.min, class.move_speed.max),
            speed: IVec2::new(
                rand_int(rng, class.x_speed.min, class.x_speed.max),
                rand_int(rng, class.y_speed.min, class.y_speed.max),
            ),
            velocity: IVec2::ZERO,
            gate: MoveGate::default(),
            alive: true,
            damaged: false,
        };
        rock.rect.size = sprites.get(rock.texture());
        rock
    }

    pub fn random_size<R: Rng + ?Sized>(rng: &mut R) -> SizeTier {
        SizeTier::ALL[rng.random_range(0..SizeTier::ALL.len())]
    }

    /// Refill rock: random column, just above the top edge
    pub fn spawn_above<R: Rng + ?Sized>(
        rng: &mut R,
        screen: Screen,
        tuning: &RockTuning,
        sprites: &SpriteSizes,
    ) -> Self {
        let size = Self::random_size(rng);
        let mut rock = Self::new(rng, size, tuning, sprites);
        let x = rand_int(rng, 0, screen.width - rock.rect.width());
        rock.rect.set_position(x, tuning.spawn_offset_y - rock.rect.height());
        rock
    }

    /// Level-start rock: anywhere on screen clear of the freighter row
    pub fn spawn_on_screen<R: Rng + ?Sized>(
        rng: &mut R,
        screen: Screen,
        ship_height: i32,
        tuning: &RockTuning,
        sprites: &SpriteSizes,
    ) -> Self {
        let size = Self::random_size(rng);
        let mut rock = Self::new(rng, size, tuning, sprites);
        let x = rand_int(rng, 0, screen.width - rock.rect.width());
        let y = rand_int(
            rng,
            0,
            screen.height - (rock.rect.height() + ship_height + crate::consts::ROCK_SETUP_MARGIN),
        );
        rock.rect.set_position(x, y);
        rock
    }

    pub fn texture(&self) -> TextureId {
        match (self.size, self.damaged) {
            (SizeTier::Small, _) => TextureId::RockSmall,
            (SizeTier::Medium, _) => TextureId::RockMedium,
            (SizeTier::Large, false) => TextureId::RockLarge,
            (SizeTier::Large, true) => TextureId::RockLargeDamaged,
        }
    }

    /// Milliseconds between steps; a zero speed falls back to the base
    pub fn move_interval(&self, base: u64) -> u64 {
        if self.move_speed > 0 {
            base / self.move_speed as u64
        } else {
            base
        }
    }

    /// Step along the current heading, then bounce off whatever edge the
    /// rock is heading into. `field_top` is the y of the force field line.
    pub fn move_me(&mut self, now: u64, screen: Screen, field_top: i32, base: u64) -> RockUpdate {
        self.velocity = self.direction.signs() * self.speed;
        let interval = self.move_interval(base);
        self.gate.step(&mut self.rect, self.velocity, now, interval);

        let mut outcome = RockUpdate::default();
        if self.rect.left() <= 0 && self.direction.heads_left() {
            self.direction = self.direction.toward_right();
        }
        if self.rect.left() >= screen.width - self.rect.width() && !self.direction.heads_left() {
            self.direction = self.direction.toward_left();
        }
        if self.rect.top() <= 0 && self.direction.heads_up() {
            self.direction = self.direction.toward_down();
        }
        if self.rect.bottom() >= field_top {
            if !self.direction.heads_up() {
                self.direction = self.direction.toward_up();
            }
            outcome.hit_force_field = true;
        }
        outcome
    }

    pub fn rock_blasted(&mut self) {
        if self.hp <= 0.0 {
            self.alive = false;
        } else if self.hp < self.max_hp && self.alive && self.size == SizeTier::Large {
            self.damaged = true;
        }
    }

    pub fn update(
        &mut self,
        now: u64,
        screen: Screen,
        field_top: i32,
        tuning: &RockTuning,
        sprites: &SpriteSizes,
    ) -> RockUpdate {
        self.rock_blasted();
        if !self.alive {
            return RockUpdate::default();
        }
        let outcome = self.move_me(now, screen, field_top, tuning.move_base);
        self.rect.size = sprites.get(self.texture());
        outcome
    }
}
