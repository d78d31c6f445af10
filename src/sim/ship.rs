//! The freighter: the player's ship

use glam::IVec2;
use serde::{Deserialize, Serialize};

use super::entity::{MoveGate, Rect, SizeTier};
use super::state::Screen;
use crate::elapsed;
use crate::platform::{SpriteSizes, TextureId};
use crate::tuning::ShipTuning;

/// Which texture the freighter currently shows
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ShipSkin {
    Normal,
    Shield,
}

/// What a ship update means for the session
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShipUpdate {
    Nominal,
    /// hp dropped to zero or below this frame; reported exactly once
    Destroyed,
}

/// Shield flash sequence played after every hit
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ShieldBlink {
    /// Shield flashes shown so far; 0 means the sequence has not started
    pub count: u32,
    /// Time of the last skin toggle
    pub since: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Ship {
    pub rect: Rect,
    pub hp: f32,
    pub max_hp: f32,
    pub speed: IVec2,
    /// Set from held directions every frame
    pub velocity: IVec2,
    pub move_delay: u64,
    pub gate: MoveGate,
    pub alive: bool,
    /// Hit by a rock and still playing the shield sequence
    pub struck: bool,
    pub blink: ShieldBlink,
    pub skin: ShipSkin,
}

impl Ship {
    pub const SIZE: SizeTier = SizeTier::Large;

    pub fn new(screen: Screen, tuning: &ShipTuning, sprites: &SpriteSizes) -> Self {
        let size = sprites.get(TextureId::ShipNormal);
        let mut ship = Self {
            rect: Rect::new(0, 0, size.x, size.y),
            hp: tuning.max_hp,
            max_hp: tuning.max_hp,
            speed: IVec2::new(tuning.x_speed, tuning.y_speed),
            velocity: IVec2::ZERO,
            move_delay: tuning.move_delay,
            gate: MoveGate::default(),
            alive: true,
            struck: false,
            blink: ShieldBlink::default(),
            skin: ShipSkin::Normal,
        };
        ship.place_at_start(screen);
        ship
    }

    /// Centered horizontally, resting on the bottom edge
    pub fn place_at_start(&mut self, screen: Screen) {
        self.rect.set_position(
            screen.width / 2 - self.rect.width() / 2,
            screen.height - self.rect.height(),
        );
    }

    /// Fresh ship for a new level: full hp, no pending hit
    pub fn restore(&mut self, screen: Screen) {
        self.alive = true;
        self.hp = self.max_hp;
        self.struck = false;
        self.blink = ShieldBlink::default();
        self.skin = ShipSkin::Normal;
        self.velocity = IVec2::ZERO;
        self.place_at_start(screen);
    }

    pub fn texture(&self) -> TextureId {
        match self.skin {
            ShipSkin::Normal => TextureId::ShipNormal,
            ShipSkin::Shield => TextureId::ShipShield,
        }
    }

    /// Take a rock's damage and start (or keep) the shield sequence
    pub fn take_hit(&mut self, atk: f32) {
        self.hp -= atk;
        self.struck = true;
    }

    /// Velocity from held directions; right wins over left, down over up
    pub fn steer(&mut self, left: bool, right: bool, up: bool, down: bool) {
        let mut v = IVec2::ZERO;
        if left {
            v.x = -self.speed.x;
        }
        if right {
            v.x = self.speed.x;
        }
        if up {
            v.y = -self.speed.y;
        }
        if down {
            v.y = self.speed.y;
        }
        self.velocity = v;
    }

    pub fn check_struck(&mut self, now: u64, tuning: &ShipTuning) -> ShipUpdate {
        if !self.struck {
            return ShipUpdate::Nominal;
        }

        let mut outcome = ShipUpdate::Nominal;
        if self.hp <= 0.0 && self.alive {
            self.alive = false;
            outcome = ShipUpdate::Destroyed;
        }

        if self.blink.count == 0 {
            self.blink = ShieldBlink { count: 1, since: now };
            self.skin = ShipSkin::Shield;
        } else if self.blink.count >= tuning.blink_count_max {
            self.struck = false;
            self.blink = ShieldBlink::default();
            self.skin = ShipSkin::Normal;
            return outcome;
        }

        if elapsed(now, self.blink.since) >= tuning.blink_interval {
            self.blink.since = now;
            match self.skin {
                ShipSkin::Shield => self.skin = ShipSkin::Normal,
                ShipSkin::Normal => {
                    self.blink.count += 1;
                    self.skin = ShipSkin::Shield;
                }
            }
        }
        outcome
    }

    /// Time-gated move, then keep the whole hull on screen above the HUD strip
    pub fn move_me(&mut self, now: u64, screen: Screen, tuning: &ShipTuning) {
        self.gate.step(&mut self.rect, self.velocity, now, self.move_delay);

        let max_x = screen.width - self.rect.width();
        let max_y = screen.height - (self.rect.height() + tuning.bottom_offset);
        if self.rect.pos.x <= 0 {
            self.rect.pos.x = 0;
        }
        if self.rect.pos.x >= max_x {
            self.rect.pos.x = max_x;
        }
        if self.rect.pos.y <= 0 {
            self.rect.pos.y = 0;
        }
        if self.rect.pos.y >= max_y {
            self.rect.pos.y = max_y;
        }
    }

    pub fn update(
        &mut self,
        now: u64,
        screen: Screen,
        tuning: &ShipTuning,
        sprites: &SpriteSizes,
    ) -> ShipUpdate {
        let outcome = self.check_struck(now, tuning);
        if self.alive {
            self.move_me(now, screen, tuning);
            self.rect.size = sprites.get(self.texture());
        }
        outcome
    }
}
