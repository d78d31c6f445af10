//! Game session state and level lifecycle
//!
//! The session owns every entity collection, the clock and the win/lose
//! flags. Entities never reach back into it: they get what they need as
//! arguments and report outcomes that the session acts on.

use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::Serialize;

use super::boom::Boom;
use super::entity::{Rect, SizeTier};
use super::laser::Laser;
use super::pickup::Crate;
use super::rock::Rock;
use super::ship::Ship;
use crate::audio::SoundEffect;
use crate::consts::*;
use crate::elapsed;
use crate::platform::{Color, SpriteSizes, TextureId};
use crate::tuning::Tuning;

/// Play area size in pixels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Screen {
    pub width: i32,
    pub height: i32,
}

impl Screen {
    pub const fn new(width: i32, height: i32) -> Self {
        Self { width, height }
    }
}

/// Session flags driving the level state machine
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SessionFlags {
    /// Collisions and damage are live
    pub engageable: bool,
    pub you_lose: bool,
    pub you_win: bool,
    /// Won the final level
    pub you_win_game: bool,
}

impl SessionFlags {
    pub const fn active() -> Self {
        Self {
            engageable: true,
            you_lose: false,
            you_win: false,
            you_win_game: false,
        }
    }
}

/// Coarse view of the flags, for the HUD and the autopilot
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum GamePhase {
    Active,
    Lost,
    Won,
    GameWon,
}

/// Things that happened during a tick, for audio and logging
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum GameEvent {
    Sound(SoundEffect),
    Music { playing: bool },
    LevelStarted { level: u32 },
    /// `level` is the level that was just cleared
    LevelWon { level: u32 },
    GameWon,
    ShipDestroyed,
}

/// Line above the freighter that rocks bounce off
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct ForceField {
    pub rect: Rect,
    pub blink_on: bool,
    pub blink_time: u64,
}

impl ForceField {
    pub fn trigger(&mut self, now: u64) {
        self.blink_on = true;
        self.blink_time = now;
    }

    /// Turn the glow off once it has lasted `duration`; true when it just went off
    pub fn decay(&mut self, now: u64, duration: u64) -> bool {
        if self.blink_on && elapsed(now, self.blink_time) >= duration {
            self.blink_on = false;
            return true;
        }
        false
    }

    pub fn color(&self) -> Color {
        if self.blink_on {
            COLOR_FORCE_FIELD_LIT
        } else {
            COLOR_FORCE_FIELD_IDLE
        }
    }
}

/// Red back bar and green fill under the freighter
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct HealthBar {
    pub back: Rect,
    pub fill: Rect,
}

impl HealthBar {
    pub fn follow(&mut self, ship: &Ship, tuning: &Tuning) {
        let offsets = &tuning.health_bar;
        let width = (ship.rect.width() - offsets.width_offset).max(0);
        let x = ship.rect.left() + offsets.offset_x;
        let y = ship.rect.bottom() + offsets.offset_y;
        let ratio = if ship.max_hp > 0.0 {
            (ship.hp / ship.max_hp).clamp(0.0, 1.0)
        } else {
            0.0
        };
        self.back = Rect::new(x, y, width, HEALTH_BAR_HEIGHT);
        self.fill = Rect::new(x, y, (width as f32 * ratio) as i32, HEALTH_BAR_HEIGHT);
    }
}

/// Rocks per level unit: `round((width + height) / divisor)`, ties to even
pub fn area_modifier(screen: Screen, divisor: f64) -> u32 {
    let raw = (f64::from(screen.width) + f64::from(screen.height)) / divisor;
    raw.round_ties_even().max(0.0) as u32
}

/// Complete session state
#[derive(Debug, Clone, Serialize)]
pub struct GameState {
    pub seed: u64,
    pub screen: Screen,
    pub area_mod: u32,
    /// Current level, 1-based
    pub level: u32,
    pub total_crates: usize,
    pub total_rocks: usize,
    /// Clock sample for the current frame (ms)
    pub time: u64,
    pub last_laser_shot_time: u64,
    /// Last time the ship blew up or a post-win rock was blasted
    pub all_rock_blast_time: u64,
    pub flags: SessionFlags,
    pub music_playing: bool,
    pub ship: Ship,
    pub rocks: Vec<Rock>,
    pub lasers: Vec<Laser>,
    pub crates: Vec<Crate>,
    pub booms: Vec<Boom>,
    pub force_field: ForceField,
    pub health_bar: HealthBar,
    pub base_left: Rect,
    pub base_right: Rect,
    #[serde(skip)]
    pub tuning: Tuning,
    #[serde(skip)]
    pub sprites: SpriteSizes,
    #[serde(skip)]
    pub(crate) rng: Pcg32,
    #[serde(skip)]
    pub events: Vec<GameEvent>,
}

impl GameState {
    /// New session on level 1
    pub fn new(seed: u64, screen: Screen, tuning: Tuning, sprites: SpriteSizes) -> Self {
        let ship = Ship::new(screen, &tuning.ship, &sprites);
        let mut state = Self {
            seed,
            screen,
            area_mod: area_modifier(screen, tuning.level.area_modifier_divisor),
            level: 1,
            total_crates: 0,
            total_rocks: 0,
            time: 0,
            last_laser_shot_time: 0,
            all_rock_blast_time: 0,
            flags: SessionFlags::active(),
            music_playing: false,
            ship,
            rocks: Vec::new(),
            lasers: Vec::new(),
            crates: Vec::new(),
            booms: Vec::new(),
            force_field: ForceField::default(),
            health_bar: HealthBar::default(),
            base_left: Rect::default(),
            base_right: Rect::default(),
            tuning,
            sprites,
            rng: Pcg32::seed_from_u64(seed),
            events: Vec::new(),
        };
        log::info!(
            "Session seed={} screen={}x{} area_mod={}",
            seed,
            screen.width,
            screen.height,
            state.area_mod
        );
        state.level_setup();
        state
    }

    pub fn phase(&self) -> GamePhase {
        let f = &self.flags;
        if f.you_win_game {
            GamePhase::GameWon
        } else if f.you_win {
            GamePhase::Won
        } else if f.you_lose {
            GamePhase::Lost
        } else {
            GamePhase::Active
        }
    }

    pub fn emit(&mut self, event: GameEvent) {
        self.events.push(event);
    }

    /// Take the events produced since the last drain
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    /// Top edge of the force field; rocks bounce when their bottom reaches it
    pub fn field_top(&self) -> i32 {
        self.force_field.rect.top()
    }

    /// Reset flags and repopulate the current level
    pub fn level_setup(&mut self) {
        self.flags = SessionFlags::active();
        self.force_field.blink_on = false;
        self.last_laser_shot_time = 0;

        self.total_crates = self.level as usize;
        self.total_rocks = self.level as usize * self.area_mod as usize;

        self.crates.clear();
        self.rocks.clear();
        self.ship.restore(self.screen);

        self.create_crates();
        self.create_rocks();
        self.create_world_shapes();

        log::info!(
            "Level {} setup: {} crates, {} rocks",
            self.level,
            self.total_crates,
            self.total_rocks
        );
        self.emit(GameEvent::LevelStarted { level: self.level });
        self.emit(GameEvent::Sound(SoundEffect::LevelStart));
    }

    fn create_crates(&mut self) {
        for _ in 0..self.total_crates {
            let c = Crate::spawn(&mut self.rng, self.screen, &self.sprites);
            self.crates.push(c);
        }
    }

    fn create_rocks(&mut self) {
        let ship_height = self.ship.rect.height();
        for _ in 0..self.total_rocks {
            let rock = Rock::spawn_on_screen(
                &mut self.rng,
                self.screen,
                ship_height,
                &self.tuning.rock,
                &self.sprites,
            );
            self.rocks.push(rock);
        }
    }

    /// Force field, health bar and base decorations depend on screen and ship size
    fn create_world_shapes(&mut self) {
        let Screen { width, height } = self.screen;
        let ship_height = self.ship.rect.height();

        self.force_field.rect = Rect::new(
            0,
            height - ship_height - self.tuning.force_field.offset,
            width,
            FORCE_FIELD_THICKNESS,
        );
        self.health_bar.follow(&self.ship, &self.tuning);

        let left = self.sprites.get(TextureId::BaseLeft);
        let right = self.sprites.get(TextureId::BaseRight);
        self.base_left = Rect::new(0, height - left.y, left.x, left.y);
        self.base_right = Rect::new(width - right.x, height - right.y, right.x, right.y);
    }

    /// Advance the level counter, or mark the game won at the last level
    pub fn level_up(&mut self) {
        if self.level >= self.tuning.level.max_level {
            self.flags.you_win_game = true;
            log::info!("Final level {} cleared - game won", self.level);
            self.emit(GameEvent::GameWon);
        } else {
            self.level += 1;
        }
    }

    /// Restart after a loss or a full win, or enter the next level after a win
    pub fn restart(&mut self) {
        if self.flags.you_win_game || self.flags.you_lose {
            self.level = 1;
            self.level_setup();
        } else if self.flags.you_win {
            self.level_setup();
        }
    }

    /// Fire a laser if collisions are live, the ship is alive and the cooldown passed
    pub fn shoot_laser(&mut self) -> bool {
        let ready = elapsed(self.time, self.last_laser_shot_time) >= self.tuning.laser.shot_cooldown;
        if !(self.flags.engageable && self.ship.alive && ready) {
            return false;
        }
        let laser = Laser::fire(&self.ship.rect, &self.tuning.laser, &self.sprites);
        self.lasers.push(laser);
        self.last_laser_shot_time = self.time;
        self.emit(GameEvent::Sound(SoundEffect::LaserFire));
        true
    }

    pub fn toggle_music(&mut self) {
        self.music_playing = !self.music_playing;
        log::info!("Music {}", if self.music_playing { "on" } else { "off" });
        self.emit(GameEvent::Music {
            playing: self.music_playing,
        });
    }

    /// Explosion centered on `source`
    pub fn spawn_boom(&mut self, size: SizeTier, source: Rect) {
        let boom = Boom::new(size, &source, self.time, &self.sprites);
        self.booms.push(boom);
        self.emit(GameEvent::Sound(SoundEffect::Explosion));
    }

    /// Add one rock above the screen
    pub fn spawn_refill_rock(&mut self) {
        let rock = Rock::spawn_above(&mut self.rng, self.screen, &self.tuning.rock, &self.sprites);
        self.rocks.push(rock);
    }
}
