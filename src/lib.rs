//! Freighter - a falling-rocks arcade shooter
//!
//! Core modules:
//! - `sim`: Frame-stepped simulation (entities, collisions, level lifecycle)
//! - `app`: Frame driver tying clock, input, simulation, audio and drawing together
//! - `platform`: Collaborator traits (clock, surface, input) and headless stand-ins
//! - `renderer`: Draw pass over the simulation state
//! - `audio`: Sound cues and volume mixing
//! - `tuning`: Data-driven game balance
//! - `settings`: Player preferences (window, volumes)
//! - `ui`: HUD text selection
//! - `autopilot`: Scripted input for headless runs

pub mod app;
pub mod audio;
pub mod autopilot;
pub mod error;
pub mod platform;
pub mod renderer;
pub mod settings;
pub mod sim;
pub mod tuning;
pub mod ui;

pub use app::Game;
pub use error::LoadError;
pub use settings::Settings;
pub use tuning::Tuning;

use rand::Rng;

/// Fixed layout constants that are not worth tuning
pub mod consts {
    /// Thickness of the force field line
    pub const FORCE_FIELD_THICKNESS: i32 = 3;
    /// Height of the health bars under the freighter
    pub const HEALTH_BAR_HEIGHT: i32 = 3;
    /// Gap kept between initial rocks and the freighter row
    pub const ROCK_SETUP_MARGIN: i32 = 10;

    /// RGB colors used by the draw pass
    pub const COLOR_BACKGROUND: [u8; 3] = [0, 0, 0];
    pub const COLOR_FORCE_FIELD_IDLE: [u8; 3] = [0, 0, 0];
    pub const COLOR_FORCE_FIELD_LIT: [u8; 3] = [0, 127, 200];
    pub const COLOR_HEALTH_BACK: [u8; 3] = [255, 0, 0];
    pub const COLOR_HEALTH_FILL: [u8; 3] = [0, 255, 0];
}

/// Random integer in `[lo, hi]` (inclusive on both ends)
///
/// An inverted range collapses to `lo`, which happens when a sprite is
/// wider than the screen it spawns on.
#[inline]
pub fn rand_int<R: Rng + ?Sized>(rng: &mut R, lo: i32, hi: i32) -> i32 {
    if hi <= lo { lo } else { rng.random_range(lo..=hi) }
}

/// Elapsed milliseconds between two clock samples (never negative)
#[inline]
pub fn elapsed(now: u64, since: u64) -> u64 {
    now.saturating_sub(since)
}
