//! Platform abstraction layer
//!
//! The simulation never touches a window, an image decoder or an input
//! device. It sees the outside world only through:
//! - [`Clock`]: monotonic milliseconds
//! - [`Surface`]: screen size, two draw primitives and optional HUD text
//! - [`InputSource`]: held directions plus discrete actions, once per frame
//! - [`SpriteSizes`]: pixel dimensions of every texture
//!
//! Headless implementations live alongside the traits so tests and the
//! command-line runner can drive full sessions without a display.

pub mod headless;

pub use headless::{HeadlessSurface, ManualClock, ScriptedInput, SystemClock};

use std::path::Path;

use glam::IVec2;
use serde::{Deserialize, Serialize};

use crate::error::{LoadError, read_json};
use crate::sim::entity::Rect;
use crate::sim::state::GameState;
use crate::sim::tick::TickInput;
use crate::ui::TextLine;

/// RGB color
pub type Color = [u8; 3];

/// Every texture the core asks the resource provider for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TextureId {
    ShipNormal,
    ShipShield,
    RockSmall,
    RockMedium,
    RockLarge,
    RockLargeDamaged,
    Laser,
    Crate,
    ExplosionSmall,
    ExplosionLarge,
    BaseLeft,
    BaseRight,
}

impl TextureId {
    pub const ALL: [TextureId; 12] = [
        TextureId::ShipNormal,
        TextureId::ShipShield,
        TextureId::RockSmall,
        TextureId::RockMedium,
        TextureId::RockLarge,
        TextureId::RockLargeDamaged,
        TextureId::Laser,
        TextureId::Crate,
        TextureId::ExplosionSmall,
        TextureId::ExplosionLarge,
        TextureId::BaseLeft,
        TextureId::BaseRight,
    ];
}

/// Width/height pair as stored in sprite tables
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Dim {
    pub w: i32,
    pub h: i32,
}

impl Dim {
    pub const fn new(w: i32, h: i32) -> Self {
        Self { w, h }
    }
}

impl From<Dim> for IVec2 {
    fn from(d: Dim) -> Self {
        IVec2::new(d.w, d.h)
    }
}

/// Pixel dimensions of every texture, as reported by the asset loader
///
/// Bounding boxes are refreshed from the texture an entity currently shows,
/// so these sizes drive all collision geometry.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SpriteSizes {
    pub ship_normal: Dim,
    pub ship_shield: Dim,
    pub rock_small: Dim,
    pub rock_medium: Dim,
    pub rock_large: Dim,
    pub rock_large_damaged: Dim,
    pub laser: Dim,
    pub crate_box: Dim,
    pub explosion_small: Dim,
    pub explosion_large: Dim,
    pub base_left: Dim,
    pub base_right: Dim,
}

impl Default for SpriteSizes {
    fn default() -> Self {
        Self {
            ship_normal: Dim::new(56, 60),
            ship_shield: Dim::new(56, 60),
            rock_small: Dim::new(24, 24),
            rock_medium: Dim::new(40, 40),
            rock_large: Dim::new(64, 64),
            rock_large_damaged: Dim::new(64, 64),
            laser: Dim::new(8, 24),
            crate_box: Dim::new(32, 32),
            explosion_small: Dim::new(40, 40),
            explosion_large: Dim::new(80, 80),
            base_left: Dim::new(120, 60),
            base_right: Dim::new(120, 60),
        }
    }
}

impl SpriteSizes {
    pub fn get(&self, texture: TextureId) -> IVec2 {
        let dim = match texture {
            TextureId::ShipNormal => self.ship_normal,
            TextureId::ShipShield => self.ship_shield,
            TextureId::RockSmall => self.rock_small,
            TextureId::RockMedium => self.rock_medium,
            TextureId::RockLarge => self.rock_large,
            TextureId::RockLargeDamaged => self.rock_large_damaged,
            TextureId::Laser => self.laser,
            TextureId::Crate => self.crate_box,
            TextureId::ExplosionSmall => self.explosion_small,
            TextureId::ExplosionLarge => self.explosion_large,
            TextureId::BaseLeft => self.base_left,
            TextureId::BaseRight => self.base_right,
        };
        dim.into()
    }

    pub fn load(path: &Path) -> Result<Self, LoadError> {
        let sizes: SpriteSizes = read_json(path)?;
        for texture in TextureId::ALL {
            let size = sizes.get(texture);
            if size.x <= 0 || size.y <= 0 {
                return Err(LoadError::invalid(
                    "sprites",
                    format!("{texture:?} has empty size {}x{}", size.x, size.y),
                ));
            }
        }
        Ok(sizes)
    }
}

/// Monotonic millisecond clock
pub trait Clock {
    fn now_ms(&mut self) -> u64;
}

/// Drawing target
pub trait Surface {
    fn width(&self) -> i32;
    fn height(&self) -> i32;
    fn clear(&mut self, color: Color);
    fn draw_image(&mut self, texture: TextureId, rect: Rect);
    fn fill_rect(&mut self, rect: Rect, color: Color);
    /// HUD text; surfaces without a font may ignore it
    fn draw_text(&mut self, _line: &TextLine) {}
}

/// Input polled once per frame
pub trait InputSource {
    fn poll(&mut self) -> TickInput;
    /// Called with the session after every frame; player input ignores it
    fn observe(&mut self, _state: &GameState) {}
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_sizes_are_positive() {
        let sizes = SpriteSizes::default();
        for texture in TextureId::ALL {
            let s = sizes.get(texture);
            assert!(s.x > 0 && s.y > 0, "{texture:?}");
        }
    }

    #[test]
    fn test_ship_fits_health_bar_offset() {
        // Health bar width is ship width minus 18
        let sizes = SpriteSizes::default();
        assert!(sizes.get(TextureId::ShipNormal).x > 18);
    }
}
