//! Explosions left behind by destroyed rocks and the freighter

use serde::{Deserialize, Serialize};

use super::entity::{Rect, SizeTier};
use crate::elapsed;
use crate::platform::{SpriteSizes, TextureId};

/// A short-lived explosion. No movement, no collisions.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Boom {
    pub rect: Rect,
    pub size: SizeTier,
    pub born_at: u64,
    pub alive: bool,
}

impl Boom {
    /// Explosion centered on the rect of whatever was destroyed
    pub fn new(size: SizeTier, source: &Rect, now: u64, sprites: &SpriteSizes) -> Self {
        let texture = Self::texture_for(size);
        Self {
            rect: Rect::centered_on(source.center(), sprites.get(texture)),
            size,
            born_at: now,
            alive: true,
        }
    }

    fn texture_for(size: SizeTier) -> TextureId {
        match size {
            SizeTier::Large => TextureId::ExplosionLarge,
            SizeTier::Small | SizeTier::Medium => TextureId::ExplosionSmall,
        }
    }

    pub fn texture(&self) -> TextureId {
        Self::texture_for(self.size)
    }

    pub fn update(&mut self, now: u64, duration: u64) {
        if elapsed(now, self.born_at) >= duration {
            self.alive = false;
        }
    }
}
