//! Collectible crates

use rand::Rng;
use serde::{Deserialize, Serialize};

use super::entity::Rect;
use super::state::Screen;
use crate::platform::{SpriteSizes, TextureId};
use crate::rand_int;

/// A crate waiting in the upper third of the screen
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Crate {
    pub rect: Rect,
    pub alive: bool,
}

impl Crate {
    /// Crate at a random spot in the upper third of the screen
    pub fn spawn<R: Rng + ?Sized>(rng: &mut R, screen: Screen, sprites: &SpriteSizes) -> Self {
        let size = sprites.get(TextureId::Crate);
        let x = rand_int(rng, 0, screen.width - size.x);
        let y = rand_int(rng, 0, screen.height / 3 - size.y);
        Self {
            rect: Rect::new(x, y, size.x, size.y),
            alive: true,
        }
    }

    pub fn at(rect: Rect) -> Self {
        Self { rect, alive: true }
    }

    pub fn texture(&self) -> TextureId {
        TextureId::Crate
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    #[test]
    fn test_crate_spawns_in_upper_third() {
        let mut rng = Pcg32::seed_from_u64(3);
        let sprites = SpriteSizes::default();
        let screen = Screen::new(800, 600);
        for _ in 0..100 {
            let c = Crate::spawn(&mut rng, screen, &sprites);
            assert!(c.rect.left() >= 0 && c.rect.right() <= 800);
            assert!(c.rect.top() >= 0 && c.rect.bottom() <= 200);
            assert!(c.alive);
        }
    }
}
