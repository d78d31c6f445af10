//! Laser bolts fired upward by the freighter

use glam::IVec2;
use serde::{Deserialize, Serialize};

use super::entity::{MoveGate, Rect};
use crate::platform::{SpriteSizes, TextureId};
use crate::tuning::LaserTuning;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Laser {
    pub rect: Rect,
    /// Damage dealt to the first rock it touches
    pub atk: f32,
    pub velocity: IVec2,
    pub move_delay: u64,
    pub gate: MoveGate,
    pub alive: bool,
}

impl Laser {
    /// Laser at the ship's top-left corner plus the configured muzzle offset
    pub fn fire(ship_rect: &Rect, tuning: &LaserTuning, sprites: &SpriteSizes) -> Self {
        let size = sprites.get(TextureId::Laser);
        Self {
            rect: Rect::new(
                ship_rect.left() + tuning.spawn_offset_x,
                ship_rect.top() + tuning.spawn_offset_y,
                size.x,
                size.y,
            ),
            atk: tuning.damage,
            velocity: IVec2::new(0, -tuning.y_speed),
            move_delay: tuning.move_delay,
            gate: MoveGate::default(),
            alive: true,
        }
    }

    pub fn texture(&self) -> TextureId {
        TextureId::Laser
    }

    pub fn update(&mut self, now: u64, sprites: &SpriteSizes) {
        // Gone once fully above the top edge
        if self.rect.bottom() < 0 {
            self.alive = false;
            return;
        }
        self.gate.step(&mut self.rect, self.velocity, now, self.move_delay);
        self.rect.size = sprites.get(self.texture());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_laser_spawn_offset() {
        let sprites = SpriteSizes::default();
        let laser = Laser::fire(&Rect::new(100, 500, 56, 60), &LaserTuning::default(), &sprites);
        assert_eq!(laser.rect.pos, IVec2::new(124, 470));
        assert_eq!(laser.atk, 18.0);
    }

    #[test]
    fn test_laser_moves_up_time_gated() {
        let sprites = SpriteSizes::default();
        let mut laser = Laser::fire(&Rect::new(0, 500, 56, 60), &LaserTuning::default(), &sprites);
        laser.gate.last_move_time = 10;
        laser.update(10, &sprites);
        assert_eq!(laser.rect.top(), 470);
        laser.update(11, &sprites);
        assert_eq!(laser.rect.top(), 460);
    }

    #[test]
    fn test_laser_dies_above_screen_without_moving() {
        let sprites = SpriteSizes::default();
        let mut laser = Laser::fire(&Rect::new(0, 0, 56, 60), &LaserTuning::default(), &sprites);
        laser.rect.set_position(0, -25);
        laser.update(1000, &sprites);
        assert!(!laser.alive);
        assert_eq!(laser.rect.top(), -25);
    }

    #[test]
    fn test_laser_partially_visible_stays_alive() {
        let sprites = SpriteSizes::default();
        let mut laser = Laser::fire(&Rect::new(0, 0, 56, 60), &LaserTuning::default(), &sprites);
        // bottom == 0 is not yet fully above
        laser.rect.set_position(0, -24);
        laser.update(1000, &sprites);
        assert!(laser.alive);
    }
}
