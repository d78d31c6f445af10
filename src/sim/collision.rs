//! Pairwise collision rules between entities
//!
//! Everything is axis-aligned boxes. The interesting part is rock-on-rock
//! bouncing, where the side a rock approaches from decides which component
//! of its heading flips.

use super::entity::{Direction, Rect, SizeTier};
use super::laser::Laser;
use super::rock::Rock;

/// Redirect `rock` after touching a rock with box `other` and size `other_size`.
///
/// Only a rock of equal or smaller size yields; the other rock is never
/// touched. The four side tests are independent, so a rock overlapping a
/// corner can have both components of its heading flipped in one call.
pub fn bounce_rocks(rock: &mut Rock, other: &Rect, other_size: SizeTier) {
    let r1 = rock.rect;
    if !r1.overlaps(other) || rock.size > other_size {
        return;
    }

    // Top of rock1 inside other: heading up turns down
    if r1.top() <= other.bottom() && r1.bottom() >= other.bottom() {
        rock.direction = match rock.direction {
            Direction::UpRight => Direction::DownRight,
            Direction::UpLeft => Direction::DownLeft,
            d => d,
        };
    }

    // Bottom of rock1 inside other: heading down turns up
    if r1.bottom() >= other.top() && r1.top() <= other.top() {
        rock.direction = match rock.direction {
            Direction::DownRight => Direction::UpRight,
            Direction::DownLeft => Direction::UpLeft,
            d => d,
        };
    }

    // Right side of rock1 inside other: heading right turns left
    if r1.right() >= other.left() && r1.left() <= other.left() {
        rock.direction = match rock.direction {
            Direction::DownRight => Direction::DownLeft,
            Direction::UpRight => Direction::UpLeft,
            d => d,
        };
    }

    // Left side of rock1 inside other: heading left turns right
    if r1.left() <= other.right() && r1.right() >= other.right() {
        rock.direction = match rock.direction {
            Direction::DownLeft => Direction::DownRight,
            Direction::UpLeft => Direction::UpRight,
            d => d,
        };
    }
}

/// Apply a laser hit. Returns true when the laser struck (and died).
pub fn laser_collide(laser: &mut Laser, rock: &mut Rock) -> bool {
    if !laser.rect.overlaps(&rock.rect) {
        return false;
    }
    rock.hp -= laser.atk;
    laser.alive = false;
    true
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::platform::SpriteSizes;
    use crate::tuning::{LaserTuning, RockTuning};
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    fn rock_at(size: SizeTier, direction: Direction, x: i32, y: i32) -> Rock {
        let mut rng = Pcg32::seed_from_u64(11);
        let mut rock = Rock::new(&mut rng, size, &RockTuning::default(), &SpriteSizes::default());
        rock.direction = direction;
        rock.rect.set_position(x, y);
        rock
    }

    #[test]
    fn test_left_side_hit_flips_horizontal() {
        // rock1 (small, 24px) overlapping the right edge of rock2 (large, 64px)
        let mut r1 = rock_at(SizeTier::Small, Direction::UpLeft, 150, 120);
        let r2 = rock_at(SizeTier::Large, Direction::DownLeft, 100, 100);
        bounce_rocks(&mut r1, &r2.rect, r2.size);
        assert_eq!(r1.direction, Direction::UpRight);
        assert_eq!(r2.direction, Direction::DownLeft);
    }

    #[test]
    fn test_bottom_hit_flips_vertical() {
        // rock1 sits on top edge of rock2, heading down
        let mut r1 = rock_at(SizeTier::Medium, Direction::DownRight, 110, 70);
        let r2 = rock_at(SizeTier::Large, Direction::DownLeft, 100, 100);
        bounce_rocks(&mut r1, &r2.rect, r2.size);
        assert_eq!(r1.direction, Direction::UpRight);
    }

    #[test]
    fn test_larger_rock_never_yields() {
        let mut big = rock_at(SizeTier::Large, Direction::UpLeft, 100, 100);
        let small = rock_at(SizeTier::Small, Direction::DownLeft, 150, 120);
        bounce_rocks(&mut big, &small.rect, small.size);
        assert_eq!(big.direction, Direction::UpLeft);
    }

    #[test]
    fn test_equal_sizes_yield() {
        let mut a = rock_at(SizeTier::Medium, Direction::DownRight, 100, 100);
        let b = rock_at(SizeTier::Medium, Direction::DownLeft, 130, 90);
        bounce_rocks(&mut a, &b.rect, b.size);
        assert_eq!(a.direction, Direction::DownLeft);
    }

    #[test]
    fn test_corner_overlap_flips_both_components() {
        // rock1's bottom-right corner inside rock2's top-left corner
        let mut r1 = rock_at(SizeTier::Small, Direction::DownRight, 90, 90);
        let r2 = rock_at(SizeTier::Large, Direction::DownLeft, 100, 100);
        bounce_rocks(&mut r1, &r2.rect, r2.size);
        assert_eq!(r1.direction, Direction::UpLeft);
    }

    #[test]
    fn test_no_overlap_no_change() {
        let mut r1 = rock_at(SizeTier::Small, Direction::DownRight, 0, 0);
        let r2 = rock_at(SizeTier::Large, Direction::DownLeft, 24, 0);
        bounce_rocks(&mut r1, &r2.rect, r2.size);
        assert_eq!(r1.direction, Direction::DownRight);
    }

    #[test]
    fn test_laser_hit_damages_and_dies() {
        let sprites = SpriteSizes::default();
        let mut rock = rock_at(SizeTier::Large, Direction::DownLeft, 100, 100);
        let mut laser = Laser::fire(&rock.rect, &LaserTuning::default(), &sprites);
        laser.rect.set_position(110, 110);
        assert!(laser_collide(&mut laser, &mut rock));
        assert_eq!(rock.hp, 12.0);
        assert!(!laser.alive);
    }

    #[test]
    fn test_laser_miss() {
        let sprites = SpriteSizes::default();
        let mut rock = rock_at(SizeTier::Small, Direction::DownLeft, 100, 100);
        let mut laser = Laser::fire(&rock.rect, &LaserTuning::default(), &sprites);
        laser.rect.set_position(300, 300);
        assert!(!laser_collide(&mut laser, &mut rock));
        assert_eq!(rock.hp, rock.max_hp);
        assert!(laser.alive);
    }
}
