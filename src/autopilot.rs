//! Scripted player for headless runs
//!
//! Flies toward the nearest crate while firing, and presses restart a short
//! while after a level ends. Plans from the state seen after each frame and
//! replays that plan on the next poll.

use crate::platform::InputSource;
use crate::sim::{Action, GamePhase, GameState, TickInput};

/// Frames to wait on a banner before pressing restart
pub const RESTART_DELAY_FRAMES: u32 = 45;

#[derive(Debug, Clone, Default)]
pub struct Autopilot {
    next: TickInput,
    idle_frames: u32,
    /// Restarts pressed so far
    pub restarts: u32,
}

impl Autopilot {
    pub fn new() -> Self {
        Self::default()
    }

    fn plan(&mut self, state: &GameState) -> TickInput {
        if state.phase() != GamePhase::Active {
            self.idle_frames += 1;
            if self.idle_frames >= RESTART_DELAY_FRAMES {
                self.idle_frames = 0;
                self.restarts += 1;
                return TickInput::with_actions([Action::Restart]);
            }
            return TickInput::default();
        }
        self.idle_frames = 0;

        let mut input = TickInput::with_actions([Action::Shoot]);
        let ship = state.ship.rect.center();
        let target = state
            .crates
            .iter()
            .filter(|c| c.alive)
            .map(|c| c.rect.center())
            .min_by_key(|c| (c.x - ship.x).abs() + (c.y - ship.y).abs());

        if let Some(target) = target {
            // Dead zone of one step keeps the ship from jittering on target
            let step = state.ship.speed;
            input.left = target.x < ship.x - step.x;
            input.right = target.x > ship.x + step.x;
            input.up = target.y < ship.y - step.y;
            input.down = target.y > ship.y + step.y;
        }
        input
    }
}

impl InputSource for Autopilot {
    fn poll(&mut self) -> TickInput {
        std::mem::take(&mut self.next)
    }

    fn observe(&mut self, state: &GameState) {
        self.next = self.plan(state);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::platform::SpriteSizes;
    use crate::sim::{Crate, Rect, Screen};
    use crate::tuning::Tuning;

    fn state() -> GameState {
        GameState::new(1, Screen::new(800, 600), Tuning::default(), SpriteSizes::default())
    }

    #[test]
    fn test_steers_toward_crate_and_shoots() {
        let mut s = state();
        s.crates = vec![Crate::at(Rect::new(50, 50, 32, 32))];
        let mut pilot = Autopilot::new();
        pilot.observe(&s);
        let input = pilot.poll();
        assert!(input.left && input.up);
        assert!(!input.right && !input.down);
        assert_eq!(input.actions, vec![Action::Shoot]);
        // Plan is consumed by the poll
        assert!(pilot.poll().actions.is_empty());
    }

    #[test]
    fn test_restarts_after_delay() {
        let mut s = state();
        s.flags.you_lose = true;
        let mut pilot = Autopilot::new();
        for _ in 1..RESTART_DELAY_FRAMES {
            pilot.observe(&s);
            assert!(pilot.poll().actions.is_empty());
        }
        pilot.observe(&s);
        assert_eq!(pilot.poll().actions, vec![Action::Restart]);
        assert_eq!(pilot.restarts, 1);
    }
}
