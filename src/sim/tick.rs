//! Per-frame simulation step
//!
//! `tick` advances the whole session by one frame in a fixed order:
//! actions, force field, lasers, ship, health bar, rocks, crates,
//! explosions, refill.

use serde::{Deserialize, Serialize};

use super::collision;
use super::ship::{Ship, ShipUpdate};
use super::state::{GameEvent, GameState};
use crate::audio::SoundEffect;
use crate::elapsed;

/// Discrete player actions, processed in the order received
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Action {
    Shoot,
    ToggleMusic,
    Restart,
    /// Handled by the frame driver; the simulation ignores it
    Quit,
}

/// Input for a single frame
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TickInput {
    pub left: bool,
    pub right: bool,
    pub up: bool,
    pub down: bool,
    pub actions: Vec<Action>,
}

impl TickInput {
    pub fn with_actions(actions: impl IntoIterator<Item = Action>) -> Self {
        Self {
            actions: actions.into_iter().collect(),
            ..Default::default()
        }
    }

    pub fn wants_quit(&self) -> bool {
        self.actions.contains(&Action::Quit)
    }
}

/// Advance the session to `now` (ms). The clock never runs backward.
pub fn tick(state: &mut GameState, input: &TickInput, now: u64) {
    state.time = state.time.max(now);

    state
        .ship
        .steer(input.left, input.right, input.up, input.down);

    for action in &input.actions {
        match action {
            Action::Shoot => {
                state.shoot_laser();
            }
            Action::ToggleMusic => state.toggle_music(),
            Action::Restart => state.restart(),
            Action::Quit => {}
        }
    }

    update_force_field(state);
    update_lasers(state);
    update_ship(state);
    state.health_bar.follow(&state.ship, &state.tuning);
    update_rocks(state);
    update_crates(state);
    update_explosions(state);
    refill_rocks(state);
}

fn update_force_field(state: &mut GameState) {
    let duration = state.tuning.force_field.blink_duration;
    if state.force_field.decay(state.time, duration) {
        state.emit(GameEvent::Sound(SoundEffect::ForceFieldZap));
    }
}

fn update_lasers(state: &mut GameState) {
    let now = state.time;
    for laser in state.lasers.iter_mut() {
        laser.update(now, &state.sprites);
        if !laser.alive {
            continue;
        }
        for rock in state.rocks.iter_mut() {
            if collision::laser_collide(laser, rock) {
                log::debug!("Laser hit {:?} rock, hp left {}", rock.size, rock.hp);
                break;
            }
        }
    }
    state.lasers.retain(|l| l.alive);
}

fn update_ship(state: &mut GameState) {
    let now = state.time;
    let outcome = state
        .ship
        .update(now, state.screen, &state.tuning.ship, &state.sprites);
    if outcome == ShipUpdate::Destroyed {
        log::info!("Freighter destroyed on level {}", state.level);
        state.spawn_boom(Ship::SIZE, state.ship.rect);
        state.flags.you_lose = true;
        state.all_rock_blast_time = now;
        state.emit(GameEvent::ShipDestroyed);
    }
}

fn update_rocks(state: &mut GameState) {
    let now = state.time;
    let screen = state.screen;
    let field_top = state.field_top();
    let mut field_hit = false;

    for i in 0..state.rocks.len() {
        let outcome =
            state.rocks[i].update(now, screen, field_top, &state.tuning.rock, &state.sprites);
        field_hit |= outcome.hit_force_field;

        // Rocks already handled this pass and found dead are out of play
        for j in 0..state.rocks.len() {
            if j == i || (j < i && !state.rocks[j].alive) {
                continue;
            }
            let (other, other_size) = (state.rocks[j].rect, state.rocks[j].size);
            collision::bounce_rocks(&mut state.rocks[i], &other, other_size);
        }

        // A rock killed earlier this frame still lands its hit, silently
        let rock = &mut state.rocks[i];
        if state.flags.engageable && state.ship.alive && rock.rect.overlaps(&state.ship.rect) {
            let was_alive = rock.alive;
            rock.alive = false;
            state.ship.take_hit(rock.atk);
            log::debug!("Freighter hit for {}, hp {}", rock.atk, state.ship.hp);
            if was_alive {
                state.emit(GameEvent::Sound(SoundEffect::ShieldHit));
            }
        }

        let rock = &state.rocks[i];
        if !rock.alive {
            let (size, rect) = (rock.size, rock.rect);
            log::debug!("{size:?} rock destroyed");
            state.spawn_boom(size, rect);
        }
    }
    state.rocks.retain(|r| r.alive);

    if field_hit {
        state.force_field.trigger(now);
    }

    if state.flags.you_win
        && !state.rocks.is_empty()
        && elapsed(now, state.all_rock_blast_time) >= state.tuning.level.win_rock_destroy_delay
    {
        state.rocks[0].alive = false;
        state.all_rock_blast_time = now;
    }
}

fn update_crates(state: &mut GameState) {
    if state.crates.is_empty() {
        return;
    }

    let mut collected = 0;
    if state.ship.alive {
        for c in state.crates.iter_mut() {
            if c.alive && c.rect.overlaps(&state.ship.rect) {
                c.alive = false;
                collected += 1;
            }
        }
    }
    if collected == 0 {
        return;
    }
    for _ in 0..collected {
        state.emit(GameEvent::Sound(SoundEffect::CrateCollected));
    }
    state.crates.retain(|c| c.alive);

    if state.crates.is_empty() && state.ship.alive {
        log::info!("Level {} won", state.level);
        state.flags.engageable = false;
        state.flags.you_win = true;
        state.emit(GameEvent::LevelWon { level: state.level });
        state.level_up();
    }
}

fn update_explosions(state: &mut GameState) {
    let now = state.time;
    let duration = state.tuning.explosion_duration;
    for boom in state.booms.iter_mut() {
        boom.update(now, duration);
    }
    state.booms.retain(|b| b.alive);
}

fn refill_rocks(state: &mut GameState) {
    if !state.flags.you_win && state.rocks.len() < state.total_rocks {
        state.spawn_refill_rock();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::platform::SpriteSizes;
    use crate::sim::entity::{Direction, Rect, SizeTier};
    use crate::sim::pickup::Crate;
    use crate::sim::rock::Rock;
    use crate::sim::state::{GamePhase, Screen};
    use crate::tuning::Tuning;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    fn session() -> GameState {
        let mut s = GameState::new(
            7,
            Screen::new(800, 600),
            Tuning::default(),
            SpriteSizes::default(),
        );
        s.drain_events();
        s
    }

    /// Session with no rocks and refill disabled
    fn quiet_session() -> GameState {
        let mut s = session();
        s.rocks.clear();
        s.total_rocks = 0;
        s
    }

    fn rock(size: SizeTier, rect_pos: (i32, i32)) -> Rock {
        let mut rng = Pcg32::seed_from_u64(3);
        let mut r = Rock::new(&mut rng, size, &Tuning::default().rock, &SpriteSizes::default());
        r.rect.set_position(rect_pos.0, rect_pos.1);
        r.direction = Direction::DownLeft;
        r
    }

    fn shoot() -> TickInput {
        TickInput::with_actions([Action::Shoot])
    }

    #[test]
    fn test_shoot_cooldown_through_tick() {
        let mut s = quiet_session();
        tick(&mut s, &shoot(), 1000);
        tick(&mut s, &shoot(), 1100);
        assert_eq!(s.lasers.len(), 1);
        tick(&mut s, &shoot(), 1160);
        assert_eq!(s.lasers.len(), 2);
        let fired = s
            .drain_events()
            .into_iter()
            .filter(|e| *e == GameEvent::Sound(SoundEffect::LaserFire))
            .count();
        assert_eq!(fired, 2);
    }

    #[test]
    fn test_clock_never_runs_backward() {
        let mut s = quiet_session();
        tick(&mut s, &TickInput::default(), 500);
        tick(&mut s, &TickInput::default(), 400);
        assert_eq!(s.time, 500);
    }

    #[test]
    fn test_laser_hits_one_rock_only() {
        let mut s = quiet_session();
        s.rocks.push(rock(SizeTier::Large, (300, 300)));
        s.rocks.push(rock(SizeTier::Large, (300, 300)));
        for r in &mut s.rocks {
            r.move_speed = 0;
            r.gate.last_move_time = 1000;
        }
        let mut laser = crate::sim::laser::Laser::fire(
            &s.ship.rect,
            &s.tuning.laser,
            &s.sprites,
        );
        laser.rect.set_position(320, 320);
        laser.gate.last_move_time = 1000;
        s.lasers.push(laser);

        tick(&mut s, &TickInput::default(), 1000);
        assert!(s.lasers.is_empty());
        let damaged: Vec<f32> = s.rocks.iter().map(|r| r.hp).collect();
        assert_eq!(damaged, vec![12.0, 30.0]);
    }

    #[test]
    fn test_ship_collision_kills_rock_and_damages_ship() {
        let mut s = quiet_session();
        let ship = s.ship.rect;
        s.rocks.push(rock(SizeTier::Small, (ship.left() + 10, ship.top() + 10)));
        tick(&mut s, &TickInput::default(), 1000);
        assert!(s.rocks.is_empty());
        assert_eq!(s.ship.hp, 40.0 - 11.0);
        assert!(s.ship.struck);
        assert_eq!(s.booms.len(), 1);
        let events = s.drain_events();
        assert!(events.contains(&GameEvent::Sound(SoundEffect::ShieldHit)));
        assert!(events.contains(&GameEvent::Sound(SoundEffect::Explosion)));
    }

    #[test]
    fn test_rock_killed_this_frame_still_hits_ship() {
        let mut s = quiet_session();
        let ship = s.ship.rect;
        let mut r = rock(SizeTier::Small, (ship.left() + 10, ship.top() + 10));
        r.hp = 0.0;
        s.rocks.push(r);
        tick(&mut s, &TickInput::default(), 1000);
        assert!(s.rocks.is_empty());
        assert_eq!(s.ship.hp, 29.0);
        assert!(s.ship.struck);
        assert_eq!(s.booms.len(), 1);
        let events = s.drain_events();
        assert!(!events.contains(&GameEvent::Sound(SoundEffect::ShieldHit)));
        assert!(events.contains(&GameEvent::Sound(SoundEffect::Explosion)));
    }

    /// Rock that holds still for a tick at 1000
    fn parked(size: SizeTier, pos: (i32, i32), direction: Direction) -> Rock {
        let mut r = rock(size, pos);
        r.direction = direction;
        r.move_speed = 0;
        r.gate.last_move_time = 1000;
        r
    }

    #[test]
    fn test_smaller_rock_bounces_after_moving() {
        let mut s = quiet_session();
        // Clear of the large rock until it steps (2, 2)
        let mut small = rock(SizeTier::Small, (300, 100));
        small.direction = Direction::DownRight;
        small.speed = glam::IVec2::new(2, 2);
        small.gate.last_move_time = 0;
        s.rocks.push(small);
        s.rocks.push(parked(SizeTier::Large, (325, 110), Direction::DownLeft));

        tick(&mut s, &TickInput::default(), 1000);
        assert_eq!(s.rocks[0].rect.left(), 302);
        assert_eq!(s.rocks[0].direction, Direction::UpLeft);
        assert_eq!(s.rocks[1].direction, Direction::DownLeft);
    }

    #[test]
    fn test_bounce_partners_skip_rocks_already_removed() {
        let mut s = quiet_session();
        let mut dead = parked(SizeTier::Large, (300, 100), Direction::DownLeft);
        dead.hp = 0.0;
        s.rocks.push(dead);
        s.rocks.push(parked(SizeTier::Small, (310, 110), Direction::DownRight));
        s.rocks.push(parked(SizeTier::Small, (600, 100), Direction::DownRight));
        s.rocks.push(parked(SizeTier::Medium, (610, 110), Direction::DownLeft));

        // Kills the medium rock, which comes after its partner
        let mut laser =
            crate::sim::laser::Laser::fire(&s.ship.rect, &s.tuning.laser, &s.sprites);
        laser.rect.set_position(640, 140);
        laser.gate.last_move_time = 1000;
        s.lasers.push(laser);

        tick(&mut s, &TickInput::default(), 1000);
        assert!(s.lasers.is_empty());
        assert_eq!(s.booms.len(), 2);
        assert_eq!(s.rocks.len(), 2);
        assert_eq!(s.rocks[0].direction, Direction::DownRight);
        assert_eq!(s.rocks[1].direction, Direction::UpLeft);
    }

    #[test]
    fn test_no_ship_damage_when_disengaged() {
        let mut s = quiet_session();
        s.flags.engageable = false;
        let ship = s.ship.rect;
        s.rocks.push(rock(SizeTier::Small, (ship.left() + 10, ship.top() + 10)));
        tick(&mut s, &TickInput::default(), 1000);
        assert_eq!(s.rocks.len(), 1);
        assert_eq!(s.ship.hp, 40.0);
    }

    #[test]
    fn test_force_field_lights_then_zaps() {
        let mut s = quiet_session();
        let top = s.field_top();
        let mut r = rock(SizeTier::Medium, (300, top - 40));
        r.direction = Direction::DownRight;
        s.rocks.push(r);
        tick(&mut s, &TickInput::default(), 1000);
        assert!(s.force_field.blink_on);
        assert!(s.rocks[0].direction.heads_up());

        // Take the rock away so it cannot re-trigger the field
        s.rocks.clear();
        s.drain_events();
        tick(&mut s, &TickInput::default(), 1020);
        assert!(s.force_field.blink_on);
        tick(&mut s, &TickInput::default(), 1025);
        assert!(!s.force_field.blink_on);
        assert!(
            s.drain_events()
                .contains(&GameEvent::Sound(SoundEffect::ForceFieldZap))
        );
    }

    #[test]
    fn test_crate_collection_wins_level() {
        let mut s = quiet_session();
        let ship = s.ship.rect;
        s.crates = vec![Crate::at(Rect::new(ship.left(), ship.top(), 32, 32))];
        tick(&mut s, &TickInput::default(), 1000);
        assert!(s.crates.is_empty());
        assert!(s.flags.you_win);
        assert!(!s.flags.engageable);
        assert_eq!(s.level, 2);
        assert_eq!(s.phase(), GamePhase::Won);
        let events = s.drain_events();
        assert!(events.contains(&GameEvent::LevelWon { level: 1 }));
        assert!(events.contains(&GameEvent::Sound(SoundEffect::CrateCollected)));

        // No second win on later frames
        tick(&mut s, &TickInput::default(), 1016);
        assert_eq!(s.level, 2);
    }

    #[test]
    fn test_dead_ship_cannot_collect() {
        let mut s = quiet_session();
        s.ship.alive = false;
        let ship = s.ship.rect;
        s.crates = vec![Crate::at(Rect::new(ship.left(), ship.top(), 32, 32))];
        tick(&mut s, &TickInput::default(), 1000);
        assert_eq!(s.crates.len(), 1);
        assert!(!s.flags.you_win);
    }

    #[test]
    fn test_win_cleanup_blasts_rocks_on_timer() {
        let mut s = quiet_session();
        s.flags.you_win = true;
        s.flags.engageable = false;
        for x in [100, 300, 500] {
            let mut r = rock(SizeTier::Small, (x, 100));
            r.move_speed = 0;
            r.gate.last_move_time = 1000;
            s.rocks.push(r);
        }
        s.all_rock_blast_time = 1000;

        tick(&mut s, &TickInput::default(), 1050);
        assert_eq!(s.rocks.len(), 3);
        tick(&mut s, &TickInput::default(), 1100);
        // Marked this frame, removed on the next
        assert!(!s.rocks[0].alive);
        tick(&mut s, &TickInput::default(), 1110);
        assert_eq!(s.rocks.len(), 2);
        assert_eq!(s.booms.len(), 1);
    }

    #[test]
    fn test_refill_one_rock_per_frame() {
        let mut s = quiet_session();
        s.total_rocks = 3;
        tick(&mut s, &TickInput::default(), 1000);
        assert_eq!(s.rocks.len(), 1);
        tick(&mut s, &TickInput::default(), 1016);
        assert_eq!(s.rocks.len(), 2);
        s.flags.you_win = true;
        tick(&mut s, &TickInput::default(), 1032);
        assert_eq!(s.rocks.len(), 2);
    }

    #[test]
    fn test_restart_after_loss() {
        let mut s = session();
        s.level = 4;
        s.flags.you_lose = true;
        s.ship.alive = false;
        tick(&mut s, &TickInput::with_actions([Action::Restart]), 1000);
        assert_eq!(s.level, 1);
        assert!(s.ship.alive);
        assert_eq!(s.phase(), GamePhase::Active);
    }

    #[test]
    fn test_toggle_music_action() {
        let mut s = quiet_session();
        tick(&mut s, &TickInput::with_actions([Action::ToggleMusic]), 1000);
        assert!(s.music_playing);
        assert!(
            s.drain_events()
                .contains(&GameEvent::Music { playing: true })
        );
    }

    #[test]
    fn test_quit_is_ignored_by_simulation() {
        let mut s = quiet_session();
        let input = TickInput::with_actions([Action::Quit]);
        assert!(input.wants_quit());
        tick(&mut s, &input, 1000);
        assert_eq!(s.phase(), GamePhase::Active);
    }
}
