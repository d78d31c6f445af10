//! Frame driver
//!
//! One frame: sample the clock, poll input, advance the simulation, hand the
//! frame's events to the audio mixer and draw. The driver owns no platform
//! objects; callers pass in whatever clock, input, sink and surface they run.

use crate::audio::{AudioMixer, AudioSink};
use crate::platform::{Clock, InputSource, SpriteSizes, Surface};
use crate::renderer;
use crate::settings::Settings;
use crate::sim::{GameEvent, GamePhase, GameState, Screen, tick};
use crate::tuning::Tuning;

/// Whether the driver should keep going after a frame
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrameOutcome {
    Continue,
    Quit,
}

/// Running game: session state plus the mixer settings apply to
pub struct Game {
    pub state: GameState,
    mixer: AudioMixer,
    last_phase: GamePhase,
    frames: u64,
    levels_won: u32,
    losses: u32,
}

impl Game {
    pub fn new(
        seed: u64,
        screen: Screen,
        settings: &Settings,
        tuning: Tuning,
        sprites: SpriteSizes,
    ) -> Self {
        let mut state = GameState::new(seed, screen, tuning, sprites);
        if settings.music_on_start {
            state.toggle_music();
        }
        Self {
            last_phase: state.phase(),
            state,
            mixer: AudioMixer::from_settings(settings),
            frames: 0,
            levels_won: 0,
            losses: 0,
        }
    }

    pub fn frames(&self) -> u64 {
        self.frames
    }

    pub fn levels_won(&self) -> u32 {
        self.levels_won
    }

    pub fn losses(&self) -> u32 {
        self.losses
    }

    /// Run one frame
    pub fn frame(
        &mut self,
        clock: &mut dyn Clock,
        input: &mut dyn InputSource,
        audio: &mut dyn AudioSink,
        surface: &mut dyn Surface,
    ) -> FrameOutcome {
        let now = clock.now_ms();
        let frame_input = input.poll();
        if frame_input.wants_quit() {
            log::info!("Quit requested after {} frames", self.frames);
            return FrameOutcome::Quit;
        }

        tick(&mut self.state, &frame_input, now);

        let events = self.state.drain_events();
        self.tally(&events);
        self.mixer.dispatch(audio, &events);
        self.track_phase();

        renderer::draw_frame(&self.state, surface);
        input.observe(&self.state);
        self.frames += 1;
        FrameOutcome::Continue
    }

    /// Run until quit or until `max_frames` frames have run; returns frames run
    pub fn run(
        &mut self,
        clock: &mut dyn Clock,
        input: &mut dyn InputSource,
        audio: &mut dyn AudioSink,
        surface: &mut dyn Surface,
        max_frames: Option<u64>,
    ) -> u64 {
        let start = self.frames;
        while max_frames.is_none_or(|max| self.frames - start < max) {
            if self.frame(clock, input, audio, surface) == FrameOutcome::Quit {
                break;
            }
        }
        self.frames - start
    }

    fn tally(&mut self, events: &[GameEvent]) {
        for event in events {
            match event {
                GameEvent::LevelWon { .. } => self.levels_won += 1,
                GameEvent::ShipDestroyed => self.losses += 1,
                _ => {}
            }
        }
    }

    fn track_phase(&mut self) {
        let current = self.state.phase();
        if current != self.last_phase {
            log::info!(
                "Phase {:?} -> {:?} (level {})",
                self.last_phase,
                current,
                self.state.level
            );
            self.last_phase = current;
        }
    }
}
