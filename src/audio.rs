//! Sound cues and volume mixing
//!
//! The simulation only emits [`SoundEffect`] cues. The mixer turns them into
//! calls on an [`AudioSink`] with the per-effect base volume scaled by the
//! player's settings.

use serde::{Deserialize, Serialize};

use crate::settings::Settings;
use crate::sim::GameEvent;

/// Sound effect types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SoundEffect {
    /// Laser fired
    LaserFire,
    /// Rock or freighter blew up
    Explosion,
    /// Rock hit the freighter's shield
    ShieldHit,
    /// Crate picked up
    CrateCollected,
    /// Force field lit by a rock goes dark
    ForceFieldZap,
    /// New level begins
    LevelStart,
}

impl SoundEffect {
    /// Volume the cue is mixed at before settings apply
    pub fn base_volume(self) -> f32 {
        match self {
            SoundEffect::LaserFire => 1.0,
            SoundEffect::Explosion => 0.4,
            SoundEffect::ShieldHit => 0.75,
            SoundEffect::CrateCollected => 1.0,
            SoundEffect::ForceFieldZap => 0.3,
            SoundEffect::LevelStart => 1.0,
        }
    }
}

/// Base volume of the looping music track
pub const MUSIC_BASE_VOLUME: f32 = 0.75;

/// Audio output backend
pub trait AudioSink {
    fn play(&mut self, effect: SoundEffect, volume: f32);
    fn start_music(&mut self, volume: f32);
    fn stop_music(&mut self);
}

/// Applies volumes and mute, then forwards cues to a sink
#[derive(Debug, Clone)]
pub struct AudioMixer {
    master_volume: f32,
    sfx_volume: f32,
    music_volume: f32,
    muted: bool,
}

impl Default for AudioMixer {
    fn default() -> Self {
        Self::new()
    }
}

impl AudioMixer {
    pub fn new() -> Self {
        Self {
            master_volume: 0.8,
            sfx_volume: 1.0,
            music_volume: 0.7,
            muted: false,
        }
    }

    pub fn from_settings(settings: &Settings) -> Self {
        let mut mixer = Self::new();
        mixer.set_master_volume(settings.master_volume);
        mixer.set_sfx_volume(settings.sfx_volume);
        mixer.set_music_volume(settings.music_volume);
        mixer.set_muted(settings.muted);
        mixer
    }

    /// Set master volume (0.0 - 1.0)
    pub fn set_master_volume(&mut self, vol: f32) {
        self.master_volume = vol.clamp(0.0, 1.0);
    }

    /// Set SFX volume (0.0 - 1.0)
    pub fn set_sfx_volume(&mut self, vol: f32) {
        self.sfx_volume = vol.clamp(0.0, 1.0);
    }

    pub fn set_music_volume(&mut self, vol: f32) {
        self.music_volume = vol.clamp(0.0, 1.0);
    }

    pub fn set_muted(&mut self, muted: bool) {
        self.muted = muted;
    }

    /// Final volume for an effect, 0.0 when muted
    pub fn effect_volume(&self, effect: SoundEffect) -> f32 {
        if self.muted {
            0.0
        } else {
            effect.base_volume() * self.master_volume * self.sfx_volume
        }
    }

    pub fn music_volume(&self) -> f32 {
        if self.muted {
            0.0
        } else {
            MUSIC_BASE_VOLUME * self.master_volume * self.music_volume
        }
    }

    /// Play a sound effect
    pub fn play(&self, sink: &mut dyn AudioSink, effect: SoundEffect) {
        let vol = self.effect_volume(effect);
        if vol <= 0.0 {
            return;
        }
        sink.play(effect, vol);
    }

    /// Forward the audible part of a batch of simulation events
    pub fn dispatch(&self, sink: &mut dyn AudioSink, events: &[GameEvent]) {
        for event in events {
            match *event {
                GameEvent::Sound(effect) => self.play(sink, effect),
                GameEvent::Music { playing: true } => sink.start_music(self.music_volume()),
                GameEvent::Music { playing: false } => sink.stop_music(),
                _ => {}
            }
        }
    }
}

/// Sink that only logs, for headless runs
#[derive(Debug, Default)]
pub struct LogAudio {
    /// Cues played so far
    pub played: usize,
    pub music_on: bool,
}

impl AudioSink for LogAudio {
    fn play(&mut self, effect: SoundEffect, volume: f32) {
        self.played += 1;
        log::debug!("play {effect:?} at {volume:.2}");
    }

    fn start_music(&mut self, volume: f32) {
        self.music_on = true;
        log::debug!("music on at {volume:.2}");
    }

    fn stop_music(&mut self) {
        self.music_on = false;
        log::debug!("music off");
    }
}
