//! Window-less implementations of the platform traits

use std::collections::VecDeque;
use std::time::Instant;

use super::{Clock, Color, InputSource, Surface, TextureId};
use crate::sim::entity::Rect;
use crate::sim::tick::TickInput;
use crate::ui::TextLine;

/// Wall clock measured from construction
pub struct SystemClock {
    start: Instant,
}

impl Default for SystemClock {
    fn default() -> Self {
        Self::new()
    }
}

impl SystemClock {
    pub fn new() -> Self {
        Self {
            start: Instant::now(),
        }
    }
}

impl Clock for SystemClock {
    fn now_ms(&mut self) -> u64 {
        self.start.elapsed().as_millis() as u64
    }
}

/// Clock advanced by a fixed step on every sample
#[derive(Debug, Clone)]
pub struct ManualClock {
    now: u64,
    step: u64,
}

impl ManualClock {
    /// First sample returns `start`, each later sample adds `step`
    pub fn new(start: u64, step: u64) -> Self {
        Self { now: start, step }
    }

    pub fn set(&mut self, now: u64) {
        self.now = now;
    }
}

impl Clock for ManualClock {
    fn now_ms(&mut self) -> u64 {
        let now = self.now;
        self.now += self.step;
        now
    }
}

/// One recorded draw call
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCall {
    Image(TextureId, Rect),
    Fill(Rect, Color),
    Text(String),
}

/// Surface that only records what would have been drawn in the last frame
#[derive(Debug, Clone)]
pub struct HeadlessSurface {
    width: i32,
    height: i32,
    pub calls: Vec<DrawCall>,
}

impl HeadlessSurface {
    pub fn new(width: i32, height: i32) -> Self {
        Self {
            width,
            height,
            calls: Vec::new(),
        }
    }

    pub fn images_of(&self, texture: TextureId) -> usize {
        self.calls
            .iter()
            .filter(|c| matches!(c, DrawCall::Image(t, _) if *t == texture))
            .count()
    }

    /// Text drawn this frame, in draw order
    pub fn texts(&self) -> Vec<&str> {
        self.calls
            .iter()
            .filter_map(|c| match c {
                DrawCall::Text(t) => Some(t.as_str()),
                _ => None,
            })
            .collect()
    }
}

impl Surface for HeadlessSurface {
    fn width(&self) -> i32 {
        self.width
    }

    fn height(&self) -> i32 {
        self.height
    }

    fn clear(&mut self, _color: Color) {
        self.calls.clear();
    }

    fn draw_image(&mut self, texture: TextureId, rect: Rect) {
        self.calls.push(DrawCall::Image(texture, rect));
    }

    fn fill_rect(&mut self, rect: Rect, color: Color) {
        self.calls.push(DrawCall::Fill(rect, color));
    }

    fn draw_text(&mut self, line: &TextLine) {
        self.calls.push(DrawCall::Text(line.text.clone()));
    }
}

/// Replays a queue of prepared inputs, then idles
#[derive(Debug, Clone, Default)]
pub struct ScriptedInput {
    frames: VecDeque<TickInput>,
}

impl ScriptedInput {
    pub fn new(frames: impl IntoIterator<Item = TickInput>) -> Self {
        Self {
            frames: frames.into_iter().collect(),
        }
    }

    pub fn push(&mut self, input: TickInput) {
        self.frames.push_back(input);
    }

    pub fn is_exhausted(&self) -> bool {
        self.frames.is_empty()
    }
}

impl InputSource for ScriptedInput {
    fn poll(&mut self) -> TickInput {
        self.frames.pop_front().unwrap_or_default()
    }
}
