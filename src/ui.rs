//! HUD text selection
//!
//! Decides which lines of text are on screen for the current session. Fonts
//! and glyph layout belong to the surface; this module only picks the words,
//! their size class and where they are anchored.

use crate::sim::{GamePhase, GameState};

/// Size class of a HUD font
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FontSize {
    Tiny,
    Small,
    Medium,
    Large,
}

/// Where a line sits on screen
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Anchor {
    /// 60px from the left edge, 10px above the bottom
    BottomLeft,
    /// 60px from the right edge, 10px above the bottom
    BottomRight,
    /// Centered horizontally; row 0 starts at a quarter of the height and
    /// each following row sits 20px under the previous one
    Banner(u8),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextLine {
    pub text: String,
    pub size: FontSize,
    pub anchor: Anchor,
}

impl TextLine {
    fn new(text: impl Into<String>, size: FontSize, anchor: Anchor) -> Self {
        Self {
            text: text.into(),
            size,
            anchor,
        }
    }
}

/// Level number and music hint along the bottom edge
pub fn status_lines(state: &GameState) -> [TextLine; 2] {
    let music = if state.music_playing { "Playing" } else { "Stopped" };
    [
        TextLine::new(
            format!("Zone: {}", state.level),
            FontSize::Small,
            Anchor::BottomLeft,
        ),
        TextLine::new(
            format!("Music: {music} | F12"),
            FontSize::Tiny,
            Anchor::BottomRight,
        ),
    ]
}

/// Win/lose banner for the current phase; empty while playing
pub fn banner(phase: GamePhase) -> Vec<TextLine> {
    let rows: &[(&str, FontSize)] = match phase {
        GamePhase::Active => &[],
        GamePhase::GameWon => &[
            ("Congratulations!", FontSize::Large),
            ("You Beat the Game!", FontSize::Large),
            ("Press F5 to Play Again", FontSize::Medium),
        ],
        GamePhase::Won => &[
            ("You Win!", FontSize::Large),
            ("Press F5 to Advance", FontSize::Medium),
        ],
        GamePhase::Lost => &[
            ("You Lose!", FontSize::Large),
            ("Press F5 to Restart", FontSize::Medium),
        ],
    };
    rows.iter()
        .enumerate()
        .map(|(row, (text, size))| TextLine::new(*text, *size, Anchor::Banner(row as u8)))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn texts(lines: &[TextLine]) -> Vec<&str> {
        lines.iter().map(|l| l.text.as_str()).collect()
    }

    #[test]
    fn test_banner_per_phase() {
        assert!(banner(GamePhase::Active).is_empty());
        assert_eq!(
            texts(&banner(GamePhase::Lost)),
            ["You Lose!", "Press F5 to Restart"]
        );
        assert_eq!(
            texts(&banner(GamePhase::Won)),
            ["You Win!", "Press F5 to Advance"]
        );
        let game_won = banner(GamePhase::GameWon);
        assert_eq!(game_won.len(), 3);
        assert_eq!(game_won[2].anchor, Anchor::Banner(2));
    }
}
