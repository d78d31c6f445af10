//! Draw pass
//!
//! Paints one frame of the session onto a [`Surface`]. Layers go back to
//! front: status text, force field and bases, lasers, freighter, health bar,
//! rocks, crates, explosions, then the win/lose banner on top.

use crate::consts::*;
use crate::platform::{Surface, TextureId};
use crate::sim::GameState;
use crate::ui;

/// Render the current frame
pub fn draw_frame(state: &GameState, surface: &mut dyn Surface) {
    surface.clear(COLOR_BACKGROUND);

    for line in ui::status_lines(state) {
        surface.draw_text(&line);
    }

    surface.fill_rect(state.force_field.rect, state.force_field.color());
    surface.draw_image(TextureId::BaseLeft, state.base_left);
    surface.draw_image(TextureId::BaseRight, state.base_right);

    for laser in &state.lasers {
        surface.draw_image(laser.texture(), laser.rect);
    }

    if state.ship.alive {
        surface.draw_image(state.ship.texture(), state.ship.rect);
        surface.fill_rect(state.health_bar.back, COLOR_HEALTH_BACK);
        surface.fill_rect(state.health_bar.fill, COLOR_HEALTH_FILL);
    }

    for rock in &state.rocks {
        surface.draw_image(rock.texture(), rock.rect);
    }
    for c in &state.crates {
        surface.draw_image(c.texture(), c.rect);
    }
    for boom in &state.booms {
        surface.draw_image(boom.texture(), boom.rect);
    }

    for line in ui::banner(state.phase()) {
        surface.draw_text(&line);
    }
}
