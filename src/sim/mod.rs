//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must stay deterministic:
//! - Time comes in as a millisecond sample, never read from the system
//! - Seeded RNG only
//! - Stable iteration order (collection order)
//! - No rendering or platform dependencies

pub mod boom;
pub mod collision;
pub mod entity;
pub mod laser;
pub mod pickup;
pub mod rock;
pub mod ship;
pub mod state;
pub mod tick;

pub use boom::Boom;
pub use collision::{bounce_rocks, laser_collide};
pub use entity::{Direction, MoveGate, Rect, SizeTier};
pub use laser::Laser;
pub use pickup::Crate;
pub use rock::{Rock, RockUpdate};
pub use ship::{Ship, ShipSkin, ShipUpdate};
pub use state::{
    ForceField, GameEvent, GamePhase, GameState, HealthBar, Screen, SessionFlags, area_modifier,
};
pub use tick::{Action, TickInput, tick};
