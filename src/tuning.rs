//! Data-driven game balance
//!
//! Every gameplay constant lives here so a run can be re-balanced from a
//! JSON file without recompiling. `Default` carries the shipped values.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{LoadError, read_json};
use crate::sim::entity::SizeTier;

/// Inclusive integer range used for randomized rock stats
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Span {
    pub min: i32,
    pub max: i32,
}

impl Span {
    pub const fn new(min: i32, max: i32) -> Self {
        Self { min, max }
    }

    pub const fn fixed(value: i32) -> Self {
        Self { min: value, max: value }
    }
}

/// Freighter (player ship) balance
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ShipTuning {
    pub max_hp: f32,
    /// Milliseconds between movement steps
    pub move_delay: u64,
    /// Pixels per movement step
    pub x_speed: i32,
    pub y_speed: i32,
    /// Milliseconds between shield/normal skin toggles after a hit
    pub blink_interval: u64,
    /// Shield flashes shown per hit
    pub blink_count_max: u32,
    /// Space kept free under the ship for the health bar
    pub bottom_offset: i32,
}

impl Default for ShipTuning {
    fn default() -> Self {
        Self {
            max_hp: 40.0,
            move_delay: 3,
            x_speed: 5,
            y_speed: 5,
            blink_interval: 80,
            blink_count_max: 4,
            bottom_offset: 7,
        }
    }
}

/// Laser balance
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LaserTuning {
    pub damage: f32,
    pub move_delay: u64,
    /// Pixels per movement step (upward)
    pub y_speed: i32,
    /// Minimum milliseconds between two shots
    pub shot_cooldown: u64,
    /// Spawn position relative to the ship's top-left corner
    pub spawn_offset_x: i32,
    pub spawn_offset_y: i32,
}

impl Default for LaserTuning {
    fn default() -> Self {
        Self {
            damage: 18.0,
            move_delay: 1,
            y_speed: 10,
            shot_cooldown: 150,
            spawn_offset_x: 24,
            spawn_offset_y: -30,
        }
    }
}

/// Stats for one rock size tier
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RockClass {
    pub hp: f32,
    /// Higher is faster; the move interval is `move_base / move_speed`
    pub move_speed: Span,
    pub x_speed: Span,
    pub y_speed: Span,
}

/// Rock balance
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RockTuning {
    pub small: RockClass,
    pub medium: RockClass,
    pub large: RockClass,
    pub move_base: u64,
    /// Refill rocks spawn this far above the top edge (plus their height)
    pub spawn_offset_y: i32,
}

impl Default for RockTuning {
    fn default() -> Self {
        Self {
            small: RockClass {
                hp: 11.0,
                move_speed: Span::new(18, 24),
                x_speed: Span::new(1, 2),
                y_speed: Span::new(1, 2),
            },
            medium: RockClass {
                hp: 18.0,
                move_speed: Span::new(13, 17),
                x_speed: Span::new(1, 2),
                y_speed: Span::new(1, 2),
            },
            large: RockClass {
                hp: 30.0,
                move_speed: Span::new(6, 12),
                x_speed: Span::fixed(1),
                y_speed: Span::fixed(1),
            },
            move_base: 300,
            spawn_offset_y: -40,
        }
    }
}

impl RockTuning {
    pub fn class(&self, size: SizeTier) -> &RockClass {
        match size {
            SizeTier::Small => &self.small,
            SizeTier::Medium => &self.medium,
            SizeTier::Large => &self.large,
        }
    }
}

/// Force field line above the freighter
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ForceFieldTuning {
    /// How long the field stays lit after a rock bounces off it
    pub blink_duration: u64,
    /// Distance between the field and the ship row
    pub offset: i32,
}

impl Default for ForceFieldTuning {
    fn default() -> Self {
        Self {
            blink_duration: 25,
            offset: 18,
        }
    }
}

/// Level progression
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LevelTuning {
    pub max_level: u32,
    /// Rocks per level = level * round((width + height) / divisor)
    pub area_modifier_divisor: f64,
    /// Milliseconds between rock blasts after a level is won
    pub win_rock_destroy_delay: u64,
}

impl Default for LevelTuning {
    fn default() -> Self {
        Self {
            max_level: 10,
            area_modifier_divisor: 250.0,
            win_rock_destroy_delay: 100,
        }
    }
}

/// Health bar placement relative to the freighter
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct HealthBarTuning {
    pub offset_x: i32,
    pub offset_y: i32,
    pub width_offset: i32,
}

impl Default for HealthBarTuning {
    fn default() -> Self {
        Self {
            offset_x: 9,
            offset_y: 4,
            width_offset: 18,
        }
    }
}

/// Complete balance table
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    pub ship: ShipTuning,
    pub laser: LaserTuning,
    pub rock: RockTuning,
    /// Lifetime of an explosion in milliseconds
    pub explosion_duration: u64,
    pub force_field: ForceFieldTuning,
    pub level: LevelTuning,
    pub health_bar: HealthBarTuning,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            ship: ShipTuning::default(),
            laser: LaserTuning::default(),
            rock: RockTuning::default(),
            explosion_duration: 150,
            force_field: ForceFieldTuning::default(),
            level: LevelTuning::default(),
            health_bar: HealthBarTuning::default(),
        }
    }
}

impl Tuning {
    /// Load a balance table from JSON; missing sections keep their defaults
    pub fn load(path: &Path) -> Result<Self, LoadError> {
        let tuning: Tuning = read_json(path)?;
        tuning.validate()?;
        log::info!("Loaded tuning from {}", path.display());
        Ok(tuning)
    }

    /// Reject tables the simulation cannot run with
    pub fn validate(&self) -> Result<(), LoadError> {
        if self.level.max_level == 0 {
            return Err(LoadError::invalid("level.max_level", "must be at least 1"));
        }
        if !(self.level.area_modifier_divisor > 0.0) {
            return Err(LoadError::invalid(
                "level.area_modifier_divisor",
                "must be positive",
            ));
        }
        if !(self.ship.max_hp > 0.0) {
            return Err(LoadError::invalid("ship.max_hp", "must be positive"));
        }
        if self.ship.blink_count_max == 0 {
            return Err(LoadError::invalid("ship.blink_count_max", "must be at least 1"));
        }
        for (field, class) in [
            ("rock.small", &self.rock.small),
            ("rock.medium", &self.rock.medium),
            ("rock.large", &self.rock.large),
        ] {
            for span in [class.move_speed, class.x_speed, class.y_speed] {
                if span.min > span.max {
                    return Err(LoadError::invalid(
                        field,
                        format!("range {}..={} is inverted", span.min, span.max),
                    ));
                }
                if span.min < 0 {
                    return Err(LoadError::invalid(field, "speeds cannot be negative"));
                }
            }
            if !(class.hp > 0.0) {
                return Err(LoadError::invalid(field, "hp must be positive"));
            }
        }
        Ok(())
    }
}
