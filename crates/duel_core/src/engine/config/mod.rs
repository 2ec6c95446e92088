//! # Match Configuration
//!
//! All numbers the engine reads live here, constant for the duration of a
//! match. `Default` reproduces the stock 800x500 field; every section is
//! `#[serde(default)]` so a JSON override only needs the fields it changes.
//!
//! ## Usage
//! ```rust
//! use duel_core::engine::config::MatchConfig;
//!
//! let config = MatchConfig::default();
//! let tuned = MatchConfig::from_json_str(r#"{ "kick": { "tolerance": 0.0 } }"#).unwrap();
//! assert_eq!(tuned.field.width, config.field.width);
//! ```

mod difficulty;
mod profile;

pub use difficulty::{Difficulty, DifficultyPreset};
pub use profile::{ControllerStyle, DefensiveStance, Matchup, ProfileOverride, SteeringProfile};

use crate::engine::geometry::{Rect, Vec2};
use crate::engine::physics_constants::{actor, ball, field, goal, kick, possession, restart};
use crate::engine::types::TeamSide;
use crate::error::{DuelError, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Field and goal mouth geometry
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FieldConfig {
    pub width: f32,
    pub height: f32,
    /// Depth of the scoring strip at each end
    pub goal_width: f32,
    /// Vertical span of each goal mouth, centered on mid-height
    pub goal_height: f32,
    /// Controllers aim this far in front of the back line
    pub goal_aim_inset: f32,
}

impl Default for FieldConfig {
    fn default() -> Self {
        Self {
            width: field::WIDTH,
            height: field::HEIGHT,
            goal_width: goal::WIDTH,
            goal_height: goal::HEIGHT,
            goal_aim_inset: goal::AIM_INSET,
        }
    }
}

impl FieldConfig {
    pub fn bounds(&self) -> Rect {
        Rect::new((0.0, 0.0), (self.width, self.height))
    }

    pub fn center(&self) -> Vec2 {
        (self.width * 0.5, self.height * 0.5)
    }

    /// Open interval `(y_min, y_max)` of the goal mouths
    pub fn goal_y_range(&self) -> (f32, f32) {
        let mid = self.height * 0.5;
        let half = self.goal_height * 0.5;
        (mid - half, mid + half)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BallConfig {
    pub radius: f32,
    pub friction: f32,
    pub wall_restitution: f32,
}

impl Default for BallConfig {
    fn default() -> Self {
        Self { radius: ball::RADIUS, friction: ball::FRICTION, wall_restitution: ball::WALL_RESTITUTION }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ActorConfig {
    pub radius: f32,
    pub speed: f32,
    /// Kickoff column distance from the actor's own back line
    pub start_column_offset: f32,
    /// Uniform +/- offset applied to restart positions
    pub restart_jitter: Vec2,
}

impl Default for ActorConfig {
    fn default() -> Self {
        Self {
            radius: actor::RADIUS,
            speed: actor::SPEED,
            start_column_offset: actor::START_COLUMN_OFFSET,
            restart_jitter: (actor::RESTART_JITTER_X, actor::RESTART_JITTER_Y),
        }
    }
}

impl ActorConfig {
    /// Nominal kickoff position for a side (no jitter)
    pub fn start_position(&self, side: TeamSide, field: &FieldConfig) -> Vec2 {
        let x = match side {
            TeamSide::Home => self.start_column_offset,
            TeamSide::Away => field.width - self.start_column_offset,
        };
        (x, field.height * 0.5)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct KickConfig {
    /// Reach beyond `actor.radius + ball.radius`
    pub tolerance: f32,
}

impl Default for KickConfig {
    fn default() -> Self {
        Self { tolerance: kick::TOLERANCE }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RestartConfig {
    /// Ball speed range at the start of a match
    pub kickoff_speed: (f32, f32),
    /// Ball speed range after a goal
    pub restart_speed: (f32, f32),
}

impl Default for RestartConfig {
    fn default() -> Self {
        Self {
            kickoff_speed: (restart::KICKOFF_SPEED_MIN, restart::KICKOFF_SPEED_MAX),
            restart_speed: (restart::RESTART_SPEED_MIN, restart::RESTART_SPEED_MAX),
        }
    }
}

/// Full match configuration
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MatchConfig {
    pub field: FieldConfig,
    pub ball: BallConfig,
    pub actor: ActorConfig,
    pub kick: KickConfig,
    pub restart: RestartConfig,
    /// Actor-to-ball distance that counts as possession for a tick
    pub possession_radius: f32,
}

impl Default for MatchConfig {
    fn default() -> Self {
        Self {
            field: FieldConfig::default(),
            ball: BallConfig::default(),
            actor: ActorConfig::default(),
            kick: KickConfig::default(),
            restart: RestartConfig::default(),
            possession_radius: possession::RADIUS,
        }
    }
}

impl MatchConfig {
    /// Region an actor's center may occupy
    pub fn actor_bounds(&self) -> Rect {
        self.field.bounds().inset(self.actor.radius)
    }

    pub fn from_json_str(json: &str) -> Result<Self> {
        let config: MatchConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self> {
        let text = std::fs::read_to_string(path.as_ref())?;
        let config = Self::from_json_str(&text)?;
        log::debug!("Loaded match config from {:?}", path.as_ref());
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        let f = &self.field;
        positive("field.width", f.width)?;
        positive("field.height", f.height)?;
        positive("field.goal_width", f.goal_width)?;
        positive("field.goal_height", f.goal_height)?;
        non_negative("field.goal_aim_inset", f.goal_aim_inset)?;
        if f.goal_height >= f.height {
            return Err(DuelError::invalid_config(format!(
                "field.goal_height ({}) must be smaller than field.height ({})",
                f.goal_height, f.height
            )));
        }
        if f.goal_width * 2.0 >= f.width {
            return Err(DuelError::invalid_config("field.goal_width leaves no playing area"));
        }

        positive("ball.radius", self.ball.radius)?;
        unit_interval("ball.friction", self.ball.friction)?;
        unit_interval("ball.wall_restitution", self.ball.wall_restitution)?;
        if self.ball.radius * 2.0 >= f.height {
            return Err(DuelError::invalid_config("ball.radius does not fit the field"));
        }

        positive("actor.radius", self.actor.radius)?;
        positive("actor.speed", self.actor.speed)?;
        at_most("actor.restart_jitter.x", self.actor.restart_jitter.0, f.width)?;
        at_most("actor.restart_jitter.y", self.actor.restart_jitter.1, f.height)?;
        if self.actor.radius * 2.0 >= f.width.min(f.height) {
            return Err(DuelError::invalid_config("actor.radius does not fit the field"));
        }
        if !(0.0..=f.width).contains(&self.actor.start_column_offset) {
            return Err(DuelError::invalid_config("actor.start_column_offset is off the field"));
        }

        non_negative("kick.tolerance", self.kick.tolerance)?;
        ordered_range("restart.kickoff_speed", self.restart.kickoff_speed)?;
        ordered_range("restart.restart_speed", self.restart.restart_speed)?;
        positive("possession_radius", self.possession_radius)?;
        Ok(())
    }
}

pub(crate) fn positive(name: &str, value: f32) -> Result<()> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(DuelError::invalid_config(format!("{name} must be positive, got {value}")))
    }
}

pub(crate) fn non_negative(name: &str, value: f32) -> Result<()> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(DuelError::invalid_config(format!("{name} must be >= 0, got {value}")))
    }
}

/// Finite, non-negative and no larger than `max`
pub(crate) fn at_most(name: &str, value: f32, max: f32) -> Result<()> {
    non_negative(name, value)?;
    if value <= max {
        Ok(())
    } else {
        Err(DuelError::invalid_config(format!("{name} must be <= {max}, got {value}")))
    }
}

pub(crate) fn unit_interval(name: &str, value: f32) -> Result<()> {
    if (0.0..=1.0).contains(&value) {
        Ok(())
    } else {
        Err(DuelError::invalid_config(format!("{name} must be within [0, 1], got {value}")))
    }
}

pub(crate) fn ordered_range(name: &str, range: (f32, f32)) -> Result<()> {
    non_negative(name, range.0)?;
    if range.1.is_finite() && range.0 <= range.1 {
        Ok(())
    } else {
        Err(DuelError::invalid_config(format!(
            "{name} must satisfy min <= max, got ({}, {})",
            range.0, range.1
        )))
    }
}

// ========== Tests ==========
