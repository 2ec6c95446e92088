//! Steering profiles and controller pairings
//!
//! The three controller styles run the same steering algorithm. A style only
//! adds situational speed rules on top of the difficulty preset:
//!
//! | Style       | Shot speed | Situational rule                                  |
//! |-------------|------------|---------------------------------------------------|
//! | `Minimax`   | 0.7        | race-to-ball: 0.95 speed unless strictly closer    |
//! | `Dqn`       | 0.8        | defensive stance when the opponent is on the ball |
//! | `Heuristic` | 0.8        | none                                              |

use super::{at_most, non_negative, ordered_range, unit_interval, Difficulty};
use crate::engine::physics_constants::{kick, steering};
use crate::error::{DuelError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Named controller flavor
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ControllerStyle {
    Minimax,
    Dqn,
    Heuristic,
}

impl ControllerStyle {
    pub const ALL: [ControllerStyle; 3] =
        [ControllerStyle::Minimax, ControllerStyle::Dqn, ControllerStyle::Heuristic];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Minimax => "minimax",
            Self::Dqn => "dqn",
            Self::Heuristic => "heuristic",
        }
    }
}

impl fmt::Display for ControllerStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ControllerStyle {
    type Err = DuelError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "minimax" => Ok(Self::Minimax),
            "dqn" => Ok(Self::Dqn),
            "heuristic" => Ok(Self::Heuristic),
            _ => Err(DuelError::unknown("controller style", s)),
        }
    }
}

/// Fall back toward the own goal while the opponent controls the ball.
///
/// Active for a tick when `opponent_dist < self_dist` and
/// `opponent_dist < trigger_distance`. The target becomes the midpoint of the
/// ball and the own goal aim point.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DefensiveStance {
    pub trigger_distance: f32,
    pub speed_factor: f32,
}

impl Default for DefensiveStance {
    fn default() -> Self {
        Self {
            trigger_distance: steering::DEFENSIVE_TRIGGER,
            speed_factor: steering::DEFENSIVE_SPEED_FACTOR,
        }
    }
}

/// Numeric parameters of one steering controller, fixed for a match
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SteeringProfile {
    pub error_rate: f32,
    pub prediction_horizon: u32,
    /// Actor-to-ball distance below which the controller shoots
    pub shooting_range: f32,
    /// Max angular error on a shot, radians (+/-)
    pub shot_jitter: f32,
    /// Fraction of actor speed used while shooting
    pub shot_speed_factor: f32,
    /// Uniform kick power range `(min, max)`
    pub kick_power: (f32, f32),
    /// Inset of the field rectangle that interception targets are clamped to
    pub intercept_margin: f32,
    /// Speed factor when not strictly closer to the ball than the opponent
    pub trailing_speed_factor: Option<f32>,
    pub defensive: Option<DefensiveStance>,
}

impl Default for SteeringProfile {
    fn default() -> Self {
        Self::new(ControllerStyle::Heuristic, Difficulty::default())
    }
}

impl SteeringProfile {
    pub fn new(style: ControllerStyle, difficulty: Difficulty) -> Self {
        let preset = difficulty.preset();
        let base = Self {
            error_rate: preset.error_rate,
            prediction_horizon: preset.prediction_horizon,
            shooting_range: steering::SHOOTING_RANGE,
            shot_jitter: steering::SHOT_JITTER_RAD,
            shot_speed_factor: steering::SHOT_SPEED_FACTOR,
            kick_power: (kick::POWER_MIN, kick::POWER_MAX),
            intercept_margin: steering::INTERCEPT_MARGIN,
            trailing_speed_factor: None,
            defensive: None,
        };

        match style {
            ControllerStyle::Minimax => Self {
                shot_speed_factor: 0.7,
                trailing_speed_factor: Some(steering::TRAILING_SPEED_FACTOR),
                ..base
            },
            ControllerStyle::Dqn => Self { defensive: Some(DefensiveStance::default()), ..base },
            ControllerStyle::Heuristic => base,
        }
    }

    /// Same profile with the random heading override disabled
    pub fn without_errors(self) -> Self {
        Self { error_rate: 0.0, ..self }
    }

    pub fn validate(&self) -> Result<()> {
        unit_interval("profile.error_rate", self.error_rate)?;
        non_negative("profile.shooting_range", self.shooting_range)?;
        at_most("profile.shot_jitter", self.shot_jitter, std::f32::consts::PI)?;
        speed_factor("profile.shot_speed_factor", self.shot_speed_factor)?;
        ordered_range("profile.kick_power", self.kick_power)?;
        non_negative("profile.intercept_margin", self.intercept_margin)?;
        if let Some(factor) = self.trailing_speed_factor {
            speed_factor("profile.trailing_speed_factor", factor)?;
        }
        if let Some(stance) = &self.defensive {
            non_negative("profile.defensive.trigger_distance", stance.trigger_distance)?;
            speed_factor("profile.defensive.speed_factor", stance.speed_factor)?;
        }
        Ok(())
    }
}

/// Partial `SteeringProfile` laid over a preset.
///
/// Omitted fields keep the preset's value. `trailing_speed_factor` and
/// `defensive` take an explicit `null` to switch the rule off.
#[derive(Debug, Clone, Copy, Default, PartialEq, Deserialize)]
pub struct ProfileOverride {
    #[serde(default)]
    pub error_rate: Option<f32>,
    #[serde(default)]
    pub prediction_horizon: Option<u32>,
    #[serde(default)]
    pub shooting_range: Option<f32>,
    #[serde(default)]
    pub shot_jitter: Option<f32>,
    #[serde(default)]
    pub shot_speed_factor: Option<f32>,
    #[serde(default)]
    pub kick_power: Option<(f32, f32)>,
    #[serde(default)]
    pub intercept_margin: Option<f32>,
    #[serde(default, deserialize_with = "present")]
    pub trailing_speed_factor: Option<Option<f32>>,
    #[serde(default, deserialize_with = "present")]
    pub defensive: Option<Option<DefensiveStance>>,
}

impl ProfileOverride {
    pub fn apply(self, base: SteeringProfile) -> SteeringProfile {
        SteeringProfile {
            error_rate: self.error_rate.unwrap_or(base.error_rate),
            prediction_horizon: self.prediction_horizon.unwrap_or(base.prediction_horizon),
            shooting_range: self.shooting_range.unwrap_or(base.shooting_range),
            shot_jitter: self.shot_jitter.unwrap_or(base.shot_jitter),
            shot_speed_factor: self.shot_speed_factor.unwrap_or(base.shot_speed_factor),
            kick_power: self.kick_power.unwrap_or(base.kick_power),
            intercept_margin: self.intercept_margin.unwrap_or(base.intercept_margin),
            trailing_speed_factor: self.trailing_speed_factor.unwrap_or(base.trailing_speed_factor),
            defensive: self.defensive.unwrap_or(base.defensive),
        }
    }
}

/// A key that is present maps to `Some`, even when its value is `null`
fn present<'de, D, T>(deserializer: D) -> std::result::Result<Option<Option<T>>, D::Error>
where
    D: serde::Deserializer<'de>,
    T: Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}

fn speed_factor(name: &str, value: f32) -> Result<()> {
    if value > 0.0 && value <= 1.0 {
        Ok(())
    } else {
        Err(DuelError::invalid_config(format!("{name} must be within (0, 1], got {value}")))
    }
}

/// Which controller style plays each side.
///
/// Serialized as `"<home>-vs-<away>"`, e.g. `"minimax-vs-dqn"`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Matchup {
    pub home: ControllerStyle,
    pub away: ControllerStyle,
}

impl Matchup {
    pub const MINIMAX_VS_DQN: Matchup =
        Matchup { home: ControllerStyle::Minimax, away: ControllerStyle::Dqn };
    pub const MINIMAX_VS_HEURISTIC: Matchup =
        Matchup { home: ControllerStyle::Minimax, away: ControllerStyle::Heuristic };
    pub const DQN_VS_HEURISTIC: Matchup =
        Matchup { home: ControllerStyle::Dqn, away: ControllerStyle::Heuristic };

    /// The three selectable pairings
    pub const PRESETS: [Matchup; 3] =
        [Self::MINIMAX_VS_DQN, Self::MINIMAX_VS_HEURISTIC, Self::DQN_VS_HEURISTIC];

    pub const fn new(home: ControllerStyle, away: ControllerStyle) -> Self {
        Self { home, away }
    }

    /// Same style on both sides
    pub const fn mirror(style: ControllerStyle) -> Self {
        Self { home: style, away: style }
    }

    pub fn is_mirror(&self) -> bool {
        self.home == self.away
    }
}

impl Default for Matchup {
    fn default() -> Self {
        Self::MINIMAX_VS_DQN
    }
}

impl fmt::Display for Matchup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-vs-{}", self.home, self.away)
    }
}

impl FromStr for Matchup {
    type Err = DuelError;

    fn from_str(s: &str) -> Result<Self> {
        let lowered = s.trim().to_ascii_lowercase();
        let (home, away) =
            lowered.split_once("-vs-").ok_or_else(|| DuelError::unknown("matchup", s))?;
        let home = home.parse().map_err(|_| DuelError::unknown("matchup", s))?;
        let away = away.parse().map_err(|_| DuelError::unknown("matchup", s))?;
        Ok(Self { home, away })
    }
}

impl TryFrom<String> for Matchup {
    type Error = DuelError;

    fn try_from(value: String) -> Result<Self> {
        value.parse()
    }
}

impl From<Matchup> for String {
    fn from(matchup: Matchup) -> Self {
        matchup.to_string()
    }
}
