//! Difficulty presets
//!
//! A difficulty only decides how noisy and how far-sighted a controller is.
//! Everything else about its behavior comes from its `ControllerStyle`.

use crate::error::DuelError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Difficulty tier shared by both controllers of a match
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Difficulty {
    /// Frequent random headings, short look-ahead
    Easy,
    #[default]
    Medium,
    /// Rare mistakes, longest look-ahead
    Hard,
}

/// Numbers a difficulty contributes to a `SteeringProfile`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DifficultyPreset {
    /// Probability of a random heading overriding the decision for a tick
    pub error_rate: f32,
    /// Ticks of linear look-ahead used for interception
    pub prediction_horizon: u32,
}

impl Difficulty {
    pub const ALL: [Difficulty; 3] = [Difficulty::Easy, Difficulty::Medium, Difficulty::Hard];

    pub fn preset(self) -> DifficultyPreset {
        match self {
            Self::Easy => DifficultyPreset { error_rate: 0.25, prediction_horizon: 6 },
            Self::Medium => DifficultyPreset { error_rate: 0.15, prediction_horizon: 8 },
            Self::Hard => DifficultyPreset { error_rate: 0.05, prediction_horizon: 10 },
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Easy => "easy",
            Self::Medium => "medium",
            Self::Hard => "hard",
        }
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Difficulty {
    type Err = DuelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "easy" => Ok(Self::Easy),
            "medium" => Ok(Self::Medium),
            "hard" => Ok(Self::Hard),
            _ => Err(DuelError::unknown("difficulty", s)),
        }
    }
}
