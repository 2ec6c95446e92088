//! # duel_core - Deterministic Two-Actor Soccer Duel Engine
//!
//! One ball, two autonomous actors, fixed-step physics. Each tick both
//! steering controllers decide against a frozen view of the world, then
//! movement, kicks, ball integration, goal detection and possession
//! statistics are applied in a fixed order.
//!
//! ## Features
//! - Deterministic simulation (same seed = same match)
//! - One parametrized steering controller behind three controller styles
//! - Difficulty presets (error rate, prediction horizon)
//! - JSON API with optional snapshot frames for renderers

// Game engine APIs often require many parameters for physics, state, etc.
#![allow(clippy::too_many_arguments)]

pub mod api;
pub mod engine;
pub mod error;

pub use api::{simulate_match, simulate_match_json, MatchRequest, MatchResponse};
pub use engine::{
    ControllerStyle, Difficulty, MatchConfig, MatchEngine, MatchSnapshot, MatchSummary, Matchup,
    PerSide, ProfileOverride, SteeringProfile, TeamSide,
};
pub use error::{DuelError, Result};

// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
pub const SCHEMA_VERSION: u8 = 1;
