pub mod actor;
pub mod ball;
pub mod config;
pub mod geometry;
pub mod goal;
pub mod kick;
pub mod match_engine;
pub mod match_state;
pub mod physics_constants;
pub mod snapshot;
pub mod steering;
pub mod timestep;
pub mod types;

pub use actor::Actor;
pub use ball::Ball;
pub use config::{
    ControllerStyle, DefensiveStance, Difficulty, DifficultyPreset, MatchConfig, Matchup,
    ProfileOverride, SteeringProfile,
};
pub use geometry::{Rect, Vec2};
pub use goal::{Goal, GoalEvent, Goals};
pub use kick::KickEvent;
pub use match_engine::{MatchEngine, MatchSummary};
pub use match_state::MatchState;
pub use snapshot::{FrameRecorder, MatchObserver, MatchSnapshot, TickOutcome};
pub use steering::{Decision, SteeringController, WorldView};
pub use timestep::TICKS_PER_SECOND;
pub use types::{PerSide, TeamSide};
