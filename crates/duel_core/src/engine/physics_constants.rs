//! Physics constants for the duel simulation
//!
//! Logical field units; one tick is one simulation step. These are the
//! defaults behind `MatchConfig`, which is what the engine actually reads.

/// Field dimensions
pub mod field {
    /// Field width (x axis, goal to goal)
    pub const WIDTH: f32 = 800.0;
    /// Field height (y axis, touchline to touchline)
    pub const HEIGHT: f32 = 500.0;
}

/// Goal mouth dimensions
pub mod goal {
    /// Depth of the scoring strip at each end
    pub const WIDTH: f32 = 20.0;
    /// Vertical span of the mouth
    pub const HEIGHT: f32 = 150.0;
    /// Aim point distance in front of the back line
    pub const AIM_INSET: f32 = 10.0;
}

/// Ball physics
pub mod ball {
    pub const RADIUS: f32 = 10.0;
    /// Per-axis velocity multiplier applied after each position update
    pub const FRICTION: f32 = 0.98;
    /// Energy kept on a wall bounce (velocity component flips sign)
    pub const WALL_RESTITUTION: f32 = 0.8;
}

/// Actor body and movement
pub mod actor {
    pub const RADIUS: f32 = 20.0;
    /// Field units per tick, identical for both sides
    pub const SPEED: f32 = 3.5;
    /// Distance of each kickoff column from its own back line
    pub const START_COLUMN_OFFSET: f32 = 150.0;
    /// Restart jitter (uniform, +/-)
    pub const RESTART_JITTER_X: f32 = 30.0;
    pub const RESTART_JITTER_Y: f32 = 50.0;
}

/// Kick resolution
pub mod kick {
    /// Extra reach beyond touching radii
    pub const TOLERANCE: f32 = 5.0;
    pub const POWER_MIN: f32 = 7.0;
    pub const POWER_MAX: f32 = 8.0;
}

/// Ball restarts
pub mod restart {
    /// Speed range when a new match starts
    pub const KICKOFF_SPEED_MIN: f32 = 0.5;
    pub const KICKOFF_SPEED_MAX: f32 = 1.5;
    /// Speed range after a goal
    pub const RESTART_SPEED_MIN: f32 = 1.0;
    pub const RESTART_SPEED_MAX: f32 = 2.0;
}

/// Steering defaults shared by every controller style
pub mod steering {
    pub const SHOOTING_RANGE: f32 = 20.0;
    /// Max angular error added to a shot (radians, +/-)
    pub const SHOT_JITTER_RAD: f32 = 0.2;
    pub const SHOT_SPEED_FACTOR: f32 = 0.8;
    /// Inset applied to extrapolated interception targets
    pub const INTERCEPT_MARGIN: f32 = 30.0;
    /// Speed factor when not strictly closer to the ball (race-to-ball)
    pub const TRAILING_SPEED_FACTOR: f32 = 0.95;
    /// Opponent-to-ball distance that triggers the defensive stance
    pub const DEFENSIVE_TRIGGER: f32 = 25.0;
    pub const DEFENSIVE_SPEED_FACTOR: f32 = 0.95;
}

/// Possession statistics
pub mod possession {
    /// Actor-to-ball distance counted as possession
    pub const RADIUS: f32 = 30.0;
}

// Compile-time validation
const _: () = assert!(goal::HEIGHT < field::HEIGHT);
const _: () = assert!(kick::POWER_MIN <= kick::POWER_MAX);
const _: () = assert!(steering::SHOT_SPEED_FACTOR <= 1.0);
