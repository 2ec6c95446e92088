//! Read-only match views for renderers and recorders
//!
//! Collaborators never touch the engine's state. They receive a
//! `MatchSnapshot` (and the tick's `TickOutcome`) through `MatchObserver`
//! after every tick.

use crate::engine::actor::Actor;
use crate::engine::ball::Ball;
use crate::engine::goal::GoalEvent;
use crate::engine::kick::KickEvent;
use crate::engine::match_state::MatchState;
use crate::engine::types::{PerSide, TeamSide};
use serde::{Deserialize, Serialize};

/// World state after a tick
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MatchSnapshot {
    pub tick: u64,
    pub ball: Ball,
    pub home: Actor,
    pub away: Actor,
    pub score: PerSide<u32>,
    pub total_goals: PerSide<u32>,
    pub possession: PerSide<f64>,
}

impl MatchSnapshot {
    pub fn new(ball: Ball, actors: &PerSide<Actor>, state: &MatchState) -> Self {
        Self {
            tick: state.elapsed_ticks,
            ball,
            home: actors.home,
            away: actors.away,
            score: state.match_goals,
            total_goals: state.total_goals,
            possession: PerSide::new(
                state.possession_ratio(TeamSide::Home),
                state.possession_ratio(TeamSide::Away),
            ),
        }
    }

    pub fn actor(&self, side: TeamSide) -> &Actor {
        match side {
            TeamSide::Home => &self.home,
            TeamSide::Away => &self.away,
        }
    }
}

/// What happened during one tick
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TickOutcome {
    /// Connecting kicks in resolution order (away, then home)
    pub kicks: Vec<KickEvent>,
    pub goal: Option<GoalEvent>,
    /// Sides within possession radius after the tick
    pub possession: PerSide<bool>,
}

impl TickOutcome {
    pub fn is_quiet(&self) -> bool {
        self.kicks.is_empty() && self.goal.is_none()
    }
}

/// Receives every tick of a running match
pub trait MatchObserver {
    fn on_tick(&mut self, snapshot: &MatchSnapshot, outcome: &TickOutcome);

    fn on_goal(&mut self, _event: &GoalEvent, _snapshot: &MatchSnapshot) {}
}

/// Keeps every `interval`-th snapshot, plus any tick with a goal
#[derive(Debug, Clone, Default)]
pub struct FrameRecorder {
    interval: u64,
    frames: Vec<MatchSnapshot>,
}

impl FrameRecorder {
    /// An interval of 0 records nothing
    pub fn new(interval: u64) -> Self {
        Self { interval, frames: Vec::new() }
    }

    pub fn frames(&self) -> &[MatchSnapshot] {
        &self.frames
    }

    pub fn into_frames(self) -> Vec<MatchSnapshot> {
        self.frames
    }
}

impl MatchObserver for FrameRecorder {
    fn on_tick(&mut self, snapshot: &MatchSnapshot, outcome: &TickOutcome) {
        if self.interval == 0 {
            return;
        }
        if snapshot.tick % self.interval == 0 || outcome.goal.is_some() {
            self.frames.push(*snapshot);
        }
    }
}
