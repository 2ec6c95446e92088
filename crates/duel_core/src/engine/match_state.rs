//! Match statistics
//!
//! Goals for the current match, all-time goals across matches played on the
//! same engine, possession ticks and elapsed ticks. Only the engine writes
//! here.

use crate::engine::types::{PerSide, TeamSide};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct MatchState {
    /// Goals in the current match
    pub match_goals: PerSide<u32>,
    /// Goals across every match since the engine was created
    pub total_goals: PerSide<u32>,
    /// Ticks each side spent within possession radius of the ball
    pub possession_ticks: PerSide<u64>,
    /// Ticks elapsed in the current match
    pub elapsed_ticks: u64,
    /// Matches started, including the current one
    pub matches_played: u32,
}

impl MatchState {
    pub fn record_goal(&mut self, scorer: TeamSide) {
        *self.match_goals.get_mut(scorer) += 1;
        *self.total_goals.get_mut(scorer) += 1;
    }

    pub fn record_possession(&mut self, side: TeamSide) {
        *self.possession_ticks.get_mut(side) += 1;
    }

    pub fn advance_tick(&mut self) {
        self.elapsed_ticks += 1;
    }

    /// Share of possession ticks held by `side`; 0.5 when nobody has
    /// possessed yet.
    pub fn possession_ratio(&self, side: TeamSide) -> f64 {
        let total = self.possession_ticks.total();
        if total == 0 {
            return 0.5;
        }
        *self.possession_ticks.get(side) as f64 / total as f64
    }

    /// Clear per-match counters, keep all-time goals
    pub fn start_new_match(&mut self) {
        self.match_goals = PerSide::default();
        self.possession_ticks = PerSide::default();
        self.elapsed_ticks = 0;
        self.matches_played += 1;
    }

    pub fn leader(&self) -> Option<TeamSide> {
        use std::cmp::Ordering;
        match self.match_goals.home.cmp(&self.match_goals.away) {
            Ordering::Greater => Some(TeamSide::Home),
            Ordering::Less => Some(TeamSide::Away),
            Ordering::Equal => None,
        }
    }
}
