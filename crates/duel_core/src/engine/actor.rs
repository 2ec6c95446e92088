//! Actor state and field-clamped movement

use crate::engine::config::MatchConfig;
use crate::engine::geometry::{self, Vec2};
use crate::engine::types::TeamSide;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Actor {
    pub side: TeamSide,
    pub position: Vec2,
    pub radius: f32,
    /// Max movement per tick
    pub speed: f32,
    /// Kicks taken (statistics only)
    pub shots: u32,
    /// Kicks whose line crossed the attacked goal mouth
    pub shots_on_goal: u32,
}

impl Actor {
    pub fn new(side: TeamSide, position: Vec2, config: &MatchConfig) -> Self {
        Self {
            side,
            position,
            radius: config.actor.radius,
            speed: config.actor.speed,
            shots: 0,
            shots_on_goal: 0,
        }
    }

    /// Add `delta` to the position, then clamp into `config.actor_bounds()`.
    pub fn move_by(&mut self, delta: Vec2, config: &MatchConfig) {
        self.position = config.actor_bounds().clamp(geometry::add(self.position, delta));
    }

    /// Place the actor, clamped the same way as `move_by`
    pub fn place(&mut self, position: Vec2, config: &MatchConfig) {
        self.position = config.actor_bounds().clamp(position);
    }

    pub fn distance_to(&self, point: Vec2) -> f32 {
        geometry::distance(self.position, point)
    }

    pub fn reset_stats(&mut self) {
        self.shots = 0;
        self.shots_on_goal = 0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_move_adds_delta() {
        let config = MatchConfig::default();
        let mut actor = Actor::new(TeamSide::Home, (150.0, 250.0), &config);
        actor.move_by((3.5, -1.0), &config);
        assert_eq!(actor.position, (153.5, 249.0));
    }

    #[test]
    fn test_move_clamps_to_inset_field() {
        let config = MatchConfig::default();
        let mut actor = Actor::new(TeamSide::Away, (22.0, 478.0), &config);
        actor.move_by((-3.5, 3.5), &config);
        assert_eq!(actor.position, (20.0, 480.0));

        actor.place((900.0, -40.0), &config);
        assert_eq!(actor.position, (780.0, 20.0));
    }

    #[test]
    fn test_move_leaves_counters_alone() {
        let config = MatchConfig::default();
        let mut actor = Actor::new(TeamSide::Home, (150.0, 250.0), &config);
        actor.shots = 2;
        actor.move_by((1.0, 1.0), &config);
        assert_eq!(actor.shots, 2);
        actor.reset_stats();
        assert_eq!(actor.shots, 0);
    }

    mod proptests {
        use crate::engine::actor::Actor;
        use crate::engine::config::MatchConfig;
        use crate::engine::types::TeamSide;
        use proptest::prelude::*;

        proptest! {
            /// Property: every move lands inside [r, W - r] x [r, H - r]
            #[test]
            fn prop_move_stays_in_field(
                x in 20.0f32..780.0f32,
                y in 20.0f32..480.0f32,
                moves in prop::collection::vec((-3.5f32..3.5f32, -3.5f32..3.5f32), 1..100)
            ) {
                let config = MatchConfig::default();
                let mut actor = Actor::new(TeamSide::Home, (x, y), &config);
                for delta in moves {
                    actor.move_by(delta, &config);
                    prop_assert!(actor.position.0 >= 20.0 && actor.position.0 <= 780.0);
                    prop_assert!(actor.position.1 >= 20.0 && actor.position.1 <= 480.0);
                }
            }
        }
    }
}
