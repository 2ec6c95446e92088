//! Goal mouths and goal-line handling
//!
//! ## Ownership
//! - Home goal (x = 0) is defended by Home, attacked by Away
//! - Away goal (x = width) is defended by Away, attacked by Home
//!
//! Each goal is a strip `goal_width` deep. Inside the strip the ball either
//! scores (y strictly inside the mouth) or rebounds off the strip edge as if
//! it were a wall.

use crate::engine::ball::Ball;
use crate::engine::config::FieldConfig;
use crate::engine::geometry::Vec2;
use crate::engine::types::TeamSide;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Goal {
    /// Side defending this goal
    pub owner: TeamSide,
    /// Back line x coordinate (0 or field width)
    pub line_x: f32,
    /// Inner edge of the scoring strip
    pub strip_edge: f32,
    /// Open interval of the mouth
    pub y_range: (f32, f32),
    /// Where attackers aim, `goal_aim_inset` in front of the back line
    pub aim_point: Vec2,
}

impl Goal {
    pub fn new(owner: TeamSide, field: &FieldConfig) -> Self {
        let mid_y = field.height * 0.5;
        let (line_x, strip_edge, aim_x) = match owner {
            TeamSide::Home => (0.0, field.goal_width, field.goal_aim_inset),
            TeamSide::Away => {
                (field.width, field.width - field.goal_width, field.width - field.goal_aim_inset)
            }
        };
        Self { owner, line_x, strip_edge, y_range: field.goal_y_range(), aim_point: (aim_x, mid_y) }
    }

    /// Ball x is past the strip edge toward this goal's back line
    pub fn in_strip(&self, x: f32) -> bool {
        match self.owner {
            TeamSide::Home => x < self.strip_edge,
            TeamSide::Away => x > self.strip_edge,
        }
    }

    /// Strict: a ball exactly on a post line does not count
    pub fn mouth_contains(&self, y: f32) -> bool {
        y > self.y_range.0 && y < self.y_range.1
    }

    /// Whether a ray from `from` along `direction` reaches the back line
    /// inside the mouth
    pub fn ray_hits_mouth(&self, from: Vec2, direction: Vec2) -> bool {
        let dx = self.line_x - from.0;
        if direction.0 == 0.0 || dx.signum() != direction.0.signum() {
            return false;
        }
        let t = dx / direction.0;
        self.mouth_contains(from.1 + direction.1 * t)
    }
}

/// Both goals of the field
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Goals {
    pub home: Goal,
    pub away: Goal,
}

impl Goals {
    pub fn new(field: &FieldConfig) -> Self {
        Self { home: Goal::new(TeamSide::Home, field), away: Goal::new(TeamSide::Away, field) }
    }

    pub fn defending_goal(&self, side: TeamSide) -> &Goal {
        match side {
            TeamSide::Home => &self.home,
            TeamSide::Away => &self.away,
        }
    }

    pub fn attacking_goal(&self, side: TeamSide) -> &Goal {
        self.defending_goal(side.opponent())
    }

    /// Resolve the ball against both goal strips.
    ///
    /// Returns the scoring side, or rebounds the ball off the strip edge
    /// (`vx *= -restitution`, `x = strip_edge`) when it misses the mouth.
    pub fn check_ball(&self, ball: &mut Ball, restitution: f32) -> Option<TeamSide> {
        for goal in [&self.home, &self.away] {
            if !goal.in_strip(ball.position.0) {
                continue;
            }
            if goal.mouth_contains(ball.position.1) {
                return Some(goal.owner.opponent());
            }
            ball.velocity.0 *= -restitution;
            ball.position.0 = goal.strip_edge;
            return None;
        }
        None
    }
}

/// A scored goal
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GoalEvent {
    pub scorer: TeamSide,
    /// Elapsed tick count of the match when the goal went in
    pub tick: u64,
    /// Ball position as it crossed into the strip
    pub position: Vec2,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn goals() -> Goals {
        Goals::new(&FieldConfig::default())
    }

    #[test]
    fn test_goal_ownership() {
        let g = goals();
        assert_eq!(g.defending_goal(TeamSide::Home).line_x, 0.0);
        assert_eq!(g.attacking_goal(TeamSide::Home).line_x, 800.0);
        assert_eq!(g.attacking_goal(TeamSide::Away).owner, TeamSide::Home);
        assert_eq!(g.away.aim_point, (790.0, 250.0));
        assert_eq!(g.home.aim_point, (10.0, 250.0));
    }

    #[test]
    fn test_left_goal_scores_for_away() {
        let g = goals();
        let mut ball = Ball::new((-2.0, 250.0), (-6.0, 0.0), 10.0);
        assert_eq!(g.check_ball(&mut ball, 0.8), Some(TeamSide::Away));
        // scoring leaves the ball untouched for the reset
        assert_eq!(ball.velocity, (-6.0, 0.0));
    }

    #[test]
    fn test_right_goal_scores_for_home() {
        let g = goals();
        let mut ball = Ball::new((785.0, 200.0), (5.0, 1.0), 10.0);
        assert_eq!(g.check_ball(&mut ball, 0.8), Some(TeamSide::Home));
    }

    #[test]
    fn test_post_line_is_not_a_goal() {
        let g = goals();
        let mut ball = Ball::new((5.0, 175.0), (-5.0, 0.0), 10.0);
        assert_eq!(g.check_ball(&mut ball, 0.8), None);
        assert_eq!(ball.position.0, 20.0);
        assert!((ball.velocity.0 - 4.0).abs() < 1e-6);
    }

    #[test]
    fn test_miss_rebounds_off_strip() {
        let g = goals();
        let mut ball = Ball::new((790.0, 60.0), (8.0, -2.0), 10.0);
        assert_eq!(g.check_ball(&mut ball, 0.8), None);
        assert_eq!(ball.position.0, 780.0);
        assert!((ball.velocity.0 + 6.4).abs() < 1e-5);
        assert_eq!(ball.velocity.1, -2.0);
    }

    #[test]
    fn test_open_field_untouched() {
        let g = goals();
        let mut ball = Ball::new((400.0, 250.0), (3.0, 3.0), 10.0);
        assert_eq!(g.check_ball(&mut ball, 0.8), None);
        assert_eq!(ball, Ball::new((400.0, 250.0), (3.0, 3.0), 10.0));
    }

    #[test]
    fn test_ray_hits_mouth() {
        let g = goals();
        assert!(g.away.ray_hits_mouth((400.0, 250.0), (1.0, 0.0)));
        assert!(!g.away.ray_hits_mouth((400.0, 250.0), (-1.0, 0.0)));
        assert!(!g.away.ray_hits_mouth((400.0, 250.0), (0.0, 1.0)));
        // steep angle reaches x = 800 at y = 650
        assert!(!g.away.ray_hits_mouth((400.0, 250.0), (0.5, 0.5)));
        assert!(g.home.ray_hits_mouth((100.0, 300.0), (-1.0, -0.1)));
    }
}
