//! Steering controller
//!
//! One decision algorithm drives every controller style; the
//! `SteeringProfile` supplies the numbers. Per tick, in precedence order:
//!
//! 1. **Error injection** - with probability `error_rate`, move at full speed
//!    along a uniformly random heading and do not kick.
//! 2. **Shoot** - within `shooting_range` of the ball, move along the
//!    ball-to-goal direction (plus angular jitter) at `shot_speed_factor` and
//!    kick.
//! 3. **Intercept** - seek the ball position extrapolated
//!    `prediction_horizon` ticks ahead, clamped into the field inset by
//!    `intercept_margin`. The defensive stance swaps the target for the
//!    midpoint of ball and own goal.
//! 4. Already on target: stand still.
//!
//! The returned movement never exceeds the actor's speed, and a zero-length
//! direction yields `(0, 0)` instead of NaN.

use crate::engine::actor::Actor;
use crate::engine::ball::Ball;
use crate::engine::config::{MatchConfig, SteeringProfile};
use crate::engine::geometry::{self, Rect, Vec2};
use crate::engine::goal::Goals;
use crate::engine::types::TeamSide;
use rand::Rng;
use std::f32::consts::TAU;

/// Seek: move toward a target at the given speed.
pub fn seek(current: Vec2, target: Vec2, speed: f32) -> Vec2 {
    if speed <= 0.0 {
        return (0.0, 0.0);
    }
    let dir = geometry::normalize(geometry::sub(target, current));
    geometry::scale(dir, speed)
}

/// Frozen pre-tick world both controllers decide against
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WorldView {
    pub ball: Ball,
    pub home: Actor,
    pub away: Actor,
}

impl WorldView {
    pub fn actor(&self, side: TeamSide) -> &Actor {
        match side {
            TeamSide::Home => &self.home,
            TeamSide::Away => &self.away,
        }
    }
}

/// Movement and kick intent for one tick
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Decision {
    pub movement: Vec2,
    pub kick: bool,
}

impl Decision {
    pub const IDLE: Decision = Decision { movement: (0.0, 0.0), kick: false };

    /// Kick aim is the movement direction
    pub fn aim(&self) -> Vec2 {
        self.movement
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct SteeringController {
    side: TeamSide,
    profile: SteeringProfile,
    target_goal: Vec2,
    own_goal: Vec2,
    intercept_bounds: Rect,
}

impl SteeringController {
    pub fn new(side: TeamSide, profile: SteeringProfile, config: &MatchConfig) -> Self {
        let goals = Goals::new(&config.field);
        Self {
            side,
            profile,
            target_goal: goals.attacking_goal(side).aim_point,
            own_goal: goals.defending_goal(side).aim_point,
            intercept_bounds: config.field.bounds().inset(profile.intercept_margin),
        }
    }

    pub fn side(&self) -> TeamSide {
        self.side
    }

    pub fn profile(&self) -> &SteeringProfile {
        &self.profile
    }

    pub fn target_goal(&self) -> Vec2 {
        self.target_goal
    }

    /// Decide this tick's movement and kick.
    ///
    /// Always draws the error roll first; the heading or shot jitter draws
    /// follow only on the branch that needs them.
    pub fn decide<R: Rng + ?Sized>(&self, view: &WorldView, rng: &mut R) -> Decision {
        let me = view.actor(self.side);
        let opponent = view.actor(self.side.opponent());
        let ball = &view.ball;

        let roll: f32 = rng.gen();
        if roll < self.profile.error_rate {
            let heading = rng.gen_range(0.0..TAU);
            return Decision { movement: geometry::scale(geometry::from_angle(heading), me.speed), kick: false };
        }

        let self_dist = me.distance_to(ball.position);
        if self_dist < self.profile.shooting_range {
            return self.shoot(me, ball, rng);
        }

        let opponent_dist = opponent.distance_to(ball.position);
        let (target, speed) = self.intercept_target(me, ball, self_dist, opponent_dist);
        Decision { movement: seek(me.position, target, speed), kick: false }
    }

    fn shoot<R: Rng + ?Sized>(&self, me: &Actor, ball: &Ball, rng: &mut R) -> Decision {
        let to_goal = geometry::normalize(geometry::sub(self.target_goal, ball.position));
        if to_goal == (0.0, 0.0) {
            return Decision::IDLE;
        }
        let jitter = if self.profile.shot_jitter > 0.0 {
            rng.gen_range(-self.profile.shot_jitter..=self.profile.shot_jitter)
        } else {
            0.0
        };
        let direction = geometry::from_angle(geometry::angle_of(to_goal) + jitter);
        Decision {
            movement: geometry::scale(direction, me.speed * self.profile.shot_speed_factor),
            kick: true,
        }
    }

    fn intercept_target(&self, me: &Actor, ball: &Ball, self_dist: f32, opponent_dist: f32) -> (Vec2, f32) {
        if let Some(stance) = &self.profile.defensive {
            if opponent_dist < self_dist && opponent_dist < stance.trigger_distance {
                let cover = self.intercept_bounds.clamp(geometry::midpoint(ball.position, self.own_goal));
                return (cover, me.speed * stance.speed_factor);
            }
        }

        let predicted = self.intercept_bounds.clamp(ball.predict(self.profile.prediction_horizon));
        // ties count as not closer
        let speed = match self.profile.trailing_speed_factor {
            Some(factor) if self_dist >= opponent_dist => me.speed * factor,
            _ => me.speed,
        };
        (predicted, speed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::config::{ControllerStyle, Difficulty};
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn view(ball: Ball, home: Vec2, away: Vec2) -> WorldView {
        let config = MatchConfig::default();
        WorldView {
            ball,
            home: Actor::new(TeamSide::Home, home, &config),
            away: Actor::new(TeamSide::Away, away, &config),
        }
    }

    fn controller(side: TeamSide, style: ControllerStyle) -> SteeringController {
        let profile = SteeringProfile::new(style, Difficulty::Medium).without_errors();
        SteeringController::new(side, profile, &MatchConfig::default())
    }

    fn approx(a: Vec2, b: Vec2) -> bool {
        (a.0 - b.0).abs() < 1e-4 && (a.1 - b.1).abs() < 1e-4
    }

    #[test]
    fn test_seek() {
        assert_eq!(seek((0.0, 0.0), (10.0, 0.0), 3.5), (3.5, 0.0));
        assert_eq!(seek((5.0, 5.0), (5.0, 5.0), 3.5), (0.0, 0.0));
        assert_eq!(seek((0.0, 0.0), (10.0, 0.0), 0.0), (0.0, 0.0));
    }

    #[test]
    fn test_shooting_scenario() {
        let ball = Ball::at_rest((550.0, 250.0), 10.0);
        let w = view(ball, (565.0, 250.0), (700.0, 100.0));
        let ctrl = controller(TeamSide::Home, ControllerStyle::Heuristic);
        let ideal = geometry::angle_of(geometry::sub(ctrl.target_goal(), ball.position));

        for seed in 0..50 {
            let mut rng = ChaCha8Rng::seed_from_u64(seed);
            let decision = ctrl.decide(&w, &mut rng);
            assert!(decision.kick);
            let off = geometry::angle_diff(geometry::angle_of(decision.aim()), ideal).abs();
            assert!(off <= 0.2 + 1e-5, "seed {seed}: off by {off}");
            assert!((geometry::length(decision.movement) - 3.5 * 0.8).abs() < 1e-4);
        }
    }

    #[test]
    fn test_away_shoots_toward_left_goal() {
        let ball = Ball::at_rest((200.0, 250.0), 10.0);
        let w = view(ball, (500.0, 250.0), (212.0, 250.0));
        let ctrl = controller(TeamSide::Away, ControllerStyle::Minimax);
        let mut rng = ChaCha8Rng::seed_from_u64(7);
        let decision = ctrl.decide(&w, &mut rng);
        assert!(decision.kick);
        assert!(decision.movement.0 < 0.0);
        assert!((geometry::length(decision.movement) - 3.5 * 0.7).abs() < 1e-4);
    }

    #[test]
    fn test_error_injection_overrides() {
        let mut profile = SteeringProfile::new(ControllerStyle::Heuristic, Difficulty::Easy);
        profile.error_rate = 1.0;
        let ctrl = SteeringController::new(TeamSide::Home, profile, &MatchConfig::default());
        // in shooting range, yet the error branch wins
        let w = view(Ball::at_rest((400.0, 250.0), 10.0), (410.0, 250.0), (600.0, 250.0));
        let mut rng = ChaCha8Rng::seed_from_u64(3);
        for _ in 0..20 {
            let decision = ctrl.decide(&w, &mut rng);
            assert!(!decision.kick);
            assert!((geometry::length(decision.movement) - 3.5).abs() < 1e-4);
        }
    }

    #[test]
    fn test_predictive_interception() {
        let ball = Ball::new((400.0, 250.0), (2.0, 0.0), 10.0);
        let w = view(ball, (200.0, 250.0), (700.0, 250.0));
        let ctrl = controller(TeamSide::Home, ControllerStyle::Heuristic);
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        let decision = ctrl.decide(&w, &mut rng);
        assert!(!decision.kick);
        assert!(approx(decision.movement, (3.5, 0.0)));
    }

    #[test]
    fn test_prediction_clamped_inside_margin() {
        // predicted x = 700 + 8 * 10 = 780, clamped to 770
        let ball = Ball::new((700.0, 250.0), (10.0, 0.0), 10.0);
        let w = view(ball, (740.0, 250.0), (400.0, 100.0));
        let ctrl = controller(TeamSide::Home, ControllerStyle::Heuristic);
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        let decision = ctrl.decide(&w, &mut rng);
        assert!(approx(decision.movement, (3.5, 0.0)));

        let w = view(ball, (770.0, 250.0), (400.0, 100.0));
        let decision = ctrl.decide(&w, &mut rng);
        assert_eq!(decision, Decision::IDLE);
    }

    #[test]
    fn test_race_to_ball_speed() {
        let ball = Ball::at_rest((400.0, 250.0), 10.0);
        let ctrl = controller(TeamSide::Home, ControllerStyle::Minimax);
        let mut rng = ChaCha8Rng::seed_from_u64(5);

        let closer = view(ball, (300.0, 250.0), (600.0, 250.0));
        let speed = geometry::length(ctrl.decide(&closer, &mut rng).movement);
        assert!((speed - 3.5).abs() < 1e-4);

        let trailing = view(ball, (200.0, 250.0), (450.0, 250.0));
        let speed = geometry::length(ctrl.decide(&trailing, &mut rng).movement);
        assert!((speed - 3.5 * 0.95).abs() < 1e-4);

        let tied = view(ball, (300.0, 250.0), (500.0, 250.0));
        let speed = geometry::length(ctrl.decide(&tied, &mut rng).movement);
        assert!((speed - 3.5 * 0.95).abs() < 1e-4);
    }

    #[test]
    fn test_defensive_stance() {
        let ball = Ball::at_rest((400.0, 250.0), 10.0);
        let ctrl = controller(TeamSide::Home, ControllerStyle::Dqn);
        let mut rng = ChaCha8Rng::seed_from_u64(9);

        // opponent on the ball: cover the midpoint of ball and own goal (205, 250)
        let pressed = view(ball, (300.0, 150.0), (415.0, 250.0));
        let decision = ctrl.decide(&pressed, &mut rng);
        let expected = seek((300.0, 150.0), (205.0, 250.0), 3.5 * 0.95);
        assert!(approx(decision.movement, expected));

        // opponent close but not closer than us: normal interception
        let contested = view(ball, (378.0, 250.0), (400.0, 274.0));
        let decision = ctrl.decide(&contested, &mut rng);
        assert!(approx(decision.movement, (3.5, 0.0)));

        // opponent closer but beyond the trigger distance
        let loose = view(ball, (200.0, 250.0), (440.0, 250.0));
        let decision = ctrl.decide(&loose, &mut rng);
        assert!(approx(decision.movement, (3.5, 0.0)));
    }

    #[test]
    fn test_same_seed_same_decision() {
        let profile = SteeringProfile::new(ControllerStyle::Dqn, Difficulty::Easy);
        let ctrl = SteeringController::new(TeamSide::Away, profile, &MatchConfig::default());
        let w = view(Ball::new((380.0, 240.0), (1.0, 2.0), 10.0), (150.0, 250.0), (650.0, 250.0));

        let mut a = ChaCha8Rng::seed_from_u64(42);
        let mut b = ChaCha8Rng::seed_from_u64(42);
        for _ in 0..100 {
            assert_eq!(ctrl.decide(&w, &mut a), ctrl.decide(&w, &mut b));
        }
    }

    mod proptests {
        use crate::engine::actor::Actor;
        use crate::engine::ball::Ball;
        use crate::engine::config::{ControllerStyle, Difficulty, MatchConfig, SteeringProfile};
        use crate::engine::geometry;
        use crate::engine::steering::{SteeringController, WorldView};
        use crate::engine::types::TeamSide;
        use proptest::prelude::*;
        use rand::SeedableRng;
        use rand_chacha::ChaCha8Rng;

        fn style() -> impl Strategy<Value = ControllerStyle> {
            prop_oneof![
                Just(ControllerStyle::Minimax),
                Just(ControllerStyle::Dqn),
                Just(ControllerStyle::Heuristic),
            ]
        }

        proptest! {
            /// Property: movement never exceeds actor speed and is never NaN
            #[test]
            fn prop_speed_cap(
                style in style(),
                error_rate in 0.0f32..=1.0f32,
                ball in (10.0f32..790.0f32, 10.0f32..490.0f32),
                vel in (-10.0f32..10.0f32, -10.0f32..10.0f32),
                home in (20.0f32..780.0f32, 20.0f32..480.0f32),
                away in (20.0f32..780.0f32, 20.0f32..480.0f32),
                seed in any::<u64>()
            ) {
                let config = MatchConfig::default();
                let mut profile = SteeringProfile::new(style, Difficulty::Medium);
                profile.error_rate = error_rate;
                let w = WorldView {
                    ball: Ball::new(ball, vel, 10.0),
                    home: Actor::new(TeamSide::Home, home, &config),
                    away: Actor::new(TeamSide::Away, away, &config),
                };
                let mut rng = ChaCha8Rng::seed_from_u64(seed);
                for side in TeamSide::BOTH {
                    let decision = SteeringController::new(side, profile, &config).decide(&w, &mut rng);
                    prop_assert!(decision.movement.0.is_finite() && decision.movement.1.is_finite());
                    prop_assert!(geometry::length(decision.movement) <= 3.5 + 1e-4);
                }
            }
        }
    }
}
