//! Kick resolution

use crate::engine::actor::Actor;
use crate::engine::ball::Ball;
use crate::engine::config::MatchConfig;
use crate::engine::geometry::{self, Vec2};
use crate::engine::goal::Goal;
use crate::engine::steering::Decision;
use crate::engine::types::TeamSide;
use rand::Rng;
use serde::{Deserialize, Serialize};

/// A kick that connected
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct KickEvent {
    pub side: TeamSide,
    pub power: f32,
    /// Ball velocity set by the kick
    pub velocity: Vec2,
    pub on_goal: bool,
}

/// Whether the ball is within kicking reach of the actor
pub fn in_reach(actor: &Actor, ball: &Ball, config: &MatchConfig) -> bool {
    actor.distance_to(ball.position) < actor.radius + ball.radius + config.kick.tolerance
}

/// Resolve one actor's kick against the current ball.
///
/// A connecting kick overwrites the ball velocity with `power` along the
/// decision's aim, where `power` is drawn uniformly from `kick_power`. Only
/// draws from `rng` when the kick connects.
pub fn try_kick<R: Rng + ?Sized>(
    actor: &mut Actor,
    decision: &Decision,
    ball: &mut Ball,
    kick_power: (f32, f32),
    attacked: &Goal,
    config: &MatchConfig,
    rng: &mut R,
) -> Option<KickEvent> {
    if !decision.kick || !in_reach(actor, ball, config) {
        return None;
    }

    let (min, max) = kick_power;
    let power = if min < max { rng.gen_range(min..=max) } else { min };
    let aim = decision.aim();
    let direction = geometry::from_angle(aim.1.atan2(aim.0));
    ball.velocity = geometry::scale(direction, power);

    actor.shots += 1;
    let on_goal = attacked.ray_hits_mouth(ball.position, direction);
    if on_goal {
        actor.shots_on_goal += 1;
    }

    log::trace!("{:?} kick: power {:.2}, velocity {:?}, on goal {}", actor.side, power, ball.velocity, on_goal);
    Some(KickEvent { side: actor.side, power, velocity: ball.velocity, on_goal })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::goal::Goals;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn setup() -> (MatchConfig, Goals, ChaCha8Rng) {
        let config = MatchConfig::default();
        let goals = Goals::new(&config.field);
        (config, goals, ChaCha8Rng::seed_from_u64(11))
    }

    #[test]
    fn test_kick_overwrites_velocity() {
        let (config, goals, mut rng) = setup();
        let mut actor = Actor::new(TeamSide::Home, (500.0, 250.0), &config);
        let mut ball = Ball::new((530.0, 250.0), (-9.0, 4.0), 10.0);
        let decision = Decision { movement: (2.8, 0.0), kick: true };

        let event = try_kick(&mut actor, &decision, &mut ball, (7.0, 8.0), goals.attacking_goal(TeamSide::Home), &config, &mut rng)
            .expect("ball is within 35 units");
        assert!(event.power >= 7.0 && event.power <= 8.0);
        assert!((ball.velocity.0 - event.power).abs() < 1e-4);
        assert!(ball.velocity.1.abs() < 1e-4);
        assert!(event.on_goal);
        assert_eq!(actor.shots, 1);
        assert_eq!(actor.shots_on_goal, 1);
    }

    #[test]
    fn test_fixed_power() {
        let (config, goals, mut rng) = setup();
        let mut actor = Actor::new(TeamSide::Away, (300.0, 250.0), &config);
        let mut ball = Ball::at_rest((300.0, 280.0), 10.0);
        let decision = Decision { movement: (0.0, 3.0), kick: true };

        let event = try_kick(&mut actor, &decision, &mut ball, (7.5, 7.5), goals.attacking_goal(TeamSide::Away), &config, &mut rng)
            .unwrap();
        assert_eq!(event.power, 7.5);
        assert!((ball.velocity.1 - 7.5).abs() < 1e-4);
        assert!(!event.on_goal);
        assert_eq!(actor.shots, 1);
        assert_eq!(actor.shots_on_goal, 0);
    }

    #[test]
    fn test_out_of_reach_or_not_wanted() {
        let (config, goals, mut rng) = setup();
        let goal = goals.attacking_goal(TeamSide::Home);
        let mut actor = Actor::new(TeamSide::Home, (500.0, 250.0), &config);

        // exactly at reach (20 + 10 + 5) does not connect
        let mut ball = Ball::at_rest((535.0, 250.0), 10.0);
        let wants = Decision { movement: (1.0, 0.0), kick: true };
        assert!(try_kick(&mut actor, &wants, &mut ball, (7.0, 8.0), goal, &config, &mut rng).is_none());

        let mut ball = Ball::at_rest((510.0, 250.0), 10.0);
        let declines = Decision { movement: (1.0, 0.0), kick: false };
        assert!(try_kick(&mut actor, &declines, &mut ball, (7.0, 8.0), goal, &config, &mut rng).is_none());
        assert_eq!(ball.velocity, (0.0, 0.0));
        assert_eq!(actor.shots, 0);
    }

    #[test]
    fn test_tolerance_extends_reach() {
        let (mut config, _, _) = setup();
        let actor = Actor::new(TeamSide::Home, (500.0, 250.0), &config);
        let ball = Ball::at_rest((533.0, 250.0), 10.0);
        assert!(in_reach(&actor, &ball, &config));
        config.kick.tolerance = 0.0;
        assert!(!in_reach(&actor, &ball, &config));
    }
}
