//! Match engine: tick orchestration and match lifecycle
//!
//! ## Tick order
//! 1. Freeze a `WorldView` of ball and actors
//! 2. Both controllers decide against that view (home first, then away)
//! 3. Apply both movements
//! 4. Resolve kicks, away first then home, so home wins a double kick
//! 5. Integrate the ball
//! 6. Goal check, with a full restart on a goal
//! 7. Possession: each side within `possession_radius` of the ball scores a
//!    tick (both sides can in the same tick)
//!
//! All randomness flows through one `ChaCha8Rng` seeded at construction, so a
//! `(config, matchup, difficulty, seed)` tuple replays exactly.

use crate::engine::actor::Actor;
use crate::engine::ball::Ball;
use crate::engine::config::{Difficulty, MatchConfig, Matchup, SteeringProfile};
use crate::engine::geometry;
use crate::engine::goal::{GoalEvent, Goals};
use crate::engine::kick::{self, KickEvent};
use crate::engine::match_state::MatchState;
use crate::engine::snapshot::{MatchObserver, MatchSnapshot, TickOutcome};
use crate::engine::steering::{SteeringController, WorldView};
use crate::engine::types::{PerSide, TeamSide};
use crate::error::Result;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};
use std::f32::consts::TAU;

/// End-of-run statistics
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchSummary {
    pub seed: u64,
    pub matchup: Matchup,
    pub difficulty: Difficulty,
    pub ticks: u64,
    pub score: PerSide<u32>,
    pub total_goals: PerSide<u32>,
    pub possession_ticks: PerSide<u64>,
    pub possession: PerSide<f64>,
    pub shots: PerSide<u32>,
    pub shots_on_goal: PerSide<u32>,
    pub goals: Vec<GoalEvent>,
    /// `None` on a draw
    pub winner: Option<TeamSide>,
}

pub struct MatchEngine {
    config: MatchConfig,
    matchup: Matchup,
    difficulty: Difficulty,
    profiles: PerSide<SteeringProfile>,
    controllers: PerSide<SteeringController>,
    goals: Goals,
    ball: Ball,
    actors: PerSide<Actor>,
    state: MatchState,
    goal_log: Vec<GoalEvent>,
    rng: ChaCha8Rng,
    seed: u64,
}

impl MatchEngine {
    /// Validate `config` and kick off a new match
    pub fn new(config: MatchConfig, matchup: Matchup, difficulty: Difficulty, seed: u64) -> Result<Self> {
        config.validate()?;

        let profiles = preset_profiles(matchup, difficulty);
        let goals = Goals::new(&config.field);
        let actors = PerSide::new(
            Actor::new(TeamSide::Home, config.actor.start_position(TeamSide::Home, &config.field), &config),
            Actor::new(TeamSide::Away, config.actor.start_position(TeamSide::Away, &config.field), &config),
        );
        let mut engine = Self {
            controllers: build_controllers(&profiles, &config),
            profiles,
            goals,
            ball: Ball::at_rest(config.field.center(), config.ball.radius),
            actors,
            state: MatchState::default(),
            goal_log: Vec::new(),
            rng: ChaCha8Rng::seed_from_u64(seed),
            config,
            matchup,
            difficulty,
            seed,
        };
        engine.start_match();
        Ok(engine)
    }

    /// Replace the preset profiles with custom ones for the current match.
    ///
    /// A later `reset` goes back to the presets of its matchup.
    pub fn with_profiles(mut self, profiles: PerSide<SteeringProfile>) -> Result<Self> {
        profiles.home.validate()?;
        profiles.away.validate()?;
        self.controllers = build_controllers(&profiles, &self.config);
        self.profiles = profiles;
        Ok(self)
    }

    /// Start a new match for `matchup` at `difficulty`.
    ///
    /// Per-match goals, possession and shot counters restart; all-time goals
    /// are kept. The RNG stream continues.
    pub fn reset(&mut self, matchup: Matchup, difficulty: Difficulty) -> MatchSnapshot {
        self.matchup = matchup;
        self.difficulty = difficulty;
        self.profiles = preset_profiles(matchup, difficulty);
        self.controllers = build_controllers(&self.profiles, &self.config);
        self.start_match();
        self.snapshot()
    }

    fn start_match(&mut self) {
        self.state.start_new_match();
        self.goal_log.clear();
        for side in TeamSide::BOTH {
            let start = self.config.actor.start_position(side, &self.config.field);
            let actor = self.actors.get_mut(side);
            actor.reset_stats();
            actor.place(start, &self.config);
        }
        self.ball = self.serve_ball(self.config.restart.kickoff_speed);
        log::info!(
            "New match #{}: {} ({}), seed {}",
            self.state.matches_played,
            self.matchup,
            self.difficulty,
            self.seed
        );
    }

    /// Advance the match by one tick
    pub fn tick(&mut self) -> TickOutcome {
        let view = WorldView { ball: self.ball, home: self.actors.home, away: self.actors.away };
        let decisions = PerSide::new(
            self.controllers.home.decide(&view, &mut self.rng),
            self.controllers.away.decide(&view, &mut self.rng),
        );

        for side in TeamSide::BOTH {
            self.actors.get_mut(side).move_by(decisions.get(side).movement, &self.config);
        }

        let mut kicks: Vec<KickEvent> = Vec::new();
        for side in KICK_ORDER {
            let event = kick::try_kick(
                self.actors.get_mut(side),
                decisions.get(side),
                &mut self.ball,
                self.profiles.get(side).kick_power,
                self.goals.attacking_goal(side),
                &self.config,
                &mut self.rng,
            );
            kicks.extend(event);
        }

        self.ball.integrate(&self.config);
        self.state.advance_tick();
        let goal = self.check_goal();

        let ball_pos = self.ball.position;
        let radius = self.config.possession_radius;
        let possession = PerSide::new(
            self.actors.home.distance_to(ball_pos) < radius,
            self.actors.away.distance_to(ball_pos) < radius,
        );
        for side in TeamSide::BOTH {
            if *possession.get(side) {
                self.state.record_possession(side);
            }
        }

        TickOutcome { kicks, goal, possession }
    }

    /// Resolve the ball against both goal strips; on a goal, update the
    /// score and restart play.
    pub fn check_goal(&mut self) -> Option<GoalEvent> {
        let position = self.ball.position;
        let scorer = self.goals.check_ball(&mut self.ball, self.config.ball.wall_restitution)?;

        self.state.record_goal(scorer);
        let event = GoalEvent { scorer, tick: self.state.elapsed_ticks, position };
        self.goal_log.push(event);
        log::debug!(
            "Goal for {:?} at tick {} ({}-{})",
            scorer,
            event.tick,
            self.state.match_goals.home,
            self.state.match_goals.away
        );

        self.restart_after_goal();
        Some(event)
    }

    fn restart_after_goal(&mut self) {
        self.ball = self.serve_ball(self.config.restart.restart_speed);
        let (jitter_x, jitter_y) = self.config.actor.restart_jitter;
        for side in TeamSide::BOTH {
            let start = self.config.actor.start_position(side, &self.config.field);
            let dx = draw_jitter(&mut self.rng, jitter_x);
            let dy = draw_jitter(&mut self.rng, jitter_y);
            self.actors.get_mut(side).place(geometry::add(start, (dx, dy)), &self.config);
        }
    }

    /// Ball at field center with a random heading and a speed from `speed`
    fn serve_ball(&mut self, speed: (f32, f32)) -> Ball {
        let heading = self.rng.gen_range(0.0..TAU);
        let speed = draw_range(&mut self.rng, speed);
        Ball::new(
            self.config.field.center(),
            geometry::scale(geometry::from_angle(heading), speed),
            self.config.ball.radius,
        )
    }

    pub fn run(&mut self, ticks: u64) -> MatchSummary {
        for _ in 0..ticks {
            self.tick();
        }
        self.summary()
    }

    /// Run `ticks` ticks, handing every post-tick snapshot to `observer`
    pub fn run_with<O: MatchObserver + ?Sized>(&mut self, observer: &mut O, ticks: u64) -> MatchSummary {
        for _ in 0..ticks {
            let outcome = self.tick();
            let snapshot = self.snapshot();
            if let Some(event) = &outcome.goal {
                observer.on_goal(event, &snapshot);
            }
            observer.on_tick(&snapshot, &outcome);
        }
        self.summary()
    }

    pub fn snapshot(&self) -> MatchSnapshot {
        MatchSnapshot::new(self.ball, &self.actors, &self.state)
    }

    pub fn summary(&self) -> MatchSummary {
        MatchSummary {
            seed: self.seed,
            matchup: self.matchup,
            difficulty: self.difficulty,
            ticks: self.state.elapsed_ticks,
            score: self.state.match_goals,
            total_goals: self.state.total_goals,
            possession_ticks: self.state.possession_ticks,
            possession: PerSide::new(
                self.state.possession_ratio(TeamSide::Home),
                self.state.possession_ratio(TeamSide::Away),
            ),
            shots: self.actors.map(|_, a| a.shots),
            shots_on_goal: self.actors.map(|_, a| a.shots_on_goal),
            goals: self.goal_log.clone(),
            winner: self.state.leader(),
        }
    }

    pub fn config(&self) -> &MatchConfig {
        &self.config
    }

    pub fn matchup(&self) -> Matchup {
        self.matchup
    }

    pub fn difficulty(&self) -> Difficulty {
        self.difficulty
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    pub fn state(&self) -> &MatchState {
        &self.state
    }

    pub fn ball(&self) -> &Ball {
        &self.ball
    }

    pub fn actor(&self, side: TeamSide) -> &Actor {
        self.actors.get(side)
    }

    pub fn controller(&self, side: TeamSide) -> &SteeringController {
        self.controllers.get(side)
    }

    pub fn goal_log(&self) -> &[GoalEvent] {
        &self.goal_log
    }
}

/// Resolution order of same-tick kicks
const KICK_ORDER: [TeamSide; 2] = [TeamSide::Away, TeamSide::Home];

fn preset_profiles(matchup: Matchup, difficulty: Difficulty) -> PerSide<SteeringProfile> {
    PerSide::new(SteeringProfile::new(matchup.home, difficulty), SteeringProfile::new(matchup.away, difficulty))
}

fn build_controllers(profiles: &PerSide<SteeringProfile>, config: &MatchConfig) -> PerSide<SteeringController> {
    profiles.map(|side, profile| SteeringController::new(side, profile, config))
}

fn draw_range<R: Rng + ?Sized>(rng: &mut R, (min, max): (f32, f32)) -> f32 {
    if min < max {
        rng.gen_range(min..=max)
    } else {
        min
    }
}

fn draw_jitter<R: Rng + ?Sized>(rng: &mut R, amount: f32) -> f32 {
    if amount > 0.0 {
        rng.gen_range(-amount..=amount)
    } else {
        0.0
    }
}
