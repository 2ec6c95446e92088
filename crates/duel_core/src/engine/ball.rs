//! Ball state and integration

use crate::engine::config::MatchConfig;
use crate::engine::geometry::{self, Vec2};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Ball {
    pub position: Vec2,
    pub velocity: Vec2,
    pub radius: f32,
}

impl Ball {
    pub fn new(position: Vec2, velocity: Vec2, radius: f32) -> Self {
        Self { position, velocity, radius }
    }

    /// Ball at rest
    pub fn at_rest(position: Vec2, radius: f32) -> Self {
        Self::new(position, (0.0, 0.0), radius)
    }

    pub fn speed(&self) -> f32 {
        geometry::length(self.velocity)
    }

    /// Advance one tick.
    ///
    /// Position moves by the current velocity, then friction scales the
    /// velocity, so friction lags the move by one tick. Touchlines bounce with
    /// restitution; the ends are left to goal detection.
    pub fn integrate(&mut self, config: &MatchConfig) {
        self.position = geometry::add(self.position, self.velocity);
        self.velocity = geometry::scale(self.velocity, config.ball.friction);

        let min_y = self.radius;
        let max_y = config.field.height - self.radius;
        if self.position.1 < min_y || self.position.1 > max_y {
            self.velocity.1 *= -config.ball.wall_restitution;
            self.position.1 = self.position.1.clamp(min_y, max_y);
        }
    }

    /// Straight-line extrapolation `ticks` ahead, ignoring friction and walls
    pub fn predict(&self, ticks: u32) -> Vec2 {
        geometry::add(self.position, geometry::scale(self.velocity, ticks as f32))
    }
}
