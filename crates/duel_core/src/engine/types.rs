//! Side identifiers and per-side storage

use serde::{Deserialize, Serialize};

/// The two sides of a duel.
///
/// Home kicks off from the left column, defends the left goal (x = 0) and
/// attacks the right one. Away mirrors that.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TeamSide {
    Home,
    Away,
}

impl TeamSide {
    pub const BOTH: [TeamSide; 2] = [TeamSide::Home, TeamSide::Away];

    pub fn opponent(self) -> TeamSide {
        match self {
            TeamSide::Home => TeamSide::Away,
            TeamSide::Away => TeamSide::Home,
        }
    }
}

/// A value held for each side.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct PerSide<T> {
    pub home: T,
    pub away: T,
}

impl<T> PerSide<T> {
    pub fn new(home: T, away: T) -> Self {
        Self { home, away }
    }

    pub fn get(&self, side: TeamSide) -> &T {
        match side {
            TeamSide::Home => &self.home,
            TeamSide::Away => &self.away,
        }
    }

    pub fn get_mut(&mut self, side: TeamSide) -> &mut T {
        match side {
            TeamSide::Home => &mut self.home,
            TeamSide::Away => &mut self.away,
        }
    }

    pub fn map<U>(self, mut f: impl FnMut(TeamSide, T) -> U) -> PerSide<U> {
        PerSide { home: f(TeamSide::Home, self.home), away: f(TeamSide::Away, self.away) }
    }
}

impl<T: Copy + std::ops::Add<Output = T>> PerSide<T> {
    pub fn total(&self) -> T {
        self.home + self.away
    }
}
