//! Run-time configuration for the maze and the agent loop.

use crate::geometry::Tile;
use std::time::Duration;
use thiserror::Error;

pub const DEFAULT_SIZE: i32 = 11;
pub const DEFAULT_ARRIVAL_THRESHOLD: f64 = 0.2;
pub const DEFAULT_INTERVAL: Duration = Duration::from_millis(125);
pub const DEFAULT_SETTLE: Duration = Duration::from_millis(250);
pub const DEFAULT_NAME: &str = "DFS-bot";

#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    #[error("maze must be at least 1x1, got {width}x{height}")]
    EmptyMaze { width: i32, height: i32 },
    #[error("goal {goal} lies outside the {width}x{height} maze")]
    GoalOutside { goal: Tile, width: i32, height: i32 },
    #[error("arrival threshold must be in (0, 0.5], got {0}")]
    BadThreshold(f64),
    #[error("agent name must be a single non-empty token, got {0:?}")]
    BadName(String),
}

/// Maze dimensions and the tile that counts as solved.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct MazeConfig {
    pub width: i32,
    pub height: i32,
    pub goal: Tile,
}

impl Default for MazeConfig {
    fn default() -> Self {
        Self::square(DEFAULT_SIZE)
    }
}

impl MazeConfig {
    /// A `width` x `height` maze whose goal is the far corner.
    pub fn new(width: i32, height: i32) -> Self {
        Self {
            width,
            height,
            goal: Tile::new(width - 1, height - 1),
        }
    }

    pub fn square(size: i32) -> Self {
        Self::new(size, size)
    }

    pub fn with_goal(self, goal: Tile) -> Self {
        Self { goal, ..self }
    }

    pub fn contains(&self, t: Tile) -> bool {
        0 <= t.col && t.col < self.width && 0 <= t.row && t.row < self.height
    }

    pub fn tiles(self) -> impl Iterator<Item = Tile> {
        let (w, h) = (self.width, self.height);
        (0..h).flat_map(move |row| (0..w).map(move |col| Tile::new(col, row)))
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.width < 1 || self.height < 1 {
            return Err(ConfigError::EmptyMaze {
                width: self.width,
                height: self.height,
            });
        }
        if !self.contains(self.goal) {
            return Err(ConfigError::GoalOutside {
                goal: self.goal,
                width: self.width,
                height: self.height,
            });
        }
        Ok(())
    }
}

/// When `toward` commands are written.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum EmitPolicy {
    /// Re-emit the current target every cycle.
    #[default]
    EveryCycle,
    /// Emit only on cycles where the planner acted.
    OnPlan,
}

#[derive(Clone, Debug, PartialEq)]
pub struct AgentConfig {
    pub name: String,
    pub maze: MazeConfig,
    pub arrival_threshold: f64,
    pub interval: Duration,
    /// Pause after the greeting so the first observations can arrive.
    pub settle: Duration,
    pub emit: EmitPolicy,
}

impl Default for AgentConfig {
    fn default() -> Self {
        Self {
            name: DEFAULT_NAME.to_string(),
            maze: MazeConfig::default(),
            arrival_threshold: DEFAULT_ARRIVAL_THRESHOLD,
            interval: DEFAULT_INTERVAL,
            settle: DEFAULT_SETTLE,
            emit: EmitPolicy::default(),
        }
    }
}

impl AgentConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.maze.validate()?;
        // Above 0.5 the arrival disc would reach into neighboring tiles.
        if !(self.arrival_threshold > 0.0 && self.arrival_threshold <= 0.5) {
            return Err(ConfigError::BadThreshold(self.arrival_threshold));
        }
        if self.name.is_empty() || self.name.chars().any(char::is_whitespace) {
            return Err(ConfigError::BadName(self.name.clone()));
        }
        Ok(())
    }
}
