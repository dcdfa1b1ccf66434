//! The exploration controller: all agent state in one owned value.
//!
//! Observations go in through [`Controller::observe`] / [`Controller::ingest_line`],
//! and [`Controller::cycle`] runs the planner when the agent has reached its
//! current target. Nothing here touches process I/O.

use crate::config::MazeConfig;
use crate::geometry::{Position, Tile, has_arrived};
use crate::knowledge::WallSet;
use crate::observation::{self, Observation};
use crate::planner::{Planner, Step};
use tracing::debug;

#[derive(Clone, Debug)]
pub struct Controller {
    arrival_threshold: f64,
    position: Option<Position>,
    tile: Option<Tile>,
    coins: Option<u32>,
    walls: WallSet,
    planner: Planner,
}

impl Controller {
    pub fn new(maze: MazeConfig, arrival_threshold: f64) -> Self {
        Self {
            arrival_threshold,
            position: None,
            tile: None,
            coins: None,
            walls: WallSet::with_boundary(&maze),
            planner: Planner::new(maze),
        }
    }

    /// Parses and applies one input record. Malformed or unknown records are
    /// dropped; returns whether the record was understood.
    pub fn ingest_line(&mut self, line: &str) -> bool {
        match observation::parse(line) {
            Ok(obs) => {
                self.observe(obs);
                true
            }
            Err(e) => {
                debug!("ignoring record {:?}: {}", line.trim_end(), e);
                false
            }
        }
    }

    pub fn observe(&mut self, obs: Observation) {
        match obs {
            Observation::Bot { position, coins } => {
                self.position = Some(position);
                if coins.is_some() {
                    self.coins = coins;
                }
                if let Some(t) = has_arrived(position, self.tile, self.arrival_threshold) {
                    if !self.planner.maze().contains(t) {
                        debug!("ignoring arrival outside the grid at {}", t);
                        return;
                    }
                    debug!("arrived at {}", t);
                    self.tile = Some(t);
                    self.planner.seed(t);
                }
            }
            Observation::Wall(w) => {
                let maze = self.planner.maze();
                let Some(w) = w.clip(maze.width, maze.height) else {
                    debug!("ignoring off-grid wall {}", w);
                    return;
                };
                if self.walls.insert(w) > 0 {
                    debug!("new wall {}", w);
                }
            }
        }
    }

    /// Runs the planner if the tracked tile is the route's top.
    pub fn cycle(&mut self) -> Option<Step> {
        let tile = self.tile?;
        self.planner.plan(tile, &self.walls)
    }

    /// Current steering target, if any.
    pub fn target(&self) -> Option<Tile> {
        self.planner.target()
    }

    pub fn position(&self) -> Option<Position> {
        self.position
    }

    /// Last tile the agent was seen to arrive at.
    pub fn tile(&self) -> Option<Tile> {
        self.tile
    }

    pub fn coins(&self) -> Option<u32> {
        self.coins
    }

    pub fn walls(&self) -> &WallSet {
        &self.walls
    }

    pub fn planner(&self) -> &Planner {
        &self.planner
    }
}
