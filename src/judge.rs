//! # Local Judge
//!
//! An in-process stand-in for the maze server. It knows the whole maze,
//! reports the agent's position and the walls around its tile, and moves the
//! agent to the center of an adjacent open tile whenever a `toward` command
//! names one. Movement is instantaneous, so one command resolves per cycle.

use crate::agent::Agent;
use crate::config::AgentConfig;
use crate::geometry::{Tile, tile_of};
use crate::maze::Maze;
use crate::protocol;
use serde::Serialize;
use std::collections::{HashSet, VecDeque};
use tracing::debug;

pub trait Judge {
    /// Observation lines for the current state.
    fn sense(&self) -> Vec<String>;
    /// Applies one line written by the agent.
    fn command(&mut self, line: &str);
}

pub struct LocalJudge {
    maze: Maze,
    agent: Tile,
    moves: usize,
    bumps: usize,
    trail: Vec<Tile>,
}

impl LocalJudge {
    pub fn new(maze: Maze, start: Tile) -> Self {
        Self {
            maze,
            agent: start,
            moves: 0,
            bumps: 0,
            trail: vec![start],
        }
    }

    pub fn agent(&self) -> Tile {
        self.agent
    }

    pub fn maze(&self) -> &Maze {
        &self.maze
    }

    pub fn moves(&self) -> usize {
        self.moves
    }

    /// Commands that named a tile the agent could not step into.
    pub fn bumps(&self) -> usize {
        self.bumps
    }

    pub fn trail(&self) -> &[Tile] {
        &self.trail
    }
}

impl Judge for LocalJudge {
    fn sense(&self) -> Vec<String> {
        let c = self.agent.center();
        let mut lines = vec![format!("bot {:.6} {:.6} 0", c.x, c.y)];
        for w in self.maze.walls_around(self.agent) {
            let (a, b) = (w.start(), w.end());
            lines.push(format!(
                "wall {:.6} {:.6} {:.6} {:.6}",
                a.x as f64, a.y as f64, b.x as f64, b.y as f64
            ));
        }
        lines
    }

    fn command(&mut self, line: &str) {
        let Some(p) = protocol::parse_toward(line) else {
            return;
        };
        let target = tile_of(p);
        if target == self.agent {
            return;
        }
        if self.maze.is_open(self.agent, target) {
            self.agent = target;
            self.moves += 1;
            self.trail.push(target);
        } else {
            debug!("bump: {} -> {}", self.agent, target);
            self.bumps += 1;
        }
    }
}

/// Result of one simulated run.
#[derive(Clone, Debug, Serialize)]
pub struct Episode {
    pub width: i32,
    pub height: i32,
    pub cycles: u64,
    /// Cycle on which the goal was first reached.
    pub solved_at: Option<u64>,
    pub solves: usize,
    pub moves: usize,
    pub bumps: usize,
    pub explored: usize,
    pub route: Vec<Tile>,
    pub exhausted: bool,
    #[serde(skip)]
    pub trail: Vec<Tile>,
    #[serde(skip)]
    pub dead: Vec<Tile>,
}

/// Runs the agent against `maze` from `start` until it has reached the goal
/// `solves` times or `max_cycles` have elapsed.
///
/// # Returns
///
/// The episode summary. `solved_at` is the cycle of the first goal arrival,
/// and `trail` lists every tile the judge moved the agent through.
pub fn run_episode(
    maze: Maze,
    start: Tile,
    config: AgentConfig,
    solves: usize,
    max_cycles: u64,
) -> std::io::Result<Episode> {
    let (width, height) = (maze.width, maze.height);
    let mut judge = LocalJudge::new(maze, start);
    let mut agent = Agent::new(config, VecDeque::new(), Vec::<u8>::new());
    let mut solved_at = None;

    while agent.cycles() < max_cycles {
        agent.source_mut().extend(judge.sense());
        agent.cycle()?;
        let out = std::mem::take(agent.output_mut());
        for line in String::from_utf8_lossy(&out).lines() {
            judge.command(line);
        }
        let planner = agent.controller().planner();
        if solved_at.is_none() && planner.is_solved() {
            solved_at = Some(agent.cycles());
        }
        if planner.solves() >= solves || planner.is_exhausted() {
            break;
        }
    }

    let planner = agent.controller().planner();
    let explored: HashSet<Tile> = judge.trail().iter().copied().collect();
    let mut dead: Vec<Tile> = planner.dead().iter().copied().collect();
    dead.sort();
    Ok(Episode {
        width,
        height,
        cycles: agent.cycles(),
        solved_at,
        solves: planner.solves(),
        moves: judge.moves(),
        bumps: judge.bumps(),
        explored: explored.len(),
        route: planner.path().to_vec(),
        exhausted: planner.is_exhausted(),
        trail: judge.trail().to_vec(),
        dead,
    })
}
