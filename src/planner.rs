//! # Depth-First Exploration Planner
//!
//! Decides, one tile at a time, where the agent should go next. The planner
//! keeps the current DFS route from home as a stack; the top of the stack is
//! always the tile the agent is being steered toward.
//!
//! Each time the agent reaches the stack top the planner:
//!
//! 1. marks the tile as seen;
//! 2. on a return to home, restarts the pass (seen = {home}) and re-opens the
//!    goal if an earlier solve had closed it;
//! 3. on reaching the goal, closes every tile that is not on the current
//!    route, so later passes only retrace the route;
//! 4. tries the neighbors in [`Direction::PRIORITY`] order and moves to the
//!    first one that is neither closed nor walled off;
//! 5. otherwise marks the tile dead and retreats one step.
//!
//! Edges without sensor data are treated as open. With incomplete sensing the
//! planner can pick a neighbor that is actually walled off, in which case the
//! agent never arrives there and no further decision is made.

use crate::config::MazeConfig;
use crate::geometry::{Direction, Tile};
use crate::knowledge::WallKnowledge;
use std::collections::HashSet;
use tracing::{debug, info};

/// What one planning step did to the route.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Step {
    /// A fresh neighbor was pushed onto the route.
    Advance { from: Tile, to: Tile, dir: Direction },
    /// The chosen neighbor was already on the route (after a seen reset);
    /// the route was cut back to it.
    Retrace { from: Tile, to: Tile, dir: Direction },
    /// No neighbor qualified; `from` is dead and the route shrank by one.
    /// `to` is `None` once the route is exhausted.
    Backtrack { from: Tile, to: Option<Tile> },
}

impl Step {
    /// The tile the agent should head for after this step.
    pub fn target(&self) -> Option<Tile> {
        match *self {
            Step::Advance { to, .. } | Step::Retrace { to, .. } => Some(to),
            Step::Backtrack { to, .. } => to,
        }
    }
}

#[derive(Clone, Debug)]
pub struct Planner {
    maze: MazeConfig,
    path: Vec<Tile>,
    seen: HashSet<Tile>,
    dead: HashSet<Tile>,
    home: Option<Tile>,
    steps: usize,
    solves: usize,
}

impl Planner {
    pub fn new(maze: MazeConfig) -> Self {
        Self {
            maze,
            path: vec![],
            seen: HashSet::new(),
            dead: HashSet::new(),
            home: None,
            steps: 0,
            solves: 0,
        }
    }

    /// Roots the search at `tile`. Only the first call has any effect; the
    /// home tile is fixed for the run.
    pub fn seed(&mut self, tile: Tile) -> bool {
        if self.home.is_some() || !self.path.is_empty() {
            return false;
        }
        info!("home seeded at {}", tile);
        self.home = Some(tile);
        self.path.push(tile);
        self.seen.clear();
        self.seen.insert(tile);
        true
    }

    pub fn target(&self) -> Option<Tile> {
        self.path.last().copied()
    }

    pub fn path(&self) -> &[Tile] {
        &self.path
    }

    pub fn seen(&self) -> &HashSet<Tile> {
        &self.seen
    }

    pub fn dead(&self) -> &HashSet<Tile> {
        &self.dead
    }

    pub fn home(&self) -> Option<Tile> {
        self.home
    }

    pub fn goal(&self) -> Tile {
        self.maze.goal
    }

    pub fn maze(&self) -> &MazeConfig {
        &self.maze
    }

    /// Number of planning steps taken so far.
    pub fn steps(&self) -> usize {
        self.steps
    }

    /// How many times the goal has been reached.
    pub fn solves(&self) -> usize {
        self.solves
    }

    pub fn is_solved(&self) -> bool {
        self.solves > 0
    }

    /// True once the route has been seeded and then emptied by backtracking.
    pub fn is_exhausted(&self) -> bool {
        self.home.is_some() && self.path.is_empty()
    }

    /// Tiles the planner will not move into: outside the maze, dead, or
    /// already seen in this pass.
    pub fn is_blocked(&self, t: Tile) -> bool {
        !self.maze.contains(t) || self.dead.contains(&t) || self.seen.contains(&t)
    }

    /// Runs one planning step if the agent stands on the route's top tile.
    ///
    /// # Arguments
    ///
    /// * `current` - the tile the agent last arrived at.
    /// * `walls` - everything known about walls so far; unknown edges are open.
    ///
    /// # Returns
    ///
    /// The step taken, or `None` when the agent is still travelling, the
    /// planner has not been seeded, or the route is exhausted.
    pub fn plan<K: WallKnowledge>(&mut self, current: Tile, walls: &K) -> Option<Step> {
        if self.target() != Some(current) {
            return None;
        }
        self.seen.insert(current);

        if Some(current) == self.home && self.steps > 0 {
            info!("back at home {}, restarting pass", current);
            self.seen.clear();
            self.seen.insert(current);
            self.dead.remove(&self.maze.goal);
        }

        if current == self.maze.goal {
            self.solves += 1;
            info!(
                "goal {} reached (solve #{}, route length {})",
                current,
                self.solves,
                self.path.len()
            );
            let route: HashSet<Tile> = self.path.iter().copied().collect();
            self.dead = self.maze.tiles().filter(|t| !route.contains(t)).collect();
            self.seen.clear();
        }

        self.steps += 1;
        let step = match self.select(current, walls) {
            Some((dir, next)) => {
                if let Some(i) = self.path.iter().position(|&t| t == next) {
                    self.path.truncate(i + 1);
                    Step::Retrace {
                        from: current,
                        to: next,
                        dir,
                    }
                } else {
                    self.path.push(next);
                    Step::Advance {
                        from: current,
                        to: next,
                        dir,
                    }
                }
            }
            None => {
                self.dead.insert(current);
                self.path.pop();
                if self.path.is_empty() {
                    info!("search exhausted at {}; idling", current);
                }
                Step::Backtrack {
                    from: current,
                    to: self.target(),
                }
            }
        };
        debug!("step {}: {:?}", self.steps, step);
        Some(step)
    }

    fn select<K: WallKnowledge>(&self, current: Tile, walls: &K) -> Option<(Direction, Tile)> {
        if self.seen.is_empty() {
            return None;
        }
        current
            .neighbors()
            .find(|&(_, n)| !self.is_blocked(n) && !walls.is_wall(current, n))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::{Wall, wall_between};
    use crate::knowledge::WallSet;

    fn assert_route_invariant(p: &Planner) {
        let path = p.path();
        for w in path.windows(2) {
            assert!(w[0].is_adjacent(w[1]), "{} and {} not adjacent", w[0], w[1]);
        }
        let uniq: HashSet<_> = path.iter().collect();
        assert_eq!(uniq.len(), path.len(), "repeated tile in {:?}", path);
    }

    #[test]
    fn open_grid_walks_down_first_then_right() {
        let maze = MazeConfig::default();
        let walls = WallSet::with_boundary(&maze);
        let mut p = Planner::new(maze);
        assert!(p.seed(Tile::new(0, 0)));
        for _ in 0..11 {
            let t = p.target().unwrap();
            p.plan(t, &walls);
            assert_route_invariant(&p);
        }
        let expected: Vec<Tile> = (0..=10)
            .map(|r| Tile::new(0, r))
            .chain(std::iter::once(Tile::new(1, 10)))
            .collect();
        assert_eq!(p.path(), expected.as_slice());
    }

    #[test]
    fn wall_below_selects_right() {
        let maze = MazeConfig::default();
        let mut walls = WallSet::with_boundary(&maze);
        walls.insert(Wall::from_coords(3, 4, 4, 4));
        let mut p = Planner::new(maze);
        p.seed(Tile::new(3, 3));
        let step = p.plan(Tile::new(3, 3), &walls).unwrap();
        assert_eq!(
            step,
            Step::Advance {
                from: Tile::new(3, 3),
                to: Tile::new(4, 3),
                dir: Direction::Right,
            }
        );
        assert_eq!(p.target(), Some(Tile::new(4, 3)));
    }

    #[test]
    fn surrounded_tile_is_marked_dead_and_popped() {
        let maze = MazeConfig::default();
        let walls = WallSet::with_boundary(&maze);
        let mut p = Planner::new(maze);
        p.seed(Tile::new(5, 5));
        p.plan(Tile::new(5, 5), &walls);
        assert_eq!(p.target(), Some(Tile::new(5, 6)));
        // box (5,6) in: dead below and right, seen/dead on the other sides
        p.dead.extend([Tile::new(5, 7), Tile::new(6, 6), Tile::new(4, 6)]);
        let step = p.plan(Tile::new(5, 6), &walls).unwrap();
        assert_eq!(
            step,
            Step::Backtrack {
                from: Tile::new(5, 6),
                to: Some(Tile::new(5, 5)),
            }
        );
        assert!(p.dead().contains(&Tile::new(5, 6)));
        assert_eq!(p.path(), &[Tile::new(5, 5)]);
    }

    #[test]
    fn plan_waits_until_target_is_reached() {
        let maze = MazeConfig::default();
        let walls = WallSet::with_boundary(&maze);
        let mut p = Planner::new(maze);
        assert_eq!(p.plan(Tile::new(0, 0), &walls), None);
        p.seed(Tile::new(0, 0));
        p.plan(Tile::new(0, 0), &walls);
        assert_eq!(p.plan(Tile::new(0, 0), &walls), None);
        assert_eq!(p.steps(), 1);
    }

    #[test]
    fn seed_only_once() {
        let mut p = Planner::new(MazeConfig::default());
        assert!(p.seed(Tile::new(2, 2)));
        assert!(!p.seed(Tile::new(3, 3)));
        assert_eq!(p.home(), Some(Tile::new(2, 2)));
        assert_eq!(p.seen().len(), 1);
    }

    /// A 3x1 corridor: home at the left end, goal at the right end.
    fn corridor() -> (Planner, WallSet) {
        let maze = MazeConfig::new(3, 1);
        let walls = WallSet::with_boundary(&maze);
        let mut p = Planner::new(maze);
        p.seed(Tile::new(0, 0));
        (p, walls)
    }

    #[test]
    fn goal_closes_everything_off_route_and_shuttles() {
        let maze = MazeConfig::new(3, 2);
        let mut walls = WallSet::with_boundary(&maze);
        // bottom row is a dead-end spur hanging off (0,0)
        walls.insert(wall_between(Tile::new(1, 0), Tile::new(1, 1)).unwrap());
        walls.insert(wall_between(Tile::new(2, 0), Tile::new(2, 1)).unwrap());
        walls.insert(wall_between(Tile::new(0, 1), Tile::new(1, 1)).unwrap());
        let maze = maze.with_goal(Tile::new(2, 0));
        let mut p = Planner::new(maze);
        p.seed(Tile::new(0, 0));

        let mut targets = vec![];
        for _ in 0..40 {
            let t = p.target().unwrap();
            p.plan(t, &walls);
            assert_route_invariant(&p);
            targets.push(p.target().unwrap());
            if p.solves() == 1 && p.target() == Some(Tile::new(2, 0)) {
                break;
            }
        }
        assert_eq!(p.solves(), 1);
        let t = p.target().unwrap();
        p.plan(t, &walls);
        assert_eq!(p.solves(), 2);

        // right after the goal: dead = grid minus route
        let route: HashSet<Tile> = p.path().iter().copied().collect();
        let complement: HashSet<Tile> = maze.tiles().filter(|t| !route.contains(t)).collect();
        assert_eq!(p.dead(), &complement);

        let solution = [Tile::new(0, 0), Tile::new(1, 0), Tile::new(2, 0)];
        for _ in 0..20 {
            let t = p.target().unwrap();
            p.plan(t, &walls);
            assert_route_invariant(&p);
            assert!(solution.contains(&p.target().unwrap()));
        }
        assert!(!p.is_exhausted());
    }

    #[test]
    fn home_reentry_reopens_goal_only() {
        let (mut p, walls) = corridor();
        // walk to the goal
        while !p.is_solved() {
            let t = p.target().unwrap();
            p.plan(t, &walls);
        }
        assert!(p.dead().contains(&Tile::new(2, 0)));
        // retreat to home
        while p.target() != Some(Tile::new(0, 0)) {
            let t = p.target().unwrap();
            p.plan(t, &walls);
        }
        let dead_before: HashSet<Tile> = p.dead().clone();
        p.plan(Tile::new(0, 0), &walls);
        assert!(!p.dead().contains(&Tile::new(2, 0)));
        let mut expected = dead_before;
        expected.remove(&Tile::new(2, 0));
        assert_eq!(p.dead(), &expected);
        assert_eq!(p.target(), Some(Tile::new(1, 0)));
    }

    #[test]
    fn dead_end_maze_exhausts_without_panicking() {
        // goal sealed off from home by a wall
        let maze = MazeConfig::new(2, 1);
        let mut walls = WallSet::with_boundary(&maze);
        walls.insert(Wall::from_coords(1, 0, 1, 1));
        let mut p = Planner::new(maze);
        p.seed(Tile::new(0, 0));
        let step = p.plan(Tile::new(0, 0), &walls).unwrap();
        assert_eq!(
            step,
            Step::Backtrack {
                from: Tile::new(0, 0),
                to: None,
            }
        );
        assert!(p.is_exhausted());
        assert_eq!(p.target(), None);
        assert_eq!(p.plan(Tile::new(0, 0), &walls), None);
        assert!(!p.seed(Tile::new(0, 0)));
    }

    #[test]
    fn dead_set_only_grows_between_resets() {
        let maze = MazeConfig::new(5, 5);
        let mut walls = WallSet::with_boundary(&maze);
        // a comb: vertical walls between columns except along the top row
        for col in 1..5 {
            walls.insert(Wall::from_coords(col, 1, col, 5));
        }
        let mut p = Planner::new(maze);
        p.seed(Tile::new(0, 0));
        let mut prev = p.dead().clone();
        while !p.is_solved() {
            let t = p.target().unwrap();
            p.plan(t, &walls);
            assert_route_invariant(&p);
            if !p.is_solved() {
                assert!(prev.is_subset(p.dead()));
            }
            prev = p.dead().clone();
        }
    }
}
