//! # Wall Knowledge
//!
//! The agent's growing picture of where walls are. Walls are only ever added;
//! an edge that has not been sensed is assumed open.

use crate::config::MazeConfig;
use crate::geometry::{Tile, Wall, wall_between};
use std::collections::HashSet;

/// Query interface the planner uses to decide whether an edge is passable.
pub trait WallKnowledge {
    fn contains(&self, wall: &Wall) -> bool;

    /// True when a known wall separates the adjacent tiles `a` and `b`.
    /// Non-adjacent pairs are always reported as walled.
    fn is_wall(&self, a: Tile, b: Tile) -> bool {
        match wall_between(a, b) {
            Some(w) => self.contains(&w),
            None => true,
        }
    }
}

#[derive(Clone, Debug, Default)]
pub struct WallSet {
    walls: HashSet<Wall>,
}

impl WallSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// A set holding the outer boundary of `maze`.
    pub fn with_boundary(maze: &MazeConfig) -> Self {
        let mut set = Self::new();
        for w in boundary(maze.width, maze.height) {
            set.insert(w);
        }
        set
    }

    /// Records a sensed wall. Segments longer than one unit are stored as
    /// their unit edges. Returns the number of edges that were new.
    pub fn insert(&mut self, wall: Wall) -> usize {
        if wall.is_unit() {
            return self.walls.insert(wall) as usize;
        }
        wall.unit_edges()
            .into_iter()
            .filter(|w| self.walls.insert(*w))
            .count()
    }

    pub fn len(&self) -> usize {
        self.walls.len()
    }

    pub fn is_empty(&self) -> bool {
        self.walls.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Wall> {
        self.walls.iter()
    }
}

impl WallKnowledge for WallSet {
    fn contains(&self, wall: &Wall) -> bool {
        self.walls.contains(wall)
    }
}

impl Extend<Wall> for WallSet {
    fn extend<I: IntoIterator<Item = Wall>>(&mut self, iter: I) {
        for w in iter {
            self.insert(w);
        }
    }
}

/// Unit edges enclosing a `width` x `height` grid.
pub fn boundary(width: i32, height: i32) -> impl Iterator<Item = Wall> {
    let horizontal = (0..width).flat_map(move |i| {
        [
            Wall::from_coords(i, 0, i + 1, 0),
            Wall::from_coords(i, height, i + 1, height),
        ]
    });
    let vertical = (0..height).flat_map(move |i| {
        [
            Wall::from_coords(0, i, 0, i + 1),
            Wall::from_coords(width, i, width, i + 1),
        ]
    });
    horizontal.chain(vertical)
}
