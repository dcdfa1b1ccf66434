//! # Random Maze Generation
//!
//! Carves a perfect maze (exactly one route between any two tiles) with a
//! randomized depth-first search: start on a random tile, repeatedly knock
//! down the wall to a random unvisited neighbor, and back up when stuck.
//! Every wall left standing is emitted as a unit segment.

use crate::geometry::{Direction, Tile, wall_between};
use crate::maze::Maze;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha20Rng;
use std::collections::HashSet;

/// Generates a `width` x `height` maze. The same seed always yields the same
/// maze; `None` draws a seed from the OS.
pub fn generate(width: i32, height: i32, seed: Option<u64>) -> Maze {
    let mut rng = match seed {
        Some(s) => ChaCha20Rng::seed_from_u64(s),
        None => ChaCha20Rng::from_os_rng(),
    };
    carve(width, height, &mut rng)
}

fn carve<R: Rng>(width: i32, height: i32, rng: &mut R) -> Maze {
    let (w, h) = (width.max(1), height.max(1));
    let mut visited = mat![false; h as usize; w as usize];
    let mut open = HashSet::new();

    let start = Tile::new(rng.random_range(0..w), rng.random_range(0..h));
    visited[start.row as usize][start.col as usize] = true;
    let mut stack = vec![start];
    while let Some(&cur) = stack.last() {
        let mut dirs = Direction::PRIORITY;
        dirs.shuffle(rng);
        let next = dirs.into_iter().map(|d| cur.step(d)).find(|n| {
            0 <= n.col && n.col < w && 0 <= n.row && n.row < h && !visited[n.row as usize][n.col as usize]
        });
        match next {
            Some(n) => {
                visited[n.row as usize][n.col as usize] = true;
                open.extend(wall_between(cur, n));
                stack.push(n);
            }
            None => {
                stack.pop();
            }
        }
    }

    let mut walls = vec![];
    for row in 0..h {
        for col in 0..w {
            let t = Tile::new(col, row);
            for n in [t.step(Direction::Right), t.step(Direction::Down)] {
                if n.col < w && n.row < h
                    && let Some(wall) = wall_between(t, n)
                    && !open.contains(&wall)
                {
                    walls.push(wall);
                }
            }
        }
    }
    Maze::new(w, h, walls)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::VecDeque;

    fn reachable(m: &Maze, from: Tile) -> usize {
        let mut seen = HashSet::from([from]);
        let mut queue = VecDeque::from([from]);
        while let Some(t) = queue.pop_front() {
            for (_, n) in t.neighbors() {
                if m.is_open(t, n) && seen.insert(n) {
                    queue.push_back(n);
                }
            }
        }
        seen.len()
    }

    #[test]
    fn every_tile_is_reachable() {
        for seed in 0..10 {
            let m = generate(11, 11, Some(seed));
            assert_eq!(reachable(&m, Tile::new(0, 0)), 121, "seed {}", seed);
        }
    }

    #[test]
    fn maze_is_a_spanning_tree() {
        let m = generate(8, 5, Some(7));
        let mut passages = 0;
        for t in m.config().tiles() {
            for n in [t.step(Direction::Right), t.step(Direction::Down)] {
                if m.is_open(t, n) {
                    passages += 1;
                }
            }
        }
        // a tree over n tiles has n - 1 edges
        assert_eq!(passages, 8 * 5 - 1);
    }

    #[test]
    fn same_seed_same_maze() {
        let a = generate(11, 11, Some(42)).to_file_string();
        let b = generate(11, 11, Some(42)).to_file_string();
        let c = generate(11, 11, Some(43)).to_file_string();
        assert_eq!(a, b);
        assert_ne!(a, c);
    }
}
