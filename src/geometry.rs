//! # Grid Geometry
//!
//! Tiles, continuous positions, grid corners and wall segments. A tile
//! `(col, row)` covers the unit square whose top-left corner is `(col, row)`,
//! so its center sits at `(col + 0.5, row + 0.5)`. Rows grow downward.

use serde::{Deserialize, Serialize};
use std::fmt;

/// One discrete cell of the maze.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Tile {
    pub col: i32,
    pub row: i32,
}

impl Tile {
    pub const fn new(col: i32, row: i32) -> Self {
        Self { col, row }
    }

    pub fn center(self) -> Position {
        Position::new(self.col as f64 + 0.5, self.row as f64 + 0.5)
    }

    pub fn step(self, dir: Direction) -> Tile {
        let (dc, dr) = dir.delta();
        Tile::new(self.col + dc, self.row + dr)
    }

    pub fn neighbors(self) -> impl Iterator<Item = (Direction, Tile)> {
        Direction::PRIORITY.into_iter().map(move |d| (d, self.step(d)))
    }

    /// True when the two tiles share an edge.
    pub fn is_adjacent(self, other: Tile) -> bool {
        (self.col - other.col).abs() + (self.row - other.row).abs() == 1
    }
}

impl fmt::Display for Tile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({},{})", self.col, self.row)
    }
}

/// A continuous point in grid space.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Position {
    pub x: f64,
    pub y: f64,
}

impl Position {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn distance(self, other: Position) -> f64 {
        ((self.x - other.x).powi(2) + (self.y - other.y).powi(2)).sqrt()
    }
}

/// Movement directions, listed in exploration priority order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Direction {
    Down,
    Right,
    Up,
    Left,
}

impl Direction {
    /// Order in which the planner tries neighbors.
    pub const PRIORITY: [Direction; 4] = [
        Direction::Down,
        Direction::Right,
        Direction::Up,
        Direction::Left,
    ];

    pub fn delta(self) -> (i32, i32) {
        match self {
            Direction::Down => (0, 1),
            Direction::Right => (1, 0),
            Direction::Up => (0, -1),
            Direction::Left => (-1, 0),
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Direction::Down => "down",
            Direction::Right => "right",
            Direction::Up => "up",
            Direction::Left => "left",
        }
    }
}

/// A lattice point where grid lines cross.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Corner {
    pub x: i32,
    pub y: i32,
}

impl Corner {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

/// A blocked edge between two grid corners, lower corner first.
///
/// Construct through [`Wall::new`] so that `(a, b)` and `(b, a)` compare equal.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Wall {
    a: Corner,
    b: Corner,
}

impl Wall {
    pub fn new(p: Corner, q: Corner) -> Self {
        if p <= q { Self { a: p, b: q } } else { Self { a: q, b: p } }
    }

    pub fn from_coords(x0: i32, y0: i32, x1: i32, y1: i32) -> Self {
        Self::new(Corner::new(x0, y0), Corner::new(x1, y1))
    }

    pub fn start(&self) -> Corner {
        self.a
    }

    pub fn end(&self) -> Corner {
        self.b
    }

    /// Axis-aligned segment of length one.
    pub fn is_unit(&self) -> bool {
        (self.a.x == self.b.x && self.b.y - self.a.y == 1)
            || (self.a.y == self.b.y && self.b.x - self.a.x == 1)
    }

    /// The part of an axis-aligned segment that lies on the grid lines of a
    /// `width` x `height` grid. `None` if nothing remains or the segment is
    /// diagonal or degenerate.
    ///
    /// # Arguments
    ///
    /// * `width`, `height` - grid size in tiles; corners range over
    ///   `0..=width` and `0..=height`.
    pub fn clip(&self, width: i32, height: i32) -> Option<Wall> {
        let (a, b) = (self.a, self.b);
        let w = if a.x == b.x && a.y < b.y {
            if !(0..=width).contains(&a.x) {
                return None;
            }
            Wall::from_coords(a.x, a.y.max(0), a.x, b.y.min(height))
        } else if a.y == b.y && a.x < b.x {
            if !(0..=height).contains(&a.y) {
                return None;
            }
            Wall::from_coords(a.x.max(0), a.y, b.x.min(width), a.y)
        } else {
            return None;
        };
        (w.a < w.b).then_some(w)
    }

    /// Splits an axis-aligned segment into unit edges. Diagonal and
    /// zero-length segments yield nothing.
    pub fn unit_edges(&self) -> Vec<Wall> {
        let (a, b) = (self.a, self.b);
        if a.x == b.x && a.y < b.y {
            (a.y..b.y)
                .map(|y| Wall::from_coords(a.x, y, a.x, y + 1))
                .collect()
        } else if a.y == b.y && a.x < b.x {
            (a.x..b.x)
                .map(|x| Wall::from_coords(x, a.y, x + 1, a.y))
                .collect()
        } else {
            vec![]
        }
    }
}

impl fmt::Display for Wall {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} {} {}", self.a.x, self.a.y, self.b.x, self.b.y)
    }
}

/// The tile containing `pos`.
pub fn tile_of(pos: Position) -> Tile {
    Tile::new(pos.x.floor() as i32, pos.y.floor() as i32)
}

/// Returns the newly reached tile if `pos` is within `threshold` of its
/// tile's center and that tile differs from `previous`.
pub fn has_arrived(pos: Position, previous: Option<Tile>, threshold: f64) -> Option<Tile> {
    let tile = tile_of(pos);
    if previous != Some(tile) && pos.distance(tile.center()) < threshold {
        Some(tile)
    } else {
        None
    }
}

/// The edge shared by two adjacent tiles, or `None` if they are not adjacent.
pub fn wall_between(a: Tile, b: Tile) -> Option<Wall> {
    if !a.is_adjacent(b) {
        return None;
    }
    let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
    let wall = if lo.col == hi.col {
        // vertically stacked: the edge is the bottom of `lo`
        Wall::from_coords(lo.col, hi.row, lo.col + 1, hi.row)
    } else {
        Wall::from_coords(hi.col, lo.row, hi.col, lo.row + 1)
    };
    Some(wall)
}
