//! # Maze Files
//!
//! The interchange format is one `wall x0 y0 x1 y1` record per line, with
//! grid coordinates in `0..=width` and `0..=height`. The file carries no
//! header; dimensions are taken from the largest coordinate seen.

use crate::config::MazeConfig;
use crate::geometry::{Tile, Wall};
use crate::knowledge::{WallKnowledge, WallSet, boundary};
use itertools::Itertools;
use std::path::Path;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum MazeFileError {
    #[error("line {line}: {msg}")]
    Syntax { line: usize, msg: String },
    #[error("maze file has no walls")]
    Empty,
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

/// A fully known maze.
#[derive(Clone, Debug)]
pub struct Maze {
    pub width: i32,
    pub height: i32,
    walls: WallSet,
}

impl Maze {
    /// Builds a maze from interior walls; the boundary is always added.
    pub fn new(width: i32, height: i32, walls: impl IntoIterator<Item = Wall>) -> Self {
        let mut set = WallSet::new();
        set.extend(boundary(width, height));
        set.extend(walls);
        Self {
            width,
            height,
            walls: set,
        }
    }

    pub fn parse(text: &str) -> Result<Self, MazeFileError> {
        let mut walls = vec![];
        for (i, raw) in text.lines().enumerate() {
            let line = raw.trim();
            if line.is_empty() {
                continue;
            }
            let syntax = |msg: String| MazeFileError::Syntax { line: i + 1, msg };
            let toks = line.split_whitespace().collect_vec();
            if toks[0] != "wall" {
                return Err(syntax(format!("unknown record {:?}", toks[0])));
            }
            if toks.len() != 5 {
                return Err(syntax(format!("expected 4 coordinates, got {}", toks.len() - 1)));
            }
            let c = toks[1..]
                .iter()
                .map(|t| t.parse::<i32>())
                .collect::<Result<Vec<_>, _>>()
                .map_err(|e| syntax(e.to_string()))?;
            if c.iter().any(|&v| v < 0) {
                return Err(syntax("negative coordinate".to_string()));
            }
            walls.push(Wall::from_coords(c[0], c[1], c[2], c[3]));
        }
        if walls.is_empty() {
            return Err(MazeFileError::Empty);
        }
        let width = walls.iter().flat_map(|w| [w.start().x, w.end().x]).max().unwrap_or(0);
        let height = walls.iter().flat_map(|w| [w.start().y, w.end().y]).max().unwrap_or(0);
        Ok(Self::new(width, height, walls))
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, MazeFileError> {
        let text = std::fs::read_to_string(path)?;
        Self::parse(&text)
    }

    /// Serializes every unit wall, boundary included, in sorted order.
    pub fn to_file_string(&self) -> String {
        self.walls
            .iter()
            .sorted()
            .map(|w| format!("wall {}", w))
            .join("\n")
    }

    /// `{"width", "height", "walls"}` with walls as sorted corner pairs.
    pub fn to_json(&self) -> serde_json::Value {
        serde_json::json!({
            "width": self.width,
            "height": self.height,
            "walls": self.walls.iter().sorted().collect_vec(),
        })
    }

    pub fn config(&self) -> MazeConfig {
        MazeConfig::new(self.width, self.height)
    }

    pub fn in_bounds(&self, t: Tile) -> bool {
        self.config().contains(t)
    }

    /// True when `a` and `b` are adjacent in-maze tiles with no wall between.
    pub fn is_open(&self, a: Tile, b: Tile) -> bool {
        self.in_bounds(a) && self.in_bounds(b) && !self.walls.is_wall(a, b)
    }

    pub fn walls(&self) -> &WallSet {
        &self.walls
    }

    /// Unit walls on the four sides of `t`.
    pub fn walls_around(&self, t: Tile) -> Vec<Wall> {
        t.neighbors()
            .filter_map(|(_, n)| crate::geometry::wall_between(t, n))
            .filter(|w| self.walls.contains(w))
            .collect()
    }
}

impl WallKnowledge for Maze {
    fn contains(&self, wall: &Wall) -> bool {
        self.walls.contains(wall)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SMALL: &str = "wall 0 0 1 0\nwall 1 0 2 0\nwall 0 0 0 1\nwall 2 0 2 1\n\
                         wall 0 1 0 2\nwall 2 1 2 2\nwall 0 2 1 2\nwall 1 2 2 2\n\
                         wall 1 0 1 1\n";

    #[test]
    fn parses_and_infers_size() {
        let m = Maze::parse(SMALL).unwrap();
        assert_eq!((m.width, m.height), (2, 2));
        assert!(!m.is_open(Tile::new(0, 0), Tile::new(1, 0)));
        assert!(m.is_open(Tile::new(0, 0), Tile::new(0, 1)));
        assert!(m.is_open(Tile::new(0, 1), Tile::new(1, 1)));
        assert!(!m.is_open(Tile::new(1, 1), Tile::new(2, 1)));
    }

    #[test]
    fn file_text_reparses_to_same_walls() {
        let m = Maze::parse(SMALL).unwrap();
        let again = Maze::parse(&m.to_file_string()).unwrap();
        assert_eq!(again.walls().len(), m.walls().len());
        assert!(m.walls().iter().all(|w| again.walls().contains(w)));
    }

    #[test]
    fn json_lists_sorted_walls() {
        let m = Maze::parse(SMALL).unwrap();
        let v = m.to_json();
        assert_eq!(v["width"], 2);
        let walls = v["walls"].as_array().unwrap();
        assert_eq!(walls.len(), m.walls().len());
        assert_eq!(walls[0]["a"], serde_json::json!({"x": 0, "y": 0}));
        assert_eq!(walls[0]["b"], serde_json::json!({"x": 0, "y": 1}));
    }

    #[test]
    fn reports_syntax_errors_with_line_numbers() {
        let err = Maze::parse("wall 0 0 1 0\nwall 0 0 1\n").unwrap_err();
        assert!(matches!(err, MazeFileError::Syntax { line: 2, .. }), "{}", err);
        assert!(matches!(
            Maze::parse("door 0 0 1 0"),
            Err(MazeFileError::Syntax { line: 1, .. })
        ));
        assert!(matches!(Maze::parse("\n\n"), Err(MazeFileError::Empty)));
    }

    #[test]
    fn walls_around_reports_each_side() {
        let m = Maze::parse(SMALL).unwrap();
        let around = m.walls_around(Tile::new(0, 0));
        assert_eq!(around.len(), 3);
        assert!(around.contains(&Wall::from_coords(1, 0, 1, 1)));
    }
}
