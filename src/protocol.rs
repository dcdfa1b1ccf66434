//! Outbound command lines.

use crate::geometry::{Position, Tile};
use std::fmt;

#[derive(Clone, Debug, PartialEq)]
pub enum Command {
    /// `himynameis <name>`, sent once at startup.
    Greeting(String),
    /// `toward <x> <y>`: steer toward a point.
    Toward(Position),
    /// The blank line written at the end of every cycle.
    Heartbeat,
}

impl Command {
    pub fn toward(tile: Tile) -> Self {
        Command::Toward(tile.center())
    }
}

impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Command::Greeting(name) => write!(f, "himynameis {}", name),
            Command::Toward(p) => write!(f, "toward {} {}", p.x, p.y),
            Command::Heartbeat => Ok(()),
        }
    }
}

/// Parses a `toward` line back into a target point.
pub fn parse_toward(line: &str) -> Option<Position> {
    let mut it = line.split_whitespace();
    if it.next()? != "toward" {
        return None;
    }
    let x = it.next()?.parse().ok()?;
    let y = it.next()?.parse().ok()?;
    Some(Position::new(x, y))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn formats_wire_lines() {
        assert_eq!(
            Command::Greeting("DFS-bot".to_string()).to_string(),
            "himynameis DFS-bot"
        );
        assert_eq!(Command::toward(Tile::new(0, 3)).to_string(), "toward 0.5 3.5");
        assert_eq!(Command::toward(Tile::new(10, 10)).to_string(), "toward 10.5 10.5");
        assert_eq!(Command::Heartbeat.to_string(), "");
    }

    #[test]
    fn toward_lines_parse_back() {
        let line = Command::toward(Tile::new(4, 7)).to_string();
        assert_eq!(parse_toward(&line), Some(Position::new(4.5, 7.5)));
        assert_eq!(parse_toward(""), None);
        assert_eq!(parse_toward("comment hi"), None);
        assert_eq!(parse_toward("toward 1"), None);
    }
}
