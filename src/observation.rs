//! Parsing of the sensor records streamed to the agent.

use crate::geometry::{Position, Wall};
use thiserror::Error;

#[derive(Debug, Error, PartialEq)]
pub enum ParseError {
    #[error("empty record")]
    Empty,
    #[error("unknown record kind {0:?}")]
    UnknownKind(String),
    #[error("{kind} record needs {expected} fields, got {got}")]
    MissingField {
        kind: &'static str,
        expected: usize,
        got: usize,
    },
    #[error("bad number {0:?}")]
    BadNumber(String),
}

#[derive(Clone, Debug, PartialEq)]
pub enum Observation {
    /// `bot x y [coins]`
    Bot {
        position: Position,
        coins: Option<u32>,
    },
    /// `wall x0 y0 x1 y1`
    Wall(Wall),
}

fn number(tok: &str) -> Result<f64, ParseError> {
    match tok.parse::<f64>() {
        Ok(v) if v.is_finite() => Ok(v),
        _ => Err(ParseError::BadNumber(tok.to_string())),
    }
}

/// Wall coordinates may arrive as floats; they are truncated toward zero.
fn grid_coord(tok: &str) -> Result<i32, ParseError> {
    number(tok).map(|v| v.trunc() as i32)
}

pub fn parse(line: &str) -> Result<Observation, ParseError> {
    let toks: Vec<&str> = line.split_whitespace().collect();
    let Some((&kind, args)) = toks.split_first() else {
        return Err(ParseError::Empty);
    };
    match kind {
        "bot" => {
            if args.len() < 2 {
                return Err(ParseError::MissingField {
                    kind: "bot",
                    expected: 2,
                    got: args.len(),
                });
            }
            let position = Position::new(number(args[0])?, number(args[1])?);
            let coins = args.get(2).and_then(|c| c.parse().ok());
            Ok(Observation::Bot { position, coins })
        }
        "wall" => {
            if args.len() < 4 {
                return Err(ParseError::MissingField {
                    kind: "wall",
                    expected: 4,
                    got: args.len(),
                });
            }
            let c = args[..4]
                .iter()
                .map(|t| grid_coord(t))
                .collect::<Result<Vec<_>, _>>()?;
            Ok(Observation::Wall(Wall::from_coords(c[0], c[1], c[2], c[3])))
        }
        other => Err(ParseError::UnknownKind(other.to_string())),
    }
}
