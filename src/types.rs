//! core types shared by the board model and the protocol driver
use crate::wire_protocol::ProtocolError;
use serde::{Serialize, Serializer};
use std::fmt::{self, Debug};
use std::str::FromStr;
use std::time::Duration;

/// A vector with which to do positional math
#[derive(Debug, Clone, Copy)]
pub struct Vector {
    /// x offset
    pub x: i64,
    /// y offset
    pub y: i64,
}

/// Represents one of the four compass directions a snake can move in.
///
/// `North` decreases `y` and `South` increases it; the board wraps on both
/// axes, so every direction always names a cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Direction {
    #[allow(missing_docs)]
    North,
    #[allow(missing_docs)]
    South,
    #[allow(missing_docs)]
    East,
    #[allow(missing_docs)]
    West,
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Direction::North => write!(f, "N"),
            Direction::South => write!(f, "S"),
            Direction::East => write!(f, "E"),
            Direction::West => write!(f, "W"),
        }
    }
}

impl Direction {
    /// convert this direction to a unit vector in grid space
    pub fn to_vector(self) -> Vector {
        match self {
            Direction::North => Vector { x: 0, y: -1 },
            Direction::South => Vector { x: 0, y: 1 },
            Direction::East => Vector { x: 1, y: 0 },
            Direction::West => Vector { x: -1, y: 0 },
        }
    }

    /// returns all four directions, in the fixed candidate order policies
    /// try them in
    pub fn all() -> Vec<Direction> {
        vec![
            Direction::North,
            Direction::South,
            Direction::East,
            Direction::West,
        ]
    }

    /// the direction that undoes this one on an unobstructed board
    pub fn opposite(&self) -> Direction {
        match self {
            Direction::North => Direction::South,
            Direction::South => Direction::North,
            Direction::East => Direction::West,
            Direction::West => Direction::East,
        }
    }
}

impl FromStr for Direction {
    type Err = ProtocolError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "N" => Ok(Direction::North),
            "S" => Ok(Direction::South),
            "E" => Ok(Direction::East),
            "W" => Ok(Direction::West),
            _ => Err(ProtocolError::UnknownDirection(s.to_string())),
        }
    }
}

/// token to represent a player index on the shared board
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[repr(transparent)]
pub struct PlayerId(pub u8);

impl PlayerId {
    /// convert this player ID to a usize
    pub fn as_usize(&self) -> usize {
        self.0 as usize
    }
}

impl fmt::Display for PlayerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl Serialize for PlayerId {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_u8(self.0)
    }
}

/// Instruments to be used with the turn loop
pub trait TurnInstruments: Debug {
    /// called once per processed instruction with how long it took
    fn observe_turn(&self, duration: Duration);
}
