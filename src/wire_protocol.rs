//! parsing for the line protocol spoken with the game controller
use std::io::BufRead;
use std::str::FromStr;

use itertools::Itertools;
use thiserror::Error;

use crate::board::Position;
use crate::types::{Direction, PlayerId};

/// Errors produced while reading or parsing protocol input. The controller
/// on the other side of the pipe is trusted to produce well-formed lines,
/// so every one of these is fatal to the driver.
#[derive(Error, Debug)]
pub enum ProtocolError {
    /// the input stream ended before the controller terminated the game
    #[error("unexpected end of protocol input")]
    UnexpectedEof,
    /// a line that should have been an `<x>,<y>` pair was not
    #[error("malformed coordinate pair {0:?}")]
    BadCoordinate(String),
    /// the player-count line of the startup header was not a number
    #[error("malformed player count {0:?}")]
    BadPlayerCount(String),
    /// a token that should have been a player number was not
    #[error("malformed player number {0:?}")]
    BadPlayerNumber(String),
    /// a direction token other than `N`, `S`, `E` or `W`
    #[error("unknown direction token {0:?}")]
    UnknownDirection(String),
    /// a per-turn line matching no instruction form
    #[error("unrecognized instruction {0:?}")]
    UnknownInstruction(String),
    /// reading from the input stream failed
    #[error("reading protocol input failed: {0}")]
    Io(#[from] std::io::Error),
}

/// Everything the controller announces before the first turn: board
/// dimensions, every player's starting cell in player-number order, and
/// which of those players this process answers `move` prompts for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Setup {
    /// grid width
    pub width: u32,
    /// grid height
    pub height: u32,
    /// starting cell per player, line order = player number
    pub starting_positions: Vec<Position>,
    /// the player this process plays
    pub my_number: PlayerId,
}

impl Setup {
    /// Reads the startup header from the given stream: `<width>,<height>`,
    /// `<n_players>`, then one `<x>,<y>` line per player, then
    /// `<my_player_number>`.
    pub fn read_from(input: &mut impl BufRead) -> Result<Self, ProtocolError> {
        let (width, height) = parse_pair::<u32>(&read_line(input)?)?;
        let count_line = read_line(input)?;
        let n_players: usize = count_line
            .parse()
            .map_err(|_| ProtocolError::BadPlayerCount(count_line.clone()))?;
        let mut starting_positions = Vec::with_capacity(n_players);
        for _ in 0..n_players {
            let (x, y) = parse_pair::<i32>(&read_line(input)?)?;
            starting_positions.push(Position { x, y });
        }
        let my_number = parse_player(&read_line(input)?)?;
        Ok(Setup {
            width,
            height,
            starting_positions,
            my_number,
        })
    }
}

/// One per-turn line from the controller, parsed into its instruction kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Instruction {
    /// `stop`: the game is over, shut down quietly
    Stop,
    /// `dead`: this snake is out; dump the final board and exit
    Dead,
    /// `move`: choose and print a direction for our own snake
    Move,
    /// `out:<n>`: player n has been eliminated
    Out(PlayerId),
    /// `<n>:<d>`: player n's move resolved in direction d
    Remote(PlayerId, Direction),
}

impl FromStr for Instruction {
    type Err = ProtocolError;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        match line {
            "stop" => Ok(Instruction::Stop),
            "dead" => Ok(Instruction::Dead),
            "move" => Ok(Instruction::Move),
            _ => {
                let (left, right) = line
                    .split(':')
                    .collect_tuple()
                    .ok_or_else(|| ProtocolError::UnknownInstruction(line.to_string()))?;
                if left == "out" {
                    Ok(Instruction::Out(parse_player(right)?))
                } else {
                    Ok(Instruction::Remote(parse_player(left)?, right.parse()?))
                }
            }
        }
    }
}

/// Reads and parses the next per-turn instruction line.
pub fn next_instruction(input: &mut impl BufRead) -> Result<Instruction, ProtocolError> {
    read_line(input)?.parse()
}

fn read_line(input: &mut impl BufRead) -> Result<String, ProtocolError> {
    let mut line = String::new();
    if input.read_line(&mut line)? == 0 {
        return Err(ProtocolError::UnexpectedEof);
    }
    Ok(line.trim_end().to_string())
}

fn parse_pair<T: FromStr>(line: &str) -> Result<(T, T), ProtocolError> {
    let (a, b) = line
        .split(',')
        .collect_tuple()
        .ok_or_else(|| ProtocolError::BadCoordinate(line.to_string()))?;
    match (a.parse(), b.parse()) {
        (Ok(a), Ok(b)) => Ok((a, b)),
        _ => Err(ProtocolError::BadCoordinate(line.to_string())),
    }
}

fn parse_player(token: &str) -> Result<PlayerId, ProtocolError> {
    token
        .parse::<u8>()
        .map(PlayerId)
        .map_err(|_| ProtocolError::BadPlayerNumber(token.to_string()))
}
