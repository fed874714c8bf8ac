//! the shared board model: a toroidal grid of permanent snake trails
use std::fmt;

use fxhash::FxHashSet;
use serde::Serialize;
use thiserror::Error;

use crate::types::{Direction, PlayerId, Vector};

/// Upper bound on the roster size imposed by the `u8` player index.
pub const MAX_PLAYERS: usize = u8::MAX as usize + 1;

/// Struct that matches the `<x>,<y>` coordinate pairs from the wire
/// protocol. `x` grows east, `y` grows south.
#[derive(Serialize, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Position {
    /// x position
    pub x: i32,
    /// y position
    pub y: i32,
}

impl Position {
    /// this position offset by the given vector, without wrapping
    pub fn add_vec(&self, v: Vector) -> Position {
        Position {
            x: (self.x as i64 + v.x) as i32,
            y: (self.y as i64 + v.y) as i32,
        }
    }
}

/// Errors surfaced when the board's documented preconditions are violated.
/// The protocol controller is trusted, so the driver treats all of these
/// as fatal.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum BoardError {
    /// the grid needs at least one cell on each axis
    #[error("board dimensions must be nonzero, got {width}x{height}")]
    ZeroDimension {
        /// requested width
        width: u32,
        /// requested height
        height: u32,
    },
    /// more starting positions than player indices
    #[error("{0} players exceed the roster limit")]
    TooManyPlayers(usize),
    /// a starting position outside `[0,width) x [0,height)`
    #[error("starting position {x},{y} for player {player} is off the board")]
    StartOffBoard {
        /// the player whose start was rejected
        player: PlayerId,
        /// x coordinate as announced
        x: i32,
        /// y coordinate as announced
        y: i32,
    },
    /// two players assigned the same starting cell
    #[error("starting cell {x},{y} for player {player} is already taken")]
    StartingCellTaken {
        /// the later of the two colliding players
        player: PlayerId,
        /// x coordinate of the contested cell
        x: i32,
        /// y coordinate of the contested cell
        y: i32,
    },
    /// a player number outside the roster
    #[error("player {0} is not part of this game")]
    UnknownPlayer(PlayerId),
    /// an elimination event named a player that is already out
    #[error("player {0} was already eliminated")]
    AlreadyEliminated(PlayerId),
}

/// The shared game board: a width x height toroidal grid where every cell a
/// snake enters stays occupied by that snake until the process exits.
///
/// Each player's most recently occupied cell is its head; heads never leave
/// the grid because every shift is reduced modulo the dimensions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TorusBoard {
    cells: Vec<Option<PlayerId>>,
    width: u32,
    height: u32,
    heads: Vec<Position>,
    alive: FxHashSet<PlayerId>,
}

impl TorusBoard {
    /// Builds the starting board: an all-empty grid with each player's index
    /// placed at its starting cell. Player numbers are assigned by position
    /// order, the same order the wire protocol announces them in.
    pub fn new(
        width: u32,
        height: u32,
        starting_positions: Vec<Position>,
    ) -> Result<Self, BoardError> {
        if width == 0 || height == 0 {
            return Err(BoardError::ZeroDimension { width, height });
        }
        if starting_positions.len() > MAX_PLAYERS {
            return Err(BoardError::TooManyPlayers(starting_positions.len()));
        }
        let n_players = starting_positions.len();
        let mut board = Self {
            cells: vec![None; width as usize * height as usize],
            width,
            height,
            heads: starting_positions.clone(),
            alive: (0..n_players).map(|i| PlayerId(i as u8)).collect(),
        };
        for (i, pos) in starting_positions.iter().enumerate() {
            let player = PlayerId(i as u8);
            if board.off_board(*pos) {
                return Err(BoardError::StartOffBoard {
                    player,
                    x: pos.x,
                    y: pos.y,
                });
            }
            let idx = board.cell_index(*pos);
            if board.cells[idx].is_some() {
                return Err(BoardError::StartingCellTaken {
                    player,
                    x: pos.x,
                    y: pos.y,
                });
            }
            board.cells[idx] = Some(player);
        }
        Ok(board)
    }

    /// grid width
    pub fn width(&self) -> u32 {
        self.width
    }

    /// grid height
    pub fn height(&self) -> u32 {
        self.height
    }

    /// how many players were placed on the board at startup
    pub fn player_count(&self) -> usize {
        self.heads.len()
    }

    /// the current head position of the given player
    pub fn head_of(&self, player: PlayerId) -> Position {
        self.heads[player.as_usize()]
    }

    /// whether the given player has not been eliminated yet
    pub fn is_alive(&self, player: PlayerId) -> bool {
        self.alive.contains(&player)
    }

    /// the player occupying the given in-bounds cell, if any
    pub fn get(&self, position: Position) -> Option<PlayerId> {
        self.cells[self.cell_index(position)]
    }

    fn cell_index(&self, position: Position) -> usize {
        position.y as usize * self.width as usize + position.x as usize
    }

    fn off_board(&self, position: Position) -> bool {
        position.x < 0
            || position.x >= self.width as i32
            || position.y < 0
            || position.y >= self.height as i32
    }

    /// Reduces a position at most one step outside the grid back onto it,
    /// wrapping over the edge it left through. In-bounds positions come
    /// back unchanged.
    pub fn wrapped_position(&self, mut position: Position) -> Position {
        if self.off_board(position) {
            if position.x < 0 {
                debug_assert!(position.x == -1);
                position.x = self.width as i32 - 1;
            } else if position.x >= self.width as i32 {
                debug_assert!(position.x == self.width as i32);
                position.x = 0;
            } else if position.y < 0 {
                debug_assert!(position.y == -1);
                position.y = self.height as i32 - 1;
            } else {
                debug_assert!(position.y == self.height as i32);
                position.y = 0;
            }
        }
        position
    }

    /// Returns `position` shifted one step in `direction`, wrapped onto the
    /// grid. Pure with respect to board state.
    pub fn shifted(&self, position: Position, direction: Direction) -> Position {
        self.wrapped_position(position.add_vec(direction.to_vector()))
    }

    /// Attempts to move `player` one step in `direction`. When the target
    /// cell is empty, the head and the cell are updated and the move
    /// succeeds. When it is occupied by any trail, including the mover's
    /// own, nothing changes and the move fails.
    pub fn try_move(&mut self, player: PlayerId, direction: Direction) -> bool {
        let new_pos = self.shifted(self.heads[player.as_usize()], direction);
        if self.get(new_pos).is_none() {
            self.heads[player.as_usize()] = new_pos;
            let idx = self.cell_index(new_pos);
            self.cells[idx] = Some(player);
            true
        } else {
            false
        }
    }

    /// Marks a player as out of the game. Its trail stays on the board;
    /// only the head rendering changes. Eliminating a player that is not in
    /// the alive set is a caller error.
    pub fn eliminate(&mut self, player: PlayerId) -> Result<(), BoardError> {
        if player.as_usize() >= self.heads.len() {
            return Err(BoardError::UnknownPlayer(player));
        }
        if !self.alive.remove(&player) {
            return Err(BoardError::AlreadyEliminated(player));
        }
        Ok(())
    }

    /// builds the serializable post-mortem summary of this board
    pub fn report(&self) -> BoardReport {
        let mut alive: Vec<PlayerId> = self.alive.iter().copied().collect();
        alive.sort();
        let rows = (0..self.height as i32)
            .map(|y| {
                (0..self.width as i32)
                    .map(|x| match self.get(Position { x, y }) {
                        None => "·".to_string(),
                        Some(player) => player.to_string(),
                    })
                    .collect::<String>()
            })
            .collect();
        BoardReport {
            width: self.width,
            height: self.height,
            heads: self.heads.clone(),
            alive,
            rows,
        }
    }
}

impl fmt::Display for TorusBoard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for y in 0..self.height as i32 {
            for x in 0..self.width as i32 {
                let position = Position { x, y };
                match self.get(position) {
                    None => write!(f, "·")?,
                    Some(player) if self.heads[player.as_usize()] == position => {
                        if self.is_alive(player) {
                            write!(f, "\x1b[1m\x1b[32m{}\x1b[0m", player)?;
                        } else {
                            write!(f, "\x1b[1m\x1b[31m{}\x1b[0m", player)?;
                        }
                    }
                    Some(player) => write!(f, "{}", player)?,
                }
            }
            if y + 1 < self.height as i32 {
                writeln!(f)?;
            }
        }
        Ok(())
    }
}

/// Snapshot of a finished game used for the structured post-mortem report.
#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
pub struct BoardReport {
    /// grid width
    pub width: u32,
    /// grid height
    pub height: u32,
    /// each player's final head position, in player-number order
    pub heads: Vec<Position>,
    /// players still alive when the game ended
    pub alive: Vec<PlayerId>,
    /// grid rows top to bottom, `·` marking empty cells
    pub rows: Vec<String>,
}
