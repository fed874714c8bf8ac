//! the strict one-line-in, at-most-one-line-out driver loop
use std::io::{BufRead, Write};
use std::time::Instant;

use thiserror::Error;
use tracing::debug;

use crate::board::{BoardError, TorusBoard};
use crate::strategy::MovePolicy;
use crate::types::{PlayerId, TurnInstruments};
use crate::wire_protocol::{next_instruction, Instruction, ProtocolError};

/// Why the loop returned.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// the controller sent `stop`
    Stopped,
    /// the controller sent `dead`: this snake is out of the game
    Died,
}

/// Errors that abort the loop. All of them mean the session is over; there
/// is no recovery from a controller that stops making sense.
#[derive(Error, Debug)]
pub enum LoopError {
    #[allow(missing_docs)]
    #[error(transparent)]
    Protocol(#[from] ProtocolError),
    #[allow(missing_docs)]
    #[error(transparent)]
    Board(#[from] BoardError),
    /// writing a chosen direction to the output stream failed
    #[error("writing protocol output failed: {0}")]
    Write(#[from] std::io::Error),
}

/// Runs the turn loop until the controller terminates the game: one
/// blocking read per protocol line, at most one board mutation and at most
/// one output line per instruction.
///
/// `move` prompts go through `policy` and print exactly one direction
/// token. Remote moves and eliminations update the board silently; a
/// remote move that turns out illegal is fine, the cell simply stays as it
/// was. The caller decides what to do with the board after [`Outcome::Died`].
pub fn run_turns(
    board: &mut TorusBoard,
    me: PlayerId,
    policy: &mut dyn MovePolicy,
    input: &mut impl BufRead,
    output: &mut impl Write,
    instruments: &impl TurnInstruments,
) -> Result<Outcome, LoopError> {
    loop {
        let instruction = next_instruction(input)?;
        let start = Instant::now();
        match instruction {
            Instruction::Stop => return Ok(Outcome::Stopped),
            Instruction::Dead => return Ok(Outcome::Died),
            Instruction::Move => {
                let direction = policy.choose(board, me);
                writeln!(output, "{}", direction)?;
                output.flush()?;
                debug!(%direction, "answered move prompt");
            }
            Instruction::Out(player) => {
                board.eliminate(player)?;
                debug!(%player, "player eliminated");
            }
            Instruction::Remote(player, direction) => {
                if player.as_usize() >= board.player_count() {
                    return Err(BoardError::UnknownPlayer(player).into());
                }
                if !board.try_move(player, direction) {
                    debug!(%player, %direction, "remote move was illegal, board unchanged");
                }
            }
        }
        instruments.observe_turn(start.elapsed());
    }
}
