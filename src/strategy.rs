//! direction-picking policies for answering `move` prompts
use std::fmt::Debug;

use rand::rngs::SmallRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use tracing::debug;

use crate::board::TorusBoard;
use crate::types::{Direction, PlayerId};

/// The direction announced when every candidate move is known to lose.
/// Compatible harnesses expect this exact token, so it stays a fixed
/// constant rather than a computed choice.
pub const FALLBACK_DIRECTION: Direction = Direction::North;

/// A rule for answering a `move` prompt.
///
/// The legality check and the move are the same board operation, so a
/// successful choice has already been applied when `choose` returns. When
/// all four candidates are blocked the policy returns
/// [`FALLBACK_DIRECTION`] and leaves the board untouched; the controller
/// will eliminate us next.
pub trait MovePolicy: Debug {
    /// picks, and applies when legal, a direction for `player`
    fn choose(&mut self, board: &mut TorusBoard, player: PlayerId) -> Direction;
}

/// Tries the four directions in the fixed candidate order, north first.
#[derive(Debug, Clone, Copy)]
pub struct FixedOrderPolicy;

impl MovePolicy for FixedOrderPolicy {
    fn choose(&mut self, board: &mut TorusBoard, player: PlayerId) -> Direction {
        for direction in Direction::all() {
            if board.try_move(player, direction) {
                return direction;
            }
        }
        debug!(%player, "all directions blocked, falling back");
        FALLBACK_DIRECTION
    }
}

/// Shuffles the four candidate directions before each attempt, so the
/// snake wanders instead of hugging one wall.
#[derive(Debug)]
pub struct ShufflePolicy {
    rng: SmallRng,
}

impl ShufflePolicy {
    /// a policy with an unpredictable shuffle order
    pub fn from_entropy() -> Self {
        Self {
            rng: SmallRng::from_entropy(),
        }
    }

    /// a policy whose shuffle order is reproducible from `seed`
    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: SmallRng::seed_from_u64(seed),
        }
    }
}

impl MovePolicy for ShufflePolicy {
    fn choose(&mut self, board: &mut TorusBoard, player: PlayerId) -> Direction {
        let mut candidates = Direction::all();
        candidates.shuffle(&mut self.rng);
        for direction in candidates {
            if board.try_move(player, direction) {
                return direction;
            }
        }
        debug!(%player, "all directions blocked, falling back");
        FALLBACK_DIRECTION
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::Position;

    fn lone_player_board() -> TorusBoard {
        TorusBoard::new(5, 5, vec![Position { x: 2, y: 2 }]).unwrap()
    }

    /// player 0 at the center of a 3x3 board with all four neighbors
    /// already taken by other starting snakes
    fn surrounded_board() -> TorusBoard {
        TorusBoard::new(
            3,
            3,
            vec![
                Position { x: 1, y: 1 },
                Position { x: 1, y: 0 },
                Position { x: 1, y: 2 },
                Position { x: 0, y: 1 },
                Position { x: 2, y: 1 },
            ],
        )
        .unwrap()
    }

    #[test]
    fn test_fixed_order_prefers_north() {
        let mut board = lone_player_board();
        let direction = FixedOrderPolicy.choose(&mut board, PlayerId(0));
        assert_eq!(direction, Direction::North);
        assert_eq!(board.head_of(PlayerId(0)), Position { x: 2, y: 1 });
    }

    #[test]
    fn test_fixed_order_falls_through_blocked_directions() {
        // north of (0,0) wraps to (0,2), where player 1 starts
        let mut board = TorusBoard::new(
            3,
            3,
            vec![Position { x: 0, y: 0 }, Position { x: 0, y: 2 }],
        )
        .unwrap();
        let direction = FixedOrderPolicy.choose(&mut board, PlayerId(0));
        assert_eq!(direction, Direction::South);
        assert_eq!(board.head_of(PlayerId(0)), Position { x: 0, y: 1 });
    }

    #[test]
    fn test_fixed_order_fallback_leaves_board_unchanged() {
        let mut board = surrounded_board();
        let before = board.clone();
        let direction = FixedOrderPolicy.choose(&mut board, PlayerId(0));
        assert_eq!(direction, FALLBACK_DIRECTION);
        assert_eq!(board, before);
    }

    #[test]
    fn test_shuffle_applies_a_legal_move() {
        let mut board = lone_player_board();
        let mut policy = ShufflePolicy::seeded(7);
        let direction = policy.choose(&mut board, PlayerId(0));
        assert_eq!(
            board.head_of(PlayerId(0)),
            board.shifted(Position { x: 2, y: 2 }, direction)
        );
        assert_eq!(board.get(board.head_of(PlayerId(0))), Some(PlayerId(0)));
    }

    #[test]
    fn test_shuffle_is_reproducible_from_a_seed() {
        let choices = |seed: u64| -> Vec<Direction> {
            let mut board = lone_player_board();
            let mut policy = ShufflePolicy::seeded(seed);
            (0..8).map(|_| policy.choose(&mut board, PlayerId(0))).collect()
        };
        assert_eq!(choices(42), choices(42));
    }

    #[test]
    fn test_shuffle_fallback_is_north() {
        let mut board = surrounded_board();
        let before = board.clone();
        let mut policy = ShufflePolicy::seeded(0);
        assert_eq!(policy.choose(&mut board, PlayerId(0)), Direction::North);
        assert_eq!(board, before);
    }
}
