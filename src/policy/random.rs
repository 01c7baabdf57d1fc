//! Random opponents and random starting positions.

use tracing::warn;

use crate::core::{Error, Result, SeededRng, BOARD_CELLS};
use crate::game::{index_to_coords, Board};

/// Default cap on rejection-sampling draws for one move.
pub const DEFAULT_MAX_ATTEMPTS: usize = 1000;

/// Chooses moves for the side not controlled by the network.
pub trait OpponentPolicy {
    /// Play one move on `board` and return the cell.
    fn play(&self, board: &mut Board, rng: &mut SeededRng) -> Result<(usize, usize)>;
}

/// Uniform random legal moves by rejection sampling.
///
/// Draws a cell index in `0..9` and redraws while the cell is occupied.
#[derive(Clone, Debug)]
pub struct RandomMover {
    max_attempts: usize,
}

impl Default for RandomMover {
    fn default() -> Self {
        Self {
            max_attempts: DEFAULT_MAX_ATTEMPTS,
        }
    }
}

impl RandomMover {
    pub fn new(max_attempts: usize) -> Self {
        Self { max_attempts }
    }

    /// Pick a random Empty cell without playing it.
    pub fn pick(&self, board: &Board, rng: &mut SeededRng) -> Result<(usize, usize)> {
        if board.legal_moves().is_empty() {
            return Err(Error::NoLegalMove);
        }
        for _ in 0..self.max_attempts {
            let (x, y) = index_to_coords(rng.gen_range_usize(0..BOARD_CELLS));
            if board.legal(x, y)? {
                return Ok((x, y));
            }
        }
        warn!(attempts = self.max_attempts, "random move sampling exhausted");
        Err(Error::RetryExhausted {
            what: "random move",
            attempts: self.max_attempts,
        })
    }
}

impl OpponentPolicy for RandomMover {
    fn play(&self, board: &mut Board, rng: &mut SeededRng) -> Result<(usize, usize)> {
        let (x, y) = self.pick(board, rng)?;
        board.play(x, y)?;
        Ok((x, y))
    }
}

/// Generates non-terminal positions reached by a few random moves.
#[derive(Clone, Debug)]
pub struct RandomBoardGenerator {
    mover: RandomMover,
    max_moves: usize,
    max_retries: usize,
}

impl Default for RandomBoardGenerator {
    fn default() -> Self {
        Self {
            mover: RandomMover::default(),
            max_moves: 5,
            max_retries: 100,
        }
    }
}

impl RandomBoardGenerator {
    pub fn new(mover: RandomMover, max_moves: usize, max_retries: usize) -> Self {
        Self {
            mover,
            max_moves,
            max_retries,
        }
    }

    /// Play `0..=max_moves` random moves from an empty board.
    ///
    /// Positions that end the game are discarded and regenerated, up to
    /// `max_retries` attempts in total.
    pub fn generate(&self, rng: &mut SeededRng) -> Result<Board> {
        for _ in 0..self.max_retries {
            let mut board = Board::new();
            let moves = rng.gen_inclusive_usize(0, self.max_moves);
            for _ in 0..moves {
                if board.is_terminal() {
                    break;
                }
                self.mover.play(&mut board, rng)?;
            }
            if !board.is_terminal() {
                return Ok(board);
            }
        }
        warn!(attempts = self.max_retries, "random board generation exhausted");
        Err(Error::RetryExhausted {
            what: "random board",
            attempts: self.max_retries,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::Cell;

    #[test]
    fn test_random_move_is_legal() {
        let mover = RandomMover::default();
        let mut rng = SeededRng::new(11);

        for _ in 0..50 {
            let mut board = Board::new();
            while !board.is_terminal() {
                let before = board.clone();
                let (x, y) = mover.play(&mut board, &mut rng).unwrap();
                assert_eq!(before.cell(x, y).unwrap(), Cell::Empty);
            }
        }
    }

    #[test]
    fn test_single_free_cell_found() {
        use Cell::{Cross as X, Empty as E, Naught as O};

        let board = Board::from_cells([[O, X, O], [O, X, X], [X, O, E]]).unwrap();
        let mut rng = SeededRng::new(0);
        assert_eq!(RandomMover::default().pick(&board, &mut rng).unwrap(), (2, 2));
    }

    #[test]
    fn test_full_board_has_no_move() {
        use Cell::{Cross as X, Naught as O};

        let board = Board::from_cells([[X, O, X], [O, X, O], [O, X, O]]).unwrap();
        let mut rng = SeededRng::new(0);
        assert!(matches!(
            RandomMover::default().pick(&board, &mut rng),
            Err(Error::NoLegalMove)
        ));
    }

    #[test]
    fn test_zero_attempts_exhausts() {
        let mut rng = SeededRng::new(0);
        let result = RandomMover::new(0).pick(&Board::new(), &mut rng);
        assert!(matches!(result, Err(Error::RetryExhausted { attempts: 0, .. })));
    }

    #[test]
    fn test_generated_boards_in_progress() {
        let generator = RandomBoardGenerator::default();
        let mut rng = SeededRng::new(5);
        for _ in 0..100 {
            let board = generator.generate(&mut rng).unwrap();
            assert!(!board.is_terminal());
            let filled = board.cells().iter().flatten().filter(|c| !c.is_empty()).count();
            assert!(filled <= 5);
        }
    }

    #[test]
    fn test_generator_retry_cap() {
        let generator = RandomBoardGenerator::new(RandomMover::default(), 5, 0);
        let mut rng = SeededRng::new(5);
        assert!(matches!(
            generator.generate(&mut rng),
            Err(Error::RetryExhausted { what: "random board", .. })
        ));
    }
}
