//! Turn state, move orchestration and win/tie detection.

use crate::{
    c4r::{Board, CellState, Column, Player},
    config::{validate_dimensions, GameConfig},
    error::{BoardError, ConfigError, GameError},
};

/// Number of consecutive pieces needed to win.
pub const WIN_LENGTH: usize = 4;

/// Directions (row delta, col delta) of the rays anchored at each cell.
const RAYS: [(isize, isize); 4] = [
    (0, 1),  // Horizontal
    (1, 0),  // Vertical
    (1, 1),  // Diagonal (top-left to bottom-right)
    (1, -1), // Diagonal (top-right to bottom-left)
];

/// Result of a single call to [GameSession::play_move].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveOutcome {
    Continue,
    Win(Player),
    Tie,
}

impl MoveOutcome {
    /// Whether this outcome ends the game.
    pub fn is_terminal(self) -> bool {
        !matches!(self, MoveOutcome::Continue)
    }

    /// The end-of-game announcement, if any.
    pub fn message(self) -> Option<String> {
        match self {
            MoveOutcome::Continue => None,
            MoveOutcome::Win(player) => Some(format!("{} won!", player)),
            MoveOutcome::Tie => Some("Tie Game!".to_string()),
        }
    }
}

/// Where the most recent piece landed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Placement {
    pub row: usize,
    pub column: Column,
    pub player: Player,
}

/// A single game of Connect Four.
///
/// The session is `Active` while [GameSession::outcome] is None and `Over` once a win or tie has
/// been reached. `Over` is terminal: start a new game by constructing a fresh session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameSession {
    board: Board,
    active: Player,
    outcome: Option<MoveOutcome>,
    last_placement: Option<Placement>,
}

impl GameSession {
    /// Creates a game on an empty `width` x `height` board with [Player::One] to move.
    pub fn new(width: usize, height: usize) -> Result<GameSession, ConfigError> {
        validate_dimensions(width, height)?;
        Ok(Self::from_board(Board::new(width, height), Player::One))
    }

    pub fn from_config(config: &GameConfig) -> Result<GameSession, ConfigError> {
        Self::new(config.width, config.height)
    }

    /// Resumes play from an existing position with `active` to move.
    /// A position that already contains a win or is full starts out `Over`.
    pub fn from_board(board: Board, active: Player) -> GameSession {
        let outcome = [active.other(), active]
            .into_iter()
            .find(|p| check_for_win(&board, *p))
            .map(MoveOutcome::Win)
            .or_else(|| board.is_full().then_some(MoveOutcome::Tie));

        GameSession {
            board,
            active,
            outcome,
            last_placement: None,
        }
    }

    /// Plays a move for the active player in the given column.
    ///
    /// A full column is ignored: the result is [MoveOutcome::Continue] and the turn does not
    /// advance. Moves after the game has ended are rejected with [GameError::GameOver].
    pub fn play_move(&mut self, column: Column) -> Result<MoveOutcome, GameError> {
        if self.outcome.is_some() {
            log::warn!("rejected move in column {}: game is over", column);
            return Err(GameError::GameOver);
        }

        let player = self.active;
        let row = match self.board.drop_piece(column, player) {
            Ok(row) => row,
            Err(BoardError::FullColumn { .. }) => {
                log::debug!("column {} is full; ignoring move by {}", column, player);
                return Ok(MoveOutcome::Continue);
            }
            Err(BoardError::InvalidColumn { column, width }) => {
                log::warn!("rejected move in column {} (width {})", column, width);
                return Err(GameError::InvalidColumn { column, width });
            }
        };
        self.last_placement = Some(Placement {
            row,
            column,
            player,
        });
        log::debug!("{} dropped into column {}, landed on row {}", player, column, row);

        // Win is checked before tie so a board-filling winning move still counts as a win.
        let outcome = if self.check_for_win(player) {
            MoveOutcome::Win(player)
        } else if self.board.is_full() {
            MoveOutcome::Tie
        } else {
            self.active = player.other();
            MoveOutcome::Continue
        };

        if outcome.is_terminal() {
            log::info!("game over after {} plies: {:?}", self.board.ply(), outcome);
            self.outcome = Some(outcome);
        }
        Ok(outcome)
    }

    /// Determines whether `player` has four in a row anywhere on the board.
    pub fn check_for_win(&self, player: Player) -> bool {
        check_for_win(&self.board, player)
    }

    /// The player who moves next (or who made the winning move once the game is over).
    pub fn active_player(&self) -> Player {
        self.active
    }

    /// Returns the state of the given cell for rendering.
    pub fn cell_state(&self, row: usize, column: Column) -> Result<CellState, GameError> {
        self.board
            .cell(row, column)
            .ok_or(GameError::InvalidCell { row, column })
    }

    /// The terminal outcome, once the game is over.
    pub fn outcome(&self) -> Option<MoveOutcome> {
        self.outcome
    }

    pub fn is_over(&self) -> bool {
        self.outcome.is_some()
    }

    pub fn last_placement(&self) -> Option<Placement> {
        self.last_placement
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn width(&self) -> usize {
        self.board.width()
    }

    pub fn height(&self) -> usize {
        self.board.height()
    }
}

impl Default for GameSession {
    fn default() -> Self {
        Self::from_board(Board::default(), Player::One)
    }
}

/// Scans every cell for a ray of [WIN_LENGTH] pieces belonging to `player`.
pub fn check_for_win(board: &Board, player: Player) -> bool {
    (0..board.height()).any(|row| {
        (0..board.width()).any(|col| {
            RAYS.iter()
                .any(|&(d_row, d_col)| is_winning_ray(board, player, row, col, d_row, d_col))
        })
    })
}

/// True if all cells of the ray starting at (`row`, `col`) are on the board and owned by
/// `player`.
fn is_winning_ray(
    board: &Board,
    player: Player,
    row: usize,
    col: usize,
    d_row: isize,
    d_col: isize,
) -> bool {
    (0..WIN_LENGTH as isize).all(|i| {
        let r = row as isize + d_row * i;
        let c = col as isize + d_col * i;
        if r < 0 || c < 0 {
            return false;
        }
        let (r, c) = (r as usize, c as usize);
        r < board.height() && c < board.width() && board.occupant(r, c) == Some(player)
    })
}
