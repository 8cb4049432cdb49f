use pyo3::{exceptions::PyValueError, prelude::*};

use crate::{
    c4r::CellState,
    game::{GameSession, MoveOutcome},
};

/// Python wrapper around [GameSession], exposed as `c4_game.GameSession`.
#[pyclass(name = "GameSession", module = "c4_game")]
pub struct PyGameSession {
    inner: GameSession,
}

#[pymethods]
impl PyGameSession {
    #[new]
    #[pyo3(signature = (width = 7, height = 6))]
    fn new(width: usize, height: usize) -> PyResult<Self> {
        let inner = GameSession::new(width, height).map_err(pyify_err)?;
        Ok(PyGameSession { inner })
    }

    /// Drops a piece for the active player. Returns "continue", "win" or "tie".
    /// Out-of-range columns and moves after the game has ended raise `ValueError`.
    fn play_move(&mut self, column: usize) -> PyResult<&'static str> {
        let outcome = self.inner.play_move(column).map_err(pyify_err)?;
        Ok(match outcome {
            MoveOutcome::Continue => "continue",
            MoveOutcome::Win(_) => "win",
            MoveOutcome::Tie => "tie",
        })
    }

    /// Id (1 or 2) of the player to move.
    fn active_player(&self) -> u8 {
        self.inner.active_player().id()
    }

    /// 0 for an empty cell, otherwise the occupying player's id.
    fn cell_state(&self, row: usize, column: usize) -> PyResult<u8> {
        match self.inner.cell_state(row, column).map_err(pyify_err)? {
            CellState::Empty => Ok(0),
            CellState::Occupied(player) => Ok(player.id()),
        }
    }

    fn winner(&self) -> Option<u8> {
        match self.inner.outcome() {
            Some(MoveOutcome::Win(player)) => Some(player.id()),
            _ => None,
        }
    }

    fn is_over(&self) -> bool {
        self.inner.is_over()
    }

    #[getter]
    fn width(&self) -> usize {
        self.inner.width()
    }

    #[getter]
    fn height(&self) -> usize {
        self.inner.height()
    }

    /// String representation of the board.
    fn board_str(&self) -> String {
        self.inner.board().to_string()
    }

    fn __repr__(&self) -> String {
        format!(
            "GameSession(width={}, height={}, ply={})",
            self.inner.width(),
            self.inner.height(),
            self.inner.board().ply()
        )
    }
}

/// Convert a Rust error into a Python exception.
fn pyify_err<T>(e: T) -> PyErr
where
    T: std::fmt::Display,
{
    PyErr::new::<PyValueError, _>(e.to_string())
}
