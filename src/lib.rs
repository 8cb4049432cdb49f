//! Connect Four rules engine.
//!
//! - [`c4r`]: board model and column drops
//! - [`game`]: turn state, move outcomes and win/tie detection
//! - [`config`]: TOML configuration
//! - [`tui`]: terminal front-end over [`game::GameSession`]

pub mod c4r;
pub mod config;
pub mod error;
pub mod game;
pub mod tui;

#[cfg(feature = "python")]
mod pybridge;

#[cfg(feature = "python")]
use pyo3::prelude::*;

/// A Python module implemented in Rust. The name of this function must match
/// the `lib.name` setting in the `Cargo.toml`, else Python will not be able to
/// import the module.
#[cfg(feature = "python")]
#[pymodule]
fn c4_game(_py: Python, m: &Bound<'_, PyModule>) -> PyResult<()> {
    m.add_class::<pybridge::PyGameSession>()?;
    Ok(())
}
